//! ConnectionManager
//! owns every wire and keeps the circuit topology as a directed graph: components are nodes,
//! wires are edges from the driving component to the driven one. enforces the connection
//! rules: one wire per pin, and every wire joins exactly one output pin to one input pin.

use std::collections::BTreeMap;

use petgraph::graphmap::DiGraphMap;
use petgraph::Direction;

use crate::circuit::components::{ComponentId, ComponentManager};
use crate::circuit::wire::{Endpoint, Wire, WireId};
use crate::error::ConnectError;
use crate::transforms::WSPoint;

#[derive(Debug, Clone, Default)]
pub struct ConnectionManager {
    /// topology: start component -> end component, weighted by the wire joining them
    graph: DiGraphMap<ComponentId, WireId>,
    /// wire bodies keyed by id, so iteration follows creation order
    wires: BTreeMap<WireId, Wire>,
    next_id: u64,
}

impl ConnectionManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// registers a wire as an edge between its endpoint components.
    /// refused (none) if either endpoint pin already has a wire, or if the start component
    /// already drives the end component: the graph holds one edge per ordered pair.
    pub fn add_wire(&mut self, wire: Wire) -> Option<WireId> {
        let (start, end) = (wire.start(), wire.end());
        if self.wire_at_pin(start.component, start.pin).is_some()
            || self.wire_at_pin(end.component, end.pin).is_some()
            || self.graph.contains_edge(start.component, end.component)
        {
            return None;
        }
        let id = WireId(self.next_id);
        self.next_id += 1;
        self.graph.add_edge(start.component, end.component, id);
        self.wires.insert(id, wire);
        Some(id)
    }

    /// unregisters and returns a wire. unknown ids are a no-op.
    pub fn remove_wire(&mut self, id: WireId) -> Option<Wire> {
        let wire = self.wires.remove(&id)?;
        let (a, b) = (wire.start_component(), wire.end_component());
        self.graph.remove_edge(a, b);
        for c in [a, b] {
            self.remove_if_isolated(c);
        }
        tracing::debug!(wire = %id, "wire removed");
        Some(wire)
    }

    fn remove_if_isolated(&mut self, component: ComponentId) {
        if self.graph.contains_node(component)
            && self.graph.neighbors_directed(component, Direction::Outgoing).next().is_none()
            && self.graph.neighbors_directed(component, Direction::Incoming).next().is_none()
        {
            self.graph.remove_node(component);
        }
    }

    pub fn wire(&self, id: WireId) -> Option<&Wire> {
        self.wires.get(&id)
    }
    pub fn wires(&self) -> impl Iterator<Item = (WireId, &Wire)> + '_ {
        self.wires.iter().map(|(id, w)| (*id, w))
    }
    pub fn len(&self) -> usize {
        self.wires.len()
    }
    pub fn is_empty(&self) -> bool {
        self.wires.is_empty()
    }

    /// ids of the wires touching any pin of `component`, outgoing first
    pub fn wire_ids_at(&self, component: ComponentId) -> Vec<WireId> {
        if !self.graph.contains_node(component) {
            return vec![];
        }
        let outgoing = self.graph.edges(component).map(|(_, _, id)| *id);
        // a self-wire is already listed as outgoing
        let incoming = self
            .graph
            .neighbors_directed(component, Direction::Incoming)
            .filter(|from| *from != component)
            .filter_map(|from| self.graph.edge_weight(from, component).copied());
        outgoing.chain(incoming).collect()
    }
    /// wires touching any pin of `component`
    pub fn wires_at(&self, component: ComponentId) -> impl Iterator<Item = (WireId, &Wire)> + '_ {
        self.wire_ids_at(component)
            .into_iter()
            .filter_map(move |id| self.wires.get(&id).map(|w| (id, w)))
    }

    /// the wire terminating at `pin` on `component`, if any
    pub fn wire_at_pin(&self, component: ComponentId, pin: usize) -> Option<WireId> {
        self.wires_at(component)
            .find(|(_, w)| w.touches(component, pin))
            .map(|(id, _)| id)
    }

    /// like [`ConnectionManager::wire_at_pin`], ignoring wires whose other end no longer exists
    fn live_wire_at_pin(
        &self,
        components: &ComponentManager,
        component: ComponentId,
        pin: usize,
    ) -> Option<WireId> {
        self.wire_at_pin(component, pin).filter(|id| {
            self.wires.get(id).is_some_and(|w| {
                components.contains(w.start_component()) && components.contains(w.end_component())
            })
        })
    }

    /// first wire whose path passes within `tolerance` of the point
    pub fn wire_at_position(&self, wsp: WSPoint, tolerance: f32) -> Option<WireId> {
        self.wires()
            .find(|(_, w)| w.is_point_on_wire(wsp, tolerance))
            .map(|(id, _)| id)
    }

    /// validates a connection request and returns the reason it would be refused
    pub fn check_connection(
        &self,
        components: &ComponentManager,
        a: ComponentId,
        pin_a: usize,
        b: ComponentId,
        pin_b: usize,
    ) -> Result<(), ConnectError> {
        if self.live_wire_at_pin(components, a, pin_a).is_some() {
            return Err(ConnectError::PinOccupied {
                component: a,
                pin: pin_a,
            });
        }
        if self.live_wire_at_pin(components, b, pin_b).is_some() {
            return Err(ConnectError::PinOccupied {
                component: b,
                pin: pin_b,
            });
        }
        let ca = components.get(a).ok_or(ConnectError::UnknownComponent(a))?;
        let cb = components.get(b).ok_or(ConnectError::UnknownComponent(b))?;
        if ca.pin(pin_a).is_none() {
            return Err(ConnectError::NoSuchPin {
                component: a,
                pin: pin_a,
            });
        }
        if cb.pin(pin_b).is_none() {
            return Err(ConnectError::NoSuchPin {
                component: b,
                pin: pin_b,
            });
        }
        if ca.is_output_pin(pin_a) == cb.is_output_pin(pin_b) {
            return Err(ConnectError::DirectionMismatch);
        }
        Ok(())
    }

    /// true iff neither pin is occupied and exactly one of them is an output
    pub fn can_connect(
        &self,
        components: &ComponentManager,
        a: ComponentId,
        pin_a: usize,
        b: ComponentId,
        pin_b: usize,
    ) -> bool {
        self.check_connection(components, a, pin_a, b, pin_b).is_ok()
    }

    /// validates, then builds, routes and registers a wire.
    /// a refused request returns none and changes nothing.
    pub fn create_connection(
        &mut self,
        components: &ComponentManager,
        a: ComponentId,
        pin_a: usize,
        b: ComponentId,
        pin_b: usize,
    ) -> Option<WireId> {
        if let Err(e) = self.check_connection(components, a, pin_a, b, pin_b) {
            tracing::debug!(%a, pin_a, %b, pin_b, reason = %e, "connection refused");
            return None;
        }
        self.prune_dangling(components);
        let wire = Wire::new(components, Endpoint::new(a, pin_a), Endpoint::new(b, pin_b))?;
        let id = self.add_wire(wire)?;
        tracing::debug!(wire = %id, %a, pin_a, %b, pin_b, "wire created");
        Some(id)
    }

    /// removes every wire with an endpoint component that no longer exists,
    /// e.g. after a removal that bypassed [`ConnectionManager::detach_component`]
    pub fn prune_dangling(&mut self, components: &ComponentManager) -> usize {
        let dead: Vec<ComponentId> = self
            .graph
            .nodes()
            .filter(|c| !components.contains(*c))
            .collect();
        let pruned: usize = dead.into_iter().map(|c| self.detach_component(c).len()).sum();
        if pruned > 0 {
            tracing::warn!(wires = pruned, "pruned wires to removed components");
        }
        pruned
    }

    /// moves a component, then updates every wire attached to it so they follow during a drag
    pub fn update_component_position(
        &mut self,
        components: &mut ComponentManager,
        component: ComponentId,
        wsp: WSPoint,
    ) -> bool {
        let Some(c) = components.get_mut(component) else {
            return false;
        };
        c.set_position(wsp);
        for id in self.wire_ids_at(component) {
            if let Some(w) = self.wires.get_mut(&id) {
                w.update(components);
            }
        }
        true
    }

    /// updates every wire: propagate, then reroute. first phase of a tick.
    pub fn update_wires(&mut self, components: &mut ComponentManager) {
        self.prune_dangling(components);
        for w in self.wires.values_mut() {
            w.update(components);
        }
    }

    /// reroutes the wires of one component without propagating, e.g. right after a rotate
    pub fn reroute_component(&mut self, components: &ComponentManager, component: ComponentId) {
        for id in self.wire_ids_at(component) {
            if let Some(w) = self.wires.get_mut(&id) {
                w.update_connections_after_rotation(components);
            }
        }
    }

    /// reroutes every wire without propagating
    pub fn reroute_all(&mut self, components: &ComponentManager) {
        for w in self.wires.values_mut() {
            w.recalculate_path(components);
        }
    }

    /// removes and returns every wire touching `component`, dropping it from the graph
    pub fn detach_component(&mut self, component: ComponentId) -> Vec<Wire> {
        let detached: Vec<Wire> = self
            .wire_ids_at(component)
            .into_iter()
            .filter_map(|id| self.wires.remove(&id))
            .collect();
        let neighbors: Vec<ComponentId> = detached
            .iter()
            .flat_map(|w| [w.start_component(), w.end_component()])
            .filter(|c| *c != component)
            .collect();
        self.graph.remove_node(component);
        for c in neighbors {
            self.remove_if_isolated(c);
        }
        detached
    }
}
