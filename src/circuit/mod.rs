//! Circuit
//! owns the component and connection registries plus the config, and drives the tick.
//! every topology or transform mutation goes through here so wires never go stale.

pub mod component;
pub mod components;
pub mod connections;
pub mod geometry;
pub mod interactable;
pub mod wire;

use component::{Component, ComponentKind, Evaluate};
use components::{ComponentId, ComponentManager};
use connections::ConnectionManager;
use geometry::Placement;
use interactable::Interactive;
use wire::{Wire, WireId};

use crate::config::SimConfig;
use crate::error::ConnectError;
use crate::transforms::{WSBox, WSPoint};

#[derive(Debug, Clone)]
pub struct Circuit {
    components: ComponentManager,
    connections: ConnectionManager,
    config: SimConfig,
    ticks: u64,
}

impl Default for Circuit {
    fn default() -> Self {
        Circuit::new(SimConfig::default())
    }
}

impl Circuit {
    pub fn new(config: SimConfig) -> Self {
        Circuit {
            components: ComponentManager::new(config.initial_viewport.into()),
            connections: ConnectionManager::new(),
            config,
            ticks: 0,
        }
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }
    pub fn components(&self) -> &ComponentManager {
        &self.components
    }
    /// direct access to one component, e.g. to set gate inputs by hand. topology stays
    /// with the circuit; call [`Circuit::refresh_routes`] after moving it.
    pub fn component_mut(&mut self, id: ComponentId) -> Option<&mut Component> {
        self.components.get_mut(id)
    }
    pub fn connections(&self) -> &ConnectionManager {
        &self.connections
    }
    pub fn component(&self, id: ComponentId) -> Option<&Component> {
        self.components.get(id)
    }
    pub fn wire(&self, id: WireId) -> Option<&Wire> {
        self.connections.wire(id)
    }
    /// number of ticks run so far
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// one evaluation pass: every wire propagates, then every component evaluates.
    /// a source change therefore reaches a directly wired consumer's output on the second tick.
    pub fn tick(&mut self) {
        self.connections.update_wires(&mut self.components);
        self.components.update_components();
        self.ticks += 1;
        tracing::trace!(tick = self.ticks, "tick");
    }

    /// places a new component, snapped to the grid if configured, at the current uniform scale
    pub fn place_component(
        &mut self,
        kind: ComponentKind,
        position: WSPoint,
        rotation: f32,
    ) -> ComponentId {
        let position = if self.config.snap_to_grid {
            geometry::snap_to_grid(position, self.config.grid_size)
        } else {
            position
        };
        let label = kind.label();
        let placement = Placement::new(position, rotation, self.components.scale());
        let id = self
            .components
            .add_component(Component::with_placement(kind, placement));
        tracing::info!(%id, kind = label, x = position.x, y = position.y, "component placed");
        id
    }

    /// registers a prebuilt component as is, without snapping or scaling
    pub fn add_component(&mut self, component: Component) -> ComponentId {
        let label = component.label();
        let id = self.components.add_component(component);
        tracing::info!(%id, kind = label, "component added");
        id
    }

    /// removes a component along with every wire touching it
    pub fn remove_component(&mut self, id: ComponentId) -> Option<Component> {
        if !self.components.contains(id) {
            tracing::warn!(%id, "remove of unknown component ignored");
            return None;
        }
        let detached = self.connections.detach_component(id);
        let component = self.components.remove_component(id)?;
        tracing::info!(%id, wires = detached.len(), "component removed");
        Some(component)
    }

    pub fn check_connection(
        &self,
        a: ComponentId,
        pin_a: usize,
        b: ComponentId,
        pin_b: usize,
    ) -> Result<(), ConnectError> {
        self.connections
            .check_connection(&self.components, a, pin_a, b, pin_b)
    }
    pub fn can_connect(&self, a: ComponentId, pin_a: usize, b: ComponentId, pin_b: usize) -> bool {
        self.check_connection(a, pin_a, b, pin_b).is_ok()
    }
    /// wires an output pin to an input pin, in either order. none if refused.
    pub fn connect(
        &mut self,
        a: ComponentId,
        pin_a: usize,
        b: ComponentId,
        pin_b: usize,
    ) -> Option<WireId> {
        self.connections
            .create_connection(&self.components, a, pin_a, b, pin_b)
    }
    /// removes a wire. the end input keeps its last value until something drives it again.
    pub fn disconnect(&mut self, id: WireId) -> Option<Wire> {
        self.connections.remove_wire(id)
    }

    /// moves a component; attached wires propagate and reroute immediately
    pub fn move_component(&mut self, id: ComponentId, wsp: WSPoint) -> bool {
        let moved = self
            .connections
            .update_component_position(&mut self.components, id, wsp);
        if moved {
            self.clear_changed(id);
        }
        moved
    }

    /// rotates by `delta` degrees
    pub fn rotate_component(&mut self, id: ComponentId, delta: f32) -> bool {
        self.transform_component(id, |c| c.rotate(delta))
    }
    pub fn set_component_rotation(&mut self, id: ComponentId, deg: f32) -> bool {
        self.transform_component(id, |c| c.set_rotation(deg))
    }
    pub fn set_component_scale(&mut self, id: ComponentId, scale: f32) -> bool {
        self.transform_component(id, |c| c.set_scale(scale))
    }

    fn transform_component(&mut self, id: ComponentId, f: impl FnOnce(&mut Component)) -> bool {
        let Some(c) = self.components.get_mut(id) else {
            tracing::warn!(%id, "transform of unknown component ignored");
            return false;
        };
        f(c);
        self.connections.reroute_component(&self.components, id);
        self.clear_changed(id);
        true
    }

    fn clear_changed(&mut self, id: ComponentId) {
        if let Some(c) = self.components.get_mut(id) {
            c.take_changed();
        }
    }

    /// flips a source's latch. none if `id` is not a live source.
    pub fn toggle_source(&mut self, id: ComponentId) -> Option<bool> {
        let latched = self.components.get_mut(id)?.toggle()?;
        tracing::info!(%id, latched, "source toggled");
        Some(latched)
    }

    /// reroutes the wires of every component whose transform changed since the last refresh
    pub fn refresh_routes(&mut self) -> usize {
        let dirty: Vec<ComponentId> = self
            .components
            .iter_mut()
            .filter_map(|(id, c)| (!c.take_changed().is_empty()).then_some(id))
            .collect();
        for id in &dirty {
            self.connections.reroute_component(&self.components, *id);
        }
        dirty.len()
    }

    pub fn component_at(&self, wsp: WSPoint) -> Option<ComponentId> {
        self.components.component_at(wsp)
    }
    /// first pin within the configured hover radius, as (component, pin index)
    pub fn pin_at(&self, wsp: WSPoint) -> Option<(ComponentId, usize)> {
        let radius = self.config.pin_hover_radius;
        self.components
            .iter()
            .find_map(|(id, c)| c.hovered_pin(wsp, radius).map(|pin| (id, pin)))
    }
    pub fn wire_at(&self, wsp: WSPoint) -> Option<WireId> {
        self.connections
            .wire_at_position(wsp, self.config.wire_tolerance)
    }

    /// box around every component and wire, none for an empty circuit
    pub fn bounds(&self) -> Option<WSBox> {
        let components = self.components.iter().map(|(_, c)| c.bounding_box());
        let wires = self.connections.wires().map(|(_, w)| w.bounding_box());
        components.chain(wires).reduce(|acc, b| acc.union(&b))
    }

    /// remaps components from the `orig` viewport to the `new` one and reroutes every wire.
    /// false, and nothing changes, if any dimension is non-positive.
    pub fn resize_viewport(
        &mut self,
        new_width: f32,
        new_height: f32,
        orig_width: f32,
        orig_height: f32,
    ) -> bool {
        if !self
            .components
            .update_component_positions(new_width, new_height, orig_width, orig_height)
        {
            return false;
        }
        self.connections.reroute_all(&self.components);
        for (_, c) in self.components.iter_mut() {
            c.take_changed();
        }
        true
    }
}
