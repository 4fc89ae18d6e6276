//! Wire
//! directed edge from an output pin to an input pin. caches its routed path and last propagated signal.

use std::fmt;

use crate::circuit::component::Pin;
use crate::circuit::components::{ComponentId, ComponentManager};
use crate::circuit::geometry;
use crate::circuit::interactable::Interactive;
use crate::transforms::{WSBox, WSPoint};

/// slack allowed by the approximate on-wire test
pub const HIT_TOLERANCE: f32 = 1.0;

/// stable handle to a wire owned by a `ConnectionManager`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WireId(pub(crate) u64);

impl fmt::Display for WireId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "W{}", self.0)
    }
}

/// one end of a wire: a component and one of its pin indices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Endpoint {
    pub component: ComponentId,
    pub pin: usize,
}

impl Endpoint {
    pub fn new(component: ComponentId, pin: usize) -> Self {
        Endpoint { component, pin }
    }
}

#[derive(Debug, Clone)]
pub struct Wire {
    /// driving end, always an output pin
    start: Endpoint,
    /// driven end, always an input pin
    end: Endpoint,
    /// output slot read at `start`
    start_slot: usize,
    /// input slot written at `end`
    end_slot: usize,
    signal: bool,
    points: Vec<WSPoint>,
}

impl Wire {
    /// builds a wire between an output pin and an input pin, in either order, and routes it.
    /// none if either component is missing or the pins are not one output and one input.
    pub fn new(components: &ComponentManager, a: Endpoint, b: Endpoint) -> Option<Self> {
        let pin_a = components.get(a.component)?.pin(a.pin)?;
        let pin_b = components.get(b.component)?.pin(b.pin)?;
        let (start, start_slot, end, end_slot) = match (pin_a, pin_b) {
            (Pin::Output(o), Pin::Input(i)) => (a, o, b, i),
            (Pin::Input(i), Pin::Output(o)) => (b, o, a, i),
            _ => return None,
        };
        let mut wire = Wire {
            start,
            end,
            start_slot,
            end_slot,
            signal: false,
            points: vec![],
        };
        wire.recalculate_path(components);
        Some(wire)
    }

    pub fn start(&self) -> Endpoint {
        self.start
    }
    pub fn end(&self) -> Endpoint {
        self.end
    }
    pub fn start_component(&self) -> ComponentId {
        self.start.component
    }
    pub fn end_component(&self) -> ComponentId {
        self.end.component
    }
    /// output slot this wire reads on its start component
    pub fn start_slot(&self) -> usize {
        self.start_slot
    }
    /// input slot this wire writes on its end component
    pub fn end_slot(&self) -> usize {
        self.end_slot
    }
    /// last propagated signal
    pub fn signal(&self) -> bool {
        self.signal
    }
    /// cached polyline, at least two points once routed
    pub fn points(&self) -> &[WSPoint] {
        &self.points
    }

    /// true if the wire terminates at `pin` on `component`
    pub fn touches(&self, component: ComponentId, pin: usize) -> bool {
        self.start == Endpoint::new(component, pin) || self.end == Endpoint::new(component, pin)
    }
    /// true if either end is on `component`
    pub fn touches_component(&self, component: ComponentId) -> bool {
        self.start.component == component || self.end.component == component
    }

    /// copies the start output into the end input, then reroutes
    pub fn update(&mut self, components: &mut ComponentManager) {
        let Some(signal) = components
            .get(self.start.component)
            .map(|c| c.output_state(self.start_slot))
        else {
            tracing::warn!(component = %self.start.component, "wire start references a missing component");
            return;
        };
        self.signal = signal;
        match components.get_mut(self.end.component) {
            Some(c) => c.set_input_state(self.end_slot, signal),
            None => {
                tracing::warn!(component = %self.end.component, "wire end references a missing component");
                return;
            }
        }
        self.recalculate_path(components);
    }

    /// reroutes from the current pin positions without propagating
    pub fn recalculate_path(&mut self, components: &ComponentManager) {
        let start = components
            .get(self.start.component)
            .and_then(|c| c.pin_position(self.start.pin));
        let end = components
            .get(self.end.component)
            .and_then(|c| c.pin_position(self.end.pin));
        if let (Some(start), Some(end)) = (start, end) {
            self.points = geometry::orthogonal_route(start, end);
        }
    }

    /// reroutes after an endpoint was rotated outside the tick
    pub fn update_connections_after_rotation(&mut self, components: &ComponentManager) {
        self.recalculate_path(components);
    }

    /// approximate hit test against every segment, see [`geometry::on_segment_approx`]
    pub fn is_point_on_wire(&self, wsp: WSPoint, tolerance: f32) -> bool {
        self.points
            .windows(2)
            .any(|seg| geometry::on_segment_approx(wsp, seg[0], seg[1], tolerance))
    }
}

impl Interactive for Wire {
    fn contains_wsp(&self, wsp: WSPoint) -> bool {
        self.is_point_on_wire(wsp, HIT_TOLERANCE)
    }
    fn bounding_box(&self) -> WSBox {
        WSBox::from_points(self.points.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::component::{Component, ComponentKind};

    fn setup() -> (ComponentManager, ComponentId, ComponentId) {
        let mut cm = ComponentManager::default();
        let src = cm.add_component(Component::new(ComponentKind::source(), WSPoint::new(0.0, 0.0)));
        let and = cm.add_component(Component::new(ComponentKind::and(), WSPoint::new(300.0, 100.0)));
        (cm, src, and)
    }

    #[test]
    fn update_copies_signal() {
        let (mut cm, src, and) = setup();
        let mut w = Wire::new(&cm, Endpoint::new(src, 0), Endpoint::new(and, 0)).unwrap();
        cm.get_mut(src).unwrap().toggle();
        cm.get_mut(src).unwrap().update();
        w.update(&mut cm);
        assert!(w.signal());
        assert!(cm.get(and).unwrap().input_state(0));
        assert_eq!(
            cm.get(and).unwrap().input_state(w.end_slot()),
            cm.get(src).unwrap().output_state(w.start_slot())
        );
    }

    #[test]
    fn endpoints_normalize_to_output_first() {
        let (cm, src, and) = setup();
        let w = Wire::new(&cm, Endpoint::new(and, 1), Endpoint::new(src, 0)).unwrap();
        assert_eq!(w.start(), Endpoint::new(src, 0));
        assert_eq!(w.end(), Endpoint::new(and, 1));
        assert_eq!(w.end_slot(), 1);
    }

    #[test]
    fn rejects_same_direction() {
        let (cm, src, and) = setup();
        assert!(Wire::new(&cm, Endpoint::new(and, 0), Endpoint::new(and, 1)).is_none());
        assert!(Wire::new(&cm, Endpoint::new(src, 0), Endpoint::new(and, 2)).is_none());
        assert!(Wire::new(&cm, Endpoint::new(src, 5), Endpoint::new(and, 0)).is_none());
    }

    #[test]
    fn path_follows_pins() {
        let (mut cm, src, and) = setup();
        let mut w = Wire::new(&cm, Endpoint::new(src, 0), Endpoint::new(and, 0)).unwrap();
        let start = cm.get(src).unwrap().pin_position(0).unwrap();
        let end = cm.get(and).unwrap().pin_position(0).unwrap();
        assert_eq!(w.points().first(), Some(&start));
        assert_eq!(w.points().last(), Some(&end));
        assert!(w.points().len() >= 2);

        cm.get_mut(and).unwrap().rotate(90.0);
        w.update_connections_after_rotation(&cm);
        let end = cm.get(and).unwrap().pin_position(0).unwrap();
        assert_eq!(w.points().last(), Some(&end));
    }

    #[test]
    fn hit_test_on_path() {
        let (cm, src, and) = setup();
        let w = Wire::new(&cm, Endpoint::new(src, 0), Endpoint::new(and, 0)).unwrap();
        // src output at (15, 0), and input 0 at (250, 75): horizontal first
        assert!(w.is_point_on_wire(WSPoint::new(100.0, 0.0), HIT_TOLERANCE));
        assert!(w.is_point_on_wire(WSPoint::new(250.0, 40.0), HIT_TOLERANCE));
        assert!(!w.is_point_on_wire(WSPoint::new(100.0, 40.0), HIT_TOLERANCE));
        assert!(w.contains_wsp(WSPoint::new(250.0, 75.0)));
    }
}
