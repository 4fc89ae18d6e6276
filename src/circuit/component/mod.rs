//! Component
//! a placed logic element: boolean input/output slots, a kind, and a world placement

mod kind;

pub use kind::{And, ComponentKind, Evaluate, Not, Or, PinAnchor, PinLayout, Source};

use flagset::{flags, FlagSet};

use crate::circuit::geometry::{self, Placement};
use crate::circuit::interactable::Interactive;
use crate::transforms::{WSBox, WSPoint, WSSize};

flags! {
    /// transform properties changed since wires were last routed against this component
    pub enum Changed: u8 {
        Position,
        Rotation,
        Scale,
    }
}

/// a pin index resolved against a component's input/output counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pin {
    /// index into the input slots
    Input(usize),
    /// index into the output slots
    Output(usize),
}

#[derive(Debug, Clone)]
pub struct Component {
    kind: ComponentKind,
    placement: Placement,
    inputs: Vec<bool>,
    outputs: Vec<bool>,
    changed: FlagSet<Changed>,
}

impl Component {
    pub fn new(kind: ComponentKind, position: WSPoint) -> Self {
        Self::with_placement(kind, Placement::new(position, 0.0, 1.0))
    }
    pub fn with_placement(kind: ComponentKind, placement: Placement) -> Self {
        let layout = kind.layout();
        Component {
            inputs: vec![false; layout.num_inputs()],
            outputs: vec![false; layout.num_outputs()],
            kind,
            placement,
            changed: FlagSet::default(),
        }
    }

    pub fn kind(&self) -> &ComponentKind {
        &self.kind
    }
    pub fn label(&self) -> &'static str {
        self.kind.label()
    }
    pub fn layout(&self) -> &'static PinLayout {
        self.kind.layout()
    }
    pub fn placement(&self) -> &Placement {
        &self.placement
    }

    pub fn position(&self) -> WSPoint {
        self.placement.position
    }
    pub fn set_position(&mut self, wsp: WSPoint) {
        if self.placement.position != wsp {
            self.placement.position = wsp;
            self.changed |= Changed::Position;
        }
    }
    /// rotation in degrees, always in [0, 360)
    pub fn rotation(&self) -> f32 {
        self.placement.rotation
    }
    pub fn set_rotation(&mut self, deg: f32) {
        let deg = geometry::wrap_degrees(deg);
        if self.placement.rotation != deg {
            self.placement.rotation = deg;
            self.changed |= Changed::Rotation;
        }
    }
    /// adds `delta` degrees, wrapping into [0, 360)
    pub fn rotate(&mut self, delta: f32) {
        self.set_rotation(self.placement.rotation + delta);
    }
    pub fn scale(&self) -> f32 {
        self.placement.scale
    }
    pub fn set_scale(&mut self, scale: f32) {
        let scale = geometry::clamp_scale(scale, self.placement.scale);
        if self.placement.scale != scale {
            self.placement.scale = scale;
            self.changed |= Changed::Scale;
        }
    }
    /// size of the component at its current scale, before rotation
    pub fn scaled_size(&self) -> WSSize {
        self.layout().size * self.placement.scale
    }

    /// transform changes not yet reflected in wire routes
    pub fn changed(&self) -> FlagSet<Changed> {
        self.changed
    }
    /// returns and clears the pending transform changes
    pub fn take_changed(&mut self) -> FlagSet<Changed> {
        std::mem::take(&mut self.changed)
    }

    pub fn num_inputs(&self) -> usize {
        self.inputs.len()
    }
    pub fn num_outputs(&self) -> usize {
        self.outputs.len()
    }
    pub fn num_pins(&self) -> usize {
        self.inputs.len() + self.outputs.len()
    }
    /// resolves a pin index: below `num_inputs` is an input, the remainder are outputs
    pub fn pin(&self, pin: usize) -> Option<Pin> {
        if pin < self.num_inputs() {
            Some(Pin::Input(pin))
        } else if pin < self.num_pins() {
            Some(Pin::Output(pin - self.num_inputs()))
        } else {
            None
        }
    }
    pub fn is_output_pin(&self, pin: usize) -> bool {
        matches!(self.pin(pin), Some(Pin::Output(_)))
    }

    pub fn input_state(&self, i: usize) -> bool {
        self.inputs.get(i).copied().unwrap_or(false)
    }
    pub fn output_state(&self, i: usize) -> bool {
        self.outputs.get(i).copied().unwrap_or(false)
    }
    pub fn set_input_state(&mut self, i: usize, v: bool) {
        if let Some(slot) = self.inputs.get_mut(i) {
            *slot = v;
        }
    }
    pub fn set_output_state(&mut self, i: usize, v: bool) {
        if let Some(slot) = self.outputs.get_mut(i) {
            *slot = v;
        }
    }
    pub fn inputs(&self) -> &[bool] {
        &self.inputs
    }
    pub fn outputs(&self) -> &[bool] {
        &self.outputs
    }

    /// evaluates the kind's rule from the current inputs into the outputs
    pub fn update(&mut self) {
        self.kind.evaluate(&self.inputs, &mut self.outputs);
    }

    /// flips a source's latch and returns the new value. none for other kinds.
    pub fn toggle(&mut self) -> Option<bool> {
        match &mut self.kind {
            ComponentKind::Source(s) => Some(s.toggle()),
            _ => None,
        }
    }

    pub fn input_pin_position(&self, i: usize) -> Option<WSPoint> {
        let layout = self.layout();
        layout
            .inputs
            .get(i)
            .map(|p| geometry::pin_world_position(&self.placement, layout.size, p.anchor))
    }
    pub fn output_pin_position(&self, i: usize) -> Option<WSPoint> {
        let layout = self.layout();
        layout
            .outputs
            .get(i)
            .map(|p| geometry::pin_world_position(&self.placement, layout.size, p.anchor))
    }
    /// world position of a pin by pin index
    pub fn pin_position(&self, pin: usize) -> Option<WSPoint> {
        match self.pin(pin)? {
            Pin::Input(i) => self.input_pin_position(i),
            Pin::Output(i) => self.output_pin_position(i),
        }
    }
    /// world positions of every pin in pin index order
    pub fn pin_positions(&self) -> impl Iterator<Item = WSPoint> + '_ {
        (0..self.num_pins()).filter_map(|pin| self.pin_position(pin))
    }

    /// true if the point lies within the component's rotated, scaled box
    pub fn is_hovered(&self, wsp: WSPoint) -> bool {
        geometry::contains_point(&self.placement, self.layout().size, wsp)
    }
    /// first pin, in index order, whose hover circle of `hover_radius * scale` contains the point
    pub fn hovered_pin(&self, wsp: WSPoint, hover_radius: f32) -> Option<usize> {
        let radius = hover_radius * self.placement.scale;
        self.pin_positions()
            .position(|pinp| geometry::within_radius(pinp, wsp, radius))
    }
}

impl Interactive for Component {
    fn contains_wsp(&self, wsp: WSPoint) -> bool {
        self.is_hovered(wsp)
    }
    fn bounding_box(&self) -> WSBox {
        geometry::outer_bounds(&self.placement, self.layout().size)
    }
}
