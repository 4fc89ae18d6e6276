//! component kinds: per-kind evaluation rule and static pin layout

mod and;
mod not;
mod or;
mod source;

pub use and::And;
pub use not::Not;
pub use or::Or;
pub use source::Source;

use enum_dispatch::enum_dispatch;

use crate::transforms::{ASPoint, WSSize};

/// a named pin anchor, normalized to the component's bounding box
#[derive(Clone, Debug, PartialEq)]
pub struct PinAnchor {
    pub name: &'static str,
    pub anchor: ASPoint,
}

/// static per-kind geometry: unscaled size and ordered input/output anchors
#[derive(Clone, Debug, PartialEq)]
pub struct PinLayout {
    pub size: WSSize,
    pub inputs: Vec<PinAnchor>,
    pub outputs: Vec<PinAnchor>,
}

impl PinLayout {
    pub fn num_inputs(&self) -> usize {
        self.inputs.len()
    }
    pub fn num_outputs(&self) -> usize {
        self.outputs.len()
    }
}

/// the one capability every component kind provides
#[enum_dispatch]
pub trait Evaluate {
    /// computes outputs from inputs. must not depend on anything but `inputs` and the kind's own state.
    fn evaluate(&self, inputs: &[bool], outputs: &mut [bool]);
    /// static pin layout of this kind
    fn layout(&self) -> &'static PinLayout;
    /// short label, e.g. for logs and rendering
    fn label(&self) -> &'static str;
}

/// an enum to unify the different kinds of component
#[enum_dispatch(Evaluate)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComponentKind {
    And,
    Or,
    Not,
    Source,
}

impl ComponentKind {
    pub fn and() -> Self {
        And.into()
    }
    pub fn or() -> Self {
        Or.into()
    }
    pub fn not() -> Self {
        Not.into()
    }
    /// a switch, initially off
    pub fn source() -> Self {
        Source::default().into()
    }
}
