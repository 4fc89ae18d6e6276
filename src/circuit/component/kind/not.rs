use super::{Evaluate, PinAnchor, PinLayout};
use crate::transforms::{ASPoint, WSSize};
use lazy_static::lazy_static;

pub const LABEL: &str = "NOT";

lazy_static! {
    static ref DEFAULT_LAYOUT: PinLayout = PinLayout {
        size: WSSize::new(100.0, 100.0),
        inputs: vec![
            PinAnchor {name: "a", anchor: ASPoint::new(-1.0, 0.0)},
        ],
        outputs: vec![
            PinAnchor {name: "q", anchor: ASPoint::new(1.0, 0.0)},
        ],
    };
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Not;

impl Evaluate for Not {
    fn evaluate(&self, inputs: &[bool], outputs: &mut [bool]) {
        if let Some(q) = outputs.first_mut() {
            *q = !inputs.first().copied().unwrap_or(false);
        }
    }
    fn layout(&self) -> &'static PinLayout {
        &DEFAULT_LAYOUT
    }
    fn label(&self) -> &'static str {
        LABEL
    }
}
