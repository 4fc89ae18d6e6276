use super::{Evaluate, PinAnchor, PinLayout};
use crate::transforms::{ASPoint, WSSize};
use lazy_static::lazy_static;

pub const LABEL: &str = "AND";

lazy_static! {
    static ref DEFAULT_LAYOUT: PinLayout = PinLayout {
        size: WSSize::new(100.0, 100.0),
        inputs: vec![
            PinAnchor {name: "a", anchor: ASPoint::new(-1.0, -0.5)},
            PinAnchor {name: "b", anchor: ASPoint::new(-1.0, 0.5)},
        ],
        outputs: vec![
            PinAnchor {name: "q", anchor: ASPoint::new(1.0, 0.0)},
        ],
    };
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct And;

impl Evaluate for And {
    fn evaluate(&self, inputs: &[bool], outputs: &mut [bool]) {
        if let Some(q) = outputs.first_mut() {
            *q = inputs.iter().all(|&b| b) && !inputs.is_empty();
        }
    }
    fn layout(&self) -> &'static PinLayout {
        &DEFAULT_LAYOUT
    }
    fn label(&self) -> &'static str {
        LABEL
    }
}
