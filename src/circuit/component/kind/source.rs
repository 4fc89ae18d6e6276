//! input switch: no inputs, one output holding an externally toggled latch

use super::{Evaluate, PinAnchor, PinLayout};
use crate::transforms::{ASPoint, WSSize};
use lazy_static::lazy_static;

pub const LABEL: &str = "SRC";

lazy_static! {
    static ref DEFAULT_LAYOUT: PinLayout = PinLayout {
        size: WSSize::new(30.0, 30.0),
        inputs: vec![],
        outputs: vec![
            PinAnchor {name: "q", anchor: ASPoint::new(1.0, 0.0)},
        ],
    };
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Source {
    latched: bool,
}

impl Source {
    pub fn latched(&self) -> bool {
        self.latched
    }
    /// flips the latch, returns the new value
    pub fn toggle(&mut self) -> bool {
        self.latched = !self.latched;
        self.latched
    }
}

impl Evaluate for Source {
    // republishes the latch, does not compute it
    fn evaluate(&self, _inputs: &[bool], outputs: &mut [bool]) {
        if let Some(q) = outputs.first_mut() {
            *q = self.latched;
        }
    }
    fn layout(&self) -> &'static PinLayout {
        &DEFAULT_LAYOUT
    }
    fn label(&self) -> &'static str {
        LABEL
    }
}
