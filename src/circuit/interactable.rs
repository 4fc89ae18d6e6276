//! common functionality for interactive circuit elements

use crate::transforms::{WSBox, WSPoint};

/// trait to facillitate and unify hit testing of components and wires
pub trait Interactive {
    /// returns true if the WorldSpace point hits the element under its current transform
    fn contains_wsp(&self, wsp: WSPoint) -> bool;
    /// axis aligned bounds of the element, e.g. to fit the view around the circuit
    fn bounding_box(&self) -> WSBox;
}
