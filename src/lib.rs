//! circuitry: a logic circuit topology and signal propagation engine.
//!
//! components (AND, OR, NOT and toggled sources) sit in WorldSpace with a position,
//! rotation and uniform scale. wires join one output pin to one input pin and are
//! routed as orthogonal polylines. [`Circuit::tick`] runs one evaluation pass: every
//! wire copies its driving output into its driven input, then every component
//! re-evaluates. a change therefore takes two ticks to reach a wired consumer's output.
//!
//! rendering and input handling are left to the host; [`viewport::Camera`] covers
//! the world to screen mapping such a host needs.

pub mod circuit;
pub mod config;
pub mod error;
pub mod logging;
pub mod transforms;
pub mod viewport;

pub use circuit::component::{Component, ComponentKind, Pin};
pub use circuit::components::{ComponentId, ComponentManager};
pub use circuit::connections::ConnectionManager;
pub use circuit::wire::{Endpoint, Wire, WireId};
pub use circuit::Circuit;
pub use config::SimConfig;
pub use error::{CircuitError, ConnectError};
