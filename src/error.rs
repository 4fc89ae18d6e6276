//! error types. core operations are total; these only carry reasons where a caller can use one.

use crate::circuit::components::ComponentId;

#[derive(Debug, thiserror::Error)]
pub enum CircuitError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config parse error: {0}")]
    Config(#[from] serde_json::Error),
    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

/// why a connection request was refused. refusal is an expected outcome, not a fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ConnectError {
    #[error("unknown component {0}")]
    UnknownComponent(ComponentId),
    #[error("pin {pin} does not exist on {component}")]
    NoSuchPin { component: ComponentId, pin: usize },
    #[error("pin {pin} on {component} already has a wire")]
    PinOccupied { component: ComponentId, pin: usize },
    #[error("a connection needs exactly one output pin and one input pin")]
    DirectionMismatch,
}
