//! Error types for the dispatch core and its configuration layer.
//!
//! Nothing in the core is fatal. Every [`DispatchError`] describes a request or
//! movement that was dropped; the simulation keeps going after it has been
//! reported.
//!
//! | Error | Raised by | Effect |
//! |-------|-----------|--------|
//! | [`DispatchError::ElevatorNotFound`] | controller lookups | request dropped |
//! | [`DispatchError::InvalidFloor`] | request construction, deserialization, `move_to_next_floor` | request or movement dropped |
//! | [`DispatchError::FloorOutOfRange`] | controller with a top floor | request dropped |
//! | [`DispatchError::NotRunning`] | `move_to_next_floor`, controller `step` | movement skipped |
//! | [`DispatchError::MaintenanceUnavailable`] | maintenance switches | state unchanged |

use thiserror::Error;

use crate::utilities::elevator_status::ElevatorState;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    #[error("elevator {0} not found")]
    ElevatorNotFound(usize),

    #[error("floor {0} is below the lowest floor ({min})", min = crate::utilities::request::MIN_FLOOR)]
    InvalidFloor(u32),

    #[error("floor {floor} is above the top floor {top_floor}")]
    FloorOutOfRange { floor: u32, top_floor: u32 },

    #[error("elevator {id} is not running (state: {state})")]
    NotRunning { id: usize, state: ElevatorState },

    #[error("elevator {id} cannot change maintenance mode while {state}")]
    MaintenanceUnavailable { id: usize, state: ElevatorState },
}

/// Errors raised while loading the simulation configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read configuration file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("unknown scheduling strategy `{0}` (expected `fifo` or `scan`)")]
    UnknownStrategy(String),
}

/// Failures that end the simulation driver.
#[derive(Debug, Error)]
pub enum SimulationError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    #[error("terminal output failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("serializing the final status failed: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("simulation thread panicked")]
    SimulationPanicked,
}
