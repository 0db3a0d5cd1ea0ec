//! Elevator dispatch core.
//!
//! Accepts hall calls and cab requests for a fleet of elevators, decides
//! which pending stop each elevator services next (FIFO or SCAN/LOOK),
//! moves the cars over discrete simulation steps and reports every state
//! and floor change to subscribed observers.
//!
//! ```
//! use elevator_dispatch::{Direction, ElevatorController};
//!
//! let mut controller = ElevatorController::new(2);
//! controller.request_elevator(0, 3, Direction::Up).unwrap();
//! controller.request_floor(0, 5).unwrap();
//!
//! controller.step();
//! assert_eq!(controller.elevators()[0].current_floor(), 3);
//! controller.step();
//! assert_eq!(controller.elevators()[0].current_floor(), 5);
//! assert!(!controller.elevators()[0].has_pending_requests());
//! ```

pub mod modules;
pub mod utilities;

pub use modules::controller::ElevatorController;
pub use modules::elevator::Elevator;
pub use modules::observer::{ChannelObserver, ElevatorEvent, ElevatorObserver, LogObserver};
pub use modules::scheduling::{Decision, FifoScheduling, ScanScheduling, SchedulingStrategy, StrategyKind};
pub use utilities::direction::Direction;
pub use utilities::elevator_status::{ElevatorState, ElevatorStatus};
pub use utilities::error::{ConfigError, DispatchError, SimulationError};
pub use utilities::origin::Origin;
pub use utilities::request::Request;
