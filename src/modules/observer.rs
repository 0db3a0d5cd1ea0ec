//! ----- OBSERVER MODULE -----
//! Passive listeners attached to a single elevator. They are told about
//! every state transition and every floor passed, and have no way to
//! influence scheduling.

use crossbeam_channel::Sender;
use tracing::{info, warn};

use crate::modules::elevator::Elevator;
use crate::utilities::elevator_status::ElevatorState;

pub trait ElevatorObserver: Send {
    fn on_state_change(&self, elevator: &Elevator, state: ElevatorState);
    fn on_floor_change(&self, elevator: &Elevator, floor: u32);
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ElevatorEvent {
    StateChanged { elevator: usize, state: ElevatorState },
    FloorChanged { elevator: usize, floor: u32 },
}

/// Forwards every notification as an [`ElevatorEvent`] so that slow
/// consumers (displays, loggers on another thread) never hold up the
/// elevator. Events are dropped once the receiving side has gone away.
#[derive(Debug, Clone)]
pub struct ChannelObserver {
    event_tx: Sender<ElevatorEvent>,
}

impl ChannelObserver {
    pub fn new(event_tx: Sender<ElevatorEvent>) -> Self {
        ChannelObserver { event_tx: event_tx }
    }

    fn forward(&self, event: ElevatorEvent) {
        // the receiver is allowed to hang up before the simulation ends
        let _ = self.event_tx.try_send(event);
    }
}

impl ElevatorObserver for ChannelObserver {
    fn on_state_change(&self, elevator: &Elevator, state: ElevatorState) {
        self.forward(ElevatorEvent::StateChanged { elevator: elevator.id(), state: state });
    }

    fn on_floor_change(&self, elevator: &Elevator, floor: u32) {
        self.forward(ElevatorEvent::FloorChanged { elevator: elevator.id(), floor: floor });
    }
}

/// Display observer that writes every event to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogObserver;

impl ElevatorObserver for LogObserver {
    fn on_state_change(&self, elevator: &Elevator, state: ElevatorState) {
        if state == ElevatorState::Maintenance {
            warn!(elevator = elevator.id(), "elevator entered maintenance mode");
        } else {
            info!(elevator = elevator.id(), %state, "state changed");
        }
    }

    fn on_floor_change(&self, elevator: &Elevator, floor: u32) {
        if elevator.requests().has_request_at(floor) {
            info!(elevator = elevator.id(), floor, "arrived at requested floor");
        } else {
            info!(elevator = elevator.id(), floor, "passing floor");
        }
    }
}
