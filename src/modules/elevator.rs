//! ----- ELEVATOR MODULE -----
//! A single car: its floor, direction, lifecycle state and queue of
//! pending stops. All mutation goes through `add_request`,
//! `move_to_next_floor` and `complete_arrival` (plus the maintenance
//! switches), and every change is fanned out to the subscribed observers.

use std::panic::{self, AssertUnwindSafe};

use tracing::{debug, info, warn};

use crate::modules::observer::ElevatorObserver;
use crate::utilities::direction::Direction;
use crate::utilities::elevator_status::{ElevatorState, ElevatorStatus};
use crate::utilities::error::DispatchError;
use crate::utilities::request::{Request, MIN_FLOOR};
use crate::utilities::requests::RequestQueue;

pub struct Elevator {
    id: usize,
    current_floor: u32,
    direction: Direction,
    state: ElevatorState,
    requests: RequestQueue,
    observers: Vec<Box<dyn ElevatorObserver>>,
}

impl Elevator {
    pub fn new(id: usize) -> Self {
        Elevator {
            id: id,
            current_floor: MIN_FLOOR,
            direction: Direction::Idle,
            state: ElevatorState::Stopped,
            requests: RequestQueue::new(),
            observers: Vec::new(),
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn current_floor(&self) -> u32 {
        self.current_floor
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn state(&self) -> ElevatorState {
        self.state
    }

    pub fn requests(&self) -> &RequestQueue {
        &self.requests
    }

    pub fn has_pending_requests(&self) -> bool {
        !self.requests.is_empty()
    }

    pub fn subscribe(&mut self, observer: Box<dyn ElevatorObserver>) {
        self.observers.push(observer);
    }

    pub fn status(&self) -> ElevatorStatus {
        ElevatorStatus {
            id: self.id,
            floor: self.current_floor,
            direction: self.direction,
            state: self.state,
            requests: self.requests.to_vec(),
        }
    }

    /// Queues `request` unless an equal one is already pending. A stopped
    /// elevator starts running toward the requested floor. Returns whether
    /// the request was queued.
    pub fn add_request(&mut self, request: Request) -> bool {
        if !self.requests.add_order(request) {
            debug!(elevator = self.id, floor = request.floor(), origin = %request.origin(), "duplicate request ignored");
            return false
        }

        match self.state {
            ElevatorState::Stopped => {
                self.direction = Direction::towards(self.current_floor, request.floor());
                self.set_state(ElevatorState::Running);
            },
            ElevatorState::Maintenance => {
                if self.direction == Direction::Idle {
                    self.direction = Direction::towards(self.current_floor, request.floor());
                }
                debug!(elevator = self.id, floor = request.floor(), "request queued during maintenance");
            },
            ElevatorState::Running => (),
        }
        true
    }

    /// Travels floor by floor to `target_floor`, notifying observers of every
    /// floor on the way, then completes the arrival there.
    pub fn move_to_next_floor(&mut self, target_floor: u32) -> Result<(), DispatchError> {
        if self.state != ElevatorState::Running {
            let err = DispatchError::NotRunning { id: self.id, state: self.state };
            warn!("{}", err);
            return Err(err)
        }
        if target_floor < MIN_FLOOR {
            let err = DispatchError::InvalidFloor(target_floor);
            warn!(elevator = self.id, "{}", err);
            return Err(err)
        }

        let travel = Direction::towards(self.current_floor, target_floor);
        if target_floor != self.current_floor && self.direction != travel {
            warn!(
                elevator = self.id,
                direction = %self.direction,
                target_floor,
                "direction points away from target, travelling {}", travel
            );
            self.direction = travel;
        }

        info!(
            elevator = self.id,
            from = self.current_floor,
            to = target_floor,
            direction = %self.direction,
            "moving"
        );
        while self.current_floor != target_floor {
            match travel {
                Direction::Up => self.current_floor += 1,
                _ => self.current_floor -= 1,
            }
            debug!(elevator = self.id, floor = self.current_floor, "now at floor");
            self.notify_floor_change();
        }

        self.complete_arrival();
        Ok(())
    }

    /// Stops at the current floor and serves every request waiting for it,
    /// whatever its origin. Returns the served requests.
    pub fn complete_arrival(&mut self) -> Vec<Request> {
        self.set_state(ElevatorState::Stopped);
        let served = self.requests.clear_requests_at_floor(self.current_floor);
        if self.requests.is_empty() {
            self.direction = Direction::Idle;
        } else {
            self.set_state(ElevatorState::Running);
        }
        served
    }

    /// Parks a stopped elevator. A parked car keeps an idle direction until a
    /// request is queued for it.
    pub fn enter_maintenance(&mut self) -> Result<(), DispatchError> {
        if self.state != ElevatorState::Stopped {
            return Err(DispatchError::MaintenanceUnavailable { id: self.id, state: self.state })
        }
        self.set_state(ElevatorState::Maintenance);
        Ok(())
    }

    /// Returns to service. Requests queued in the meantime put the elevator
    /// straight back to running toward the oldest of them.
    pub fn leave_maintenance(&mut self) -> Result<(), DispatchError> {
        if self.state != ElevatorState::Maintenance {
            return Err(DispatchError::MaintenanceUnavailable { id: self.id, state: self.state })
        }
        self.set_state(ElevatorState::Stopped);
        match self.requests.head().map(Request::floor) {
            Some(floor) => {
                self.direction = Direction::towards(self.current_floor, floor);
                self.set_state(ElevatorState::Running);
            },
            None => self.direction = Direction::Idle,
        }
        Ok(())
    }

    pub(crate) fn steer(&mut self, direction: Direction) {
        if direction != self.direction {
            debug!(elevator = self.id, from = %self.direction, to = %direction, "direction changed");
            self.direction = direction;
        }
    }

    fn set_state(&mut self, state: ElevatorState) {
        self.state = state;
        self.notify_state_change();
    }

    fn notify_state_change(&self) {
        for observer in &self.observers {
            self.contain(|| observer.on_state_change(self, self.state));
        }
    }

    fn notify_floor_change(&self) {
        for observer in &self.observers {
            self.contain(|| observer.on_floor_change(self, self.current_floor));
        }
    }

    // a panicking observer is reported and skipped, the elevator carries on
    fn contain<F: FnOnce()>(&self, notify: F) {
        if panic::catch_unwind(AssertUnwindSafe(notify)).is_err() {
            warn!(elevator = self.id, "observer panicked during notification");
        }
    }
}

impl std::fmt::Debug for Elevator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Elevator")
            .field("id", &self.id)
            .field("current_floor", &self.current_floor)
            .field("direction", &self.direction)
            .field("state", &self.state)
            .field("requests", &self.requests)
            .field("observers", &self.observers.len())
            .finish()
    }
}
