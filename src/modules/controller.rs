//! ----- CONTROLLER MODULE -----
//! Owns the fleet. Routes hall calls and cab requests to the right
//! elevator and drives every elevator one discrete step at a time with the
//! configured scheduling strategy.

use tracing::{debug, info, warn};

use crate::modules::elevator::Elevator;
use crate::modules::observer::ElevatorObserver;
use crate::modules::scheduling::{SchedulingStrategy, StrategyKind};
use crate::utilities::direction::Direction;
use crate::utilities::elevator_status::{ElevatorState, ElevatorStatus};
use crate::utilities::error::DispatchError;
use crate::utilities::request::Request;

pub struct ElevatorController {
    elevators: Vec<Elevator>,
    strategy: Box<dyn SchedulingStrategy>,
    top_floor: Option<u32>,
}

impl ElevatorController {
    /// Builds a fleet of `number_of_elevators` cars with ids starting at 0,
    /// all parked on the lowest floor and scheduled with SCAN.
    pub fn new(number_of_elevators: usize) -> Self {
        ElevatorController {
            elevators: (0..number_of_elevators).map(Elevator::new).collect(),
            strategy: StrategyKind::default().build(),
            top_floor: None,
        }
    }

    pub fn with_strategy(mut self, strategy: Box<dyn SchedulingStrategy>) -> Self {
        self.set_strategy(strategy);
        self
    }

    /// Rejects requests for floors above `top_floor`.
    pub fn with_top_floor(mut self, top_floor: u32) -> Self {
        self.top_floor = Some(top_floor);
        self
    }

    pub fn set_strategy(&mut self, strategy: Box<dyn SchedulingStrategy>) {
        info!(strategy = strategy.name(), "scheduling strategy selected");
        self.strategy = strategy;
    }

    pub fn strategy_name(&self) -> &'static str {
        self.strategy.name()
    }

    pub fn elevators(&self) -> &[Elevator] {
        &self.elevators
    }

    pub fn elevator_by_id(&self, id: usize) -> Option<&Elevator> {
        self.elevators.iter().find(|elevator| elevator.id() == id)
    }

    fn elevator_by_id_mut(&mut self, id: usize) -> Result<&mut Elevator, DispatchError> {
        match self.elevators.iter_mut().find(|elevator| elevator.id() == id) {
            Some(elevator) => Ok(elevator),
            None => {
                let err = DispatchError::ElevatorNotFound(id);
                warn!("{}", err);
                Err(err)
            },
        }
    }

    pub fn subscribe(&mut self, id: usize, observer: Box<dyn ElevatorObserver>) -> Result<(), DispatchError> {
        self.elevator_by_id_mut(id)?.subscribe(observer);
        Ok(())
    }

    /// Hall call for elevator `id` from `floor`. Returns whether the request
    /// was queued (false for duplicates).
    pub fn request_elevator(&mut self, id: usize, floor: u32, direction: Direction) -> Result<bool, DispatchError> {
        info!(elevator = id, floor, %direction, "external request");
        let top_floor = self.top_floor;
        let elevator = self.elevator_by_id_mut(id)?;
        let request = Self::checked(top_floor, Request::external(floor, direction, id))?;
        Ok(elevator.add_request(request))
    }

    /// Cab request inside elevator `id`. The direction is derived from the
    /// car's floor: up when `floor` is above it, down otherwise.
    pub fn request_floor(&mut self, id: usize, floor: u32) -> Result<bool, DispatchError> {
        info!(elevator = id, floor, "internal request");
        let top_floor = self.top_floor;
        let elevator = self.elevator_by_id_mut(id)?;
        let direction = Direction::towards(elevator.current_floor(), floor);
        let request = Self::checked(top_floor, Request::internal(floor, direction, id))?;
        Ok(elevator.add_request(request))
    }

    fn checked(top_floor: Option<u32>, request: Result<Request, DispatchError>) -> Result<Request, DispatchError> {
        let request = request.map_err(|err| {
            warn!("{}", err);
            err
        })?;
        match top_floor {
            Some(top_floor) if request.floor() > top_floor => {
                let err = DispatchError::FloorOutOfRange { floor: request.floor(), top_floor };
                warn!("{}", err);
                Err(err)
            },
            _ => Ok(request),
        }
    }

    /// Moves every elevator with pending work all the way to the stop chosen
    /// by the strategy. Idle elevators are left alone, elevators that are not
    /// running are reported and skipped before the strategy sees them.
    pub fn step(&mut self) {
        for elevator in self.elevators.iter_mut() {
            if !elevator.has_pending_requests() {
                continue;
            }
            if elevator.state() != ElevatorState::Running {
                warn!("{}", DispatchError::NotRunning { id: elevator.id(), state: elevator.state() });
                continue;
            }

            let decision = self.strategy.next_stop(elevator.current_floor(), elevator.direction(), elevator.requests());
            elevator.steer(decision.direction);

            if decision.floor != elevator.current_floor() {
                // refused moves have already been reported by the elevator
                let _ = elevator.move_to_next_floor(decision.floor);
            } else if elevator.requests().has_request_at(elevator.current_floor()) {
                debug!(elevator = elevator.id(), floor = elevator.current_floor(), "serving request on current floor");
                elevator.complete_arrival();
            }
        }
    }

    pub fn set_maintenance(&mut self, id: usize, maintenance: bool) -> Result<(), DispatchError> {
        let elevator = self.elevator_by_id_mut(id)?;
        let result = if maintenance { elevator.enter_maintenance() } else { elevator.leave_maintenance() };
        if let Err(err) = &result {
            warn!("{}", err);
        }
        result
    }

    pub fn status(&self) -> Vec<ElevatorStatus> {
        self.elevators.iter().map(Elevator::status).collect()
    }
}
