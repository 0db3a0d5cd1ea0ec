use super::direction::Direction;
use super::request::Request;

#[derive(serde::Serialize, serde::Deserialize, PartialEq, Eq, Debug, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum ElevatorState {
    Stopped,
    Running,
    Maintenance,
}

impl ElevatorState {
    pub fn as_string(&self) -> String {
        match self {
            ElevatorState::Stopped => String::from("stopped"),
            ElevatorState::Running => String::from("running"),
            ElevatorState::Maintenance => String::from("maintenance"),
        }
    }
}

impl std::fmt::Display for ElevatorState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.as_string())
    }
}

/// Point-in-time copy of an elevator, detached from its observers.
#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, PartialEq)]
pub struct ElevatorStatus {
    pub id: usize,
    pub floor: u32,
    pub direction: Direction,
    pub state: ElevatorState,
    pub requests: Vec<Request>,
}

impl ElevatorStatus {
    pub fn is_idle(&self) -> bool {
        self.state == ElevatorState::Stopped && self.direction == Direction::Idle
    }

    pub fn has_request_at(&self, floor: u32) -> bool {
        self.requests.iter().any(|request| request.floor() == floor)
    }
}
