//! ----- SCHEDULING MODULE -----
//! Decides where an elevator goes next. Strategies are pure: they look at
//! the current floor, the travel direction and the pending requests, and
//! return the next stop together with the direction to travel in. Applying
//! that direction is left to the controller.

use std::str::FromStr;

use crate::utilities::direction::Direction;
use crate::utilities::error::ConfigError;
use crate::utilities::requests::RequestQueue;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    pub floor: u32,
    pub direction: Direction,
}

impl Decision {
    fn stay(floor: u32, direction: Direction) -> Self {
        Decision { floor: floor, direction: direction }
    }
}

pub trait SchedulingStrategy: Send {
    fn name(&self) -> &'static str;

    fn next_stop(&self, floor: u32, direction: Direction, requests: &RequestQueue) -> Decision;
}

/// Always heads for the oldest pending request.
#[derive(Debug, Clone, Copy, Default)]
pub struct FifoScheduling;

impl SchedulingStrategy for FifoScheduling {
    fn name(&self) -> &'static str {
        "fifo"
    }

    fn next_stop(&self, floor: u32, direction: Direction, requests: &RequestQueue) -> Decision {
        let next_floor = match requests.head() {
            Some(request) => request.floor(),
            None => return Decision::stay(floor, direction),
        };
        if next_floor == floor {
            return Decision::stay(floor, direction)
        }

        // recomputed from the queue head on every call, nothing carries over
        // between steps; a downward trip below the car is answered with UP
        let direction = match direction {
            Direction::Idle => Direction::towards(floor, next_floor),
            Direction::Up if floor > next_floor => Direction::Down,
            _ if next_floor < floor => Direction::Up,
            _ => direction,
        };
        Decision { floor: next_floor, direction: direction }
    }
}

/// LOOK: keeps going while requests lie ahead, then turns around.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScanScheduling;

impl SchedulingStrategy for ScanScheduling {
    fn name(&self) -> &'static str {
        "scan"
    }

    fn next_stop(&self, floor: u32, direction: Direction, requests: &RequestQueue) -> Decision {
        let above = requests.floors_above(floor);
        let below = requests.floors_below(floor);

        match (direction, above.first(), below.first()) {
            (Direction::Up, Some(&nearest), _) => Decision { floor: nearest, direction: Direction::Up },
            (Direction::Down, _, Some(&nearest)) => Decision { floor: nearest, direction: Direction::Down },
            (_, Some(_), Some(&nearest)) => Decision { floor: nearest, direction: Direction::Down },
            (_, Some(&nearest), None) => Decision { floor: nearest, direction: Direction::Up },
            (_, None, Some(&nearest)) => Decision { floor: nearest, direction: Direction::Down },
            (_, None, None) => Decision::stay(floor, direction),
        }
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    Fifo,
    #[default]
    Scan,
}

impl StrategyKind {
    pub fn build(self) -> Box<dyn SchedulingStrategy> {
        match self {
            StrategyKind::Fifo => Box::new(FifoScheduling),
            StrategyKind::Scan => Box::new(ScanScheduling),
        }
    }
}

impl FromStr for StrategyKind {
    type Err = ConfigError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name.trim().to_ascii_lowercase().as_str() {
            "fifo" => Ok(StrategyKind::Fifo),
            "scan" | "look" => Ok(StrategyKind::Scan),
            _ => Err(ConfigError::UnknownStrategy(name.to_string())),
        }
    }
}
