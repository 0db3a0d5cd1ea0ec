use super::direction::Direction;
use super::error::DispatchError;
use super::origin::Origin;

/// Lowest floor of any building the core serves.
pub const MIN_FLOOR: u32 = 1;

/// A single desired stop for one elevator.
///
/// Two requests are equal when they share floor, owning elevator and origin.
/// The direction is carried along for displays but plays no part in
/// duplicate detection.
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Copy)]
#[serde(try_from = "RawRequest")]
pub struct Request {
    floor: u32,
    direction: Direction,
    elevator_id: usize,
    origin: Origin,
}

// deserialized requests go through the same floor check as `Request::new`
#[derive(serde::Deserialize)]
struct RawRequest {
    floor: u32,
    direction: Direction,
    elevator_id: usize,
    origin: Origin,
}

impl TryFrom<RawRequest> for Request {
    type Error = DispatchError;

    fn try_from(raw: RawRequest) -> Result<Self, Self::Error> {
        Request::new(raw.floor, raw.direction, raw.elevator_id, raw.origin)
    }
}

impl Request {
    pub fn new(floor: u32, direction: Direction, elevator_id: usize, origin: Origin) -> Result<Self, DispatchError> {
        if floor < MIN_FLOOR {
            return Err(DispatchError::InvalidFloor(floor));
        }
        Ok(Request {
            floor: floor,
            direction: direction,
            elevator_id: elevator_id,
            origin: origin,
        })
    }

    /// Hall call button pressed on `floor`.
    pub fn external(floor: u32, direction: Direction, elevator_id: usize) -> Result<Self, DispatchError> {
        Self::new(floor, direction, elevator_id, Origin::External)
    }

    /// Cab button pressed inside elevator `elevator_id`.
    pub fn internal(floor: u32, direction: Direction, elevator_id: usize) -> Result<Self, DispatchError> {
        Self::new(floor, direction, elevator_id, Origin::Internal)
    }

    pub fn floor(&self) -> u32 {
        self.floor
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn elevator_id(&self) -> usize {
        self.elevator_id
    }

    pub fn origin(&self) -> Origin {
        self.origin
    }
}

impl PartialEq for Request {
    fn eq(&self, other: &Self) -> bool {
        self.floor == other.floor
            && self.elevator_id == other.elevator_id
            && self.origin == other.origin
    }
}

impl Eq for Request {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_floors_below_the_lobby() {
        assert_eq!(
            Request::external(0, Direction::Up, 0),
            Err(DispatchError::InvalidFloor(0)),
        );
        assert!(Request::external(1, Direction::Up, 0).is_ok());
    }

    #[test]
    fn deserializing_checks_the_floor() {
        let lobby: Request = serde_json::from_str(
            r#"{"floor":1,"direction":"up","elevator_id":0,"origin":"external"}"#,
        ).unwrap();
        assert_eq!(lobby, Request::external(1, Direction::Up, 0).unwrap());

        let basement = serde_json::from_str::<Request>(
            r#"{"floor":0,"direction":"up","elevator_id":0,"origin":"external"}"#,
        );
        let err = basement.unwrap_err();
        assert!(err.to_string().contains("floor 0 is below the lowest floor"));
    }

    #[test]
    fn direction_does_not_affect_equality() {
        let up = Request::external(4, Direction::Up, 1).unwrap();
        let down = Request::external(4, Direction::Down, 1).unwrap();
        assert_eq!(up, down);
    }

    #[test]
    fn origin_and_owner_do_affect_equality() {
        let hall = Request::external(4, Direction::Up, 1).unwrap();
        let cab = Request::internal(4, Direction::Up, 1).unwrap();
        let other_car = Request::external(4, Direction::Up, 2).unwrap();
        assert_ne!(hall, cab);
        assert_ne!(hall, other_car);
    }
}
