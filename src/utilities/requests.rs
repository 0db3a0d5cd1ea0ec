use super::request::Request;

/// Pending stops of one elevator, kept in insertion order.
#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, Default)]
pub struct RequestQueue {
    requests: Vec<Request>,
}

impl RequestQueue {
    pub fn new() -> Self {
        RequestQueue { requests: Vec::new() }
    }

    /// Appends `request` unless an equal one is already waiting.
    pub fn add_order(&mut self, request: Request) -> bool {
        if self.requests.contains(&request) {
            return false
        }
        self.requests.push(request);
        true
    }

    /// Removes every request for `floor`, whatever its origin, and hands the
    /// removed ones back in queue order.
    pub fn clear_requests_at_floor(&mut self, floor: u32) -> Vec<Request> {
        let (served, remaining): (Vec<Request>, Vec<Request>) = self.requests.drain(..).partition(|request| request.floor() == floor);
        self.requests = remaining;
        served
    }

    pub fn head(&self) -> Option<&Request> {
        self.requests.first()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Request> {
        self.requests.iter()
    }

    pub fn has_request_at(&self, floor: u32) -> bool {
        self.requests.iter().any(|request| request.floor() == floor)
    }

    /// Floors strictly above `floor`, nearest first.
    pub fn floors_above(&self, floor: u32) -> Vec<u32> {
        let mut above: Vec<u32> = self.requests.iter()
            .map(Request::floor)
            .filter(|f| *f > floor)
            .collect();
        above.sort_unstable();
        above
    }

    /// Floors strictly below `floor`, nearest first.
    pub fn floors_below(&self, floor: u32) -> Vec<u32> {
        let mut below: Vec<u32> = self.requests.iter()
            .map(Request::floor)
            .filter(|f| *f < floor)
            .collect();
        below.sort_unstable_by(|a, b| b.cmp(a));
        below
    }

    pub fn to_vec(&self) -> Vec<Request> {
        self.requests.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utilities::direction::Direction;

    fn hall(floor: u32) -> Request {
        Request::external(floor, Direction::Up, 0).unwrap()
    }

    fn cab(floor: u32) -> Request {
        Request::internal(floor, Direction::Up, 0).unwrap()
    }

    #[test]
    fn duplicates_are_queued_once() {
        let mut queue = RequestQueue::new();
        assert!(queue.add_order(hall(3)));
        assert!(!queue.add_order(hall(3)));
        assert!(queue.add_order(cab(3)));
        assert!(!queue.add_order(cab(3)));
        assert_eq!(queue.len(), 2);
    }

    #[test]
    fn clearing_a_floor_takes_every_origin() {
        let mut queue = RequestQueue::new();
        queue.add_order(hall(3));
        queue.add_order(cab(6));
        queue.add_order(cab(3));

        let served = queue.clear_requests_at_floor(3);

        assert_eq!(served, vec![hall(3), cab(3)]);
        assert_eq!(queue.to_vec(), vec![cab(6)]);
    }

    #[test]
    fn partitions_are_sorted_nearest_first() {
        let mut queue = RequestQueue::new();
        for floor in [9, 2, 5, 7, 1, 4] {
            queue.add_order(cab(floor));
        }

        assert_eq!(queue.floors_above(5), vec![7, 9]);
        assert_eq!(queue.floors_below(5), vec![4, 2, 1]);
        assert_eq!(queue.head(), Some(&cab(9)));
    }
}
