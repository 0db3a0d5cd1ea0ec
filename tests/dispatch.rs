use crossbeam_channel::{unbounded, Receiver};

use elevator_dispatch::{
    ChannelObserver, Direction, DispatchError, ElevatorController, ElevatorEvent, ElevatorState,
    FifoScheduling, ScanScheduling,
};

fn observe(controller: &mut ElevatorController, id: usize) -> Receiver<ElevatorEvent> {
    let (event_tx, event_rx) = unbounded();
    controller.subscribe(id, Box::new(ChannelObserver::new(event_tx))).unwrap();
    event_rx
}

fn arrivals(events: &Receiver<ElevatorEvent>) -> Vec<u32> {
    let mut stops = Vec::new();
    let mut last_floor = 1;
    for event in events.try_iter() {
        match event {
            ElevatorEvent::FloorChanged { floor, .. } => last_floor = floor,
            ElevatorEvent::StateChanged { state: ElevatorState::Stopped, .. } => stops.push(last_floor),
            ElevatorEvent::StateChanged { .. } => (),
        }
    }
    stops
}

#[test]
fn scan_end_to_end_visits_three_then_five() {
    let mut controller = ElevatorController::new(2);
    let events = observe(&mut controller, 0);

    controller.request_elevator(0, 3, Direction::Up).unwrap();
    controller.request_floor(0, 5).unwrap();
    controller.step();
    controller.step();

    assert_eq!(arrivals(&events), vec![3, 5]);
    let status = &controller.status()[0];
    assert!(status.requests.is_empty());
    assert_eq!(status.state, ElevatorState::Stopped);
    assert_eq!(status.direction, Direction::Idle);
    assert!(controller.status()[1].is_idle());
}

#[test]
fn scan_finishes_the_upward_sweep_before_reversing() {
    let mut controller = ElevatorController::new(1).with_strategy(Box::new(ScanScheduling));
    controller.request_floor(0, 5).unwrap();
    controller.step();
    let events = observe(&mut controller, 0);

    controller.request_floor(0, 7).unwrap();
    controller.request_floor(0, 3).unwrap();
    controller.step();
    assert_eq!(controller.elevators()[0].current_floor(), 7);
    assert_eq!(controller.elevators()[0].direction(), Direction::Up);

    controller.step();
    assert_eq!(controller.elevators()[0].current_floor(), 3);
    assert_eq!(arrivals(&events), vec![7, 3]);
    assert!(controller.status()[0].is_idle());
}

#[test]
fn fifo_heads_for_the_oldest_request_first() {
    let mut controller = ElevatorController::new(1).with_strategy(Box::new(FifoScheduling));
    controller.request_floor(0, 5).unwrap();
    controller.step();

    controller.request_floor(0, 7).unwrap();
    controller.request_floor(0, 3).unwrap();
    controller.step();

    assert_eq!(controller.elevators()[0].current_floor(), 7);
}

#[test]
fn moving_from_one_to_five_reports_four_floors() {
    let mut controller = ElevatorController::new(1);
    let events = observe(&mut controller, 0);

    controller.request_floor(0, 5).unwrap();
    controller.step();

    let floors: Vec<u32> = events.try_iter()
        .filter_map(|event| match event {
            ElevatorEvent::FloorChanged { floor, .. } => Some(floor),
            _ => None,
        })
        .collect();
    assert_eq!(floors, vec![2, 3, 4, 5]);
}

#[test]
fn unknown_elevator_leaves_the_fleet_untouched() {
    let mut controller = ElevatorController::new(2);
    controller.request_floor(1, 4).unwrap();
    let before = controller.status();

    assert_eq!(controller.request_elevator(99, 3, Direction::Up), Err(DispatchError::ElevatorNotFound(99)));
    assert_eq!(controller.request_floor(99, 6), Err(DispatchError::ElevatorNotFound(99)));

    assert_eq!(controller.status(), before);
}

#[test]
fn duplicate_requests_count_once_per_tuple() {
    let mut controller = ElevatorController::new(2);
    for _ in 0..3 {
        controller.request_elevator(0, 6, Direction::Up).unwrap();
        controller.request_elevator(0, 6, Direction::Down).unwrap();
        controller.request_floor(0, 6).unwrap();
        controller.request_floor(1, 6).unwrap();
    }

    assert_eq!(controller.elevators()[0].requests().len(), 2);
    assert_eq!(controller.elevators()[1].requests().len(), 1);
}

#[test]
fn idle_direction_matches_an_empty_parked_car() {
    let mut controller = ElevatorController::new(3).with_top_floor(12);
    let mut seed: u64 = 0x5eed;
    let mut next = move |bound: u64| {
        seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        (seed >> 33) % bound
    };

    for round in 0..200 {
        let id = next(3) as usize;
        let floor = next(12) as u32 + 1;
        match next(6) {
            0 => { let _ = controller.request_floor(id, floor); },
            1 => { let _ = controller.request_elevator(id, floor, Direction::Up); },
            2 => { let _ = controller.request_elevator(id, floor, Direction::Down); },
            3 => { let _ = controller.set_maintenance(id, next(2) == 0); },
            _ => controller.step(),
        }
        if round % 50 == 0 {
            let strategy: Box<dyn elevator_dispatch::SchedulingStrategy> = if round % 100 == 0 {
                Box::new(FifoScheduling)
            } else {
                Box::new(ScanScheduling)
            };
            controller.set_strategy(strategy);
        }

        for status in controller.status() {
            let idle = status.direction == Direction::Idle;
            let parked = status.state != ElevatorState::Running && status.requests.is_empty();
            assert_eq!(idle, parked, "round {}: {:?}", round, status);
            if status.state == ElevatorState::Running {
                assert!(!status.requests.is_empty());
            }
            assert!(status.floor >= 1 && status.floor <= 12);
        }
    }

    for id in 0..3 {
        let _ = controller.set_maintenance(id, false);
    }
    for _ in 0..100 {
        controller.step();
    }
    assert!(controller.status().iter().all(|status| status.is_idle()));
}
