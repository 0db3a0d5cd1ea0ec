use std::thread;

use crossbeam_channel::{unbounded, Receiver, Sender};
use tracing::{info, warn};

use crate::utilities::config::{Config, ScriptedRequest};
use crate::utilities::debug::Debug;
use crate::utilities::elevator_status::ElevatorStatus;
use crate::utilities::error::SimulationError;

pub mod controller;
pub mod elevator;
pub mod observer;
pub mod scheduling;

use controller::ElevatorController;
use observer::{ChannelObserver, ElevatorEvent, LogObserver};

/// Replays the scripted requests, then steps the fleet `steps` times,
/// publishing a status snapshot after each step. Returns the final status.
pub fn simulate(
    mut controller: ElevatorController,
    requests: &[ScriptedRequest],
    steps: u32,
    status_tx: Sender<(u32, Vec<ElevatorStatus>)>,
) -> Vec<ElevatorStatus> {
    for request in requests {
        // rejected requests are reported by the controller, the run goes on
        let _ = match *request {
            ScriptedRequest::Hall { elevator, floor, direction } => controller.request_elevator(elevator, floor, direction),
            ScriptedRequest::Cab { elevator, floor } => controller.request_floor(elevator, floor),
        };
    }

    for step in 1..=steps {
        info!(step, "running simulation step");
        controller.step();
        if status_tx.send((step, controller.status())).is_err() {
            warn!("status display went away, stopping after step {}", step);
            break;
        }
    }
    controller.status()
}

fn display(num_floors: u32, status_rx: Receiver<(u32, Vec<ElevatorStatus>)>, event_rx: Receiver<ElevatorEvent>) -> Result<(), SimulationError> {
    let mut debug = Debug::new(num_floors);
    for (step, fleet) in status_rx.iter() {
        let events: Vec<ElevatorEvent> = event_rx.try_iter().collect();
        debug.printstatus(step, &fleet, &events)?;
    }
    Ok(())
}

pub fn run() -> Result<(), SimulationError> {
    // READ CONFIGURATION
    let config = Config::get()?;
    let num_elevators = config.building.num_elevators;
    let num_floors = config.building.num_floors;
    info!(
        elevators = num_elevators,
        floors = num_floors,
        strategy = ?config.simulation.strategy,
        steps = config.simulation.steps,
        "starting elevator simulation"
    );

    // INITIALIZE CHANNELS
    let (event_tx, event_rx) = unbounded::<ElevatorEvent>();
    let (status_tx, status_rx) = unbounded::<(u32, Vec<ElevatorStatus>)>();

    // INITIALIZE FLEET
    let mut controller = ElevatorController::new(num_elevators)
        .with_strategy(config.simulation.strategy.build())
        .with_top_floor(num_floors);
    for id in 0..num_elevators {
        controller.subscribe(id, Box::new(LogObserver))?;
        controller.subscribe(id, Box::new(ChannelObserver::new(event_tx.clone())))?;
    }
    drop(event_tx);

    // INITIALIZE THREAD FOR THE SIMULATION
    let simulation = {
        let requests = config.requests.clone();
        let steps = config.simulation.steps;
        thread::Builder::new().name("simulation".to_string()).spawn(move || simulate(
            controller,
            &requests,
            steps,
            status_tx,
        ))?
    };

    display(num_floors, status_rx, event_rx)?;

    let final_status = simulation.join().map_err(|_| SimulationError::SimulationPanicked)?;
    println!("{}", serde_json::to_string_pretty(&final_status)?);
    Ok(())
}
