use std::io::{stdout, Stdout, Write};

use crossterm::{cursor, terminal, Result, ExecutableCommand};

use crate::modules::observer::ElevatorEvent;
use super::elevator_status::ElevatorStatus;

const CELL: &str = "------------";

/// Terminal status table redrawn in place after every simulation step.
pub struct Debug {
    stdout: Stdout,
    num_floors: u32,
    lines_printed: u16,
}

impl Debug {
    pub fn new(num_floors: u32) -> Self {
        Debug {
            stdout: stdout(),
            num_floors: num_floors,
            lines_printed: 0,
        }
    }

    pub fn printstatus(&mut self, step: u32, fleet: &[ElevatorStatus], events: &[ElevatorEvent]) -> Result<()> {
        if self.lines_printed > 0 {
            self.stdout.execute(cursor::MoveUp(self.lines_printed))?;
        }
        self.stdout.execute(terminal::Clear(terminal::ClearType::FromCursorDown))?;

        let lines = render(self.num_floors, step, fleet, events);
        for line in &lines {
            writeln!(self.stdout, "{}", line)?;
        }
        self.stdout.flush()?;
        self.lines_printed = lines.len() as u16;
        Ok(())
    }
}

fn separator(columns: usize) -> String {
    format!("+{}", vec![CELL; columns].join("+")) + "+"
}

/// One row per floor, top floor first: `[#]` marks the car, `*` a pending
/// stop. Below the shaft, one summary row per elevator.
pub fn render(num_floors: u32, step: u32, fleet: &[ElevatorStatus], events: &[ElevatorEvent]) -> Vec<String> {
    let mut lines = Vec::new();
    let shaft_separator = separator(fleet.len() + 1);

    lines.push(format!("STEP {} ({} events)", step, events.len()));
    lines.push(shaft_separator.clone());
    let mut header = format!("| {0:<10} |", "FLOOR");
    for status in fleet {
        header += &format!(" {0:<10} |", format!("ELEVATOR {}", status.id));
    }
    lines.push(header);

    let top_floor = fleet.iter().map(|status| status.floor).chain(std::iter::once(num_floors)).max().unwrap_or(num_floors);
    for floor in (1..=top_floor).rev() {
        lines.push(shaft_separator.clone());
        let mut row = format!("| {0:<10} |", floor);
        for status in fleet {
            let cell = match (status.floor == floor, status.has_request_at(floor)) {
                (true, true) => "[#] *",
                (true, false) => "[#]",
                (false, true) => "*",
                (false, false) => "",
            };
            row += &format!(" {0:<10} |", cell);
        }
        lines.push(row);
    }
    lines.push(shaft_separator);

    let summary_separator = separator(5);
    lines.push(summary_separator.clone());
    lines.push(format!("| {0:<10} | {1:<10} | {2:<10} | {3:<10} | {4:<10} |", "ELEVATOR", "STATE", "FLOOR", "DIRECTION", "PENDING"));
    for status in fleet {
        lines.push(summary_separator.clone());
        lines.push(format!(
            "| {0:<10} | {1:<10} | {2:<10} | {3:<10} | {4:<10} |",
            status.id,
            status.state.as_string(),
            status.floor,
            status.direction.as_string(),
            status.requests.len(),
        ));
    }
    lines.push(summary_separator);
    lines
}
