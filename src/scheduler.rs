use crate::models::AppData;
use crate::period::same_cycle;
use chrono::{DateTime, Local};
use tracing::info;

/// Foreground pass: reset every habit whose cycle boundary was crossed
/// between the app-wide last check and `now`, each habit judged by its own
/// frequency unit. A missing checkpoint (first run ever) counts as crossed
/// for every unit. Gaps spanning several cycles collapse to a single reset;
/// lifetime totals are never touched here.
///
/// The checkpoint always advances to `now`, even when nothing was reset, so
/// the next pass starts its window from here. Returns how many habits were
/// reset.
pub fn run_reset_pass(data: &mut AppData, now: DateTime<Local>) -> usize {
    let today = now.date_naive();
    let last_check = data.last_reset_check.map(|at| at.date_naive());

    let mut habits_reset = 0;
    for habit in &mut data.habits {
        let crossed = match last_check {
            None => true,
            Some(prev) => !same_cycle(prev, today, habit.frequency_unit),
        };
        if crossed {
            habit.reset_for_new_cycle(now);
            habits_reset += 1;
        }
    }

    data.last_reset_check = Some(now);
    if habits_reset > 0 {
        info!("cycle boundary crossed, reset {habits_reset} habit(s)");
    }
    habits_reset
}
