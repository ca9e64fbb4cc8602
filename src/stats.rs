use crate::habit::{FrequencyUnit, Habit};
use crate::models::{HeatmapPoint, HeatmapResponse};
use crate::period::{day_key, elapsed_cycles, period_key};
use chrono::{Duration, Local, NaiveDate};
use std::collections::BTreeMap;

/// Sum the day-granular history into per-cycle totals, keyed by the
/// habit's period key. Unparseable day keys are skipped.
fn cycle_sums(habit: &Habit) -> BTreeMap<String, u32> {
    let mut sums: BTreeMap<String, u32> = BTreeMap::new();
    for (key, count) in &habit.completion_history {
        let Ok(date) = NaiveDate::parse_from_str(key, "%Y-%m-%d") else {
            continue;
        };
        *sums.entry(period_key(date, habit.frequency_unit)).or_insert(0) += count;
    }
    sums
}

/// Number of cycles whose logged completions met or exceeded the goal.
pub fn perfect_cycle_count(habit: &Habit) -> u32 {
    let goal = habit.goal();
    cycle_sums(habit).values().filter(|sum| **sum >= goal).count() as u32
}

/// Perfect cycles over cycles elapsed since creation, as a truncated
/// integer percentage.
pub fn completion_rate(habit: &Habit, today: NaiveDate) -> u32 {
    let elapsed = elapsed_cycles(
        habit.date_created.date_naive(),
        today,
        habit.frequency_unit,
    );
    (i64::from(perfect_cycle_count(habit)) * 100 / elapsed) as u32
}

/// Calendar-cell intensity for `date`: 0 when nothing was logged, otherwise
/// the completion ratio clamped to [0.3, 1.0] so even a single completion
/// stays visible. Weekly and monthly habits substitute the containing
/// cycle's sum, so every day of that cycle shares one intensity.
pub fn heatmap_intensity(habit: &Habit, date: NaiveDate) -> f64 {
    let value = match habit.frequency_unit {
        FrequencyUnit::Daily => habit.history_count(date),
        FrequencyUnit::Weekly | FrequencyUnit::Monthly => cycle_sums(habit)
            .get(&period_key(date, habit.frequency_unit))
            .copied()
            .unwrap_or(0),
    };
    if value == 0 {
        return 0.0;
    }
    (f64::from(value) / f64::from(habit.goal())).clamp(0.3, 1.0)
}

pub fn heatmap(habit: &Habit, days: u32) -> HeatmapResponse {
    heatmap_at(Local::now().date_naive(), habit, days)
}

/// Intensity series for the `days` calendar days ending at `today`.
pub fn heatmap_at(today: NaiveDate, habit: &Habit, days: u32) -> HeatmapResponse {
    let mut points = Vec::with_capacity(days as usize);
    for offset in (0..days).rev() {
        let date = today - Duration::days(i64::from(offset));
        points.push(HeatmapPoint {
            date: day_key(date),
            count: habit.history_count(date),
            intensity: heatmap_intensity(habit, date),
        });
    }
    HeatmapResponse { days: points }
}
