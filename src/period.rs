use crate::habit::FrequencyUnit;
use chrono::{Datelike, Duration, NaiveDate};

/// Canonical `YYYY-MM-DD` key for a local calendar day. History entries are
/// always stored at this granularity, regardless of the habit's unit.
pub fn day_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Key identifying the cycle containing `date` under `unit`. Day key for
/// daily, `YYYY-Www` (ISO week) for weekly, `YYYY-MM` for monthly. Used only
/// to group day entries for aggregation.
pub fn period_key(date: NaiveDate, unit: FrequencyUnit) -> String {
    match unit {
        FrequencyUnit::Daily => day_key(date),
        FrequencyUnit::Weekly => week_label(date),
        FrequencyUnit::Monthly => date.format("%Y-%m").to_string(),
    }
}

/// Whether both dates fall in the same cycle: same day, same ISO week, or
/// same calendar month.
pub fn same_cycle(a: NaiveDate, b: NaiveDate, unit: FrequencyUnit) -> bool {
    match unit {
        FrequencyUnit::Daily => a == b,
        FrequencyUnit::Weekly => a.iso_week() == b.iso_week(),
        FrequencyUnit::Monthly => a.year() == b.year() && a.month() == b.month(),
    }
}

/// Number of cycles touched by the inclusive span `from..=to`, floored at 1.
/// A habit created today has elapsed one (partial) daily cycle, so a
/// completion logged today yields a 100% rate.
pub fn elapsed_cycles(from: NaiveDate, to: NaiveDate, unit: FrequencyUnit) -> i64 {
    if to < from {
        return 1;
    }
    let cycles = match unit {
        FrequencyUnit::Daily => (to - from).num_days() + 1,
        FrequencyUnit::Weekly => (week_start(to) - week_start(from)).num_days() / 7 + 1,
        FrequencyUnit::Monthly => {
            let months_from = from.year() as i64 * 12 + from.month() as i64;
            let months_to = to.year() as i64 * 12 + to.month() as i64;
            months_to - months_from + 1
        }
    };
    cycles.max(1)
}

pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

fn week_label(date: NaiveDate) -> String {
    let iso = date.iso_week();
    format!("{}-W{:02}", iso.year(), iso.week())
}
