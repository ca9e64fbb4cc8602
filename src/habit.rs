use crate::period::day_key;
use chrono::{DateTime, Local, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use tracing::warn;
use uuid::Uuid;

/// How often the habit's goal recurs. Determines the cycle length for
/// resets and for grouping history entries into statistics.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum FrequencyUnit {
    #[default]
    Daily,
    Weekly,
    Monthly,
}

impl FrequencyUnit {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "daily" => Some(Self::Daily),
            "weekly" => Some(Self::Weekly),
            "monthly" => Some(Self::Monthly),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
        }
    }
}

// Fallback rule: an unknown unit string in stored data decodes to `daily`
// rather than rejecting the whole record. The fallback is logged so it
// never happens silently.
impl<'de> Deserialize<'de> for FrequencyUnit {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse(&raw).unwrap_or_else(|| {
            warn!("unknown frequency unit {raw:?}, falling back to daily");
            Self::Daily
        }))
    }
}

/// Three-way display classification for a habit.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum HabitStatus {
    /// The goal for the current cycle is met.
    Complete,
    /// Progress this cycle, or lifetime history from earlier cycles.
    InProgress,
    /// Never touched.
    Untouched,
}

/// A tracked habit. `current_count` and `total_count` are fast-path caches
/// for the open cycle; `completion_history` (day key -> completions logged
/// that day) is the durable record that statistics derive from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Habit {
    pub id: Uuid,
    pub title: String,
    pub frequency_count: u32,
    pub frequency_unit: FrequencyUnit,
    pub current_count: u32,
    pub total_count: u64,
    pub completion_history: BTreeMap<String, u32>,
    pub date_created: DateTime<Local>,
    pub date_last_reset: DateTime<Local>,
}

impl Habit {
    pub fn new(title: impl Into<String>, frequency_count: u32, frequency_unit: FrequencyUnit) -> Self {
        let now = Local::now();
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            frequency_count,
            frequency_unit,
            current_count: 0,
            total_count: 0,
            completion_history: BTreeMap::new(),
            date_created: now,
            date_last_reset: now,
        }
    }

    /// Per-cycle goal, coerced to at least 1 so it is always safe as a
    /// divisor and as a completion threshold.
    pub fn goal(&self) -> u32 {
        self.frequency_count.max(1)
    }

    pub fn is_fully_done(&self) -> bool {
        self.current_count >= self.goal()
    }

    /// Progress ratio within the current cycle. Not clamped; increments
    /// stop at the goal, but lowering `frequency_count` mid-cycle can push
    /// this above 1.0 until display clamps it.
    pub fn progress(&self) -> f64 {
        f64::from(self.current_count) / f64::from(self.goal())
    }

    pub fn status(&self) -> HabitStatus {
        if self.is_fully_done() {
            HabitStatus::Complete
        } else if self.current_count > 0 || self.total_count > 0 {
            HabitStatus::InProgress
        } else {
            HabitStatus::Untouched
        }
    }

    /// Log one completion for `today`. A no-op once the cycle goal is met.
    /// Returns true iff this call is the one that completed the cycle, so
    /// presentation can react to the transition.
    pub fn increment(&mut self, today: NaiveDate) -> bool {
        if self.is_fully_done() {
            return false;
        }
        self.current_count += 1;
        self.total_count += 1;
        *self.completion_history.entry(day_key(today)).or_insert(0) += 1;
        self.is_fully_done()
    }

    /// Remove one completion logged for `today`. A no-op at zero progress.
    /// Today's history entry floors at zero and is dropped when empty;
    /// a missing entry reads as zero.
    pub fn decrement(&mut self, today: NaiveDate) {
        if self.current_count == 0 {
            return;
        }
        self.current_count -= 1;
        self.total_count = self.total_count.saturating_sub(1);
        let key = day_key(today);
        if let Some(count) = self.completion_history.get_mut(&key) {
            *count = count.saturating_sub(1);
            if *count == 0 {
                self.completion_history.remove(&key);
            }
        }
    }

    /// Undo everything done this cycle: removes the cycle's contribution
    /// from the lifetime total and clears today's history entry. Undo is
    /// scoped to the most recent contributing day key, so for weekly and
    /// monthly habits earlier days of the open cycle keep their entries.
    pub fn reset_current_progress(&mut self, today: NaiveDate) {
        self.total_count = self.total_count.saturating_sub(u64::from(self.current_count));
        self.current_count = 0;
        self.completion_history.remove(&day_key(today));
    }

    /// Automatic cycle-boundary reset. Zeroes the within-cycle counter only;
    /// the lifetime total and the history log are permanent.
    pub fn reset_for_new_cycle(&mut self, now: DateTime<Local>) {
        self.current_count = 0;
        self.date_last_reset = now;
    }

    pub fn history_count(&self, date: NaiveDate) -> u32 {
        self.completion_history.get(&day_key(date)).copied().unwrap_or(0)
    }
}
