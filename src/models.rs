use crate::habit::{FrequencyUnit, Habit, HabitStatus};
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Root of the persisted state file: every habit plus the app-wide
/// timestamp of the last cycle-boundary check.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppData {
    pub habits: Vec<Habit>,
    pub last_reset_check: Option<DateTime<Local>>,
}

impl AppData {
    pub fn habit(&self, id: Uuid) -> Option<&Habit> {
        self.habits.iter().find(|habit| habit.id == id)
    }

    pub fn habit_mut(&mut self, id: Uuid) -> Option<&mut Habit> {
        self.habits.iter_mut().find(|habit| habit.id == id)
    }

    /// Remove a habit and its history in one step. Returns false when the
    /// id is unknown, which callers treat as a no-op rather than an error.
    pub fn remove_habit(&mut self, id: Uuid) -> bool {
        let before = self.habits.len();
        self.habits.retain(|habit| habit.id != id);
        self.habits.len() != before
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateHabitRequest {
    pub title: String,
    pub frequency_count: u32,
    #[serde(default)]
    pub frequency_unit: FrequencyUnit,
}

#[derive(Debug, Deserialize)]
pub struct UpdateHabitRequest {
    pub title: Option<String>,
    pub frequency_count: Option<u32>,
    pub frequency_unit: Option<FrequencyUnit>,
}

/// Read-only view of a habit's within-cycle state, as shown on cards.
#[derive(Debug, Serialize)]
pub struct HabitSnapshot {
    pub id: Uuid,
    pub title: String,
    pub frequency_count: u32,
    pub frequency_unit: FrequencyUnit,
    pub current_count: u32,
    pub total_count: u64,
    pub progress: f64,
    pub is_fully_done: bool,
    pub status: HabitStatus,
}

impl HabitSnapshot {
    pub fn of(habit: &Habit) -> Self {
        Self {
            id: habit.id,
            title: habit.title.clone(),
            frequency_count: habit.frequency_count,
            frequency_unit: habit.frequency_unit,
            current_count: habit.current_count,
            total_count: habit.total_count,
            progress: habit.progress(),
            is_fully_done: habit.is_fully_done(),
            status: habit.status(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HabitListResponse {
    pub habits: Vec<HabitSnapshot>,
}

/// Snapshot plus derived statistics, for the detail endpoint.
#[derive(Debug, Serialize)]
pub struct HabitDetailResponse {
    #[serde(flatten)]
    pub snapshot: HabitSnapshot,
    pub date_created: DateTime<Local>,
    pub date_last_reset: DateTime<Local>,
    pub perfect_cycle_count: u32,
    pub completion_rate: u32,
}

#[derive(Debug, Serialize)]
pub struct IncrementResponse {
    #[serde(flatten)]
    pub snapshot: HabitSnapshot,
    pub just_completed: bool,
}

#[derive(Debug, Serialize)]
pub struct HeatmapPoint {
    pub date: String,
    pub count: u32,
    pub intensity: f64,
}

#[derive(Debug, Serialize)]
pub struct HeatmapResponse {
    pub days: Vec<HeatmapPoint>,
}

#[derive(Debug, Serialize)]
pub struct ForegroundResponse {
    pub habits_reset: usize,
    pub checked_at: DateTime<Local>,
}
