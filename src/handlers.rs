use crate::errors::AppError;
use crate::habit::Habit;
use crate::models::{
    CreateHabitRequest, ForegroundResponse, HabitDetailResponse, HabitListResponse, HabitSnapshot,
    HeatmapResponse, IncrementResponse, UpdateHabitRequest,
};
use crate::scheduler::run_reset_pass;
use crate::state::AppState;
use crate::stats;
use crate::storage::persist_data;
use crate::ui::render_index;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Html,
    Json,
};
use chrono::Local;
use serde::Deserialize;
use uuid::Uuid;

pub async fn index() -> Html<&'static str> {
    Html(render_index())
}

pub async fn list_habits(State(state): State<AppState>) -> Json<HabitListResponse> {
    let data = state.data.lock().await;
    let habits = data.habits.iter().map(HabitSnapshot::of).collect();
    Json(HabitListResponse { habits })
}

pub async fn create_habit(
    State(state): State<AppState>,
    Json(payload): Json<CreateHabitRequest>,
) -> Result<(StatusCode, Json<HabitSnapshot>), AppError> {
    let title = payload.title.trim();
    if title.is_empty() {
        return Err(AppError::bad_request("title must not be empty"));
    }
    if payload.frequency_count == 0 {
        return Err(AppError::bad_request("frequency_count must be at least 1"));
    }

    let habit = Habit::new(title, payload.frequency_count, payload.frequency_unit);
    let snapshot = HabitSnapshot::of(&habit);

    let mut data = state.data.lock().await;
    data.habits.push(habit);
    persist_data(&state.data_path, &data).await?;

    Ok((StatusCode::CREATED, Json(snapshot)))
}

pub async fn get_habit(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<HabitDetailResponse>, AppError> {
    let today = Local::now().date_naive();
    let data = state.data.lock().await;
    let habit = data
        .habit(id)
        .ok_or_else(|| AppError::not_found("no such habit"))?;

    Ok(Json(HabitDetailResponse {
        snapshot: HabitSnapshot::of(habit),
        date_created: habit.date_created,
        date_last_reset: habit.date_last_reset,
        perfect_cycle_count: stats::perfect_cycle_count(habit),
        completion_rate: stats::completion_rate(habit, today),
    }))
}

pub async fn update_habit(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateHabitRequest>,
) -> Result<Json<HabitSnapshot>, AppError> {
    if let Some(title) = &payload.title {
        if title.trim().is_empty() {
            return Err(AppError::bad_request("title must not be empty"));
        }
    }
    if payload.frequency_count == Some(0) {
        return Err(AppError::bad_request("frequency_count must be at least 1"));
    }

    let mut data = state.data.lock().await;
    let habit = data
        .habit_mut(id)
        .ok_or_else(|| AppError::not_found("no such habit"))?;

    if let Some(title) = payload.title {
        habit.title = title.trim().to_string();
    }
    if let Some(count) = payload.frequency_count {
        habit.frequency_count = count;
    }
    if let Some(unit) = payload.frequency_unit {
        habit.frequency_unit = unit;
    }
    let snapshot = HabitSnapshot::of(habit);

    persist_data(&state.data_path, &data).await?;
    Ok(Json(snapshot))
}

/// Deleting an unknown id is a silent no-op; either way the habit and its
/// history are gone afterwards.
pub async fn delete_habit(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let mut data = state.data.lock().await;
    if data.remove_habit(id) {
        persist_data(&state.data_path, &data).await?;
    }
    Ok(StatusCode::NO_CONTENT)
}

pub async fn increment_habit(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<IncrementResponse>, AppError> {
    let today = Local::now().date_naive();
    let mut data = state.data.lock().await;
    let habit = data
        .habit_mut(id)
        .ok_or_else(|| AppError::not_found("no such habit"))?;

    let just_completed = habit.increment(today);
    let snapshot = HabitSnapshot::of(habit);

    persist_data(&state.data_path, &data).await?;
    Ok(Json(IncrementResponse {
        snapshot,
        just_completed,
    }))
}

pub async fn decrement_habit(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<HabitSnapshot>, AppError> {
    let today = Local::now().date_naive();
    let mut data = state.data.lock().await;
    let habit = data
        .habit_mut(id)
        .ok_or_else(|| AppError::not_found("no such habit"))?;

    habit.decrement(today);
    let snapshot = HabitSnapshot::of(habit);

    persist_data(&state.data_path, &data).await?;
    Ok(Json(snapshot))
}

/// The user-invoked "undo this cycle", distinct from the automatic
/// boundary reset.
pub async fn reset_habit(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<HabitSnapshot>, AppError> {
    let today = Local::now().date_naive();
    let mut data = state.data.lock().await;
    let habit = data
        .habit_mut(id)
        .ok_or_else(|| AppError::not_found("no such habit"))?;

    habit.reset_current_progress(today);
    let snapshot = HabitSnapshot::of(habit);

    persist_data(&state.data_path, &data).await?;
    Ok(Json(snapshot))
}

#[derive(Debug, Deserialize)]
pub struct HeatmapQuery {
    pub days: Option<u32>,
}

pub async fn habit_heatmap(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<HeatmapQuery>,
) -> Result<Json<HeatmapResponse>, AppError> {
    let days = query.days.unwrap_or(30).clamp(1, 366);
    let data = state.data.lock().await;
    let habit = data
        .habit(id)
        .ok_or_else(|| AppError::not_found("no such habit"))?;

    Ok(Json(stats::heatmap(habit, days)))
}

/// Lifecycle hook for app foreground/launch: runs the cycle-boundary pass
/// and advances the app-wide checkpoint.
pub async fn foreground(
    State(state): State<AppState>,
) -> Result<Json<ForegroundResponse>, AppError> {
    let now = Local::now();
    let mut data = state.data.lock().await;
    let habits_reset = run_reset_pass(&mut data, now);

    persist_data(&state.data_path, &data).await?;
    Ok(Json(ForegroundResponse {
        habits_reset,
        checked_at: now,
    }))
}
