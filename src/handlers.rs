use crate::catalog;
use crate::errors::AppError;
use crate::models::{
    AIAnalysisReport, ChartResponse, DailyLog, DateQuery, HabitPanelResponse, HabitStatus,
    JournalUpdateRequest, ReportRequest, ToggleHabitRequest,
};
use crate::score;
use crate::state::AppState;
use crate::stats;
use crate::storage;
use crate::ui::render_index;
use axum::{
    extract::{Path, Query, State},
    response::Html,
    Json,
};
use chrono::{Local, NaiveDate};
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::info;

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let date = today_string();
    let logs = state.logs.lock().await;
    let log = logs
        .get(&date)
        .cloned()
        .unwrap_or_else(|| DailyLog::empty(&date));
    Html(render_index(&log))
}

pub async fn get_today(State(state): State<AppState>) -> Json<DailyLog> {
    let date = today_string();
    let logs = state.logs.lock().await;
    Json(
        logs.get(&date)
            .cloned()
            .unwrap_or_else(|| DailyLog::empty(&date)),
    )
}

/// Active log for a selected date. Absent dates come back as a default
/// record without being inserted; a record is only created on first edit.
pub async fn get_log(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> Result<Json<DailyLog>, AppError> {
    let key = parse_date(&date)?.to_string();
    let logs = state.logs.lock().await;
    Ok(Json(
        logs.get(&key)
            .cloned()
            .unwrap_or_else(|| DailyLog::empty(&key)),
    ))
}

pub async fn toggle_habit(
    State(state): State<AppState>,
    Path(date): Path<String>,
    Json(payload): Json<ToggleHabitRequest>,
) -> Result<Json<DailyLog>, AppError> {
    let date = parse_date(&date)?;
    let updated = edit_log(&state, date, |log| {
        log.habits.insert(payload.habit, payload.done);
        log.score = score::habit_score(&log.habits, catalog::HABITS.len());
    })
    .await?;
    Ok(Json(updated))
}

pub async fn update_journal(
    State(state): State<AppState>,
    Path(date): Path<String>,
    Json(payload): Json<JournalUpdateRequest>,
) -> Result<Json<DailyLog>, AppError> {
    let date = parse_date(&date)?;
    if let Some(mood) = payload.mood {
        if !(1..=5).contains(&mood) {
            return Err(AppError::bad_request("mood must be between 1 and 5"));
        }
    }
    if let Some(weather) = payload.weather {
        if !(1..=5).contains(&weather) {
            return Err(AppError::bad_request("weather must be between 1 and 5"));
        }
    }

    let updated = edit_log(&state, date, move |log| {
        if let Some(notes) = payload.notes {
            log.notes = notes;
        }
        if let Some(mood) = payload.mood {
            log.mood = mood;
        }
        if let Some(weather) = payload.weather {
            log.weather = weather;
        }
    })
    .await?;
    Ok(Json(updated))
}

/// Habit catalog joined with the selected date's completion state, streaks
/// and all-time frequency.
pub async fn habit_panel(
    State(state): State<AppState>,
    Query(query): Query<DateQuery>,
) -> Result<Json<HabitPanelResponse>, AppError> {
    let date = resolve_query_date(query.date.as_deref())?;
    let key = date.to_string();
    let logs = state.logs.lock().await;
    let active = logs
        .get(&key)
        .cloned()
        .unwrap_or_else(|| DailyLog::empty(&key));

    let habits = catalog::HABITS
        .iter()
        .map(|habit| HabitStatus {
            id: habit.id,
            label: habit.label,
            icon: habit.icon,
            done: active.habits.get(&habit.id).copied().unwrap_or(false),
            streak: score::streak(&logs, habit.id, date),
            frequency: score::frequency(&logs, habit.id),
        })
        .collect();

    Ok(Json(HabitPanelResponse { date: key, habits }))
}

pub async fn chart(
    State(state): State<AppState>,
    Query(query): Query<DateQuery>,
) -> Result<Json<ChartResponse>, AppError> {
    let date = resolve_query_date(query.date.as_deref())?;
    let logs = state.logs.lock().await;
    Ok(Json(stats::month_chart(date, &logs)))
}

/// Kicks off one analysis call over the full history. The store lock is
/// released before the network call; the busy flag alone serializes
/// requests, so a second click while one is outstanding gets a 409.
pub async fn report(
    State(state): State<AppState>,
    Json(payload): Json<ReportRequest>,
) -> Result<Json<Option<AIAnalysisReport>>, AppError> {
    let _guard = InFlightGuard::acquire(&state.report_busy)
        .ok_or_else(|| AppError::conflict("a report is already being generated"))?;

    let history: Vec<DailyLog> = {
        let logs = state.logs.lock().await;
        logs.values().cloned().collect()
    };

    info!(
        "generating {:?} report over {} log entries",
        payload.period,
        history.len()
    );
    let report = state.report.generate(&history, payload.period).await;
    Ok(Json(report))
}

async fn edit_log<F>(state: &AppState, date: NaiveDate, apply: F) -> Result<DailyLog, AppError>
where
    F: FnOnce(&mut DailyLog),
{
    let key = date.to_string();
    let mut logs = state.logs.lock().await;
    let updated = {
        let entry = logs
            .entry(key.clone())
            .or_insert_with(|| DailyLog::empty(&key));
        apply(entry);
        entry.clone()
    };

    storage::persist_logs(&state.data_path, &logs).await?;

    Ok(updated)
}

fn parse_date(raw: &str) -> Result<NaiveDate, AppError> {
    raw.parse::<NaiveDate>()
        .map_err(|_| AppError::bad_request("date must be YYYY-MM-DD"))
}

fn resolve_query_date(raw: Option<&str>) -> Result<NaiveDate, AppError> {
    match raw {
        Some(raw) => parse_date(raw),
        None => Ok(Local::now().date_naive()),
    }
}

fn today_string() -> String {
    Local::now().date_naive().to_string()
}

/// Releases the single-flight slot when the request settles, including
/// cancellation mid-call.
struct InFlightGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { flag })
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}
