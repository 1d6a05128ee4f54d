use crate::catalog::HabitKey;
use crate::models::DailyLog;
use chrono::{Duration, NaiveDate};
use std::collections::BTreeMap;

/// Daily performance on the 0-10 scale: completed habits over the catalog
/// size, rounded to the nearest integer. An empty catalog scores 0.
pub fn habit_score(habits: &BTreeMap<HabitKey, bool>, catalog_len: usize) -> f64 {
    if catalog_len == 0 {
        return 0.0;
    }
    let done = habits.values().filter(|done| **done).count();
    (done as f64 / catalog_len as f64 * 10.0).round()
}

/// Consecutive days the habit has been kept, walking backward one calendar
/// day at a time from `date`. A day without the habit marked, or without a
/// record at all, ends the walk; a miss on `date` itself means 0 no matter
/// what came before.
pub fn streak(logs: &BTreeMap<String, DailyLog>, habit: HabitKey, date: NaiveDate) -> u32 {
    let mut current = date;
    let mut count = 0;
    while logs
        .get(&current.to_string())
        .and_then(|log| log.habits.get(&habit))
        .copied()
        .unwrap_or(false)
    {
        count += 1;
        current = current - Duration::days(1);
    }
    count
}

/// Total days the habit was ever marked complete across the store.
pub fn frequency(logs: &BTreeMap<String, DailyLog>, habit: HabitKey) -> usize {
    logs.values()
        .filter(|log| log.habits.get(&habit).copied().unwrap_or(false))
        .count()
}
