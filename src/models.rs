use crate::catalog::{self, HabitKey, DEFAULT_GRADE};
use crate::score;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One journal record per calendar date. The `date` string is the unique
/// key; this struct is also the on-disk shape, serialized as-is into the
/// log file array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyLog {
    pub date: String,
    #[serde(default)]
    pub habits: BTreeMap<HabitKey, bool>,
    #[serde(default)]
    pub notes: String,
    #[serde(default = "neutral_grade")]
    pub mood: u8,
    #[serde(default = "neutral_grade")]
    pub weather: u8,
    #[serde(default)]
    pub score: f64,
}

fn neutral_grade() -> u8 {
    DEFAULT_GRADE
}

impl DailyLog {
    /// Fresh record for a date that has no entry yet: every catalog habit
    /// unchecked, neutral grades, empty notes.
    pub fn empty(date: &str) -> Self {
        Self {
            date: date.to_string(),
            habits: catalog::HABITS.iter().map(|habit| (habit.id, false)).collect(),
            notes: String::new(),
            mood: DEFAULT_GRADE,
            weather: DEFAULT_GRADE,
            score: 0.0,
        }
    }

    /// Restores the record invariants after deserialization: the habit map
    /// carries every catalog key, grades stay on the 1-5 scale, and the
    /// score always agrees with the habit booleans (a stale stored score is
    /// overwritten rather than trusted).
    pub fn normalize(&mut self) {
        for habit in &catalog::HABITS {
            self.habits.entry(habit.id).or_insert(false);
        }
        if !(1..=5).contains(&self.mood) {
            self.mood = DEFAULT_GRADE;
        }
        if !(1..=5).contains(&self.weather) {
            self.weather = DEFAULT_GRADE;
        }
        self.score = score::habit_score(&self.habits, catalog::HABITS.len());
    }
}

/// Report granularities offered by the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisPeriod {
    Weekly,
    Biweekly,
    Monthly,
    Quarterly,
    Biannual,
    Annual,
}

impl AnalysisPeriod {
    /// Human phrasing used when framing the report prompt.
    pub fn window(self) -> &'static str {
        match self {
            AnalysisPeriod::Weekly => "the past week",
            AnalysisPeriod::Biweekly => "the past two weeks",
            AnalysisPeriod::Monthly => "the past month",
            AnalysisPeriod::Quarterly => "the past quarter",
            AnalysisPeriod::Biannual => "the past six months",
            AnalysisPeriod::Annual => "the past year",
        }
    }
}

/// Structured report returned by the analysis service. Held in memory for
/// the current page session only, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AIAnalysisReport {
    pub score: f64,
    pub performance: String,
    pub positives: Vec<String>,
    pub to_improve: Vec<String>,
    pub alternatives: String,
}

#[derive(Debug, Deserialize)]
pub struct ToggleHabitRequest {
    pub habit: HabitKey,
    pub done: bool,
}

#[derive(Debug, Deserialize)]
pub struct JournalUpdateRequest {
    pub notes: Option<String>,
    pub mood: Option<u8>,
    pub weather: Option<u8>,
}

#[derive(Debug, Deserialize)]
pub struct ReportRequest {
    pub period: AnalysisPeriod,
}

#[derive(Debug, Deserialize)]
pub struct DateQuery {
    pub date: Option<String>,
}

/// One catalog habit joined with the selected date's state for the habit
/// card: completion, current streak and all-time frequency.
#[derive(Debug, Serialize)]
pub struct HabitStatus {
    pub id: HabitKey,
    pub label: &'static str,
    pub icon: &'static str,
    pub done: bool,
    pub streak: u32,
    pub frequency: usize,
}

#[derive(Debug, Serialize)]
pub struct HabitPanelResponse {
    pub date: String,
    pub habits: Vec<HabitStatus>,
}

#[derive(Debug, Serialize)]
pub struct ScorePoint {
    pub date: String,
    pub day: u32,
    pub score: f64,
}

/// Score series for the month containing the selected date, one point per
/// calendar day.
#[derive(Debug, Serialize)]
pub struct ChartResponse {
    pub month: String,
    pub days_in_month: u32,
    pub recorded_days: usize,
    pub average_score: f64,
    pub points: Vec<ScorePoint>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn daily_log_serializes_to_wire_shape() {
        let mut log = DailyLog::empty("2026-03-01");
        log.habits.insert(HabitKey::BookReading, true);
        log.score = 1.0;

        let value = serde_json::to_value(&log).unwrap();
        assert_eq!(value["date"], "2026-03-01");
        assert_eq!(value["habits"]["bookReading"], true);
        assert_eq!(value["habits"]["bibleReading"], false);
        assert_eq!(value["notes"], "");
        assert_eq!(value["mood"], 3);
        assert_eq!(value["weather"], 3);
        assert_eq!(value["score"], 1.0);
    }

    #[test]
    fn daily_log_reads_sparse_records() {
        let raw = r#"{"date":"2025-12-31","habits":{"journaling":true},"notes":"year end","mood":4,"weather":2,"score":9}"#;
        let mut log: DailyLog = serde_json::from_str(raw).unwrap();
        log.normalize();

        assert_eq!(log.date, "2025-12-31");
        assert_eq!(log.habits.len(), catalog::HABITS.len());
        assert!(log.habits[&HabitKey::Journaling]);
        assert!(!log.habits[&HabitKey::Hygiene]);
        // one habit of eleven, the stored 9 was stale
        assert_eq!(log.score, 1.0);
    }

    #[test]
    fn normalize_resets_out_of_range_grades() {
        let raw = r#"{"date":"2026-01-01","habits":{},"notes":"","mood":0,"weather":9,"score":0}"#;
        let mut log: DailyLog = serde_json::from_str(raw).unwrap();
        log.normalize();
        assert_eq!(log.mood, DEFAULT_GRADE);
        assert_eq!(log.weather, DEFAULT_GRADE);
    }

    #[test]
    fn report_uses_camel_case_field_names() {
        let report = AIAnalysisReport {
            score: 72.0,
            performance: "steady".to_string(),
            positives: vec!["kept the streak".to_string()],
            to_improve: vec!["sleep earlier".to_string()],
            alternatives: "swap scrolling for reading".to_string(),
        };
        let value = serde_json::to_value(&report).unwrap();
        assert!(value.get("toImprove").is_some());
        assert!(value.get("to_improve").is_none());
    }

    #[test]
    fn period_parses_from_lowercase_labels() {
        let period: AnalysisPeriod = serde_json::from_str("\"quarterly\"").unwrap();
        assert_eq!(period, AnalysisPeriod::Quarterly);
        assert_eq!(period.window(), "the past quarter");
    }
}
