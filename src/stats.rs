use crate::models::{ChartResponse, DailyLog, ScorePoint};
use chrono::{Datelike, Duration, NaiveDate};
use std::collections::BTreeMap;

/// Score series for every day of the month containing `anchor`, in calendar
/// order. Days without a record score 0; the average covers recorded days
/// only.
pub fn month_chart(anchor: NaiveDate, logs: &BTreeMap<String, DailyLog>) -> ChartResponse {
    let year = anchor.year();
    let month = anchor.month();
    let first = NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(anchor);
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    let days_in_month = NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .map(|next| (next - first).num_days() as u32)
        .unwrap_or(31);

    let mut points = Vec::with_capacity(days_in_month as usize);
    let mut total = 0.0;
    let mut recorded_days = 0;

    for offset in 0..days_in_month {
        let date = first + Duration::days(i64::from(offset));
        let key = date.to_string();
        let score = match logs.get(&key) {
            Some(log) => {
                recorded_days += 1;
                total += log.score;
                log.score
            }
            None => 0.0,
        };
        points.push(ScorePoint {
            date: key,
            day: offset + 1,
            score,
        });
    }

    let average_score = if recorded_days == 0 {
        0.0
    } else {
        (total / recorded_days as f64 * 10.0).round() / 10.0
    };

    ChartResponse {
        month: first.format("%B %Y").to_string(),
        days_in_month,
        recorded_days,
        average_score,
        points,
    }
}
