use crate::models::{AIAnalysisReport, AnalysisPeriod, DailyLog};
use serde::Deserialize;
use serde_json::json;
use std::env;
use std::time::Duration;
use tracing::{error, info, warn};

const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Newest entries sent to the analysis call. Bounds the payload and keeps
/// the narrative anchored on recent history.
pub const REPORT_LOG_LIMIT: usize = 60;

/// A hung call would otherwise pin the single-flight guard indefinitely.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Client for the external analysis service. A missing credential is not
/// an error: the client constructs fine and every `generate` call reports
/// the feature as unavailable.
pub struct ReportClient {
    http: reqwest::Client,
    api_key: Option<String>,
    model: String,
}

impl ReportClient {
    pub fn from_env() -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            api_key: env::var("GEMINI_API_KEY")
                .ok()
                .filter(|key| !key.trim().is_empty()),
            model: env::var("REPORT_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
        })
    }

    pub fn is_available(&self) -> bool {
        self.api_key.is_some()
    }

    /// One best-effort analysis call over the log history. Every failure
    /// mode degrades to `None`; the caller alone decides how an absent
    /// report is presented.
    pub async fn generate(
        &self,
        logs: &[DailyLog],
        period: AnalysisPeriod,
    ) -> Option<AIAnalysisReport> {
        let Some(api_key) = self.api_key.as_deref() else {
            warn!("GEMINI_API_KEY not set, report generation unavailable");
            return None;
        };

        let selected = select_for_analysis(logs);
        if selected.is_empty() {
            info!("no log entries with signal, skipping report request");
            return None;
        }

        let prompt = build_prompt(&selected, period);
        let url = format!("{GEMINI_BASE_URL}/{}:generateContent", self.model);

        let response = match self
            .http
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&request_body(&prompt))
            .send()
            .await
        {
            Ok(response) => response,
            Err(err) => {
                error!("report request failed: {err}");
                return None;
            }
        };

        if !response.status().is_success() {
            error!("report request returned status {}", response.status());
            return None;
        }

        let payload: GenerateContentResponse = match response.json().await {
            Ok(payload) => payload,
            Err(err) => {
                error!("failed to decode report response: {err}");
                return None;
            }
        };

        let Some(text) = payload.first_text() else {
            error!("report response contained no content");
            return None;
        };

        match serde_json::from_str::<AIAnalysisReport>(text.trim()) {
            Ok(report) => Some(report),
            Err(err) => {
                error!("failed to parse report JSON: {err}");
                None
            }
        }
    }
}

/// A day is worth analyzing only if something happened on it: a non-zero
/// score or written notes. Keeps empty days from biasing the narrative.
pub fn has_signal(log: &DailyLog) -> bool {
    log.score > 0.0 || !log.notes.trim().is_empty()
}

/// Filters to entries with signal and keeps the newest `REPORT_LOG_LIMIT`,
/// in date order.
pub fn select_for_analysis(logs: &[DailyLog]) -> Vec<&DailyLog> {
    let mut selected: Vec<&DailyLog> = logs.iter().filter(|log| has_signal(log)).collect();
    selected.sort_by(|a, b| a.date.cmp(&b.date));
    if selected.len() > REPORT_LOG_LIMIT {
        selected.drain(..selected.len() - REPORT_LOG_LIMIT);
    }
    selected
}

fn build_prompt(logs: &[&DailyLog], period: AnalysisPeriod) -> String {
    let data = serde_json::to_string(logs).unwrap_or_default();
    format!(
        "You are a human performance coach. Analyze the user's habit and journal data for {window}.\n\
         Data: {data}\n\n\
         Provide a report with the following fields:\n\
         1. score: 0 to 100, based on habit consistency and mood trend.\n\
         2. performance: a detailed narrative of how the user is doing, taking the plans written in the journal into account.\n\
         3. positives: a list of points where the user shone.\n\
         4. toImprove: a list of attention points.\n\
         5. alternatives: practical suggestions and alternatives to help the user reach their goals.\n\n\
         Be direct, minimalist and motivating.",
        window = period.window(),
    )
}

fn request_body(prompt: &str) -> serde_json::Value {
    json!({
        "contents": [{ "parts": [{ "text": prompt }] }],
        "generationConfig": {
            "responseMimeType": "application/json",
            "responseSchema": {
                "type": "OBJECT",
                "properties": {
                    "score": { "type": "NUMBER" },
                    "performance": { "type": "STRING" },
                    "positives": { "type": "ARRAY", "items": { "type": "STRING" } },
                    "toImprove": { "type": "ARRAY", "items": { "type": "STRING" } },
                    "alternatives": { "type": "STRING" }
                },
                "required": ["score", "performance", "positives", "toImprove", "alternatives"]
            }
        }
    })
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

impl GenerateContentResponse {
    fn first_text(&self) -> Option<&str> {
        self.candidates
            .iter()
            .filter_map(|candidate| candidate.content.as_ref())
            .flat_map(|content| content.parts.iter())
            .find_map(|part| part.text.as_deref())
    }
}
