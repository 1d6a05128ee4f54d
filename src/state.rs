use crate::models::DailyLog;
use crate::report::ReportClient;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub data_path: PathBuf,
    pub logs: Arc<Mutex<BTreeMap<String, DailyLog>>>,
    pub report: Arc<ReportClient>,
    /// Single-flight guard: at most one report request may be outstanding.
    pub report_busy: Arc<AtomicBool>,
}

impl AppState {
    pub fn new(
        data_path: PathBuf,
        logs: BTreeMap<String, DailyLog>,
        report: ReportClient,
    ) -> Self {
        Self {
            data_path,
            logs: Arc::new(Mutex::new(logs)),
            report: Arc::new(report),
            report_busy: Arc::new(AtomicBool::new(false)),
        }
    }
}
