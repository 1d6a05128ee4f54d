use crate::errors::AppError;
use crate::models::DailyLog;
use std::collections::BTreeMap;
use std::{env, path::Path, path::PathBuf};
use tokio::fs;
use tracing::error;

pub fn resolve_data_path() -> Result<PathBuf, std::io::Error> {
    if let Ok(path) = env::var("APP_DATA_PATH") {
        return Ok(PathBuf::from(path));
    }

    Ok(PathBuf::from("data/logs.json"))
}

/// Reads the persisted log collection at startup. Any read or parse
/// failure degrades to an empty store; the file stays untouched so a bad
/// parse never destroys history. Duplicate dates collapse to the last
/// entry and every record is normalized on the way in.
pub async fn load_logs(path: &Path) -> BTreeMap<String, DailyLog> {
    let records: Vec<DailyLog> = match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice(&bytes) {
            Ok(records) => records,
            Err(err) => {
                error!("failed to parse log file: {err}");
                Vec::new()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Vec::new(),
        Err(err) => {
            error!("failed to read log file: {err}");
            Vec::new()
        }
    };

    let mut logs = BTreeMap::new();
    for mut record in records {
        record.normalize();
        upsert(&mut logs, record);
    }
    logs
}

/// Replaces the entry with the same date, inserts otherwise. The date-keyed
/// map is what guarantees at most one record per calendar day.
pub fn upsert(logs: &mut BTreeMap<String, DailyLog>, log: DailyLog) {
    logs.insert(log.date.clone(), log);
}

/// Serializes the whole collection back to disk as a JSON array. The write
/// is a full overwrite; on failure the previous file contents stay intact
/// and the in-memory edit is not considered durable.
pub async fn persist_logs(
    path: &Path,
    logs: &BTreeMap<String, DailyLog>,
) -> Result<(), AppError> {
    let records: Vec<&DailyLog> = logs.values().collect();
    let payload = serde_json::to_vec_pretty(&records).map_err(AppError::internal)?;
    fs::write(path, payload).await.map_err(|err| {
        error!("failed to write log file: {err}");
        AppError::internal(err)
    })?;
    Ok(())
}
