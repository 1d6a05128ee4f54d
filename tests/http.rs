use once_cell::sync::Lazy;
use reqwest::Client;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::net::TcpListener;
use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;

#[derive(Debug, Deserialize)]
struct DailyLog {
    date: String,
    habits: BTreeMap<String, bool>,
    notes: String,
    mood: u8,
    weather: u8,
    score: f64,
}

#[derive(Debug, Deserialize)]
struct HabitStatus {
    id: String,
    done: bool,
    streak: u32,
    frequency: usize,
}

#[derive(Debug, Deserialize)]
struct HabitPanelResponse {
    habits: Vec<HabitStatus>,
}

#[derive(Debug, Deserialize)]
struct ScorePoint {
    day: u32,
    score: f64,
}

#[derive(Debug, Deserialize)]
struct ChartResponse {
    days_in_month: u32,
    points: Vec<ScorePoint>,
}

struct TestServer {
    base_url: String,
    child: Child,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

static TEST_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));
static SERVER: Lazy<Mutex<Option<Arc<TestServer>>>> = Lazy::new(|| Mutex::new(None));

#[cfg(unix)]
mod cleanup {
    use std::sync::atomic::{AtomicI32, Ordering};
    use std::sync::Once;

    static REGISTER: Once = Once::new();
    static PID: AtomicI32 = AtomicI32::new(0);

    pub fn register(pid: u32) {
        REGISTER.call_once(|| {
            PID.store(pid as i32, Ordering::SeqCst);
            unsafe {
                libc::atexit(on_exit);
            }
        });
    }

    extern "C" fn on_exit() {
        let pid = PID.load(Ordering::SeqCst);
        if pid > 0 {
            unsafe {
                libc::kill(pid, libc::SIGTERM);
            }
        }
    }
}

fn pick_free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind random port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

fn unique_data_path() -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let mut path = std::env::temp_dir();
    path.push(format!("habit_journal_http_{}_{}.json", std::process::id(), nanos));
    path.to_string_lossy().to_string()
}

async fn wait_until_ready(base_url: &str) {
    let client = Client::new();
    let deadline = Instant::now() + Duration::from_secs(3);
    loop {
        if let Ok(resp) = client.get(format!("{base_url}/api/today")).send().await {
            if resp.status().is_success() {
                return;
            }
        }
        if Instant::now() > deadline {
            panic!("server did not become ready");
        }
        sleep(Duration::from_millis(100)).await;
    }
}

async fn spawn_server() -> TestServer {
    let port = pick_free_port();
    let data_path = unique_data_path();
    let child = Command::new(env!("CARGO_BIN_EXE_habit_journal"))
        .env("PORT", port.to_string())
        .env("APP_DATA_PATH", data_path)
        .env("RUST_LOG", "info")
        // the no-credential report path is what the tests exercise
        .env_remove("GEMINI_API_KEY")
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()
        .expect("failed to spawn server");

    #[cfg(unix)]
    cleanup::register(child.id());

    let base_url = format!("http://127.0.0.1:{port}");
    wait_until_ready(&base_url).await;

    TestServer { base_url, child }
}

async fn shared_server() -> Arc<TestServer> {
    let mut guard = SERVER.lock().await;
    if let Some(server) = guard.as_ref() {
        return Arc::clone(server);
    }
    let server = Arc::new(spawn_server().await);
    *guard = Some(Arc::clone(&server));
    server
}

async fn set_habit(client: &Client, base_url: &str, date: &str, habit: &str, done: bool) -> DailyLog {
    let response = client
        .post(format!("{base_url}/api/log/{date}/habit"))
        .json(&serde_json::json!({ "habit": habit, "done": done }))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());
    response.json().await.unwrap()
}

#[tokio::test]
async fn http_habit_toggles_update_the_score() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();
    let date = "2026-03-10";

    let fresh: DailyLog = client
        .get(format!("{}/api/log/{date}", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(fresh.date, date);
    assert_eq!(fresh.habits.len(), 11);
    assert!(fresh.habits.values().all(|done| !done));
    assert_eq!(fresh.score, 0.0);
    assert_eq!(fresh.mood, 3);
    assert_eq!(fresh.weather, 3);

    set_habit(&client, &server.base_url, date, "bookReading", true).await;
    set_habit(&client, &server.base_url, date, "drinkingWater", true).await;
    let updated = set_habit(&client, &server.base_url, date, "journaling", true).await;

    // 3 of 11 -> round(2.72) = 3
    assert_eq!(updated.score, 3.0);
    assert!(updated.habits["bookReading"]);
    assert!(updated.habits["drinkingWater"]);
    assert!(updated.habits["journaling"]);
    assert!(!updated.habits["hardWork"]);

    let reread: DailyLog = client
        .get(format!("{}/api/log/{date}", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(reread.score, 3.0);
    assert_eq!(reread.habits, updated.habits);
}

#[tokio::test]
async fn http_journal_fields_round_trip() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();
    let date = "2026-05-20";

    let response = client
        .post(format!("{}/api/log/{date}/journal", server.base_url))
        .json(&serde_json::json!({ "notes": "went for a run", "mood": 5, "weather": 2 }))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());

    let log: DailyLog = client
        .get(format!("{}/api/log/{date}", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(log.notes, "went for a run");
    assert_eq!(log.mood, 5);
    assert_eq!(log.weather, 2);
    assert_eq!(log.score, 0.0);
}

#[tokio::test]
async fn http_chart_covers_the_selected_month() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    set_habit(&client, &server.base_url, "2026-04-15", "hardWork", true).await;

    let chart: ChartResponse = client
        .get(format!("{}/api/chart?date=2026-04-15", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(chart.days_in_month, 30);
    assert_eq!(chart.points.len(), 30);
    let point = chart.points.iter().find(|point| point.day == 15).unwrap();
    // 1 of 11 -> round(0.9) = 1
    assert_eq!(point.score, 1.0);
    assert_eq!(chart.points[0].score, 0.0);
}

#[tokio::test]
async fn http_streaks_reset_on_a_miss() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    for date in ["2026-06-01", "2026-06-02", "2026-06-03"] {
        set_habit(&client, &server.base_url, date, "physicalExercise", true).await;
    }

    let panel: HabitPanelResponse = client
        .get(format!("{}/api/habits?date=2026-06-03", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let exercise = panel.habits.iter().find(|habit| habit.id == "physicalExercise").unwrap();
    assert!(exercise.done);
    assert_eq!(exercise.streak, 3);
    assert_eq!(exercise.frequency, 3);

    // no record for 2026-06-05, so the chain is broken from there
    let panel: HabitPanelResponse = client
        .get(format!("{}/api/habits?date=2026-06-05", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let exercise = panel.habits.iter().find(|habit| habit.id == "physicalExercise").unwrap();
    assert!(!exercise.done);
    assert_eq!(exercise.streak, 0);
    assert_eq!(exercise.frequency, 3);
}

#[tokio::test]
async fn http_report_without_credential_is_null() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let response = client
        .post(format!("{}/api/report", server.base_url))
        .json(&serde_json::json!({ "period": "weekly" }))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());

    let report: serde_json::Value = response.json().await.unwrap();
    assert!(report.is_null());
}

#[tokio::test]
async fn http_rejects_malformed_input() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let response = client
        .get(format!("{}/api/log/not-a-date", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);

    let response = client
        .post(format!("{}/api/log/2026-07-01/journal", server.base_url))
        .json(&serde_json::json!({ "mood": 9 }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);

    let response = client
        .post(format!("{}/api/log/2026-07-01/habit", server.base_url))
        .json(&serde_json::json!({ "habit": "definitelyNotAHabit", "done": true }))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_client_error());
}
