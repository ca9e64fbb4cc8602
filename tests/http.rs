use once_cell::sync::Lazy;
use reqwest::Client;
use serde::Deserialize;
use std::net::TcpListener;
use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;

#[derive(Debug, Deserialize)]
struct HabitSnapshot {
    id: String,
    title: String,
    frequency_count: u32,
    frequency_unit: String,
    current_count: u32,
    total_count: u64,
    progress: f64,
    is_fully_done: bool,
    status: String,
    just_completed: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct HabitList {
    habits: Vec<HabitSnapshot>,
}

#[derive(Debug, Deserialize)]
struct HeatmapResponse {
    days: Vec<HeatmapPoint>,
}

#[derive(Debug, Deserialize)]
struct HeatmapPoint {
    date: String,
    count: u32,
    intensity: f64,
}

#[derive(Debug, Deserialize)]
struct ForegroundResponse {
    habits_reset: usize,
    checked_at: String,
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
    path.push(format!("habit_app_http_{}_{}.json", std::process::id(), nanos));
    path.to_string_lossy().to_string()
}

async fn wait_until_ready(base_url: &str) {
    let client = Client::new();
    let deadline = Instant::now() + Duration::from_secs(3);
    loop {
        if let Ok(resp) = client.get(format!("{base_url}/api/habits")).send().await {
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
    let child = Command::new(env!("CARGO_BIN_EXE_habit_app"))
        .env("PORT", port.to_string())
        .env("APP_DATA_PATH", data_path)
        .env("RUST_LOG", "info")
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

async fn create_habit(
    client: &Client,
    base_url: &str,
    title: &str,
    count: u32,
    unit: &str,
) -> HabitSnapshot {
    let response = client
        .post(format!("{base_url}/api/habits"))
        .json(&serde_json::json!({
            "title": title,
            "frequency_count": count,
            "frequency_unit": unit,
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 201);
    response.json().await.unwrap()
}

#[tokio::test]
async fn http_create_and_increment_habit() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let habit = create_habit(&client, &server.base_url, "Read", 2, "daily").await;
    assert_eq!(habit.title, "Read");
    assert_eq!(habit.frequency_unit, "daily");
    assert_eq!(habit.current_count, 0);
    assert_eq!(habit.status, "untouched");

    let first: HabitSnapshot = client
        .post(format!("{}/api/habits/{}/increment", server.base_url, habit.id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(first.current_count, 1);
    assert_eq!(first.total_count, 1);
    assert_eq!(first.just_completed, Some(false));
    assert_eq!(first.status, "in_progress");
    assert!((first.progress - 0.5).abs() < 1e-9);

    let second: HabitSnapshot = client
        .post(format!("{}/api/habits/{}/increment", server.base_url, habit.id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(second.just_completed, Some(true));
    assert!(second.is_fully_done);
    assert_eq!(second.status, "complete");
}

#[tokio::test]
async fn http_increment_is_a_no_op_at_the_goal() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let habit = create_habit(&client, &server.base_url, "Floss", 1, "daily").await;
    for _ in 0..2 {
        client
            .post(format!("{}/api/habits/{}/increment", server.base_url, habit.id))
            .send()
            .await
            .unwrap();
    }

    let list: HabitList = client
        .get(format!("{}/api/habits", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let snapshot = list.habits.iter().find(|h| h.id == habit.id).unwrap();
    assert_eq!(snapshot.current_count, 1);
    assert_eq!(snapshot.total_count, 1);
}

#[tokio::test]
async fn http_decrement_floors_at_zero() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let habit = create_habit(&client, &server.base_url, "Stretch", 3, "daily").await;
    let after: HabitSnapshot = client
        .post(format!("{}/api/habits/{}/decrement", server.base_url, habit.id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(after.current_count, 0);
    assert_eq!(after.total_count, 0);
}

#[tokio::test]
async fn http_reset_removes_cycle_contribution() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let habit = create_habit(&client, &server.base_url, "Journal", 3, "daily").await;
    for _ in 0..2 {
        client
            .post(format!("{}/api/habits/{}/increment", server.base_url, habit.id))
            .send()
            .await
            .unwrap();
    }

    let after: HabitSnapshot = client
        .post(format!("{}/api/habits/{}/reset", server.base_url, habit.id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(after.current_count, 0);
    assert_eq!(after.total_count, 0);
}

#[tokio::test]
async fn http_heatmap_reflects_todays_completions() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let habit = create_habit(&client, &server.base_url, "Water", 2, "daily").await;
    client
        .post(format!("{}/api/habits/{}/increment", server.base_url, habit.id))
        .send()
        .await
        .unwrap();

    let map: HeatmapResponse = client
        .get(format!(
            "{}/api/habits/{}/heatmap?days=7",
            server.base_url, habit.id
        ))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(map.days.len(), 7);
    let today = map.days.last().unwrap();
    assert_eq!(today.count, 1);
    // One of two: halfway, which the display floor leaves at 0.5.
    assert!((today.intensity - 0.5).abs() < 1e-9);
    assert!(map.days.iter().all(|day| !day.date.is_empty()));
}

#[tokio::test]
async fn http_foreground_hook_reports_and_advances_checkpoint() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    create_habit(&client, &server.base_url, "Gym", 3, "weekly").await;

    // Launch already ran a pass today, so no boundary can have been
    // crossed since.
    let pass: ForegroundResponse = client
        .post(format!("{}/api/foreground", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(pass.habits_reset, 0);
    assert!(!pass.checked_at.is_empty());
}

#[tokio::test]
async fn http_delete_is_idempotent_and_cascades() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let habit = create_habit(&client, &server.base_url, "Temp", 1, "daily").await;

    let first = client
        .delete(format!("{}/api/habits/{}", server.base_url, habit.id))
        .send()
        .await
        .unwrap();
    assert_eq!(first.status(), 204);

    let second = client
        .delete(format!("{}/api/habits/{}", server.base_url, habit.id))
        .send()
        .await
        .unwrap();
    assert_eq!(second.status(), 204);

    let detail = client
        .get(format!("{}/api/habits/{}", server.base_url, habit.id))
        .send()
        .await
        .unwrap();
    assert_eq!(detail.status(), 404);
}

#[tokio::test]
async fn http_rejects_invalid_habit_configuration() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let empty_title = client
        .post(format!("{}/api/habits", server.base_url))
        .json(&serde_json::json!({ "title": "  ", "frequency_count": 1 }))
        .send()
        .await
        .unwrap();
    assert_eq!(empty_title.status(), 400);

    let zero_goal = client
        .post(format!("{}/api/habits", server.base_url))
        .json(&serde_json::json!({ "title": "Run", "frequency_count": 0 }))
        .send()
        .await
        .unwrap();
    assert_eq!(zero_goal.status(), 400);
}
