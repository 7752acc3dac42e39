use std::net::SocketAddr;

use axum::{Json, Router, extract::State, routing::post};
use serde_json::{Value, json};

use super::*;

type Received = Arc<Mutex<Vec<Value>>>;

async fn record(State(received): State<Received>, Json(body): Json<Value>) -> Json<Value> {
    received.lock().unwrap().push(body);
    Json(json!({"status": "success", "message": "Rules saved successfully"}))
}

async fn spawn_server(received: Received) -> SocketAddr {
    let app = Router::new()
        .route("/api/rules", post(record))
        .with_state(received);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

/// The save action blocks on the runtime, so it runs off the async workers.
async fn press_save(save: SaveAction) -> SaveAction {
    tokio::task::spawn_blocking(move || {
        save();
        save
    })
    .await
    .unwrap()
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn save_posts_only_valid_buffers() {
    let received = Received::default();
    let addr = spawn_server(Arc::clone(&received)).await;
    let api = ApiClient::new(&format!("http://{addr}")).unwrap();

    let state: SharedState = Arc::new(Mutex::new(ConsoleState::new("/api/rules", &json!({"a": 1}))));
    let save = save_action(Handle::current(), api, "/api/rules".into(), Arc::clone(&state));

    lock(&state).insert_str("{{");
    let save = press_save(save).await;
    {
        let state = lock(&state);
        assert!(received.lock().unwrap().is_empty());
        let status = state.status.as_ref().unwrap();
        assert!(status.is_error);
        assert!(status.message.starts_with("Not saved, invalid JSON"));
        assert_eq!(state.last_saved, None);
    }

    lock(&state).buffer = String::from(r#"{"a": 2}"#);
    press_save(save).await;

    assert_eq!(*received.lock().unwrap(), vec![json!({"a": 2})]);
    let state = lock(&state);
    assert_eq!(state.status, Some(StatusLine::info("Rules saved successfully")));
    assert!(state.last_saved.is_some());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn failed_save_reports_error_without_timestamp() {
    let addr = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap()
    };
    let api = ApiClient::new(&format!("http://{addr}")).unwrap();

    let state: SharedState = Arc::new(Mutex::new(ConsoleState::new("/api/rules", &json!({"a": 1}))));
    let save = save_action(Handle::current(), api, "/api/rules".into(), Arc::clone(&state));
    press_save(save).await;

    let state = lock(&state);
    let status = state.status.as_ref().unwrap();
    assert!(status.is_error);
    assert!(status.message.starts_with("Save failed"));
    assert_eq!(state.last_saved, None);
}

#[test]
fn restoring_the_screen_leaves_alternate_mode_and_shows_cursor() {
    let mut out = Vec::new();
    restore_screen(&mut out).unwrap();

    let written = String::from_utf8(out).unwrap();
    assert!(written.contains("\x1b[?1049l"));
    assert!(written.contains("\x1b[?25h"));
}
