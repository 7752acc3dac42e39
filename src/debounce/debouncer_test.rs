use std::sync::Mutex;

use tokio::sync::mpsc;
use tokio::time::{Instant, sleep, timeout};

use super::*;

fn recorder<A: Send + 'static>() -> (Arc<Mutex<Vec<(A, Instant)>>>, impl Fn(A) + Send + Sync + 'static) {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&calls);
    (calls, move |args| sink.lock().unwrap().push((args, Instant::now())))
}

#[tokio::test(start_paused = true)]
async fn burst_runs_once_with_last_arguments() {
    let (calls, action) = recorder::<&'static str>();
    let debounced = Debouncer::new(Duration::from_millis(100), action);
    let start = Instant::now();

    debounced.call("a");
    sleep(Duration::from_millis(50)).await;
    debounced.call("b");
    sleep(Duration::from_millis(50)).await;
    debounced.call("c");

    sleep(Duration::from_millis(99)).await;
    assert!(calls.lock().unwrap().is_empty());
    assert!(debounced.is_pending());

    sleep(Duration::from_millis(2)).await;
    let calls = calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, "c");
    let fired_after = calls[0].1 - start;
    assert!(fired_after >= Duration::from_millis(200), "{fired_after:?}");
    assert!(fired_after < Duration::from_millis(210), "{fired_after:?}");
}

#[tokio::test(start_paused = true)]
async fn quiet_gaps_let_every_call_through() {
    let (calls, action) = recorder::<u32>();
    let debounced = Debouncer::new(Duration::from_millis(100), action);

    for n in 1..=3 {
        debounced.call(n);
        sleep(Duration::from_millis(150)).await;
    }

    let seen: Vec<u32> = calls.lock().unwrap().iter().map(|(n, _)| *n).collect();
    assert_eq!(seen, vec![1, 2, 3]);
    assert!(!debounced.is_pending());
}

#[tokio::test(start_paused = true)]
async fn steady_stream_never_fires() {
    let (calls, action) = recorder::<u32>();
    let debounced = Debouncer::new(Duration::from_millis(100), action);

    for n in 0..20 {
        debounced.call(n);
        sleep(Duration::from_millis(60)).await;
    }
    assert!(calls.lock().unwrap().is_empty());

    sleep(Duration::from_millis(100)).await;
    assert_eq!(calls.lock().unwrap().len(), 1);
    assert_eq!(calls.lock().unwrap()[0].0, 19);
}

#[tokio::test(start_paused = true)]
async fn cancel_drops_the_pending_run() {
    let (calls, action) = recorder::<(String, usize)>();
    let debounced = Debouncer::new(Duration::from_millis(100), action);

    debounced.call(("rules".to_owned(), 1));
    debounced.cancel();
    assert!(!debounced.is_pending());

    sleep(Duration::from_millis(500)).await;
    assert!(calls.lock().unwrap().is_empty());
}

#[tokio::test(start_paused = true)]
async fn clones_share_the_pending_run() {
    let (calls, action) = recorder::<char>();
    let first = Debouncer::new(Duration::from_millis(100), action);
    let second = first.clone();

    first.call('x');
    sleep(Duration::from_millis(50)).await;
    second.call('y');
    sleep(Duration::from_millis(200)).await;

    let seen: Vec<char> = calls.lock().unwrap().iter().map(|(c, _)| *c).collect();
    assert_eq!(seen, vec!['y']);
    assert_eq!(first.wait(), Duration::from_millis(100));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn calls_from_blocking_threads_use_the_handle() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let debounced = Debouncer::with_handle(Handle::current(), Duration::from_millis(10), move |v: u8| {
        let _ = tx.send(v);
    });

    let caller = debounced.clone();
    tokio::task::spawn_blocking(move || {
        caller.call(1);
        caller.call(2);
    })
    .await
    .unwrap();

    let fired = timeout(Duration::from_secs(5), rx.recv()).await.unwrap();
    assert_eq!(fired, Some(2));
    assert!(timeout(Duration::from_millis(100), rx.recv()).await.is_err());
}
