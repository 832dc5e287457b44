use progress_table::{Error, ProgressLine, RefreshScheduler, WindowTable};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tokio::sync::broadcast;

use super::support::{Capture, FlakyPipe};

const TICK: Duration = Duration::from_millis(30);

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_concurrent_progress_shows_in_final_frame() {
    let out = Capture::default();
    let table = Arc::new(WindowTable::with_writer(30, out.clone()));
    let (shutdown_tx, shutdown_rx) = broadcast::channel::<()>(1);
    let scheduler = RefreshScheduler::start(table.clone(), TICK, shutdown_rx);

    let line = ProgressLine::new();
    table.add_line(line.blocks()).unwrap();

    let handles: Vec<_> = [40, 30, 30]
        .into_iter()
        .map(|delta| {
            let line = line.clone();
            thread::spawn(move || line.progress(delta))
        })
        .collect();
    for handle in handles {
        assert!(!handle.join().unwrap(), "no call should see a finished bar");
    }

    let _ = shutdown_tx.send(());
    scheduler.join().await.unwrap();

    // 12 info + 6 padding columns, then a 12 column bar with 10 interior cells.
    let expected_row = format!("{}[========= ]", " ".repeat(18));
    assert_eq!(
        out.last_frame(1).unwrap(),
        format!("{}\x1b[1B\r", expected_row)
    );
    assert!(line.is_complete());
}

#[tokio::test]
async fn test_redraws_periodically_until_shutdown() {
    let out = Capture::default();
    let table = Arc::new(WindowTable::with_writer(20, out.clone()));
    let line = ProgressLine::new();
    table.add_line(line.blocks()).unwrap();

    let (shutdown_tx, shutdown_rx) = broadcast::channel::<()>(1);
    let scheduler = RefreshScheduler::start(table.clone(), Duration::from_millis(5), shutdown_rx);

    tokio::time::sleep(Duration::from_millis(60)).await;
    let _ = shutdown_tx.send(());
    scheduler.join().await.unwrap();

    let frames = out.frames(1);
    assert!(frames >= 2, "expected several redraws, got {}", frames);

    // Nothing is drawn once the task has stopped.
    tokio::time::sleep(Duration::from_millis(20)).await;
    assert_eq!(out.frames(1), frames);
}

#[tokio::test]
async fn test_final_render_includes_last_update() {
    let out = Capture::default();
    let table = Arc::new(WindowTable::with_writer(20, out.clone()));
    let line = ProgressLine::new();
    table.add_line(line.blocks()).unwrap();

    let (shutdown_tx, shutdown_rx) = broadcast::channel::<()>(1);
    // Long tick: only the first tick and the final render can draw.
    let scheduler = RefreshScheduler::start(table.clone(), Duration::from_secs(60), shutdown_rx);
    tokio::time::sleep(Duration::from_millis(10)).await;

    line.update_info("finished");
    let _ = shutdown_tx.send(());
    scheduler.join().await.unwrap();

    let frame = out.last_frame(1).unwrap();
    assert!(frame.starts_with("finished"), "final frame was {:?}", frame);
}

#[tokio::test]
async fn test_empty_table_draws_nothing() {
    let out = Capture::default();
    let table = Arc::new(WindowTable::with_writer(20, out.clone()));

    let (shutdown_tx, shutdown_rx) = broadcast::channel::<()>(1);
    let scheduler = RefreshScheduler::start(table, Duration::from_millis(5), shutdown_rx);
    tokio::time::sleep(Duration::from_millis(20)).await;
    let _ = shutdown_tx.send(());
    scheduler.join().await.unwrap();

    assert!(out.text().is_empty());
}

#[test]
fn test_add_line_reports_write_failure() {
    let pipe = FlakyPipe::default();
    pipe.break_pipe();
    let table = WindowTable::with_writer(20, pipe);

    assert!(matches!(
        table.add_line(ProgressLine::new().blocks()),
        Err(Error::Io(_))
    ));
    assert_eq!(table.line_count(), 0);
}

#[tokio::test]
async fn test_write_failure_stops_the_task() {
    let pipe = FlakyPipe::default();
    let table = Arc::new(WindowTable::with_writer(20, pipe.clone()));
    table.add_line(ProgressLine::new().blocks()).unwrap();
    pipe.break_pipe();

    // The sender stays alive: only the failed write can end the task.
    let (_shutdown_tx, shutdown_rx) = broadcast::channel::<()>(1);
    let scheduler = RefreshScheduler::start(table, Duration::from_millis(5), shutdown_rx);

    let result = tokio::time::timeout(Duration::from_secs(5), scheduler.join())
        .await
        .expect("refresh task should stop on its own");
    assert!(matches!(result, Err(Error::Io(_))));
}
