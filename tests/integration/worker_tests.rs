//! Integration tests for the blocking join on a dedicated worker thread.

use std::thread;

use blt_kitchen::display::{self, TranscriptView};
use blt_kitchen::event_loop::EventLoop;
use blt_kitchen::models::{Bacon, Sandwich, Station, Toast};
use blt_kitchen::orchestrator::worker::make_sandwich_blocking;
use blt_kitchen::{AppError, KitchenConfig};

fn quick_config() -> KitchenConfig {
    KitchenConfig {
        toast_ms: 20,
        bacon_side_ms: 10,
        ..KitchenConfig::default()
    }
}

#[test]
fn blocking_caller_gets_the_sandwich_without_deadlock() {
    let (sink, pump) = display::channel();
    let sandwich = make_sandwich_blocking(&quick_config(), sink).expect("sandwich");
    assert_eq!(sandwich, Sandwich::new(Toast::new(2), Bacon::new(3)));

    // Lines produced on the worker are applied here, on the owning thread.
    let owner = thread::current().id();
    let transcript = EventLoop::new()
        .expect("event loop")
        .run(pump.run(TranscriptView::new()));
    assert!(transcript.position("Remove toast from toaster").is_some());
    assert!(transcript.position("Put bacon on plate").is_some());
    assert!(transcript.writer_threads().iter().all(|id| *id == owner));
}

#[test]
fn blocking_caller_sees_station_failures() {
    let mut config = quick_config();
    config.faults.insert(Station::Toaster, "toaster jammed".into());
    let (sink, _pump) = display::channel();

    let err = make_sandwich_blocking(&config, sink).expect_err("toaster is jammed");
    assert!(matches!(err, AppError::JoinFailed(_)));
    assert!(matches!(
        err.root_cause(),
        AppError::OperationFailed { station: Station::Toaster, .. }
    ));
}

#[tokio::test]
#[should_panic]
async fn blocking_from_inside_the_loop_is_refused() {
    let (sink, _pump) = display::channel();
    let _ = make_sandwich_blocking(&quick_config(), sink);
}
