//! Integration tests for the synchronous trigger handler.

use std::time::Duration;

use tokio::task::LocalSet;
use tokio::time::Instant;

use blt_kitchen::display::{self, OutputSink, TranscriptView};
use blt_kitchen::kitchen::Kitchen;
use blt_kitchen::models::Station;
use blt_kitchen::orchestrator::handler::{Orchestrator, HANDLER_DONE};
use blt_kitchen::orchestrator::supervisor::Supervisor;
use blt_kitchen::{AppError, KitchenConfig};

const RESULT_LINE: &str = "Your Sandwich with 2 pieces of toast and 3 pieces of bacon is done!";

/// Must be called inside a `LocalSet`.
fn orchestrator(
    config: &KitchenConfig,
    fault: Option<Station>,
) -> (Orchestrator, Supervisor, OutputSink, TranscriptView) {
    let (sink, pump) = display::channel();
    let transcript = TranscriptView::new();
    tokio::task::spawn_local(pump.run(transcript.clone()));
    let supervisor = Supervisor::new(sink.clone());
    let mut kitchen = Kitchen::new(config, sink.clone(), supervisor.clone());
    if let Some(station) = fault {
        kitchen = kitchen.with_fault(station, "out of order");
    }
    (
        Orchestrator::new(kitchen, config),
        supervisor,
        sink,
        transcript,
    )
}

const STARTED_LINES: [&str; 7] = [
    "Putting a slice of bread in the toaster",
    "Putting a slice of bread in the toaster",
    "Start toasting...",
    "Putting a slice of bacon in the pan",
    "Putting a slice of bacon in the pan",
    "Putting a slice of bacon in the pan",
    "cooking first side of bacon...",
];

#[tokio::test(start_paused = true)]
async fn handler_starts_both_stations_then_returns() {
    LocalSet::new()
        .run_until(async {
            let (orchestrator, supervisor, sink, transcript) =
                orchestrator(&KitchenConfig::default(), None);

            let start = Instant::now();
            orchestrator.on_triggered();
            assert_eq!(start.elapsed(), Duration::ZERO, "handler must not suspend");

            sink.flush().await.expect("flush");
            let mut expected = STARTED_LINES.to_vec();
            expected.push(HANDLER_DONE);
            assert_eq!(transcript.lines(), expected);

            supervisor.shutdown().await;
            sink.flush().await.expect("flush");
            assert!(start.elapsed() >= Duration::from_secs(6));
            assert!(supervisor.failures().is_empty());
        })
        .await;
}

#[tokio::test(start_paused = true)]
async fn handler_done_precedes_the_result_line() {
    LocalSet::new()
        .run_until(async {
            let (orchestrator, supervisor, sink, transcript) =
                orchestrator(&KitchenConfig::default(), None);
            orchestrator.on_triggered();
            supervisor.shutdown().await;
            sink.flush().await.expect("flush");

            let started = transcript.position("cooking first side of bacon...").expect("bacon start");
            let done = transcript.position(HANDLER_DONE).expect("handler line");
            assert!(started < done);
            let result = transcript.position(RESULT_LINE).expect("result line");
            let toast = transcript.position("Remove toast from toaster").expect("toast line");
            let bacon = transcript.position("Put bacon on plate").expect("bacon line");
            assert!(done < result);
            assert!(toast < result && bacon < result);
            assert_eq!(transcript.lines().last().map(String::as_str), Some(RESULT_LINE));
        })
        .await;
}

#[tokio::test(start_paused = true)]
async fn handler_done_precedes_result_even_with_zero_delay() {
    LocalSet::new()
        .run_until(async {
            let config = KitchenConfig {
                toast_ms: 0,
                bacon_side_ms: 0,
                ..KitchenConfig::default()
            };
            let (orchestrator, supervisor, sink, transcript) = orchestrator(&config, None);
            orchestrator.on_triggered();
            supervisor.shutdown().await;
            sink.flush().await.expect("flush");

            let lines = transcript.lines();
            assert_eq!(lines[..STARTED_LINES.len()], STARTED_LINES);
            assert_eq!(transcript.position(HANDLER_DONE), Some(STARTED_LINES.len()));
            let result = transcript.position(RESULT_LINE).expect("result line");
            assert!(result > STARTED_LINES.len());
        })
        .await;
}

#[tokio::test(start_paused = true)]
async fn reporter_failure_is_captured_not_swallowed() {
    LocalSet::new()
        .run_until(async {
            let (orchestrator, supervisor, sink, transcript) =
                orchestrator(&KitchenConfig::default(), Some(Station::Pan));
            orchestrator.on_triggered();
            supervisor.shutdown().await;
            sink.flush().await.expect("flush");

            let failures = supervisor.failures();
            assert_eq!(failures.len(), 1);
            match &failures[0] {
                AppError::Unobserved { task, source } => {
                    assert_eq!(task, "print_result");
                    assert!(matches!(source.as_ref(), AppError::JoinFailed(_)));
                }
                other => panic!("expected unobserved failure, got {other:?}"),
            }
            assert!(matches!(
                failures[0].root_cause(),
                AppError::OperationFailed { station: Station::Pan, .. }
            ));

            assert_eq!(transcript.position(RESULT_LINE), None);
            assert!(transcript
                .lines()
                .iter()
                .any(|l| l.starts_with("Something went wrong: unobserved failure in print_result")));
            assert!(
                transcript.position("Remove toast from toaster").is_some(),
                "toast still runs to completion"
            );
        })
        .await;
}

#[tokio::test(start_paused = true)]
async fn repeated_presses_start_independent_orders() {
    LocalSet::new()
        .run_until(async {
            let (orchestrator, supervisor, sink, transcript) =
                orchestrator(&KitchenConfig::default(), None);
            let start = Instant::now();
            orchestrator.on_triggered();
            orchestrator.on_triggered();
            orchestrator.on_triggered();
            supervisor.shutdown().await;
            sink.flush().await.expect("flush");

            let lines = transcript.lines();
            assert_eq!(lines.iter().filter(|l| *l == HANDLER_DONE).count(), 3);
            assert_eq!(lines.iter().filter(|l| *l == RESULT_LINE).count(), 3);
            assert!(start.elapsed() < Duration::from_secs(7), "orders ran concurrently");
        })
        .await;
}
