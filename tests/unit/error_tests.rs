use std::error::Error;

use blt_kitchen::models::Station;
use blt_kitchen::AppError;

fn toaster_jam() -> AppError {
    AppError::OperationFailed {
        station: Station::Toaster,
        reason: "jammed".into(),
    }
}

#[test]
fn operation_failure_names_the_station() {
    assert_eq!(toaster_jam().to_string(), "operation failed: toaster: jammed");
}

#[test]
fn join_failure_wraps_the_first_failure() {
    let err = AppError::JoinFailed(Box::new(toaster_jam()));
    assert_eq!(err.to_string(), "join failed: operation failed: toaster: jammed");
    assert_eq!(err.root_cause(), &toaster_jam());
}

#[test]
fn unobserved_failure_names_the_task() {
    let err = AppError::Unobserved {
        task: "print_result".into(),
        source: Box::new(AppError::JoinFailed(Box::new(toaster_jam()))),
    };
    assert!(err.to_string().starts_with("unobserved failure in print_result: join failed:"));
    assert_eq!(err.root_cause(), &toaster_jam());
}

#[test]
fn source_chain_follows_wrappers() {
    let err = AppError::JoinFailed(Box::new(AppError::Cancelled("pan".into())));
    let source = err.source().expect("join failure has a source");
    assert_eq!(source.to_string(), "cancelled: pan");
    assert!(source.source().is_none());
}

#[test]
fn leaf_errors_have_distinct_prefixes() {
    let cases = [
        (AppError::Config("x".into()), "config:"),
        (AppError::Io("x".into()), "io:"),
        (AppError::Cancelled("x".into()), "cancelled:"),
        (AppError::Timeout("x".into()), "timeout:"),
        (AppError::DisplayClosed("x".into()), "display closed:"),
        (AppError::TaskPanicked("x".into()), "task panicked:"),
    ];
    for (err, prefix) in cases {
        let text = err.to_string();
        assert!(text.starts_with(prefix), "{text} should start with {prefix}");
        assert!(!text.ends_with('.'), "error message must not end with a period: {text}");
        assert_eq!(err.root_cause(), &err);
    }
}

#[test]
fn toml_errors_become_config_errors() {
    let toml_err = toml::from_str::<toml::Table>("= nope").expect_err("invalid toml");
    let err: AppError = toml_err.into();
    assert!(matches!(err, AppError::Config(ref msg) if msg.starts_with("invalid config:")));
}
