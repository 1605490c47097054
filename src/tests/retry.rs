use super::RetryPolicy;
use crate::error::Error;
use std::io;
use std::time::Duration;

fn quick() -> RetryPolicy {
    RetryPolicy {
        max_attempts: 3,
        initial_delay: Duration::ZERO,
    }
}

fn io_failure() -> Error {
    Error::io("flaky.json", io::Error::other("disk hiccup"))
}

#[test]
fn test_default_backoff_doubles_from_one_second() {
    let policy = RetryPolicy::default();
    assert_eq!(policy.max_attempts, 3);
    assert_eq!(policy.delay_after(1), Duration::from_secs(1));
    assert_eq!(policy.delay_after(2), Duration::from_secs(2));
    assert_eq!(policy.delay_after(3), Duration::from_secs(4));
}

#[test]
fn test_success_on_third_attempt_is_success() {
    let mut calls = 0;
    let result = quick().run("flaky", |attempt| {
        calls += 1;
        if attempt < 3 {
            Err(io_failure())
        } else {
            Ok("done")
        }
    });

    assert_eq!(result.unwrap(), "done");
    assert_eq!(calls, 3);
}

#[test]
fn test_three_failures_exhaust_the_policy() {
    let mut calls = 0;
    let result: Result<(), Error> = quick().run("broken", |_| {
        calls += 1;
        Err(io_failure())
    });

    assert!(matches!(result, Err(Error::Io { .. })));
    assert_eq!(calls, 3);
}

#[test]
fn test_non_retryable_errors_fail_immediately() {
    let mut calls = 0;
    let result: Result<(), Error> = quick().run("parse", |_| {
        calls += 1;
        Err(Error::MissingTitle)
    });

    assert!(matches!(result, Err(Error::MissingTitle)));
    assert_eq!(calls, 1);
}
