/*!

Exercises the status, termination, and boolean-condition waiters against a
scripted mock [`ResourceClient`], covering the timing and policy contracts
the waiters promise.

!*/

mod mock;

use mock::{not_found, server_error, state, MockClient};
use squall_model::ResourceStatus;
use squall_waiter::error::Error;
use squall_waiter::{
    wait_for_status, wait_for_termination, wait_until, StatusWait, WaitConfig,
};
use std::time::{Duration, Instant};

const INTERVAL: Duration = Duration::from_millis(20);

fn config() -> WaitConfig {
    WaitConfig::new(INTERVAL, Duration::from_secs(10))
}

#[test]
fn already_active_returns_without_sleeping() {
    let client = MockClient::new([Ok(state("s1", "ACTIVE", None))]);
    let start = Instant::now();
    let result = wait_for_status(&client, "s1", ResourceStatus::Active, &config()).unwrap();
    assert_eq!(result.status, ResourceStatus::Active);
    assert_eq!(client.fetch_count(), 1);
    assert!(start.elapsed() < INTERVAL);
}

#[test]
fn build_then_active_with_ready_wait() {
    let client = MockClient::new([
        Ok(state("s1", "BUILD", Some("spawning"))),
        Ok(state("s1", "ACTIVE", None)),
    ]);
    let result = StatusWait::new(config())
        .ready_wait(true)
        .run(&client, "s1", ResourceStatus::Active)
        .unwrap();
    assert_eq!(result.status, ResourceStatus::Active);
    assert!(result.is_settled());
    // Exactly one sleep: the baseline fetch plus one re-fetch.
    assert_eq!(client.fetch_count(), 2);
}

#[test]
fn ready_wait_holds_until_task_state_clears() {
    let client = MockClient::new([
        Ok(state("s1", "ACTIVE", Some("resizing"))),
        Ok(state("s1", "ACTIVE", None)),
    ]);
    let result = StatusWait::new(config())
        .ready_wait(true)
        .run(&client, "s1", ResourceStatus::Active)
        .unwrap();
    assert!(result.is_settled());
    assert_eq!(client.fetch_count(), 2);
}

#[test]
fn error_status_fails_immediately() {
    let client = MockClient::new([Ok(state("s1", "ERROR", None))]);
    let start = Instant::now();
    let error = wait_for_status(&client, "s1", ResourceStatus::Active, &config()).unwrap_err();
    assert!(error.is_resource_failed());
    // Zero sleeps: the failure is recognized on the baseline fetch.
    assert_eq!(client.fetch_count(), 1);
    assert!(start.elapsed() < INTERVAL);
    match error {
        Error::ResourceFailed { id, status } => {
            assert_eq!(id, "s1");
            assert_eq!(status, ResourceStatus::Error);
        }
        other => panic!("expected ResourceFailed, got {:?}", other),
    }
}

#[test]
fn raise_on_error_disabled_keeps_polling() {
    let client = MockClient::new([
        Ok(state("s1", "ERROR", None)),
        Ok(state("s1", "ERROR", None)),
        Ok(state("s1", "ACTIVE", None)),
    ]);
    let result = StatusWait::new(config())
        .raise_on_error(false)
        .run(&client, "s1", ResourceStatus::Active)
        .unwrap();
    assert_eq!(result.status, ResourceStatus::Active);
    assert_eq!(client.fetch_count(), 3);
}

#[test]
fn waiting_for_the_error_status_itself_succeeds() {
    let client = MockClient::new([
        Ok(state("s1", "BUILD", None)),
        Ok(state("s1", "ERROR", None)),
    ]);
    let result = wait_for_status(&client, "s1", ResourceStatus::Error, &config()).unwrap();
    assert_eq!(result.status, ResourceStatus::Error);
}

#[test]
fn never_changing_status_times_out_within_one_interval() {
    let timeout = Duration::from_millis(60);
    let client = MockClient::new([Ok(state("s1", "BUILD", Some("spawning")))]);
    let wait = WaitConfig::new(INTERVAL, timeout);
    let error = wait_for_status(&client, "s1", ResourceStatus::Active, &wait).unwrap_err();
    match error {
        Error::Timeout {
            id,
            target,
            ready_wait,
            elapsed,
            last_status,
            last_task_state,
        } => {
            assert_eq!(id, "s1");
            assert_eq!(target, ResourceStatus::Active);
            assert!(!ready_wait);
            assert_eq!(last_status, ResourceStatus::Building);
            assert_eq!(last_task_state.as_deref(), Some("spawning"));
            assert!(elapsed >= timeout);
            // One interval of slack, padded generously for slow machines.
            assert!(elapsed < timeout + INTERVAL + Duration::from_secs(1));
        }
        other => panic!("expected Timeout, got {:?}", other),
    }
}

#[test]
fn extra_timeout_extends_the_budget() {
    let client = MockClient::new([Ok(state("s1", "BUILD", None))]);
    let wait = WaitConfig::new(INTERVAL, Duration::from_millis(20))
        .with_extra_timeout(Duration::from_millis(60));
    let start = Instant::now();
    let error = wait_for_status(&client, "s1", ResourceStatus::Active, &wait).unwrap_err();
    assert!(error.is_timeout());
    assert!(start.elapsed() >= Duration::from_millis(80));
}

#[test]
fn settled_resource_wait_is_idempotent() {
    let client = MockClient::new([Ok(state("s1", "ACTIVE", None))]);
    let first = wait_for_status(&client, "s1", ResourceStatus::Active, &config()).unwrap();
    let second = wait_for_status(&client, "s1", ResourceStatus::Active, &config()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn oscillating_status_is_reevaluated_each_fetch() {
    let client = MockClient::new([
        Ok(state("s1", "BUILD", None)),
        Ok(state("s1", "ACTIVE", Some("networking"))),
        Ok(state("s1", "BUILD", None)),
        Ok(state("s1", "ACTIVE", None)),
    ]);
    let result = StatusWait::new(config())
        .ready_wait(true)
        .run(&client, "s1", ResourceStatus::Active)
        .unwrap();
    assert!(result.is_settled());
    assert_eq!(client.fetch_count(), 4);
}

#[test]
fn client_errors_propagate_from_a_status_wait() {
    let client = MockClient::new([Err(not_found())]);
    let error = wait_for_status(&client, "s1", ResourceStatus::Active, &config()).unwrap_err();
    match error {
        Error::Client { id, error } => {
            assert_eq!(id, "s1");
            assert_eq!(error.0, Some(404));
        }
        other => panic!("expected Client, got {:?}", other),
    }
}

#[test]
fn zero_interval_is_rejected() {
    let client = MockClient::new([Ok(state("s1", "ACTIVE", None))]);
    let wait = WaitConfig::new(Duration::ZERO, Duration::from_secs(1));
    let error = wait_for_status(&client, "s1", ResourceStatus::Active, &wait).unwrap_err();
    assert!(matches!(error, Error::InvalidConfig { .. }));
    assert_eq!(client.fetch_count(), 0);
}

#[test]
fn termination_treats_not_found_as_done() {
    let client = MockClient::new([Ok(state("s1", "ACTIVE", None)), Err(not_found())]);
    wait_for_termination(&client, "s1", &config()).unwrap();
    assert_eq!(client.fetch_count(), 2);
}

#[test]
fn termination_propagates_other_errors() {
    let client = MockClient::new([Err(server_error())]);
    let error = wait_for_termination(&client, "s1", &config()).unwrap_err();
    match error {
        Error::Client { error, .. } => assert_eq!(error.0, Some(500)),
        other => panic!("expected Client, got {:?}", other),
    }
}

#[test]
fn termination_times_out_while_the_resource_lingers() {
    let client = MockClient::new([Ok(state("s1", "ACTIVE", None))]);
    let wait = WaitConfig::new(INTERVAL, Duration::from_millis(40));
    let error = wait_for_termination(&client, "s1", &wait).unwrap_err();
    match error {
        Error::Timeout {
            target,
            last_status,
            ..
        } => {
            assert_eq!(target, ResourceStatus::Terminated);
            assert_eq!(last_status, ResourceStatus::Active);
        }
        other => panic!("expected Timeout, got {:?}", other),
    }
}

#[test]
fn wait_until_counts_sleeps_and_calls() {
    let mut calls = 0;
    let start = Instant::now();
    let met = wait_until(Duration::from_secs(10), Duration::from_millis(10), || {
        calls += 1;
        calls >= 3
    });
    assert!(met);
    assert_eq!(calls, 3);
    // Two sleeps happened between the three evaluations.
    assert!(start.elapsed() >= Duration::from_millis(20));
}
