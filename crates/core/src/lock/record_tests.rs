// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::clock::{Clock, FakeClock};

fn owner() -> LockOwner {
    LockOwner::new("depot-pc-1", 4242).with_user("mlefebvre")
}

#[test]
fn new_record_has_equal_timestamps() {
    let clock = FakeClock::new();
    let record = LockRecord::new(&owner(), clock.now());
    assert_eq!(record.acquired_at, record.last_heartbeat_at);
    assert_eq!(record.owner(), owner());
}

#[test]
fn ownership_ignores_user_name() {
    let clock = FakeClock::new();
    let record = LockRecord::new(&owner(), clock.now());

    assert!(record.is_owned_by(&LockOwner::new("depot-pc-1", 4242)));
    assert!(!record.is_owned_by(&LockOwner::new("depot-pc-1", 4243)));
    assert!(!record.is_owned_by(&LockOwner::new("depot-pc-2", 4242)));
}

#[test]
fn staleness_follows_heartbeat_not_acquisition() {
    let clock = FakeClock::new();
    let timeout = Duration::from_secs(120);
    let mut record = LockRecord::new(&owner(), clock.now());

    clock.advance(Duration::from_secs(100));
    record.renew(clock.now());
    clock.advance(Duration::from_secs(100));

    assert_eq!(record.age(clock.now()), Duration::from_secs(200));
    assert!(!record.is_stale(clock.now(), timeout));

    clock.advance(Duration::from_secs(21));
    assert!(record.is_stale(clock.now(), timeout));
}

#[test]
fn exactly_at_timeout_is_not_stale() {
    let clock = FakeClock::new();
    let timeout = Duration::from_secs(120);
    let record = LockRecord::new(&owner(), clock.now());

    clock.advance(timeout);
    assert!(!record.is_stale(clock.now(), timeout));
}

#[test]
fn renew_never_moves_heartbeat_before_acquisition() {
    let clock = FakeClock::new();
    let mut record = LockRecord::new(&owner(), clock.now());
    let earlier = record.acquired_at - chrono::TimeDelta::seconds(10);

    record.renew(earlier);
    assert!(record.last_heartbeat_at >= record.acquired_at);
}

#[test]
fn owner_display_includes_user_when_known() {
    assert_eq!(owner().to_string(), "mlefebvre@depot-pc-1 (pid 4242)");
    assert_eq!(
        LockOwner::new("depot-pc-1", 7).to_string(),
        "depot-pc-1 (pid 7)"
    );
}

#[test]
fn current_owner_uses_this_process() {
    let me = LockOwner::current();
    assert_eq!(me.pid, std::process::id());
    assert!(!me.host.is_empty());
}
