// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn system_clock_returns_increasing_time() {
    let clock = SystemClock;
    let t1 = clock.now();
    std::thread::sleep(Duration::from_millis(2));
    let t2 = clock.now();
    assert!(t2 > t1);
}

#[test]
fn fake_clock_can_be_advanced() {
    let clock = FakeClock::new();
    let t1 = clock.now();
    clock.advance(Duration::from_secs(60));
    let t2 = clock.now();
    assert_eq!(elapsed(t1, t2), Duration::from_secs(60));
}

#[test]
fn fake_clock_is_cloneable_and_shared() {
    let clock1 = FakeClock::new();
    let clock2 = clock1.clone();
    let t1 = clock1.now();
    clock2.advance(Duration::from_secs(30));
    let t2 = clock1.now();
    assert_eq!(elapsed(t1, t2), Duration::from_secs(30));
}

#[test]
fn fake_clock_on_date_reports_that_date() {
    let date = NaiveDate::from_ymd_opt(2026, 3, 14).unwrap();
    let clock = FakeClock::on(date);
    assert_eq!(clock.today(), date);

    clock.advance_days(20);
    assert_eq!(clock.today(), NaiveDate::from_ymd_opt(2026, 4, 3).unwrap());
}

#[test]
fn elapsed_saturates_at_zero_for_skewed_clocks() {
    let clock = FakeClock::new();
    let later = clock.now();
    clock.advance(Duration::from_secs(5));
    let ahead = clock.now();
    assert_eq!(elapsed(ahead, later), Duration::ZERO);
}
