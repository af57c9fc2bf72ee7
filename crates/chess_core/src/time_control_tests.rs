use super::*;
use std::thread;

#[test]
fn test_time_control_expiry() {
    let tc = TimeControl::with_budget(Duration::from_millis(10));
    assert!(!tc.check_time());

    thread::sleep(Duration::from_millis(20));
    assert!(tc.check_time());
    assert!(tc.is_stopped());
    assert_eq!(tc.remaining(), Some(Duration::ZERO));
}

#[test]
fn test_time_control_no_limit() {
    let tc = TimeControl::start(None);
    thread::sleep(Duration::from_millis(10));
    assert!(!tc.check_time());
    assert_eq!(tc.remaining(), None);
}

#[test]
fn test_time_control_manual_stop() {
    let tc = TimeControl::start(None);
    assert!(!tc.is_stopped());
    tc.stop();
    assert!(tc.is_stopped());
    assert!(tc.check_time());
}

#[test]
fn test_stop_is_shared_between_clones() {
    let tc = TimeControl::with_budget(Duration::from_secs(60));
    let worker = tc.clone();
    let handle = thread::spawn(move || {
        while !worker.check_time() {
            thread::yield_now();
        }
    });
    tc.stop();
    handle.join().unwrap();
    assert!(tc.elapsed() < Duration::from_secs(60));
}
