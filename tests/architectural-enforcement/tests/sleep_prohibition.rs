//! Integration Test: Sleep Prohibition
//!
//! **Policy**: production code MUST NOT sleep. The animation timer is a
//! deadline the event loop waits on (`sleep_until`), and network results
//! arrive through channels.
//! **Exceptions**: test code.

use architectural_enforcement::{assert_clean, scan};

fn is_sleep_call(code: &str) -> bool {
    code.contains("::sleep(") || code.contains(".sleep(") || code.contains(" sleep(")
}

#[test]
fn test_no_sleep_in_production_code() {
    for dir in ["searchbar/core/src", "tui/src"] {
        let violations = scan(dir, |_, code| is_sleep_call(code));
        assert_clean("Sleep calls in production code", &violations);
    }
}

#[test]
fn test_no_blocking_thread_sleep_anywhere() {
    for dir in ["searchbar/core", "tui"] {
        let violations = scan(dir, |_, code| code.contains("thread::sleep"));
        assert_clean("std::thread::sleep blocks the runtime", &violations);
    }
}

#[test]
fn test_sleep_detector() {
    assert!(is_sleep_call("    tokio::time::sleep(Duration::from_millis(10)).await;"));
    assert!(is_sleep_call("    std::thread::sleep(d);"));
    assert!(!is_sleep_call("    sleep_until(timer.deadline).await;"));
}
