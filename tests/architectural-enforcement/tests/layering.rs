//! Integration Test: Layering
//!
//! **Policy**: the core is headless and single-owner; the surface is a pure
//! renderer.
//! - `searchbar-core` never depends on ratatui or crossterm
//! - `SearchMessage::Placeholder` is built only where the animator fires
//! - the TUI only matches on `Placeholder`, it never builds one
//! - the core holds no locks or atomics

use std::fs;

use architectural_enforcement::{assert_clean, scan, workspace_root};

const CORE_SRC: &str = "searchbar/core/src";
const TUI_SRC: &str = "tui/src";

#[test]
fn test_core_has_no_tui_dependencies() {
    let manifest = fs::read_to_string(workspace_root().join("searchbar/core/Cargo.toml"))
        .expect("core manifest readable");
    for forbidden in ["ratatui", "crossterm"] {
        assert!(
            !manifest.contains(forbidden),
            "searchbar-core must not depend on {forbidden}"
        );
    }

    let violations = scan(CORE_SRC, |_, code| {
        code.contains("ratatui::") || code.contains("crossterm::")
    });
    assert_clean("TUI imports in searchbar-core", &violations);
}

#[test]
fn test_only_animator_output_writes_placeholder() {
    let violations = scan(CORE_SRC, |path, code| {
        code.contains("SearchMessage::Placeholder") && !path.ends_with("controller.rs")
    });
    assert_clean("Placeholder built outside the controller", &violations);

    let violations = scan(TUI_SRC, |_, code| {
        code.contains("SearchMessage::Placeholder") && !code.contains("=>")
    });
    assert_clean("Placeholder built by the surface", &violations);
}

#[test]
fn test_core_state_has_no_locks() {
    let violations = scan(CORE_SRC, |_, code| {
        ["Mutex", "RwLock", "Atomic"]
            .iter()
            .any(|lock| code.contains(lock))
    });
    assert_clean("Locks in searchbar-core", &violations);
}
