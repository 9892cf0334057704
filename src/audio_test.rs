#![allow(clippy::float_cmp)]

use super::*;

// =============================================================
// ImpactGate
// =============================================================

#[test]
fn gate_allows_the_first_impact() {
    let mut gate = ImpactGate::new();
    assert!(gate.allow(0.0));
}

#[test]
fn gate_blocks_within_the_debounce_window() {
    let mut gate = ImpactGate::new();
    assert!(gate.allow(1000.0));
    assert!(!gate.allow(1000.0));
    assert!(!gate.allow(1039.9));
}

#[test]
fn gate_reopens_after_the_window() {
    let mut gate = ImpactGate::new();
    assert!(gate.allow(1000.0));
    assert!(gate.allow(1040.0));
}

#[test]
fn blocked_attempts_do_not_extend_the_window() {
    let mut gate = ImpactGate::new();
    assert!(gate.allow(0.0));
    assert!(!gate.allow(30.0));
    // Still measured from the allowed impact at t=0, not the blocked one.
    assert!(gate.allow(41.0));
}

#[test]
fn default_gate_behaves_like_new() {
    let mut gate = ImpactGate::default();
    assert!(gate.allow(-5000.0));
}

// =============================================================
// Intensity mapping
// =============================================================

#[test]
fn intensity_scales_linearly_below_the_cap() {
    assert_eq!(impact_intensity(12.5), 0.5);
    assert_eq!(impact_intensity(25.0), 1.0);
}

#[test]
fn intensity_caps_at_one() {
    assert_eq!(impact_intensity(100.0), 1.0);
}

#[test]
fn intensity_uses_absolute_speed() {
    assert_eq!(impact_intensity(-12.5), 0.5);
}

#[test]
fn soft_impacts_fall_below_the_audible_floor() {
    assert!(impact_intensity(2.0) < crate::consts::MIN_IMPACT_INTENSITY);
}
