use tui_ising::term::{fingerprint, RenderThrottle};

#[test]
fn render_throttle_flushes_first_frame() {
    let mut t = RenderThrottle::new(250);
    assert!(t.should_flush(0, 1, true));
}

#[test]
fn render_throttle_static_flushes_on_change() {
    let mut t = RenderThrottle::new(250);
    assert!(t.should_flush(0, 1, true));
    assert!(t.should_flush(1, 2, true));
}

#[test]
fn render_throttle_static_throttles_when_unchanged() {
    let mut t = RenderThrottle::new(250);
    assert!(t.should_flush(0, 1, true));
    assert!(!t.should_flush(10, 1, true));
    assert!(!t.should_flush(249, 1, true));
    assert!(t.should_flush(250, 1, true));
}

#[test]
fn render_throttle_running_always_flushes() {
    let mut t = RenderThrottle::new(250);
    assert!(t.should_flush(0, 1, false));
    assert!(t.should_flush(1, 1, false));
    assert!(t.should_flush(2, 1, false));
}

#[test]
fn lattice_fingerprint_sees_single_bit_changes() {
    let a = [0u8; 16];
    let mut b = a;
    b[15] = 0b1000_0000;
    assert_ne!(fingerprint(&a, 7), fingerprint(&b, 7));
}
