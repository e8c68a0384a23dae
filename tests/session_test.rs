use serde_json::Value;

use tui_ising::engine::{Clock, ManualClock};
use tui_ising::types::ControlAction;
use tui_ising::{AppConfig, ConfigError, Flow, Session};

fn config() -> AppConfig {
    AppConfig {
        width: 12,
        height: 6,
        step_ms: 50,
        flips_per_step: 40,
        seed: 7,
        ..AppConfig::default()
    }
}

#[test]
fn same_config_gives_same_trajectory() {
    let run = || {
        let mut s = Session::new(&config()).unwrap();
        s.apply(ControlAction::ToggleRun, 0).unwrap();
        let mut clock = ManualClock::default();
        let mut out = Vec::new();
        for tick in 0..20 {
            let outcome = s.tick(clock.now_ms()).unwrap();
            out.push(s.record(tick, outcome));
            clock.advance(50);
        }
        out
    };
    let a = run();
    assert_eq!(a, run());
    assert_eq!(a.last().unwrap().step, 20);
    assert!(a.iter().all(|r| r.advanced));
}

#[test]
fn tick_record_json_fields() {
    let mut s = Session::new(&config()).unwrap();
    let outcome = s.tick(0).unwrap();
    let v: Value = serde_json::to_value(s.record(0, outcome)).unwrap();
    let obj = v.as_object().unwrap();

    let mut keys: Vec<&str> = obj.keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(
        keys,
        ["advanced", "energy_per_spin", "magnetization", "step", "tick"]
    );
    assert_eq!(obj["advanced"], Value::Bool(false));
    assert_eq!(obj["step"], Value::from(0));
}

#[test]
fn config_serializes_for_the_headless_header() {
    let v = serde_json::to_value(config()).unwrap();
    assert_eq!(v["width"], Value::from(12));
    assert_eq!(v["step_ms"], Value::from(50));
    assert_eq!(v["log_path"], Value::Null);
}

#[test]
fn reseed_while_running_advances_on_next_tick() {
    let mut s = Session::new(&config()).unwrap();
    s.apply(ControlAction::ToggleRun, 0).unwrap();
    s.tick(0).unwrap();
    assert_eq!(s.apply(ControlAction::Reseed, 10).unwrap(), Flow::Continue);
    assert!(s.is_running());

    // Only 10ms since the last advance, but the baseline was cleared.
    assert!(s.tick(10).unwrap().advanced);
    assert_eq!(s.status().step, 0);
}

#[test]
fn oversized_raster_fails_fast_instead_of_panicking() {
    let config = AppConfig {
        width: 8,
        height: 4,
        cell_width: u32::MAX,
        ..AppConfig::default()
    };
    assert!(matches!(config.validate(), Err(ConfigError::Surface(_))));
    assert!(matches!(Session::new(&config), Err(ConfigError::Surface(_))));
}
