// JSON configuration loading. Needs the `serde_json` feature:
//   cargo test --features serde_json

use morse_radio::{GameConfig, GameError, HitWindow, Session};

#[test]
fn partial_json_keeps_defaults() {
    let cfg = GameConfig::from_json(r#"{ "scroll_step": 1.5 }"#).unwrap();
    assert_eq!(cfg.scroll_step, 1.5);
    assert_eq!(cfg.note_pitch, GameConfig::default().note_pitch);
    assert_eq!(cfg.tolerance_ratio, GameConfig::default().tolerance_ratio);
}

#[test]
fn out_of_range_tolerance_is_rejected() {
    let err = GameConfig::from_json(r#"{ "tolerance_ratio": 2.0 }"#).unwrap_err();
    assert!(matches!(err, GameError::InvalidConfig(_)));
}

#[test]
fn malformed_json_is_rejected() {
    assert!(matches!(
        GameConfig::from_json("not json"),
        Err(GameError::InvalidConfig(_))
    ));
}

#[test]
fn loaded_tolerance_sizes_the_hit_window() {
    let cfg = GameConfig::from_json(r#"{ "tolerance_ratio": 0.1 }"#).unwrap();
    let mut session = Session::new(cfg);
    session.start("daily", 400.0).unwrap();
    let window = session.current_turn().unwrap().window();
    assert_eq!(window, HitWindow::new(400.0, 0.1));
    assert!((window.width() - 80.0).abs() < 1e-9);
}
