use super::*;

#[test]
fn defaults_validate() {
    let cfg = RenderConfig::default();
    cfg.validate().unwrap();
    assert_eq!(cfg.available_width(), 720.0 - 70.0 - 90.0);
}

#[test]
fn partial_json_keeps_defaults() {
    let json = r##"{
        "fps": { "num": 30, "den": 1 },
        "palette": { "highlight": "#ff3366" },
        "duration": { "words_per_minute": 200 }
    }"##;
    let cfg = RenderConfig::from_reader(json.as_bytes()).unwrap();
    assert_eq!(cfg.fps, Fps { num: 30, den: 1 });
    assert_eq!(cfg.palette.highlight, Rgba8::rgb(0xff, 0x33, 0x66));
    assert_eq!(cfg.palette.background, Rgba8::rgb(0, 0, 0));
    assert_eq!(cfg.duration.words_per_minute, 200.0);
    assert_eq!(cfg.duration.min_secs, 3.0);
    assert_eq!(cfg.canvas.width, 720);
}

#[test]
fn reveal_strategy_is_tagged() {
    let json = r#"{ "reveal": { "kind": "block_wipe", "wipe_secs": 1.2 } }"#;
    let cfg = RenderConfig::from_reader(json.as_bytes()).unwrap();
    match cfg.reveal {
        RevealStrategy::BlockWipe { wipe_secs, .. } => assert_eq!(wipe_secs, 1.2),
        other => panic!("unexpected strategy {other:?}"),
    }
}

#[test]
fn odd_canvas_is_rejected() {
    let json = r#"{ "canvas": { "width": 721, "height": 1280 } }"#;
    let err = RenderConfig::from_reader(json.as_bytes()).unwrap_err();
    assert!(err.to_string().contains("even"));
}

#[test]
fn inverted_duration_bounds_are_rejected() {
    let mut cfg = RenderConfig::default();
    cfg.duration.min_secs = 12.0;
    assert!(cfg.validate().is_err());
}

#[test]
fn negative_clip_durations_are_rejected() {
    let json = r#"{ "sequence": { "separator_secs": -1 } }"#;
    let err = RenderConfig::from_reader(json.as_bytes()).unwrap_err();
    assert!(err.to_string().contains("separator_secs"));

    let mut cfg = RenderConfig::default();
    cfg.sequence.trailing_hold_secs = -0.5;
    assert!(cfg.validate().is_err());

    let mut cfg = RenderConfig::default();
    cfg.sequence.placeholder_secs = f64::INFINITY;
    assert!(cfg.validate().is_err());

    let mut cfg = RenderConfig::default();
    cfg.opening.static_secs = -1.0;
    assert!(cfg.validate().is_err());

    let mut cfg = RenderConfig::default();
    cfg.opening.wipe_secs = f64::NAN;
    assert!(cfg.validate().is_err());
}

#[test]
fn anchor_and_tier_multipliers_are_range_checked() {
    let mut cfg = RenderConfig::default();
    cfg.layout.anchor_y = 1.5;
    assert!(cfg.validate().is_err());

    let mut cfg = RenderConfig::default();
    cfg.layout.anchor_y = f64::NAN;
    assert!(cfg.validate().is_err());

    let mut cfg = RenderConfig::default();
    cfg.duration.length_tiers[0].multiplier = f64::NAN;
    assert!(cfg.validate().is_err());
}

#[test]
fn margins_wider_than_canvas_are_rejected() {
    let mut cfg = RenderConfig::default();
    cfg.layout.margin_left = 400.0;
    cfg.layout.margin_right = 400.0;
    assert!(cfg.validate().is_err());
}

#[test]
fn output_paths_are_one_based() {
    let out = OutputConfig {
        dir: PathBuf::from("renders"),
        prefix: "clip".to_owned(),
    };
    assert_eq!(out.path_for(0), PathBuf::from("renders").join("clip_1.mp4"));
    assert_eq!(out.path_for(4), PathBuf::from("renders").join("clip_5.mp4"));
}

#[test]
fn malformed_json_is_a_parse_error() {
    let err = RenderConfig::from_reader("{ nope".as_bytes()).unwrap_err();
    assert!(matches!(err, TextreelError::Parse(_)));
}
