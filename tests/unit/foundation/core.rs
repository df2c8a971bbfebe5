use super::*;

#[test]
fn frame_range_length_saturates() {
    let r = FrameRange {
        start: FrameIndex(2),
        end: FrameIndex(5),
    };
    assert_eq!(r.len_frames(), 3);
    let inverted = FrameRange {
        start: FrameIndex(5),
        end: FrameIndex(2),
    };
    assert_eq!(inverted.len_frames(), 0);
}

#[test]
fn fps_secs_to_frames_is_exact_for_document_durations() {
    let fps = Fps::new(24, 1).unwrap();
    assert_eq!(fps.secs_to_frames_floor(2.5), 60);
    assert_eq!(fps.secs_to_frames_floor(0.7), 16);
    assert_eq!(fps.secs_to_frames_floor(0.8), 19);
    assert_eq!(fps.secs_to_frames_floor(3.0), 72);
}

#[test]
fn fps_rejects_zero() {
    assert!(Fps::new(0, 1).is_err());
    assert!(Fps::new(24, 0).is_err());
}

#[test]
fn hex_colors_parse() {
    assert_eq!(Rgba8::parse_hex("#007cbc").unwrap(), Rgba8::rgb(0, 124, 188));
    assert_eq!(
        Rgba8::parse_hex("FF000080").unwrap(),
        Rgba8::rgba(255, 0, 0, 128)
    );
    assert!(Rgba8::parse_hex("#12345").is_err());
}

#[test]
fn colors_deserialize_from_hex_and_arrays() {
    let c: Rgba8 = serde_json::from_str("\"#ffffff\"").unwrap();
    assert_eq!(c, Rgba8::rgb(255, 255, 255));
    let c: Rgba8 = serde_json::from_str("[1, 2, 3]").unwrap();
    assert_eq!(c, Rgba8::rgb(1, 2, 3));
    let c: Rgba8 = serde_json::from_str("[1, 2, 3, 4]").unwrap();
    assert_eq!(c, Rgba8::rgba(1, 2, 3, 4));
    assert!(serde_json::from_str::<Rgba8>("[1, 2]").is_err());
}

#[test]
fn premul_scales_channels() {
    assert_eq!(Rgba8::rgba(255, 0, 0, 0).to_premul(), [0, 0, 0, 0]);
    assert_eq!(Rgba8::rgb(10, 20, 30).to_premul(), [10, 20, 30, 255]);
    assert_eq!(Rgba8::rgb(0, 124, 188).with_opacity(0.5).a, 128);
}
