use super::*;
use crate::foundation::core::Rgba8;

fn cfg() -> SinkConfig {
    SinkConfig {
        canvas: Canvas {
            width: 2,
            height: 2,
        },
        fps: Fps::new(24, 1).unwrap(),
        total_frames: 2,
    }
}

#[test]
fn captures_frames_in_order() {
    let mut sink = InMemorySink::new();
    sink.begin(cfg()).unwrap();
    let frame = FrameRGBA::solid(cfg().canvas, Rgba8::rgb(1, 2, 3));
    sink.push_frame(FrameIndex(0), &frame).unwrap();
    sink.push_frame(FrameIndex(1), &frame).unwrap();
    sink.end().unwrap();
    assert!(sink.is_finished());
    assert_eq!(sink.config(), Some(cfg()));
    let idx: Vec<u64> = sink.frames().iter().map(|(i, _)| i.0).collect();
    assert_eq!(idx, vec![0, 1]);
}

#[test]
fn begin_resets_previous_stream() {
    let mut sink = InMemorySink::new();
    sink.begin(cfg()).unwrap();
    let frame = FrameRGBA::solid(cfg().canvas, Rgba8::rgb(0, 0, 0));
    sink.push_frame(FrameIndex(0), &frame).unwrap();
    sink.end().unwrap();
    sink.begin(cfg()).unwrap();
    assert!(sink.frames().is_empty());
    assert!(!sink.is_finished());
}
