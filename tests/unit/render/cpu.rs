use super::*;

fn small() -> Canvas {
    Canvas {
        width: 16,
        height: 8,
    }
}

#[test]
fn empty_layer_is_transparent() {
    let frame = CpuPainter::new(small()).unwrap().finish();
    assert_eq!(frame.data.len(), 16 * 8 * 4);
    assert!(frame.data.iter().all(|&b| b == 0));
    assert!(frame.premultiplied);
}

#[test]
fn rect_covers_only_its_pixels() {
    let mut p = CpuPainter::new(small()).unwrap();
    p.fill_rect(
        kurbo::Rect::new(0.0, 0.0, 8.0, 8.0),
        Rgba8::rgb(255, 0, 0),
        1.0,
    );
    let frame = p.finish();
    assert_eq!(frame.pixel(2, 4), Some([255, 0, 0, 255]));
    assert_eq!(frame.pixel(12, 4), Some([0, 0, 0, 0]));
}

#[test]
fn opacity_scales_alpha() {
    let mut p = CpuPainter::new(small()).unwrap();
    p.fill_rect(
        kurbo::Rect::new(0.0, 0.0, 16.0, 8.0),
        Rgba8::rgb(255, 255, 255),
        0.5,
    );
    let a = p.finish().pixel(4, 4).unwrap()[3];
    assert!((120..=135).contains(&a), "alpha {a}");
}

#[test]
fn zero_opacity_draws_nothing() {
    let mut p = CpuPainter::new(small()).unwrap();
    p.fill_rect(
        kurbo::Rect::new(0.0, 0.0, 16.0, 8.0),
        Rgba8::rgb(255, 255, 255),
        0.0,
    );
    assert!(p.finish().data.iter().all(|&b| b == 0));
}

#[test]
fn oversized_canvas_is_rejected() {
    let c = Canvas {
        width: 70_000,
        height: 2,
    };
    assert!(CpuPainter::new(c).is_err());
}
