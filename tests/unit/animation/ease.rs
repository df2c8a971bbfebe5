use super::*;

const ALL: [Ease; 7] = [
    Ease::Linear,
    Ease::InQuad,
    Ease::OutQuad,
    Ease::InOutQuad,
    Ease::InCubic,
    Ease::OutCubic,
    Ease::InOutCubic,
];

#[test]
fn endpoints_are_fixed() {
    for ease in ALL {
        assert_eq!(ease.apply(0.0), 0.0, "{ease:?}");
        assert!((ease.apply(1.0) - 1.0).abs() < 1e-12, "{ease:?}");
    }
}

#[test]
fn input_is_clamped() {
    for ease in ALL {
        assert_eq!(ease.apply(-3.0), ease.apply(0.0));
        assert_eq!(ease.apply(7.0), ease.apply(1.0));
    }
}

#[test]
fn eases_are_monotonic() {
    for ease in ALL {
        let mut prev = 0.0;
        for i in 0..=100 {
            let v = ease.apply(f64::from(i) / 100.0);
            assert!(v + 1e-12 >= prev, "{ease:?} at {i}");
            prev = v;
        }
    }
}

#[test]
fn out_quad_matches_closed_form() {
    assert!((Ease::OutQuad.apply(0.5) - 0.75).abs() < 1e-12);
    assert!((Ease::OutCubic.apply(0.5) - 0.875).abs() < 1e-12);
}

#[test]
fn serde_names_are_snake_case() {
    let e: Ease = serde_json::from_str("\"out_quad\"").unwrap();
    assert_eq!(e, Ease::OutQuad);
}

#[test]
fn frame_progress_saturates() {
    assert_eq!(frame_progress(0, 10), 0.0);
    assert_eq!(frame_progress(5, 10), 0.5);
    assert_eq!(frame_progress(10, 10), 1.0);
    assert_eq!(frame_progress(50, 10), 1.0);
    assert_eq!(frame_progress(0, 0), 1.0);
}
