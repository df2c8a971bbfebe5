use super::*;

#[test]
fn over_opacity_0_is_noop() {
    let dst = [1, 2, 3, 4];
    let src = [200, 200, 200, 200];
    assert_eq!(over(dst, src, 0.0), dst);
}

#[test]
fn over_src_alpha_0_is_noop() {
    let dst = [10, 20, 30, 40];
    let src = [255, 255, 255, 0];
    assert_eq!(over(dst, src, 1.0), dst);
}

#[test]
fn over_src_opaque_replaces_dst() {
    let dst = [0, 0, 0, 255];
    let src = [255, 0, 0, 255];
    assert_eq!(over(dst, src, 1.0), src);
}

#[test]
fn over_in_place_rejects_mismatched_buffers() {
    let mut dst = vec![0u8; 8];
    assert!(over_in_place(&mut dst, &[0u8; 4], 1.0).is_err());
}

#[test]
fn mask_hides_everything_right_of_cutoff() {
    let mask = WipeMask {
        cutoff_x: 10.0,
        step_px: 1.5,
        opacities: &[0.66, 0.33],
    };
    assert_eq!(mask.coverage(10.0), 0.0);
    assert_eq!(mask.coverage(50.0), 0.0);
    assert_eq!(mask.coverage(9.5), 0.33);
    assert_eq!(mask.coverage(8.0), 0.66);
    assert_eq!(mask.coverage(5.0), 1.0);
}

#[test]
fn mask_soft_edge_decreases_toward_cutoff() {
    let mask = WipeMask {
        cutoff_x: 100.0,
        step_px: 1.5,
        opacities: &[0.75, 0.5, 0.25],
    };
    let mut prev = 1.0;
    for i in 0..20 {
        let x = 90.0 + f64::from(i) * 0.5;
        let c = mask.coverage(x);
        assert!(c <= prev, "coverage rose at x={x}");
        prev = c;
    }
}

#[test]
fn zero_cutoff_clears_buffer() {
    let mask = WipeMask {
        cutoff_x: 0.0,
        step_px: 1.5,
        opacities: &[0.66, 0.33],
    };
    let mut data = vec![255u8; 4 * 4 * 2];
    mask.apply(&mut data, 4).unwrap();
    assert!(data.iter().all(|&b| b == 0));
}

#[test]
fn hard_mask_keeps_left_columns() {
    let mask = WipeMask {
        cutoff_x: 2.0,
        step_px: 0.0,
        opacities: &[],
    };
    let mut data = vec![255u8; 4 * 4];
    mask.apply(&mut data, 4).unwrap();
    assert_eq!(&data[..8], &[255u8; 8]);
    assert_eq!(&data[8..], &[0u8; 8]);
}

#[test]
fn mask_rejects_partial_rows() {
    let mask = WipeMask {
        cutoff_x: 2.0,
        step_px: 0.0,
        opacities: &[],
    };
    let mut data = vec![0u8; 12];
    assert!(mask.apply(&mut data, 2).is_err());
}
