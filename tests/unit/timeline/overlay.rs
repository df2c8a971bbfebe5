use super::*;
use crate::foundation::core::Rgba8;

fn tmp_dir(tag: &str) -> std::path::PathBuf {
    let tmp = std::env::temp_dir().join(format!(
        "textreel_overlay_{tag}_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));
    std::fs::create_dir_all(&tmp).unwrap();
    tmp
}

fn canvas() -> Canvas {
    Canvas {
        width: 4,
        height: 4,
    }
}

#[test]
fn image_is_stretched_to_canvas() {
    let img = image::RgbaImage::from_pixel(2, 2, image::Rgba([255, 0, 0, 255]));
    let overlay = Overlay::from_image(&image::DynamicImage::ImageRgba8(img), canvas());
    let mut frame = FrameRGBA::solid(canvas(), Rgba8::rgb(0, 0, 0));
    overlay.apply(&mut frame).unwrap();
    assert_eq!(frame.pixel(3, 3), Some([255, 0, 0, 255]));
}

#[test]
fn transparent_overlay_leaves_frame_alone() {
    let img = image::RgbaImage::from_pixel(4, 4, image::Rgba([255, 255, 255, 0]));
    let overlay = Overlay::from_image(&image::DynamicImage::ImageRgba8(img), canvas());
    let before = FrameRGBA::solid(canvas(), Rgba8::rgb(10, 20, 30));
    let mut frame = before.clone();
    overlay.apply(&mut frame).unwrap();
    assert_eq!(frame, before);
}

#[test]
fn size_mismatch_is_an_error() {
    let img = image::RgbaImage::new(4, 4);
    let overlay = Overlay::from_image(&image::DynamicImage::ImageRgba8(img), canvas());
    let mut frame = FrameRGBA::solid(
        Canvas {
            width: 2,
            height: 2,
        },
        Rgba8::rgb(0, 0, 0),
    );
    assert!(overlay.apply(&mut frame).is_err());
}

#[test]
fn missing_file_is_skipped() {
    let tmp = tmp_dir("missing");
    assert_eq!(Overlay::load_optional(&tmp.join("nope.png"), canvas()), None);
}

#[test]
fn undecodable_file_is_skipped() {
    let tmp = tmp_dir("corrupt");
    let path = tmp.join("broken.png");
    std::fs::write(&path, b"not a png").unwrap();
    assert!(Overlay::load(&path, canvas()).is_err());
    assert_eq!(Overlay::load_optional(&path, canvas()), None);
}

#[test]
fn png_on_disk_loads() {
    let tmp = tmp_dir("png");
    let path = tmp.join("logo.png");
    image::RgbaImage::from_pixel(8, 8, image::Rgba([0, 255, 0, 128]))
        .save(&path)
        .unwrap();
    let overlay = Overlay::load_optional(&path, canvas()).unwrap();
    let mut frame = FrameRGBA::solid(canvas(), Rgba8::rgb(0, 0, 0));
    overlay.apply(&mut frame).unwrap();
    let px = frame.pixel(1, 1).unwrap();
    assert_eq!(px[3], 255);
    assert!((120..=136).contains(&px[1]), "green {}", px[1]);
}
