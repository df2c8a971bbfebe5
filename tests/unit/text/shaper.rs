use super::*;

fn shaper(size_px: f32) -> Option<TextShaper> {
    let face = FontFace::system_fallback().ok()?;
    TextShaper::new(&face, size_px).ok()
}

#[test]
fn rejects_non_positive_sizes() {
    let Ok(face) = FontFace::system_fallback() else {
        return;
    };
    assert!(TextShaper::new(&face, 0.0).is_err());
    assert!(TextShaper::new(&face, f32::NAN).is_err());
}

#[test]
fn trailing_space_widens_measurement() {
    let Some(mut s) = shaper(34.0) else {
        return;
    };
    let bare = s.measure("emas");
    let spaced = s.measure("emas ");
    assert!(bare > 0.0);
    assert!(spaced > bare);
    assert_eq!(s.measure(""), 0.0);
}

#[test]
fn measurement_is_deterministic_and_matches_shaping() {
    let Some(mut s) = shaper(34.0) else {
        return;
    };
    let a = s.measure("Harga ");
    let b = s.measure("Harga ");
    assert_eq!(a, b);
    let glyphs = s.shape("Harga ");
    assert_eq!(glyphs.len(), s.shape("Harga ").len());
    let last = glyphs.last().unwrap();
    assert!(f64::from(last.x) < a);
}

#[test]
fn metrics_are_positive() {
    let Some(mut s) = shaper(34.0) else {
        return;
    };
    let m = s.metrics();
    assert!(m.ascent > 0.0);
    assert!(m.descent >= 0.0);
}

#[test]
fn font_book_falls_back_for_missing_files() {
    if FontFace::system_fallback().is_err() {
        return;
    }
    let mut fonts = FontSet::default();
    fonts.body.path = "/nonexistent/body.ttf".into();
    fonts.title.path = "/nonexistent/title.ttf".into();
    fonts.upper.path = "/nonexistent/upper.ttf".into();
    fonts.subtitle.path = "/nonexistent/subtitle.ttf".into();
    let mut book = FontBook::load(&fonts).unwrap();
    assert_eq!(book.body.size_px(), 34.0);
    assert_eq!(book.title.size_px(), 54.0);
    assert!(book.body.measure("Harga") > 0.0);
}

#[test]
fn font_book_falls_back_for_unparseable_files() {
    if FontFace::system_fallback().is_err() {
        return;
    }
    let path = std::env::temp_dir().join(format!("textreel-broken-{}.ttf", std::process::id()));
    std::fs::write(&path, b"this is not a font file at all").unwrap();

    let mut fonts = FontSet::default();
    for spec in [
        &mut fonts.upper,
        &mut fonts.title,
        &mut fonts.subtitle,
        &mut fonts.body,
    ] {
        spec.path = path.clone();
    }
    let book = FontBook::load(&fonts);
    let _ = std::fs::remove_file(&path);

    let mut book = book.unwrap();
    assert_eq!(book.title.size_px(), 54.0);
    assert!(book.body.measure("Harga") > 0.0);
    assert!(!book.upper.shape("EKONOMI").is_empty());
}
