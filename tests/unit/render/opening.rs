use super::*;
use crate::text::font::FontFace;

fn book() -> Option<FontBook> {
    FontFace::system_fallback().ok()?;
    let mut fonts = crate::config::settings::FontSet::default();
    fonts.upper.path = "/nonexistent/upper.ttf".into();
    fonts.title.path = "/nonexistent/title.ttf".into();
    fonts.subtitle.path = "/nonexistent/subtitle.ttf".into();
    fonts.body.path = "/nonexistent/body.ttf".into();
    FontBook::load(&fonts).ok()
}

fn cfg() -> RenderConfig {
    RenderConfig {
        overlay: None,
        ..RenderConfig::default()
    }
}

#[test]
fn roles_stack_around_anchor() {
    let Some(mut fonts) = book() else {
        return;
    };
    let cfg = cfg();
    let clip = OpeningClip::new("EKONOMI", "Harga emas naik", Some("Hari ini"), &mut fonts, &cfg, 60);
    let blocks = clip.blocks();
    assert_eq!(blocks.len(), 3);
    let (upper, title, sub) = (blocks[0].layout(), blocks[1].layout(), blocks[2].layout());
    assert_eq!(title.top, 768.0);
    assert!((upper.top + upper.height() + cfg.opening.upper_gap - title.top).abs() < 1e-9);
    assert_eq!(sub.top, title.top + title.height() + cfg.opening.subtitle_gap);
}

#[test]
fn empty_roles_are_skipped() {
    let Some(mut fonts) = book() else {
        return;
    };
    let clip = OpeningClip::new("", "Judul saja", None, &mut fonts, &cfg(), 60);
    assert_eq!(clip.blocks().len(), 1);
}

#[test]
fn explicit_newlines_break_title() {
    let Some(mut fonts) = book() else {
        return;
    };
    let clip = OpeningClip::new("", "Baris satu\nBaris dua", None, &mut fonts, &cfg(), 60);
    assert_eq!(clip.blocks()[0].layout().line_count, 2);
}

#[test]
fn lead_in_is_blank_then_fully_shown() {
    let Some(mut fonts) = book() else {
        return;
    };
    let cfg = cfg();
    let clip = OpeningClip::new("EKONOMI", "Harga emas naik", None, &mut fonts, &cfg, 60);
    let bg = FrameRGBA::solid(cfg.canvas, cfg.palette.background);
    assert_eq!(clip.render_frame(FrameIndex(0)).unwrap(), bg);
    let shown = clip.render_frame(FrameIndex(59)).unwrap();
    assert_ne!(shown, bg);
    assert_eq!(shown, clip.render_frame(FrameIndex(600)).unwrap());
}
