//! Textreel renders short vertical text videos from a plain-text record file.
//!
//! Each record becomes one MP4: a title card revealed by a wipe, then one clip per body
//! paragraph in which `[[marked]]` words get a progressive highlight band, separated by short
//! holds. Text is shaped with Parley, rasterized on the CPU with `vello_cpu` and encoded by piping
//! raw frames into the system `ffmpeg`.
//!
//! - Parse records with [`parse_document`]
//! - Turn a [`Record`] into a [`Timeline`] with a [`ClipAssembler`]
//! - Stream timelines into a [`FrameSink`] with [`render_records`] or [`render_to_mp4`]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub(crate) mod animation;
pub(crate) mod config;
pub(crate) mod document;
pub(crate) mod encode;
pub(crate) mod pipeline;
pub(crate) mod render;
pub(crate) mod text;
pub(crate) mod timeline;
pub(crate) mod timing;

pub use crate::foundation::core::{Canvas, Fps, FrameIndex, FrameRange, Rgba8};
pub use crate::foundation::error::{TextreelError, TextreelResult};

pub use crate::animation::ease::{Ease, frame_progress};
pub use crate::config::settings::{
    BlockLayoutConfig, DurationConfig, FontSet, FontSpec, HighlightBand, LengthTier,
    OpeningConfig, OutputConfig, Palette, RenderConfig, SequenceConfig, WordTier,
};
pub use crate::document::parser::{Record, parse_document, parse_document_file};
pub use crate::encode::ffmpeg::{FfmpegSink, FfmpegSinkOpts, ensure_parent_dir, is_ffmpeg_on_path};
pub use crate::encode::sink::{FrameSink, InMemorySink, SinkConfig};
pub use crate::pipeline::{RunSummary, render_records, render_timeline, render_to_mp4};
pub use crate::render::block::{ShapedBlock, TextBlockClip, wrap_paragraphs};
pub use crate::render::composite::{PremulRgba8, WipeMask, over, over_in_place};
pub use crate::render::cpu::CpuPainter;
pub use crate::render::frame::FrameRGBA;
pub use crate::render::layout::{BlockLayout, PlacedWord, anchored_top, line_height};
pub use crate::render::opening::OpeningClip;
pub use crate::render::reveal::{
    HighlightRun, RevealSchedule, RevealStrategy, WipeTiming, sweep_fills, total_sweep_chars,
};
pub use crate::text::font::{FontFace, FontOrigin};
pub use crate::text::markup::{TextSegment, parse_markup, plain_text};
pub use crate::text::shaper::{FontBook, FontMetrics, TextBrushRgba8, TextShaper};
pub use crate::text::wrap::{Line, OrphanWords, TextMeasure, Word, WordWrapper, flatten_words};
pub use crate::timeline::assemble::ClipAssembler;
pub use crate::timeline::clip::{FrameSource, HoldClip};
pub use crate::timeline::overlay::Overlay;
pub use crate::timeline::sequence::Timeline;
pub use crate::timing::duration::{body_duration_secs, opening_duration_secs};
