use std::path::{Path, PathBuf};

use crate::config::settings::RenderConfig;
use crate::document::parser::Record;
use crate::encode::ffmpeg::{FfmpegSink, FfmpegSinkOpts, is_ffmpeg_on_path};
use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{TextreelError, TextreelResult};
use crate::text::shaper::FontBook;
use crate::timeline::assemble::ClipAssembler;
use crate::timeline::sequence::Timeline;

/// Outcome of a multi-record run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Files that were written completely.
    pub written: Vec<PathBuf>,
    /// `(record index, title, error)` for every record that failed.
    pub failed: Vec<(usize, String, String)>,
}

/// Push every frame of `timeline` through `sink`, from `begin` to `end`.
pub fn render_timeline(timeline: &Timeline, sink: &mut dyn FrameSink) -> TextreelResult<u64> {
    let total = timeline.total_frames();
    sink.begin(SinkConfig {
        canvas: timeline.canvas(),
        fps: timeline.fps(),
        total_frames: total,
    })?;
    for f in 0..total {
        let idx = FrameIndex(f);
        let frame = timeline.render_frame(idx);
        sink.push_frame(idx, &frame)?;
    }
    sink.end()?;
    Ok(total)
}

fn remove_partial(path: &Path) {
    if !path.exists() {
        return;
    }
    match std::fs::remove_file(path) {
        Ok(()) => tracing::info!(out = %path.display(), "removed partial output"),
        Err(err) => tracing::warn!(out = %path.display(), error = %err, "could not remove partial output"),
    }
}

/// Render each record to `cfg.output.path_for(index)` through a sink from `open_sink`.
///
/// A failing record is logged with its title, its partial file is removed and the run moves on.
/// Only an empty record list fails the whole run.
pub fn render_records<F>(
    records: &[Record],
    cfg: &RenderConfig,
    fonts: &mut FontBook,
    mut open_sink: F,
) -> TextreelResult<RunSummary>
where
    F: FnMut(&Path) -> Box<dyn FrameSink>,
{
    if records.is_empty() {
        return Err(TextreelError::validation("no records to render"));
    }

    let mut assembler = ClipAssembler::new(cfg, fonts);
    let mut summary = RunSummary::default();
    for (index, record) in records.iter().enumerate() {
        let title = record.display_title();
        let out = cfg.output.path_for(index);
        let span = tracing::info_span!("record", index = index + 1, title);
        let _enter = span.enter();

        tracing::info!(out = %out.display(), "rendering record");
        let timeline = assembler.assemble(record);
        let mut sink = open_sink(&out);
        match render_timeline(&timeline, sink.as_mut()) {
            Ok(frames) => {
                tracing::info!(out = %out.display(), frames, "record written");
                summary.written.push(out);
            }
            Err(err) => {
                tracing::error!(error = %err, "record failed");
                drop(sink);
                remove_partial(&out);
                summary.failed.push((index, title.to_owned(), err.to_string()));
            }
        }
    }

    tracing::info!(
        written = summary.written.len(),
        failed = summary.failed.len(),
        "run finished"
    );
    Ok(summary)
}

/// Render every record to MP4 with the system `ffmpeg`.
pub fn render_to_mp4(records: &[Record], cfg: &RenderConfig) -> TextreelResult<RunSummary> {
    if !is_ffmpeg_on_path() {
        return Err(TextreelError::encode(
            "ffmpeg is required for MP4 rendering, but was not found on PATH",
        ));
    }
    let mut fonts = FontBook::load(&cfg.fonts)?;
    let background = cfg.palette.background;
    render_records(records, cfg, &mut fonts, |out| {
        let mut opts = FfmpegSinkOpts::new(out);
        opts.background = background;
        Box::new(FfmpegSink::new(opts)) as Box<dyn FrameSink>
    })
}

#[cfg(test)]
#[path = "../tests/unit/pipeline.rs"]
mod tests;
