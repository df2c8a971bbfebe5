use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "textreel", version)]
struct Cli {
    /// Log filter (overrides `RUST_LOG`), e.g. `debug` or `textreel=trace`.
    #[arg(long, global = true)]
    log: Option<String>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render every record to MP4 (requires `ffmpeg` on PATH).
    Render(RenderArgs),
    /// Render a single frame of one record as a PNG.
    Frame(FrameArgs),
    /// Print the clip schedule of every record without rendering.
    Plan(PlanArgs),
    /// Print the effective configuration as JSON.
    Config(ConfigArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Input record file.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// JSON configuration overriding the defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output directory (overrides `output.dir`).
    #[arg(long)]
    out_dir: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Input record file.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// JSON configuration overriding the defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Record number (1-based).
    #[arg(long, default_value_t = 1)]
    record: usize,

    /// Frame index within the record's video (0-based).
    #[arg(long)]
    frame: u64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct PlanArgs {
    /// Input record file.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// JSON configuration overriding the defaults.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct ConfigArgs {
    /// JSON configuration to merge over the defaults.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log.as_deref());
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Plan(args) => cmd_plan(args),
        Command::Config(args) => cmd_config(args),
    }
}

fn init_tracing(filter: Option<&str>) {
    let filter = match filter {
        Some(f) => EnvFilter::new(f),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> anyhow::Result<textreel::RenderConfig> {
    match path {
        Some(p) => textreel::RenderConfig::from_path(p)
            .with_context(|| format!("load config '{}'", p.display())),
        None => Ok(textreel::RenderConfig::default()),
    }
}

fn load_records(path: &Path) -> anyhow::Result<Vec<textreel::Record>> {
    let records = textreel::parse_document_file(path)
        .with_context(|| format!("read records from '{}'", path.display()))?;
    if records.is_empty() {
        anyhow::bail!("no records found in '{}'", path.display());
    }
    tracing::info!(records = records.len(), input = %path.display(), "records parsed");
    Ok(records)
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let mut cfg = load_config(args.config.as_deref())?;
    if let Some(dir) = args.out_dir {
        cfg.output.dir = dir;
    }
    let records = load_records(&args.in_path)?;

    let summary = textreel::render_to_mp4(&records, &cfg)?;
    for path in &summary.written {
        eprintln!("wrote {}", path.display());
    }
    if !summary.failed.is_empty() {
        for (index, title, err) in &summary.failed {
            eprintln!("record {} ({title}) failed: {err}", index + 1);
        }
        anyhow::bail!(
            "{} of {} records failed",
            summary.failed.len(),
            records.len()
        );
    }
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let cfg = load_config(args.config.as_deref())?;
    let records = load_records(&args.in_path)?;
    let record = args
        .record
        .checked_sub(1)
        .and_then(|i| records.get(i))
        .with_context(|| {
            format!(
                "record {} out of range (input has {})",
                args.record,
                records.len()
            )
        })?;

    let mut fonts = textreel::FontBook::load(&cfg.fonts)?;
    let timeline = textreel::ClipAssembler::new(&cfg, &mut fonts).assemble(record);
    let frame = timeline.render_frame(textreel::FrameIndex(args.frame));

    textreel::ensure_parent_dir(&args.out)?;
    image::save_buffer_with_format(
        &args.out,
        &frame.data,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_plan(args: PlanArgs) -> anyhow::Result<()> {
    let cfg = load_config(args.config.as_deref())?;
    let records = load_records(&args.in_path)?;
    let fps = cfg.fps;

    for (i, record) in records.iter().enumerate() {
        println!("record {}: {}", i + 1, record.display_title());
        let opening = textreel::opening_duration_secs(
            record.upper.as_deref(),
            record.title.as_deref(),
            record.subtitle.as_deref(),
            &cfg.opening,
        );
        let mut total = opening + cfg.sequence.separator_secs;
        println!("  opening      {opening:>5.1}s");
        println!("  separator    {:>5.1}s", cfg.sequence.separator_secs);
        if record.paragraphs.is_empty() {
            println!("  placeholder  {:>5.1}s", cfg.sequence.placeholder_secs);
            total += cfg.sequence.placeholder_secs;
        }
        for (j, p) in record.paragraphs.iter().enumerate() {
            if j > 0 {
                println!("  separator    {:>5.1}s", cfg.sequence.separator_secs);
                total += cfg.sequence.separator_secs;
            }
            let secs = textreel::body_duration_secs(p, &cfg.duration);
            println!("  body_{:<7} {secs:>5.1}s", j + 1);
            total += secs;
        }
        println!("  hold         {:>5.1}s", cfg.sequence.trailing_hold_secs);
        total += cfg.sequence.trailing_hold_secs;
        println!(
            "  total        {total:>5.1}s (~{} frames) -> {}",
            fps.secs_to_frames_floor(total),
            cfg.output.path_for(i).display()
        );
    }
    Ok(())
}

fn cmd_config(args: ConfigArgs) -> anyhow::Result<()> {
    let cfg = load_config(args.config.as_deref())?;
    let json = serde_json::to_string_pretty(&cfg).context("serialize config")?;
    println!("{json}");
    Ok(())
}
