use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "weight-gazer", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Composite the chart onto a sample of wallpapers.
    Overlay(OverlayArgs),
    /// Render the chart alone as a transparent PNG.
    Chart(ChartArgs),
}

#[derive(Parser, Debug)]
struct OverlayArgs {
    /// Diary table (CSV with `date`, `weight` and meal columns).
    #[arg(long)]
    data: PathBuf,

    /// Directory holding the source wallpapers.
    #[arg(long, short = 'w')]
    wallpapers: PathBuf,

    /// Directory the slideshow reads from; receives one file per wallpaper.
    #[arg(long)]
    out: PathBuf,

    /// JSON overlay configuration; flags below override it.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Percentage of wallpapers (0-100) that get the chart.
    #[arg(long)]
    frequency: Option<f64>,

    /// Target aspect ratio, e.g. `16:9`.
    #[arg(long)]
    ratio: Option<weight_gazer::AspectRatio>,

    /// Use the screen's aspect ratio as reported by xrandr.
    #[arg(long)]
    auto_ratio: bool,

    /// Skip the soft backing plate behind the chart.
    #[arg(long)]
    no_shadow: bool,

    /// Seed for wallpaper selection.
    #[arg(long)]
    seed: Option<u64>,

    /// Process wallpapers on all cores.
    #[arg(long)]
    parallel: bool,

    /// Extra directory of fonts for chart labels.
    #[arg(long)]
    fonts: Option<PathBuf>,

    /// Command (split on whitespace) that resumes the desktop slideshow.
    #[arg(long)]
    slideshow_on: Option<String>,

    /// Command (split on whitespace) that pauses the desktop slideshow.
    #[arg(long)]
    slideshow_off: Option<String>,
}

#[derive(Parser, Debug)]
struct ChartArgs {
    /// Diary table (CSV with `date`, `weight` and meal columns).
    #[arg(long)]
    data: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    #[arg(long, default_value_t = 1920)]
    width: u32,

    #[arg(long, default_value_t = 1080)]
    height: u32,

    /// Render resolution; 100 is the reference scale.
    #[arg(long, default_value_t = 100.0)]
    scale: f64,

    /// Extra directory of fonts for chart labels.
    #[arg(long)]
    fonts: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Overlay(args) => cmd_overlay(args),
        Command::Chart(args) => cmd_chart(args),
    }
}

fn make_renderer(
    data: &Path,
    base_resolution: f64,
    fonts: Option<&Path>,
) -> anyhow::Result<weight_gazer::SvgChartRenderer> {
    let table = weight_gazer::WeightTable::from_csv_path(data)
        .with_context(|| format!("load diary '{}'", data.display()))?;
    let mut renderer = weight_gazer::SvgChartRenderer::new(table, base_resolution)?;
    if let Some(dir) = fonts {
        renderer = renderer.with_font_dir(dir);
    }
    Ok(renderer)
}

fn split_command(cmd: Option<String>) -> Option<Vec<String>> {
    let parts: Vec<String> = cmd?.split_whitespace().map(str::to_string).collect();
    (!parts.is_empty()).then_some(parts)
}

fn cmd_overlay(args: OverlayArgs) -> anyhow::Result<()> {
    let mut config = match &args.config {
        Some(path) => weight_gazer::OverlayConfig::from_json_path(path)?,
        None => weight_gazer::OverlayConfig::default(),
    };
    if let Some(f) = args.frequency {
        config.appearance_frequency_percent = f;
    }
    if let Some(r) = args.ratio {
        config.target_aspect_ratio = r;
    }
    if args.auto_ratio {
        config.auto_detect_target_ratio = true;
    }
    if args.no_shadow {
        config.with_shadow_mask = false;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    if args.parallel {
        config.parallel = true;
    }
    config.validate()?;

    let renderer = make_renderer(&args.data, config.base_resolution, args.fonts.as_deref())?;
    let display = weight_gazer::XrandrDisplay::new().with_slideshow_commands(
        split_command(args.slideshow_on),
        split_command(args.slideshow_off),
    );

    let report = weight_gazer::BatchRunner::new(config, &renderer, &display)
        .run(&args.wallpapers, &args.out)?;

    for f in &report.failed {
        eprintln!("skipped {}: {}", f.source.display(), f.error);
    }
    eprintln!(
        "wrote {} overlays, copied {} wallpapers to {}",
        report.overlaid.len(),
        report.copied.len(),
        args.out.display()
    );
    Ok(())
}

fn cmd_chart(args: ChartArgs) -> anyhow::Result<()> {
    use weight_gazer::ChartRenderer as _;

    let renderer = make_renderer(&args.data, 100.0, args.fonts.as_deref())?;
    let size = weight_gazer::Dimensions::new(args.width, args.height)?;
    let chart = renderer.render_chart(size, args.scale)?;

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    weight_gazer::write_image(&image::DynamicImage::ImageRgba8(chart), &args.out)?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}
