use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use swatch_render::{
    load_series, AnimationDriver, CanvasSize, Disposal, Frame, FrameSeries, Raster, RenderOptions,
    TerminalGeometry,
};
use walkdir::WalkDir;

#[derive(Parser, Debug)]
#[command(author, version, about = "Render images and animations as colored terminal swatches")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Draw an image or play an animation directly in the terminal
    Play(PlayArgs),
    /// Write every frame's escape text to files on disk
    Export(ExportArgs),
}

#[derive(Parser, Debug)]
struct PlayArgs {
    /// Input path (image, GIF, or directory of frames)
    input: PathBuf,
    #[command(flatten)]
    settings: RenderSettings,
}

#[derive(Parser, Debug)]
struct ExportArgs {
    /// Input path (image, GIF, or directory of frames)
    input: PathBuf,
    /// Output directory for frame files
    #[arg(short, long)]
    out_dir: PathBuf,
    #[command(flatten)]
    settings: RenderSettings,
}

#[derive(Parser, Debug, Clone)]
struct RenderSettings {
    /// Sample one pixel per cell instead of averaging the region
    #[arg(long, default_value_t = false)]
    point_sample: bool,
    /// Pack two pixel rows into each terminal row using half blocks
    #[arg(long, default_value_t = false)]
    compact: bool,
    /// Buffer each frame and write it in one call instead of streaming
    #[arg(long, default_value_t = false)]
    buffered: bool,
    /// Fixed output width in swatch cells; disables terminal size detection
    #[arg(long)]
    width: Option<u16>,
    /// Delay in 10 ms ticks for frames loaded from a directory
    #[arg(long, default_value_t = 10)]
    delay: u16,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Play(args) => play(args),
        Commands::Export(args) => export(args),
    }
}

fn play(args: PlayArgs) -> Result<()> {
    let series = load_input(&args.input, args.settings.delay)?;
    let driver = AnimationDriver::new(geometry(&args.settings)?, args.settings.to_options());

    let stdout = io::stdout();
    let mut sink = stdout.lock();
    driver
        .play(&series, &mut sink)
        .with_context(|| format!("failed to write render of {:?}", args.input))?;
    Ok(())
}

fn export(args: ExportArgs) -> Result<()> {
    let series = load_input(&args.input, args.settings.delay)?;
    let driver = AnimationDriver::new(geometry(&args.settings)?, args.settings.to_options());

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("failed to create output directory {:?}", args.out_dir))?;

    let progress = ProgressBar::new(series.len() as u64);
    progress.set_style(
        ProgressStyle::with_template(
            "{spinner} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} frames",
        )
        .unwrap()
        .progress_chars("=> "),
    );

    for (index, frame) in series.frames().iter().enumerate() {
        let text = driver.frame_text(series.canvas(), frame);
        let frame_path = args.out_dir.join(format!("frame_{:04}.ans", index));
        let mut file = File::create(&frame_path)
            .with_context(|| format!("failed to create {:?}", frame_path))?;
        file.write_all(text.as_bytes())
            .with_context(|| format!("failed to write {:?}", frame_path))?;
        progress.inc(1);
    }

    progress.finish_with_message(format!("Frames written to {:?}", args.out_dir));
    Ok(())
}

fn geometry(settings: &RenderSettings) -> Result<TerminalGeometry> {
    if let Some(width) = settings.width {
        // Manual budget: effectively unlimited rows, two columns per cell.
        return Ok(TerminalGeometry { rows: u16::MAX, cols: width.saturating_mul(2) });
    }

    let (cols, rows) = crossterm::terminal::size().context("failed to query terminal size")?;
    Ok(TerminalGeometry { rows, cols })
}

fn load_input(path: &Path, delay_ticks: u16) -> Result<FrameSeries> {
    if path.is_dir() {
        load_frames_from_directory(path, delay_ticks)
    } else {
        load_series(path).with_context(|| format!("failed to decode {:?}", path))
    }
}

/// A directory of still images is an animation source: files in sorted order,
/// one frame each, with a uniform caller-supplied delay.
fn load_frames_from_directory(path: &Path, delay_ticks: u16) -> Result<FrameSeries> {
    let mut entries: Vec<PathBuf> = WalkDir::new(path)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.path().to_path_buf())
        .collect();
    entries.sort();
    if entries.is_empty() {
        anyhow::bail!("no image files found in {:?}", path);
    }

    let mut rasters = Vec::with_capacity(entries.len());
    let mut canvas = CanvasSize::new(0, 0);
    for entry in entries {
        let image = image::open(&entry)
            .with_context(|| format!("failed to open image {:?}", entry))?
            .to_rgba8();
        let (width, height) = image.dimensions();
        canvas.width = canvas.width.max(width);
        canvas.height = canvas.height.max(height);
        rasters.push(Raster::new(width, height, image.into_raw()));
    }

    let mut series = FrameSeries::new(canvas);
    for raster in rasters {
        series.push_frame(Frame { raster, delay_ticks, disposal: Disposal::None });
    }
    Ok(series)
}

impl RenderSettings {
    fn to_options(&self) -> RenderOptions {
        RenderOptions {
            average_sampling: !self.point_sample,
            compact: self.compact,
            stream: !self.buffered,
        }
    }
}
