use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::{Path, PathBuf};
use surface_bridge::{
    DrawCommand, FactoryConfig, RasterSurface, RecordedPicture, SurfaceCanvas, SurfaceColor,
    SurfaceFactory, SurfaceLimits,
};

/// surface-bridge: create bounded raster surfaces and capture them as recorded pictures
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    /// Path to a JSON factory configuration file
    #[clap(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging (overridden by RUST_LOG)
    #[clap(short, long, global = true)]
    verbose: bool,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create a surface clamped to a target context's maximum size and write it as PNG
    Create {
        /// Requested width in pixels
        #[clap(long)]
        width: u32,

        /// Requested height in pixels
        #[clap(long)]
        height: u32,

        /// Maximum drawable width of the target context
        #[clap(long)]
        max_width: Option<u32>,

        /// Maximum drawable height of the target context
        #[clap(long)]
        max_height: Option<u32>,

        /// CSS color to fill the surface with
        #[clap(long)]
        fill: Option<String>,

        /// Path to output PNG file to be created
        #[clap(short, long)]
        output: PathBuf,
    },

    /// Capture a PNG image as a recorded picture, replay it and write the result
    ///
    /// Pixels are held with premultiplied alpha. Opaque and fully transparent
    /// pixels round-trip exactly; the color channels of semi-transparent
    /// pixels may lose precision, while their alpha is kept.
    Capture {
        /// Path to input PNG file
        #[clap(short, long)]
        input: PathBuf,

        /// Path to output PNG file to be created
        #[clap(short, long)]
        output: PathBuf,

        /// Print a JSON summary of the recorded picture
        #[clap(long)]
        summary: bool,
    },
}

#[derive(Serialize)]
struct PictureSummary {
    width: u32,
    height: u32,
    commands: Vec<CommandSummary>,
}

#[derive(Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum CommandSummary {
    DrawSurface { width: u32, height: u32, x: i32, y: i32 },
    Clear,
    FillRect,
}

impl From<&RecordedPicture> for PictureSummary {
    fn from(picture: &RecordedPicture) -> Self {
        let commands = picture
            .commands()
            .iter()
            .map(|command| match command {
                DrawCommand::DrawSurface { surface, x, y } => CommandSummary::DrawSurface {
                    width: surface.width(),
                    height: surface.height(),
                    x: *x,
                    y: *y,
                },
                DrawCommand::Clear { .. } => CommandSummary::Clear,
                DrawCommand::FillRect { .. } => CommandSummary::FillRect,
            })
            .collect();
        Self {
            width: picture.width(),
            height: picture.height(),
            commands,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let config = match &cli.config {
        Some(path) => FactoryConfig::from_path(path)?,
        None => FactoryConfig::default(),
    };
    let factory = SurfaceFactory::with_config(config);

    match cli.command {
        Commands::Create {
            width,
            height,
            max_width,
            max_height,
            fill,
            output,
        } => create(
            &factory,
            width,
            height,
            max_width,
            max_height,
            fill.as_deref(),
            &output,
        ),
        Commands::Capture {
            input,
            output,
            summary,
        } => capture(&factory, &input, &output, summary),
    }
}

fn create(
    factory: &SurfaceFactory,
    width: u32,
    height: u32,
    max_width: Option<u32>,
    max_height: Option<u32>,
    fill: Option<&str>,
    output: &Path,
) -> anyhow::Result<()> {
    let fill = fill
        .map(SurfaceColor::parse)
        .transpose()
        .context("Invalid --fill color")?;

    // A target context only exists when a limit was given; the other
    // dimension falls back to the configured raster limit.
    let target = if max_width.is_some() || max_height.is_some() {
        let defaults = factory.config().raster_limits;
        let limits = SurfaceLimits::new(
            max_width.unwrap_or(defaults.max_width),
            max_height.unwrap_or(defaults.max_height),
        );
        Some(SurfaceCanvas::with_limits(RasterSurface::new(0, 0)?, limits))
    } else {
        None
    };

    let mut surface = match &target {
        Some(canvas) => factory.create_bounded_surface(width, height, Some(canvas))?,
        None => factory.create_bounded_surface(width, height, None)?,
    };
    if let Some(color) = fill {
        surface.fill(color);
    }

    write_png(&surface, factory.config().ppi, output)?;
    println!("{}x{}", surface.width(), surface.height());
    Ok(())
}

fn capture(
    factory: &SurfaceFactory,
    input: &Path,
    output: &Path,
    summary: bool,
) -> anyhow::Result<()> {
    let bytes = std::fs::read(input)
        .with_context(|| format!("Failed to read input file: {}", input.display()))?;
    let surface = RasterSurface::from_png(&bytes)
        .with_context(|| format!("Failed to decode PNG: {}", input.display()))?;

    let picture = factory.capture_surface_as_picture(Some(&surface));
    log::info!(
        "captured {}x{} picture with {} command(s)",
        picture.width(),
        picture.height(),
        picture.command_count()
    );
    let replay = picture.to_surface()?;
    if replay != surface {
        bail!("Replayed picture does not match {}", input.display());
    }

    write_png(&replay, factory.config().ppi, output)?;

    if summary {
        let summary = PictureSummary::from(&picture);
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }
    Ok(())
}

fn write_png(surface: &RasterSurface, ppi: f32, output: &Path) -> anyhow::Result<()> {
    if surface.is_empty() {
        bail!(
            "Surface {}x{} is empty and cannot be written as PNG",
            surface.width(),
            surface.height()
        );
    }
    let png = surface
        .to_png(Some(ppi))
        .context("Failed to encode PNG")?;
    std::fs::write(output, png)
        .with_context(|| format!("Failed to write output to {}", output.display()))?;
    Ok(())
}
