use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use plotkit::{init_logging, ArtworkConverter, Config, BUILD_DATE, VERSION};
use serde::Serialize;
use std::path::PathBuf;
use tracing::debug;

const LONG_VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (built ", env!("BUILD_DATE"), ")");

/// Converts SVG artwork and text into pen-up/pen-down point streams.
#[derive(Debug, Parser)]
#[command(name = "plotkit", version, long_version = LONG_VERSION)]
struct Cli {
    /// Settings file (.toml or .json); defaults to the platform config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Convert an SVG file
    Svg {
        /// SVG file to convert
        file: PathBuf,

        /// Curve flattening scale; larger values give smoother curves
        #[arg(long)]
        scale: Option<f64>,

        #[command(flatten)]
        output: OutputArgs,
    },
    /// Render a string with a font and convert the glyph outlines
    Text {
        text: String,

        /// Baseline origin x
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        x: f64,

        /// Baseline origin y
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        y: f64,

        #[arg(long)]
        font_size: Option<f64>,

        /// TrueType/OpenType font file instead of the system default
        #[arg(long)]
        font_file: Option<PathBuf>,

        #[command(flatten)]
        output: OutputArgs,
    },
}

#[derive(Debug, Args)]
struct OutputArgs {
    /// Simplification tolerance for each pen-down run
    #[arg(long)]
    tolerance: Option<f64>,

    /// Print the bounding box instead of the points
    #[arg(long)]
    bbox: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging()?;
    debug!("plotkit {} ({})", VERSION, BUILD_DATE);

    let mut config =
        Config::load_or_default(cli.config.as_deref()).context("Failed to load settings")?;

    let (points, output) = match cli.command {
        Command::Svg {
            file,
            scale,
            output,
        } => {
            apply_tolerance(&mut config, &output)?;
            apply_scale(&mut config, scale)?;
            let converter = ArtworkConverter::new(config.converter_options());
            let points = converter
                .from_file(&file, config.conversion.curve_scale)
                .with_context(|| format!("Failed to convert {}", file.display()))?;
            (points, output)
        }
        Command::Text {
            text,
            x,
            y,
            font_size,
            font_file,
            output,
        } => {
            apply_tolerance(&mut config, &output)?;
            if let Some(font_size) = font_size {
                config.text.font_size = font_size;
            }
            if font_file.is_some() {
                config.text.font_file = font_file;
            }
            config.validate().context("Invalid text options")?;

            let converter = ArtworkConverter::new(config.converter_options());
            let points = converter
                .from_text(&text, x, y, &config.text_options())
                .with_context(|| format!("Failed to render {:?}", text))?;
            (points, output)
        }
    };

    if output.bbox {
        print_json(&ArtworkConverter::aabb(&points))
    } else {
        print_json(&points)
    }
}

fn apply_tolerance(config: &mut Config, output: &OutputArgs) -> anyhow::Result<()> {
    if let Some(tolerance) = output.tolerance {
        config.conversion.simplify_tolerance = tolerance;
        config.validate().context("Invalid tolerance")?;
    }
    Ok(())
}

fn apply_scale(config: &mut Config, scale: Option<f64>) -> anyhow::Result<()> {
    if let Some(scale) = scale {
        config.conversion.curve_scale = scale;
        config.validate().context("Invalid scale")?;
    }
    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", json);
    Ok(())
}
