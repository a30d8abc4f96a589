use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand, ValueEnum};

use qrstudio::feedback::LogFeedback;
use qrstudio::platform::NativePlatform;
use qrstudio::{Color, EcLevel, ImageFormat, Outcome, QrConfig, Studio};

#[derive(Parser)]
#[command(name = "qrstudio", version, about = "Configure a QR code image and export it")]
struct Cli {
    /// Text or URL to encode (empty renders a placeholder symbol)
    #[arg(long, default_value = "")]
    content: String,

    /// Square dimension in pixels, clamped to 128..=512
    #[arg(long, default_value_t = 256)]
    size: u32,

    /// Foreground color as #rrggbb
    #[arg(long, default_value = "#000000")]
    foreground: String,

    /// Background color as #rrggbb
    #[arg(long, default_value = "#ffffff")]
    background: String,

    /// Error correction level: low, medium, quartile, high
    #[arg(long, default_value = "low")]
    level: String,

    /// Drop the quiet border around the symbol
    #[arg(long)]
    no_margin: bool,

    /// Print the outcome as JSON
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Png,
    Svg,
}

impl From<FormatArg> for ImageFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Png => ImageFormat::Raster,
            FormatArg::Svg => ImageFormat::Vector,
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Save qr-code.<ext> into the download directory
    Download {
        #[arg(value_enum)]
        format: FormatArg,
        /// Directory to save into (defaults to the user's download dir)
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Write the rendered image to the system clipboard
    Copy,
    /// Hand the rendered image to the platform share target
    Share,
    /// Print the capture as a data: URL
    DataUrl {
        #[arg(value_enum)]
        format: FormatArg,
    },
    /// Print the module grid to the terminal
    Preview,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = QrConfig::default();
    config.set_content(cli.content.as_str());
    config.set_size(cli.size);
    config.set_foreground(cli.foreground.parse::<Color>()?);
    config.set_background(cli.background.parse::<Color>()?);
    config.set_level(cli.level.parse::<EcLevel>()?);
    config.set_include_margin(!cli.no_margin);

    let platform = match &cli.command {
        Command::Download { out: Some(dir), .. } => NativePlatform::new().with_save_dir(dir),
        _ => NativePlatform::new(),
    };

    let studio = Studio::with_config(config, Arc::new(platform), Arc::new(LogFeedback))?;

    let outcome = match cli.command {
        Command::Download { format, .. } => Some(studio.download(format.into()).await),
        Command::Copy => Some(studio.copy().await),
        Command::Share => Some(studio.share().await),
        Command::DataUrl { format } => {
            let image = studio.capture(format.into()).await?;
            println!("{}", image.to_data_url());
            None
        }
        Command::Preview => {
            print_preview(&studio)?;
            None
        }
    };

    if let Some(outcome) = outcome {
        if cli.json {
            println!("{}", serde_json::to_string(&outcome)?);
        } else {
            match &outcome {
                Outcome::Success { action } => println!("{} succeeded", action),
                Outcome::Failure { action, kind } => eprintln!("{} failed: {:?}", action, kind),
            }
        }
        if !outcome.is_success() {
            std::process::exit(1);
        }
    }
    Ok(())
}

/// Render the module grid as double-width terminal blocks.
fn print_preview(studio: &Studio) -> qrstudio::Result<()> {
    let frame = studio.handle().snapshot()?;
    let dim = frame.grid_dimension();
    for y in 0..dim {
        let mut line = String::new();
        for x in 0..dim {
            let c = if frame.module_at(x, y) { '█' } else { ' ' };
            line.push(c);
            line.push(c);
        }
        println!("{}", line);
    }
    Ok(())
}
