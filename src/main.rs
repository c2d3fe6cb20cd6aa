use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use states_view::window::{self, WindowOptions};
use states_view::{Dataset, StatesView, StyleAttributes, ViewCommand};

/// Animated donut chart of a total and its parts.
#[derive(Parser, Debug)]
#[command(name = "states-view", version, about)]
struct Cli {
    /// The whole the parts are measured against
    #[arg(long, default_value_t = 4000.0)]
    total: f64,

    /// Comma separated parts, drawn clockwise from 12 o'clock
    #[arg(long, value_delimiter = ',', default_values_t = vec![1000.0, 1000.0])]
    parts: Vec<f64>,

    /// Milliseconds to wait before handing the data to the view
    #[arg(long, default_value_t = 300)]
    delay_ms: u64,

    /// TOML style attributes (line_width, font_size, colors, circle_color, animation)
    #[arg(long, value_name = "FILE")]
    style: Option<PathBuf>,

    /// Override the style file's animation: 0 = synchronized, 1 = staggered
    #[arg(long)]
    animation: Option<i64>,

    /// Seed for colors left unset in the style
    #[arg(long)]
    seed: Option<u64>,

    /// Font used for the percentage label
    #[arg(long, value_name = "FILE")]
    font: Option<PathBuf>,

    #[arg(long, default_value_t = 300)]
    width: u32,

    #[arg(long, default_value_t = 300)]
    height: u32,

    #[arg(long, default_value = "States")]
    title: String,
}

fn main() -> Result<()> {
    // RUST_LOG controls verbosity, e.g. RUST_LOG=states_view=trace
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let mut attributes = match &cli.style {
        Some(path) => StyleAttributes::load(path)?,
        None => StyleAttributes::default(),
    };
    if cli.animation.is_some() {
        attributes.animation = cli.animation;
    }
    // Fail on a bad animation value before any window exists.
    attributes
        .resolve(1.0, &mut StdRng::seed_from_u64(0))
        .context("invalid style")?;

    let dataset = Dataset::new(cli.total, cli.parts.clone()).context("invalid data")?;

    let (sender, receiver) = mpsc::channel();
    let delay = Duration::from_millis(cli.delay_ms);
    thread::spawn(move || {
        thread::sleep(delay);
        tracing::info!(
            total = ?dataset.total(),
            parts = dataset.parts().len(),
            "sending dataset"
        );
        if sender.send(ViewCommand::SetData(dataset)).is_err() {
            tracing::debug!("view closed before data was sent");
        }
    });

    let options = WindowOptions::builder()
        .title(cli.title.clone())
        .width(cli.width)
        .height(cli.height)
        .maybe_font_path(cli.font.clone())
        .build();

    let seed = cli.seed;
    window::run(options, Some(receiver), move |density| {
        let style = match seed {
            Some(seed) => attributes.resolve(density, &mut StdRng::seed_from_u64(seed))?,
            None => attributes.resolve(density, &mut rand::rng())?,
        };
        Ok(StatesView::new(style)?)
    })?;

    Ok(())
}
