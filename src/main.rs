//! # Inkboard Application Entry Point
//!
//! Fetches weather and the agenda, renders the board and writes the bitmap.
//! Provider failures never abort a render: each one is logged and replaced
//! with offline data, so a board is always produced.
//!
//! `--test-pattern` swaps the board for a panel validation card, and
//! `--upload` pushes whatever was written to a device on the network.

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use chrono::{Local, NaiveDateTime};
use clap::Parser;
use tokio::runtime::Runtime;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use inkboard_lib::canvas::PixelBuffer;
use inkboard_lib::composer::{Board, PageRenderer};
use inkboard_lib::config::{Config, CONFIG_FILE};
use inkboard_lib::{bmp, calendar, fallback, pattern, preview, upload, weather};

const DEFAULT_OUTPUT: &str = "inkboard.bmp";

#[derive(Parser, Debug)]
#[command(name = "inkboard", version, about = "Render a weather and agenda board for e-ink panels")]
struct Opts {
    /// Configuration file
    #[arg(long, default_value = CONFIG_FILE)]
    config: PathBuf,

    /// Write a default configuration to the --config path and exit
    #[arg(long)]
    init_config: bool,

    /// Where to write the rendered bitmap
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Print an ASCII preview instead of writing the bitmap
    #[arg(long)]
    stdout: bool,

    /// Skip the network and render with offline data
    #[arg(long)]
    offline: bool,

    /// Render the panel test card instead of the board
    #[arg(long)]
    test_pattern: bool,

    /// Device host to upload the bitmap to after writing it
    #[arg(long, value_name = "HOST")]
    upload: Option<String>,

    /// Device port; tries the usual ports when omitted
    #[arg(long, requires = "upload")]
    port: Option<u16>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let opts = Opts::parse();
    if opts.init_config {
        return Config::default()
            .save(&opts.config)
            .with_context(|| format!("writing {}", opts.config.display()));
    }

    let config = Config::load_from_path(&opts.config);
    let now = Local::now().naive_local();
    let (width, height) = config.display.canvas_size();
    let rt = Runtime::new()?;

    let buffer = if opts.test_pattern {
        info!(width, height, "rendering test pattern");
        pattern::test_pattern(width, height, now)
    } else {
        render_board(&rt, &config, now, opts.offline)
    };

    if opts.stdout {
        preview::draw_ascii(&buffer);
        return Ok(());
    }

    let bytes = bmp::encode_grayscale(&buffer);
    fs::write(&opts.output, &bytes)
        .with_context(|| format!("writing {}", opts.output.display()))?;
    info!(
        path = %opts.output.display(),
        bytes = bytes.len(),
        content_type = bmp::BMP_CONTENT_TYPE,
        "bitmap written"
    );

    if let Some(host) = &opts.upload {
        let file_name = opts
            .output
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or(DEFAULT_OUTPUT);
        let status = rt
            .block_on(upload::push(host, opts.port, file_name, bytes))
            .with_context(|| format!("uploading to {host}"))?;
        info!(%host, %status, "upload finished");
    }
    Ok(())
}

/// Fetch both providers concurrently, fall back where they fail and paint the board.
fn render_board(rt: &Runtime, config: &Config, now: NaiveDateTime, offline: bool) -> PixelBuffer {
    let (weather, days) = if offline {
        info!("offline mode, skipping providers");
        (
            fallback::unavailable_weather(),
            fallback::mock_agenda(now, config.calendar.days),
        )
    } else {
        rt.block_on(async {
            let (weather, days) = tokio::join!(
                weather::fetch(&config.weather),
                calendar::fetch(&config.calendar)
            );
            let weather = weather.unwrap_or_else(|error| {
                warn!(%error, "weather fetch failed, showing unavailable");
                fallback::unavailable_weather()
            });
            let days = days.unwrap_or_else(|error| {
                warn!(%error, "calendar fetch failed, using mock agenda");
                fallback::mock_agenda(now, config.calendar.days)
            });
            (weather, days)
        })
    };

    let (width, height) = config.display.canvas_size();
    let board = Board {
        weather: &weather,
        days: &days,
        location: &config.weather.location,
        now,
    };
    let composition = PageRenderer::new(width, height).render(&board);
    if let Some(remaining) = composition.agenda.overflow() {
        info!(remaining, "agenda truncated");
    }
    composition.buffer
}
