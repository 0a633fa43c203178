//! Replay a recorded facial landmark stream and count expression events.

use anyhow::{Context, Result};
use clap::Parser;
use facial_event_detection::{
    app::{AppConfig, OutputFormat, ReplayApp},
    config::Config,
    overlay::parse_surface_size,
    report,
};
use log::info;
use std::{
    fs::File,
    io::{self, BufReader, BufWriter},
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON Lines landmark stream to replay ('-' for stdin)
    #[arg(short, long, default_value = "-")]
    input: String,

    /// Path to configuration file (YAML format)
    #[arg(short = 'C', long)]
    config: Option<String>,

    /// Per-frame output format (text, json)
    #[arg(short, long, default_value = "text")]
    format: String,

    /// Include debug overlay geometry for a WIDTHxHEIGHT surface (json format only)
    #[arg(long)]
    overlay: Option<String>,

    /// Only print the final summary
    #[arg(short, long)]
    quiet: bool,

    /// Print the example configuration file and exit
    #[arg(long)]
    print_config: bool,

    /// Enable debug output
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logger
    if args.debug {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("debug"));
    } else {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    }

    if args.print_config {
        print!("{}", facial_event_detection::config::EXAMPLE_CONFIG);
        return Ok(());
    }

    info!("Facial Event Detection - replay");

    let detection = if let Some(config_path) = &args.config {
        info!("Loading configuration from: {}", config_path);
        Config::from_file(config_path).with_context(|| format!("loading {config_path}"))?
    } else {
        Config::default()
    };

    let format = match args.format.as_str() {
        "json" => OutputFormat::Json,
        "text" => OutputFormat::Text,
        other => {
            log::warn!("Unknown output format '{}', using text", other);
            OutputFormat::Text
        }
    };

    let overlay = args.overlay.as_deref().map(parse_surface_size).transpose()?;
    if overlay.is_some() && format != OutputFormat::Json {
        log::warn!("--overlay only applies to json output");
    }

    let config = AppConfig {
        format,
        overlay,
        quiet: args.quiet,
        detection,
    };

    let mut app = ReplayApp::new(config)?;
    let stdout = io::stdout();
    let writer = BufWriter::new(stdout.lock());

    let summary = if args.input == "-" {
        app.run(io::stdin().lock(), writer)?
    } else {
        let file = File::open(&args.input).with_context(|| format!("opening {}", args.input))?;
        app.run(BufReader::new(file), writer)?
    };

    println!(
        "{} frames ({} without a face), {} commands | {}",
        summary.frames,
        summary.faceless_frames,
        summary.commands,
        report::counts_line(&summary.counts)
    );

    Ok(())
}
