use analog_clock::logging::{init_logging, LoggingConfig};
use analog_clock::{AnalogClock, ClockConfig};
use clap::Parser;
use log::info;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(author, version, about = "Analog clock face driven by an elapsed-seconds counter")]
struct Args {
    /// Side of the square window in logical pixels
    #[arg(long, default_value_t = 600)]
    size: u32,
    /// Window title
    #[arg(long, default_value = "Analog Clock")]
    title: String,
    /// Font file for the numerals (TTF/OTF). Common system fonts are tried when omitted.
    #[arg(long)]
    font: Option<PathBuf>,
    /// Seconds already on the counter when the clock starts
    #[arg(long, default_value_t = 0)]
    start: u64,
    /// Milliseconds between ticks
    #[arg(long, default_value_t = 1000, value_parser = clap::value_parser!(u64).range(1..))]
    interval_ms: u64,
    /// Log filter in env_logger syntax; overrides RUST_LOG
    #[arg(long)]
    log: Option<String>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    init_logging(LoggingConfig {
        env_filter: args.log.clone(),
        ..LoggingConfig::default()
    });

    let config = ClockConfig::builder()
        .title(args.title)
        .window_size(args.size)
        .tick_interval(Duration::from_millis(args.interval_ms))
        .maybe_font_path(args.font)
        .build();

    info!("starting clock at {}s", args.start);
    let mut clock = AnalogClock::new(config).starting_at(args.start);
    clock.show()?;
    Ok(())
}
