use clap::Parser;
use retro_chronos::core::{ConfigProvider, TransmissionFetcher};
use retro_chronos::utils::error::Result;
use retro_chronos::utils::{logger, validation::Validate};
use retro_chronos::{GeminiFetcher, SystemClock, TimeSource, TomlConfig};

#[derive(Parser)]
#[command(name = "tune-in")]
#[command(about = "Fetch a single multiverse transmission and print it as JSON")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long)]
    config: Option<String>,

    /// Time label to broadcast for (default: the current time)
    #[arg(long)]
    label: Option<String>,

    /// Use 24-hour time for the default label
    #[arg(long = "24h")]
    twenty_four_hour: bool,

    /// Fail instead of printing the SIGNAL LOST payload
    #[arg(long)]
    strict: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    logger::init_cli_logger(args.verbose);

    let mut config = match &args.config {
        Some(path) => TomlConfig::from_file(path)?,
        None => TomlConfig::default(),
    };
    if config.transmission.api_key.is_none() {
        config.transmission.api_key = std::env::var("API_KEY").ok();
    }
    config.validate()?;

    let label = args.label.unwrap_or_else(|| {
        let use_24_hour = args.twenty_four_hour || config.display.hour_format_24;
        TimeSource::new(SystemClock).snapshot(use_24_hour).time_label()
    });

    tracing::info!("📻 Tuning in at {} via {}", label, config.model());

    let fetcher = GeminiFetcher::from_config(&config)?;
    let result = if args.strict {
        fetcher.try_request(&label).await?
    } else {
        fetcher.request_transmission(&label).await
    };

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
