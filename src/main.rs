use clap::Parser;
use retro_chronos::ui::{runner, ClockApp, Theme};
use retro_chronos::utils::error::{ChronosError, ErrorSeverity};
use retro_chronos::utils::{logger, validation::Validate};
use retro_chronos::{CliConfig, FixedClock, GeminiFetcher, SystemClock, TimeSource, Tuner};

async fn app(cli: CliConfig) -> Result<(), ChronosError> {
    let config = cli.resolve()?;

    // 初始化日誌：互動模式只寫檔案，避免破壞畫面
    if cli.once {
        logger::init_cli_logger(config.verbose());
    } else if let Some(path) = &config.logging.file {
        logger::init_file_logger(path, config.verbose())?;
    }

    tracing::info!("Starting retro-chronos");
    tracing::debug!("Resolved config: {:?}", config.display);

    // 驗證配置
    config.validate()?;

    let use_24_hour = config.display.hour_format_24;
    let fetcher = GeminiFetcher::from_config(&config)?;

    if cli.once {
        let tuner = cli.tune_in.then(|| Tuner::new(fetcher));
        return match cli.at {
            Some(instant) => {
                let time_source = TimeSource::new(FixedClock(instant));
                runner::run_once(&time_source, tuner.as_ref(), use_24_hour).await
            }
            None => {
                let time_source = TimeSource::new(SystemClock);
                runner::run_once(&time_source, tuner.as_ref(), use_24_hour).await
            }
        };
    }

    let time_source = TimeSource::new(SystemClock);
    let app = ClockApp::new(
        time_source.snapshot(use_24_hour),
        use_24_hour,
        Theme::from_identifier(&config.display.theme),
        config.display.fullscreen,
    );

    runner::run(time_source, Tuner::new(fetcher), app).await
}

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    if let Err(e) = app(cli).await {
        tracing::error!(
            "❌ retro-chronos failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

        // 根據錯誤嚴重程度決定退出碼
        let exit_code = match e.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };

        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }
}
