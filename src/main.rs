use anyhow::Context;
use clap::Parser;
use kiosk_display::core::CatalogSource;
use kiosk_display::ui::view::ViewState;
use kiosk_display::ui::Renderer;
use kiosk_display::utils::error::ErrorSeverity;
use kiosk_display::utils::logger::{self, LogFormat};
use kiosk_display::utils::validation::Validate;
use kiosk_display::{
    CliArgs, ConsoleRenderer, DisplaySettings, HttpCatalogSource, KioskConfig, KioskEngine,
    KioskError, KioskSession, StaticCatalogSource,
};
use std::path::Path;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    // 初始化日誌
    logger::init_logger(LogFormat::from_flags(args.json_logs), args.verbose);

    tracing::info!("🚀 Starting kiosk display");
    if args.verbose {
        tracing::debug!("CLI args: {:?}", args);
    }

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => exit_with(e),
    };

    let settings = config
        .as_ref()
        .map(KioskConfig::display_settings)
        .unwrap_or_default();

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No data will be fetched");
        display_summary(config.as_ref(), &settings, &args);
        return Ok(());
    }

    if args.demo {
        tracing::info!("Using built-in sample catalog");
        return run_kiosk(StaticCatalogSource::sample(), settings, args.once).await;
    }

    let Some(config) = config else {
        exit_with(KioskError::MissingConfigError {
            field: "sources".to_string(),
        });
    };
    let sources = match config.sources() {
        Ok(sources) => sources,
        Err(e) => exit_with(e),
    };
    let source = HttpCatalogSource::new(
        &sources.donuts_url,
        &sources.rolls_url,
        &sources.pricing_url,
        config.request_timeout(),
    )
    .context("Failed to build HTTP client")?;

    run_kiosk(source, settings, args.once).await
}

/// `--demo` 時設定檔可以不存在
fn load_config(args: &CliArgs) -> kiosk_display::Result<Option<KioskConfig>> {
    if args.demo && !Path::new(&args.config).exists() {
        tracing::info!("📁 No config file at {}, using defaults", args.config);
        return Ok(None);
    }

    tracing::info!("📁 Loading configuration from: {}", args.config);
    let config = KioskConfig::from_file(&args.config)?;
    config.validate()?;
    tracing::info!("✅ Configuration loaded and validated successfully");
    Ok(Some(config))
}

async fn run_kiosk<S: CatalogSource + 'static>(
    source: S,
    settings: DisplaySettings,
    once: bool,
) -> anyhow::Result<()> {
    let engine = Arc::new(KioskEngine::new(source));
    let mut renderer = ConsoleRenderer::new(std::io::stdout());

    if once {
        let request = engine.refresh().await;
        let view = ViewState::from_request(&settings.brand, &request);
        renderer.render(&view).context("Failed to render kiosk view")?;
        return Ok(());
    }

    let session = KioskSession::new(engine, renderer, settings);
    session
        .run(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("Failed to listen for Ctrl-C: {}", e);
            }
        })
        .await
        .context("Kiosk session failed")?;

    tracing::info!("👋 Kiosk display stopped");
    Ok(())
}

fn display_summary(config: Option<&KioskConfig>, settings: &DisplaySettings, args: &CliArgs) {
    println!("📋 Kiosk Configuration Summary:");
    println!("   Config file: {}", args.config);
    println!("   Brand: {}", settings.brand);
    match config.and_then(|c| c.sources.as_ref()) {
        Some(sources) => {
            println!("   Donuts: {}", sources.donuts_url);
            println!("   Rolls: {}", sources.rolls_url);
            println!("   Pricing: {}", sources.pricing_url);
        }
        None => println!("   Sources: built-in sample catalog"),
    }
    println!("   Refresh every: {:?}", settings.refresh_period);
    println!(
        "   Specials rotate every: {:?} (fade {:?})",
        settings.carousel_interval, settings.fade_duration
    );
}

fn exit_with(e: KioskError) -> ! {
    tracing::error!(
        "❌ Kiosk startup failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}
