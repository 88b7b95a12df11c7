//! Tracing setup for the kiosk binary. `KIOSK_LOG` takes precedence over
//! `RUST_LOG`; without either, the kiosk logs its own events and keeps the
//! HTTP stack quiet.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub const LOG_ENV_VAR: &str = "KIOSK_LOG";

const DEFAULT_DIRECTIVES: &str = "warn,kiosk_display=info";
const VERBOSE_DIRECTIVES: &str = "info,kiosk_display=debug,reqwest=info,hyper=warn";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// 本機終端機
    Compact,
    /// 無螢幕部署 (journald / 集中式日誌)
    Json,
}

impl LogFormat {
    pub fn from_flags(json_logs: bool) -> Self {
        if json_logs {
            LogFormat::Json
        } else {
            LogFormat::Compact
        }
    }
}

pub fn default_directives(verbose: bool) -> &'static str {
    if verbose {
        VERBOSE_DIRECTIVES
    } else {
        DEFAULT_DIRECTIVES
    }
}

/// 環境變數的設定無法解析時退回預設值
fn build_filter(env_override: Option<String>, verbose: bool) -> EnvFilter {
    env_override
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(default_directives(verbose)))
}

fn env_override() -> Option<String> {
    std::env::var(LOG_ENV_VAR)
        .or_else(|_| std::env::var(EnvFilter::DEFAULT_ENV))
        .ok()
        .filter(|directives| !directives.trim().is_empty())
}

pub fn init_logger(format: LogFormat, verbose: bool) {
    let filter = build_filter(env_override(), verbose);
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Compact => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(verbose)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .init(),
        // 集中式日誌需要來源模組才能過濾
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_writer(std::io::stderr)
                    .json()
                    .with_current_span(false)
                    .with_span_list(false),
            )
            .init(),
    }
}
