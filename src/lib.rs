pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod ui;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliArgs;
pub use config::{toml_config::KioskConfig, DisplaySettings};

pub use adapters::{HttpCatalogSource, StaticCatalogSource};
pub use crate::core::{kiosk::KioskEngine, scheduler::DisplayScheduler};
pub use ui::{console::ConsoleRenderer, session::KioskSession};
pub use utils::error::{KioskError, Result};
