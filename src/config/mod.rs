#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::core::scheduler::DEFAULT_REFRESH_PERIOD;
use crate::ui::carousel::{DEFAULT_FADE_DURATION, DEFAULT_ROTATION_INTERVAL};
use std::time::Duration;

pub const DEFAULT_BRAND: &str = "Randy's Donuts";

/// 執行期使用的顯示設定
#[derive(Debug, Clone, PartialEq)]
pub struct DisplaySettings {
    pub brand: String,
    pub refresh_period: Duration,
    pub carousel_interval: Duration,
    pub fade_duration: Duration,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            brand: DEFAULT_BRAND.to_string(),
            refresh_period: DEFAULT_REFRESH_PERIOD,
            carousel_interval: DEFAULT_ROTATION_INTERVAL,
            fade_duration: DEFAULT_FADE_DURATION,
        }
    }
}
