use crate::config::{DisplaySettings, DEFAULT_BRAND};
use crate::utils::error::{KioskError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_range, validate_required_field, validate_url, Validate,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

const DEFAULT_TIMEOUT_SECONDS: u64 = 10;
const DEFAULT_REFRESH_MINUTES: u64 = 15;
const DEFAULT_CAROUSEL_SECONDS: u64 = 10;
const DEFAULT_FADE_MILLIS: u64 = 600;
const MAX_TIMEOUT_SECONDS: u64 = 300;
const MAX_REFRESH_MINUTES: u64 = 24 * 60;
const MAX_CAROUSEL_SECONDS: u64 = 60 * 60;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KioskConfig {
    pub kiosk: Option<KioskSection>,
    /// `--demo` 模式可省略
    pub sources: Option<SourcesConfig>,
    pub schedule: Option<ScheduleConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KioskSection {
    pub brand: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourcesConfig {
    pub donuts_url: String,
    pub rolls_url: String,
    pub pricing_url: String,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScheduleConfig {
    pub refresh_minutes: Option<u64>,
    pub carousel_interval_seconds: Option<u64>,
    pub fade_millis: Option<u64>,
}

impl KioskConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(KioskError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| KioskError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${KIOSK_API_HOST})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| KioskError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn brand(&self) -> &str {
        self.kiosk
            .as_ref()
            .and_then(|k| k.brand.as_deref())
            .unwrap_or(DEFAULT_BRAND)
    }

    pub fn sources(&self) -> Result<&SourcesConfig> {
        validate_required_field("sources", &self.sources)
    }

    pub fn request_timeout(&self) -> Duration {
        let seconds = self
            .sources
            .as_ref()
            .and_then(|s| s.timeout_seconds)
            .unwrap_or(DEFAULT_TIMEOUT_SECONDS);
        Duration::from_secs(seconds)
    }

    fn schedule(&self) -> ScheduleConfig {
        self.schedule.clone().unwrap_or_default()
    }

    pub fn refresh_minutes(&self) -> u64 {
        self.schedule().refresh_minutes.unwrap_or(DEFAULT_REFRESH_MINUTES)
    }

    pub fn carousel_interval_seconds(&self) -> u64 {
        self.schedule()
            .carousel_interval_seconds
            .unwrap_or(DEFAULT_CAROUSEL_SECONDS)
    }

    pub fn fade_millis(&self) -> u64 {
        self.schedule().fade_millis.unwrap_or(DEFAULT_FADE_MILLIS)
    }

    pub fn display_settings(&self) -> DisplaySettings {
        DisplaySettings {
            brand: self.brand().to_string(),
            refresh_period: Duration::from_secs(self.refresh_minutes().saturating_mul(60)),
            carousel_interval: Duration::from_secs(self.carousel_interval_seconds()),
            fade_duration: Duration::from_millis(self.fade_millis()),
        }
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        if let Some(sources) = &self.sources {
            validate_url("sources.donuts_url", &sources.donuts_url)?;
            validate_url("sources.rolls_url", &sources.rolls_url)?;
            validate_url("sources.pricing_url", &sources.pricing_url)?;

            if let Some(timeout) = sources.timeout_seconds {
                validate_range("sources.timeout_seconds", timeout, 1, MAX_TIMEOUT_SECONDS)?;
            }
        }

        validate_non_empty_string("kiosk.brand", self.brand())?;
        validate_range(
            "schedule.refresh_minutes",
            self.refresh_minutes(),
            1,
            MAX_REFRESH_MINUTES,
        )?;
        validate_range(
            "schedule.carousel_interval_seconds",
            self.carousel_interval_seconds(),
            1,
            MAX_CAROUSEL_SECONDS,
        )?;

        // 淡出必須在下一次輪播前結束
        let interval_millis = self.carousel_interval_seconds().saturating_mul(1000);
        validate_range(
            "schedule.fade_millis",
            self.fade_millis(),
            0,
            interval_millis.saturating_sub(1),
        )?;

        Ok(())
    }
}

impl Validate for KioskConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const BASIC: &str = r#"
[sources]
donuts_url = "https://api.example.com/donuts"
rolls_url = "https://api.example.com/rolls"
pricing_url = "https://api.example.com/pricing-sheets"
"#;

    #[test]
    fn test_parse_basic_config_uses_defaults() {
        let config = KioskConfig::from_toml_str(BASIC).unwrap();

        assert!(config.validate().is_ok());
        assert_eq!(config.brand(), "Randy's Donuts");
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
        assert_eq!(config.display_settings(), DisplaySettings::default());
    }

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[kiosk]
brand = "Corner Bakery"

[sources]
donuts_url = "http://localhost:8080/donuts"
rolls_url = "http://localhost:8080/rolls"
pricing_url = "http://localhost:8080/pricing"
timeout_seconds = 3

[schedule]
refresh_minutes = 5
carousel_interval_seconds = 8
fade_millis = 400
"#;
        let config = KioskConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_ok());

        let settings = config.display_settings();
        assert_eq!(settings.brand, "Corner Bakery");
        assert_eq!(settings.refresh_period, Duration::from_secs(300));
        assert_eq!(settings.carousel_interval, Duration::from_secs(8));
        assert_eq!(settings.fade_duration, Duration::from_millis(400));
        assert_eq!(config.request_timeout(), Duration::from_secs(3));
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("KIOSK_TEST_API_HOST", "https://test.api.com");

        let toml_content = r#"
[sources]
donuts_url = "${KIOSK_TEST_API_HOST}/donuts"
rolls_url = "${KIOSK_TEST_API_HOST}/rolls"
pricing_url = "${KIOSK_TEST_API_HOST}/pricing"
"#;

        let config = KioskConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(
            config.sources().unwrap().donuts_url,
            "https://test.api.com/donuts"
        );

        std::env::remove_var("KIOSK_TEST_API_HOST");
    }

    #[test]
    fn test_config_validation() {
        let invalid_url = BASIC.replace("https://api.example.com/rolls", "invalid-url");
        let config = KioskConfig::from_toml_str(&invalid_url).unwrap();
        assert!(config.validate().is_err());

        let zero_refresh = format!("{}\n[schedule]\nrefresh_minutes = 0\n", BASIC);
        let config = KioskConfig::from_toml_str(&zero_refresh).unwrap();
        assert!(config.validate().is_err());

        let long_fade = format!(
            "{}\n[schedule]\ncarousel_interval_seconds = 1\nfade_millis = 1000\n",
            BASIC
        );
        let config = KioskConfig::from_toml_str(&long_fade).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_oversized_schedule_values_are_rejected() {
        let huge_refresh = format!(
            "{}\n[schedule]\nrefresh_minutes = 9223372036854775807\n",
            BASIC
        );
        let config = KioskConfig::from_toml_str(&huge_refresh).unwrap();
        assert!(matches!(
            config.validate(),
            Err(KioskError::InvalidConfigValueError { ref field, .. }) if field == "schedule.refresh_minutes"
        ));
        // 未驗證也不會溢位
        assert_eq!(config.display_settings().refresh_period, Duration::from_secs(u64::MAX));

        let huge_carousel = format!(
            "{}\n[schedule]\ncarousel_interval_seconds = 99999999999\n",
            BASIC
        );
        let config = KioskConfig::from_toml_str(&huge_carousel).unwrap();
        assert!(matches!(
            config.validate(),
            Err(KioskError::InvalidConfigValueError { ref field, .. }) if field == "schedule.carousel_interval_seconds"
        ));

        let huge_timeout = BASIC.replace(
            "pricing_url = \"https://api.example.com/pricing-sheets\"",
            "pricing_url = \"https://api.example.com/pricing-sheets\"\ntimeout_seconds = 86400",
        );
        let config = KioskConfig::from_toml_str(&huge_timeout).unwrap();
        assert!(config.validate().is_err());

        let upper_bounds = format!(
            "{}\n[schedule]\nrefresh_minutes = 1440\ncarousel_interval_seconds = 3600\n",
            BASIC
        );
        let config = KioskConfig::from_toml_str(&upper_bounds).unwrap();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_sources_only_fails_when_required() {
        let config = KioskConfig::from_toml_str("[kiosk]\nbrand = \"Demo\"\n").unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.brand(), "Demo");
        assert!(matches!(
            config.sources(),
            Err(KioskError::MissingConfigError { .. })
        ));
    }

    #[test]
    fn test_malformed_toml_is_config_error() {
        let result = KioskConfig::from_toml_str("[sources\ndonuts_url = ");
        assert!(matches!(result, Err(KioskError::ConfigError { .. })));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(BASIC.as_bytes()).unwrap();

        let config = KioskConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(
            config.sources().unwrap().pricing_url,
            "https://api.example.com/pricing-sheets"
        );
    }
}
