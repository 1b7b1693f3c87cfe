use anyhow::{Context, Result, ensure};
use serde_valid::Validate;
use std::{env, sync::OnceLock, time::Duration};

use crate::{frame_client::PowerActionRequest, services::power_action::DEFAULT_COUNTDOWN_SECS};

const DEFAULT_FRAME_URL: &str = "http://127.0.0.1:5000";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 5;

/// Application configuration loaded and validated at startup
#[derive(Clone, Debug)]
pub struct AppConfig {
    /// Frame device connection configuration
    pub device: DeviceConfig,

    /// Power action configuration
    pub power: PowerConfig,
}

#[derive(Clone, Debug)]
pub struct DeviceConfig {
    pub base_url: String,
    pub request_timeout: Duration,
}

#[derive(Clone, Debug)]
pub struct PowerConfig {
    /// Countdown used when the user does not give one
    pub default_countdown_secs: u32,
}

impl AppConfig {
    /// Get or load the application configuration
    ///
    /// On first call, it loads and validates all configuration from
    /// environment variables. Subsequent calls return the cached instance.
    pub fn get() -> Result<&'static Self> {
        static APP_CONFIG: OnceLock<AppConfig> = OnceLock::new();

        if let Some(config) = APP_CONFIG.get() {
            return Ok(config);
        }
        let config = Self::load_internal()?;
        Ok(APP_CONFIG.get_or_init(|| config))
    }

    fn load_internal() -> Result<Self> {
        let device = DeviceConfig::load(
            env::var("FRAME_URL").ok(),
            env::var("FRAME_REQUEST_TIMEOUT_SECS").ok(),
        )?;
        let power = PowerConfig::load(env::var("FRAME_DEFAULT_COUNTDOWN_SECS").ok())?;

        Ok(Self { device, power })
    }
}

impl DeviceConfig {
    fn load(url: Option<String>, timeout_secs: Option<String>) -> Result<Self> {
        let base_url = url.unwrap_or_else(|| DEFAULT_FRAME_URL.to_string());
        ensure!(
            base_url.starts_with("http://") || base_url.starts_with("https://"),
            "failed to parse FRAME_URL: expected http:// or https:// url, got {base_url}"
        );

        let timeout_secs = match timeout_secs {
            Some(value) => value
                .parse::<u64>()
                .context("failed to parse FRAME_REQUEST_TIMEOUT_SECS: invalid format")?,
            None => DEFAULT_REQUEST_TIMEOUT_SECS,
        };
        ensure!(
            timeout_secs > 0,
            "failed to parse FRAME_REQUEST_TIMEOUT_SECS: must be positive"
        );

        Ok(Self {
            base_url,
            request_timeout: Duration::from_secs(timeout_secs),
        })
    }
}

impl PowerConfig {
    fn load(countdown_secs: Option<String>) -> Result<Self> {
        let default_countdown_secs = match countdown_secs {
            Some(value) => value
                .parse::<u32>()
                .context("failed to parse FRAME_DEFAULT_COUNTDOWN_SECS: invalid format")?,
            None => DEFAULT_COUNTDOWN_SECS,
        };

        PowerActionRequest {
            countdown: default_countdown_secs,
        }
        .validate()
        .context("failed to validate FRAME_DEFAULT_COUNTDOWN_SECS")?;

        Ok(Self {
            default_countdown_secs,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod device {
        use super::*;

        #[test]
        fn defaults() {
            let config = DeviceConfig::load(None, None).unwrap();
            assert_eq!(config.base_url, "http://127.0.0.1:5000");
            assert_eq!(config.request_timeout, Duration::from_secs(5));
        }

        #[test]
        fn overrides() {
            let config = DeviceConfig::load(
                Some("https://frame.local:8443".to_string()),
                Some("2".to_string()),
            )
            .unwrap();
            assert_eq!(config.base_url, "https://frame.local:8443");
            assert_eq!(config.request_timeout, Duration::from_secs(2));
        }

        #[test]
        fn rejects_url_without_scheme() {
            let err = DeviceConfig::load(Some("frame.local".to_string()), None).unwrap_err();
            assert!(err.to_string().contains("FRAME_URL"));
        }

        #[test]
        fn rejects_bad_timeout() {
            assert!(DeviceConfig::load(None, Some("soon".to_string())).is_err());
            assert!(DeviceConfig::load(None, Some("0".to_string())).is_err());
        }
    }

    mod power {
        use super::*;

        #[test]
        fn default_countdown() {
            let config = PowerConfig::load(None).unwrap();
            assert_eq!(config.default_countdown_secs, 10);
        }

        #[test]
        fn countdown_out_of_range_is_rejected() {
            assert!(PowerConfig::load(Some("0".to_string())).is_err());
            assert!(PowerConfig::load(Some("3601".to_string())).is_err());
            assert_eq!(
                PowerConfig::load(Some("60".to_string()))
                    .unwrap()
                    .default_countdown_secs,
                60
            );
        }
    }
}
