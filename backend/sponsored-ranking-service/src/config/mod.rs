use crate::error::{RankingServiceError, Result};
use crate::services::rotation::{RankingStrategy, DEFAULT_EPOCH_SECS};
use chrono::FixedOffset;
use serde::Deserialize;

/// How the service picks a rotation seed when a request does not carry one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeedMode {
    /// Local calendar day; the lead changes once per day.
    #[default]
    Daily,
    /// Fixed-length epochs (`ROTATION_EPOCH_SECONDS`, half an hour by default).
    Epoch,
    /// Process-wide counter; the lead changes on every request.
    PerRequest,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_http_host")]
    pub http_host: String,
    #[serde(default = "default_http_port")]
    pub http_port: u16,
    #[serde(default = "default_service_name")]
    pub service_name: String,
    #[serde(default)]
    pub default_strategy: RankingStrategy,
    #[serde(default)]
    pub seed_mode: SeedMode,
    #[serde(default)]
    pub rotation_utc_offset_minutes: i32,
    #[serde(default = "default_rotation_epoch_seconds")]
    pub rotation_epoch_seconds: u64,
    #[serde(default = "default_max_items")]
    pub max_items: usize,
    #[serde(default = "default_max_exposure_renders")]
    pub max_exposure_renders: u64,
}

fn default_http_host() -> String {
    "0.0.0.0".to_string()
}

fn default_http_port() -> u16 {
    8020
}

fn default_service_name() -> String {
    "sponsored-ranking-service".to_string()
}

fn default_rotation_epoch_seconds() -> u64 {
    DEFAULT_EPOCH_SECS
}

fn default_max_items() -> usize {
    500
}

fn default_max_exposure_renders() -> u64 {
    366
}

impl Default for Config {
    fn default() -> Self {
        Self {
            http_host: default_http_host(),
            http_port: default_http_port(),
            service_name: default_service_name(),
            default_strategy: RankingStrategy::default(),
            seed_mode: SeedMode::default(),
            rotation_utc_offset_minutes: 0,
            rotation_epoch_seconds: default_rotation_epoch_seconds(),
            max_items: default_max_items(),
            max_exposure_renders: default_max_exposure_renders(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();

        let config: Config = envy::from_env()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.rotation_offset().is_none() {
            return Err(RankingServiceError::Config(format!(
                "ROTATION_UTC_OFFSET_MINUTES out of range: {}",
                self.rotation_utc_offset_minutes
            )));
        }
        if self.rotation_epoch_seconds == 0 {
            return Err(RankingServiceError::Config(
                "ROTATION_EPOCH_SECONDS must be greater than 0".to_string(),
            ));
        }
        if self.max_items == 0 {
            return Err(RankingServiceError::Config(
                "MAX_ITEMS must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Offset used to decide which calendar day a request falls on.
    pub fn rotation_offset(&self) -> Option<FixedOffset> {
        if self.rotation_utc_offset_minutes.unsigned_abs() >= 24 * 60 {
            return None;
        }
        FixedOffset::east_opt(self.rotation_utc_offset_minutes * 60)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.http_host, self.http_port)
    }
}
