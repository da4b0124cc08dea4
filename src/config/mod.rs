use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info};

use crate::{
    calendar::{AnchorSet, WeekPartitioner},
    errors::SubTrackerError,
    utils::{app_data_dir, ensure_dir, staging_path, write_atomic},
};

const CONFIG_FILE: &str = "config.json";

/// Horizons offered by the planning view.
pub const SUPPORTED_HORIZONS: [u32; 4] = [4, 8, 12, 16];

/// Longest plan accepted, ten years of weeks.
pub const MAX_HORIZON_WEEKS: u32 = 520;

/// Longest alert or renewal window, ten years of days.
pub const MAX_WINDOW_DAYS: i64 = 3650;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub locale: String,
    pub currency: String,
    pub default_horizon_weeks: u32,
    pub week_anchors: AnchorSet,
    pub price_alert_days: i64,
    pub renewal_window_days: i64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: "en-US".into(),
            currency: "USD".into(),
            default_horizon_weeks: 8,
            week_anchors: AnchorSet::default(),
            price_alert_days: 30,
            renewal_window_days: 7,
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), SubTrackerError> {
        if !(1..=MAX_HORIZON_WEEKS).contains(&self.default_horizon_weeks) {
            return Err(SubTrackerError::Config(format!(
                "default_horizon_weeks must be between 1 and {MAX_HORIZON_WEEKS}"
            )));
        }
        for (name, days) in [
            ("price_alert_days", self.price_alert_days),
            ("renewal_window_days", self.renewal_window_days),
        ] {
            if !(0..=MAX_WINDOW_DAYS).contains(&days) {
                return Err(SubTrackerError::Config(format!(
                    "{name} must be between 0 and {MAX_WINDOW_DAYS} (got {days})"
                )));
            }
        }
        Ok(())
    }

    pub fn partitioner(&self) -> WeekPartitioner {
        WeekPartitioner::new(self.week_anchors.clone())
    }
}

pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self, SubTrackerError> {
        Self::with_base_dir(app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self, SubTrackerError> {
        ensure_dir(&base)?;
        Ok(Self {
            path: base.join(CONFIG_FILE),
        })
    }

    /// Reads the stored configuration, falling back to defaults when none exists.
    pub fn load(&self) -> Result<Config, SubTrackerError> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no config file; using defaults");
            return Ok(Config::default());
        }
        let data = fs::read_to_string(&self.path)?;
        let config: Config = serde_json::from_str(&data)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, config: &Config) -> Result<(), SubTrackerError> {
        config.validate()?;
        if let Some(parent) = self.path.parent() {
            ensure_dir(parent)?;
        }
        let json = serde_json::to_string_pretty(config)?;
        let tmp = staging_path(&self.path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        info!(path = %self.path.display(), "saved configuration");
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
