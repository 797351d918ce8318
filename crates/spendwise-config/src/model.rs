use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use spendwise_core::{settings, AggregationSettings};

use crate::ConfigError;

const DEFAULT_DIR_NAME: &str = ".spendwise";
const HOME_ENV: &str = "SPENDWISE_HOME";

/// Keys accepted by [`Config::set`] and [`Config::get`].
pub const CONFIG_KEYS: [&str; 7] = [
    "locale",
    "currency",
    "ui_color_enabled",
    "trend_months",
    "bill_horizon_days",
    "due_soon_days",
    "dashboard_bill_limit",
];

/// Stores user preferences for formatting and for the dashboard/report views.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub locale: String,
    pub currency: String,
    #[serde(default = "Config::default_ui_color_enabled")]
    pub ui_color_enabled: bool,
    #[serde(default = "Config::default_trend_months")]
    pub trend_months: u32,
    #[serde(default = "Config::default_bill_horizon_days")]
    pub bill_horizon_days: u32,
    #[serde(default = "Config::default_due_soon_days")]
    pub due_soon_days: u32,
    #[serde(default = "Config::default_dashboard_bill_limit")]
    pub dashboard_bill_limit: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Snapshot file opened by the shell at startup when no other path is given.
    pub last_snapshot: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: "en-US".into(),
            currency: "USD".into(),
            ui_color_enabled: Self::default_ui_color_enabled(),
            trend_months: Self::default_trend_months(),
            bill_horizon_days: Self::default_bill_horizon_days(),
            due_soon_days: Self::default_due_soon_days(),
            dashboard_bill_limit: Self::default_dashboard_bill_limit(),
            last_snapshot: None,
        }
    }
}

impl Config {
    pub fn default_ui_color_enabled() -> bool {
        true
    }

    pub fn default_trend_months() -> u32 {
        settings::DEFAULT_TREND_MONTHS
    }

    pub fn default_bill_horizon_days() -> u32 {
        settings::DEFAULT_BILL_HORIZON_DAYS
    }

    pub fn default_due_soon_days() -> u32 {
        settings::DEFAULT_DUE_SOON_DAYS
    }

    pub fn default_dashboard_bill_limit() -> usize {
        settings::DEFAULT_DASHBOARD_BILL_LIMIT
    }

    /// Application data directory: `$SPENDWISE_HOME`, else `~/.spendwise`.
    pub fn app_data_dir() -> PathBuf {
        if let Some(custom) = std::env::var_os(HOME_ENV) {
            return PathBuf::from(custom);
        }
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(DEFAULT_DIR_NAME)
    }

    pub fn aggregation_settings(&self) -> AggregationSettings {
        AggregationSettings {
            trend_months: self.trend_months,
            bill_horizon_days: self.bill_horizon_days,
            due_soon_days: self.due_soon_days,
            dashboard_bill_limit: self.dashboard_bill_limit,
            ..AggregationSettings::default()
        }
        .bounded()
    }

    pub fn get(&self, key: &str) -> Result<String, ConfigError> {
        let value = match key {
            "locale" => self.locale.clone(),
            "currency" => self.currency.clone(),
            "ui_color_enabled" => self.ui_color_enabled.to_string(),
            "trend_months" => self.trend_months.to_string(),
            "bill_horizon_days" => self.bill_horizon_days.to_string(),
            "due_soon_days" => self.due_soon_days.to_string(),
            "dashboard_bill_limit" => self.dashboard_bill_limit.to_string(),
            other => return Err(ConfigError::UnknownKey(other.to_string())),
        };
        Ok(value)
    }

    /// Updates a single key from its textual form.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let invalid = || ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        };
        let trimmed = value.trim();
        let bounded = |range: std::ops::RangeInclusive<u32>| {
            trimmed
                .parse::<u32>()
                .ok()
                .filter(|parsed| range.contains(parsed))
                .ok_or_else(invalid)
        };
        match key {
            "locale" if !trimmed.is_empty() => self.locale = trimmed.to_string(),
            "currency" if trimmed.len() == 3 => self.currency = trimmed.to_uppercase(),
            "ui_color_enabled" => {
                self.ui_color_enabled = match trimmed.to_ascii_lowercase().as_str() {
                    "true" | "on" | "yes" => true,
                    "false" | "off" | "no" => false,
                    _ => return Err(invalid()),
                }
            }
            "trend_months" => self.trend_months = bounded(1..=settings::MAX_TREND_MONTHS)?,
            "bill_horizon_days" => {
                self.bill_horizon_days = bounded(0..=settings::MAX_BILL_HORIZON_DAYS)?
            }
            "due_soon_days" => self.due_soon_days = bounded(0..=settings::MAX_BILL_HORIZON_DAYS)?,
            "dashboard_bill_limit" => {
                self.dashboard_bill_limit = trimmed.parse().map_err(|_| invalid())?
            }
            "locale" | "currency" => return Err(invalid()),
            other => return Err(ConfigError::UnknownKey(other.to_string())),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_feed_engine_defaults() {
        assert_eq!(
            Config::default().aggregation_settings(),
            AggregationSettings::default()
        );
    }

    #[test]
    fn set_validates_values() {
        let mut config = Config::default();
        config.set("currency", "eur").expect("set currency");
        assert_eq!(config.currency, "EUR");
        assert!(config.set("currency", "euro").is_err());
        assert!(config.set("trend_months", "0").is_err());
        assert!(config.set("ui_color_enabled", "maybe").is_err());
        assert!(matches!(
            config.set("theme", "dark"),
            Err(ConfigError::UnknownKey(_))
        ));
        assert!(config.set("trend_months", "25").is_err());
        assert!(config.set("bill_horizon_days", "4294967295").is_err());
        assert!(config.set("bill_horizon_days", "366").is_err());
        assert!(config.set("due_soon_days", "-1").is_err());
        config.set("bill_horizon_days", "365").expect("set horizon");
        assert_eq!(config.bill_horizon_days, 365);
        config.set("trend_months", "12").expect("set months");
        assert_eq!(config.get("trend_months").unwrap(), "12");
    }

    #[test]
    fn missing_optional_fields_fall_back_to_defaults() {
        let config: Config =
            serde_json::from_str(r#"{"locale":"en-GB","currency":"GBP"}"#).expect("parse");
        assert_eq!(config.trend_months, 6);
        assert_eq!(config.bill_horizon_days, 7);
        assert!(config.ui_color_enabled);
    }

    #[test]
    fn hand_edited_values_are_bounded_for_the_engine() {
        let config: Config = serde_json::from_str(
            r#"{"locale":"en-US","currency":"USD","trend_months":3000000000,"bill_horizon_days":4294967295}"#,
        )
        .expect("parse");
        let engine = config.aggregation_settings();
        assert_eq!(engine.trend_months, settings::MAX_TREND_MONTHS);
        assert_eq!(engine.bill_horizon_days, settings::MAX_BILL_HORIZON_DAYS);
    }
}
