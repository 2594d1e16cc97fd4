use crate::model::Window;
use chrono::{NaiveDate, TimeDelta};
use serde::Deserialize;
use std::fs;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid config value: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SourceConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            user_agent: default_user_agent(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Comma separated, as typed by the user.
    #[serde(default = "default_symbols")]
    pub symbols: String,
    #[serde(default = "default_start_date")]
    pub start_date: NaiveDate,
    /// Defaults to today when absent.
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default = "default_ma_period")]
    pub ma_period: usize,
    #[serde(default = "Window::defaults")]
    pub windows: Vec<Window>,
    #[serde(default = "default_investment_amount")]
    pub investment_amount: f64,
    #[serde(default = "default_cache_ttl_seconds")]
    pub cache_ttl_seconds: i64,
    #[serde(default = "default_check_interval_seconds")]
    pub check_interval_seconds: u64,
    #[serde(default = "default_table_rows")]
    pub table_rows: usize,
    /// Chart JSON files are written here when set.
    #[serde(default)]
    pub output_dir: Option<String>,
    #[serde(default)]
    pub source: SourceConfig,
}

pub const MA_PERIOD_RANGE: std::ops::RangeInclusive<usize> = 1..=200;

fn default_symbols() -> String {
    "^DJI".to_string()
}

fn default_start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2000, 1, 1).unwrap_or_default()
}

fn default_ma_period() -> usize {
    100
}

fn default_investment_amount() -> f64 {
    1000.0
}

fn default_cache_ttl_seconds() -> i64 {
    3600
}

fn default_check_interval_seconds() -> u64 {
    900
}

fn default_table_rows() -> usize {
    10
}

fn default_base_url() -> String {
    "https://query1.finance.yahoo.com".to_string()
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (X11; Linux x86_64) StockLens/0.1".to_string()
}

fn default_timeout_seconds() -> u64 {
    15
}

impl AppConfig {
    pub fn end_date_or(&self, today: NaiveDate) -> NaiveDate {
        self.end_date.unwrap_or(today)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !MA_PERIOD_RANGE.contains(&self.ma_period) {
            return Err(ConfigError::Invalid(format!(
                "ma_period must be within {}..={}, got {}",
                MA_PERIOD_RANGE.start(),
                MA_PERIOD_RANGE.end(),
                self.ma_period
            )));
        }
        if let Some(end) = self.end_date {
            if end < self.start_date {
                return Err(ConfigError::Invalid(format!(
                    "end_date {} is before start_date {}",
                    end, self.start_date
                )));
            }
        }
        if let Some(w) = self.windows.iter().find(|w| w.days == 0) {
            return Err(ConfigError::Invalid(format!("window {} has zero days", w.label)));
        }
        if !(self.investment_amount.is_finite() && self.investment_amount >= 0.0) {
            return Err(ConfigError::Invalid(format!(
                "investment_amount must be a non-negative number, got {}",
                self.investment_amount
            )));
        }
        if self.cache_ttl_seconds < 0 {
            return Err(ConfigError::Invalid("cache_ttl_seconds must not be negative".into()));
        }
        if TimeDelta::try_seconds(self.cache_ttl_seconds).is_none() {
            return Err(ConfigError::Invalid(format!(
                "cache_ttl_seconds {} is out of range",
                self.cache_ttl_seconds
            )));
        }
        Ok(())
    }
}

pub fn parse_config(content: &str) -> Result<AppConfig, ConfigError> {
    let config: AppConfig = serde_json::from_str(content)?;
    config.validate()?;
    Ok(config)
}

pub fn load_config(path: &str) -> Result<AppConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_uses_defaults() {
        let cfg = parse_config("{}").unwrap();
        assert_eq!(cfg.symbols, "^DJI");
        assert_eq!(cfg.ma_period, 100);
        assert_eq!(cfg.investment_amount, 1000.0);
        assert_eq!(cfg.windows, Window::defaults());
        assert_eq!(cfg.start_date, NaiveDate::from_ymd_opt(2000, 1, 1).unwrap());
        assert!(cfg.end_date.is_none());
        assert_eq!(cfg.source.base_url, "https://query1.finance.yahoo.com");
    }

    #[test]
    fn test_explicit_values() {
        let cfg = parse_config(
            r#"{
                "symbols": "AAPL, MSFT",
                "start_date": "2015-01-01",
                "end_date": "2020-12-31",
                "ma_period": 50,
                "windows": [{ "label": "6M", "days": 126 }],
                "investment_amount": 2500.0,
                "source": { "timeout_seconds": 5 }
            }"#,
        )
        .unwrap();
        assert_eq!(cfg.ma_period, 50);
        assert_eq!(cfg.windows, vec![Window::new("6M", 126)]);
        assert_eq!(cfg.source.timeout_seconds, 5);
        assert_eq!(cfg.source.user_agent, default_user_agent());
        let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert_eq!(cfg.end_date_or(today), NaiveDate::from_ymd_opt(2020, 12, 31).unwrap());
    }

    #[test]
    fn test_ma_period_out_of_range() {
        assert!(matches!(
            parse_config(r#"{ "ma_period": 0 }"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            parse_config(r#"{ "ma_period": 201 }"#),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_end_before_start_rejected() {
        assert!(matches!(
            parse_config(r#"{ "start_date": "2020-01-01", "end_date": "2019-01-01" }"#),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_cache_ttl_bounds() {
        assert!(matches!(
            parse_config(r#"{ "cache_ttl_seconds": -1 }"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            parse_config(r#"{ "cache_ttl_seconds": 10000000000000000 }"#),
            Err(ConfigError::Invalid(_))
        ));
        let cfg = parse_config(r#"{ "cache_ttl_seconds": 86400 }"#).unwrap();
        assert_eq!(cfg.cache_ttl_seconds, 86400);
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(parse_config("{ symbols"), Err(ConfigError::Json(_))));
    }
}
