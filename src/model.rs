// Core structs: PricePoint, PriceSeries, Window, PeriodStats
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One trading day of OHLCV data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

/// Price history for a single symbol, strictly increasing by date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceSeries {
    symbol: String,
    points: Vec<PricePoint>,
}

impl PriceSeries {
    pub fn new(symbol: impl Into<String>, points: Vec<PricePoint>) -> Result<Self, AnalysisError> {
        if let Some(pos) = points.windows(2).position(|w| w[1].date <= w[0].date) {
            return Err(AnalysisError::UnorderedSeries(points[pos + 1].date));
        }
        Ok(Self {
            symbol: symbol.into(),
            points,
        })
    }

    pub fn empty(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            points: Vec::new(),
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.close).collect()
    }

    pub fn get(&self, index: usize) -> Option<&PricePoint> {
        self.points.get(index)
    }

    /// Number of points dated on or before `as_of`.
    pub fn len_until(&self, as_of: NaiveDate) -> usize {
        self.points.partition_point(|p| p.date <= as_of)
    }
}

/// Named lookback length in trading days.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Window {
    pub label: String,
    pub days: usize,
}

impl Window {
    pub fn new(label: impl Into<String>, days: usize) -> Self {
        Self {
            label: label.into(),
            days,
        }
    }

    /// 1y, 2y, 4y and 10y windows at 252 trading days per year.
    pub fn defaults() -> Vec<Window> {
        [1usize, 2, 4, 10]
            .iter()
            .map(|years| Window::new(format!("{}Y", years), years * crate::analyzer::TRADING_DAYS_PER_YEAR))
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PeriodStatus {
    Ongoing,
    Concluded,
}

impl PeriodStatus {
    pub fn describe(&self) -> &'static str {
        match self {
            PeriodStatus::Ongoing => "The investment period is still ongoing.",
            PeriodStatus::Concluded => "The investment period has concluded.",
        }
    }
}

/// Return and risk figures for one window. Built once, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodStats {
    pub window: Window,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub start_price: f64,
    pub end_price: f64,
    pub price_change: f64,
    pub total_return_pct: f64,
    pub annualized_return: f64,
    pub annualized_volatility: f64,
    pub investment: f64,
    pub hypothetical_value: f64,
    pub status: PeriodStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FetchRequest {
    pub symbol: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum AnalysisError {
    #[error("no data points in series")]
    EmptySeries,
    #[error("window of {required} days needs more data, only {available} points available")]
    InsufficientData { required: usize, available: usize },
    #[error("window length must be at least one day")]
    InvalidWindow,
    #[error("series is not strictly increasing at {0}")]
    UnorderedSeries(NaiveDate),
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("http error: {0}")]
    Http(String),
    #[error("request timed out")]
    Timeout,
    #[error("provider responded with status {0}")]
    InvalidResponse(u16),
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            FetchError::Timeout
        } else {
            FetchError::Http(e.to_string())
        }
    }
}

#[derive(Debug, Error)]
pub enum ParserError {
    #[error("malformed chart payload: {0}")]
    Json(#[from] serde_json::Error),
    #[error("provider error {code}: {description}")]
    Provider { code: String, description: String },
    #[error("field length mismatch: {0}")]
    LengthMismatch(String),
    #[error(transparent)]
    Series(#[from] AnalysisError),
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Parse(#[from] ParserError),
}
