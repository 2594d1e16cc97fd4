// Analyzer module: rolling statistics over a price series.

pub mod price_analysis;
pub mod period_stats;
pub mod market_indicators;

/// Standard approximation of trading days in a calendar year.
pub const TRADING_DAYS_PER_YEAR: usize = 252;

// Re-export the main Analyzer implementation for ease of use.
pub use price_analysis::{AnalyzerImpl, SymbolAnalysis, TimeSeriesAnalyzer};
