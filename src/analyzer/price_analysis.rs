use crate::analyzer::market_indicators::MarketAnalyzer;
use crate::analyzer::period_stats::period_stats;
use crate::model::{AnalysisError, PeriodStats, PriceSeries, Window};
use chrono::NaiveDate;
use tracing::{debug, info};

/// Trait defining the interface for a price series analyzer.
pub trait TimeSeriesAnalyzer {
    fn moving_average(&self, series: &PriceSeries, window_days: usize) -> Result<Vec<f64>, AnalysisError>;
    fn period_stats(
        &self,
        series: &PriceSeries,
        window: &Window,
        as_of: NaiveDate,
    ) -> Result<PeriodStats, AnalysisError>;
    /// Runs every window over the series. Windows without enough data are
    /// listed in `skipped` instead of failing the whole analysis.
    fn analyze(
        &self,
        series: &PriceSeries,
        windows: &[Window],
        short_ma_days: usize,
        as_of: NaiveDate,
    ) -> Result<SymbolAnalysis, AnalysisError>;
}

/// Implementation of the series analyzer.
pub struct AnalyzerImpl {
    investment_amount: f64,
    today: NaiveDate,
}

impl AnalyzerImpl {
    /// `today` decides whether a period is still ongoing.
    pub fn new(investment_amount: f64, today: NaiveDate) -> Self {
        Self {
            investment_amount,
            today,
        }
    }
}

/// Structure representing the overall analysis result for one symbol.
#[derive(Debug, Clone)]
pub struct SymbolAnalysis {
    pub symbol: String,
    pub short_ma_days: usize,
    /// Short moving average, aligned with the series.
    pub short_ma: Vec<f64>,
    /// Moving average per window, aligned with the series.
    pub window_mas: Vec<(Window, Vec<f64>)>,
    pub stats: Vec<PeriodStats>,
    pub skipped: Vec<(Window, AnalysisError)>,
}

impl TimeSeriesAnalyzer for AnalyzerImpl {
    fn moving_average(&self, series: &PriceSeries, window_days: usize) -> Result<Vec<f64>, AnalysisError> {
        MarketAnalyzer::moving_average(&series.closes(), window_days)
    }

    fn period_stats(
        &self,
        series: &PriceSeries,
        window: &Window,
        as_of: NaiveDate,
    ) -> Result<PeriodStats, AnalysisError> {
        period_stats(series, window, as_of, self.investment_amount, self.today)
    }

    fn analyze(
        &self,
        series: &PriceSeries,
        windows: &[Window],
        short_ma_days: usize,
        as_of: NaiveDate,
    ) -> Result<SymbolAnalysis, AnalysisError> {
        let short_ma = self.moving_average(series, short_ma_days)?;

        let mut window_mas = Vec::with_capacity(windows.len());
        let mut stats = Vec::new();
        let mut skipped = Vec::new();

        for window in windows {
            window_mas.push((window.clone(), self.moving_average(series, window.days)?));

            match self.period_stats(series, window, as_of) {
                Ok(s) => stats.push(s),
                Err(e @ AnalysisError::EmptySeries) => return Err(e),
                Err(e) => {
                    debug!("{} [{}]: skipped: {}", series.symbol(), window.label, e);
                    skipped.push((window.clone(), e));
                }
            }
        }

        info!(
            "{}: {} points, {} windows computed, {} skipped",
            series.symbol(),
            series.len(),
            stats.len(),
            skipped.len()
        );

        Ok(SymbolAnalysis {
            symbol: series.symbol().to_string(),
            short_ma_days,
            short_ma,
            window_mas,
            stats,
            skipped,
        })
    }
}
