use crate::analyzer::TRADING_DAYS_PER_YEAR;
use crate::analyzer::market_indicators::MarketAnalyzer;
use crate::model::{AnalysisError, PeriodStats, PeriodStatus, PriceSeries, Window};
use chrono::NaiveDate;
use tracing::debug;

/// Value of `amount` bought at `start_price` and marked at `end_price`.
/// A non-positive start price yields 0.
pub fn hypothetical_value(amount: f64, start_price: f64, end_price: f64) -> f64 {
    if start_price > 0.0 {
        let shares = amount / start_price;
        shares * end_price
    } else {
        0.0
    }
}

pub fn period_status(end_date: NaiveDate, today: NaiveDate) -> PeriodStatus {
    if end_date > today {
        PeriodStatus::Ongoing
    } else {
        PeriodStatus::Concluded
    }
}

/// Statistics for the trailing `window.days` points ending at the last point
/// dated on or before `as_of`.
pub fn period_stats(
    series: &PriceSeries,
    window: &Window,
    as_of: NaiveDate,
    investment: f64,
    today: NaiveDate,
) -> Result<PeriodStats, AnalysisError> {
    if window.days == 0 {
        return Err(AnalysisError::InvalidWindow);
    }
    let available = series.len_until(as_of);
    if available == 0 {
        return Err(AnalysisError::EmptySeries);
    }
    if available < window.days {
        return Err(AnalysisError::InsufficientData {
            required: window.days,
            available,
        });
    }

    let points = series.points();
    let start_idx = available - window.days;
    let end_idx = available - 1;
    let start = &points[start_idx];
    let end = &points[end_idx];

    let closes = series.closes();
    let returns = MarketAnalyzer::daily_returns(&closes, start_idx, available);
    let annualized_return = MarketAnalyzer::mean(&returns)
        .map(|m| m * TRADING_DAYS_PER_YEAR as f64)
        .unwrap_or(0.0);
    let annualized_volatility = MarketAnalyzer::sample_std_dev(&returns)
        .map(|sd| sd * (TRADING_DAYS_PER_YEAR as f64).sqrt())
        .unwrap_or(0.0);

    let total_return_pct = if start.close > 0.0 {
        (end.close - start.close) / start.close * 100.0
    } else {
        debug!(
            "{} [{}]: start price {} is not positive, total return reported as 0",
            series.symbol(),
            window.label,
            start.close
        );
        0.0
    };

    Ok(PeriodStats {
        window: window.clone(),
        start_date: start.date,
        end_date: end.date,
        start_price: start.close,
        end_price: end.close,
        price_change: end.close - start.close,
        total_return_pct,
        annualized_return,
        annualized_volatility,
        investment,
        hypothetical_value: hypothetical_value(investment, start.close, end.close),
        status: period_status(end.date, today),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PricePoint;

    fn series_from_closes(closes: &[f64]) -> PriceSeries {
        let first = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        let points = closes
            .iter()
            .enumerate()
            .map(|(i, &close)| PricePoint {
                date: first + chrono::Duration::days(i as i64),
                open: close,
                high: close,
                low: close,
                close,
                volume: 1_000,
            })
            .collect();
        PriceSeries::new("TEST", points).unwrap()
    }

    fn far_future() -> NaiveDate {
        NaiveDate::from_ymd_opt(2100, 1, 1).unwrap()
    }

    #[test]
    fn test_total_return_over_trailing_window() {
        let series = series_from_closes(&[100.0, 110.0, 121.0]);
        let stats = period_stats(&series, &Window::new("2D", 2), far_future(), 1000.0, far_future()).unwrap();
        assert_eq!(stats.start_price, 110.0);
        assert_eq!(stats.end_price, 121.0);
        assert!((stats.total_return_pct - 10.0).abs() < 1e-9);
        assert!((stats.price_change - 11.0).abs() < 1e-9);
        // both returns in the window are 10%
        assert!((stats.annualized_return - 0.1 * 252.0).abs() < 1e-9);
        assert!(stats.annualized_volatility.abs() < 1e-9);
    }

    #[test]
    fn test_full_length_window_uses_first_and_last_points() {
        let series = series_from_closes(&[50.0, 55.0, 45.0, 60.0]);
        let stats = period_stats(&series, &Window::new("ALL", 4), far_future(), 1000.0, far_future()).unwrap();
        assert_eq!(stats.start_date, series.points()[0].date);
        assert_eq!(stats.end_date, series.points()[3].date);
        assert_eq!(stats.start_price, 50.0);
        assert_eq!(stats.end_price, 60.0);
    }

    #[test]
    fn test_hypothetical_value_scales_with_price() {
        assert!((hypothetical_value(1000.0, 100.0, 150.0) - 1500.0).abs() < 1e-9);
        assert!((hypothetical_value(250.0, 100.0, 150.0) - 375.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_start_price_degrades_to_zero() {
        assert_eq!(hypothetical_value(1000.0, 0.0, 150.0), 0.0);
        assert_eq!(hypothetical_value(1000.0, -1.0, 150.0), 0.0);

        let series = series_from_closes(&[0.0, 10.0, 12.0]);
        let stats = period_stats(&series, &Window::new("3D", 3), far_future(), 1000.0, far_future()).unwrap();
        assert_eq!(stats.hypothetical_value, 0.0);
        assert_eq!(hypothetical_value(500.0, stats.start_price, stats.end_price), 0.0);
        assert_eq!(stats.total_return_pct, 0.0);
        assert!(stats.annualized_return.is_finite());
    }

    #[test]
    fn test_insufficient_data() {
        let series = series_from_closes(&[1.0, 2.0]);
        let err = period_stats(&series, &Window::new("1Y", 252), far_future(), 1000.0, far_future()).unwrap_err();
        assert_eq!(
            err,
            AnalysisError::InsufficientData {
                required: 252,
                available: 2
            }
        );
    }

    #[test]
    fn test_as_of_date_truncates_series() {
        let series = series_from_closes(&[100.0, 110.0, 121.0, 500.0]);
        let as_of = series.points()[2].date;
        let stats = period_stats(&series, &Window::new("2D", 2), as_of, 1000.0, far_future()).unwrap();
        assert_eq!(stats.end_price, 121.0);
        assert_eq!(stats.end_date, as_of);

        let before_all = NaiveDate::from_ymd_opt(2019, 1, 1).unwrap();
        assert_eq!(
            period_stats(&series, &Window::new("2D", 2), before_all, 1000.0, far_future()),
            Err(AnalysisError::EmptySeries)
        );
    }

    #[test]
    fn test_period_status() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        assert_eq!(period_status(today, today), PeriodStatus::Concluded);
        assert_eq!(
            period_status(NaiveDate::from_ymd_opt(2024, 6, 2).unwrap(), today),
            PeriodStatus::Ongoing
        );
    }
}
