// Text rendering of analysis results.

pub mod chart;
pub mod tooltip;

use crate::analyzer::SymbolAnalysis;
use crate::model::{PeriodStats, PriceSeries};
use crate::utils::{format_money, format_percent, group_thousands};
use std::fmt::Write;

/// Most recent `rows` points as a fixed-width table.
pub fn render_price_table(series: &PriceSeries, rows: usize) -> String {
    let mut out = format!(
        "{:<12}{:>12}{:>12}{:>12}{:>12}{:>16}\n",
        "Date", "Open", "High", "Low", "Close", "Volume"
    );
    let skip = series.len().saturating_sub(rows);
    for p in &series.points()[skip..] {
        let _ = writeln!(
            out,
            "{:<12}{:>12.2}{:>12.2}{:>12.2}{:>12.2}{:>16}",
            p.date.to_string(),
            p.open,
            p.high,
            p.low,
            p.close,
            group_thousands(&p.volume.to_string())
        );
    }
    out
}

pub fn render_period(stats: &PeriodStats) -> String {
    format!(
        "**{label} Analysis:**\n\
        - Average Annual Return: {avg}\n\
        - Starting Price: {start}\n\
        - Ending Price: {end}\n\
        - Price Change: {change}\n\
        - Total Return: {total:.2}%\n\
        - Annualized Volatility: {vol}\n\
        - Investment Amount: {invest}\n\
        - Potential value if invested: {value}\n\
        - Status: {status}\n\
        - Period: {from} to {to}\n",
        label = stats.window.label,
        avg = format_percent(stats.annualized_return),
        start = format_money(stats.start_price),
        end = format_money(stats.end_price),
        change = format_money(stats.price_change),
        total = stats.total_return_pct,
        vol = format_percent(stats.annualized_volatility),
        invest = format_money(stats.investment),
        value = format_money(stats.hypothetical_value),
        status = stats.status.describe(),
        from = stats.start_date,
        to = stats.end_date,
    )
}

/// Full per-symbol report: recent prices, then one block per window in
/// configured order.
pub fn render_report(series: &PriceSeries, analysis: &SymbolAnalysis, table_rows: usize) -> String {
    let mut out = format!("## Historical Data for {}\n\n", analysis.symbol);
    out.push_str(&render_price_table(series, table_rows));
    out.push_str("\n## Performance Metrics\n\n");

    // stats and skipped are each in configured order; merge them back
    let mut stats = analysis.stats.iter().peekable();
    let mut skipped = analysis.skipped.iter().peekable();
    for (window, _) in &analysis.window_mas {
        if let Some(s) = stats.next_if(|s| s.window == *window) {
            out.push_str(&render_period(s));
            out.push_str("---\n");
        } else if let Some((w, reason)) = skipped.next_if(|(w, _)| w == window) {
            let _ = writeln!(out, "**{} Analysis:** insufficient data ({})\n---", w.label, reason);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::{AnalyzerImpl, TimeSeriesAnalyzer};
    use crate::model::{PeriodStatus, PricePoint, Window};
    use chrono::NaiveDate;

    fn stats() -> PeriodStats {
        PeriodStats {
            window: Window::new("1Y", 252),
            start_date: NaiveDate::from_ymd_opt(2023, 1, 3).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            start_price: 100.0,
            end_price: 150.0,
            price_change: 50.0,
            total_return_pct: 50.0,
            annualized_return: 0.4,
            annualized_volatility: 0.25,
            investment: 1000.0,
            hypothetical_value: 1500.0,
            status: PeriodStatus::Concluded,
        }
    }

    #[test]
    fn test_render_period() {
        let text = render_period(&stats());
        assert!(text.starts_with("**1Y Analysis:**"));
        assert!(text.contains("- Average Annual Return: 40.00%"));
        assert!(text.contains("- Total Return: 50.00%"));
        assert!(text.contains("- Annualized Volatility: 25.00%"));
        assert!(text.contains("- Potential value if invested: $1,500.00"));
        assert!(text.contains("- Status: The investment period has concluded."));
        assert!(text.contains("- Period: 2023-01-03 to 2024-01-02"));
    }

    #[test]
    fn test_price_table_shows_latest_rows() {
        let first = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let points = (0..5)
            .map(|i| PricePoint {
                date: first + chrono::Duration::days(i),
                open: 1.0,
                high: 1.0,
                low: 1.0,
                close: 1.0,
                volume: 1_234_567,
            })
            .collect();
        let series = PriceSeries::new("X", points).unwrap();
        let table = render_price_table(&series, 2);

        assert_eq!(table.lines().count(), 3);
        assert!(!table.contains("2024-01-03"));
        assert!(table.contains("2024-01-05"));
        assert!(table.contains("1,234,567"));
    }

    #[test]
    fn test_report_keeps_configured_window_order() {
        let first = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let points = (0..5)
            .map(|i| PricePoint {
                date: first + chrono::Duration::days(i),
                open: 10.0,
                high: 10.0,
                low: 10.0,
                close: 10.0 + i as f64,
                volume: 100,
            })
            .collect();
        let series = PriceSeries::new("X", points).unwrap();
        let windows = [
            Window::new("10Y", 2520),
            Window::new("2D", 2),
            Window::new("1Y", 252),
            Window::new("3D", 3),
        ];
        let analysis = AnalyzerImpl::new(1000.0, first)
            .analyze(&series, &windows, 2, series.points()[4].date)
            .unwrap();

        let report = render_report(&series, &analysis, 5);
        let positions: Vec<usize> = [
            "**10Y Analysis:** insufficient",
            "**2D Analysis:**",
            "**1Y Analysis:** insufficient",
            "**3D Analysis:**",
        ]
        .iter()
        .map(|needle| report.find(needle).unwrap())
        .collect();
        assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
    }
}
