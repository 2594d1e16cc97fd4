// Yahoo chart JSON parsing
use crate::model::{ParserError, PricePoint, PriceSeries};
use crate::utils::timestamp_to_date;
use chrono::{FixedOffset, Offset, Utc};
use serde::Deserialize;
use tracing::debug;

pub trait Parser {
    fn parse(&self, symbol: &str, body: &str) -> Result<PriceSeries, ParserError>;
}

#[derive(Debug, Deserialize)]
struct ChartEnvelope {
    chart: ChartResponse,
}

#[derive(Debug, Deserialize)]
struct ChartResponse {
    result: Option<Vec<ChartResult>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    #[serde(default)]
    meta: ChartMeta,
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: Indicators,
}

/// Bars are stamped at the exchange's local session open.
#[derive(Debug, Default, Deserialize)]
struct ChartMeta {
    #[serde(default)]
    gmtoffset: i32,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    quote: Vec<Quote>,
}

#[derive(Debug, Default, Deserialize)]
struct Quote {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<u64>>,
}

pub struct YahooChartParser;

impl YahooChartParser {
    pub fn new() -> Self {
        Self
    }
}

impl Default for YahooChartParser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser for YahooChartParser {
    fn parse(&self, symbol: &str, body: &str) -> Result<PriceSeries, ParserError> {
        let envelope: ChartEnvelope = serde_json::from_str(body)?;

        if let Some(err) = envelope.chart.error {
            return Err(ParserError::Provider {
                code: err.code,
                description: err.description,
            });
        }

        let Some(result) = envelope.chart.result.and_then(|r| r.into_iter().next()) else {
            return Ok(PriceSeries::empty(symbol));
        };
        let quote = result.indicators.quote.into_iter().next().unwrap_or_default();

        let offset = FixedOffset::east_opt(result.meta.gmtoffset).unwrap_or_else(|| {
            debug!("{}: ignoring invalid gmtoffset {}", symbol, result.meta.gmtoffset);
            Utc.fix()
        });

        let n = result.timestamp.len();
        for (name, len) in [
            ("open", quote.open.len()),
            ("high", quote.high.len()),
            ("low", quote.low.len()),
            ("close", quote.close.len()),
        ] {
            if len != n {
                return Err(ParserError::LengthMismatch(format!(
                    "{} has {} values for {} timestamps",
                    name, len, n
                )));
            }
        }

        let mut points = Vec::with_capacity(n);
        let mut dropped = 0usize;
        for (i, &ts) in result.timestamp.iter().enumerate() {
            let row = (
                timestamp_to_date(ts, offset),
                quote.open[i],
                quote.high[i],
                quote.low[i],
                quote.close[i],
            );
            match row {
                (Some(date), Some(open), Some(high), Some(low), Some(close)) => {
                    points.push(PricePoint {
                        date,
                        open,
                        high,
                        low,
                        close,
                        volume: quote.volume.get(i).copied().flatten().unwrap_or(0),
                    });
                }
                _ => dropped += 1,
            }
        }
        if dropped > 0 {
            debug!("{}: dropped {} incomplete rows", symbol, dropped);
        }

        // Later rows win when the provider repeats a date.
        points.sort_by_key(|p| p.date);
        points.reverse();
        points.dedup_by_key(|p| p.date);
        points.reverse();

        Ok(PriceSeries::new(symbol, points)?)
    }
}
