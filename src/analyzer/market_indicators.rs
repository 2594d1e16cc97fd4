use crate::model::AnalysisError;

pub struct MarketAnalyzer;

impl MarketAnalyzer {
    /// Trailing mean of `data` aligned with the input: element i averages the
    /// last min(window_size, i + 1) values, so the first points use partial windows.
    pub fn moving_average(data: &[f64], window_size: usize) -> Result<Vec<f64>, AnalysisError> {
        if data.is_empty() {
            return Err(AnalysisError::EmptySeries);
        }
        if window_size == 0 {
            return Err(AnalysisError::InvalidWindow);
        }

        Ok((0..data.len())
            .map(|i| {
                let start = (i + 1).saturating_sub(window_size);
                let window = &data[start..=i];
                window.iter().sum::<f64>() / window.len() as f64
            })
            .collect())
    }

    /// Simple returns between consecutive closes, for every index t in
    /// `from..to` with t >= 1. Returns against a zero close are skipped.
    pub fn daily_returns(closes: &[f64], from: usize, to: usize) -> Vec<f64> {
        let to = to.min(closes.len());
        (from.max(1)..to)
            .map(|t| (closes[t] - closes[t - 1]) / closes[t - 1])
            .filter(|r| r.is_finite())
            .collect()
    }

    pub fn mean(values: &[f64]) -> Option<f64> {
        if values.is_empty() {
            return None;
        }
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }

    /// Sample standard deviation (n - 1). None for fewer than two values.
    pub fn sample_std_dev(values: &[f64]) -> Option<f64> {
        if values.len() < 2 {
            return None;
        }
        let mean = Self::mean(values)?;
        let variance = values
            .iter()
            .map(|v| (v - mean).powi(2))
            .sum::<f64>()
            / (values.len() - 1) as f64;
        Some(variance.sqrt())
    }
}
