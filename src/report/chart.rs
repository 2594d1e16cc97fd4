use crate::analyzer::SymbolAnalysis;
use crate::model::PriceSeries;
use crate::report::tooltip::tooltip;
use chrono::NaiveDate;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize)]
pub struct ChartLine {
    pub label: String,
    pub values: Vec<f64>,
    pub dashed: bool,
}

/// Close prices with moving-average overlays, ready for an external plotter.
#[derive(Debug, Clone, Serialize)]
pub struct ChartData {
    pub title: String,
    pub dates: Vec<NaiveDate>,
    pub lines: Vec<ChartLine>,
    pub tooltips: Vec<String>,
}

pub fn build_chart(series: &PriceSeries, analysis: &SymbolAnalysis) -> ChartData {
    let mut lines = vec![
        ChartLine {
            label: "Close Price".to_string(),
            values: series.closes(),
            dashed: false,
        },
        ChartLine {
            label: format!("{}-Day MA", analysis.short_ma_days),
            values: analysis.short_ma.clone(),
            dashed: false,
        },
    ];
    lines.extend(analysis.window_mas.iter().map(|(window, values)| ChartLine {
        label: format!("{} MA", window.label),
        values: values.clone(),
        dashed: true,
    }));

    ChartData {
        title: format!("{} Closing Prices with Moving Averages", series.symbol()),
        dates: series.points().iter().map(|p| p.date).collect(),
        lines,
        tooltips: (0..series.len()).filter_map(|i| tooltip(series, i)).collect(),
    }
}

/// Writes `<dir>/<symbol>.json`, returning the file path.
pub fn write_chart_json(dir: &Path, symbol: &str, chart: &ChartData) -> std::io::Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let file_stem: String = symbol
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '.' { c } else { '_' })
        .collect();
    let path = dir.join(format!("{}.json", file_stem));
    let json = serde_json::to_string_pretty(chart)?;
    fs::write(&path, json)?;
    Ok(path)
}
