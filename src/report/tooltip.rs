use crate::model::PriceSeries;
use crate::utils::group_thousands;

/// Hover annotation for the point at `index`, or None when out of range.
pub fn tooltip(series: &PriceSeries, index: usize) -> Option<String> {
    let p = series.get(index)?;
    Some(format!(
        "Date: {}\nOpen: ${:.2}\nHigh: ${:.2}\nLow: ${:.2}\nClose: ${:.2}\nVolume: {}",
        p.date,
        p.open,
        p.high,
        p.low,
        p.close,
        group_thousands(&p.volume.to_string())
    ))
}
