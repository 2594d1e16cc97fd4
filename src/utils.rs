// Utility functions
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime};

/// Unix seconds at midnight UTC of `date`.
pub fn date_to_timestamp(date: NaiveDate) -> i64 {
    date.and_time(NaiveTime::MIN).and_utc().timestamp()
}

/// Calendar date of a unix timestamp as seen at `offset`.
pub fn timestamp_to_date(timestamp: i64, offset: FixedOffset) -> Option<NaiveDate> {
    DateTime::from_timestamp(timestamp, 0).map(|dt| dt.with_timezone(&offset).date_naive())
}

/// Inserts `,` between groups of three digits in the integer part.
pub fn group_thousands(value: &str) -> String {
    let (sign, rest) = match value.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", value),
    };
    let (int_part, frac_part) = match rest.find('.') {
        Some(pos) => rest.split_at(pos),
        None => (rest, ""),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{}{}{}", sign, grouped, frac_part)
}

/// `$1,234.50`
pub fn format_money(value: f64) -> String {
    if value < 0.0 {
        format!("-${}", group_thousands(&format!("{:.2}", -value)))
    } else {
        format!("${}", group_thousands(&format!("{:.2}", value)))
    }
}

/// Fraction as percent with two decimals: 0.1234 -> `12.34%`
pub fn format_percent(fraction: f64) -> String {
    format!("{:.2}%", fraction * 100.0)
}
