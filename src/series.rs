//! Series builder: one wide row -> ordered, baseline-normalized points.

use crate::error::{ParseError, Result, TrendError};
use crate::models::{RawRecord, Series, SeriesPoint};
use crate::storage::DATE_FORMAT;
use chrono::NaiveDate;

/// Render a fraction as a signed whole percent: `0.1` -> `+10%`, `-0.05` -> `-5%`.
///
/// Rounds half away from zero (`0.125` -> `+13%`, `-0.125` -> `-13%`).
/// Negative zero after rounding prints as `+0%`.
pub fn format_signed_percent(x: f64) -> String {
    let pct = (x * 100.0).round();
    if pct < 0.0 {
        format!("-{}%", -pct)
    } else {
        // `+ 0.0` folds -0.0 into 0.0
        format!("+{}%", pct + 0.0)
    }
}

/// Percentage change of a ratio relative to 1.0 (`1.5` -> `+50%`).
pub fn format_change(ratio: f64) -> String {
    format_signed_percent(ratio - 1.0)
}

/// Build the normalized series for one region + transport row.
///
/// Date columns are taken in their source order, which is trusted to be
/// chronological. Any unparsable cell fails the whole series, as does a zero
/// baseline.
pub fn build_series(record: &RawRecord) -> Result<Series> {
    let mut points = Vec::with_capacity(record.values.len());
    for (date, value) in &record.values {
        let parsed_date = NaiveDate::parse_from_str(date.trim(), DATE_FORMAT).map_err(|_| {
            ParseError::InvalidDate {
                column: date.clone(),
            }
        })?;
        let percentage = value
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| ParseError::InvalidValue {
                date: date.clone(),
                value: value.clone(),
            })?;
        points.push(SeriesPoint {
            date: parsed_date,
            percentage,
            ratio: f64::NAN,
            percentage_change: String::new(),
        });
    }

    let baseline = match points.first() {
        Some(p) => p.percentage,
        None => {
            return Err(TrendError::EmptySeries {
                region: record.region.clone(),
            });
        }
    };
    if baseline == 0.0 {
        return Err(TrendError::DivideByZero {
            region: record.region.clone(),
        });
    }
    if baseline != 100.0 {
        log::warn!(
            "baseline for {} ({}) is {baseline}, expected 100",
            record.region,
            record.transportation_type
        );
    }

    for p in points.iter_mut() {
        p.ratio = p.percentage / baseline;
        p.percentage_change = format_change(p.ratio);
    }

    Ok(Series {
        region: record.region.clone(),
        transport: record.transportation_type,
        baseline,
        points,
    })
}
