//! Axis domains and tick candidates.
//!
//! The value axis is a fixed inspection window chosen by configuration; the
//! time axis spans the observed dates. Both are returned as plain values and
//! handed to the renderer, so nothing here holds scale state between calls.

use crate::error::{Result, TrendError};
use crate::models::Series;
use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};

/// Closed value interval `[min, max]`. Values outside are clipped when drawn.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueDomain {
    pub min: f64,
    pub max: f64,
}

impl ValueDomain {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// `[0, max]`, the only shape the chart uses.
    pub fn up_to(max: f64) -> Self {
        Self { min: 0.0, max }
    }

    pub fn contains(&self, v: f64) -> bool {
        v >= self.min && v <= self.max
    }

    pub fn clamp(&self, v: f64) -> f64 {
        v.clamp(self.min, self.max)
    }
}

impl Default for ValueDomain {
    fn default() -> Self {
        Self::up_to(1.5)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisDomain {
    pub time_min: NaiveDate,
    pub time_max: NaiveDate,
    pub value: ValueDomain,
}

impl AxisDomain {
    /// Number of days covered by the time axis (0 for a single-date series).
    pub fn span_days(&self) -> i64 {
        (self.time_max - self.time_min).num_days()
    }

    /// Offset of `date` from `time_min`, in days.
    pub fn day_offset(&self, date: NaiveDate) -> f64 {
        (date - self.time_min).num_days() as f64
    }
}

/// Compute the axis domain for a series.
///
/// Uses the true min/max of the dates. When the series is not ordered (first
/// and last points are not the extremes) a warning is logged; the series is
/// not reordered.
pub fn compute_axis_domain(series: &Series, value: ValueDomain) -> Result<AxisDomain> {
    let (first, last) = match (series.first(), series.last()) {
        (Some(f), Some(l)) => (f.date, l.date),
        _ => {
            return Err(TrendError::EmptySeries {
                region: series.region.clone(),
            });
        }
    };
    let time_min = series.points.iter().map(|p| p.date).min().unwrap_or(first);
    let time_max = series.points.iter().map(|p| p.date).max().unwrap_or(last);
    if time_min != first || time_max != last {
        log::warn!(
            "dates for {} are not in chronological order ({first}..{last} vs extent {time_min}..{time_max})",
            series.label()
        );
    }
    Ok(AxisDomain {
        time_min,
        time_max,
        value,
    })
}

/// Evenly spaced "nice" candidates over the value domain (step 1, 2 or 5 x 10^k).
///
/// Each value is computed as `i / inc` (or `i * inc`) so tenths land on the
/// closest float, e.g. the fourth tick of `[0, 1.5]` is exactly `0.3`.
pub fn value_ticks(domain: ValueDomain, count: usize) -> Vec<f64> {
    let (start, stop) = (domain.min, domain.max);
    if count == 0 || !start.is_finite() || !stop.is_finite() || start > stop {
        return Vec::new();
    }
    if start == stop {
        return vec![start];
    }

    let step = (stop - start) / count as f64;
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = if error >= 50f64.sqrt() {
        10.0
    } else if error >= 10f64.sqrt() {
        5.0
    } else if error >= 2f64.sqrt() {
        2.0
    } else {
        1.0
    };

    if power < 0.0 {
        let inc = 10f64.powf(-power) / factor;
        let (lo, hi) = ((start * inc).ceil() as i64, (stop * inc).floor() as i64);
        (lo..=hi).map(|i| i as f64 / inc).collect()
    } else {
        let inc = factor * 10f64.powf(power);
        let (lo, hi) = ((start / inc).ceil() as i64, (stop / inc).floor() as i64);
        (lo..=hi).map(|i| i as f64 * inc).collect()
    }
}

/// A labelled date on the time axis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeTick {
    pub date: NaiveDate,
    pub label: String,
}

/// Interior month starts closer than this to an endpoint are dropped so labels don't collide.
const MIN_TICK_GAP_DAYS: i64 = 7;

/// First date, each month start strictly inside the domain, then the last date.
///
/// Endpoints read `JAN 13`; interior month starts read `FEB`.
pub fn time_ticks(domain: &AxisDomain) -> Vec<TimeTick> {
    let endpoint = |d: NaiveDate| TimeTick {
        date: d,
        label: d.format("%b %d").to_string().to_uppercase(),
    };

    let mut out = vec![endpoint(domain.time_min)];
    let mut month = NaiveDate::from_ymd_opt(domain.time_min.year(), domain.time_min.month(), 1)
        .and_then(|d| d.checked_add_months(Months::new(1)));
    while let Some(d) = month {
        if d >= domain.time_max {
            break;
        }
        let gap = (d - domain.time_min)
            .num_days()
            .min((domain.time_max - d).num_days());
        if gap >= MIN_TICK_GAP_DAYS {
            out.push(TimeTick {
                date: d,
                label: d.format("%b").to_string().to_uppercase(),
            });
        }
        month = d.checked_add_months(Months::new(1));
    }
    if domain.time_max != domain.time_min {
        out.push(endpoint(domain.time_max));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn ticks_over_narrow_window_step_by_tenths() {
        let t = value_ticks(ValueDomain::up_to(1.5), 12);
        assert_eq!(t.len(), 16);
        assert_eq!(t[0], 0.0);
        assert_eq!(t[3], 0.3);
        assert_eq!(t[10], 1.0);
        assert_eq!(t[15], 1.5);
    }

    #[test]
    fn ticks_over_wide_window_step_by_fifths() {
        let t = value_ticks(ValueDomain::up_to(2.0), 12);
        assert_eq!(t, vec![0.0, 0.2, 0.4, 0.6, 0.8, 1.0, 1.2, 1.4, 1.6, 1.8, 2.0]);
    }

    #[test]
    fn degenerate_tick_requests() {
        assert!(value_ticks(ValueDomain::up_to(1.5), 0).is_empty());
        assert_eq!(value_ticks(ValueDomain::new(1.0, 1.0), 5), vec![1.0]);
        assert!(value_ticks(ValueDomain::new(2.0, 1.0), 5).is_empty());
    }

    #[test]
    fn time_ticks_label_endpoints_and_months() {
        let d = AxisDomain {
            time_min: ymd(2020, 1, 13),
            time_max: ymd(2020, 5, 2),
            value: ValueDomain::default(),
        };
        let labels: Vec<String> = time_ticks(&d).into_iter().map(|t| t.label).collect();
        assert_eq!(labels, vec!["JAN 13", "FEB", "MAR", "APR", "MAY 02"]);
    }

    #[test]
    fn unordered_dates_use_true_extremes_without_reordering() {
        use crate::models::{RawRecord, TransportType};
        let row = RawRecord {
            geo_type: Some("city".into()),
            region: "Honolulu".into(),
            transportation_type: TransportType::Driving,
            alternative_name: None,
            values: vec![
                ("2020-01-15".into(), "100".into()),
                ("2020-01-13".into(), "90".into()),
                ("2020-01-14".into(), "110".into()),
            ],
        };
        let series = crate::series::build_series(&row).unwrap();
        let d = compute_axis_domain(&series, ValueDomain::default()).unwrap();
        assert_eq!(d.time_min, ymd(2020, 1, 13));
        assert_eq!(d.time_max, ymd(2020, 1, 15));
        assert_eq!(d.span_days(), 2);

        let dates: Vec<NaiveDate> = series.points.iter().map(|p| p.date).collect();
        assert_eq!(dates, vec![ymd(2020, 1, 15), ymd(2020, 1, 13), ymd(2020, 1, 14)]);
    }

    #[test]
    fn empty_series_has_no_domain() {
        let series = Series {
            region: "Nowhere".into(),
            transport: crate::models::TransportType::Walking,
            baseline: 100.0,
            points: Vec::new(),
        };
        assert!(matches!(
            compute_axis_domain(&series, ValueDomain::default()),
            Err(TrendError::EmptySeries { .. })
        ));
    }

    #[test]
    fn single_day_domain_has_one_time_tick() {
        let d = AxisDomain {
            time_min: ymd(2020, 1, 13),
            time_max: ymd(2020, 1, 13),
            value: ValueDomain::default(),
        };
        assert_eq!(time_ticks(&d).len(), 1);
        assert_eq!(d.span_days(), 0);
    }
}
