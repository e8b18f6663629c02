use crate::models::{Series, TransportType};
use serde::{Deserialize, Serialize};

/// Summary statistics for one built series.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Summary {
    pub region: String,
    pub transport: TransportType,
    pub count: usize,
    pub baseline: f64,
    pub min_ratio: Option<f64>,
    pub max_ratio: Option<f64>,
    pub mean_ratio: Option<f64>,
    pub median_ratio: Option<f64>,
    pub latest_ratio: Option<f64>,
    pub latest_change: Option<String>,
}

/// Compute ratio statistics for a series.
pub fn summarize(series: &Series) -> Summary {
    let mut vals: Vec<f64> = series.points.iter().map(|p| p.ratio).collect();
    vals.sort_by(|a, b| a.total_cmp(b));
    let count = vals.len();
    let min_ratio = vals.first().copied();
    let max_ratio = vals.last().copied();
    let mean_ratio = if count > 0 {
        Some(vals.iter().sum::<f64>() / count as f64)
    } else {
        None
    };
    let median_ratio = if count == 0 {
        None
    } else if count % 2 == 1 {
        Some(vals[count / 2])
    } else {
        Some((vals[count / 2 - 1] + vals[count / 2]) / 2.0)
    };
    let latest = series.last();
    Summary {
        region: series.region.clone(),
        transport: series.transport,
        count,
        baseline: series.baseline,
        min_ratio,
        max_ratio,
        mean_ratio,
        median_ratio,
        latest_ratio: latest.map(|p| p.ratio),
        latest_change: latest.map(|p| p.percentage_change.clone()),
    }
}
