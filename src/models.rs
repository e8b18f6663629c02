use crate::error::ParseError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Mode of mobility a row measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportType {
    Driving,
    Walking,
    Transit,
}

impl TransportType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransportType::Driving => "driving",
            TransportType::Walking => "walking",
            TransportType::Transit => "transit",
        }
    }
}

impl fmt::Display for TransportType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransportType {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "driving" => Ok(TransportType::Driving),
            "walking" => Ok(TransportType::Walking),
            "transit" => Ok(TransportType::Transit),
            other => Err(ParseError::UnknownTransport(other.to_string())),
        }
    }
}

/// One wide CSV row as produced by the record parser (one per region + transport pair).
///
/// Date cells are kept verbatim, in column order; conversion happens in
/// [`crate::series::build_series`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    pub geo_type: Option<String>,
    pub region: String,
    pub transportation_type: TransportType,
    pub alternative_name: Option<String>,
    /// `(date column header, percentage cell)` in source column order.
    pub values: Vec<(String, String)>,
}

/// One normalized observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub date: NaiveDate,
    pub percentage: f64,
    /// `percentage / baseline`; 1.0 means unchanged.
    pub ratio: f64,
    /// Signed whole-percent change, e.g. `+10%` or `-5%`.
    pub percentage_change: String,
}

/// Ordered, non-empty series for exactly one region + transport pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub region: String,
    pub transport: TransportType,
    pub baseline: f64,
    pub points: Vec<SeriesPoint>,
}

impl Series {
    pub fn first(&self) -> Option<&SeriesPoint> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&SeriesPoint> {
        self.points.last()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Legend label, e.g. `Honolulu • driving`.
    pub fn label(&self) -> String {
        format!("{} • {}", self.region, self.transport)
    }
}
