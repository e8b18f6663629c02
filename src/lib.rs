//! mobility_trends
//!
//! A small Rust library for turning a wide mobility-trends CSV (one row per
//! region and transport type, one column per date) into a baseline-normalized
//! time series, and for rendering it as a single-series line chart with a
//! sparse, labelled gridline policy. Pairs with the `mobility` CLI.
//!
//! ### Pipeline
//! - [`storage::load_records`]: wide CSV -> [`RawRecord`]s
//! - [`group::group_by_region`]: records -> [`RegionGroup`]
//! - [`series::build_series`]: one row -> [`Series`] with ratio and signed change
//! - [`axis::compute_axis_domain`]: series -> [`AxisDomain`]
//! - [`ticks::TickPolicy::decide`]: tick value -> [`TickDecision`]
//! - [`viz::render_chart`]: everything above -> SVG/PNG
//!
//! ### Example
//! ```no_run
//! use mobility_trends::{ChartConfig, TransportType, chart, group, storage, viz};
//!
//! let records = storage::load_records("applemobilitytrends-2020-05-02.csv")?;
//! let regions = group::group_by_region(records);
//! let config = ChartConfig::default();
//! let data = chart::prepare(&regions, "Honolulu", TransportType::Driving, &config)?;
//! viz::render_chart(&data, &config, "honolulu.svg")?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod axis;
pub mod chart;
pub mod config;
pub mod error;
pub mod group;
pub mod models;
pub mod series;
pub mod stats;
pub mod storage;
pub mod ticks;
pub mod viz;

pub use axis::{AxisDomain, ValueDomain};
pub use config::ChartConfig;
pub use error::{ParseError, TrendError};
pub use group::RegionGroup;
pub use models::{RawRecord, Series, SeriesPoint, TransportType};
pub use ticks::{TickDecision, TickKind, TickPolicy};
