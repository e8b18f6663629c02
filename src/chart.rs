//! End-to-end transform: grouped records -> everything the renderer draws.

use crate::axis::{AxisDomain, TimeTick, compute_axis_domain, time_ticks, value_ticks};
use crate::config::ChartConfig;
use crate::error::Result;
use crate::group::RegionGroup;
use crate::models::{Series, TransportType};
use crate::series::build_series;
use crate::ticks::{TickDecision, TickPolicy};
use serde::Serialize;

/// Immutable inputs for one chart render. Rebuilt wholesale on each load.
#[derive(Debug, Clone, Serialize)]
pub struct ChartData {
    pub series: Series,
    pub domain: AxisDomain,
    pub ticks: Vec<TickDecision>,
    pub time_ticks: Vec<TimeTick>,
}

/// Select one region + transport row and run it through the pipeline.
///
/// Any lookup, parse or zero-baseline failure aborts the whole chart.
pub fn prepare(
    group: &RegionGroup,
    region: &str,
    transport: TransportType,
    config: &ChartConfig,
) -> Result<ChartData> {
    let record = group.select(region, transport)?;
    let series = build_series(record)?;
    let domain = compute_axis_domain(&series, config.value_domain())?;
    let policy = TickPolicy::new(domain.value, config.geometry(), config.ticks);
    let ticks = policy.decide_all(&value_ticks(domain.value, config.tick_count));
    let time_ticks = time_ticks(&domain);
    log::debug!(
        "prepared {} with {} point(s), {}..{}",
        series.label(),
        series.len(),
        domain.time_min,
        domain.time_max
    );
    Ok(ChartData {
        series,
        domain,
        ticks,
        time_ticks,
    })
}
