//! Region grouping: partition parsed rows by `region`, preserving source order.

use crate::error::{Result, TrendError};
use crate::models::{RawRecord, TransportType};
use ahash::AHashMap;

/// Records partitioned by region.
///
/// Group order and intra-group order both follow first occurrence in the
/// input. Nothing is dropped or deduplicated.
#[derive(Debug, Clone, Default)]
pub struct RegionGroup {
    groups: Vec<(String, Vec<RawRecord>)>,
    index: AHashMap<String, usize>,
}

impl RegionGroup {
    pub fn from_records(records: impl IntoIterator<Item = RawRecord>) -> Self {
        let mut out = Self::default();
        for rec in records {
            match out.index.get(&rec.region).copied() {
                Some(i) => out.groups[i].1.push(rec),
                None => {
                    out.index.insert(rec.region.clone(), out.groups.len());
                    out.groups.push((rec.region.clone(), vec![rec]));
                }
            }
        }
        log::debug!("grouped into {} region(s)", out.groups.len());
        out
    }

    /// All rows for `region`, one per transport type present.
    pub fn get(&self, region: &str) -> Result<&[RawRecord]> {
        self.index
            .get(region)
            .map(|&i| self.groups[i].1.as_slice())
            .ok_or_else(|| TrendError::Lookup {
                region: region.to_string(),
            })
    }

    /// The row for a specific region + transport pair.
    pub fn select(&self, region: &str, transport: TransportType) -> Result<&RawRecord> {
        self.get(region)?
            .iter()
            .find(|r| r.transportation_type == transport)
            .ok_or_else(|| TrendError::MissingTransport {
                region: region.to_string(),
                transport: transport.to_string(),
            })
    }

    /// Region identifiers in first-occurrence order (the autocomplete source list).
    pub fn regions(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|(r, _)| r.as_str())
    }

    /// Case-insensitive substring filter over [`Self::regions`].
    pub fn matching_regions<'a>(&'a self, needle: &str) -> Vec<&'a str> {
        let needle = needle.trim().to_lowercase();
        self.regions()
            .filter(|r| needle.is_empty() || r.to_lowercase().contains(&needle))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[RawRecord])> {
        self.groups.iter().map(|(r, recs)| (r.as_str(), recs.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Convenience wrapper over [`RegionGroup::from_records`].
pub fn group_by_region(records: impl IntoIterator<Item = RawRecord>) -> RegionGroup {
    RegionGroup::from_records(records)
}
