//! Record parser for the wide mobility CSV, plus tidy export of built series.

use crate::error::{ParseError, Result};
use crate::models::{RawRecord, Series, TransportType};
use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Column positions resolved from the header row.
struct Layout {
    geo_type: Option<usize>,
    region: usize,
    transport: usize,
    alternative_name: Option<usize>,
    /// Index of the first date column; everything from here on is a date.
    first_date: usize,
}

impl Layout {
    fn from_headers(headers: &StringRecord) -> Result<Self, ParseError> {
        let find = |name: &str| headers.iter().position(|h| h.trim() == name);
        let first_date = headers
            .iter()
            .position(|h| NaiveDate::parse_from_str(h.trim(), DATE_FORMAT).is_ok())
            .unwrap_or(headers.len());
        let region = find("region").ok_or(ParseError::MissingColumn("region"))?;
        let transport =
            find("transportation_type").ok_or(ParseError::MissingColumn("transportation_type"))?;
        Ok(Self {
            geo_type: find("geo_type"),
            region,
            transport,
            alternative_name: find("alternative_name"),
            first_date,
        })
    }
}

fn non_empty(rec: &StringRecord, idx: Option<usize>) -> Option<String> {
    idx.and_then(|i| rec.get(i))
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Parse the wide CSV from any reader.
///
/// Leading metadata columns are the ones before the first date-shaped header;
/// the trailing columns must all be dates, in chronological order. Rows with an
/// unrecognized `transportation_type` are skipped with a warning so that the
/// remaining regions still load.
pub fn parse_records<R: Read>(reader: R) -> Result<Vec<RawRecord>> {
    let mut rdr = ReaderBuilder::new().flexible(true).from_reader(reader);
    let headers = rdr.headers()?.clone();
    let layout = Layout::from_headers(&headers)?;
    log::debug!(
        "{} metadata column(s), {} date column(s)",
        layout.first_date,
        headers.len() - layout.first_date
    );

    let date_headers: Vec<String> = headers
        .iter()
        .skip(layout.first_date)
        .map(|h| h.trim().to_string())
        .collect();
    if let Some(bad) = date_headers
        .iter()
        .find(|h| NaiveDate::parse_from_str(h, DATE_FORMAT).is_err())
    {
        return Err(ParseError::InvalidDate { column: bad.clone() }.into());
    }

    let mut out = Vec::new();
    for row in rdr.records() {
        let row = row?;
        let region = row.get(layout.region).unwrap_or("").trim().to_string();
        let transportation_type: TransportType =
            match row.get(layout.transport).unwrap_or("").parse() {
                Ok(t) => t,
                Err(e) => {
                    log::warn!("skipping row for {region}: {e}");
                    continue;
                }
            };
        let values = date_headers
            .iter()
            .enumerate()
            .map(|(i, date)| {
                let cell = row.get(layout.first_date + i).unwrap_or("").trim();
                (date.clone(), cell.to_string())
            })
            .collect();
        out.push(RawRecord {
            geo_type: non_empty(&row, layout.geo_type),
            region,
            transportation_type,
            alternative_name: non_empty(&row, layout.alternative_name),
            values,
        });
    }
    log::debug!("parsed {} record(s)", out.len());
    Ok(out)
}

/// Open and parse a CSV file from disk.
pub fn load_records<P: AsRef<Path>>(path: P) -> Result<Vec<RawRecord>> {
    let file = File::open(path)?;
    parse_records(file)
}

/// Neutralize cells that a spreadsheet would evaluate as a formula.
fn sanitize_cell(s: &str) -> String {
    if s.starts_with(['=', '+', '-', '@']) {
        format!("'{s}")
    } else {
        s.to_string()
    }
}

/// Save a series as tidy CSV with header.
pub fn save_csv<P: AsRef<Path>>(series: &Series, path: P) -> anyhow::Result<()> {
    let mut wtr = WriterBuilder::new().from_path(path)?;
    wtr.write_record(["region", "transportation_type", "date", "percentage", "ratio", "percentage_change"])?;
    for p in &series.points {
        wtr.write_record([
            sanitize_cell(&series.region),
            series.transport.to_string(),
            p.date.format(DATE_FORMAT).to_string(),
            p.percentage.to_string(),
            p.ratio.to_string(),
            sanitize_cell(&p.percentage_change),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Save a series as pretty JSON.
pub fn save_json<P: AsRef<Path>>(series: &Series, path: P) -> anyhow::Result<()> {
    let mut f = File::create(path)?;
    let s = serde_json::to_string_pretty(series)?;
    f.write_all(s.as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TrendError;

    const FOUR_META: &str = "\
geo_type,region,transportation_type,alternative_name,2020-01-13,2020-01-14
city,Honolulu,driving,,100,95
city,Honolulu,walking,,100,88
";

    #[test]
    fn parses_four_metadata_columns() {
        let recs = parse_records(FOUR_META.as_bytes()).unwrap();
        assert_eq!(recs.len(), 2);
        assert_eq!(recs[0].region, "Honolulu");
        assert_eq!(recs[0].geo_type.as_deref(), Some("city"));
        assert_eq!(recs[0].alternative_name, None);
        assert_eq!(recs[1].transportation_type, TransportType::Walking);
        assert_eq!(
            recs[0].values,
            vec![
                ("2020-01-13".to_string(), "100".to_string()),
                ("2020-01-14".to_string(), "95".to_string())
            ]
        );
    }

    #[test]
    fn tolerates_extra_metadata_columns() {
        let csv = "\
geo_type,region,transportation_type,alternative_name,sub-region,country,2020-01-13
city,Toronto,transit,,Ontario,Canada,100
";
        let recs = parse_records(csv.as_bytes()).unwrap();
        assert_eq!(recs[0].values.len(), 1);
        assert_eq!(recs[0].values[0].1, "100");
    }

    #[test]
    fn missing_region_column_is_reported() {
        let csv = "geo_type,transportation_type,2020-01-13\ncity,driving,100\n";
        match parse_records(csv.as_bytes()) {
            Err(TrendError::Parse(ParseError::MissingColumn("region"))) => {}
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn unrecognized_transport_row_is_skipped() {
        let csv = "\
geo_type,region,transportation_type,alternative_name,2020-01-13,2020-01-14
city,Honolulu,driving,,100,95
city,Oslo,cycling,,100,90
city,Oslo,walking,,100,80
";
        let recs = parse_records(csv.as_bytes()).unwrap();
        let kept: Vec<(&str, TransportType)> = recs
            .iter()
            .map(|r| (r.region.as_str(), r.transportation_type))
            .collect();
        assert_eq!(
            kept,
            vec![("Honolulu", TransportType::Driving), ("Oslo", TransportType::Walking)]
        );
    }

    #[test]
    fn non_date_header_after_dates_is_rejected() {
        let csv = "region,transportation_type,2020-01-13,notes\nX,driving,100,hi\n";
        match parse_records(csv.as_bytes()) {
            Err(TrendError::Parse(ParseError::InvalidDate { column })) => assert_eq!(column, "notes"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn sanitize_prefixes_formula_starters() {
        assert_eq!(sanitize_cell("+10%"), "'+10%");
        assert_eq!(sanitize_cell("=1+1"), "'=1+1");
        assert_eq!(sanitize_cell("Honolulu"), "Honolulu");
    }
}
