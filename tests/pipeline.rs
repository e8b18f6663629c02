use mobility_trends::{ChartConfig, ParseError, TransportType, TrendError, chart, group, storage};

const CSV: &str = "\
geo_type,region,transportation_type,alternative_name,2020-01-13,2020-01-14,2020-01-15,2020-01-16
city,Honolulu,driving,,100,95,110,100
city,Honolulu,walking,,100,80,70,60
city,Zero Town,driving,,0,10,20,30
city,Gapville,transit,,100,,90,95
";

fn regions() -> mobility_trends::RegionGroup {
    group::group_by_region(storage::parse_records(CSV.as_bytes()).unwrap())
}

#[test]
fn honolulu_driving_normalizes_against_first_day() {
    let data = chart::prepare(&regions(), "Honolulu", TransportType::Driving, &ChartConfig::default())
        .unwrap();
    let s = &data.series;
    assert_eq!(s.baseline, 100.0);
    let ratios: Vec<f64> = s.points.iter().map(|p| p.ratio).collect();
    assert_eq!(ratios, vec![1.0, 0.95, 1.1, 1.0]);
    let changes: Vec<&str> = s.points.iter().map(|p| p.percentage_change.as_str()).collect();
    assert_eq!(changes, vec!["+0%", "-5%", "+10%", "+0%"]);

    assert_eq!(data.domain.time_min.to_string(), "2020-01-13");
    assert_eq!(data.domain.time_max.to_string(), "2020-01-16");
    assert_eq!(data.domain.value.max, 1.5);
    assert_eq!(data.ticks.len(), 16);
}

#[test]
fn second_transport_row_is_selectable() {
    let data = chart::prepare(&regions(), "Honolulu", TransportType::Walking, &ChartConfig::default())
        .unwrap();
    assert_eq!(data.series.transport, TransportType::Walking);
    assert_eq!(data.series.points[3].percentage_change, "-40%");
}

#[test]
fn zero_baseline_fails_without_series() {
    let r = chart::prepare(&regions(), "Zero Town", TransportType::Driving, &ChartConfig::default());
    match r {
        Err(TrendError::DivideByZero { region }) => assert_eq!(region, "Zero Town"),
        other => panic!("expected DivideByZero, got {other:?}"),
    }
}

#[test]
fn unknown_region_is_a_lookup_error() {
    let r = chart::prepare(&regions(), "Atlantis", TransportType::Driving, &ChartConfig::default());
    assert!(matches!(r, Err(TrendError::Lookup { region }) if region == "Atlantis"));
}

#[test]
fn blank_cell_aborts_whole_series() {
    let r = chart::prepare(&regions(), "Gapville", TransportType::Transit, &ChartConfig::default());
    assert!(matches!(
        r,
        Err(TrendError::Parse(ParseError::InvalidValue { ref date, .. })) if date == "2020-01-14"
    ));
}

#[test]
fn wide_domain_variant_uses_configured_bound() {
    let config = ChartConfig {
        value_max: 2.0,
        ..ChartConfig::default()
    };
    let data = chart::prepare(&regions(), "Honolulu", TransportType::Driving, &config).unwrap();
    assert_eq!(data.domain.value.max, 2.0);
    assert_eq!(data.ticks.last().map(|t| t.value), Some(2.0));
}

#[test]
fn unrecognized_transport_row_leaves_other_regions_available() {
    let csv = "\
geo_type,region,transportation_type,alternative_name,2020-01-13,2020-01-14
city,Honolulu,driving,,100,95
city,Oslo,cycling,,100,90
";
    let g = group::group_by_region(storage::parse_records(csv.as_bytes()).unwrap());
    let data = chart::prepare(&g, "Honolulu", TransportType::Driving, &ChartConfig::default()).unwrap();
    assert_eq!(data.series.points[1].percentage_change, "-5%");
    assert!(matches!(
        chart::prepare(&g, "Oslo", TransportType::Driving, &ChartConfig::default()),
        Err(TrendError::Lookup { .. })
    ));
}
