use mobility_trends::ValueDomain;
use mobility_trends::axis::value_ticks;
use mobility_trends::ticks::{BaselineLabel, ChartGeometry, Rgb, TickKind, TickPolicy, TickStyle};

fn geometry() -> ChartGeometry {
    ChartGeometry {
        chart_width: 850.0,
        left_margin: 50.0,
        right_margin: 100.0,
        tick_offset: 46.0,
    }
}

fn policy(max: f64) -> TickPolicy {
    TickPolicy::new(ValueDomain::up_to(max), geometry(), TickStyle::default())
}

#[test]
fn every_candidate_gets_exactly_one_kind() {
    for max in [1.5, 2.0] {
        let p = policy(max);
        for i in 0..=(max * 10.0).round() as i64 {
            let v = i as f64 / 10.0;
            let d = p.decide(v);
            let expected = if i == 10 {
                TickKind::Baseline
            } else if i == 0 {
                TickKind::Zero
            } else if i % 2 == 0 {
                TickKind::Round
            } else {
                TickKind::Ordinary
            };
            assert_eq!(d.kind, expected, "v = {v}");
            assert!(d.visible);
        }
    }
}

#[test]
fn baseline_wins_over_round_rule() {
    // 1.0 * 10 is even, but the baseline row comes first.
    let d = policy(1.5).decide(1.0);
    assert_eq!(d.kind, TickKind::Baseline);
    assert_eq!(d.gridline_offset, 0.0);
    assert_eq!(d.gridline_length, 1000.0);
    assert_eq!(d.stroke, Rgb::new(99, 99, 102));
    assert_eq!(d.stroke_opacity, 1.0);
    assert!(d.label_visible);
    assert_eq!(d.label_text, "Baseline");
}

#[test]
fn baseline_ignores_geometry_constants() {
    for (w, off) in [(100.0, 0.0), (5000.0, 300.0)] {
        let g = ChartGeometry {
            chart_width: w,
            tick_offset: off,
            ..geometry()
        };
        let d = TickPolicy::new(ValueDomain::up_to(1.5), g, TickStyle::default()).decide(1.0);
        assert!(d.visible && d.label_visible);
        assert_eq!(d.gridline_offset, 0.0);
        assert_eq!(d.gridline_length, g.full_span());
        assert_eq!(d.label_text, "Baseline");
    }
}

#[test]
fn baseline_percent_variant_reads_plus_zero() {
    let style = TickStyle {
        baseline_label: BaselineLabel::Percent,
        ..TickStyle::default()
    };
    let d = TickPolicy::new(ValueDomain::up_to(1.5), geometry(), style).decide(1.0);
    assert_eq!(d.label_text, "+0%");
}

#[test]
fn zero_tick_has_full_line_and_no_label() {
    let d = policy(1.5).decide(0.0);
    assert_eq!(d.kind, TickKind::Zero);
    assert_eq!(d.gridline_length, 1000.0);
    assert_eq!(d.gridline_offset, 0.0);
    assert!(!d.label_visible);
    assert_eq!(d.stroke, Rgb::new(0xd6, 0xd6, 0xd6));
}

#[test]
fn odd_tenth_is_hidden_and_unshifted() {
    let d = policy(1.5).decide(0.3);
    assert_eq!(d.kind, TickKind::Ordinary);
    assert!(!d.label_visible);
    assert_eq!(d.gridline_length, 1000.0);
    assert_eq!(d.gridline_offset, 0.0);
    assert_eq!(d.stroke_opacity, 0.5);
}

#[test]
fn even_tenth_is_shifted_and_labelled() {
    let d = policy(1.5).decide(0.8);
    assert_eq!(d.kind, TickKind::Round);
    assert_eq!(d.gridline_offset, 46.0);
    assert_eq!(d.gridline_length, 954.0);
    assert!(d.label_visible);
    assert_eq!(d.label_text, "-20%");

    assert_eq!(policy(1.5).decide(1.4).label_text, "+40%");
}

#[test]
fn decisions_are_deterministic() {
    let p = policy(2.0);
    for v in value_ticks(ValueDomain::up_to(2.0), 12) {
        assert_eq!(p.decide(v), p.decide(v));
    }
}

#[test]
fn ticks_outside_domain_are_not_visible() {
    let d = policy(1.5).decide(1.6);
    assert!(!d.visible);
    assert!(!d.label_visible);
}

#[test]
fn labelled_ticks_fall_every_twenty_percent() {
    let p = policy(1.5);
    let labels: Vec<String> = value_ticks(ValueDomain::up_to(1.5), 12)
        .into_iter()
        .map(|v| p.decide(v))
        .filter(|d| d.label_visible)
        .map(|d| d.label_text)
        .collect();
    assert_eq!(
        labels,
        vec!["-80%", "-60%", "-40%", "-20%", "Baseline", "+20%", "+40%"]
    );
}
