use narrative_chart::api::NarrativeChartConfig;
use narrative_chart::core::default_palette;
use narrative_chart::render::Color;

#[test]
fn partial_json_fills_defaults() {
    let config =
        NarrativeChartConfig::from_json_str(r#"{ "scene_column_width_px": 40.0, "show_arcs": true }"#)
            .expect("parse config");

    assert_eq!(config.scene_column_width_px, 40.0);
    assert!(config.show_arcs);
    assert!(config.show_grid_lines);
    assert_eq!(config.vertical_spacing_px, 10.0);
    assert_eq!(config.base_tick_interval_ms, 40);
    assert_eq!(config.rate_multipliers, vec![0.25, 0.5, 1.0, 2.0, 4.0]);
    assert_eq!(config.palette, default_palette());
}

#[test]
fn json_round_trip_preserves_config() {
    let config = NarrativeChartConfig::default()
        .with_grid(24.0, 12.0)
        .with_weight_exponent(2.0)
        .with_palette(vec![Color::rgb(1.0, 0.0, 0.0), Color::rgba(0.0, 0.5, 1.0, 0.8)])
        .with_column_gray_levels(250, 220)
        .with_display(false, true);

    let json = config.to_json_pretty().expect("serialize");
    let parsed = NarrativeChartConfig::from_json_str(&json).expect("parse");
    assert_eq!(parsed, config);
}

#[test]
fn palette_alpha_defaults_to_opaque() {
    let config = NarrativeChartConfig::from_json_str(
        r#"{ "palette": [{ "red": 0.1, "green": 0.2, "blue": 0.3 }] }"#,
    )
    .expect("parse config");
    assert_eq!(config.palette, vec![Color::rgb(0.1, 0.2, 0.3)]);
}

#[test]
fn invalid_values_are_rejected_after_parsing() {
    for input in [
        r#"{ "weight_exponent": 0.0 }"#,
        r#"{ "rate_multipliers": [] }"#,
        r#"{ "rate_multipliers": [1.0, -2.0] }"#,
        r#"{ "palette": [] }"#,
        r#"{ "palette": [{ "red": 2.0, "green": 0.0, "blue": 0.0 }] }"#,
        r#"{ "base_tick_interval_ms": 0 }"#,
        r#"{ "label_padding_px": -1.0 }"#,
    ] {
        assert!(
            NarrativeChartConfig::from_json_str(input).is_err(),
            "accepted {input}"
        );
    }
}

#[test]
fn malformed_json_is_rejected() {
    assert!(NarrativeChartConfig::from_json_str("{ not json").is_err());
}
