use approx::assert_relative_eq;
use narrative_chart::api::{NarrativeChartConfig, NarrativeChartEngine};
use narrative_chart::core::{
    ChartBounds, ChartLayout, GridCell, SceneBatch, Trajectories, default_palette,
    estimate_label_width_px,
};
use narrative_chart::render::NullRenderer;

fn two_characters() -> SceneBatch {
    SceneBatch::new()
        .with_trajectory("A", &[(0, 0), (1, 0), (2, 1)])
        .with_trajectory("B", &[(0, 1), (1, 1), (2, 0)])
}

fn build(trajectories: &Trajectories) -> ChartLayout {
    let config = NarrativeChartConfig::default();
    ChartLayout::build(trajectories, config.layout_params(), &config.palette)
}

#[test]
fn bounds_cover_every_point() {
    let batch = SceneBatch::new()
        .with_trajectory("Ann", &[(3, -2), (4, 5), (5, 1)])
        .with_trajectory("Bob", &[(3, 0), (4, 7), (5, -4)]);

    let bounds = ChartBounds::from_trajectories(&batch.trajectories);
    assert_eq!(bounds.first_scene, 3);
    assert_eq!(bounds.last_scene, 5);
    assert_eq!(bounds.min_height, -4);
    assert_eq!(bounds.max_height, 7);
    assert_eq!(bounds.scene_count(), 3);
}

#[test]
fn surface_size_follows_column_and_spacing_formulas() {
    let batch = two_characters();
    let layout = build(&batch.trajectories);
    let geometry = layout.geometry();

    let widest = estimate_label_width_px("A", 11.0).max(estimate_label_width_px("B", 11.0));
    assert_relative_eq!(geometry.left_margin, widest + 20.0);
    assert_relative_eq!(geometry.top_margin, 40.0);
    assert_relative_eq!(geometry.width, 3.0 * 30.0 + 2.0 * geometry.left_margin);
    assert_relative_eq!(geometry.height, (1.0 - 0.0 + 10.0) * 10.0);
}

#[test]
fn longer_names_widen_the_left_margin() {
    let short = build(&two_characters().trajectories);
    let long = build(
        &two_characters()
            .with_trajectory("Bartholomew", &[(0, 2), (1, 2), (2, 2)])
            .trajectories,
    );
    assert!(long.geometry().left_margin > short.geometry().left_margin);
}

#[test]
fn column_and_height_mapping() {
    let layout = build(&two_characters().trajectories);
    let geometry = layout.geometry();

    assert_relative_eq!(layout.column_left(0), geometry.left_margin);
    assert_relative_eq!(layout.column_left(2), geometry.left_margin + 60.0);
    assert_relative_eq!(layout.scene_center_x(1), geometry.left_margin + 45.0);
    assert_relative_eq!(layout.height_to_y(0), 40.0);
    assert_relative_eq!(layout.height_to_y(1), 50.0);
    assert_eq!(layout.column_of(2), Some(2));
    assert_eq!(layout.column_of(3), None);
}

#[test]
fn pixel_to_cell_floors_columns_and_rounds_rows() {
    let layout = build(&two_characters().trajectories);
    let left = layout.geometry().left_margin;

    assert_eq!(layout.pixel_to_cell(left + 1.0, 44.0), Some(GridCell::new(0, 0)));
    assert_eq!(layout.pixel_to_cell(left + 29.0, 46.0), Some(GridCell::new(0, 1)));
    assert_eq!(layout.pixel_to_cell(left + 30.0, 50.0), Some(GridCell::new(1, 1)));
    assert_eq!(layout.pixel_to_cell(left - 1.0, 50.0), None);
    assert_eq!(layout.pixel_to_cell(left + 90.0, 50.0), None);
    assert_eq!(layout.pixel_to_cell(f64::NAN, 50.0), None);
}

#[test]
fn colors_follow_key_order_and_wrap_around_palette() {
    let palette = default_palette();
    let mut batch = SceneBatch::new();
    for index in 0..18 {
        batch = batch.with_trajectory(format!("c{index:02}"), &[(0, index)]);
    }

    let layout = build(&batch.trajectories);
    assert_eq!(layout.colors().len(), 18);
    for (index, (name, color)) in layout.colors().iter().enumerate() {
        assert_eq!(name, format!("c{index:02}"));
        assert_eq!(color, palette[index % palette.len()]);
    }
    assert_eq!(layout.colors().color_of("c16"), Some(palette[0]));
}

#[test]
fn colors_are_stable_across_renders() {
    let mut engine =
        NarrativeChartEngine::new(NullRenderer::default(), NarrativeChartConfig::default())
            .expect("engine init");
    engine.load_scenes(&two_characters()).expect("load");
    let before = engine.layout().colors().clone();

    engine.set_grid_lines_visible(false);
    engine.render().expect("render");
    engine.render().expect("render");

    assert_eq!(engine.layout().colors(), &before);
}

#[test]
fn empty_map_yields_degenerate_layout() {
    let layout = build(&Trajectories::new());

    assert_eq!(layout.bounds(), ChartBounds::empty());
    assert!(layout.colors().is_empty());
    assert_relative_eq!(layout.geometry().width, 30.0 + 2.0 * 20.0);
    assert_relative_eq!(layout.geometry().height, 100.0);
    assert!(layout.viewport().is_valid());
}

#[test]
fn rebuild_discards_previous_state() {
    let first = build(&two_characters().trajectories);
    let second = build(
        &SceneBatch::new()
            .with_trajectory("Z", &[(10, 3), (11, 4)])
            .trajectories,
    );

    assert_eq!(second.bounds().first_scene, 10);
    assert_eq!(second.colors().color_of("A"), None);
    assert_ne!(first.bounds(), second.bounds());
}
