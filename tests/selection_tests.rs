use narrative_chart::api::{NarrativeChartConfig, NarrativeChartEngine};
use narrative_chart::core::{InteractionSnapshot, SceneBatch};
use narrative_chart::render::NullRenderer;

fn engine() -> NarrativeChartEngine<NullRenderer> {
    let batch = SceneBatch::new()
        .with_trajectory("A", &[(0, 0), (1, 0), (2, 1)])
        .with_trajectory("B", &[(0, 1), (1, 1), (2, 0)])
        .with_snapshots(vec![
            InteractionSnapshot::new(),
            InteractionSnapshot::from_weights([("B", "A", 0.6)]).expect("valid weights"),
            InteractionSnapshot::new(),
        ]);
    let mut engine =
        NarrativeChartEngine::new(NullRenderer::default(), NarrativeChartConfig::default())
            .expect("engine init");
    engine.load_scenes(&batch).expect("load scenes");
    engine
}

fn at(engine: &NarrativeChartEngine<NullRenderer>, scene: i32, height: i32) -> (f64, f64) {
    (
        engine.layout().scene_center_x(scene),
        engine.layout().height_to_y(height),
    )
}

#[test]
fn pointer_on_vertex_selects_its_character() {
    let mut engine = engine();
    let (x, y) = at(&engine, 1, 0);

    let state = engine.pointer_move(x, y);
    assert_eq!(state.selected(), Some("A"));
    assert!(!state.pinned);
}

#[test]
fn pointer_anywhere_in_the_cell_resolves_the_same_vertex() {
    let mut engine = engine();
    let left = engine.layout().column_left(2);
    let y = engine.layout().height_to_y(1);

    assert_eq!(engine.pointer_move(left + 1.0, y + 4.0).selected(), Some("A"));
    assert_eq!(engine.pointer_move(left + 29.0, y - 4.0).selected(), Some("A"));
}

#[test]
fn pointer_off_any_vertex_clears_selection() {
    let mut engine = engine();
    let (x, y) = at(&engine, 1, 0);
    engine.pointer_move(x, y);

    let (x, y) = at(&engine, 1, 5);
    assert_eq!(engine.pointer_move(x, y).selected(), None);
    assert_eq!(engine.pointer_move(-10.0, -10.0).selected(), None);
}

#[test]
fn double_click_on_selected_character_toggles_pin() {
    let mut engine = engine();
    let (x, y) = at(&engine, 0, 0);
    engine.pointer_move(x, y);

    assert!(engine.double_click(x, y).pinned);
    assert!(!engine.double_click(x, y).pinned);
    assert!(engine.double_click(x, y).pinned);
    assert_eq!(engine.selection().selected(), Some("A"));
}

#[test]
fn pinned_selection_ignores_pointer_movement() {
    let mut engine = engine();
    let (x, y) = at(&engine, 0, 0);
    engine.pointer_move(x, y);
    engine.double_click(x, y);

    let (bx, by) = at(&engine, 0, 1);
    assert_eq!(engine.pointer_move(bx, by).selected(), Some("A"));
    assert_eq!(engine.pointer_move(-5.0, -5.0).selected(), Some("A"));
    assert_eq!(engine.pointer_leave().selected(), Some("A"));
}

#[test]
fn double_click_on_other_character_while_pinned_changes_nothing() {
    let mut engine = engine();
    let (x, y) = at(&engine, 0, 0);
    engine.pointer_move(x, y);
    engine.double_click(x, y);
    let before = (
        engine.selection().selected.clone(),
        engine.selection().pinned,
    );

    let (bx, by) = at(&engine, 0, 1);
    let state = engine.double_click(bx, by);
    assert_eq!((state.selected.clone(), state.pinned), before);
}

#[test]
fn double_click_without_selection_does_not_pin() {
    let mut engine = engine();
    let (x, y) = at(&engine, 1, 5);
    assert!(!engine.double_click(x, y).pinned);
    assert_eq!(engine.selection().selected(), None);
}

#[test]
fn first_character_in_key_order_wins_on_shared_cell() {
    let batch = SceneBatch::new()
        .with_trajectory("Zed", &[(0, 0), (1, 1)])
        .with_trajectory("Amy", &[(0, 0), (1, 2)]);
    let mut engine =
        NarrativeChartEngine::new(NullRenderer::default(), NarrativeChartConfig::default())
            .expect("engine init");
    engine.load_scenes(&batch).expect("load scenes");

    let (x, y) = at(&engine, 0, 0);
    assert_eq!(engine.pointer_move(x, y).selected(), Some("Amy"));
}

#[test]
fn reloading_scenes_drops_pinned_selection() {
    let mut engine = engine();
    let (x, y) = at(&engine, 0, 0);
    engine.pointer_move(x, y);
    engine.double_click(x, y);

    engine
        .load_scenes(&SceneBatch::new().with_trajectory("C", &[(0, 0)]))
        .expect("reload");
    assert_eq!(engine.selection().selected(), None);
    assert!(!engine.selection().pinned);
}
