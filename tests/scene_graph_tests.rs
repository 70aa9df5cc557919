use narrative_chart::ChartError;
use narrative_chart::core::{
    CharacterPair, InteractionSnapshot, SceneBatch, SceneGraphSource, SceneRef,
    TrajectoryPoint, canonicalize_trajectories,
};

#[test]
fn snapshot_weight_ignores_pair_order() {
    let snapshot = InteractionSnapshot::from_weights([("Bob", "Ann", 0.4)]).expect("weights");

    assert_eq!(snapshot.weight("Ann", "Bob"), 0.4);
    assert_eq!(snapshot.weight("Bob", "Ann"), 0.4);
    assert_eq!(snapshot.weight("Ann", "Cid"), 0.0);
    assert_eq!(snapshot.len(), 1);
}

#[test]
fn snapshot_rejects_weights_outside_unit_interval() {
    for weight in [-0.1, 1.5, f64::NAN] {
        let err = InteractionSnapshot::from_weights([("A", "B", weight)])
            .expect_err("invalid weight");
        assert!(matches!(err, ChartError::InvalidData(_)));
    }
}

#[test]
fn canonical_pair_sorts_names() {
    let pair = CharacterPair::new("Zoe", "Adam");
    assert_eq!((pair.first(), pair.second()), ("Adam", "Zoe"));
}

#[test]
fn canonicalize_sorts_points_by_scene() {
    let batch = SceneBatch::new().with_trajectory("A", &[(2, 1), (0, 3), (1, 2)]);
    let trajectories = canonicalize_trajectories(batch.trajectories).expect("canonical");

    assert_eq!(
        trajectories["A"],
        vec![
            TrajectoryPoint::new(0, 3),
            TrajectoryPoint::new(1, 2),
            TrajectoryPoint::new(2, 1),
        ]
    );
}

#[test]
fn canonicalize_rejects_repeated_scenes_and_ragged_domains() {
    let repeated = SceneBatch::new().with_trajectory("A", &[(0, 0), (0, 1)]);
    assert!(canonicalize_trajectories(repeated.trajectories).is_err());

    let ragged = SceneBatch::new()
        .with_trajectory("A", &[(0, 0), (1, 0)])
        .with_trajectory("B", &[(1, 0), (2, 0)]);
    assert!(canonicalize_trajectories(ragged.trajectories).is_err());
}

#[test]
fn scene_batch_serves_each_collection() {
    let batch = SceneBatch::new()
        .with_trajectory("A", &[(0, 0)])
        .with_snapshots(vec![InteractionSnapshot::new()])
        .with_scene_refs(vec![SceneRef::new(true, 42)]);

    assert_eq!(batch.narrative_chart().len(), 1);
    assert_eq!(batch.network_views().len(), 1);
    assert_eq!(batch.scene_refs(), vec![SceneRef::new(true, 42)]);
}
