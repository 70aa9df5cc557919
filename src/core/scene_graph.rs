//! Input contract with the interaction graph builder.
//!
//! The builder owns the decision of who interacts with whom and how strongly;
//! this module only carries its results into the chart.

use std::collections::BTreeMap;

use indexmap::{Equivalent, IndexMap};
use serde::{Deserialize, Serialize};

use crate::core::{SceneIndex, TrajectoryPoint};
use crate::error::{ChartError, ChartResult};

/// Storylines keyed by character name.
///
/// Key order (lexicographic by name) is the order used for color assignment,
/// label emission and hit-test tie breaks.
pub type Trajectories = BTreeMap<String, Vec<TrajectoryPoint>>;

/// Unordered pair of characters stored in canonical (sorted) order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CharacterPair {
    first: String,
    second: String,
}

impl CharacterPair {
    #[must_use]
    pub fn new(a: impl Into<String>, b: impl Into<String>) -> Self {
        let (a, b) = (a.into(), b.into());
        if a <= b {
            Self {
                first: a,
                second: b,
            }
        } else {
            Self {
                first: b,
                second: a,
            }
        }
    }

    #[must_use]
    pub fn first(&self) -> &str {
        &self.first
    }

    #[must_use]
    pub fn second(&self) -> &str {
        &self.second
    }
}

/// Borrowed lookup key; hashes like `CharacterPair` so lookups skip allocation.
#[derive(Hash)]
struct PairKey<'a> {
    first: &'a str,
    second: &'a str,
}

impl<'a> PairKey<'a> {
    fn new(a: &'a str, b: &'a str) -> Self {
        let (first, second) = if a <= b { (a, b) } else { (b, a) };
        Self { first, second }
    }
}

impl Equivalent<CharacterPair> for PairKey<'_> {
    fn equivalent(&self, key: &CharacterPair) -> bool {
        self.first == key.first && self.second == key.second
    }
}

/// Pairwise interaction weights for one scene. Absent pairs weigh 0.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct InteractionSnapshot {
    weights: IndexMap<CharacterPair, f64>,
}

impl InteractionSnapshot {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_weights<I, A, B>(weights: I) -> ChartResult<Self>
    where
        I: IntoIterator<Item = (A, B, f64)>,
        A: Into<String>,
        B: Into<String>,
    {
        let mut snapshot = Self::new();
        for (a, b, weight) in weights {
            snapshot.insert(a, b, weight)?;
        }
        Ok(snapshot)
    }

    /// Records the weight of one pair, replacing any previous value.
    pub fn insert(
        &mut self,
        a: impl Into<String>,
        b: impl Into<String>,
        weight: f64,
    ) -> ChartResult<()> {
        if !weight.is_finite() || !(0.0..=1.0).contains(&weight) {
            return Err(ChartError::InvalidData(format!(
                "interaction weight must be finite and in [0, 1], got {weight}"
            )));
        }
        self.weights.insert(CharacterPair::new(a, b), weight);
        Ok(())
    }

    #[must_use]
    pub fn weight(&self, a: &str, b: &str) -> f64 {
        self.weights
            .get(&PairKey::new(a, b))
            .copied()
            .unwrap_or(0.0)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}

/// Per-column scene reference; `parity` only drives background shading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneRef {
    pub parity: bool,
    pub raw_id: i64,
}

impl SceneRef {
    #[must_use]
    pub const fn new(parity: bool, raw_id: i64) -> Self {
        Self { parity, raw_id }
    }
}

/// Pull-based source of one chart batch.
///
/// Each method is called exactly once per chart-build request.
pub trait SceneGraphSource {
    fn narrative_chart(&self) -> Trajectories;

    /// Snapshots ordered by displayed column (first scene first).
    fn network_views(&self) -> Vec<InteractionSnapshot>;

    /// Scene references ordered by displayed column.
    fn scene_refs(&self) -> Vec<SceneRef>;
}

/// Owned batch a host can fill directly instead of implementing
/// `SceneGraphSource` on its own graph type.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SceneBatch {
    pub trajectories: Trajectories,
    pub snapshots: Vec<InteractionSnapshot>,
    pub scene_refs: Vec<SceneRef>,
}

impl SceneBatch {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_trajectory(
        mut self,
        name: impl Into<String>,
        points: &[(SceneIndex, crate::core::Height)],
    ) -> Self {
        self.trajectories.insert(
            name.into(),
            points
                .iter()
                .map(|&(scene, height)| TrajectoryPoint::new(scene, height))
                .collect(),
        );
        self
    }

    #[must_use]
    pub fn with_snapshots(mut self, snapshots: Vec<InteractionSnapshot>) -> Self {
        self.snapshots = snapshots;
        self
    }

    #[must_use]
    pub fn with_scene_refs(mut self, scene_refs: Vec<SceneRef>) -> Self {
        self.scene_refs = scene_refs;
        self
    }
}

impl SceneGraphSource for SceneBatch {
    fn narrative_chart(&self) -> Trajectories {
        self.trajectories.clone()
    }

    fn network_views(&self) -> Vec<InteractionSnapshot> {
        self.snapshots.clone()
    }

    fn scene_refs(&self) -> Vec<SceneRef> {
        self.scene_refs.clone()
    }
}

/// Sorts every storyline by scene and checks that all storylines cover the
/// same scene domain without repeated scenes.
pub fn canonicalize_trajectories(mut trajectories: Trajectories) -> ChartResult<Trajectories> {
    let mut reference: Option<(String, Vec<SceneIndex>)> = None;

    for (name, points) in &mut trajectories {
        points.sort_by_key(|point| point.scene);
        if points.windows(2).any(|pair| pair[0].scene == pair[1].scene) {
            return Err(ChartError::InvalidData(format!(
                "trajectory `{name}` repeats a scene index"
            )));
        }

        let scenes: Vec<SceneIndex> = points.iter().map(|point| point.scene).collect();
        match &reference {
            None => reference = Some((name.clone(), scenes)),
            Some((reference_name, reference_scenes)) => {
                if *reference_scenes != scenes {
                    return Err(ChartError::InvalidData(format!(
                        "trajectory `{name}` does not span the same scenes as `{reference_name}`"
                    )));
                }
            }
        }
    }

    Ok(trajectories)
}
