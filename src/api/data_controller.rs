use tracing::warn;

use crate::core::{ChartLayout, SceneGraphSource, canonicalize_trajectories};
use crate::error::ChartResult;
use crate::playback::TickSchedule;
use crate::render::Renderer;

use super::NarrativeChartEngine;

impl<R: Renderer> NarrativeChartEngine<R> {
    /// Replaces the chart with a new scene batch and renders it.
    ///
    /// The source is pulled exactly once. Layout is rebuilt from scratch,
    /// selection is dropped and playback stops at the first scene of the new
    /// range; the returned schedule tells the host whether a running tick
    /// timer must be cancelled. Invalid batches are rejected before any state
    /// changes.
    pub fn load_scenes<S>(&mut self, source: &S) -> ChartResult<TickSchedule>
    where
        S: SceneGraphSource + ?Sized,
    {
        let trajectories = canonicalize_trajectories(source.narrative_chart())?;
        let snapshots = source.network_views();
        let scene_refs = source.scene_refs();

        let layout = ChartLayout::build(
            &trajectories,
            self.config.layout_params(),
            &self.config.palette,
        );
        let bounds = layout.bounds();
        let columns = if trajectories.is_empty() {
            0
        } else {
            bounds.scene_count()
        };

        if scene_refs.len() < columns {
            warn!(
                scene_refs = scene_refs.len(),
                columns, "scene references do not cover every column, using column parity"
            );
        }
        if snapshots.len() > columns {
            warn!(
                snapshots = snapshots.len(),
                columns, "more interaction snapshots than scene columns"
            );
        }

        self.trajectories = trajectories;
        self.snapshots = snapshots;
        self.scene_refs = scene_refs;
        self.layout = layout;
        self.selection.reset();
        let schedule = self
            .scrubber
            .set_scene_range(bounds.first_scene, bounds.last_scene);
        self.invalidate_full();
        self.render()?;
        Ok(schedule)
    }
}
