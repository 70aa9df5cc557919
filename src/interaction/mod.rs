use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::{ChartLayout, GridCell, Trajectories};

/// Last pointer position in surface pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerPosition {
    pub x: f64,
    pub y: f64,
}

impl PointerPosition {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Public selection state exposed to host applications.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SelectionState {
    pub selected: Option<String>,
    pub pinned: bool,
    pub pointer: Option<PointerPosition>,
}

impl SelectionState {
    #[must_use]
    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.selected.is_some()
    }
}

/// Exact-match storyline picker driven by pointer events.
///
/// A pointer resolves to a character only when it lands on the grid cell of
/// one of that character's vertices; there is no nearest-point fallback.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SelectionTracker {
    state: SelectionState,
}

impl SelectionTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    /// Drops selection and pin, used when a new chart is built.
    pub fn reset(&mut self) {
        self.state = SelectionState::default();
    }

    pub fn on_pointer_move(
        &mut self,
        position: PointerPosition,
        layout: &ChartLayout,
        trajectories: &Trajectories,
    ) -> &SelectionState {
        self.state.pointer = Some(position);
        if self.state.pinned {
            return &self.state;
        }

        let resolved = resolve_character_at(layout, trajectories, position);
        if resolved != self.state.selected() {
            trace!(selected = ?resolved, "storyline selection changed");
            self.state.selected = resolved.map(str::to_owned);
        }
        &self.state
    }

    /// Toggles the pin when the double-clicked storyline is the selected one.
    pub fn on_double_click(
        &mut self,
        position: PointerPosition,
        layout: &ChartLayout,
        trajectories: &Trajectories,
    ) -> &SelectionState {
        self.state.pointer = Some(position);

        let resolved = resolve_character_at(layout, trajectories, position);
        if let Some(name) = resolved
            && self.state.selected() == Some(name)
        {
            self.state.pinned = !self.state.pinned;
            trace!(selected = name, pinned = self.state.pinned, "storyline pin toggled");
        }
        &self.state
    }

    /// Pointer left the surface: hover selection is cleared unless pinned.
    pub fn on_pointer_leave(&mut self) -> &SelectionState {
        self.state.pointer = None;
        if !self.state.pinned && self.state.selected.take().is_some() {
            trace!("storyline selection cleared on pointer leave");
        }
        &self.state
    }
}

/// Maps a pixel position to the character whose vertex occupies that grid cell.
#[must_use]
pub fn resolve_character_at<'a>(
    layout: &ChartLayout,
    trajectories: &'a Trajectories,
    position: PointerPosition,
) -> Option<&'a str> {
    let cell = layout.pixel_to_cell(position.x, position.y)?;
    character_at_cell(trajectories, cell)
}

/// First character in key order with a vertex exactly at `cell`.
#[must_use]
pub fn character_at_cell(trajectories: &Trajectories, cell: GridCell) -> Option<&str> {
    trajectories
        .iter()
        .find(|(_, points)| points.iter().any(|point| point.cell() == cell))
        .map(|(name, _)| name.as_str())
}
