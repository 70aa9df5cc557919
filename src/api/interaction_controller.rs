use crate::interaction::{PointerPosition, SelectionState};
use crate::render::Renderer;

use super::{InvalidationLevel, InvalidationTopic, NarrativeChartEngine};

impl<R: Renderer> NarrativeChartEngine<R> {
    /// Hover handling: re-resolves the selection unless it is pinned.
    pub fn pointer_move(&mut self, x: f64, y: f64) -> &SelectionState {
        let before = self.selection.state().clone();
        self.selection
            .on_pointer_move(PointerPosition::new(x, y), &self.layout, &self.trajectories);
        self.invalidate_after_selection_event(&before);
        self.selection.state()
    }

    /// Toggles the pin when the double-clicked storyline is the selected one.
    pub fn double_click(&mut self, x: f64, y: f64) -> &SelectionState {
        let before = self.selection.state().clone();
        self.selection
            .on_double_click(PointerPosition::new(x, y), &self.layout, &self.trajectories);
        self.invalidate_after_selection_event(&before);
        self.selection.state()
    }

    pub fn pointer_leave(&mut self) -> &SelectionState {
        let before = self.selection.state().clone();
        self.selection.on_pointer_leave();
        self.invalidate_after_selection_event(&before);
        self.selection.state()
    }

    fn invalidate_after_selection_event(&mut self, before: &SelectionState) {
        let after = self.selection.state();
        let selection_changed = before.selected != after.selected || before.pinned != after.pinned;
        let pointer_changed = before.pointer != after.pointer;
        let active = after.is_active();

        if selection_changed {
            self.invalidate(InvalidationLevel::Full, InvalidationTopic::Selection);
        }
        // Hover label and hit marker follow the pointer.
        if pointer_changed && active {
            self.invalidate(InvalidationLevel::Cursor, InvalidationTopic::Pointer);
        }
    }
}
