use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{ChartLayout, InteractionSnapshot, SceneRef, Trajectories, Viewport};
use crate::error::ChartResult;
use crate::interaction::{SelectionState, SelectionTracker};
use crate::playback::{PlaybackScrubber, PlaybackState};
use crate::render::Renderer;

use super::{InvalidationLevel, InvalidationMask, InvalidationTopic, NarrativeChartConfig};

#[cfg(feature = "cairo-backend")]
use crate::render::CairoContextRenderer;

/// Visibility of the optional chart overlays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayToggles {
    pub grid_lines: bool,
    pub arcs: bool,
}

impl DisplayToggles {
    #[must_use]
    pub fn from_config(config: &NarrativeChartConfig) -> Self {
        Self {
            grid_lines: config.show_grid_lines,
            arcs: config.show_arcs,
        }
    }
}

/// Main orchestration facade consumed by host applications.
///
/// `NarrativeChartEngine` owns the scene batch, the derived layout, the
/// selection and playback state machines, and the renderer. Every mutation
/// records an invalidation; hosts redraw through `render` or
/// `render_if_invalidated`.
pub struct NarrativeChartEngine<R: Renderer> {
    pub(super) renderer: R,
    pub(super) config: NarrativeChartConfig,
    pub(super) layout: ChartLayout,
    pub(super) trajectories: Trajectories,
    pub(super) snapshots: Vec<InteractionSnapshot>,
    pub(super) scene_refs: Vec<SceneRef>,
    pub(super) selection: SelectionTracker,
    pub(super) scrubber: PlaybackScrubber,
    pub(super) display: DisplayToggles,
    pub(super) pending_invalidation: InvalidationMask,
}

impl<R: Renderer> NarrativeChartEngine<R> {
    /// Creates an engine holding an empty chart.
    pub fn new(renderer: R, config: NarrativeChartConfig) -> ChartResult<Self> {
        config.validate()?;

        let trajectories = Trajectories::new();
        let layout = ChartLayout::build(&trajectories, config.layout_params(), &config.palette);
        let scrubber =
            PlaybackScrubber::new(config.base_tick_interval(), config.initial_rate_multiplier)?;

        Ok(Self {
            renderer,
            display: DisplayToggles::from_config(&config),
            config,
            layout,
            trajectories,
            snapshots: Vec::new(),
            scene_refs: Vec::new(),
            selection: SelectionTracker::new(),
            scrubber,
            pending_invalidation: InvalidationMask::full(),
        })
    }

    #[must_use]
    pub fn config(&self) -> &NarrativeChartConfig {
        &self.config
    }

    #[must_use]
    pub fn layout(&self) -> &ChartLayout {
        &self.layout
    }

    #[must_use]
    pub fn trajectories(&self) -> &Trajectories {
        &self.trajectories
    }

    #[must_use]
    pub fn snapshots(&self) -> &[InteractionSnapshot] {
        &self.snapshots
    }

    #[must_use]
    pub fn scene_refs(&self) -> &[SceneRef] {
        &self.scene_refs
    }

    #[must_use]
    pub fn selection(&self) -> &SelectionState {
        self.selection.state()
    }

    #[must_use]
    pub fn playback_state(&self) -> PlaybackState {
        self.scrubber.state()
    }

    /// Size the host must give the drawing surface.
    #[must_use]
    pub fn surface_viewport(&self) -> Viewport {
        self.layout.viewport()
    }

    #[must_use]
    pub fn display_toggles(&self) -> DisplayToggles {
        self.display
    }

    #[must_use]
    pub fn grid_lines_visible(&self) -> bool {
        self.display.grid_lines
    }

    pub fn set_grid_lines_visible(&mut self, visible: bool) {
        if self.display.grid_lines == visible {
            return;
        }
        self.display.grid_lines = visible;
        debug!(visible, "grid lines toggled");
        self.invalidate(InvalidationLevel::Full, InvalidationTopic::Display);
    }

    #[must_use]
    pub fn arcs_visible(&self) -> bool {
        self.display.arcs
    }

    pub fn set_arcs_visible(&mut self, visible: bool) {
        if self.display.arcs == visible {
            return;
        }
        self.display.arcs = visible;
        debug!(visible, "interaction arcs toggled");
        self.invalidate(InvalidationLevel::Full, InvalidationTopic::Display);
    }

    /// Builds the current frame, hands it to the renderer and clears pending
    /// invalidation.
    pub fn render(&mut self) -> ChartResult<()> {
        let frame = self.build_render_frame()?;
        self.renderer.render(&frame)?;
        self.clear_pending_invalidation();
        Ok(())
    }

    /// Renders the frame into an external cairo context.
    ///
    /// This path is used by GTK draw callbacks while keeping the renderer
    /// implementation decoupled from GTK-specific APIs.
    #[cfg(feature = "cairo-backend")]
    pub fn render_on_cairo_context(&mut self, context: &cairo::Context) -> ChartResult<()>
    where
        R: CairoContextRenderer,
    {
        let frame = self.build_render_frame()?;
        self.renderer.render_on_cairo_context(context, &frame)?;
        self.clear_pending_invalidation();
        Ok(())
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }
}
