use tracing::trace;

use crate::core::SceneIndex;
use crate::error::{ChartError, ChartResult};
use crate::playback::TickSchedule;
use crate::render::Renderer;

use super::NarrativeChartEngine;

/// Horizontal span the host should scroll into view after a tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollRequest {
    pub scene: SceneIndex,
    pub column_left: f64,
    pub column_right: f64,
    pub center_x: f64,
    pub wrapped: bool,
}

impl<R: Renderer> NarrativeChartEngine<R> {
    pub fn play(&mut self) -> TickSchedule {
        self.scrubber.play()
    }

    pub fn pause(&mut self) -> TickSchedule {
        self.scrubber.pause()
    }

    pub fn stop(&mut self) -> TickSchedule {
        self.scrubber.stop()
    }

    /// Sets the multiplier used by the next `play()`.
    pub fn set_rate(&mut self, rate_multiplier: f64) -> ChartResult<()> {
        self.scrubber.set_rate(rate_multiplier)
    }

    #[must_use]
    pub fn rate_options(&self) -> &[f64] {
        &self.config.rate_multipliers
    }

    /// Picks one of the configured selectable multipliers.
    pub fn select_rate_option(&mut self, index: usize) -> ChartResult<f64> {
        let rate = self
            .config
            .rate_multipliers
            .get(index)
            .copied()
            .ok_or_else(|| {
                ChartError::InvalidConfig(format!(
                    "rate option {index} out of range (0..{})",
                    self.config.rate_multipliers.len()
                ))
            })?;
        self.scrubber.set_rate(rate)?;
        Ok(rate)
    }

    /// Advances the scene cursor for one timer firing.
    ///
    /// Returns the column to bring into view, or `None` when playback is not
    /// running. Ticks do not touch the chart itself, so nothing is
    /// invalidated.
    pub fn tick(&mut self) -> Option<ScrollRequest> {
        let tick = self.scrubber.on_tick()?;
        let column_left = self.layout.column_left(tick.scene);
        let column_right = column_left + self.layout.geometry().column_width;
        trace!(scene = tick.scene, column_left, "scroll to playback cursor");

        Some(ScrollRequest {
            scene: tick.scene,
            column_left,
            column_right,
            center_x: self.layout.scene_center_x(tick.scene),
            wrapped: tick.wrapped,
        })
    }
}
