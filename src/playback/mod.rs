//! Timer-driven scene cursor used to auto-scroll the chart.
//!
//! The scrubber never owns a timer. Transport commands return a
//! [`TickSchedule`] telling the host what to do with its repeating timer, and
//! the host calls [`PlaybackScrubber::on_tick`] whenever that timer fires.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::SceneIndex;
use crate::error::{ChartError, ChartResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PlaybackPhase {
    #[default]
    Stopped,
    Playing,
    Paused,
}

/// Public playback state exposed to host applications.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackState {
    pub phase: PlaybackPhase,
    pub scene_cursor: SceneIndex,
    pub rate_multiplier: f64,
    pub base_tick_interval: Duration,
}

/// Timer instruction produced by a transport command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickSchedule {
    /// Start a repeating timer with this interval.
    Start { interval: Duration },
    /// Cancel the repeating timer.
    Cancel,
    /// Leave the current timer untouched.
    Unchanged,
}

/// Cursor position reported by one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrubTick {
    pub scene: SceneIndex,
    pub wrapped: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackScrubber {
    state: PlaybackState,
    first_scene: SceneIndex,
    last_scene: SceneIndex,
    active_interval: Option<Duration>,
}

impl PlaybackScrubber {
    pub fn new(base_tick_interval: Duration, rate_multiplier: f64) -> ChartResult<Self> {
        if base_tick_interval.is_zero() {
            return Err(ChartError::InvalidConfig(
                "base tick interval must be > 0".to_owned(),
            ));
        }
        validate_rate(rate_multiplier)?;

        Ok(Self {
            state: PlaybackState {
                phase: PlaybackPhase::Stopped,
                scene_cursor: 0,
                rate_multiplier,
                base_tick_interval,
            },
            first_scene: 0,
            last_scene: 0,
            active_interval: None,
        })
    }

    #[must_use]
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    #[must_use]
    pub fn phase(&self) -> PlaybackPhase {
        self.state.phase
    }

    #[must_use]
    pub fn scene_cursor(&self) -> SceneIndex {
        self.state.scene_cursor
    }

    #[must_use]
    pub fn scene_range(&self) -> (SceneIndex, SceneIndex) {
        (self.first_scene, self.last_scene)
    }

    /// Interval of the timer currently running, if any.
    #[must_use]
    pub fn scheduled_interval(&self) -> Option<Duration> {
        self.active_interval
    }

    /// Interval a `play()` issued now would schedule.
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        let nanos = self.state.base_tick_interval.as_nanos() as f64 / self.state.rate_multiplier;
        Duration::from_nanos(nanos.round().clamp(1.0, u64::MAX as f64) as u64)
    }

    /// Moves the scrubber onto a new scene range and stops playback.
    pub fn set_scene_range(
        &mut self,
        first_scene: SceneIndex,
        last_scene: SceneIndex,
    ) -> TickSchedule {
        self.first_scene = first_scene.min(last_scene);
        self.last_scene = first_scene.max(last_scene);
        self.stop()
    }

    pub fn play(&mut self) -> TickSchedule {
        match self.state.phase {
            PlaybackPhase::Playing => TickSchedule::Unchanged,
            PlaybackPhase::Stopped | PlaybackPhase::Paused => {
                let interval = self.tick_interval();
                self.state.phase = PlaybackPhase::Playing;
                self.active_interval = Some(interval);
                debug!(
                    interval_ms = interval.as_secs_f64() * 1000.0,
                    cursor = self.state.scene_cursor,
                    "playback started"
                );
                TickSchedule::Start { interval }
            }
        }
    }

    pub fn pause(&mut self) -> TickSchedule {
        if self.state.phase != PlaybackPhase::Playing {
            return TickSchedule::Unchanged;
        }
        self.state.phase = PlaybackPhase::Paused;
        self.active_interval = None;
        debug!(cursor = self.state.scene_cursor, "playback paused");
        TickSchedule::Cancel
    }

    pub fn stop(&mut self) -> TickSchedule {
        let was_running = self.active_interval.take().is_some();
        self.state.phase = PlaybackPhase::Stopped;
        self.state.scene_cursor = self.first_scene;
        debug!(cursor = self.state.scene_cursor, "playback stopped");
        if was_running {
            TickSchedule::Cancel
        } else {
            TickSchedule::Unchanged
        }
    }

    /// Stores the multiplier for the next `play()`.
    ///
    /// A timer that is already running keeps its interval.
    pub fn set_rate(&mut self, rate_multiplier: f64) -> ChartResult<()> {
        validate_rate(rate_multiplier)?;
        self.state.rate_multiplier = rate_multiplier;
        debug!(rate_multiplier, "playback rate updated");
        Ok(())
    }

    /// Advances the cursor by one scene, wrapping past the last scene.
    ///
    /// Returns `None` when playback is not running.
    pub fn on_tick(&mut self) -> Option<ScrubTick> {
        if self.state.phase != PlaybackPhase::Playing {
            return None;
        }

        let next = self
            .state
            .scene_cursor
            .checked_add(1)
            .filter(|next| (self.first_scene..=self.last_scene).contains(next));
        let wrapped = next.is_none();
        self.state.scene_cursor = next.unwrap_or(self.first_scene);
        trace!(cursor = self.state.scene_cursor, wrapped, "playback tick");

        Some(ScrubTick {
            scene: self.state.scene_cursor,
            wrapped,
        })
    }
}

fn validate_rate(rate_multiplier: f64) -> ChartResult<()> {
    if !rate_multiplier.is_finite() || rate_multiplier <= 0.0 {
        return Err(ChartError::InvalidConfig(format!(
            "playback rate multiplier must be finite and > 0, got {rate_multiplier}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::{PlaybackPhase, PlaybackScrubber, TickSchedule};

    fn scrubber() -> PlaybackScrubber {
        let mut scrubber =
            PlaybackScrubber::new(Duration::from_millis(40), 1.0).expect("scrubber");
        scrubber.set_scene_range(5, 7);
        scrubber
    }

    #[test]
    fn ticks_are_ignored_unless_playing() {
        let mut scrubber = scrubber();
        assert_eq!(scrubber.on_tick(), None);
        scrubber.play();
        scrubber.pause();
        assert_eq!(scrubber.on_tick(), None);
        assert_eq!(scrubber.scene_cursor(), 5);
    }

    #[test]
    fn pause_outside_playing_is_a_no_op() {
        let mut scrubber = scrubber();
        assert_eq!(scrubber.pause(), TickSchedule::Unchanged);
        assert_eq!(scrubber.phase(), PlaybackPhase::Stopped);
    }

    #[test]
    fn play_while_playing_keeps_timer() {
        let mut scrubber = scrubber();
        assert_eq!(
            scrubber.play(),
            TickSchedule::Start {
                interval: Duration::from_millis(40)
            }
        );
        assert_eq!(scrubber.play(), TickSchedule::Unchanged);
    }

    #[test]
    fn invalid_rates_are_rejected() {
        let mut scrubber = scrubber();
        assert!(scrubber.set_rate(0.0).is_err());
        assert!(scrubber.set_rate(f64::INFINITY).is_err());
        assert!(PlaybackScrubber::new(Duration::ZERO, 1.0).is_err());
    }

    #[test]
    fn new_scene_range_stops_and_rewinds() {
        let mut scrubber = scrubber();
        scrubber.play();
        scrubber.on_tick();
        assert_eq!(scrubber.set_scene_range(10, 12), TickSchedule::Cancel);
        assert_eq!(scrubber.phase(), PlaybackPhase::Stopped);
        assert_eq!(scrubber.scene_cursor(), 10);
    }
}
