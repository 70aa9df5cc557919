use serde::{Deserialize, Serialize};

use crate::error::ChartResult;
use crate::render::{RenderFrame, Renderer};

use super::NarrativeChartEngine;

/// Ordered repaint classes. Pointer-only changes are `Cursor`; anything that
/// moves or recolors storylines is `Full`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub enum InvalidationLevel {
    #[default]
    None,
    Cursor,
    Full,
}

/// Domain-oriented reason for a repaint request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InvalidationTopic {
    Layout,
    Selection,
    Pointer,
    Display,
}

impl InvalidationTopic {
    const fn bit(self) -> u8 {
        match self {
            Self::Layout => 1 << 0,
            Self::Selection => 1 << 1,
            Self::Pointer => 1 << 2,
            Self::Display => 1 << 3,
        }
    }
}

/// Bitmask of invalidation topics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct InvalidationTopics {
    bits: u8,
}

impl InvalidationTopics {
    const ALL_BITS: u8 = InvalidationTopic::Layout.bit()
        | InvalidationTopic::Selection.bit()
        | InvalidationTopic::Pointer.bit()
        | InvalidationTopic::Display.bit();

    #[must_use]
    pub const fn none() -> Self {
        Self { bits: 0 }
    }

    #[must_use]
    pub const fn all() -> Self {
        Self {
            bits: Self::ALL_BITS,
        }
    }

    #[must_use]
    pub const fn from_topic(topic: InvalidationTopic) -> Self {
        Self { bits: topic.bit() }
    }

    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self {
            bits: self.bits | other.bits,
        }
    }

    #[must_use]
    pub const fn contains_topic(self, topic: InvalidationTopic) -> bool {
        (self.bits & topic.bit()) != 0
    }

    #[must_use]
    pub const fn is_none(self) -> bool {
        self.bits == 0
    }
}

/// Coalesced invalidation request consumed by frame scheduling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct InvalidationMask {
    level: InvalidationLevel,
    topics: InvalidationTopics,
}

impl InvalidationMask {
    #[must_use]
    pub const fn none() -> Self {
        Self {
            level: InvalidationLevel::None,
            topics: InvalidationTopics::none(),
        }
    }

    #[must_use]
    pub const fn new(level: InvalidationLevel, topics: InvalidationTopics) -> Self {
        Self { level, topics }
    }

    #[must_use]
    pub const fn full() -> Self {
        Self {
            level: InvalidationLevel::Full,
            topics: InvalidationTopics::all(),
        }
    }

    #[must_use]
    pub const fn level(self) -> InvalidationLevel {
        self.level
    }

    #[must_use]
    pub const fn topics(self) -> InvalidationTopics {
        self.topics
    }

    #[must_use]
    pub const fn has_topic(self, topic: InvalidationTopic) -> bool {
        self.topics.contains_topic(topic)
    }

    #[must_use]
    pub const fn is_none(self) -> bool {
        matches!(self.level, InvalidationLevel::None)
    }

    pub fn merge(&mut self, other: Self) {
        self.level = self.level.max(other.level);
        self.topics = self.topics.union(other.topics);
    }
}

impl<R: Renderer> NarrativeChartEngine<R> {
    #[must_use]
    pub fn pending_invalidation(&self) -> InvalidationMask {
        self.pending_invalidation
    }

    #[must_use]
    pub fn pending_invalidation_level(&self) -> InvalidationLevel {
        self.pending_invalidation.level()
    }

    #[must_use]
    pub fn has_pending_invalidation(&self) -> bool {
        !self.pending_invalidation.is_none()
    }

    #[must_use]
    pub fn has_pending_invalidation_topic(&self, topic: InvalidationTopic) -> bool {
        self.pending_invalidation.has_topic(topic)
    }

    pub fn clear_pending_invalidation(&mut self) {
        self.pending_invalidation = InvalidationMask::none();
    }

    /// Returns and clears the pending mask, for hosts that schedule redraws
    /// themselves.
    #[must_use]
    pub fn take_pending_invalidation(&mut self) -> InvalidationMask {
        std::mem::take(&mut self.pending_invalidation)
    }

    /// Builds a frame only when something changed since the last draw.
    pub fn build_render_frame_if_invalidated(&mut self) -> ChartResult<Option<RenderFrame>> {
        if !self.has_pending_invalidation() {
            return Ok(None);
        }
        let frame = self.build_render_frame()?;
        self.clear_pending_invalidation();
        Ok(Some(frame))
    }

    /// Draws once for any burst of mutations since the last draw.
    pub fn render_if_invalidated(&mut self) -> ChartResult<bool> {
        if !self.has_pending_invalidation() {
            return Ok(false);
        }
        self.render()?;
        Ok(true)
    }

    pub(super) fn invalidate(&mut self, level: InvalidationLevel, topic: InvalidationTopic) {
        self.pending_invalidation.merge(InvalidationMask::new(
            level,
            InvalidationTopics::from_topic(topic),
        ));
    }

    pub(super) fn invalidate_full(&mut self) {
        self.pending_invalidation.merge(InvalidationMask::full());
    }
}
