//! narrative-chart: storyline visualization engine.
//!
//! Characters are drawn as storylines across fixed-width scene columns.
//! Interaction weights between characters fade storylines relative to a
//! hovered or pinned selection, and a playback scrubber walks the scenes on
//! a host-driven timer. Drawing goes through an ordered, backend-agnostic
//! `RenderFrame`.

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod playback;
pub mod render;
pub mod telemetry;

#[cfg(feature = "gtk4-adapter")]
pub mod platform_gtk;

pub use api::{NarrativeChartConfig, NarrativeChartEngine};
pub use error::{ChartError, ChartResult};
