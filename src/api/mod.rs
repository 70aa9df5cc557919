mod data_controller;
mod engine;
mod engine_config;
mod interaction_controller;
mod invalidation;
mod playback_controller;
mod render_frame_builder;

pub use engine::{DisplayToggles, NarrativeChartEngine};
pub use engine_config::NarrativeChartConfig;
pub use invalidation::{InvalidationLevel, InvalidationMask, InvalidationTopic, InvalidationTopics};
pub use playback_controller::ScrollRequest;
pub use render_frame_builder::{
    FrameInputs, FrameStyle, build_frame, column_gray_level, segment_weight,
};
