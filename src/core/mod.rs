pub mod layout;
pub mod palette;
pub mod scene_graph;
pub mod types;

pub use layout::{ChartBounds, ChartGeometry, ChartLayout, LayoutParams, estimate_label_width_px};
pub use palette::{ColorAssignment, DEFAULT_PALETTE_RGB, blend_weighted_color, default_palette};
pub use scene_graph::{
    CharacterPair, InteractionSnapshot, SceneBatch, SceneGraphSource, SceneRef, Trajectories,
    canonicalize_trajectories,
};
pub use types::{GridCell, Height, SceneIndex, TrajectoryPoint, Viewport};
