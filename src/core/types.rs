use serde::{Deserialize, Serialize};

/// Index of a scene in the host's scene sequence.
pub type SceneIndex = i32;

/// Discrete vertical rank of a character inside one scene.
pub type Height = i32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// One vertex of a storyline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TrajectoryPoint {
    pub scene: SceneIndex,
    pub height: Height,
}

impl TrajectoryPoint {
    #[must_use]
    pub const fn new(scene: SceneIndex, height: Height) -> Self {
        Self { scene, height }
    }

    #[must_use]
    pub const fn cell(self) -> GridCell {
        GridCell {
            scene: self.scene,
            height: self.height,
        }
    }
}

/// Discrete (scene, height) cell the pointer resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridCell {
    pub scene: SceneIndex,
    pub height: Height,
}

impl GridCell {
    #[must_use]
    pub const fn new(scene: SceneIndex, height: Height) -> Self {
        Self { scene, height }
    }
}
