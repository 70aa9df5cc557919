use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{ColorAssignment, GridCell, Height, SceneIndex, Trajectories, Viewport};
use crate::render::Color;

/// Spacing units added to the height span when sizing the surface.
pub const SURFACE_EXTRA_SPACING_UNITS: f64 = 10.0;

/// Scene and height extent covered by the trajectories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartBounds {
    pub first_scene: SceneIndex,
    pub last_scene: SceneIndex,
    pub min_height: Height,
    pub max_height: Height,
}

impl ChartBounds {
    /// Degenerate single-cell bounds used when no point exists.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            first_scene: 0,
            last_scene: 0,
            min_height: 0,
            max_height: 0,
        }
    }

    #[must_use]
    pub fn from_trajectories(trajectories: &Trajectories) -> Self {
        let mut points = trajectories.values().flatten();
        let Some(first) = points.next() else {
            return Self::empty();
        };

        points.fold(
            Self {
                first_scene: first.scene,
                last_scene: first.scene,
                min_height: first.height,
                max_height: first.height,
            },
            |bounds, point| Self {
                first_scene: bounds.first_scene.min(point.scene),
                last_scene: bounds.last_scene.max(point.scene),
                min_height: bounds.min_height.min(point.height),
                max_height: bounds.max_height.max(point.height),
            },
        )
    }

    #[must_use]
    pub fn scene_count(self) -> usize {
        usize::try_from(i64::from(self.last_scene) - i64::from(self.first_scene) + 1).unwrap_or(1)
    }

    #[must_use]
    pub fn contains_scene(self, scene: SceneIndex) -> bool {
        (self.first_scene..=self.last_scene).contains(&scene)
    }
}

/// Layout tuning taken from the chart configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutParams {
    pub scene_column_width_px: f64,
    pub vertical_spacing_px: f64,
    pub label_font_size_px: f64,
    pub label_padding_px: f64,
    pub top_margin_spacing_units: f64,
}

/// Pixel geometry of the render surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartGeometry {
    pub column_width: f64,
    pub vertical_spacing: f64,
    pub left_margin: f64,
    pub top_margin: f64,
    pub width: f64,
    pub height: f64,
}

/// Result of one full layout pass over a trajectory map.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartLayout {
    bounds: ChartBounds,
    geometry: ChartGeometry,
    colors: ColorAssignment,
    label_font_size_px: f64,
}

impl ChartLayout {
    /// Computes bounds, margins, surface size and color assignment.
    ///
    /// Linear in the total number of trajectory points; nothing from a
    /// previous layout is reused.
    #[must_use]
    pub fn build(trajectories: &Trajectories, params: LayoutParams, palette: &[Color]) -> Self {
        let bounds = ChartBounds::from_trajectories(trajectories);

        let widest_label = trajectories
            .keys()
            .map(|name| estimate_label_width_px(name, params.label_font_size_px))
            .fold(0.0, f64::max);
        let left_margin = widest_label + params.label_padding_px;
        let top_margin = params.top_margin_spacing_units * params.vertical_spacing_px;

        let scene_span = f64::from(bounds.last_scene) - f64::from(bounds.first_scene) + 1.0;
        let height_span = f64::from(bounds.max_height) - f64::from(bounds.min_height);
        let geometry = ChartGeometry {
            column_width: params.scene_column_width_px,
            vertical_spacing: params.vertical_spacing_px,
            left_margin,
            top_margin,
            width: scene_span * params.scene_column_width_px + 2.0 * left_margin,
            height: (height_span + SURFACE_EXTRA_SPACING_UNITS) * params.vertical_spacing_px,
        };

        let colors = ColorAssignment::assign(trajectories.keys().map(String::as_str), palette);

        debug!(
            characters = trajectories.len(),
            first_scene = bounds.first_scene,
            last_scene = bounds.last_scene,
            min_height = bounds.min_height,
            max_height = bounds.max_height,
            width = geometry.width,
            height = geometry.height,
            "built narrative chart layout"
        );

        Self {
            bounds,
            geometry,
            colors,
            label_font_size_px: params.label_font_size_px,
        }
    }

    #[must_use]
    pub fn bounds(&self) -> ChartBounds {
        self.bounds
    }

    #[must_use]
    pub fn geometry(&self) -> ChartGeometry {
        self.geometry
    }

    #[must_use]
    pub fn colors(&self) -> &ColorAssignment {
        &self.colors
    }

    #[must_use]
    pub fn label_font_size_px(&self) -> f64 {
        self.label_font_size_px
    }

    /// Render surface size rounded up to whole pixels.
    #[must_use]
    pub fn viewport(&self) -> Viewport {
        Viewport::new(
            ceil_to_pixels(self.geometry.width),
            ceil_to_pixels(self.geometry.height),
        )
    }

    /// Zero-based column position of `scene` inside the displayed range.
    #[must_use]
    pub fn column_of(&self, scene: SceneIndex) -> Option<usize> {
        if !self.bounds.contains_scene(scene) {
            return None;
        }
        usize::try_from(i64::from(scene) - i64::from(self.bounds.first_scene)).ok()
    }

    #[must_use]
    pub fn column_left(&self, scene: SceneIndex) -> f64 {
        let offset = f64::from(scene) - f64::from(self.bounds.first_scene);
        self.geometry.left_margin + offset * self.geometry.column_width
    }

    #[must_use]
    pub fn scene_center_x(&self, scene: SceneIndex) -> f64 {
        self.column_left(scene) + self.geometry.column_width / 2.0
    }

    #[must_use]
    pub fn height_to_y(&self, height: Height) -> f64 {
        let offset = f64::from(height) - f64::from(self.bounds.min_height);
        self.geometry.top_margin + offset * self.geometry.vertical_spacing
    }

    #[must_use]
    pub fn plot_top(&self) -> f64 {
        self.height_to_y(self.bounds.min_height)
    }

    #[must_use]
    pub fn plot_bottom(&self) -> f64 {
        self.height_to_y(self.bounds.max_height)
    }

    /// Inverts the column and height mapping.
    ///
    /// The scene is the column containing `x`; the height is the nearest
    /// spacing row. Returns `None` when `x` falls outside the scene columns.
    #[must_use]
    pub fn pixel_to_cell(&self, x: f64, y: f64) -> Option<GridCell> {
        if !x.is_finite() || !y.is_finite() {
            return None;
        }
        let column = ((x - self.geometry.left_margin) / self.geometry.column_width).floor();
        if column < 0.0 || column >= self.bounds.scene_count() as f64 {
            return None;
        }
        let row = ((y - self.geometry.top_margin) / self.geometry.vertical_spacing).round();
        if !row.is_finite() || row.abs() > f64::from(i32::MAX) {
            return None;
        }

        let scene = self.bounds.first_scene.checked_add(column as i32)?;
        let height = self.bounds.min_height.checked_add(row as i32)?;
        Some(GridCell::new(scene, height))
    }
}

/// Backend-independent label width estimate used for margin sizing.
#[must_use]
pub fn estimate_label_width_px(text: &str, font_size_px: f64) -> f64 {
    let units = text.chars().fold(0.0, |acc, ch| {
        acc + match ch {
            'i' | 'l' | 'j' | '.' | ',' | '\'' | '|' => 0.30,
            ' ' => 0.33,
            'm' | 'w' | 'M' | 'W' => 0.86,
            ch if ch.is_ascii_uppercase() => 0.68,
            ch if ch.is_ascii_digit() => 0.62,
            _ => 0.58,
        }
    });
    units * font_size_px
}

fn ceil_to_pixels(value: f64) -> u32 {
    if !value.is_finite() || value <= 1.0 {
        return 1;
    }
    value.ceil().min(f64::from(u32::MAX)) as u32
}
