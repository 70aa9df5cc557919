use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::{LayoutParams, default_palette};
use crate::error::{ChartError, ChartResult};
use crate::render::Color;

/// Public engine bootstrap configuration.
///
/// Serializable so host applications can keep chart tuning next to their own
/// settings. Missing JSON fields fall back to defaults. The configuration is
/// fixed for the lifetime of one engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NarrativeChartConfig {
    #[serde(default = "default_scene_column_width_px")]
    pub scene_column_width_px: f64,
    #[serde(default = "default_vertical_spacing_px")]
    pub vertical_spacing_px: f64,
    #[serde(default = "default_label_font_size_px")]
    pub label_font_size_px: f64,
    #[serde(default = "default_label_padding_px")]
    pub label_padding_px: f64,
    #[serde(default = "default_top_margin_spacing_units")]
    pub top_margin_spacing_units: f64,
    #[serde(default = "default_palette")]
    pub palette: Vec<Color>,
    #[serde(default = "default_weight_exponent")]
    pub weight_exponent: f64,
    #[serde(default = "default_base_tick_interval_ms")]
    pub base_tick_interval_ms: u64,
    #[serde(default = "default_rate_multipliers")]
    pub rate_multipliers: Vec<f64>,
    #[serde(default = "default_initial_rate_multiplier")]
    pub initial_rate_multiplier: f64,
    #[serde(default = "default_column_gray_levels")]
    pub column_gray_levels: [u8; 2],
    #[serde(default = "default_storyline_width_px")]
    pub storyline_width_px: f64,
    #[serde(default = "default_grid_line_color")]
    pub grid_line_color: Color,
    #[serde(default = "default_label_color")]
    pub label_color: Color,
    #[serde(default = "default_true")]
    pub show_grid_lines: bool,
    #[serde(default)]
    pub show_arcs: bool,
}

impl Default for NarrativeChartConfig {
    fn default() -> Self {
        Self {
            scene_column_width_px: default_scene_column_width_px(),
            vertical_spacing_px: default_vertical_spacing_px(),
            label_font_size_px: default_label_font_size_px(),
            label_padding_px: default_label_padding_px(),
            top_margin_spacing_units: default_top_margin_spacing_units(),
            palette: default_palette(),
            weight_exponent: default_weight_exponent(),
            base_tick_interval_ms: default_base_tick_interval_ms(),
            rate_multipliers: default_rate_multipliers(),
            initial_rate_multiplier: default_initial_rate_multiplier(),
            column_gray_levels: default_column_gray_levels(),
            storyline_width_px: default_storyline_width_px(),
            grid_line_color: default_grid_line_color(),
            label_color: default_label_color(),
            show_grid_lines: true,
            show_arcs: false,
        }
    }
}

impl NarrativeChartConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets scene column width and vertical spacing unit.
    #[must_use]
    pub fn with_grid(mut self, scene_column_width_px: f64, vertical_spacing_px: f64) -> Self {
        self.scene_column_width_px = scene_column_width_px;
        self.vertical_spacing_px = vertical_spacing_px;
        self
    }

    #[must_use]
    pub fn with_palette(mut self, palette: Vec<Color>) -> Self {
        self.palette = palette;
        self
    }

    /// Sets the exponent `k` of the `w^(1/k)` weight shaping.
    #[must_use]
    pub fn with_weight_exponent(mut self, exponent: f64) -> Self {
        self.weight_exponent = exponent;
        self
    }

    #[must_use]
    pub fn with_base_tick_interval_ms(mut self, interval_ms: u64) -> Self {
        self.base_tick_interval_ms = interval_ms;
        self
    }

    #[must_use]
    pub fn with_rate_multipliers(mut self, rate_multipliers: Vec<f64>) -> Self {
        self.rate_multipliers = rate_multipliers;
        self
    }

    #[must_use]
    pub fn with_column_gray_levels(mut self, even: u8, odd: u8) -> Self {
        self.column_gray_levels = [even, odd];
        self
    }

    /// Sets initial visibility of grid lines and interaction arcs.
    #[must_use]
    pub fn with_display(mut self, show_grid_lines: bool, show_arcs: bool) -> Self {
        self.show_grid_lines = show_grid_lines;
        self.show_arcs = show_arcs;
        self
    }

    #[must_use]
    pub fn base_tick_interval(&self) -> Duration {
        Duration::from_millis(self.base_tick_interval_ms)
    }

    #[must_use]
    pub fn layout_params(&self) -> LayoutParams {
        LayoutParams {
            scene_column_width_px: self.scene_column_width_px,
            vertical_spacing_px: self.vertical_spacing_px,
            label_font_size_px: self.label_font_size_px,
            label_padding_px: self.label_padding_px,
            top_margin_spacing_units: self.top_margin_spacing_units,
        }
    }

    pub fn validate(&self) -> ChartResult<()> {
        for (name, value) in [
            ("scene_column_width_px", self.scene_column_width_px),
            ("vertical_spacing_px", self.vertical_spacing_px),
            ("label_font_size_px", self.label_font_size_px),
            ("storyline_width_px", self.storyline_width_px),
            ("weight_exponent", self.weight_exponent),
            ("initial_rate_multiplier", self.initial_rate_multiplier),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ChartError::InvalidConfig(format!(
                    "`{name}` must be finite and > 0"
                )));
            }
        }
        for (name, value) in [
            ("label_padding_px", self.label_padding_px),
            ("top_margin_spacing_units", self.top_margin_spacing_units),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidConfig(format!(
                    "`{name}` must be finite and >= 0"
                )));
            }
        }
        if self.base_tick_interval_ms == 0 {
            return Err(ChartError::InvalidConfig(
                "`base_tick_interval_ms` must be > 0".to_owned(),
            ));
        }
        if self.palette.is_empty() {
            return Err(ChartError::InvalidConfig(
                "`palette` must contain at least one color".to_owned(),
            ));
        }
        for color in self
            .palette
            .iter()
            .chain([&self.grid_line_color, &self.label_color])
        {
            color
                .validate()
                .map_err(|err| ChartError::InvalidConfig(err.to_string()))?;
        }
        if self.rate_multipliers.is_empty()
            || self
                .rate_multipliers
                .iter()
                .any(|rate| !rate.is_finite() || *rate <= 0.0)
        {
            return Err(ChartError::InvalidConfig(
                "`rate_multipliers` must be non-empty, finite and > 0".to_owned(),
            ));
        }
        Ok(())
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidConfig(format!("failed to parse config json: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::InvalidConfig(format!("failed to serialize config json: {e}")))
    }
}

fn default_scene_column_width_px() -> f64 {
    30.0
}

fn default_vertical_spacing_px() -> f64 {
    10.0
}

fn default_label_font_size_px() -> f64 {
    11.0
}

fn default_label_padding_px() -> f64 {
    20.0
}

fn default_top_margin_spacing_units() -> f64 {
    4.0
}

fn default_weight_exponent() -> f64 {
    1.0
}

fn default_base_tick_interval_ms() -> u64 {
    40
}

fn default_rate_multipliers() -> Vec<f64> {
    vec![0.25, 0.5, 1.0, 2.0, 4.0]
}

fn default_initial_rate_multiplier() -> f64 {
    1.0
}

fn default_column_gray_levels() -> [u8; 2] {
    [255, 235]
}

fn default_storyline_width_px() -> f64 {
    2.0
}

fn default_grid_line_color() -> Color {
    Color::gray(200)
}

fn default_label_color() -> Color {
    Color::gray(40)
}

fn default_true() -> bool {
    true
}
