use indexmap::IndexMap;

use crate::render::{Color, Hsv};

/// Default storyline palette as 8-bit RGB.
///
/// Sixteen hues at full value, interleaved so neighbouring characters in key
/// order land on distant hues.
pub const DEFAULT_PALETTE_RGB: [(u8, u8, u8); 16] = [
    (255, 38, 38),
    (38, 255, 255),
    (147, 255, 38),
    (147, 38, 255),
    (255, 201, 38),
    (38, 92, 255),
    (38, 255, 92),
    (255, 38, 201),
    (255, 120, 38),
    (38, 174, 255),
    (65, 255, 38),
    (228, 38, 255),
    (228, 255, 38),
    (65, 38, 255),
    (38, 255, 174),
    (255, 38, 120),
];

#[must_use]
pub fn default_palette() -> Vec<Color> {
    DEFAULT_PALETTE_RGB
        .iter()
        .map(|&(red, green, blue)| Color::rgb8(red, green, blue))
        .collect()
}

/// Character → color map fixed for one chart build.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ColorAssignment {
    colors: IndexMap<String, Color>,
}

impl ColorAssignment {
    /// Assigns `palette[i % palette.len()]` to the i-th name.
    ///
    /// An empty palette yields an empty assignment.
    #[must_use]
    pub fn assign<'a>(names: impl IntoIterator<Item = &'a str>, palette: &[Color]) -> Self {
        if palette.is_empty() {
            return Self::default();
        }
        let colors = names
            .into_iter()
            .enumerate()
            .map(|(index, name)| (name.to_owned(), palette[index % palette.len()]))
            .collect();
        Self { colors }
    }

    #[must_use]
    pub fn color_of(&self, name: &str) -> Option<Color> {
        self.colors.get(name).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Color)> {
        self.colors.iter().map(|(name, color)| (name.as_str(), *color))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

/// Fades `reference` toward the background gray according to `weight`.
///
/// With `w' = weight^(1/exponent)`:
/// `s' = s * w'` and `v' = v * w' * (1 - g/255) + g/255`.
/// Weight 0 collapses to the background gray; weight 1 keeps the reference
/// hue and saturation.
#[must_use]
pub fn blend_weighted_color(
    reference: Color,
    weight: f64,
    background_gray: u8,
    exponent: f64,
) -> Color {
    let weight = weight.clamp(0.0, 1.0);
    let shaped = weight.powf(1.0 / exponent);
    let gray = f64::from(background_gray) / 255.0;
    let hsv = reference.to_hsv();

    Color::from_hsv(
        Hsv {
            hue: hsv.hue,
            saturation: hsv.saturation * shaped,
            value: hsv.value * shaped * (1.0 - gray) + gray,
        },
        reference.alpha,
    )
}

#[cfg(test)]
mod tests {
    use super::{ColorAssignment, blend_weighted_color, default_palette};
    use crate::render::Color;

    #[test]
    fn default_palette_has_sixteen_full_value_entries() {
        let palette = default_palette();
        assert_eq!(palette.len(), 16);
        assert!(palette.iter().all(|color| color.to_hsv().value == 1.0));
    }

    #[test]
    fn assignment_wraps_around_palette() {
        let palette = vec![Color::rgb(1.0, 0.0, 0.0), Color::rgb(0.0, 0.0, 1.0)];
        let assignment = ColorAssignment::assign(["a", "b", "c"], &palette);
        assert_eq!(assignment.color_of("a"), Some(palette[0]));
        assert_eq!(assignment.color_of("b"), Some(palette[1]));
        assert_eq!(assignment.color_of("c"), Some(palette[0]));
        assert_eq!(assignment.color_of("d"), None);
    }

    #[test]
    fn exponent_above_one_lifts_midrange_weights() {
        let reference = Color::rgb(1.0, 0.0, 0.0);
        let linear = blend_weighted_color(reference, 0.25, 255, 1.0).to_hsv();
        let lifted = blend_weighted_color(reference, 0.25, 255, 2.0).to_hsv();
        assert!(lifted.saturation > linear.saturation);
        assert!((lifted.saturation - 0.5).abs() < 1e-9);
    }
}
