use std::f64::consts::FRAC_PI_2;

use ordered_float::OrderedFloat;
use smallvec::SmallVec;

use crate::core::{
    ChartLayout, InteractionSnapshot, SceneIndex, SceneRef, Trajectories, TrajectoryPoint,
    blend_weighted_color,
};
use crate::error::ChartResult;
use crate::interaction::{SelectionState, character_at_cell};
use crate::render::{
    ArcPrimitive, Color, CurvePrimitive, DrawCommand, LinePrimitive, RectPrimitive, RenderFrame,
    Renderer, TextHAlign, TextPrimitive,
};

use super::{DisplayToggles, NarrativeChartConfig, NarrativeChartEngine};

/// Fraction of the column width left empty on each side of a storyline stub.
const STUB_INSET_RATIO: f64 = 0.2;
/// Side of the square drawn on the vertex under the pointer.
const HIT_MARKER_SIZE_PX: f64 = 5.0;
/// Offset of the hover label from the pointer.
const HOVER_LABEL_OFFSET_PX: f64 = 10.0;
const ARC_STROKE_WIDTH_PX: f64 = 1.0;
const GRID_STROKE_WIDTH_PX: f64 = 1.0;

/// Colors and stroke tuning applied to one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameStyle {
    pub column_gray_levels: [u8; 2],
    pub storyline_width_px: f64,
    pub weight_exponent: f64,
    pub grid_line_color: Color,
    pub label_color: Color,
    pub label_padding_px: f64,
}

impl FrameStyle {
    #[must_use]
    pub fn from_config(config: &NarrativeChartConfig) -> Self {
        Self {
            column_gray_levels: config.column_gray_levels,
            storyline_width_px: config.storyline_width_px,
            weight_exponent: config.weight_exponent,
            grid_line_color: config.grid_line_color,
            label_color: config.label_color,
            label_padding_px: config.label_padding_px,
        }
    }
}

/// Everything one refresh depends on.
#[derive(Debug, Clone, Copy)]
pub struct FrameInputs<'a> {
    pub layout: &'a ChartLayout,
    pub trajectories: &'a Trajectories,
    pub snapshots: &'a [InteractionSnapshot],
    pub scene_refs: &'a [SceneRef],
    pub selection: &'a SelectionState,
    pub display: DisplayToggles,
    pub style: FrameStyle,
}

/// One storyline piece anchored in a scene column.
#[derive(Debug, Clone, Copy)]
struct StorylineSegment<'a> {
    name: &'a str,
    from: TrajectoryPoint,
    to: Option<TrajectoryPoint>,
    weight: f64,
}

/// Materializes the ordered draw commands for one refresh.
///
/// Pass order: background, column shading, grid, storylines column by column with
/// weaker segments first, interaction arcs, edge labels, then pointer
/// feedback.
#[must_use]
pub fn build_frame(inputs: &FrameInputs<'_>) -> RenderFrame {
    let mut frame = RenderFrame::new(inputs.layout.viewport());

    push_background(&mut frame, inputs);
    if inputs.trajectories.is_empty() {
        return frame;
    }
    push_column_shading(&mut frame, inputs);
    if inputs.display.grid_lines {
        push_grid(&mut frame, inputs);
    }
    push_storylines(&mut frame, inputs);
    if inputs.display.arcs {
        push_arcs(&mut frame, inputs);
    }
    push_edge_labels(&mut frame, inputs);
    push_pointer_feedback(&mut frame, inputs);

    frame
}

/// Weight used to fade the segment of `name` that starts at column `column`.
///
/// Full strength without a selection and for the selected storyline itself;
/// otherwise the pair weight recorded for that scene, 0 when absent.
#[must_use]
pub fn segment_weight(
    name: &str,
    selected: Option<&str>,
    snapshots: &[InteractionSnapshot],
    column: usize,
) -> f64 {
    match selected {
        None => 1.0,
        Some(selected) if selected == name => 1.0,
        Some(selected) => snapshots
            .get(column)
            .map_or(0.0, |snapshot| snapshot.weight(name, selected)),
    }
}

/// Gray level (0..=255) of the shading behind column `column`.
#[must_use]
pub fn column_gray_level(scene_refs: &[SceneRef], column: usize, levels: [u8; 2]) -> u8 {
    let parity = scene_refs
        .get(column)
        .map_or(column % 2 == 1, |scene_ref| scene_ref.parity);
    if parity { levels[1] } else { levels[0] }
}

fn columns(layout: &ChartLayout) -> impl Iterator<Item = (usize, SceneIndex)> {
    let first = layout.bounds().first_scene;
    (0..layout.bounds().scene_count()).map(move |column| (column, first + column as SceneIndex))
}

fn point_at(points: &[TrajectoryPoint], scene: SceneIndex) -> Option<(usize, TrajectoryPoint)> {
    points
        .binary_search_by_key(&scene, |point| point.scene)
        .ok()
        .map(|index| (index, points[index]))
}

fn push_background(frame: &mut RenderFrame, inputs: &FrameInputs<'_>) {
    let geometry = inputs.layout.geometry();
    frame.push(DrawCommand::Rect(RectPrimitive::new(
        0.0,
        0.0,
        geometry.width,
        geometry.height,
        Color::gray(inputs.style.column_gray_levels[0]),
    )));
}

fn push_column_shading(frame: &mut RenderFrame, inputs: &FrameInputs<'_>) {
    let layout = inputs.layout;
    let geometry = layout.geometry();
    let levels = inputs.style.column_gray_levels;

    for (column, scene) in columns(layout) {
        let gray = column_gray_level(inputs.scene_refs, column, levels);
        frame.push(DrawCommand::Rect(RectPrimitive::new(
            layout.column_left(scene),
            0.0,
            geometry.column_width,
            geometry.height,
            Color::gray(gray),
        )));
    }
}

fn push_grid(frame: &mut RenderFrame, inputs: &FrameInputs<'_>) {
    let layout = inputs.layout;
    let spacing = layout.geometry().vertical_spacing;
    let font_size = layout.label_font_size_px();
    let line_top = layout.plot_top() - spacing;
    let line_bottom = layout.plot_bottom() + spacing;
    let label_above = layout.plot_top() - 2.0 * spacing;
    let label_below = layout.plot_bottom() + 2.0 * spacing;

    for (_, scene) in columns(layout) {
        let x = layout.scene_center_x(scene);
        frame.push(DrawCommand::Line(
            LinePrimitive::new(
                x,
                line_top,
                x,
                line_bottom,
                GRID_STROKE_WIDTH_PX,
                inputs.style.grid_line_color,
            )
            .crisp(),
        ));
        for y in [label_above, label_below] {
            frame.push(DrawCommand::Text(TextPrimitive::new(
                scene.to_string(),
                x,
                y,
                font_size,
                inputs.style.label_color,
                TextHAlign::Center,
            )));
        }
    }
}

fn push_storylines(frame: &mut RenderFrame, inputs: &FrameInputs<'_>) {
    let layout = inputs.layout;
    let column_width = layout.geometry().column_width;
    let inset = column_width * STUB_INSET_RATIO;
    let selected = inputs.selection.selected();

    for (column, scene) in columns(layout) {
        let mut segments: SmallVec<[StorylineSegment<'_>; 16]> = inputs
            .trajectories
            .iter()
            .filter_map(|(name, points)| {
                let (index, from) = point_at(points, scene)?;
                Some(StorylineSegment {
                    name: name.as_str(),
                    from,
                    to: points.get(index + 1).copied(),
                    weight: segment_weight(name, selected, inputs.snapshots, column),
                })
            })
            .collect();
        // Stable: equal weights keep key order.
        segments.sort_by_key(|segment| OrderedFloat(segment.weight));

        let gray = column_gray_level(inputs.scene_refs, column, inputs.style.column_gray_levels);
        let stub_start = layout.column_left(scene) + inset;
        let stub_end = layout.column_left(scene) + column_width - inset;

        for segment in &segments {
            let Some(reference) = reference_color(layout, segment.name, selected) else {
                continue;
            };
            let color = blend_weighted_color(
                reference,
                segment.weight,
                gray,
                inputs.style.weight_exponent,
            );
            let y = layout.height_to_y(segment.from.height);

            frame.push(DrawCommand::Line(LinePrimitive::new(
                stub_start,
                y,
                stub_end,
                y,
                inputs.style.storyline_width_px,
                color,
            )));
            if let Some(to) = segment.to {
                frame.push(DrawCommand::Curve(CurvePrimitive::s_curve(
                    (stub_end, y),
                    (layout.column_left(to.scene) + inset, layout.height_to_y(to.height)),
                    inputs.style.storyline_width_px,
                    color,
                )));
            }
        }
    }
}

fn reference_color(layout: &ChartLayout, name: &str, selected: Option<&str>) -> Option<Color> {
    let colors = layout.colors();
    selected
        .and_then(|selected| colors.color_of(selected))
        .or_else(|| colors.color_of(name))
}

fn push_arcs(frame: &mut RenderFrame, inputs: &FrameInputs<'_>) {
    let Some(selected) = inputs.selection.selected() else {
        return;
    };
    let layout = inputs.layout;
    let Some(selected_points) = inputs.trajectories.get(selected) else {
        return;
    };
    let Some(reference) = layout.colors().color_of(selected) else {
        return;
    };

    for (column, scene) in columns(layout) {
        let Some((_, anchor)) = point_at(selected_points, scene) else {
            continue;
        };
        let x = layout.scene_center_x(scene);
        let anchor_y = layout.height_to_y(anchor.height);
        let gray = column_gray_level(inputs.scene_refs, column, inputs.style.column_gray_levels);

        for (name, points) in inputs.trajectories {
            if name == selected {
                continue;
            }
            let Some((_, other)) = point_at(points, scene) else {
                continue;
            };
            let other_y = layout.height_to_y(other.height);
            let radius = (other_y - anchor_y).abs() / 2.0;
            if radius <= 0.0 {
                continue;
            }

            let weight = segment_weight(name, Some(selected), inputs.snapshots, column);
            frame.push(DrawCommand::Arc(ArcPrimitive {
                center_x: x,
                center_y: (anchor_y + other_y) / 2.0,
                radius,
                start_angle: -FRAC_PI_2,
                end_angle: FRAC_PI_2,
                stroke_width: ARC_STROKE_WIDTH_PX,
                color: blend_weighted_color(
                    reference,
                    weight,
                    gray,
                    inputs.style.weight_exponent,
                ),
                antialias: true,
            }));
        }
    }
}

fn push_edge_labels(frame: &mut RenderFrame, inputs: &FrameInputs<'_>) {
    let layout = inputs.layout;
    let geometry = layout.geometry();
    let font_size = layout.label_font_size_px();
    let half_padding = inputs.style.label_padding_px / 2.0;
    let left_x = geometry.left_margin - half_padding;
    let right_x = geometry.width - geometry.left_margin + half_padding;

    for (name, points) in inputs.trajectories {
        if name.is_empty() {
            continue;
        }
        let (Some(first), Some(last)) = (points.first(), points.last()) else {
            continue;
        };
        frame.push(DrawCommand::Text(TextPrimitive::new(
            name.clone(),
            left_x,
            layout.height_to_y(first.height),
            font_size,
            inputs.style.label_color,
            TextHAlign::Right,
        )));
        frame.push(DrawCommand::Text(TextPrimitive::new(
            name.clone(),
            right_x,
            layout.height_to_y(last.height),
            font_size,
            inputs.style.label_color,
            TextHAlign::Left,
        )));
    }
}

fn push_pointer_feedback(frame: &mut RenderFrame, inputs: &FrameInputs<'_>) {
    let (Some(selected), Some(pointer)) = (inputs.selection.selected(), inputs.selection.pointer)
    else {
        return;
    };
    let layout = inputs.layout;

    if let Some(cell) = layout.pixel_to_cell(pointer.x, pointer.y)
        && character_at_cell(inputs.trajectories, cell) == Some(selected)
        && let Some(color) = layout.colors().color_of(selected)
    {
        let half = HIT_MARKER_SIZE_PX / 2.0;
        frame.push(DrawCommand::Rect(RectPrimitive::new(
            layout.scene_center_x(cell.scene) - half,
            layout.height_to_y(cell.height) - half,
            HIT_MARKER_SIZE_PX,
            HIT_MARKER_SIZE_PX,
            color,
        )));
    }

    if !selected.is_empty() {
        frame.push(DrawCommand::Text(TextPrimitive::new(
            selected,
            pointer.x + HOVER_LABEL_OFFSET_PX,
            pointer.y - HOVER_LABEL_OFFSET_PX,
            layout.label_font_size_px(),
            inputs.style.label_color,
            TextHAlign::Left,
        )));
    }
}

impl<R: Renderer> NarrativeChartEngine<R> {
    /// Materializes backend-agnostic draw commands for the current state.
    pub fn build_render_frame(&self) -> ChartResult<RenderFrame> {
        let frame = build_frame(&self.frame_inputs());
        frame.validate()?;
        Ok(frame)
    }

    pub(super) fn frame_inputs(&self) -> FrameInputs<'_> {
        FrameInputs {
            layout: &self.layout,
            trajectories: &self.trajectories,
            snapshots: &self.snapshots,
            scene_refs: &self.scene_refs,
            selection: self.selection.state(),
            display: self.display,
            style: FrameStyle::from_config(&self.config),
        }
    }
}
