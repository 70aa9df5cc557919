use cairo::{Antialias, Context, Format, ImageSurface};
use pango::FontDescription;

use crate::error::{ChartError, ChartResult};
use crate::render::{
    ArcPrimitive, Color, CurvePrimitive, DrawCommand, FrameStats, LinePrimitive, RectPrimitive,
    RenderFrame, Renderer, TextHAlign, TextPrimitive,
};

/// Optional extension trait for renderers that can draw into an external Cairo
/// context (for example a GTK `DrawingArea` callback).
pub trait CairoContextRenderer {
    fn render_on_cairo_context(
        &mut self,
        context: &Context,
        frame: &RenderFrame,
    ) -> ChartResult<()>;
}

/// Cairo + Pango + PangoCairo renderer backend.
///
/// Draws offscreen through `Renderer::render`, or in place on an external
/// Cairo context through `CairoContextRenderer`. Commands are executed in
/// frame order so the storyline z-order computed upstream is preserved.
#[derive(Debug)]
pub struct CairoRenderer {
    surface: ImageSurface,
    last_stats: FrameStats,
}

impl CairoRenderer {
    pub fn new(width: i32, height: i32) -> ChartResult<Self> {
        if width <= 0 || height <= 0 {
            return Err(ChartError::InvalidData(
                "cairo surface size must be > 0".to_owned(),
            ));
        }

        let surface = ImageSurface::create(Format::ARgb32, width, height)
            .map_err(|err| map_backend_error("failed to create cairo surface", err))?;
        Ok(Self {
            surface,
            last_stats: FrameStats::default(),
        })
    }

    #[must_use]
    pub fn surface(&self) -> &ImageSurface {
        &self.surface
    }

    #[must_use]
    pub fn last_stats(&self) -> FrameStats {
        self.last_stats
    }

    /// Replaces the offscreen surface when the chart surface size changes.
    pub fn resize(&mut self, width: i32, height: i32) -> ChartResult<()> {
        *self = Self::new(width, height)?;
        Ok(())
    }

    fn render_with_context(&mut self, context: &Context, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;

        let mut stats = FrameStats::default();
        for command in &frame.commands {
            match command {
                DrawCommand::Rect(rect) => {
                    draw_rect(context, *rect)?;
                    stats.rects += 1;
                }
                DrawCommand::Line(line) => {
                    draw_line(context, *line)?;
                    stats.lines += 1;
                }
                DrawCommand::Curve(curve) => {
                    draw_curve(context, *curve)?;
                    stats.curves += 1;
                }
                DrawCommand::Arc(arc) => {
                    draw_arc(context, *arc)?;
                    stats.arcs += 1;
                }
                DrawCommand::Text(text) => {
                    draw_text(context, text)?;
                    stats.texts += 1;
                }
            }
        }

        self.last_stats = stats;
        Ok(())
    }
}

impl Renderer for CairoRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        let context = Context::new(&self.surface)
            .map_err(|err| map_backend_error("failed to create cairo context", err))?;
        self.render_with_context(&context, frame)
    }
}

impl CairoContextRenderer for CairoRenderer {
    fn render_on_cairo_context(
        &mut self,
        context: &Context,
        frame: &RenderFrame,
    ) -> ChartResult<()> {
        self.render_with_context(context, frame)
    }
}

fn draw_rect(context: &Context, rect: RectPrimitive) -> ChartResult<()> {
    apply_antialias(context, rect.antialias);
    apply_color(context, rect.fill_color);
    context.rectangle(rect.x, rect.y, rect.width, rect.height);
    context
        .fill()
        .map_err(|err| map_backend_error("failed to fill rectangle", err))
}

fn draw_line(context: &Context, line: LinePrimitive) -> ChartResult<()> {
    apply_antialias(context, line.antialias);
    apply_color(context, line.color);
    context.set_line_width(line.stroke_width);
    context.move_to(line.x1, line.y1);
    context.line_to(line.x2, line.y2);
    context
        .stroke()
        .map_err(|err| map_backend_error("failed to stroke line", err))
}

fn draw_curve(context: &Context, curve: CurvePrimitive) -> ChartResult<()> {
    apply_antialias(context, curve.antialias);
    apply_color(context, curve.color);
    context.set_line_width(curve.stroke_width);
    context.move_to(curve.start.0, curve.start.1);
    context.curve_to(
        curve.control1.0,
        curve.control1.1,
        curve.control2.0,
        curve.control2.1,
        curve.end.0,
        curve.end.1,
    );
    context
        .stroke()
        .map_err(|err| map_backend_error("failed to stroke curve", err))
}

fn draw_arc(context: &Context, arc: ArcPrimitive) -> ChartResult<()> {
    apply_antialias(context, arc.antialias);
    apply_color(context, arc.color);
    context.set_line_width(arc.stroke_width);
    context.new_sub_path();
    context.arc(
        arc.center_x,
        arc.center_y,
        arc.radius,
        arc.start_angle,
        arc.end_angle,
    );
    context
        .stroke()
        .map_err(|err| map_backend_error("failed to stroke arc", err))
}

fn draw_text(context: &Context, text: &TextPrimitive) -> ChartResult<()> {
    let layout = pangocairo::functions::create_layout(context);
    let mut font_options = cairo::FontOptions::new()
        .map_err(|err| map_backend_error("failed to create font options", err))?;
    font_options.set_antialias(cairo_antialias(text.antialias));
    pangocairo::functions::context_set_font_options(&layout.context(), Some(&font_options));
    layout.context_changed();

    let font_description = FontDescription::from_string(&format!("Sans {}px", text.font_size_px));
    layout.set_font_description(Some(&font_description));
    layout.set_text(&text.text);

    let (text_width, text_height) = layout.pixel_size();
    let x = match text.h_align {
        TextHAlign::Left => text.x,
        TextHAlign::Center => text.x - f64::from(text_width) / 2.0,
        TextHAlign::Right => text.x - f64::from(text_width),
    };
    let y = text.y - f64::from(text_height) / 2.0;

    apply_color(context, text.color);
    context.move_to(x, y);
    pangocairo::functions::show_layout(context, &layout);
    Ok(())
}

fn apply_antialias(context: &Context, antialias: bool) {
    context.set_antialias(cairo_antialias(antialias));
}

fn cairo_antialias(antialias: bool) -> Antialias {
    if antialias {
        Antialias::Default
    } else {
        Antialias::None
    }
}

fn apply_color(context: &Context, color: Color) {
    context.set_source_rgba(color.red, color.green, color.blue, color.alpha);
}

fn map_backend_error(prefix: &str, err: cairo::Error) -> ChartError {
    ChartError::InvalidData(format!("{prefix}: {err}"))
}
