use crate::core::Viewport;
use crate::error::{ChartError, ChartResult};
use crate::render::{ArcPrimitive, CurvePrimitive, LinePrimitive, RectPrimitive, TextPrimitive};

/// One draw operation. Backends execute commands strictly in frame order.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Rect(RectPrimitive),
    Line(LinePrimitive),
    Curve(CurvePrimitive),
    Arc(ArcPrimitive),
    Text(TextPrimitive),
}

impl DrawCommand {
    pub fn validate(&self) -> ChartResult<()> {
        match self {
            Self::Rect(rect) => rect.validate(),
            Self::Line(line) => line.validate(),
            Self::Curve(curve) => curve.validate(),
            Self::Arc(arc) => arc.validate(),
            Self::Text(text) => text.validate(),
        }
    }

    #[must_use]
    pub fn is_antialiased(&self) -> bool {
        match self {
            Self::Rect(rect) => rect.antialias,
            Self::Line(line) => line.antialias,
            Self::Curve(curve) => curve.antialias,
            Self::Arc(arc) => arc.antialias,
            Self::Text(text) => text.antialias,
        }
    }
}

/// Per-kind command totals of one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameStats {
    pub rects: usize,
    pub lines: usize,
    pub curves: usize,
    pub arcs: usize,
    pub texts: usize,
}

/// Backend-agnostic, ordered scene for one chart draw pass.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub viewport: Viewport,
    pub commands: Vec<DrawCommand>,
}

impl RenderFrame {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            commands: Vec::new(),
        }
    }

    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    #[must_use]
    pub fn with_command(mut self, command: DrawCommand) -> Self {
        self.commands.push(command);
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }

        for command in &self.commands {
            command.validate()?;
        }

        Ok(())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    #[must_use]
    pub fn stats(&self) -> FrameStats {
        self.commands
            .iter()
            .fold(FrameStats::default(), |mut stats, command| {
                match command {
                    DrawCommand::Rect(_) => stats.rects += 1,
                    DrawCommand::Line(_) => stats.lines += 1,
                    DrawCommand::Curve(_) => stats.curves += 1,
                    DrawCommand::Arc(_) => stats.arcs += 1,
                    DrawCommand::Text(_) => stats.texts += 1,
                }
                stats
            })
    }

    pub fn texts(&self) -> impl Iterator<Item = &TextPrimitive> {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Text(text) => Some(text),
            _ => None,
        })
    }

    pub fn curves(&self) -> impl Iterator<Item = &CurvePrimitive> {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Curve(curve) => Some(curve),
            _ => None,
        })
    }

    pub fn arcs(&self) -> impl Iterator<Item = &ArcPrimitive> {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Arc(arc) => Some(arc),
            _ => None,
        })
    }
}
