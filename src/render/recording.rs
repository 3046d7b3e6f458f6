use crate::{
    foundation::{
        color::Color,
        core::{Point, Rect, SurfaceSize},
        error::BackdropResult,
    },
    render::context::{DrawContext, RenderTarget},
};

/// One resolved drawing command. Colors carry the effective alpha (color alpha times global
/// alpha at the moment the command was issued).
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCmd {
    /// `clear_rect`.
    Clear {
        /// Cleared area.
        rect: Rect,
    },
    /// `fill_rect`.
    FillRect {
        /// Filled area.
        rect: Rect,
        /// Effective paint.
        color: Color,
    },
    /// `fill_circle`.
    FillCircle {
        /// Disk center.
        center: Point,
        /// Disk radius.
        radius: f64,
        /// Effective paint.
        color: Color,
    },
    /// `stroke_line`.
    StrokeLine {
        /// Segment start.
        from: Point,
        /// Segment end.
        to: Point,
        /// Effective paint.
        color: Color,
        /// Line width in pixels.
        width: f64,
    },
    /// `stroke_rect`.
    StrokeRect {
        /// Outlined rectangle.
        rect: Rect,
        /// Effective paint.
        color: Color,
        /// Line width in pixels.
        width: f64,
    },
}

/// Paint state shared by every [`DrawContext`] implementation in this crate.
#[derive(Clone, Copy, Debug)]
pub(crate) struct PaintState {
    pub(crate) fill: Color,
    pub(crate) stroke: Color,
    pub(crate) stroke_width: f64,
    pub(crate) global_alpha: f64,
}

impl Default for PaintState {
    fn default() -> Self {
        Self {
            fill: Color::rgba(0.0, 0.0, 0.0, 1.0),
            stroke: Color::rgba(0.0, 0.0, 0.0, 1.0),
            stroke_width: 1.0,
            global_alpha: 1.0,
        }
    }
}

impl PaintState {
    pub(crate) fn effective_fill(&self) -> Color {
        self.fill.with_alpha(self.fill.a * self.global_alpha)
    }

    pub(crate) fn effective_stroke(&self) -> Color {
        self.stroke.with_alpha(self.stroke.a * self.global_alpha)
    }
}

/// In-memory command log for a frame.
#[derive(Debug, Default)]
pub struct Recorder {
    state: PaintState,
    commands: Vec<DrawCmd>,
}

impl Recorder {
    /// Commands issued since the last present.
    pub fn commands(&self) -> &[DrawCmd] {
        &self.commands
    }
}

impl DrawContext for Recorder {
    fn clear_rect(&mut self, rect: Rect) {
        self.commands.push(DrawCmd::Clear { rect });
    }

    fn fill_rect(&mut self, rect: Rect) {
        let color = self.state.effective_fill();
        self.commands.push(DrawCmd::FillRect { rect, color });
    }

    fn fill_circle(&mut self, center: Point, radius: f64) {
        let color = self.state.effective_fill();
        self.commands.push(DrawCmd::FillCircle {
            center,
            radius,
            color,
        });
    }

    fn set_fill_color(&mut self, color: Color) {
        self.state.fill = color;
    }

    fn set_global_alpha(&mut self, alpha: f64) {
        self.state.global_alpha = alpha.clamp(0.0, 1.0);
    }

    fn set_stroke(&mut self, color: Color, width: f64) {
        self.state.stroke = color;
        self.state.stroke_width = width;
    }

    fn stroke_line(&mut self, from: Point, to: Point) {
        self.commands.push(DrawCmd::StrokeLine {
            from,
            to,
            color: self.state.effective_stroke(),
            width: self.state.stroke_width,
        });
    }

    fn stroke_rect(&mut self, rect: Rect) {
        self.commands.push(DrawCmd::StrokeRect {
            rect,
            color: self.state.effective_stroke(),
            width: self.state.stroke_width,
        });
    }
}

/// Render target that records draw calls instead of rasterizing them.
///
/// Useful for hosts that replay commands on another canvas, and for asserting exactly what a
/// frame drew.
#[derive(Debug)]
pub struct RecordingTarget {
    size: SurfaceSize,
    recorder: Option<Recorder>,
    last_frame: Vec<DrawCmd>,
    frames_presented: u64,
    resizes: u64,
}

impl RecordingTarget {
    /// A target with a working 2D context.
    pub fn new(size: SurfaceSize) -> Self {
        Self {
            size,
            recorder: Some(Recorder::default()),
            last_frame: Vec::new(),
            frames_presented: 0,
            resizes: 0,
        }
    }

    /// A target whose 2D context is unavailable.
    pub fn detached(size: SurfaceSize) -> Self {
        Self {
            recorder: None,
            ..Self::new(size)
        }
    }

    /// Commands of the most recently presented frame.
    pub fn last_frame(&self) -> &[DrawCmd] {
        &self.last_frame
    }

    /// Commands issued since the last present.
    pub fn pending(&self) -> &[DrawCmd] {
        match &self.recorder {
            Some(recorder) => recorder.commands(),
            None => &[],
        }
    }

    /// Number of frames committed with [`RenderTarget::present`].
    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    /// Number of `set_size` calls received.
    pub fn resize_count(&self) -> u64 {
        self.resizes
    }
}

impl RenderTarget for RecordingTarget {
    fn size(&self) -> SurfaceSize {
        self.size
    }

    fn set_size(&mut self, size: SurfaceSize) -> BackdropResult<()> {
        self.size = size;
        self.resizes += 1;
        Ok(())
    }

    fn context_2d(&mut self) -> Option<&mut dyn DrawContext> {
        self.recorder.as_mut().map(|r| r as &mut dyn DrawContext)
    }

    fn present(&mut self) -> BackdropResult<()> {
        if let Some(recorder) = self.recorder.as_mut() {
            self.last_frame = std::mem::take(&mut recorder.commands);
            self.frames_presented += 1;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/recording.rs"]
mod tests;
