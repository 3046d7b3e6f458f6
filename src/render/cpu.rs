use vello_cpu::kurbo::Shape as _;

use crate::{
    foundation::{
        color::Color,
        core::{Point, Rect, SurfaceSize},
        error::{BackdropError, BackdropResult},
        math::over_premul_in_place,
    },
    render::{
        FrameRGBA,
        context::{DrawContext, RenderTarget},
        recording::PaintState,
    },
};

const CIRCLE_TOLERANCE: f64 = 0.1;

/// CPU raster target powered by `vello_cpu`.
///
/// Draw calls are encoded into a `vello_cpu::RenderContext`, rasterized into a scratch pixmap
/// and composited source-over onto the backing pixmap on [`RenderTarget::present`]. Pixels
/// persist between frames until cleared, matching a browser canvas.
pub struct CpuTarget {
    size: SurfaceSize,
    canvas: CpuCanvas,
}

/// The 2D context of a [`CpuTarget`].
pub struct CpuCanvas {
    width: u16,
    height: u16,
    ctx: vello_cpu::RenderContext,
    pixmap: vello_cpu::Pixmap,
    // `render_to_pixmap` replaces every pixel of its destination.
    scratch: vello_cpu::Pixmap,
    state: PaintState,
    dirty: bool,
}

impl CpuTarget {
    /// Allocate a transparent surface of `size`.
    pub fn new(size: SurfaceSize) -> BackdropResult<Self> {
        Ok(Self {
            size,
            canvas: CpuCanvas::new(size)?,
        })
    }

    /// Copy of the pixels committed by the last [`RenderTarget::present`].
    pub fn snapshot(&self) -> FrameRGBA {
        FrameRGBA {
            width: self.size.width,
            height: self.size.height,
            data: self.canvas.visible_bytes(self.size),
            premultiplied: true,
        }
    }
}

impl RenderTarget for CpuTarget {
    fn size(&self) -> SurfaceSize {
        self.size
    }

    fn set_size(&mut self, size: SurfaceSize) -> BackdropResult<()> {
        if size != self.size {
            self.canvas = CpuCanvas::new(size)?;
            self.size = size;
        }
        Ok(())
    }

    fn context_2d(&mut self) -> Option<&mut dyn DrawContext> {
        Some(&mut self.canvas)
    }

    fn present(&mut self) -> BackdropResult<()> {
        self.canvas.flush();
        Ok(())
    }
}

impl CpuCanvas {
    fn new(size: SurfaceSize) -> BackdropResult<Self> {
        // vello_cpu cannot allocate an empty pixmap; keep one backing pixel and expose none.
        let width: u16 = size
            .width
            .max(1)
            .try_into()
            .map_err(|_| BackdropError::validation("surface width exceeds u16"))?;
        let height: u16 = size
            .height
            .max(1)
            .try_into()
            .map_err(|_| BackdropError::validation("surface height exceeds u16"))?;

        Ok(Self {
            width,
            height,
            ctx: vello_cpu::RenderContext::new(width, height),
            pixmap: vello_cpu::Pixmap::new(width, height),
            scratch: vello_cpu::Pixmap::new(width, height),
            state: PaintState::default(),
            dirty: false,
        })
    }

    fn flush(&mut self) {
        if !self.dirty {
            return;
        }
        self.ctx.flush();
        self.scratch.data_as_u8_slice_mut().fill(0);
        self.ctx.render_to_pixmap(&mut self.scratch);
        over_premul_in_place(
            self.pixmap.data_as_u8_slice_mut(),
            self.scratch.data_as_u8_slice(),
        );
        self.ctx.reset();
        self.dirty = false;
    }

    fn visible_bytes(&self, size: SurfaceSize) -> Vec<u8> {
        let src = self.pixmap.data_as_u8_slice();
        let stride = usize::from(self.width) * 4;
        let row_len = (size.width as usize).min(usize::from(self.width)) * 4;
        let rows = (size.height as usize).min(usize::from(self.height));

        let mut out = Vec::with_capacity(row_len * rows);
        for row in src.chunks_exact(stride).take(rows) {
            out.extend_from_slice(&row[..row_len]);
        }
        out
    }

    fn covers_surface(&self, rect: Rect) -> bool {
        rect.x0 <= 0.0
            && rect.y0 <= 0.0
            && rect.x1 >= f64::from(self.width)
            && rect.y1 >= f64::from(self.height)
    }

    fn set_paint(&mut self, color: Color) {
        let [r, g, b, a] = color.to_rgba8();
        self.ctx
            .set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, a));
        self.dirty = true;
    }

    fn set_stroke_paint(&mut self) {
        self.set_paint(self.state.effective_stroke());
        self.ctx
            .set_stroke(vello_cpu::kurbo::Stroke::new(self.state.stroke_width));
    }
}

impl DrawContext for CpuCanvas {
    fn clear_rect(&mut self, rect: Rect) {
        if self.covers_surface(rect) {
            // Nothing drawn earlier in this frame can survive a full clear.
            self.ctx.reset();
            self.dirty = false;
            self.pixmap.data_as_u8_slice_mut().fill(0);
            return;
        }

        self.flush();
        let clip = rect
            .abs()
            .intersect(Rect::new(0.0, 0.0, f64::from(self.width), f64::from(self.height)));
        let (x0, x1) = (clip.x0.floor() as usize, clip.x1.ceil() as usize);
        let (y0, y1) = (clip.y0.floor() as usize, clip.y1.ceil() as usize);
        if x0 >= x1 || y0 >= y1 {
            return;
        }
        let stride = usize::from(self.width) * 4;
        let data = self.pixmap.data_as_u8_slice_mut();
        for row in data.chunks_exact_mut(stride).take(y1).skip(y0) {
            row[x0 * 4..x1 * 4].fill(0);
        }
    }

    fn fill_rect(&mut self, rect: Rect) {
        self.set_paint(self.state.effective_fill());
        self.ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            rect.x0, rect.y0, rect.x1, rect.y1,
        ));
    }

    fn fill_circle(&mut self, center: Point, radius: f64) {
        if radius <= 0.0 {
            return;
        }
        self.set_paint(self.state.effective_fill());
        let circle =
            vello_cpu::kurbo::Circle::new(vello_cpu::kurbo::Point::new(center.x, center.y), radius);
        self.ctx.fill_path(&circle.to_path(CIRCLE_TOLERANCE));
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
        self.set_stroke_paint();
        let mut path = vello_cpu::kurbo::BezPath::new();
        path.move_to(vello_cpu::kurbo::Point::new(from.x, from.y));
        path.line_to(vello_cpu::kurbo::Point::new(to.x, to.y));
        self.ctx.stroke_path(&path);
    }

    fn stroke_rect(&mut self, rect: Rect) {
        self.set_stroke_paint();
        self.ctx.stroke_rect(&vello_cpu::kurbo::Rect::new(
            rect.x0, rect.y0, rect.x1, rect.y1,
        ));
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
