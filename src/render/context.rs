use crate::foundation::{
    color::Color,
    core::{Point, Rect, SurfaceSize},
    error::BackdropResult,
};

/// 2D immediate-mode drawing context.
///
/// Paint state (fill color, global alpha, stroke) persists between calls until changed, the
/// way a browser canvas context behaves. Global alpha multiplies the alpha of every fill and
/// stroke issued after it is set.
pub trait DrawContext {
    /// Reset every pixel inside `rect` to transparent.
    fn clear_rect(&mut self, rect: Rect);

    /// Fill `rect` with the current fill color.
    fn fill_rect(&mut self, rect: Rect);

    /// Fill a disk (begin path, full arc, fill) with the current fill color.
    fn fill_circle(&mut self, center: Point, radius: f64);

    /// Set the color used by subsequent fills.
    fn set_fill_color(&mut self, color: Color);

    /// Set the global alpha, clamped to `0..=1`.
    fn set_global_alpha(&mut self, alpha: f64);

    /// Set the color and width used by subsequent strokes.
    fn set_stroke(&mut self, color: Color, width: f64);

    /// Stroke a single line segment.
    fn stroke_line(&mut self, from: Point, to: Point);

    /// Stroke the outline of `rect`.
    fn stroke_rect(&mut self, rect: Rect);
}

/// A drawing surface that owns its pixel dimensions and hands out a [`DrawContext`].
pub trait RenderTarget {
    /// Current surface dimensions.
    fn size(&self) -> SurfaceSize;

    /// Resize the backing store. Called by the mounted handle on every resize signal.
    fn set_size(&mut self, size: SurfaceSize) -> BackdropResult<()>;

    /// The 2D context, or `None` when the surface cannot provide one.
    fn context_2d(&mut self) -> Option<&mut dyn DrawContext>;

    /// Commit everything drawn since the previous call as one frame.
    fn present(&mut self) -> BackdropResult<()> {
        Ok(())
    }
}
