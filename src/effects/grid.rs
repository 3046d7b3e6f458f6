use serde::{Deserialize, Serialize};

use crate::{
    effects::Effect,
    foundation::{
        color::Color,
        core::{Point, Rect, SurfaceSize},
    },
    render::context::DrawContext,
};

/// Grid lines drawn per axis at most; sub-pixel cells would otherwise never finish.
const MAX_LINES_PER_AXIS: u32 = 4096;

/// Options of a [`RetroGrid`]. Missing JSON fields take the [`Default`] values.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GridConfig {
    /// Grid cell edge in pixels.
    #[serde(alias = "cellSize")]
    pub cell_size: f64,
    /// Opaque background painted every frame.
    pub background: Color,
    /// Color of the static grid lines.
    #[serde(alias = "gridColor")]
    pub grid_color: Color,
    /// RGB of the moving rectangles; their alpha comes from the loop phase.
    #[serde(alias = "lineColor")]
    pub line_color: Color,
    /// Clock increment per frame.
    pub speed: f64,
    /// Number of concentric rectangles.
    pub rings: u32,
    /// Clock offset between consecutive rectangles.
    #[serde(alias = "ringSpacing")]
    pub ring_spacing: f64,
    /// Clock period of one full outward sweep.
    pub period: f64,
    /// Alpha of a rectangle at the start of its sweep.
    #[serde(alias = "ringAlpha")]
    pub ring_alpha: f64,
    /// Rectangle size at the start of its sweep, as a fraction of the surface.
    #[serde(alias = "baseScale")]
    pub base_scale: f64,
    /// Stroke width of the grid lines.
    #[serde(alias = "gridLineWidth")]
    pub grid_line_width: f64,
    /// Stroke width of the rectangles.
    #[serde(alias = "ringLineWidth")]
    pub ring_line_width: f64,
}

impl Default for GridConfig {
    fn default() -> Self {
        let accent = Color::from_rgb8(168, 85, 247);
        Self {
            cell_size: 60.0,
            background: Color::from_rgb8(0x0a, 0x0a, 0x0a),
            grid_color: accent.with_alpha(0.2),
            line_color: accent.with_alpha(0.6),
            speed: 0.8,
            rings: 20,
            ring_spacing: 30.0,
            period: 400.0,
            ring_alpha: 0.7,
            base_scale: 0.2,
            grid_line_width: 1.0,
            ring_line_width: 2.0,
        }
    }
}

/// One rectangle of the looping perspective effect, as drawn for the current clock.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ring {
    /// Outline, centered on the surface.
    pub rect: Rect,
    /// Alpha in `0..=ring_alpha`, fading as the ring grows.
    pub alpha: f64,
}

/// Static cell grid with rectangles sweeping outward from the center.
///
/// The only evolving state is a scalar clock advanced by `speed` per frame.
#[derive(Debug)]
pub struct RetroGrid {
    config: GridConfig,
    size: SurfaceSize,
    time: f64,
}

impl RetroGrid {
    /// Build a grid with its clock at zero.
    pub fn new(config: GridConfig, size: SurfaceSize) -> Self {
        Self {
            config,
            size,
            time: 0.0,
        }
    }

    /// The options this grid was built with.
    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// Accumulated clock.
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Rectangles for the current clock, innermost first in loop order.
    pub fn rings(&self) -> Vec<Ring> {
        let cfg = &self.config;
        if cfg.period <= 0.0 {
            return Vec::new();
        }
        let (w, h) = (self.size.width_f64(), self.size.height_f64());
        let center = Point::new(w / 2.0, h / 2.0);

        (0..cfg.rings)
            .map(|i| {
                let offset = (self.time + f64::from(i) * cfg.ring_spacing).rem_euclid(cfg.period);
                let phase = offset / cfg.period;
                let scale = 1.0 + phase * 2.0;
                let rw = w * cfg.base_scale * scale;
                let rh = h * cfg.base_scale * scale;
                Ring {
                    rect: Rect::from_center_size(center, (rw, rh)),
                    alpha: (1.0 - phase) * cfg.ring_alpha,
                }
            })
            .collect()
    }

    fn draw_cells(&self, ctx: &mut dyn DrawContext) {
        let cell = self.config.cell_size;
        if cell <= 0.0 {
            return;
        }
        let (w, h) = (self.size.width_f64(), self.size.height_f64());
        ctx.set_stroke(self.config.grid_color, self.config.grid_line_width);

        for x in line_offsets(w, cell) {
            ctx.stroke_line(Point::new(x, 0.0), Point::new(x, h));
        }
        for y in line_offsets(h, cell) {
            ctx.stroke_line(Point::new(0.0, y), Point::new(w, y));
        }
    }
}

impl Effect for RetroGrid {
    fn name(&self) -> &'static str {
        "grid"
    }

    fn surface_size(&self) -> SurfaceSize {
        self.size
    }

    fn resize(&mut self, size: SurfaceSize) {
        self.size = size;
    }

    fn tick(&mut self, ctx: &mut dyn DrawContext) {
        ctx.set_global_alpha(1.0);
        ctx.set_fill_color(self.config.background.with_alpha(1.0));
        ctx.fill_rect(self.size.to_rect());

        self.time += self.config.speed;

        self.draw_cells(ctx);
        for ring in self.rings() {
            ctx.set_stroke(
                self.config.line_color.with_alpha(ring.alpha),
                self.config.ring_line_width,
            );
            ctx.stroke_rect(ring.rect);
        }
    }
}

/// `0, cell, 2 * cell, ...` below `extent`, at most [`MAX_LINES_PER_AXIS`] of them.
fn line_offsets(extent: f64, cell: f64) -> impl Iterator<Item = f64> {
    (0..MAX_LINES_PER_AXIS)
        .map(move |i| f64::from(i) * cell)
        .take_while(move |x| *x < extent)
}

#[cfg(test)]
#[path = "../../tests/unit/effects/grid.rs"]
mod tests;
