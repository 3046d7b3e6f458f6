use rand::{Rng, SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};

use crate::{
    effects::Effect,
    foundation::{
        color::Color,
        core::{Point, SurfaceSize, Vec2},
        math::{life_envelope, wrap_coord},
    },
    render::context::DrawContext,
};

/// Half-width of the per-axis velocity range before `speed_scale` (pixels per frame).
const VELOCITY_RANGE: f64 = 1.0;
const LIFE_MIN: f64 = 0.5;
const LIFE_MAX: f64 = 1.0;

/// One drifting point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    /// Position in surface pixels.
    pub pos: Point,
    /// Velocity in pixels per frame.
    pub vel: Vec2,
    /// Remaining life, tracked only when opacity follows the life envelope.
    pub life: Option<f64>,
}

/// How a particle's alpha is computed each frame.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Opacity {
    /// Fixed alpha; life is not tracked.
    Constant {
        /// Alpha applied to every particle.
        alpha: f64,
    },
    /// `max(0, sin(life * pi) * amplitude)`, with life decreasing by `decay` every frame.
    Life {
        /// Peak alpha of the envelope.
        amplitude: f64,
        /// Life lost per frame.
        decay: f64,
    },
}

impl Default for Opacity {
    fn default() -> Self {
        Self::Life {
            amplitude: 0.3,
            decay: 0.002,
        }
    }
}

/// What happens to a particle whose life reached zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Expiry {
    /// Keep simulating; life goes negative and the envelope comes back periodically.
    #[default]
    Keep,
    /// Replace it with a freshly spawned particle.
    Respawn,
}

/// What a resize does to existing particles.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResizePolicy {
    /// Leave positions alone; out-of-bounds particles wrap on their next update.
    #[default]
    Keep,
    /// Reallocate every particle over the new surface.
    Reseed,
}

/// Options of a [`ParticleField`]. Missing JSON fields take the [`Default`] values.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FieldConfig {
    /// Number of particles.
    #[serde(alias = "quantity")]
    pub count: usize,
    /// Fill color.
    pub color: Color,
    /// Disk radius in pixels.
    #[serde(alias = "particleRadius", alias = "particleSize")]
    pub particle_radius: f64,
    /// Multiplier applied to the initial velocity range.
    #[serde(alias = "speedScale")]
    pub speed_scale: f64,
    /// Alpha model.
    pub opacity: Opacity,
    /// Behavior when life runs out.
    #[serde(alias = "onExpire")]
    pub on_expire: Expiry,
    /// Behavior on resize.
    #[serde(alias = "onResize")]
    pub on_resize: ResizePolicy,
    /// Seed for a reproducible field; `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            count: 100,
            color: Color::from_rgb8(0xa8, 0x55, 0xf7),
            particle_radius: 2.0,
            speed_scale: 1.0,
            opacity: Opacity::default(),
            on_expire: Expiry::default(),
            on_resize: ResizePolicy::default(),
            seed: None,
        }
    }
}

/// A fixed-size set of particles that drift, wrap at the edges and fade along their life.
#[derive(Debug)]
pub struct ParticleField {
    config: FieldConfig,
    size: SurfaceSize,
    particles: Vec<Particle>,
    rng: StdRng,
    frames: u64,
}

impl ParticleField {
    /// Allocate `config.count` particles spread uniformly over `size`.
    pub fn new(config: FieldConfig, size: SurfaceSize) -> Self {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let particles = spawn_all(&mut rng, size, &config);
        Self {
            config,
            size,
            particles,
            rng,
            frames: 0,
        }
    }

    /// Current particles, in allocation order.
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// The options this field was built with.
    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    /// Number of completed updates.
    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    /// Advance every particle by one frame without drawing.
    pub fn step(&mut self) {
        let (w, h) = (self.size.width_f64(), self.size.height_f64());
        let decay = match self.config.opacity {
            Opacity::Life { decay, .. } => Some(decay),
            Opacity::Constant { .. } => None,
        };

        for p in &mut self.particles {
            p.pos += p.vel;
            if let (Some(life), Some(decay)) = (p.life.as_mut(), decay) {
                *life -= decay;
            }

            p.pos.x = wrap_coord(p.pos.x, w);
            p.pos.y = wrap_coord(p.pos.y, h);

            let expired = p.life.is_some_and(|life| life <= 0.0);
            if expired && self.config.on_expire == Expiry::Respawn {
                *p = spawn(&mut self.rng, self.size, &self.config);
            }
        }
        self.frames += 1;
    }

    /// Draw the current particles without advancing them.
    pub fn draw(&self, ctx: &mut dyn DrawContext) {
        ctx.set_fill_color(self.config.color);
        for p in &self.particles {
            ctx.set_global_alpha(self.opacity_of(p));
            ctx.fill_circle(p.pos, self.config.particle_radius);
        }
        ctx.set_global_alpha(1.0);
    }

    /// Alpha `p` is drawn with under this field's opacity model.
    pub fn opacity_of(&self, p: &Particle) -> f64 {
        match self.config.opacity {
            Opacity::Constant { alpha } => alpha.clamp(0.0, 1.0),
            // Untracked life sits at the peak of the envelope.
            Opacity::Life { amplitude, .. } => life_envelope(p.life.unwrap_or(0.5), amplitude),
        }
    }
}

impl Effect for ParticleField {
    fn name(&self) -> &'static str {
        "particles"
    }

    fn surface_size(&self) -> SurfaceSize {
        self.size
    }

    fn resize(&mut self, size: SurfaceSize) {
        self.size = size;
        if self.config.on_resize == ResizePolicy::Reseed {
            self.particles = spawn_all(&mut self.rng, size, &self.config);
        }
        tracing::debug!(%size, policy = ?self.config.on_resize, "particle field resized");
    }

    fn tick(&mut self, ctx: &mut dyn DrawContext) {
        ctx.clear_rect(self.size.to_rect());
        self.step();
        self.draw(ctx);
    }
}

fn spawn_all(rng: &mut StdRng, size: SurfaceSize, config: &FieldConfig) -> Vec<Particle> {
    (0..config.count)
        .map(|_| spawn(rng, size, config))
        .collect()
}

fn spawn(rng: &mut StdRng, size: SurfaceSize, config: &FieldConfig) -> Particle {
    let mut unit = || rng.gen_range(0.0..1.0_f64);
    let pos = Point::new(unit() * size.width_f64(), unit() * size.height_f64());
    let spread = 2.0 * VELOCITY_RANGE * config.speed_scale;
    let vel = Vec2::new((unit() - 0.5) * spread, (unit() - 0.5) * spread);
    let life = match config.opacity {
        Opacity::Life { .. } => Some(LIFE_MIN + unit() * (LIFE_MAX - LIFE_MIN)),
        Opacity::Constant { .. } => None,
    };
    Particle { pos, vel, life }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/particles.rs"]
mod tests;
