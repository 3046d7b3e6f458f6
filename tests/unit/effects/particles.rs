use super::*;
use crate::render::{
    context::RenderTarget,
    recording::{DrawCmd, RecordingTarget},
};

fn seeded(count: usize, seed: u64) -> FieldConfig {
    FieldConfig {
        count,
        seed: Some(seed),
        ..FieldConfig::default()
    }
}

fn assert_in_bounds(field: &ParticleField) {
    let size = field.surface_size();
    for p in field.particles() {
        assert!(size.contains(p.pos), "{:?} escaped {size}", p.pos);
    }
}

#[test]
fn defaults_match_documented_values() {
    let cfg = FieldConfig::default();
    assert_eq!(cfg.count, 100);
    assert_eq!(cfg.color.to_css(), "#a855f7");
    assert_eq!(cfg.particle_radius, 2.0);
    assert_eq!(cfg.speed_scale, 1.0);
    assert_eq!(cfg.on_expire, Expiry::Keep);
    assert_eq!(cfg.on_resize, ResizePolicy::Keep);
}

#[test]
fn construction_allocates_count_within_bounds() {
    let field = ParticleField::new(seeded(37, 1), SurfaceSize::new(320, 200));
    assert_eq!(field.particles().len(), 37);
    assert_in_bounds(&field);
    for p in field.particles() {
        let life = p.life.unwrap();
        assert!((0.5..1.0).contains(&life));
        assert!(p.vel.x.abs() <= 1.0 && p.vel.y.abs() <= 1.0);
    }
}

#[test]
fn speed_scale_widens_velocity_range() {
    let cfg = FieldConfig {
        speed_scale: 4.0,
        ..seeded(200, 2)
    };
    let field = ParticleField::new(cfg, SurfaceSize::new(100, 100));
    let max = field
        .particles()
        .iter()
        .map(|p| p.vel.x.abs().max(p.vel.y.abs()))
        .fold(0.0, f64::max);
    assert!(max <= 4.0);
    assert!(max > 1.0);
}

#[test]
fn same_seed_same_field() {
    let a = ParticleField::new(seeded(10, 42), SurfaceSize::new(50, 50));
    let b = ParticleField::new(seeded(10, 42), SurfaceSize::new(50, 50));
    assert_eq!(a.particles(), b.particles());
}

#[test]
fn ticking_preserves_count_and_wrap_invariant() {
    let cfg = FieldConfig {
        speed_scale: 25.0,
        ..seeded(64, 3)
    };
    let mut field = ParticleField::new(cfg, SurfaceSize::new(80, 60));
    for _ in 0..500 {
        field.step();
        assert_eq!(field.particles().len(), 64);
        assert_in_bounds(&field);
    }
    assert_eq!(field.frame_count(), 500);
}

#[test]
fn five_particles_stay_inside_over_a_thousand_ticks() {
    let mut field = ParticleField::new(seeded(5, 7), SurfaceSize::new(100, 100));
    let mut target = RecordingTarget::new(SurfaceSize::new(100, 100));
    for _ in 0..1000 {
        field.tick(target.context_2d().unwrap());
        target.present().unwrap();
    }
    assert_eq!(field.particles().len(), 5);
    assert_in_bounds(&field);
}

#[test]
fn wrap_teleports_instead_of_bouncing() {
    let mut field = ParticleField::new(seeded(1, 0), SurfaceSize::new(100, 100));
    field.particles[0].pos = Point::new(99.5, 0.2);
    field.particles[0].vel = Vec2::new(1.0, -0.5);
    field.step();

    let p = field.particles()[0];
    assert_eq!(p.pos.x, 0.0);
    assert!(p.pos.y > 99.0 && p.pos.y < 100.0);
    assert_eq!(p.vel, Vec2::new(1.0, -0.5));
}

#[test]
fn envelope_for_three_quarter_life() {
    let field = ParticleField::new(seeded(0, 0), SurfaceSize::new(10, 10));
    let p = Particle {
        pos: Point::ORIGIN,
        vel: Vec2::ZERO,
        life: Some(0.75),
    };
    let alpha = field.opacity_of(&p);
    assert!((alpha - 0.3 * (0.75 * std::f64::consts::PI).sin()).abs() < 1e-12);
    assert!((alpha - 0.212).abs() < 1e-3);
}

#[test]
fn constant_opacity_does_not_track_life() {
    let cfg = FieldConfig {
        opacity: Opacity::Constant { alpha: 0.4 },
        ..seeded(8, 5)
    };
    let mut field = ParticleField::new(cfg, SurfaceSize::new(30, 30));
    field.step();
    for p in field.particles() {
        assert_eq!(p.life, None);
        assert_eq!(field.opacity_of(p), 0.4);
    }
}

#[test]
fn expired_life_keeps_decreasing_by_default() {
    let mut field = ParticleField::new(seeded(1, 9), SurfaceSize::new(100, 100));
    field.particles[0].life = Some(0.001);
    field.step();
    let life = field.particles()[0].life.unwrap();
    assert!((life - (0.001 - 0.002)).abs() < 1e-12);
    assert_eq!(field.opacity_of(&field.particles()[0]), 0.0);

    // Past -1 the sine comes back positive: the particle reappears without a respawn.
    field.particles[0].life = Some(-1.25);
    assert!(field.opacity_of(&field.particles()[0]) > 0.0);
}

#[test]
fn respawn_replaces_expired_particles() {
    let cfg = FieldConfig {
        on_expire: Expiry::Respawn,
        ..seeded(3, 11)
    };
    let mut field = ParticleField::new(cfg, SurfaceSize::new(100, 100));
    field.particles[1].life = Some(0.001);
    field.step();

    assert_eq!(field.particles().len(), 3);
    let life = field.particles()[1].life.unwrap();
    assert!((0.5..1.0).contains(&life));
    assert_in_bounds(&field);
}

#[test]
fn resize_keeps_positions_until_next_update() {
    let mut field = ParticleField::new(seeded(1, 13), SurfaceSize::new(100, 100));
    field.particles[0].pos = Point::new(90.0, 90.0);
    field.particles[0].vel = Vec2::new(0.5, 0.5);

    field.resize(SurfaceSize::new(50, 50));
    assert_eq!(field.surface_size(), SurfaceSize::new(50, 50));
    assert_eq!(field.particles()[0].pos, Point::new(90.0, 90.0));

    field.step();
    assert_eq!(field.particles()[0].pos, Point::new(0.0, 0.0));
}

#[test]
fn resize_twice_is_idempotent() {
    let mut field = ParticleField::new(seeded(12, 17), SurfaceSize::new(100, 100));
    field.resize(SurfaceSize::new(40, 30));
    let after_first = field.particles().to_vec();
    field.resize(SurfaceSize::new(40, 30));
    assert_eq!(field.surface_size(), SurfaceSize::new(40, 30));
    assert_eq!(field.particles().len(), 12);
    assert_eq!(field.particles(), after_first.as_slice());
}

#[test]
fn reseed_policy_reallocates_inside_new_bounds() {
    let cfg = FieldConfig {
        on_resize: ResizePolicy::Reseed,
        ..seeded(20, 19)
    };
    let mut field = ParticleField::new(cfg, SurfaceSize::new(500, 500));
    field.resize(SurfaceSize::new(20, 10));
    assert_eq!(field.particles().len(), 20);
    assert_in_bounds(&field);
}

#[test]
fn tick_clears_then_draws_one_disk_per_particle() {
    let cfg = FieldConfig {
        particle_radius: 3.0,
        ..seeded(4, 23)
    };
    let mut field = ParticleField::new(cfg, SurfaceSize::new(64, 48));
    let mut target = RecordingTarget::new(SurfaceSize::new(64, 48));
    field.tick(target.context_2d().unwrap());
    target.present().unwrap();

    let frame = target.last_frame();
    assert_eq!(frame.len(), 5);
    assert_eq!(
        frame[0],
        DrawCmd::Clear {
            rect: SurfaceSize::new(64, 48).to_rect()
        }
    );
    for (cmd, p) in frame[1..].iter().zip(field.particles()) {
        let DrawCmd::FillCircle {
            center,
            radius,
            color,
        } = cmd
        else {
            panic!("expected a disk, got {cmd:?}");
        };
        assert_eq!(*center, p.pos);
        assert_eq!(*radius, 3.0);
        assert!((color.a - field.opacity_of(p)).abs() < 1e-12);
    }
}

#[test]
fn config_json_accepts_aliases_and_defaults() {
    let cfg: FieldConfig = serde_json::from_str(
        r##"{"quantity": 80, "particleSize": 3, "speedScale": 0.25, "color": "#ff0000"}"##,
    )
    .unwrap();
    assert_eq!(cfg.count, 80);
    assert_eq!(cfg.particle_radius, 3.0);
    assert_eq!(cfg.speed_scale, 0.25);
    assert_eq!(cfg.color.to_css(), "#ff0000");
    assert_eq!(cfg.opacity, Opacity::default());

    let cfg: FieldConfig = serde_json::from_str(
        r#"{"opacity": {"mode": "constant", "alpha": 0.5}, "on_expire": "respawn"}"#,
    )
    .unwrap();
    assert_eq!(cfg.opacity, Opacity::Constant { alpha: 0.5 });
    assert_eq!(cfg.on_expire, Expiry::Respawn);

    assert!(serde_json::from_str::<FieldConfig>(r#"{"bogus": 1}"#).is_err());
}
