use super::*;
use crate::render::{
    context::RenderTarget,
    recording::{DrawCmd, RecordingTarget},
};

fn tick_once(grid: &mut RetroGrid) -> Vec<DrawCmd> {
    let mut target = RecordingTarget::new(grid.surface_size());
    grid.tick(target.context_2d().unwrap());
    target.present().unwrap();
    target.last_frame().to_vec()
}

#[test]
fn tick_paints_background_lines_and_rings() {
    let mut grid = RetroGrid::new(GridConfig::default(), SurfaceSize::new(120, 60));
    let frame = tick_once(&mut grid);

    assert!((grid.time() - 0.8).abs() < 1e-12);
    match &frame[0] {
        DrawCmd::FillRect { rect, color } => {
            assert_eq!(*rect, SurfaceSize::new(120, 60).to_rect());
            assert_eq!(color.to_rgba8(), [10, 10, 10, 255]);
        }
        other => panic!("expected background fill, got {other:?}"),
    }

    let lines = frame
        .iter()
        .filter(|c| matches!(c, DrawCmd::StrokeLine { .. }))
        .count();
    // x = 0, 60 and y = 0.
    assert_eq!(lines, 3);

    let rects = frame
        .iter()
        .filter(|c| matches!(c, DrawCmd::StrokeRect { .. }))
        .count();
    assert_eq!(rects, 20);
    assert_eq!(frame.len(), 24);
}

#[test]
fn ring_geometry_follows_the_clock() {
    let mut grid = RetroGrid::new(GridConfig::default(), SurfaceSize::new(1000, 500));
    let rings = grid.rings();
    assert_eq!(rings.len(), 20);
    assert_eq!(rings[0].alpha, 0.7);
    assert!((rings[0].rect.width() - 200.0).abs() < 1e-9);
    assert!((rings[0].rect.height() - 100.0).abs() < 1e-9);
    assert_eq!(rings[0].rect.center(), Point::new(500.0, 250.0));

    grid.time = 390.0;
    let rings = grid.rings();
    // Ring 1 wrapped past the period: offset (390 + 30) mod 400 = 20.
    assert!((rings[1].alpha - (1.0 - 20.0 / 400.0) * 0.7).abs() < 1e-12);
    assert!((rings[1].rect.width() - 1000.0 * 0.2 * 1.1).abs() < 1e-9);
    // Ring 0 is near the end of its sweep: faint and large.
    assert!(rings[0].alpha < 0.02);
    assert!(rings[0].rect.width() > 580.0);
}

#[test]
fn clock_is_periodic() {
    let mut a = RetroGrid::new(GridConfig::default(), SurfaceSize::new(200, 200));
    let mut b = RetroGrid::new(GridConfig::default(), SurfaceSize::new(200, 200));
    a.time = 12.5;
    b.time = 12.5 + 400.0 * 3.0;
    for (ra, rb) in a.rings().iter().zip(b.rings()) {
        assert!((ra.alpha - rb.alpha).abs() < 1e-9);
    }
}

#[test]
fn negative_speed_stays_in_phase_range() {
    let cfg = GridConfig {
        speed: -7.0,
        ..GridConfig::default()
    };
    let mut grid = RetroGrid::new(cfg, SurfaceSize::new(100, 100));
    for _ in 0..100 {
        tick_once(&mut grid);
    }
    for ring in grid.rings() {
        assert!((0.0..=0.7).contains(&ring.alpha));
    }
}

#[test]
fn degenerate_cell_and_period_draw_nothing_extra() {
    let cfg = GridConfig {
        cell_size: 0.0,
        period: 0.0,
        ..GridConfig::default()
    };
    let mut grid = RetroGrid::new(cfg, SurfaceSize::new(100, 100));
    let frame = tick_once(&mut grid);
    assert_eq!(frame.len(), 1);
}

#[test]
fn resize_only_moves_the_bounds() {
    let mut grid = RetroGrid::new(GridConfig::default(), SurfaceSize::new(100, 100));
    tick_once(&mut grid);
    let t = grid.time();
    grid.resize(SurfaceSize::new(300, 200));
    assert_eq!(grid.surface_size(), SurfaceSize::new(300, 200));
    assert_eq!(grid.time(), t);
}

#[test]
fn config_json_accepts_original_option_names() {
    let cfg: GridConfig = serde_json::from_str(
        r#"{"cellSize": 40, "gridColor": "rgba(168, 85, 247, 0.2)", "speed": 1.5}"#,
    )
    .unwrap();
    assert_eq!(cfg.cell_size, 40.0);
    assert_eq!(cfg.speed, 1.5);
    assert_eq!(cfg.rings, 20);
    assert!((cfg.grid_color.a - 0.2).abs() < 1e-9);
}

#[test]
fn tiny_cells_draw_a_bounded_number_of_lines() {
    let cfg = GridConfig {
        cell_size: 1e-20,
        rings: 0,
        ..GridConfig::default()
    };
    let mut grid = RetroGrid::new(cfg, SurfaceSize::new(100, 50));
    let frame = tick_once(&mut grid);
    let lines = frame
        .iter()
        .filter(|c| matches!(c, DrawCmd::StrokeLine { .. }))
        .count();
    assert_eq!(lines, 2 * MAX_LINES_PER_AXIS as usize);
}

#[test]
fn line_offsets_stop_below_the_extent() {
    let xs = line_offsets(130.0, 60.0).collect::<Vec<_>>();
    assert_eq!(xs, [0.0, 60.0, 120.0]);
    assert_eq!(line_offsets(0.0, 10.0).count(), 0);
}
