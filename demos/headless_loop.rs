use backdrop::{
    DrawCmd, FieldConfig, HeadlessHost, RecordingTarget, RenderTarget as _, ResizePolicy,
    SurfaceSize,
};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let config = FieldConfig {
        count: 24,
        seed: Some(7),
        on_resize: ResizePolicy::Reseed,
        ..FieldConfig::default()
    };
    let mut host = HeadlessHost::new();
    let Some(mut handle) = backdrop::create(
        config,
        Some(RecordingTarget::new(SurfaceSize::new(320, 180))),
        &mut host,
    ) else {
        anyhow::bail!("surface could not be mounted");
    };

    host.run(&mut handle, 120)?;
    host.push_resize(SurfaceSize::new(640, 360));
    host.run(&mut handle, 120)?;

    let disks = handle
        .target()
        .last_frame()
        .iter()
        .filter(|c| matches!(c, DrawCmd::FillCircle { .. }))
        .count();
    println!(
        "headless_loop: {} frames, {disks} disks in the last frame, surface {}",
        handle.frames_rendered(),
        handle.target().size(),
    );

    let _target = handle.destroy(&mut host);
    println!("headless_loop: {:?}", host.stats());
    Ok(())
}
