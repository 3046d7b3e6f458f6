use std::path::{Path, PathBuf};

use anyhow::Context as _;
use backdrop::{
    Configurable, CpuTarget, Effect, FieldConfig, FieldHandle, GridConfig, HeadlessHost,
    JsonConfig, SurfaceSize,
};
use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "backdrop", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render frames of an effect as PNG files.
    Render(RenderArgs),
    /// Print every option of an effect with its current value.
    Options(OptionsArgs),
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum EffectChoice {
    Particles,
    Grid,
}

#[derive(Args, Debug)]
struct ConfigArgs {
    /// Effect to configure.
    #[arg(long, value_enum, default_value_t = EffectChoice::Particles)]
    effect: EffectChoice,

    /// Options JSON (missing fields take defaults).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override one option, e.g. `--set count=40 --set color=#22d3ee`.
    #[arg(long = "set", value_name = "NAME=VALUE")]
    overrides: Vec<String>,
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[command(flatten)]
    config: ConfigArgs,

    /// Surface width in pixels.
    #[arg(long, default_value_t = 640)]
    width: u32,

    /// Surface height in pixels.
    #[arg(long, default_value_t = 360)]
    height: u32,

    /// Number of frames to render.
    #[arg(long, default_value_t = 60)]
    frames: u64,

    /// Particle seed (particles only; overrides the config).
    #[arg(long)]
    seed: Option<u64>,

    /// Deliver a resize before this frame index.
    #[arg(long, requires = "resize_to")]
    resize_at: Option<u64>,

    /// Size delivered by `--resize-at`, as WIDTHxHEIGHT.
    #[arg(long, value_parser = parse_size)]
    resize_to: Option<SurfaceSize>,

    /// Output directory for `frame_NNNNN.png`.
    #[arg(long)]
    out: PathBuf,

    /// Only write the final frame.
    #[arg(long, default_value_t = false)]
    last_only: bool,
}

#[derive(Args, Debug)]
struct OptionsArgs {
    #[command(flatten)]
    config: ConfigArgs,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Options(args) => cmd_options(args),
    }
}

fn parse_size(s: &str) -> Result<SurfaceSize, String> {
    SurfaceSize::parse(s).ok_or_else(|| format!("expected WIDTHxHEIGHT, got \"{s}\""))
}

fn load_config<C: JsonConfig + Configurable + Default>(args: &ConfigArgs) -> anyhow::Result<C> {
    let mut cfg = match &args.config {
        Some(path) => C::from_path(path)
            .with_context(|| format!("load config '{}'", path.display()))?,
        None => C::default(),
    };
    let table = C::capabilities();
    for assignment in &args.overrides {
        table
            .apply_assignment(&mut cfg, assignment)
            .with_context(|| format!("apply --set {assignment}"))?;
    }
    Ok(cfg)
}

fn cmd_options(args: OptionsArgs) -> anyhow::Result<()> {
    match args.config.effect {
        EffectChoice::Particles => print_options(&load_config::<FieldConfig>(&args.config)?),
        EffectChoice::Grid => print_options(&load_config::<GridConfig>(&args.config)?),
    }
    Ok(())
}

fn print_options<C: Configurable>(cfg: &C) {
    for (name, value) in C::capabilities().snapshot(cfg) {
        println!("{name} = {value}");
    }
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let size = SurfaceSize::new(args.width, args.height);
    let target = CpuTarget::new(size).context("allocate render surface")?;
    let mut host = HeadlessHost::new();

    std::fs::create_dir_all(&args.out)
        .with_context(|| format!("create output dir '{}'", args.out.display()))?;

    let written = match args.config.effect {
        EffectChoice::Particles => {
            let mut cfg = load_config::<FieldConfig>(&args.config)?;
            if args.seed.is_some() {
                cfg.seed = args.seed;
            }
            let handle = backdrop::create(cfg, Some(target), &mut host)
                .context("particle field could not be mounted")?;
            drive(handle, &mut host, &args)?
        }
        EffectChoice::Grid => {
            let cfg = load_config::<GridConfig>(&args.config)?;
            let handle = backdrop::create_grid(cfg, Some(target), &mut host)
                .context("retro grid could not be mounted")?;
            drive(handle, &mut host, &args)?
        }
    };

    eprintln!("wrote {written} frame(s) to {}", args.out.display());
    Ok(())
}

fn drive<E: Effect>(
    mut handle: FieldHandle<E, CpuTarget>,
    host: &mut HeadlessHost,
    args: &RenderArgs,
) -> anyhow::Result<u64> {
    let mut written = 0;
    for frame in 0..args.frames {
        if args.resize_at == Some(frame)
            && let Some(size) = args.resize_to
        {
            host.push_resize(size);
        }
        if host.run(&mut handle, 1)? == 0 {
            break;
        }
        if !args.last_only || frame + 1 == args.frames {
            write_png(handle.target(), &args.out, frame)?;
            written += 1;
        }
    }
    handle.destroy(host);
    Ok(written)
}

fn write_png(target: &CpuTarget, dir: &Path, frame: u64) -> anyhow::Result<()> {
    let snapshot = target.snapshot().to_straight_alpha();
    let path = dir.join(format!("frame_{frame:05}.png"));
    image::save_buffer_with_format(
        &path,
        &snapshot.data,
        snapshot.width,
        snapshot.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))
}
