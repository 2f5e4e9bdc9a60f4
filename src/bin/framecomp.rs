use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "framecomp", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Composite a scene JSON into a PNG.
    Render(RenderArgs),
    /// Print an auto-generated placeholder layout as JSON.
    AutoLayout(AutoLayoutArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Input scene JSON; asset paths resolve relative to its directory.
    #[arg(long)]
    scene: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Render a preview at this display scale instead of the full-resolution export.
    #[arg(long)]
    scale: Option<f64>,
}

#[derive(Parser, Debug)]
struct AutoLayoutArgs {
    /// Number of regions.
    #[arg(long)]
    count: usize,

    /// Canvas width in px.
    #[arg(long, default_value_t = framecomp::Canvas::DEFAULT.width)]
    width: u32,

    /// Canvas height in px.
    #[arg(long, default_value_t = framecomp::Canvas::DEFAULT.height)]
    height: u32,

    /// Region shape.
    #[arg(long, value_enum, default_value_t = ShapeChoice::Rectangle)]
    shape: ShapeChoice,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ShapeChoice {
    Rectangle,
    Circle,
}

impl From<ShapeChoice> for framecomp::PlaceholderShape {
    fn from(s: ShapeChoice) -> Self {
        match s {
            ShapeChoice::Rectangle => framecomp::PlaceholderShape::Rectangle,
            ShapeChoice::Circle => framecomp::PlaceholderShape::Circle,
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::AutoLayout(args) => cmd_auto_layout(args),
    }
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let scene = framecomp::SceneDesc::from_path(&args.scene)?;
    let assets_root = args.scene.parent().unwrap_or_else(|| Path::new("."));
    let loader = framecomp::FsAssetLoader::new(assets_root);

    let coverage = scene.layout.coverage(scene.photos.len());
    if !coverage.is_sufficient() {
        tracing::warn!(
            placeholders = coverage.placeholders,
            photos = coverage.photos,
            "more photos than placeholders; {} will not be rendered",
            coverage.excess_photos
        );
    }

    let mut state = framecomp::SceneState::for_scene(&scene);
    let report = framecomp::load_scene_assets(&scene, &loader, &mut state);
    tracing::info!(loaded = report.loaded, failed = report.failed, "assets");

    let mode = match args.scale {
        Some(scale) => framecomp::RenderMode::Preview { scale },
        None => framecomp::RenderMode::Export,
    };
    let mut renderer = framecomp::CpuRenderer::new(framecomp::RenderOpts::default());
    let frame = renderer.render(&scene, &state, mode)?;
    let png = frame.encode_png()?;

    if let Some(parent) = args.out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(&args.out, png)
        .with_context(|| format!("write png '{}'", args.out.display()))?;

    tracing::info!(
        width = frame.width,
        height = frame.height,
        out = %args.out.display(),
        "wrote frame"
    );
    Ok(())
}

fn cmd_auto_layout(args: AutoLayoutArgs) -> anyhow::Result<()> {
    let canvas = framecomp::Canvas::new(args.width, args.height);
    let mut layout = framecomp::FrameLayout::new(canvas);
    layout.validate()?;
    layout.placeholders = framecomp::auto_layout(canvas, args.count, args.shape.into());
    println!("{}", layout.to_json_string()?);
    Ok(())
}
