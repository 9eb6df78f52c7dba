use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{ArgAction, Parser, Subcommand};
use quotedoodle::{
    AppConfig, AspectRatio, Canvas, DirectoryTarget, FrameLoop, HeadlessHost, LiveScene, Point,
    QuoteFeed, QuoteSource as _, Rng64, SceneEvent, ShareCompositor, ShareTarget as _,
    SharedPointer, encode_png,
};

#[derive(Parser, Debug)]
#[command(name = "quotedoodle", version)]
struct Cli {
    /// Settings JSON.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// More log output (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a quote card as a PNG.
    Share(ShareArgs),
    /// Run the live background off-screen and save the last frame as a PNG.
    Scene(SceneArgs),
    /// Run the live background in a window (Esc to quit).
    #[cfg(feature = "window")]
    Preview(PreviewArgs),
}

#[derive(Parser, Debug)]
struct ShareArgs {
    /// Quote text. Drawn from the bundled quotes when omitted.
    #[arg(long)]
    quote: Option<String>,

    /// Card shape: 1:1 or 9:16.
    #[arg(long, default_value = "1:1")]
    aspect: AspectRatio,

    /// Output PNG path.
    #[arg(long, default_value = quotedoodle::DEFAULT_FILENAME)]
    out: PathBuf,

    /// Seed for ornament placement.
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Parser, Debug)]
struct SceneArgs {
    /// Frames to simulate.
    #[arg(long, default_value_t = 120)]
    frames: u64,

    #[arg(long, default_value_t = 1280)]
    width: u32,

    #[arg(long, default_value_t = 720)]
    height: u32,

    /// Fixed pointer position as `X,Y`.
    #[arg(long, value_parser = parse_point)]
    pointer: Option<Point>,

    /// Output PNG path.
    #[arg(long, default_value = "scene.png")]
    out: PathBuf,

    /// Seed for the doodle population.
    #[arg(long)]
    seed: Option<u64>,
}

#[cfg(feature = "window")]
#[derive(Parser, Debug)]
struct PreviewArgs {
    #[arg(long, default_value_t = 1280)]
    width: u32,

    #[arg(long, default_value_t = 720)]
    height: u32,
}

fn parse_point(s: &str) -> Result<Point, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y, got \"{s}\""))?;
    let x: f64 = x.trim().parse().map_err(|e| format!("bad x: {e}"))?;
    let y: f64 = y.trim().parse().map_err(|e| format!("bad y: {e}"))?;
    Ok(Point::new(x, y))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = match &cli.config {
        Some(path) => AppConfig::from_path(path)
            .with_context(|| format!("load config '{}'", path.display()))?,
        None => AppConfig::default(),
    };

    match cli.cmd {
        Command::Share(args) => cmd_share(&config, args),
        Command::Scene(args) => cmd_scene(&config, args),
        #[cfg(feature = "window")]
        Command::Preview(args) => cmd_preview(&config, args),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .try_init();
}

fn cmd_share(config: &AppConfig, args: ShareArgs) -> anyhow::Result<()> {
    let mut share_cfg = config.share.clone();
    if args.seed.is_some() {
        share_cfg.seed = args.seed;
    }

    let quote = match args.quote {
        Some(q) => q,
        None => QuoteFeed::bundled().next_quote()?,
    };

    let mut compositor = ShareCompositor::from_config(&share_cfg);
    let image = compositor
        .compose(&quote, args.aspect)
        .context("generate share image")?;

    let (dir, name) = split_out_path(&args.out)?;
    DirectoryTarget::new(dir).download_image(&image, &name)?;

    eprintln!("wrote {} ({}, \"{quote}\")", args.out.display(), args.aspect);
    Ok(())
}

fn cmd_scene(config: &AppConfig, args: SceneArgs) -> anyhow::Result<()> {
    let viewport = Canvas::new(args.width, args.height)?;
    let pointer = SharedPointer::new();
    let mut rng = args.seed.map(Rng64::new).unwrap_or_else(Rng64::from_entropy);
    let mut scene = LiveScene::with_viewport(config.scene.clone(), viewport, pointer, &mut rng)?;

    let mut host = HeadlessHost::new();
    if let Some(p) = args.pointer {
        host.push_event(SceneEvent::PointerMove(p));
    }
    let exit = FrameLoop::new()
        .with_max_frames(args.frames)
        .run(&mut scene, &mut host)?;

    let frame = host
        .take_last_frame()
        .context("scene produced no frames (use --frames > 0)")?;
    let png = encode_png(&frame)?;
    if let Some(parent) = args.out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(&args.out, &png.bytes)
        .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!(
        "wrote {} after {} frames ({:?})",
        args.out.display(),
        exit.frames,
        exit.reason
    );
    Ok(())
}

#[cfg(feature = "window")]
fn cmd_preview(config: &AppConfig, args: PreviewArgs) -> anyhow::Result<()> {
    let viewport = Canvas::new(args.width, args.height)?;
    let mut scene = LiveScene::new(config.scene.clone(), viewport, SharedPointer::new())?;
    let mut host = quotedoodle::WindowHost::open("quotedoodle", viewport)?;
    let exit = FrameLoop::new().run(&mut scene, &mut host)?;
    eprintln!("closed after {} frames", exit.frames);
    Ok(())
}

fn split_out_path(out: &Path) -> anyhow::Result<(PathBuf, String)> {
    let name = out
        .file_name()
        .and_then(|n| n.to_str())
        .with_context(|| format!("output path '{}' has no file name", out.display()))?
        .to_owned();
    let dir = out
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));
    Ok((dir, name))
}
