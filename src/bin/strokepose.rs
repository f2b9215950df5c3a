use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use rand::SeedableRng;
use rand::rngs::StdRng;

use strokepose::{
    CatalogLoader, PathPlanner, PlannerSettings, PointerInput, SketchConfig, StrokeCapture,
    StrokeSession,
};

#[derive(Parser, Debug)]
#[command(name = "strokepose", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay a recorded gesture and write the finished stroke as a PNG.
    Stroke(StrokeArgs),
    /// Plan transitions through a sequence of catalog indices and print them as JSON.
    Plan(PlanArgs),
}

#[derive(Parser, Debug)]
struct StrokeArgs {
    /// Recorded pointer inputs (JSON array).
    #[arg(long)]
    gesture: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Session config JSON.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct PlanArgs {
    /// Catalog directory or single catalog JSON file.
    #[arg(long)]
    catalog: PathBuf,

    /// Resolved catalog indices, comma separated, in drawing order.
    #[arg(long, value_delimiter = ',', required = true)]
    indices: Vec<usize>,

    /// Session config JSON.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(serde::Serialize, Debug)]
struct PlanReport {
    current: usize,
    previous: Option<usize>,
    distance: Option<f64>,
    density: Option<usize>,
    frames_per_segment: Option<usize>,
    keyframes: Vec<usize>,
    tail: Vec<usize>,
    anchor: usize,
    frames: usize,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Stroke(args) => cmd_stroke(args),
        Command::Plan(args) => cmd_plan(args),
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<SketchConfig> {
    match path {
        Some(p) => Ok(SketchConfig::from_path(p)?),
        None => Ok(SketchConfig::default()),
    }
}

fn cmd_stroke(args: StrokeArgs) -> anyhow::Result<()> {
    let cfg = load_config(args.config.as_deref())?;
    let text = std::fs::read_to_string(&args.gesture)
        .with_context(|| format!("read gesture '{}'", args.gesture.display()))?;
    let inputs: Vec<PointerInput> = serde_json::from_str(&text)
        .with_context(|| format!("parse gesture '{}'", args.gesture.display()))?;

    let mut capture = StrokeCapture::new(&cfg)?;
    let mut finished = None;
    for input in inputs {
        if let Some(stroke) = capture.handle(input)? {
            finished = Some(stroke);
        }
    }
    let stroke = finished.context("gesture never completed a stroke")?;

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    stroke.save_png(&args.out)?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_plan(args: PlanArgs) -> anyhow::Result<()> {
    let cfg = load_config(args.config.as_deref())?;
    let catalog = CatalogLoader::open(&args.catalog)
        .load_with_progress(|p| tracing::info!(progress = p, "loading catalog"))?;

    let planner = PathPlanner::new(PlannerSettings::from(&cfg))?;
    let mut session = StrokeSession::new();
    let mut rng = StdRng::seed_from_u64(cfg.seed);

    let mut reports = Vec::with_capacity(args.indices.len());
    for &current in &args.indices {
        let path = planner.plan(&catalog, &mut session, current, &mut rng)?;
        let t = path.transition.as_ref();
        reports.push(PlanReport {
            current,
            previous: t.map(|t| t.previous),
            distance: t.map(|t| t.distance),
            density: t.map(|t| t.density),
            frames_per_segment: t.map(|t| t.frames_per_segment),
            keyframes: t.map(|t| t.keyframes.clone()).unwrap_or_default(),
            tail: path.tail.clone(),
            anchor: path.anchor,
            frames: path.poses.len(),
        });
    }

    let json = serde_json::to_string_pretty(&reports).context("serialize plan report")?;
    println!("{json}");
    Ok(())
}
