//! anim-export CLI - plan sparse export schedules for keyed scenes.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anim_export::export::{ExecutionMode, LogProgress, NoProgress, ProgressReporter};
use anim_export::scene::{plan_scene, ExportEvent, ExportLog, SceneDesc, ScenePlan};
use anim_export::Tick;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "anim-export",
    about = "Sparse time-sample scheduler for animated export",
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("ANIM_EXPORT_BUILD_DATE"), ")"),
)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress log output
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the export of a scene with recording operations and print the schedule
    #[command(alias = "p")]
    Plan {
        /// Scene description (JSON)
        scene: PathBuf,
        /// Print the full plan as JSON
        #[arg(short, long)]
        json: bool,
        /// Run operations due at the same time in parallel
        #[arg(long)]
        parallel: bool,
        /// Report progress through the log
        #[arg(long)]
        progress: bool,
    },
    /// Print the initial timeline of a scene without executing it
    #[command(alias = "t")]
    Timeline {
        /// Scene description (JSON)
        scene: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();
    let _trace_guard = init_tracing(cli.verbose, cli.quiet);

    let result = match cli.command {
        Command::Plan { scene, json, parallel, progress } => cmd_plan(&scene, json, parallel, progress),
        Command::Timeline { scene } => cmd_timeline(&scene),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn log_filter(verbose: u8, quiet: bool) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }
    let level = match (quiet, verbose) {
        (true, _) => "off",
        (false, 0) => "info",
        (false, 1) => "debug",
        (false, _) => "trace",
    };
    EnvFilter::new(level)
}

#[cfg(not(feature = "trace"))]
fn init_tracing(verbose: u8, quiet: bool) {
    tracing_subscriber::registry()
        .with(log_filter(verbose, quiet))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();
}

/// Chrome trace output (`trace.json`) when `ANIM_EXPORT_TRACE=1`.
#[cfg(feature = "trace")]
fn init_tracing(verbose: u8, quiet: bool) -> Option<tracing_chrome::FlushGuard> {
    let fmt_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr).with_target(false);
    let registry = tracing_subscriber::registry().with(log_filter(verbose, quiet)).with(fmt_layer);

    if std::env::var("ANIM_EXPORT_TRACE").ok().as_deref() != Some("1") {
        registry.init();
        return None;
    }

    let (chrome_layer, guard) = tracing_chrome::ChromeLayerBuilder::new()
        .file("trace.json")
        .build();
    registry.with(chrome_layer).init();
    Some(guard)
}

fn load_scene(path: &Path) -> Result<SceneDesc> {
    tracing::info!("Loading scene: {}", path.display());
    SceneDesc::load(path).with_context(|| format!("failed to load {}", path.display()))
}

fn cmd_plan(path: &Path, json: bool, parallel: bool, show_progress: bool) -> Result<()> {
    let mut desc = load_scene(path)?;
    if parallel {
        desc.time.mode = ExecutionMode::ParallelPerTick;
    }

    let mut log_progress = LogProgress::default();
    let mut no_progress = NoProgress;
    let progress: &mut dyn ProgressReporter = if show_progress { &mut log_progress } else { &mut no_progress };

    let plan = plan_scene(&desc, progress)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
    } else {
        print_plan(&plan);
    }
    Ok(())
}

fn cmd_timeline(path: &Path) -> Result<()> {
    let desc = load_scene(path)?;
    let task = desc.build_task(&ExportLog::new())?;
    let names: Vec<&str> = desc.objects.iter().map(|o| o.name.as_str()).collect();
    let tpf = task.config().ticks_per_frame() as f64;

    let timeline = task.build_timeline();
    println!("Initial timeline ({} times):", timeline.len());
    for (time, request) in timeline.iter() {
        let objects: Vec<&str> = request.due_objects().iter().map(|&id| names[id]).collect();
        println!(
            "  {:>8} (frame {:>7.2})  {}  {}",
            time,
            time as f64 / tpf,
            if request.needs_transform_pass() { "[xform]" } else { "       " },
            objects.join(", ")
        );
    }
    Ok(())
}

fn print_plan(plan: &ScenePlan) {
    let tpf = plan.config.ticks_per_frame() as f64;
    println!(
        "Range: {} - {} (step {} ticks, {})",
        plan.config.start_time(),
        plan.config.end_time(),
        plan.config.time_step(),
        if plan.config.is_animated() { "animated" } else { "single frame" }
    );
    println!();

    // Group object writes by time; transforms are reported per time.
    let mut by_time: BTreeMap<Tick, (Vec<&str>, usize)> = BTreeMap::new();
    for event in &plan.events {
        match event {
            ExportEvent::ObjectWrite { object, time, .. } => by_time.entry(*time).or_default().0.push(object),
            ExportEvent::TransformWrite { time, .. } => by_time.entry(*time).or_default().1 += 1,
            ExportEvent::PostExport { .. } => {}
        }
    }

    println!("Schedule ({} times):", plan.summary.visited_times.len());
    for time in &plan.summary.visited_times {
        let (objects, transforms) = by_time.get(time).cloned().unwrap_or_default();
        println!(
            "  {:>8} (frame {:>7.2})  xforms: {:<3}  objects: {}",
            time,
            *time as f64 / tpf,
            transforms,
            objects.join(", ")
        );
    }
    println!();
    println!("Object writes:    {}", plan.summary.object_writes);
    println!("Transform writes: {}", plan.summary.transform_writes);
    println!("Finalized:        {}", plan.summary.finalized);
}
