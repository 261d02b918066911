//! gantry CLI - Hierarchical timeline layout
//!
//! Command-line interface for laying out work items on a Gantt grid.

mod input;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use gantry_core::{LayoutConfig, Renderer, TimelineItem, ZoomLevel};
use gantry_layout::hierarchy::group_ids;
use gantry_layout::TimelineController;
use gantry_render::{JsonRenderer, TextRenderer};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "gantry")]
#[command(author, version, about = "Hierarchical timeline layout engine", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Lay out a list of work items and render the timeline
    Layout(LayoutArgs),

    /// Validate an item file and summarize what would be drawn
    Check {
        /// Input file (JSON array of work items)
        file: PathBuf,

        /// Fail when any date cannot be parsed
        #[arg(long)]
        strict: bool,
    },

    /// Print the default layout configuration as TOML
    Config,
}

#[derive(clap::Args)]
struct LayoutArgs {
    /// Input file (JSON array of work items)
    file: PathBuf,

    /// Column granularity
    #[arg(short, long, default_value = "week")]
    zoom: ZoomLevel,

    /// Collapse a group by id (repeatable)
    #[arg(long = "collapse", value_name = "GROUP_ID")]
    collapse: Vec<String>,

    /// Collapse every group
    #[arg(long)]
    collapse_all: bool,

    /// Reference date for the today marker (defaults to the local date)
    #[arg(long, value_name = "YYYY-MM-DD")]
    today: Option<NaiveDate>,

    /// Layout configuration file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Label column width for text output
    #[arg(long, default_value_t = 28)]
    label_width: usize,

    /// Characters per column for text output (defaults to the widest label)
    #[arg(long)]
    cell_width: Option<usize>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Layout(args) => cmd_layout(&args),
        Commands::Check { file, strict } => cmd_check(&file, strict),
        Commands::Config => cmd_config(),
    }
}

/// Logs go to stderr so rendered output stays clean on stdout.
/// `RUST_LOG` takes precedence over `-v`.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .init();
}

fn cmd_layout(args: &LayoutArgs) -> Result<()> {
    let items = input::load_items(&args.file)?;
    let config = input::load_config(args.config.as_deref())?;
    let today = args.today.unwrap_or_else(|| chrono::Local::now().date_naive());

    let mut timeline = TimelineController::try_new(config, today)
        .context("invalid layout configuration")?
        .with_zoom(args.zoom)
        .with_items(items);

    if args.collapse_all {
        timeline.collapse_all();
    }
    let known: Vec<String> = group_ids(timeline.items()).into_iter().map(String::from).collect();
    for id in &args.collapse {
        if !known.contains(id) {
            tracing::warn!(group = %id, "no group with this id, nothing to collapse");
            continue;
        }
        timeline.collapse(id);
    }

    let view = timeline.view();
    if view.is_empty() {
        tracing::warn!(path = %args.file.display(), "no work items to lay out");
    }
    tracing::info!(
        rows = view.rows.len(),
        columns = view.columns.len(),
        window_start = %view.window.start,
        window_end = %view.window.end,
        "timeline laid out"
    );

    let rendered = match args.format {
        OutputFormat::Text => {
            let mut renderer = TextRenderer::new().label_width(args.label_width);
            if let Some(width) = args.cell_width {
                renderer = renderer.cell_width(width);
            }
            renderer.render(&view)?
        }
        OutputFormat::Json => JsonRenderer::new().render(&view)?,
    };
    write_output(args.output.as_deref(), &rendered)
}

fn cmd_check(file: &Path, strict: bool) -> Result<()> {
    let items = input::load_items(file)?;
    let problems = input::date_problems(&items);
    let parsed: Vec<TimelineItem> = items.into_iter().map(TimelineItem::new).collect();
    let scheduled = parsed.iter().filter(|item| item.timing.is_scheduled()).count();

    println!("Items:  {} ({} scheduled, {} without a bar)", parsed.len(), scheduled, parsed.len() - scheduled);
    println!("Groups: {}", group_ids(&parsed).len());
    for problem in &problems {
        println!(
            "warning: item {} has an unreadable {} {:?}",
            problem.item_id, problem.field, problem.value
        );
    }

    if strict && !problems.is_empty() {
        bail!("{} unreadable date(s) in {}", problems.len(), file.display());
    }
    Ok(())
}

fn cmd_config() -> Result<()> {
    let toml = toml::to_string_pretty(&LayoutConfig::default()).context("failed to serialize default config")?;
    print!("{toml}");
    Ok(())
}

fn write_output(path: Option<&Path>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))?;
            tracing::info!(path = %path.display(), "wrote timeline");
        }
        None => print!("{content}"),
    }
    Ok(())
}
