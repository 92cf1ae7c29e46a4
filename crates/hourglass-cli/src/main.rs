//! hourglass binary
//!
//! Prints a collapsible trace timeline from a JSON record file.
//!
//! ## Usage
//!
//! ```bash
//! # Roots only (everything starts collapsed)
//! hourglass render trace.json
//!
//! # Open a branch, or everything, and dump the frame as JSON
//! hourglass render trace.json --expand 12 --expand 40
//! hourglass render trace.json --expand-all --format json
//!
//! # Validate a record file
//! hourglass check trace.json
//! ```
//!
//! `RUST_LOG=debug` shows construction and layout passes on stderr.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use hourglass_cli::{OutputFormat, RenderOptions, load_records, render, resolve_config};
use hourglass_timeline::{OrphanPolicy, RecordId, RootOrder, Timeline};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "hourglass", version, about = "Hierarchical trace timeline viewer")]
struct Cli {
    /// Timeline config (RON). Defaults to ~/.config/hourglass/timeline.ron if present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Root ordering, overriding the config.
    #[arg(long, global = true)]
    order: Option<RootOrder>,

    /// Unknown-parent handling, overriding the config.
    #[arg(long, global = true)]
    orphans: Option<OrphanPolicy>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Lay out the records and print the visible rows.
    Render {
        /// JSON array of records, or `-` for stdin.
        records: PathBuf,

        /// Expand this record's branch (repeatable).
        #[arg(long, value_name = "ID")]
        expand: Vec<String>,

        /// Expand every branch.
        #[arg(long)]
        expand_all: bool,

        #[arg(long, value_enum, default_value_t = OutputFormat::Tree)]
        format: OutputFormat,

        /// Viewport width in pixels, overriding the config.
        #[arg(long)]
        width: Option<f64>,

        /// Character width of the time bars.
        #[arg(long, default_value_t = 40)]
        bars: usize,
    },
    /// Build the tree and report its shape without rendering.
    Check {
        /// JSON array of records, or `-` for stdin.
        records: PathBuf,
    },
}

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = resolve_config(cli.config.as_deref())?;
    if let Some(order) = cli.order {
        config.root_order = order;
    }
    if let Some(orphans) = cli.orphans {
        config.orphan_policy = orphans;
    }

    match cli.command {
        Command::Render {
            records,
            expand,
            expand_all,
            format,
            width,
            bars,
        } => {
            if let Some(width) = width {
                config.viewport_width = width;
            }
            let options = RenderOptions {
                expand: expand.into_iter().map(RecordId::from).collect(),
                expand_all,
                format,
                bar_columns: bars,
            };
            println!("{}", render(load_records(&records)?, config, &options)?);
        }
        Command::Check { records } => {
            let timeline = Timeline::build(load_records(&records)?, &config)?;
            let roots = timeline.index().roots().len();
            let depth = timeline.nodes().iter().map(|n| n.level()).max().unwrap_or(0);
            println!("{} records, {} roots, max depth {}", timeline.len(), roots, depth);
        }
    }
    Ok(())
}
