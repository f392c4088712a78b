//! Command‑line entry point for the `sweep` tool.
//!
//! Fits a curve through anchor blocks given on the command line and reports
//! the stamps a sweep would place along it.

use std::{
    fmt::Display,
    fs::File,
    io::BufWriter,
    path::{Path, PathBuf},
    process,
};

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use log::LevelFilter;
use sweepcurve::{
    Extent, StampPolicy, Structure,
    point::{BlockPos, parse_block_pos},
    registry,
};

/// CLI command implementations.
mod cmd;

/// Validate an orientation name against the registry.
fn parse_orientation_name(s: &str) -> Result<String, String> {
    if registry::ORIENTATION_NAMES.contains(&s) {
        Ok(s.to_string())
    } else {
        Err(format!(
            "Invalid orientation '{}'. Valid options: {}",
            s,
            registry::ORIENTATION_NAMES.join(", ")
        ))
    }
}

/// Log level for a `-v` count.
fn level_for(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

#[derive(Parser)]
#[command(name = "sweep")]
#[command(version = env!("CARGO_PKG_VERSION"))]
/// Top‑level CLI options and subcommands.
struct Cli {
    /// Sets the level of verbosity (`-v`, `-vv`, ...).
    #[arg(short, action = ArgAction::Count, global = true, help = "Sets the level of verbosity")]
    v: u8,

    /// Command to execute.
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
/// Subcommands supported by the `sweep` tool.
enum Commands {
    #[command(about = "Sweep a structure along anchors and list the stamps")]
    /// Run a full sweep against an in-memory world.
    Run {
        #[arg(
            short = 'p',
            long = "policy",
            default_value = "auto",
            help = "Stamp policy: 'single', 'auto' or a copy count of at least 2"
        )]
        /// Stamp-count policy.
        policy: StampPolicy,

        #[arg(
            short = 's',
            long = "structure",
            value_name = "WxHxD",
            default_value = "1x1x1",
            help = "Structure extent in blocks"
        )]
        /// Extent of the stamped structure.
        extent: Extent,

        #[arg(
            short = 'n',
            long = "name",
            default_value = "structure",
            help = "Structure name used in messages and the report"
        )]
        /// Structure name.
        name: String,

        #[arg(
            short = 'o',
            long = "orientation",
            default_value = "footprint",
            value_parser = parse_orientation_name,
            help = &format!("Orientation policy (options: {})", registry::ORIENTATION_NAMES.join(", "))
        )]
        /// Orientation policy key.
        orientation: String,

        #[arg(
            long = "max-stamps",
            value_name = "N",
            help = "Fail the run once N stamps have been placed"
        )]
        /// Optional paste limit.
        max_stamps: Option<usize>,

        #[arg(
            long = "output",
            value_name = "FILE",
            help = "Write a JSON report of the run to FILE"
        )]
        /// Optional JSON report path.
        output: Option<PathBuf>,

        #[arg(
            required = true,
            allow_hyphen_values = true,
            value_name = "X,Y,Z",
            value_parser = parse_block_pos,
            help = "Anchor blocks in click order; the last is clicked again to confirm"
        )]
        /// Anchor positions.
        anchors: Vec<BlockPos>,
    },

    #[command(about = "Plan stamp positions without stamping")]
    /// Print the planned curve parameters and blocks.
    Plan {
        #[arg(
            short = 'p',
            long = "policy",
            default_value = "auto",
            help = "Stamp policy: 'single', 'auto' or a copy count of at least 2"
        )]
        /// Stamp-count policy.
        policy: StampPolicy,

        #[arg(
            short = 'w',
            long = "width",
            default_value_t = 1,
            help = "Structure footprint width in blocks"
        )]
        /// Footprint width used by auto spacing.
        width: u32,

        #[arg(
            required = true,
            allow_hyphen_values = true,
            value_name = "X,Y,Z",
            value_parser = parse_block_pos,
            help = "Anchor blocks, at least two"
        )]
        /// Anchor positions.
        anchors: Vec<BlockPos>,
    },

    #[command(
        name = "list-orientations",
        about = "List supported orientation policies"
    )]
    /// List supported orientation policies.
    ListOrientations,
}

/// Print a success message or exit with an error.
fn report_ok<E: Display>(result: Result<(), E>, ok_msg: &str) {
    match result {
        Ok(()) => {
            if !ok_msg.is_empty() {
                println!("{ok_msg}");
            }
        }
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        }
    }
}

/// Write `report` as pretty JSON to `path`.
fn write_report(report: &cmd::Report, path: &Path) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("creating report {}", path.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), report)
        .with_context(|| format!("writing report {}", path.display()))?;
    Ok(())
}

/// Handle the `run` subcommand.
fn handle_run(options: cmd::RunOptions<'_>, output: Option<&Path>) -> Result<()> {
    let report = cmd::run(options)?;
    for stamp in &report.stamps {
        println!("{} {}", stamp.position, stamp.orientation);
    }
    println!(
        "{} stamps of '{}' ({})",
        report.stamps.len(),
        report.structure.name,
        report.structure.extent
    );
    if let Some(path) = output {
        write_report(&report, path)?;
    }
    Ok(())
}

/// Handle the `plan` subcommand.
fn handle_plan(policy: StampPolicy, width: u32, anchors: &[BlockPos]) -> Result<()> {
    let summary = cmd::plan(policy, width, anchors)?;
    println!("length {:.3}", summary.length);
    for stamp in &summary.stamps {
        println!("{:.6} {}", stamp.t, stamp.position);
    }
    Ok(())
}

/// Handle the `list-orientations` subcommand.
fn handle_list_orientations() {
    println!("Supported orientations (key — display — behaviour):");
    for entry in registry::REGISTRY {
        println!(
            "- {} — {} — {}",
            entry.key, entry.display, entry.description
        );
    }
}

fn main() {
    let cli = Cli::parse();

    env_logger::Builder::from_default_env()
        .filter_level(level_for(cli.v))
        .init();

    match cli.command {
        Commands::Run {
            policy,
            extent,
            name,
            orientation,
            max_stamps,
            output,
            anchors,
        } => report_ok(
            handle_run(
                cmd::RunOptions {
                    policy,
                    structure: Structure::new(name, extent),
                    orientation: &orientation,
                    max_stamps,
                    anchors: &anchors,
                },
                output.as_deref(),
            ),
            "OK!",
        ),
        Commands::Plan {
            policy,
            width,
            anchors,
        } => report_ok(handle_plan(policy, width, &anchors), ""),
        Commands::ListOrientations => handle_list_orientations(),
    }
}
