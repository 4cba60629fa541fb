//! Command-line runner for the painting robots simulation.
//!
//! Reads a configuration file, runs the simulation and writes every snapshot
//! to the configured output file.

mod input;

use anyhow::{bail, Context, Result};
use clap::Parser;
use robots_engine::{
    create_replay_logger, Config, ConfigErrors, SeededSequence, Simulation, SnapshotWriter,
    TerminalSnapshotWriter, TextSnapshotWriter,
};
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

/// Run robots over a board and record snapshots of it.
#[derive(Debug, Parser)]
#[command(name = "robots", version)]
struct Cli {
    /// Configuration file. When omitted the file name is asked for interactively.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Also draw every snapshot in colour on the terminal.
    #[arg(long)]
    draw: bool,

    /// Write a JSON replay of the run to this file.
    #[arg(long)]
    replay: Option<PathBuf>,

    /// Do not echo snapshots to stdout.
    #[arg(long)]
    quiet: bool,
}

fn init_logging() {
    let mut filter = EnvFilter::from_default_env();
    if let Ok(directive) = "robots_engine=info".parse() {
        filter = filter.add_directive(directive);
    }
    if let Ok(directive) = "robots_cli=info".parse() {
        filter = filter.add_directive(directive);
    }

    // Snapshots may be echoed to stdout, so logs go to stderr
    fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    let (path, contents) = match &cli.config {
        Some(path) => {
            let contents = fs::read_to_string(path).with_context(|| {
                format!("ERROR: Input file {} not opened correctly", path.display())
            })?;
            (path.clone(), contents)
        }
        None => input::prompt_for_config(
            &mut io::stdin().lock(),
            &mut io::stdout(),
            &mut io::stderr(),
            input::MAX_OPEN_ATTEMPTS,
        )?,
    };
    info!(path = %path.display(), "Read configuration");

    let config = match Config::parse(&contents) {
        Ok(config) => config,
        Err(errors) => {
            report_config_errors(&errors);
            bail!("the configuration in {} was rejected", path.display());
        }
    };

    run(&cli, &config)
}

/// Runs the simulation described by `config`.
fn run(cli: &Cli, config: &Config) -> Result<()> {
    let output = File::create(config.output()).with_context(|| {
        format!(
            "ERROR: Output file {} could not be created",
            config.output().display()
        )
    })?;
    let mut output = BufWriter::new(output);

    let mut sequence = SeededSequence::new(config.seed());
    let simulation = match Simulation::new(config, &mut sequence) {
        Ok(simulation) => simulation,
        Err(e) => {
            error!(error = %e, "Could not set up the simulation");
            writeln!(output, "{}", e)?;
            output.flush()?;
            return Err(e.into());
        }
    };
    let mut simulation = simulation.with_replay(create_replay_logger(cli.replay.clone(), config));

    let mut writers: Vec<Box<dyn SnapshotWriter>> =
        vec![Box::new(TextSnapshotWriter::new(output))];
    if !cli.quiet {
        writers.push(Box::new(TextSnapshotWriter::new(io::stdout())));
    }
    if cli.draw {
        writers.push(Box::new(TerminalSnapshotWriter::new(io::stdout())));
    }

    let written = simulation
        .run(&mut writers)
        .context("the simulation did not finish")?;
    info!(
        snapshots = written,
        output = %config.output().display(),
        "Snapshots written"
    );

    Ok(())
}

/// Prints every configuration error to stderr and, when its name could be
/// read, to the output file as well.
fn report_config_errors(errors: &ConfigErrors) {
    let mut output = errors
        .output
        .as_ref()
        .and_then(|path| File::create(path).ok());

    for e in &errors.errors {
        eprintln!("{}", e);
        if let Some(file) = output.as_mut() {
            if let Err(write_error) = writeln!(file, "{}", e) {
                error!(error = %write_error, "Could not write configuration error to output file");
                output = None;
            }
        }
    }
}
