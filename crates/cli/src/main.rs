// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! `flex-crew`: builds rotations and slots from a roster bundle, fills them,
//! and writes the results as JSON.
//!
//! Logs go to stderr so stdout carries only the report.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

use clap::{Args as ClapArgs, Parser, Subcommand};
use flex_crew::RosterState;
use flex_crew_api::{
    ApiError, AssignmentRunResponse, AuditResponse, FlightHoursResponse, ItineraryImport,
    ListRotationsResponse, ListSlotsResponse, RosterBundle, TimelinesResponse, audit_roster,
    flight_hours_view, import_itinerary_csv, load_roster, rotations_view, run_assignment,
    slots_view, timelines_view,
};
use flex_crew_domain::RosterConfig;
use serde::Serialize;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

/// Flex Crew - crew rostering from the command line
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON rules file, overriding any rules in the bundle
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

/// Where a run reads from and writes to.
#[derive(ClapArgs, Debug, Clone)]
struct IoArgs {
    /// JSON roster bundle with pilots and, optionally, legs and rules
    #[arg(short, long)]
    input: PathBuf,

    /// Itinerary CSV replacing the bundle's legs
    #[arg(short, long)]
    legs: Option<PathBuf>,

    /// Report file; stdout when absent
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone)]
enum Command {
    /// Build rotations and slots and list them
    Rotations {
        #[command(flatten)]
        io: IoArgs,
    },

    /// Build, then fill the slots automatically
    Assign {
        #[command(flatten)]
        io: IoArgs,

        /// seniority, reverse-seniority or flight-time
        #[arg(short, long, default_value = "flight-time")]
        strategy: String,
    },

    /// Build, fill, then audit every timeline
    Audit {
        #[command(flatten)]
        io: IoArgs,

        /// seniority, reverse-seniority or flight-time
        #[arg(short, long, default_value = "flight-time")]
        strategy: String,
    },
}

impl Command {
    const fn io(&self) -> &IoArgs {
        match self {
            Self::Rotations { io } | Self::Assign { io, .. } | Self::Audit { io, .. } => io,
        }
    }
}

/// Output of `rotations`.
#[derive(Debug, Serialize)]
struct RotationsReport {
    rotations: ListRotationsResponse,
    slots: ListSlotsResponse,
}

/// Output of `assign`.
#[derive(Debug, Serialize)]
struct AssignReport {
    run: AssignmentRunResponse,
    flight_hours: FlightHoursResponse,
    timelines: TimelinesResponse,
}

/// Output of `audit`.
#[derive(Debug, Serialize)]
struct AuditReport {
    run: AssignmentRunResponse,
    audit: AuditResponse,
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, Box<dyn std::error::Error>> {
    let file: File = File::open(path)?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}

/// Reads the bundle, swaps in CSV legs if asked, and builds the roster.
fn load(config: Option<&Path>, io: &IoArgs) -> Result<RosterState, Box<dyn std::error::Error>> {
    let mut bundle: RosterBundle = read_json(&io.input)?;
    info!(input = %io.input.display(), pilots = bundle.pilots.len(), "Read roster bundle");

    if let Some(path) = &io.legs {
        let import: ItineraryImport = import_itinerary_csv(BufReader::new(File::open(path)?))?;
        info!(
            legs = import.legs.len(),
            skipped = import.skipped_rows.len(),
            "Read itinerary"
        );
        bundle.legs = import.legs;
    }

    let config: Option<RosterConfig> = config.map(read_json::<RosterConfig>).transpose()?;
    Ok(load_roster(&bundle, config)?)
}

/// Runs one subcommand against a freshly built roster.
fn report(command: &Command, state: &mut RosterState) -> Result<serde_json::Value, ApiError> {
    let value: Result<serde_json::Value, serde_json::Error> = match command {
        Command::Rotations { .. } => serde_json::to_value(RotationsReport {
            rotations: rotations_view(state),
            slots: slots_view(state),
        }),
        Command::Assign { strategy, .. } => {
            let run: AssignmentRunResponse = run_assignment(state, strategy)?;
            serde_json::to_value(AssignReport {
                run,
                flight_hours: flight_hours_view(state),
                timelines: timelines_view(state),
            })
        }
        Command::Audit { strategy, .. } => {
            let run: AssignmentRunResponse = run_assignment(state, strategy)?;
            serde_json::to_value(AuditReport {
                run,
                audit: audit_roster(state),
            })
        }
    };
    value.map_err(|e| ApiError::Internal {
        message: format!("Failed to render report: {e}"),
    })
}

fn write_report(
    output: Option<&Path>,
    value: &serde_json::Value,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut writer: Box<dyn Write> = match output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(std::io::stdout().lock()),
    };
    serde_json::to_writer_pretty(&mut writer, value)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let io: &IoArgs = args.command.io();
    let mut state: RosterState = load(args.config.as_deref(), io)?;
    let value: serde_json::Value = report(&args.command, &mut state)?;
    write_report(io.output.as_deref(), &value)?;

    info!("Done");
    Ok(())
}
