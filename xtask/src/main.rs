// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Workspace automation for Flex Crew.
//!
//! - `cargo xtask ci` lints, audits dependencies, builds and tests
//! - `cargo xtask fix` applies clippy fixes and formatting
//! - `cargo xtask demo` rosters the sample data in `demos/` through the CLI

#![deny(clippy::pedantic, clippy::nursery, clippy::all)]

use std::io;
use std::process::Output;

use cargo_metadata::MetadataCommand;
use clap::{Parser, Subcommand};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use color_eyre::{Result, eyre::Context};
use duct::{Expression, cmd};
use tracing::level_filters::LevelFilter;
use tracing_log::AsTrace;

const DEMO_ROSTER: &str = "demos/roster.json";
const DEMO_ITINERARY: &str = "demos/itinerary.csv";

fn main() -> Result<()> {
    color_eyre::install()?;
    let args: Args = Args::parse();
    tracing_subscriber::fmt()
        .with_max_level(args.log_level())
        .without_time()
        .init();

    if let Err(err) = args.command.run() {
        tracing::error!("{err}");
        std::process::exit(1);
    }
    Ok(())
}

#[derive(Debug, Parser)]
#[command(bin_name = "cargo xtask", styles = clap_cargo::style::CLAP_STYLING)]
struct Args {
    #[command(subcommand)]
    command: Task,

    #[command(flatten)]
    verbosity: Verbosity<InfoLevel>,
}

impl Args {
    fn log_level(&self) -> LevelFilter {
        self.verbosity.log_level_filter().as_trace()
    }
}

#[derive(Clone, Debug, Subcommand)]
enum Task {
    /// Everything a change must pass before merging
    #[command(name = "ci")]
    Ci,

    /// Build every crate and target
    #[command(visible_alias = "b")]
    Build,

    /// Clippy, rustfmt and rustdoc, all with warnings denied
    #[command(visible_alias = "l")]
    Lint,

    /// Apply clippy suggestions and reformat
    Fix,

    /// Unit, integration and doc tests
    #[command(visible_alias = "t")]
    Test,

    /// License and advisory checks with cargo-deny
    Deny,

    /// Unused dependency check with cargo-machete
    Machete,

    /// Load the sample roster, run assignment and print the audit
    Demo {
        /// Ranking strategy for the assignment run
        #[arg(long, default_value = "flight-time")]
        strategy: String,

        /// Rules file taking precedence over the bundle's
        #[arg(long)]
        config: Option<String>,
    },
}

impl Task {
    fn run(self) -> Result<()> {
        match self {
            Self::Ci => {
                lint()?;
                deny()?;
                machete()?;
                build()?;
                test()
            }
            Self::Build => build(),
            Self::Lint => lint(),
            Self::Fix => fix(),
            Self::Test => test(),
            Self::Deny => deny(),
            Self::Machete => machete(),
            Self::Demo { strategy, config } => demo(&strategy, config.as_deref()),
        }
    }
}

fn build() -> Result<()> {
    cargo(&["build", "--workspace", "--all-targets"])
}

fn lint() -> Result<()> {
    cargo(&[
        "clippy",
        "--workspace",
        "--all-targets",
        "--",
        "-D",
        "warnings",
    ])?;
    nightly(&["fmt", "--all", "--check"])?;
    docs()
}

fn fix() -> Result<()> {
    cargo(&[
        "clippy",
        "--workspace",
        "--all-targets",
        "--fix",
        "--allow-dirty",
        "--allow-staged",
    ])?;
    nightly(&["fmt", "--all"])
}

fn test() -> Result<()> {
    cargo(&["test", "--workspace", "--all-targets"])?;
    // Doc tests are not part of --all-targets.
    cargo(&["test", "--workspace", "--doc"])
}

fn deny() -> Result<()> {
    cargo(&["deny", "check"])
}

fn machete() -> Result<()> {
    cmd!("cargo-machete").run_logged()?;
    Ok(())
}

/// Builds rustdoc for each workspace crate with warnings denied.
fn docs() -> Result<()> {
    let metadata = MetadataCommand::new()
        .exec()
        .wrap_err("failed to read workspace metadata")?;
    for package in metadata.workspace_packages() {
        without_cargo_env(cmd(
            "cargo",
            ["doc", "--no-deps", "--package", &package.name],
        ))
        .env("RUSTDOCFLAGS", "-D warnings")
        .run_logged()?;
    }
    Ok(())
}

fn demo(strategy: &str, config: Option<&str>) -> Result<()> {
    let mut args: Vec<&str> = vec![
        "run",
        "--package",
        "flex-crew-cli",
        "--",
        "audit",
        "--input",
        DEMO_ROSTER,
        "--legs",
        DEMO_ITINERARY,
        "--strategy",
        strategy,
    ];
    if let Some(path) = config {
        args.extend(["--config", path]);
    }
    cargo(&args)
}

fn cargo(args: &[&str]) -> Result<()> {
    cmd("cargo", args).run_logged()?;
    Ok(())
}

fn nightly(args: &[&str]) -> Result<()> {
    without_cargo_env(cmd("cargo", args))
        .env("RUSTUP_TOOLCHAIN", "nightly")
        .run_logged()?;
    Ok(())
}

/// Cargo exports `CARGO` to subcommands, which pins nested runs to the
/// outer toolchain.
fn without_cargo_env(expression: Expression) -> Expression {
    expression.env_remove("CARGO")
}

trait RunLogged {
    fn run_logged(&self) -> io::Result<Output>;
}

impl RunLogged for Expression {
    fn run_logged(&self) -> io::Result<Output> {
        tracing::info!("running {:?}", self);
        self.run()
            .inspect_err(|_| tracing::error!("failed: {:?}", self))
    }
}
