#![deny(clippy::pedantic)]
#![deny(clippy::cargo)]
// TODO(bing): `clio` uses an older `windows-sys` vs other dependencies.
// Remove when `clio` updates, or if `clio` is no longer needed.
#![allow(clippy::multiple_crate_versions)]
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use clio::{Input, Output};
use compute_runner::RunnerConfig;
use compute_sdk::io::{commit, gather};
use erc20::OperationKind;
use log::debug;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[clap(flatten)]
    verbose: clap_verbosity_flag::Verbosity,
    /// TOML file with token defaults and ledger policy
    #[arg(long, global = true, env = "COMPUTE_CONFIG")]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Args)]
pub struct RunArgs {
    /// Input snapshot, `-` for stdin
    #[arg(default_value = "-")]
    input: Input,
    /// Where to write the output envelope, `-` for stdout
    #[arg(default_value = "-")]
    output: Output,
    /// Indent the output envelope
    #[arg(long)]
    pretty: bool,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run one invocation
    Run(RunArgs),
    /// Mint to a holder on a fresh ledger, then transfer part of it away
    Demo {
        #[arg(default_value = "-")]
        output: Output,
        #[arg(long)]
        pretty: bool,
    },
    /// Show which token operation a contract function name resolves to
    Resolve { name: String },
}

/// Run me eg like `cargo run -- -vv run input.json`
fn main() -> Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::new()
        .filter_level(cli.verbose.log_level_filter())
        .init();
    let config = RunnerConfig::load(cli.config.as_deref()).context("loading config")?;
    debug!("{config:?}");
    match cli.command {
        Command::Run(RunArgs {
            input,
            output,
            pretty,
        }) => {
            let inputs = gather(input).context("decoding invocation input")?;
            let outputs = compute_runner::run(&inputs, &config)?;
            commit(output, &outputs, pretty)?;
        }
        Command::Demo { output, pretty } => {
            let outputs = compute_runner::demo(&config)?;
            commit(output, &outputs, pretty)?;
        }
        Command::Resolve { name } => match OperationKind::resolve(&name) {
            OperationKind::Unknown(_) => println!("{name:?} is not a token operation"),
            kind => println!(
                "{name:?} resolves to {kind:?} ({})",
                if kind.is_mutating() {
                    "mutating"
                } else {
                    "read-only"
                }
            ),
        },
    }
    Ok(())
}
