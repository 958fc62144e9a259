//! Binary crate for the `weather` dashboard.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Interactive dashboard and configuration prompts
//! - Terminal rendering of the dashboard regions

use clap::Parser;
use std::process::ExitCode;

mod cli;
mod render;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("warn"));

    let cmd = cli::Cli::parse();
    cmd.run().await
}
