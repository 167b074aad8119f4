// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Scopey - a scoped symbol table engine with an interactive driver.
//!
//! This is the main entry point for the scopey CLI/REPL. The binary drives
//! the `scopey-table` engine from three surfaces:
//!
//! - an interactive REPL (the default)
//! - scope script files (`scopey run decls.scope`)
//! - inline command strings (`scopey eval "decl x 1; find x"`)

mod repl;
mod script;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use scopey_table::TableConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// scopey - drive a scoped symbol table from scripts or a REPL
#[derive(Parser, Debug)]
#[command(name = "scopey")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Number of hash buckets for the table
    #[arg(long, global = true)]
    buckets: Option<usize>,

    /// Seed folded into the identifier hash
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the interactive REPL (default)
    Repl,

    /// Execute a scope script file
    Run {
        /// Script file to execute
        file: PathBuf,
    },

    /// Evaluate scope commands passed as an argument
    #[command(alias = "e")]
    Eval {
        /// Commands separated by newlines or semicolons
        code: String,
    },
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let mut config = TableConfig::default();
    if let Some(buckets) = cli.buckets {
        config.buckets = buckets;
    }
    if let Some(seed) = cli.seed {
        config.hash_seed = seed;
    }

    match cli.command {
        Some(Commands::Run { file }) => script::run_file(&file, &config),
        Some(Commands::Eval { code }) => script::run_source(&code, &config),
        Some(Commands::Repl) | None => {
            let mut repl = repl::Repl::new(config)?;
            repl.run()?;
            Ok(())
        }
    }
}
