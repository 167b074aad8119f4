// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! The scope-script command language shared by the REPL and file runner.
//!
//! One command per line:
//!
//! ```text
//! enter                open a scope ("{" also works)
//! exit                 close a scope ("}" also works)
//! decl <name> [line]   declare an identifier; line defaults to the input line
//! find <name>          report the nearest declaration
//! depth                print the current scope depth
//! # ...                comment
//! ```
//!
//! Rejected commands produce diagnostics; execution continues, the same
//! way a compiler front end keeps going after reporting a redeclaration.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use owo_colors::OwoColorize;
use scopey_table::{SymbolTable, TableConfig, TableError};

/// A single parsed scope-script command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Open a scope
    Enter,
    /// Close the innermost scope
    Exit,
    /// Declare an identifier, optionally at an explicit line
    Decl {
        /// The identifier to declare
        name: String,
        /// Explicit declaration line, when given
        line: Option<u32>,
    },
    /// Look up an identifier
    Find {
        /// The identifier to resolve
        name: String,
    },
    /// Report the current scope depth
    Depth,
}

impl Command {
    /// Parses one input line. Blank lines and `#` comments yield `None`.
    pub fn parse(input: &str) -> Result<Option<Command>> {
        let input = input.trim();
        if input.is_empty() || input.starts_with('#') {
            return Ok(None);
        }

        let mut parts = input.split_whitespace();
        let head = parts.next().unwrap_or_default();
        let command = match head {
            "enter" | "{" => Command::Enter,
            "exit" | "}" => Command::Exit,
            "decl" => {
                let Some(name) = parts.next() else {
                    bail!("decl requires an identifier");
                };
                let line = match parts.next() {
                    Some(raw) => Some(
                        raw.parse()
                            .with_context(|| format!("invalid line number '{raw}'"))?,
                    ),
                    None => None,
                };
                Command::Decl {
                    name: name.to_string(),
                    line,
                }
            }
            "find" => {
                let Some(name) = parts.next() else {
                    bail!("find requires an identifier");
                };
                Command::Find {
                    name: name.to_string(),
                }
            }
            "depth" => Command::Depth,
            other => bail!("unknown command '{other}'"),
        };

        if let Some(extra) = parts.next() {
            bail!("unexpected trailing input '{extra}'");
        }
        Ok(Some(command))
    }
}

/// Drives a [`SymbolTable`] from parsed commands.
pub struct Runner {
    table: SymbolTable,
}

impl Runner {
    /// Creates a runner around a fresh table.
    pub fn new(config: &TableConfig) -> Self {
        Self {
            table: SymbolTable::with_config(config),
        }
    }

    /// Executes one command.
    ///
    /// `default_line` stands in for a source line when `decl` does not name
    /// one. Table rejections come back as `Err`; informational output as
    /// `Ok(Some(text))`.
    pub fn execute(
        &mut self,
        command: &Command,
        default_line: u32,
    ) -> Result<Option<String>, TableError> {
        match command {
            Command::Enter => {
                self.table.enter_scope();
                Ok(None)
            }
            Command::Exit => self.table.exit_scope().map(|()| None),
            Command::Decl { name, line } => self
                .table
                .declare(name, line.unwrap_or(default_line))
                .map(|()| None),
            Command::Find { name } => Ok(Some(match self.table.find(name) {
                Some(line) => format!("{name}: declared at line {line}"),
                None => format!("{name}: not found"),
            })),
            Command::Depth => Ok(Some(format!("depth: {}", self.table.depth()))),
        }
    }

    /// Drops every scope and declaration, keeping the configuration.
    pub fn reset(&mut self, config: &TableConfig) {
        self.table = SymbolTable::with_config(config);
    }
}

/// Executes a script file, reporting diagnostics without stopping.
pub fn run_file(path: &Path, config: &TableConfig) -> Result<()> {
    let source = fs::read_to_string(path)
        .with_context(|| format!("failed to read '{}'", path.display()))?;
    run_lines(&source, config)
}

/// Executes commands from an argument string; `;` separates commands.
pub fn run_source(code: &str, config: &TableConfig) -> Result<()> {
    let normalized = code.replace(';', "\n");
    run_lines(&normalized, config)
}

fn run_lines(source: &str, config: &TableConfig) -> Result<()> {
    let mut runner = Runner::new(config);
    let mut diagnostics = 0usize;

    for (index, raw) in source.lines().enumerate() {
        let line_no = (index + 1) as u32;
        let command = match Command::parse(raw) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(err) => {
                diagnostics += 1;
                eprintln!("{} line {line_no}: {err}", "error:".red().bold());
                continue;
            }
        };

        match runner.execute(&command, line_no) {
            Ok(Some(text)) => println!("{text}"),
            Ok(None) => {}
            Err(err) => {
                diagnostics += 1;
                eprintln!("{} line {line_no}: {err}", "error:".red().bold());
            }
        }
    }

    if diagnostics > 0 {
        eprintln!(
            "{} {} diagnostic(s) reported",
            "done:".yellow().bold(),
            diagnostics
        );
    }
    Ok(())
}
