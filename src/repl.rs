// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Interactive REPL (Read-Eval-Print Loop) for the Scopey symbol table.

use owo_colors::OwoColorize;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::Validator;
use rustyline::{Config, Editor, Helper};
use scopey_table::TableConfig;
use std::path::PathBuf;

use crate::script::{Command, Runner};

/// REPL configuration constants
const HISTORY_FILE: &str = ".scopey_history";
const MAX_HISTORY_SIZE: usize = 1000;

/// REPL commands that can be executed with a dot prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplCommand {
    Help,
    Exit,
    Clear,
    Version,
    Reset,
}

impl ReplCommand {
    /// Parse a REPL command from input string
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        if !input.starts_with('.') {
            return None;
        }

        let mut parts = input[1..].splitn(2, char::is_whitespace);
        let cmd = parts.next()?.to_lowercase();
        match cmd.as_str() {
            "help" | "h" | "?" => Some(ReplCommand::Help),
            "exit" | "quit" | "q" => Some(ReplCommand::Exit),
            "clear" | "cls" => Some(ReplCommand::Clear),
            "version" | "v" => Some(ReplCommand::Version),
            "reset" | "r" => Some(ReplCommand::Reset),
            _ => None,
        }
    }

    /// Get all available commands for help/completion
    pub fn all_commands() -> &'static [(&'static str, &'static str)] {
        &[
            (".help", "Show this help message"),
            (".exit", "Exit the REPL"),
            (".clear", "Clear the screen"),
            (".version", "Show version information"),
            (".reset", "Drop every scope and declaration"),
        ]
    }
}

/// Helper struct for rustyline that provides command completion and hints
#[derive(Default)]
struct ScopeyHelper {
    /// Command words for completion
    keywords: Vec<String>,
}

impl ScopeyHelper {
    fn new() -> Self {
        let keywords = [
            // Scope commands
            "enter", "exit", "decl", "find", "depth",
            // REPL commands
            ".help", ".exit", ".clear", ".version", ".reset",
        ]
        .into_iter()
        .map(String::from)
        .collect();

        Self { keywords }
    }
}

impl Completer for ScopeyHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &rustyline::Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        // Find the start of the current word
        let start = line[..pos]
            .rfind(|c: char| !c.is_alphanumeric() && c != '_' && c != '.')
            .map(|i| i + 1)
            .unwrap_or(0);

        let word = &line[start..pos];
        if word.is_empty() {
            return Ok((pos, vec![]));
        }

        let matches: Vec<Pair> = self
            .keywords
            .iter()
            .filter(|kw| kw.starts_with(word))
            .map(|kw| Pair {
                display: kw.clone(),
                replacement: kw[word.len()..].to_string(),
            })
            .collect();

        Ok((pos, matches))
    }
}

impl Hinter for ScopeyHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &rustyline::Context<'_>) -> Option<Self::Hint> {
        if pos < line.len() {
            return None;
        }

        let start = line
            .rfind(|c: char| !c.is_alphanumeric() && c != '_' && c != '.')
            .map(|i| i + 1)
            .unwrap_or(0);

        let word = &line[start..];
        if word.len() < 2 {
            return None;
        }

        self.keywords
            .iter()
            .find(|kw| kw.starts_with(word) && kw.len() > word.len())
            .map(|kw| kw[word.len()..].to_string().dimmed().to_string())
    }
}

impl Highlighter for ScopeyHelper {}

impl Validator for ScopeyHelper {}

impl Helper for ScopeyHelper {}

/// The interactive REPL for the Scopey symbol table engine
pub struct Repl {
    runner: Runner,
    config: TableConfig,
    editor: Editor<ScopeyHelper, DefaultHistory>,
    history_path: PathBuf,
    input_line: u32,
}

impl Repl {
    /// Create a new REPL instance
    pub fn new(config: TableConfig) -> rustyline::Result<Self> {
        let editor_config = Config::builder()
            .history_ignore_dups(true)?
            .history_ignore_space(true)
            .max_history_size(MAX_HISTORY_SIZE)?
            .auto_add_history(true)
            .build();

        let mut editor = Editor::with_config(editor_config)?;
        editor.set_helper(Some(ScopeyHelper::new()));

        // Determine history file path
        let history_path = dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("scopey")
            .join(HISTORY_FILE);

        // Create parent directory if it doesn't exist
        if let Some(parent) = history_path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }

        // Load history
        let _ = editor.load_history(&history_path);

        Ok(Self {
            runner: Runner::new(&config),
            config,
            editor,
            history_path,
            input_line: 0,
        })
    }

    /// Run the REPL main loop
    pub fn run(&mut self) -> rustyline::Result<()> {
        self.print_banner();

        loop {
            let prompt = format!("{} ", "scopey>".bright_green().bold());

            match self.editor.readline(&prompt) {
                Ok(line) => {
                    let trimmed = line.trim();

                    if trimmed.is_empty() {
                        continue;
                    }

                    // Check for REPL commands
                    if let Some(cmd) = ReplCommand::parse(trimmed) {
                        match self.execute_command(cmd) {
                            CommandResult::Continue => continue,
                            CommandResult::Exit => break,
                        }
                    }

                    // Evaluate a scope command
                    self.eval_and_print(trimmed);
                }
                Err(ReadlineError::Interrupted) => {
                    println!("{}", "^C".dimmed());
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!("{}", "^D".dimmed());
                    break;
                }
                Err(err) => {
                    eprintln!("{}: {:?}", "Error".red().bold(), err);
                    break;
                }
            }
        }

        // Save history
        let _ = self.editor.save_history(&self.history_path);

        Ok(())
    }

    fn eval_and_print(&mut self, input: &str) {
        self.input_line += 1;

        let command = match Command::parse(input) {
            Ok(Some(command)) => command,
            Ok(None) => return,
            Err(err) => {
                eprintln!("{}: {err}", "error".red().bold());
                return;
            }
        };

        match self.runner.execute(&command, self.input_line) {
            Ok(Some(text)) => println!("{text}"),
            Ok(None) => {}
            Err(err) => eprintln!("{}: {err}", "error".red().bold()),
        }
    }

    fn execute_command(&mut self, cmd: ReplCommand) -> CommandResult {
        match cmd {
            ReplCommand::Help => {
                self.print_help();
                CommandResult::Continue
            }
            ReplCommand::Exit => CommandResult::Exit,
            ReplCommand::Clear => {
                print!("\x1B[2J\x1B[H");
                CommandResult::Continue
            }
            ReplCommand::Version => {
                self.print_version();
                CommandResult::Continue
            }
            ReplCommand::Reset => {
                self.runner.reset(&self.config);
                self.input_line = 0;
                println!("{}", "table reset".dimmed());
                CommandResult::Continue
            }
        }
    }

    fn print_banner(&self) {
        let version = env!("CARGO_PKG_VERSION");
        println!();
        println!(
            "  {} {} {}",
            "Scopey Symbol Table Engine".white().bold(),
            "v".dimmed(),
            version.bright_yellow()
        );
        println!(
            "  {}",
            "Scoped declarations, shadowing, and lookups at the prompt".dimmed()
        );
        println!();
        println!(
            "  {} {} {}",
            "Type".dimmed(),
            ".help".cyan(),
            "for available commands".dimmed()
        );
        println!();
    }

    fn print_help(&self) {
        println!();
        println!("{}", "Scope Commands:".white().bold());
        println!();
        println!(
            "  {:20} {}",
            "enter (or {)".cyan(),
            "Open a new scope".dimmed()
        );
        println!(
            "  {:20} {}",
            "exit (or })".cyan(),
            "Close the innermost scope".dimmed()
        );
        println!(
            "  {:20} {}",
            "decl <name> [line]".cyan(),
            "Declare an identifier".dimmed()
        );
        println!(
            "  {:20} {}",
            "find <name>".cyan(),
            "Report the nearest declaration".dimmed()
        );
        println!(
            "  {:20} {}",
            "depth".cyan(),
            "Print the current scope depth".dimmed()
        );

        println!();
        println!("{}", "REPL Commands:".white().bold());
        println!();

        for (cmd, desc) in ReplCommand::all_commands() {
            println!("  {:20} {}", cmd.cyan(), desc.dimmed());
        }
        println!();
    }

    fn print_version(&self) {
        let version = env!("CARGO_PKG_VERSION");
        println!();
        println!("{}: {}", "Scopey".bright_cyan().bold(), version.yellow());
        println!();
    }
}

/// Result of executing a REPL command
enum CommandResult {
    Continue,
    Exit,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repl_command_parse() {
        assert_eq!(ReplCommand::parse(".help"), Some(ReplCommand::Help));
        assert_eq!(ReplCommand::parse(".exit"), Some(ReplCommand::Exit));
        assert_eq!(ReplCommand::parse(".reset"), Some(ReplCommand::Reset));
        assert_eq!(ReplCommand::parse(".bogus"), None);
        assert_eq!(ReplCommand::parse("exit"), None);
        assert_eq!(ReplCommand::parse("not a command"), None);
    }
}
