use std::borrow::Cow::{self, Borrowed, Owned};

use anyhow::Result;
use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};

use crate::app::App;
use crate::render;

const META_COMMANDS: &[&str] = &[":run", ":files", ":cat", ":import", ":save", ":help"];

/// A parsed REPL line.
#[derive(Debug, PartialEq, Eq)]
enum ReplCommand<'a> {
    Quit,
    Help,
    Files,
    Save,
    RunFile(&'a str),
    Cat(&'a str),
    /// Copy a host file into the virtual set, optionally under another name.
    Import { path: &'a str, name: Option<&'a str> },
    Code(&'a str),
    Usage(&'static str),
    Unknown(&'a str),
}

fn parse_command(line: &str) -> ReplCommand<'_> {
    let trimmed = line.trim();
    if trimmed == "quit" || trimmed == "exit" {
        return ReplCommand::Quit;
    }
    if !trimmed.starts_with(':') {
        return ReplCommand::Code(line);
    }

    let mut parts = trimmed.split_whitespace();
    let command = parts.next().unwrap_or_default();
    let first = parts.next();
    let second = parts.next();

    match (command, first) {
        (":help", _) => ReplCommand::Help,
        (":files", _) => ReplCommand::Files,
        (":save", _) => ReplCommand::Save,
        (":run", Some(name)) => ReplCommand::RunFile(name),
        (":run", None) => ReplCommand::Usage(":run NAME"),
        (":cat", Some(name)) => ReplCommand::Cat(name),
        (":cat", None) => ReplCommand::Usage(":cat NAME"),
        (":import", Some(path)) => ReplCommand::Import { path, name: second },
        (":import", None) => ReplCommand::Usage(":import PATH [NAME]"),
        (other, _) => ReplCommand::Unknown(other),
    }
}

/// CLI helper for rustyline that completes and highlights meta commands.
struct ReplHelper;

impl Helper for ReplHelper {}

impl Completer for ReplHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];

        if line.starts_with(':') && !line.contains(' ') {
            let candidates = META_COMMANDS
                .iter()
                .filter(|cmd| cmd.starts_with(line))
                .map(|cmd| Pair {
                    display: cmd.to_string(),
                    replacement: cmd.to_string(),
                })
                .collect();
            Ok((0, candidates))
        } else {
            Ok((0, vec![]))
        }
    }
}

impl Highlighter for ReplHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if line.starts_with(':') {
            Owned(line.bright_cyan().to_string())
        } else {
            Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for ReplHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];

        if line.starts_with(':') && !line.contains(' ') {
            META_COMMANDS
                .iter()
                .find(|cmd| cmd.starts_with(line) && cmd.len() > line.len())
                .map(|cmd| cmd[line.len()..].to_string())
        } else {
            None
        }
    }
}

impl Validator for ReplHelper {}

fn print_help() {
    println!("{}", "Lines are evaluated in the interactive session.".bright_black());
    println!("  {}  run a virtual file in a fresh batch session", ":run NAME".cyan());
    println!("  {}      list virtual files", ":files".cyan());
    println!("  {}   show a virtual file", ":cat NAME".cyan());
    println!("  {}  copy a host file into the virtual files", ":import PATH [NAME]".cyan());
    println!("  {}       persist virtual files now", ":save".cyan());
    println!("  {}  leave the REPL", "quit / exit".cyan());
}

/// Runs the REPL until `quit`, `exit` or end of input.
pub async fn run(app: &mut App) -> Result<bool> {
    let mut receiver = app.bridge.output().subscribe();

    let mut rl = Editor::new()?;
    rl.set_helper(Some(ReplHelper));

    println!("{}", "=== Scratchpad REPL ===".bright_magenta().bold());
    println!("{}", "Type ':help' for commands, or 'quit' to exit.".bright_black());
    println!();

    loop {
        let line = match rl.readline(">> ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type 'quit' to exit.".yellow());
                continue;
            }
            Err(ReadlineError::Eof) => break,
            Err(err) => {
                eprintln!("{}", format!("Error: {:?}", err).red());
                break;
            }
        };

        if line.trim().is_empty() {
            continue;
        }
        let _ = rl.add_history_entry(line.as_str());

        match parse_command(&line) {
            ReplCommand::Quit => break,
            ReplCommand::Help => print_help(),
            ReplCommand::Files => {
                super::files::list(app);
            }
            ReplCommand::Save => match app.bridge.save_files().await {
                Ok(()) => println!("{}", "Saved.".green()),
                Err(e) => eprintln!("{}", format!("Save failed: {}", e).red()),
            },
            ReplCommand::Cat(name) => println!("{}", app.bridge.files().read(name)),
            ReplCommand::Import { path, name } => match tokio::fs::read_to_string(path).await {
                Ok(content) => {
                    let name = name.unwrap_or(path);
                    app.bridge.host().writefile(name, &content);
                    println!("{}", format!("Imported {} as '{}'", path, name).green());
                    app.autosave().await;
                }
                Err(e) => eprintln!("{}", format!("Failed to read {}: {}", path, e).red()),
            },
            ReplCommand::RunFile(name) => {
                app.bridge.run_file(name);
                render::drain(&mut receiver);
                app.autosave().await;
            }
            ReplCommand::Code(code) => {
                app.bridge.run_code(code, true);
                render::drain(&mut receiver);
                app.autosave().await;
            }
            ReplCommand::Usage(usage) => println!("{}", format!("Usage: {}", usage).yellow()),
            ReplCommand::Unknown(command) => {
                println!("{}", format!("Unknown command {}", command).bright_black())
            }
        }
    }

    println!("{}", "Goodbye!".bright_green());
    Ok(true)
}
