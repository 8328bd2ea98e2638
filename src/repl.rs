//! REPL (Read-Eval-Print Loop) for row and pattern generation

use crate::commands::{create_registry, CommandContext, CommandResult};
use anyhow::Result;
use colored::*;
use log::debug;
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RustylineResult};

/// Interactive REPL over one generation session
pub struct Repl {
    editor: DefaultEditor,
    context: CommandContext,
}

impl Repl {
    /// Create a new REPL instance
    pub fn new() -> RustylineResult<Self> {
        let editor = DefaultEditor::new()?;
        Ok(Repl {
            editor,
            context: CommandContext::new(),
        })
    }

    /// Start the REPL loop
    pub fn run(&mut self) -> Result<()> {
        println!(
            "{}",
            "Serialist: constrained rows and pattern sequences".bright_cyan().bold()
        );
        println!(
            "Try: {}, {}, {}",
            "row random".cyan(),
            "durations [fixed=[8]x2, rotate=[(1,2),(1,1)]x2]".cyan(),
            "rotations".cyan()
        );
        println!(
            "Type '{}' for more information, '{}' or {} to exit.\n",
            "help".bright_green(),
            "quit".bright_red(),
            "Ctrl+C".bright_red()
        );

        let registry = create_registry();

        loop {
            let prompt = format!("{} ", "serialist>".bright_magenta().bold());
            match self.editor.readline(&prompt) {
                Ok(line) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }
                    self.editor.add_history_entry(line.to_owned())?;
                    debug!("Command: {}", line);

                    match registry.execute(line, &mut self.context) {
                        CommandResult::Success => {
                            // Command executed, no output needed
                        }
                        CommandResult::Message(msg) => {
                            println!("{}", msg);
                        }
                        CommandResult::Exit => {
                            println!("{}", "Goodbye!".bright_cyan());
                            break;
                        }
                        CommandResult::Error(e) => {
                            println!("{} {}", "Error:".bright_red().bold(), e.red());
                        }
                        CommandResult::NotACommand => {
                            println!(
                                "{} {} (type '{}' for commands)",
                                "Unknown command:".bright_red().bold(),
                                line.red(),
                                "help".bright_green()
                            );
                        }
                    }
                }
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                    println!("{}", "Goodbye!".bright_cyan());
                    break;
                }
                Err(err) => {
                    println!(
                        "{} {}",
                        "Error reading input:".bright_red().bold(),
                        err.to_string().red()
                    );
                }
            }
        }

        Ok(())
    }
}

/// Convenience function to start the REPL
pub fn start() -> Result<()> {
    let mut repl = Repl::new().map_err(|e| anyhow::anyhow!("Failed to initialize REPL: {}", e))?;
    repl.run()
}
