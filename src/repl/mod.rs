//! REPL (Read-Eval-Print Loop) for the modal shell

use crate::commands::{create_registry, CommandContext, CommandRegistry, CommandResult};
use anyhow::Result;
use colored::*;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

/// Interactive shell over the theory commands
pub struct Repl {
    editor: DefaultEditor,
    registry: CommandRegistry,
    ctx: CommandContext,
}

impl Repl {
    /// Create a new REPL instance
    pub fn new() -> Result<Self> {
        Ok(Repl {
            editor: DefaultEditor::new()?,
            registry: create_registry(),
            ctx: CommandContext::new(),
        })
    }

    /// Run the REPL until `quit`, Ctrl+C or Ctrl+D
    pub fn run(&mut self) -> Result<()> {
        println!(
            "{} {}",
            "♪".bright_yellow(),
            "Modal - keys, modes and chords".bright_cyan().bold()
        );
        println!(
            "Try: {}, {}, {}",
            "key F# Aeolian".cyan(),
            "chord G min 7 #5 add13".cyan(),
            "voicings C maj".cyan()
        );
        println!(
            "Type '{}' for more information, '{}' or {} to exit.\n",
            "help".bright_green(),
            "quit".bright_red(),
            "Ctrl+C".bright_red()
        );

        loop {
            let prompt = format!("{} ", "modal>".bright_magenta().bold());
            match self.editor.readline(&prompt) {
                Ok(line) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }
                    let _ = self.editor.add_history_entry(line);
                    if !self.dispatch(line) {
                        break;
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

    /// Execute one line, printing its outcome. Returns false once the
    /// session should end.
    fn dispatch(&mut self, line: &str) -> bool {
        report(self.registry.execute(line, &mut self.ctx))
    }
}

/// Print a command's outcome. Returns false for `Exit`.
pub fn report(result: CommandResult) -> bool {
    match result {
        CommandResult::Success => {}
        CommandResult::Message(msg) => println!("{}", msg),
        CommandResult::Exit => {
            println!("{}", "Goodbye!".bright_cyan());
            return false;
        }
        CommandResult::Error(e) => {
            println!("{} {}", "Error:".bright_red().bold(), e.red());
        }
        CommandResult::NotACommand => {
            println!(
                "{} Unknown command. Type '{}' for a list of commands.",
                "Error:".bright_red().bold(),
                "help".bright_green()
            );
        }
    }
    true
}

/// Run a single command line outside the REPL. Returns whether it succeeded.
pub fn run_once(line: &str) -> bool {
    let registry = create_registry();
    let mut ctx = CommandContext::new();
    let result = registry.execute(line, &mut ctx);
    let failed = matches!(result, CommandResult::Error(_) | CommandResult::NotACommand);
    report(result);
    !failed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_once() {
        colored::control::set_override(false);
        assert!(run_once("key C"));
        assert!(run_once("modes"));
        assert!(!run_once("key H"));
        assert!(!run_once("transpose C 2"));
    }

    #[test]
    fn test_report_exit() {
        assert!(!report(CommandResult::Exit));
        assert!(report(CommandResult::Success));
        assert!(report(CommandResult::Message("ok".to_string())));
    }
}
