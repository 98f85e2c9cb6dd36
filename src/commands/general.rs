//! General shell commands (help, quit)

use crate::commands::{CommandContext, CommandResult};
use colored::*;

/// Handle `help` command
pub fn cmd_help(_args: &str, _ctx: &mut CommandContext) -> CommandResult {
    print_help();
    CommandResult::Success
}

/// Handle `quit` or `exit` command
pub fn cmd_quit(_args: &str, _ctx: &mut CommandContext) -> CommandResult {
    CommandResult::Exit
}

/// Print help information
fn print_help() {
    println!("{}", "Modal Help".bold());
    println!("{}", "==========".bold());
    println!();
    println!("{}", "Keys:".green());
    println!(
        "  {}          - Spell a key (mode defaults to Ionian)",
        "key <tonic> [mode]".cyan()
    );
    println!(
        "  {}       - Diatonic triads of a key",
        "triads <tonic> [mode]".cyan()
    );
    println!(
        "  {}              - Valid tonics of a mode",
        "tonics <mode>".cyan()
    );
    println!(
        "  {}                     - List the seven modes",
        "modes".cyan()
    );
    println!();
    println!("{}", "Chords:".green());
    println!(
        "  {}  - Build a chord",
        "chord <root> <base> [ext] [#5 ..] [add13 ..] [/3]".cyan()
    );
    println!("  bases: maj, min, dim, dom, aug, sus2, sus4; extensions: 5, 7, 9, 11, 13");
    println!(
        "  {}      - Voicings of a chord",
        "voicings <root> <base> ...".cyan()
    );
    println!(
        "  {} - Switch voicing options",
        "voicings preset close|open|wide|default".cyan()
    );
    println!();
    println!("{}", "Intervals:".green());
    println!(
        "  {}           - Look up by name, short name or semitones",
        "interval <P5|7|tritone>".cyan()
    );
    println!(
        "  {}          - Interval between two notes",
        "interval <note> <note>".cyan()
    );
    println!();
    println!("{}", "Examples:".green());
    println!("  modal> {}", "key F# Aeolian".cyan());
    println!("  modal> {}", "chord G min 7 #5 add13".cyan());
    println!("  modal> {}", "chord C maj /3".cyan());
    println!("  modal> {}", "voicings C dom 7".cyan());
    println!();
    println!("{}", "Other Commands:".green());
    println!("  {}              - Show this help", "help".bright_green());
    println!("  {}              - Exit the REPL", "quit".bright_red());
}
