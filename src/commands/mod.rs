//! Command registry for shell commands
//!
//! Every shell line is a command: a registered prefix followed by arguments.

pub mod general;
pub mod theory;

use modal_core::types::VoicingOptions;

/// Result of executing a command
#[derive(Debug)]
pub enum CommandResult {
    /// Command executed successfully, continue REPL
    Success,
    /// Command executed, show this message
    Message(String),
    /// Exit the REPL
    Exit,
    /// No registered prefix matched
    NotACommand,
    /// Error occurred
    Error(String),
}

impl CommandResult {
    /// Wrap a command body that reports failures through `anyhow`
    pub fn from_output(output: anyhow::Result<String>) -> Self {
        match output {
            Ok(message) => CommandResult::Message(message),
            Err(e) => CommandResult::Error(format!("{:#}", e)),
        }
    }
}

/// State shared between commands for one shell session
#[derive(Debug, Default)]
pub struct CommandContext {
    /// Options used by `voicings`, replaced by `voicings preset`
    pub voicing_options: VoicingOptions,
}

impl CommandContext {
    pub fn new() -> Self {
        Self::default()
    }
}

/// A command handler function
pub type CommandHandler = fn(&str, &mut CommandContext) -> CommandResult;

/// Registry of available commands
pub struct CommandRegistry {
    /// Commands indexed by their prefix (e.g., "voicings preset")
    /// Sorted by prefix length descending for longest-match-first lookup
    commands: Vec<(String, CommandHandler)>,
}

impl CommandRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
        }
    }

    /// Register a command with its prefix
    pub fn register(&mut self, prefix: &str, handler: CommandHandler) {
        self.commands.push((prefix.to_string(), handler));
        self.commands.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
    }

    /// Execute a command, returning NotACommand if no match found
    pub fn execute(&self, input: &str, ctx: &mut CommandContext) -> CommandResult {
        let input = input.trim();
        for (prefix, handler) in &self.commands {
            if input == prefix || input.starts_with(&format!("{} ", prefix)) {
                let args = input[prefix.len()..].trim();
                return handler(args, ctx);
            }
        }
        CommandResult::NotACommand
    }

    /// Get all registered command prefixes
    pub fn list_commands(&self) -> Vec<&str> {
        self.commands.iter().map(|(p, _)| p.as_str()).collect()
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Create a fully populated command registry with all built-in commands
pub fn create_registry() -> CommandRegistry {
    let mut registry = CommandRegistry::new();

    // Theory commands
    registry.register("key", theory::cmd_key);
    registry.register("triads", theory::cmd_triads);
    registry.register("chord", theory::cmd_chord);
    registry.register("voicings preset", theory::cmd_voicings_preset);
    registry.register("voicings", theory::cmd_voicings);
    registry.register("interval", theory::cmd_interval);
    registry.register("modes", theory::cmd_modes);
    registry.register("tonics", theory::cmd_tonics);

    // General commands
    registry.register("help", general::cmd_help);
    registry.register("quit", general::cmd_quit);
    registry.register("exit", general::cmd_quit);

    registry
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cmd_echo(args: &str, _ctx: &mut CommandContext) -> CommandResult {
        CommandResult::Message(args.to_string())
    }

    fn cmd_shout(args: &str, _ctx: &mut CommandContext) -> CommandResult {
        CommandResult::Message(args.to_uppercase())
    }

    #[test]
    fn test_longest_prefix_wins() {
        let mut registry = CommandRegistry::new();
        registry.register("say", cmd_echo);
        registry.register("say loud", cmd_shout);
        let mut ctx = CommandContext::new();

        match registry.execute("say loud hello", &mut ctx) {
            CommandResult::Message(m) => assert_eq!(m, "HELLO"),
            other => panic!("unexpected {:?}", other),
        }
        match registry.execute("say hello", &mut ctx) {
            CommandResult::Message(m) => assert_eq!(m, "hello"),
            other => panic!("unexpected {:?}", other),
        }
        // A prefix only matches on a word boundary
        assert!(matches!(
            registry.execute("sayonara", &mut ctx),
            CommandResult::NotACommand
        ));
    }

    #[test]
    fn test_builtin_commands_registered() {
        let registry = create_registry();
        let commands = registry.list_commands();
        for name in [
            "key", "chord", "voicings", "interval", "modes", "tonics", "triads", "help", "quit",
            "exit",
        ] {
            assert!(commands.contains(&name), "{} missing", name);
        }
        assert_eq!(commands[0], "voicings preset");
    }

    #[test]
    fn test_quit_exits() {
        let registry = create_registry();
        let mut ctx = CommandContext::new();
        assert!(matches!(
            registry.execute("quit", &mut ctx),
            CommandResult::Exit
        ));
        assert!(matches!(
            registry.execute("play C", &mut ctx),
            CommandResult::NotACommand
        ));
    }
}
