//! Command registry for REPL commands
//!
//! Each command is registered with its usage line and a one-line summary, so
//! the help listing is built from the same table the dispatcher uses.

pub mod general;
pub mod generate;

use serialist_core::config::{seeded_rng, SeededRng};
use serialist_core::{
    Axis, DurationSource, GenerationConfig, GenerationError, NoteEventBuilder, NoteheadSource,
    PatternError, PatternProgram, Row, RowGenerator, RowSource,
};

/// Result of executing a command
#[derive(Debug)]
pub enum CommandResult {
    /// Command executed successfully, continue REPL
    Success,
    /// Command executed, show this message
    Message(String),
    /// Exit the REPL
    Exit,
    /// Input matched no command
    NotACommand,
    /// Error occurred
    Error(String),
}

/// Session state shared by all command handlers
pub struct CommandContext {
    pub config: GenerationConfig,
    pub seed: u64,
    pub rng: SeededRng,
    pub row_length: usize,
    pub row_source: RowSource,
    /// The prime row of the session, once generated or set
    pub row: Option<Row>,
    pub durations: DurationSource,
    pub noteheads: NoteheadSource,
    pub articulations: Option<PatternProgram>,
}

/// Seed used until the user picks one
pub const DEFAULT_SEED: u64 = 0;

/// Row length used until the user picks one
pub const DEFAULT_ROW_LENGTH: usize = 12;

impl CommandContext {
    pub fn new() -> Self {
        Self::with_seed(DEFAULT_SEED)
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            config: GenerationConfig::default(),
            seed,
            rng: seeded_rng(seed),
            row_length: DEFAULT_ROW_LENGTH,
            row_source: RowSource::Random,
            row: None,
            durations: DurationSource::Fixed,
            noteheads: NoteheadSource::Standard,
            articulations: None,
        }
    }

    /// Restart the random stream from `seed`
    pub fn reseed(&mut self, seed: u64) {
        self.seed = seed;
        self.rng = seeded_rng(seed);
    }

    /// The session's prime row cut to the current length, generating one if
    /// none exists yet
    pub fn prime_row(&mut self) -> Result<Row, GenerationError> {
        if let Some(row) = &self.row {
            return Ok(row.truncate(self.row_length));
        }
        let row = RowGenerator::new(&self.config).resolve(
            &self.row_source,
            self.row_length,
            &mut self.rng,
        )?;
        let row = row.truncate(self.row_length);
        self.row = Some(row.clone());
        Ok(row)
    }

    /// Parse a pattern for `axis` against the configured notehead shapes
    pub fn parse_pattern(&self, input: &str, axis: Axis) -> Result<PatternProgram, PatternError> {
        PatternProgram::parse_with_shapes(input, axis, &self.config.notehead_shapes)
    }

    /// A note-event builder for the session's current attribute sources
    pub fn event_builder(&self) -> NoteEventBuilder {
        let builder = NoteEventBuilder::new(&self.config)
            .with_durations(self.durations.clone())
            .with_noteheads(self.noteheads.clone());
        match &self.articulations {
            Some(program) => builder.with_articulations(program.clone()),
            None => builder,
        }
    }
}

impl Default for CommandContext {
    fn default() -> Self {
        Self::new()
    }
}

/// A command handler function
pub type CommandHandler = fn(&str, &mut CommandContext) -> CommandResult;

/// Section of the help listing a command appears under
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CommandGroup {
    Rows,
    Patterns,
    Output,
    Settings,
    Other,
}

impl CommandGroup {
    pub const ALL: [CommandGroup; 5] = [
        CommandGroup::Rows,
        CommandGroup::Patterns,
        CommandGroup::Output,
        CommandGroup::Settings,
        CommandGroup::Other,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            CommandGroup::Rows => "Rows",
            CommandGroup::Patterns => "Patterns",
            CommandGroup::Output => "Output",
            CommandGroup::Settings => "Settings",
            CommandGroup::Other => "Other Commands",
        }
    }
}

/// A registered command and the help text shown for it
#[derive(Clone)]
pub struct CommandEntry {
    pub prefix: String,
    /// Invocation with its arguments, e.g. `length [n]`
    pub usage: &'static str,
    pub summary: &'static str,
    pub group: CommandGroup,
    /// Aliases run the same handler but are left out of the help listing
    pub alias_of: Option<String>,
    handler: CommandHandler,
    order: usize,
}

/// Registry of available commands
pub struct CommandRegistry {
    /// Sorted by prefix length descending for longest-match-first lookup
    commands: Vec<CommandEntry>,
}

impl CommandRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
        }
    }

    /// Register a command under `group` with its usage line and summary
    pub fn register(
        &mut self,
        group: CommandGroup,
        prefix: &str,
        usage: &'static str,
        summary: &'static str,
        handler: CommandHandler,
    ) {
        let order = self.commands.len();
        self.insert(CommandEntry {
            prefix: prefix.to_string(),
            usage,
            summary,
            group,
            alias_of: None,
            handler,
            order,
        });
    }

    /// Make `prefix` run the command already registered as `target`.
    /// Does nothing if `target` is unknown.
    pub fn register_alias(&mut self, prefix: &str, target: &str) {
        let Some(original) = self.commands.iter().find(|e| e.prefix == target).cloned() else {
            return;
        };
        let order = self.commands.len();
        self.insert(CommandEntry {
            prefix: prefix.to_string(),
            alias_of: Some(target.to_string()),
            order,
            ..original
        });
    }

    fn insert(&mut self, entry: CommandEntry) {
        self.commands.push(entry);
        // Stable, so equal-length prefixes keep registration order
        self.commands.sort_by(|a, b| b.prefix.len().cmp(&a.prefix.len()));
    }

    /// The entry `input` would dispatch to, with the argument text after it
    pub fn lookup<'a>(&self, input: &'a str) -> Option<(&CommandEntry, &'a str)> {
        self.commands.iter().find_map(|entry| {
            let prefix = entry.prefix.as_str();
            if input == prefix {
                Some((entry, ""))
            } else {
                input
                    .strip_prefix(prefix)
                    .filter(|rest| rest.starts_with(' '))
                    .map(|rest| (entry, rest.trim()))
            }
        })
    }

    /// Execute a command, returning NotACommand if no match found
    pub fn execute(&self, input: &str, ctx: &mut CommandContext) -> CommandResult {
        match self.lookup(input) {
            Some((entry, args)) => (entry.handler)(args, ctx),
            None => CommandResult::NotACommand,
        }
    }

    /// Get all registered command prefixes
    pub fn list_commands(&self) -> Vec<&str> {
        self.commands.iter().map(|e| e.prefix.as_str()).collect()
    }

    /// Non-alias commands of `group` in registration order
    pub fn group_entries(&self, group: CommandGroup) -> Vec<&CommandEntry> {
        let mut entries: Vec<&CommandEntry> = self
            .commands
            .iter()
            .filter(|e| e.group == group && e.alias_of.is_none())
            .collect();
        entries.sort_by_key(|e| e.order);
        entries
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Create a fully populated command registry with all built-in commands
pub fn create_registry() -> CommandRegistry {
    use CommandGroup::*;
    let mut registry = CommandRegistry::new();

    registry.register(
        Rows,
        "row random",
        "row random",
        "Generate a new random row",
        generate::cmd_row_random,
    );
    registry.register(
        Rows,
        "row fixed",
        "row fixed <pcs..>",
        "Use a fixed row, e.g. row fixed 4 3 7 5",
        generate::cmd_row_fixed,
    );
    registry.register(
        Rows,
        "row",
        "row",
        "Show the current row with I, RI and intervals",
        generate::cmd_row_show,
    );
    registry.register_alias("row show", "row");
    registry.register(
        Rows,
        "length",
        "length [n]",
        "Show or set the row length",
        general::cmd_length,
    );
    registry.register(
        Rows,
        "seed",
        "seed [n]",
        "Show or set the random seed",
        general::cmd_seed,
    );

    registry.register(
        Patterns,
        "durations",
        "durations <pattern|fixed|random>",
        "Set the duration source",
        generate::cmd_durations,
    );
    registry.register(
        Patterns,
        "noteheads",
        "noteheads <pattern|standard|serial|random>",
        "Set the notehead source",
        generate::cmd_noteheads,
    );
    registry.register(
        Patterns,
        "articulations",
        "articulations <pattern|off>",
        "Set the articulation pattern",
        generate::cmd_articulations,
    );
    registry.register(
        Patterns,
        "expand",
        "expand <axis> <pattern> [n] [rotation]",
        "Expand a pattern directly",
        generate::cmd_expand,
    );

    registry.register(
        Output,
        "rotations",
        "rotations [pitches|percussion|both]",
        "Rotation staves",
        generate::cmd_rotations,
    );
    registry.register(
        Output,
        "serial",
        "serial",
        "Prime, inversion, RI and chords",
        generate::cmd_serial,
    );
    registry.register(
        Output,
        "analyze",
        "analyze",
        "Compare rotations with rotation 0",
        generate::cmd_analyze,
    );

    registry.register(
        Settings,
        "config",
        "config [<key> <values..>]",
        "Show or change generation settings",
        general::cmd_config,
    );

    registry.register(
        Other,
        "help",
        "help [command]",
        "Show this help, or one command's usage",
        general::cmd_help,
    );
    registry.register(Other, "quit", "quit", "Exit the REPL", general::cmd_quit);
    registry.register_alias("exit", "quit");

    registry
}
