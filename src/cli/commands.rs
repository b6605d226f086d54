use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "pinnotes")]
#[command(version, about = "Ordered, pinnable notes for your project")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Show debug logging on stderr
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a new pinnotes project in the current directory
    Init {
        /// Store notes in SQLite instead of JSON files
        #[arg(long)]
        sqlite: bool,
    },

    /// Add a new note
    Add {
        /// Note title
        title: String,

        /// Note content
        #[arg(long, short = 'c', conflicts_with = "stdin")]
        content: Option<String>,

        /// Read content from stdin
        #[arg(long)]
        stdin: bool,

        /// Reminder date (YYYY-MM-DD)
        #[arg(long)]
        remind: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List notes, pinned first
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a single note
    Get {
        /// Note ID
        id: u64,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Edit a note's title, content or reminder
    Edit {
        /// Note ID
        id: u64,

        /// New title
        #[arg(long)]
        title: Option<String>,

        /// New content
        #[arg(long, short = 'c', conflicts_with = "stdin")]
        content: Option<String>,

        /// Read new content from stdin
        #[arg(long)]
        stdin: bool,

        /// New reminder date (YYYY-MM-DD)
        #[arg(long, conflicts_with = "clear_reminder")]
        remind: Option<String>,

        /// Remove the reminder
        #[arg(long)]
        clear_reminder: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Remove a note
    Remove {
        /// Note ID
        id: u64,

        /// Skip confirmation prompt
        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Move a note to a position within its group (0 is first)
    Move {
        /// Note ID
        id: u64,

        /// Target position
        position: u32,
    },

    /// Pin a note, or unpin it if already pinned
    Pin {
        /// Note ID
        id: u64,
    },

    /// Close any gaps in note positions
    Compact,
}
