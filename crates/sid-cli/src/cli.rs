use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use sid_core::FontOption;

#[derive(Parser)]
#[command(name = "sid")]
#[command(about = "A quiet journal for the terminal")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Directory holding the journal files
    #[arg(long, global = true, value_name = "PATH")]
    pub data_dir: Option<PathBuf>,

    /// Quick entry: sid "today was long"
    #[arg(trailing_var_arg = true)]
    pub text: Vec<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a new entry
    #[command(alias = "new")]
    Write {
        /// Entry text
        text: Vec<String>,
    },
    /// Rewrite an existing entry
    Edit {
        /// Entry ID or unique ID prefix
        id: String,
        /// Replacement text (opens $EDITOR when omitted)
        text: Vec<String>,
    },
    /// Show entries grouped by day
    History {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Delete an entry
    Delete {
        /// Entry ID or unique ID prefix
        id: String,
    },
    /// Record a voice clip from raw PCM on stdin
    Record {
        /// Stop after this many seconds instead of waiting for end of input
        #[arg(short, long, value_name = "N")]
        seconds: Option<u64>,
    },
    /// List voice clips
    Clips {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Delete a voice clip
    ClipDelete {
        /// Clip ID or unique ID prefix
        id: String,
    },
    /// Choose the editor font
    Font {
        #[arg(value_enum)]
        option: FontArg,
    },
    /// Cycle to the next font size
    Size,
    /// Toggle the backspace key
    Backspace,
    /// Toggle dark mode
    Theme,
    /// Show current settings
    Settings {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Control the writing timer
    Timer {
        #[command(subcommand)]
        command: TimerCommands,
    },
    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
        /// Optional output path (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand, Clone, Copy, Debug, Eq, PartialEq)]
pub enum TimerCommands {
    /// Start or pause the countdown
    Toggle,
    /// Back to 15:00, paused
    Reset,
    /// Print the remaining time
    Status,
    /// Run the countdown in the foreground until it stops
    Watch,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum FontArg {
    Random,
    Lato,
    Arial,
    System,
    Serif,
}

impl From<FontArg> for FontOption {
    fn from(value: FontArg) -> Self {
        match value {
            FontArg::Random => Self::Random,
            FontArg::Lato => Self::Lato,
            FontArg::Arial => Self::Arial,
            FontArg::System => Self::System,
            FontArg::Serif => Self::Serif,
        }
    }
}
