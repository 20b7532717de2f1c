use clap::{Parser, Subcommand};
use clap_complete::Shell;

#[derive(Parser, Debug)]
#[command(author, version, about = "fantasy football rules backend")]
pub struct Cli {
    /// Command
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
#[clap(rename_all = "kebab-case")]
pub enum Command {
    /// Start the backend server
    Serve {
        /// Port number (optional, defaults to 3000)
        #[arg(short, long, default_value_t = 3000)]
        port: u16,
    },
    /// Create missing tables and indexes
    Migrate {
        /// Drop every table first. Deletes all data.
        #[arg(long)]
        reset: bool,
    },
    /// Recompute every player's aggregate stats from recorded gameweek scores
    RefreshStats,
    /// Move gameweeks to their next status based on match results
    AdvanceGameweeks,
    /// Print a shell completion script
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}
