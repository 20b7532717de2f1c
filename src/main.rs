use anyhow::Result;

use fantasy_rules::cli::Command;
use fantasy_rules::{
    handle_advance_gameweeks, handle_completions, handle_migrate, handle_refresh_stats,
    handle_serve, interpret,
};

fn main() {
    setup_logging();
    parse_and_execute().unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    });
}

fn setup_logging() {
    sensible_env_logger::init!();
}

fn parse_and_execute() -> Result<()> {
    let command = interpret();
    execute_command(&command)
}

fn execute_command(command: &Command) -> Result<()> {
    match command {
        Command::Serve { port } => handle_serve(*port),
        Command::Migrate { reset } => handle_migrate(*reset),
        Command::RefreshStats => handle_refresh_stats(),
        Command::AdvanceGameweeks => handle_advance_gameweeks(),
        Command::Completions { shell } => handle_completions(*shell),
    }
}
