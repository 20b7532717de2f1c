pub mod api;
pub mod auth;
pub mod cli;
pub mod config;
pub mod database;
pub mod errors;
pub mod rules;
pub mod services;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use cli::Cli;
use colored::Colorize;

use crate::auth::Identity;
use crate::cli::Command;
use crate::config::settings::AppConfig;
use crate::services::server::ServerService;
use crate::services::{GameweekService, ScoringService};

pub fn interpret() -> Command {
    let cli = Cli::parse();
    cli.command
}

pub fn handle_serve(port: u16) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let config = AppConfig::new();
        let service = ServerService::new(port, config);
        service.run().await
    })
}

pub fn handle_migrate(reset: bool) -> Result<()> {
    let config = AppConfig::new();
    let pool = database::create_pool(&config.database.path)?;
    let conn = database::get_connection(&pool)?;

    if reset {
        database::setup::reset_database(&conn)?;
        println!("{} {}", "Schema reset:".yellow().bold(), config.database.path);
    } else {
        database::setup::init_database(&conn)?;
        println!("{} {}", "Schema ready:".green().bold(), config.database.path);
    }
    Ok(())
}

// Batch jobs run as the trusted service identity.

pub fn handle_refresh_stats() -> Result<()> {
    let config = AppConfig::new();
    let pool = database::create_pool(&config.database.path)?;
    let service = ScoringService::new(pool);

    let refreshed = service.refresh_all_player_stats(&Identity::Service)?;
    println!("{} {} players", "Refreshed".green().bold(), refreshed);
    Ok(())
}

pub fn handle_advance_gameweeks() -> Result<()> {
    let config = AppConfig::new();
    let pool = database::create_pool(&config.database.path)?;
    let service = GameweekService::new(pool);

    let transitions = service.advance_statuses(&Identity::Service)?;
    if transitions.is_empty() {
        println!("{}", "No gameweek changed status".dimmed());
    }
    for change in &transitions {
        println!(
            "{} {}: {} -> {}",
            "Gameweek".cyan().bold(),
            change.gameweek,
            change.from,
            change.to.to_string().green()
        );
    }
    Ok(())
}

pub fn handle_completions(shell: Shell) -> Result<()> {
    let mut command = Cli::command();
    let name = command.get_name().to_string();
    clap_complete::generate(shell, &mut command, name, &mut std::io::stdout());
    Ok(())
}
