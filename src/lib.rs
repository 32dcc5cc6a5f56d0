pub mod analytics;
pub mod api;
pub mod cli;
pub mod config;
pub mod database;
pub mod domain;
pub mod errors;
pub mod services;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use cli::Cli;

use crate::cli::Command;
use crate::config::settings::AppConfig;
use crate::domain::UserId;
use crate::services::analytics::AnalyticsService;
use crate::services::server::ServerService;

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

pub fn handle_init() -> Result<()> {
    let config = AppConfig::new();
    let pool = database::create_pool(&config.database)?;
    database::setup::reset_database(&mut database::get_connection(&pool)?)?;
    log::info!("Initialised database at {}", config.database.path);
    Ok(())
}

pub fn handle_report(user: &str, json: bool) -> Result<()> {
    let config = AppConfig::new();
    let pool = database::create_pool(&config.database)?;
    database::setup::ensure_schema(&mut database::get_connection(&pool)?)?;

    let service = AnalyticsService::new(pool, config.analytics);
    let report = service.report(&UserId::new(user))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", analytics::ReportView(&report));
    }
    Ok(())
}

pub fn handle_completions(shell: Shell) -> Result<()> {
    let mut command = Cli::command();
    let name = command.get_name().to_string();
    clap_complete::generate(shell, &mut command, name, &mut std::io::stdout());
    Ok(())
}
