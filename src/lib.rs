pub mod api;
pub mod cli;
pub mod config;
pub mod database;
pub mod errors;
pub mod export;
pub mod roster;
pub mod services;
pub mod stats;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use cli::Cli;
use colored::Colorize;
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::Path;
use std::sync::Arc;

use crate::cli::{Command, StatLineArgs};
use crate::config::AppConfig;
use crate::database::{DocumentStore, SqliteDocumentStore};
use crate::services::{ListedRow, ServerService, StatsService};
use crate::stats::RawStatLine;

pub fn interpret() -> Command {
    let cli = Cli::parse();
    cli.command
}

pub fn handle_serve(port: u16) -> Result<()> {
    let config = AppConfig::from_env();
    let store = open_store(&config)?;
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let service = ServerService::new(port, config, store);
        service.run().await
    })
}

pub fn handle_stats(query: &str) -> Result<()> {
    let service = stats_service()?;
    let rows = service.rows(query)?;
    print_rows(&rows);
    Ok(())
}

pub fn handle_export(query: &str, output: Option<&Path>) -> Result<()> {
    let service = stats_service()?;
    let written = match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            service.export_csv(query, BufWriter::new(file))?
        }
        None => service.export_csv(query, io::stdout().lock())?,
    };
    log::info!("Exported {} rows", written);
    Ok(())
}

pub fn handle_add_stats(args: &StatLineArgs) -> Result<()> {
    let service = stats_service()?;
    let (id, record) = service.record(&RawStatLine::from(args))?;
    println!(
        "{} {} ({}) FG {}/{} {}",
        "Saved".green().bold(),
        record.player_name,
        id,
        record.field_goals_made,
        record.field_goal_attempts,
        stats::format_percentage(record.field_goal_percentage)
    );
    Ok(())
}

pub fn handle_reset() -> Result<()> {
    let config = AppConfig::from_env();
    let pool = database::create_pool(&config.database.path)?;
    let mut conn = database::get_connection(&pool)?;
    database::setup::reset_database(&mut conn)
}

pub fn handle_completions(shell: Shell) -> Result<()> {
    let mut command = Cli::command();
    let name = command.get_name().to_string();
    clap_complete::generate(shell, &mut command, name, &mut io::stdout());
    Ok(())
}

fn open_store(config: &AppConfig) -> Result<Arc<dyn DocumentStore>> {
    let pool = database::create_pool(&config.database.path)?;
    let mut conn = database::get_connection(&pool)?;
    database::setup::prepare_database(&mut conn)?;
    drop(conn);

    log::info!("Using database {}", config.database.path);
    Ok(Arc::new(SqliteDocumentStore::new(pool)))
}

fn stats_service() -> Result<StatsService> {
    let config = AppConfig::from_env();
    let store = open_store(&config)?;
    Ok(StatsService::new(store, &config.collections))
}

fn print_rows(rows: &[ListedRow]) {
    let header = format!(
        "{:<24} {:<22} {:>4} {:>4} {:>4} {:>7} {:>4} {:>4} {:>7} {:>4} {:>4} {:>7}",
        "Name", "Team", "PTS", "FGA", "FGM", "FG%", "3PA", "3PM", "3P%", "FTA", "FTM", "FT%"
    );
    println!("{}", header.bold());

    for ListedRow { row, .. } in rows {
        println!(
            "{:<24} {:<22} {:>4} {:>4} {:>4} {:>7} {:>4} {:>4} {:>7} {:>4} {:>4} {:>7}",
            row.name,
            row.team,
            row.points,
            row.field_goal_attempts,
            row.field_goals_made,
            row.field_goal_percentage,
            row.three_point_attempts,
            row.three_point_made,
            row.three_point_percentage,
            row.free_throw_attempts,
            row.free_throw_made,
            row.free_throw_percentage
        );
    }

    if rows.is_empty() {
        println!("{}", "No rows found".dimmed());
    }
}
