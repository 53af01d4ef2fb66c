mod api;
mod cli;
mod config;
mod data;
mod db;
mod models;
mod prayer_times;
mod session;
mod tui;
mod utils;

use anyhow::{Context, Result};
use clap::Parser;
use rusqlite::Connection;

use cli::args::{Cli, Commands};
use cli::handlers;
use config::AppConfig;
use db::migrations::run_migrations;
use db::repository::PreferenceRepo;
use session::{resolve_startup, Services};

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = AppConfig::load().context("Loading config")?;

    // Ensure data directory exists and open DB
    AppConfig::ensure_data_dir()?;
    let db_path = AppConfig::db_path()?;
    let conn = Connection::open(&db_path)
        .with_context(|| format!("Opening database at {:?}", db_path))?;

    conn.execute_batch("PRAGMA journal_mode=WAL;")?;
    run_migrations(&conn)?;

    match cli.command {
        Some(Commands::Times {
            country,
            city,
            lat,
            lng,
        }) => handlers::handle_times(
            &conn,
            &config,
            country.as_deref(),
            city.as_deref(),
            lat.as_deref(),
            lng.as_deref(),
        )?,
        Some(Commands::Countries) => handlers::handle_countries()?,
        Some(Commands::Cities { country }) => handlers::handle_cities(country.as_deref())?,
        Some(Commands::Methods) => handlers::handle_methods()?,
        Some(Commands::SetCity { country, city }) => {
            handlers::handle_set_city(&conn, &country, &city)?
        }
        Some(Commands::Forget) => handlers::handle_forget(&conn)?,
        Some(Commands::Locate) => handlers::handle_locate(&config)?,
        Some(Commands::Config) => handlers::handle_config(&config)?,

        // No subcommand → launch TUI
        None => {
            let saved = PreferenceRepo::load_city(&conn)?;
            let startup = resolve_startup(saved, &config.location);
            let services = Services::from_config(&config)?;
            tui::app::run(
                conn,
                services,
                startup,
                config.location.clear_results_on_country_change,
            )?;
        }
    }

    Ok(())
}
