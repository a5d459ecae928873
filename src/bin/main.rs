//! booklist CLI - Inspect and apply the catalog schema and grouping styles
//!
//! Usage:
//!   booklist schema
//!   booklist style [--groups <ids>] [--table <name>]
//!   booklist kinds [--json]
//!   booklist apply [--database <path>] [--build]
//!
//! Examples:
//!   booklist style --groups 1,7
//!   booklist apply --database ./catalog.db --build

use std::path::PathBuf;
use std::process::ExitCode;

use booklist::config::Settings;
use booklist::grouping::{registry, GroupChain, GroupKind, GroupOptions};
use booklist::schema::{reference_schema, SqlEngine};
use clap::{Parser, Subcommand};
use rusqlite::Connection;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "booklist")]
#[command(about = "booklist - Book catalog schema and hierarchical grouping engine")]
#[command(version)]
struct Cli {
    /// Config file (defaults to BOOKLIST_CONFIG, ./booklist.toml, then the user config dir)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the DDL of the catalog schema
    Schema,

    /// Print the booklist table and statements for a grouping style
    Style {
        /// Kind ids, outermost first (defaults to the configured style)
        #[arg(short, long, value_delimiter = ',')]
        groups: Option<Vec<u8>>,

        /// Name of the booklist table
        #[arg(short, long, default_value = "booklist")]
        table: String,
    },

    /// List the grouping kinds
    Kinds {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Create missing catalog tables in the database
    Apply {
        /// SQLite file (defaults to the configured path)
        #[arg(short, long)]
        database: Option<PathBuf>,

        /// Also build the booklist for the configured style
        #[arg(long)]
        build: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let settings = match &cli.config {
        Some(path) => Settings::from_file(path),
        None => Settings::load(),
    };
    let settings = match settings {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&settings.logging.filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    registry::init();

    match cli.command {
        Commands::Schema => cmd_schema(),
        Commands::Style { groups, table } => cmd_style(&settings, groups, &table),
        Commands::Kinds { json } => cmd_kinds(json),
        Commands::Apply { database, build } => cmd_apply(&settings, database, build),
    }
}

fn cmd_schema() -> ExitCode {
    for sql in reference_schema().statements() {
        println!("{};", sql);
    }
    ExitCode::SUCCESS
}

fn chain_for(settings: &Settings, groups: Option<Vec<u8>>) -> Option<GroupChain> {
    let result = match groups {
        Some(ids) => GroupOptions::from_persisted(&settings.style.options)
            .map_err(booklist::grouping::ChainError::UnknownOption)
            .and_then(|options| GroupChain::from_ids(&ids, &options)),
        None => GroupChain::from_style(&settings.style),
    };
    match result {
        Ok(chain) => Some(chain),
        Err(e) => {
            eprintln!("Invalid style: {}", e);
            None
        }
    }
}

fn cmd_style(settings: &Settings, groups: Option<Vec<u8>>, table_name: &str) -> ExitCode {
    let Some(chain) = chain_for(settings, groups) else {
        return ExitCode::FAILURE;
    };
    let schema = reference_schema();
    let table = chain.booklist_table(table_name);

    let levels: Vec<String> = chain
        .groups()
        .iter()
        .map(|g| format!("{} ({})", g.kind(), g.prefix()))
        .collect();
    println!("-- Levels: {}", levels.join(" > "));
    println!("{};", table.create_statement(false));
    for sql in table.index_statements() {
        println!("{};", sql);
    }
    println!();
    println!("-- Node key");
    println!("{}", chain.node_key_expression());
    println!();
    println!("-- Populate");
    println!("{};", chain.populate_statement(schema, &table));
    ExitCode::SUCCESS
}

fn cmd_kinds(json: bool) -> ExitCode {
    let registry = registry::get();

    if json {
        let kinds: Vec<serde_json::Value> = registry
            .entries()
            .iter()
            .map(|entry| {
                serde_json::json!({
                    "id": entry.kind().id(),
                    "name": entry.kind().name(),
                    "prefix": entry.key().prefix(),
                    "label": entry.key().label_id(),
                    "options": entry
                        .options()
                        .iter()
                        .map(|o| o.persistence_key())
                        .collect::<Vec<_>>(),
                })
            })
            .collect();
        match serde_json::to_string_pretty(&kinds) {
            Ok(s) => println!("{}", s),
            Err(e) => {
                eprintln!("Error serializing kinds: {}", e);
                return ExitCode::FAILURE;
            }
        }
        return ExitCode::SUCCESS;
    }

    for entry in registry.entries() {
        if entry.kind() == GroupKind::Book {
            continue;
        }
        println!(
            "{:>3}  {:<6} {}",
            entry.kind().id(),
            entry.key().prefix(),
            entry.kind()
        );
    }
    ExitCode::SUCCESS
}

fn cmd_apply(settings: &Settings, database: Option<PathBuf>, build: bool) -> ExitCode {
    let path = match database {
        Some(path) => path,
        None => match settings.database.resolved_path() {
            Ok(path) => path,
            Err(e) => {
                eprintln!("Configuration error: {}", e);
                return ExitCode::FAILURE;
            }
        },
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                eprintln!("Error creating '{}': {}", parent.display(), e);
                return ExitCode::FAILURE;
            }
        }
    }

    let conn = match Connection::open(&path) {
        Ok(conn) => conn,
        Err(e) => {
            eprintln!("Error opening '{}': {}", path.display(), e);
            return ExitCode::FAILURE;
        }
    };

    let schema = reference_schema();
    match schema.create_missing(&conn) {
        Ok(created) if created.is_empty() => info!(path = %path.display(), "schema up to date"),
        Ok(created) => info!(path = %path.display(), tables = ?created, "schema created"),
        Err(e) => {
            eprintln!("Error creating schema: {}", e);
            return ExitCode::FAILURE;
        }
    }

    if build {
        let Some(chain) = chain_for(settings, None) else {
            return ExitCode::FAILURE;
        };
        let table = match chain.materialize(&conn, schema, "booklist") {
            Ok(table) => table,
            Err(e) => {
                eprintln!("Error building booklist: {}", e);
                return ExitCode::FAILURE;
            }
        };
        let sql = format!("SELECT COUNT(*) FROM {}", table.name());
        match conn.query_count(&sql, &[]) {
            Ok(rows) => println!("booklist: {} row(s)", rows),
            Err(e) => warn!(error = %e, "could not count booklist rows"),
        }
    }

    ExitCode::SUCCESS
}
