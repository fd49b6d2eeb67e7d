//! schemadump CLI
//!
//! Command-line tool for dumping a MySQL schema as migration files.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use sqlx::mysql::MySqlPoolOptions;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use schemadump::prelude::*;
use schemadump::runner;
use schemadump_core::assemble::Aspect;
use schemadump_core::dump::LimitSpec;

/// Dump a live MySQL schema as replayable migration files.
#[derive(Parser)]
#[command(name = "schemadump")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Database URL (MySQL connection string).
    #[arg(short, long, env = "DATABASE_URL")]
    database: String,

    /// Output directory for generated migration files.
    #[arg(short, long, default_value = "migrations")]
    output_dir: PathBuf,

    /// Comma-separated tables to dump (all if not specified).
    #[arg(short, long, value_delimiter = ',')]
    table: Vec<String>,

    /// Comma-separated tables to exclude.
    #[arg(short, long, value_delimiter = ',')]
    filter: Vec<String>,

    /// Comma-separated tables whose rows get dumped (every selected table
    /// if not specified).
    #[arg(long, value_delimiter = ',')]
    data: Vec<String>,

    /// Row window for data dumps: `offset,count`, `offset,` or `count`.
    /// Empty means all rows.
    #[arg(short, long, default_value = "0,1000", num_args = 0..=1, default_missing_value = "")]
    limit: String,

    /// Restrict generation to one aspect: 0 structure, 1 data, 2 keys,
    /// 3 foreign keys.
    #[arg(long = "type", value_parser = clap::value_parser!(u8).range(0..=3))]
    aspect: Option<u8>,

    /// Replay-history table, excluded unless explicitly included.
    #[arg(long, default_value = "migration")]
    migration_table: String,

    /// Storage prefix shared by the application's tables.
    #[arg(long, default_value = "")]
    table_prefix: String,

    /// Options clause for generated create-table chains.
    #[arg(
        long,
        default_value = "ENGINE=InnoDB CHARACTER SET=utf8 COLLATE=utf8_unicode_ci"
    )]
    table_options: String,

    /// Replaces the timestamp pair in artifact names.
    #[arg(long)]
    file_prefix: Option<String>,

    /// Separator between names printed by `list`.
    #[arg(long, default_value = ", ")]
    separator: String,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write migration files (the default).
    Generate,
    /// Print forward scripts to stdout.
    Create,
    /// Print backward scripts to stdout.
    Drop,
    /// Print table names.
    List,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let limit = LimitSpec::parse(&cli.limit)?;
    let aspect = cli.aspect.and_then(Aspect::from_index);

    // Connect to database
    let pool = MySqlPoolOptions::new()
        .max_connections(5)
        .connect(&cli.database)
        .await?;

    let options = RunOptions {
        out_dir: cli.output_dir,
        include: cli.table,
        filter: cli.filter,
        data: cli.data,
        limit,
        aspect,
        migration_table: cli.migration_table,
        table_prefix: cli.table_prefix,
        table_options: cli.table_options,
        file_prefix: cli.file_prefix,
    };

    match cli.command.unwrap_or(Commands::Generate) {
        Commands::Generate => {
            let summary = runner::run(pool, &options, Mode::Generate).await?;
            summary.print();
        }

        Commands::Create => {
            let summary = runner::run(pool, &options, Mode::PrintForward).await?;
            summary.print();
        }

        Commands::Drop => {
            let summary = runner::run(pool, &options, Mode::PrintBackward).await?;
            summary.print();
        }

        Commands::List => {
            runner::list(pool, &cli.separator, &options.table_prefix).await?;
        }
    }

    Ok(())
}
