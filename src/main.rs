use anyhow::{bail, Result};
use clap::Parser;
use message_etl::{cleaner, loader, logging, storage};
use std::path::PathBuf;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "message_etl")]
#[command(about = "Merges disaster message and category CSVs into a SQLite table")]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to the messages CSV file
    messages_filepath: PathBuf,
    /// Path to the categories CSV file
    categories_filepath: PathBuf,
    /// Path to the SQLite database to write the cleaned table to
    database_filepath: PathBuf,
}

fn run(cli: &Cli) -> Result<()> {
    for path in [&cli.messages_filepath, &cli.categories_filepath] {
        if !path.is_file() {
            bail!("input file not found: {}", path.display());
        }
    }

    info!("Loading data");
    println!(
        "📥 Loading data...\n    MESSAGES: {}\n    CATEGORIES: {}",
        cli.messages_filepath.display(),
        cli.categories_filepath.display()
    );
    let df = loader::load_data(&cli.messages_filepath, &cli.categories_filepath)?;

    info!("Cleaning data");
    println!("🔧 Cleaning data...");
    let df = cleaner::clean_data(df)?;

    info!("Saving data");
    println!(
        "💾 Saving data...\n    DATABASE: {}",
        cli.database_filepath.display()
    );
    storage::save_data(&df, &cli.database_filepath)?;

    println!("✅ Cleaned data saved to database!");
    Ok(())
}

fn main() {
    logging::init_logging();

    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        error!("ETL run failed: {e}");
        println!("❌ ETL run failed: {e}");
        std::process::exit(1);
    }
}
