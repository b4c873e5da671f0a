use crate::error::Result;
use crate::table::{Table, Value};
use rusqlite::Connection;
use std::path::Path;
use tracing::{info, instrument};

/// Name of the output table inside the database file.
pub const TABLE_NAME: &str = "messages";

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// SQL affinity for a column, inferred from its first value. Tables arriving
/// here have uniform column types per construction.
fn column_type(table: &Table, col: usize) -> &'static str {
    match table.rows().first().map(|row| &row[col]) {
        Some(Value::Int(_)) => "INTEGER",
        _ => "TEXT",
    }
}

/// Persists the cleaned table as `messages` in a SQLite database at `db_path`,
/// creating the file if absent.
///
/// Collision policy is replace: an existing `messages` table is dropped and
/// recreated. Everything runs in one transaction, so a failed run leaves any
/// previous contents intact and a rerun against an existing file succeeds.
#[instrument(skip(table), fields(db = %db_path.display(), rows = table.row_count()))]
pub fn save_data(table: &Table, db_path: &Path) -> Result<()> {
    let mut conn = Connection::open(db_path)?;
    let tx = conn.transaction()?;

    let defs: Vec<String> = table
        .columns()
        .iter()
        .enumerate()
        .map(|(i, name)| format!("{} {}", quote_ident(name), column_type(table, i)))
        .collect();
    tx.execute_batch(&format!(
        "DROP TABLE IF EXISTS {TABLE_NAME};\n         CREATE TABLE {TABLE_NAME} ({});",
        defs.join(", ")
    ))?;

    {
        let names: Vec<String> = table.columns().iter().map(|c| quote_ident(c)).collect();
        let placeholders: Vec<String> = (1..=table.columns().len())
            .map(|i| format!("?{i}"))
            .collect();
        let mut stmt = tx.prepare(&format!(
            "INSERT INTO {TABLE_NAME} ({}) VALUES ({})",
            names.join(", "),
            placeholders.join(", ")
        ))?;
        for row in table.rows() {
            stmt.execute(rusqlite::params_from_iter(row.iter()))?;
        }
    }

    tx.commit()?;
    info!(rows = table.row_count(), "saved cleaned table");
    Ok(())
}
