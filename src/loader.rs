use crate::error::{EtlError, Result};
use crate::table::{Table, Value};
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info, instrument};

/// Reads a comma-delimited UTF-8 file with a header row into a `Table` of
/// text cells.
fn read_csv(path: &Path) -> Result<Table> {
    let mut reader = csv::ReaderBuilder::new().has_headers(true).from_path(path)?;

    let columns: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut table = Table::new(columns);
    for record in reader.records() {
        let record = record?;
        table.push_row(record.iter().map(|f| Value::Text(f.to_string())).collect());
    }

    debug!(path = %path.display(), rows = table.row_count(), "read CSV");
    Ok(table)
}

/// Loads the messages and categories files and inner-joins them on `id`.
///
/// The joined column set is the messages columns followed by the categories
/// columns minus the duplicate join key. Ids present in only one file are
/// dropped; disjoint id sets yield an empty table, not an error.
#[instrument(skip_all, fields(messages = %messages_path.display(), categories = %categories_path.display()))]
pub fn load_data(messages_path: &Path, categories_path: &Path) -> Result<Table> {
    let messages = read_csv(messages_path)?;
    let categories = read_csv(categories_path)?;

    let messages_id = messages
        .column_index("id")
        .ok_or_else(|| EtlError::MissingColumn(format!("id (in {})", messages_path.display())))?;
    let categories_id = categories
        .column_index("id")
        .ok_or_else(|| EtlError::MissingColumn(format!("id (in {})", categories_path.display())))?;

    // Index the categories rows by id. On duplicate ids the first row wins,
    // keeping one output row per shared id.
    let mut by_id: HashMap<&str, &[Value]> = HashMap::with_capacity(categories.row_count());
    for row in categories.rows() {
        if let Some(id) = row[categories_id].as_text() {
            by_id.entry(id).or_insert(row.as_slice());
        }
    }

    let mut columns = messages.columns().to_vec();
    for (i, name) in categories.columns().iter().enumerate() {
        if i != categories_id {
            columns.push(name.clone());
        }
    }

    let mut joined = Table::new(columns);
    for row in messages.rows() {
        let id = match row[messages_id].as_text() {
            Some(id) => id,
            None => continue,
        };
        if let Some(matched) = by_id.get(id) {
            let mut out = row.clone();
            for (i, value) in matched.iter().enumerate() {
                if i != categories_id {
                    out.push(value.clone());
                }
            }
            joined.push_row(out);
        }
    }

    info!(
        rows = joined.row_count(),
        columns = joined.columns().len(),
        "joined messages and categories"
    );
    Ok(joined)
}
