use crate::error::{EtlError, Result};
use crate::table::{Table, Value};
use tracing::{info, instrument, warn};

/// Splits a `name-value` token into its name part and trailing value
/// character. Returns `None` when the token is too short or the value is not
/// preceded by a literal `-`.
fn split_token(token: &str) -> Option<(&str, char)> {
    let mut chars = token.chars();
    let value = chars.next_back()?;
    if chars.next_back()? != '-' {
        return None;
    }
    Some((chars.as_str(), value))
}

/// Derives the label column names from the first row's compound string.
fn derive_schema(compound: &str) -> Result<Vec<String>> {
    compound
        .split(';')
        .map(|token| {
            let (name, _) = split_token(token).ok_or_else(|| EtlError::CategoryShape {
                row: 0,
                message: format!("malformed category token {token:?}"),
            })?;
            Ok(name.to_string())
        })
        .collect()
}

/// Expands the compound `categories` column into one integer indicator column
/// per label and removes duplicate rows.
///
/// The label schema comes from row 0. Every row is checked against that
/// schema: a differing token count or token name aborts the run instead of
/// silently misaligning columns.
#[instrument(skip_all, fields(rows = table.row_count()))]
pub fn clean_data(table: Table) -> Result<Table> {
    let categories_col = table
        .column_index("categories")
        .ok_or_else(|| EtlError::MissingColumn("categories".to_string()))?;

    let kept: Vec<String> = table
        .columns()
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != categories_col)
        .map(|(_, name)| name.clone())
        .collect();

    // An empty join has no row to derive the schema from; there is nothing to
    // expand, so only the compound column is dropped.
    if table.is_empty() {
        warn!("no rows to clean; dropping the categories column only");
        return Ok(Table::new(kept));
    }

    let first = compound_of(&table, 0, categories_col)?;
    let labels = derive_schema(first)?;

    let mut columns = kept;
    columns.extend(labels.iter().cloned());
    let mut cleaned = Table::new(columns);

    for (row_idx, row) in table.rows().iter().enumerate() {
        let compound = compound_of(&table, row_idx, categories_col)?;
        let tokens: Vec<&str> = compound.split(';').collect();
        if tokens.len() != labels.len() {
            return Err(EtlError::CategoryShape {
                row: row_idx,
                message: format!(
                    "expected {} category tokens, found {}",
                    labels.len(),
                    tokens.len()
                ),
            });
        }

        let mut out: Vec<Value> = row
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != categories_col)
            .map(|(_, v)| v.clone())
            .collect();

        for (token, label) in tokens.iter().zip(&labels) {
            let (name, value) = split_token(token).ok_or_else(|| EtlError::CategoryShape {
                row: row_idx,
                message: format!("malformed category token {token:?}"),
            })?;
            if name != label {
                return Err(EtlError::CategoryShape {
                    row: row_idx,
                    message: format!("token {name:?} does not match schema label {label:?}"),
                });
            }
            let digit = value.to_digit(10).ok_or_else(|| EtlError::LabelValue {
                row: row_idx,
                token: (*token).to_string(),
            })?;
            out.push(Value::Int(i64::from(digit)));
        }

        cleaned.push_row(out);
    }

    let removed = cleaned.dedup_rows();
    if removed > 0 {
        info!(removed, "dropped duplicate rows");
    }
    info!(
        rows = cleaned.row_count(),
        labels = labels.len(),
        "expanded category labels"
    );
    Ok(cleaned)
}

/// The compound string of a given row, or an error if the cell is not text.
fn compound_of<'a>(table: &'a Table, row: usize, col: usize) -> Result<&'a str> {
    table.rows()[row][col]
        .as_text()
        .ok_or_else(|| EtlError::CategoryShape {
            row,
            message: "categories cell is not a string".to_string(),
        })
}
