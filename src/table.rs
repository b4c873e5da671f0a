use rusqlite::types::ToSqlOutput;
use rusqlite::ToSql;
use std::collections::HashSet;

/// A single cell. CSV input loads as `Text`; derived indicator columns are `Int`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Value {
    Text(String),
    Int(i64),
}

impl Value {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            Value::Int(_) => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            Value::Text(_) => None,
        }
    }
}

impl ToSql for Value {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        match self {
            Value::Text(s) => s.to_sql(),
            Value::Int(n) => n.to_sql(),
        }
    }
}

/// Row-major table with named columns. All tables in the pipeline are
/// materialized once and handed to the next stage whole.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl Table {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a named column, if present.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Appends a row. The caller is responsible for matching the column count.
    pub fn push_row(&mut self, row: Vec<Value>) {
        debug_assert_eq!(row.len(), self.columns.len());
        self.rows.push(row);
    }

    /// Removes rows that are exact duplicates of an earlier row across all
    /// columns, keeping the first occurrence. Order is otherwise preserved.
    pub fn dedup_rows(&mut self) -> usize {
        let mut seen: HashSet<Vec<Value>> = HashSet::with_capacity(self.rows.len());
        let before = self.rows.len();
        self.rows.retain(|row| seen.insert(row.clone()));
        before - self.rows.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Value {
        Value::Text(s.to_string())
    }

    #[test]
    fn dedup_keeps_first_occurrence_and_order() {
        let mut table = Table::new(vec!["id".to_string(), "message".to_string()]);
        table.push_row(vec![text("1"), text("flood")]);
        table.push_row(vec![text("2"), text("storm")]);
        table.push_row(vec![text("1"), text("flood")]);
        table.push_row(vec![text("3"), text("fire")]);

        let removed = table.dedup_rows();

        assert_eq!(removed, 1);
        assert_eq!(table.row_count(), 3);
        assert_eq!(table.rows()[0][1], text("flood"));
        assert_eq!(table.rows()[1][1], text("storm"));
        assert_eq!(table.rows()[2][1], text("fire"));
    }

    #[test]
    fn rows_differing_only_in_int_columns_are_distinct() {
        let mut table = Table::new(vec!["id".to_string(), "related".to_string()]);
        table.push_row(vec![text("1"), Value::Int(1)]);
        table.push_row(vec![text("1"), Value::Int(0)]);

        assert_eq!(table.dedup_rows(), 0);
        assert_eq!(table.row_count(), 2);
    }

    #[test]
    fn column_index_finds_named_column() {
        let table = Table::new(vec!["id".to_string(), "categories".to_string()]);
        assert_eq!(table.column_index("categories"), Some(1));
        assert_eq!(table.column_index("missing"), None);
    }
}
