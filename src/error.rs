use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("CSV read failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("missing required column: {0}")]
    MissingColumn(String),

    #[error("category layout mismatch at row {row}: {message}")]
    CategoryShape { row: usize, message: String },

    #[error("invalid label value {token:?} at row {row}: last character is not an integer")]
    LabelValue { row: usize, token: String },
}

pub type Result<T> = std::result::Result<T, EtlError>;
