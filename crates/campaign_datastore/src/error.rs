#[derive(Debug, thiserror::Error)]
pub enum DataStoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("CSV parse error at line {line}: {source}")]
    Row {
        line: u64,
        #[source]
        source: csv::Error,
    },
    #[error("Missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),
    #[error("Invalid campaign '{campaign}': {field} must be a finite, non-negative number")]
    Invalid {
        campaign: String,
        field: &'static str,
    },
}
