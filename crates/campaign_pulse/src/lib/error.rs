#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Validation error: the dataset contains no campaigns")]
    EmptyDataset,
    #[error("Validation error: total {field} exceeds {}", u64::MAX)]
    CountOverflow { field: &'static str },
}
