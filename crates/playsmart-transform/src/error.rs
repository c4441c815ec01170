use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransformError {
    #[error("empty input: no raw deal records to transform")]
    EmptyInput,
}
