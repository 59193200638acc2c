//! Errors
//!
//! Custom error types used throughout the `dectree` crate.
use thiserror::Error;

/// Errors that can occur while parsing a dataset or inducing a tree.
#[derive(Debug, Error)]
pub enum DecTreeError {
    /// Input holds no lines, or no data rows after the header.
    #[error("The dataset is empty, at least one data row is required.")]
    EmptyDataset,
    /// Row with a field count different from the header's.
    #[error("Line {0} has {2} fields, but the header declares {1} columns.")]
    RowLength(usize, usize, usize),
    /// Column index beyond the table.
    #[error("Column index {0} is out of range, the dataset has {1} columns.")]
    ColumnOutOfRange(usize, usize),
    /// Value code with no backing string in the column vocabulary.
    #[error("Value code {1} has no string in the vocabulary of column {0}.")]
    UnknownValueCode(usize, usize),
    /// String never observed for a column during training.
    #[error("Value {1:?} was never observed for column {0:?}.")]
    UnknownValueString(String, String),
    /// Rules or predictions were requested before fitting.
    #[error("The decision tree has not been fitted yet.")]
    NotFitted,
    /// Unable to write to a file or sink.
    #[error("Unable to write: {0}")]
    UnableToWrite(String),
    /// Unable to read from a file.
    #[error("Unable to read: {0}")]
    UnableToRead(String),
    /// First value is the name of the parameter, second is expected, third is what was passed.
    #[error("Invalid parameter value passed for {0}, expected {1} but {2} provided.")]
    InvalidParameter(String, String, String),
}
