//! Error types for table operations.
//!
//! A failed operation never panics: the error is stored in the resulting
//! [`Table`](crate::Table) and handed out unchanged by every later operation.

use thiserror::Error;

use crate::aggregation::AggFn;
use crate::data_type::DataType;
use crate::filter::Comparator;

/// Result type alias for table operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or transforming a table.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A column name that is not part of the table.
    #[error("unknown column \"{0}\"")]
    UnknownColumn(String),

    /// Columns supplied to a constructor differ in length.
    #[error("column \"{column}\" has length {actual}, expected {expected}")]
    LengthMismatch {
        column: String,
        expected: usize,
        actual: usize,
    },

    /// Bad slice bounds or an out-of-bounds text span.
    #[error("range {start}..{end} is invalid for length {len}")]
    Range { start: usize, end: usize, len: usize },

    /// The comparator is not defined for the column variant or argument.
    #[error("comparator {comparator} is not supported for {data_type} column: {reason}")]
    UnsupportedOperation {
        comparator: Comparator,
        data_type: DataType,
        reason: String,
    },

    /// The aggregation function is not defined for the column variant.
    #[error("aggregation {func} is not supported for {data_type} column")]
    UnsupportedAggregation { func: AggFn, data_type: DataType },

    /// A value is not part of the categorical dictionary.
    #[error("value \"{0}\" is not part of the enum dictionary")]
    InvalidEnumValue(String),

    /// A categorical dictionary was given for columns absent from the data.
    #[error("enum specified for unknown columns: {0:?}")]
    UnknownEnumColumns(Vec<String>),

    /// The dictionary holds more distinct values than codes are available.
    #[error("enum dictionary has {0} values, the limit is {limit}", limit = crate::categorical::MAX_ENUM_VALUES)]
    TooManyEnumValues(usize),

    /// Two columns with the same name in one table.
    #[error("duplicate column \"{0}\"")]
    DuplicateColumn(String),

    /// A typed access was requested on a column of another variant.
    #[error("column \"{column}\" is {actual}, expected {expected}")]
    TypeMismatch {
        column: String,
        expected: &'static str,
        actual: DataType,
    },

    /// More rows than an index can address.
    #[error("{0} rows exceed the limit of {limit}", limit = crate::index::MAX_ROWS)]
    TooManyRows(usize),
}
