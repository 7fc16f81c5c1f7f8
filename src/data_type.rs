use std::fmt;

/// Represents the storage variants a column can have.
/// Every column of a table is exactly one of these for its whole lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataType {
    /// A 64-bit signed integer. Has no null value.
    Int,
    /// A 64-bit floating-point number. `NaN` is the null value.
    Float,
    /// A boolean value (true or false). Has no null value.
    Bool,
    /// A nullable UTF-8 character string.
    Text,
    /// A nullable string drawn from a fixed dictionary, stored as small codes.
    Enum,
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Int => "int",
            Self::Float => "float",
            Self::Bool => "bool",
            Self::Text => "text",
            Self::Enum => "enum",
        };
        f.write_str(name)
    }
}
