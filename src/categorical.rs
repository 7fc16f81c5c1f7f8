use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use crate::error::{Error, Result};

/// Code reserved for the null value in categorical columns.
pub const NULL_CODE: u8 = u8::MAX;

/// Largest number of distinct values a dictionary can hold.
pub const MAX_ENUM_VALUES: usize = NULL_CODE as usize;

/// The ordered vocabulary of a categorical column.
///
/// Position in `values` is the code stored in the column, so code order is
/// dictionary order. A dictionary supplied by the caller is `strict`: its
/// order is meaningful and ordering comparators are allowed. An inferred
/// dictionary is sorted lexically but carries no ordinal meaning.
#[derive(Debug)]
pub struct Dictionary {
    values: Vec<Arc<str>>,
    lookup: HashMap<Arc<str>, u8>,
    strict: bool,
}

impl Dictionary {
    /// Builds a dictionary with a fixed, caller-defined order.
    ///
    /// # Errors
    /// Returns [Error::TooManyEnumValues] if more than [MAX_ENUM_VALUES] values
    /// are given, [Error::InvalidEnumValue] on a repeated value.
    pub fn fixed<S: AsRef<str>>(values: &[S]) -> Result<Self> {
        Self::build(values.iter().map(|v| Arc::from(v.as_ref())), true)
    }

    /// Builds a dictionary from the distinct non-null values observed.
    pub fn infer<'a>(observed: impl IntoIterator<Item = Option<&'a str>>) -> Result<Self> {
        let distinct: BTreeSet<&str> = observed.into_iter().flatten().collect();
        Self::build(distinct.into_iter().map(Arc::from), false)
    }

    fn build(values: impl Iterator<Item = Arc<str>>, strict: bool) -> Result<Self> {
        let values: Vec<Arc<str>> = values.collect();
        if values.len() > MAX_ENUM_VALUES {
            return Err(Error::TooManyEnumValues(values.len()));
        }
        let mut lookup = HashMap::with_capacity(values.len());
        for (code, value) in values.iter().enumerate() {
            if lookup.insert(Arc::clone(value), code as u8).is_some() {
                return Err(Error::InvalidEnumValue(value.to_string()));
            }
        }
        Ok(Self {
            values,
            lookup,
            strict,
        })
    }

    /// Code of `value`, `None` if it is not part of the dictionary.
    pub fn code(&self, value: &str) -> Option<u8> {
        self.lookup.get(value).copied()
    }

    /// Encodes an optional string, failing if it is not part of the dictionary.
    pub fn encode(&self, value: Option<&str>) -> Result<u8> {
        match value {
            None => Ok(NULL_CODE),
            Some(v) => self
                .code(v)
                .ok_or_else(|| Error::InvalidEnumValue(v.to_string())),
        }
    }

    /// String for `code`, `None` for the null code.
    pub fn value(&self, code: u8) -> Option<&Arc<str>> {
        self.values.get(code as usize)
    }

    pub fn values(&self) -> &[Arc<str>] {
        &self.values
    }

    /// Whether the dictionary order was defined by the caller.
    pub fn is_strict(&self) -> bool {
        self.strict
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
