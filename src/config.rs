use std::collections::HashMap;

/// Construction options for a [Table](crate::Table).
///
/// # Example
/// ```
/// use colframe::Config;
///
/// let config = Config::new()
///     .column_order(["size", "price"])
///     .enum_column("size", &["s", "m", "l"]);
/// assert_eq!(config.order(), Some(&["size".to_string(), "price".to_string()][..]));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Config {
    column_order: Option<Vec<String>>,
    enum_columns: HashMap<String, Option<Vec<String>>>,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fixes the column order. Every name must match a supplied column.
    pub fn column_order<S: Into<String>>(mut self, columns: impl IntoIterator<Item = S>) -> Self {
        self.column_order = Some(columns.into_iter().map(Into::into).collect());
        self
    }

    /// Stores the text column `name` as a categorical column with a fixed
    /// dictionary. The order of `values` is the order of the categories.
    pub fn enum_column<S: AsRef<str>>(mut self, name: impl Into<String>, values: &[S]) -> Self {
        let values = values.iter().map(|v| v.as_ref().to_string()).collect();
        self.enum_columns.insert(name.into(), Some(values));
        self
    }

    /// Stores the text column `name` as a categorical column whose
    /// dictionary is inferred from the data.
    pub fn inferred_enum_column(mut self, name: impl Into<String>) -> Self {
        self.enum_columns.insert(name.into(), None);
        self
    }

    pub fn order(&self) -> Option<&[String]> {
        self.column_order.as_deref()
    }

    pub(crate) fn take_enum_columns(&mut self) -> HashMap<String, Option<Vec<String>>> {
        std::mem::take(&mut self.enum_columns)
    }
}
