use std::fmt;

/// A reduction applied to every partition of a grouped table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AggFn {
    Sum,
    Mean,
    Min,
    Max,
    /// Number of rows in the partition, nulls included.
    Count,
    First,
    Last,
    Any,
    All,
}

impl fmt::Display for AggFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Sum => "sum",
            Self::Mean => "mean",
            Self::Min => "min",
            Self::Max => "max",
            Self::Count => "count",
            Self::First => "first",
            Self::Last => "last",
            Self::Any => "any",
            Self::All => "all",
        };
        f.write_str(name)
    }
}

/// A reduction of one column, optionally written under another name.
#[derive(Debug, Clone, PartialEq)]
pub struct Aggregation {
    pub func: AggFn,
    pub column: String,
    pub alias: Option<String>,
}

impl Aggregation {
    pub fn new(func: AggFn, column: impl Into<String>) -> Self {
        Self {
            func,
            column: column.into(),
            alias: None,
        }
    }

    /// Names the output column instead of reusing the source column name.
    pub fn alias(mut self, name: impl Into<String>) -> Self {
        self.alias = Some(name.into());
        self
    }

    /// Name of the column this aggregation produces.
    pub fn output_name(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.column)
    }
}

pub fn sum(column: impl Into<String>) -> Aggregation {
    Aggregation::new(AggFn::Sum, column)
}

pub fn mean(column: impl Into<String>) -> Aggregation {
    Aggregation::new(AggFn::Mean, column)
}

pub fn min(column: impl Into<String>) -> Aggregation {
    Aggregation::new(AggFn::Min, column)
}

pub fn max(column: impl Into<String>) -> Aggregation {
    Aggregation::new(AggFn::Max, column)
}

pub fn count(column: impl Into<String>) -> Aggregation {
    Aggregation::new(AggFn::Count, column)
}

pub fn first(column: impl Into<String>) -> Aggregation {
    Aggregation::new(AggFn::First, column)
}

pub fn last(column: impl Into<String>) -> Aggregation {
    Aggregation::new(AggFn::Last, column)
}

pub fn any(column: impl Into<String>) -> Aggregation {
    Aggregation::new(AggFn::Any, column)
}

pub fn all(column: impl Into<String>) -> Aggregation {
    Aggregation::new(AggFn::All, column)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builders_name_their_function() {
        let built = [
            sum("c"),
            mean("c"),
            min("c"),
            max("c"),
            count("c"),
            first("c"),
            last("c"),
            any("c"),
            all("c"),
        ];
        let funcs: Vec<AggFn> = built.iter().map(|a| a.func).collect();
        assert_eq!(
            funcs,
            vec![
                AggFn::Sum,
                AggFn::Mean,
                AggFn::Min,
                AggFn::Max,
                AggFn::Count,
                AggFn::First,
                AggFn::Last,
                AggFn::Any,
                AggFn::All
            ]
        );
        assert!(built.iter().all(|a| a.output_name() == "c"));
    }

    #[test]
    fn test_alias_renames_output() {
        let agg = last("price").alias("closing");
        assert_eq!(agg.column, "price");
        assert_eq!(agg.output_name(), "closing");
        assert_eq!(agg.func.to_string(), "last");
    }
}
