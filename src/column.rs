use std::cmp::Ordering;
use std::collections::HashSet;
use std::ops::Range;
use std::sync::Arc;

use bitvec::prelude::*;

use crate::aggregation::AggFn;
use crate::categorical::{Dictionary, NULL_CODE};
use crate::data_type::DataType;
use crate::error::{Error, Result};
use crate::filter::{Comparator, like_match};
use crate::index::Index;
use crate::value::Value;

/// A nullable string element.
pub type Text = Option<Arc<str>>;

/// Physical storage for column data.
/// Each variant wraps a shared, immutable buffer of a specific type; cloning
/// a column never copies the values.
#[derive(Debug, Clone)]
pub enum ColumnData {
    /// 64-bit integers.
    Int(Arc<[i64]>),
    /// 64-bit floats, `NaN` marks a null.
    Float(Arc<[f64]>),
    /// Compact bit-vector for boolean values.
    Bool(Arc<BitVec>),
    /// Nullable strings.
    Text(Arc<[Text]>),
    /// Dictionary codes, [NULL_CODE] marks a null.
    Enum {
        codes: Arc<[u8]>,
        dict: Arc<Dictionary>,
    },
}

/// A typed, fixed-length, immutable sequence of values.
///
/// Every operation reads rows through an [Index] or raw row positions and
/// returns new storage; the buffer of a column is never written once built,
/// so a column can be shared by any number of tables and threads.
#[derive(Debug, Clone)]
pub struct Column {
    data: ColumnData,
}

/// Resolved right-hand side of a filter.
#[derive(Debug, Clone, Copy)]
pub enum Operand<'a> {
    None,
    Value(&'a Value),
    Values(&'a [Value]),
    Column(&'a Column),
}

impl Column {
    pub fn int(values: impl Into<Arc<[i64]>>) -> Self {
        Self {
            data: ColumnData::Int(values.into()),
        }
    }

    pub fn float(values: impl Into<Arc<[f64]>>) -> Self {
        Self {
            data: ColumnData::Float(values.into()),
        }
    }

    pub fn bool(values: impl IntoIterator<Item = bool>) -> Self {
        Self {
            data: ColumnData::Bool(Arc::new(values.into_iter().collect())),
        }
    }

    pub fn text<S: AsRef<str>>(values: impl IntoIterator<Item = Option<S>>) -> Self {
        let values: Vec<Text> = values
            .into_iter()
            .map(|v| v.map(|s| Arc::from(s.as_ref())))
            .collect();
        Self::from_texts(values)
    }

    pub(crate) fn from_texts(values: Vec<Text>) -> Self {
        Self {
            data: ColumnData::Text(values.into()),
        }
    }

    /// Builds a categorical column.
    ///
    /// With `dictionary` the vocabulary and its order are fixed by the caller;
    /// without it the dictionary is inferred from the distinct values.
    ///
    /// # Errors
    /// Returns [Error::InvalidEnumValue] if a value is missing from the
    /// supplied dictionary, [Error::TooManyEnumValues] if the dictionary
    /// would exceed the code space.
    pub fn categorical<S: AsRef<str>>(
        values: impl IntoIterator<Item = Option<S>>,
        dictionary: Option<&[S]>,
    ) -> Result<Self> {
        let values: Vec<Option<S>> = values.into_iter().collect();
        let dict = match dictionary {
            Some(fixed) => Dictionary::fixed(fixed)?,
            None => Dictionary::infer(values.iter().map(|v| v.as_ref().map(AsRef::as_ref)))?,
        };
        let codes = values
            .iter()
            .map(|v| dict.encode(v.as_ref().map(AsRef::as_ref)))
            .collect::<Result<Vec<u8>>>()?;
        Ok(Self {
            data: ColumnData::Enum {
                codes: codes.into(),
                dict: Arc::new(dict),
            },
        })
    }

    /// Builds a text column from one buffer and a byte span per row.
    ///
    /// # Errors
    /// Returns [Error::Range] if a span is out of bounds or does not fall on
    /// character boundaries.
    pub fn text_blob(data: &str, spans: &[Option<Range<usize>>]) -> Result<Self> {
        let values = spans
            .iter()
            .map(|span| match span {
                None => Ok(None),
                Some(range) => data.get(range.clone()).map(|s| Some(Arc::from(s))).ok_or(
                    Error::Range {
                        start: range.start,
                        end: range.end,
                        len: data.len(),
                    },
                ),
            })
            .collect::<Result<Vec<Text>>>()?;
        Ok(Self::from_texts(values))
    }

    /// A column repeating `value` `count` times.
    ///
    /// A [Value::Null] yields a text column of nulls.
    pub fn constant(value: &Value, count: usize) -> Self {
        match value {
            Value::Int(v) => Self::int(vec![*v; count]),
            Value::Float(v) => Self::float(vec![*v; count]),
            Value::Bool(v) => Self::bool(std::iter::repeat_n(*v, count)),
            Value::Text(v) => Self::from_texts(vec![Some(Arc::clone(v)); count]),
            Value::Null => Self::from_texts(vec![None; count]),
        }
    }

    /// Returns the number of rows stored in the column.
    pub fn len(&self) -> usize {
        match &self.data {
            ColumnData::Int(v) => v.len(),
            ColumnData::Float(v) => v.len(),
            ColumnData::Bool(v) => v.len(),
            ColumnData::Text(v) => v.len(),
            ColumnData::Enum { codes, .. } => codes.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn data_type(&self) -> DataType {
        match &self.data {
            ColumnData::Int(_) => DataType::Int,
            ColumnData::Float(_) => DataType::Float,
            ColumnData::Bool(_) => DataType::Bool,
            ColumnData::Text(_) => DataType::Text,
            ColumnData::Enum { .. } => DataType::Enum,
        }
    }

    pub fn data(&self) -> &ColumnData {
        &self.data
    }

    /// The dictionary of a categorical column.
    pub fn dictionary(&self) -> Option<&Arc<Dictionary>> {
        match &self.data {
            ColumnData::Enum { dict, .. } => Some(dict),
            _ => None,
        }
    }

    /// Whether both columns share the same backing buffer.
    pub fn shares_storage(&self, other: &Column) -> bool {
        match (&self.data, &other.data) {
            (ColumnData::Int(a), ColumnData::Int(b)) => Arc::ptr_eq(a, b),
            (ColumnData::Float(a), ColumnData::Float(b)) => Arc::ptr_eq(a, b),
            (ColumnData::Bool(a), ColumnData::Bool(b)) => Arc::ptr_eq(a, b),
            (ColumnData::Text(a), ColumnData::Text(b)) => Arc::ptr_eq(a, b),
            (ColumnData::Enum { codes: a, .. }, ColumnData::Enum { codes: b, .. }) => {
                Arc::ptr_eq(a, b)
            }
            _ => false,
        }
    }

    /// String value at `pos` for text and categorical columns.
    pub(crate) fn str_at(&self, pos: usize) -> Option<&str> {
        match &self.data {
            ColumnData::Text(v) => v[pos].as_deref(),
            ColumnData::Enum { codes, dict } => dict.value(codes[pos]).map(|s| s.as_ref()),
            _ => None,
        }
    }

    pub fn is_null(&self, pos: usize) -> bool {
        match &self.data {
            ColumnData::Int(_) | ColumnData::Bool(_) => false,
            ColumnData::Float(v) => v[pos].is_nan(),
            ColumnData::Text(v) => v[pos].is_none(),
            ColumnData::Enum { codes, .. } => codes[pos] == NULL_CODE,
        }
    }

    /// Human-readable rendering of the row at `pos`, nulls rendered as `null_text`.
    pub fn render(&self, pos: usize, null_text: &str) -> String {
        if self.is_null(pos) {
            return null_text.to_string();
        }
        match &self.data {
            ColumnData::Int(v) => v[pos].to_string(),
            ColumnData::Float(v) => v[pos].to_string(),
            ColumnData::Bool(v) => v[pos].to_string(),
            ColumnData::Text(_) | ColumnData::Enum { .. } => {
                self.str_at(pos).unwrap_or(null_text).to_string()
            }
        }
    }

    /// Compares the rows visited by `index` with the rows of `other` visited by
    /// `other_index`, pairwise in index order.
    ///
    /// Float nulls compare equal to each other here, unlike under filtering.
    /// Categorical columns compare by value, so two different dictionaries
    /// holding the same strings are equal.
    pub fn equals(&self, index: &Index, other: &Column, other_index: &Index) -> bool {
        if index.len() != other_index.len() {
            return false;
        }
        let mut pairs = index.iter().zip(other_index.iter());
        match (&self.data, &other.data) {
            (ColumnData::Int(a), ColumnData::Int(b)) => pairs.all(|(i, j)| a[i] == b[j]),
            (ColumnData::Float(a), ColumnData::Float(b)) => {
                pairs.all(|(i, j)| a[i] == b[j] || (a[i].is_nan() && b[j].is_nan()))
            }
            (ColumnData::Bool(a), ColumnData::Bool(b)) => pairs.all(|(i, j)| a[i] == b[j]),
            (ColumnData::Text(a), ColumnData::Text(b)) => pairs.all(|(i, j)| a[i] == b[j]),
            (ColumnData::Enum { .. }, ColumnData::Enum { .. }) => {
                pairs.all(|(i, j)| self.str_at(i) == other.str_at(j))
            }
            _ => false,
        }
    }

    /// Narrows `mask` with `comparator` applied to the rows visited by `index`.
    ///
    /// `mask` is aligned with `index`; only positions still set are evaluated,
    /// and each is cleared if the row does not satisfy the predicate. A column
    /// operand is read at the same row positions as this column.
    ///
    /// # Errors
    /// Returns [Error::UnsupportedOperation] if the comparator or operand is not
    /// defined for this variant, [Error::InvalidEnumValue] for a literal that is
    /// not part of a categorical dictionary.
    pub fn filter(
        &self,
        index: &Index,
        comparator: Comparator,
        operand: Operand<'_>,
        mask: &mut BitSlice,
    ) -> Result<()> {
        let unsupported = |reason: &str| Error::UnsupportedOperation {
            comparator,
            data_type: self.data_type(),
            reason: reason.to_string(),
        };

        match comparator {
            Comparator::IsNull | Comparator::IsNotNull => {
                if !matches!(operand, Operand::None) {
                    return Err(unsupported("null checks take no argument"));
                }
                let want_null = comparator == Comparator::IsNull;
                refine(index, mask, |pos| self.is_null(pos) == want_null);
                return Ok(());
            }
            _ if matches!(operand, Operand::None | Operand::Value(Value::Null)) => {
                return Err(unsupported("missing or null argument"));
            }
            _ => {}
        }

        match &self.data {
            ColumnData::Int(values) => match operand {
                Operand::Value(v) if is_comparison(comparator) => {
                    let rhs = v.as_int().ok_or_else(|| unsupported("expected an int argument"))?;
                    refine(index, mask, |pos| matches_ordering(comparator, values[pos].cmp(&rhs)));
                }
                Operand::Values(vs) if is_membership(comparator) => {
                    let set = vs
                        .iter()
                        .map(|v| v.as_int().ok_or_else(|| unsupported("expected int arguments")))
                        .collect::<Result<HashSet<i64>>>()?;
                    let want = comparator == Comparator::In;
                    refine(index, mask, |pos| set.contains(&values[pos]) == want);
                }
                Operand::Column(other) if is_comparison(comparator) => {
                    let ColumnData::Int(rhs) = &other.data else {
                        return Err(unsupported("argument column must be int"));
                    };
                    refine(index, mask, |pos| matches_ordering(comparator, values[pos].cmp(&rhs[pos])));
                }
                _ => return Err(unsupported("comparator not defined for int")),
            },
            ColumnData::Float(values) => match operand {
                Operand::Value(v) if is_comparison(comparator) => {
                    let rhs = v.as_float().ok_or_else(|| unsupported("expected a numeric argument"))?;
                    refine(index, mask, |pos| {
                        values[pos]
                            .partial_cmp(&rhs)
                            .is_some_and(|ord| matches_ordering(comparator, ord))
                    });
                }
                Operand::Values(vs) if is_membership(comparator) => {
                    let set = vs
                        .iter()
                        .map(|v| v.as_float().ok_or_else(|| unsupported("expected numeric arguments")))
                        .collect::<Result<Vec<f64>>>()?;
                    let want = comparator == Comparator::In;
                    refine(index, mask, |pos| {
                        let x = values[pos];
                        !x.is_nan() && set.contains(&x) == want
                    });
                }
                Operand::Column(other) if is_comparison(comparator) => {
                    let rhs: &[f64] = match &other.data {
                        ColumnData::Float(rhs) => &rhs[..],
                        _ => return Err(unsupported("argument column must be float")),
                    };
                    refine(index, mask, |pos| {
                        values[pos]
                            .partial_cmp(&rhs[pos])
                            .is_some_and(|ord| matches_ordering(comparator, ord))
                    });
                }
                _ => return Err(unsupported("comparator not defined for float")),
            },
            ColumnData::Bool(values) => {
                let want_equal = match comparator {
                    Comparator::Eq => true,
                    Comparator::Ne => false,
                    _ => return Err(unsupported("bool columns only support = and !=")),
                };
                match operand {
                    Operand::Value(v) => {
                        let rhs = v.as_bool().ok_or_else(|| unsupported("expected a bool argument"))?;
                        refine(index, mask, |pos| (values[pos] == rhs) == want_equal);
                    }
                    Operand::Column(other) => {
                        let ColumnData::Bool(rhs) = &other.data else {
                            return Err(unsupported("argument column must be bool"));
                        };
                        refine(index, mask, |pos| (values[pos] == rhs[pos]) == want_equal);
                    }
                    _ => return Err(unsupported("expected a bool argument")),
                }
            }
            ColumnData::Text(values) => match operand {
                Operand::Value(v) => {
                    let rhs = v.as_str().ok_or_else(|| unsupported("expected a text argument"))?;
                    if is_comparison(comparator) {
                        refine(index, mask, |pos| {
                            values[pos]
                                .as_deref()
                                .is_some_and(|s| matches_ordering(comparator, s.cmp(rhs)))
                        });
                    } else if is_pattern(comparator) {
                        let ci = comparator == Comparator::ILike;
                        refine(index, mask, |pos| {
                            values[pos].as_deref().is_some_and(|s| like_match(s, rhs, ci))
                        });
                    } else {
                        return Err(unsupported("comparator needs a list argument"));
                    }
                }
                Operand::Values(vs) if is_membership(comparator) => {
                    let set = vs
                        .iter()
                        .map(|v| v.as_str().ok_or_else(|| unsupported("expected text arguments")))
                        .collect::<Result<HashSet<&str>>>()?;
                    let want = comparator == Comparator::In;
                    refine(index, mask, |pos| {
                        values[pos].as_deref().is_some_and(|s| set.contains(s) == want)
                    });
                }
                Operand::Column(other) if is_comparison(comparator) => {
                    if !matches!(other.data_type(), DataType::Text | DataType::Enum) {
                        return Err(unsupported("argument column must be text"));
                    }
                    refine(index, mask, |pos| {
                        match (values[pos].as_deref(), other.str_at(pos)) {
                            (Some(a), Some(b)) => matches_ordering(comparator, a.cmp(b)),
                            _ => false,
                        }
                    });
                }
                _ => return Err(unsupported("comparator not defined for text")),
            },
            ColumnData::Enum { codes, dict } => {
                if let Operand::Column(other) = operand {
                    self.filter_enum_column(index, comparator, other, mask)?;
                    return Ok(());
                }
                let accept = enum_accept_table(dict, comparator, operand).map_err(|e| match e {
                    EnumFilterError::Unsupported(reason) => unsupported(reason),
                    EnumFilterError::Invalid(value) => Error::InvalidEnumValue(value),
                })?;
                refine(index, mask, |pos| accept[codes[pos] as usize]);
            }
        }
        Ok(())
    }

    fn filter_enum_column(
        &self,
        index: &Index,
        comparator: Comparator,
        other: &Column,
        mask: &mut BitSlice,
    ) -> Result<()> {
        let unsupported = |reason: &str| Error::UnsupportedOperation {
            comparator,
            data_type: DataType::Enum,
            reason: reason.to_string(),
        };
        let (ColumnData::Enum { codes, dict }, ColumnData::Enum { codes: rhs, dict: rhs_dict }) =
            (&self.data, &other.data)
        else {
            if matches!(comparator, Comparator::Eq | Comparator::Ne) && other.data_type() == DataType::Text {
                let want_equal = comparator == Comparator::Eq;
                refine(index, mask, |pos| match (self.str_at(pos), other.str_at(pos)) {
                    (Some(a), Some(b)) => (a == b) == want_equal,
                    _ => false,
                });
                return Ok(());
            }
            return Err(unsupported("argument column must be enum or text"));
        };

        if Arc::ptr_eq(dict, rhs_dict) && (dict.is_strict() || !comparator.is_ordering()) {
            if !is_comparison(comparator) {
                return Err(unsupported("comparator not defined between columns"));
            }
            refine(index, mask, |pos| {
                codes[pos] != NULL_CODE
                    && rhs[pos] != NULL_CODE
                    && matches_ordering(comparator, codes[pos].cmp(&rhs[pos]))
            });
            return Ok(());
        }

        if !matches!(comparator, Comparator::Eq | Comparator::Ne) {
            return Err(unsupported("enum columns without a shared fixed order only support = and !="));
        }
        let want_equal = comparator == Comparator::Eq;
        refine(index, mask, |pos| match (self.str_at(pos), other.str_at(pos)) {
            (Some(a), Some(b)) => (a == b) == want_equal,
            _ => false,
        });
        Ok(())
    }

    /// A comparator over raw row positions, used by sort, group and distinct.
    ///
    /// Nulls order before every other value. Categorical columns compare by
    /// dictionary code unless `by_text` is set.
    pub fn comparable(&self, reverse: bool, by_text: bool) -> Comparable<'_> {
        let keys = match &self.data {
            ColumnData::Int(v) => Keys::Int(v),
            ColumnData::Float(v) => Keys::Float(v),
            ColumnData::Bool(v) => Keys::Bool(v),
            ColumnData::Text(v) => Keys::Text(v),
            ColumnData::Enum { codes, dict } if by_text => Keys::EnumText(codes, dict),
            ColumnData::Enum { codes, .. } => Keys::Codes(codes),
        };
        Comparable { keys, reverse }
    }

    /// Materializes the given row positions, in order, into new storage.
    pub fn subset(&self, positions: &[u32]) -> Column {
        let rows = positions.iter().map(|&p| p as usize);
        let data = match &self.data {
            ColumnData::Int(v) => ColumnData::Int(rows.map(|p| v[p]).collect()),
            ColumnData::Float(v) => ColumnData::Float(rows.map(|p| v[p]).collect()),
            ColumnData::Bool(v) => ColumnData::Bool(Arc::new(rows.map(|p| v[p]).collect())),
            ColumnData::Text(v) => ColumnData::Text(rows.map(|p| v[p].clone()).collect()),
            ColumnData::Enum { codes, dict } => ColumnData::Enum {
                codes: rows.map(|p| codes[p]).collect(),
                dict: Arc::clone(dict),
            },
        };
        Column { data }
    }

    /// Applies `func` to every partition, producing one row per partition in
    /// partition order.
    ///
    /// Float reductions skip nulls and yield `NaN` when a partition holds no
    /// value; text min/max skip nulls likewise.
    ///
    /// # Errors
    /// Returns [Error::UnsupportedAggregation] if `func` is not defined for
    /// this variant.
    pub fn aggregate(&self, partitions: &[Index], func: AggFn) -> Result<Column> {
        let unsupported = || Error::UnsupportedAggregation {
            func,
            data_type: self.data_type(),
        };

        match func {
            AggFn::Count => {
                return Ok(Column::int(
                    partitions.iter().map(|ix| ix.len() as i64).collect::<Vec<_>>(),
                ));
            }
            AggFn::First | AggFn::Last => {
                let picks: Vec<u32> = partitions
                    .iter()
                    .filter_map(|ix| {
                        let rows = ix.as_slice();
                        let pick = if func == AggFn::First { rows.first() } else { rows.last() };
                        pick.copied()
                    })
                    .collect();
                return Ok(self.subset(&picks));
            }
            _ => {}
        }

        let column = match (&self.data, func) {
            (ColumnData::Int(v), AggFn::Sum) => Column::int(reduce(partitions, |ix| {
                ix.iter().fold(0i64, |acc, p| acc.wrapping_add(v[p]))
            })),
            (ColumnData::Int(v), AggFn::Min) => Column::int(reduce(partitions, |ix| {
                ix.iter().map(|p| v[p]).min().unwrap_or_default()
            })),
            (ColumnData::Int(v), AggFn::Max) => Column::int(reduce(partitions, |ix| {
                ix.iter().map(|p| v[p]).max().unwrap_or_default()
            })),
            (ColumnData::Int(v), AggFn::Mean) => Column::float(reduce(partitions, |ix| {
                mean_of(ix.iter().map(|p| v[p] as f64))
            })),
            (ColumnData::Float(v), AggFn::Sum) => Column::float(reduce(partitions, |ix| {
                let mut present = ix.iter().map(|p| v[p]).filter(|x| !x.is_nan()).peekable();
                if present.peek().is_none() { f64::NAN } else { present.sum() }
            })),
            (ColumnData::Float(v), AggFn::Mean) => Column::float(reduce(partitions, |ix| {
                mean_of(ix.iter().map(|p| v[p]).filter(|x| !x.is_nan()))
            })),
            (ColumnData::Float(v), AggFn::Min) => Column::float(reduce(partitions, |ix| {
                ix.iter().map(|p| v[p]).fold(f64::NAN, f64::min)
            })),
            (ColumnData::Float(v), AggFn::Max) => Column::float(reduce(partitions, |ix| {
                ix.iter().map(|p| v[p]).fold(f64::NAN, f64::max)
            })),
            (ColumnData::Bool(v), AggFn::Any) => {
                Column::bool(partitions.iter().map(|ix| ix.iter().any(|p| v[p])))
            }
            (ColumnData::Bool(v), AggFn::All) => {
                Column::bool(partitions.iter().map(|ix| ix.iter().all(|p| v[p])))
            }
            (ColumnData::Text(v), AggFn::Min | AggFn::Max) => {
                Column::from_texts(reduce(partitions, |ix| {
                    let present = ix.iter().filter_map(|p| v[p].as_ref());
                    let pick = if func == AggFn::Min { present.min() } else { present.max() };
                    pick.cloned()
                }))
            }
            (ColumnData::Enum { codes, dict }, AggFn::Min | AggFn::Max) if dict.is_strict() => {
                let codes = reduce(partitions, |ix| {
                    let present = ix.iter().map(|p| codes[p]).filter(|&c| c != NULL_CODE);
                    let pick = if func == AggFn::Min { present.min() } else { present.max() };
                    pick.unwrap_or(NULL_CODE)
                });
                Column {
                    data: ColumnData::Enum {
                        codes: codes.into(),
                        dict: Arc::clone(dict),
                    },
                }
            }
            _ => return Err(unsupported()),
        };
        Ok(column)
    }
}

fn reduce<T>(partitions: &[Index], f: impl FnMut(&Index) -> T) -> Vec<T> {
    partitions.iter().map(f).collect()
}

fn mean_of(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, n) = values.fold((0.0, 0usize), |(sum, n), x| (sum + x, n + 1));
    if n == 0 { f64::NAN } else { sum / n as f64 }
}

/// Keeps a set mask bit only if `keep` accepts the row at that position.
fn refine(index: &Index, mask: &mut BitSlice, mut keep: impl FnMut(usize) -> bool) {
    for (i, pos) in index.iter().enumerate() {
        if mask[i] {
            mask.set(i, keep(pos));
        }
    }
}

fn is_comparison(comparator: Comparator) -> bool {
    matches!(
        comparator,
        Comparator::Eq
            | Comparator::Ne
            | Comparator::Gt
            | Comparator::Ge
            | Comparator::Lt
            | Comparator::Le
    )
}

fn is_membership(comparator: Comparator) -> bool {
    matches!(comparator, Comparator::In | Comparator::NotIn)
}

fn is_pattern(comparator: Comparator) -> bool {
    matches!(comparator, Comparator::Like | Comparator::ILike)
}

fn matches_ordering(comparator: Comparator, ord: Ordering) -> bool {
    match comparator {
        Comparator::Eq => ord == Ordering::Equal,
        Comparator::Ne => ord != Ordering::Equal,
        Comparator::Gt => ord == Ordering::Greater,
        Comparator::Ge => ord != Ordering::Less,
        Comparator::Lt => ord == Ordering::Less,
        Comparator::Le => ord != Ordering::Greater,
        _ => false,
    }
}

enum EnumFilterError {
    Unsupported(&'static str),
    Invalid(String),
}

/// Evaluates a literal predicate once per dictionary code. The null code
/// never matches.
fn enum_accept_table(
    dict: &Dictionary,
    comparator: Comparator,
    operand: Operand<'_>,
) -> std::result::Result<[bool; 256], EnumFilterError> {
    let mut accept = [false; 256];
    let codes = 0..dict.len();

    match operand {
        Operand::Value(v) if is_comparison(comparator) => {
            if comparator.is_ordering() && !dict.is_strict() {
                return Err(EnumFilterError::Unsupported(
                    "ordering needs an enum with a fixed dictionary",
                ));
            }
            let value = v
                .as_str()
                .ok_or(EnumFilterError::Unsupported("expected a text argument"))?;
            let rhs = dict
                .code(value)
                .ok_or_else(|| EnumFilterError::Invalid(value.to_string()))?;
            for code in codes {
                accept[code] = matches_ordering(comparator, (code as u8).cmp(&rhs));
            }
        }
        Operand::Value(v) if is_pattern(comparator) => {
            let pattern = v
                .as_str()
                .ok_or(EnumFilterError::Unsupported("expected a text pattern"))?;
            let ci = comparator == Comparator::ILike;
            for (code, value) in dict.values().iter().enumerate() {
                accept[code] = like_match(value, pattern, ci);
            }
        }
        Operand::Values(vs) if is_membership(comparator) => {
            let want = comparator == Comparator::In;
            let wanted = vs
                .iter()
                .map(|v| v.as_str().ok_or(EnumFilterError::Unsupported("expected text arguments")))
                .collect::<std::result::Result<HashSet<&str>, _>>()?;
            for (code, value) in dict.values().iter().enumerate() {
                accept[code] = wanted.contains(value.as_ref()) == want;
            }
        }
        _ => return Err(EnumFilterError::Unsupported("comparator not defined for enum")),
    }
    Ok(accept)
}

#[derive(Debug, Clone, Copy)]
enum Keys<'a> {
    Int(&'a [i64]),
    Float(&'a [f64]),
    Bool(&'a BitSlice),
    Text(&'a [Text]),
    Codes(&'a [u8]),
    EnumText(&'a [u8], &'a Dictionary),
}

/// Orders two rows of one column by raw row position.
#[derive(Debug, Clone, Copy)]
pub struct Comparable<'a> {
    keys: Keys<'a>,
    reverse: bool,
}

impl Comparable<'_> {
    pub fn compare(&self, a: usize, b: usize) -> Ordering {
        let ord = match self.keys {
            Keys::Int(v) => v[a].cmp(&v[b]),
            Keys::Float(v) => compare_floats(v[a], v[b]),
            Keys::Bool(v) => v[a].cmp(&v[b]),
            Keys::Text(v) => v[a].cmp(&v[b]),
            Keys::Codes(v) => code_key(v[a]).cmp(&code_key(v[b])),
            Keys::EnumText(v, dict) => dict.value(v[a]).cmp(&dict.value(v[b])),
        };
        if self.reverse { ord.reverse() } else { ord }
    }
}

fn code_key(code: u8) -> Option<u8> {
    (code != NULL_CODE).then_some(code)
}

fn compare_floats(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
    }
}
