//! Typed element access: element-wise transforms and read-only views.
//!
//! The closed set of element types is `i64`, `f64`, `bool` and [`Text`].
//! Categorical columns are read as [`Text`]; transforms always produce plain
//! (non-categorical) columns.

use std::marker::PhantomData;
use std::sync::Arc;

use crate::column::{Column, ColumnData, Text};
use crate::data_type::DataType;
use crate::error::{Error, Result};
use crate::index::Index;

/// A value type that can be read from and collected into a column.
pub trait Element: Sized {
    /// Name used in type mismatch errors.
    const NAME: &'static str;

    /// Whether columns of `data_type` can be read as this element.
    fn accepts(data_type: DataType) -> bool;

    /// Reads the row at `pos`. Rows of a column this element does not
    /// accept read as [Element::fill].
    fn at(column: &Column, pos: usize) -> Self;

    /// Value written to rows a transform does not visit.
    fn fill() -> Self;

    fn into_column(values: Vec<Self>) -> Column;
}

impl Element for i64 {
    const NAME: &'static str = "int";

    fn accepts(data_type: DataType) -> bool {
        data_type == DataType::Int
    }

    fn at(column: &Column, pos: usize) -> Self {
        match column.data() {
            ColumnData::Int(v) => v[pos],
            _ => Self::fill(),
        }
    }

    fn fill() -> Self {
        0
    }

    fn into_column(values: Vec<Self>) -> Column {
        Column::int(values)
    }
}

impl Element for f64 {
    const NAME: &'static str = "float";

    fn accepts(data_type: DataType) -> bool {
        data_type == DataType::Float
    }

    fn at(column: &Column, pos: usize) -> Self {
        match column.data() {
            ColumnData::Float(v) => v[pos],
            _ => Self::fill(),
        }
    }

    fn fill() -> Self {
        f64::NAN
    }

    fn into_column(values: Vec<Self>) -> Column {
        Column::float(values)
    }
}

impl Element for bool {
    const NAME: &'static str = "bool";

    fn accepts(data_type: DataType) -> bool {
        data_type == DataType::Bool
    }

    fn at(column: &Column, pos: usize) -> Self {
        match column.data() {
            ColumnData::Bool(v) => v[pos],
            _ => Self::fill(),
        }
    }

    fn fill() -> Self {
        false
    }

    fn into_column(values: Vec<Self>) -> Column {
        Column::bool(values)
    }
}

impl Element for Text {
    const NAME: &'static str = "text";

    fn accepts(data_type: DataType) -> bool {
        matches!(data_type, DataType::Text | DataType::Enum)
    }

    fn at(column: &Column, pos: usize) -> Self {
        match column.data() {
            ColumnData::Text(v) => v[pos].clone(),
            ColumnData::Enum { codes, dict } => dict.value(codes[pos]).map(Arc::clone),
            _ => Self::fill(),
        }
    }

    fn fill() -> Self {
        None
    }

    fn into_column(values: Vec<Self>) -> Column {
        Column::from_texts(values)
    }
}

/// Fails with [Error::TypeMismatch] unless `column` can be read as `T`.
pub(crate) fn check_element<T: Element>(name: &str, column: &Column) -> Result<()> {
    if T::accepts(column.data_type()) {
        Ok(())
    } else {
        Err(Error::TypeMismatch {
            column: name.to_string(),
            expected: T::NAME,
            actual: column.data_type(),
        })
    }
}

/// A column of `len` rows where every row visited by `index` holds a fresh
/// call of `f`, in index order.
pub(crate) fn generate<O: Element>(len: usize, index: &Index, mut f: impl FnMut() -> O) -> Column {
    let mut out: Vec<O> = (0..len).map(|_| O::fill()).collect();
    for pos in index.iter() {
        out[pos] = f();
    }
    O::into_column(out)
}

impl Column {
    /// Applies `f` to the rows visited by `index`.
    ///
    /// The result has the length of the column storage so that it lines up
    /// with the same index; rows not visited hold [Element::fill].
    pub fn apply1<I: Element, O: Element>(&self, index: &Index, mut f: impl FnMut(I) -> O) -> Vec<O> {
        let mut out: Vec<O> = (0..self.len()).map(|_| O::fill()).collect();
        for pos in index.iter() {
            out[pos] = f(I::at(self, pos));
        }
        out
    }

    /// Applies `f` pairwise to this column and `other` at the rows visited by `index`.
    pub fn apply2<A: Element, B: Element, O: Element>(
        &self,
        other: &Column,
        index: &Index,
        mut f: impl FnMut(A, B) -> O,
    ) -> Column {
        let mut out: Vec<O> = (0..self.len()).map(|_| O::fill()).collect();
        for pos in index.iter() {
            out[pos] = f(A::at(self, pos), B::at(other, pos));
        }
        O::into_column(out)
    }
}

/// A read-only, typed view of one column in table row order.
#[derive(Debug, Clone)]
pub struct View<'a, T> {
    column: &'a Column,
    index: Index,
    _element: PhantomData<T>,
}

impl<'a, T: Element> View<'a, T> {
    pub(crate) fn new(column: &'a Column, index: Index) -> Self {
        Self {
            column,
            index,
            _element: PhantomData,
        }
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Element at row `i` of the view.
    pub fn get(&self, i: usize) -> Option<T> {
        self.index.get(i).map(|pos| T::at(self.column, pos))
    }

    pub fn iter(&self) -> impl Iterator<Item = T> + '_ {
        self.index.iter().map(|pos| T::at(self.column, pos))
    }

    pub fn to_vec(&self) -> Vec<T> {
        self.iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply1_changes_type_and_fills_unvisited() {
        let ints = Column::int(vec![1, 2, 3]);
        let index = Index::from(vec![2, 0]);
        let halves: Vec<f64> = ints.apply1(&index, |x: i64| x as f64 / 2.0);
        assert_eq!(halves[0], 0.5);
        assert!(halves[1].is_nan());
        assert_eq!(halves[2], 1.5);
    }

    #[test]
    fn test_apply1_reads_enum_as_text() {
        let enums = Column::categorical([Some("a"), None], None).unwrap();
        let lens: Vec<i64> = enums.apply1(&Index::ascending(2), |s: Text| {
            s.map_or(-1, |s| s.len() as i64)
        });
        assert_eq!(lens, vec![1, -1]);
    }

    #[test]
    fn test_apply2_allocates_new_storage() {
        let a = Column::int(vec![1, 2]);
        let b = Column::float(vec![0.5, 0.25]);
        let out = a.apply2(&b, &Index::ascending(2), |x: i64, y: f64| x as f64 * y);
        assert_eq!(out.data_type(), DataType::Float);
        assert_eq!(out.render(1, ""), "0.5");
        assert!(!out.shares_storage(&b));
    }

    #[test]
    fn test_view_follows_index() {
        let texts = Column::text([Some("x"), None, Some("z")]);
        let view: View<'_, Text> = View::new(&texts, Index::from(vec![2, 1]));
        assert_eq!(view.len(), 2);
        assert_eq!(view.get(0).flatten().as_deref(), Some("z"));
        assert_eq!(view.get(1), Some(None));
        assert_eq!(view.get(2), None);
    }

    #[test]
    fn test_generate_calls_once_per_visited_row() {
        let mut calls = 0i64;
        let column = generate(4, &Index::from(vec![3, 1]), || {
            calls += 1;
            calls
        });
        assert_eq!(calls, 2);
        assert_eq!(column.render(3, ""), "1");
        assert_eq!(column.render(1, ""), "2");
        assert_eq!(column.render(0, ""), "0");
    }

    #[test]
    fn test_check_element() {
        let ints = Column::int(vec![1]);
        assert!(check_element::<i64>("n", &ints).is_ok());
        assert_eq!(
            check_element::<bool>("n", &ints).unwrap_err(),
            Error::TypeMismatch {
                column: "n".into(),
                expected: "bool",
                actual: DataType::Int
            }
        );
    }
}
