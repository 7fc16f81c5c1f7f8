use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::ops::Range;
use std::sync::Arc;

use bitvec::prelude::*;
use tracing::{debug, trace};

use crate::apply::{Element, View, check_element, generate};
use crate::column::{Column, Comparable, Operand};
use crate::config::Config;
use crate::data_type::DataType;
use crate::error::{Error, Result};
use crate::filter::{Arg, Clause, Filter};
use crate::group::Grouper;
use crate::index::{Index, MAX_ROWS};
use crate::value::Value;

/// Input for one column of a new table.
#[derive(Debug, Clone)]
pub enum Data {
    Int(Vec<i64>),
    Float(Vec<f64>),
    Bool(Vec<bool>),
    Text(Vec<Option<String>>),
    ConstInt { value: i64, count: usize },
    ConstFloat { value: f64, count: usize },
    ConstBool { value: bool, count: usize },
    ConstText { value: Option<String>, count: usize },
    /// Text stored in one buffer, one optional byte span per row.
    TextBlob {
        data: String,
        spans: Vec<Option<Range<usize>>>,
    },
    /// A column built beforehand, typically a categorical one.
    Column(Column),
}

impl Data {
    /// Number of rows described.
    pub fn len(&self) -> usize {
        match self {
            Self::Int(v) => v.len(),
            Self::Float(v) => v.len(),
            Self::Bool(v) => v.len(),
            Self::Text(v) => v.len(),
            Self::ConstInt { count, .. }
            | Self::ConstFloat { count, .. }
            | Self::ConstBool { count, .. }
            | Self::ConstText { count, .. } => *count,
            Self::TextBlob { spans, .. } => spans.len(),
            Self::Column(c) => c.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<Vec<i64>> for Data {
    fn from(v: Vec<i64>) -> Self {
        Self::Int(v)
    }
}

impl From<Vec<f64>> for Data {
    fn from(v: Vec<f64>) -> Self {
        Self::Float(v)
    }
}

impl From<Vec<bool>> for Data {
    fn from(v: Vec<bool>) -> Self {
        Self::Bool(v)
    }
}

impl From<Vec<&str>> for Data {
    fn from(v: Vec<&str>) -> Self {
        Self::Text(v.into_iter().map(|s| Some(s.to_string())).collect())
    }
}

impl From<Vec<Option<&str>>> for Data {
    fn from(v: Vec<Option<&str>>) -> Self {
        Self::Text(v.into_iter().map(|s| s.map(str::to_string)).collect())
    }
}

impl From<Column> for Data {
    fn from(c: Column) -> Self {
        Self::Column(c)
    }
}

/// One sort key.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub column: String,
    pub reverse: bool,
    /// Compare categorical values by their text instead of dictionary order.
    pub by_text: bool,
}

impl Order {
    pub fn asc(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            reverse: false,
            by_text: false,
        }
    }

    pub fn desc(column: impl Into<String>) -> Self {
        Self {
            reverse: true,
            ..Self::asc(column)
        }
    }

    pub fn by_text(mut self) -> Self {
        self.by_text = true;
        self
    }
}

#[derive(Debug, Clone)]
pub(crate) struct NamedColumn {
    pub(crate) name: String,
    pub(crate) column: Column,
}

/// The columns and row index of a table that has not failed.
#[derive(Debug, Clone)]
pub(crate) struct Frame {
    columns: Arc<Vec<NamedColumn>>,
    by_name: Arc<HashMap<String, usize>>,
    /// Storage length shared by all columns.
    rows: usize,
    pub(crate) index: Index,
}

impl Frame {
    pub(crate) fn new(columns: Vec<NamedColumn>, rows: usize, index: Index) -> Self {
        let by_name = columns
            .iter()
            .enumerate()
            .map(|(i, c)| (c.name.clone(), i))
            .collect();
        Self {
            columns: Arc::new(columns),
            by_name: Arc::new(by_name),
            rows,
            index,
        }
    }

    fn empty() -> Self {
        Self::new(Vec::new(), 0, Index::ascending(0))
    }

    pub(crate) fn column(&self, name: &str) -> Result<&Column> {
        self.by_name
            .get(name)
            .map(|&i| &self.columns[i].column)
            .ok_or_else(|| Error::UnknownColumn(name.to_string()))
    }

    pub(crate) fn check_columns<S: AsRef<str>>(&self, names: &[S]) -> Result<()> {
        names.iter().try_for_each(|name| self.column(name.as_ref()).map(|_| ()))
    }

    pub(crate) fn names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    fn with_index(&self, index: Index) -> Self {
        Self {
            columns: Arc::clone(&self.columns),
            by_name: Arc::clone(&self.by_name),
            rows: self.rows,
            index,
        }
    }

    /// Adds `column` as `name`, replacing an existing column of that name in place.
    fn set_column(&self, name: &str, column: Column) -> Self {
        let mut columns = self.columns.as_ref().clone();
        let named = NamedColumn {
            name: name.to_string(),
            column,
        };
        match self.by_name.get(name) {
            Some(&i) => columns[i] = named,
            None => columns.push(named),
        }
        Self::new(columns, self.rows, self.index.clone())
    }

    fn operand<'a>(&'a self, arg: &'a Arg) -> Result<Operand<'a>> {
        Ok(match arg {
            Arg::None => Operand::None,
            Arg::Value(v) => Operand::Value(v),
            Arg::Values(vs) => Operand::Values(vs),
            Arg::Column(name) => Operand::Column(self.column(name)?),
        })
    }

    /// Mask over the index of the rows that pass every filter.
    fn filter_mask(&self, filters: &[Filter]) -> Result<BitVec> {
        let mut mask = bitvec![1; self.index.len()];
        for filter in filters {
            let column = self.column(&filter.column)?;
            let operand = self.operand(&filter.arg)?;

            match (filter.inverse, filter.comparator.inverse()) {
                (false, _) => column.filter(&self.index, filter.comparator, operand, &mut mask)?,
                (true, Some(inverse)) => {
                    column.filter(&self.index, inverse, operand, &mut mask)?
                }
                (true, None) => {
                    let mut rejected = mask.clone();
                    column.filter(&self.index, filter.comparator, operand, &mut rejected)?;
                    for i in rejected.iter_ones() {
                        mask.set(i, false);
                    }
                }
            }
        }
        Ok(mask)
    }

    fn clause_mask(&self, clause: &Clause) -> Result<BitVec> {
        let len = self.index.len();
        match clause {
            Clause::Filter(filter) => self.filter_mask(std::slice::from_ref(filter)),
            Clause::And(clauses) => {
                let mut mask = bitvec![1; len];
                for clause in clauses {
                    for i in self.clause_mask(clause)?.iter_zeros() {
                        mask.set(i, false);
                    }
                }
                Ok(mask)
            }
            Clause::Or(clauses) => {
                let mut mask = bitvec![0; len];
                for clause in clauses {
                    for i in self.clause_mask(clause)?.iter_ones() {
                        mask.set(i, true);
                    }
                }
                Ok(mask)
            }
            Clause::Not(clause) => Ok(!self.clause_mask(clause)?),
        }
    }

    /// Copy of the index, stably sorted on `orders`.
    pub(crate) fn sorted_index(&self, orders: &[Order]) -> Result<Index> {
        let comparables = orders
            .iter()
            .map(|o| Ok(self.column(&o.column)?.comparable(o.reverse, o.by_text)))
            .collect::<Result<Vec<_>>>()?;

        let mut positions = self.index.copy();
        positions.sort_by(|&a, &b| compare_rows(&comparables, a as usize, b as usize));
        Ok(positions.into())
    }
}

/// First non-equal result over the keys, in key priority order.
pub(crate) fn compare_rows(comparables: &[Comparable<'_>], a: usize, b: usize) -> Ordering {
    comparables
        .iter()
        .map(|c| c.compare(a, b))
        .find(|ord| ord.is_ne())
        .unwrap_or(Ordering::Equal)
}

/// An immutable table of named columns viewed through a row index.
///
/// Every operation returns a new table that shares unchanged column storage
/// with its parent. A failing operation returns a table carrying the error;
/// every operation on such a table returns it unchanged.
///
/// # Example
/// ```
/// use colframe::{Comparator, Config, Data, Filter, Table, aggregation::sum};
///
/// let table = Table::new(
///     [
///         ("grp", Data::from(vec!["a", "a", "b", "b", "a"])),
///         ("val", Data::from(vec![1i64, 2, 3, 4, 5])),
///     ],
///     Config::new(),
/// );
/// let sums = table
///     .filter(&[Filter::new("val", Comparator::Gt, 1)])
///     .group_by(&["grp"])
///     .aggregate(&[sum("val")]);
/// assert_eq!(sums.view::<i64>("val").unwrap().to_vec(), vec![7, 7]);
/// ```
#[derive(Debug, Clone)]
pub struct Table {
    frame: std::result::Result<Frame, Error>,
}

impl Table {
    /// Builds a table from named column data.
    ///
    /// Columns keep the order in which they are supplied unless `config`
    /// fixes an order. Text data named by an enum entry of `config` is stored
    /// as a categorical column.
    pub fn new<N: Into<String>>(data: impl IntoIterator<Item = (N, Data)>, config: Config) -> Self {
        match build_frame(data, config) {
            Ok(frame) => Self::from_frame(frame),
            Err(error) => {
                debug!(op = "new", %error, "table operation failed");
                Self::from_error(error)
            }
        }
    }

    pub(crate) fn from_frame(frame: Frame) -> Self {
        Self { frame: Ok(frame) }
    }

    pub(crate) fn from_error(error: Error) -> Self {
        Self { frame: Err(error) }
    }

    pub(crate) fn frame(&self) -> std::result::Result<&Frame, &Error> {
        self.frame.as_ref()
    }

    /// Runs `op` on a healthy table; a failed table is returned unchanged.
    fn transform(&self, name: &'static str, op: impl FnOnce(&Frame) -> Result<Frame>) -> Self {
        let Ok(frame) = &self.frame else {
            return self.clone();
        };
        match op(frame) {
            Ok(frame) => {
                trace!(op = name, rows = frame.index.len(), "table operation");
                Self::from_frame(frame)
            }
            Err(error) => {
                debug!(op = name, %error, "table operation failed");
                Self::from_error(error)
            }
        }
    }

    /// The error this table carries, if an operation leading to it failed.
    pub fn err(&self) -> Option<&Error> {
        self.frame.as_ref().err()
    }

    pub fn is_ok(&self) -> bool {
        self.frame.is_ok()
    }

    /// Number of rows, 0 for a failed table.
    pub fn len(&self) -> usize {
        self.frame.as_ref().map_or(0, |f| f.index.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, name: &str) -> bool {
        self.frame
            .as_ref()
            .is_ok_and(|f| f.by_name.contains_key(name))
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.frame
            .as_ref()
            .map_or_else(|_| Vec::new(), |f| f.names().collect())
    }

    pub fn column_types(&self) -> Vec<DataType> {
        self.frame.as_ref().map_or_else(
            |_| Vec::new(),
            |f| f.columns.iter().map(|c| c.column.data_type()).collect(),
        )
    }

    /// The named column, read through [Table::row_positions].
    pub fn column(&self, name: &str) -> Result<&Column> {
        self.frame.as_ref().map_err(Clone::clone)?.column(name)
    }

    /// The storage row positions visited, in table order.
    pub fn row_positions(&self) -> &[u32] {
        self.frame.as_ref().map_or(&[][..], |f| f.index.as_slice())
    }

    /// Keeps the rows passing every filter.
    ///
    /// A filter with `inverse` set keeps the rows it would reject. When the
    /// comparator has a built-in inverse that comparator is used directly,
    /// otherwise the rejected rows are computed and removed.
    ///
    /// # Example
    /// ```
    /// use colframe::{Comparator, Config, Data, Filter, Table};
    ///
    /// let table = Table::new([("val", Data::from(vec![1i64, 2, 3, 4, 5]))], Config::new());
    /// let gt = table.filter(&[Filter::new("val", Comparator::Gt, 2)]);
    /// assert_eq!(gt.row_positions(), &[2, 3, 4]);
    /// let not_gt = table.filter(&[Filter::new("val", Comparator::Gt, 2).inverted()]);
    /// assert_eq!(not_gt.row_positions(), &[0, 1]);
    /// ```
    pub fn filter(&self, filters: &[Filter]) -> Self {
        self.transform("filter", |frame| {
            let mask = frame.filter_mask(filters)?;
            Ok(frame.with_index(frame.index.from_mask(&mask)))
        })
    }

    /// Keeps the rows satisfying a boolean combination of filters.
    pub fn filter_clause(&self, clause: &Clause) -> Self {
        self.transform("filter_clause", |frame| {
            let mask = frame.clause_mask(clause)?;
            Ok(frame.with_index(frame.index.from_mask(&mask)))
        })
    }

    /// Stably sorts the rows; earlier orders take priority.
    pub fn sort(&self, orders: &[Order]) -> Self {
        self.transform("sort", |frame| {
            if orders.is_empty() {
                return Ok(frame.clone());
            }
            Ok(frame.with_index(frame.sorted_index(orders)?))
        })
    }

    /// Keeps one row per distinct combination of `columns`, all columns if empty.
    ///
    /// Rows come out sorted ascending on `columns`, not in their original
    /// order; the first row of each run of equal rows is kept.
    pub fn distinct<S: AsRef<str>>(&self, columns: &[S]) -> Self {
        self.transform("distinct", |frame| {
            frame.check_columns(columns)?;
            let keys: Vec<&str> = if columns.is_empty() {
                frame.names().collect()
            } else {
                columns.iter().map(AsRef::as_ref).collect()
            };
            let partitions = frame.partition(&keys)?;
            let firsts: Vec<u32> = partitions
                .iter()
                .filter_map(|p| p.as_slice().first().copied())
                .collect();
            Ok(frame.with_index(firsts.into()))
        })
    }

    /// Keeps the named columns in the given order, sharing their storage.
    pub fn select<S: AsRef<str>>(&self, columns: &[S]) -> Self {
        self.transform("select", |frame| {
            frame.check_columns(columns)?;
            if columns.is_empty() {
                return Ok(Frame::empty());
            }
            let mut seen = HashSet::new();
            let selected = columns
                .iter()
                .map(|name| {
                    let name = name.as_ref();
                    if !seen.insert(name) {
                        return Err(Error::DuplicateColumn(name.to_string()));
                    }
                    Ok(NamedColumn {
                        name: name.to_string(),
                        column: frame.column(name)?.clone(),
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            Ok(Frame::new(selected, frame.rows, frame.index.clone()))
        })
    }

    /// Keeps rows `start..end` of the current order.
    pub fn slice(&self, start: usize, end: usize) -> Self {
        self.transform("slice", |frame| Ok(frame.with_index(frame.index.slice(start, end)?)))
    }

    /// Makes `dst` refer to the same storage as `src`.
    pub fn copy_column(&self, dst: &str, src: &str) -> Self {
        self.transform("copy_column", |frame| {
            let column = frame.column(src)?.clone();
            Ok(frame.set_column(dst, column))
        })
    }

    /// Sets `dst` to a constant column.
    pub fn assign_const(&self, dst: &str, value: impl Into<Value>) -> Self {
        let value = value.into();
        self.transform("assign_const", |frame| {
            Ok(frame.set_column(dst, Column::constant(&value, frame.rows)))
        })
    }

    /// Sets `dst` to a column holding one call of `f` per visited row.
    pub fn assign_with<O: Element>(&self, dst: &str, f: impl FnMut() -> O) -> Self {
        self.transform("assign_with", |frame| {
            Ok(frame.set_column(dst, generate(frame.rows, &frame.index, f)))
        })
    }

    /// Runs `assign` on the rows passing `clause`, then restores the full
    /// row index.
    ///
    /// Assigned columns hold the element default in rows outside the
    /// clause, also when they replace an existing column.
    ///
    /// # Example
    /// ```
    /// use colframe::{Comparator, Config, Data, Filter, Table};
    ///
    /// let table = Table::new([("n", Data::from(vec![1i64, 5, 9]))], Config::new());
    /// let capped = table.filtered_assign(&Filter::new("n", Comparator::Gt, 4).into(), |rows| {
    ///     rows.apply1("big", "n", |n: i64| n * 10)
    /// });
    /// assert_eq!(capped.len(), 3);
    /// assert_eq!(capped.view::<i64>("big").unwrap().to_vec(), vec![0, 50, 90]);
    /// ```
    pub fn filtered_assign(&self, clause: &Clause, assign: impl FnOnce(Assigner) -> Assigner) -> Self {
        self.transform("filtered_assign", |frame| {
            let mask = frame.clause_mask(clause)?;
            let scoped = Self::from_frame(frame.with_index(frame.index.from_mask(&mask)));
            let assigned = assign(Assigner { table: scoped }).table.frame?;
            Ok(assigned.with_index(frame.index.clone()))
        })
    }

    /// Sets `dst` to `f` applied to every visited row of `src`.
    ///
    /// # Example
    /// ```
    /// use colframe::{Config, Data, Table};
    ///
    /// let table = Table::new([("n", Data::from(vec![1i64, 2]))], Config::new());
    /// let doubled = table.apply1("n2", "n", |n: i64| n as f64 * 2.0);
    /// assert_eq!(doubled.view::<f64>("n2").unwrap().to_vec(), vec![2.0, 4.0]);
    /// ```
    pub fn apply1<I: Element, O: Element>(&self, dst: &str, src: &str, f: impl FnMut(I) -> O) -> Self {
        self.transform("apply1", |frame| {
            let column = frame.column(src)?;
            check_element::<I>(src, column)?;
            let values = column.apply1(&frame.index, f);
            Ok(frame.set_column(dst, O::into_column(values)))
        })
    }

    /// Sets `dst` to `f` applied pairwise to every visited row of `src1` and `src2`.
    pub fn apply2<A: Element, B: Element, O: Element>(
        &self,
        dst: &str,
        src1: &str,
        src2: &str,
        f: impl FnMut(A, B) -> O,
    ) -> Self {
        self.transform("apply2", |frame| {
            let first = frame.column(src1)?;
            let second = frame.column(src2)?;
            check_element::<A>(src1, first)?;
            check_element::<B>(src2, second)?;
            Ok(frame.set_column(dst, first.apply2(second, &frame.index, f)))
        })
    }

    /// Partitions the rows on `columns`; no columns yields one group of all rows.
    pub fn group_by<S: AsRef<str>>(&self, columns: &[S]) -> Grouper {
        Grouper::new(self, columns)
    }

    /// A typed, read-only view of one column in row order.
    pub fn view<T: Element>(&self, name: &str) -> Result<View<'_, T>> {
        let frame = self.frame.as_ref().map_err(Clone::clone)?;
        let column = frame.column(name)?;
        check_element::<T>(name, column)?;
        Ok(View::new(column, frame.index.clone()))
    }

    /// Compares names, column order and the values of every visited row.
    /// Two failed tables are equal if they carry the same error.
    pub fn equals(&self, other: &Table) -> bool {
        match (&self.frame, &other.frame) {
            (Ok(a), Ok(b)) => {
                a.index.len() == b.index.len()
                    && a.columns.len() == b.columns.len()
                    && a.columns.iter().zip(b.columns.iter()).all(|(x, y)| {
                        x.name == y.name && x.column.equals(&a.index, &y.column, &b.index)
                    })
            }
            (Err(a), Err(b)) => a == b,
            _ => false,
        }
    }
}

/// The assignments available inside [Table::filtered_assign].
#[derive(Debug, Clone)]
pub struct Assigner {
    table: Table,
}

impl Assigner {
    pub fn assign_with<O: Element>(self, dst: &str, f: impl FnMut() -> O) -> Self {
        Self {
            table: self.table.assign_with(dst, f),
        }
    }

    pub fn apply1<I: Element, O: Element>(self, dst: &str, src: &str, f: impl FnMut(I) -> O) -> Self {
        Self {
            table: self.table.apply1(dst, src, f),
        }
    }

    pub fn apply2<A: Element, B: Element, O: Element>(
        self,
        dst: &str,
        src1: &str,
        src2: &str,
        f: impl FnMut(A, B) -> O,
    ) -> Self {
        Self {
            table: self.table.apply2(dst, src1, src2, f),
        }
    }
}

impl PartialEq for Table {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

fn build_frame<N: Into<String>>(
    data: impl IntoIterator<Item = (N, Data)>,
    mut config: Config,
) -> Result<Frame> {
    let mut supplied: Vec<String> = Vec::new();
    let mut by_name: HashMap<String, Data> = HashMap::new();
    for (name, values) in data {
        let name = name.into();
        if by_name.insert(name.clone(), values).is_some() {
            return Err(Error::DuplicateColumn(name));
        }
        supplied.push(name);
    }

    let order = match config.order() {
        Some(order) => {
            let mut seen = HashSet::new();
            for name in order {
                if !seen.insert(name.as_str()) {
                    return Err(Error::DuplicateColumn(name.clone()));
                }
                if !by_name.contains_key(name) {
                    return Err(Error::UnknownColumn(name.clone()));
                }
            }
            if let Some(missing) = supplied.iter().find(|n| !seen.contains(n.as_str())) {
                return Err(Error::UnknownColumn(missing.clone()));
            }
            order.to_vec()
        }
        None => supplied,
    };

    let mut enums = config.take_enum_columns();
    let mut columns = Vec::with_capacity(order.len());
    let mut rows = None;
    for name in order {
        let Some(values) = by_name.remove(&name) else {
            return Err(Error::UnknownColumn(name));
        };
        if values.len() > MAX_ROWS {
            return Err(Error::TooManyRows(values.len()));
        }
        let column = build_column(&name, values, &mut enums)?;
        match rows {
            None => rows = Some(column.len()),
            Some(expected) if expected != column.len() => {
                return Err(Error::LengthMismatch {
                    column: name,
                    expected,
                    actual: column.len(),
                });
            }
            Some(_) => {}
        }
        columns.push(NamedColumn { name, column });
    }

    if !enums.is_empty() {
        let mut unknown: Vec<String> = enums.into_keys().collect();
        unknown.sort();
        return Err(Error::UnknownEnumColumns(unknown));
    }

    let rows = rows.unwrap_or(0);
    Ok(Frame::new(columns, rows, Index::ascending(rows)))
}

fn build_column(
    name: &str,
    data: Data,
    enums: &mut HashMap<String, Option<Vec<String>>>,
) -> Result<Column> {
    let column = match data {
        Data::Int(v) => Column::int(v),
        Data::Float(v) => Column::float(v),
        Data::Bool(v) => Column::bool(v),
        Data::ConstInt { value, count } => Column::constant(&Value::Int(value), count),
        Data::ConstFloat { value, count } => Column::constant(&Value::Float(value), count),
        Data::ConstBool { value, count } => Column::constant(&Value::Bool(value), count),
        Data::Text(v) => match enums.remove(name) {
            Some(dict) => Column::categorical(v, dict.as_deref())?,
            None => Column::text(v),
        },
        Data::ConstText { value, count } => match enums.remove(name) {
            Some(dict) => Column::categorical(std::iter::repeat_n(value, count), dict.as_deref())?,
            None => Column::constant(&value.map_or(Value::Null, |s| Value::Text(s.into())), count),
        },
        Data::TextBlob { data, spans } => Column::text_blob(&data, &spans)?,
        Data::Column(c) => c,
    };
    Ok(column)
}

/// Right-aligns `s` in a field of `width`, truncating long values.
fn fit(s: &str, pad: char, width: usize) -> String {
    let len = s.chars().count();
    if len > width {
        let kept: String = s.chars().take(width.saturating_sub(3)).collect();
        return kept + "...";
    }
    let mut out: String = std::iter::repeat_n(pad, width - len).collect();
    out.push_str(s);
    out
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let frame = match &self.frame {
            Ok(frame) => frame,
            Err(error) => return write!(f, "{error}"),
        };
        const MIN_WIDTH: usize = 5;
        let widths: Vec<usize> = frame
            .columns
            .iter()
            .map(|c| c.name.chars().count().max(MIN_WIDTH))
            .collect();

        let header: Vec<String> = frame
            .columns
            .iter()
            .zip(&widths)
            .map(|(c, &w)| fit(&c.name, ' ', w))
            .collect();
        writeln!(f, "{}", header.join(" "))?;
        let rule: Vec<String> = widths.iter().map(|&w| fit("", '-', w)).collect();
        write!(f, "{}", rule.join(" "))?;

        for pos in frame.index.iter() {
            let row: Vec<String> = frame
                .columns
                .iter()
                .zip(&widths)
                .map(|(c, &w)| fit(&c.column.render(pos, "NaN"), ' ', w))
                .collect();
            write!(f, "\n{}", row.join(" "))?;
        }
        Ok(())
    }
}
