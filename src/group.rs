//! Grouping and per-group aggregation.

use std::collections::HashSet;

use tracing::{debug, trace};

use crate::aggregation::Aggregation;
use crate::error::{Error, Result};
use crate::index::Index;
use crate::table::{Frame, NamedColumn, Order, Table, compare_rows};

impl Frame {
    /// Splits the rows into runs of equal `keys`, in ascending key order.
    ///
    /// No keys yields one partition holding every row; an empty table yields
    /// no partitions.
    pub(crate) fn partition<S: AsRef<str>>(&self, keys: &[S]) -> Result<Vec<Index>> {
        self.check_columns(keys)?;
        let mut seen: HashSet<&str> = HashSet::new();
        if let Some(repeated) = keys.iter().map(|k| k.as_ref()).find(|k| !seen.insert(*k)) {
            return Err(Error::DuplicateColumn(repeated.to_string()));
        }
        if self.index.is_empty() {
            return Ok(Vec::new());
        }
        if keys.is_empty() {
            return Ok(vec![self.index.clone()]);
        }

        let orders: Vec<Order> = keys.iter().map(|k| Order::asc(k.as_ref())).collect();
        let sorted = self.sorted_index(&orders)?;

        // Trailing keys differ most often, so they are compared first.
        let comparables = keys
            .iter()
            .rev()
            .map(|k| Ok(self.column(k.as_ref())?.comparable(false, false)))
            .collect::<Result<Vec<_>>>()?;

        let rows = sorted.as_slice();
        let mut partitions = Vec::new();
        let mut start = 0;
        for i in 1..rows.len() {
            if compare_rows(&comparables, rows[start] as usize, rows[i] as usize).is_ne() {
                partitions.push(sorted.slice(start, i)?);
                start = i;
            }
        }
        partitions.push(sorted.slice(start, rows.len())?);
        Ok(partitions)
    }
}

#[derive(Debug, Clone)]
struct Groups {
    frame: Frame,
    keys: Vec<String>,
    partitions: Vec<Index>,
}

/// A table split into partitions of rows with equal key values.
///
/// Created by [Table::group_by]. Errors from grouping, or carried by the
/// grouped table, surface in the table returned by [Grouper::aggregate].
#[derive(Debug, Clone)]
pub struct Grouper {
    groups: std::result::Result<Groups, Error>,
}

impl Grouper {
    pub(crate) fn new<S: AsRef<str>>(table: &Table, keys: &[S]) -> Self {
        let groups = match table.frame() {
            Ok(frame) => frame.partition(keys).map(|partitions| Groups {
                frame: frame.clone(),
                keys: keys.iter().map(|k| k.as_ref().to_string()).collect(),
                partitions,
            }),
            Err(error) => Err(error.clone()),
        };
        match &groups {
            Ok(g) => trace!(op = "group_by", groups = g.partitions.len(), "table operation"),
            Err(error) => debug!(op = "group_by", %error, "table operation failed"),
        }
        Self { groups }
    }

    pub fn err(&self) -> Option<&Error> {
        self.groups.as_ref().err()
    }

    /// Number of groups, 0 if grouping failed.
    pub fn len(&self) -> usize {
        self.groups.as_ref().map_or(0, |g| g.partitions.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Row positions of every group, in ascending key order.
    pub fn partitions(&self) -> &[Index] {
        self.groups.as_ref().map_or(&[][..], |g| g.partitions.as_slice())
    }

    /// One row per group: the key columns followed by one column per
    /// aggregation, named after its alias or source column.
    ///
    /// # Errors
    /// The returned table carries [Error::UnknownColumn] for a missing source
    /// column, [Error::UnsupportedAggregation] for a function not defined on
    /// the column type and [Error::DuplicateColumn] if two output columns
    /// share a name.
    pub fn aggregate(&self, aggregations: &[Aggregation]) -> Table {
        let groups = match &self.groups {
            Ok(groups) => groups,
            Err(error) => return Table::from_error(error.clone()),
        };
        match groups.aggregate(aggregations) {
            Ok(frame) => {
                trace!(op = "aggregate", rows = frame.index.len(), "table operation");
                Table::from_frame(frame)
            }
            Err(error) => {
                debug!(op = "aggregate", %error, "table operation failed");
                Table::from_error(error)
            }
        }
    }
}

impl Groups {
    fn aggregate(&self, aggregations: &[Aggregation]) -> Result<Frame> {
        let firsts: Vec<u32> = self
            .partitions
            .iter()
            .filter_map(|p| p.as_slice().first().copied())
            .collect();

        let mut seen: HashSet<&str> = HashSet::new();
        let mut columns = Vec::with_capacity(self.keys.len() + aggregations.len());
        for key in &self.keys {
            if !seen.insert(key) {
                return Err(Error::DuplicateColumn(key.clone()));
            }
            columns.push(NamedColumn {
                name: key.clone(),
                column: self.frame.column(key)?.subset(&firsts),
            });
        }
        for aggregation in aggregations {
            let name = aggregation.output_name();
            if !seen.insert(name) {
                return Err(Error::DuplicateColumn(name.to_string()));
            }
            let source = self.frame.column(&aggregation.column)?;
            columns.push(NamedColumn {
                name: name.to_string(),
                column: source.aggregate(&self.partitions, aggregation.func)?,
            });
        }

        let rows = self.partitions.len();
        Ok(Frame::new(columns, rows, Index::ascending(rows)))
    }
}

#[cfg(test)]
mod tests {
    use crate::aggregation::{AggFn, Aggregation, all, any, count, first, last, max, mean, sum};
    use crate::config::Config;
    use crate::data_type::DataType;
    use crate::error::Error;
    use crate::filter::{Comparator, Filter};
    use crate::table::{Data, Table};

    fn sample() -> Table {
        Table::new(
            [
                ("grp", Data::from(vec!["a", "a", "b", "b", "a"])),
                ("val", Data::from(vec![1i64, 2, 3, 4, 5])),
                ("score", Data::from(vec![1.0, f64::NAN, 2.0, 4.0, 3.0])),
            ],
            Config::new(),
        )
    }

    #[test]
    fn test_group_sum() {
        let sums = sample().group_by(&["grp"]).aggregate(&[sum("val")]);
        assert_eq!(sums.column_names(), vec!["grp", "val"]);
        assert_eq!(sums.len(), 2);
        let keys: Vec<String> = sums
            .view::<crate::Text>("grp")
            .unwrap()
            .iter()
            .flatten()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(keys, vec!["a", "b"]);
        assert_eq!(sums.view::<i64>("val").unwrap().to_vec(), vec![8, 7]);
    }

    #[test]
    fn test_partitions_cover_rows() {
        let grouper = sample().group_by(&["grp"]);
        assert_eq!(grouper.len(), 2);
        let parts: Vec<&[u32]> = grouper.partitions().iter().map(|p| p.as_slice()).collect();
        assert_eq!(parts, vec![&[0u32, 1, 4][..], &[2, 3][..]]);
    }

    #[test]
    fn test_group_without_keys_and_empty_table() {
        let all = sample().group_by::<&str>(&[]);
        assert_eq!(all.len(), 1);
        let total = all.aggregate(&[count("val")]);
        assert_eq!(total.view::<i64>("val").unwrap().to_vec(), vec![5]);

        let empty = sample().filter(&[Filter::new("val", Comparator::Gt, 100)]);
        let grouper = empty.group_by(&["grp"]);
        assert!(grouper.is_empty());
        assert!(grouper.aggregate(&[sum("val")]).is_empty());
    }

    #[test]
    fn test_multiple_aggregations_with_alias() {
        let table = sample().group_by(&["grp"]).aggregate(&[
            mean("score").alias("avg"),
            max("val").alias("top"),
            count("val").alias("n"),
        ]);
        assert_eq!(table.column_names(), vec!["grp", "avg", "top", "n"]);
        assert_eq!(
            table.column_types(),
            vec![DataType::Text, DataType::Float, DataType::Int, DataType::Int]
        );
        assert_eq!(table.view::<f64>("avg").unwrap().to_vec(), vec![2.0, 3.0]);
        assert_eq!(table.view::<i64>("top").unwrap().to_vec(), vec![5, 4]);
        assert_eq!(table.view::<i64>("n").unwrap().to_vec(), vec![3, 2]);
    }

    #[test]
    fn test_group_on_several_keys() {
        let table = Table::new(
            [
                ("a", Data::from(vec![1i64, 1, 2, 1])),
                ("b", Data::from(vec!["x", "y", "x", "x"])),
                ("v", Data::from(vec![10i64, 20, 30, 40])),
            ],
            Config::new(),
        );
        let sums = table.group_by(&["a", "b"]).aggregate(&[sum("v")]);
        assert_eq!(sums.view::<i64>("a").unwrap().to_vec(), vec![1, 1, 2]);
        assert_eq!(sums.view::<i64>("v").unwrap().to_vec(), vec![50, 20, 30]);
    }

    #[test]
    fn test_aggregate_errors() {
        let grouped = sample().group_by(&["grp"]);
        assert_eq!(
            grouped.aggregate(&[sum("missing")]).err(),
            Some(&Error::UnknownColumn("missing".into()))
        );
        assert_eq!(
            grouped.aggregate(&[sum("val").alias("grp")]).err(),
            Some(&Error::DuplicateColumn("grp".into()))
        );
        assert_eq!(
            grouped
                .aggregate(&[Aggregation::new(AggFn::Sum, "grp").alias("g")])
                .err(),
            Some(&Error::UnsupportedAggregation {
                func: AggFn::Sum,
                data_type: DataType::Text
            })
        );
        assert_eq!(
            sample().group_by(&["nope"]).err(),
            Some(&Error::UnknownColumn("nope".into()))
        );
    }

    #[test]
    fn test_repeated_key_is_rejected() {
        let grouped = sample().group_by(&["grp", "grp"]);
        let expected = Error::DuplicateColumn("grp".into());
        assert_eq!(grouped.err(), Some(&expected));

        let table = grouped.aggregate(&[sum("val")]);
        assert_eq!(table.err(), Some(&expected));
        assert!(table.column_names().is_empty());

        assert_eq!(
            sample().distinct(&["val", "val"]).err(),
            Some(&Error::DuplicateColumn("val".into()))
        );
    }

    #[test]
    fn test_first_last_any_all() {
        let table = sample()
            .apply1("big", "val", |v: i64| v > 3)
            .group_by(&["grp"])
            .aggregate(&[
                first("val").alias("first"),
                last("val").alias("last"),
                any("big").alias("any_big"),
                all("big").alias("all_big"),
            ]);
        assert_eq!(table.view::<i64>("first").unwrap().to_vec(), vec![1, 3]);
        assert_eq!(table.view::<i64>("last").unwrap().to_vec(), vec![5, 4]);
        assert_eq!(table.view::<bool>("any_big").unwrap().to_vec(), vec![true, true]);
        assert_eq!(table.view::<bool>("all_big").unwrap().to_vec(), vec![false, false]);
    }
}
