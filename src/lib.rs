//! An in-memory, immutable, columnar table engine.
//!
//! A [Table] is a set of named, equally long [Column]s viewed through a row
//! [Index]. Filtering, sorting, slicing and deduplication only build new
//! indices; column storage is shared between a table and everything derived
//! from it. Operations never panic on bad input: a failing operation yields a
//! table carrying the [Error], and every later operation passes it through.

pub mod aggregation;
pub mod apply;
pub mod categorical;
pub mod column;
pub mod config;
pub mod data_type;
pub mod error;
pub mod filter;
pub mod group;
pub mod index;
pub mod table;
pub mod value;

pub use aggregation::{AggFn, Aggregation};
pub use apply::{Element, View};
pub use categorical::Dictionary;
pub use column::{Column, Text};
pub use config::Config;
pub use data_type::DataType;
pub use error::{Error, Result};
pub use filter::{Arg, Clause, Comparator, Filter};
pub use group::Grouper;
pub use index::Index;
pub use table::{Assigner, Data, Order, Table};
pub use value::Value;
