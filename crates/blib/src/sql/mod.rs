//! Named-placeholder SQL templating.
//!
//! The builders turn a table name and column/value pairs into a statement
//! template plus the parameters to bind to it. Placeholders are named after
//! their column: `:column` for inserted values and SET assignments,
//! `:where_column` for WHERE criteria, so a column may appear on both sides
//! of an UPDATE.
//!
//! # Example
//!
//! ```rust
//! use blib::sql::{self, SqlValue, ToSqlValue};
//!
//! let built = sql::update(
//!     "users",
//!     [("name", "Bob".to_sql_value())],
//!     [("id", 5_i64.to_sql_value())],
//! )
//! .unwrap();
//!
//! assert_eq!(built.sql, "UPDATE users SET name = :name WHERE id = :where_id");
//! assert_eq!(built.parameters.get(":where_id"), Some(&SqlValue::Int(5)));
//! ```

pub mod date;
mod insert;
mod update;
pub mod value;

use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::Regex;
use serde::Serialize;

use crate::error::{Error, Result, StatementKind};

pub use date::{normalize_date, normalize_date_with, Clock, DateOptions, FixedClock, SystemClock};
pub use insert::insert;
pub use update::update;
pub use value::{SqlValue, ToSqlValue};

static TABLE_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_]+$").expect("table name pattern is valid"));

/// Parameters of a built statement, keyed by placeholder name.
///
/// Names include the leading `:`. Iteration follows binding order.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct Parameters {
    entries: IndexMap<String, SqlValue>,
}

impl Parameters {
    /// Creates an empty parameter set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `value` to `name`, replacing an earlier binding in place.
    pub fn insert(&mut self, name: impl Into<String>, value: SqlValue) {
        self.entries.insert(name.into(), value);
    }

    /// Returns the value bound to `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&SqlValue> {
        self.entries.get(name)
    }

    /// Returns `true` if `name` is bound.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Returns the number of bound placeholders.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(placeholder, value)` pairs in binding order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SqlValue)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// Iterates over the placeholder names in binding order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl PartialEq for Parameters {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl IntoIterator for Parameters {
    type Item = (String, SqlValue);
    type IntoIter = indexmap::map::IntoIter<String, SqlValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// A statement template together with its parameters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BuiltStatement {
    /// The SQL template with `:name` placeholders.
    pub sql: String,
    /// Values for every placeholder in `sql`.
    pub parameters: Parameters,
}

impl BuiltStatement {
    /// Renders the template with every placeholder replaced by its
    /// escaped literal.
    ///
    /// Meant for logs and debugging output only. A placeholder is only
    /// recognised where the builders emit one: at the start of the template
    /// or right after a space or `(`. A `:` inside a column name such as
    /// `a:b` is left alone; a column name containing `" :"` is not.
    #[must_use]
    pub fn inline_sql(&self) -> String {
        let mut names: Vec<(&str, &SqlValue)> = self.parameters.iter().collect();
        // Longest first, so `:name` never matches the head of `:name_full`.
        names.sort_by(|a, b| b.0.len().cmp(&a.0.len()));

        let sql = self.sql.as_str();
        let mut out = String::with_capacity(sql.len());
        let mut copied = 0;
        for (pos, _) in sql.match_indices(':') {
            if pos < copied || !(pos == 0 || sql[..pos].ends_with([' ', '('])) {
                continue;
            }
            let rest = &sql[pos..];
            if let Some((name, value)) = names.iter().find(|(n, _)| rest.starts_with(*n)) {
                out.push_str(&sql[copied..pos]);
                out.push_str(&value.to_sql_inline());
                copied = pos + name.len();
            }
        }
        out.push_str(&sql[copied..]);
        out
    }
}

/// Checks a table name against `^[A-Za-z0-9_]+$`.
fn validate_table(statement: StatementKind, table: &str) -> Result<()> {
    if table.is_empty() {
        return Err(Error::EmptyTable { statement });
    }
    if !TABLE_NAME.is_match(table) {
        return Err(Error::InvalidTableName {
            statement,
            table: String::from(table),
        });
    }
    Ok(())
}

/// Collects column/value pairs, keeping the first position and the last
/// value of a repeated column.
fn collect_columns<I, K, V>(pairs: I) -> IndexMap<String, SqlValue>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: ToSqlValue,
{
    pairs
        .into_iter()
        .map(|(column, value)| (column.into(), value.to_sql_value()))
        .collect()
}

fn placeholder(column: &str) -> String {
    format!(":{column}")
}

fn where_placeholder(column: &str) -> String {
    format!(":where_{column}")
}
