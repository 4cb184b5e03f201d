//! INSERT statement templating.

use tracing::{debug, warn};

use super::value::ToSqlValue;
use super::{collect_columns, placeholder, validate_table, BuiltStatement, Parameters};
use crate::error::{Clause, Error, Result, StatementKind};

/// Builds `INSERT INTO <table> (<columns>) VALUES (<placeholders>)`.
///
/// Every column is bound to `:column`, in the order of `data`.
///
/// # Errors
///
/// Checked in this order: [`Error::EmptyData`] when `data` yields no pairs,
/// [`Error::EmptyTable`] for an empty table name, and
/// [`Error::InvalidTableName`] when the name has characters outside
/// `[A-Za-z0-9_]`.
///
/// # Example
///
/// ```rust
/// use blib::sql::{insert, SqlValue, ToSqlValue};
///
/// let built = insert(
///     "users",
///     [("name", "Bob".to_sql_value()), ("age", 30_i64.to_sql_value())],
/// )
/// .unwrap();
///
/// assert_eq!(built.sql, "INSERT INTO users (name, age) VALUES (:name, :age)");
/// assert_eq!(built.parameters.get(":age"), Some(&SqlValue::Int(30)));
/// ```
pub fn insert<I, K, V>(table: &str, data: I) -> Result<BuiltStatement>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: ToSqlValue,
{
    let columns = collect_columns(data);
    if columns.is_empty() {
        warn!(table, "refusing to build INSERT without data");
        return Err(Error::EmptyData {
            statement: StatementKind::Insert,
        });
    }
    if let Err(e) = validate_table(StatementKind::Insert, table) {
        warn!(table, error = %e, "refusing to build INSERT");
        return Err(e);
    }

    let fields: Vec<&str> = columns.iter().map(|(c, _)| c.as_str()).collect();
    let placeholders: Vec<String> = fields.iter().map(|c| placeholder(c)).collect();
    if placeholders.is_empty() {
        return Err(Error::EmptyPlaceholders {
            statement: StatementKind::Insert,
            clause: Clause::Values,
        });
    }

    let sql = format!(
        "INSERT INTO {table} ({}) VALUES ({})",
        fields.join(", "),
        placeholders.join(", ")
    );

    let mut parameters = Parameters::new();
    for (name, (_, value)) in placeholders.into_iter().zip(columns) {
        parameters.insert(name, value);
    }

    debug!(table, placeholders = parameters.len(), "built INSERT");
    Ok(BuiltStatement { sql, parameters })
}
