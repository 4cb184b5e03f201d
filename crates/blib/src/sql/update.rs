//! UPDATE statement templating.

use tracing::{debug, warn};

use super::value::ToSqlValue;
use super::{
    collect_columns, placeholder, validate_table, where_placeholder, BuiltStatement, Parameters,
};
use crate::error::{Clause, Error, Result, StatementKind};

/// Builds `UPDATE <table> SET a = :a, ... WHERE x = :where_x AND ...`.
///
/// SET columns bind to `:column`, criteria to `:where_column`, so the same
/// column may be both assigned and matched on. Parameters list the SET
/// bindings first, then the criteria.
///
/// # Errors
///
/// Checked in this order: [`Error::EmptyData`], [`Error::EmptyTable`],
/// [`Error::InvalidTableName`], then [`Error::EmptyCriteria`] when
/// `criteria` yields no pairs. [`Error::DuplicatePlaceholder`] is returned
/// when a SET column already spells a criteria placeholder
/// (`where_id` next to criteria `id`).
pub fn update<I, K, V, J, L, W>(table: &str, data: I, criteria: J) -> Result<BuiltStatement>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: ToSqlValue,
    J: IntoIterator<Item = (L, W)>,
    L: Into<String>,
    W: ToSqlValue,
{
    let assignments = collect_columns(data);
    if assignments.is_empty() {
        warn!(table, "refusing to build UPDATE without data");
        return Err(Error::EmptyData {
            statement: StatementKind::Update,
        });
    }
    if let Err(e) = validate_table(StatementKind::Update, table) {
        warn!(table, error = %e, "refusing to build UPDATE");
        return Err(e);
    }
    let conditions = collect_columns(criteria);
    if conditions.is_empty() {
        warn!(table, "refusing to build UPDATE without criteria");
        return Err(Error::EmptyCriteria);
    }

    let set_parts: Vec<String> = assignments
        .iter()
        .map(|(c, _)| format!("{c} = {}", placeholder(c)))
        .collect();
    let where_parts: Vec<String> = conditions
        .iter()
        .map(|(c, _)| format!("{c} = {}", where_placeholder(c)))
        .collect();

    let mut parameters = Parameters::new();
    for (column, value) in assignments {
        parameters.insert(placeholder(&column), value);
    }
    for (column, value) in conditions {
        let name = where_placeholder(&column);
        if parameters.contains(&name) {
            warn!(table, placeholder = %name, "refusing to build UPDATE");
            return Err(Error::DuplicatePlaceholder {
                statement: StatementKind::Update,
                placeholder: name,
            });
        }
        parameters.insert(name, value);
    }

    for (parts, clause) in [(&set_parts, Clause::Set), (&where_parts, Clause::Where)] {
        if parts.is_empty() {
            return Err(Error::EmptyPlaceholders {
                statement: StatementKind::Update,
                clause,
            });
        }
    }

    let sql = format!(
        "UPDATE {table} SET {} WHERE {}",
        set_parts.join(", "),
        where_parts.join(" AND ")
    );

    debug!(table, placeholders = parameters.len(), "built UPDATE");
    Ok(BuiltStatement { sql, parameters })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sql::SqlValue;

    #[test]
    fn test_simple_update() {
        let built = update("users", [("name", "Bob")], [("id", 5)]).unwrap();

        assert_eq!(built.sql, "UPDATE users SET name = :name WHERE id = :where_id");
        assert_eq!(built.parameters.len(), 2);
        assert_eq!(
            built.parameters.get(":name"),
            Some(&SqlValue::Text(String::from("Bob")))
        );
        assert_eq!(built.parameters.get(":where_id"), Some(&SqlValue::Int(5)));
    }

    #[test]
    fn test_update_multiple_columns_and_criteria() {
        let built = update(
            "users",
            [
                ("name", "Bob".to_sql_value()),
                ("email", "bob@example.com".to_sql_value()),
                ("age", 30_i32.to_sql_value()),
            ],
            [("tenant", 1), ("id", 7)],
        )
        .unwrap();

        assert_eq!(
            built.sql,
            "UPDATE users SET name = :name, email = :email, age = :age \
             WHERE tenant = :where_tenant AND id = :where_id"
        );
        assert_eq!(
            built.parameters.names().collect::<Vec<_>>(),
            vec![":name", ":email", ":age", ":where_tenant", ":where_id"]
        );
    }

    #[test]
    fn test_update_same_column_in_data_and_criteria() {
        let built = update("users", [("status", "active")], [("status", "pending")]).unwrap();

        assert_eq!(
            built.sql,
            "UPDATE users SET status = :status WHERE status = :where_status"
        );
        assert_eq!(
            built.parameters.get(":status"),
            Some(&SqlValue::Text(String::from("active")))
        );
        assert_eq!(
            built.parameters.get(":where_status"),
            Some(&SqlValue::Text(String::from("pending")))
        );
    }

    #[test]
    fn test_update_empty_data() {
        let data: Vec<(&str, i64)> = vec![];
        assert_eq!(
            update("users", data, [("id", 5)]),
            Err(Error::EmptyData {
                statement: StatementKind::Update
            })
        );
    }

    #[test]
    fn test_update_empty_criteria() {
        let criteria: Vec<(&str, i64)> = vec![];
        assert_eq!(
            update("users", [("name", "Bob")], criteria),
            Err(Error::EmptyCriteria)
        );
    }

    #[test]
    fn test_update_table_checked_before_criteria() {
        let criteria: Vec<(&str, i64)> = vec![];
        assert_eq!(
            update("", [("name", "Bob")], criteria.clone()),
            Err(Error::EmptyTable {
                statement: StatementKind::Update
            })
        );
        assert!(matches!(
            update("users;", [("name", "Bob")], criteria),
            Err(Error::InvalidTableName { ref table, .. }) if table == "users;"
        ));
    }

    #[test]
    fn test_update_placeholder_collision() {
        assert_eq!(
            update("t", [("where_id", 1), ("id", 2)], [("id", 3)]),
            Err(Error::DuplicatePlaceholder {
                statement: StatementKind::Update,
                placeholder: String::from(":where_id"),
            })
        );
    }

    #[test]
    fn test_update_values_stay_out_of_sql() {
        let malicious = "'; DROP TABLE users; --";
        let built = update("users", [("name", malicious)], [("id", 1)]).unwrap();

        assert_eq!(built.sql, "UPDATE users SET name = :name WHERE id = :where_id");
        assert_eq!(
            built.inline_sql(),
            "UPDATE users SET name = '''; DROP TABLE users; --' WHERE id = 1"
        );
    }
}
