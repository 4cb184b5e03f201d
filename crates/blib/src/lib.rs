//! # blib
//!
//! Small stateless helpers for applications that shuttle associative data
//! into SQL:
//!
//! - [`arr`]: a one-directional structural diff between two nested
//!   mappings, reporting only what changed under the old tree's keys.
//! - [`sql`]: INSERT and UPDATE templates with named placeholders, plus a
//!   normalizer for loosely formatted date strings.
//!
//! ## Building statements
//!
//! ```rust
//! use blib::sql::{self, ToSqlValue};
//!
//! let built = sql::insert(
//!     "users",
//!     [("name", "Bob".to_sql_value()), ("age", 30_i64.to_sql_value())],
//! )?;
//!
//! assert_eq!(built.sql, "INSERT INTO users (name, age) VALUES (:name, :age)");
//! assert_eq!(
//!     serde_json::to_string(&built.parameters).unwrap(),
//!     r#"{":name":"Bob",":age":30}"#
//! );
//! # Ok::<(), blib::Error>(())
//! ```
//!
//! Values never reach the SQL text; binding them is left to whatever
//! database layer executes the statement.

pub mod arr;
pub mod error;
pub mod sql;

pub use arr::{diff, Mapping, Value};
pub use error::{Clause, Error, Result, StatementKind};
pub use sql::{insert, normalize_date, update, BuiltStatement, Parameters, SqlValue};
