//! Error types for statement building.

use std::fmt;

use thiserror::Error;

/// The statement a builder was asked to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementKind {
    /// `INSERT INTO ... VALUES ...`
    Insert,
    /// `UPDATE ... SET ... WHERE ...`
    Update,
}

impl fmt::Display for StatementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Insert => f.write_str("INSERT"),
            Self::Update => f.write_str("UPDATE"),
        }
    }
}

/// A placeholder-bearing clause of a statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Clause {
    /// The VALUES list of an INSERT.
    Values,
    /// The SET list of an UPDATE.
    Set,
    /// The WHERE conditions of an UPDATE.
    Where,
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Values => f.write_str("VALUES"),
            Self::Set => f.write_str("SET"),
            Self::Where => f.write_str("WHERE"),
        }
    }
}

/// Statement-building errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// No column/value pairs were given.
    #[error("empty data for {statement}")]
    EmptyData { statement: StatementKind },

    /// The table name is empty.
    #[error("empty table name for {statement}")]
    EmptyTable { statement: StatementKind },

    /// The table name contains characters outside `[A-Za-z0-9_]`.
    #[error("invalid table name for {statement}: {table:?}")]
    InvalidTableName {
        statement: StatementKind,
        table: String,
    },

    /// An UPDATE was requested without WHERE criteria.
    #[error("empty criteria for UPDATE")]
    EmptyCriteria,

    /// Two columns map to the same placeholder name, e.g. a SET column
    /// `where_id` next to a criteria column `id`.
    #[error("duplicate placeholder {placeholder} in {statement}")]
    DuplicatePlaceholder {
        statement: StatementKind,
        placeholder: String,
    },

    /// A clause ended up without placeholders.
    #[error("no placeholders in {clause} clause of {statement}")]
    EmptyPlaceholders {
        statement: StatementKind,
        clause: Clause,
    },
}

/// Result type alias for statement building.
pub type Result<T> = std::result::Result<T, Error>;
