//! Nested associative trees and their structural diff.
//!
//! ```rust
//! use blib::arr::{diff, Value};
//! use serde_json::json;
//!
//! let old = Value::from(json!({"name": "Bob", "address": {"city": "Ghent", "zip": "9000"}}));
//! let new = Value::from(json!({"name": "Bob", "address": {"city": "Bruges", "zip": "9000"}}));
//!
//! let changes = diff(old.as_map().unwrap(), new.as_map().unwrap());
//! assert_eq!(serde_json::to_value(&changes).unwrap(), json!({"address": {"city": "Bruges"}}));
//! ```

mod diff;
mod value;

pub use diff::{diff, diff_with, DiffOptions, Equality};
pub use value::{Mapping, Value};
