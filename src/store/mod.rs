//! Document Store Module
//!
//! In-memory tables of JSON records with presence indexes and predicate
//! queries.

mod database;
mod query;
mod table;
mod value;


// Re-export public types
pub use database::DocumentStore;
pub use query::{Condition, Operator, Query};
pub use value::{compare_values, values_equal, Record, Schema, ID_FIELD};
