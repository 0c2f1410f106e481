//! SQL statement synthesis: typed literal values, a composable condition
//! tree, and pure text generators for the DDL/DML the connector executes.
//!
//! Everything in this crate is deterministic text generation. Nothing here
//! touches a connection, validates caller input, or parses SQL.

pub mod condition;
pub mod error;
pub mod notify;
pub mod statement;
pub mod value;

pub use condition::{Comparison, Condition, Connective};
pub use error::ConditionError;
pub use notify::NotifyPayload;
pub use value::Value;
