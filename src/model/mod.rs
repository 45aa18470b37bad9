//! Core domain types.

pub mod error;
pub mod query_state;

pub use error::{AppError, MergeInputError};
pub use query_state::{ParamValue, QueryState};
