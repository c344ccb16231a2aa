mod engine;
pub use engine::{apply_query, compile, MAX_FILTER_DEPTH};

mod filter;

mod query;
pub use query::{Filter, Query};

pub use quarry_core::{schema, stmt, Error, ErrorKind, Result, Schema};
