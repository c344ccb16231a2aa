mod error;
pub use error::{Error, ErrorKind};

pub mod schema;
pub use schema::Schema;

pub mod stmt;

/// A Result type alias that uses Quarry's [`Error`] type.
pub type Result<T, E = Error> = core::result::Result<T, E>;
