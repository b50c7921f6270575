//! Database error types and SQLite constraint translation

use rusqlite::ffi::ErrorCode;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Database error types
#[derive(Debug, Error)]
pub enum Error {
    /// A UNIQUE constraint was violated (duplicate serial number, category
    /// name, email, and so on).
    #[error("unique constraint violated on {table}")]
    UniqueViolation { table: &'static str },

    /// A FOREIGN KEY constraint was violated, typically a delete of a row
    /// still referenced elsewhere.
    #[error("foreign key constraint violated on {table}")]
    ForeignKeyViolation { table: &'static str },

    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

impl Error {
    /// Translate a rusqlite error for a statement touching `table`, turning
    /// constraint failures into their dedicated variants.
    pub(crate) fn for_table(err: rusqlite::Error, table: &'static str) -> Self {
        if let rusqlite::Error::SqliteFailure(failure, ref message) = err {
            if failure.code == ErrorCode::ConstraintViolation {
                let message = message.as_deref().unwrap_or_default();
                if message.contains("UNIQUE constraint failed") {
                    return Error::UniqueViolation { table };
                }
                if message.contains("FOREIGN KEY constraint failed") {
                    return Error::ForeignKeyViolation { table };
                }
            }
        }
        Error::Sqlite(err)
    }

    pub fn is_unique_violation(&self) -> bool {
        matches!(self, Error::UniqueViolation { .. })
    }

    pub fn is_foreign_key_violation(&self) -> bool {
        matches!(self, Error::ForeignKeyViolation { .. })
    }
}
