//! Errors returned by the fetch operations.
//!
//! Every fetch call produces at most one [`Error`]. Use the variant to find out which phase
//! failed:
//!
//! * [`Error::Argument`]: the call itself was malformed, nothing was read
//! * [`Error::Driver`]: the cursor failed while enumerating columns, advancing or scanning
//! * [`Error::NotFound`]: a single row was requested but the result set was empty
//! * [`Error::FieldMapping`]: a value could not be assigned to a record field
//!
//! Conversion routines and driver seams work with [`anyhow::Error`], which is carried as the
//! source of the last two variants.

/// An error that occurred while fetching rows into records.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Wrong kind of argument passed to a fetch operation.
    #[error("{0}")]
    Argument(String),

    /// Cursor enumeration, advance or scan failure.
    #[error("driver error: {0:#}")]
    Driver(#[source] anyhow::Error),

    /// Empty result for a single row fetch.
    #[error("no rows in result set")]
    NotFound,

    /// Coercion or assignment failure for the named column.
    #[error("type mismatch for field {column}: {source:#}")]
    FieldMapping {
        column: String,
        #[source]
        source: anyhow::Error,
    },
}

impl Error {
    pub fn argument(message: impl Into<String>) -> Self {
        Error::Argument(message.into())
    }

    pub fn field_mapping(column: impl Into<String>, source: anyhow::Error) -> Self {
        Error::FieldMapping {
            column: column.into(),
            source,
        }
    }

    /// The column named by a [`Error::FieldMapping`].
    pub fn column(&self) -> Option<&str> {
        match self {
            Error::FieldMapping { column, .. } => Some(column),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound)
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
