mod as_value;
mod coerce;
mod connection;
mod cursor;
mod error;
mod execution_log;
mod fetcher;
mod kind;
mod materialize;
mod options;
mod plan;
mod record;
mod row;
mod tag;
mod temporal;
mod util;
mod value;

pub use ::anyhow::Context;
pub use as_value::*;
pub use coerce::*;
pub use connection::*;
pub use cursor::*;
pub use error::*;
pub use execution_log::*;
pub use fetcher::*;
pub use kind::*;
pub use materialize::*;
pub use options::*;
pub use plan::*;
pub use record::*;
pub use row::*;
pub use tag::*;
pub use temporal::*;
pub use util::*;
pub use value::*;

/// Result of the conversion and driver seams.
pub type AnyResult<T> = anyhow::Result<T>;
