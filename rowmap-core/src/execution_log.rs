use crate::{Value, printable_query, truncate_long};
use std::{
    fmt::{self, Display},
    time::{Duration, Instant},
};

/// Execution log of one statement, handed to the [`Observer`](crate::Observer).
///
/// Created when the statement is sent and completed when its result set is drained.
#[derive(Default, Debug, Clone)]
pub struct Log {
    /// Time between the creation of the log and its emission.
    pub time: Duration,
    /// Statement text as sent to the driver.
    pub sql: String,
    /// Statement text with the placeholders replaced by the bindings.
    pub sql_print: String,
    pub bindings: Vec<Value>,
    /// Number of rows produced.
    pub rows_affected: u64,
    pub error: Option<String>,
    started: Option<Instant>,
}

impl Log {
    pub fn new(sql: impl Into<String>, bindings: Vec<Value>) -> Self {
        let sql = sql.into();
        Self {
            sql_print: printable_query(&sql, &bindings),
            sql,
            bindings,
            started: Some(Instant::now()),
            ..Default::default()
        }
    }

    /// Instant the statement was sent, if known.
    pub fn started(&self) -> Option<Instant> {
        self.started
    }

    /// Restart the clock.
    pub fn start(&mut self) {
        self.start_at(Instant::now());
    }

    pub(crate) fn start_at(&mut self, started: Instant) {
        self.started = Some(started);
    }

    /// Record the outcome and elapsed time.
    pub(crate) fn complete(&mut self, rows_affected: u64, error: Option<String>) {
        self.rows_affected = rows_affected;
        self.error = error;
        if let Some(started) = self.started {
            self.time = started.elapsed();
        }
    }
}

impl Display for Log {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{:.3}ms] [rows:{}] {}",
            self.time.as_secs_f64() * 1000.0,
            self.rows_affected,
            truncate_long!(&self.sql_print),
        )?;
        if let Some(error) = &self.error {
            write!(f, " (error: {})", error)?;
        }
        Ok(())
    }
}
