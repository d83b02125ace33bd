use crate::{Cursor, Error, Log, Options, Record, Result, Row, drain, populate, populate_all};

/// Maps the result set of one statement into records.
///
/// The cursor is drained by the first call to [`Fetcher::rows`], [`Fetcher::first`] or
/// [`Fetcher::find`], a fetcher cannot be used twice.
pub struct Fetcher<C: Cursor> {
    cursor: Option<C>,
    log: Option<Log>,
    options: Options,
}

impl<C: Cursor> Fetcher<C> {
    pub fn new(cursor: C, options: Options) -> Self {
        Self {
            cursor: Some(cursor),
            log: None,
            options,
        }
    }

    /// Execution log to complete and hand to the observer.
    pub fn with_log(mut self, log: Log) -> Self {
        self.log = Some(log);
        self
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Drain the whole result set.
    pub fn rows(&mut self) -> Result<Vec<Row>> {
        let Some(cursor) = self.cursor.take() else {
            let error = Error::argument("The cursor of this fetcher was already drained");
            log::error!("{}", error);
            return Err(error);
        };
        drain(cursor, &self.options, self.log.take())
    }

    /// Populate `target` from the first row, [`Error::NotFound`] when there is none.
    pub fn first<R: Record>(&mut self, target: &mut R) -> Result<()> {
        let rows = self.rows()?;
        let Some(row) = rows.first() else {
            return Err(Error::NotFound);
        };
        populate(target, row, &self.options)
    }

    /// Append one record per row to `target`.
    pub fn find<R: Record>(&mut self, target: &mut Vec<R>) -> Result<()> {
        let rows = self.rows()?;
        populate_all(target, &rows, &self.options)
    }
}
