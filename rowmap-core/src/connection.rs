use crate::{Cursor, Error, Fetcher, Log, Options, Record, Result, Row, Value, truncate_long};

/// Placeholder replaced with [`Record::table_name`] by [`Db::first`] and [`Db::find`].
pub const TABLE_PLACEHOLDER: &str = "${TABLE}";

/// A driver connection able to run a statement and hand back its result set.
pub trait Connection {
    type Cursor<'c>: Cursor
    where
        Self: 'c;

    /// Run `sql` with the positional `params`.
    fn query(&mut self, sql: &str, params: &[Value]) -> anyhow::Result<Self::Cursor<'_>>;
}

/// Entry point tying a [`Connection`] to the fetch operations.
///
/// ```rust,ignore
/// let mut db = Db::new(connection, Options::default());
/// let mut users = Vec::<User>::new();
/// db.find(&mut users, "SELECT * FROM ${TABLE} WHERE age > ?", &[18.into()])?;
/// ```
pub struct Db<C: Connection> {
    connection: C,
    options: Options,
}

impl<C: Connection> Db<C> {
    pub fn new(connection: C, options: Options) -> Self {
        Self {
            connection,
            options,
        }
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn options_mut(&mut self) -> &mut Options {
        &mut self.options
    }

    /// The underlying connection.
    pub fn raw(&mut self) -> &mut C {
        &mut self.connection
    }

    pub fn into_inner(self) -> C {
        self.connection
    }

    /// Run `sql` and return a fetcher over its result set.
    ///
    /// When the options carry an observer, the execution log starts here. If the statement cannot
    /// be run, the log is emitted right away with the error.
    pub fn fetch(&mut self, sql: &str, params: &[Value]) -> Result<Fetcher<C::Cursor<'_>>> {
        let log = self
            .options
            .observer
            .is_some()
            .then(|| Log::new(sql, params.to_vec()));
        match self.connection.query(sql, params) {
            Ok(cursor) => {
                let fetcher = Fetcher::new(cursor, self.options.clone());
                Ok(match log {
                    Some(log) => fetcher.with_log(log),
                    None => fetcher,
                })
            }
            Err(e) => {
                let error = Error::Driver(
                    e.context(format!("While executing the query `{}`", truncate_long!(sql))),
                );
                log::error!("{}", error);
                if let (Some(mut log), Some(observer)) = (log, &self.options.observer) {
                    log.complete(0, Some(error.to_string()));
                    observer(&log);
                }
                Err(error)
            }
        }
    }

    /// Run `sql` and drain all of its rows.
    pub fn query(&mut self, sql: &str, params: &[Value]) -> Result<Vec<Row>> {
        self.fetch(sql, params)?.rows()
    }

    /// Populate `target` from the first row returned by `sql`.
    pub fn first<R: Record>(&mut self, target: &mut R, sql: &str, params: &[Value]) -> Result<()> {
        let sql = sql.replacen(TABLE_PLACEHOLDER, R::table_name(), 1);
        self.fetch(&sql, params)?.first(target)
    }

    /// Append one record per row returned by `sql` to `target`.
    pub fn find<R: Record>(
        &mut self,
        target: &mut Vec<R>,
        sql: &str,
        params: &[Value],
    ) -> Result<()> {
        let sql = sql.replacen(TABLE_PLACEHOLDER, R::table_name(), 1);
        self.fetch(&sql, params)?.find(target)
    }
}
