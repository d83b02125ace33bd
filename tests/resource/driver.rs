use log::LevelFilter;
use rowmap::{AnyResult, Connection, Cursor, RowNames, Value};
use std::{
    collections::VecDeque,
    env,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
};

pub fn init_logs() {
    let mut logger = env_logger::builder();
    logger
        .is_test(true)
        .format_file(true)
        .format_line_number(true);
    if env::var("RUST_LOG").is_err() {
        logger.filter_level(LevelFilter::Warn);
    }
    let _ = logger.try_init();
}

/// Cursor replaying scripted rows, with optional failures.
#[derive(Debug, Default)]
pub struct ScriptedCursor {
    labels: Vec<String>,
    rows: VecDeque<Vec<Value>>,
    current: Option<Vec<Value>>,
    scanned: usize,
    pub fail_columns: bool,
    pub fail_scan_at: Option<usize>,
    pub fail_close: bool,
    closed: Arc<AtomicBool>,
}

impl ScriptedCursor {
    pub fn new(labels: &[&str], rows: Vec<Vec<Value>>) -> Self {
        Self {
            labels: labels.iter().map(|v| v.to_string()).collect(),
            rows: rows.into(),
            ..Default::default()
        }
    }

    /// Flag set once the cursor is closed, observable after the cursor moved away.
    pub fn closed_flag(&self) -> Arc<AtomicBool> {
        self.closed.clone()
    }
}

impl Cursor for ScriptedCursor {
    fn columns(&mut self) -> AnyResult<RowNames> {
        if self.fail_columns {
            return Err(anyhow::Error::msg("columns unavailable"));
        }
        Ok(self.labels.clone().into())
    }

    fn next(&mut self) -> AnyResult<bool> {
        self.current = self.rows.pop_front();
        Ok(self.current.is_some())
    }

    fn scan(&mut self, values: &mut [Value]) -> AnyResult<()> {
        if self.fail_scan_at == Some(self.scanned) {
            return Err(anyhow::Error::msg(format!("scan failed at row {}", self.scanned)));
        }
        self.scanned += 1;
        let current = self.current.take().unwrap_or_default();
        for (target, source) in values.iter_mut().zip(current) {
            *target = source;
        }
        Ok(())
    }

    fn close(&mut self) -> AnyResult<()> {
        self.closed.store(true, Ordering::SeqCst);
        if self.fail_close {
            return Err(anyhow::Error::msg("close failed"));
        }
        Ok(())
    }
}

/// Connection handing out the scripted cursors in order and recording the statements received.
#[derive(Debug, Default)]
pub struct ScriptedConnection {
    pub results: VecDeque<Result<ScriptedCursor, String>>,
    pub statements: Vec<(String, Vec<Value>)>,
}

impl ScriptedConnection {
    pub fn new(results: impl IntoIterator<Item = Result<ScriptedCursor, String>>) -> Self {
        Self {
            results: results.into_iter().collect(),
            statements: Vec::new(),
        }
    }
}

impl Connection for ScriptedConnection {
    type Cursor<'c> = ScriptedCursor;

    fn query(&mut self, sql: &str, params: &[Value]) -> AnyResult<ScriptedCursor> {
        self.statements.push((sql.to_string(), params.to_vec()));
        match self.results.pop_front() {
            Some(Ok(cursor)) => Ok(cursor),
            Some(Err(e)) => Err(anyhow::Error::msg(e)),
            None => Err(anyhow::Error::msg("no result scripted")),
        }
    }
}
