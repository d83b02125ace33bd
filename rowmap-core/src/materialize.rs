use crate::{Cursor, Error, Log, Options, Result, Row, Value};
use anyhow::Context;
use std::{mem, time::Instant};

/// Drain `cursor` into rows, in cursor order.
///
/// The columns are enumerated once and a single scan buffer is reused across rows. NULL positions
/// are left out of the produced rows. Any driver failure discards the rows read so far.
///
/// The cursor is closed before returning, whatever the outcome. When the options carry an
/// observer, `log` (or a fresh one) is completed and emitted exactly once.
pub fn drain(mut cursor: impl Cursor, options: &Options, log: Option<Log>) -> Result<Vec<Row>> {
    let started = Instant::now();
    let result = read_rows(&mut cursor);
    let closed = cursor.close().context("Could not close the cursor");
    let result = match (result, closed) {
        (Ok(rows), Ok(())) => Ok(rows),
        (Ok(..), Err(e)) => Err(e),
        (Err(e), Err(close)) => {
            log::warn!("{:#}", close);
            Err(e)
        }
        (Err(e), Ok(())) => Err(e),
    }
    .map_err(|e| {
        let error = Error::Driver(e);
        log::error!("{}", error);
        error
    });
    if let Some(observer) = &options.observer {
        let mut log = log.unwrap_or_default();
        if log.started().is_none() {
            log.start_at(started);
        }
        match &result {
            Ok(rows) => log.complete(rows.len() as u64, None),
            Err(e) => log.complete(0, Some(e.to_string())),
        }
        observer(&log);
    }
    if let Ok(rows) = &result {
        log::debug!(
            "Drained {} rows in {:.3}ms",
            rows.len(),
            started.elapsed().as_secs_f64() * 1000.0
        );
    }
    result
}

fn read_rows(cursor: &mut impl Cursor) -> anyhow::Result<Vec<Row>> {
    let labels = cursor
        .columns()
        .context("Could not enumerate the result columns")?;
    let mut buffer = vec![Value::Null; labels.len()];
    let mut rows = Vec::new();
    while cursor.next().context("Could not advance the cursor")? {
        cursor
            .scan(&mut buffer)
            .with_context(|| format!("Could not scan row {}", rows.len()))?;
        rows.push(Row::from_labeled(
            &labels,
            buffer.iter_mut().map(mem::take),
        ));
    }
    Ok(rows)
}
