use crate::{RowNames, Value};
use anyhow::{Error, Result};
use std::{collections::VecDeque, mem};

/// Forward only iteration over a driver result set.
///
/// The protocol is: `columns` once, then `next` until it returns `false`, calling `scan` after
/// each successful `next`, finally `close`. The scan buffer has exactly one slot per column and
/// comes in filled with [`Value::Null`]; drivers write non NULL values in place.
pub trait Cursor {
    /// Column labels of the result set.
    fn columns(&mut self) -> Result<RowNames>;
    /// Advance to the next row, `false` once exhausted.
    fn next(&mut self) -> Result<bool>;
    /// Decode the current row into `values`.
    fn scan(&mut self, values: &mut [Value]) -> Result<()>;
    /// Release the underlying resources.
    fn close(&mut self) -> Result<()>;
}

impl<C: Cursor + ?Sized> Cursor for &mut C {
    fn columns(&mut self) -> Result<RowNames> {
        (**self).columns()
    }
    fn next(&mut self) -> Result<bool> {
        (**self).next()
    }
    fn scan(&mut self, values: &mut [Value]) -> Result<()> {
        (**self).scan(values)
    }
    fn close(&mut self) -> Result<()> {
        (**self).close()
    }
}

impl<C: Cursor + ?Sized> Cursor for Box<C> {
    fn columns(&mut self) -> Result<RowNames> {
        (**self).columns()
    }
    fn next(&mut self) -> Result<bool> {
        (**self).next()
    }
    fn scan(&mut self, values: &mut [Value]) -> Result<()> {
        (**self).scan(values)
    }
    fn close(&mut self) -> Result<()> {
        (**self).close()
    }
}

/// Cursor over rows already held in memory.
#[derive(Debug, Default)]
pub struct MemoryCursor {
    labels: RowNames,
    rows: VecDeque<Box<[Value]>>,
    current: Option<Box<[Value]>>,
    closed: bool,
}

impl MemoryCursor {
    pub fn new(
        labels: impl Into<RowNames>,
        rows: impl IntoIterator<Item = impl Into<Box<[Value]>>>,
    ) -> Self {
        Self {
            labels: labels.into(),
            rows: rows.into_iter().map(Into::into).collect(),
            current: None,
            closed: false,
        }
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    fn check_open(&self) -> Result<()> {
        if self.closed {
            return Err(Error::msg("The cursor is closed"));
        }
        Ok(())
    }
}

impl Cursor for MemoryCursor {
    fn columns(&mut self) -> Result<RowNames> {
        self.check_open()?;
        Ok(self.labels.clone())
    }

    fn next(&mut self) -> Result<bool> {
        self.check_open()?;
        self.current = self.rows.pop_front();
        Ok(self.current.is_some())
    }

    fn scan(&mut self, values: &mut [Value]) -> Result<()> {
        self.check_open()?;
        let Some(current) = self.current.as_mut() else {
            return Err(Error::msg("Scan called without a current row"));
        };
        if current.len() != values.len() {
            return Err(Error::msg(format!(
                "Expected {} values, the row has {}",
                values.len(),
                current.len()
            )));
        }
        for (target, source) in values.iter_mut().zip(current.iter_mut()) {
            *target = mem::take(source);
        }
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        self.closed = true;
        self.rows.clear();
        self.current = None;
        Ok(())
    }
}
