use crate::{Binding, FieldBinding, Options, Plan, Result, Row};

/// A type rows can be mapped into, usually implemented with `#[derive(Record)]`.
///
/// The default value is the zero record: fields whose column is missing from a row keep it.
pub trait Record: Default + Sized + 'static {
    /// Name substituted for `${TABLE}` in statements fetching this record.
    fn table_name() -> &'static str;

    /// Field bindings of this type, built once per process.
    fn plan() -> &'static Plan<Self>;

    /// Flattened bindings, nested records included.
    fn bindings() -> impl ExactSizeIterator<Item = &'static Binding> {
        Self::plan().fields().iter().map(FieldBinding::binding)
    }

    fn populate(&mut self, row: &Row, options: &Options) -> Result<()> {
        populate(self, row, options)
    }

    fn from_row(row: &Row, options: &Options) -> Result<Self> {
        let mut record = Self::default();
        record.populate(row, options)?;
        Ok(record)
    }
}

/// Assign the columns of `row` to the bound fields of `target`.
///
/// Fields whose column the row does not carry are left untouched. The first field that cannot be
/// assigned stops the mapping, fields assigned before it keep their new value.
pub fn populate<R: Record>(target: &mut R, row: &Row, options: &Options) -> Result<()> {
    for field in R::plan().fields() {
        let Some(value) = row.get_column(field.column()) else {
            continue;
        };
        field.assign(target, value, options)?;
    }
    Ok(())
}

/// Append one record per row to `target`, in row order.
///
/// Records are built from `R::default()`. On error the records appended so far stay in `target`.
pub fn populate_all<R: Record>(
    target: &mut Vec<R>,
    rows: &[Row],
    options: &Options,
) -> Result<()> {
    target.reserve(rows.len());
    for row in rows {
        target.push(R::from_row(row, options)?);
    }
    Ok(())
}
