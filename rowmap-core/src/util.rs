use crate::Value;
use std::fmt::Write;

/// Longest prefix of `value` not exceeding `max` bytes that ends on a char boundary.
pub fn truncate(value: &str, max: usize) -> &str {
    if value.len() <= max {
        return value;
    }
    let end = value
        .char_indices()
        .map(|(i, _)| i)
        .take_while(|i| *i <= max)
        .last()
        .unwrap_or(0);
    &value[..end]
}

#[macro_export]
macro_rules! truncate_long {
    ($query:expr) => {
        format_args!(
            "{}{}",
            $crate::truncate($query, 497).trim_end(),
            if $query.len() > 497 { "..." } else { "" },
        )
    };
}

/// Render `sql` with each `?` placeholder replaced by the SQL literal of the matching binding.
///
/// Placeholders inside quoted strings or identifiers are left alone. Missing bindings leave the
/// placeholder in place, extra bindings are ignored.
pub fn printable_query(sql: &str, bindings: &[Value]) -> String {
    let mut out = String::with_capacity(sql.len() + bindings.len() * 8);
    let mut bindings = bindings.iter();
    let mut quote: Option<char> = None;
    for c in sql.chars() {
        match (quote, c) {
            (None, '\'' | '"' | '`') => {
                quote = Some(c);
                out.push(c);
            }
            (Some(q), c) if q == c => {
                quote = None;
                out.push(c);
            }
            (None, '?') => match bindings.next() {
                Some(value) => {
                    let _ = write!(out, "{}", value);
                }
                None => out.push('?'),
            },
            _ => out.push(c),
        }
    }
    out
}

/// `1` for `true`, `0` for `false`.
pub fn bool_to_int(value: bool) -> i64 {
    value as i64
}

/// Any non zero integer is `true`.
pub fn int_to_bool(value: impl Into<i64>) -> bool {
    value.into() != 0
}
