//! SQL Builder utilities
//!
//! This module provides common utilities for SQL generation across DDL and DML.

use std::fmt::Write;

use crate::schema::FieldType;

/// Get the SQLite type name for a field type.
pub(crate) fn sqlite_type(field: FieldType) -> &'static str {
    match field {
        FieldType::Id => "TEXT",
        FieldType::String => "TEXT",
        FieldType::Real => "REAL",
        FieldType::Boolean => "INTEGER",
        FieldType::Date => "TEXT",
    }
}

/// Quote an identifier. Column names come from spreadsheet headers and may
/// contain spaces or punctuation.
pub fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// SQL string literal.
pub fn quote_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

/// SQL string literal of the JSON path selecting object member `name`.
pub fn json_member_path(name: &str) -> String {
    quote_literal(&format!("$.\"{name}\""))
}

/// Write a comma-separated list of items.
pub fn write_comma_separated<I, F>(
    out: &mut String,
    items: I,
    mut write_item: F,
) -> std::fmt::Result
where
    I: IntoIterator,
    F: FnMut(&mut String, I::Item) -> std::fmt::Result,
{
    let mut first = true;
    for item in items {
        if !first {
            write!(out, ", ")?;
        }
        first = false;
        write_item(out, item)?;
    }
    Ok(())
}

/// Erase trailing comma and newline from output, replacing with newline.
pub fn erase_trailing_comma_newline(out: &mut String) {
    if out.ends_with(",\n") {
        out.pop();
        out.pop();
        out.push('\n');
    }
}

/// Write a JSON field extraction expression over the row aliased `record`.
///
/// A quoted JSON path label ends at the next `"` and takes no escapes, so
/// names containing `"` or `\` are looked up by key instead.
pub fn write_json_extract(out: &mut String, field_name: &str) -> std::fmt::Result {
    if field_name.contains(['"', '\\']) {
        writeln!(
            out,
            "  (SELECT member.value FROM json_each(record.value) AS member WHERE member.key = {}),",
            quote_literal(field_name)
        )
    } else {
        writeln!(out, "  value->>{},", json_member_path(field_name))
    }
}

/// Write a SELECT clause for JSON extraction of multiple fields.
pub fn write_json_select_fields<'a>(
    out: &mut String,
    fields: impl Iterator<Item = &'a str>,
) -> std::fmt::Result {
    writeln!(out, "SELECT")?;
    for field in fields {
        write_json_extract(out, field)?;
    }
    erase_trailing_comma_newline(out);
    Ok(())
}
