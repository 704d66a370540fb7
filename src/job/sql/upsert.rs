use std::fmt::Write as _;

use super::builder::{quote_ident, write_comma_separated, write_json_select_fields};

/// Insert or replace every row of the JSON array found under `table` in the
/// bound parameter. Columns absent from a row are written as NULL.
///
/// Each array element is aliased `record`.
pub fn generate(out: &mut String, table: &str, columns: &[&str]) -> std::fmt::Result {
    write!(out, "INSERT OR REPLACE INTO {}(", quote_ident(table))?;
    write_comma_separated(out, columns, |out, column| {
        write!(out, "{}", quote_ident(column))
    })?;
    writeln!(out, ")")?;
    write_json_select_fields(out, columns.iter().copied())?;
    writeln!(
        out,
        "FROM json_each(?, {}) AS record",
        super::builder::json_member_path(table)
    )?;
    writeln!(out, "WHERE 1;")?;
    Ok(())
}
