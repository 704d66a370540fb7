use crate::schema::FieldType;
use std::fmt::Write as _;

use super::builder::{quote_ident, sqlite_type};

pub fn generate(out: &mut String, table: &str, column: &str, field: FieldType) -> std::fmt::Result {
    writeln!(
        out,
        "ALTER TABLE {} ADD COLUMN {} {};",
        quote_ident(table),
        quote_ident(column),
        sqlite_type(field)
    )
}
