use crate::schema::TableSchema;
use std::fmt::Write as _;

use super::builder::{quote_ident, sqlite_type};

pub fn generate(out: &mut String, schema: &TableSchema) -> std::fmt::Result {
    writeln!(out, "CREATE TABLE IF NOT EXISTS {} (", quote_ident(schema.name))?;
    for (name, field) in &schema.fields {
        write!(out, "  {} {}", quote_ident(name), sqlite_type(*field))?;
        if *name == schema.id_name {
            writeln!(out, " NOT NULL,")?;
        } else {
            writeln!(out, ",")?;
        }
    }
    writeln!(out, "  PRIMARY KEY ({})", quote_ident(schema.id_name))?;
    writeln!(out, ");")?;
    Ok(())
}
