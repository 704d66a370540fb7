use crate::schema::{FieldType, TableSchema};

mod alter;
mod builder;
mod ddl;
mod upsert;

/// Column names of a table, empty when the table does not exist.
pub const TABLE_COLUMNS: &str = "SELECT name FROM pragma_table_info(?)";

pub fn ddl(schema: &TableSchema) -> String {
    let mut out = String::new();
    ddl::generate(&mut out, schema).unwrap();
    out
}

pub fn add_column(table: &str, column: &str, field: FieldType) -> String {
    let mut out = String::new();
    alter::generate(&mut out, table, column, field).unwrap();
    out
}

pub fn upsert(table: &str, columns: &[&str]) -> String {
    let mut out = String::new();
    upsert::generate(&mut out, table, columns).unwrap();
    out
}
