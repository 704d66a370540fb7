//! Job executor implementation
//!
//! This module brings the output tables up to the shape of the scanned
//! records and upserts them, all within a single transaction.

use indexmap::{IndexMap, IndexSet};
use sqlx::FromRow;
use tracing::{debug, error, info};

use crate::{
    process_data::Tables,
    schema::{FieldType, TableSchema},
};

use super::{
    sql,
    storage::{self, sqlite::Statement},
};

/// Job executor that writes one scan into the database.
pub struct JobExecutor<D> {
    pub db: D,
}

/// Error type for job execution.
#[derive(Debug, thiserror::Error)]
pub enum JobError<DE> {
    #[error("database: {0}")]
    Database(DE),
    #[error("encode records: {0}")]
    Encode(serde_json::Error),
}

#[derive(FromRow)]
struct ColumnRow {
    name: String,
}

/// Columns carried by `rows` that `known` lacks, typed by their first
/// non-null value.
fn missing_columns(
    known: &IndexSet<String>,
    rows: &[serde_json::Value],
) -> IndexMap<String, FieldType> {
    let mut missing = IndexMap::<String, Option<FieldType>>::new();
    for (name, value) in rows
        .iter()
        .filter_map(serde_json::Value::as_object)
        .flatten()
    {
        if known.contains(name) {
            continue;
        }
        let field = missing.entry(name.clone()).or_default();
        if field.is_none() {
            *field = FieldType::infer(value);
        }
    }
    missing
        .into_iter()
        .map(|(name, field)| (name, field.unwrap_or(FieldType::String)))
        .collect()
}

impl<D: storage::sqlite::Client> JobExecutor<D>
where
    D::Error: std::error::Error,
{
    /// Current columns of `table`, empty when it does not exist yet.
    pub async fn table_columns(&self, table: &str) -> Result<Vec<String>, D::Error> {
        let rows = self
            .db
            .query::<ColumnRow, &str>(sql::TABLE_COLUMNS, &[&table])
            .await?;
        Ok(rows.into_iter().map(|row| row.name).collect())
    }

    /// Statements creating or widening the table of `schema` and upserting `rows`.
    async fn plan_table(
        &self,
        schema: &TableSchema,
        rows: &[serde_json::Value],
        param: &str,
    ) -> Result<Vec<Statement>, D::Error> {
        let mut statements = Vec::new();
        let mut columns = self
            .table_columns(schema.name)
            .await?
            .into_iter()
            .collect::<IndexSet<_>>();
        if columns.is_empty() {
            debug!(table = schema.name, "create table");
            statements.push(Statement::new(sql::ddl(schema)));
            columns.extend(schema.fields.keys().map(|name| (*name).to_owned()));
        }
        for (column, field) in missing_columns(&columns, rows) {
            debug!(table = schema.name, column, ?field, "add column");
            statements.push(Statement::new(sql::add_column(schema.name, &column, field)));
            columns.insert(column);
        }
        if !rows.is_empty() {
            let columns = columns.iter().map(String::as_str).collect::<Vec<_>>();
            statements.push(Statement::new(sql::upsert(schema.name, &columns)).bind(param));
        }
        Ok(statements)
    }

    /// Write every record of `tables`, replacing rows with the same id.
    ///
    /// Nothing is written unless every statement succeeds.
    pub async fn batch(&self, tables: &Tables) -> Result<(), JobError<D::Error>> {
        let records = serde_json::to_value(tables).map_err(JobError::Encode)?;
        let param = records.to_string();
        let mut statements = Vec::new();
        for schema in TableSchema::all() {
            let rows = records
                .get(schema.name)
                .and_then(serde_json::Value::as_array)
                .map(Vec::as_slice)
                .unwrap_or_default();
            info!(table = schema.name, rows = rows.len(), "upsert rows");
            statements.extend(
                self.plan_table(&schema, rows, &param)
                    .await
                    .map_err(JobError::Database)
                    .inspect_err(|error| error!(%error, table = schema.name, "failed to inspect table"))?,
            );
        }
        self.db
            .execute_atomically(&statements)
            .await
            .map_err(JobError::Database)
            .inspect_err(|error| error!(%error, "failed to synchronize database"))?;
        Ok(())
    }
}
