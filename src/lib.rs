use std::path::PathBuf;

use tracing::warn;

pub mod config;
pub mod deploy;
pub mod job;
pub mod process_data;
pub mod schema;
pub mod spreadsheet;

#[cfg(test)]
mod tests;

#[derive(Debug, thiserror::Error)]
#[error("{context}: {detail}")]
pub struct Error {
    pub context: Box<ErrorContext>,
    pub detail: Box<ErrorDetail>,
}

#[derive(Debug, Clone)]
pub struct ErrorContext {
    pub path: PathBuf,
    /// 1-based row of the worksheet, when the error belongs to a single row.
    pub row: Option<usize>,
}

impl ErrorContext {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            row: None,
        }
    }

    pub fn with_row(&self, row: usize) -> Self {
        Self {
            path: self.path.clone(),
            row: Some(row),
        }
    }

    pub fn error(&self, detail: ErrorDetail) -> Error {
        Error {
            context: Box::new(self.clone()),
            detail: Box::new(detail),
        }
    }
}

impl std::fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.row {
            Some(row) => write!(f, "{}(row {row})", self.path.display()),
            None => write!(f, "{}", self.path.display()),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ErrorDetail {
    #[error("File name does not match {pattern}: {name}")]
    InvalidFileName { pattern: &'static str, name: String },
    #[error("Failed to open workbook: {0}")]
    OpenWorkbook(calamine::Error),
    #[error("Workbook has no worksheet")]
    NoWorksheet,
    #[error("Header row {0} is missing")]
    MissingHeader(usize),
    #[error("Missing column: {0}")]
    MissingColumn(&'static str),
    #[error("Row has no name")]
    MissingName,
    #[error("Row appears before any continent marker")]
    MissingContinent,
}

/// Outcome of a successful conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub points: usize,
    pub champions: usize,
}

#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error(transparent)]
    Input(#[from] Error),
    #[error("Failed to open database {path}: {source}")]
    OpenDatabase { path: PathBuf, source: sqlx::Error },
    #[error(transparent)]
    Write(#[from] job::JobError<deploy::local::db::Error>),
}

/// Convert the workbook named by `config` and upsert its records into the
/// configured database.
///
/// The whole sheet is scanned before the database is opened, so input errors
/// never leave a partially written database behind.
pub async fn run(config: &config::RunConfig) -> Result<Summary, RunError> {
    let rows = spreadsheet::load_rows(&config.input)?;
    let ctx = ErrorContext::new(&config.input);
    let tables = process_data::convert(&ctx, rows, config.updated)?;
    if tables.is_empty() {
        warn!(input = %config.input.display(), "export contains no records");
    }
    let db = deploy::local::db::LocalDatabase::create(&config.database)
        .await
        .map_err(|source| RunError::OpenDatabase {
            path: config.database.clone(),
            source,
        })?;
    let executor = job::JobExecutor { db: db.client() };
    executor.batch(&tables).await?;
    Ok(Summary {
        points: tables.points.len(),
        champions: tables.champions.len(),
    })
}
