use std::path::Path;

use tracing::error;

use crate::job::{self, storage::sqlite::Statement};

pub struct LocalDatabase {
    pool: sqlx::SqlitePool,
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("sqlite error: {0}")]
    Sqlite(sqlx::Error),
}

pub struct Client {
    pool: sqlx::SqlitePool,
}

impl LocalDatabase {
    #[cfg(test)]
    pub async fn open(url: &str) -> Result<Self, sqlx::Error> {
        let options = url.parse::<sqlx::sqlite::SqliteConnectOptions>()?;
        Self::connect(options).await
    }

    /// Open the database file at `path`, creating it when missing.
    pub async fn create(path: &Path) -> Result<Self, sqlx::Error> {
        let options = sqlx::sqlite::SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);
        Self::connect(options)
            .await
            .inspect_err(|error| error!(%error, path = %path.display(), "Failed to open database"))
    }

    async fn connect(options: sqlx::sqlite::SqliteConnectOptions) -> Result<Self, sqlx::Error> {
        let pool = sqlx::pool::PoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;
        Ok(Self { pool })
    }

    #[cfg(test)]
    pub fn pool(&self) -> &sqlx::SqlitePool {
        &self.pool
    }

    pub fn client(&self) -> Client {
        Client {
            pool: self.pool.clone(),
        }
    }
}

impl job::storage::sqlite::Client for Client {
    type Error = Error;

    async fn query<
        'q,
        R: for<'a> sqlx::FromRow<'a, sqlx::sqlite::SqliteRow> + Send + Unpin,
        P: sqlx::Encode<'q, sqlx::Sqlite> + sqlx::Type<sqlx::Sqlite> + Sync,
    >(
        &self,
        statement: &'q str,
        params: &'q [&'q P],
    ) -> Result<Vec<R>, Self::Error> {
        let query = params.iter().fold(
            sqlx::query_as::<sqlx::Sqlite, R>(statement),
            |query, param| query.bind(param),
        );
        query.fetch_all(&self.pool).await.map_err(Error::Sqlite)
    }

    async fn execute_atomically(&self, statements: &[Statement]) -> Result<(), Self::Error> {
        let mut tx = self.pool.begin().await.map_err(Error::Sqlite)?;
        for statement in statements {
            let query = statement
                .params
                .iter()
                .fold(sqlx::query(&statement.sql), |query, param| {
                    query.bind(param.as_str())
                });
            query.execute(&mut *tx).await.map_err(Error::Sqlite)?;
        }
        tx.commit().await.map_err(Error::Sqlite)
    }
}
