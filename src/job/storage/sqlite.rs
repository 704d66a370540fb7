/// A parameterised statement executed as part of a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    pub sql: String,
    pub params: Vec<String>,
}

impl Statement {
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            params: Vec::new(),
        }
    }

    pub fn bind(mut self, param: impl Into<String>) -> Self {
        self.params.push(param.into());
        self
    }
}

pub trait Client {
    type Error;

    fn query<
        'q,
        R: for<'a> sqlx::FromRow<'a, sqlx::sqlite::SqliteRow> + Send + Unpin,
        P: sqlx::Encode<'q, sqlx::Sqlite> + sqlx::Type<sqlx::Sqlite> + Sync,
    >(
        &self,
        statement: &'q str,
        params: &'q [&'q P],
    ) -> impl Future<Output = Result<Vec<R>, Self::Error>>;

    /// Execute `statements` in order inside one transaction.
    fn execute_atomically(
        &self,
        statements: &[Statement],
    ) -> impl Future<Output = Result<(), Self::Error>>;
}
