use std::future::Future;

use crate::{
    bind::Params,
    builder::QueryBuilder,
    error::{Error, Result},
};

/// Finished sql text with its positional parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedQuery {
    sql: String,
    params: Params,
}

impl PreparedQuery {
    pub(crate) fn new(sql: String, params: Params) -> Self {
        Self { sql, params }
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn params(&self) -> &Params {
        &self.params
    }
}

/// Runs a prepared query and maps every row into `T`.
///
/// Implementations must bind each parameter at its stored 1-based position.
pub trait Executor<T> {
    type Error: std::error::Error + Send + Sync + 'static;

    fn fetch_all(
        &mut self,
        query: &PreparedQuery,
    ) -> impl Future<Output = std::result::Result<Vec<T>, Self::Error>> + Send;
}

impl QueryBuilder {
    /// Hands the query over to `executor`, consuming the builder.
    pub async fn fetch_all<T, E>(self, executor: &mut E) -> Result<Vec<T>>
    where
        E: Executor<T>,
    {
        let query = self.build();
        tracing::debug!(sql = query.sql(), params = ?query.params(), "prepared query");
        executor.fetch_all(&query).await.map_err(|err| {
            tracing::debug!(error = %err, "query failed");
            Error::problems_persisting(err)
        })
    }

    /// Like [`QueryBuilder::fetch_all`] but keeps only the first row.
    pub async fn fetch_first<T, E>(self, executor: &mut E) -> Result<Option<T>>
    where
        E: Executor<T>,
    {
        let rows = self.fetch_all(executor).await?;
        Ok(rows.into_iter().next())
    }
}

#[cfg(feature = "sqlite")]
mod sqlite {
    use sqlx::{
        Sqlite, SqlitePool,
        query::QueryAs,
        sqlite::{SqliteArguments, SqliteRow},
    };

    use crate::bind::Bind;

    use super::{Executor, PreparedQuery};

    type SqliteQueryAs<'q, O> = QueryAs<'q, Sqlite, O, SqliteArguments<'q>>;

    fn bind_value<'q, O>(query: SqliteQueryAs<'q, O>, value: &Bind) -> SqliteQueryAs<'q, O> {
        match value.clone() {
            Bind::Null => query.bind(None::<String>),
            Bind::String(value) => query.bind(value),
            Bind::StaticString(value) => query.bind(value),
            Bind::Bool(value) => query.bind(value),
            Bind::I16(value) => query.bind(value),
            Bind::I32(value) => query.bind(value),
            Bind::I64(value) => query.bind(value),
            Bind::F32(value) => query.bind(value),
            Bind::F64(value) => query.bind(value),
            #[cfg(feature = "uuid")]
            Bind::Uuid(value) => query.bind(value),
            #[cfg(feature = "chrono")]
            Bind::Date(value) => query.bind(value),
            #[cfg(feature = "chrono")]
            Bind::DateTime(value) => query.bind(value),
            #[cfg(feature = "chrono")]
            Bind::DateTimeUtc(value) => query.bind(value),
            #[cfg(feature = "json")]
            Bind::Json(value) => query.bind(sqlx::types::Json(value)),
        }
    }

    // sqlite reads `?NNN` as the NNN-th argument, so binding in positional order is enough
    impl<T> Executor<T> for SqlitePool
    where
        T: for<'r> sqlx::FromRow<'r, SqliteRow> + Send + Unpin,
    {
        type Error = sqlx::Error;

        async fn fetch_all(&mut self, query: &PreparedQuery) -> Result<Vec<T>, sqlx::Error> {
            let mut sqlx_query = sqlx::query_as::<_, T>(query.sql());
            for bind in query.params().values() {
                sqlx_query = bind_value(sqlx_query, bind);
            }
            sqlx_query.fetch_all(&*self).await
        }
    }

}

#[cfg(test)]
mod tests {
    use std::fmt;

    use crate::{bind::Bind, col::Column, col::Projection};

    use super::*;

    #[derive(Debug)]
    struct StoreDown;

    impl fmt::Display for StoreDown {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("connection refused")
        }
    }

    impl std::error::Error for StoreDown {}

    /// Records what it was asked to run and replies with canned rows.
    #[derive(Default)]
    struct MockExecutor {
        rows: Vec<(i64, String)>,
        fail: bool,
        seen: Vec<PreparedQuery>,
    }

    impl Executor<(i64, String)> for MockExecutor {
        type Error = StoreDown;

        async fn fetch_all(
            &mut self,
            query: &PreparedQuery,
        ) -> std::result::Result<Vec<(i64, String)>, StoreDown> {
            self.seen.push(query.clone());
            if self.fail {
                return Err(StoreDown);
            }
            Ok(self.rows.clone())
        }
    }

    fn orders_query() -> QueryBuilder {
        let id = Column::new("orders", "id");
        let status = Column::new("orders", "status");
        let mut builder = QueryBuilder::new();
        builder.configure_table_alias("orders", "o");
        let cond = builder.eq(&status, "open");
        builder
            .select(&Projection::from(vec![id, status]), "orders", ())
            .where_clause(cond);
        builder
    }

    #[tokio::test]
    async fn test_fetch_all_hands_over_sql_and_params() {
        let mut executor = MockExecutor {
            rows: vec![(1, "open".into()), (2, "open".into())],
            ..Default::default()
        };
        let rows = orders_query().fetch_all(&mut executor).await.unwrap();
        assert_eq!(2, rows.len());

        let seen = &executor.seen[0];
        assert_eq!(
            "select o.id, o.status from orders o where o.status = ?1",
            seen.sql()
        );
        assert_eq!(Some(&Bind::String("open".into())), seen.params().get(1));
        assert_eq!(1, seen.params().len());
    }

    #[tokio::test]
    async fn test_fetch_first() {
        let mut executor = MockExecutor {
            rows: vec![(7, "open".into()), (8, "open".into())],
            ..Default::default()
        };
        let row = orders_query().fetch_first(&mut executor).await.unwrap();
        assert_eq!(Some((7, "open".to_owned())), row);

        let mut empty = MockExecutor::default();
        let row = orders_query().fetch_first(&mut empty).await.unwrap();
        assert_eq!(None, row);
    }

    #[tokio::test]
    async fn test_failure_is_wrapped() {
        let mut executor = MockExecutor {
            fail: true,
            ..Default::default()
        };
        let err = orders_query().fetch_all(&mut executor).await.unwrap_err();
        let Error::ProblemsPersisting { ref message, ref source } = err;
        assert_eq!("connection refused", message);
        assert!(source.downcast_ref::<StoreDown>().is_some());
        assert_eq!("problems persisting: connection refused", err.to_string());
    }
}
