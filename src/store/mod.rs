mod postgres;
mod result;
mod sqlite;
mod value;

pub use postgres::PostgresStore;
pub use result::{infer_type, Column, QueryResult};
pub use sqlite::SqliteStore;
pub use value::{DataType, Param, Value};

use crate::error::{DashboardError, Result};
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    Postgres,
    Sqlite,
}

impl Dialect {
    pub fn placeholder(self, n: usize) -> String {
        match self {
            Dialect::Postgres => format!("${}", n),
            Dialect::Sqlite => format!("?{}", n),
        }
    }

    pub fn date_plus_days(self, n: usize, days: i64) -> String {
        match self {
            Dialect::Postgres => format!("{}::DATE + INTERVAL '{} day'", self.placeholder(n), days),
            Dialect::Sqlite => format!("date({}, '+{} day')", self.placeholder(n), days),
        }
    }

    pub fn date_param(self, n: usize) -> String {
        match self {
            Dialect::Postgres => format!("{}::DATE", self.placeholder(n)),
            Dialect::Sqlite => self.placeholder(n),
        }
    }
}

#[async_trait::async_trait]
pub trait Store: Send + Sync {
    async fn query(&self, sql: &str, params: &[Param]) -> Result<QueryResult>;

    fn dialect(&self) -> Dialect;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreTarget {
    Postgres(String),
    Sqlite(String),
}

impl StoreTarget {
    pub fn parse(url: &str) -> Result<Self> {
        let url = url.trim();
        if url.starts_with("postgres://") || url.starts_with("postgresql://") {
            return Ok(StoreTarget::Postgres(url.to_string()));
        }
        if let Some(path) = url.strip_prefix("sqlite://") {
            return Ok(StoreTarget::Sqlite(path.to_string()));
        }
        if let Some(path) = url.strip_prefix("sqlite:") {
            return Ok(StoreTarget::Sqlite(path.to_string()));
        }
        if url.ends_with(".db") || url.ends_with(".sqlite") || url.ends_with(".sqlite3") {
            return Ok(StoreTarget::Sqlite(url.to_string()));
        }
        Err(DashboardError::Config(format!(
            "Unsupported database URL '{}': expected postgres://, sqlite: or a .db file",
            url
        )))
    }
}

pub async fn connect(url: &str) -> Result<Arc<dyn Store>> {
    let store: Arc<dyn Store> = match StoreTarget::parse(url)? {
        StoreTarget::Postgres(url) => {
            info!(backend = "postgres", "Connecting to store");
            Arc::new(PostgresStore::connect(&url).await?)
        }
        StoreTarget::Sqlite(path) => {
            info!(backend = "sqlite", path = %path, "Opening store");
            Arc::new(SqliteStore::open(&path)?)
        }
    };
    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_targets() {
        assert_eq!(
            StoreTarget::parse("postgres://u@localhost:5432/foodwaste").unwrap(),
            StoreTarget::Postgres("postgres://u@localhost:5432/foodwaste".to_string())
        );
        assert_eq!(
            StoreTarget::parse("sqlite::memory:").unwrap(),
            StoreTarget::Sqlite(":memory:".to_string())
        );
        assert_eq!(
            StoreTarget::parse("data/food.db").unwrap(),
            StoreTarget::Sqlite("data/food.db".to_string())
        );
        assert!(StoreTarget::parse("mysql://localhost").is_err());
    }

    #[test]
    fn test_dialect_placeholders() {
        assert_eq!(Dialect::Postgres.placeholder(1), "$1");
        assert_eq!(Dialect::Sqlite.placeholder(2), "?2");
        assert_eq!(
            Dialect::Postgres.date_plus_days(1, 1),
            "$1::DATE + INTERVAL '1 day'"
        );
        assert_eq!(Dialect::Sqlite.date_plus_days(1, 1), "date(?1, '+1 day')");
    }
}
