use super::result::{infer_type, QueryResult};
use super::value::{DataType, Param, Value};
use super::{Dialect, Store};
use crate::error::{DashboardError, Result};
use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::types::{Value as SqlValue, ValueRef};
use rusqlite::{params_from_iter, Connection};
use std::sync::{Arc, Mutex};

pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    pub fn open(path: &str) -> Result<Self> {
        let conn = Connection::open(path).map_err(|e| DashboardError::Connection(e.to_string()))?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn in_memory() -> Result<Self> {
        let conn =
            Connection::open_in_memory().map_err(|e| DashboardError::Connection(e.to_string()))?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn execute_batch(&self, sql: &str) -> Result<()> {
        let conn = self
            .conn
            .lock()
            .map_err(|_| DashboardError::QueryFailed("SQLite connection lock poisoned".into()))?;
        conn.execute_batch(sql)
            .map_err(|e| DashboardError::QueryFailed(e.to_string()))
    }

    fn bind(params: &[Param]) -> Vec<SqlValue> {
        params
            .iter()
            .map(|p| match p {
                Param::Int(i) => SqlValue::Integer(*i),
                Param::Float(f) => SqlValue::Real(*f),
                Param::Text(s) => SqlValue::Text(s.clone()),
                Param::Date(d) => SqlValue::Text(d.format("%Y-%m-%d").to_string()),
            })
            .collect()
    }

    fn run(conn: &Connection, sql: &str, params: Vec<SqlValue>) -> rusqlite::Result<QueryResult> {
        let mut stmt = conn.prepare(sql)?;
        let declared: Vec<(String, DataType)> = stmt
            .columns()
            .iter()
            .map(|c| {
                let ty = c.decl_type().map(DataType::from_decl).unwrap_or(DataType::Unknown);
                (c.name().to_string(), ty)
            })
            .collect();

        let width = declared.len();
        let mut data: Vec<Vec<Value>> = Vec::new();
        let mut rows = stmt.query(params_from_iter(params))?;
        while let Some(row) = rows.next()? {
            let mut cells = Vec::with_capacity(width);
            for (idx, (_, ty)) in declared.iter().enumerate() {
                cells.push(convert(row.get_ref(idx)?, *ty));
            }
            data.push(cells);
        }

        let header = declared
            .into_iter()
            .enumerate()
            .map(|(idx, (name, ty))| {
                let column: Vec<Value> = data.iter().map(|r| r[idx].clone()).collect();
                (name, resolve_type(ty, &column))
            })
            .collect();

        Ok(QueryResult::from_rows(header, data))
    }
}

#[async_trait::async_trait]
impl Store for SqliteStore {
    async fn query(&self, sql: &str, params: &[Param]) -> Result<QueryResult> {
        let conn = self.conn.clone();
        let sql = sql.to_string();
        let params = Self::bind(params);

        tokio::task::spawn_blocking(move || {
            let conn = conn
                .lock()
                .map_err(|_| DashboardError::QueryFailed("SQLite connection lock poisoned".into()))?;
            Self::run(&conn, &sql, params).map_err(|e| DashboardError::QueryFailed(e.to_string()))
        })
        .await
        .map_err(|e| DashboardError::QueryFailed(e.to_string()))?
    }

    fn dialect(&self) -> Dialect {
        Dialect::Sqlite
    }
}

/// SQLite stores dates and booleans as text and integers; the declared
/// column type says how to read them back.
fn convert(raw: ValueRef<'_>, declared: DataType) -> Value {
    match (raw, declared) {
        (ValueRef::Null, _) => Value::Null,
        (ValueRef::Integer(i), DataType::Boolean) => Value::Bool(i != 0),
        (ValueRef::Integer(i), DataType::Float) => Value::Float(i as f64),
        (ValueRef::Integer(i), _) => Value::Int(i),
        (ValueRef::Real(f), _) => Value::Float(f),
        (ValueRef::Text(bytes), ty) => {
            let text = String::from_utf8_lossy(bytes).into_owned();
            match ty {
                DataType::Date => NaiveDate::parse_from_str(&text, "%Y-%m-%d")
                    .map(Value::Date)
                    .unwrap_or(Value::Text(text)),
                DataType::Timestamp => parse_timestamp(&text)
                    .map(Value::Timestamp)
                    .unwrap_or(Value::Text(text)),
                _ => Value::Text(text),
            }
        }
        (ValueRef::Blob(bytes), _) => Value::Text(format!("<{} bytes>", bytes.len())),
    }
}

fn parse_timestamp(text: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S"))
        .ok()
}

fn resolve_type(declared: DataType, values: &[Value]) -> DataType {
    let inferred = infer_type(values);
    match (declared, inferred) {
        (DataType::Unknown, inferred) => inferred,
        (declared, DataType::Unknown) => declared,
        (DataType::Float, DataType::Integer) => DataType::Float,
        (declared, inferred) if declared == inferred => declared,
        (_, inferred) => inferred,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_expression_columns_are_inferred() {
        let store = SqliteStore::in_memory().unwrap();
        let result = store.query("SELECT 1 AS a, 2.5 AS b, 'x' AS c", &[]).await.unwrap();

        assert_eq!(result.row_count(), 1);
        assert_eq!(result.column("a").unwrap().data_type, DataType::Integer);
        assert_eq!(result.column("b").unwrap().data_type, DataType::Float);
        assert_eq!(result.column("c").unwrap().data_type, DataType::Text);
    }

    #[tokio::test]
    async fn test_declared_date_column_is_parsed() {
        let store = SqliteStore::in_memory().unwrap();
        store
            .execute_batch(
                "CREATE TABLE t (d DATE, n INTEGER);
                 INSERT INTO t VALUES ('2025-03-15', 4);",
            )
            .unwrap();

        let result = store.query("SELECT d, n FROM t", &[]).await.unwrap();
        let expected = NaiveDate::from_ymd_opt(2025, 3, 15).unwrap();
        assert_eq!(result.cell(0, 0), Some(&Value::Date(expected)));
        assert_eq!(result.column("d").unwrap().data_type, DataType::Date);
    }

    #[tokio::test]
    async fn test_bound_params() {
        let store = SqliteStore::in_memory().unwrap();
        let date = NaiveDate::from_ymd_opt(2025, 3, 15).unwrap();
        let result = store
            .query("SELECT date(?1, '+1 day') AS next", &[Param::Date(date)])
            .await
            .unwrap();
        assert_eq!(result.scalar(), Some(&Value::Text("2025-03-16".into())));
    }

    #[tokio::test]
    async fn test_syntax_error_is_query_failed() {
        let store = SqliteStore::in_memory().unwrap();
        let err = store.query("SELEKT * FROM x", &[]).await.unwrap_err();
        match err {
            DashboardError::QueryFailed(msg) => assert!(msg.contains("SELEKT")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_resolve_type_prefers_values_on_conflict() {
        let values = vec![Value::Text("n/a".into()), Value::Int(3)];
        assert_eq!(resolve_type(DataType::Integer, &values), DataType::Text);
        assert_eq!(resolve_type(DataType::Float, &[Value::Float(1.0)]), DataType::Float);
        assert_eq!(resolve_type(DataType::Integer, &[Value::Null]), DataType::Integer);
    }
}
