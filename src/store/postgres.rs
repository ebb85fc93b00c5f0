use super::result::QueryResult;
use super::value::{DataType, Param, Value};
use super::{Dialect, Store};
use crate::error::{DashboardError, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use tokio_postgres::types::{ToSql, Type};
use tokio_postgres::{Client, NoTls, Row};
use tracing::{debug, error};

pub struct PostgresStore {
    client: Client,
}

impl PostgresStore {
    pub async fn connect(url: &str) -> Result<Self> {
        let (client, connection) = tokio_postgres::connect(url, NoTls)
            .await
            .map_err(|e| DashboardError::Connection(engine_message(&e)))?;

        tokio::spawn(async move {
            if let Err(e) = connection.await {
                error!(error = %e, "Postgres connection closed with error");
            }
        });

        Ok(Self { client })
    }

    fn bind(params: &[Param]) -> Vec<Box<dyn ToSql + Sync + Send>> {
        params
            .iter()
            .map(|p| -> Box<dyn ToSql + Sync + Send> {
                match p {
                    Param::Int(i) => Box::new(*i),
                    Param::Float(f) => Box::new(*f),
                    Param::Text(s) => Box::new(s.clone()),
                    Param::Date(d) => Box::new(*d),
                }
            })
            .collect()
    }
}

#[async_trait::async_trait]
impl Store for PostgresStore {
    async fn query(&self, sql: &str, params: &[Param]) -> Result<QueryResult> {
        let statement = self
            .client
            .prepare(sql)
            .await
            .map_err(|e| DashboardError::QueryFailed(engine_message(&e)))?;

        let bound = Self::bind(params);
        let refs: Vec<&(dyn ToSql + Sync)> = bound
            .iter()
            .map(|b| b.as_ref() as &(dyn ToSql + Sync))
            .collect();

        let rows = self
            .client
            .query(&statement, &refs)
            .await
            .map_err(|e| DashboardError::QueryFailed(engine_message(&e)))?;

        let header: Vec<(String, DataType)> = statement
            .columns()
            .iter()
            .map(|c| (c.name().to_string(), data_type_for(c.type_())))
            .collect();

        let mut data = Vec::with_capacity(rows.len());
        for row in &rows {
            let mut cells = Vec::with_capacity(header.len());
            for (idx, column) in statement.columns().iter().enumerate() {
                let value = decode(row, idx, column.type_())
                    .map_err(|e| DashboardError::QueryFailed(engine_message(&e)))?;
                cells.push(value);
            }
            data.push(cells);
        }

        Ok(QueryResult::from_rows(header, data))
    }

    fn dialect(&self) -> Dialect {
        Dialect::Postgres
    }
}

fn engine_message(e: &tokio_postgres::Error) -> String {
    match e.as_db_error() {
        Some(db) => format!("{}: {}", db.severity(), db.message()),
        None => e.to_string(),
    }
}

fn data_type_for(ty: &Type) -> DataType {
    match ty.name() {
        "bool" => DataType::Boolean,
        "int2" | "int4" | "int8" | "oid" => DataType::Integer,
        "float4" | "float8" | "numeric" => DataType::Float,
        "text" | "varchar" | "bpchar" | "name" => DataType::Text,
        "date" => DataType::Date,
        "timestamp" | "timestamptz" => DataType::Timestamp,
        _ => DataType::Unknown,
    }
}

fn decode(row: &Row, idx: usize, ty: &Type) -> std::result::Result<Value, tokio_postgres::Error> {
    let value = match ty.name() {
        "bool" => row.try_get::<_, Option<bool>>(idx)?.map(Value::Bool),
        "int2" => row.try_get::<_, Option<i16>>(idx)?.map(|v| Value::Int(v.into())),
        "int4" => row.try_get::<_, Option<i32>>(idx)?.map(|v| Value::Int(v.into())),
        "int8" => row.try_get::<_, Option<i64>>(idx)?.map(Value::Int),
        "oid" => row.try_get::<_, Option<u32>>(idx)?.map(|v| Value::Int(v.into())),
        "float4" => row.try_get::<_, Option<f32>>(idx)?.map(|v| Value::Float(v.into())),
        "float8" => row.try_get::<_, Option<f64>>(idx)?.map(Value::Float),
        "numeric" => row.try_get::<_, Option<Decimal>>(idx)?.map(numeric_value),
        "text" | "varchar" | "bpchar" | "name" => {
            row.try_get::<_, Option<String>>(idx)?.map(Value::Text)
        }
        "date" => row.try_get::<_, Option<NaiveDate>>(idx)?.map(Value::Date),
        "timestamp" => row
            .try_get::<_, Option<NaiveDateTime>>(idx)?
            .map(Value::Timestamp),
        "timestamptz" => row
            .try_get::<_, Option<DateTime<Utc>>>(idx)?
            .map(|v| Value::Timestamp(v.naive_utc())),
        other => {
            debug!(column = idx, pg_type = other, "Unsupported column type, showing NULL");
            None
        }
    };
    Ok(value.unwrap_or(Value::Null))
}

fn numeric_value(d: Decimal) -> Value {
    d.to_f64().map(Value::Float).unwrap_or(Value::Null)
}
