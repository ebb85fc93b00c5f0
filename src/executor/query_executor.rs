use crate::error::{DashboardError, Result};
use crate::store::{Dialect, Param, QueryResult, Store};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, warn};

#[derive(Clone)]
pub struct QueryExecutor {
    store: Arc<dyn Store>,
}

impl QueryExecutor {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub fn dialect(&self) -> Dialect {
        self.store.dialect()
    }

    pub async fn execute(&self, sql: &str) -> Result<QueryResult> {
        self.execute_with(sql, &[]).await
    }

    /// The text goes to the engine unchanged; only blank input is refused.
    pub async fn execute_with(&self, sql: &str, params: &[Param]) -> Result<QueryResult> {
        if sql.trim().is_empty() {
            return Err(DashboardError::EmptyQuery);
        }

        let started = Instant::now();
        match self.store.query(sql, params).await {
            Ok(result) => {
                debug!(
                    rows = result.row_count(),
                    columns = result.column_count(),
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "Query executed"
                );
                Ok(result)
            }
            Err(e) => {
                warn!(
                    error = %e,
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "Query failed"
                );
                Err(e)
            }
        }
    }
}
