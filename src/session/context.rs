use super::cache::ResultCache;
use crate::chart::{ChartKind, ColumnChoices};
use crate::error::DashboardError;
use crate::executor::QueryExecutor;
use crate::pages::Page;
use crate::render::Block;
use crate::store::QueryResult;
use chrono::NaiveDate;
use tracing::info;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq)]
pub enum QueryOutcome {
    Succeeded { rows: usize },
    Failed(String),
    Blank,
}

impl QueryOutcome {
    pub fn banner(&self) -> Block {
        match self {
            QueryOutcome::Succeeded { .. } => {
                Block::Success("Query executed successfully!".to_string())
            }
            QueryOutcome::Failed(msg) => Block::Error(msg.clone()),
            QueryOutcome::Blank => Block::Warning("Please enter a query.".to_string()),
        }
    }
}

#[derive(Debug)]
pub struct SessionContext {
    id: Uuid,
    cache: ResultCache,
    last_outcome: Option<QueryOutcome>,
    pub page: Page,
    pub chart: ChartKind,
    pub choices: ColumnChoices,
    pub reference_date: NaiveDate,
}

impl SessionContext {
    pub fn new(reference_date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            cache: ResultCache::new(),
            last_outcome: None,
            page: Page::Overview,
            chart: ChartKind::Select,
            choices: ColumnChoices::default(),
            reference_date,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn result(&self) -> Option<&QueryResult> {
        self.cache.get()
    }

    pub fn outcome(&self) -> Option<&QueryOutcome> {
        self.last_outcome.as_ref()
    }

    pub fn set_chart(&mut self, kind: ChartKind, choices: ColumnChoices) {
        self.chart = kind;
        self.choices = choices;
    }

    /// Runs ad-hoc SQL. Only a successful run replaces the cached result;
    /// a failure leaves the previous table in place next to the error.
    pub async fn run_query(&mut self, executor: &QueryExecutor, sql: &str) -> QueryOutcome {
        let outcome = match executor.execute(sql).await {
            Ok(result) => {
                let rows = result.row_count();
                info!(
                    session = %self.id,
                    rows,
                    columns = result.column_count(),
                    "Replacing cached query result"
                );
                self.cache.set(result);
                self.choices = ColumnChoices::default();
                QueryOutcome::Succeeded { rows }
            }
            Err(DashboardError::EmptyQuery) => QueryOutcome::Blank,
            Err(e) => QueryOutcome::Failed(e.to_string()),
        };
        self.last_outcome = Some(outcome.clone());
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{SqliteStore, Value};
    use std::sync::Arc;

    fn session() -> (SessionContext, QueryExecutor) {
        let store = Arc::new(SqliteStore::in_memory().unwrap());
        let date = NaiveDate::from_ymd_opt(2025, 3, 15).unwrap();
        (SessionContext::new(date), QueryExecutor::new(store))
    }

    #[tokio::test]
    async fn test_failed_query_keeps_cached_result() {
        let (mut session, executor) = session();

        let ok = session.run_query(&executor, "SELECT 1 AS a, 2 AS b;").await;
        assert_eq!(ok, QueryOutcome::Succeeded { rows: 1 });

        let failed = session.run_query(&executor, "SELEKT * FROM x").await;
        assert!(matches!(failed, QueryOutcome::Failed(ref msg) if msg.contains("SELEKT")));

        let cached = session.result().unwrap();
        assert_eq!(cached.column_names(), vec!["a", "b"]);
        assert_eq!(cached.scalar(), Some(&Value::Int(1)));
        assert_eq!(session.outcome(), Some(&failed));
    }

    #[tokio::test]
    async fn test_blank_query_keeps_cache_empty() {
        let (mut session, executor) = session();
        assert_eq!(session.run_query(&executor, "  ").await, QueryOutcome::Blank);
        assert!(session.result().is_none());
    }

    #[tokio::test]
    async fn test_success_resets_column_choices() {
        let (mut session, executor) = session();
        session.set_chart(
            ChartKind::Bar,
            ColumnChoices::new(Some("x".into()), Some("y".into()), None),
        );
        session.run_query(&executor, "SELECT 3 AS n").await;
        assert_eq!(session.chart, ChartKind::Bar);
        assert_eq!(session.choices, ColumnChoices::default());
    }

    #[test]
    fn test_banners() {
        assert!(matches!(
            QueryOutcome::Succeeded { rows: 2 }.banner(),
            Block::Success(_)
        ));
        assert!(QueryOutcome::Failed("x".into()).banner().is_error());
        assert!(QueryOutcome::Blank.banner().is_warning());
    }
}
