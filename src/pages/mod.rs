mod page;
pub mod queries;

pub use page::Page;

use crate::executor::QueryExecutor;
use crate::render::{render_query_result, titled_chart, Block, ChartMark, Metric};
use crate::session::SessionContext;
use crate::store::{Param, QueryResult, Value};
use tracing::debug;

pub struct Dashboard {
    executor: QueryExecutor,
}

impl Dashboard {
    pub fn new(executor: QueryExecutor) -> Self {
        Self { executor }
    }

    pub fn executor(&self) -> &QueryExecutor {
        &self.executor
    }

    pub async fn render(&self, session: &SessionContext) -> Vec<Block> {
        debug!(session = %session.id(), page = %session.page, "Rendering page");
        match session.page {
            Page::Overview => self.overview().await,
            Page::Providers => {
                self.table_with_chart(
                    "Providers",
                    queries::ALL_PROVIDERS,
                    queries::PROVIDERS_BY_CITY,
                    "Providers by City",
                    "city",
                )
                .await
            }
            Page::Receivers => {
                self.table_with_chart(
                    "Receivers",
                    queries::ALL_RECEIVERS,
                    queries::RECEIVERS_BY_CITY,
                    "Receivers by City",
                    "city",
                )
                .await
            }
            Page::FoodListings => self.food_listings(session).await,
            Page::Claims => {
                self.table_with_chart(
                    "Claims",
                    queries::ALL_CLAIMS,
                    queries::CLAIMS_BY_STATUS,
                    "Claims",
                    "status",
                )
                .await
            }
            Page::Analytics => self.analytics().await,
            Page::Query => query_page(session),
        }
    }

    async fn run(&self, sql: &str, params: &[Param]) -> Result<QueryResult, Block> {
        self.executor
            .execute_with(sql, params)
            .await
            .map_err(|e| Block::Error(e.to_string()))
    }

    async fn overview(&self) -> Vec<Block> {
        let counts = [
            ("Providers", queries::COUNT_PROVIDERS),
            ("Receivers", queries::COUNT_RECEIVERS),
            ("Food Listings", queries::COUNT_LISTINGS),
            ("Claims", queries::COUNT_CLAIMS),
        ];

        let mut metrics = Vec::with_capacity(counts.len());
        let mut errors = Vec::new();
        for (label, sql) in counts {
            match self.run(sql, &[]).await {
                Ok(result) => metrics.push(Metric {
                    label: label.to_string(),
                    value: result.scalar().cloned().unwrap_or(Value::Null),
                }),
                Err(block) => errors.push(block),
            }
        }

        let mut blocks = vec![Block::Heading("Local Food Wastage Management".to_string())];
        if !metrics.is_empty() {
            blocks.push(Block::Metrics(metrics));
        }
        blocks.extend(errors);
        blocks
    }

    async fn table_with_chart(
        &self,
        heading: &str,
        table_sql: &str,
        grouped_sql: &str,
        chart_title: &str,
        x: &str,
    ) -> Vec<Block> {
        let mut blocks = vec![Block::Heading(heading.to_string())];
        match self.run(table_sql, &[]).await {
            Ok(result) => blocks.push(Block::Table(result)),
            Err(block) => blocks.push(block),
        }
        match self.run(grouped_sql, &[]).await {
            Ok(grouped) => blocks.extend(titled_chart(ChartMark::Bar, chart_title, &grouped, x, "count")),
            Err(block) => blocks.push(block),
        }
        blocks
    }

    async fn food_listings(&self, session: &SessionContext) -> Vec<Block> {
        let mut blocks = vec![Block::Heading("Food Listings".to_string())];
        match self.run(queries::ALL_LISTINGS, &[]).await {
            Ok(result) => blocks.push(Block::Table(result)),
            Err(block) => blocks.push(block),
        }

        let date = session.reference_date;
        blocks.push(Block::Text(format!(
            "Reference date: {}",
            date.format("%Y-%m-%d")
        )));

        let sql = queries::near_expiry(self.executor.dialect());
        match self.run(&sql, &[date.into()]).await {
            Ok(result) if !result.is_empty() => {
                let total = result.row_count();
                blocks.push(Block::Table(result));
                blocks.push(Block::Text(format!("Total Near-Expiry Items: {}", total)));
            }
            Ok(_) => blocks.push(Block::Warning(
                "No near-expiry items for the selected date.".to_string(),
            )),
            Err(block) => blocks.push(block),
        }
        blocks
    }

    async fn analytics(&self) -> Vec<Block> {
        let mut blocks = vec![Block::Heading("Analytics".to_string())];
        match self.run(queries::QUANTITY_BY_PROVIDER_TYPE, &[]).await {
            Ok(result) => blocks.extend(titled_chart(
                ChartMark::Pie,
                "Quantity Posted by Provider Type",
                &result,
                "type",
                "total_quantity",
            )),
            Err(block) => blocks.push(block),
        }
        match self.run(queries::FOOD_TYPE_COUNTS, &[]).await {
            Ok(result) => blocks.extend(titled_chart(
                ChartMark::Bar,
                "Most Common Food Types",
                &result,
                "food_type",
                "count",
            )),
            Err(block) => blocks.push(block),
        }
        blocks
    }
}

pub fn query_page(session: &SessionContext) -> Vec<Block> {
    let mut blocks = vec![Block::Heading("SQL Query Executor".to_string())];
    if let Some(outcome) = session.outcome() {
        blocks.push(outcome.banner());
    }

    match session.result() {
        Some(result) => {
            blocks.push(Block::Heading("Query Result".to_string()));
            blocks.push(Block::Table(result.clone()));
            if !result.is_empty() {
                blocks.push(Block::Heading(format!(
                    "Visualize Data ({})",
                    session.chart.label()
                )));
            }
            blocks.extend(render_query_result(result, session.chart, &session.choices));
        }
        None => blocks.push(Block::Text(
            "Enter your SQL query below, terminated by ';'.".to_string(),
        )),
    }
    blocks
}
