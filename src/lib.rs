pub mod chart;
pub mod config;
pub mod error;
pub mod executor;
pub mod pages;
pub mod render;
pub mod repl;
pub mod session;
pub mod store;

pub use chart::{ChartKind, ChartRequest, ChartSelector, ColumnChoices, DualChart, Shape, SingleChart};
pub use config::{DashboardConfig, DATABASE_URL_ENV, DEFAULT_DATABASE_URL};
pub use error::{DashboardError, Result};
pub use executor::QueryExecutor;
pub use pages::{query_page, Dashboard, Page};
pub use render::{
    render, render_query_result, Block, ChartMark, ChartSpec, Metric, Series, TerminalSurface,
};
pub use repl::{export_chart, InteractiveRepl, QueryBuffer, ReplCommand, ReplResult, ReplSession};
pub use session::{QueryOutcome, ResultCache, SessionContext};
pub use store::{
    connect, Column, DataType, Dialect, Param, PostgresStore, QueryResult, SqliteStore, Store,
    StoreTarget, Value,
};
