use clap::{Parser, Subcommand};
use colored::Colorize;
use foodboard::{
    connect, export_chart, ChartKind, ColumnChoices, Dashboard, DashboardConfig, DashboardError,
    InteractiveRepl, Page, QueryExecutor, ReplSession, Result, SessionContext, TerminalSurface,
    DATABASE_URL_ENV,
};
use chrono::NaiveDate;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "foodboard")]
#[command(about = "Local food wastage management dashboard")]
#[command(version)]
struct Cli {
    /// Database URL (postgres://..., sqlite:PATH or a .db file)
    #[arg(long, env = DATABASE_URL_ENV, global = true)]
    database_url: Option<String>,

    /// YAML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Render one dashboard page
    Page {
        /// overview, providers, receivers, food-listings, claims, analytics
        name: Page,

        /// Reference date for near-expiry listings (YYYY-MM-DD)
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Run an ad-hoc SQL query and visualize the result
    Query {
        sql: String,

        /// Chart type (table, bar, line, area, pie, donut, combo,
        /// clustered-bar, dual-axis, kpi)
        #[arg(long, default_value = "select")]
        chart: ChartKind,

        #[arg(long)]
        x: Option<String>,

        #[arg(long)]
        y: Option<String>,

        /// Second measure for combo, clustered-bar and dual-axis charts
        #[arg(long)]
        y2: Option<String>,

        /// Write the chart as Vega-Lite JSON
        #[arg(long)]
        chart_out: Option<PathBuf>,
    },

    /// Interactive console (default)
    Console,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "foodboard=debug" } else { "foodboard=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if !atty::is(atty::Stream::Stdout) {
        colored::control::set_override(false);
    }

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            if !e.is_recoverable() {
                error!(error = %e, "foodboard failed");
            }
            eprintln!("{}", format!("Error: {}", e).red());
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let config = match &cli.config {
        Some(path) => DashboardConfig::load(path)?,
        None => DashboardConfig::default(),
    };

    let url = config.database_url(cli.database_url.as_deref());
    let store = connect(&url).await?;
    let dashboard = Dashboard::new(QueryExecutor::new(store));
    let surface = TerminalSurface::new(config.chart_width, config.max_table_rows);
    let mut context = SessionContext::new(config.reference_date);

    match cli.command.unwrap_or(Commands::Console) {
        Commands::Page { name, date } => {
            if let Some(date) = date {
                context.reference_date = date;
            }
            context.page = name;
            let blocks = dashboard.render(&context).await;
            surface.print(&blocks)?;
            Ok(exit_code(&blocks))
        }
        Commands::Query {
            sql,
            chart,
            x,
            y,
            y2,
            chart_out,
        } => {
            context.page = Page::Query;
            context.run_query(dashboard.executor(), &sql).await;
            context.set_chart(chart, ColumnChoices::new(x, y, y2));
            let blocks = dashboard.render(&context).await;
            surface.print(&blocks)?;

            if let Some(path) = chart_out {
                if !export_chart(&blocks, &path)? {
                    return Err(DashboardError::ChartRejected(
                        "No chart was rendered; nothing written".to_string(),
                    ));
                }
            }
            Ok(exit_code(&blocks))
        }
        Commands::Console => {
            let session = ReplSession::new(dashboard, context);
            InteractiveRepl::new(session, surface)
                .with_history(config.history_path())
                .run()
                .await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// One-shot commands fail when any block reports an error.
fn exit_code(blocks: &[foodboard::Block]) -> ExitCode {
    if blocks.iter().any(|b| b.is_error()) {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
