use super::block::{Block, Metric};
use super::spec::{ChartMark, ChartSpec};
use crate::chart::{ChartKind, ChartRequest, ChartSelector, ColumnChoices, DualChart, SingleChart};
use crate::error::DashboardError;
use crate::store::{QueryResult, Value};
use tracing::warn;

pub fn render(request: &ChartRequest, result: &QueryResult) -> Vec<Block> {
    match request {
        ChartRequest::Unselected => vec![Block::Text(
            "Please select a chart type to visualize the result.".to_string(),
        )],
        ChartRequest::Table => vec![Block::Table(result.clone())],
        ChartRequest::Kpi {
            columns,
            by_default: true,
        } => vec![
            Block::Info("Only one row returned. Showing KPIs by default.".to_string()),
            Block::Metrics(metrics(result, columns)),
        ],
        ChartRequest::Kpi {
            columns,
            by_default: false,
        } => vec![
            Block::Heading("KPI".to_string()),
            Block::Metrics(metrics(result, columns)),
        ],
        ChartRequest::Single { chart, x, y } => {
            let built = ChartSpec::single((*chart).into(), single_title(*chart), result, x, y);
            chart_block(built)
        }
        ChartRequest::Dual { chart, x, y, y2 } => {
            let built = ChartSpec::dual((*chart).into(), dual_title(*chart), result, x, y, y2);
            chart_block(built)
        }
    }
}

pub fn render_query_result(
    result: &QueryResult,
    kind: ChartKind,
    choices: &ColumnChoices,
) -> Vec<Block> {
    match ChartSelector::select(result, kind, choices) {
        Ok(request) => render(&request, result),
        Err(DashboardError::EmptyResult) => {
            vec![Block::Warning("Query returned no rows; nothing to visualize.".to_string())]
        }
        Err(e) => vec![Block::Warning(e.to_string())],
    }
}

fn metrics(result: &QueryResult, columns: &[String]) -> Vec<Metric> {
    columns
        .iter()
        .map(|name| Metric {
            label: name.clone(),
            value: result
                .column(name)
                .and_then(|c| c.values.first().cloned())
                .unwrap_or(Value::Null),
        })
        .collect()
}

fn chart_block(built: crate::error::Result<ChartSpec>) -> Vec<Block> {
    match built {
        Ok(spec) => vec![Block::Chart(spec)],
        Err(e) => {
            warn!(error = %e, "Chart could not be rendered");
            vec![Block::Error(e.to_string())]
        }
    }
}

fn single_title(chart: SingleChart) -> Option<&'static str> {
    match chart {
        SingleChart::Bar | SingleChart::Line | SingleChart::Area => None,
        SingleChart::Pie => Some("Pie Chart"),
        SingleChart::Donut => Some("Donut Chart"),
    }
}

fn dual_title(chart: DualChart) -> Option<&'static str> {
    match chart {
        DualChart::Combo => None,
        DualChart::ClusteredBar => Some("Clustered Bar Chart"),
        DualChart::DualAxis => Some("Dual Axis Chart"),
    }
}

pub(crate) fn titled_chart(
    mark: ChartMark,
    title: &str,
    result: &QueryResult,
    x: &str,
    y: &str,
) -> Vec<Block> {
    chart_block(ChartSpec::single(mark, Some(title), result, x, y))
}
