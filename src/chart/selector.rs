use super::kind::{ChartKind, DualChart, Shape, SingleChart};
use crate::error::{DashboardError, Result};
use crate::store::QueryResult;
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnChoices {
    pub x: Option<String>,
    pub y: Option<String>,
    pub y2: Option<String>,
}

impl ColumnChoices {
    pub fn new(x: Option<String>, y: Option<String>, y2: Option<String>) -> Self {
        Self { x, y, y2 }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChartRequest {
    Unselected,
    Table,
    Kpi {
        columns: Vec<String>,
        by_default: bool,
    },
    Single {
        chart: SingleChart,
        x: String,
        y: String,
    },
    Dual {
        chart: DualChart,
        x: String,
        y: String,
        y2: String,
    },
}

impl ChartRequest {
    pub fn kind(&self) -> ChartKind {
        match self {
            ChartRequest::Unselected => ChartKind::Select,
            ChartRequest::Table => ChartKind::Table,
            ChartRequest::Kpi { .. } => ChartKind::Kpi,
            ChartRequest::Single { chart, .. } => match chart {
                SingleChart::Bar => ChartKind::Bar,
                SingleChart::Line => ChartKind::Line,
                SingleChart::Area => ChartKind::Area,
                SingleChart::Pie => ChartKind::Pie,
                SingleChart::Donut => ChartKind::Donut,
            },
            ChartRequest::Dual { chart, .. } => chart.kind(),
        }
    }
}

pub struct ChartSelector;

impl ChartSelector {
    pub fn select(
        result: &QueryResult,
        kind: ChartKind,
        choices: &ColumnChoices,
    ) -> Result<ChartRequest> {
        if result.is_empty() {
            return Err(DashboardError::EmptyResult);
        }

        let request = match kind.shape() {
            Shape::Unselected => {
                if result.row_count() == 1 {
                    ChartRequest::Kpi {
                        columns: Self::all_columns(result),
                        by_default: true,
                    }
                } else {
                    ChartRequest::Unselected
                }
            }
            Shape::PassThrough => ChartRequest::Table,
            Shape::SingleRow => {
                if result.row_count() != 1 {
                    return Err(Self::reject("KPI cards are best for single-row results."));
                }
                ChartRequest::Kpi {
                    columns: Self::all_columns(result),
                    by_default: false,
                }
            }
            Shape::Single(chart) => {
                let (x, y) = Self::axes(result, choices)?;
                ChartRequest::Single { chart, x, y }
            }
            Shape::Dual(chart) => {
                let numeric = result.numeric_columns();
                if numeric.len() < 2 {
                    return Err(Self::reject(&chart.needs_two_numeric()));
                }
                let (x, y) = Self::axes(result, choices)?;
                let y2 = match &choices.y2 {
                    Some(name) if numeric.contains(&name.as_str()) => name.clone(),
                    Some(name) => {
                        return Err(Self::reject(&format!(
                            "Second Y-axis '{}' must be one of the numeric columns: {}",
                            name,
                            numeric.join(", ")
                        )))
                    }
                    None => numeric[0].to_string(),
                };
                if y == y2 {
                    debug!(column = %y, kind = %kind, "Both measures plot the same column");
                }
                ChartRequest::Dual { chart, x, y, y2 }
            }
        };

        Ok(request)
    }

    fn all_columns(result: &QueryResult) -> Vec<String> {
        result.column_names().into_iter().map(String::from).collect()
    }

    fn axes(result: &QueryResult, choices: &ColumnChoices) -> Result<(String, String)> {
        let x = Self::pick(result, choices.x.as_deref(), "X-axis")?;
        let y = Self::pick(result, choices.y.as_deref(), "Y-axis")?;
        Ok((x, y))
    }

    fn pick(result: &QueryResult, chosen: Option<&str>, role: &str) -> Result<String> {
        match chosen {
            Some(name) if result.column(name).is_some() => Ok(name.to_string()),
            Some(name) => Err(Self::reject(&format!(
                "{} column '{}' is not in the result (columns: {})",
                role,
                name,
                result.column_names().join(", ")
            ))),
            None => result
                .column_names()
                .first()
                .map(|c| c.to_string())
                .ok_or_else(|| Self::reject("The result has no columns to plot.")),
        }
    }

    fn reject(reason: &str) -> DashboardError {
        debug!(reason, "Chart request rejected");
        DashboardError::ChartRejected(reason.to_string())
    }
}
