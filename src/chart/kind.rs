use crate::error::{DashboardError, Result};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ChartKind {
    #[default]
    Select,
    Table,
    Bar,
    Line,
    Area,
    Pie,
    Donut,
    Combo,
    ClusteredBar,
    DualAxis,
    Kpi,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SingleChart {
    Bar,
    Line,
    Area,
    Pie,
    Donut,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DualChart {
    Combo,
    ClusteredBar,
    DualAxis,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Unselected,
    PassThrough,
    SingleRow,
    Single(SingleChart),
    Dual(DualChart),
}

impl ChartKind {
    pub const ALL: [ChartKind; 11] = [
        ChartKind::Select,
        ChartKind::Table,
        ChartKind::Bar,
        ChartKind::Line,
        ChartKind::Area,
        ChartKind::Pie,
        ChartKind::Donut,
        ChartKind::Combo,
        ChartKind::ClusteredBar,
        ChartKind::DualAxis,
        ChartKind::Kpi,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ChartKind::Select => "Select",
            ChartKind::Table => "Table",
            ChartKind::Bar => "Bar",
            ChartKind::Line => "Line",
            ChartKind::Area => "Area",
            ChartKind::Pie => "Pie",
            ChartKind::Donut => "Donut",
            ChartKind::Combo => "Combo (Bar + Line)",
            ChartKind::ClusteredBar => "Clustered Bar",
            ChartKind::DualAxis => "Dual Axis",
            ChartKind::Kpi => "KPI",
        }
    }

    pub fn slug(self) -> &'static str {
        match self {
            ChartKind::Select => "select",
            ChartKind::Table => "table",
            ChartKind::Bar => "bar",
            ChartKind::Line => "line",
            ChartKind::Area => "area",
            ChartKind::Pie => "pie",
            ChartKind::Donut => "donut",
            ChartKind::Combo => "combo",
            ChartKind::ClusteredBar => "clustered-bar",
            ChartKind::DualAxis => "dual-axis",
            ChartKind::Kpi => "kpi",
        }
    }

    pub fn shape(self) -> Shape {
        match self {
            ChartKind::Select => Shape::Unselected,
            ChartKind::Table => Shape::PassThrough,
            ChartKind::Kpi => Shape::SingleRow,
            ChartKind::Bar => Shape::Single(SingleChart::Bar),
            ChartKind::Line => Shape::Single(SingleChart::Line),
            ChartKind::Area => Shape::Single(SingleChart::Area),
            ChartKind::Pie => Shape::Single(SingleChart::Pie),
            ChartKind::Donut => Shape::Single(SingleChart::Donut),
            ChartKind::Combo => Shape::Dual(DualChart::Combo),
            ChartKind::ClusteredBar => Shape::Dual(DualChart::ClusteredBar),
            ChartKind::DualAxis => Shape::Dual(DualChart::DualAxis),
        }
    }
}

impl DualChart {
    pub fn kind(self) -> ChartKind {
        match self {
            DualChart::Combo => ChartKind::Combo,
            DualChart::ClusteredBar => ChartKind::ClusteredBar,
            DualChart::DualAxis => ChartKind::DualAxis,
        }
    }

    pub(crate) fn needs_two_numeric(self) -> String {
        match self {
            DualChart::Combo => "Combo chart requires at least 2 numeric columns.",
            DualChart::ClusteredBar => "Clustered Bar requires at least 2 numeric columns.",
            DualChart::DualAxis => "Dual Axis chart requires at least 2 numeric columns.",
        }
        .to_string()
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for ChartKind {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = normalize(s);
        ChartKind::ALL
            .into_iter()
            .find(|k| normalize(k.slug()) == wanted || normalize(k.label()) == wanted)
            .ok_or_else(|| {
                let names: Vec<&str> = ChartKind::ALL.iter().map(|k| k.slug()).collect();
                DashboardError::ChartRejected(format!(
                    "Unknown chart type '{}'. Choose one of: {}",
                    s,
                    names.join(", ")
                ))
            })
    }
}

fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '+')
        .map(|c| c.to_ascii_lowercase())
        .collect()
}
