use super::spec::ChartSpec;
use crate::store::{QueryResult, Value};

#[derive(Debug, Clone, PartialEq)]
pub struct Metric {
    pub label: String,
    pub value: Value,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Heading(String),
    Text(String),
    Table(QueryResult),
    Metrics(Vec<Metric>),
    Chart(ChartSpec),
    Info(String),
    Success(String),
    Warning(String),
    Error(String),
}

impl Block {
    pub fn is_error(&self) -> bool {
        matches!(self, Block::Error(_))
    }

    pub fn is_warning(&self) -> bool {
        matches!(self, Block::Warning(_))
    }

    pub fn as_chart(&self) -> Option<&ChartSpec> {
        match self {
            Block::Chart(spec) => Some(spec),
            _ => None,
        }
    }
}
