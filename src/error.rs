use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("{0}")]
    QueryFailed(String),

    #[error("{0}")]
    ChartRejected(String),

    #[error("Query returned no rows")]
    EmptyResult,

    #[error("Please enter a query.")]
    EmptyQuery,

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Console error: {0}")]
    Console(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl DashboardError {
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            DashboardError::QueryFailed(_)
                | DashboardError::ChartRejected(_)
                | DashboardError::EmptyResult
                | DashboardError::EmptyQuery
        )
    }
}

pub type Result<T> = std::result::Result<T, DashboardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_message_shown_verbatim() {
        let err = DashboardError::QueryFailed(r#"ERROR: syntax error at or near "SELEKT""#.into());
        assert_eq!(err.to_string(), r#"ERROR: syntax error at or near "SELEKT""#);
    }

    #[test]
    fn test_recoverable_split() {
        assert!(DashboardError::EmptyResult.is_recoverable());
        assert!(DashboardError::ChartRejected("x".into()).is_recoverable());
        assert!(!DashboardError::Connection("refused".into()).is_recoverable());
        assert!(!DashboardError::Config("bad".into()).is_recoverable());
    }
}
