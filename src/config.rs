use crate::error::{DashboardError, Result};
use chrono::NaiveDate;
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_DATABASE_URL: &str = "postgres://postgres@localhost:5432/foodwaste";
pub const DATABASE_URL_ENV: &str = "FOODBOARD_DATABASE_URL";

fn default_reference_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 15).unwrap_or_default()
}

fn default_chart_width() -> usize {
    40
}

fn default_max_table_rows() -> usize {
    100
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct DashboardConfig {
    #[serde(default)]
    pub database_url: Option<String>,
    #[serde(default = "default_reference_date")]
    pub reference_date: NaiveDate,
    #[serde(default = "default_chart_width")]
    pub chart_width: usize,
    #[serde(default = "default_max_table_rows")]
    pub max_table_rows: usize,
    #[serde(default)]
    pub history_file: Option<PathBuf>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            database_url: None,
            reference_date: default_reference_date(),
            chart_width: default_chart_width(),
            max_table_rows: default_max_table_rows(),
            history_file: None,
        }
    }
}

impl DashboardConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            DashboardError::Config(format!("Cannot read {}: {}", path.display(), e))
        })?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.chart_width == 0 {
            return Err(DashboardError::Config("chart_width must be positive".into()));
        }
        if self.max_table_rows == 0 {
            return Err(DashboardError::Config("max_table_rows must be positive".into()));
        }
        Ok(())
    }

    pub fn database_url(&self, override_url: Option<&str>) -> String {
        override_url
            .map(String::from)
            .or_else(|| self.database_url.clone())
            .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string())
    }

    pub fn history_path(&self) -> Option<PathBuf> {
        self.history_file
            .clone()
            .or_else(|| dirs::home_dir().map(|home| home.join(".foodboard_history")))
    }
}
