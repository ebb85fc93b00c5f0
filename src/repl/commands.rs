use crate::chart::{ChartKind, ColumnChoices};
use crate::error::{DashboardError, Result};
use crate::pages::Page;
use crate::render::Block;
use chrono::NaiveDate;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub enum ReplCommand {
    Sql(String),
    Page(Page),
    Pages,
    Chart { kind: ChartKind, choices: ColumnChoices },
    Date(NaiveDate),
    Show,
    Export(PathBuf),
    Help,
    Quit,
}

#[derive(Debug, Default)]
pub struct ReplResult {
    pub blocks: Vec<Block>,
    pub quit: bool,
}

impl ReplResult {
    pub fn blocks(blocks: Vec<Block>) -> Self {
        Self {
            blocks,
            quit: false,
        }
    }

    pub fn quit() -> Self {
        Self {
            blocks: Vec::new(),
            quit: true,
        }
    }
}

/// Collects console lines into complete inputs. SQL accumulates until a
/// line ends with `;`; a `:` line on an empty buffer is complete at once.
#[derive(Debug, Default)]
pub struct QueryBuffer {
    text: String,
}

impl QueryBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, line: &str) -> Option<String> {
        let trimmed = line.trim();
        if self.text.is_empty() {
            if trimmed.is_empty() {
                return None;
            }
            if trimmed.starts_with(':') {
                return Some(trimmed.to_string());
            }
        }

        self.text.push_str(line);
        self.text.push('\n');
        if !trimmed.ends_with(';') {
            return None;
        }
        Some(std::mem::take(&mut self.text).trim().to_string())
    }

    pub fn clear(&mut self) -> bool {
        let had_text = !self.text.is_empty();
        self.text.clear();
        had_text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

impl ReplCommand {
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();
        let Some(command) = input.strip_prefix(':') else {
            return Ok(ReplCommand::Sql(input.to_string()));
        };

        let mut parts = command.split_whitespace();
        let name = parts.next().unwrap_or("").to_lowercase();
        let args: Vec<&str> = parts.collect();

        match name.as_str() {
            "page" | "p" => {
                let page = args.join(" ");
                if page.is_empty() {
                    return Err(usage(":page NAME"));
                }
                Ok(ReplCommand::Page(page.parse().map_err(console)?))
            }
            "pages" => Ok(ReplCommand::Pages),
            "chart" | "c" => {
                let kind = args.first().ok_or_else(|| usage(":chart KIND [X] [Y] [Y2]"))?;
                let column = |i: usize| args.get(i).map(|s| s.to_string());
                Ok(ReplCommand::Chart {
                    kind: kind.parse().map_err(console)?,
                    choices: ColumnChoices::new(column(1), column(2), column(3)),
                })
            }
            "date" | "d" => {
                let raw = args.first().ok_or_else(|| usage(":date YYYY-MM-DD"))?;
                let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|e| {
                    DashboardError::Console(format!("Invalid date '{}': {}", raw, e))
                })?;
                Ok(ReplCommand::Date(date))
            }
            "show" | "s" => Ok(ReplCommand::Show),
            "export" | "e" => {
                let path = args.first().ok_or_else(|| usage(":export FILE"))?;
                Ok(ReplCommand::Export(PathBuf::from(path)))
            }
            "help" | "h" | "?" => Ok(ReplCommand::Help),
            "quit" | "q" | "exit" => Ok(ReplCommand::Quit),
            other => Err(DashboardError::Console(format!(
                "Unknown command ':{}'. Type :help for commands.",
                other
            ))),
        }
    }
}

fn usage(text: &str) -> DashboardError {
    DashboardError::Console(format!("Usage: {}", text))
}

// Page and chart names share their parsers with the CLI flags.
fn console(e: DashboardError) -> DashboardError {
    match e {
        DashboardError::Config(msg) | DashboardError::ChartRejected(msg) => {
            DashboardError::Console(msg)
        }
        other => other,
    }
}

pub(crate) const HELP: &str = "\
Commands:
  <sql>;                    run SQL on the Query page (end with ';')
  :page NAME                switch page (overview, providers, receivers,
                            food-listings, claims, analytics, query)
  :pages                    list pages
  :chart KIND [X] [Y] [Y2]  choose a chart for the query result
                            (select, table, bar, line, area, pie, donut,
                            combo, clustered-bar, dual-axis, kpi)
  :date YYYY-MM-DD          set the Food Listings reference date
  :show                     re-render the current page
  :export FILE              write the current chart as Vega-Lite JSON
  :help                     show this help
  :quit                     exit";
