use super::commands::{ReplCommand, ReplResult, HELP};
use crate::error::Result;
use crate::pages::{query_page, Dashboard, Page};
use crate::render::Block;
use crate::session::SessionContext;
use std::path::Path;
use tracing::info;

pub struct ReplSession {
    dashboard: Dashboard,
    context: SessionContext,
}

impl ReplSession {
    pub fn new(dashboard: Dashboard, context: SessionContext) -> Self {
        Self { dashboard, context }
    }

    pub fn context(&self) -> &SessionContext {
        &self.context
    }

    pub async fn execute(&mut self, command: ReplCommand) -> ReplResult {
        match command {
            ReplCommand::Sql(sql) => {
                self.context.page = Page::Query;
                self.context
                    .run_query(self.dashboard.executor(), &sql)
                    .await;
                ReplResult::blocks(query_page(&self.context))
            }
            ReplCommand::Page(page) => {
                self.context.page = page;
                ReplResult::blocks(self.dashboard.render(&self.context).await)
            }
            ReplCommand::Pages => {
                let lines: Vec<String> = Page::ALL
                    .iter()
                    .map(|p| {
                        let marker = if *p == self.context.page { "*" } else { " " };
                        format!("{} {:<14} {}", marker, p.slug(), p.title())
                    })
                    .collect();
                ReplResult::blocks(vec![Block::Text(lines.join("\n"))])
            }
            ReplCommand::Chart { kind, choices } => {
                self.context.set_chart(kind, choices);
                self.context.page = Page::Query;
                ReplResult::blocks(query_page(&self.context))
            }
            ReplCommand::Date(date) => {
                self.context.reference_date = date;
                self.context.page = Page::FoodListings;
                ReplResult::blocks(self.dashboard.render(&self.context).await)
            }
            ReplCommand::Show => ReplResult::blocks(self.dashboard.render(&self.context).await),
            ReplCommand::Export(path) => {
                let blocks = self.dashboard.render(&self.context).await;
                match export_chart(&blocks, &path) {
                    Ok(true) => ReplResult::blocks(vec![Block::Success(format!(
                        "Chart written to {}",
                        path.display()
                    ))]),
                    Ok(false) => ReplResult::blocks(vec![Block::Warning(
                        "The current page has no chart to export.".to_string(),
                    )]),
                    Err(e) => ReplResult::blocks(vec![Block::Error(e.to_string())]),
                }
            }
            ReplCommand::Help => ReplResult::blocks(vec![Block::Text(HELP.to_string())]),
            ReplCommand::Quit => ReplResult::quit(),
        }
    }
}

pub fn export_chart(blocks: &[Block], path: &Path) -> Result<bool> {
    let Some(spec) = blocks.iter().find_map(Block::as_chart) else {
        return Ok(false);
    };
    let json = serde_json::to_string_pretty(&spec.to_vega_lite())?;
    std::fs::write(path, json)?;
    info!(path = %path.display(), mark = spec.mark.name(), "Exported chart");
    Ok(true)
}
