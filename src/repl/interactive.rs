use super::commands::{QueryBuffer, ReplCommand};
use super::session::ReplSession;
use crate::error::{DashboardError, Result};
use crate::render::{Block, TerminalSurface};
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::{CompletionType, Config, EditMode, Editor};
use std::path::PathBuf;
use tracing::debug;

pub struct InteractiveRepl {
    session: ReplSession,
    surface: TerminalSurface,
    history_path: Option<PathBuf>,
}

impl InteractiveRepl {
    pub fn new(session: ReplSession, surface: TerminalSurface) -> Self {
        Self {
            session,
            surface,
            history_path: None,
        }
    }

    pub fn with_history(mut self, path: Option<PathBuf>) -> Self {
        self.history_path = path;
        self
    }

    pub async fn run(&mut self) -> Result<()> {
        let config = Config::builder()
            .edit_mode(EditMode::Emacs)
            .history_ignore_space(true)
            .completion_type(CompletionType::List)
            .auto_add_history(false)
            .build();
        let mut rl = Editor::<(), _>::with_config(config).map_err(console_error)?;

        if let Some(path) = &self.history_path {
            if rl.load_history(path).is_err() {
                debug!(path = %path.display(), "No console history loaded");
            }
        }

        println!("{}", "Local Food Wastage Management Dashboard".bold().green());
        println!("Type :help for commands, :quit to exit\n");

        let first = self.session.execute(ReplCommand::Show).await;
        self.print(&first.blocks);

        let mut buffer = QueryBuffer::new();
        loop {
            let prompt = if buffer.is_empty() {
                format!("{}> ", self.session.context().page.slug().cyan())
            } else {
                "...> ".to_string()
            };

            let line = match rl.readline(&prompt) {
                Ok(line) => line,
                Err(ReadlineError::Interrupted) => {
                    if buffer.clear() {
                        println!("{}", "Query buffer cleared".yellow());
                    }
                    continue;
                }
                Err(ReadlineError::Eof) => break,
                Err(e) => return Err(console_error(e)),
            };

            let Some(input) = buffer.push(&line) else {
                continue;
            };

            rl.add_history_entry(input.as_str()).map_err(console_error)?;

            let command = match ReplCommand::parse(&input) {
                Ok(command) => command,
                Err(e) => {
                    self.print(&[Block::Error(e.to_string())]);
                    continue;
                }
            };

            let result = self.session.execute(command).await;
            self.print(&result.blocks);
            if result.quit {
                break;
            }
        }

        if let Some(path) = &self.history_path {
            if let Err(e) = rl.save_history(path) {
                debug!(error = %e, "Could not save console history");
            }
        }
        println!("{}", "Goodbye!".green());
        Ok(())
    }

    fn print(&self, blocks: &[Block]) {
        if let Err(e) = self.surface.print(blocks) {
            eprintln!("{}", format!("Error: {}", e).red());
        }
    }
}

fn console_error(e: ReadlineError) -> DashboardError {
    DashboardError::Console(e.to_string())
}
