mod commands;
mod interactive;
mod session;

pub use commands::{QueryBuffer, ReplCommand, ReplResult};
pub use interactive::InteractiveRepl;
pub use session::{export_chart, ReplSession};
