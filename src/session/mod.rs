mod cache;
mod context;

pub use cache::ResultCache;
pub use context::{QueryOutcome, SessionContext};
