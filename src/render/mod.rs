mod block;
mod dispatch;
mod spec;
mod terminal;

pub use block::{Block, Metric};
pub use dispatch::{render, render_query_result};
pub(crate) use dispatch::titled_chart;
pub use spec::{ChartMark, ChartSpec, Series};
pub use terminal::TerminalSurface;
