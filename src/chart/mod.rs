mod kind;
mod selector;

pub use kind::{ChartKind, DualChart, Shape, SingleChart};
pub use selector::{ChartRequest, ChartSelector, ColumnChoices};
