//! View tracking domain module.
//!
//! - `event` - Append-only `ViewEvent` with audit context
//! - `window` - `ViewWindow`, the single once-per-window predicate
//! - `stats` - Counts, trends and report rows

mod event;
mod stats;
mod window;

pub use event::{ViewClient, ViewEvent};
pub use stats::{
    fill_trend, DailyViewCount, ItemViewSummary, RankedItem, RecordOutcome, ViewStats, ViewTrend,
};
pub use window::ViewWindow;
