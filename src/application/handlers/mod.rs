//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

mod content;
mod views;

#[cfg(test)]
mod test_fixtures;

pub use content::{
    DetachContentCommand, DetachContentHandler, DetachContentResult, GetDeliveryHandler,
    GetDeliveryQuery, KindCount, ListContentHandler, ListContentQuery, ListContentResult,
    SessionInventory, SummarizeSessionHandler, SummarizeSessionQuery,
};
pub use views::{
    GetSessionViewReportHandler, GetSessionViewReportQuery, GetTopViewedHandler,
    GetTopViewedQuery, GetViewStatsHandler, GetViewStatsQuery, GetViewTrendsHandler,
    GetViewTrendsQuery, ReconcileViewsCommand, ReconcileViewsHandler, RecordViewCommand,
    RecordViewHandler, RecordViewResult, SessionViewReport, TopViewedItem,
};
