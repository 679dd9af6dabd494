//! Application layer - Commands, Queries, and Handlers.
//!
//! The four services (registry, viewer directory, resolver and tracker) wrap
//! the ports; handlers compose them per request.

pub mod handlers;
mod registry;
mod resolver;
mod settings;
mod view_tracker;
mod viewer_directory;

pub use handlers::{
    // Commands
    DetachContentCommand, DetachContentHandler, DetachContentResult,
    ReconcileViewsCommand, ReconcileViewsHandler,
    RecordViewCommand, RecordViewHandler, RecordViewResult,
    // Queries
    GetDeliveryHandler, GetDeliveryQuery,
    GetSessionViewReportHandler, GetSessionViewReportQuery, SessionViewReport,
    GetTopViewedHandler, GetTopViewedQuery, TopViewedItem,
    GetViewStatsHandler, GetViewStatsQuery,
    GetViewTrendsHandler, GetViewTrendsQuery,
    KindCount, ListContentHandler, ListContentQuery, ListContentResult,
    SessionInventory, SummarizeSessionHandler, SummarizeSessionQuery,
};
pub use registry::ContentRegistry;
pub use resolver::{ContentStream, DeliveryOutcome, DeliveryResolver, ScopedByteSource};
pub use settings::ViewSettings;
pub use view_tracker::ViewTracker;
pub use viewer_directory::ViewerDirectory;
