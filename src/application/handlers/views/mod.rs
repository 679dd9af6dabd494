//! View handlers - explicit recording and analytics reads.

mod get_session_view_report;
mod get_top_viewed;
mod get_view_stats;
mod get_view_trends;
mod reconcile_views;
mod record_view;

pub use get_session_view_report::{
    GetSessionViewReportHandler, GetSessionViewReportQuery, SessionViewReport,
};
pub use get_top_viewed::{GetTopViewedHandler, GetTopViewedQuery, TopViewedItem};
pub use get_view_stats::{GetViewStatsHandler, GetViewStatsQuery};
pub use get_view_trends::{GetViewTrendsHandler, GetViewTrendsQuery};
pub use reconcile_views::{ReconcileViewsCommand, ReconcileViewsHandler};
pub use record_view::{RecordViewCommand, RecordViewHandler, RecordViewResult};

use crate::domain::access::can_view_analytics;
use crate::domain::content::ContentError;
use crate::domain::foundation::{AuthenticatedUser, ValidationError};

fn require_analytics(user: &AuthenticatedUser) -> Result<(), ContentError> {
    if can_view_analytics(user.role) {
        Ok(())
    } else {
        tracing::info!(viewer_id = %user.id, role = %user.role, "Analytics access denied");
        Err(ContentError::Unauthorized)
    }
}

/// Validates an optional count parameter against `1..=max`.
fn bounded(field: &str, value: Option<u32>, default: u32, max: u32) -> Result<u32, ContentError> {
    let value = value.unwrap_or(default);
    if value == 0 || value > max {
        return Err(ValidationError::out_of_range(field, 1, max.into(), value.into()).into());
    }
    Ok(value)
}
