//! GetViewTrendsHandler - Query handler for daily view counts over a
//! trailing window of whole UTC days ending today.

use chrono::{TimeZone, Utc};

use crate::application::{ContentRegistry, ViewSettings, ViewTracker};
use crate::domain::content::{ContentError, ContentRef};
use crate::domain::foundation::{AuthenticatedUser, Timestamp};
use crate::domain::views::{fill_trend, ViewTrend};

use super::{bounded, require_analytics};

#[derive(Debug, Clone)]
pub struct GetViewTrendsQuery {
    pub reference: ContentRef,
    pub user: AuthenticatedUser,
    /// Defaults to the configured trend window.
    pub days: Option<u32>,
}

pub struct GetViewTrendsHandler {
    registry: ContentRegistry,
    tracker: ViewTracker,
    settings: ViewSettings,
}

impl GetViewTrendsHandler {
    pub fn new(registry: ContentRegistry, tracker: ViewTracker, settings: ViewSettings) -> Self {
        Self {
            registry,
            tracker,
            settings,
        }
    }

    pub async fn handle(&self, query: GetViewTrendsQuery) -> Result<ViewTrend, ContentError> {
        require_analytics(&query.user)?;
        let days = bounded(
            "days",
            query.days,
            self.settings.trend_days_default,
            self.settings.trend_days_max,
        )?;

        let item = self.registry.get_content(query.reference).await?;

        let now = Timestamp::now();
        let first_day = now.minus_days(i64::from(days) - 1).date();
        let since = first_day
            .and_hms_opt(0, 0, 0)
            .map(|midnight| Timestamp::from_datetime(Utc.from_utc_datetime(&midnight)))
            .unwrap_or_else(|| now.minus_days(i64::from(days)));

        let sparse = self.tracker.log().daily_counts(item.id, since).await?;

        Ok(ViewTrend {
            content_item_id: item.id,
            days,
            daily: fill_trend(&sparse, now.date(), days),
        })
    }
}
