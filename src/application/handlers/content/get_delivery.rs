//! GetDeliveryHandler - Query handler that delivers a content item.
//!
//! Delivery is the only read path that has a side effect: a successful
//! consumption (stream or redirect) records a view. Recording never turns a
//! successful delivery into a failure.

use crate::application::{
    ContentRegistry, DeliveryOutcome, DeliveryResolver, ViewSettings, ViewTracker,
    ViewerDirectory,
};
use crate::domain::access::DeliveryMode;
use crate::domain::content::{ContentError, ContentRef};
use crate::domain::delivery::ByteRangeSpec;
use crate::domain::foundation::{AuthenticatedUser, Timestamp};
use crate::domain::views::{ViewClient, ViewEvent};

use super::authorize_item;

/// Query to deliver a content item.
#[derive(Debug, Clone)]
pub struct GetDeliveryQuery {
    pub reference: ContentRef,
    pub user: AuthenticatedUser,
    /// Parsed `Range` header, if one was sent and understood.
    pub range: Option<ByteRangeSpec>,
    pub client: ViewClient,
}

pub struct GetDeliveryHandler {
    registry: ContentRegistry,
    viewers: ViewerDirectory,
    resolver: DeliveryResolver,
    tracker: ViewTracker,
    settings: ViewSettings,
}

impl GetDeliveryHandler {
    pub fn new(
        registry: ContentRegistry,
        viewers: ViewerDirectory,
        resolver: DeliveryResolver,
        tracker: ViewTracker,
        settings: ViewSettings,
    ) -> Self {
        Self {
            registry,
            viewers,
            resolver,
            tracker,
            settings,
        }
    }

    pub async fn handle(&self, query: GetDeliveryQuery) -> Result<DeliveryOutcome, ContentError> {
        // 1. Locate and authorize
        let authorized =
            authorize_item(&self.registry, &self.viewers, query.reference, &query.user).await?;

        // 2. Resolve to a stream, redirect or link card
        let outcome = self
            .resolver
            .resolve(&authorized.item, authorized.mode, query.range)
            .await?;

        tracing::info!(
            content_item_id = %authorized.item.id,
            viewer_id = %authorized.viewer.id,
            mode = ?authorized.mode,
            reason = ?authorized.reason,
            "Content delivered"
        );

        // 3. Record the view
        let tracked = authorized.mode != DeliveryMode::OwnerView || self.settings.track_staff_views;
        if outcome.is_consumption() && tracked {
            let event = ViewEvent::new(authorized.item.id, authorized.viewer.id, Timestamp::now())
                .with_kind(authorized.item.kind)
                .with_client(query.client);

            if self.settings.background_recording {
                self.tracker.record_in_background(event);
            } else if let Err(e) = self.tracker.record(&event).await {
                tracing::warn!(
                    content_item_id = %event.content_item_id,
                    error = %e,
                    "View recording failed after delivery"
                );
            }
        }

        Ok(outcome)
    }
}
