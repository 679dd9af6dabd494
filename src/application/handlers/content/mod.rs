//! Content handlers - listing, delivery, inventory and detach.

mod detach_content;
mod get_delivery;
mod list_content;
mod summarize_session;

pub use detach_content::{DetachContentCommand, DetachContentHandler, DetachContentResult};
pub use get_delivery::{GetDeliveryHandler, GetDeliveryQuery};
pub use list_content::{ListContentHandler, ListContentQuery, ListContentResult};
pub use summarize_session::{
    KindCount, SessionInventory, SummarizeSessionHandler, SummarizeSessionQuery,
};

use crate::application::{ContentRegistry, ViewerDirectory};
use crate::domain::access::{authorize, AllowReason, DeliveryMode, Viewer};
use crate::domain::content::{ContentError, ContentItem, ContentRef};
use crate::domain::foundation::AuthenticatedUser;

/// An item the viewer has been allowed to consume.
#[derive(Debug, Clone)]
pub(crate) struct AuthorizedItem {
    pub item: ContentItem,
    pub viewer: Viewer,
    pub mode: DeliveryMode,
    pub reason: AllowReason,
}

/// Looks the item up, then runs the access policy against its session's course.
pub(crate) async fn authorize_item(
    registry: &ContentRegistry,
    viewers: &ViewerDirectory,
    reference: ContentRef,
    user: &AuthenticatedUser,
) -> Result<AuthorizedItem, ContentError> {
    let item = registry.get_content(reference).await?;
    let course = viewers.course_of(item.session_id).await?;
    let viewer = viewers.viewer_for(user).await?;

    let (mode, reason) = authorize(&viewer, &item, course.as_ref())
        .into_result()
        .map_err(|e| {
            tracing::info!(
                viewer_id = %viewer.id,
                content_item_id = %item.id,
                error = %e,
                "Content access denied"
            );
            e
        })?;

    Ok(AuthorizedItem {
        item,
        viewer,
        mode,
        reason,
    })
}
