use serde::Serialize;

use crate::domain::content::{ContentError, ContentItem, Locator};

/// Target handed to the client for externally hosted content.
///
/// The URL is the stored locator verbatim. It is never fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkTarget {
    pub url: String,
    pub title: String,
    pub description: Option<String>,
}

impl LinkTarget {
    /// Builds a target from an item with an external locator, checking the URL.
    pub fn for_item(item: &ContentItem) -> Result<Self, ContentError> {
        let url = match &item.locator {
            Locator::External(url) => url,
            Locator::Storage(_) => {
                return Err(ContentError::InvalidLocator(format!(
                    "content item {} has no external URL",
                    item.id
                )))
            }
        };
        url.validate()
            .map_err(|e| ContentError::InvalidLocator(e.to_string()))?;

        Ok(Self {
            url: url.as_str().to_string(),
            title: item.title.clone(),
            description: item.description.clone(),
        })
    }
}
