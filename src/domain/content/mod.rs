//! Content domain module.
//!
//! Uploaded resources and lightweight content records are two separate
//! stores that share one id space. This module defines the unified
//! `ContentItem` they are normalized into at read time.
//!
//! # Module Structure
//!
//! - `kind` - `ContentKind` discriminator and backing `ContentSource`
//! - `locator` - Storage keys and external URLs
//! - `item` - Backing records, `ContentItem` and the locator-free listing view
//! - `reference` - Path references with optional store prefix
//! - `media_type` - Media type and disposition selection
//! - `errors` - `ContentError` taxonomy

mod errors;
mod item;
mod kind;
mod locator;
mod media_type;
mod reference;

pub use errors::ContentError;
pub use item::{
    sort_for_listing, ContentItem, ContentItemView, LightweightContentRecord, UploadDetails,
    UploadedResource,
};
pub use kind::{ContentKind, ContentSource};
pub use locator::{ExternalUrl, Locator, StorageKey};
pub use media_type::{media_type_for, Disposition, OCTET_STREAM};
pub use reference::ContentRef;

#[cfg(test)]
pub(crate) use item::test_support;
