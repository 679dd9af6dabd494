//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, roles, timestamps, errors)
//! - `content` - Content items, kinds, locators and the error taxonomy
//! - `access` - Viewer and the access policy evaluator
//! - `delivery` - Byte ranges and external link targets
//! - `views` - View events, the view window and aggregates

pub mod access;
pub mod content;
pub mod delivery;
pub mod foundation;
pub mod views;
