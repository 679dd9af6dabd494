//! Access policy domain module.
//!
//! - `viewer` - The principal and enrollment set a decision is made for
//! - `policy` - `authorize`, `AccessGrant` and delivery modes

mod policy;
mod viewer;

pub use policy::{
    authorize, authorize_session, can_view_analytics, channel_for, AccessGrant, AllowReason,
    DeliveryMode, DenyReason,
};
pub use viewer::Viewer;
