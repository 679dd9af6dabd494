//! Delivery domain module: byte ranges and external link targets.

mod link;
mod range;

pub use link::LinkTarget;
pub use range::{unsatisfied_content_range, ByteRange, ByteRangeSpec};
