//! HTTP adapter for content and view endpoints.

mod dto;
mod handlers;
mod routes;
mod streaming;

pub use dto::{
    ContentItemResponse, ContentListResponse, DetachResponse, ErrorResponse, LinkResponse,
    RecordViewResponse, TopContentQuery, TrendsQuery,
};
pub use handlers::ContentHandlers;
pub use routes::content_routes;
