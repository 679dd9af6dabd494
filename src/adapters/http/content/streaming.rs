//! Turns a delivery outcome into an HTTP response.
//!
//! Streams are never buffered: the byte source is wrapped in a
//! `ReaderStream` and handed to the body as-is. Dropping the body (client
//! disconnect) drops the source, which releases the storage handle.

use axum::{
    body::Body,
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use tokio_util::io::ReaderStream;

use crate::application::{ContentStream, DeliveryOutcome};
use crate::domain::content::OCTET_STREAM;

use super::dto::LinkResponse;

fn no_store() -> HeaderValue {
    HeaderValue::from_static("no-store")
}

pub fn delivery_response(outcome: DeliveryOutcome, chunk_size: usize) -> Response {
    match outcome {
        DeliveryOutcome::Stream(stream) => stream_response(stream, chunk_size),
        DeliveryOutcome::Redirect(target) => redirect_response(&target.url),
        DeliveryOutcome::Link(target) => {
            let mut headers = HeaderMap::new();
            headers.insert(header::CACHE_CONTROL, no_store());
            (StatusCode::OK, headers, Json(LinkResponse::from(target))).into_response()
        }
    }
}

fn redirect_response(url: &str) -> Response {
    match HeaderValue::from_str(url) {
        Ok(location) => {
            let mut headers = HeaderMap::new();
            headers.insert(header::LOCATION, location);
            headers.insert(header::CACHE_CONTROL, no_store());
            (StatusCode::FOUND, headers).into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "Redirect target is not a valid header value");
            (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(super::dto::ErrorResponse::new(
                    "INVALID_LOCATOR",
                    "Content link cannot be used as a redirect",
                )),
            )
                .into_response()
        }
    }
}

fn stream_response(stream: ContentStream, chunk_size: usize) -> Response {
    let mut headers = HeaderMap::new();

    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_str(&stream.media_type)
            .unwrap_or_else(|_| HeaderValue::from_static(OCTET_STREAM)),
    );
    headers.insert(header::CONTENT_LENGTH, HeaderValue::from(stream.content_length()));
    headers.insert(header::ACCEPT_RANGES, HeaderValue::from_static("bytes"));
    headers.insert(header::CACHE_CONTROL, no_store());
    headers.insert(header::X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff"));

    // Non-ASCII names fall back to an ASCII-only rendering.
    let disposition = stream.disposition.header_value(&stream.file_name);
    let disposition = HeaderValue::from_str(&disposition).or_else(|_| {
        let ascii: String = stream
            .file_name
            .chars()
            .map(|c| if c.is_ascii() { c } else { '_' })
            .collect();
        HeaderValue::from_str(&stream.disposition.header_value(&ascii))
    });
    if let Ok(value) = disposition {
        headers.insert(header::CONTENT_DISPOSITION, value);
    }

    let status = match stream.range {
        Some(range) => {
            if let Ok(value) = HeaderValue::from_str(&range.content_range(stream.total_size)) {
                headers.insert(header::CONTENT_RANGE, value);
            }
            StatusCode::PARTIAL_CONTENT
        }
        None => StatusCode::OK,
    };

    tracing::debug!(
        stream_id = %stream.stream_id,
        media_type = %stream.media_type,
        length = stream.content_length(),
        partial = stream.range.is_some(),
        "Streaming content"
    );

    let body = Body::from_stream(ReaderStream::with_capacity(stream.body, chunk_size));
    (status, headers, body).into_response()
}
