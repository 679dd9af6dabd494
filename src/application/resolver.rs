//! Delivery Resolver - turns an allowed access decision into something the
//! client can consume.

use std::io;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use tokio::io::{AsyncRead, ReadBuf};
use uuid::Uuid;

use crate::domain::access::{channel_for, DeliveryMode};
use crate::domain::content::{
    media_type_for, ContentError, ContentItem, ContentKind, Disposition, Locator, StorageKey,
};
use crate::domain::delivery::{ByteRange, ByteRangeSpec, LinkTarget};
use crate::domain::foundation::ContentItemId;
use crate::ports::{BoxedReader, ContentStorage, StorageError};

/// What delivery produced.
#[derive(Debug)]
pub enum DeliveryOutcome {
    /// Bytes from content storage.
    Stream(ContentStream),
    /// Send the client to an external URL.
    Redirect(LinkTarget),
    /// Metadata-only link card; the client opens the link itself.
    Link(LinkTarget),
}

impl DeliveryOutcome {
    /// Whether this outcome counts as the viewer consuming the item.
    pub fn is_consumption(&self) -> bool {
        matches!(self, DeliveryOutcome::Stream(_) | DeliveryOutcome::Redirect(_))
    }
}

/// An open stream plus everything needed to describe it.
#[derive(Debug)]
pub struct ContentStream {
    pub stream_id: Uuid,
    pub media_type: String,
    pub file_name: String,
    pub disposition: Disposition,
    pub total_size: u64,
    /// The served range, or `None` for the whole object.
    pub range: Option<ByteRange>,
    pub body: ScopedByteSource,
}

impl ContentStream {
    pub fn content_length(&self) -> u64 {
        self.range.map_or(self.total_size, |r| r.length())
    }
}

/// Reader that logs its release however the stream ends, including when
/// the client disconnects and the body is dropped half-read.
pub struct ScopedByteSource {
    inner: BoxedReader,
    stream_id: Uuid,
    content_item_id: ContentItemId,
    expected: u64,
    delivered: u64,
}

impl ScopedByteSource {
    fn new(inner: BoxedReader, stream_id: Uuid, content_item_id: ContentItemId, expected: u64) -> Self {
        Self {
            inner,
            stream_id,
            content_item_id,
            expected,
            delivered: 0,
        }
    }
}

impl std::fmt::Debug for ScopedByteSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScopedByteSource")
            .field("stream_id", &self.stream_id)
            .field("expected", &self.expected)
            .field("delivered", &self.delivered)
            .finish_non_exhaustive()
    }
}

impl AsyncRead for ScopedByteSource {
    fn poll_read(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        let this = self.get_mut();
        let before = buf.filled().len();
        let polled = this.inner.as_mut().poll_read(cx, buf);
        if let Poll::Ready(Ok(())) = polled {
            this.delivered += (buf.filled().len() - before) as u64;
        }
        polled
    }
}

impl Drop for ScopedByteSource {
    fn drop(&mut self) {
        tracing::debug!(
            stream_id = %self.stream_id,
            content_item_id = %self.content_item_id,
            delivered = self.delivered,
            expected = self.expected,
            complete = self.delivered >= self.expected,
            "Released byte source"
        );
    }
}

/// Converts items into delivery outcomes.
#[derive(Clone)]
pub struct DeliveryResolver {
    storage: Arc<dyn ContentStorage>,
}

impl DeliveryResolver {
    pub fn new(storage: Arc<dyn ContentStorage>) -> Self {
        Self { storage }
    }

    /// Resolves an allowed item. `OwnerView` dispatches on kind and locator
    /// exactly like a learner's grant would.
    pub async fn resolve(
        &self,
        item: &ContentItem,
        mode: DeliveryMode,
        range: Option<ByteRangeSpec>,
    ) -> Result<DeliveryOutcome, ContentError> {
        let channel = match mode {
            DeliveryMode::OwnerView => channel_for(item),
            other => other,
        };

        match channel {
            DeliveryMode::Redirect | DeliveryMode::OwnerView => {
                let target = LinkTarget::for_item(item)?;
                Ok(match item.kind {
                    ContentKind::ExternalLink => DeliveryOutcome::Link(target),
                    _ => DeliveryOutcome::Redirect(target),
                })
            }
            DeliveryMode::Stream => self.open_stream(item, range).await.map(DeliveryOutcome::Stream),
        }
    }

    async fn open_stream(
        &self,
        item: &ContentItem,
        range: Option<ByteRangeSpec>,
    ) -> Result<ContentStream, ContentError> {
        let key = match &item.locator {
            Locator::Storage(key) => key,
            Locator::External(_) => {
                return Err(ContentError::InvalidLocator(format!(
                    "content item {} is not stored on the platform",
                    item.id
                )))
            }
        };
        item.locator
            .validate()
            .map_err(|e| ContentError::InvalidLocator(e.to_string()))?;

        let stat = self
            .storage
            .stat(key)
            .await
            .map_err(|e| storage_error(item.id, key, e))?;

        let served = range.map(|spec| spec.resolve(stat.size)).transpose()?;

        let file_name = key.file_name().to_string();
        let media_type = media_type_for(item.mime_hint().or(stat.mime_hint.as_deref()), &file_name);
        let disposition = Disposition::for_media_type(&media_type);

        let source = self
            .storage
            .open_for_read(key, served)
            .await
            .map_err(|e| storage_error(item.id, key, e))?;

        let stream_id = Uuid::new_v4();
        tracing::debug!(
            stream_id = %stream_id,
            content_item_id = %item.id,
            media_type = %media_type,
            total_size = stat.size,
            ranged = served.is_some(),
            "Opened content stream"
        );

        Ok(ContentStream {
            stream_id,
            media_type,
            file_name,
            disposition,
            total_size: stat.size,
            range: served,
            body: ScopedByteSource::new(source.reader, stream_id, item.id, source.length),
        })
    }
}

fn storage_error(id: ContentItemId, key: &StorageKey, err: StorageError) -> ContentError {
    match &err {
        StorageError::NotFound(_) => {
            tracing::warn!(content_item_id = %id, key = %key, "Backing object missing");
            ContentError::StreamUnavailable(format!("content item {}", id))
        }
        StorageError::InvalidKey(detail) => ContentError::InvalidLocator(detail.clone()),
        StorageError::Timeout(_) | StorageError::Io(_) => {
            tracing::error!(content_item_id = %id, error = %err, "Storage read failed");
            ContentError::Infrastructure(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemoryContentStorage;
    use crate::domain::content::test_support::{lightweight, uploaded};
    use tokio::io::AsyncReadExt;

    async fn resolver_with(objects: Vec<(&str, Vec<u8>)>) -> DeliveryResolver {
        let storage = InMemoryContentStorage::new();
        for (key, bytes) in objects {
            storage.put(key, bytes, None).await;
        }
        DeliveryResolver::new(Arc::new(storage))
    }

    async fn body_of(outcome: DeliveryOutcome) -> (ContentStream, Vec<u8>) {
        match outcome {
            DeliveryOutcome::Stream(mut stream) => {
                let mut out = Vec::new();
                stream.body.read_to_end(&mut out).await.unwrap();
                (stream, out)
            }
            other => panic!("expected stream, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn streams_uploaded_resource_with_media_type() {
        let resolver = resolver_with(vec![("files/slides.pdf", b"%PDF-1.7".to_vec())]).await;
        let item = ContentItem::from(uploaded(1, 1, "files/slides.pdf", 0));

        let outcome = resolver.resolve(&item, DeliveryMode::Stream, None).await.unwrap();
        assert!(outcome.is_consumption());
        let (stream, bytes) = body_of(outcome).await;

        assert_eq!(bytes, b"%PDF-1.7");
        assert_eq!(stream.media_type, "application/pdf");
        assert_eq!(stream.file_name, "slides.pdf");
        assert_eq!(stream.disposition, Disposition::Inline);
        assert_eq!(stream.total_size, 8);
        assert_eq!(stream.content_length(), 8);
    }

    #[tokio::test]
    async fn stored_hint_overrides_extension() {
        let resolver = resolver_with(vec![("a.bin", b"x".to_vec())]).await;
        let mut record = uploaded(1, 1, "a.bin", 0);
        record.mime_hint = Some("image/png".to_string());
        let item = ContentItem::from(record);

        let (stream, _) = body_of(resolver.resolve(&item, DeliveryMode::Stream, None).await.unwrap()).await;
        assert_eq!(stream.media_type, "image/png");
    }

    #[tokio::test]
    async fn unknown_type_is_octet_stream_attachment() {
        let resolver = resolver_with(vec![("blob", b"x".to_vec())]).await;
        let item = ContentItem::from(uploaded(1, 1, "blob", 0));

        let (stream, _) = body_of(resolver.resolve(&item, DeliveryMode::Stream, None).await.unwrap()).await;
        assert_eq!(stream.media_type, "application/octet-stream");
        assert_eq!(stream.disposition, Disposition::Attachment);
    }

    #[tokio::test]
    async fn serves_requested_range() {
        let resolver = resolver_with(vec![("v.mp4", b"0123456789".to_vec())]).await;
        let item = ContentItem::from(lightweight(2, 1, ContentKind::Video, "v.mp4", 0));

        let outcome = resolver
            .resolve(&item, DeliveryMode::Stream, ByteRangeSpec::parse("bytes=2-4"))
            .await
            .unwrap();
        let (stream, bytes) = body_of(outcome).await;
        assert_eq!(bytes, b"234");
        assert_eq!(stream.range, Some(ByteRange { start: 2, end: 4 }));
        assert_eq!(stream.content_length(), 3);
        assert_eq!(stream.total_size, 10);
    }

    #[tokio::test]
    async fn unsatisfiable_range_reports_size() {
        let resolver = resolver_with(vec![("v.mp4", b"0123456789".to_vec())]).await;
        let item = ContentItem::from(uploaded(1, 1, "v.mp4", 0));

        let err = resolver
            .resolve(&item, DeliveryMode::Stream, ByteRangeSpec::parse("bytes=50-"))
            .await
            .unwrap_err();
        assert!(matches!(err, ContentError::RangeNotSatisfiable { size: 10 }));
    }

    #[tokio::test]
    async fn missing_object_is_stream_unavailable() {
        let resolver = resolver_with(vec![]).await;
        let item = ContentItem::from(uploaded(1, 1, "gone.pdf", 0));

        let err = resolver.resolve(&item, DeliveryMode::Stream, None).await.unwrap_err();
        assert!(matches!(err, ContentError::StreamUnavailable(_)));
    }

    #[tokio::test]
    async fn external_link_is_metadata_only() {
        let resolver = resolver_with(vec![]).await;
        let item = ContentItem::from(lightweight(
            3,
            1,
            ContentKind::ExternalLink,
            "https://drive.example.com/s/abc",
            0,
        ));

        let outcome = resolver.resolve(&item, DeliveryMode::Redirect, None).await.unwrap();
        assert!(!outcome.is_consumption());
        match outcome {
            DeliveryOutcome::Link(target) => assert_eq!(target.url, "https://drive.example.com/s/abc"),
            other => panic!("expected link card, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn meeting_link_redirects() {
        let resolver = resolver_with(vec![]).await;
        let item = ContentItem::from(lightweight(
            3,
            1,
            ContentKind::MeetingLink,
            "https://meet.example.com/room",
            0,
        ));

        let outcome = resolver.resolve(&item, DeliveryMode::Redirect, None).await.unwrap();
        assert!(matches!(outcome, DeliveryOutcome::Redirect(ref t) if t.url == "https://meet.example.com/room"));
    }

    #[tokio::test]
    async fn owner_view_dispatches_like_learner_grant() {
        let resolver = resolver_with(vec![("m.docx", b"doc".to_vec())]).await;
        let hosted = ContentItem::from(lightweight(4, 1, ContentKind::Material, "m.docx", 0));
        let offsite = ContentItem::from(lightweight(
            5,
            1,
            ContentKind::Video,
            "https://video.example.com/v",
            0,
        ));

        assert!(matches!(
            resolver.resolve(&hosted, DeliveryMode::OwnerView, None).await.unwrap(),
            DeliveryOutcome::Stream(_)
        ));
        assert!(matches!(
            resolver.resolve(&offsite, DeliveryMode::OwnerView, None).await.unwrap(),
            DeliveryOutcome::Redirect(_)
        ));
    }

    #[tokio::test]
    async fn malformed_url_is_invalid_locator() {
        let resolver = resolver_with(vec![]).await;
        let item = ContentItem::from(lightweight(6, 1, ContentKind::MeetingLink, "ftp://x", 0));

        let err = resolver.resolve(&item, DeliveryMode::Redirect, None).await.unwrap_err();
        assert!(matches!(err, ContentError::InvalidLocator(_)));
    }

    #[tokio::test]
    async fn dropping_partially_read_stream_releases_source() {
        let resolver = resolver_with(vec![("big.bin", vec![7u8; 4096])]).await;
        let item = ContentItem::from(uploaded(1, 1, "big.bin", 0));

        let outcome = resolver.resolve(&item, DeliveryMode::Stream, None).await.unwrap();
        if let DeliveryOutcome::Stream(mut stream) = outcome {
            let mut first = [0u8; 16];
            stream.body.read_exact(&mut first).await.unwrap();
            assert_eq!(stream.body.delivered, 16);
            drop(stream);
        } else {
            panic!("expected stream");
        }
    }
}
