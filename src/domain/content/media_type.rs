//! Media type and content disposition selection for streamed items.

use once_cell::sync::Lazy;
use std::collections::HashMap;

pub const OCTET_STREAM: &str = "application/octet-stream";

/// Extensions whose media type is fixed regardless of what `mime_guess` reports.
static EXTENSION_MEDIA_TYPES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("pdf", "application/pdf"),
        ("txt", "text/plain; charset=utf-8"),
        ("jpg", "image/jpeg"),
        ("jpeg", "image/jpeg"),
        ("png", "image/png"),
        ("gif", "image/gif"),
        ("mp4", "video/mp4"),
        ("mov", "video/quicktime"),
        ("ppt", "application/vnd.ms-powerpoint"),
        (
            "pptx",
            "application/vnd.openxmlformats-officedocument.presentationml.presentation",
        ),
        ("doc", "application/msword"),
        (
            "docx",
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        ),
        ("xls", "application/vnd.ms-excel"),
        (
            "xlsx",
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        ),
    ])
});

/// Picks the media type: stored hint, then extension, then octet-stream.
pub fn media_type_for(mime_hint: Option<&str>, file_name: &str) -> String {
    if let Some(hint) = mime_hint.map(str::trim).filter(|h| h.contains('/')) {
        return hint.to_string();
    }

    let extension = std::path::Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());

    if let Some(known) = extension
        .as_deref()
        .and_then(|ext| EXTENSION_MEDIA_TYPES.get(ext))
    {
        return (*known).to_string();
    }

    mime_guess::from_path(file_name)
        .first_raw()
        .unwrap_or(OCTET_STREAM)
        .to_string()
}

/// How the client should present a streamed item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    Inline,
    Attachment,
}

impl Disposition {
    /// Documents, media and slide decks open in the browser; everything else downloads.
    pub fn for_media_type(media_type: &str) -> Self {
        let essence = media_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();

        let inline = essence == "application/pdf"
            || essence.starts_with("video/")
            || essence.starts_with("image/")
            || essence == "application/vnd.ms-powerpoint"
            || essence.ends_with("presentationml.presentation");

        if inline {
            Disposition::Inline
        } else {
            Disposition::Attachment
        }
    }

    /// `Content-Disposition` header value with the suggested file name.
    pub fn header_value(&self, file_name: &str) -> String {
        let kind = match self {
            Disposition::Inline => "inline",
            Disposition::Attachment => "attachment",
        };
        let escaped: String = file_name
            .chars()
            .filter(|c| !c.is_control())
            .map(|c| if c == '"' { '\'' } else { c })
            .collect();
        format!("{}; filename=\"{}\"", kind, escaped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_hint_wins() {
        assert_eq!(media_type_for(Some("application/zip"), "deck.pdf"), "application/zip");
    }

    #[test]
    fn malformed_hint_falls_back_to_extension() {
        assert_eq!(media_type_for(Some("pdf"), "notes.PDF"), "application/pdf");
    }

    #[test]
    fn extension_table_takes_precedence() {
        assert_eq!(media_type_for(None, "readme.txt"), "text/plain; charset=utf-8");
        assert_eq!(media_type_for(None, "clip.mov"), "video/quicktime");
        assert_eq!(
            media_type_for(None, "deck.pptx"),
            "application/vnd.openxmlformats-officedocument.presentationml.presentation"
        );
    }

    #[test]
    fn unknown_extension_uses_guess_then_octet_stream() {
        assert_eq!(media_type_for(None, "page.html"), "text/html");
        assert_eq!(media_type_for(None, "blob"), OCTET_STREAM);
        assert_eq!(media_type_for(None, "data.zzzunknown"), OCTET_STREAM);
    }

    #[test]
    fn disposition_inline_for_viewable_types() {
        assert_eq!(Disposition::for_media_type("application/pdf"), Disposition::Inline);
        assert_eq!(Disposition::for_media_type("video/mp4"), Disposition::Inline);
        assert_eq!(Disposition::for_media_type("image/png"), Disposition::Inline);
        assert_eq!(
            Disposition::for_media_type("application/vnd.ms-powerpoint"),
            Disposition::Inline
        );
    }

    #[test]
    fn disposition_attachment_otherwise() {
        assert_eq!(Disposition::for_media_type("text/plain; charset=utf-8"), Disposition::Attachment);
        assert_eq!(Disposition::for_media_type(OCTET_STREAM), Disposition::Attachment);
    }

    #[test]
    fn header_value_quotes_file_name() {
        assert_eq!(
            Disposition::Attachment.header_value("my \"notes\".txt"),
            "attachment; filename=\"my 'notes'.txt\""
        );
    }
}
