//! Single byte-range requests (`Range: bytes=...`).
//!
//! Only one range is served. A header listing several ranges, or one that
//! does not parse, is ignored and the full body is sent, which RFC 9110
//! permits. A range that parses but cannot be satisfied against the object
//! size fails with `RangeNotSatisfiable`.

use crate::domain::content::ContentError;

/// A requested byte range before the object size is known.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteRangeSpec {
    /// `bytes=start-end`, both inclusive.
    Closed { start: u64, end: u64 },
    /// `bytes=start-`
    From { start: u64 },
    /// `bytes=-len`, the last `len` bytes.
    Suffix { len: u64 },
}

impl ByteRangeSpec {
    /// Parses a `Range` header value. Returns `None` when the header should
    /// be ignored.
    pub fn parse(header: &str) -> Option<Self> {
        let spec = header.trim().strip_prefix("bytes=")?.trim();
        if spec.is_empty() || spec.contains(',') {
            return None;
        }

        let (start, end) = spec.split_once('-')?;
        let (start, end) = (start.trim(), end.trim());

        match (start.is_empty(), end.is_empty()) {
            (true, false) => end.parse().ok().map(|len| ByteRangeSpec::Suffix { len }),
            (false, true) => start.parse().ok().map(|start| ByteRangeSpec::From { start }),
            (false, false) => {
                let start: u64 = start.parse().ok()?;
                let end: u64 = end.parse().ok()?;
                (start <= end).then_some(ByteRangeSpec::Closed { start, end })
            }
            (true, true) => None,
        }
    }

    /// Resolves against the object size.
    pub fn resolve(&self, size: u64) -> Result<ByteRange, ContentError> {
        let unsatisfiable = ContentError::RangeNotSatisfiable { size };
        if size == 0 {
            return Err(unsatisfiable);
        }
        let last = size - 1;

        match *self {
            ByteRangeSpec::Closed { start, end } if start <= last => Ok(ByteRange {
                start,
                end: end.min(last),
            }),
            ByteRangeSpec::From { start } if start <= last => Ok(ByteRange { start, end: last }),
            ByteRangeSpec::Suffix { len } if len > 0 => Ok(ByteRange {
                start: size.saturating_sub(len),
                end: last,
            }),
            _ => Err(unsatisfiable),
        }
    }
}

/// A satisfiable range, both ends inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteRange {
    pub start: u64,
    pub end: u64,
}

impl ByteRange {
    /// Number of bytes covered. Never zero.
    pub fn length(&self) -> u64 {
        self.end - self.start + 1
    }

    /// `Content-Range` value for a partial response.
    pub fn content_range(&self, size: u64) -> String {
        format!("bytes {}-{}/{}", self.start, self.end, size)
    }
}

/// `Content-Range` value sent with a 416 response.
pub fn unsatisfied_content_range(size: u64) -> String {
    format!("bytes */{}", size)
}
