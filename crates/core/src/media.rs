//! Main-content media kinds and the data-URI codec applied to their payloads.
//!
//! Image and video payloads arrive from the console as data-URIs
//! (`data:image/png;base64,....`). Only the base64 body is stored; the prefix
//! is rebuilt from the content kind when the row is read back.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

pub const KIND_IMAGE: &str = "imagen";
pub const KIND_VIDEO: &str = "video";
pub const KIND_TEXT: &str = "texto";

/// Prefix rebuilt for stored image payloads.
pub const IMAGE_DATA_URI_PREFIX: &str = "data:image/jpeg;base64,";

/// Prefix rebuilt for stored video payloads.
pub const VIDEO_DATA_URI_PREFIX: &str = "data:video/mp4;base64,";

/// Data-URI prefixes that are stripped on ingestion.
const STRIPPABLE_PREFIXES: &[&str] = &["data:image/", "data:video/"];

/// Payload shapes that are already addressable and must not be prefixed.
///
/// Each contains `:`, which never occurs in a base64 body, so a stored body
/// can not be mistaken for one of them. JPEG bodies start with `/9j/`.
const PASSTHROUGH_PREFIXES: &[&str] = &["data:", "http://", "https://"];

/// Kind of a `main_content` row (the `kind` column).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
    Text,
}

impl MediaKind {
    pub fn as_str(self) -> &'static str {
        match self {
            MediaKind::Image => KIND_IMAGE,
            MediaKind::Video => KIND_VIDEO,
            MediaKind::Text => KIND_TEXT,
        }
    }

    /// Data-URI prefix prepended on read, or `None` for text content.
    pub fn data_uri_prefix(self) -> Option<&'static str> {
        match self {
            MediaKind::Image => Some(IMAGE_DATA_URI_PREFIX),
            MediaKind::Video => Some(VIDEO_DATA_URI_PREFIX),
            MediaKind::Text => None,
        }
    }
}

impl FromStr for MediaKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            KIND_IMAGE => Ok(MediaKind::Image),
            KIND_VIDEO => Ok(MediaKind::Video),
            KIND_TEXT => Ok(MediaKind::Text),
            other => Err(CoreError::Validation(format!(
                "Invalid content type '{other}'. Must be one of: {KIND_IMAGE}, {KIND_VIDEO}, {KIND_TEXT}"
            ))),
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Convert an incoming payload into its stored form.
///
/// For image and video content a leading `data:image/...` or `data:video/...`
/// prefix is removed up to and including the first comma. Text content and
/// payloads without such a prefix are returned unchanged.
pub fn encode_for_storage(kind: MediaKind, payload: &str) -> Result<&str, CoreError> {
    if kind == MediaKind::Text {
        return Ok(payload);
    }

    if !STRIPPABLE_PREFIXES.iter().any(|p| payload.starts_with(p)) {
        return Ok(payload);
    }

    match payload.split_once(',') {
        Some((_, body)) => Ok(body),
        None => Err(CoreError::Validation(
            "Malformed data URI: missing ',' after the media type".into(),
        )),
    }
}

/// Convert a stored payload back into the form served to clients.
///
/// Image and video bodies get the kind's data-URI prefix back. Empty
/// payloads, URLs, and values that already carry a data-URI are returned
/// as stored.
pub fn decode_for_response(kind: MediaKind, stored: &str) -> Cow<'_, str> {
    let Some(prefix) = kind.data_uri_prefix() else {
        return Cow::Borrowed(stored);
    };

    if stored.is_empty() || PASSTHROUGH_PREFIXES.iter().any(|p| stored.starts_with(p)) {
        return Cow::Borrowed(stored);
    }

    Cow::Owned(format!("{prefix}{stored}"))
}
