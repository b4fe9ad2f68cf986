use serde::{Deserialize, Serialize};
use url::Url;

/// A sized image reference from a media content element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoUrl {
    pub url: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

impl PhotoUrl {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            width: None,
            height: None,
        }
    }
}

/// A thumbnail variant from a media thumbnail element.
///
/// Thumbnail URLs embed their size name as the path segment before the
/// filename, e.g. `.../albumid/160c/photo.jpg`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThumbnailUrl {
    pub url: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

impl ThumbnailUrl {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            width: None,
            height: None,
        }
    }

    /// Size token parsed from the URL: the path segment before the
    /// filename. `None` when the URL does not parse or its path is too
    /// shallow to carry one.
    #[must_use]
    pub fn size_token(&self) -> Option<String> {
        let parsed = Url::parse(&self.url).ok()?;
        let segments: Vec<&str> = parsed.path_segments()?.collect();
        if segments.len() < 2 {
            return None;
        }
        let token = segments[segments.len() - 2];
        if token.is_empty() {
            None
        } else {
            Some(token.to_string())
        }
    }
}
