use chrono::{DateTime, Utc};

use crate::entities::{FeedData, FeedEntity, ThumbnailUrl};

/// A single photo entry.
#[derive(Debug)]
pub struct Photo {
    pub feed: FeedData,
    pub published: Option<DateTime<Utc>>,
    pub summary: Option<String>,
    pub gphoto_id: Option<String>,
    /// Remote edit revision; changes whenever the photo is modified.
    pub version: Option<String>,
    /// Ordering position within the owning album.
    pub position: Option<u32>,
    /// Id of the owning album; set on photos from the recently-updated feed.
    pub albumid: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub description: Option<String>,
    pub keywords: Option<String>,
    pub credit: Option<String>,
}

impl Photo {
    #[must_use]
    pub fn new(feed: FeedData) -> Self {
        Self {
            feed,
            published: None,
            summary: None,
            gphoto_id: None,
            version: None,
            position: None,
            albumid: None,
            width: None,
            height: None,
            description: None,
            keywords: None,
            credit: None,
        }
    }

    /// URL of the full-size image, when the feed carried a content element.
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        self.feed.content.as_ref().map(|content| content.url.as_str())
    }

    /// First thumbnail whose size token equals `thumb_name` exactly.
    ///
    /// Thumbnail names are by image width in pixels. Sizes up to 160 may be
    /// either cropped (square) or uncropped:
    ///
    ///   cropped:        32c, 48c, 64c, 72c, 144c, 160c
    ///   uncropped:      32u, 48u, 64u, 72u, 144u, 160u
    ///
    /// Larger sizes are specified by the desired width alone (200 up to
    /// 1600). Nothing is validated against that list; matching is exact
    /// string comparison against whatever tokens the feed actually carried.
    #[must_use]
    pub fn thumbnail(&self, thumb_name: &str) -> Option<&ThumbnailUrl> {
        self.feed
            .thumbnails
            .iter()
            .find(|thumb| thumb.size_token().as_deref() == Some(thumb_name))
    }

    /// URL of the named thumbnail variant, or `None` when no variant
    /// matches. See [`Photo::thumbnail`] for the naming convention.
    #[must_use]
    pub fn thumbnail_url(&self, thumb_name: &str) -> Option<&str> {
        self.thumbnail(thumb_name).map(|thumb| thumb.url.as_str())
    }
}

impl FeedEntity for Photo {
    fn feed(&self) -> &FeedData {
        &self.feed
    }
}
