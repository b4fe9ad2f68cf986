use std::sync::Arc;

use crate::entities::{Album, FeedData, FeedEntity, Photo};

/// A user's album feed.
#[derive(Debug)]
pub struct User {
    pub feed: FeedData,
    /// Total number of albums the user owns.
    pub total_results: Option<u32>,
    pub start_index: Option<u32>,
    pub items_per_page: Option<u32>,
    /// URL of the user's portrait thumbnail.
    pub thumbnail: Option<String>,
    /// Albums embedded in this page of the feed, in source order.
    pub entries: Vec<Arc<Album>>,
}

impl User {
    #[must_use]
    pub fn new(feed: FeedData) -> Self {
        Self {
            feed,
            total_results: None,
            start_index: None,
            items_per_page: None,
            thumbnail: None,
            entries: Vec::new(),
        }
    }

    /// The current page of albums. User feeds embed their albums, so this
    /// never fetches.
    #[must_use]
    pub fn albums(&self) -> &[Arc<Album>] {
        &self.entries
    }
}

impl FeedEntity for User {
    fn feed(&self) -> &FeedData {
        &self.feed
    }
}

/// The recently-updated-photos variant of a user feed.
///
/// User-shaped, but its entries are photos and it deliberately offers no
/// `albums` accessor; the dynamic path ([`Entity::albums`]) reports a
/// disabled operation for this kind.
///
/// [`Entity::albums`]: crate::entities::Entity::albums
#[derive(Debug)]
pub struct RecentPhotos {
    pub feed: FeedData,
    pub total_results: Option<u32>,
    pub start_index: Option<u32>,
    pub items_per_page: Option<u32>,
    pub thumbnail: Option<String>,
    /// Recently updated photos in source order.
    pub entries: Vec<Arc<Photo>>,
}

impl RecentPhotos {
    #[must_use]
    pub fn new(feed: FeedData) -> Self {
        Self {
            feed,
            total_results: None,
            start_index: None,
            items_per_page: None,
            thumbnail: None,
            entries: Vec::new(),
        }
    }

    /// The current page of recently updated photos.
    #[must_use]
    pub fn photos(&self) -> &[Arc<Photo>] {
        &self.entries
    }
}

impl FeedEntity for RecentPhotos {
    fn feed(&self) -> &FeedData {
        &self.feed
    }
}
