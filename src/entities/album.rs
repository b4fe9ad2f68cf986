use std::ops::{Deref, DerefMut};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::entities::{FeedData, FeedEntity, Photo};
use crate::error::Result;
use crate::session::QueryOptions;

/// Whether a lazy photo fetch has been attempted for this album instance.
///
/// Kept separate from emptiness so a legitimately empty album is not
/// re-fetched forever.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FetchState {
    NotFetched,
    Fetched,
}

#[derive(Debug)]
struct PhotoCache {
    state: FetchState,
    photos: Vec<Arc<Photo>>,
}

/// A single album feed.
#[derive(Debug)]
pub struct Album {
    pub feed: FeedData,
    pub published: Option<DateTime<Utc>>,
    pub summary: Option<String>,
    /// Visibility of the album, "public" or "private".
    pub rights: Option<String>,
    pub gphoto_id: Option<String>,
    pub name: Option<String>,
    pub access: Option<String>,
    /// Number of photos in this album.
    pub numphotos: Option<u32>,
    /// Number of photos matching this page's query.
    pub total_results: Option<u32>,
    pub start_index: Option<u32>,
    pub items_per_page: Option<u32>,
    pub allow_downloads: Option<bool>,
    cache: Mutex<PhotoCache>,
}

impl Album {
    #[must_use]
    pub fn new(feed: FeedData) -> Self {
        Self {
            feed,
            published: None,
            summary: None,
            rights: None,
            gphoto_id: None,
            name: None,
            access: None,
            numphotos: None,
            total_results: None,
            start_index: None,
            items_per_page: None,
            allow_downloads: None,
            cache: Mutex::new(PhotoCache {
                state: FetchState::NotFetched,
                photos: Vec::new(),
            }),
        }
    }

    /// True if this album's rights are set to public.
    #[must_use]
    pub fn is_public(&self) -> bool {
        self.rights.as_deref() == Some("public")
    }

    /// True if this album's rights are set to private.
    #[must_use]
    pub fn is_private(&self) -> bool {
        self.rights.as_deref() == Some("private")
    }

    /// Photo entries currently held, without triggering a fetch.
    #[must_use]
    pub fn entries(&self) -> Vec<Arc<Photo>> {
        self.cache.lock().unwrap().photos.clone()
    }

    /// Replace the photo entries. Called by the mapper for feeds that embed
    /// their photos; an album entry constructed without them stays eligible
    /// for one lazy fetch.
    pub fn set_entries(&self, photos: Vec<Arc<Photo>>) {
        self.cache.lock().unwrap().photos = photos;
    }

    /// The current page of photos, fetched on first access.
    ///
    /// At most one album fetch is attempted per instance; after that the
    /// cached entries are returned as-is, even when the album turned out to
    /// be empty. When no session is resolvable the current (typically empty)
    /// entries are returned and no error is raised, unlike `load`, `next`
    /// and `previous` which fail loudly.
    ///
    /// # Errors
    ///
    /// Transport and parse failures from the session propagate unmodified.
    /// A failed fetch is not retried on the next call.
    pub async fn photos(&self, options: &QueryOptions) -> Result<Vec<Arc<Photo>>> {
        {
            let mut cache = self.cache.lock().unwrap();
            if !cache.photos.is_empty() || cache.state == FetchState::Fetched {
                return Ok(cache.photos.clone());
            }
            // Marked before the fetch starts, so a concurrent caller cannot
            // trigger a second request.
            cache.state = FetchState::Fetched;
        }

        let session = match self.session() {
            Some(session) => session,
            None => {
                debug!(album = %self.feed.id, "no session bound, returning entries as-is");
                return Ok(self.entries());
            }
        };

        debug!(album = %self.feed.id, "fetching album photos");
        let detail = session.album(&self.feed.id, options).await?;
        let photos = detail.entries();
        for photo in &photos {
            photo.set_session(Arc::clone(&session));
        }

        self.cache.lock().unwrap().photos = photos.clone();
        Ok(photos)
    }
}

impl FeedEntity for Album {
    fn feed(&self) -> &FeedData {
        &self.feed
    }
}

/// A search result feed.
///
/// Shaped and behaving exactly like an album; a distinct type purely so the
/// API says what the caller is holding.
#[derive(Debug)]
pub struct Search(Album);

impl Search {
    #[must_use]
    pub fn new(album: Album) -> Self {
        Self(album)
    }
}

impl Deref for Search {
    type Target = Album;

    fn deref(&self) -> &Album {
        &self.0
    }
}

impl DerefMut for Search {
    fn deref_mut(&mut self) -> &mut Album {
        &mut self.0
    }
}

impl FeedEntity for Search {
    fn feed(&self) -> &FeedData {
        &self.0.feed
    }
}
