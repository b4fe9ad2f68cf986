//! The typed feed entity graph.
//!
//! Every parsed node shares the [`FeedData`] field set and the [`FeedEntity`]
//! navigation behavior. Strong references only point down the tree (a user
//! owns its albums, an album owns its photos); parent back-references are
//! weak, so a graph never cycles. The document mapper constructs the typed
//! structs, wires parents with [`parent_ref`], and binds the session on the
//! root; every other node reaches the session by walking its ancestor chain.

use std::fmt;
use std::sync::{Arc, Mutex, Weak};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::session::{QueryOptions, Session};

pub mod album;
pub mod atom;
pub mod media;
pub mod photo;
pub mod user;

pub use album::{Album, Search};
pub use atom::{Author, Link};
pub use media::{PhotoUrl, ThumbnailUrl};
pub use photo::Photo;
pub use user::{RecentPhotos, User};

/// Fields shared by every feed entity.
///
/// The document mapper populates these from the parsed response before any
/// navigation behavior runs; `links`, `thumbnails` and entry sequences keep
/// their source order.
#[derive(Debug)]
pub struct FeedData {
    /// Canonical address of the entity, also the URL used to re-fetch it.
    pub id: String,
    pub updated: DateTime<Utc>,
    pub title: String,
    /// Links in source order.
    pub links: Vec<Link>,
    /// Primary image, present on photo and album feeds.
    pub content: Option<PhotoUrl>,
    /// Thumbnail variants in source order.
    pub thumbnails: Vec<ThumbnailUrl>,
    pub author: Option<Author>,
    binding: Mutex<Binding>,
}

/// Session and parent references, attached during or immediately after
/// construction. The parent edge is weak: relation only, never ownership.
#[derive(Default)]
struct Binding {
    parent: Option<Weak<dyn FeedEntity>>,
    session: Option<Arc<dyn Session>>,
}

impl fmt::Debug for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binding")
            .field("parent", &self.parent.is_some())
            .field("session", &self.session.is_some())
            .finish()
    }
}

impl FeedData {
    /// Create the field set with the required scalars; the mapper fills the
    /// rest in place.
    pub fn new(id: impl Into<String>, updated: DateTime<Utc>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            updated,
            title: title.into(),
            links: Vec::new(),
            content: None,
            thumbnails: Vec::new(),
            author: None,
            binding: Mutex::new(Binding::default()),
        }
    }

    /// First link whose relation equals `rel`. Duplicate relations are a
    /// data anomaly; the first one wins.
    #[must_use]
    pub fn link(&self, rel: &str) -> Option<&Link> {
        self.links.iter().find(|l| l.rel == rel)
    }

    /// Bind a session directly, overriding ancestor lookup.
    pub fn set_session(&self, session: Arc<dyn Session>) {
        self.binding.lock().unwrap().session = Some(session);
    }

    /// Attach the enclosing entity. Wired by the mapper once the parent
    /// handle exists; see [`parent_ref`].
    pub fn set_parent(&self, parent: Weak<dyn FeedEntity>) {
        self.binding.lock().unwrap().parent = Some(parent);
    }

    /// Resolve the session that produced this entity: the direct binding if
    /// set, otherwise the nearest ancestor's. The first successful ancestor
    /// resolution is memoized here, so the chain is walked at most once.
    ///
    /// A detached entity (no session anywhere in its ancestry) resolves to
    /// `None`; operations that need a fetch treat that as a precondition
    /// failure.
    #[must_use]
    pub fn session(&self) -> Option<Arc<dyn Session>> {
        let mut ancestor = {
            let binding = self.binding.lock().unwrap();
            if let Some(session) = &binding.session {
                return Some(Arc::clone(session));
            }
            binding.parent.clone()
        };

        // Iterative walk, one lock at a time. Feed nesting is shallow in
        // practice but nothing here depends on that.
        while let Some(parent) = ancestor.as_ref().and_then(Weak::upgrade) {
            let parent_binding = parent.feed().binding.lock().unwrap();
            if let Some(session) = &parent_binding.session {
                let session = Arc::clone(session);
                drop(parent_binding);
                trace!(entity = %self.id, "session inherited from ancestor");
                self.binding.lock().unwrap().session = Some(Arc::clone(&session));
                return Some(session);
            }
            ancestor = parent_binding.parent.clone();
        }

        None
    }
}

/// Downgrade an entity handle into the weak reference [`FeedData::set_parent`]
/// takes.
#[must_use]
pub fn parent_ref<T>(entity: &Arc<T>) -> Weak<dyn FeedEntity>
where
    T: FeedEntity + 'static,
{
    let dynamic: Arc<dyn FeedEntity> = entity.clone();
    Arc::downgrade(&dynamic)
}

/// Navigation behavior shared by every feed entity.
#[async_trait]
pub trait FeedEntity: Send + Sync {
    /// The common field set backing this entity.
    fn feed(&self) -> &FeedData;

    /// First link with the given relation ("next", "previous", "self",
    /// "edit", ...), or `None` when the feed carried no such link.
    fn link(&self, rel: &str) -> Option<&Link> {
        self.feed().link(rel)
    }

    /// The session that produced this entity, inherited through the parent
    /// chain when not bound directly.
    fn session(&self) -> Option<Arc<dyn Session>> {
        self.feed().session()
    }

    /// Bind a session directly, overriding ancestor lookup.
    fn set_session(&self, session: Arc<dyn Session>) {
        self.feed().set_session(session);
    }

    /// Attach the enclosing entity as a weak back-reference.
    fn set_parent(&self, parent: Weak<dyn FeedEntity>) {
        self.feed().set_parent(parent);
    }

    /// Re-fetch this entity's canonical representation.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::MissingSession`] when no session resolves;
    /// transport and parse failures propagate from the session.
    async fn load(&self, options: &QueryOptions) -> Result<Entity> {
        let session = self.session().ok_or(Error::MissingSession)?;
        debug!(url = %self.feed().id, "reloading entity");
        session.get_url(&self.feed().id, options).await
    }

    /// Retrieve the next page of a paginated feed, or `None` when this is
    /// the last page.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::MissingSession`] when a "next" link exists but no
    /// session resolves.
    async fn next(&self) -> Result<Option<Entity>> {
        self.follow_link("next").await
    }

    /// Retrieve the previous page of a paginated feed, or `None` when this
    /// is the first page.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::MissingSession`] when a "previous" link exists
    /// but no session resolves.
    async fn previous(&self) -> Result<Option<Entity>> {
        self.follow_link("previous").await
    }

    /// Fetch the target of the link with the given relation. A missing link
    /// is a normal terminal state, not an error.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::MissingSession`] when the link exists but no
    /// session resolves.
    async fn follow_link(&self, rel: &str) -> Result<Option<Entity>> {
        let href = match self.link(rel) {
            Some(link) => link.href.clone(),
            None => return Ok(None),
        };
        let session = self.session().ok_or(Error::MissingSession)?;
        debug!(rel, url = %href, "following feed link");
        let entity = session.get_url(&href, &QueryOptions::default()).await?;
        Ok(Some(entity))
    }
}

/// A parsed feed response: the closed set of entity kinds a fetch can
/// produce.
#[derive(Debug, Clone)]
pub enum Entity {
    User(Arc<User>),
    RecentPhotos(Arc<RecentPhotos>),
    Album(Arc<Album>),
    Search(Arc<Search>),
    Photo(Arc<Photo>),
}

impl Entity {
    /// Stable name of the entity kind, for logs and errors.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::User(_) => "user",
            Self::RecentPhotos(_) => "recent-photos",
            Self::Album(_) => "album",
            Self::Search(_) => "search",
            Self::Photo(_) => "photo",
        }
    }

    /// The albums embedded in a user feed.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::DisabledOperation`] on every other kind. In
    /// particular the recently-updated-photos feed deliberately does not
    /// offer albums; asking for them is a programmer error, not an empty
    /// result.
    pub fn albums(&self) -> Result<Vec<Arc<Album>>> {
        match self {
            Self::User(user) => Ok(user.albums().to_vec()),
            other => Err(Error::DisabledOperation {
                operation: "albums",
                entity: other.kind(),
            }),
        }
    }

    #[must_use]
    pub fn as_user(&self) -> Option<&Arc<User>> {
        match self {
            Self::User(user) => Some(user),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_recent_photos(&self) -> Option<&Arc<RecentPhotos>> {
        match self {
            Self::RecentPhotos(recent) => Some(recent),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_album(&self) -> Option<&Arc<Album>> {
        match self {
            Self::Album(album) => Some(album),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_search(&self) -> Option<&Arc<Search>> {
        match self {
            Self::Search(search) => Some(search),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_photo(&self) -> Option<&Arc<Photo>> {
        match self {
            Self::Photo(photo) => Some(photo),
            _ => None,
        }
    }
}

impl FeedEntity for Entity {
    fn feed(&self) -> &FeedData {
        match self {
            Self::User(user) => user.feed(),
            Self::RecentPhotos(recent) => recent.feed(),
            Self::Album(album) => album.feed(),
            Self::Search(search) => search.feed(),
            Self::Photo(photo) => photo.feed(),
        }
    }
}
