//! Integration tests for session resolution and pagination traversal.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use picasaweb_client::entities::{
    parent_ref, Album, Entity, FeedData, FeedEntity, Link, Photo, RecentPhotos, User,
};
use picasaweb_client::{Error, QueryOptions, Session};

const USER_FEED: &str = "https://picasaweb.google.com/data/feed/api/user/liz";
const ALBUM_FEED: &str = "https://picasaweb.google.com/data/feed/api/user/liz/albumid/5";

fn updated_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2009, 3, 12, 13, 14, 15).unwrap()
}

fn feed(id: &str, title: &str) -> FeedData {
    FeedData::new(id, updated_at(), title)
}

/// Session double that serves a canned page and records requested URLs.
#[derive(Default)]
struct FakeSession {
    get_url_calls: AtomicUsize,
    requests: Mutex<Vec<String>>,
    page: Mutex<Option<Entity>>,
}

impl FakeSession {
    fn with_page(page: Entity) -> Arc<Self> {
        let session = Self::default();
        *session.page.lock().unwrap() = Some(page);
        Arc::new(session)
    }

    fn get_url_calls(&self) -> usize {
        self.get_url_calls.load(Ordering::SeqCst)
    }

    fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Session for FakeSession {
    async fn get_url(
        &self,
        url: &str,
        _options: &QueryOptions,
    ) -> picasaweb_client::Result<Entity> {
        self.get_url_calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(url.to_string());
        self.page
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| Error::Transport(anyhow::anyhow!("no canned page response")))
    }

    async fn album(
        &self,
        _id: &str,
        _options: &QueryOptions,
    ) -> picasaweb_client::Result<Arc<Album>> {
        Err(Error::Transport(anyhow::anyhow!("not used in this test")))
    }
}

#[test]
fn test_session_resolves_through_parent_chain() {
    let user = Arc::new(User::new(feed(USER_FEED, "liz")));
    let album = Arc::new(Album::new(feed(ALBUM_FEED, "vacation")));
    let photo = Arc::new(Photo::new(feed("photo-1", "photo")));
    album.set_parent(parent_ref(&user));
    photo.set_parent(parent_ref(&album));

    // Nothing bound anywhere yet.
    assert!(photo.session().is_none());

    let fake = Arc::new(FakeSession::default());
    let session: Arc<dyn Session> = fake;
    user.set_session(Arc::clone(&session));

    let resolved = photo
        .session()
        .expect("session should resolve through the ancestor chain");
    assert!(Arc::ptr_eq(&resolved, &session));
}

#[test]
fn test_session_memoized_after_first_resolution() {
    let user = Arc::new(User::new(feed(USER_FEED, "liz")));
    let album = Arc::new(Album::new(feed(ALBUM_FEED, "vacation")));
    album.set_parent(parent_ref(&user));

    let first: Arc<dyn Session> = Arc::new(FakeSession::default());
    let second: Arc<dyn Session> = Arc::new(FakeSession::default());

    user.set_session(Arc::clone(&first));
    assert!(Arc::ptr_eq(&album.session().unwrap(), &first));

    // Rebinding the ancestor does not disturb the memoized resolution.
    user.set_session(Arc::clone(&second));
    assert!(Arc::ptr_eq(&album.session().unwrap(), &first));
    assert!(Arc::ptr_eq(&user.session().unwrap(), &second));
}

#[test]
fn test_direct_binding_overrides_ancestor() {
    let user = Arc::new(User::new(feed(USER_FEED, "liz")));
    let album = Arc::new(Album::new(feed(ALBUM_FEED, "vacation")));
    album.set_parent(parent_ref(&user));

    let inherited: Arc<dyn Session> = Arc::new(FakeSession::default());
    let own: Arc<dyn Session> = Arc::new(FakeSession::default());
    user.set_session(Arc::clone(&inherited));
    album.set_session(Arc::clone(&own));

    assert!(Arc::ptr_eq(&album.session().unwrap(), &own));
}

#[tokio::test]
async fn test_load_refetches_by_id() {
    let user = Arc::new(User::new(feed(USER_FEED, "liz")));
    let page = Entity::User(Arc::new(User::new(feed(USER_FEED, "liz"))));
    let fake = FakeSession::with_page(page);
    user.set_session(fake.clone());

    let reloaded = user.load(&QueryOptions::default()).await.unwrap();
    assert_eq!(reloaded.kind(), "user");
    assert_eq!(fake.requests(), vec![USER_FEED.to_string()]);
}

#[tokio::test]
async fn test_load_without_session_fails() {
    let user = User::new(feed(USER_FEED, "liz"));
    let err = user.load(&QueryOptions::default()).await.unwrap_err();
    assert!(matches!(err, Error::MissingSession));
}

#[tokio::test]
async fn test_next_follows_link() {
    let mut page_one = feed(USER_FEED, "page one");
    page_one
        .links
        .push(Link::new("self", format!("{USER_FEED}?start-index=1")));
    page_one
        .links
        .push(Link::new("next", format!("{USER_FEED}?start-index=11")));
    let user = Arc::new(User::new(page_one));

    let next_page = Entity::User(Arc::new(User::new(feed(USER_FEED, "page two"))));
    let fake = FakeSession::with_page(next_page);
    user.set_session(fake.clone());

    let fetched = user.next().await.unwrap().expect("a next page exists");
    assert_eq!(fetched.kind(), "user");
    assert_eq!(
        fake.requests(),
        vec![format!("{USER_FEED}?start-index=11")]
    );

    // No "previous" link on the first page: a normal terminal state.
    assert!(user.previous().await.unwrap().is_none());
    assert_eq!(fake.get_url_calls(), 1);
}

#[tokio::test]
async fn test_next_without_link_is_terminal_even_detached() {
    let user = User::new(feed(USER_FEED, "only page"));
    assert!(user.next().await.unwrap().is_none());
    assert!(user.previous().await.unwrap().is_none());
}

#[tokio::test]
async fn test_next_with_link_but_no_session_fails() {
    let mut page = feed(USER_FEED, "page one");
    page.links
        .push(Link::new("next", format!("{USER_FEED}?start-index=11")));
    let user = User::new(page);

    let err = user.next().await.unwrap_err();
    assert!(matches!(err, Error::MissingSession));
}

#[test]
fn test_user_albums_alias_and_disabled_operation() {
    let album = Arc::new(Album::new(feed(ALBUM_FEED, "vacation")));
    let mut user = User::new(feed(USER_FEED, "liz"));
    user.entries = vec![Arc::clone(&album)];
    let user = Arc::new(user);

    assert_eq!(user.albums().len(), 1);

    let entity = Entity::User(Arc::clone(&user));
    assert_eq!(entity.albums().unwrap().len(), 1);

    let mut recent = RecentPhotos::new(feed(USER_FEED, "recent"));
    recent.entries = vec![Arc::new(Photo::new(feed("photo-1", "photo")))];
    let recent = Arc::new(recent);

    assert_eq!(recent.photos().len(), 1);

    let entity = Entity::RecentPhotos(recent);
    let err = entity.albums().unwrap_err();
    assert!(matches!(
        err,
        Error::DisabledOperation {
            operation: "albums",
            ..
        }
    ));
}
