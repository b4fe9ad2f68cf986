//! Picasa Web Albums client library.
//!
//! A typed, navigable model of the paginated Atom/GData feeds served by the
//! Picasa Web Albums API. Parsed responses form a graph of entities (users,
//! albums, photos, ...) that share navigation behavior: link lookup,
//! pagination traversal, and lazy fetching of nested collections through the
//! session that produced them.
//!
//! Transport, authentication and XML binding live behind the [`Session`]
//! trait; this crate only consumes it.

pub mod entities;
pub mod error;
pub mod session;

pub use error::{Error, Result};
pub use session::{QueryOptions, Session};
