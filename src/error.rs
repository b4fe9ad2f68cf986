use thiserror::Error;

/// Errors surfaced by entity navigation operations.
#[derive(Debug, Error)]
pub enum Error {
    /// A fetching operation was invoked on an entity with no session bound
    /// anywhere in its ancestor chain.
    #[error("no session is bound to this entity or any of its ancestors")]
    MissingSession,

    /// The operation is intentionally not offered on this entity kind.
    #[error("`{operation}` is not available on a {entity} entity")]
    DisabledOperation {
        operation: &'static str,
        entity: &'static str,
    },

    /// Transport or parse failure reported by the session collaborator,
    /// passed through unmodified.
    #[error(transparent)]
    Transport(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
