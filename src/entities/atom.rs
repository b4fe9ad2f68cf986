use serde::{Deserialize, Serialize};

/// A named hyperlink relation on a feed or entry.
///
/// An entity may carry several links with distinct relations; the
/// pagination relations are "next" and "previous".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// Relation name, e.g. "next", "previous", "self", "edit".
    pub rel: String,
    /// Absolute target URL.
    pub href: String,
}

impl Link {
    pub fn new(rel: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            rel: rel.into(),
            href: href.into(),
        }
    }
}

/// The Atom author block of a feed or entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub name: Option<String>,
    pub uri: Option<String>,
    pub email: Option<String>,
}
