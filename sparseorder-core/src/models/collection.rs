//! Collection and item identifiers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Stable identifier of an orderable item (a folder or a source)
pub type ItemId = Uuid;

/// Name used for the top-level collection in text form
pub const ROOT_COLLECTION_NAME: &str = "root";

/// Identifier of an ordered collection
///
/// The root collection holds the top-level folders. Every folder is itself a
/// collection holding the sources filed under it, keyed by the folder's item
/// id. Both kinds allocate positions the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum CollectionId {
    /// Top-level list of folders
    Root,
    /// Items nested under the folder with this id
    Folder(Uuid),
}

impl CollectionId {
    /// Returns true for the root collection
    #[must_use]
    pub const fn is_root(&self) -> bool {
        matches!(self, Self::Root)
    }

    /// Returns the folder id, if this is a folder collection
    #[must_use]
    pub const fn folder_id(&self) -> Option<Uuid> {
        match self {
            Self::Root => None,
            Self::Folder(id) => Some(*id),
        }
    }
}

impl fmt::Display for CollectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Root => f.write_str(ROOT_COLLECTION_NAME),
            Self::Folder(id) => write!(f, "{id}"),
        }
    }
}

/// Error returned when a collection id string is neither `root` nor a UUID
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid collection id `{0}`: expected `root` or a UUID")]
pub struct ParseCollectionIdError(String);

impl FromStr for CollectionId {
    type Err = ParseCollectionIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case(ROOT_COLLECTION_NAME) {
            return Ok(Self::Root);
        }
        Uuid::parse_str(trimmed)
            .map(Self::Folder)
            .map_err(|_| ParseCollectionIdError(s.to_string()))
    }
}

impl From<CollectionId> for String {
    fn from(id: CollectionId) -> Self {
        id.to_string()
    }
}

impl TryFrom<String> for CollectionId {
    type Error = ParseCollectionIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Uuid> for CollectionId {
    fn from(id: Uuid) -> Self {
        Self::Folder(id)
    }
}
