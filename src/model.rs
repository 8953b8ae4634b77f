//! # Document Model
//!
//! writeWave keeps three schema-less collections. Documents travel through
//! the service as plain JSON objects; only the identifier and the handful of
//! fields used for filtering and sorting are known to the server.
//!
//! | Collection | Document      | Known fields                                  |
//! |------------|---------------|-----------------------------------------------|
//! | `blogs`    | blog post     | `_id`, `title`, `long_des`, `long_des_count`, `date` |
//! | `comments` | comment       | `_id`                                         |
//! | `wishlist` | wishlist item | `_id`, `email`                                |
//!
//! References between documents (a comment's blog, a wishlist item's blog)
//! are informational only and never checked.

use std::fmt;
use std::str::FromStr;

use mongodb::bson::oid::ObjectId;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use thiserror::Error;

/// A schema-less document as exchanged with clients
pub type Document = Map<String, Value>;

/// Field names the server relies on
pub mod fields {
    /// Document identifier
    pub const ID: &str = "_id";

    /// Blog publish date (ISO-8601 strings sort chronologically)
    pub const DATE: &str = "date";

    /// Denormalized length of a blog's long description
    pub const LONG_DES_COUNT: &str = "long_des_count";

    /// Owner email of a wishlist item
    pub const OWNER_EMAIL: &str = "email";
}

/// Logical collections of the writeWave database
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Blogs,
    Comments,
    Wishlist,
}

impl Collection {
    /// Collection name in the database
    pub fn name(&self) -> &'static str {
        match self {
            Collection::Blogs => "blogs",
            Collection::Comments => "comments",
            Collection::Wishlist => "wishlist",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Path identifier that is not a 24-character hex object id
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid document id: {0}")]
pub struct InvalidDocumentId(pub String);

/// Identifier of a stored document
///
/// Rendered as 24 lowercase hex characters, matching what the database
/// generates for `_id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DocumentId(ObjectId);

impl DocumentId {
    /// Generate a fresh identifier
    pub fn new() -> Self {
        Self(ObjectId::new())
    }

    pub fn object_id(&self) -> ObjectId {
        self.0
    }

    pub fn to_hex(&self) -> String {
        self.0.to_hex()
    }
}

impl Default for DocumentId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<ObjectId> for DocumentId {
    fn from(oid: ObjectId) -> Self {
        Self(oid)
    }
}

impl FromStr for DocumentId {
    type Err = InvalidDocumentId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ObjectId::parse_str(s)
            .map(Self)
            .map_err(|_| InvalidDocumentId(s.to_string()))
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_hex())
    }
}

impl Serialize for DocumentId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.to_hex())
    }
}
