//! Document references.
//!
//! A pipeline runs against either a literal in-memory value or a field of a
//! document living in an external store. The two cases have very different
//! caching behavior: literals have no persistent identity and are never
//! cached, while store-backed documents key the result cache.
//!
//! References are always built through the constructors; there is no
//! shape-based detection of "things that look like a document handle".
//!
//! # Example
//!
//! ```ignore
//! use docpipe::document::DocumentRef;
//!
//! let literal = DocumentRef::literal("cats are furry");
//! let stored = DocumentRef::stored("articles", "42", "body");
//!
//! assert!(!literal.is_cacheable());
//! assert!(stored.is_cacheable());
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Handle on a field of a document in the external store.
///
/// Creating a `StoreRef` does not fetch the document or check that it
/// exists; it is only an address.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StoreRef {
    /// Collection (index) the document lives in.
    pub collection: String,

    /// Document identifier within the collection.
    pub id: String,

    /// Field holding the text content to process.
    pub field: String,
}

impl StoreRef {
    /// Creates a handle on `collection/id`, field `field`.
    pub fn new(
        collection: impl Into<String>,
        id: impl Into<String>,
        field: impl Into<String>,
    ) -> Self {
        Self {
            collection: collection.into(),
            id: id.into(),
            field: field.into(),
        }
    }
}

impl fmt::Debug for StoreRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StoreRef({}/{}.{})", self.collection, self.id, self.field)
    }
}

impl fmt::Display for StoreRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}.{}", self.collection, self.id, self.field)
    }
}

/// Input document for a pipeline run.
///
/// Either a literal value (processed every time, never cached) or a
/// reference into the external store (cacheable under prefix keys).
#[derive(Debug, Clone, PartialEq)]
pub enum DocumentRef {
    /// In-memory value with no persistent identity.
    Literal(Value),

    /// Field of a document in the external store.
    Stored(StoreRef),
}

impl DocumentRef {
    /// Creates a literal document from any JSON-convertible value.
    pub fn literal(value: impl Into<Value>) -> Self {
        Self::Literal(value.into())
    }

    /// Creates a reference to a stored document field.
    pub fn stored(
        collection: impl Into<String>,
        id: impl Into<String>,
        field: impl Into<String>,
    ) -> Self {
        Self::Stored(StoreRef::new(collection, id, field))
    }

    /// Returns true if results for this document can be cached.
    pub fn is_cacheable(&self) -> bool {
        matches!(self, Self::Stored(_))
    }

    /// Returns the store reference, if this is a stored document.
    pub fn as_stored(&self) -> Option<&StoreRef> {
        match self {
            Self::Stored(sref) => Some(sref),
            Self::Literal(_) => None,
        }
    }
}

impl From<StoreRef> for DocumentRef {
    fn from(sref: StoreRef) -> Self {
        Self::Stored(sref)
    }
}
