//! Static content responder.
//!
//! Documents live in a single directory that is catalogued once at
//! startup. Only catalogued names can be served, so request paths never
//! reach outside the directory. Serving replaces every occurrence of
//! [`PLACEHOLDER`] with the caller id.

mod store;

pub use store::{substitute, ContentStore, Document, PLACEHOLDER};
