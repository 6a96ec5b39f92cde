//! Per-site extractors and the records they produce.
//!
//! Each extractor is a plain function from a parsed [`Document`] to a
//! record. Extraction is eager: every field is resolved before the record
//! is returned, and missing fields are `None` or empty.
//!
//! [`Document`]: crate::document::Document

pub mod domain;
pub mod google;
pub mod wikipedia;

pub use domain::{Album, AlbumList, AlbumListEntry, Artist, Credit, Lyrics, Track};
pub use google::Google;
pub use wikipedia::Wikipedia;
