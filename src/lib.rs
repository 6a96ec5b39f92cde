//! Liner Notes - structured music metadata from Wikipedia and Google pages.
//!
//! A page is loaded through a [`source::DocumentSource`] (live, or through
//! on-disk snapshots) into a [`document::Document`], then handed to one of
//! the extractors in [`sites`]. Extractors resolve fields with the infobox
//! and table readers in [`resolver`], driven by the multilingual label
//! tables in [`dictionary`], and normalize what they read with [`text`]
//! and [`calendar`].

pub mod calendar;
pub mod config;
pub mod cursor;
pub mod dictionary;
pub mod document;
pub mod error;
pub mod resolver;
pub mod sites;
pub mod source;
pub mod text;
