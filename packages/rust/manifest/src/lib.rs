//! Manifest loading and positional record decoding.
//!
//! The library manifest is a JSON object whose `documents` array holds
//! positional, untyped records. This crate provides:
//! - [`ManifestSource`] — fetches raw manifest bytes, from network or file
//! - [`decode`] — validates the positional wire shape into typed
//!   [`LibraryRecord`]s and normalizes them into catalog [`Document`]s
//!
//! [`Document`]: docshelf_shared::Document

pub mod decode;
pub mod source;

pub use decode::{LibraryRecord, canonical_url, date_to_epoch, decode_records, normalize};
pub use source::{ManifestSource, http_client};
