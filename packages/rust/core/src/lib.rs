//! Core pipeline orchestration for Docshelf.
//!
//! Ties together manifest loading, record decoding, PDF-link extraction,
//! and catalog persistence into the end-to-end [`pipeline::build_catalog`]
//! workflow, wrapped in the all-or-nothing [`workspace::Workspace`]
//! lifecycle.

pub mod pipeline;
pub mod workspace;
pub mod writer;
