//! pagecmp Core - content comparison of two HTML documents
//!
//! This crate finds and classifies the content differences between a source
//! (reference) document and a current document:
//! - Text normalization, URL resolution and image file name extraction
//! - An abstract `DocumentTree` with an arena implementation built from HTML
//! - Filtered pre-order traversal of meaningful text leaves
//! - A read-only index of the source document
//! - Classification of text, link, image and removed-content differences
//! - Reports with content digests and a searchable, sortable summary

pub mod config;
pub mod diff;
pub mod dom;
pub mod errors;
pub mod logging_facility;
pub mod normalize;
pub mod source_index;
pub mod walker;

// Used by the exported logging macros
pub use pagecmp_core_types;
pub use tracing;

// Re-export commonly used types
pub use config::CompareConfig;
pub use diff::{
    compare_documents, Comparator, CompareReport, DiffCategory, DiffRegistry, Difference,
    VisualKind,
};
pub use dom::{parse_document, Document, DocumentTree};
pub use errors::{ExError, ExErrorKind, PageCmpError, Result};
pub use normalize::normalize_text;
pub use source_index::SourceIndex;
