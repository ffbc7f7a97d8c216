//! Page comparison engine.
//!
//! Compares a source document against a current document and produces an
//! ordered list of classified differences plus a serializable report.
//!
//! ## Entry point
//!
//! ```
//! use pagecmp_core::config::CompareConfig;
//! use pagecmp_core::diff::{compare_documents, render_summary_markdown, SummaryTable};
//! use pagecmp_core::dom::parse_document;
//!
//! let source = parse_document("<body><h1>Hello</h1></body>", None);
//! let current = parse_document("<body><h1>Welcome</h1></body>", None);
//! let report = compare_documents(&source, &current, &CompareConfig::default());
//! let table = SummaryTable::from_differences(&report.differences);
//! let summary = render_summary_markdown(&report, &table);
//! assert!(summary.contains("Heading Change"));
//! ```
//!
//! ## Guarantees
//!
//! - **Determinism**: identical inputs produce identical differences in the same order.
//! - **Symmetry**: a document compared against a copy of itself yields no differences,
//!   as long as every image has a recognizable file name.
//! - **No double counting**: an element is the target of at most one difference per run.

pub mod digest;
pub mod engine;
pub mod human_summary;
pub mod model;
pub mod registry;

pub use digest::content_digest;
pub use engine::{classify, compare_documents, Comparator, REPORT_SCHEMA_VERSION};
pub use human_summary::{render_summary_markdown, SummaryColumn, SummaryRow, SummaryTable};
pub use model::{
    CompareReport, DiffCandidate, DiffCategory, DiffClassification, DiffIdentity, Difference,
    DifferenceId, Treatment, VisualKind,
};
pub use registry::DiffRegistry;
