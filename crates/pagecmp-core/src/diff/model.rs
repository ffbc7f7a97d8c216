//! Comparison output types.
//!
//! All types implement `Debug, Clone, Serialize, Deserialize, PartialEq`.
//! Per-category counts use `BTreeMap` for deterministic serialization.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// What kind of change a [`Difference`] records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DiffCategory {
    /// Unmatched text directly inside `h1`..`h6`
    HeadingChange,
    /// Unmatched text directly inside `p`
    ParagraphChange,
    /// Unmatched text anywhere else outside links and buttons
    GeneralTextChange,
    /// Same link URL, different visible text
    CtaTextChange,
    /// Same visible link text, different URL
    ModifiedLink,
    /// Link matching neither a source URL nor a source text
    NewLink,
    /// Image none of whose file names occur in the source
    ImageChange,
    /// Source text missing from the current document
    RemovedText,
    /// Source link URL missing from the current document
    RemovedLink,
}

impl DiffCategory {
    pub const ALL: [DiffCategory; 9] = [
        DiffCategory::HeadingChange,
        DiffCategory::ParagraphChange,
        DiffCategory::GeneralTextChange,
        DiffCategory::CtaTextChange,
        DiffCategory::ModifiedLink,
        DiffCategory::NewLink,
        DiffCategory::ImageChange,
        DiffCategory::RemovedText,
        DiffCategory::RemovedLink,
    ];

    /// Label shown in the summary's Category column
    pub fn label(&self) -> &'static str {
        match self {
            DiffCategory::HeadingChange => "Heading Change",
            DiffCategory::ParagraphChange => "Paragraph Change",
            DiffCategory::GeneralTextChange => "General Text Change",
            DiffCategory::CtaTextChange => "CTA Text Change",
            DiffCategory::ModifiedLink => "Modified Link",
            DiffCategory::NewLink => "New Link",
            DiffCategory::ImageChange => "Image Change",
            DiffCategory::RemovedText => "Removed Text",
            DiffCategory::RemovedLink => "Removed Link",
        }
    }

    pub fn visual_kind(&self) -> VisualKind {
        match self {
            DiffCategory::HeadingChange => VisualKind::Heading,
            DiffCategory::ParagraphChange => VisualKind::Paragraph,
            DiffCategory::GeneralTextChange => VisualKind::GeneralText,
            DiffCategory::CtaTextChange => VisualKind::CtaText,
            DiffCategory::ModifiedLink => VisualKind::ModifiedLink,
            DiffCategory::NewLink => VisualKind::NewLink,
            DiffCategory::ImageChange => VisualKind::Image,
            DiffCategory::RemovedText | DiffCategory::RemovedLink => VisualKind::Removed,
        }
    }

    /// Removals have no element in the current document to point at
    pub fn is_removal(&self) -> bool {
        matches!(self, DiffCategory::RemovedText | DiffCategory::RemovedLink)
    }
}

/// How a renderer marks the target element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Treatment {
    /// Fill the element's background with the kind's colour
    Background,
    /// Draw a solid outline around the element
    Outline,
    /// Insert a small flashing dot right after the element
    Marker,
    /// Nothing to mark; the summary row is the only trace
    SummaryOnly,
}

/// Fixed styling bucket for a difference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VisualKind {
    Heading,
    Paragraph,
    GeneralText,
    CtaText,
    ModifiedLink,
    NewLink,
    Image,
    Removed,
}

impl VisualKind {
    pub fn icon(&self) -> &'static str {
        match self {
            VisualKind::Heading => "✍️",
            VisualKind::Paragraph => "📄",
            VisualKind::GeneralText => "📝",
            VisualKind::CtaText => "💬",
            VisualKind::ModifiedLink => "↔️",
            VisualKind::NewLink => "✨",
            VisualKind::Image => "🖼️",
            VisualKind::Removed => "❌",
        }
    }

    /// CSS colour used for fills, outlines and markers
    pub fn color(&self) -> &'static str {
        match self {
            VisualKind::Heading => "#FFC300",
            VisualKind::Paragraph => "#FFFAA0",
            VisualKind::GeneralText => "#E0E0E0",
            VisualKind::CtaText => "#DA70D6",
            // Both link kinds share the link outline colour
            VisualKind::ModifiedLink | VisualKind::NewLink => "#FF4136",
            VisualKind::Image => "#82CA9D",
            VisualKind::Removed => "#B0C4DE",
        }
    }

    pub fn treatment(&self) -> Treatment {
        match self {
            VisualKind::Heading
            | VisualKind::Paragraph
            | VisualKind::GeneralText
            | VisualKind::CtaText => Treatment::Background,
            VisualKind::ModifiedLink | VisualKind::NewLink => Treatment::Outline,
            VisualKind::Image => Treatment::Marker,
            VisualKind::Removed => Treatment::SummaryOnly,
        }
    }
}

/// Sequential identity of a registered difference within one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DifferenceId(u64);

impl DifferenceId {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for DifferenceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "pce-element-{}", self.0)
    }
}

/// A classified change the registry has not numbered yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffCandidate<H> {
    pub category: DiffCategory,
    pub detail: String,
    pub target: Option<H>,
}

impl<H> DiffCandidate<H> {
    pub fn new(category: DiffCategory, detail: impl Into<String>, target: Option<H>) -> Self {
        Self {
            category,
            detail: detail.into(),
            target,
        }
    }
}

/// One discrete, classified content change.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Difference<H> {
    pub id: DifferenceId,
    pub category: DiffCategory,
    pub detail: String,
    /// Element in the current document; `None` for removals
    pub target: Option<H>,
    pub visual_kind: VisualKind,
}

/// Content digests of both documents.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DiffIdentity {
    pub source_digest: String,
    pub current_digest: String,
}

/// High-level classification of a comparison.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum DiffClassification {
    /// Same content in the same order
    Identical,
    /// No differences, but content was reordered or duplicated
    NoContentChange,
    /// At least one difference
    Changed,
}

/// Everything one comparison run produced.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CompareReport<H> {
    /// Schema version of this report structure (always 1)
    pub report_schema_version: u32,
    pub run_id: String,
    pub identity: DiffIdentity,
    pub classification: DiffClassification,
    /// Number of differences per category; categories with none are omitted
    pub counts: BTreeMap<DiffCategory, usize>,
    /// Differences in registration order
    pub differences: Vec<Difference<H>>,
}

impl<H> CompareReport<H> {
    pub fn total(&self) -> usize {
        self.differences.len()
    }

    pub fn count_of(&self, category: DiffCategory) -> usize {
        self.counts.get(&category).copied().unwrap_or(0)
    }

    pub fn of_category(&self, category: DiffCategory) -> impl Iterator<Item = &Difference<H>> {
        self.differences
            .iter()
            .filter(move |d| d.category == category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_category_has_label_and_kind() {
        for category in DiffCategory::ALL {
            assert!(!category.label().is_empty());
            assert!(!category.visual_kind().icon().is_empty());
        }
    }

    #[test]
    fn test_removals_are_summary_only() {
        assert!(DiffCategory::RemovedText.is_removal());
        assert!(DiffCategory::RemovedLink.is_removal());
        assert!(!DiffCategory::NewLink.is_removal());
        assert_eq!(
            DiffCategory::RemovedLink.visual_kind().treatment(),
            Treatment::SummaryOnly
        );
    }

    #[test]
    fn test_link_kinds_share_outline_colour() {
        assert_eq!(VisualKind::ModifiedLink.color(), VisualKind::NewLink.color());
        assert_eq!(VisualKind::NewLink.treatment(), Treatment::Outline);
        assert_eq!(VisualKind::Image.treatment(), Treatment::Marker);
        assert_eq!(VisualKind::CtaText.treatment(), Treatment::Background);
    }

    #[test]
    fn test_difference_id_display() {
        assert_eq!(DifferenceId::new(3).to_string(), "pce-element-3");
    }

    #[test]
    fn test_report_serializes_counts_by_category_name() {
        let mut counts = BTreeMap::new();
        counts.insert(DiffCategory::NewLink, 2);
        let report: CompareReport<usize> = CompareReport {
            report_schema_version: 1,
            run_id: "r".to_string(),
            identity: DiffIdentity {
                source_digest: "a".to_string(),
                current_digest: "b".to_string(),
            },
            classification: DiffClassification::Changed,
            counts,
            differences: Vec::new(),
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["counts"]["NewLink"], 2);
        assert_eq!(json["classification"], "Changed");
        assert_eq!(report.count_of(DiffCategory::NewLink), 2);
        assert_eq!(report.count_of(DiffCategory::ImageChange), 0);
    }
}
