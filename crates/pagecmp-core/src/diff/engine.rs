//! Difference classification.
//!
//! [`classify`] runs four passes over the current document against a
//! [`SourceIndex`] of the reference document, in this order:
//!
//! 1. text leaves: heading, paragraph and general text changes
//! 2. anchors: CTA text changes, modified links and new links
//! 3. images: file names unseen in the source
//! 4. removals: source texts and link URLs missing from the current document
//!
//! Every pass feeds candidates into a [`DiffRegistry`], which skips targets
//! an earlier candidate already claimed. [`Comparator`] owns the registry for
//! one session and resets it before every run.

use crate::config::CompareConfig;
use crate::diff::digest::content_digest;
use crate::diff::model::{
    CompareReport, DiffCandidate, DiffCategory, DiffClassification, DiffIdentity,
};
use crate::diff::registry::DiffRegistry;
use crate::dom::{DocumentTree, TagClass};
use crate::normalize::{normalize_text, LinkTarget, NormalizedText};
use crate::source_index::{anchor_url, describe_anchor, image_file_names, LinkRecord, SourceIndex};
use crate::walker::{collect_text_leaves, comparable_elements};
use crate::{log_op_end, log_op_start};
use pagecmp_core_types::RunId;
use std::collections::{BTreeMap, HashSet};
use std::fmt::Debug;
use std::hash::Hash;
use std::time::Instant;

/// Version of the [`CompareReport`] structure.
pub const REPORT_SCHEMA_VERSION: u32 = 1;

/// Run every classification pass of `current` against `index`.
///
/// Returns how many differences this call registered. Calling it again on
/// the same registry without a reset registers nothing new.
pub fn classify<T>(
    index: &SourceIndex,
    current: &T,
    registry: &mut DiffRegistry<T::Handle>,
    config: &CompareConfig,
) -> usize
where
    T: DocumentTree + ?Sized,
{
    let before = registry.count();

    classify_text(index, current, registry, config);
    classify_links(index, current, registry, config);
    classify_images(index, current, registry, config);
    if config.detect_removals {
        classify_removals(index, current, registry, config);
    }

    registry.count() - before
}

fn classify_text<T>(
    index: &SourceIndex,
    current: &T,
    registry: &mut DiffRegistry<T::Handle>,
    config: &CompareConfig,
) where
    T: DocumentTree + ?Sized,
{
    for leaf in collect_text_leaves(current, current.body(), config) {
        if index.contains_text(&normalize_text(leaf.value)) {
            continue;
        }
        let Some(parent) = current.parent_element(leaf.node) else {
            continue;
        };
        if let Some(candidate) = text_change(current, parent) {
            registry.register(candidate);
        }
    }
}

/// Category and detail for unmatched text whose nearest element is `parent`.
///
/// Heading and paragraph text is reported even inside a link or button, so
/// `<a href="/x"><p>New</p></a>` yields a `ParagraphChange` here and a
/// `CtaTextChange` from the link pass. Only other text inside an
/// interactive element is left to the link pass.
fn text_change<T>(tree: &T, parent: T::Handle) -> Option<DiffCandidate<T::Handle>>
where
    T: DocumentTree + ?Sized,
{
    let tag = tree.tag_name(parent)?;
    let (category, detail) = match TagClass::of(tag) {
        TagClass::Heading(level) => (
            DiffCategory::HeadingChange,
            format!("Text changed in <H{level}>"),
        ),
        TagClass::Paragraph => (
            DiffCategory::ParagraphChange,
            "Text changed in <p>".to_string(),
        ),
        // Other link and button text belongs to the link pass.
        _ if within_interactive(tree, parent) => return None,
        _ => (
            DiffCategory::GeneralTextChange,
            format!("Text changed in <{}>", tag.to_uppercase()),
        ),
    };
    Some(DiffCandidate::new(category, detail, Some(parent)))
}

fn within_interactive<T>(tree: &T, node: T::Handle) -> bool
where
    T: DocumentTree + ?Sized,
{
    tree.closest(node, |n| tree.tag_class(n).is_interactive())
        .is_some()
}

fn classify_links<T>(
    index: &SourceIndex,
    current: &T,
    registry: &mut DiffRegistry<T::Handle>,
    config: &CompareConfig,
) where
    T: DocumentTree + ?Sized,
{
    for anchor in comparable_elements(current, "a", config) {
        let record = describe_anchor(current, anchor, config);
        if let Some(candidate) = link_change(index, &record, anchor) {
            registry.register(candidate);
        }
    }
}

/// URL match wins over text match.
fn link_change<H>(index: &SourceIndex, link: &LinkRecord, anchor: H) -> Option<DiffCandidate<H>> {
    if link.url.is_none() && link.text.is_empty() {
        return None;
    }

    if let Some(stored) = link.url.as_ref().and_then(|url| index.link_by_url(url)) {
        if stored.text == link.text {
            return None;
        }
        return Some(DiffCandidate::new(
            DiffCategory::CtaTextChange,
            format!("Link text changed from \"{}\"", stored.text),
            Some(anchor),
        ));
    }

    if !link.text.is_empty() {
        if let Some(stored) = index.link_by_text(&link.text) {
            if stored.url == link.url {
                return None;
            }
            return Some(DiffCandidate::new(
                DiffCategory::ModifiedLink,
                format!("URL changed from: {}", url_or_na(stored.url.as_ref())),
                Some(anchor),
            ));
        }
    }

    Some(DiffCandidate::new(
        DiffCategory::NewLink,
        format!("URL: {}", url_or_na(link.url.as_ref())),
        Some(anchor),
    ))
}

fn url_or_na(url: Option<&LinkTarget>) -> &str {
    url.map(LinkTarget::as_str).unwrap_or("N/A")
}

fn classify_images<T>(
    index: &SourceIndex,
    current: &T,
    registry: &mut DiffRegistry<T::Handle>,
    config: &CompareConfig,
) where
    T: DocumentTree + ?Sized,
{
    for image in comparable_elements(current, "img", config) {
        let names = image_file_names(current, image);
        if names.is_empty() && !config.report_unnamed_images {
            continue;
        }
        if names.iter().any(|name| index.has_image_name(name)) {
            continue;
        }
        let first = names.first().map(String::as_str).unwrap_or("N/A");
        registry.register(DiffCandidate::new(
            DiffCategory::ImageChange,
            format!("Filename: {first}"),
            Some(image),
        ));
    }
}

fn classify_removals<T>(
    index: &SourceIndex,
    current: &T,
    registry: &mut DiffRegistry<T::Handle>,
    config: &CompareConfig,
) where
    T: DocumentTree + ?Sized,
{
    let current_texts: HashSet<NormalizedText> =
        collect_text_leaves(current, current.body(), config)
            .map(|leaf| normalize_text(leaf.value))
            .collect();
    let current_urls: HashSet<LinkTarget> = comparable_elements(current, "a", config)
        .filter_map(|anchor| anchor_url(current, anchor))
        .collect();

    for text in index.texts() {
        if !current_texts.contains(text) {
            registry.register(DiffCandidate::new(
                DiffCategory::RemovedText,
                format!("Text removed: \"{text}\""),
                None,
            ));
        }
    }
    for url in index.links_by_url().keys() {
        if !current_urls.contains(url) {
            registry.register(DiffCandidate::new(
                DiffCategory::RemovedLink,
                format!("URL removed: {url}"),
                None,
            ));
        }
    }
}

/// A comparison session.
///
/// Holds the configuration and the registry across runs. Each
/// [`Comparator::compare`] starts from a clean registry and a fresh
/// [`RunId`].
#[derive(Debug)]
pub struct Comparator<H> {
    config: CompareConfig,
    registry: DiffRegistry<H>,
    run_id: RunId,
}

impl<H> Comparator<H>
where
    H: Copy + Eq + Hash + Debug,
{
    pub fn new(config: CompareConfig) -> Self {
        Self {
            config,
            registry: DiffRegistry::new(),
            run_id: RunId::new(),
        }
    }

    pub fn config(&self) -> &CompareConfig {
        &self.config
    }

    /// Id of the most recent run.
    pub fn run_id(&self) -> &RunId {
        &self.run_id
    }

    pub fn registry(&self) -> &DiffRegistry<H> {
        &self.registry
    }

    /// Reset, index `source`, classify `current` and build the report.
    pub fn compare<S, C>(&mut self, source: &S, current: &C) -> CompareReport<H>
    where
        S: DocumentTree + ?Sized,
        C: DocumentTree<Handle = H> + ?Sized,
    {
        self.registry.reset();
        self.run_id = RunId::new();

        log_op_start!("compare_documents", run_id = self.run_id.as_str());
        let start = Instant::now();

        let index = SourceIndex::build(source, &self.config);
        self.classify(&index, current);
        let report = self.report(source, current);

        log_op_end!(
            "compare_documents",
            duration_ms = start.elapsed().as_millis() as u64,
            run_id = self.run_id.as_str(),
            diff_count = report.total() as u64
        );
        report
    }

    /// Classify `current` into the existing registry without resetting it.
    pub fn classify<C>(&mut self, index: &SourceIndex, current: &C) -> usize
    where
        C: DocumentTree<Handle = H> + ?Sized,
    {
        classify(index, current, &mut self.registry, &self.config)
    }

    fn report<S, C>(&self, source: &S, current: &C) -> CompareReport<H>
    where
        S: DocumentTree + ?Sized,
        C: DocumentTree<Handle = H> + ?Sized,
    {
        let identity = DiffIdentity {
            source_digest: content_digest(source, &self.config),
            current_digest: content_digest(current, &self.config),
        };
        let differences = self.registry.differences().to_vec();

        let mut counts = BTreeMap::new();
        for difference in &differences {
            *counts.entry(difference.category).or_insert(0) += 1;
        }

        let classification = if !differences.is_empty() {
            DiffClassification::Changed
        } else if identity.source_digest == identity.current_digest {
            DiffClassification::Identical
        } else {
            DiffClassification::NoContentChange
        };

        CompareReport {
            report_schema_version: REPORT_SCHEMA_VERSION,
            run_id: self.run_id.to_string(),
            identity,
            classification,
            counts,
            differences,
        }
    }
}

/// One-shot comparison with a fresh session.
pub fn compare_documents<S, C>(
    source: &S,
    current: &C,
    config: &CompareConfig,
) -> CompareReport<C::Handle>
where
    S: DocumentTree + ?Sized,
    C: DocumentTree + ?Sized,
{
    Comparator::new(config.clone()).compare(source, current)
}
