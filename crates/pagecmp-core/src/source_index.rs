//! Snapshot of the reference document.
//!
//! Built once per comparison run, then only read. Ordered collections keep
//! the removal pass and the report deterministic.

use crate::config::CompareConfig;
use crate::dom::DocumentTree;
use crate::normalize::{
    extract_file_name, extract_responsive_file_names, normalize_text, resolve_link, ImageFileName,
    LinkTarget, NormalizedText,
};
use crate::walker::{collect_text_leaves, comparable_elements, is_excluded};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// A link as the source document presented it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkRecord {
    /// Link key; `None` when the href did not resolve
    pub url: Option<LinkTarget>,
    pub text: NormalizedText,
}

/// Link key of an anchor's `href`.
pub fn anchor_url<T>(tree: &T, anchor: T::Handle) -> Option<LinkTarget>
where
    T: DocumentTree + ?Sized,
{
    // A missing href reads as "", which resolves to the base URL.
    let href = tree.attribute(anchor, "href").unwrap_or("");
    resolve_link(tree.base_url(), href)
}

/// Link key and normalized visible text of an anchor.
pub fn describe_anchor<T>(tree: &T, anchor: T::Handle, config: &CompareConfig) -> LinkRecord
where
    T: DocumentTree + ?Sized,
{
    LinkRecord {
        url: anchor_url(tree, anchor),
        text: normalize_text(&tree.inner_text(anchor, |n| is_excluded(tree, n, config))),
    }
}

/// Candidate file names of an image: `src` first, then `srcset` entries.
pub fn image_file_names<T>(tree: &T, image: T::Handle) -> Vec<ImageFileName>
where
    T: DocumentTree + ?Sized,
{
    let base = tree.base_url();
    let mut names: Vec<ImageFileName> = Vec::new();
    if let Some(name) = tree
        .attribute(image, "src")
        .and_then(|src| extract_file_name(base, src))
    {
        names.push(name);
    }
    if let Some(srcset) = tree.attribute(image, "srcset") {
        for name in extract_responsive_file_names(base, srcset) {
            if !names.contains(&name) {
                names.push(name);
            }
        }
    }
    names
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceIndex {
    texts: BTreeSet<NormalizedText>,
    links_by_url: BTreeMap<LinkTarget, LinkRecord>,
    links_by_text: BTreeMap<NormalizedText, LinkRecord>,
    image_names: BTreeSet<ImageFileName>,
}

impl SourceIndex {
    /// Index the text leaves under `body`, then every anchor and image
    /// outside excluded subtrees.
    pub fn build<T>(source: &T, config: &CompareConfig) -> Self
    where
        T: DocumentTree + ?Sized,
    {
        let mut index = SourceIndex::default();

        for leaf in collect_text_leaves(source, source.body(), config) {
            index.texts.insert(normalize_text(leaf.value));
        }

        for anchor in comparable_elements(source, "a", config) {
            let record = describe_anchor(source, anchor, config);
            if let Some(url) = &record.url {
                index.links_by_url.insert(url.clone(), record.clone());
            }
            if !record.text.is_empty() {
                index.links_by_text.insert(record.text.clone(), record);
            }
        }

        for image in comparable_elements(source, "img", config) {
            index.image_names.extend(image_file_names(source, image));
        }

        tracing::debug!(
            text_count = index.texts.len(),
            link_count = index.links_by_url.len(),
            image_count = index.image_names.len(),
            "source index built"
        );
        index
    }

    pub fn texts(&self) -> &BTreeSet<NormalizedText> {
        &self.texts
    }

    pub fn contains_text(&self, text: &NormalizedText) -> bool {
        self.texts.contains(text)
    }

    pub fn link_by_url(&self, url: &LinkTarget) -> Option<&LinkRecord> {
        self.links_by_url.get(url)
    }

    pub fn link_by_text(&self, text: &NormalizedText) -> Option<&LinkRecord> {
        self.links_by_text.get(text)
    }

    pub fn links_by_url(&self) -> &BTreeMap<LinkTarget, LinkRecord> {
        &self.links_by_url
    }

    pub fn has_image_name(&self, name: &str) -> bool {
        self.image_names.contains(name)
    }
}
