//! Content digests for report identity.
//!
//! A digest covers what the classifier compares, in document order: the
//! normalized text leaves, the anchor link keys and the image file
//! names. Markup, attributes and excluded subtrees do not contribute, so two
//! documents with equal digests yield no differences.

use crate::config::CompareConfig;
use crate::dom::DocumentTree;
use crate::normalize::normalize_text;
use crate::source_index::{describe_anchor, image_file_names};
use crate::walker::{collect_text_leaves, comparable_elements};
use sha2::{Digest as _, Sha256};

/// Hex-encoded SHA-256 over the comparable content of `tree`.
pub fn content_digest<T>(tree: &T, config: &CompareConfig) -> String
where
    T: DocumentTree + ?Sized,
{
    let mut hasher = Sha256::new();

    for leaf in collect_text_leaves(tree, tree.body(), config) {
        feed(&mut hasher, "t", normalize_text(leaf.value).as_str());
    }
    for anchor in comparable_elements(tree, "a", config) {
        let record = describe_anchor(tree, anchor, config);
        let url = record.url.as_ref().map(|u| u.as_str()).unwrap_or("");
        feed(&mut hasher, "a", url);
    }
    for image in comparable_elements(tree, "img", config) {
        for name in image_file_names(tree, image) {
            feed(&mut hasher, "i", &name);
        }
    }

    hex::encode(hasher.finalize())
}

// Tag and length prefix keep adjacent entries from running together.
fn feed(hasher: &mut Sha256, tag: &str, value: &str) {
    hasher.update(tag.as_bytes());
    hasher.update((value.len() as u64).to_le_bytes());
    hasher.update(value.as_bytes());
}
