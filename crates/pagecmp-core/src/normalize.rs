//! Text and URL canonicalization.
//!
//! Everything compared across the two documents goes through here first:
//! text is trimmed, whitespace-collapsed and lower-cased; URLs are resolved
//! against the owning document's base; image URLs are reduced to their
//! final path segment.
//!
//! All functions except [`parse_base_url`] and [`file_base_url`] are pure
//! and total. Malformed URLs come back as `None` rather than an error, and
//! callers treat that as "no URL".
//!
//! A document parsed without any base URL still has comparable links and
//! images: relative references keep their raw form as the link key and
//! their raw path's last segment as the file name.

use crate::errors::{PageCmpError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use url::{ParseError, Url};

/// Final path segment of a resolved image URL, without query or fragment.
pub type ImageFileName = String;

/// Comparison key for text and link text.
///
/// Only constructible through [`normalize_text`], so every value in a map
/// or set keyed by it is already canonical.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct NormalizedText(String);

impl NormalizedText {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Substring test on canonical forms, used by summary search.
    pub fn contains(&self, needle: &NormalizedText) -> bool {
        self.0.contains(needle.as_str())
    }
}

impl std::fmt::Display for NormalizedText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for NormalizedText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Trim, collapse internal whitespace runs to one space, lower-case.
///
/// Idempotent: `normalize_text(normalize_text(x).as_str()) == normalize_text(x)`.
pub fn normalize_text(raw: &str) -> NormalizedText {
    let mut collapsed = String::with_capacity(raw.len());
    for word in raw.split_whitespace() {
        if !collapsed.is_empty() {
            collapsed.push(' ');
        }
        collapsed.push_str(word);
    }
    NormalizedText(collapsed.to_lowercase())
}

/// Comparison key for an anchor's target.
///
/// `Raw` only appears for relative references in a document that has no
/// base URL to resolve them against.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LinkTarget {
    Resolved(Url),
    Raw(String),
}

impl LinkTarget {
    pub fn as_str(&self) -> &str {
        match self {
            LinkTarget::Resolved(url) => url.as_str(),
            LinkTarget::Raw(raw) => raw,
        }
    }
}

impl From<Url> for LinkTarget {
    fn from(url: Url) -> Self {
        LinkTarget::Resolved(url)
    }
}

impl std::fmt::Display for LinkTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolve `raw` against `base`.
///
/// Without a base only absolute URLs resolve. Returns `None` on any parse
/// failure.
pub fn resolve_url(base: Option<&Url>, raw: &str) -> Option<Url> {
    let raw = raw.trim();
    let resolved = match base {
        Some(base) => base.join(raw),
        None => Url::parse(raw),
    };
    match resolved {
        Ok(url) => Some(url),
        Err(err) => {
            tracing::debug!(raw, error = %err, "url did not resolve");
            None
        }
    }
}

/// Link key for an `href` value.
///
/// Resolves like [`resolve_url`]. Without a base, a non-empty relative
/// reference falls back to its trimmed raw text, so the same relative href
/// in both documents still matches.
pub fn resolve_link(base: Option<&Url>, raw: &str) -> Option<LinkTarget> {
    if let Some(url) = resolve_url(base, raw) {
        return Some(LinkTarget::Resolved(url));
    }
    let raw = raw.trim();
    if base.is_none() && !raw.is_empty() && is_relative_reference(raw) {
        return Some(LinkTarget::Raw(raw.to_string()));
    }
    None
}

fn is_relative_reference(raw: &str) -> bool {
    matches!(Url::parse(raw), Err(ParseError::RelativeUrlWithoutBase))
}

/// Parse a caller-supplied base URL.
///
/// Unlike [`resolve_url`] this is an edge check, so failure is an error.
///
/// # Errors
///
/// `InvalidBaseUrl` when `raw` is not an absolute URL.
pub fn parse_base_url(raw: &str) -> Result<Url> {
    Url::parse(raw.trim()).map_err(|e| PageCmpError::InvalidBaseUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })
}

/// `file://` URL of a document on disk, for use as its base URL.
///
/// # Errors
///
/// `Io` when the path cannot be canonicalized; `InvalidBaseUrl` when the
/// canonical path has no URL form.
pub fn file_base_url(path: &Path) -> Result<Url> {
    let canonical = std::fs::canonicalize(path).map_err(|e| PageCmpError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    Url::from_file_path(&canonical).map_err(|()| PageCmpError::InvalidBaseUrl {
        url: canonical.display().to_string(),
        reason: "path has no file URL form".to_string(),
    })
}

/// Last non-empty path segment of an already resolved URL.
///
/// `None` for URLs without a hierarchical path (`data:`, `mailto:`).
pub fn file_name_of(url: &Url) -> Option<ImageFileName> {
    url.path_segments()?
        .filter(|segment| !segment.is_empty())
        .last()
        .map(str::to_string)
}

/// Resolve `raw` against `base` and take its file name.
///
/// Without a base, a relative reference is reduced directly: query and
/// fragment are stripped and the last non-empty `/` segment is kept.
pub fn extract_file_name(base: Option<&Url>, raw: &str) -> Option<ImageFileName> {
    if let Some(url) = resolve_url(base, raw) {
        return file_name_of(&url);
    }
    let raw = raw.trim();
    if base.is_some() || !is_relative_reference(raw) {
        return None;
    }
    let path = raw.split(['?', '#']).next().unwrap_or("");
    path.split('/')
        .filter(|segment| !segment.is_empty())
        .last()
        .map(str::to_string)
}

/// File names of every candidate in a `srcset` attribute value.
///
/// Each comma-separated candidate contributes its first whitespace-delimited
/// token (the URL; the width/density descriptor is ignored). Unparseable
/// candidates are dropped, as are duplicates. Order follows the attribute.
pub fn extract_responsive_file_names(base: Option<&Url>, srcset: &str) -> Vec<ImageFileName> {
    let mut names: Vec<ImageFileName> = Vec::new();
    for candidate in srcset.split(',') {
        let Some(token) = candidate.split_whitespace().next() else {
            continue;
        };
        if let Some(name) = extract_file_name(base, token) {
            if !names.contains(&name) {
                names.push(name);
            }
        }
    }
    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn base() -> Url {
        Url::parse("https://example.com/shop/index.html").unwrap()
    }

    #[test]
    fn test_normalize_collapses_and_lowercases() {
        assert_eq!(
            normalize_text("  Special\n\tOFFER   today ").as_str(),
            "special offer today"
        );
    }

    #[test]
    fn test_normalize_blank_is_empty() {
        assert!(normalize_text(" \n\t ").is_empty());
        assert!(normalize_text("").is_empty());
    }

    #[test]
    fn test_normalize_treats_nbsp_as_whitespace() {
        assert_eq!(normalize_text("Learn\u{00A0}\u{00A0}more").as_str(), "learn more");
    }

    #[test]
    fn test_resolve_relative_against_base() {
        let url = resolve_url(Some(&base()), "../img/logo.png").unwrap();
        assert_eq!(url.as_str(), "https://example.com/img/logo.png");
    }

    #[test]
    fn test_resolve_relative_without_base_is_none() {
        assert!(resolve_url(None, "/about").is_none());
        assert!(resolve_url(None, "https://example.com/about").is_some());
    }

    #[test]
    fn test_link_without_base_keeps_raw_relative_href() {
        assert_eq!(
            resolve_link(None, " /checkout "),
            Some(LinkTarget::Raw("/checkout".to_string()))
        );
        assert_eq!(
            resolve_link(None, "https://example.com/a"),
            Some(LinkTarget::Resolved(Url::parse("https://example.com/a").unwrap()))
        );
        assert_eq!(resolve_link(None, ""), None);
        assert_eq!(resolve_link(None, "http://[::1"), None);
    }

    #[test]
    fn test_link_with_base_never_falls_back_to_raw() {
        assert_eq!(resolve_link(Some(&base()), "http://[::1"), None);
        let target = resolve_link(Some(&base()), "/a").unwrap();
        assert_eq!(target.to_string(), "https://example.com/a");
    }

    #[test]
    fn test_file_name_without_base_uses_raw_path() {
        assert_eq!(extract_file_name(None, "img/logo.png").as_deref(), Some("logo.png"));
        assert_eq!(
            extract_file_name(None, "../img/hero.jpg?v=3#top").as_deref(),
            Some("hero.jpg")
        );
        assert_eq!(extract_file_name(None, "/assets/icons/").as_deref(), Some("icons"));
        assert_eq!(extract_file_name(None, "?v=2"), None);
        assert_eq!(extract_file_name(None, "data:image/png;base64,AAAA"), None);
    }

    #[test]
    fn test_file_base_url_points_at_canonical_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("page.html");
        std::fs::write(&path, "<p>x</p>").unwrap();
        let url = file_base_url(&path).unwrap();
        assert_eq!(url.scheme(), "file");
        assert_eq!(url.join("img/a.png").unwrap().path_segments().unwrap().last(), Some("a.png"));
        let missing = file_base_url(&dir.path().join("missing.html")).unwrap_err();
        assert!(matches!(missing, PageCmpError::Io { .. }));
    }

    #[test]
    fn test_resolve_malformed_is_none() {
        assert!(resolve_url(Some(&base()), "http://[::1").is_none());
    }

    #[test]
    fn test_resolved_forms_compare_equal() {
        let a = resolve_url(Some(&base()), "/a").unwrap();
        let b = resolve_url(None, "https://EXAMPLE.com/a").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_parse_base_url_rejects_relative() {
        assert!(parse_base_url("https://example.com/a/").is_ok());
        let err = parse_base_url("/relative").unwrap_err();
        assert!(matches!(err, PageCmpError::InvalidBaseUrl { ref url, .. } if url == "/relative"));
    }

    #[test]
    fn test_file_name_strips_query_and_fragment() {
        let name = extract_file_name(Some(&base()), "/img/hero.jpg?v=3#top");
        assert_eq!(name.as_deref(), Some("hero.jpg"));
    }

    #[test]
    fn test_file_name_uses_last_non_empty_segment() {
        let url = Url::parse("https://example.com/assets/icons/").unwrap();
        assert_eq!(file_name_of(&url).as_deref(), Some("icons"));
    }

    #[test]
    fn test_file_name_none_for_opaque_urls() {
        let url = Url::parse("data:image/png;base64,AAAA").unwrap();
        assert_eq!(file_name_of(&url), None);
        let root = Url::parse("https://example.com/").unwrap();
        assert_eq!(file_name_of(&root), None);
    }

    #[test]
    fn test_srcset_names_in_order_without_duplicates() {
        let names = extract_responsive_file_names(
            Some(&base()),
            "hero-480.jpg 480w, /img/hero-800.jpg 800w,hero-480.jpg 2x, , http://[::1 1x",
        );
        assert_eq!(names, vec!["hero-480.jpg", "hero-800.jpg"]);
    }

    #[test]
    fn test_srcset_empty_attribute() {
        assert!(extract_responsive_file_names(Some(&base()), "").is_empty());
    }

    proptest! {
        #[test]
        fn prop_normalize_is_idempotent(s in "\\PC*") {
            let once = normalize_text(&s);
            let twice = normalize_text(once.as_str());
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn prop_normalized_has_no_edge_or_double_spaces(s in "[ \\ta-zA-Z\\n]{0,40}") {
            let n = normalize_text(&s);
            prop_assert!(!n.as_str().starts_with(' '));
            prop_assert!(!n.as_str().ends_with(' '));
            prop_assert!(!n.as_str().contains("  "));
        }
    }
}
