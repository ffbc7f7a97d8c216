//! Report classification, serialization and the summary table.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use pagecmp_core::config::CompareConfig;
use pagecmp_core::diff::{
    compare_documents, render_summary_markdown, CompareReport, DiffCategory, DiffClassification,
    SummaryColumn, SummaryTable, REPORT_SCHEMA_VERSION,
};
use pagecmp_core::dom::{parse_document, NodeId};
use serde_json::Value;
use url::Url;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn report(source: &str, current: &str) -> CompareReport<NodeId> {
    let base = Url::parse("https://news.example/").unwrap();
    compare_documents(
        &parse_document(source, Some(base.clone())),
        &parse_document(current, Some(base)),
        &CompareConfig::default(),
    )
}

const SOURCE: &str = "<body>\
    <h1>Daily news</h1>\
    <p>Top story</p>\
    <a href=\"/subscribe\">Subscribe</a>\
    <img src=\"/img/banner.png\">\
    </body>";

const CURRENT: &str = "<body>\
    <h1>Weekly news</h1>\
    <p>Top story</p>\
    <a href=\"/subscribe\">Join now</a>\
    <a href=\"/archive\">Archive</a>\
    <img src=\"/img/banner-v2.png\">\
    </body>";

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

#[test]
fn test_identical_documents_classified_identical() {
    let r = report(SOURCE, SOURCE);
    assert_eq!(r.classification, DiffClassification::Identical);
    assert_eq!(r.identity.source_digest, r.identity.current_digest);
    assert!(r.counts.is_empty());
}

#[test]
fn test_reordered_content_is_no_content_change() {
    let r = report(
        "<body><p>One</p><p>Two</p></body>",
        "<body><p>Two</p><p>One</p></body>",
    );
    assert_eq!(r.total(), 0);
    assert_eq!(r.classification, DiffClassification::NoContentChange);
    assert_ne!(r.identity.source_digest, r.identity.current_digest);
}

#[test]
fn test_changed_documents_counted_per_category() {
    let r = report(SOURCE, CURRENT);
    assert_eq!(r.classification, DiffClassification::Changed);
    assert_eq!(r.count_of(DiffCategory::HeadingChange), 1);
    assert_eq!(r.count_of(DiffCategory::CtaTextChange), 1);
    assert_eq!(r.count_of(DiffCategory::NewLink), 1);
    assert_eq!(r.count_of(DiffCategory::ImageChange), 1);
    // "daily news" and "subscribe" are gone from the current page
    assert_eq!(r.count_of(DiffCategory::RemovedText), 2);
    assert_eq!(r.counts.values().sum::<usize>(), r.total());
}

#[test]
fn test_report_serializes_to_json() {
    let r = report(SOURCE, CURRENT);
    let json: Value = serde_json::to_value(&r).unwrap();

    assert_eq!(json["report_schema_version"], REPORT_SCHEMA_VERSION);
    assert_eq!(json["classification"], "Changed");
    assert_eq!(json["differences"][0]["category"], "HeadingChange");
    assert_eq!(json["differences"][0]["detail"], "Text changed in <H1>");
    assert_eq!(json["differences"][0]["visual_kind"], "Heading");
    assert_eq!(json["counts"]["ImageChange"], 1);
    assert_eq!(json["identity"]["source_digest"].as_str().unwrap().len(), 64);
    assert!(json["differences"][5]["target"].is_null());
}

// ---------------------------------------------------------------------------
// Summary table
// ---------------------------------------------------------------------------

#[test]
fn test_summary_search_matches_details_and_category() {
    let r = report(SOURCE, CURRENT);
    let table = SummaryTable::from_differences(&r.differences);

    let archive = table.search("ARCHIVE");
    assert_eq!(archive.len(), 1);
    assert_eq!(archive.rows()[0].category, "New Link");

    let removed = table.search("removed text");
    assert_eq!(removed.len(), 2);

    assert!(table.search("no such thing").is_empty());
}

#[test]
fn test_summary_sort_by_details() {
    let r = report(SOURCE, CURRENT);
    let mut table = SummaryTable::from_differences(&r.differences);

    table.sort_by(SummaryColumn::Details, true);
    let details: Vec<String> = table.rows().iter().map(|row| row.details.clone()).collect();
    let mut expected = details.clone();
    expected.sort_by_key(|d| d.to_lowercase());
    assert_eq!(details, expected);

    table.sort_by(SummaryColumn::Details, false);
    let reversed: Vec<String> = table.rows().iter().map(|row| row.details.clone()).collect();
    expected.reverse();
    assert_eq!(reversed, expected);
}

#[test]
fn test_markdown_summary_respects_filtered_table() {
    let r = report(SOURCE, CURRENT);
    let table = SummaryTable::from_differences(&r.differences).search("filename");
    let md = render_summary_markdown(&r, &table);

    assert!(md.contains("**Classification**: Changed"));
    assert!(md.contains("Filename: banner-v2.png"));
    assert!(!md.contains("URL: https://news.example/archive"));
    assert!(md.contains(&format!("**Total differences**: {}", r.total())));
}
