//! HTML front end: serialized markup to [`Document`].

use super::arena::{Document, NodeId};
use super::DocumentTree;
use crate::normalize::resolve_url;
use scraper::{Html, Node as HtmlNode};
use url::Url;

/// Parse `markup` into an arena document.
///
/// Parsing is lenient and never fails; malformed markup is repaired the way
/// browsers repair it. The effective base URL follows the browser rule: a
/// `<base href>` in the document, resolved against `base_url`, wins over
/// `base_url` itself.
pub fn parse_document(markup: &str, base_url: Option<Url>) -> Document {
    let html = Html::parse_document(markup);
    let mut doc = Document::new(base_url);

    let mut stack = vec![(html.tree.root(), doc.root_id())];
    while let Some((source, parent)) = stack.pop() {
        let mut pending: Vec<_> = Vec::new();
        for child in source.children() {
            let id: Option<NodeId> = match child.value() {
                HtmlNode::Element(el) => {
                    let attrs: Vec<(&str, &str)> = el.attrs().collect();
                    Some(doc.append_element(parent, el.name(), &attrs))
                }
                HtmlNode::Text(text) => Some(doc.append_text(parent, &text.text)),
                HtmlNode::Comment(comment) => Some(doc.append_comment(parent, &comment.comment)),
                _ => None,
            };
            if let Some(id) = id {
                pending.push((child, id));
            }
        }
        // Children were appended in order; descend in order too.
        stack.extend(pending.into_iter().rev());
    }

    let declared = doc
        .elements_by_tag("base")
        .find_map(|node| doc.attribute(node, "href"))
        .and_then(|href| resolve_url(doc.base_url(), href));
    if declared.is_some() {
        doc.set_base_url(declared);
    }

    tracing::trace!(nodes = doc.len(), "parsed document");
    doc
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::NodeKind;

    #[test]
    fn test_parse_builds_elements_and_text() {
        let doc = parse_document(
            "<html><body><h1 class=\"t\">Welcome</h1><p>Hi <b>there</b></p></body></html>",
            None,
        );
        let h1 = doc.elements_by_tag("h1").next().unwrap();
        assert_eq!(doc.attribute(h1, "class"), Some("t"));
        let texts: Vec<_> = doc
            .descendants(doc.body())
            .filter_map(|n| doc.text(n))
            .collect();
        assert_eq!(texts, vec!["Welcome", "Hi ", "there"]);
    }

    #[test]
    fn test_parse_repairs_missing_body() {
        let doc = parse_document("<p>loose</p>", None);
        let body = doc.body();
        assert_eq!(doc.kind(body), NodeKind::Element("body"));
        assert_eq!(doc.elements_by_tag("p").count(), 1);
    }

    #[test]
    fn test_base_element_overrides_supplied_base() {
        let supplied = Url::parse("https://staging.example.com/page").unwrap();
        let doc = parse_document(
            "<html><head><base href=\"/root/\"></head><body></body></html>",
            Some(supplied),
        );
        assert_eq!(
            doc.base_url().map(Url::as_str),
            Some("https://staging.example.com/root/")
        );
    }

    #[test]
    fn test_unresolvable_base_element_keeps_supplied_base() {
        let doc = parse_document("<base href=\"/relative/\"><p>x</p>", None);
        assert!(doc.base_url().is_none());
    }

    #[test]
    fn test_comments_are_kept_but_not_text() {
        let doc = parse_document("<body><!-- note --><p>x</p></body>", None);
        let texts: Vec<_> = doc
            .descendants(doc.root())
            .filter_map(|n| doc.text(n))
            .collect();
        assert_eq!(texts, vec!["x"]);
    }
}
