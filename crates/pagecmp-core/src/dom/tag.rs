//! Closed classification of tag names.
//!
//! The classifier branches on [`TagClass`] instead of comparing tag strings,
//! so every decision point is an exhaustive `match`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TagClass {
    /// `h1`..`h6`, carrying the level
    Heading(u8),
    Paragraph,
    Anchor,
    Button,
    Image,
    #[default]
    Other,
}

impl TagClass {
    /// Classify a tag name (any case).
    pub fn of(tag: &str) -> Self {
        let bytes = tag.as_bytes();
        if bytes.len() == 2
            && bytes[0].eq_ignore_ascii_case(&b'h')
            && (b'1'..=b'6').contains(&bytes[1])
        {
            return TagClass::Heading(bytes[1] - b'0');
        }
        match tag.to_ascii_lowercase().as_str() {
            "p" => TagClass::Paragraph,
            "a" => TagClass::Anchor,
            "button" => TagClass::Button,
            "img" => TagClass::Image,
            _ => TagClass::Other,
        }
    }

    /// Anchors and buttons own their text; the link pass reports it.
    pub fn is_interactive(self) -> bool {
        matches!(self, TagClass::Anchor | TagClass::Button)
    }
}

/// Elements whose content starts on its own line when rendered.
///
/// Link text gathered across such boundaries is separated by a space.
pub fn is_block_tag(tag: &str) -> bool {
    matches!(
        tag.to_ascii_lowercase().as_str(),
        "address"
            | "article"
            | "aside"
            | "blockquote"
            | "dd"
            | "details"
            | "dialog"
            | "div"
            | "dl"
            | "dt"
            | "fieldset"
            | "figcaption"
            | "figure"
            | "footer"
            | "form"
            | "h1"
            | "h2"
            | "h3"
            | "h4"
            | "h5"
            | "h6"
            | "header"
            | "hr"
            | "li"
            | "main"
            | "nav"
            | "ol"
            | "p"
            | "pre"
            | "section"
            | "summary"
            | "table"
            | "td"
            | "th"
            | "tr"
            | "ul"
    )
}
