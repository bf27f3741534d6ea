//! Attribute value escaping.
//!
//! Attribute values (`comment`, `replace-with`) are entity-escaped so the tag
//! stays well-formed whatever the rationale says. Span bodies are never
//! escaped: they are opaque document text and may carry markup of their own.

use std::borrow::Cow;

/// Escapes a value for use inside a double-quoted attribute.
pub fn escape_attr(value: &str) -> Cow<'_, str> {
    html_escape::encode_double_quoted_attribute(value)
}

/// Reverses [`escape_attr`], plus any other standard entity a model emits.
pub fn unescape_attr(value: &str) -> Cow<'_, str> {
    html_escape::decode_html_entities(value)
}
