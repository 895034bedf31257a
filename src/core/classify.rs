//! Construct classification
//!
//! Decides which lexical construct begins at the cursor. The checks run in a
//! fixed order and the first match wins; the order matters (namespace before
//! generic attribute, outside-root characters before entity references).

use std::fmt;

use super::tokenizer::ParseState;

/// Lookahead the driver keeps before classifying (`<!--`, `&gt;`, ...)
pub const MIN_LOOKAHEAD: usize = 5;

const XMLNS: &[u8] = b"xmlns";

/// Lookahead needed inside a tag to see `xmlns` plus the following ':' or '='
pub const XMLNS_LOOKAHEAD: usize = XMLNS.len() + 1;

/// Kind of lexical construct at the cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Construct {
    /// `<?xml ...?>`
    Declaration,
    /// `</name>`
    EndTag,
    /// `<name`
    StartTag,
    /// `xmlns="..."` or `xmlns:prefix="..."` inside a start tag
    Namespace,
    /// `name="..."` inside a start tag
    Attribute,
    /// `<![CDATA[...]]>`
    CData,
    /// `<!--...-->`
    Comment,
    /// Character data before or after the root element
    OutsideCharacters,
    /// `&...`
    EntityReference,
    /// Plain character data up to the next '<' or '&'
    Characters,
}

impl fmt::Display for Construct {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Construct::Declaration => "XML declaration",
            Construct::EndTag => "element end tag",
            Construct::StartTag => "element start tag",
            Construct::Namespace => "namespace declaration",
            Construct::Attribute => "attribute",
            Construct::CData => "CDATA section",
            Construct::Comment => "XML comment",
            Construct::OutsideCharacters => "characters outside the root element",
            Construct::EntityReference => "entity reference",
            Construct::Characters => "character data",
        };
        f.write_str(name)
    }
}

/// Classify the construct starting at `input[0]`
///
/// Returns None when nothing matches: an empty window, or `<!` markup that is
/// neither CDATA nor a comment.
pub fn classify(input: &[u8], state: &ParseState) -> Option<Construct> {
    let first = *input.first()?;
    let second = input.get(1).copied();

    if first == b'<' && second == Some(b'?') {
        return Some(Construct::Declaration);
    }
    if first == b'<' && second == Some(b'/') {
        return Some(Construct::EndTag);
    }
    if first == b'<' && !matches!(second, Some(b'/' | b'?' | b'!')) {
        return Some(Construct::StartTag);
    }
    if state.in_tag && first != b'>' && first != b'/' {
        if is_namespace(input) {
            return Some(Construct::Namespace);
        }
        return Some(Construct::Attribute);
    }
    if input.starts_with(b"<![") {
        return Some(Construct::CData);
    }
    if input.starts_with(b"<!--") {
        return Some(Construct::Comment);
    }
    if first != b'<' && state.depth == 0 {
        return Some(Construct::OutsideCharacters);
    }
    if first == b'&' {
        return Some(Construct::EntityReference);
    }
    if first != b'<' {
        return Some(Construct::Characters);
    }
    None
}

/// `xmlns` followed by ':' or '='; the length is checked before the byte
/// after `xmlns` is read
fn is_namespace(input: &[u8]) -> bool {
    input.len() >= XMLNS_LOOKAHEAD
        && input.starts_with(XMLNS)
        && matches!(input[XMLNS.len()], b':' | b'=')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outside() -> ParseState {
        ParseState::default()
    }

    fn inside_element() -> ParseState {
        ParseState {
            depth: 1,
            in_tag: false,
        }
    }

    fn inside_tag() -> ParseState {
        ParseState {
            depth: 1,
            in_tag: true,
        }
    }

    #[test]
    fn test_markup_priority() {
        let state = outside();
        assert_eq!(classify(b"<?xml ", &state), Some(Construct::Declaration));
        assert_eq!(classify(b"</unit>", &state), Some(Construct::EndTag));
        assert_eq!(classify(b"<unit>", &state), Some(Construct::StartTag));
        assert_eq!(classify(b"<![CDATA[", &state), Some(Construct::CData));
        assert_eq!(classify(b"<!-- x -->", &state), Some(Construct::Comment));
    }

    #[test]
    fn test_unsupported_bang_markup() {
        assert_eq!(classify(b"<!DOCTYPE unit>", &outside()), None);
        assert_eq!(classify(b"<!-x", &inside_element()), None);
    }

    #[test]
    fn test_namespace_before_attribute() {
        let state = inside_tag();
        assert_eq!(classify(b"xmlns=\"urn:a\">", &state), Some(Construct::Namespace));
        assert_eq!(classify(b"xmlns:cpp=\"urn:b\">", &state), Some(Construct::Namespace));
        assert_eq!(classify(b"xmlnsx=\"1\">", &state), Some(Construct::Attribute));
        assert_eq!(classify(b"url=\"a.cpp\">", &state), Some(Construct::Attribute));
    }

    #[test]
    fn test_namespace_needs_full_lookahead() {
        // Five bytes of "xmlns" alone must not be read past
        assert_eq!(classify(b"xmlns", &inside_tag()), Some(Construct::Attribute));
    }

    #[test]
    fn test_tag_close_is_not_attribute() {
        let state = inside_tag();
        assert_eq!(classify(b">text", &state), Some(Construct::Characters));
        assert_eq!(classify(b"/>", &state), Some(Construct::Characters));
    }

    #[test]
    fn test_outside_characters_before_entity() {
        assert_eq!(classify(b"&amp;", &outside()), Some(Construct::OutsideCharacters));
        assert_eq!(classify(b"\n  ", &outside()), Some(Construct::OutsideCharacters));
        assert_eq!(classify(b"&amp;", &inside_element()), Some(Construct::EntityReference));
        assert_eq!(classify(b"x = 1;", &inside_element()), Some(Construct::Characters));
    }

    #[test]
    fn test_empty_window() {
        assert_eq!(classify(b"", &outside()), None);
    }

    #[test]
    fn test_lone_angle_bracket_is_start_tag() {
        assert_eq!(classify(b"<", &inside_element()), Some(Construct::StartTag));
    }
}
