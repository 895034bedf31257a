//! Owned tokenizer events
//!
//! Handler callbacks borrow the tokenizer's window, so anything kept past the
//! callback has to be copied out. `XmlEvent` is that copy.

use std::borrow::Cow;
use std::fmt;

use crate::core::qname::QName;

/// One recognised construct, with its bytes copied out of the window
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlEvent {
    Declaration {
        version: Vec<u8>,
        encoding: Vec<u8>,
        standalone: Vec<u8>,
    },
    StartTag {
        prefix: Vec<u8>,
        local_name: Vec<u8>,
        /// Depth including this element
        depth: i32,
    },
    /// `/>` closed the current start tag; depth after closing
    EmptyTagEnd { depth: i32 },
    EndTag {
        prefix: Vec<u8>,
        local_name: Vec<u8>,
        /// Depth after closing
        depth: i32,
    },
    /// Empty prefix for the default namespace
    Namespace { prefix: Vec<u8>, uri: Vec<u8> },
    Attribute {
        prefix: Vec<u8>,
        local_name: Vec<u8>,
        value: Vec<u8>,
    },
    CData(Vec<u8>),
    Comment(Vec<u8>),
    OutsideWhitespace(Vec<u8>),
    Entity(u8),
    Text(Vec<u8>),
}

impl XmlEvent {
    pub fn declaration(version: &str, encoding: &str, standalone: &str) -> Self {
        XmlEvent::Declaration {
            version: version.into(),
            encoding: encoding.into(),
            standalone: standalone.into(),
        }
    }

    /// Start tag from a qualified name such as `cpp:if`
    pub fn start_tag(qname: &str, depth: i32) -> Self {
        let name = QName::split(qname.as_bytes());
        XmlEvent::StartTag {
            prefix: name.prefix.to_vec(),
            local_name: name.local_name.to_vec(),
            depth,
        }
    }

    /// End tag from a qualified name such as `cpp:if`
    pub fn end_tag(qname: &str, depth: i32) -> Self {
        let name = QName::split(qname.as_bytes());
        XmlEvent::EndTag {
            prefix: name.prefix.to_vec(),
            local_name: name.local_name.to_vec(),
            depth,
        }
    }

    pub fn namespace(prefix: &str, uri: &str) -> Self {
        XmlEvent::Namespace {
            prefix: prefix.into(),
            uri: uri.into(),
        }
    }

    pub fn attribute(qname: &str, value: &str) -> Self {
        let name = QName::split(qname.as_bytes());
        XmlEvent::Attribute {
            prefix: name.prefix.to_vec(),
            local_name: name.local_name.to_vec(),
            value: value.into(),
        }
    }

    pub fn comment(content: &str) -> Self {
        XmlEvent::Comment(content.into())
    }

    pub fn text(content: &str) -> Self {
        XmlEvent::Text(content.into())
    }

    #[inline]
    pub fn is_start_tag(&self) -> bool {
        matches!(self, XmlEvent::StartTag { .. })
    }

    #[inline]
    pub fn is_end_tag(&self) -> bool {
        matches!(self, XmlEvent::EndTag { .. })
    }

    #[inline]
    pub fn is_text(&self) -> bool {
        matches!(self, XmlEvent::Text(_))
    }

    /// Nesting depth carried by tag events
    pub fn depth(&self) -> Option<i32> {
        match self {
            XmlEvent::StartTag { depth, .. }
            | XmlEvent::EmptyTagEnd { depth }
            | XmlEvent::EndTag { depth, .. } => Some(*depth),
            _ => None,
        }
    }
}

fn lossy(bytes: &[u8]) -> Cow<'_, str> {
    String::from_utf8_lossy(bytes)
}

fn qualified<'a>(prefix: &'a [u8], local_name: &'a [u8]) -> QName<'a> {
    QName { prefix, local_name }
}

/// One line per event, content shown with escapes so every event stays on a
/// single line
impl fmt::Display for XmlEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            XmlEvent::Declaration {
                version,
                encoding,
                standalone,
            } => write!(
                f,
                "declaration version={:?} encoding={:?} standalone={:?}",
                lossy(version),
                lossy(encoding),
                lossy(standalone)
            ),
            XmlEvent::StartTag {
                prefix,
                local_name,
                depth,
            } => write!(f, "start_tag {} depth={depth}", qualified(prefix, local_name)),
            XmlEvent::EmptyTagEnd { depth } => write!(f, "empty_tag_end depth={depth}"),
            XmlEvent::EndTag {
                prefix,
                local_name,
                depth,
            } => write!(f, "end_tag {} depth={depth}", qualified(prefix, local_name)),
            XmlEvent::Namespace { prefix, uri } => {
                write!(f, "namespace prefix={:?} uri={:?}", lossy(prefix), lossy(uri))
            }
            XmlEvent::Attribute {
                prefix,
                local_name,
                value,
            } => write!(
                f,
                "attribute {}={:?}",
                qualified(prefix, local_name),
                lossy(value)
            ),
            XmlEvent::CData(content) => write!(f, "cdata {:?}", lossy(content)),
            XmlEvent::Comment(content) => write!(f, "comment {:?}", lossy(content)),
            XmlEvent::OutsideWhitespace(ws) => write!(f, "outside_whitespace {:?}", lossy(ws)),
            XmlEvent::Entity(decoded) => write!(f, "entity {:?}", char::from(*decoded)),
            XmlEvent::Text(content) => write!(f, "text {:?}", lossy(content)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_split_names() {
        assert_eq!(
            XmlEvent::start_tag("cpp:if", 2),
            XmlEvent::StartTag {
                prefix: b"cpp".to_vec(),
                local_name: b"if".to_vec(),
                depth: 2,
            }
        );
        assert_eq!(
            XmlEvent::attribute("url", "a.cpp"),
            XmlEvent::Attribute {
                prefix: vec![],
                local_name: b"url".to_vec(),
                value: b"a.cpp".to_vec(),
            }
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(
            XmlEvent::start_tag("cpp:if", 2).to_string(),
            "start_tag cpp:if depth=2"
        );
        assert_eq!(XmlEvent::end_tag("unit", 0).to_string(), "end_tag unit depth=0");
        assert_eq!(
            XmlEvent::attribute("pos:tabs", "8").to_string(),
            "attribute pos:tabs=\"8\""
        );
        assert_eq!(XmlEvent::text("a\nb").to_string(), "text \"a\\nb\"");
        assert_eq!(XmlEvent::Entity(b'<').to_string(), "entity '<'");
        assert_eq!(
            XmlEvent::namespace("", "urn:x").to_string(),
            "namespace prefix=\"\" uri=\"urn:x\""
        );
    }

    #[test]
    fn test_predicates() {
        assert!(XmlEvent::start_tag("a", 1).is_start_tag());
        assert!(XmlEvent::end_tag("a", 0).is_end_tag());
        assert!(XmlEvent::text("x").is_text());
        assert_eq!(XmlEvent::EmptyTagEnd { depth: 3 }.depth(), Some(3));
        assert_eq!(XmlEvent::comment("c").depth(), None);
    }
}
