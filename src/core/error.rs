//! Tokenizer errors
//!
//! Every error is fatal: the tokenizer has no recovery path, so the first
//! error ends the parse and its position is the absolute byte offset of the
//! construct in the input stream.

use super::classify::Construct;

pub type ParseResult<T> = Result<T, ParseError>;

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// Terminator (`>`, `-->`, `]]>`, `;`) missing even after a refill
    #[error("Incomplete {construct} at byte {offset}")]
    IncompleteConstruct { construct: Construct, offset: u64 },

    /// Value not enclosed by matching quotes, or '=' missing
    #[error("{construct} '{name}' missing delimiter at byte {offset}")]
    MissingDelimiter {
        construct: Construct,
        name: String,
        offset: u64,
    },

    /// XML declaration attributes out of order or misnamed
    #[error("Missing required attribute {expected} in XML declaration, found '{found}' at byte {offset}")]
    UnexpectedAttributeName {
        expected: &'static str,
        found: String,
        offset: u64,
    },

    #[error("Start tag expected, '<' not found at byte {offset}")]
    MissingRootStartTag { offset: u64 },

    #[error("Invalid name '{name}' in {construct} at byte {offset}")]
    InvalidName {
        construct: Construct,
        name: String,
        offset: u64,
    },

    /// DOCTYPE, processing instructions other than the declaration, etc.
    #[error("Unsupported markup '{found}' at byte {offset}")]
    UnsupportedMarkup { found: String, offset: u64 },

    #[error("Read error: {0}")]
    Io(#[from] std::io::Error),
}

impl ParseError {
    pub fn incomplete(construct: Construct, offset: u64) -> Self {
        Self::IncompleteConstruct { construct, offset }
    }

    pub fn missing_delimiter(construct: Construct, name: &[u8], offset: u64) -> Self {
        Self::MissingDelimiter {
            construct,
            name: String::from_utf8_lossy(name).into_owned(),
            offset,
        }
    }

    pub fn invalid_name(construct: Construct, name: &[u8], offset: u64) -> Self {
        Self::InvalidName {
            construct,
            name: String::from_utf8_lossy(name).into_owned(),
            offset,
        }
    }

    pub fn unsupported_markup(found: &[u8], offset: u64) -> Self {
        Self::UnsupportedMarkup {
            found: String::from_utf8_lossy(found).into_owned(),
            offset,
        }
    }

    /// Byte offset of the failing construct, if the error came from the input
    pub fn offset(&self) -> Option<u64> {
        match self {
            Self::IncompleteConstruct { offset, .. }
            | Self::MissingDelimiter { offset, .. }
            | Self::UnexpectedAttributeName { offset, .. }
            | Self::MissingRootStartTag { offset }
            | Self::InvalidName { offset, .. }
            | Self::UnsupportedMarkup { offset, .. } => Some(*offset),
            Self::Io(_) => None,
        }
    }
}
