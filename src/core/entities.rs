//! Entity reference decoding
//!
//! srcML only ever escapes three characters, so only `&lt;`, `&gt;` and
//! `&amp;` are decoded. Numeric character references and every other named
//! entity pass through as a literal '&' followed by ordinary text.

const ENTITIES: [(&[u8], u8); 3] = [(b"&lt;", b'<'), (b"&gt;", b'>'), (b"&amp;", b'&')];

/// Longest recognised entity literal (`&amp;`)
pub const MAX_ENTITY_LEN: usize = 5;

/// Outcome of matching an entity at a '&'
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityMatch {
    /// A full literal: the decoded byte and how many input bytes it spans
    Decoded(u8, usize),
    /// Not one of the three literals; consume the '&' alone
    Literal,
    /// The input ends inside what could still become a literal
    Truncated,
}

/// Match the entity starting at `input[0]` (which must be '&')
///
/// A short input that is still a prefix of a literal is `Truncated`; the
/// caller refills and retries, and treats it as fatal once the stream is over.
pub fn decode_entity(input: &[u8]) -> EntityMatch {
    for (literal, decoded) in ENTITIES {
        if input.starts_with(literal) {
            return EntityMatch::Decoded(decoded, literal.len());
        }
        if input.len() < literal.len() && literal.starts_with(input) {
            return EntityMatch::Truncated;
        }
    }
    EntityMatch::Literal
}
