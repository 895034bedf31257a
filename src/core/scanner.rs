//! SIMD-accelerated byte searches over the input window using memchr
//!
//! Every function takes the current window (`[cursor, end)`) and returns an
//! offset relative to its start, which survives a refill unchanged.

use memchr::{memchr, memchr2, memmem};

/// XML whitespace: space, tab, newline, carriage return
#[inline]
pub fn is_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r')
}

/// Number of leading whitespace bytes
#[inline]
pub fn whitespace_len(input: &[u8]) -> usize {
    input.iter().take_while(|&&b| is_whitespace(b)).count()
}

/// Find next occurrence of a specific byte
#[inline]
pub fn find_byte(input: &[u8], byte: u8) -> Option<usize> {
    memchr(byte, input)
}

/// Find next '<' or '&' (character data boundaries)
#[inline]
pub fn find_text_boundary(input: &[u8]) -> Option<usize> {
    memchr2(b'<', b'&', input)
}

/// Find a multi-byte terminator such as `-->` or `]]>`
#[inline]
pub fn find_terminator(input: &[u8], needle: &[u8]) -> Option<usize> {
    memmem::find(input, needle)
}

/// End of a tag name: first whitespace, '>' or '/'
#[inline]
pub fn name_end(input: &[u8]) -> Option<usize> {
    input
        .iter()
        .position(|&b| is_whitespace(b) || b == b'>' || b == b'/')
}

/// Strip trailing whitespace, e.g. between an attribute name and '='
#[inline]
pub fn trim_end(input: &[u8]) -> &[u8] {
    let len = input.len() - input.iter().rev().take_while(|&&b| is_whitespace(b)).count();
    &input[..len]
}
