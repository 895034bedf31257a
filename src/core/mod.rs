//! Core tokenizer primitives
//!
//! This module contains the building blocks of the streaming tokenizer:
//! - Buffer: fixed-capacity window refilled from any `Read` source
//! - Scanner: memchr-backed delimiter and whitespace searches
//! - Classify: fixed-priority decision of the construct at the cursor
//! - QName: prefix/local-name split of qualified names
//! - Entities: decoding of the three entities srcML emits
//! - Tokenizer: driver loop plus the markup and content scanners
//! - Handler: callback trait receiving one event per construct

pub mod buffer;
pub mod classify;
mod content;
pub mod entities;
pub mod error;
pub mod handler;
mod markup;
pub mod qname;
pub mod scanner;
pub mod tokenizer;

#[cfg(test)]
pub(crate) mod test_util;
