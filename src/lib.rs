//! srcfacts - streaming srcML tokenizer
//!
//! A single-pass tokenizer for the restricted XML that srcML emits (no DTD,
//! no well-formedness checks) running over a fixed-size window refilled from
//! any [`std::io::Read`] source, plus the srcFacts report built on top of it.
//!
//! Layers:
//! - `core`: buffer, classifier, scanners and the [`XmlHandler`] trait
//! - `sax`: owned [`XmlEvent`]s for collecting or streaming events
//! - `facts`: the srcFacts element and text counters
//!
//! ```no_run
//! use srcfacts::{summarize, TokenizerConfig};
//!
//! let facts = summarize(std::io::stdin().lock(), &TokenizerConfig::default())?;
//! print!("{facts}");
//! # Ok::<(), srcfacts::ParseError>(())
//! ```

pub mod config;
pub mod core;
pub mod facts;
pub mod logging;
pub mod sax;

pub use crate::config::{TokenizerConfig, DEFAULT_BUFFER_CAPACITY, MIN_BUFFER_CAPACITY};
pub use crate::core::classify::Construct;
pub use crate::core::error::{ParseError, ParseResult};
pub use crate::core::handler::XmlHandler;
pub use crate::core::qname::QName;
pub use crate::core::tokenizer::{ParseState, Tokenizer};
pub use crate::facts::{summarize, Facts};
pub use crate::sax::{collect_events, EventCollector, EventSink, XmlEvent};
