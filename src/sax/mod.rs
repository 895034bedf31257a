//! Owned event stream
//!
//! The tokenizer reports borrowed slices through [`XmlHandler`]. This module
//! copies them into [`XmlEvent`] values, either collected in document order
//! or handed one at a time to a closure:
//!
//! ```text
//! Tokenizer ---> EventSink(FnMut) ---> caller
//!           \--> EventCollector   ---> Vec<XmlEvent>
//! ```
//!
//! [`XmlHandler`]: crate::core::handler::XmlHandler

pub mod collector;
pub mod events;

pub use collector::{collect_events, EventCollector, EventSink};
pub use events::XmlEvent;
