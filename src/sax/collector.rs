//! Event collector
//!
//! Implements XmlHandler by copying every event out of the tokenizer window.

use std::io::Read;

use super::events::XmlEvent;
use crate::config::TokenizerConfig;
use crate::core::error::ParseResult;
use crate::core::handler::XmlHandler;
use crate::core::qname::QName;
use crate::core::tokenizer::Tokenizer;

/// Handler that forwards owned events to a closure
///
/// Lets the binary print events as they arrive instead of buffering the whole
/// document.
pub struct EventSink<F: FnMut(XmlEvent)> {
    emit: F,
}

impl<F: FnMut(XmlEvent)> EventSink<F> {
    pub fn new(emit: F) -> Self {
        Self { emit }
    }
}

impl<F: FnMut(XmlEvent)> XmlHandler for EventSink<F> {
    fn declaration(&mut self, version: &[u8], encoding: &[u8], standalone: &[u8]) {
        (self.emit)(XmlEvent::Declaration {
            version: version.to_vec(),
            encoding: encoding.to_vec(),
            standalone: standalone.to_vec(),
        });
    }

    fn start_tag(&mut self, name: QName<'_>, depth: i32) {
        (self.emit)(XmlEvent::StartTag {
            prefix: name.prefix.to_vec(),
            local_name: name.local_name.to_vec(),
            depth,
        });
    }

    fn empty_tag_end(&mut self, depth: i32) {
        (self.emit)(XmlEvent::EmptyTagEnd { depth });
    }

    fn end_tag(&mut self, name: QName<'_>, depth: i32) {
        (self.emit)(XmlEvent::EndTag {
            prefix: name.prefix.to_vec(),
            local_name: name.local_name.to_vec(),
            depth,
        });
    }

    fn namespace(&mut self, prefix: &[u8], uri: &[u8]) {
        (self.emit)(XmlEvent::Namespace {
            prefix: prefix.to_vec(),
            uri: uri.to_vec(),
        });
    }

    fn attribute(&mut self, name: QName<'_>, value: &[u8]) {
        (self.emit)(XmlEvent::Attribute {
            prefix: name.prefix.to_vec(),
            local_name: name.local_name.to_vec(),
            value: value.to_vec(),
        });
    }

    fn cdata(&mut self, content: &[u8]) {
        (self.emit)(XmlEvent::CData(content.to_vec()));
    }

    fn comment(&mut self, content: &[u8]) {
        (self.emit)(XmlEvent::Comment(content.to_vec()));
    }

    fn outside_whitespace(&mut self, whitespace: &[u8]) {
        (self.emit)(XmlEvent::OutsideWhitespace(whitespace.to_vec()));
    }

    fn entity(&mut self, decoded: u8) {
        (self.emit)(XmlEvent::Entity(decoded));
    }

    fn text(&mut self, content: &[u8]) {
        (self.emit)(XmlEvent::Text(content.to_vec()));
    }
}

/// Collector that gathers every event in document order
#[derive(Debug, Default)]
pub struct EventCollector {
    events: Vec<XmlEvent>,
}

impl EventCollector {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(256),
        }
    }

    /// Take the collected events
    pub fn take_events(&mut self) -> Vec<XmlEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn events(&self) -> &[XmlEvent] {
        &self.events
    }

    pub fn event_count(&self) -> usize {
        self.events.len()
    }

    /// Tokenize `tokenizer` to the end of the stream, recording every event
    pub fn collect<R: Read>(&mut self, tokenizer: &mut Tokenizer<R>) -> ParseResult<()> {
        let mut sink = EventSink::new(|event| self.events.push(event));
        tokenizer.parse(&mut sink)
    }
}

/// Tokenize a whole stream and return its events
pub fn collect_events<R: Read>(reader: R, config: &TokenizerConfig) -> ParseResult<Vec<XmlEvent>> {
    let mut tokenizer = Tokenizer::with_config(reader, config);
    let mut collector = EventCollector::new();
    collector.collect(&mut tokenizer)?;
    Ok(collector.take_events())
}
