//! Helpers shared by the tokenizer tests

use std::io::{self, Cursor, Read};

use super::error::ParseResult;
use crate::config::TokenizerConfig;
use crate::sax::{collect_events, XmlEvent};

/// Byte source that returns at most `chunk` bytes per read
pub struct ChunkedReader<'a> {
    data: &'a [u8],
    chunk: usize,
}

impl<'a> ChunkedReader<'a> {
    pub fn new(data: &'a [u8], chunk: usize) -> Self {
        Self {
            data,
            chunk: chunk.max(1),
        }
    }
}

impl Read for ChunkedReader<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.chunk.min(buf.len()).min(self.data.len());
        buf[..n].copy_from_slice(&self.data[..n]);
        self.data = &self.data[n..];
        Ok(n)
    }
}

/// Events for `input` read in one piece with the default buffer
pub fn parse_events(input: &[u8]) -> ParseResult<Vec<XmlEvent>> {
    collect_events(Cursor::new(input), &TokenizerConfig::default())
}

/// Events for `input` read `chunk` bytes at a time into a `capacity` buffer
pub fn parse_events_chunked(
    input: &[u8],
    capacity: usize,
    chunk: usize,
) -> ParseResult<Vec<XmlEvent>> {
    let config = TokenizerConfig::default().with_buffer_capacity(capacity);
    collect_events(ChunkedReader::new(input, chunk), &config)
}

/// Merge adjacent text and adjacent outside-root whitespace, which a refill
/// may report in several pieces
pub fn coalesce(events: Vec<XmlEvent>) -> Vec<XmlEvent> {
    let mut merged: Vec<XmlEvent> = Vec::with_capacity(events.len());
    for event in events {
        match (merged.last_mut(), event) {
            (Some(XmlEvent::Text(prev)), XmlEvent::Text(next)) => prev.extend(next),
            (Some(XmlEvent::OutsideWhitespace(prev)), XmlEvent::OutsideWhitespace(next)) => {
                prev.extend(next)
            }
            (_, event) => merged.push(event),
        }
    }
    merged
}
