//! srcML tokenizer - single-pass driver over a refillable window
//!
//! The driver keeps a few bytes of lookahead, classifies the construct at the
//! cursor and runs the matching scanner, which reports the construct to an
//! [`XmlHandler`]. Scanners that need more input than the window holds refill
//! once and fail if the terminator is still missing.
//!
//! Cursor discipline: the buffer owns the cursor and every position a scanner
//! computes is an offset from it. A refill moves the unconsumed bytes to the
//! front, so those offsets stay valid; absolute indices are never kept.

use std::io::Read;

use tracing::{debug, trace};

use super::buffer::StreamBuffer;
use super::classify::{classify, Construct, MIN_LOOKAHEAD, XMLNS_LOOKAHEAD};
use super::error::{ParseError, ParseResult};
use super::handler::XmlHandler;
use super::scanner::whitespace_len;
use crate::config::TokenizerConfig;

/// Nesting and in-tag state carried between constructs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseState {
    /// Open elements; decremented by end tags and by `/>`
    pub depth: i32,
    /// Between a start tag's name and its closing `>` or `/>`
    pub in_tag: bool,
}

/// Streaming tokenizer over any byte source
pub struct Tokenizer<R: Read> {
    pub(super) buf: StreamBuffer<R>,
    pub(super) state: ParseState,
}

impl<R: Read> Tokenizer<R> {
    /// Create a tokenizer with the default buffer capacity
    pub fn new(reader: R) -> Self {
        Self::with_config(reader, &TokenizerConfig::default())
    }

    pub fn with_config(reader: R, config: &TokenizerConfig) -> Self {
        Tokenizer {
            buf: StreamBuffer::with_capacity(reader, config.buffer_capacity()),
            state: ParseState::default(),
        }
    }

    pub fn state(&self) -> ParseState {
        self.state
    }

    pub fn depth(&self) -> i32 {
        self.state.depth
    }

    /// Bytes read from the source so far
    pub fn total_bytes_read(&self) -> u64 {
        self.buf.total_bytes_read()
    }

    /// Tokenize the whole stream, reporting every construct to `handler`
    pub fn parse<H: XmlHandler>(&mut self, handler: &mut H) -> ParseResult<()> {
        while self.step(handler)? {}
        debug!(
            bytes = self.buf.total_bytes_read(),
            depth = self.state.depth,
            refills = self.buf.refill_count(),
            "end of stream"
        );
        Ok(())
    }

    /// Scan one construct. Returns false once the stream is exhausted.
    pub fn step<H: XmlHandler>(&mut self, handler: &mut H) -> ParseResult<bool> {
        if self.state.in_tag {
            // Whitespace between attributes may straddle a refill
            self.skip_whitespace()?;
            self.ensure(XMLNS_LOOKAHEAD)?;
            if self.close_tag(handler) {
                return Ok(true);
            }
        } else {
            self.ensure(MIN_LOOKAHEAD)?;
        }
        if self.buf.remaining() == 0 {
            return Ok(false);
        }

        let Some(construct) = classify(self.buf.window(), &self.state) else {
            let window = self.buf.window();
            let shown = &window[..window.len().min(16)];
            return Err(ParseError::unsupported_markup(shown, self.buf.stream_offset()));
        };
        trace!(
            %construct,
            offset = self.buf.stream_offset(),
            depth = self.state.depth,
            "scanning"
        );

        match construct {
            Construct::Declaration => self.scan_declaration(handler)?,
            Construct::EndTag => self.scan_end_tag(handler)?,
            Construct::StartTag => self.scan_start_tag(handler)?,
            Construct::Namespace => self.scan_namespace(handler)?,
            Construct::Attribute => self.scan_attribute(handler)?,
            Construct::CData => self.scan_cdata(handler)?,
            Construct::Comment => self.scan_comment(handler)?,
            Construct::OutsideCharacters => self.scan_outside_characters(handler)?,
            Construct::EntityReference => self.scan_entity(handler)?,
            Construct::Characters => self.scan_characters(handler)?,
        }
        Ok(true)
    }

    /// Refill when fewer than `n` bytes remain and more input may follow
    pub(super) fn ensure(&mut self, n: usize) -> ParseResult<()> {
        if self.buf.remaining() < n && !self.buf.is_eof() {
            self.buf.refill()?;
        }
        Ok(())
    }

    /// Search the window from offset `from`, refilling once if `find` fails
    ///
    /// Returns the match as an offset from the cursor, or None if it is still
    /// missing after the refill.
    pub(super) fn search_with_refill<F>(&mut self, from: usize, find: F) -> ParseResult<Option<usize>>
    where
        F: Fn(&[u8]) -> Option<usize>,
    {
        if let Some(pos) = self.buf.window().get(from..).and_then(&find) {
            return Ok(Some(from + pos));
        }
        self.buf.refill()?;
        Ok(self
            .buf
            .window()
            .get(from..)
            .and_then(&find)
            .map(|pos| from + pos))
    }

    /// Like `search_with_refill`, but a missing match is an incomplete
    /// `construct` starting at the cursor
    pub(super) fn find_or_refill<F>(
        &mut self,
        construct: Construct,
        from: usize,
        find: F,
    ) -> ParseResult<usize>
    where
        F: Fn(&[u8]) -> Option<usize>,
    {
        let offset = self.buf.stream_offset();
        self.search_with_refill(from, find)?
            .ok_or_else(|| ParseError::incomplete(construct, offset))
    }

    /// Skip whitespace, following it across refills
    pub(super) fn skip_whitespace(&mut self) -> ParseResult<()> {
        loop {
            let n = whitespace_len(self.buf.window());
            self.buf.advance(n);
            if self.buf.remaining() > 0 || self.buf.is_eof() {
                return Ok(());
            }
            self.buf.refill()?;
        }
    }

    /// Close the current start tag if the cursor is at `>` or `/>`
    pub(super) fn close_tag<H: XmlHandler>(&mut self, handler: &mut H) -> bool {
        let window = self.buf.window();
        let empty = if window.first() == Some(&b'>') {
            false
        } else if window.starts_with(b"/>") {
            true
        } else {
            return false;
        };

        self.state.in_tag = false;
        if empty {
            self.buf.advance(2);
            self.state.depth -= 1;
            handler.empty_tag_end(self.state.depth);
        } else {
            self.buf.advance(1);
        }
        true
    }
}
