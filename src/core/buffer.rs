//! Refillable input window
//!
//! Reads XML from any source implementing the Read trait into a fixed-size
//! buffer. Unconsumed bytes are compacted to the front on every refill, so an
//! offset measured from the cursor stays valid across refills while absolute
//! indices do not. Callers therefore only ever hold cursor-relative offsets.

use std::io::{ErrorKind, Read};

use tracing::debug;

/// Fixed-capacity byte window over a stream
pub struct StreamBuffer<R: Read> {
    reader: R,
    buffer: Vec<u8>,
    pos: usize,
    end: usize,
    eof: bool,
    total_read: u64,
    refills: u64,
}

impl<R: Read> StreamBuffer<R> {
    /// Create an empty buffer; nothing is read until the first refill
    pub fn with_capacity(reader: R, capacity: usize) -> Self {
        StreamBuffer {
            reader,
            buffer: vec![0u8; capacity],
            pos: 0,
            end: 0,
            eof: false,
            total_read: 0,
            refills: 0,
        }
    }

    /// Compact the unconsumed bytes to the front and read until the buffer is
    /// full or the source is exhausted.
    ///
    /// Returns the number of new bytes. Zero means either end-of-stream or a
    /// buffer already full of unconsumed bytes; `is_eof` tells them apart.
    pub fn refill(&mut self) -> std::io::Result<usize> {
        if self.pos > 0 {
            let remaining = self.end - self.pos;
            if remaining > 0 {
                self.buffer.copy_within(self.pos..self.end, 0);
            }
            self.end = remaining;
            self.pos = 0;
        }

        let mut read_total = 0;
        while !self.eof && self.end < self.buffer.len() {
            match self.reader.read(&mut self.buffer[self.end..]) {
                Ok(0) => self.eof = true,
                Ok(n) => {
                    self.end += n;
                    read_total += n;
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }

        self.total_read += read_total as u64;
        self.refills += 1;
        debug!(
            bytes = read_total,
            unconsumed = self.end,
            refills = self.refills,
            eof = self.eof,
            "refilled buffer"
        );
        Ok(read_total)
    }

    /// Unconsumed bytes `[cursor, end)`
    #[inline]
    pub fn window(&self) -> &[u8] {
        &self.buffer[self.pos..self.end]
    }

    /// Number of unconsumed bytes
    #[inline]
    pub fn remaining(&self) -> usize {
        self.end - self.pos
    }

    /// Move the cursor forward by n bytes (clamped to the end)
    #[inline]
    pub fn advance(&mut self, n: usize) {
        self.pos += n.min(self.end - self.pos);
    }

    /// The source has reported end-of-stream
    #[inline]
    pub fn is_eof(&self) -> bool {
        self.eof
    }

    /// End-of-stream reached and every byte consumed
    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.eof && self.pos >= self.end
    }

    /// Bytes read from the source so far
    #[inline]
    pub fn total_bytes_read(&self) -> u64 {
        self.total_read
    }

    /// Absolute position of the cursor within the input stream
    #[inline]
    pub fn stream_offset(&self) -> u64 {
        self.total_read - self.remaining() as u64
    }

    /// Number of refills performed so far
    pub fn refill_count(&self) -> u64 {
        self.refills
    }

    /// Fixed size of the window in bytes
    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }
}
