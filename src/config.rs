//! Tokenizer configuration

/// Default window size: 16 x 16 pages of 4 KiB
pub const DEFAULT_BUFFER_CAPACITY: usize = 16 * 16 * 4096;

/// Smallest usable window: `<![CDATA[` plus classifier lookahead must fit
pub const MIN_BUFFER_CAPACITY: usize = 16;

/// Tokenizer tuning
///
/// The buffer capacity is the only knob. A larger window means fewer refills;
/// a smaller one bounds memory, but every single construct (a start tag with
/// all its attributes, a comment, a CDATA section) must fit in it or the
/// tokenizer reports the construct as incomplete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenizerConfig {
    buffer_capacity: usize,
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        Self {
            buffer_capacity: DEFAULT_BUFFER_CAPACITY,
        }
    }
}

impl TokenizerConfig {
    /// Set the window size, raised to [`MIN_BUFFER_CAPACITY`] if smaller
    pub fn with_buffer_capacity(mut self, capacity: usize) -> Self {
        self.buffer_capacity = capacity.max(MIN_BUFFER_CAPACITY);
        self
    }

    #[inline]
    pub fn buffer_capacity(&self) -> usize {
        self.buffer_capacity
    }
}
