//! Qualified names (`prefix:localName`)

use memchr::memchr;
use std::fmt;

/// An element or attribute name split at its first colon
///
/// `prefix` is empty when the name has no colon. Names are borrowed from the
/// input window and only live for the duration of one handler call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QName<'a> {
    pub prefix: &'a [u8],
    pub local_name: &'a [u8],
}

impl<'a> QName<'a> {
    /// Split a name into prefix and local name at the first colon
    pub fn split(name: &'a [u8]) -> Self {
        if let Some(colon_pos) = memchr(b':', name) {
            QName {
                prefix: &name[..colon_pos],
                local_name: &name[colon_pos + 1..],
            }
        } else {
            QName {
                prefix: &[],
                local_name: name,
            }
        }
    }

    pub fn has_prefix(&self) -> bool {
        !self.prefix.is_empty()
    }

    /// Reassemble the name as written (for names that had a prefix, or none)
    pub fn qualified(&self) -> Vec<u8> {
        if self.prefix.is_empty() {
            return self.local_name.to_vec();
        }
        let mut name = Vec::with_capacity(self.prefix.len() + 1 + self.local_name.len());
        name.extend_from_slice(self.prefix);
        name.push(b':');
        name.extend_from_slice(self.local_name);
        name
    }
}

impl fmt::Display for QName<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(&self.qualified()))
    }
}
