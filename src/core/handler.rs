//! Event sink for the tokenizer
//!
//! Implement this trait to receive one call per recognised construct. All
//! byte slices borrow the tokenizer's input window and are only valid for the
//! duration of the call; copy anything that must outlive it.
//!
//! Every method has a no-op default, so a handler only overrides the events
//! it cares about.

use super::qname::QName;

pub trait XmlHandler {
    /// `<?xml version=".." encoding=".." standalone=".."?>`
    fn declaration(&mut self, _version: &[u8], _encoding: &[u8], _standalone: &[u8]) {}

    /// Start tag name scanned
    ///
    /// # Arguments
    /// * `name` - Element name split into prefix and local name
    /// * `depth` - Nesting depth including this element
    fn start_tag(&mut self, _name: QName<'_>, _depth: i32) {}

    /// The current start tag was closed with `/>`
    ///
    /// # Arguments
    /// * `depth` - Nesting depth after the element was closed
    fn empty_tag_end(&mut self, _depth: i32) {}

    /// End tag scanned
    ///
    /// # Arguments
    /// * `name` - Element name split into prefix and local name
    /// * `depth` - Nesting depth after the element was closed
    fn end_tag(&mut self, _name: QName<'_>, _depth: i32) {}

    /// `xmlns="uri"` (empty prefix) or `xmlns:prefix="uri"`
    fn namespace(&mut self, _prefix: &[u8], _uri: &[u8]) {}

    /// Attribute of the current start tag
    fn attribute(&mut self, _name: QName<'_>, _value: &[u8]) {}

    /// Raw content of a CDATA section
    fn cdata(&mut self, _content: &[u8]) {}

    /// Content between `<!--` and `-->`
    fn comment(&mut self, _content: &[u8]) {}

    /// Whitespace before or after the root element
    fn outside_whitespace(&mut self, _whitespace: &[u8]) {}

    /// Decoded entity reference, or a literal '&'
    fn entity(&mut self, _decoded: u8) {}

    /// Run of character data up to the next '<' or '&'
    fn text(&mut self, _content: &[u8]) {}
}

impl<H: XmlHandler + ?Sized> XmlHandler for &mut H {
    fn declaration(&mut self, version: &[u8], encoding: &[u8], standalone: &[u8]) {
        (**self).declaration(version, encoding, standalone)
    }

    fn start_tag(&mut self, name: QName<'_>, depth: i32) {
        (**self).start_tag(name, depth)
    }

    fn empty_tag_end(&mut self, depth: i32) {
        (**self).empty_tag_end(depth)
    }

    fn end_tag(&mut self, name: QName<'_>, depth: i32) {
        (**self).end_tag(name, depth)
    }

    fn namespace(&mut self, prefix: &[u8], uri: &[u8]) {
        (**self).namespace(prefix, uri)
    }

    fn attribute(&mut self, name: QName<'_>, value: &[u8]) {
        (**self).attribute(name, value)
    }

    fn cdata(&mut self, content: &[u8]) {
        (**self).cdata(content)
    }

    fn comment(&mut self, content: &[u8]) {
        (**self).comment(content)
    }

    fn outside_whitespace(&mut self, whitespace: &[u8]) {
        (**self).outside_whitespace(whitespace)
    }

    fn entity(&mut self, decoded: u8) {
        (**self).entity(decoded)
    }

    fn text(&mut self, content: &[u8]) {
        (**self).text(content)
    }
}

/// Handler that ignores every event, e.g. to validate input
impl XmlHandler for () {}
