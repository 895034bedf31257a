//! Markup scanners: XML declaration, start/end tags, namespaces, attributes

use std::io::Read;

use super::classify::Construct;
use super::error::{ParseError, ParseResult};
use super::handler::XmlHandler;
use super::qname::QName;
use super::scanner::{find_byte, is_whitespace, name_end, trim_end, whitespace_len};
use super::tokenizer::Tokenizer;

const XML_DECL_OPEN: &[u8] = b"<?xml";
const XMLNS: &[u8] = b"xmlns";

impl<R: Read> Tokenizer<R> {
    /// `<?xml version=".." encoding=".." standalone=".."?>`
    pub(super) fn scan_declaration<H: XmlHandler>(&mut self, handler: &mut H) -> ParseResult<()> {
        let offset = self.buf.stream_offset();
        let end = self.find_or_refill(Construct::Declaration, 0, |w| find_byte(w, b'>'))?;

        let window = self.buf.window();
        let decl = &window[..end];
        let opened = decl.starts_with(XML_DECL_OPEN)
            && decl.get(XML_DECL_OPEN.len()).copied().is_some_and(is_whitespace);
        if !opened {
            let shown = &decl[..decl.len().min(16)];
            return Err(ParseError::unsupported_markup(shown, offset));
        }

        let pos = XML_DECL_OPEN.len() + whitespace_len(&decl[XML_DECL_OPEN.len()..]);
        let (version, pos) = pseudo_attribute(decl, pos, "version", offset)?;
        let (encoding, pos) = pseudo_attribute(decl, pos, "encoding", offset)?;
        let (standalone, pos) = pseudo_attribute(decl, pos, "standalone", offset)?;
        if &decl[pos..] != b"?" {
            return Err(ParseError::missing_delimiter(Construct::Declaration, b"?>", offset));
        }

        handler.declaration(version, encoding, standalone);
        self.buf.advance(end + 1);
        self.skip_whitespace()
    }

    /// `<name` up to the first whitespace, `>` or `/`
    pub(super) fn scan_start_tag<H: XmlHandler>(&mut self, handler: &mut H) -> ParseResult<()> {
        let offset = self.buf.stream_offset();
        let end = self.find_or_refill(Construct::StartTag, 1, |w| find_byte(w, b'>'))?;

        let window = self.buf.window();
        let name_len = name_end(&window[1..end]).unwrap_or(end - 1);
        let name = QName::split(&window[1..1 + name_len]);
        if name.local_name.is_empty() {
            return Err(ParseError::invalid_name(Construct::StartTag, &window[1..1 + name_len], offset));
        }

        self.state.depth += 1;
        self.state.in_tag = true;
        handler.start_tag(name, self.state.depth);

        self.buf.advance(1 + name_len);
        let ws = whitespace_len(self.buf.window());
        self.buf.advance(ws);
        self.close_tag(handler);
        Ok(())
    }

    /// `</name>`
    pub(super) fn scan_end_tag<H: XmlHandler>(&mut self, handler: &mut H) -> ParseResult<()> {
        self.state.depth -= 1;

        let offset = self.buf.stream_offset();
        let end = self.find_or_refill(Construct::EndTag, 2, |w| find_byte(w, b'>'))?;

        let window = self.buf.window();
        let name_len = name_end(&window[2..end]).unwrap_or(end - 2);
        let name = QName::split(&window[2..2 + name_len]);
        if name.local_name.is_empty() {
            return Err(ParseError::invalid_name(Construct::EndTag, &window[2..2 + name_len], offset));
        }

        handler.end_tag(name, self.state.depth);
        self.buf.advance(end + 1);
        Ok(())
    }

    /// `xmlns="uri"` or `xmlns:prefix="uri"` inside a start tag
    pub(super) fn scan_namespace<H: XmlHandler>(&mut self, handler: &mut H) -> ParseResult<()> {
        let offset = self.buf.stream_offset();
        let end = self.find_or_refill(Construct::Namespace, 0, |w| find_byte(w, b'>'))?;

        let window = self.buf.window();
        let tag = &window[..end];
        let Some(eq) = find_byte(tag, b'=') else {
            return Err(ParseError::missing_delimiter(Construct::Namespace, XMLNS, offset));
        };
        let name_len = trim_end(&tag[..eq]).len();
        let Some((value_start, quote)) = opening_quote(window, eq + 1) else {
            return Err(ParseError::missing_delimiter(Construct::Namespace, &tag[..name_len], offset));
        };

        let Some(value_end) = self.search_with_refill(value_start, |w| find_byte(w, quote))? else {
            let name = &self.buf.window()[..name_len];
            return Err(ParseError::missing_delimiter(Construct::Namespace, name, offset));
        };

        let window = self.buf.window();
        let prefix = window[XMLNS.len()..name_len].strip_prefix(b":").unwrap_or(&[]);
        handler.namespace(prefix, &window[value_start..value_end]);
        self.finish_attribute(handler, value_end + 1);
        Ok(())
    }

    /// `name="value"` inside a start tag
    pub(super) fn scan_attribute<H: XmlHandler>(&mut self, handler: &mut H) -> ParseResult<()> {
        let offset = self.buf.stream_offset();
        let end = self.find_or_refill(Construct::Attribute, 0, |w| find_byte(w, b'>'))?;

        let window = self.buf.window();
        let tag = &window[..end];
        let Some(eq) = find_byte(tag, b'=') else {
            let name_len = name_end(tag).unwrap_or(tag.len());
            return Err(ParseError::missing_delimiter(Construct::Attribute, &tag[..name_len], offset));
        };
        let name_len = trim_end(&tag[..eq]).len();
        if QName::split(&tag[..name_len]).local_name.is_empty() {
            return Err(ParseError::invalid_name(Construct::Attribute, &tag[..name_len], offset));
        }
        let Some((value_start, quote)) = opening_quote(window, eq + 1) else {
            return Err(ParseError::missing_delimiter(Construct::Attribute, &tag[..name_len], offset));
        };

        let Some(value_end) = self.search_with_refill(value_start, |w| find_byte(w, quote))? else {
            let name = &self.buf.window()[..name_len];
            return Err(ParseError::missing_delimiter(Construct::Attribute, name, offset));
        };

        // Offsets survive the refill; the slices are taken again
        let window = self.buf.window();
        handler.attribute(QName::split(&window[..name_len]), &window[value_start..value_end]);
        self.finish_attribute(handler, value_end + 1);
        Ok(())
    }

    /// Move past an attribute value and any whitespace, then close the tag if
    /// it ends here
    fn finish_attribute<H: XmlHandler>(&mut self, handler: &mut H, consumed: usize) {
        self.buf.advance(consumed);
        let ws = whitespace_len(self.buf.window());
        self.buf.advance(ws);
        self.close_tag(handler);
    }
}

/// Opening quote of a value at `from`, allowing whitespace before it
///
/// Returns where the value starts and the quote byte that closes it. The
/// value may contain '>', so the caller searches for the closing quote past
/// the first '>' of the tag, refilling if needed.
fn opening_quote(window: &[u8], from: usize) -> Option<(usize, u8)> {
    let start = from + whitespace_len(&window[from..]);
    match window.get(start) {
        Some(&quote @ (b'"' | b'\'')) => Some((start + 1, quote)),
        _ => None,
    }
}

/// One of the declaration's fixed pseudo-attributes, `name="value"`
///
/// Returns the value and the position after it and any trailing whitespace.
fn pseudo_attribute<'a>(
    decl: &'a [u8],
    pos: usize,
    expected: &'static str,
    offset: u64,
) -> ParseResult<(&'a [u8], usize)> {
    let rest = &decl[pos..];
    let Some(eq) = find_byte(rest, b'=') else {
        let found = trim_end(rest.strip_suffix(b"?").unwrap_or(rest));
        if found.is_empty() {
            return Err(ParseError::UnexpectedAttributeName {
                expected,
                found: String::new(),
                offset,
            });
        }
        return Err(ParseError::missing_delimiter(Construct::Declaration, found, offset));
    };

    let name = &rest[..eq];
    let quote = rest.get(eq + 1).copied();
    let Some(quote @ (b'"' | b'\'')) = quote else {
        return Err(ParseError::missing_delimiter(Construct::Declaration, name, offset));
    };
    let value_start = eq + 2;
    let Some(len) = find_byte(&rest[value_start..], quote) else {
        return Err(ParseError::missing_delimiter(Construct::Declaration, name, offset));
    };
    if name != expected.as_bytes() {
        return Err(ParseError::UnexpectedAttributeName {
            expected,
            found: String::from_utf8_lossy(name).into_owned(),
            offset,
        });
    }

    let value = &rest[value_start..value_start + len];
    let next = pos + value_start + len + 1;
    Ok((value, next + whitespace_len(&decl[next..])))
}
