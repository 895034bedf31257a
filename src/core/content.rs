//! Content scanners: CDATA, comments, entity references and character data

use std::io::Read;

use super::classify::Construct;
use super::entities::{decode_entity, EntityMatch, MAX_ENTITY_LEN};
use super::error::{ParseError, ParseResult};
use super::handler::XmlHandler;
use super::scanner::{find_terminator, find_text_boundary, whitespace_len};
use super::tokenizer::Tokenizer;

const CDATA_OPEN: &[u8] = b"<![CDATA[";
const CDATA_CLOSE: &[u8] = b"]]>";
const COMMENT_OPEN: &[u8] = b"<!--";
const COMMENT_CLOSE: &[u8] = b"-->";

impl<R: Read> Tokenizer<R> {
    pub(super) fn scan_cdata<H: XmlHandler>(&mut self, handler: &mut H) -> ParseResult<()> {
        self.ensure(CDATA_OPEN.len())?;
        let offset = self.buf.stream_offset();
        let window = self.buf.window();
        if !window.starts_with(CDATA_OPEN) {
            if window.len() < CDATA_OPEN.len() && CDATA_OPEN.starts_with(window) {
                return Err(ParseError::incomplete(Construct::CData, offset));
            }
            let shown = &window[..window.len().min(16)];
            return Err(ParseError::unsupported_markup(shown, offset));
        }

        let end = self.find_or_refill(Construct::CData, CDATA_OPEN.len(), |w| {
            find_terminator(w, CDATA_CLOSE)
        })?;
        handler.cdata(&self.buf.window()[CDATA_OPEN.len()..end]);
        self.buf.advance(end + CDATA_CLOSE.len());
        Ok(())
    }

    pub(super) fn scan_comment<H: XmlHandler>(&mut self, handler: &mut H) -> ParseResult<()> {
        let end = self.find_or_refill(Construct::Comment, COMMENT_OPEN.len(), |w| {
            find_terminator(w, COMMENT_CLOSE)
        })?;
        handler.comment(&self.buf.window()[COMMENT_OPEN.len()..end]);
        self.buf.advance(end + COMMENT_CLOSE.len());
        self.skip_whitespace()
    }

    /// Only whitespace may appear before or after the root element
    pub(super) fn scan_outside_characters<H: XmlHandler>(
        &mut self,
        handler: &mut H,
    ) -> ParseResult<()> {
        loop {
            let window = self.buf.window();
            let n = whitespace_len(window);
            if n > 0 {
                handler.outside_whitespace(&window[..n]);
                self.buf.advance(n);
            }

            match self.buf.window().first() {
                Some(b'<') => return Ok(()),
                Some(_) => {
                    return Err(ParseError::MissingRootStartTag {
                        offset: self.buf.stream_offset(),
                    })
                }
                None if self.buf.is_eof() => return Ok(()),
                None => {
                    self.buf.refill()?;
                }
            }
        }
    }

    /// `&lt;`, `&gt;`, `&amp;`; any other '&' is passed through as itself
    pub(super) fn scan_entity<H: XmlHandler>(&mut self, handler: &mut H) -> ParseResult<()> {
        self.ensure(MAX_ENTITY_LEN)?;
        match decode_entity(self.buf.window()) {
            EntityMatch::Decoded(byte, len) => {
                handler.entity(byte);
                self.buf.advance(len);
            }
            EntityMatch::Literal => {
                handler.entity(b'&');
                self.buf.advance(1);
            }
            EntityMatch::Truncated => {
                return Err(ParseError::incomplete(
                    Construct::EntityReference,
                    self.buf.stream_offset(),
                ));
            }
        }
        Ok(())
    }

    /// Character data up to the next '<' or '&'
    ///
    /// Text running past the end of the window is reported in pieces, one per
    /// refill.
    pub(super) fn scan_characters<H: XmlHandler>(&mut self, handler: &mut H) -> ParseResult<()> {
        let end = match find_text_boundary(self.buf.window()) {
            Some(end) => end,
            None => {
                if !self.buf.is_eof() {
                    self.buf.refill()?;
                }
                find_text_boundary(self.buf.window()).unwrap_or(self.buf.remaining())
            }
        };
        handler.text(&self.buf.window()[..end]);
        self.buf.advance(end);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::core::classify::Construct;
    use crate::core::error::ParseError;
    use crate::core::test_util::{coalesce, parse_events, parse_events_chunked};
    use crate::sax::XmlEvent;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_cdata() {
        let events = parse_events(b"<unit><![CDATA[a < b\n]]></unit>").unwrap();
        assert_eq!(
            events,
            vec![
                XmlEvent::start_tag("unit", 1),
                XmlEvent::CData(b"a < b\n".to_vec()),
                XmlEvent::end_tag("unit", 0),
            ]
        );
    }

    #[test]
    fn test_unterminated_cdata() {
        let err = parse_events(b"<unit><![CDATA[x = 1;").unwrap_err();
        assert!(matches!(
            err,
            ParseError::IncompleteConstruct {
                construct: Construct::CData,
                offset: 6
            }
        ));
    }

    #[test]
    fn test_truncated_cdata_open() {
        let err = parse_events(b"<unit><![CD").unwrap_err();
        assert!(matches!(
            err,
            ParseError::IncompleteConstruct {
                construct: Construct::CData,
                ..
            }
        ));
    }

    #[test]
    fn test_conditional_section_is_unsupported() {
        let err = parse_events(b"<unit><![INCLUDE[x]]></unit>").unwrap_err();
        assert!(matches!(err, ParseError::UnsupportedMarkup { offset: 6, .. }));
    }

    #[test]
    fn test_comment_skips_trailing_whitespace() {
        let events = parse_events(b"<unit><!--a-->\n  <b/></unit>").unwrap();
        assert_eq!(
            events,
            vec![
                XmlEvent::start_tag("unit", 1),
                XmlEvent::comment("a"),
                XmlEvent::start_tag("b", 2),
                XmlEvent::EmptyTagEnd { depth: 1 },
                XmlEvent::end_tag("unit", 0),
            ]
        );
    }

    #[test]
    fn test_unterminated_comment() {
        let err = parse_events(b"<unit><!-- never closed </unit>").unwrap_err();
        assert!(matches!(
            err,
            ParseError::IncompleteConstruct {
                construct: Construct::Comment,
                offset: 6
            }
        ));
    }

    #[test]
    fn test_whitespace_around_root() {
        let events = parse_events(b"\n <a/>\n\n").unwrap();
        assert_eq!(
            events,
            vec![
                XmlEvent::OutsideWhitespace(b"\n ".to_vec()),
                XmlEvent::start_tag("a", 1),
                XmlEvent::EmptyTagEnd { depth: 0 },
                XmlEvent::OutsideWhitespace(b"\n\n".to_vec()),
            ]
        );
    }

    #[test]
    fn test_text_before_root_is_fatal() {
        let err = parse_events(b"  junk<a/>").unwrap_err();
        assert!(matches!(err, ParseError::MissingRootStartTag { offset: 2 }));
    }

    #[test]
    fn test_text_after_root_is_fatal() {
        let err = parse_events(b"<a></a>x").unwrap_err();
        assert!(matches!(err, ParseError::MissingRootStartTag { offset: 7 }));
    }

    #[test]
    fn test_entities() {
        let events = parse_events(b"<e>&lt;&gt;&amp;</e>").unwrap();
        assert_eq!(
            events,
            vec![
                XmlEvent::start_tag("e", 1),
                XmlEvent::Entity(b'<'),
                XmlEvent::Entity(b'>'),
                XmlEvent::Entity(b'&'),
                XmlEvent::end_tag("e", 0),
            ]
        );
    }

    #[test]
    fn test_unknown_entity_passes_ampersand_through() {
        let events = parse_events(b"<e>&quot;</e>").unwrap();
        assert_eq!(
            events,
            vec![
                XmlEvent::start_tag("e", 1),
                XmlEvent::Entity(b'&'),
                XmlEvent::text("quot;"),
                XmlEvent::end_tag("e", 0),
            ]
        );
    }

    #[test]
    fn test_truncated_entity_at_end_of_stream() {
        let err = parse_events(b"<e>&am").unwrap_err();
        assert!(matches!(
            err,
            ParseError::IncompleteConstruct {
                construct: Construct::EntityReference,
                offset: 3
            }
        ));
    }

    #[test]
    fn test_entity_straddling_refill() {
        let input = b"<expr>a &amp;&amp; b &lt; c</expr>";
        let whole = coalesce(parse_events(input).unwrap());
        for chunk in 1..6 {
            let split = coalesce(parse_events_chunked(input, 16, chunk).unwrap());
            assert_eq!(split, whole, "chunk size {chunk}");
        }
    }

    #[test]
    fn test_long_text_is_split_at_buffer_size() {
        let mut input = b"<t>".to_vec();
        input.extend(std::iter::repeat(b'x').take(40));
        input.extend_from_slice(b"</t>");

        let events = parse_events_chunked(&input, 16, 16).unwrap();
        let text: usize = events
            .iter()
            .map(|e| match e {
                XmlEvent::Text(t) => t.len(),
                _ => 0,
            })
            .sum();
        assert_eq!(text, 40);
        assert!(events.iter().filter(|e| matches!(e, XmlEvent::Text(_))).count() > 1);
        assert_eq!(events.last(), Some(&XmlEvent::end_tag("t", 0)));
    }
}
