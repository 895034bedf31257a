//! srcFacts report
//!
//! Counts a handful of srcML elements and text statistics in a single pass
//! and renders them as a Markdown table.

use std::fmt;
use std::io::Read;

use memchr::memchr_iter;
use tracing::debug;

use crate::config::TokenizerConfig;
use crate::core::error::ParseResult;
use crate::core::handler::XmlHandler;
use crate::core::qname::QName;
use crate::core::tokenizer::Tokenizer;

/// Accumulated statistics for one srcML document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Facts {
    /// Value of the last `url` attribute seen
    pub url: String,
    /// Bytes of srcML read
    pub srcml_bytes: u64,
    /// `unit` elements nested below the root unit
    pub files: u64,
    /// Newlines in character data and CDATA
    pub loc: u64,
    /// Bytes of character data and CDATA, one per decoded entity
    pub characters: u64,
    pub classes: u64,
    pub functions: u64,
    pub declarations: u64,
    pub expressions: u64,
    /// `comment` elements (source comments, not XML comments)
    pub comments: u64,
}

impl Facts {
    pub fn new() -> Self {
        Self::default()
    }

    fn count_text(&mut self, content: &[u8]) {
        self.characters += content.len() as u64;
        self.loc += memchr_iter(b'\n', content).count() as u64;
    }
}

impl XmlHandler for Facts {
    fn start_tag(&mut self, name: QName<'_>, depth: i32) {
        match name.local_name {
            b"expr" => self.expressions += 1,
            b"function" => self.functions += 1,
            b"decl" => self.declarations += 1,
            b"class" => self.classes += 1,
            b"unit" if depth > 1 => self.files += 1,
            b"comment" => self.comments += 1,
            _ => {}
        }
    }

    fn attribute(&mut self, name: QName<'_>, value: &[u8]) {
        if name.local_name == b"url" {
            self.url = String::from_utf8_lossy(value).into_owned();
        }
    }

    fn cdata(&mut self, content: &[u8]) {
        self.count_text(content);
    }

    fn entity(&mut self, _decoded: u8) {
        self.characters += 1;
    }

    fn text(&mut self, content: &[u8]) {
        self.count_text(content);
    }
}

impl fmt::Display for Facts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# srcFacts: {}", self.url)?;
        writeln!(f, "| Item | Count |")?;
        writeln!(f, "|:-----|-----:|")?;
        let rows = [
            ("srcML", self.srcml_bytes),
            ("files", self.files),
            ("LOC", self.loc),
            ("characters", self.characters),
            ("classes", self.classes),
            ("functions", self.functions),
            ("declarations", self.declarations),
            ("expressions", self.expressions),
            ("comments", self.comments),
        ];
        for (item, count) in rows {
            writeln!(f, "| {item} | {count} |")?;
        }
        Ok(())
    }
}

/// Tokenize a srcML stream and gather its facts
pub fn summarize<R: Read>(reader: R, config: &TokenizerConfig) -> ParseResult<Facts> {
    let mut tokenizer = Tokenizer::with_config(reader, config);
    let mut facts = Facts::new();
    tokenizer.parse(&mut facts)?;
    facts.srcml_bytes = tokenizer.total_bytes_read();
    debug!(
        bytes = facts.srcml_bytes,
        files = facts.files,
        loc = facts.loc,
        "summarized"
    );
    Ok(facts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::ParseError;
    use crate::core::test_util::ChunkedReader;
    use pretty_assertions::assert_eq;
    use std::io::Cursor;

    const ARCHIVE: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<unit xmlns="http://www.srcML.org/srcML/src" revision="1.0.0" url="project">
<unit revision="1.0.0" language="C++" filename="a.cpp"><class>class <name>A</name> <block>{<private type="default">
</private>}</block>;</class>
<comment type="line">// x &lt; y</comment>
<function><type><name>int</name></type> <name>f</name><parameter_list>()</parameter_list> <block>{<block_content>
    <return>return <expr><literal type="number">1</literal></expr>;</return>
</block_content>}</block></function>
</unit>
<unit revision="1.0.0" language="C++" filename="b.cpp"><decl_stmt><decl><type><name>int</name></type> <name>x</name> <init>= <expr><name>y</name></expr></init></decl>;</decl_stmt>
</unit>
</unit>
"#;

    #[test]
    fn test_archive_counts() {
        let facts = summarize(Cursor::new(ARCHIVE), &TokenizerConfig::default()).unwrap();

        assert_eq!(facts.url, "project");
        assert_eq!(facts.srcml_bytes, ARCHIVE.len() as u64);
        assert_eq!(facts.files, 2);
        assert_eq!(facts.classes, 1);
        assert_eq!(facts.functions, 1);
        assert_eq!(facts.declarations, 1);
        assert_eq!(facts.expressions, 2);
        assert_eq!(facts.comments, 1);
    }

    #[test]
    fn test_loc_and_characters() {
        let input = "<unit><expr>a &amp;&amp;\nb</expr><![CDATA[x\ny]]></unit>";
        let facts = summarize(Cursor::new(input), &TokenizerConfig::default()).unwrap();

        // "a " + 2 entities + "\nb" + "x\ny"
        assert_eq!(facts.characters, 2 + 2 + 2 + 3);
        assert_eq!(facts.loc, 2);
        assert_eq!(facts.files, 0);
    }

    #[test]
    fn test_outside_whitespace_is_not_counted() {
        let facts = summarize(Cursor::new("\n\n<unit/>\n"), &TokenizerConfig::default()).unwrap();
        assert_eq!(facts.loc, 0);
        assert_eq!(facts.characters, 0);
    }

    #[test]
    fn test_small_buffer_same_facts() {
        let whole = summarize(Cursor::new(ARCHIVE), &TokenizerConfig::default()).unwrap();
        let config = TokenizerConfig::default().with_buffer_capacity(128);
        let split = summarize(ChunkedReader::new(ARCHIVE.as_bytes(), 5), &config).unwrap();
        assert_eq!(split, whole);
    }

    #[test]
    fn test_error_propagates() {
        let err = summarize(Cursor::new("<unit><expr"), &TokenizerConfig::default()).unwrap_err();
        assert!(matches!(err, ParseError::IncompleteConstruct { .. }));
    }

    #[test]
    fn test_report_format() {
        let facts = Facts {
            url: "demo".into(),
            srcml_bytes: 120,
            files: 1,
            loc: 3,
            characters: 40,
            classes: 0,
            functions: 1,
            declarations: 2,
            expressions: 4,
            comments: 0,
        };
        assert_eq!(
            facts.to_string(),
            "# srcFacts: demo\n\
             | Item | Count |\n\
             |:-----|-----:|\n\
             | srcML | 120 |\n\
             | files | 1 |\n\
             | LOC | 3 |\n\
             | characters | 40 |\n\
             | classes | 0 |\n\
             | functions | 1 |\n\
             | declarations | 2 |\n\
             | expressions | 4 |\n\
             | comments | 0 |\n"
        );
    }
}
