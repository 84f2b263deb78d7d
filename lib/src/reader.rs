//! Line-oriented reader for N-Triples text.
//!
//! Consumes the exact grammar the serializer emits, which is also what the
//! rapper bridge receives on the external tool's standard output. Blank
//! lines and `#` comments are skipped; any other line must hold one
//! complete `subject predicate object .` statement.

use crate::consts::BNODE_PREFIX;
use crate::errors::ParseError;
use crate::graph::GraphAccess;
use crate::term::{Literal, Resource, Term, Triple};

/// Parse N-Triples text into triples.
///
/// All-or-nothing: the first malformed line fails the whole document with
/// [`ParseError::Syntax`] naming the 1-based line number.
pub fn read_ntriples(text: &str) -> Result<Vec<Triple>, ParseError> {
    let mut triples = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let mut parser = LineParser {
            rest: line,
            line: idx + 1,
        };
        triples.push(parser.parse_statement()?);
    }
    Ok(triples)
}

/// Parse N-Triples text and add every triple to `graph`, returning the
/// number added. The graph is untouched if parsing fails.
pub fn parse_into(graph: &mut dyn GraphAccess, text: &str) -> Result<usize, ParseError> {
    let triples = read_ntriples(text)?;
    let count = triples.len();
    for triple in triples {
        graph.insert(triple);
    }
    Ok(count)
}

struct LineParser<'a> {
    rest: &'a str,
    line: usize,
}

impl<'a> LineParser<'a> {
    fn err(&self, message: impl Into<String>) -> ParseError {
        ParseError::Syntax {
            line: self.line,
            message: message.into(),
        }
    }

    fn skip_ws(&mut self) {
        self.rest = self.rest.trim_start_matches([' ', '\t']);
    }

    fn parse_statement(&mut self) -> Result<Triple, ParseError> {
        let subject = self.parse_resource()?;
        self.skip_ws();
        let predicate = self.parse_iri()?;
        self.skip_ws();
        let object = self.parse_object()?;
        self.skip_ws();
        self.rest = self
            .rest
            .strip_prefix('.')
            .ok_or_else(|| self.err("expected '.' terminating the statement"))?;
        self.skip_ws();
        if !self.rest.is_empty() {
            return Err(self.err(format!("trailing data after '.': {:?}", self.rest)));
        }
        Ok(Triple::new(subject, predicate, object))
    }

    fn parse_iri(&mut self) -> Result<String, ParseError> {
        let rest = self
            .rest
            .strip_prefix('<')
            .ok_or_else(|| self.err("expected '<'"))?;
        let end = rest
            .find('>')
            .ok_or_else(|| self.err("unterminated IRI"))?;
        let iri = unescape(&rest[..end], self.line)?;
        self.rest = &rest[end + 1..];
        Ok(iri)
    }

    fn parse_bnode_label(&mut self) -> Result<String, ParseError> {
        let rest = match self.rest.strip_prefix(BNODE_PREFIX) {
            Some(rest) => rest,
            None => return Err(self.err("expected '_:'")),
        };
        let end = rest
            .find(|c: char| !(c.is_alphanumeric() || c == '_' || c == '-'))
            .unwrap_or(rest.len());
        if end == 0 {
            return Err(self.err("empty blank node label"));
        }
        let label = rest[..end].to_string();
        self.rest = &rest[end..];
        Ok(label)
    }

    fn parse_resource(&mut self) -> Result<Resource, ParseError> {
        if self.rest.starts_with(BNODE_PREFIX) {
            Ok(Resource::BlankNode(self.parse_bnode_label()?))
        } else {
            Ok(Resource::Iri(self.parse_iri()?))
        }
    }

    fn parse_object(&mut self) -> Result<Term, ParseError> {
        if self.rest.starts_with('"') {
            self.parse_literal()
        } else if self.rest.starts_with(BNODE_PREFIX) {
            Ok(Term::BlankNode(self.parse_bnode_label()?))
        } else if self.rest.starts_with('<') {
            Ok(Term::Iri(self.parse_iri()?))
        } else {
            Err(self.err(format!("unrecognised object term: {:?}", self.rest)))
        }
    }

    fn parse_literal(&mut self) -> Result<Term, ParseError> {
        let rest = self
            .rest
            .strip_prefix('"')
            .ok_or_else(|| self.err("expected '\"'"))?;
        // find the closing quote, honouring backslash escapes
        let mut escaped = false;
        let mut end = None;
        for (i, c) in rest.char_indices() {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                end = Some(i);
                break;
            }
        }
        let end = end.ok_or_else(|| self.err("unterminated literal"))?;
        let value = unescape(&rest[..end], self.line)?;
        self.rest = &rest[end + 1..];

        if let Some(rest) = self.rest.strip_prefix('@') {
            let end = rest
                .find(|c: char| !(c.is_ascii_alphanumeric() || c == '-'))
                .unwrap_or(rest.len());
            if end == 0 {
                return Err(self.err("empty language tag"));
            }
            let language = rest[..end].to_string();
            self.rest = &rest[end..];
            Ok(Term::Literal(Literal::with_language(value, language)))
        } else if let Some(rest) = self.rest.strip_prefix("^^") {
            self.rest = rest;
            let datatype = self.parse_iri()?;
            Ok(Term::Literal(Literal::with_datatype(value, datatype)))
        } else {
            Ok(Term::Literal(Literal::plain(value)))
        }
    }
}

/// Decode the N-Triples escape sequences `\t \b \n \r \f \" \' \\`,
/// `\uXXXX` and `\UXXXXXXXX`.
fn unescape(input: &str, line: usize) -> Result<String, ParseError> {
    let syntax = |message: String| ParseError::Syntax { line, message };
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('b') => out.push('\u{8}'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\u{C}'),
            Some('"') => out.push('"'),
            Some('\'') => out.push('\''),
            Some('\\') => out.push('\\'),
            Some('u') => out.push(hex_escape(&mut chars, 4, line)?),
            Some('U') => out.push(hex_escape(&mut chars, 8, line)?),
            Some(other) => {
                return Err(syntax(format!("unknown escape sequence '\\{other}'")));
            }
            None => return Err(syntax("dangling backslash".to_string())),
        }
    }
    Ok(out)
}

fn hex_escape(chars: &mut std::str::Chars<'_>, digits: u32, line: usize) -> Result<char, ParseError> {
    let syntax = |message: String| ParseError::Syntax { line, message };
    let mut code = 0u32;
    for _ in 0..digits {
        let c = chars
            .next()
            .ok_or_else(|| syntax("truncated numeric escape".to_string()))?;
        let digit = c
            .to_digit(16)
            .ok_or_else(|| syntax(format!("invalid hex digit '{c}' in numeric escape")))?;
        code = code * 16 + digit;
    }
    char::from_u32(code).ok_or_else(|| syntax(format!("escape U+{code:04X} is not a character")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::MemoryGraph;

    #[test]
    fn reads_resource_and_literal_objects() {
        let text = "<http://example.org/s> <http://example.org/p> <http://example.org/o> .\n\
                    <http://example.org/s> <http://example.org/p> \"plain\" .\n\
                    _:b0 <http://example.org/p> \"bonjour\"@fr .\n\
                    <http://example.org/s> <http://example.org/p> \"5\"^^<http://www.w3.org/2001/XMLSchema#integer> .\n";
        let triples = read_ntriples(text).unwrap();
        assert_eq!(triples.len(), 4);
        assert_eq!(triples[0].object, Term::iri("http://example.org/o"));
        assert_eq!(triples[1].object, Term::literal("plain"));
        assert_eq!(triples[2].subject, Resource::blank("b0"));
        assert_eq!(
            triples[2].object,
            Term::Literal(Literal::with_language("bonjour", "fr"))
        );
        assert_eq!(
            triples[3].object,
            Term::Literal(Literal::with_datatype(
                "5",
                "http://www.w3.org/2001/XMLSchema#integer"
            ))
        );
    }

    #[test]
    fn skips_comments_and_blank_lines() {
        let text = "# a comment\n\n<http://example.org/s> <http://example.org/p> \"v\" .\n   \n";
        assert_eq!(read_ntriples(text).unwrap().len(), 1);
    }

    #[test]
    fn decodes_escape_sequences() {
        let text = "<http://example.org/s> <http://example.org/p> \"line\\nbreak \\\"q\\\" \\u00E9 \\U0001F600\" .\n";
        let triples = read_ntriples(text).unwrap();
        assert_eq!(
            triples[0].object,
            Term::literal("line\nbreak \"q\" é \u{1F600}")
        );
    }

    #[test]
    fn reports_line_numbers_on_failure() {
        let text = "<http://example.org/s> <http://example.org/p> \"v\" .\nnot a triple\n";
        match read_ntriples(text) {
            Err(ParseError::Syntax { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected syntax error, got {other:?}"),
        }
    }

    #[test]
    fn rejects_missing_terminator() {
        let text = "<http://example.org/s> <http://example.org/p> \"v\"\n";
        assert!(matches!(
            read_ntriples(text),
            Err(ParseError::Syntax { line: 1, .. })
        ));
    }

    #[test]
    fn parse_into_counts_and_commits() {
        let mut graph = MemoryGraph::new();
        let count = parse_into(
            &mut graph,
            "<http://example.org/s> <http://example.org/p> \"v\" .\n",
        )
        .unwrap();
        assert_eq!(count, 1);
        assert_eq!(graph.len(), 1);
    }

    #[test]
    fn empty_document_yields_zero_triples() {
        let mut graph = MemoryGraph::new();
        assert_eq!(parse_into(&mut graph, "").unwrap(), 0);
        assert!(graph.is_empty());
    }

    #[test]
    fn round_trips_serializer_output() {
        use crate::serializer::NtriplesSerializer;
        use crate::syntax::Syntax;

        let mut graph = MemoryGraph::new();
        graph.insert(Triple::new(
            Resource::iri("http://example.org/s"),
            "http://example.org/p",
            Term::literal("multi\nline \"quoted\" \\slash"),
        ));
        graph.insert(Triple::new(
            Resource::blank("b0"),
            "http://example.org/p",
            Term::Literal(Literal::with_language("hi", "en")),
        ));
        let text = NtriplesSerializer::new()
            .serialize(&graph, Syntax::NTriples)
            .unwrap();
        let reparsed = read_ntriples(&text).unwrap();
        assert_eq!(reparsed, graph.triples());
    }
}
