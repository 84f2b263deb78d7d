//! The N-Triples serializer.
//!
//! Emits one `subject predicate object .` line per triple with LF endings
//! and the exact escaping rules of [`crate::escape`]. Output is
//! deterministic: the accessor's subject/predicate/value order is reproduced
//! as-is, so an unmodified graph always serializes to the same bytes. That
//! property is what makes the format usable for diffing and
//! content-addressed storage.

use crate::consts::BNODE_PREFIX;
use crate::errors::SerializeError;
use crate::escape::{escape_iri, escape_literal};
use crate::graph::GraphAccess;
use crate::syntax::Syntax;
use crate::term::Term;

#[derive(Debug, Default, Clone, Copy)]
pub struct NtriplesSerializer;

impl NtriplesSerializer {
    pub fn new() -> Self {
        NtriplesSerializer
    }

    /// Serialize one resource string: blank nodes (text starting with `_:`)
    /// are emitted bare, anything else is wrapped in angle brackets. Both
    /// go through the IRI escape table.
    fn serialize_resource(&self, resource: &str) -> String {
        let escaped = escape_iri(resource);
        if resource.starts_with(BNODE_PREFIX) {
            escaped
        } else {
            format!("<{escaped}>")
        }
    }

    /// Serialize a single term into its N-Triples textual form.
    ///
    /// Literals are quoted after literal-escaping, then suffixed with
    /// `@lang` (verbatim, tags are assumed grammar-valid) or
    /// `^^<datatype>`, never both. A term the format cannot express fails
    /// with [`SerializeError::UnsupportedValueKind`].
    pub fn serialize_term(&self, term: &Term) -> Result<String, SerializeError> {
        match term {
            Term::Iri(iri) => Ok(self.serialize_resource(iri)),
            Term::BlankNode(label) => {
                Ok(self.serialize_resource(&format!("{BNODE_PREFIX}{label}")))
            }
            Term::Literal(literal) => {
                let escaped = escape_literal(literal.value());
                if let Some(language) = literal.language() {
                    Ok(format!("\"{escaped}\"@{language}"))
                } else if let Some(datatype) = literal.datatype() {
                    Ok(format!("\"{escaped}\"^^<{}>", escape_iri(datatype)))
                } else {
                    Ok(format!("\"{escaped}\""))
                }
            }
            other => Err(SerializeError::UnsupportedValueKind {
                kind: other.kind().to_string(),
            }),
        }
    }

    /// Serialize `graph` in the requested syntax.
    ///
    /// Only [`Syntax::NTriples`] is implemented; any other request fails
    /// with [`SerializeError::UnsupportedFormat`] before any output is
    /// produced. A term error aborts the whole serialization; no partial
    /// string is returned.
    pub fn serialize(
        &self,
        graph: &dyn GraphAccess,
        syntax: Syntax,
    ) -> Result<String, SerializeError> {
        if syntax != Syntax::NTriples {
            return Err(SerializeError::UnsupportedFormat {
                requested: syntax.as_str().to_string(),
            });
        }
        let mut out = String::new();
        for subject in graph.subjects() {
            let subject_text = self.serialize_resource(&subject.text());
            for predicate in graph.predicates(subject) {
                for object in graph.objects(subject, predicate) {
                    out.push_str(&subject_text);
                    out.push(' ');
                    out.push('<');
                    out.push_str(&escape_iri(predicate));
                    out.push_str("> ");
                    out.push_str(&self.serialize_term(object)?);
                    out.push_str(" .\n");
                }
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::MemoryGraph;
    use crate::term::{Literal, Resource, Triple};

    fn ser() -> NtriplesSerializer {
        NtriplesSerializer::new()
    }

    #[test]
    fn empty_graph_serializes_to_empty_string() {
        let graph = MemoryGraph::new();
        assert_eq!(ser().serialize(&graph, Syntax::NTriples).unwrap(), "");
    }

    #[test]
    fn quotes_are_escaped_in_literals() {
        let mut graph = MemoryGraph::new();
        graph.insert(Triple::new(
            Resource::iri("http://example.org/s"),
            "http://example.org/p",
            Term::literal("a\"b"),
        ));
        assert_eq!(
            ser().serialize(&graph, Syntax::NTriples).unwrap(),
            "<http://example.org/s> <http://example.org/p> \"a\\\"b\" .\n"
        );
    }

    #[test]
    fn language_tag_and_datatype_render_separately() {
        assert_eq!(
            ser()
                .serialize_term(&Term::Literal(Literal::with_language("value", "en")))
                .unwrap(),
            "\"value\"@en"
        );
        assert_eq!(
            ser()
                .serialize_term(&Term::Literal(Literal::with_datatype(
                    "value",
                    "http://example.org/t"
                )))
                .unwrap(),
            "\"value\"^^<http://example.org/t>"
        );
    }

    #[test]
    fn blank_node_subject_has_no_angle_brackets() {
        let mut graph = MemoryGraph::new();
        graph.insert(Triple::new(
            Resource::blank("genid1"),
            "http://example.org/p",
            Term::iri("http://example.org/o"),
        ));
        assert_eq!(
            ser().serialize(&graph, Syntax::NTriples).unwrap(),
            "_:genid1 <http://example.org/p> <http://example.org/o> .\n"
        );
    }

    #[test]
    fn forbidden_iri_characters_are_escaped_in_place() {
        assert_eq!(
            ser().serialize_term(&Term::iri("http://example.org/a^b")).unwrap(),
            "<http://example.org/a\\u005Eb>"
        );
        assert_eq!(
            ser()
                .serialize_term(&Term::Literal(Literal::with_datatype(
                    "v",
                    "http://example.org/t`y"
                )))
                .unwrap(),
            "\"v\"^^<http://example.org/t\\u0060y>"
        );
    }

    #[test]
    fn unsupported_syntax_is_rejected() {
        let graph = MemoryGraph::new();
        match ser().serialize(&graph, Syntax::Turtle) {
            Err(SerializeError::UnsupportedFormat { requested }) => {
                assert_eq!(requested, "turtle")
            }
            other => panic!("expected UnsupportedFormat, got {other:?}"),
        }
    }

    #[test]
    fn quoted_triple_term_is_unsupported() {
        let mut graph = MemoryGraph::new();
        let quoted = Term::Triple(Box::new(Triple::new(
            Resource::iri("http://example.org/s"),
            "http://example.org/p",
            Term::literal("o"),
        )));
        graph.insert(Triple::new(
            Resource::iri("http://example.org/s"),
            "http://example.org/p",
            quoted,
        ));
        match ser().serialize(&graph, Syntax::NTriples) {
            Err(SerializeError::UnsupportedValueKind { kind }) => assert_eq!(kind, "triple"),
            other => panic!("expected UnsupportedValueKind, got {other:?}"),
        }
    }

    #[test]
    fn serialization_is_deterministic() {
        let mut graph = MemoryGraph::new();
        graph.insert(Triple::new(
            Resource::iri("http://example.org/b"),
            "http://example.org/p",
            Term::literal("1"),
        ));
        graph.insert(Triple::new(
            Resource::iri("http://example.org/a"),
            "http://example.org/q",
            Term::Literal(Literal::with_language("zwei", "de")),
        ));
        graph.insert(Triple::new(
            Resource::iri("http://example.org/b"),
            "http://example.org/p",
            Term::blank("b0"),
        ));
        let first = ser().serialize(&graph, Syntax::NTriples).unwrap();
        let second = ser().serialize(&graph, Syntax::NTriples).unwrap();
        assert_eq!(first, second);
        assert_eq!(
            first,
            "<http://example.org/b> <http://example.org/p> \"1\" .\n\
             <http://example.org/b> <http://example.org/p> _:b0 .\n\
             <http://example.org/a> <http://example.org/q> \"zwei\"@de .\n"
        );
    }
}
