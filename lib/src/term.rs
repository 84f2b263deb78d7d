//! RDF terms and triples.
//!
//! Subjects are [`Resource`]s (a URI reference or a blank-node label) and
//! objects are [`Term`]s; predicates are always URI references and are kept
//! as plain strings. Literals carry at most one of a language tag or a
//! datatype, enforced by construction.

use crate::consts::BNODE_PREFIX;

/// A node that may appear in the subject position: a URI reference or a
/// blank node scoped to one parsing/serialization session.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Resource {
    Iri(String),
    /// Blank-node label, stored without the `_:` marker.
    BlankNode(String),
}

impl Resource {
    pub fn iri(value: impl Into<String>) -> Self {
        Resource::Iri(value.into())
    }

    pub fn blank(label: impl Into<String>) -> Self {
        Resource::BlankNode(label.into())
    }

    /// Textual form: the IRI itself, or the label with its `_:` marker.
    pub fn text(&self) -> String {
        match self {
            Resource::Iri(iri) => iri.clone(),
            Resource::BlankNode(label) => format!("{BNODE_PREFIX}{label}"),
        }
    }
}

/// Any RDF value that may appear in the object position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Term {
    Iri(String),
    /// Blank-node label, stored without the `_:` marker.
    BlankNode(String),
    Literal(Literal),
    /// An RDF-star quoted triple. The graph can hold one, but line-oriented
    /// N-Triples has no rendering for it.
    Triple(Box<Triple>),
}

impl Term {
    pub fn iri(value: impl Into<String>) -> Self {
        Term::Iri(value.into())
    }

    pub fn blank(label: impl Into<String>) -> Self {
        Term::BlankNode(label.into())
    }

    pub fn literal(value: impl Into<String>) -> Self {
        Term::Literal(Literal::plain(value))
    }

    /// Kind tag used in diagnostics, matching the RDF value-kind vocabulary.
    pub fn kind(&self) -> &'static str {
        match self {
            Term::Iri(_) => "uri",
            Term::BlankNode(_) => "bnode",
            Term::Literal(_) => "literal",
            Term::Triple(_) => "triple",
        }
    }
}

impl From<Resource> for Term {
    fn from(resource: Resource) -> Self {
        match resource {
            Resource::Iri(iri) => Term::Iri(iri),
            Resource::BlankNode(label) => Term::BlankNode(label),
        }
    }
}

/// A literal value: lexical form plus at most one of a language tag or a
/// datatype URI. Absence of both denotes a plain string literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Literal {
    value: String,
    language: Option<String>,
    datatype: Option<String>,
}

impl Literal {
    pub fn plain(value: impl Into<String>) -> Self {
        Literal {
            value: value.into(),
            language: None,
            datatype: None,
        }
    }

    /// A language-tagged literal. The tag excludes a datatype.
    pub fn with_language(value: impl Into<String>, language: impl Into<String>) -> Self {
        Literal {
            value: value.into(),
            language: Some(language.into()),
            datatype: None,
        }
    }

    /// A typed literal. The datatype excludes a language tag.
    pub fn with_datatype(value: impl Into<String>, datatype: impl Into<String>) -> Self {
        Literal {
            value: value.into(),
            language: None,
            datatype: Some(datatype.into()),
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    pub fn datatype(&self) -> Option<&str> {
        self.datatype.as_deref()
    }
}

/// One statement: subject, predicate, object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Triple {
    pub subject: Resource,
    pub predicate: String,
    pub object: Term,
}

impl Triple {
    pub fn new(subject: Resource, predicate: impl Into<String>, object: Term) -> Self {
        Triple {
            subject,
            predicate: predicate.into(),
            object,
        }
    }
}
