//! In-memory triple storage with the stable iteration order the serializer
//! relies on.
//!
//! The RDF model itself is unordered, but reproducible output needs a
//! deterministic walk: subjects in first-insertion order, predicates per
//! subject in first-insertion order, objects per predicate in insertion
//! order. [`MemoryGraph`] maintains exactly that.

use crate::term::{Resource, Term, Triple};
use std::collections::HashMap;

/// The surface the serializer and the rapper bridge need from a triple
/// store: subject-major, predicate-major grouping in a stable order, plus
/// insertion.
pub trait GraphAccess {
    /// Subjects in the order they first appeared.
    fn subjects(&self) -> Vec<&Resource>;

    /// Predicates of `subject` in the order they first appeared.
    fn predicates(&self, subject: &Resource) -> Vec<&str>;

    /// Objects of `(subject, predicate)` in insertion order.
    fn objects(&self, subject: &Resource, predicate: &str) -> &[Term];

    /// Append one triple. Duplicates are kept; the graph is a multiset.
    fn insert(&mut self, triple: Triple);

    /// Total number of triples.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone)]
struct SubjectEntry {
    subject: Resource,
    // predicate fan-out is small; a linear scan keeps first-seen order free
    predicates: Vec<(String, Vec<Term>)>,
}

/// Insertion-ordered triple store.
#[derive(Debug, Default, Clone)]
pub struct MemoryGraph {
    entries: Vec<SubjectEntry>,
    index: HashMap<Resource, usize>,
    len: usize,
}

impl MemoryGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// All triples in serialization order.
    pub fn triples(&self) -> Vec<Triple> {
        let mut out = Vec::with_capacity(self.len);
        for entry in &self.entries {
            for (predicate, objects) in &entry.predicates {
                for object in objects {
                    out.push(Triple::new(
                        entry.subject.clone(),
                        predicate.clone(),
                        object.clone(),
                    ));
                }
            }
        }
        out
    }
}

impl GraphAccess for MemoryGraph {
    fn subjects(&self) -> Vec<&Resource> {
        self.entries.iter().map(|e| &e.subject).collect()
    }

    fn predicates(&self, subject: &Resource) -> Vec<&str> {
        match self.index.get(subject) {
            Some(&i) => self.entries[i]
                .predicates
                .iter()
                .map(|(p, _)| p.as_str())
                .collect(),
            None => Vec::new(),
        }
    }

    fn objects(&self, subject: &Resource, predicate: &str) -> &[Term] {
        if let Some(&i) = self.index.get(subject) {
            for (p, objects) in &self.entries[i].predicates {
                if p == predicate {
                    return objects;
                }
            }
        }
        &[]
    }

    fn insert(&mut self, triple: Triple) {
        let Triple {
            subject,
            predicate,
            object,
        } = triple;
        let i = match self.index.get(&subject) {
            Some(&i) => i,
            None => {
                self.entries.push(SubjectEntry {
                    subject: subject.clone(),
                    predicates: Vec::new(),
                });
                let i = self.entries.len() - 1;
                self.index.insert(subject, i);
                i
            }
        };
        let entry = &mut self.entries[i];
        match entry.predicates.iter_mut().find(|(p, _)| *p == predicate) {
            Some((_, objects)) => objects.push(object),
            None => entry.predicates.push((predicate, vec![object])),
        }
        self.len += 1;
    }

    fn len(&self) -> usize {
        self.len
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triple(s: &str, p: &str, o: &str) -> Triple {
        Triple::new(Resource::iri(s), p, Term::literal(o))
    }

    #[test]
    fn preserves_insertion_order() {
        let mut graph = MemoryGraph::new();
        graph.insert(triple("http://example.org/b", "http://example.org/p1", "1"));
        graph.insert(triple("http://example.org/a", "http://example.org/p2", "2"));
        graph.insert(triple("http://example.org/b", "http://example.org/p0", "3"));
        graph.insert(triple("http://example.org/b", "http://example.org/p1", "4"));

        let subjects: Vec<String> = graph.subjects().iter().map(|s| s.text()).collect();
        assert_eq!(subjects, vec!["http://example.org/b", "http://example.org/a"]);

        let b = Resource::iri("http://example.org/b");
        assert_eq!(
            graph.predicates(&b),
            vec!["http://example.org/p1", "http://example.org/p0"]
        );
        assert_eq!(
            graph.objects(&b, "http://example.org/p1"),
            &[Term::literal("1"), Term::literal("4")]
        );
    }

    #[test]
    fn keeps_duplicate_triples() {
        let mut graph = MemoryGraph::new();
        graph.insert(triple("http://example.org/s", "http://example.org/p", "o"));
        graph.insert(triple("http://example.org/s", "http://example.org/p", "o"));
        assert_eq!(graph.len(), 2);
        assert_eq!(graph.triples().len(), 2);
    }

    #[test]
    fn unknown_subject_is_empty() {
        let graph = MemoryGraph::new();
        assert!(graph.is_empty());
        let s = Resource::iri("http://example.org/missing");
        assert!(graph.predicates(&s).is_empty());
        assert!(graph.objects(&s, "http://example.org/p").is_empty());
    }
}
