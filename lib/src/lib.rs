//! N-Triples serialization and external-tool RDF parsing for graph toolkits.
//!
//! Two pieces where a subtle bug silently corrupts data: the canonical
//! N-Triples serializer, whose contract is a bit-exact character-escaping
//! grammar, and the bridge that parses other RDF serializations by shelling
//! out to the Raptor `rapper` tool, validating its availability and version
//! and translating subprocess outcomes into triples or structured errors.
//!
//! ```no_run
//! use rdfbridge::{MemoryGraph, NtriplesSerializer, RapperParser, Syntax};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let parser = RapperParser::new()?;
//! let mut graph = MemoryGraph::new();
//! let count = parser.parse(
//!     &mut graph,
//!     b"<rdf:RDF xmlns:rdf=\"http://www.w3.org/1999/02/22-rdf-syntax-ns#\"/>",
//!     Syntax::RdfXml,
//!     "http://example.org/doc.rdf",
//! )?;
//! println!("parsed {count} triples");
//!
//! let text = NtriplesSerializer::new().serialize(&graph, Syntax::NTriples)?;
//! print!("{text}");
//! # Ok(())
//! # }
//! ```

pub mod consts;
pub mod errors;
pub mod escape;
pub mod graph;
pub mod rapper;
pub mod reader;
pub mod runner;
pub mod serializer;
pub mod syntax;
pub mod term;

pub use errors::{ParseError, SerializeError};
pub use graph::{GraphAccess, MemoryGraph};
pub use rapper::{RapperOptions, RapperParser};
pub use runner::{CommandRunner, RunOutput, SystemRunner};
pub use serializer::NtriplesSerializer;
pub use syntax::Syntax;
pub use term::{Literal, Resource, Term, Triple};
