//! Names for the RDF serializations the toolkit knows about.
//!
//! The string forms double as rapper's `--input`/`--output` format names.

use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Syntax {
    NTriples,
    RdfXml,
    Turtle,
    TriG,
    NQuads,
    RdfA,
    /// Let the tool sniff the input serialization.
    Guess,
}

impl Syntax {
    pub fn as_str(&self) -> &'static str {
        match self {
            Syntax::NTriples => "ntriples",
            Syntax::RdfXml => "rdfxml",
            Syntax::Turtle => "turtle",
            Syntax::TriG => "trig",
            Syntax::NQuads => "nquads",
            Syntax::RdfA => "rdfa",
            Syntax::Guess => "guess",
        }
    }
}

impl fmt::Display for Syntax {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Syntax {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ntriples" | "nt" => Ok(Syntax::NTriples),
            "rdfxml" | "xml" => Ok(Syntax::RdfXml),
            "turtle" | "ttl" => Ok(Syntax::Turtle),
            "trig" => Ok(Syntax::TriG),
            "nquads" | "nq" => Ok(Syntax::NQuads),
            "rdfa" => Ok(Syntax::RdfA),
            "guess" => Ok(Syntax::Guess),
            other => Err(format!("unknown RDF syntax: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_names() {
        for syntax in [
            Syntax::NTriples,
            Syntax::RdfXml,
            Syntax::Turtle,
            Syntax::TriG,
            Syntax::NQuads,
            Syntax::RdfA,
            Syntax::Guess,
        ] {
            assert_eq!(syntax.as_str().parse::<Syntax>(), Ok(syntax));
        }
    }

    #[test]
    fn accepts_file_extension_aliases() {
        assert_eq!("ttl".parse::<Syntax>(), Ok(Syntax::Turtle));
        assert_eq!("nt".parse::<Syntax>(), Ok(Syntax::NTriples));
        assert!("n5".parse::<Syntax>().is_err());
    }
}
