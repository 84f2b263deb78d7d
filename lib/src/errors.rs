//! Error types for serialization and for the external-tool parser bridge.
//!
//! Every failure mode callers need to tell apart gets its own variant with
//! enough context to diagnose without re-deriving state: the offending term
//! kind, the resolved command string, captured stderr, or the required versus
//! found version.

use semver::Version;
use std::fmt;
use std::time::Duration;

/// Failures raised while serializing a graph.
#[derive(Debug)]
pub enum SerializeError {
    /// The serializer was asked to produce a syntax it does not implement.
    UnsupportedFormat { requested: String },
    /// A graph term has no rendering in the target syntax.
    UnsupportedValueKind { kind: String },
}

impl fmt::Display for SerializeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SerializeError::UnsupportedFormat { requested } => {
                write!(f, "ntriples serializer does not support: {requested}")
            }
            SerializeError::UnsupportedValueKind { kind } => {
                write!(f, "unable to serialize value of kind '{kind}' to ntriples")
            }
        }
    }
}

impl std::error::Error for SerializeError {}

/// Failures raised while parsing RDF through the external tool, including
/// construction-time checks of the tool itself.
#[derive(Debug)]
pub enum ParseError {
    /// The configured executable could not be located or started.
    ToolNotFound { command: String },
    /// The executable exists but reports a version below the required floor.
    ToolVersionTooOld { required: Version, found: String },
    /// Input arrives on standard input but no base URI was supplied.
    MissingBaseUri,
    /// The subprocess ran but exited nonzero.
    ToolExecutionFailed {
        command: String,
        format: String,
        stderr: String,
    },
    /// The subprocess did not finish within the configured bound.
    ToolTimedOut { command: String, timeout: Duration },
    /// A line of N-Triples text did not match the grammar.
    Syntax { line: usize, message: String },
    /// Pipe plumbing around the subprocess failed.
    Io(std::io::Error),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ParseError::ToolNotFound { command } => {
                write!(f, "Failed to execute the command '{command}'")
            }
            ParseError::ToolVersionTooOld { required, found } => {
                write!(
                    f,
                    "Version {required} or higher of rapper is required. Found: {found}"
                )
            }
            ParseError::MissingBaseUri => {
                write!(
                    f,
                    "rapper requires a base URI when reading from standard input"
                )
            }
            ParseError::ToolExecutionFailed {
                command,
                format,
                stderr,
            } => {
                write!(
                    f,
                    "Error while executing command {command} (input format '{format}'): {stderr}"
                )
            }
            ParseError::ToolTimedOut { command, timeout } => {
                write!(
                    f,
                    "Command '{command}' did not finish within {}s",
                    timeout.as_secs()
                )
            }
            ParseError::Syntax { line, message } => {
                write!(f, "failed to parse ntriples on line {line}: {message}")
            }
            ParseError::Io(err) => write!(f, "subprocess I/O failed: {err}"),
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ParseError {
    fn from(err: std::io::Error) -> Self {
        ParseError::Io(err)
    }
}
