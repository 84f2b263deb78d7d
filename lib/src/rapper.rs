//! Parser bridge that shells out to the Raptor `rapper` tool.
//!
//! Construction checks that the configured executable exists and reports a
//! recent enough version; each `parse` call then converts one RDF document
//! to N-Triples through a fresh subprocess and loads the result into a
//! graph. A constructed bridge holds no per-call state, so repeated or
//! concurrent `parse` calls are safe as long as each owns its subprocess.

use crate::consts::{DEFAULT_RAPPER_COMMAND, MIN_RAPPER_VERSION};
use crate::errors::ParseError;
use crate::graph::GraphAccess;
use crate::reader::read_ntriples;
use crate::runner::{CommandRunner, SystemRunner};
use crate::syntax::Syntax;
use lazy_static::lazy_static;
use log::{debug, info};
use regex::Regex;
use semver::Version;
use std::time::Duration;

lazy_static! {
    /// First dotted version token in the tool's `--version` output.
    static ref VERSION_TOKEN: Regex = Regex::new(r"(\d+)\.(\d+)(?:\.(\d+))?").unwrap();
    static ref MINIMUM_VERSION: Version = Version::parse(MIN_RAPPER_VERSION).unwrap();
}

/// Options controlling how the bridge reaches the external tool.
#[derive(Debug, Clone)]
pub struct RapperOptions {
    /// Executable name or path to invoke.
    pub command: String,
    /// Wall-clock bound applied to every subprocess run.
    pub timeout: Duration,
}

impl Default for RapperOptions {
    fn default() -> Self {
        Self {
            command: DEFAULT_RAPPER_COMMAND.to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

/// A verified handle on the external tool.
///
/// Only successful construction yields a usable bridge; a failed version
/// check leaves nothing behind to misuse.
pub struct RapperParser<R = SystemRunner> {
    options: RapperOptions,
    runner: R,
    version: Version,
}

impl RapperParser<SystemRunner> {
    /// Locate `rapper` on the default path and verify its version.
    pub fn new() -> Result<Self, ParseError> {
        Self::with_options(RapperOptions::default(), SystemRunner)
    }

    /// Use a specific executable name or path.
    pub fn with_command(command: impl Into<String>) -> Result<Self, ParseError> {
        let options = RapperOptions {
            command: command.into(),
            ..RapperOptions::default()
        };
        Self::with_options(options, SystemRunner)
    }

    /// Construct from options, running commands through the system.
    pub fn from_options(options: RapperOptions) -> Result<Self, ParseError> {
        Self::with_options(options, SystemRunner)
    }
}

impl<R: CommandRunner> RapperParser<R> {
    /// Construct against an explicit runner; the seam tests use to stand in
    /// for a real subprocess.
    pub fn with_options(options: RapperOptions, runner: R) -> Result<Self, ParseError> {
        let output = runner.run(
            &options.command,
            &["--version".to_string()],
            &[],
            options.timeout,
        )?;
        if !output.success() {
            return Err(ParseError::ToolNotFound {
                command: options.command,
            });
        }
        let reported = output.stdout_text().trim().to_string();
        let version = parse_tool_version(&reported)?;
        if version < *MINIMUM_VERSION {
            return Err(ParseError::ToolVersionTooOld {
                required: MINIMUM_VERSION.clone(),
                found: version.to_string(),
            });
        }
        debug!("Using {} {}", options.command, version);
        Ok(Self {
            options,
            runner,
            version,
        })
    }

    /// Version the tool reported at construction time.
    pub fn version(&self) -> &Version {
        &self.version
    }

    /// The resolved command string.
    pub fn command(&self) -> &str {
        &self.options.command
    }

    /// Convert `data` from `syntax` into triples and add them to `graph`,
    /// returning the number added.
    ///
    /// Input always travels over the subprocess's standard input, so a
    /// non-empty `base_uri` is required up front; without it the tool would
    /// fail in far less obvious ways. An empty but well-formed document
    /// yields `Ok(0)`. The graph is only touched once the whole tool output
    /// has parsed cleanly.
    pub fn parse(
        &self,
        graph: &mut dyn GraphAccess,
        data: &[u8],
        syntax: Syntax,
        base_uri: &str,
    ) -> Result<usize, ParseError> {
        if base_uri.is_empty() {
            return Err(ParseError::MissingBaseUri);
        }
        let args: Vec<String> = [
            "--quiet",
            "--input",
            syntax.as_str(),
            "--output",
            "ntriples",
            "--ignore-errors",
            "--input-uri",
            base_uri,
            "-",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();
        let output = self
            .runner
            .run(&self.options.command, &args, data, self.options.timeout)?;
        if !output.success() {
            return Err(ParseError::ToolExecutionFailed {
                command: self.options.command.clone(),
                format: syntax.as_str().to_string(),
                stderr: output.stderr_text(),
            });
        }
        let triples = read_ntriples(&output.stdout_text())?;
        let count = triples.len();
        for triple in triples {
            graph.insert(triple);
        }
        info!("Added {} triples parsed from {} input", count, syntax);
        Ok(count)
    }
}

fn parse_tool_version(reported: &str) -> Result<Version, ParseError> {
    let caps = VERSION_TOKEN
        .captures(reported)
        .ok_or_else(|| ParseError::ToolVersionTooOld {
            required: MINIMUM_VERSION.clone(),
            found: reported.to_string(),
        })?;
    let component = |i: usize| {
        caps.get(i)
            .and_then(|m| m.as_str().parse::<u64>().ok())
            .unwrap_or(0)
    };
    Ok(Version::new(component(1), component(2), component(3)))
}
