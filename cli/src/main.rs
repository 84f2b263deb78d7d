use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::info;
use rdfbridge::rapper::{RapperOptions, RapperParser};
use rdfbridge::{MemoryGraph, NtriplesSerializer, Syntax};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Parser)]
#[command(name = "rdfbridge")]
#[command(about = "Convert RDF documents to N-Triples via the Raptor rapper tool")]
#[command(arg_required_else_help = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Verbose mode - sets the RUST_LOG level to info, defaults to warning level
    #[clap(long, short, action, default_value = "false", global = true)]
    verbose: bool,
    /// Debug mode - sets the RUST_LOG level to debug, defaults to warning level
    #[clap(long, action, default_value = "false", global = true)]
    debug: bool,
    /// Name or path of the rapper executable
    #[clap(long, global = true, default_value = "rapper")]
    rapper: String,
    /// Subprocess timeout in seconds
    #[clap(long, global = true, default_value = "30")]
    timeout: u64,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Convert an RDF document to N-Triples.
    Convert {
        /// Input file; reads standard input when omitted.
        input: Option<PathBuf>,
        /// Input syntax passed to rapper.
        #[clap(long, short = 'i', default_value = "guess")]
        input_format: Syntax,
        /// Base URI used to resolve relative references. Defaults to a
        /// file:// URI when the input is a file; required for stdin.
        #[clap(long, short)]
        base_uri: Option<String>,
        /// Write the N-Triples here instead of stdout.
        #[clap(long, short)]
        output: Option<PathBuf>,
    },
    /// Verify that the rapper tool is available and recent enough.
    Check {
        /// Emit machine-readable JSON instead of text.
        #[clap(long, action)]
        json: bool,
    },
}

fn file_uri(path: &Path) -> Result<String> {
    let absolute = std::fs::canonicalize(path)
        .with_context(|| format!("Failed to resolve {}", path.display()))?;
    Ok(format!("file://{}", absolute.display()))
}

fn main() -> Result<()> {
    let cmd = Cli::parse();

    let log_level = if cmd.verbose { "info" } else { "warn" };
    let log_level = if cmd.debug { "debug" } else { log_level };
    std::env::set_var("RUST_LOG", log_level);
    env_logger::init();

    let options = RapperOptions {
        command: cmd.rapper.clone(),
        timeout: Duration::from_secs(cmd.timeout),
    };

    match cmd.command {
        Commands::Convert {
            input,
            input_format,
            base_uri,
            output,
        } => {
            let data = match &input {
                Some(path) => std::fs::read(path)
                    .with_context(|| format!("Failed to read {}", path.display()))?,
                None => {
                    let mut buf = Vec::new();
                    std::io::stdin().read_to_end(&mut buf)?;
                    buf
                }
            };
            let base = match (base_uri, &input) {
                (Some(base), _) => base,
                (None, Some(path)) => file_uri(path)?,
                // the bridge reports the missing base URI itself
                (None, None) => String::new(),
            };

            let parser = RapperParser::from_options(options)?;
            let mut graph = MemoryGraph::new();
            let count = parser.parse(&mut graph, &data, input_format, &base)?;
            info!("Parsed {} triples from {} input", count, input_format);

            let text = NtriplesSerializer::new().serialize(&graph, Syntax::NTriples)?;
            match output {
                Some(path) => std::fs::write(&path, text)
                    .with_context(|| format!("Failed to write {}", path.display()))?,
                None => print!("{text}"),
            }
        }
        Commands::Check { json } => match RapperParser::from_options(options) {
            Ok(parser) => {
                if json {
                    println!(
                        "{}",
                        serde_json::json!({
                            "command": parser.command(),
                            "version": parser.version().to_string(),
                            "ok": true,
                        })
                    );
                } else {
                    println!("{} {}", parser.command(), parser.version());
                }
            }
            Err(err) => {
                if json {
                    println!(
                        "{}",
                        serde_json::json!({
                            "command": cmd.rapper,
                            "ok": false,
                            "error": err.to_string(),
                        })
                    );
                    std::process::exit(1);
                }
                return Err(err.into());
            }
        },
    }

    Ok(())
}
