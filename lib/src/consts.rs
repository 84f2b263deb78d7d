//! Constants shared by the serializer and the rapper bridge.

/// Prefix that distinguishes blank-node identifiers from IRIs in resource text.
pub const BNODE_PREFIX: &str = "_:";

/// Executable the bridge invokes when no override is configured.
pub const DEFAULT_RAPPER_COMMAND: &str = "rapper";

/// Oldest rapper release the bridge accepts.
pub const MIN_RAPPER_VERSION: &str = "1.4.17";
