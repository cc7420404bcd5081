//! Built-in constants shared across the configuration model.

/// Fixed suffix appended to a declaration element's local name to form the
/// canonical weaver name (and the binary name looked up by the resolver).
pub const WEAVER_SUFFIX: &str = ".Weaver";

/// Root attribute naming the comma-separated set of module file names
/// eligible for processing.
pub const PROCESS_ASSEMBLIES_ATTR: &str = "ProcessAssemblies";

/// Module file names processed when no document supplies a
/// `ProcessAssemblies` attribute.
///
/// This is a documented convenience default for hosts that drop a bare
/// configuration document (or none at all) next to a conventional build
/// output, not a security boundary. Production hosts should configure the
/// allow-list explicitly.
pub const DEFAULT_PROCESS_SET: &[&str] = &["App.Core.dll", "App.Scripts.dll"];
