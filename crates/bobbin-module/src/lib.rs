//! Module images and the reader/writer boundary for the Bobbin orchestrator.
//!
//! The pipeline never parses binary module structure itself. It drives a
//! [`ModuleCodec`], which reads a module (and its paired debug-symbol file)
//! into a [`ModuleImage`] and writes the mutated image back. Real bytecode
//! formats live behind that trait in host crates; [`JsonFileCodec`] is a
//! self-contained reference implementation used by tests and simple hosts.
//!
//! Symbol handling is format-aware: [`SymbolFormat`] models the two on-disk
//! debug-symbol variants and the probe/normalization rules the pipeline
//! applies (read whichever exists, always write back the canonical form).

pub mod codec;
pub mod error;
pub mod image;
pub mod symbols;

pub use self::codec::{JsonFileCodec, ModuleCodec};
pub use self::error::ModuleError;
pub use self::image::{ModuleImage, SymbolData, TypeEntry};
pub use self::symbols::SymbolFormat;
