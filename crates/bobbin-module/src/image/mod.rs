//! In-memory representation of a loaded module.
//!
//! A [`ModuleImage`] is what weavers mutate: the module name, its type
//! table, and any debug-symbol payload read alongside the binary. The
//! pipeline exclusively owns an image for the duration of that module's
//! processing; weavers receive sequential mutable access, never overlapping.

use serde::{Deserialize, Serialize};

/// One entry in a module's type table.
///
/// # Example
///
/// ```
/// use bobbin_module::TypeEntry;
///
/// let entry = TypeEntry::new("OrderService").with_namespace("App.Core");
/// assert_eq!(entry.name(), "OrderService");
/// assert_eq!(entry.namespace(), Some("App.Core"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeEntry {
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    namespace: Option<String>,
}

impl TypeEntry {
    /// Creates a type entry in the global namespace.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: None,
        }
    }

    /// Places the entry in a namespace.
    #[must_use]
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Simple type name.
    #[must_use]
    pub const fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Containing namespace, when any.
    #[must_use]
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }
}

/// Opaque debug-symbol payload read from a module's paired symbol file.
///
/// The orchestrator never interprets symbol content; it only keeps the
/// payload so a codec can write it back in the canonical format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolData {
    payload: Vec<u8>,
}

impl SymbolData {
    /// Wraps a raw symbol payload.
    #[must_use]
    pub const fn new(payload: Vec<u8>) -> Self {
        Self { payload }
    }

    /// Raw payload bytes.
    #[must_use]
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }
}

/// In-memory representation of one module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleImage {
    name: String,
    types: Vec<TypeEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    symbols: Option<SymbolData>,
}

impl ModuleImage {
    /// Creates an image with the given module name and type table.
    #[must_use]
    pub fn new(name: impl Into<String>, types: Vec<TypeEntry>) -> Self {
        Self {
            name: name.into(),
            types,
            symbols: None,
        }
    }

    /// Attaches a debug-symbol payload.
    #[must_use]
    pub fn with_symbols(mut self, symbols: SymbolData) -> Self {
        self.symbols = Some(symbols);
        self
    }

    /// Module name.
    #[must_use]
    pub const fn name(&self) -> &str {
        self.name.as_str()
    }

    /// The type table in declaration order.
    #[must_use]
    pub fn types(&self) -> &[TypeEntry] {
        &self.types
    }

    /// Returns `true` when the type table contains an entry with the given
    /// simple name, in any namespace.
    #[must_use]
    pub fn has_type(&self, name: &str) -> bool {
        self.types.iter().any(|t| t.name() == name)
    }

    /// Appends an entry to the type table.
    pub fn add_type(&mut self, entry: TypeEntry) {
        self.types.push(entry);
    }

    /// Debug-symbol payload read alongside the binary, when any.
    #[must_use]
    pub const fn symbols(&self) -> Option<&SymbolData> {
        self.symbols.as_ref()
    }

    /// Replaces the debug-symbol payload.
    pub fn set_symbols(&mut self, symbols: Option<SymbolData>) {
        self.symbols = symbols;
    }
}
