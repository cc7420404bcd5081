//! Configuration model for the Bobbin weaving orchestrator.
//!
//! A weaver configuration document is an XML document whose immediate child
//! elements each declare one weaver to run. The element's local name plus the
//! fixed `.Weaver` suffix forms the weaver name; the element's full
//! serialized form is retained verbatim as that weaver's private settings
//! payload. The orchestrator never interprets a settings payload itself:
//! parsing is deferred until the payload is handed to the weaver, via
//! [`SettingsElement`].
//!
//! Declaration order is significant and preserved. Re-declaring a weaver
//! later in the document moves it to the new position.
//!
//! The optional `ProcessAssemblies` root attribute lists the comma-separated
//! module file names eligible for processing; when absent, only a built-in
//! convenience list of module names is processed (see [`AssemblyFilter`]).
//!
//! # Example
//!
//! ```
//! use bobbin_config::WeaverDocument;
//!
//! let doc = WeaverDocument::parse(
//!     r#"<Weavers ProcessAssemblies="App.Core.dll">
//!         <Alpha Level="3" />
//!         <Beta />
//!     </Weavers>"#,
//! )
//! .expect("well-formed document");
//!
//! let names: Vec<&str> = doc.declarations().iter().map(|d| d.name()).collect();
//! assert_eq!(names, ["Alpha.Weaver", "Beta.Weaver"]);
//! assert!(doc.filter().permits("App.Core.dll"));
//! assert!(!doc.filter().permits("Other.dll"));
//! ```

pub mod defaults;
pub mod document;
pub mod error;
pub mod settings;

pub use self::document::{AssemblyFilter, WeaverDeclaration, WeaverDocument};
pub use self::error::ConfigError;
pub use self::settings::SettingsElement;
