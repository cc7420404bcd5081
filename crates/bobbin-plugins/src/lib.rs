//! Weaver plugin management for the Bobbin orchestrator.
//!
//! The `bobbin-plugins` crate turns the ordered declarations of a
//! [`bobbin_config::WeaverDocument`] into configured, runnable weaver
//! instances:
//!
//! - the [`AssetIndex`] maps a weaver name to a binary artifact on disk;
//! - the [`LibraryCache`] loads each distinct binary path exactly once per
//!   cache lifetime, delegating the actual load to a [`LibraryLoader`]
//!   (production: [`DylibLoader`] over `libloading`);
//! - [`lineup::assemble`] walks the declarations in order, instantiates each
//!   weaver through its exported constructor, injects settings, the shared
//!   assembly resolver, and log callbacks through the capability traits, and
//!   aggregates every per-weaver outcome into a [`LineupReport`].
//!
//! A weaver that cannot be resolved, loaded, instantiated, or configured is
//! dropped from the lineup and recorded in the report; it never aborts the
//! run. Weavers opt in to configuration individually: the [`Weaver`] trait's
//! capability-query methods return `None` by default and a weaver overrides
//! only the ones it supports.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::path::PathBuf;
//!
//! use bobbin_config::WeaverDocument;
//! use bobbin_plugins::{
//!     DirectoryIndex, DylibLoader, LibraryCache, WeaverServices, lineup,
//! };
//!
//! let document = WeaverDocument::parse("<Weavers><Alpha /></Weavers>")?;
//! let index = DirectoryIndex::new(vec![PathBuf::from("/build/weavers")]);
//! let mut cache = LibraryCache::new(DylibLoader);
//! let services = WeaverServices::default();
//!
//! let lineup = lineup::assemble(&document, &[], &index, &mut cache, &services);
//! println!("{} active weavers", lineup.len());
//! # Ok::<(), bobbin_config::ConfigError>(())
//! ```

pub mod cache;
pub mod dylib;
pub mod error;
pub mod index;
pub mod lineup;
pub mod log;
pub mod resolve;
pub mod weaver;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;

pub use self::cache::{LibraryCache, LibraryLoader, WeaverLibrary};
pub use self::dylib::{DylibLoader, WEAVER_ENTRY_SYMBOL};
pub use self::error::PluginError;
pub use self::index::{AssetIndex, DirectoryIndex};
pub use self::lineup::{
    ActiveWeaver, BuiltinWeaver, Disposition, LineupEntry, LineupReport, WeaverLineup,
    WeaverServices,
};
pub use self::log::WeaverLog;
pub use self::resolve::{AssemblyResolver, SearchPathResolver};
pub use self::weaver::{
    LogSink, ResolverSink, SettingsSink, WeaveContext, WeaveError, Weaver,
};
