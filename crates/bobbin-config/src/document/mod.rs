//! Parsed weaver configuration documents.
//!
//! [`WeaverDocument::parse`] turns the raw XML text into an ordered list of
//! [`WeaverDeclaration`]s plus an [`AssemblyFilter`] deciding which module
//! file names the run may touch. Settings payloads are kept as verbatim
//! slices of the source document; deferred parsing happens in
//! [`crate::settings`] when a weaver asks for them.

use crate::defaults::{DEFAULT_PROCESS_SET, PROCESS_ASSEMBLIES_ATTR, WEAVER_SUFFIX};
use crate::error::{ConfigError, snippet_of};

/// One ordered weaver declaration extracted from the document.
///
/// # Example
///
/// ```
/// use bobbin_config::WeaverDocument;
///
/// let doc = WeaverDocument::parse("<Weavers><Alpha Level=\"3\" /></Weavers>")
///     .expect("well-formed");
/// let decl = doc.declarations().first().expect("one declaration");
/// assert_eq!(decl.name(), "Alpha.Weaver");
/// assert_eq!(decl.settings_xml(), "<Alpha Level=\"3\" />");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeaverDeclaration {
    name: String,
    settings_xml: String,
}

impl WeaverDeclaration {
    /// Canonical weaver name: element local name plus the `.Weaver` suffix.
    #[must_use]
    pub const fn name(&self) -> &str {
        self.name.as_str()
    }

    /// The declaration element's full serialized form, verbatim from the
    /// source document.
    #[must_use]
    pub const fn settings_xml(&self) -> &str {
        self.settings_xml.as_str()
    }
}

/// Policy deciding which module file names are eligible for processing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssemblyFilter {
    /// No `ProcessAssemblies` attribute: only the built-in convenience list
    /// in [`crate::defaults::DEFAULT_PROCESS_SET`] is processed.
    Default,
    /// Explicit comma-separated list from the document; replaces the default
    /// set entirely.
    Explicit(Vec<String>),
}

impl AssemblyFilter {
    /// Returns `true` when a module with the given file name may be
    /// processed under this policy.
    #[must_use]
    pub fn permits(&self, file_name: &str) -> bool {
        match self {
            Self::Default => DEFAULT_PROCESS_SET.contains(&file_name),
            Self::Explicit(names) => names.iter().any(|n| n == file_name),
        }
    }
}

/// A fully parsed configuration document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeaverDocument {
    declarations: Vec<WeaverDeclaration>,
    filter: AssemblyFilter,
}

impl WeaverDocument {
    /// Parses the raw document text.
    ///
    /// Each immediate child element of the root becomes one declaration, in
    /// document order. A later element with the same name (compared
    /// case-insensitively) replaces the earlier declaration and takes the
    /// new position.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Malformed`] when the text is not well-formed
    /// XML. This is the orchestrator's single fatal configuration error: the
    /// caller must abort the run before touching any module.
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let parsed = roxmltree::Document::parse(text).map_err(|e| ConfigError::Malformed {
            message: e.to_string(),
            snippet: snippet_of(text),
        })?;
        let root = parsed.root_element();

        let mut declarations: Vec<WeaverDeclaration> = Vec::new();
        for child in root.children().filter(roxmltree::Node::is_element) {
            let name = format!("{}{WEAVER_SUFFIX}", child.tag_name().name());
            // Parser ranges are byte offsets into `text` and always land on
            // char boundaries, so the slice cannot fail for a document that
            // just parsed.
            let fragment = text.get(child.range());
            debug_assert!(fragment.is_some(), "element range slices the source text");
            let settings_xml = fragment.map_or_else(String::new, str::to_owned);
            declarations.retain(|d| !d.name.eq_ignore_ascii_case(&name));
            declarations.push(WeaverDeclaration { name, settings_xml });
        }

        let filter = root.attribute(PROCESS_ASSEMBLIES_ATTR).map_or(
            AssemblyFilter::Default,
            |value| {
                AssemblyFilter::Explicit(
                    value
                        .split(',')
                        .map(str::trim)
                        .filter(|n| !n.is_empty())
                        .map(str::to_owned)
                        .collect(),
                )
            },
        );

        Ok(Self {
            declarations,
            filter,
        })
    }

    /// The document used when no configuration document exists: no declared
    /// weavers, default assembly filter.
    #[must_use]
    pub const fn fallback() -> Self {
        Self {
            declarations: Vec::new(),
            filter: AssemblyFilter::Default,
        }
    }

    /// Declarations in effective order.
    #[must_use]
    pub fn declarations(&self) -> &[WeaverDeclaration] {
        &self.declarations
    }

    /// The module-eligibility policy for this run.
    #[must_use]
    pub const fn filter(&self) -> &AssemblyFilter {
        &self.filter
    }
}
