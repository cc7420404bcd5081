//! Deferred parsing of weaver settings payloads.
//!
//! The orchestrator stores each declaration's settings as the verbatim XML
//! fragment and only builds this structured form at injection time, when a
//! weaver declares a settings capability. The orchestrator itself never
//! interprets the schema; [`SettingsElement`] is simply an owned tree the
//! weaver can walk.

use crate::error::ConfigError;

/// Owned structured form of one settings fragment.
///
/// # Example
///
/// ```
/// use bobbin_config::SettingsElement;
///
/// let settings = SettingsElement::parse("Alpha.Weaver", "<Alpha Level=\"3\"><Skip /></Alpha>")
///     .expect("valid fragment");
/// assert_eq!(settings.name(), "Alpha");
/// assert_eq!(settings.attribute("Level"), Some("3"));
/// assert!(settings.child("Skip").is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsElement {
    name: String,
    attributes: Vec<(String, String)>,
    text: Option<String>,
    children: Vec<SettingsElement>,
}

impl SettingsElement {
    /// Re-parses a stored settings fragment into its structured form.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Settings`] when the fragment is not a
    /// well-formed element. This cannot happen for fragments sliced out of a
    /// document that already parsed, but the type is also usable with
    /// externally supplied fragments.
    pub fn parse(weaver: &str, fragment: &str) -> Result<Self, ConfigError> {
        let parsed = roxmltree::Document::parse(fragment).map_err(|e| ConfigError::Settings {
            weaver: weaver.to_owned(),
            message: e.to_string(),
        })?;
        Ok(Self::from_node(parsed.root_element()))
    }

    fn from_node(node: roxmltree::Node<'_, '_>) -> Self {
        let attributes = node
            .attributes()
            .map(|a| (a.name().to_owned(), a.value().to_owned()))
            .collect();
        let children = node
            .children()
            .filter(|n| n.is_element())
            .map(Self::from_node)
            .collect();
        let text = node
            .children()
            .find_map(|n| n.text().map(str::trim).filter(|t| !t.is_empty()))
            .map(str::to_owned);
        Self {
            name: node.tag_name().name().to_owned(),
            attributes,
            text,
            children,
        }
    }

    /// Element local name (without the `.Weaver` suffix).
    #[must_use]
    pub const fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Looks up an attribute value by name.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// All attributes in document order.
    #[must_use]
    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    /// Trimmed text content, when the element carries any.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// First child element with the given local name.
    #[must_use]
    pub fn child(&self, name: &str) -> Option<&Self> {
        self.children.iter().find(|c| c.name == name)
    }

    /// All child elements in document order.
    #[must_use]
    pub fn children(&self) -> &[Self] {
        &self.children
    }
}

#[cfg(test)]
mod tests;
