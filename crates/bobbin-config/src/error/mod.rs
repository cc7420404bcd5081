//! Domain errors raised while parsing weaver configuration.
//!
//! Configuration errors are the one fatal error class in the orchestrator:
//! a malformed document aborts the run before any module is touched, so the
//! error carries enough of the offending content for the host to surface a
//! useful diagnostic.

use thiserror::Error;

/// Errors arising from configuration parsing.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration document is not well-formed XML.
    #[error("configuration document is not valid XML ({message}); content began: '{snippet}'")]
    Malformed {
        /// Parser description of the structural failure.
        message: String,
        /// Leading slice of the offending content, truncated for display.
        snippet: String,
    },

    /// A settings fragment could not be re-parsed at injection time.
    #[error("settings fragment for weaver '{weaver}' is not a valid element: {message}")]
    Settings {
        /// Weaver whose fragment was being parsed.
        weaver: String,
        /// Parser description of the failure.
        message: String,
    },
}

/// Maximum number of characters of offending content retained in a
/// [`ConfigError::Malformed`] snippet.
const SNIPPET_CHARS: usize = 120;

/// Truncates document content to a displayable snippet.
#[must_use]
pub(crate) fn snippet_of(content: &str) -> String {
    let mut out: String = content.chars().take(SNIPPET_CHARS).collect();
    if content.chars().nth(SNIPPET_CHARS).is_some() {
        out.push_str("...");
    }
    out
}
