//! Fence plugin capability interface.
//!
//! Callers customize fenced-code handling per language by supplying a
//! render/reverse pair. `None` is the "not handled" sentinel on both
//! methods; it is distinct from an empty string, which a plugin may
//! legitimately return as handled output.

use crate::node::Node;

/// Reconstruction data returned by a plugin `reverse` hook. Fields left
/// `None` fall back to the attributes recorded on the element.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FenceSource {
    /// The fenced code, verbatim
    pub content: String,
    pub lang: Option<String>,
    pub fence: Option<String>,
}

/// Error raised by a plugin hook. The engine catches it at the call site,
/// logs it and substitutes the default path; it never crosses the public
/// boundary.
#[derive(Debug, thiserror::Error)]
#[error("fence plugin failed: {0}")]
pub struct PluginError(pub String);

impl PluginError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Customizes fenced-code rendering and reconstruction.
///
/// Both hooks are called synchronously and must return immediately. A
/// plugin that needs asynchronous work (loading a highlighter, rendering a
/// diagram) returns a placeholder and populates it outside this engine's
/// call stack.
pub trait FencePlugin: Send + Sync {
    /// Render fenced code to HTML. `Some(html)` is emitted verbatim (the
    /// plugin owns escaping); `None` selects the default `<pre><code>`
    /// rendering.
    fn render(&self, code: &str, lang: Option<&str>) -> Option<String> {
        let _ = (code, lang);
        None
    }

    /// Reconstruct fenced code from a rendered element. `Ok(None)` means
    /// not handled; an error falls back to the recorded attributes.
    fn reverse(&self, element: &Node) -> Result<Option<FenceSource>, PluginError> {
        let _ = element;
        Ok(None)
    }
}
