//! Configuration options for rendering and reconstruction.

use std::fmt;
use std::sync::Arc;

use crate::plugin::FencePlugin;

/// Options shared by the forward renderer and the reverse reconstructor.
#[derive(Clone, Default)]
pub struct Options {
    /// Emit `style="..."` attributes from the fixed per-tag style table
    /// instead of class names
    pub inline_styles: bool,

    /// Class name prefix; `None` means the default `quikdown-`
    pub class_prefix: Option<String>,

    /// A bare newline inside a paragraph renders as a line break
    pub lazy_linefeeds: bool,

    /// Disable the URL sanitizer
    pub allow_unsafe_urls: bool,

    /// Emit source-tracking attributes (`data-qd*`) so the rendered HTML
    /// can be inverted back to the exact original markdown
    pub bidirectional: bool,

    /// Caller-supplied fenced-code render/reverse pair
    pub fence_plugin: Option<Arc<dyn FencePlugin>>,
}

pub(crate) const DEFAULT_CLASS_PREFIX: &str = "quikdown-";

impl Options {
    pub fn class_prefix(&self) -> &str {
        self.class_prefix.as_deref().unwrap_or(DEFAULT_CLASS_PREFIX)
    }
}

impl fmt::Debug for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Options")
            .field("inline_styles", &self.inline_styles)
            .field("class_prefix", &self.class_prefix())
            .field("lazy_linefeeds", &self.lazy_linefeeds)
            .field("allow_unsafe_urls", &self.allow_unsafe_urls)
            .field("bidirectional", &self.bidirectional)
            .field("fence_plugin", &self.fence_plugin.is_some())
            .finish()
    }
}
