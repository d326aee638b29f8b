//! Outline configuration.
//!
//! `TocConfig` deserializes from TOML with per-field defaults, so host
//! applications can keep outline settings alongside their own config. The
//! template hook is code, not data, and is skipped during deserialization.

use std::fmt;
use std::sync::Arc;

use serde::Deserialize;

use crate::types::ListKind;

/// Template applied once to the rendered list markup before insertion.
///
/// The default wraps the list in a fixed `aside/h2/nav` container; callers
/// may substitute any function, including the identity function.
pub type Template = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// The fixed container the default template wraps the list in.
pub fn default_template(list_markup: &str) -> String {
    format!("<aside class=\"toc\"><h2>Contents</h2><nav>{list_markup}</nav></aside>")
}

// ---------------------------------------------------------------------------
// TocConfig
// ---------------------------------------------------------------------------

/// Caller-supplied outline configuration, all fields optional.
#[derive(Clone, Deserialize)]
pub struct TocConfig {
    /// Headings deeper than this are excluded from the outline. They do not
    /// appear and do not affect the nesting of later eligible headings.
    #[serde(default = "default_max_depth")]
    pub max_depth: u8,

    /// Render ordered (`<ol>`) instead of unordered (`<ul>`) lists,
    /// uniformly for the root list and every nested list.
    #[serde(default)]
    pub ordered: bool,

    /// Markup template applied to the rendered list before insertion.
    #[serde(skip, default = "template_default")]
    pub template: Template,
}

impl TocConfig {
    /// List kind selected by [`TocConfig::ordered`].
    pub fn list_kind(&self) -> ListKind {
        if self.ordered {
            ListKind::Ordered
        } else {
            ListKind::Unordered
        }
    }
}

impl Default for TocConfig {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
            ordered: false,
            template: template_default(),
        }
    }
}

impl fmt::Debug for TocConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TocConfig")
            .field("max_depth", &self.max_depth)
            .field("ordered", &self.ordered)
            .finish_non_exhaustive()
    }
}

fn default_max_depth() -> u8 {
    3
}

fn template_default() -> Template {
    Arc::new(default_template)
}
