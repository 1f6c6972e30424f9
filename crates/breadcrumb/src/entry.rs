//! 面包屑条目

use serde::{Deserialize, Serialize};
use std::fmt;

/// One clickable step in a navigation trail.
///
/// Entries are immutable; a trail replaces them wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreadcrumbEntry {
    label: String,
    link: String,
    display: String,
}

impl BreadcrumbEntry {
    pub fn new(
        label: impl Into<String>,
        link: impl Into<String>,
        display: impl Into<String>,
    ) -> Self {
        Self {
            label: label.into(),
            link: link.into(),
            display: display.into(),
        }
    }

    /// 条目键，在同一 trail 内应唯一（不强制）
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn link(&self) -> &str {
        &self.link
    }

    /// 既用作 tooltip 也用作可见文本
    pub fn display(&self) -> &str {
        &self.display
    }
}

impl fmt::Display for BreadcrumbEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[Label={} | Link={} | Display = {} ]",
            self.label, self.link, self.display
        )
    }
}
