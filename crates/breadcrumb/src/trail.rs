//! 面包屑导航条
//!
//! 有序、可变的条目序列；插入顺序即显示顺序。条目数量始终取自底层 `Vec`
//! 的长度，不单独计数。

use crate::entry::BreadcrumbEntry;
use crate::error::{Result, TrailError};
use crate::render;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Ordered navigation trail for one session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreadcrumbTrail {
    entries: Vec<BreadcrumbEntry>,
    /// 仅控制诊断输出
    #[serde(default)]
    debug: bool,
}

impl BreadcrumbTrail {
    pub fn new(debug: bool) -> Self {
        Self {
            entries: Vec::new(),
            debug,
        }
    }

    pub fn is_debug(&self) -> bool {
        self.debug
    }

    /// Current entry count.
    pub fn size(&self) -> usize {
        if self.debug {
            debug!(target: "breadcrumb::trail", "size {}", self.entries.len());
        }
        self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[BreadcrumbEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, BreadcrumbEntry> {
        self.entries.iter()
    }

    pub fn get(&self, index: usize) -> Option<&BreadcrumbEntry> {
        self.entries.get(index)
    }

    /// Appends an entry. Labels are not checked for uniqueness.
    pub fn append(
        &mut self,
        label: impl Into<String>,
        link: impl Into<String>,
        display: impl Into<String>,
    ) {
        self.push(BreadcrumbEntry::new(label, link, display));
    }

    pub fn push(&mut self, entry: BreadcrumbEntry) {
        if self.debug {
            debug!(target: "breadcrumb::trail", "append {}", entry);
        }
        self.entries.push(entry);
    }

    /// Removes and returns the entry at `index`.
    pub fn remove_at(&mut self, index: usize) -> Result<BreadcrumbEntry> {
        self.check_index(index)?;
        let removed = self.entries.remove(index);
        if self.debug {
            debug!(target: "breadcrumb::trail", "remove_at {} {}", index, removed);
        }
        Ok(removed)
    }

    /// Removes the final entry; an empty trail is left untouched.
    pub fn remove_last(&mut self) -> Option<BreadcrumbEntry> {
        let removed = self.entries.pop();
        if self.debug
            && let Some(entry) = &removed
        {
            debug!(target: "breadcrumb::trail", "remove_last {}", entry);
        }
        removed
    }

    /// Replaces the entry at `index` and returns the previous one.
    pub fn replace_at(
        &mut self,
        label: impl Into<String>,
        link: impl Into<String>,
        display: impl Into<String>,
        index: usize,
    ) -> Result<BreadcrumbEntry> {
        self.check_index(index)?;
        let entry = BreadcrumbEntry::new(label, link, display);
        if self.debug {
            debug!(target: "breadcrumb::trail", "replace_at {} {}", index, entry);
        }
        Ok(std::mem::replace(&mut self.entries[index], entry))
    }

    /// Keeps `[0, index)` and drops the rest.
    ///
    /// `index == size()` is rejected even though it would be a no-op.
    pub fn truncate_from(&mut self, index: usize) -> Result<()> {
        self.check_index(index)?;
        self.entries.truncate(index);
        if self.debug {
            debug!(target: "breadcrumb::trail", "truncate_from {}, size {}", index, self.entries.len());
        }
        Ok(())
    }

    /// Removes the last `n` entries.
    ///
    /// `n` must be strictly less than the size; use [`remove_all`](Self::remove_all)
    /// to clear the trail. On failure nothing is removed.
    pub fn remove_top_n(&mut self, n: usize) -> Result<()> {
        if n >= self.entries.len() {
            return Err(TrailError::IndexOutOfRange {
                index: n,
                size: self.entries.len(),
            });
        }
        for i in 0..n {
            if self.debug {
                debug!(target: "breadcrumb::trail", "remove element number: {}", i);
            }
            self.remove_last();
        }
        Ok(())
    }

    /// Clears every entry.
    pub fn remove_all(&mut self) {
        self.entries.clear();
        if self.debug {
            debug!(target: "breadcrumb::trail", "remove_all");
        }
    }

    /// Index of the first entry whose label equals `label`.
    pub fn find_by_label(&self, label: &str) -> Option<usize> {
        let index = self.entries.iter().position(|e| e.label() == label);
        if self.debug {
            debug!(target: "breadcrumb::trail", "find_by_label {} found: {}, index: {:?}", label, index.is_some(), index);
        }
        index
    }

    /// Same as [`find_by_label`](Self::find_by_label), with `-1` for a miss.
    pub fn find_index_or_sentinel(&self, label: &str) -> isize {
        self.find_by_label(label)
            .and_then(|i| isize::try_from(i).ok())
            .unwrap_or(-1)
    }

    /// Records a page visit without duplicating its crumb on refresh.
    ///
    /// An existing entry with the same label is removed before the new one is
    /// appended. Returns the new size.
    pub fn visit(
        &mut self,
        label: impl Into<String>,
        link: impl Into<String>,
        display: impl Into<String>,
    ) -> usize {
        let entry = BreadcrumbEntry::new(label, link, display);
        if let Some(index) = self.find_by_label(entry.label()) {
            self.entries.remove(index);
        }
        self.push(entry);
        self.entries.len()
    }

    /// Renders the entry at `index` as an HTML anchor fragment.
    pub fn render_entry(&self, index: usize) -> Result<String> {
        match self.entries.get(index) {
            Some(entry) => Ok(render::render_entry(entry)),
            None => {
                warn!(
                    target: "breadcrumb::trail",
                    "render_entry index {} is not below entry count {}",
                    index,
                    self.entries.len()
                );
                Err(TrailError::IndexOutOfRange {
                    index,
                    size: self.entries.len(),
                })
            }
        }
    }

    /// Renders the whole trail; empty trails render to `""`.
    pub fn render_all(&self) -> String {
        let output = render::render_entries(&self.entries);
        if self.debug {
            debug!(target: "breadcrumb::trail", "render_all {}", output);
        }
        output
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index < self.entries.len() {
            Ok(())
        } else {
            Err(TrailError::IndexOutOfRange {
                index,
                size: self.entries.len(),
            })
        }
    }
}

impl<'a> IntoIterator for &'a BreadcrumbTrail {
    type Item = &'a BreadcrumbEntry;
    type IntoIter = std::slice::Iter<'a, BreadcrumbEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
