//! HTML 渲染
//!
//! 输出格式是与页面模板之间的契约，必须逐字节保持：
//! `<a href='LINK' class='navbar' title='DISPLAY'>DISPLAY</a>&nbsp;&gt;&nbsp;`

use crate::entry::BreadcrumbEntry;
use std::fmt::Write;

/// Separator appended after every anchor.
pub const SEPARATOR: &str = "&nbsp;&gt;&nbsp;";

/// CSS class the page styles key on.
pub const NAVBAR_CLASS: &str = "navbar";

/// Renders one entry as an anchor followed by the separator.
///
/// Content is written verbatim, without escaping.
pub fn render_entry(entry: &BreadcrumbEntry) -> String {
    let mut out = String::new();
    write_entry(&mut out, entry);
    out
}

/// Renders entries in order into a single fragment.
pub fn render_entries<'a, I>(entries: I) -> String
where
    I: IntoIterator<Item = &'a BreadcrumbEntry>,
{
    let mut out = String::new();
    for entry in entries {
        write_entry(&mut out, entry);
    }
    out
}

fn write_entry(out: &mut String, entry: &BreadcrumbEntry) {
    // Writing into a String cannot fail.
    let _ = write!(
        out,
        "<a href='{link}' class='{NAVBAR_CLASS}' title='{display}'>{display}</a>{SEPARATOR}",
        link = entry.link(),
        display = entry.display(),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_entry_exact_markup() {
        let entry = BreadcrumbEntry::new("a", "l1", "d1");
        assert_eq!(
            render_entry(&entry),
            "<a href='l1' class='navbar' title='d1'>d1</a>&nbsp;&gt;&nbsp;"
        );
    }

    #[test]
    fn test_render_entries_empty() {
        assert_eq!(render_entries(&[]), "");
    }

    #[test]
    fn test_content_is_not_escaped() {
        let entry = BreadcrumbEntry::new("q", "search?a=1&b=2", "<b>Find</b>");
        assert_eq!(
            render_entry(&entry),
            "<a href='search?a=1&b=2' class='navbar' title='<b>Find</b>'><b>Find</b></a>&nbsp;&gt;&nbsp;"
        );
    }
}
