// src/core/html.rs
//
// Tree-walk helpers over `scraper` documents. Everything here is read-only and
// total: missing nodes give empty results, never errors.

use scraper::{ElementRef, Html, Node};

use super::sanitize::{clean, normalize_entities};

/// Upper bound on `rowspan`/`colspan`; malformed values must not blow up the grid.
pub const MAX_SPAN: usize = 200;

#[inline]
pub fn is_tag(el: &ElementRef, name: &str) -> bool {
    el.value().name().eq_ignore_ascii_case(name)
}

pub fn has_class(el: &ElementRef, class: &str) -> bool {
    el.value().classes().any(|c| c.eq_ignore_ascii_case(class))
}

pub fn attr<'a>(el: &ElementRef<'a>, name: &str) -> Option<&'a str> {
    el.value().attr(name)
}

/// Numeric span attribute (`rowspan`, `colspan`), clamped to `1..=MAX_SPAN`.
pub fn span_attr(el: &ElementRef, name: &str) -> usize {
    attr(el, name)
        .and_then(|v| {
            let digits: String = v.trim().chars().take_while(|c| c.is_ascii_digit()).collect();
            digits.parse::<usize>().ok()
        })
        .unwrap_or(1)
        .clamp(1, MAX_SPAN)
}

/// All descendant elements, document order, excluding `el` itself.
pub fn elements<'a>(el: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> + 'a {
    el.descendants().skip(1).filter_map(ElementRef::wrap)
}

/// Descendant elements with the given tag name.
pub fn find_all<'a>(el: ElementRef<'a>, name: &'a str) -> impl Iterator<Item = ElementRef<'a>> + 'a {
    elements(el).filter(move |e| is_tag(e, name))
}

pub fn find_first<'a>(el: ElementRef<'a>, name: &str) -> Option<ElementRef<'a>> {
    elements(el).find(|e| is_tag(e, name))
}

/// Any descendant whose tag is one of `names`.
pub fn has_descendant(el: ElementRef, names: &[&str]) -> bool {
    elements(el).any(|e| names.iter().any(|n| is_tag(&e, n)))
}

/// `div#mw-content-text` when present, else the document root.
pub fn content_root(doc: &Html) -> ElementRef<'_> {
    let root = doc.root_element();
    elements(root)
        .find(|e| is_tag(e, "div") && attr(e, "id") == Some("mw-content-text"))
        .unwrap_or(root)
}

/// Rows that belong to `table` itself: direct `tr` children and those under
/// `thead`/`tbody`/`tfoot`. Rows of nested tables are not included.
pub fn table_rows(table: ElementRef) -> Vec<ElementRef> {
    let mut out = Vec::new();
    collect_rows(table, &mut out);
    out
}

fn collect_rows<'a>(parent: ElementRef<'a>, out: &mut Vec<ElementRef<'a>>) {
    for child in parent.children().filter_map(ElementRef::wrap) {
        match child.value().name() {
            "tr" => out.push(child),
            "thead" | "tbody" | "tfoot" => collect_rows(child, out),
            _ => {}
        }
    }
}

/// The `td`/`th` children of a row.
pub fn row_cells(tr: ElementRef) -> Vec<ElementRef> {
    tr.children()
        .filter_map(ElementRef::wrap)
        .filter(|c| is_tag(c, "td") || is_tag(c, "th"))
        .collect()
}

/// Visible text of an element, whitespace-collapsed. Skips `style`/`script`
/// (Wikipedia inlines template CSS inside cells). `<br>` and block elements
/// read as a space, so stacked names never run together.
pub fn text_of(el: ElementRef) -> String {
    let mut buf = String::new();
    walk_text(el, false, &mut buf);
    clean(&normalize_entities(&buf))
}

/// Like `text_of`, but `<br>` and block elements become newlines and
/// line structure is kept: each line is cleaned, empty lines dropped.
pub fn text_with_breaks(el: ElementRef) -> String {
    let mut buf = String::new();
    walk_text(el, true, &mut buf);
    normalize_entities(&buf)
        .lines()
        .map(clean)
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn walk_text(el: ElementRef, breaks: bool, out: &mut String) {
    for child in el.children() {
        match child.value() {
            Node::Text(t) => out.push_str(t),
            Node::Element(e) => {
                let name = e.name();
                if name == "style" || name == "script" {
                    continue;
                }
                let gap = if breaks { '\n' } else { ' ' };
                if name == "br" {
                    out.push(gap);
                    continue;
                }
                let block = matches!(name, "li" | "p" | "div" | "tr" | "dd" | "dt");
                if let Some(child_el) = ElementRef::wrap(child) {
                    if block { out.push(gap); }
                    walk_text(child_el, breaks, out);
                    if block { out.push(gap); }
                }
            }
            _ => {}
        }
    }
}
