// src/specs/infobox.rs
//
// Label → value lookups in Wikipedia infoboxes (`table.infobox`).

use scraper::{ElementRef, Html};

use crate::config::Policy;
use crate::core::html::{attr, content_root, elements, find_all, has_class, is_tag, row_cells, table_rows, text_of, text_with_breaks};
use crate::core::sanitize::{clean, is_numeric, strip_footnotes};
use crate::records::{EntityMention, LabeledField};

use super::entities::{classify_href, split_first_separator, LinkTarget};

/// First `table.infobox` in the article body.
pub fn find_infobox(doc: &Html) -> Option<ElementRef<'_>> {
    elements(content_root(doc)).find(|e| is_tag(e, "table") && has_class(e, "infobox"))
}

/// `(label, value)` cells of every infobox row that has both.
fn labeled_rows<'a>(infobox: ElementRef<'a>) -> Vec<(String, ElementRef<'a>)> {
    table_rows(infobox)
        .into_iter()
        .filter_map(|tr| {
            let cells = row_cells(tr);
            let label = cells.iter().find(|c| is_tag(c, "th"))?;
            let value = cells.iter().find(|c| is_tag(c, "td"))?;
            let label = text_with_breaks(*label).replace('\n', " ");
            Some((clean(&strip_footnotes(&label)).to_lowercase(), *value))
        })
        .collect()
}

/// Value cell for the first matching label variant. Variants are tried in
/// order; an exact (case-insensitive) label match beats a substring match.
pub fn labeled_value<'a>(infobox: ElementRef<'a>, labels: &[String]) -> Option<ElementRef<'a>> {
    let rows = labeled_rows(infobox);
    let variants: Vec<String> = labels.iter().map(|l| l.to_lowercase()).collect();
    for v in &variants {
        if let Some((_, cell)) = rows.iter().find(|(label, _)| label == v) {
            return Some(*cell);
        }
    }
    for v in &variants {
        if let Some((_, cell)) = rows.iter().find(|(label, _)| label.contains(v.as_str())) {
            return Some(*cell);
        }
    }
    None
}

/// Links in an infobox value, in order. Display texts must be non-empty and not bare numbers.
pub fn value_links(cell: ElementRef, policy: &Policy) -> Vec<EntityMention> {
    let mut out: Vec<EntityMention> = Vec::new();
    for a in find_all(cell, "a") {
        let Some(href) = attr(&a, "href") else { continue };
        let name = clean(&strip_footnotes(&text_of(a)));
        if name.is_empty() || is_numeric(&name) {
            continue;
        }
        let mention = match classify_href(href, policy) {
            LinkTarget::Page(url) => EntityMention::new(name, Some(url)),
            LinkTarget::Redlink => EntityMention::unlinked(name),
            LinkTarget::Skip => continue,
        };
        if !out.contains(&mention) {
            out.push(mention);
        }
    }
    out
}

/// Cell text with line structure, footnote markers removed.
pub fn value_text(cell: ElementRef) -> String {
    text_with_breaks(cell)
        .lines()
        .map(|l| clean(&strip_footnotes(l)))
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Links first; else the text split on the first separator present.
pub fn extract_labeled_field(infobox: ElementRef, labels: &[String], policy: &Policy) -> Option<LabeledField> {
    let cell = labeled_value(infobox, labels)?;
    let raw = value_text(cell);
    let mut mentions = value_links(cell, policy);
    if mentions.is_empty() {
        mentions = split_first_separator(&raw, &policy.value_separators)
            .into_iter()
            .map(EntityMention::unlinked)
            .collect();
    }
    Some(LabeledField { mentions, raw })
}

/// `132 minutes` → 132
pub fn parse_runtime(text: &str) -> Option<u32> {
    re!(r"(\d+)\s*(?:min|minutes)\b")
        .captures(text)
        .and_then(|c| c[1].parse().ok())
}

/// "3 hours, 31 minutes" → 211, "3h 31m" → 211, "95 minutes" → 95.
/// None when neither hours nor minutes appear.
pub fn parse_duration(text: &str) -> Option<u32> {
    let first = |re: &regex::Regex| re.captures(text).and_then(|c| c[1].parse::<u32>().ok());
    let hours = first(re!(r"(?i)(\d+)\s*(?:hours?|hrs?|h)\b"));
    let minutes = first(re!(r"(?i)(\d+)\s*(?:minutes?|mins?|m)\b"));
    match (hours, minutes) {
        (None, None) => None,
        (h, m) => Some(h.unwrap_or(0) * 60 + m.unwrap_or(0)),
    }
}

const MONTHS: [&str; 12] = [
    "january", "february", "march", "april", "may", "june",
    "july", "august", "september", "october", "november", "december",
];

/// First human-written date in `text` as `YYYY-MM-DD`:
/// "February 9, 2020" and "9 February 2020" both give "2020-02-09".
pub fn iso_date(text: &str) -> Option<String> {
    let caps = re!(r"\b(?:(\d{1,2})\s+([A-Z][a-z]+)|([A-Z][a-z]+)\s+(\d{1,2}),?)\s+(\d{4})\b").captures(text)?;
    let (day, month) = match (caps.get(1), caps.get(2)) {
        (Some(d), Some(m)) => (d.as_str(), m.as_str()),
        _ => (caps.get(4)?.as_str(), caps.get(3)?.as_str()),
    };
    let month = MONTHS.iter().position(|m| m.eq_ignore_ascii_case(month))? + 1;
    let day = day.parse::<u32>().ok().filter(|d| (1..=31).contains(d))?;
    Some(format!("{}-{month:02}-{day:02}", &caps[5]))
}

/// Human-written dates: "21 May 2019", "May 21, 2019".
pub fn find_dates(text: &str) -> Vec<String> {
    re!(r"\b\d{1,2}\s+[A-Z][a-z]+\s+\d{4}\b|\b[A-Z][a-z]+\s+\d{1,2},\s*\d{4}\b")
        .find_iter(text)
        .map(|m| clean(m.as_str()))
        .collect()
}

/// Release dates of a field: full dates in the text, else the `[,;()]` parts
/// mentioning a year.
pub fn parse_release_dates(field: &LabeledField) -> Vec<String> {
    let mut dates = find_dates(&field.raw);
    if dates.is_empty() {
        dates = re!(r"[,;()\n]")
            .split(&field.raw)
            .map(clean)
            .filter(|p| re!(r"\b\d{4}\b").is_match(p))
            .collect();
    }
    let mut out: Vec<String> = Vec::new();
    for d in dates {
        if !out.contains(&d) {
            out.push(d);
        }
    }
    out
}
