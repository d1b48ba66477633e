// src/specs/tables.rs
//
// Which tables on a page hold nominations. Category articles keep them under a
// "Winners and nominees" section; the same pages also carry statistics tables
// (multiple wins, records) that look alike and must be left out.

use scraper::{ElementRef, Html};

use crate::config::Policy;
use crate::core::html::{content_root, elements, find_first, has_class, is_tag, table_rows, text_of};
use crate::core::sanitize::{clean, strip_footnotes};

/// A nomination table and the heading text that introduces it
/// (its caption, else the nearest preceding heading).
#[derive(Clone, Debug)]
pub struct SelectedTable<'a> {
    pub table: ElementRef<'a>,
    pub heading: String,
}

enum Block<'a> {
    Heading { level: u8, text: String },
    Table(ElementRef<'a>),
}

pub fn select_nomination_tables<'a>(doc: &'a Html, policy: &Policy) -> Vec<SelectedTable<'a>> {
    let blocks = page_blocks(content_root(doc));
    let tp = &policy.tables;

    let section = blocks.iter().position(|b| match b {
        Block::Heading { level, text } => {
            let lc = text.to_lowercase();
            *level <= 3 && tp.section_terms.iter().all(|t| lc.contains(t.as_str()))
        }
        Block::Table(_) => false,
    });

    let picked = match section {
        Some(start) => {
            let mut found = section_tables(&blocks, start, policy);
            if found.is_empty() {
                logd!("winners section has no tables; trying decade sections");
                found = decade_tables(&blocks);
            }
            found
        }
        None => {
            logd!("no winners/nominees heading; every wikitable is a candidate");
            all_tables(&blocks)
        }
    };

    picked
        .into_iter()
        .filter(|sel| {
            let lc = text_of(sel.table).to_lowercase();
            if let Some(phrase) = tp.aggregate_phrases.iter().find(|p| lc.contains(p.as_str())) {
                logd!("dropping statistics table ({phrase:?})");
                return false;
            }
            table_rows(sel.table).len() >= tp.min_rows
        })
        .collect()
}

/// Headings and top-level wikitables in document order.
fn page_blocks(root: ElementRef) -> Vec<Block> {
    elements(root)
        .filter_map(|el| {
            if let Some(level) = heading_level(&el) {
                let text = clean(&strip_footnotes(&text_of(el)));
                return Some(Block::Heading { level, text });
            }
            (is_tag(&el, "table") && has_class(&el, "wikitable") && !inside_wikitable(el)).then_some(Block::Table(el))
        })
        .collect()
}

fn heading_level(el: &ElementRef) -> Option<u8> {
    match el.value().name() {
        "h2" => Some(2),
        "h3" => Some(3),
        "h4" => Some(4),
        "h5" => Some(5),
        "h6" => Some(6),
        _ => None,
    }
}

fn inside_wikitable(el: ElementRef) -> bool {
    el.ancestors()
        .filter_map(ElementRef::wrap)
        .any(|a| is_tag(&a, "table") && has_class(&a, "wikitable"))
}

fn with_heading<'a>(table: ElementRef<'a>, last_heading: &str) -> SelectedTable<'a> {
    let caption = find_first(table, "caption")
        .map(|c| clean(&strip_footnotes(&text_of(c))))
        .filter(|c| !c.is_empty());
    SelectedTable { table, heading: caption.unwrap_or_else(|| s!(last_heading)) }
}

/// Tables after the section heading at `start`, up to the next heading of the
/// same or higher rank. Sub-sections about statistics are skipped until the
/// next sub-heading that isn't.
fn section_tables<'a>(blocks: &[Block<'a>], start: usize, policy: &Policy) -> Vec<SelectedTable<'a>> {
    let Some(Block::Heading { level: top, text }) = blocks.get(start) else {
        return Vec::new();
    };
    let mut last_heading = text.clone();
    let mut excluded = false;
    let mut out = Vec::new();

    for block in &blocks[start + 1..] {
        match block {
            Block::Heading { level, .. } if level <= top => break,
            Block::Heading { text, .. } => {
                let lc = text.to_lowercase();
                excluded = policy.tables.excluded_subheadings.iter().any(|t| lc.contains(t.as_str()));
                if excluded {
                    logd!("skipping sub-section {text:?}");
                }
                last_heading = text.clone();
            }
            Block::Table(t) if !excluded => out.push(with_heading(*t, &last_heading)),
            Block::Table(_) => {}
        }
    }
    out
}

fn is_decade_heading(text: &str) -> bool {
    re!(r"\b\d{4}s\b").is_match(text) || text.to_lowercase().contains("decade")
}

/// Tables under `h3`/`h4` decade headings ("1990s") anywhere on the page.
fn decade_tables<'a>(blocks: &[Block<'a>]) -> Vec<SelectedTable<'a>> {
    let mut active = false;
    let mut last_heading = s!();
    let mut out = Vec::new();
    for block in blocks {
        match block {
            Block::Heading { level, text } => {
                if (3..=4).contains(level) {
                    active = is_decade_heading(text);
                } else if *level == 2 {
                    active = false;
                }
                last_heading = text.clone();
            }
            Block::Table(t) if active => out.push(with_heading(*t, &last_heading)),
            Block::Table(_) => {}
        }
    }
    out
}

fn all_tables<'a>(blocks: &[Block<'a>]) -> Vec<SelectedTable<'a>> {
    let mut last_heading = s!();
    let mut out = Vec::new();
    for block in blocks {
        match block {
            Block::Heading { text, .. } => last_heading = text.clone(),
            Block::Table(t) => out.push(with_heading(*t, &last_heading)),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROWS: &str = "<tr><th>Year</th><th>Film</th></tr><tr><td>2020</td><td>Parasite</td></tr><tr><td>2021</td><td>Nomadland</td></tr>";

    fn headings_of(html: &str) -> Vec<String> {
        let doc = Html::parse_document(html);
        select_nomination_tables(&doc, &Policy::default()).into_iter().map(|t| t.heading).collect()
    }

    #[test]
    fn winners_section_excludes_statistics() {
        let html = format!(
            r#"<div id="mw-content-text">
              <table class="wikitable"><tr><td>lead</td></tr></table>
              <div class="mw-heading mw-heading2"><h2>Winners and nominees<span>[edit]</span></h2></div>
              <h3>2020s</h3>
              <table class="wikitable sortable">{ROWS}</table>
              <h3>Multiple wins</h3>
              <table class="wikitable">{ROWS}</table>
              <h3>2010s</h3>
              <table class="wikitable"><caption>2010s winners</caption>{ROWS}</table>
              <h2>Superlatives</h2>
              <table class="wikitable">{ROWS}</table>
            </div>"#
        );
        assert_eq!(headings_of(&html), vec!["2020s", "2010s winners"]);
    }

    #[test]
    fn most_wins_tables_are_dropped_even_without_section() {
        let html = format!(
            r#"<div id="mw-content-text">
              <h2>Ceremonies</h2>
              <table class="wikitable">{ROWS}</table>
              <table class="wikitable"><tr><th>Most wins</th></tr>{ROWS}</table>
            </div>"#
        );
        assert_eq!(headings_of(&html), vec!["Ceremonies"]);
    }

    #[test]
    fn small_and_nested_tables_are_not_collected() {
        let html = format!(
            r#"<div id="mw-content-text">
              <h2>Winners and nominees</h2>
              <table class="wikitable"><tr><td>x</td></tr><tr><td>y</td></tr></table>
              <table class="wikitable">{ROWS}<tr><td><table class="wikitable">{ROWS}</table></td></tr></table>
            </div>"#
        );
        assert_eq!(headings_of(&html).len(), 1);
    }

    #[test]
    fn empty_section_falls_back_to_decades() {
        let html = format!(
            r#"<div id="mw-content-text">
              <h2>Winners and nominees</h2>
              <p>See below.</p>
              <h2>By decade</h2>
              <h3>1990s</h3>
              <table class="wikitable">{ROWS}</table>
              <h3>Trivia</h3>
              <table class="wikitable">{ROWS}</table>
            </div>"#
        );
        assert_eq!(headings_of(&html), vec!["1990s"]);
    }
}
