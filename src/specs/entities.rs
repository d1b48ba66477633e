// src/specs/entities.rs
//
// Who or what a table cell names. Links are the best evidence (they carry a
// canonical target); plain text is the fallback.

use scraper::ElementRef;
use url::Url;

use crate::config::Policy;
use crate::core::html::{attr, find_all, text_of, text_with_breaks};
use crate::core::sanitize::{clean, clean_name, is_numeric, strip_footnotes};
use crate::records::EntityMention;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LinkTarget {
    /// Absolute article URL.
    Page(String),
    /// Article does not exist yet; the display name still counts.
    Redlink,
    Skip,
}

pub fn classify_href(href: &str, policy: &Policy) -> LinkTarget {
    let lc = href.trim().to_lowercase();
    if lc.is_empty() || lc.starts_with('#') || lc.contains("cite_note") {
        return LinkTarget::Skip;
    }
    if lc.contains("redlink=1") {
        return LinkTarget::Redlink;
    }
    let title = lc.rsplit("/wiki/").next().unwrap_or(&lc);
    let title = title.replace("%3a", ":");
    if policy.skipped_namespaces.iter().any(|ns| title.starts_with(ns.as_str())) || title.contains("(disambiguation)") {
        return LinkTarget::Skip;
    }
    match resolve(href.trim(), &policy.base_url) {
        Some(url) => LinkTarget::Page(url),
        None => LinkTarget::Skip,
    }
}

/// `href` made absolute against `base`.
pub fn resolve(href: &str, base: &str) -> Option<String> {
    let base = Url::parse(base).ok()?;
    base.join(href).ok().map(String::from)
}

/// Plausible identity: longer than 2 characters and not just digits.
pub fn is_identity_name(name: &str) -> bool {
    name.chars().count() > 2 && !is_numeric(name)
}

/// Every link in the cell that survives `classify_href`, with cleaned display text.
fn cell_links(cell: ElementRef, policy: &Policy) -> Vec<(String, LinkTarget, String)> {
    find_all(cell, "a")
        .filter_map(|a| {
            let href = attr(&a, "href")?;
            let target = classify_href(href, policy);
            if target == LinkTarget::Skip {
                return None;
            }
            let name = clean(&strip_footnotes(&text_of(a)));
            Some((name, target, href.to_lowercase()))
        })
        .collect()
}

fn to_mention(name: String, target: LinkTarget) -> EntityMention {
    match target {
        LinkTarget::Page(url) => EntityMention::new(name, Some(url)),
        _ => EntityMention::unlinked(name),
    }
}

/// Split on the first separator present (priority order), trimming parts.
pub fn split_first_separator(text: &str, separators: &[String]) -> Vec<String> {
    let parts: Vec<&str> = match separators.iter().find(|sep| text.contains(sep.as_str())) {
        Some(sep) => text.split(sep.as_str()).collect(),
        None => vec![text],
    };
    parts.into_iter().map(clean).filter(|p| !p.is_empty()).collect()
}

/// People (or other identities) named by a cell, links first.
pub fn extract_entities(cell: ElementRef, policy: &Policy) -> Vec<EntityMention> {
    let linked: Vec<EntityMention> = cell_links(cell, policy)
        .into_iter()
        .filter(|(name, _, _)| is_identity_name(name))
        .map(|(name, target, _)| to_mention(name, target))
        .collect();

    // Line breaks separate names before any in-line separator is considered.
    let candidates = if linked.is_empty() {
        text_with_breaks(cell)
            .lines()
            .flat_map(|line| split_first_separator(&clean_name(line), &policy.text_separators))
            .filter(|name| is_identity_name(name))
            .map(EntityMention::unlinked)
            .collect()
    } else {
        linked
    };

    candidates.into_iter().filter(|m| !policy.is_denied(&m.name)).collect()
}

/// The film a cell names. Titles may be short or numeric ("M", "1917"), and
/// may legitimately contain denylisted words, so only the text fallback is
/// filtered.
pub fn extract_film(cell: ElementRef, policy: &Policy) -> Option<EntityMention> {
    let links = cell_links(cell, policy);
    let preferred = links
        .iter()
        .position(|(name, _, href)| !name.is_empty() && policy.is_film_target(href))
        .or_else(|| links.iter().position(|(name, _, _)| !name.is_empty()));
    if let Some(i) = preferred {
        let (name, target, _) = links.into_iter().nth(i)?;
        return Some(to_mention(name, target));
    }

    let text = clean_name(&text_of(cell));
    if text.is_empty() || policy.is_denied(&text) {
        return None;
    }
    Some(EntityMention::unlinked(text))
}
