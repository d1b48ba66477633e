// src/specs/context.rs
//
// Year/edition carried down a table. Wikipedia tables state the year once per
// group (often as a rowspan), so rows without one inherit the last seen.

use crate::config::Policy;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableContext {
    current_year: Option<i32>,
    current_edition: Option<i32>,
    nominee_count_in_year: u32,
    min_year: i32,
    max_year: i32,
    edition_offset: i32,
}

impl TableContext {
    pub fn new(policy: &Policy) -> Self {
        Self {
            current_year: None,
            current_edition: None,
            nominee_count_in_year: 0,
            min_year: policy.min_year,
            max_year: policy.max_year,
            edition_offset: policy.edition_offset,
        }
    }

    /// Start with a year already known from the table's heading or caption.
    pub fn seeded(policy: &Policy, year: i32, edition: Option<i32>) -> Self {
        let mut ctx = Self::new(policy);
        ctx.current_year = Some(year);
        ctx.current_edition = edition.filter(|e| *e >= 1);
        ctx
    }

    /// Seeded from heading text when it names a ceremony, else empty.
    pub fn for_heading(policy: &Policy, heading: &str) -> Self {
        match heading_context(heading, policy) {
            Some((year, edition)) => {
                logd!("table seeded from heading {heading:?}: {year} / {edition:?}");
                Self::seeded(policy, year, edition)
            }
            None => Self::new(policy),
        }
    }

    /// Look for a ceremony year in `text`. A new year replaces the current one
    /// and resets the nominee counter; the same year again changes nothing.
    /// Returns true when the year changed.
    pub fn observe(&mut self, text: &str) -> bool {
        let Some(year) = first_year_in(text, self.min_year, self.max_year) else {
            return false;
        };
        if self.current_year == Some(year) {
            return false;
        }
        self.current_year = Some(year);
        self.current_edition = explicit_ordinal(text).or_else(|| {
            let e = year - self.edition_offset;
            (e >= 1).then_some(e)
        });
        self.nominee_count_in_year = 0;
        true
    }

    /// `(ceremony_year, edition)`
    pub fn current(&self) -> (Option<i32>, Option<i32>) {
        (self.current_year, self.current_edition)
    }

    pub fn has_year(&self) -> bool {
        self.current_year.is_some()
    }

    pub fn nominee_count(&self) -> u32 {
        self.nominee_count_in_year
    }

    /// Ordinal of the nominee about to be emitted (1-based), counting it.
    pub fn next_ordinal(&mut self) -> u32 {
        self.nominee_count_in_year += 1;
        self.nominee_count_in_year
    }
}

fn first_year_in(text: &str, min: i32, max: i32) -> Option<i32> {
    re!(r"\b(\d{4})\b")
        .captures_iter(text)
        .filter_map(|c| c[1].parse::<i32>().ok())
        .find(|y| (min..=max).contains(y))
}

/// First ceremony-plausible 4-digit year in `text`.
pub fn plausible_year(text: &str, policy: &Policy) -> Option<i32> {
    first_year_in(text, policy.min_year, policy.max_year)
}

/// A year cell: short, and holding a plausible ceremony year. Longer cells
/// that mention a year are prose (notes, footnotes) and never set the context.
pub fn is_year_cell(text: &str, policy: &Policy) -> bool {
    text.chars().count() <= policy.tables.max_year_cell_chars && plausible_year(text, policy).is_some()
}

/// `92nd` → 92. Zero is not an ordinal.
pub fn explicit_ordinal(text: &str) -> Option<i32> {
    re!(r"\b(\d{1,3})(?:st|nd|rd|th)\b")
        .captures(text)
        .and_then(|c| c[1].parse::<i32>().ok())
        .filter(|n| *n >= 1)
}

/// Year and edition named by a heading or caption, e.g. "81st Academy Awards (2009)",
/// "2009 (81st)", "Academy Awards, 2009" or just "81st Academy Awards".
/// Decade headings ("1990s") name no single ceremony.
pub fn heading_context(text: &str, policy: &Policy) -> Option<(i32, Option<i32>)> {
    if re!(r"\b\d{4}s\b").is_match(text) {
        return None;
    }
    match (plausible_year(text, policy), explicit_ordinal(text)) {
        (Some(year), Some(edition)) => Some((year, Some(edition))),
        (Some(year), None) => Some((year, policy.edition_for_year(year))),
        (None, Some(edition)) => {
            let year = edition + policy.edition_offset;
            policy.year_in_range(year).then_some((year, Some(edition)))
        }
        (None, None) => None,
    }
}
