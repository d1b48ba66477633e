// src/config/policy.rs
//
// Every knob the extraction heuristics consult. `Policy::default()` is the
// behaviour the crate documents; a TOML file may override any subset.

use std::collections::BTreeMap;
use std::error::Error;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::consts::*;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Policy {
    /// Relative link targets are resolved against this.
    pub base_url: String,
    /// Inclusive range of plausible ceremony years.
    pub min_year: i32,
    pub max_year: i32,
    /// edition = ceremony year - offset
    pub edition_offset: i32,
    /// Lower-case terms that disqualify a name as an identity.
    pub denylist: Vec<String>,
    /// Link-target fragments that mark a film article.
    pub film_url_fragments: Vec<String>,
    /// Lower-case link namespaces that never name a film or a person.
    pub skipped_namespaces: Vec<String>,
    /// Table-cell text fallback separators, in priority order. Only the first
    /// one present is used, so "Smith, Jr." style names survive.
    pub text_separators: Vec<String>,
    /// Infobox value separators, first present wins.
    pub value_separators: Vec<String>,
    pub headers: HeaderTerms,
    pub winner: WinnerPolicy,
    pub tables: TablePolicy,
    pub sources: SourcePolicy,
    pub labels: LabelPolicy,
}

impl Default for Policy {
    fn default() -> Self {
        Self {
            base_url: s!(WIKI_BASE),
            min_year: FIRST_CEREMONY_YEAR,
            max_year: LAST_CEREMONY_YEAR,
            edition_offset: EDITION_OFFSET,
            denylist: strings(&["film", "movie", "award", "oscar", "category", "nominee"]),
            film_url_fragments: strings(&["film)", "(movie)"]),
            skipped_namespaces: strings(&[
                "template:", "file:", "image:", "category:", "help:", "wikipedia:", "special:", "portal:", "talk:",
            ]),
            text_separators: strings(&[",", ";", " and "]),
            value_separators: strings(&[", ", " and ", "\n"]),
            headers: HeaderTerms::default(),
            winner: WinnerPolicy::default(),
            tables: TablePolicy::default(),
            sources: SourcePolicy::default(),
            labels: LabelPolicy::default(),
        }
    }
}

impl Policy {
    /// Read a TOML override file. Missing keys keep their defaults.
    pub fn load(path: &Path) -> Result<Self, Box<dyn Error>> {
        let text = fs::read_to_string(path)?;
        let policy: Policy = toml::from_str(&text)?;
        Ok(policy)
    }

    /// The default policy rendered as TOML, for `--dump-policy`.
    pub fn to_toml(&self) -> Result<String, Box<dyn Error>> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn year_in_range(&self, year: i32) -> bool {
        (self.min_year..=self.max_year).contains(&year)
    }

    /// `None` for years that would give an edition below 1 (e.g. 1927, 1928).
    pub fn edition_for_year(&self, year: i32) -> Option<i32> {
        let edition = year - self.edition_offset;
        (edition >= 1).then_some(edition)
    }

    pub fn is_denied(&self, name: &str) -> bool {
        let lc = name.to_lowercase();
        self.denylist.iter().any(|term| lc.contains(term.as_str()))
    }

    pub fn is_film_target(&self, href: &str) -> bool {
        let lc = href.to_lowercase();
        self.film_url_fragments.iter().any(|f| lc.contains(f.as_str()))
    }
}

/// Header vocabulary for column role inference. Checked in the order year, film, person.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeaderTerms {
    pub year: Vec<String>,
    pub film: Vec<String>,
    pub person: Vec<String>,
}

impl Default for HeaderTerms {
    fn default() -> Self {
        Self {
            year: strings(&["year", "ceremony", "edition"]),
            film: strings(&["film", "movie", "picture", "work", "title"]),
            person: strings(&["actor", "actress", "director", "nominee", "recipient"]),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WinnerPolicy {
    /// Highlight colours, compared case-insensitively without the leading '#'.
    pub colors: Vec<String>,
    pub classes: Vec<String>,
    /// Exact (whole-cell) lower-case texts.
    pub texts: Vec<String>,
    pub glyphs: Vec<String>,
    /// Bold+italic only counts when the row text contains this.
    pub weak_keyword: String,
}

impl Default for WinnerPolicy {
    fn default() -> Self {
        Self {
            colors: strings(&["faeb86"]),
            classes: strings(&["yes", "winner"]),
            texts: strings(&["yes", "won", "win", "winner"]),
            glyphs: strings(&["✓", "✔", "☑"]),
            weak_keyword: s!("win"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TablePolicy {
    /// A section heading must mention all of these to open the nominations section.
    pub section_terms: Vec<String>,
    /// Sub-headings mentioning any of these close off their tables.
    pub excluded_subheadings: Vec<String>,
    /// Tables whose text mentions any of these are statistics, not nominations.
    pub aggregate_phrases: Vec<String>,
    pub min_rows: usize,
    /// Longest cell text still read as a year cell; longer cells are prose.
    pub max_year_cell_chars: usize,
}

impl Default for TablePolicy {
    fn default() -> Self {
        Self {
            section_terms: strings(&["winners", "nominees"]),
            excluded_subheadings: strings(&["multiple wins", "records", "superlatives", "notes"]),
            aggregate_phrases: strings(&["most wins", "most nominations"]),
            min_rows: 3,
            max_year_cell_chars: 16,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourcePolicy {
    pub category_base: String,
    pub list_base: String,
    /// Prefix of "Nth_Academy_Awards" ceremony articles.
    pub ceremony_base: String,
    pub anchor: String,
    /// Categories whose list page is more reliable than the category article.
    pub list_first: Vec<String>,
    /// Category → page title actually used by the category article.
    pub alternate_titles: BTreeMap<String, String>,
    /// Category → curated list page URL.
    pub list_pages: BTreeMap<String, String>,
}

impl Default for SourcePolicy {
    fn default() -> Self {
        let alternate_titles = [
            ("Best_International_Feature_Film", "Best_Foreign_Language_Film"),
            ("Best_Sound", "Best_Sound_Mixing"),
            ("Best_Production_Design", "Best_Art_Direction"),
        ]
        .into_iter()
        .map(|(k, v)| (s!(k), s!(v)))
        .collect();

        let list_pages = CATEGORIES
            .iter()
            .map(|c| (s!(*c), format!("{LIST_BASE}{c}")))
            .collect();

        Self {
            category_base: s!(CATEGORY_BASE),
            list_base: s!(LIST_BASE),
            ceremony_base: s!(CEREMONY_BASE),
            anchor: s!(WINNERS_ANCHOR),
            list_first: strings(&["Best_International_Feature_Film"]),
            alternate_titles,
            list_pages,
        }
    }
}

/// Accepted infobox row labels per detail field, in precedence order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelPolicy {
    pub directors: Vec<String>,
    pub producers: Vec<String>,
    pub writers: Vec<String>,
    pub editors: Vec<String>,
    pub cinematographers: Vec<String>,
    pub composers: Vec<String>,
    pub production_companies: Vec<String>,
    pub runtime: Vec<String>,
    pub languages: Vec<String>,
    pub countries: Vec<String>,
    pub release_dates: Vec<String>,
    pub born: Vec<String>,
    pub died: Vec<String>,
    pub gender: Vec<String>,
    pub nationality: Vec<String>,
    pub venue: Vec<String>,
    pub date: Vec<String>,
    pub hosts: Vec<String>,
    pub pre_show_hosts: Vec<String>,
    pub network: Vec<String>,
    pub duration: Vec<String>,
}

impl Default for LabelPolicy {
    fn default() -> Self {
        Self {
            directors: strings(&["Directed by", "Director"]),
            producers: strings(&["Produced by", "Producer"]),
            writers: strings(&["Written by", "Screenplay by", "Writer"]),
            editors: strings(&["Edited by", "Film editor", "Editor"]),
            cinematographers: strings(&["Cinematography", "Cinematographer"]),
            composers: strings(&["Music by", "Composer"]),
            production_companies: strings(&[
                "Production company",
                "Production companies",
                "Studio",
                "Studios",
            ]),
            runtime: strings(&["Running time"]),
            languages: strings(&["Language"]),
            countries: strings(&["Country", "Countries"]),
            release_dates: strings(&["Release date", "Release dates"]),
            born: strings(&["Born"]),
            died: strings(&["Died"]),
            gender: strings(&["Gender"]),
            nationality: strings(&["Nationality", "Citizenship"]),
            venue: strings(&["Site", "Venue", "Location"]),
            date: strings(&["Date"]),
            hosts: strings(&["Hosted by", "Host"]),
            pre_show_hosts: strings(&["Preshow hosts", "Pre-show hosts", "Preshow host"]),
            network: strings(&["Television/radio coverage", "Network", "Broadcaster"]),
            duration: strings(&["Duration", "Running time"]),
        }
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s!(*s)).collect()
}
