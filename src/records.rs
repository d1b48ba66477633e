// src/records.rs
//
// Records produced by the extraction engine. They are flat on purpose:
// identity reconciliation and id assignment belong to whoever consumes them.
//
// Each record knows its export shape (`headers()` + `to_row()`), so the
// writers in `file.rs` stay generic over record kind.

use crate::config::consts::LIST_SEP;

/// A name as it appeared on the page plus its absolute link target, if any.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct EntityMention {
    pub name: String,
    pub link: Option<String>,
}

impl EntityMention {
    pub fn new(name: impl Into<String>, link: Option<String>) -> Self {
        Self { name: name.into(), link }
    }

    pub fn unlinked(name: impl Into<String>) -> Self {
        Self { name: name.into(), link: None }
    }
}

/// One nominee row of one category table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NominationRecord {
    /// Display form, e.g. "Best Picture".
    pub category: String,
    pub film_title: String,
    pub film_link: Option<String>,
    pub people: Vec<EntityMention>,
    pub is_winner: bool,
    pub edition: Option<i32>,
    pub ceremony_year: Option<i32>,
    /// 1-based position among the ceremony year's nominees in its table.
    pub ordinal: u32,
}

impl NominationRecord {
    pub fn headers() -> Vec<String> {
        to_strings(&[
            "Category", "Edition", "Year", "Film", "Film Link", "People", "People Links", "Winner", "Ordinal",
        ])
    }

    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.category.clone(),
            opt_num(self.edition),
            opt_num(self.ceremony_year),
            self.film_title.clone(),
            self.film_link.clone().unwrap_or_default(),
            join_names(&self.people),
            join_links(&self.people),
            s!(if self.is_winner { "yes" } else { "no" }),
            self.ordinal.to_string(),
        ]
    }
}

/// Value pulled from one infobox row: linked mentions if the row had links,
/// otherwise the separator-split text as unlinked mentions. `raw` keeps the
/// cleaned row text for pattern extraction (runtime, dates).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LabeledField {
    pub mentions: Vec<EntityMention>,
    pub raw: String,
}

impl LabeledField {
    pub fn names(&self) -> Vec<String> {
        self.mentions.iter().map(|m| m.name.clone()).collect()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MovieDetailRecord {
    pub title: String,
    /// Source page; lets the consumer join back to nominations.
    pub link: String,
    pub runtime_minutes: Option<u32>,
    pub languages: Vec<String>,
    pub countries: Vec<String>,
    pub release_dates: Vec<String>,
    pub directors: Vec<EntityMention>,
    pub producers: Vec<EntityMention>,
    pub writers: Vec<EntityMention>,
    pub editors: Vec<EntityMention>,
    pub cinematographers: Vec<EntityMention>,
    pub composers: Vec<EntityMention>,
    pub production_companies: Vec<String>,
}

impl MovieDetailRecord {
    pub fn headers() -> Vec<String> {
        to_strings(&[
            "Title",
            "Link",
            "Runtime (min)",
            "Languages",
            "Countries",
            "Release Dates",
            "Directors",
            "Producers",
            "Writers",
            "Editors",
            "Cinematographers",
            "Composers",
            "Production Companies",
        ])
    }

    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.title.clone(),
            self.link.clone(),
            self.runtime_minutes.map(|m| m.to_string()).unwrap_or_default(),
            self.languages.join(LIST_SEP),
            self.countries.join(LIST_SEP),
            self.release_dates.join(LIST_SEP),
            join_names(&self.directors),
            join_names(&self.producers),
            join_names(&self.writers),
            join_names(&self.editors),
            join_names(&self.cinematographers),
            join_names(&self.composers),
            self.production_companies.join(LIST_SEP),
        ]
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PersonDetailRecord {
    pub full_name: String,
    pub link: String,
    /// ISO `YYYY-MM-DD` when the page carries a machine-readable date,
    /// else the date text as written.
    pub birth_date: Option<String>,
    pub death_date: Option<String>,
    pub country: Option<String>,
    pub gender: Option<String>,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
}

impl PersonDetailRecord {
    pub fn headers() -> Vec<String> {
        to_strings(&[
            "Name", "Link", "Born", "Died", "Country", "Gender", "First Name", "Middle Name", "Last Name",
        ])
    }

    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.full_name.clone(),
            self.link.clone(),
            self.birth_date.clone().unwrap_or_default(),
            self.death_date.clone().unwrap_or_default(),
            self.country.clone().unwrap_or_default(),
            self.gender.clone().unwrap_or_default(),
            self.first_name.clone(),
            self.middle_name.clone().unwrap_or_default(),
            self.last_name.clone(),
        ]
    }
}

/// One ceremony, from its "Nth Academy Awards" article.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CeremonyRecord {
    pub edition: i32,
    pub year: Option<i32>,
    /// As written on the page.
    pub date: Option<String>,
    /// `date` as `YYYY-MM-DD`.
    pub date_iso: Option<String>,
    pub venue: Option<String>,
    /// Place names listed under the venue, in page order ("Los Angeles", "California", "U.S.").
    pub venue_location: Vec<String>,
    pub hosts: Vec<String>,
    pub pre_show_hosts: Vec<String>,
    pub producers: Vec<String>,
    pub directors: Vec<String>,
    pub network: Option<String>,
    pub duration_minutes: Option<u32>,
}

impl CeremonyRecord {
    pub fn headers() -> Vec<String> {
        to_strings(&[
            "Edition",
            "Year",
            "Date",
            "ISO Date",
            "Venue",
            "Venue Location",
            "Hosts",
            "Pre-show Hosts",
            "Producers",
            "Directors",
            "Network",
            "Duration (min)",
        ])
    }

    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.edition.to_string(),
            opt_num(self.year),
            self.date.clone().unwrap_or_default(),
            self.date_iso.clone().unwrap_or_default(),
            self.venue.clone().unwrap_or_default(),
            self.venue_location.join(LIST_SEP),
            self.hosts.join(LIST_SEP),
            self.pre_show_hosts.join(LIST_SEP),
            self.producers.join(LIST_SEP),
            self.directors.join(LIST_SEP),
            self.network.clone().unwrap_or_default(),
            self.duration_minutes.map(|m| m.to_string()).unwrap_or_default(),
        ]
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s!(*s)).collect()
}

fn opt_num(v: Option<i32>) -> String {
    v.map(|n| n.to_string()).unwrap_or_default()
}

fn join_names(people: &[EntityMention]) -> String {
    people.iter().map(|p| p.name.as_str()).collect::<Vec<_>>().join(LIST_SEP)
}

/// Links aligned with `join_names`; unlinked entries leave an empty slot.
fn join_links(people: &[EntityMention]) -> String {
    people
        .iter()
        .map(|p| p.link.as_deref().unwrap_or(""))
        .collect::<Vec<_>>()
        .join(LIST_SEP)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nomination_row_matches_headers() {
        let rec = NominationRecord {
            category: s!("Best Director"),
            film_title: s!("Parasite"),
            film_link: Some(s!("https://en.wikipedia.org/wiki/Parasite_(2019_film)")),
            people: vec![
                EntityMention::new("Bong Joon-ho", Some(s!("https://en.wikipedia.org/wiki/Bong_Joon-ho"))),
                EntityMention::unlinked("Han Jin-won"),
            ],
            is_winner: true,
            edition: Some(92),
            ceremony_year: Some(2020),
            ordinal: 1,
        };
        let row = rec.to_row();
        assert_eq!(row.len(), NominationRecord::headers().len());
        assert_eq!(row[1], "92");
        assert_eq!(row[5], "Bong Joon-ho; Han Jin-won");
        assert_eq!(row[6], "https://en.wikipedia.org/wiki/Bong_Joon-ho; ");
        assert_eq!(row[7], "yes");
    }

    #[test]
    fn empty_details_render_blank_cells() {
        let row = MovieDetailRecord::default().to_row();
        assert_eq!(row.len(), MovieDetailRecord::headers().len());
        assert!(row.iter().all(String::is_empty));
        assert_eq!(PersonDetailRecord::default().to_row().len(), PersonDetailRecord::headers().len());
        assert_eq!(CeremonyRecord::default().to_row()[0], "0");
        assert_eq!(CeremonyRecord::default().to_row().len(), CeremonyRecord::headers().len());
    }

    #[test]
    fn ceremony_row_carries_location_and_duration() {
        let rec = CeremonyRecord {
            edition: 92,
            date_iso: Some(s!("2020-02-09")),
            venue_location: vec![s!("Los Angeles"), s!("California"), s!("U.S.")],
            duration_minutes: Some(211),
            ..Default::default()
        };
        let row = rec.to_row();
        assert_eq!(row[3], "2020-02-09");
        assert_eq!(row[5], "Los Angeles; California; U.S.");
        assert_eq!(row.last().map(String::as_str), Some("211"));
    }
}
