// src/specs/movie.rs
//
// Film article → MovieDetailRecord.

use scraper::{ElementRef, Html};

use crate::config::Policy;
use crate::core::html::{attr, content_root, elements, find_all, has_class, is_tag, text_of};
use crate::core::sanitize::{clean, clean_name};
use crate::records::{EntityMention, MovieDetailRecord};

use super::infobox::{extract_labeled_field, find_infobox, parse_release_dates, parse_runtime};

/// `None` when the page has neither a title nor an infobox (not a film article).
pub fn extract_movie(doc: &Html, link: &str, policy: &Policy) -> Option<MovieDetailRecord> {
    let infobox = find_infobox(doc);
    let title = infobox
        .and_then(infobox_title)
        .or_else(|| page_heading(doc))
        .unwrap_or_default();
    if title.is_empty() && infobox.is_none() {
        return None;
    }

    let mut rec = MovieDetailRecord { title, link: s!(link), ..Default::default() };
    let Some(ib) = infobox else {
        logd!("no infobox on {link}");
        return Some(rec);
    };

    let labels = &policy.labels;
    let mentions = |variants: &[String]| mentions_of(ib, variants, policy);
    let names = |variants: &[String]| names_of(ib, variants, policy);

    rec.directors = mentions(&labels.directors);
    rec.producers = mentions(&labels.producers);
    rec.writers = mentions(&labels.writers);
    rec.editors = mentions(&labels.editors);
    rec.cinematographers = mentions(&labels.cinematographers);
    rec.composers = mentions(&labels.composers);
    rec.languages = names(&labels.languages);
    rec.countries = names(&labels.countries);
    rec.production_companies = dedup(names(&labels.production_companies));
    rec.runtime_minutes =
        extract_labeled_field(ib, &labels.runtime, policy).and_then(|f| parse_runtime(&f.raw));
    rec.release_dates = extract_labeled_field(ib, &labels.release_dates, policy)
        .map(|f| parse_release_dates(&f))
        .unwrap_or_default();

    Some(rec)
}

fn mentions_of(ib: ElementRef, variants: &[String], policy: &Policy) -> Vec<EntityMention> {
    extract_labeled_field(ib, variants, policy).map(|f| f.mentions).unwrap_or_default()
}

fn names_of(ib: ElementRef, variants: &[String], policy: &Policy) -> Vec<String> {
    extract_labeled_field(ib, variants, policy).map(|f| f.names()).unwrap_or_default()
}

/// Caption row of the infobox (`th.infobox-above`, or the `summary` style).
fn infobox_title(ib: ElementRef) -> Option<String> {
    elements(ib)
        .find(|e| is_tag(e, "th") && (has_class(e, "infobox-above") || has_class(e, "summary")))
        .or_else(|| find_all(ib, "caption").next())
        .map(|e| clean(&text_of(e)))
        .filter(|t| !t.is_empty())
}

/// `h1#firstHeading` with any disambiguating "(2019 film)" removed.
pub fn page_heading(doc: &Html) -> Option<String> {
    let root = doc.root_element();
    elements(root)
        .find(|e| is_tag(e, "h1") && attr(e, "id") == Some("firstHeading"))
        .map(|h| clean_name(&text_of(h)))
        .filter(|t| !t.is_empty())
        .or_else(|| {
            elements(content_root(doc))
                .find(|e| is_tag(e, "h1"))
                .map(|h| clean_name(&text_of(h)))
                .filter(|t| !t.is_empty())
        })
}

fn dedup(items: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(items.len());
    for item in items {
        if !out.contains(&item) {
            out.push(item);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<html><body>
      <h1 id="firstHeading">Parasite (2019 film)</h1>
      <div id="mw-content-text">
      <table class="infobox vevent">
        <tr><th colspan="2" class="infobox-above summary">Parasite</th></tr>
        <tr><th>Directed by</th><td><a href="/wiki/Bong_Joon-ho">Bong Joon-ho</a></td></tr>
        <tr><th>Screenplay by</th><td><a href="/wiki/Bong_Joon-ho">Bong Joon-ho</a><br><a href="/wiki/Han_Jin-won">Han Jin-won</a></td></tr>
        <tr><th>Produced by</th><td>Kwak Sin-ae<br>Moon Yang-kwon</td></tr>
        <tr><th>Cinematography</th><td><a href="/wiki/Hong_Kyung-pyo">Hong Kyung-pyo</a></td></tr>
        <tr><th>Production<br>companies</th><td><a href="/wiki/Barunson_E%26A">Barunson E&amp;A</a><br><a href="/wiki/Barunson_E%26A">Barunson E&amp;A</a></td></tr>
        <tr><th>Release dates</th><td>May 21, 2019 (Cannes)<br>May 30, 2019 (South Korea)</td></tr>
        <tr><th>Running time</th><td>132 minutes</td></tr>
        <tr><th>Country</th><td>South Korea</td></tr>
        <tr><th>Language</th><td>Korean</td></tr>
      </table>
      <p>Parasite is a 2019 film.</p>
      </div></body></html>"#;

    #[test]
    fn film_infobox_fields() {
        let doc = Html::parse_document(PAGE);
        let rec = extract_movie(&doc, "https://en.wikipedia.org/wiki/Parasite_(2019_film)", &Policy::default()).unwrap();
        assert_eq!(rec.title, "Parasite");
        assert_eq!(rec.runtime_minutes, Some(132));
        assert_eq!(rec.languages, vec!["Korean"]);
        assert_eq!(rec.countries, vec!["South Korea"]);
        assert_eq!(rec.release_dates, vec!["May 21, 2019", "May 30, 2019"]);
        assert_eq!(rec.directors[0].name, "Bong Joon-ho");
        assert_eq!(rec.writers.len(), 2);
        let producers: Vec<_> = rec.producers.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(producers, vec!["Kwak Sin-ae", "Moon Yang-kwon"]);
        assert_eq!(rec.cinematographers.len(), 1);
        assert!(rec.editors.is_empty());
        assert_eq!(rec.production_companies, vec!["Barunson E&A"]);
    }

    #[test]
    fn page_without_infobox_keeps_title_only() {
        let doc = Html::parse_document(r#"<h1 id="firstHeading">Wings (1927 film)</h1><div id="mw-content-text"><p>x</p></div>"#);
        let rec = extract_movie(&doc, "u", &Policy::default()).unwrap();
        assert_eq!(rec.title, "Wings");
        assert_eq!(rec.runtime_minutes, None);
        assert!(extract_movie(&Html::parse_document("<p>nothing</p>"), "u", &Policy::default()).is_none());
    }
}
