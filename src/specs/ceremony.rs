// src/specs/ceremony.rs
//
// "Nth Academy Awards" article → CeremonyRecord.

use scraper::{ElementRef, Html};

use crate::config::Policy;
use crate::records::CeremonyRecord;

use super::context::plausible_year;
use super::infobox::{extract_labeled_field, find_dates, find_infobox, iso_date, labeled_value, parse_duration};

/// 1 → "1st", 11 → "11th", 22 → "22nd"
pub fn ordinal_suffix(n: u32) -> &'static str {
    match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    }
}

/// Article URL of ceremony `edition` under `base` (".../wiki/").
pub fn ceremony_url(base: &str, edition: u32) -> String {
    format!("{base}{edition}{}_Academy_Awards", ordinal_suffix(edition))
}

/// Host/producer lists; "None" and "No host" entries are placeholders, not people.
fn people(ib: ElementRef, labels: &[String], policy: &Policy) -> Vec<String> {
    extract_labeled_field(ib, labels, policy)
        .map(|f| f.names())
        .unwrap_or_default()
        .into_iter()
        .filter(|n| {
            let lc = n.to_lowercase();
            !(lc == "none" || lc.contains("no host"))
        })
        .collect()
}

/// Place names under the venue: every line after the first, split on commas.
/// Parentheses go, their content stays; stray "and"/"in" lines are dropped.
pub fn venue_location(raw: &str) -> Vec<String> {
    raw.lines()
        .skip(1)
        .flat_map(|line| line.split(','))
        .map(|part| part.replace(['(', ')'], "").trim().to_string())
        .filter(|part| !part.is_empty() && !matches!(part.to_lowercase().as_str(), "and" | "in"))
        .collect()
}

pub fn extract_ceremony(doc: &Html, edition: u32, policy: &Policy) -> Option<CeremonyRecord> {
    let ib = find_infobox(doc)?;
    let labels = &policy.labels;

    let date = extract_labeled_field(ib, &labels.date, policy)
        .and_then(|f| find_dates(&f.raw).into_iter().next());
    let edition = i32::try_from(edition).ok()?;
    let year = date
        .as_deref()
        .and_then(|d| plausible_year(d, policy))
        .or_else(|| Some(edition + policy.edition_offset).filter(|y| policy.year_in_range(*y)));

    // A venue is a single place; the first link (or first line) names it.
    let venue_field = extract_labeled_field(ib, &labels.venue, policy);
    let venue_location = venue_field.as_ref().map(|f| venue_location(&f.raw)).unwrap_or_default();
    let venue = venue_field.and_then(|f| f.mentions.into_iter().next()).map(|m| m.name);
    let network = extract_labeled_field(ib, &labels.network, policy)
        .and_then(|f| f.mentions.into_iter().next())
        .map(|m| m.name);

    // "Host" is a substring of "Preshow hosts"; that row never names the hosts.
    let pre_show_row = labeled_value(ib, &labels.pre_show_hosts);
    let hosts = match labeled_value(ib, &labels.hosts) {
        Some(row) if Some(row) == pre_show_row => Vec::new(),
        _ => people(ib, &labels.hosts, policy),
    };

    let duration_minutes = extract_labeled_field(ib, &labels.duration, policy).and_then(|f| parse_duration(&f.raw));

    Some(CeremonyRecord {
        edition,
        year,
        date_iso: date.as_deref().and_then(iso_date),
        date,
        venue,
        venue_location,
        hosts,
        pre_show_hosts: people(ib, &labels.pre_show_hosts, policy),
        producers: people(ib, &labels.producers, policy),
        directors: people(ib, &labels.directors, policy),
        network,
        duration_minutes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suffixes() {
        let got: Vec<String> = [1, 2, 3, 4, 11, 12, 13, 21, 22, 23, 92, 111]
            .iter()
            .map(|n| format!("{n}{}", ordinal_suffix(*n)))
            .collect();
        assert_eq!(
            got,
            vec!["1st", "2nd", "3rd", "4th", "11th", "12th", "13th", "21st", "22nd", "23rd", "92nd", "111th"]
        );
        assert_eq!(
            ceremony_url("https://en.wikipedia.org/wiki/", 92),
            "https://en.wikipedia.org/wiki/92nd_Academy_Awards"
        );
    }

    #[test]
    fn ceremony_infobox() {
        let doc = Html::parse_document(
            r#"<div id="mw-content-text"><table class="infobox">
              <tr><th>Date</th><td>February 9, 2020</td></tr>
              <tr><th>Site</th><td><a href="/wiki/Dolby_Theatre">Dolby Theatre</a><br><a href="/wiki/Hollywood">Hollywood</a>, Los Angeles, California, U.S.</td></tr>
              <tr><th>Hosted by</th><td>None</td></tr>
              <tr><th>Preshow hosts</th><td><a href="/wiki/Ashley_Graham">Ashley Graham</a><br><a href="/wiki/Elaine_Welteroth">Elaine Welteroth</a></td></tr>
              <tr><th>Produced by</th><td>Lynette Howell Taylor<br>Stephanie Allain</td></tr>
              <tr><th>Directed by</th><td><a href="/wiki/Glenn_Weiss">Glenn Weiss</a></td></tr>
              <tr><th>Network</th><td><a href="/wiki/American_Broadcasting_Company">ABC</a></td></tr>
              <tr><th>Duration</th><td>3 hours, 36 minutes<sup>[1]</sup></td></tr>
            </table></div>"#,
        );
        let rec = extract_ceremony(&doc, 92, &Policy::default()).unwrap();
        assert_eq!(rec.edition, 92);
        assert_eq!(rec.year, Some(2020));
        assert_eq!(rec.date.as_deref(), Some("February 9, 2020"));
        assert_eq!(rec.date_iso.as_deref(), Some("2020-02-09"));
        assert_eq!(rec.venue.as_deref(), Some("Dolby Theatre"));
        assert_eq!(rec.venue_location, vec!["Hollywood", "Los Angeles", "California", "U.S."]);
        assert_eq!(rec.duration_minutes, Some(216));
        assert!(rec.hosts.is_empty());
        assert_eq!(rec.pre_show_hosts, vec!["Ashley Graham", "Elaine Welteroth"]);
        assert_eq!(rec.producers, vec!["Lynette Howell Taylor", "Stephanie Allain"]);
        assert_eq!(rec.directors, vec!["Glenn Weiss"]);
        assert_eq!(rec.network.as_deref(), Some("ABC"));
    }

    #[test]
    fn year_falls_back_to_edition() {
        let doc = Html::parse_document(r#"<table class="infobox"><tr><th>Site</th><td>Hollywood Roosevelt Hotel</td></tr></table>"#);
        let rec = extract_ceremony(&doc, 1, &Policy::default()).unwrap();
        assert_eq!(rec.year, Some(1929));
        assert_eq!(rec.date, None);
        assert_eq!(rec.date_iso, None);
        assert!(rec.venue_location.is_empty());
        assert_eq!(rec.duration_minutes, None);
        assert!(extract_ceremony(&Html::parse_document("<p>x</p>"), 1, &Policy::default()).is_none());
    }

    #[test]
    fn location_lines_after_the_venue() {
        assert_eq!(
            venue_location("Union Station\nDolby Theatre\nLos Angeles, California (U.S.)"),
            vec!["Dolby Theatre", "Los Angeles", "California", "U.S."]
        );
        assert_eq!(venue_location("Shrine Auditorium\nand\nLos Angeles"), vec!["Los Angeles"]);
        assert!(venue_location("Hollywood Roosevelt Hotel").is_empty());
    }
}
