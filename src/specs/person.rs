// src/specs/person.rs
//
// Biography article → PersonDetailRecord.

use scraper::{ElementRef, Html};

use crate::config::Policy;
use crate::core::html::{attr, content_root, elements, find_all, has_class, is_tag, text_of};
use crate::core::sanitize::{clean, strip_footnotes, strip_parentheticals};
use crate::records::PersonDetailRecord;

use super::infobox::{find_dates, find_infobox, labeled_value, value_text};
use super::movie::page_heading;

/// "Philip Seymour Hoffman" → ("Philip", Some("Seymour"), "Hoffman").
/// Parentheticals go first; a single word is a first name with no last name.
pub fn split_name(full_name: &str) -> (String, Option<String>, String) {
    let bare = strip_parentheticals(full_name);
    let parts: Vec<&str> = bare.split_whitespace().collect();
    match parts.as_slice() {
        [] => (s!(), None, s!()),
        [only] => (s!(*only), None, s!()),
        [first, last] => (s!(*first), None, s!(*last)),
        [first, middle @ .., last] => (s!(*first), Some(middle.join(" ")), s!(*last)),
    }
}

/// A record carrying only the name (split) and link.
pub fn named_person(full_name: String, link: &str) -> PersonDetailRecord {
    let (first_name, middle_name, last_name) = split_name(&full_name);
    PersonDetailRecord { full_name, link: s!(link), first_name, middle_name, last_name, ..Default::default() }
}

pub fn extract_person(doc: &Html, link: &str, policy: &Policy) -> Option<PersonDetailRecord> {
    let full_name = page_heading(doc)?;
    let infobox = find_infobox(doc);
    let labels = &policy.labels;

    let born = infobox.and_then(|ib| labeled_value(ib, &labels.born));
    let died = infobox.and_then(|ib| labeled_value(ib, &labels.died));

    let birth_date = infobox
        .and_then(|ib| microformat_date(ib, "bday"))
        .or_else(|| born.and_then(row_date));
    let death_date = infobox
        .and_then(|ib| microformat_date(ib, "dday"))
        .or_else(|| died.and_then(row_date));

    let country = born
        .and_then(birth_country)
        .or_else(|| {
            infobox
                .and_then(|ib| labeled_value(ib, &labels.nationality))
                .map(|cell| clean(&strip_parentheticals(&value_text(cell).replace('\n', ", "))))
                .filter(|c| !c.is_empty())
        });

    let gender = infobox
        .and_then(|ib| labeled_value(ib, &labels.gender))
        .and_then(|cell| gender_word(&value_text(cell)))
        .or_else(|| lead_paragraph(doc).and_then(|p| gender_from_pronouns(&p)));

    if infobox.is_none() {
        logd!("no infobox on {link}");
    }

    Some(PersonDetailRecord { birth_date, death_date, country, gender, ..named_person(full_name, link) })
}

/// ISO date from the hidden `span.bday` / `span.dday` microformat.
fn microformat_date(ib: ElementRef, class: &str) -> Option<String> {
    elements(ib)
        .find(|e| is_tag(e, "span") && has_class(e, class))
        .map(|e| clean(&text_of(e)))
        .filter(|d| !d.is_empty())
}

fn row_date(cell: ElementRef) -> Option<String> {
    find_dates(&value_text(cell)).into_iter().next()
}

/// Last comma segment of the birthplace: the `birthplace` span when present,
/// else the final line of the Born row.
fn birth_country(born: ElementRef) -> Option<String> {
    let place = elements(born)
        .find(|e| has_class(e, "birthplace"))
        .map(text_of)
        .or_else(|| value_text(born).lines().last().map(|l| s!(l)))?;

    let place = strip_parentheticals(&strip_footnotes(&place));
    let last = place.rsplit(',').next().map(clean)?;
    // "Born" rows without a place end on the date line.
    if last.is_empty() || find_dates(&last).len() == 1 || re!(r"\d").is_match(&last) {
        return None;
    }
    Some(last)
}

fn gender_word(text: &str) -> Option<String> {
    let lc = text.to_lowercase();
    if re!(r"\b(?:female|woman)\b").is_match(&lc) {
        Some(s!("female"))
    } else if re!(r"\b(?:male|man)\b").is_match(&lc) {
        Some(s!("male"))
    } else {
        None
    }
}

/// First non-empty paragraph of the article body.
fn lead_paragraph(doc: &Html) -> Option<String> {
    find_all(content_root(doc), "p")
        .filter(|p| !has_class(p, "mw-empty-elt") && attr(p, "id").is_none())
        .map(text_of)
        .find(|t| !t.is_empty())
}

/// Majority of he/his/him versus she/her/hers; a tie decides nothing.
pub fn gender_from_pronouns(text: &str) -> Option<String> {
    let lc = text.to_lowercase();
    let male = re!(r"\b(?:he|his|him)\b").find_iter(&lc).count();
    let female = re!(r"\b(?:she|her|hers)\b").find_iter(&lc).count();
    match male.cmp(&female) {
        std::cmp::Ordering::Greater => Some(s!("male")),
        std::cmp::Ordering::Less => Some(s!("female")),
        std::cmp::Ordering::Equal => None,
    }
}
