// src/scrape/details.rs
//
// Follow film, person and ceremony links. Each page is fetched and parsed
// inside the worker that asked for it; only records cross threads.

use scraper::Html;

use crate::config::Policy;
use crate::core::PageSource;
use crate::progress::Progress;
use crate::records::{CeremonyRecord, EntityMention, MovieDetailRecord, NominationRecord, PersonDetailRecord};
use crate::specs::{ceremony_url, extract_ceremony, extract_movie, extract_person, named_person};

use super::pool::{run_pool, PoolConfig};

/// Distinct linked films, first mention wins.
pub fn movie_targets(nominations: &[NominationRecord]) -> Vec<EntityMention> {
    let mut out: Vec<EntityMention> = Vec::new();
    for n in nominations {
        let Some(link) = &n.film_link else { continue };
        if !out.iter().any(|m| m.link.as_ref() == Some(link)) {
            out.push(EntityMention::new(n.film_title.clone(), Some(link.clone())));
        }
    }
    out
}

/// Distinct linked people across all nominations, first mention wins.
pub fn person_targets(nominations: &[NominationRecord]) -> Vec<EntityMention> {
    let mut out: Vec<EntityMention> = Vec::new();
    for person in nominations.iter().flat_map(|n| &n.people) {
        if person.link.is_some() && !out.iter().any(|m| m.link == person.link) {
            out.push(person.clone());
        }
    }
    out
}

fn report<R>(progress: &mut Option<&mut (dyn Progress + '_)>, label: &str, result: &Result<R, String>) {
    let Some(p) = progress.as_deref_mut() else { return };
    match result {
        Ok(_) => p.item_done(label),
        Err(reason) => p.item_failed(label, reason),
    }
}

pub fn collect_movies<S: PageSource + ?Sized>(
    targets: &[EntityMention],
    source: &S,
    policy: &Policy,
    cfg: PoolConfig,
    mut progress: Option<&mut (dyn Progress + '_)>,
) -> Vec<MovieDetailRecord> {
    if let Some(p) = progress.as_deref_mut() {
        p.begin("films", targets.len());
    }

    let results = run_pool(
        targets,
        cfg,
        |film| {
            let link = film.link.as_deref().unwrap_or_default();
            let html = source.fetch(link).map_err(|e| e.to_string())?;
            let doc = Html::parse_document(&html);
            match extract_movie(&doc, link, policy) {
                Some(mut rec) => {
                    if rec.title.is_empty() {
                        rec.title = film.name.clone();
                    }
                    Ok(rec)
                }
                None => Err(s!("not a film article")),
            }
        },
        |film, result| {
            if let Err(reason) = result {
                logw!("film {:?}: {reason}", film.name);
            }
            report(&mut progress, &film.name, result);
        },
    );

    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }
    results.into_iter().flatten().collect()
}

/// A person whose page can't be read still gets a record carrying the name
/// the nomination used.
pub fn collect_persons<S: PageSource + ?Sized>(
    targets: &[EntityMention],
    source: &S,
    policy: &Policy,
    cfg: PoolConfig,
    mut progress: Option<&mut (dyn Progress + '_)>,
) -> Vec<PersonDetailRecord> {
    if let Some(p) = progress.as_deref_mut() {
        p.begin("people", targets.len());
    }

    let results = run_pool(
        targets,
        cfg,
        |person| {
            let link = person.link.as_deref().unwrap_or_default();
            let html = source.fetch(link).map_err(|e| e.to_string())?;
            let doc = Html::parse_document(&html);
            extract_person(&doc, link, policy).ok_or_else(|| s!("no page heading"))
        },
        |person, result| report(&mut progress, &person.name, result),
    );

    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }

    targets
        .iter()
        .zip(results)
        .map(|(person, result)| match result {
            Ok(rec) => rec,
            Err(reason) => {
                logd!("person {:?}: {reason}; keeping the nominated name", person.name);
                named_person(person.name.clone(), person.link.as_deref().unwrap_or_default())
            }
        })
        .collect()
}

pub fn collect_ceremonies<S: PageSource + ?Sized>(
    editions: &[u32],
    source: &S,
    policy: &Policy,
    cfg: PoolConfig,
    mut progress: Option<&mut (dyn Progress + '_)>,
) -> Vec<CeremonyRecord> {
    if let Some(p) = progress.as_deref_mut() {
        p.begin("ceremonies", editions.len());
    }

    let results = run_pool(
        editions,
        cfg,
        |edition| {
            let url = ceremony_url(&policy.sources.ceremony_base, *edition);
            let html = source.fetch(&url).map_err(|e| e.to_string())?;
            let doc = Html::parse_document(&html);
            extract_ceremony(&doc, *edition, policy).ok_or_else(|| s!("no infobox"))
        },
        |edition, result| {
            if let Err(reason) = result {
                logw!("ceremony {edition}: {reason}");
            }
            report(&mut progress, &edition.to_string(), result);
        },
    );

    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }
    results.into_iter().flatten().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::StaticSource;
    use crate::progress::RecordingProgress;

    const CFG: PoolConfig = PoolConfig { workers: 2, pause_ms: 0 };

    fn nom(film: &str, link: Option<&str>, people: Vec<EntityMention>) -> NominationRecord {
        NominationRecord {
            category: s!("Best Director"),
            film_title: s!(film),
            film_link: link.map(|l| s!(l)),
            people,
            is_winner: false,
            edition: Some(92),
            ceremony_year: Some(2020),
            ordinal: 1,
        }
    }

    #[test]
    fn targets_are_distinct_and_linked() {
        let bong = EntityMention::new("Bong Joon-ho", Some(s!("https://x/wiki/Bong")));
        let noms = vec![
            nom("Parasite", Some("https://x/wiki/Parasite"), vec![bong.clone()]),
            nom("Parasite", Some("https://x/wiki/Parasite"), vec![bong.clone(), EntityMention::unlinked("Kwak")]),
            nom("Unlinked", None, vec![]),
        ];
        assert_eq!(movie_targets(&noms).len(), 1);
        assert_eq!(person_targets(&noms), vec![bong]);
    }

    #[test]
    fn unreadable_person_keeps_nominated_name() {
        let source = StaticSource::new().with_page(
            "https://x/wiki/Bong",
            r#"<h1 id="firstHeading">Bong Joon-ho</h1><div id="mw-content-text"><p>He directs.</p></div>"#,
        );
        let targets = vec![
            EntityMention::new("Bong Joon-ho", Some(s!("https://x/wiki/Bong"))),
            EntityMention::new("Han Jin-won", Some(s!("https://x/wiki/Han"))),
        ];
        let mut progress = RecordingProgress::default();
        let recs = collect_persons(&targets, &source, &Policy::default(), CFG, Some(&mut progress));
        assert_eq!(recs.len(), 2);
        assert_eq!(recs[0].gender.as_deref(), Some("male"));
        assert_eq!(recs[1].full_name, "Han Jin-won");
        assert_eq!(recs[1].link, "https://x/wiki/Han");
        assert_eq!(progress.failed, vec!["Han Jin-won"]);
        assert_eq!(progress.phases, vec![(s!("people"), 2)]);
    }

    #[test]
    fn ceremonies_by_edition() {
        let source = StaticSource::new().with_page(
            "https://en.wikipedia.org/wiki/92nd_Academy_Awards",
            r#"<table class="infobox"><tr><th>Date</th><td>February 9, 2020</td></tr></table>"#,
        );
        let recs = collect_ceremonies(&[92, 93], &source, &Policy::default(), CFG, None);
        assert_eq!(recs.len(), 1);
        assert_eq!((recs[0].edition, recs[0].year), (92, Some(2020)));
    }
}
