// src/runner.rs
use std::error::Error;
use std::path::PathBuf;

use crate::{
    config::{CacheOptions, Policy, RunOptions},
    core::{HttpSource, PageSource},
    file::{write_ceremonies, write_movies, write_nominations, write_persons},
    progress::Progress,
    scrape::{self, PoolConfig},
    specs::TableStats,
    store::CachedSource,
};

/// Summary of what was produced.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub files_written: Vec<PathBuf>,
    pub nominations: usize,
    pub winners: usize,
    pub movies: usize,
    pub persons: usize,
    pub ceremonies: usize,
    /// Categories for which no candidate page yielded anything.
    pub empty_categories: Vec<String>,
    pub stats: TableStats,
}

fn wrote(summary: &mut RunSummary, progress: Option<&mut (dyn Progress + '_)>, path: PathBuf) {
    if let Some(p) = progress {
        p.log(&format!("wrote {}", path.display()));
    }
    summary.files_written.push(path);
}

/// The page source the options ask for: HTTP, behind the on-disk cache unless disabled.
pub fn build_source(cache: &CacheOptions) -> Result<Box<dyn PageSource>, Box<dyn Error>> {
    match &cache.dir {
        Some(dir) => Ok(Box::new(CachedSource::new(HttpSource::new(), dir.clone()).offline(cache.offline))),
        None if cache.offline => Err("--offline needs a cache directory".into()),
        None => Ok(Box::new(HttpSource::new())),
    }
}

/// Top-level runner: categories, then (optionally) detail pages and ceremonies,
/// then one export file per record kind that has anything in it.
/// `progress` can be None (no UI updates) or Some(&mut impl Progress).
pub fn run<S: PageSource + ?Sized>(
    opts: &RunOptions,
    policy: &Policy,
    source: &S,
    mut progress: Option<&mut dyn Progress>,
) -> Result<RunSummary, Box<dyn Error>> {
    let cfg = PoolConfig { workers: opts.scrape.workers, pause_ms: opts.scrape.pause_ms };
    let categories = opts.scrape.categories.resolve();
    let mut summary = RunSummary::default();

    let results = scrape::collect_categories(&categories, source, policy, cfg, progress.as_deref_mut());
    let mut nominations = Vec::new();
    for mut r in results {
        if r.records.is_empty() {
            summary.empty_categories.push(r.category);
            continue;
        }
        summary.stats.add(&r.stats);
        nominations.append(&mut r.records);
    }
    summary.nominations = nominations.len();
    summary.winners = nominations.iter().filter(|n| n.is_winner).count();
    if !nominations.is_empty() {
        wrote(&mut summary, progress.as_deref_mut(), write_nominations(&opts.export, &nominations)?);
    }

    if opts.scrape.details {
        let films = scrape::movie_targets(&nominations);
        let movies = scrape::collect_movies(&films, source, policy, cfg, progress.as_deref_mut());
        summary.movies = movies.len();
        if !movies.is_empty() {
            wrote(&mut summary, progress.as_deref_mut(), write_movies(&opts.export, &movies)?);
        }

        let people = scrape::person_targets(&nominations);
        let persons = scrape::collect_persons(&people, source, policy, cfg, progress.as_deref_mut());
        summary.persons = persons.len();
        if !persons.is_empty() {
            wrote(&mut summary, progress.as_deref_mut(), write_persons(&opts.export, &persons)?);
        }
    }

    if !opts.scrape.ceremonies.is_empty() {
        let ceremonies = scrape::collect_ceremonies(&opts.scrape.ceremonies, source, policy, cfg, progress.as_deref_mut());
        summary.ceremonies = ceremonies.len();
        if !ceremonies.is_empty() {
            wrote(&mut summary, progress.as_deref_mut(), write_ceremonies(&opts.export, &ceremonies)?);
        }
    }

    logf!(
        "run done: {} nominations ({} winners), {} films, {} people, {} ceremonies; {} categories empty",
        summary.nominations,
        summary.winners,
        summary.movies,
        summary.persons,
        summary.ceremonies,
        summary.empty_categories.len()
    );
    Ok(summary)
}
