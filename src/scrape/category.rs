// src/scrape/category.rs
//
// One award category → its nominations, trying the known page layouts in turn.

use scraper::Html;

use crate::config::Policy;
use crate::core::PageSource;
use crate::progress::Progress;
use crate::records::NominationRecord;
use crate::specs::{interpret_table_with_stats, select_nomination_tables, TableStats};

use super::pool::{run_pool, PoolConfig};

/// Candidate URLs for one category, in the order they are tried.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CategorySources {
    pub category: String,
    pub candidates: Vec<String>,
}

impl CategorySources {
    /// Category article (with the winners anchor, then without), the curated list
    /// page if one is registered, then the generic list page. Categories marked
    /// `list_first` put their list pages in front.
    pub fn for_category(category: &str, policy: &Policy) -> Self {
        let sp = &policy.sources;
        let title = sp.alternate_titles.get(category).map(String::as_str).unwrap_or(category);
        let article = format!("{}{title}", sp.category_base);

        let mut lists = Vec::new();
        if let Some(curated) = sp.list_pages.get(category) {
            lists.push(curated.clone());
        }
        lists.push(format!("{}{category}", sp.list_base));

        let articles = vec![format!("{article}{}", sp.anchor), article];
        let ordered: Vec<String> = if sp.list_first.iter().any(|c| c == category) {
            lists.into_iter().chain(articles).collect()
        } else {
            articles.into_iter().chain(lists).collect()
        };

        let mut candidates: Vec<String> = Vec::with_capacity(ordered.len());
        for url in ordered {
            if !candidates.contains(&url) {
                candidates.push(url);
            }
        }
        Self { category: s!(category), candidates }
    }
}

/// All nominations on one already-fetched page. A page without nomination
/// tables yields nothing.
pub fn extract_page(html: &str, category: &str, policy: &Policy) -> (Vec<NominationRecord>, TableStats) {
    let doc = Html::parse_document(html);
    let mut records = Vec::new();
    let mut stats = TableStats::default();
    for table in select_nomination_tables(&doc, policy) {
        let (mut recs, st) = interpret_table_with_stats(&table, category, policy);
        records.append(&mut recs);
        stats.add(&st);
    }
    (records, stats)
}

/// Outcome of one category crawl, for summaries.
#[derive(Clone, Debug, Default)]
pub struct CategoryResult {
    pub category: String,
    pub records: Vec<NominationRecord>,
    /// The candidate that produced `records`; `None` if every candidate came up empty.
    pub source_url: Option<String>,
    pub stats: TableStats,
}

/// First candidate with a non-empty result wins; results are never merged.
/// A failed fetch counts as an empty result.
pub fn extract_category<S: PageSource + ?Sized>(category: &str, source: &S, policy: &Policy) -> Vec<NominationRecord> {
    extract_category_detailed(category, source, policy).records
}

pub fn extract_category_detailed<S: PageSource + ?Sized>(
    category: &str,
    source: &S,
    policy: &Policy,
) -> CategoryResult {
    let sources = CategorySources::for_category(category, policy);
    let mut result = CategoryResult { category: s!(category), ..Default::default() };

    for url in &sources.candidates {
        let html = match source.fetch(url) {
            Ok(html) => html,
            Err(e) => {
                logw!("{category}: {e}");
                continue;
            }
        };
        let (records, stats) = extract_page(&html, category, policy);
        if records.is_empty() {
            logd!("{category}: nothing usable at {url}");
            continue;
        }
        logf!(
            "{category}: {} nominations ({} winners) from {url}, {} rows skipped",
            records.len(),
            stats.winners,
            stats.skipped()
        );
        result.records = records;
        result.stats = stats;
        result.source_url = Some(url.clone());
        return result;
    }

    logw!("{category}: no source yielded nominations");
    result
}

/// Every category through its own fallback chain, categories in parallel.
/// Results keep the order of `categories`.
pub fn collect_categories<S: PageSource + ?Sized>(
    categories: &[String],
    source: &S,
    policy: &Policy,
    cfg: PoolConfig,
    mut progress: Option<&mut (dyn Progress + '_)>,
) -> Vec<CategoryResult> {
    if let Some(p) = progress.as_deref_mut() {
        p.begin("categories", categories.len());
    }

    let results = run_pool(
        categories,
        cfg,
        |category| extract_category_detailed(category, source, policy),
        |category, result| {
            let Some(p) = progress.as_deref_mut() else { return };
            if result.records.is_empty() {
                p.item_failed(category, "no source yielded nominations");
            } else {
                p.item_done(category);
            }
        },
    );

    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }
    results
}
