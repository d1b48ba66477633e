// src/config/options.rs
use std::path::PathBuf;

use super::consts::*;

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct RunOptions {
    pub scrape: ScrapeOptions,
    pub export: ExportOptions,
    pub cache: CacheOptions,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CategorySelector {
    All,
    Some(Vec<String>),
}

impl CategorySelector {
    /// Category keys in crawl order (underscored, e.g. `Best_Picture`).
    pub fn resolve(&self) -> Vec<String> {
        match self {
            CategorySelector::All => CATEGORIES.iter().map(|c| s!(*c)).collect(),
            CategorySelector::Some(list) => list.iter().map(|c| c.trim().replace(' ', "_")).collect(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScrapeOptions {
    pub categories: CategorySelector,
    /// Follow film and person links to their detail pages.
    pub details: bool,
    /// Ceremony editions whose own pages should be read.
    pub ceremonies: Vec<u32>,
    pub workers: usize,
    /// Pause after each request, per worker; jitter is added on top.
    pub pause_ms: u64,
}

impl Default for ScrapeOptions {
    fn default() -> Self {
        Self {
            categories: CategorySelector::All,
            details: false,
            ceremonies: Vec::new(),
            workers: WORKERS,
            pause_ms: REQUEST_PAUSE_MS,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Tsv,
}

impl ExportFormat {
    pub fn ext(&self) -> &'static str {
        match self { ExportFormat::Csv => "csv", ExportFormat::Tsv => "tsv" }
    }
    pub fn delim(&self) -> char {
        match self { ExportFormat::Csv => ',', ExportFormat::Tsv => '\t' }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportOptions {
    pub format: ExportFormat,
    pub out_dir: PathBuf,
    pub include_headers: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            format: ExportFormat::Csv,
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
            include_headers: true,
        }
    }
}

impl ExportOptions {
    /// `<out_dir>/<stem>.<ext>`
    pub fn path_for(&self, stem: &str) -> PathBuf {
        self.out_dir.join(format!("{stem}.{}", self.format.ext()))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CacheOptions {
    /// `None` disables the page cache entirely.
    pub dir: Option<PathBuf>,
    /// Serve only cached pages; never touch the network.
    pub offline: bool,
}

impl Default for CacheOptions {
    fn default() -> Self {
        Self {
            dir: Some(PathBuf::from(STORE_DIR).join(PAGES_SUBDIR)),
            offline: false,
        }
    }
}
