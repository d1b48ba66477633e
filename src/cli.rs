// src/cli.rs
use std::error::Error;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use color_eyre::eyre::eyre;

use crate::config::{
    consts::{DEFAULT_OUT_DIR, LATEST_EDITION, PAGES_SUBDIR, STORE_DIR, WORKERS},
    CacheOptions, CategorySelector, ExportFormat, ExportOptions, Policy, RunOptions, ScrapeOptions,
};
use crate::progress::Progress;
use crate::runner::{self, RunSummary};

#[derive(Parser, Debug)]
#[command(
    name = "oscar_scrape",
    version,
    about = "Extract Academy Award nominations, films, people and ceremonies from Wikipedia"
)]
pub struct Cli {
    /// Category key, e.g. Best_Picture (repeatable)
    #[arg(long = "category", short = 'c')]
    pub categories: Vec<String>,

    /// Every known category
    #[arg(long, short = 'a', default_value_t = false)]
    pub all: bool,

    /// Follow film and person links
    #[arg(long, default_value_t = false)]
    pub details: bool,

    /// Ceremony editions to read, e.g. "1-10,92" or "all"
    #[arg(long)]
    pub ceremonies: Option<String>,

    #[arg(long, short = 'o', default_value = DEFAULT_OUT_DIR)]
    pub out: PathBuf,

    #[arg(long, value_enum, default_value_t = Format::Csv)]
    pub format: Format,

    #[arg(long, default_value_t = false)]
    pub no_headers: bool,

    /// TOML file overriding any part of the extraction policy
    #[arg(long)]
    pub policy: Option<PathBuf>,

    /// Print the default policy as TOML and exit
    #[arg(long, default_value_t = false)]
    pub dump_policy: bool,

    /// Page cache directory
    #[arg(long)]
    pub cache: Option<PathBuf>,

    #[arg(long, default_value_t = false)]
    pub no_cache: bool,

    /// Serve only cached pages
    #[arg(long, default_value_t = false)]
    pub offline: bool,

    #[arg(long, default_value_t = WORKERS)]
    pub workers: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Csv,
    Tsv,
}

impl Cli {
    pub fn to_options(&self) -> Result<RunOptions, Box<dyn Error>> {
        let categories = if self.all {
            CategorySelector::All
        } else if self.categories.is_empty() && self.ceremonies.is_none() {
            return Err("nothing to do: pass --category, --all or --ceremonies".into());
        } else {
            CategorySelector::Some(self.categories.clone())
        };

        let ceremonies = match &self.ceremonies {
            Some(list) => parse_ids_list(list)?,
            None => Vec::new(),
        };

        let cache = CacheOptions {
            dir: if self.no_cache {
                None
            } else {
                Some(self.cache.clone().unwrap_or_else(|| PathBuf::from(STORE_DIR).join(PAGES_SUBDIR)))
            },
            offline: self.offline,
        };

        Ok(RunOptions {
            scrape: ScrapeOptions {
                categories,
                details: self.details,
                ceremonies,
                workers: self.workers.max(1),
                ..Default::default()
            },
            export: ExportOptions {
                format: match self.format {
                    Format::Csv => ExportFormat::Csv,
                    Format::Tsv => ExportFormat::Tsv,
                },
                out_dir: self.out.clone(),
                include_headers: !self.no_headers,
            },
            cache,
        })
    }
}

/// Progress lines on stderr.
struct CliProgress {
    phase: String,
    total: usize,
    done: usize,
}

impl Progress for CliProgress {
    fn begin(&mut self, phase: &str, total: usize) {
        self.phase = s!(phase);
        self.total = total;
        self.done = 0;
        eprintln!("{phase}: {total} to go");
    }
    fn log(&mut self, msg: &str) {
        eprintln!("{msg}");
    }
    fn item_done(&mut self, label: &str) {
        self.done += 1;
        eprintln!("[{} {}/{}] {label}", self.phase, self.done, self.total);
    }
    fn item_failed(&mut self, label: &str, reason: &str) {
        self.done += 1;
        eprintln!("[{} {}/{}] {label}: {reason}", self.phase, self.done, self.total);
    }
}

pub fn run() -> color_eyre::Result<()> {
    let cli = Cli::parse();
    if cli.dump_policy {
        print!("{}", Policy::default().to_toml().map_err(|e| eyre!("{e}"))?);
        return Ok(());
    }

    let policy = match &cli.policy {
        Some(path) => Policy::load(path).map_err(|e| eyre!("policy {}: {e}", path.display()))?,
        None => Policy::default(),
    };
    let opts = cli.to_options().map_err(|e| eyre!("{e}"))?;
    let source = runner::build_source(&opts.cache).map_err(|e| eyre!("{e}"))?;

    let mut progress = CliProgress { phase: s!(), total: 0, done: 0 };
    let summary = runner::run(&opts, &policy, source.as_ref(), Some(&mut progress)).map_err(|e| {
        loge!("run failed: {e}");
        eyre!("{e}")
    })?;
    print_summary(&summary);
    Ok(())
}

fn print_summary(summary: &RunSummary) {
    println!(
        "{} nominations ({} winners), {} films, {} people, {} ceremonies",
        summary.nominations, summary.winners, summary.movies, summary.persons, summary.ceremonies
    );
    println!(
        "rows: {} read, {} skipped (header {}, separator {}, before year {}, no film {})",
        summary.stats.rows,
        summary.stats.skipped(),
        summary.stats.header_rows,
        summary.stats.separator_rows,
        summary.stats.awaiting_year,
        summary.stats.no_film
    );
    if !summary.empty_categories.is_empty() {
        println!("no nominations found for: {}", summary.empty_categories.join(", "));
    }
}

/// "1-3,92, 95" → [1, 2, 3, 92, 95]; "all" → every edition. Sorted, deduplicated.
pub fn parse_ids_list(s: &str) -> Result<Vec<u32>, Box<dyn Error>> {
    if s.trim().eq_ignore_ascii_case("all") {
        return Ok((1..=LATEST_EDITION).collect());
    }
    let mut out = Vec::new();
    for part in s.split(',') {
        let part = part.trim();
        if part.is_empty() { continue; }
        if let Some(dash) = part.find('-') {
            let a: u32 = part[..dash].trim().parse()?;
            let b: u32 = part[dash + 1..].trim().parse()?;
            if a > b { return Err(format!("Invalid range: {}", part).into()); }
            out.extend((a..=b).filter(|v| *v >= 1));
        } else {
            let v: u32 = part.parse()?;
            if v >= 1 { out.push(v); }
        }
    }
    out.sort_unstable();
    out.dedup();
    Ok(out)
}
