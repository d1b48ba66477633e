// src/specs/mod.rs
//! # Page-reading "specs"
//!
//! Everything that knows where the ground truth lives in a Wikipedia page and how
//! to pull it out of loosely structured markup. The functions here are pure: they
//! take a parsed `scraper::Html` plus a [`Policy`](crate::config::Policy) and
//! return plain values. No fetching, no caching, no `Result`.
//!
//! ## Nomination tables
//! ```text
//! tables::select_nomination_tables   which wikitables hold nominations
//!   → grid::Grid                     rowspan/colspan expanded, columns stable
//!   → columns::infer_roles           header terms, else 2/3-column conventions
//!   → rows::interpret_table          per row: year context, film, people, winner
//!        ├ context::TableContext     current ceremony year/edition + ordinal
//!        ├ entities::extract_*       names and links out of one cell
//!        └ winner::is_winner         highlight/text/glyph/class/ordinal signals
//! ```
//!
//! ## Detail pages
//! `infobox` does label → value lookups; `movie`, `person` and `ceremony` build
//! one record per article on top of it.
//!
//! ## Conventions
//! - Tree walking only (`ElementRef` children/descendants); no CSS selectors.
//! - A heuristic that cannot decide is not an error: rows are skipped, fields
//!   stay empty, and the reason is logged at debug level.
//! - Every vocabulary list (header terms, colors, labels, separators, denylist) comes from
//!   the policy, never from literals in the heuristics.
//!
//! In short: **`specs` knows how to read the pages.** Other layers decide what to
//! fetch, how to cache, and how to export.
pub mod ceremony;
pub mod columns;
pub mod context;
pub mod entities;
pub mod grid;
pub mod infobox;
pub mod movie;
pub mod person;
pub mod rows;
pub mod tables;
pub mod winner;

pub use ceremony::{ceremony_url, extract_ceremony};
pub use movie::extract_movie;
pub use person::{extract_person, named_person};
pub use rows::{interpret_table, interpret_table_with_stats, TableStats};
pub use tables::{select_nomination_tables, SelectedTable};
