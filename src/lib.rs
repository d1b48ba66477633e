// src/lib.rs

#[macro_use]
pub mod macros;
#[macro_use]
pub mod log;

pub mod config;
pub mod core;
pub mod records;
pub mod specs;

pub mod csv;
pub mod file;
pub mod progress;
pub mod runner;
pub mod scrape;
pub mod store;

#[cfg(feature = "cli")]
pub mod cli;

pub use crate::config::Policy;
pub use crate::core::{FetchError, HttpSource, PageSource, StaticSource};
pub use crate::records::{CeremonyRecord, EntityMention, MovieDetailRecord, NominationRecord, PersonDetailRecord};
