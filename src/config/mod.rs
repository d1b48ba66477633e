// src/config/mod.rs
pub mod consts;
pub mod options;
pub mod policy;

pub use options::{CacheOptions, CategorySelector, ExportFormat, ExportOptions, RunOptions, ScrapeOptions};
pub use policy::Policy;
