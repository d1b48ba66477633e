// src/scrape/mod.rs
mod category;
mod details;
mod pool;

pub use category::{collect_categories, extract_category, extract_category_detailed, extract_page, CategoryResult, CategorySources};
pub use details::{collect_ceremonies, collect_movies, collect_persons, movie_targets, person_targets};
pub use pool::{run_pool, PoolConfig};
