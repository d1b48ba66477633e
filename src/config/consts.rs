// src/config/consts.rs

// Net config
pub const WIKI_BASE: &str = "https://en.wikipedia.org";
pub const CATEGORY_BASE: &str = "https://en.wikipedia.org/wiki/Academy_Award_for_";
pub const LIST_BASE: &str = "https://en.wikipedia.org/wiki/List_of_Academy_Award_winners_and_nominees_for_";
pub const CEREMONY_BASE: &str = "https://en.wikipedia.org/wiki/";
pub const WINNERS_ANCHOR: &str = "#Winners_and_nominees";
pub const USER_AGENT: &str = "oscar_scrape/0.3 (batch research crawl)";
pub const HTTP_TIMEOUT_SECS: u64 = 20;
pub const FETCH_ATTEMPTS: u32 = 5;
pub const BACKOFF_STEP_MS: u64 = 2_000;

// Local cache
pub const STORE_DIR: &str = ".store";
pub const PAGES_SUBDIR: &str = "pages";
pub const LOG_FILE: &str = "debug.log";

// Ceremony years (first ceremony honoured 1927/28 films)
pub const FIRST_CEREMONY_YEAR: i32 = 1927;
pub const LAST_CEREMONY_YEAR: i32 = 2024;
pub const EDITION_OFFSET: i32 = 1928;
pub const LATEST_EDITION: u32 = 97;

// Export
pub const DEFAULT_OUT_DIR: &str = "out";
pub const NOMINATIONS_FILE: &str = "nominations";
pub const MOVIES_FILE: &str = "movies";
pub const PERSONS_FILE: &str = "persons";
pub const CEREMONIES_FILE: &str = "ceremonies";
pub const LIST_SEP: &str = "; ";

// Concurrency
pub const WORKERS: usize = 4;
pub const REQUEST_PAUSE_MS: u64 = 750; // be polite
pub const JITTER_MS: u64 = 500; // extra 0..500 ms

// Categories crawled by --all
pub const CATEGORIES: &[&str] = &[
    "Best_Picture",
    "Best_Director",
    "Best_Actor",
    "Best_Actress",
    "Best_Supporting_Actor",
    "Best_Supporting_Actress",
    "Best_Original_Screenplay",
    "Best_Adapted_Screenplay",
    "Best_Animated_Feature",
    "Best_International_Feature_Film",
    "Best_Documentary_Feature_Film",
    "Best_Original_Score",
    "Best_Original_Song",
    "Best_Cinematography",
    "Best_Film_Editing",
    "Best_Production_Design",
    "Best_Costume_Design",
    "Best_Makeup_and_Hairstyling",
    "Best_Sound",
    "Best_Visual_Effects",
];
