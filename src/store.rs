// src/store.rs
//
// On-disk page cache. Bodies live under `<dir>/<key>.html` where the key is
// derived from the URL without its fragment, so `Page#Winners` and `Page`
// share one entry.

use std::{fs, io, path::{Path, PathBuf}};

use crate::core::net::{FetchError, PageSource, strip_fragment};
use crate::core::sanitize::file_stem_for_url;

pub struct CachedSource<S> {
    inner: S,
    dir: PathBuf,
    offline: bool,
}

impl<S: PageSource> CachedSource<S> {
    pub fn new(inner: S, dir: impl Into<PathBuf>) -> Self {
        Self { inner, dir: dir.into(), offline: false }
    }

    /// Serve only what is already cached.
    pub fn offline(mut self, offline: bool) -> Self {
        self.offline = offline;
        self
    }

    pub fn path_for(&self, url: &str) -> PathBuf {
        self.dir.join(format!("{}.html", file_stem_for_url(url)))
    }

    fn save(&self, path: &Path, body: &str) -> io::Result<()> {
        if !self.dir.as_os_str().is_empty() {
            fs::create_dir_all(&self.dir)?;
        }
        fs::write(path, body)
    }
}

impl<S: PageSource> PageSource for CachedSource<S> {
    fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let path = self.path_for(url);
        match fs::read_to_string(&path) {
            Ok(body) => {
                logd!("cache hit {}", path.display());
                return Ok(body);
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(source) => return Err(FetchError::Cache { url: s!(url), source }),
        }

        if self.offline {
            return Err(FetchError::NotCached { url: s!(url) });
        }

        let body = self.inner.fetch(strip_fragment(url))?;
        // A failed write only costs a refetch next time.
        if let Err(e) = self.save(&path, &body) {
            logw!("could not cache {url} at {}: {e}", path.display());
        }
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::net::StaticSource;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Counting {
        inner: StaticSource,
        hits: AtomicUsize,
    }

    impl PageSource for Counting {
        fn fetch(&self, url: &str) -> Result<String, FetchError> {
            self.hits.fetch_add(1, Ordering::SeqCst);
            self.inner.fetch(url)
        }
    }

    fn temp_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("oscar_scrape_cache_{tag}_{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn second_fetch_is_served_from_disk() {
        let dir = temp_dir("hit");
        let counting = Counting {
            inner: StaticSource::new().with_page("https://x/wiki/A", "<p>A</p>"),
            hits: AtomicUsize::new(0),
        };
        let cache = CachedSource::new(&counting, &dir);
        assert_eq!(cache.fetch("https://x/wiki/A#Winners").unwrap(), "<p>A</p>");
        assert_eq!(cache.fetch("https://x/wiki/A").unwrap(), "<p>A</p>");
        assert_eq!(counting.hits.load(Ordering::SeqCst), 1);
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn offline_miss_is_an_error() {
        let dir = temp_dir("offline");
        let cache = CachedSource::new(StaticSource::new(), &dir).offline(true);
        assert!(matches!(cache.fetch("https://x/wiki/B"), Err(FetchError::NotCached { .. })));
    }
}
