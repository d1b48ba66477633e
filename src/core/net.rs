// src/core/net.rs
//
// Page sources. The extraction engine never fetches; callers hand it bodies
// obtained through a `PageSource`.

use std::collections::HashMap;
use std::io;
use std::thread;
use std::time::Duration;

use thiserror::Error;

use crate::config::consts::{BACKOFF_STEP_MS, FETCH_ATTEMPTS, HTTP_TIMEOUT_SECS, USER_AGENT};

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("transport error for {url}: {message}")]
    Transport { url: String, message: String },

    #[error("reading body of {url}: {source}")]
    Body {
        url: String,
        #[source]
        source: io::Error,
    },

    #[error("{url} is not in the page cache (offline)")]
    NotCached { url: String },

    #[error("page cache I/O for {url}: {source}")]
    Cache {
        url: String,
        #[source]
        source: io::Error,
    },
}

impl FetchError {
    /// Worth another attempt: rate limiting, server hiccups, transport failures.
    pub fn is_transient(&self) -> bool {
        match self {
            FetchError::Status { status, .. } => matches!(status, 408 | 429 | 500 | 502 | 503 | 504),
            FetchError::Transport { .. } | FetchError::Body { .. } => true,
            FetchError::NotCached { .. } | FetchError::Cache { .. } => false,
        }
    }
}

/// Anything that can turn a URL into an HTML body.
pub trait PageSource: Send + Sync {
    fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

impl<S: PageSource + ?Sized> PageSource for &S {
    fn fetch(&self, url: &str) -> Result<String, FetchError> {
        (**self).fetch(url)
    }
}

/// Blocking HTTP source with retry and linear backoff.
pub struct HttpSource {
    agent: ureq::Agent,
    attempts: u32,
    backoff_step: Duration,
}

impl Default for HttpSource {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpSource {
    pub fn new() -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .build();
        Self {
            agent,
            attempts: FETCH_ATTEMPTS,
            backoff_step: Duration::from_millis(BACKOFF_STEP_MS),
        }
    }

    fn get_once(&self, url: &str) -> Result<String, FetchError> {
        match self.agent.get(url).call() {
            Ok(resp) => resp
                .into_string()
                .map_err(|source| FetchError::Body { url: s!(url), source }),
            Err(ureq::Error::Status(status, _)) => Err(FetchError::Status { url: s!(url), status }),
            Err(ureq::Error::Transport(t)) => Err(FetchError::Transport {
                url: s!(url),
                message: t.to_string(),
            }),
        }
    }
}

impl PageSource for HttpSource {
    fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let mut attempt = 1;
        loop {
            match self.get_once(url) {
                Ok(body) => {
                    logd!("fetched {url} ({} bytes, attempt {attempt})", body.len());
                    return Ok(body);
                }
                Err(e) if e.is_transient() && attempt < self.attempts => {
                    let wait = self.backoff_step * attempt;
                    logw!("fetch attempt {attempt}/{} failed: {e}; retrying in {wait:?}", self.attempts);
                    thread::sleep(wait);
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

/// In-memory source keyed by URL (fragment ignored). For tests and fixtures.
#[derive(Default, Clone)]
pub struct StaticSource {
    pages: HashMap<String, String>,
}

impl StaticSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, url: &str, body: impl Into<String>) -> Self {
        self.pages.insert(s!(strip_fragment(url)), body.into());
        self
    }
}

impl PageSource for StaticSource {
    fn fetch(&self, url: &str) -> Result<String, FetchError> {
        self.pages
            .get(strip_fragment(url))
            .cloned()
            .ok_or_else(|| FetchError::Status { url: s!(url), status: 404 })
    }
}

/// `https://x/wiki/A#B` → `https://x/wiki/A`
pub fn strip_fragment(url: &str) -> &str {
    url.split('#').next().unwrap_or(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transient_classification() {
        let st = |status| FetchError::Status { url: s!("u"), status };
        assert!(st(503).is_transient());
        assert!(st(429).is_transient());
        assert!(!st(404).is_transient());
        assert!(!FetchError::NotCached { url: s!("u") }.is_transient());
    }

    #[test]
    fn static_source_ignores_fragment() {
        let src = StaticSource::new().with_page("https://x/wiki/A", "<p>a</p>");
        assert_eq!(src.fetch("https://x/wiki/A#Winners").unwrap(), "<p>a</p>");
        assert!(matches!(src.fetch("https://x/wiki/B"), Err(FetchError::Status { status: 404, .. })));
    }
}
