//! On-disk cache of validated article batches.
//!
//! One JSON file per company and day. Freshness is decided by the caller,
//! who passes the maximum acceptable age on every read; the cache keeps no
//! process-wide state.

use brief_common::error::{Error, Result, ResultExt};
use brief_common::util::cache_key;
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use tracing::{debug, info};

use crate::article::{validate_articles, ArticleRecord, RawArticle};

/// Stored batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub company: String,
    pub articles: Vec<ArticleRecord>,
    /// Local time of the write, `YYYY-MM-DD HH:MM:SS`.
    pub timestamp: String,
}

/// On-disk form of an entry; articles are validated again on load.
#[derive(Deserialize)]
struct StoredEntry {
    company: String,
    articles: Vec<RawArticle>,
    timestamp: String,
}

/// Directory-backed article cache.
#[derive(Debug, Clone)]
pub struct ArticleCache {
    dir: PathBuf,
}

impl ArticleCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File holding `company`'s batch for `date`.
    pub fn entry_path(&self, company: &str, date: NaiveDate) -> PathBuf {
        self.dir.join(format!("{}.json", cache_key(company, date)))
    }

    /// Store today's batch for `company`.
    pub fn store(&self, company: &str, articles: &[ArticleRecord]) -> Result<PathBuf> {
        self.store_on(company, Local::now().date_naive(), articles)
    }

    /// Store a batch under an explicit date key.
    pub fn store_on(
        &self,
        company: &str,
        date: NaiveDate,
        articles: &[ArticleRecord],
    ) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir)
            .context(format!("creating cache directory {}", self.dir.display()))?;

        let entry = CacheEntry {
            company: company.to_string(),
            articles: articles.to_vec(),
            timestamp: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        };
        let path = self.entry_path(company, date);
        let json = serde_json::to_string_pretty(&entry)?;
        fs::write(&path, json).context(format!("writing cache entry {}", path.display()))?;

        info!(
            company = %company,
            articles = articles.len(),
            path = %path.display(),
            "Cached article batch"
        );
        Ok(path)
    }

    /// Today's batch for `company`, if present and no older than `max_age`.
    pub fn load_fresh(&self, company: &str, max_age: Duration) -> Result<Option<CacheEntry>> {
        self.load_fresh_on(company, Local::now().date_naive(), max_age)
    }

    /// Batch stored under `date`, if present and no older than `max_age`.
    pub fn load_fresh_on(
        &self,
        company: &str,
        date: NaiveDate,
        max_age: Duration,
    ) -> Result<Option<CacheEntry>> {
        let path = self.entry_path(company, date);
        if !path.exists() {
            debug!(company = %company, path = %path.display(), "Cache miss");
            return Ok(None);
        }

        let modified = fs::metadata(&path)
            .and_then(|m| m.modified())
            .context(format!("reading cache metadata {}", path.display()))?;
        // A clock that moved backwards reads as a fresh entry
        let age = SystemTime::now()
            .duration_since(modified)
            .unwrap_or(Duration::ZERO);

        if age > max_age {
            debug!(
                company = %company,
                age_secs = age.as_secs(),
                max_age_secs = max_age.as_secs(),
                "Cache entry stale"
            );
            return Ok(None);
        }

        let content =
            fs::read_to_string(&path).context(format!("reading cache entry {}", path.display()))?;
        let stored: StoredEntry = serde_json::from_str(&content)
            .context(format!("parsing cache entry {}", path.display()))?;
        let articles = validate_articles(stored.articles)
            .map_err(Error::from)
            .context(format!("validating cache entry {}", path.display()))?;
        let entry = CacheEntry {
            company: stored.company,
            articles,
            timestamp: stored.timestamp,
        };

        debug!(company = %company, articles = entry.articles.len(), "Cache hit");
        Ok(Some(entry))
    }
}
