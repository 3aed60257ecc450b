//! `dictionary` — where candidate words (and their definitions) come from.
//!
//! The matcher only ever sees a [`DictionaryProvider`]: an async source that
//! yields a read-only snapshot of word → definition. Implementations:
//!
//! - [`HttpDictionary`] — fetches a JSON object from a remote URL on every call.
//! - [`CachedDictionary`] — wraps another provider and keeps the last snapshot
//!   for a fixed time-to-live.
//! - [`FileDictionary`] — reads the same JSON shape from disk (offline use).
//! - [`StaticDictionary`] — an in-memory snapshot.
//!
//! Keys are kept exactly as the source provides them; matching is
//! case-insensitive regardless.
//!
//! # Error Handling
//!
//! All failures are [`DictionaryError`] (codes D001-D004). They are never
//! retried or suppressed here.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use log::{debug, info};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};

use crate::errors::format_error_with_code_and_help;

/// Word → definition.
pub type Dictionary = HashMap<String, String>;

/// Default cache lifetime, in minutes.
pub const DEFAULT_CACHE_TTL_MINS: u64 = 60;

/// Longest slice of an error response body kept in [`DictionaryError::Status`].
const MAX_ERROR_BODY_CHARS: usize = 200;

/// Failure to obtain a dictionary snapshot.
#[derive(Debug, thiserror::Error)]
pub enum DictionaryError {
    #[error("dictionary request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("dictionary service returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("dictionary is not a JSON object of word to definition: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("failed to read dictionary from '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl DictionaryError {
    /// Returns the error code for this error variant
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            DictionaryError::Request(_) => "D001",
            DictionaryError::Status { .. } => "D002",
            DictionaryError::Decode(_) => "D003",
            DictionaryError::Io { .. } => "D004",
        }
    }

    /// Returns a helpful suggestion for this error
    #[must_use]
    pub fn help(&self) -> Option<&'static str> {
        match self {
            DictionaryError::Request(_) => Some("Check the dictionary URL and network connectivity"),
            DictionaryError::Decode(_) => Some("Expected a JSON object like {\"hello\": \"a greeting\"}"),
            DictionaryError::Status { .. } | DictionaryError::Io { .. } => None,
        }
    }

    /// Formats the error with code and optional help text
    #[must_use]
    pub fn display_detailed(&self) -> String {
        format_error_with_code_and_help(&self.to_string(), self.code(), self.help())
    }
}

/// An async source of dictionary snapshots.
#[async_trait]
pub trait DictionaryProvider: Send + Sync {
    /// Fetch the current snapshot.
    async fn fetch(&self) -> Result<Arc<Dictionary>, DictionaryError>;
}

#[async_trait]
impl<P: DictionaryProvider + ?Sized> DictionaryProvider for Arc<P> {
    async fn fetch(&self) -> Result<Arc<Dictionary>, DictionaryError> {
        (**self).fetch().await
    }
}

/// Decode a JSON word → definition object.
pub(crate) fn parse_dictionary(body: &str) -> Result<Dictionary, DictionaryError> {
    Ok(serde_json::from_str(body)?)
}

/// Remote dictionary service returning a JSON object.
#[derive(Debug, Clone)]
pub struct HttpDictionary {
    http: reqwest::Client,
    url: String,
}

impl HttpDictionary {
    /// Create a provider for `url`.
    ///
    /// # Errors
    ///
    /// [`DictionaryError::Request`] if the HTTP client cannot be built.
    pub fn new(url: impl Into<String>) -> Result<Self, DictionaryError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json, text/plain"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self { http, url: url.into() })
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl DictionaryProvider for HttpDictionary {
    async fn fetch(&self) -> Result<Arc<Dictionary>, DictionaryError> {
        debug!("Fetching dictionary from {}", self.url);
        let response = self.http.get(&self.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DictionaryError::Status {
                status: status.as_u16(),
                body: body.chars().take(MAX_ERROR_BODY_CHARS).collect(),
            });
        }

        let body = response.text().await?;
        let dictionary = parse_dictionary(&body)?;
        info!("Fetched {} dictionary entries from {}", dictionary.len(), self.url);
        Ok(Arc::new(dictionary))
    }
}

/// JSON dictionary file, re-read on every fetch.
#[derive(Debug, Clone)]
pub struct FileDictionary {
    path: PathBuf,
}

impl FileDictionary {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self { path: path.as_ref().to_path_buf() }
    }
}

#[async_trait]
impl DictionaryProvider for FileDictionary {
    async fn fetch(&self) -> Result<Arc<Dictionary>, DictionaryError> {
        let data = tokio::fs::read_to_string(&self.path).await.map_err(|source| DictionaryError::Io {
            path: self.path.clone(),
            source,
        })?;
        let dictionary = parse_dictionary(&data)?;
        info!("Loaded {} dictionary entries from {}", dictionary.len(), self.path.display());
        Ok(Arc::new(dictionary))
    }
}

/// Fixed in-memory dictionary.
#[derive(Debug, Clone, Default)]
pub struct StaticDictionary {
    dictionary: Arc<Dictionary>,
}

impl StaticDictionary {
    pub fn new(dictionary: Dictionary) -> Self {
        Self { dictionary: Arc::new(dictionary) }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for StaticDictionary {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

#[async_trait]
impl DictionaryProvider for StaticDictionary {
    async fn fetch(&self) -> Result<Arc<Dictionary>, DictionaryError> {
        Ok(Arc::clone(&self.dictionary))
    }
}

struct CacheEntry {
    dictionary: Arc<Dictionary>,
    loaded_at: Instant,
}

/// Process-wide cache in front of another provider.
///
/// One slot, absolute expiry `ttl` after the snapshot was loaded. Concurrent
/// callers that miss at the same time each fetch upstream; whichever finishes
/// last is what stays cached.
pub struct CachedDictionary<P> {
    inner: P,
    ttl: Duration,
    slot: RwLock<Option<CacheEntry>>,
}

impl<P: DictionaryProvider> CachedDictionary<P> {
    pub fn new(inner: P, ttl: Duration) -> Self {
        Self { inner, ttl, slot: RwLock::new(None) }
    }

    #[must_use]
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Drop the cached snapshot; the next fetch goes upstream.
    pub fn invalidate(&self) {
        let mut slot = self.slot.write().unwrap_or_else(PoisonError::into_inner);
        if slot.take().is_some() {
            debug!("Dictionary cache invalidated");
        }
    }

    /// The cached snapshot, if present and not expired.
    fn cached(&self) -> Option<Arc<Dictionary>> {
        let slot = self.slot.read().unwrap_or_else(PoisonError::into_inner);
        match slot.as_ref() {
            Some(entry) if entry.loaded_at.elapsed() < self.ttl => Some(Arc::clone(&entry.dictionary)),
            Some(_) => {
                debug!("Dictionary cache expired");
                None
            }
            None => None,
        }
    }
}

#[async_trait]
impl<P: DictionaryProvider> DictionaryProvider for CachedDictionary<P> {
    async fn fetch(&self) -> Result<Arc<Dictionary>, DictionaryError> {
        if let Some(dictionary) = self.cached() {
            debug!("Dictionary cache hit");
            return Ok(dictionary);
        }

        debug!("Dictionary cache miss");
        // lock is not held across the upstream await
        let dictionary = self.inner.fetch().await?;

        let mut slot = self.slot.write().unwrap_or_else(PoisonError::into_inner);
        *slot = Some(CacheEntry { dictionary: Arc::clone(&dictionary), loaded_at: Instant::now() });
        Ok(dictionary)
    }
}
