//! Release check for the tool itself
//!
//! The latest release is looked up at most once a day; the answer is kept in
//! a small JSON file:
//!
//! ```json
//! {
//!   "checked_at": "2026-10-16T08:12:54Z",
//!   "latest_version": "2.1.0"
//! }
//! ```
//!
//! Failures never reach the status bar: an unreadable cache is stale, and a
//! failed lookup means "no upgrade".

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use jeedom_core::{HubVersion, VersionError};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

/// Page redirecting to the latest release
pub const DEFAULT_RELEASE_URL: &str = "https://github.com/deimosfr/jeedom-status/releases/latest";

/// File name of the cache in the temporary directory
pub const CACHE_FILE_NAME: &str = "jeedom-status";

/// Age in hours after which the cached answer is refreshed
pub const MAX_CACHE_AGE_HOURS: i64 = 24;

const RELEASE_TIMEOUT: Duration = Duration::from_secs(5);

/// Version check errors
#[derive(Debug, Error)]
pub enum VersionCheckError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("can't reach {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("no version in release URL {url}")]
    NoVersionInUrl { url: String },

    #[error(transparent)]
    Version(#[from] VersionError),
}

/// Result type for version checks
pub type VersionCheckResult<T> = Result<T, VersionCheckError>;

/// Last answer of the release lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedVersion {
    pub checked_at: DateTime<Utc>,
    pub latest_version: String,
}

/// Storage for the last release lookup
pub trait VersionCache {
    /// The stored answer, if any can be read
    fn read_current(&self) -> Option<CachedVersion>;

    /// Store a new answer
    fn write_new(&self, latest_version: &str, checked_at: DateTime<Utc>)
        -> VersionCheckResult<()>;

    /// Whether the stored answer must be refreshed
    fn is_stale(&self, now: DateTime<Utc>) -> bool {
        match self.read_current() {
            Some(cached) => {
                now - cached.checked_at > chrono::Duration::hours(MAX_CACHE_AGE_HOURS)
            }
            None => true,
        }
    }
}

/// [`VersionCache`] kept in a JSON file
#[derive(Debug, Clone)]
pub struct FileVersionCache {
    path: PathBuf,
}

impl FileVersionCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<temp dir>/jeedom-status`
    pub fn default_path() -> PathBuf {
        std::env::temp_dir().join(CACHE_FILE_NAME)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> VersionCheckResult<CachedVersion> {
        let content = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

impl Default for FileVersionCache {
    fn default() -> Self {
        Self::new(Self::default_path())
    }
}

impl VersionCache for FileVersionCache {
    fn read_current(&self) -> Option<CachedVersion> {
        match self.load() {
            Ok(cached) => Some(cached),
            Err(e) => {
                debug!("No usable version cache at {:?}: {}", self.path, e);
                None
            }
        }
    }

    fn write_new(
        &self,
        latest_version: &str,
        checked_at: DateTime<Utc>,
    ) -> VersionCheckResult<()> {
        let cached = CachedVersion {
            checked_at,
            latest_version: latest_version.to_string(),
        };
        let content = serde_json::to_string_pretty(&cached)?;

        // Write to a sibling temp file first, then rename over the cache
        let mut temp_path = self.path.clone().into_os_string();
        temp_path.push(".tmp");
        fs::write(&temp_path, content)?;
        fs::rename(&temp_path, &self.path)?;

        debug!("Saved version cache {:?}: {}", self.path, latest_version);
        Ok(())
    }
}

/// Where the latest release version comes from
#[async_trait]
pub trait ReleaseSource {
    async fn latest_version(&self) -> VersionCheckResult<String>;
}

/// GitHub `releases/latest` page, which redirects to `.../tag/v<version>`
#[derive(Debug, Clone)]
pub struct GithubReleases {
    http: reqwest::Client,
    url: String,
}

impl GithubReleases {
    pub fn new(url: impl Into<String>) -> VersionCheckResult<Self> {
        let url = url.into();
        let http = reqwest::Client::builder()
            .timeout(RELEASE_TIMEOUT)
            .build()
            .map_err(|source| VersionCheckError::Fetch {
                url: url.clone(),
                source,
            })?;
        Ok(Self { http, url })
    }
}

#[async_trait]
impl ReleaseSource for GithubReleases {
    async fn latest_version(&self) -> VersionCheckResult<String> {
        let fetch_error = |source| VersionCheckError::Fetch {
            url: self.url.clone(),
            source,
        };

        let response = self
            .http
            .get(&self.url)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(fetch_error)?;

        let final_url = response.url().clone();
        debug!("Latest release resolved to {}", final_url);
        version_from_release_path(final_url.path()).ok_or_else(|| {
            VersionCheckError::NoVersionInUrl {
                url: final_url.to_string(),
            }
        })
    }
}

/// Text after the last `/v` of a release path
fn version_from_release_path(path: &str) -> Option<String> {
    let (_, version) = path.rsplit_once("/v")?;
    let version = version.trim_end_matches('/');
    (!version.is_empty()).then(|| version.to_string())
}

/// Outcome of a version check
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpgradeCheck {
    /// A strictly newer release exists
    pub available: bool,
    /// Latest known release, when one could be determined
    pub latest: Option<String>,
}

/// Compare the running version with the latest release
///
/// A fresh cache answers without any request. Otherwise the release source is
/// asked and its answer stored.
pub async fn check_for_upgrade<C, S>(
    current: &str,
    cache: &C,
    source: &S,
    now: DateTime<Utc>,
) -> UpgradeCheck
where
    C: VersionCache + ?Sized,
    S: ReleaseSource + ?Sized,
{
    let cached = if cache.is_stale(now) {
        None
    } else {
        cache.read_current()
    };

    let latest = match cached {
        Some(cached) => {
            debug!("Using cached latest version {}", cached.latest_version);
            cached.latest_version
        }
        None => match source.latest_version().await {
            Ok(latest) => {
                if let Err(e) = cache.write_new(&latest, now) {
                    warn!("Failed to store the version check: {}", e);
                }
                latest
            }
            Err(e) => {
                debug!("Version check failed: {}", e);
                return UpgradeCheck::default();
            }
        },
    };

    match is_newer(current, &latest) {
        Ok(available) => UpgradeCheck {
            available,
            latest: Some(latest),
        },
        Err(e) => {
            warn!("Can't compare versions {} and {}: {}", current, latest, e);
            UpgradeCheck::default()
        }
    }
}

fn is_newer(current: &str, latest: &str) -> VersionCheckResult<bool> {
    let current: HubVersion = current.parse()?;
    let latest: HubVersion = latest.parse()?;
    Ok(latest > current)
}
