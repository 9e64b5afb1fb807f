//! Timestamped exchange-rate cache, in memory and optionally on disk.
//!
//! Entries carry the Unix time they were fetched at. An entry is fresh while
//! its age is below the refresh interval. When a cache directory is set, the
//! whole table is mirrored to a small JSON file so a restarted process does
//! not refetch immediately.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config;
use crate::error::Result;
use crate::rates::CurrencyPair;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CachedRate {
    pub rate: f64,
    /// Seconds since the Unix epoch.
    pub fetched_at: u64,
}

impl CachedRate {
    pub fn age(&self, now: SystemTime) -> Duration {
        Duration::from_secs(unix_secs(now).saturating_sub(self.fetched_at))
    }
}

/// Exchange-rate cache shared by every caller of a provider.
pub struct RateCache {
    /// Directory holding the persisted cache file, if any.
    pub cache_dir: Option<PathBuf>,
    refresh_interval: Duration,
    entries: Mutex<HashMap<String, CachedRate>>,
    /// Serializes writers of the cache file.
    persist_lock: Mutex<()>,
}

impl RateCache {
    /// A cache that lives only as long as the process.
    pub fn in_memory(refresh_interval: Duration) -> Self {
        Self {
            cache_dir: None,
            refresh_interval,
            entries: Mutex::new(HashMap::new()),
            persist_lock: Mutex::new(()),
        }
    }

    /// A cache persisted under `cache_dir`.
    ///
    /// If `cache_dir` is `None`, uses the platform-appropriate default cache
    /// directory. Creates the directory if it does not exist and loads any
    /// previously persisted entries.
    pub fn new(cache_dir: Option<PathBuf>, refresh_interval: Duration) -> Result<Self> {
        let dir = cache_dir.unwrap_or_else(config::default_cache_dir);
        fs::create_dir_all(&dir)?;
        let entries = load_entries(&dir.join(config::RATE_CACHE_FILE));
        Ok(Self {
            cache_dir: Some(dir),
            refresh_interval,
            entries: Mutex::new(entries),
            persist_lock: Mutex::new(()),
        })
    }

    pub fn refresh_interval(&self) -> Duration {
        self.refresh_interval
    }

    pub fn file_path(&self) -> Option<PathBuf> {
        self.cache_dir
            .as_ref()
            .map(|dir| dir.join(config::RATE_CACHE_FILE))
    }

    pub fn get(&self, pair: &CurrencyPair) -> Option<CachedRate> {
        self.lock().get(&pair.to_string()).copied()
    }

    /// Whether `entry` is younger than the refresh interval. Entries stamped
    /// in the future (clock moved back, file from another machine) are stale.
    pub fn is_fresh(&self, entry: &CachedRate) -> bool {
        let now = SystemTime::now();
        entry.fetched_at <= unix_secs(now) && entry.age(now) < self.refresh_interval
    }

    /// Record a freshly fetched rate.
    ///
    /// A failure to persist is logged and otherwise ignored; the in-memory
    /// entry is still served.
    pub fn store(&self, pair: &CurrencyPair, rate: f64) -> CachedRate {
        let entry = CachedRate {
            rate,
            fetched_at: unix_secs(SystemTime::now()),
        };
        self.lock().insert(pair.to_string(), entry);
        if let Err(e) = self.persist() {
            warn!(error = %e, "failed to persist exchange-rate cache");
        }
        entry
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Forget every entry, in memory and on disk.
    pub fn clear(&self) -> Result<()> {
        let _writer = self.persist_lock.lock().unwrap_or_else(|e| e.into_inner());
        self.lock().clear();
        if let Some(path) = self.file_path() {
            if path.exists() {
                fs::remove_file(path)?;
            }
        }
        Ok(())
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, CachedRate>> {
        // Entries are plain values, so a panic mid-update cannot leave them torn.
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Write a snapshot to a temp file and rename, so readers never see a
    /// partial file. The entries lock is held only while taking the snapshot.
    fn persist(&self) -> Result<()> {
        let Some(path) = self.file_path() else {
            return Ok(());
        };
        let _writer = self.persist_lock.lock().unwrap_or_else(|e| e.into_inner());
        let snapshot = self.lock().clone();
        let tmp = path.with_extension("json.tmp");
        let result = (|| -> Result<()> {
            fs::write(&tmp, serde_json::to_vec_pretty(&snapshot)?)?;
            fs::rename(&tmp, &path)?;
            Ok(())
        })();
        if result.is_err() {
            let _ = fs::remove_file(&tmp);
        }
        result
    }
}

/// Read a persisted cache file. A corrupt file is removed and treated as empty.
fn load_entries(path: &std::path::Path) -> HashMap<String, CachedRate> {
    let Ok(contents) = fs::read_to_string(path) else {
        return HashMap::new();
    };
    match serde_json::from_str(&contents) {
        Ok(entries) => entries,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "corrupt exchange-rate cache, removing");
            let _ = fs::remove_file(path);
            HashMap::new()
        }
    }
}

fn unix_secs(time: SystemTime) -> u64 {
    time.duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
