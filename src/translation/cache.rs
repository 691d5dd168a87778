use std::{
    collections::HashMap,
    path::{
        Path,
        PathBuf,
    },
    sync::{
        atomic::{
            AtomicBool,
            Ordering,
        },
        Mutex,
        MutexGuard,
    },
};

use log::{
    error,
    info,
};

use super::{
    GlossSource,
    ResolveError,
};
use crate::persistence::{
    load_json,
    save_json,
};

/// Word -> gloss cache shared by all requests, persisted as a JSON object.
///
/// Concurrent inserts of the same word are last-write-wins; the value for a
/// given word does not depend on who resolved it.
#[derive(Debug, Default)]
pub struct TranslationCache {
    path: Option<PathBuf>,
    entries: Mutex<HashMap<String, String>>,
    dirty: AtomicBool,
    /// Held for the whole snapshot and write so flushes never interleave.
    write_lock: Mutex<()>,
}

impl TranslationCache {
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// A missing or unreadable file starts an empty cache that still writes back to `path`.
    pub fn load(path: &Path) -> Self {
        let entries = match load_json::<HashMap<String, String>>(path) {
            Ok(entries) => {
                if entries.is_empty() {
                    info!("No translation cache found at {}, starting fresh", path.display());
                } else {
                    info!("Loaded translation cache with {} entries", entries.len());
                }
                entries
            }
            Err(e) => {
                error!("Failed to parse translation cache {}: {}", path.display(), e);
                HashMap::new()
            }
        };

        Self {
            path: Some(path.to_path_buf()),
            entries: Mutex::new(entries),
            dirty: AtomicBool::new(false),
            write_lock: Mutex::new(()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, String>> {
        // A poisoned map still holds valid glosses
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn get(&self, word: &str) -> Option<String> {
        self.lock().get(word).cloned()
    }

    pub fn insert(&self, word: &str, gloss: &str) {
        self.lock().insert(word.to_string(), gloss.to_string());
        self.dirty.store(true, Ordering::Release);
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::Acquire)
    }

    /// Writes the cache back if it changed. Best-effort: errors are logged and
    /// reported as `false`, never raised.
    pub fn flush(&self) -> bool {
        let Some(path) = &self.path else {
            return true;
        };

        let _writing = self.write_lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        if !self.dirty.swap(false, Ordering::AcqRel) {
            return true;
        }

        let snapshot = self.lock().clone();
        match save_json(&snapshot, path) {
            Ok(()) => {
                info!("Saved translation cache with {} entries", snapshot.len());
                true
            }
            Err(e) => {
                error!("Failed to save translation cache to {}: {}", path.display(), e);
                self.dirty.store(true, Ordering::Release);
                false
            }
        }
    }
}

impl GlossSource for TranslationCache {
    fn name(&self) -> &'static str {
        "cache"
    }

    fn try_resolve(&self, word: &str) -> Result<Option<String>, ResolveError> {
        Ok(self.get(word))
    }
}
