use std::{
    collections::HashMap,
    sync::{
        Mutex,
        MutexGuard,
    },
};

use chrono::{
    DateTime,
    Duration,
    Local,
};
use log::{
    debug,
    info,
};

use super::Explanation;
use crate::config::AiSettings;

#[derive(Debug, Clone)]
struct CachedExplanation {
    explanation: Explanation,
    stored_at: DateTime<Local>,
}

/// In-memory cache for generated explanations. Entries expire after `ttl`;
/// when full, the oldest entry makes room for the new one.
#[derive(Debug)]
pub struct ExplanationCache {
    entries: Mutex<HashMap<u64, CachedExplanation>>,
    capacity: usize,
    ttl: Duration,
}

impl Default for ExplanationCache {
    fn default() -> Self {
        Self::new(500, Duration::hours(24))
    }
}

impl ExplanationCache {
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        Self { entries: Mutex::new(HashMap::new()), capacity: capacity.max(1), ttl }
    }

    pub fn from_settings(settings: &AiSettings) -> Self {
        Self::new(settings.cache_capacity, Duration::hours(settings.cache_ttl_hours))
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<u64, CachedExplanation>> {
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn get(&self, key: u64) -> Option<Explanation> {
        self.get_at(key, Local::now())
    }

    pub fn insert(&self, key: u64, explanation: Explanation) {
        self.insert_at(key, explanation, Local::now());
    }

    pub fn get_at(&self, key: u64, now: DateTime<Local>) -> Option<Explanation> {
        let mut entries = self.lock();
        let cached = entries.get(&key)?;

        if now - cached.stored_at > self.ttl {
            entries.remove(&key);
            debug!("Cached explanation {:016x} expired", key);
            return None;
        }

        info!("Explanation cache hit for {:016x}", key);
        Some(cached.explanation.clone())
    }

    pub fn insert_at(&self, key: u64, explanation: Explanation, now: DateTime<Local>) {
        let mut entries = self.lock();

        if !entries.contains_key(&key) && entries.len() >= self.capacity {
            let oldest = entries.iter().min_by_key(|(_, cached)| cached.stored_at).map(|(k, _)| *k);
            if let Some(oldest) = oldest {
                entries.remove(&oldest);
                debug!("Explanation cache full, evicted {:016x}", oldest);
            }
        }

        entries.insert(key, CachedExplanation { explanation, stored_at: now });
        info!("Cached explanation ({}/{})", entries.len(), self.capacity);
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::explanation::ExplanationSource;

    fn explanation(summary: &str) -> Explanation {
        Explanation {
            summary: summary.to_string(),
            grammar_notes: Vec::new(),
            vocab_notes: Vec::new(),
            cultural_context: None,
            study_tips: String::new(),
            register_note: String::new(),
            source: ExplanationSource::Generated,
        }
    }

    #[test]
    fn test_entries_expire_after_ttl() {
        let cache = ExplanationCache::new(10, Duration::hours(24));
        let stored = Local::now();
        cache.insert_at(1, explanation("a"), stored);

        assert!(cache.get_at(1, stored + Duration::hours(23)).is_some());
        assert!(cache.get_at(1, stored + Duration::hours(25)).is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_oldest_entry_is_evicted() {
        let cache = ExplanationCache::new(2, Duration::hours(24));
        let start = Local::now();
        cache.insert_at(1, explanation("first"), start);
        cache.insert_at(2, explanation("second"), start + Duration::minutes(1));
        cache.insert_at(3, explanation("third"), start + Duration::minutes(2));

        let now = start + Duration::minutes(3);
        assert_eq!(cache.len(), 2);
        assert!(cache.get_at(1, now).is_none());
        assert_eq!(cache.get_at(3, now).map(|e| e.summary), Some("third".to_string()));
    }

    #[test]
    fn test_overwrite_does_not_evict() {
        let cache = ExplanationCache::new(2, Duration::hours(24));
        let now = Local::now();
        cache.insert_at(1, explanation("a"), now);
        cache.insert_at(2, explanation("b"), now);
        cache.insert_at(2, explanation("b2"), now);

        assert_eq!(cache.len(), 2);
        assert!(cache.get_at(1, now).is_some());
    }
}
