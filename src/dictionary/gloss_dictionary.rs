use std::{
    collections::HashMap,
    path::Path,
};

use log::{
    info,
    warn,
};

use crate::{
    persistence::load_json,
    translation::{
        GlossSource,
        ResolveError,
    },
};

/// Bulk word -> gloss dictionary shipped as a data file.
#[derive(Debug, Default)]
pub struct GlossDictionary {
    entries: HashMap<String, String>,
}

impl GlossDictionary {
    pub fn new(entries: HashMap<String, String>) -> Self {
        Self { entries }
    }

    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            warn!("Vocabulary dictionary not found at {}", path.display());
            return Self::default();
        }

        match load_json::<HashMap<String, String>>(path) {
            Ok(entries) => {
                info!("Loaded vocabulary dictionary with {} entries", entries.len());
                Self { entries }
            }
            Err(e) => {
                warn!("Failed to load vocabulary dictionary {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn get(&self, word: &str) -> Option<&str> {
        self.entries.get(word).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl GlossSource for GlossDictionary {
    fn name(&self) -> &'static str {
        "dictionary"
    }

    fn caches_results(&self) -> bool {
        true
    }

    fn try_resolve(&self, word: &str) -> Result<Option<String>, ResolveError> {
        Ok(self.get(word).map(str::to_string))
    }
}
