use std::{
    collections::{
        HashMap,
        HashSet,
    },
    fs,
    path::Path,
};

use log::{
    info,
    warn,
};

use crate::{
    core::BunsekiError,
    proficiency::ProficiencyTier,
};

/// JLPT word lists keyed by tier. Read-only once loaded.
#[derive(Debug, Default, Clone)]
pub struct TierWordLists {
    lists: HashMap<ProficiencyTier, HashSet<String>>,
}

impl TierWordLists {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses `{"N5": [...], "N4": [...], ...}`. Unrecognised keys are skipped.
    pub fn from_json(json: &str) -> Result<Self, BunsekiError> {
        let raw: HashMap<String, Vec<String>> = serde_json::from_str(json)?;
        let mut lists = TierWordLists::new();

        for (level, words) in raw {
            match level.parse::<ProficiencyTier>() {
                Ok(tier) if tier.is_classified() => lists.extend(tier, words),
                _ => warn!("Ignoring unrecognised JLPT level '{}' in word lists", level),
            }
        }

        Ok(lists)
    }

    /// Missing or malformed files degrade to empty lists, so every word is Unknown.
    pub fn load(path: &Path) -> Self {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                warn!("JLPT data file not available at {}: {}", path.display(), e);
                return Self::default();
            }
        };

        match Self::from_json(&content) {
            Ok(lists) => {
                info!(
                    "Loaded JLPT vocabulary data: {} words across {} levels",
                    lists.total_words(),
                    lists.lists.len()
                );
                lists
            }
            Err(e) => {
                warn!("Failed to parse JLPT data file {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn extend(&mut self, tier: ProficiencyTier, words: impl IntoIterator<Item = String>) {
        self.lists.entry(tier).or_default().extend(words);
    }

    pub fn with_words(mut self, tier: ProficiencyTier, words: &[&str]) -> Self {
        self.extend(tier, words.iter().map(|w| w.to_string()));
        self
    }

    pub fn contains(&self, tier: ProficiencyTier, word: &str) -> bool {
        self.lists.get(&tier).is_some_and(|words| words.contains(word))
    }

    pub fn total_words(&self) -> usize {
        self.lists.values().map(HashSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total_words() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json() {
        let lists = TierWordLists::from_json(
            r#"{"N5": ["私", "勉強"], "N4": ["授業"], "N9": ["x"]}"#,
        )
        .unwrap();
        assert!(lists.contains(ProficiencyTier::N5, "勉強"));
        assert!(lists.contains(ProficiencyTier::N4, "授業"));
        assert!(!lists.contains(ProficiencyTier::N1, "授業"));
        assert_eq!(lists.total_words(), 3);
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let lists = TierWordLists::load(&dir.path().join("missing.json"));
        assert!(lists.is_empty());
    }
}
