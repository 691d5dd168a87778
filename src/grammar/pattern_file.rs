use std::{
    fs,
    path::Path,
};

use log::{
    info,
    warn,
};
use regex::Regex;
use serde::Deserialize;
use serde_hjson::from_str;

use crate::{
    core::BunsekiError,
    proficiency::ProficiencyTier,
};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternDefinition {
    pub pattern: String,
    pub regex: String,
    pub description: String,
    pub jlpt_level: String,
    pub example: String,
    #[serde(default)]
    pub note: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PatternData {
    patterns: Vec<PatternDefinition>,
}

/// A pattern definition from the data file with its regex compiled.
#[derive(Debug, Clone)]
pub struct SupplementaryPattern {
    pub id: String,
    pub regex: Regex,
    pub description: String,
    pub tier: ProficiencyTier,
    pub example: String,
    pub note: Option<String>,
}

impl SupplementaryPattern {
    pub fn compile(def: PatternDefinition) -> Result<Self, BunsekiError> {
        let regex = Regex::new(&def.regex)?;
        let tier = def.jlpt_level.parse().unwrap_or_else(|_| {
            warn!("Pattern '{}' has unknown level '{}'", def.pattern, def.jlpt_level);
            ProficiencyTier::Unknown
        });

        Ok(Self {
            id: def.pattern,
            regex,
            description: def.description,
            tier,
            example: def.example,
            note: def.note,
        })
    }
}

/// Parses `{ patterns: [...] }`. Entries whose regex does not compile are skipped.
pub fn parse_patterns(content: &str) -> Result<Vec<SupplementaryPattern>, BunsekiError> {
    let data: PatternData = from_str(content)?;

    Ok(data
        .patterns
        .into_iter()
        .filter_map(|def| {
            let id = def.pattern.clone();
            match SupplementaryPattern::compile(def) {
                Ok(pattern) => Some(pattern),
                Err(e) => {
                    warn!("Skipping grammar pattern '{}': {}", id, e);
                    None
                }
            }
        })
        .collect())
}

/// Missing or malformed files leave only the built-in rules.
pub fn load_patterns(path: &Path) -> Vec<SupplementaryPattern> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(_) => {
            warn!("Grammar patterns file not found at {}", path.display());
            return Vec::new();
        }
    };

    match parse_patterns(&content) {
        Ok(patterns) => {
            info!("Loaded {} supplementary grammar patterns", patterns.len());
            patterns
        }
        Err(e) => {
            warn!("Failed to parse grammar patterns file {}: {}", path.display(), e);
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PATTERNS: &str = r#"
    {
      patterns: [
        {
          pattern: ～ことがある
          regex: "[たっ]ことがある"
          description: Past experience, "have done before".
          jlptLevel: N4
          example: 日本に行ったことがある
        }
        {
          pattern: broken
          regex: "(unclosed"
          description: never compiles
          jlptLevel: N5
          example: x
        }
        {
          pattern: ～ばかり
          regex: ばかり
          description: "Only, nothing but."
          jlptLevel: N9
          example: 遊んでばかり
          note: Often critical in tone.
        }
      ]
    }
    "#;

    #[test]
    fn test_invalid_entries_are_skipped() {
        let patterns = parse_patterns(PATTERNS).unwrap();
        assert_eq!(patterns.len(), 2);
        assert_eq!(patterns[0].id, "～ことがある");
        assert_eq!(patterns[0].tier, ProficiencyTier::N4);
        assert!(patterns[0].regex.is_match("行ったことがある"));
        assert_eq!(patterns[1].tier, ProficiencyTier::Unknown);
        assert_eq!(patterns[1].note.as_deref(), Some("Often critical in tone."));
    }

    #[test]
    fn test_malformed_file_degrades() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("grammar_patterns.hjson");
        fs::write(&path, "{ patterns: [ {").unwrap();

        assert!(load_patterns(&path).is_empty());
        assert!(load_patterns(&dir.path().join("missing.hjson")).is_empty());
    }
}
