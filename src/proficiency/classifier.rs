use std::sync::Arc;

use crate::{
    core::{
        Token,
        VocabularyEntry,
    },
    dictionary::TierWordLists,
    proficiency::ProficiencyTier,
};

const MAX_TOKENS_N5: usize = 8;
const MAX_TOKENS_N4: usize = 15;

/// Maps words and sentences to JLPT tiers using injected word lists.
#[derive(Debug, Clone)]
pub struct ProficiencyClassifier {
    word_lists: Arc<TierWordLists>,
}

impl ProficiencyClassifier {
    pub fn new(word_lists: Arc<TierWordLists>) -> Self {
        Self { word_lists }
    }

    /// Easiest tier whose list contains the word, preferring `base_form` when given.
    pub fn classify_word(&self, word: &str, base_form: Option<&str>) -> ProficiencyTier {
        let lookup = base_form.filter(|b| !b.is_empty()).unwrap_or(word);

        ProficiencyTier::ORDERED
            .into_iter()
            .find(|tier| self.word_lists.contains(*tier, lookup))
            .unwrap_or(ProficiencyTier::Unknown)
    }

    /// Sentence tier from the vocabulary tiers, with a token-count fallback
    /// when no vocabulary was extracted.
    pub fn classify_sentence(tokens: &[Token], vocabulary: &[VocabularyEntry]) -> ProficiencyTier {
        if vocabulary.is_empty() {
            return match tokens.len() {
                n if n <= MAX_TOKENS_N5 => ProficiencyTier::N5,
                n if n <= MAX_TOKENS_N4 => ProficiencyTier::N4,
                _ => ProficiencyTier::N3,
            };
        }

        let count = |tier: ProficiencyTier| vocabulary.iter().filter(|v| v.tier == tier).count();

        // A single N1 word decides the whole sentence
        if count(ProficiencyTier::N1) > 0 {
            return ProficiencyTier::N1;
        }

        let total_weight: u32 = vocabulary.iter().map(|v| v.tier.weight()).sum();
        let average_weight = total_weight as f32 / vocabulary.len() as f32;
        let n2_count = count(ProficiencyTier::N2);

        if n2_count >= 2 || average_weight >= 4.0 {
            ProficiencyTier::N2
        } else if n2_count >= 1 || average_weight >= 3.0 {
            ProficiencyTier::N3
        } else if average_weight >= 2.0 {
            ProficiencyTier::N4
        } else {
            ProficiencyTier::N5
        }
    }
}
