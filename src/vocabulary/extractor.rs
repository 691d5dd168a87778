use std::{
    collections::HashSet,
    sync::Arc,
};

use log::info;

use super::proper_noun::{
    is_proper_noun,
    LoanwordWhitelist,
};
use crate::{
    core::{
        utils::char_len,
        Token,
        VocabularyEntry,
    },
    proficiency::ProficiencyClassifier,
    segmentation::UnidicTag,
    translation::TranslationResolver,
};

pub const DEFAULT_VOCABULARY_LIMIT: usize = 10;

/// Picks study-worthy content words out of a token stream.
pub struct VocabularyExtractor {
    classifier: ProficiencyClassifier,
    resolver: Arc<TranslationResolver>,
    whitelist: Arc<LoanwordWhitelist>,
    limit: usize,
}

impl VocabularyExtractor {
    pub fn new(
        classifier: ProficiencyClassifier,
        resolver: Arc<TranslationResolver>,
        whitelist: Arc<LoanwordWhitelist>,
    ) -> Self {
        Self { classifier, resolver, whitelist, limit: DEFAULT_VOCABULARY_LIMIT }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Content tokens worth listing, deduplicated by base form, in sentence order.
    pub fn select_candidates<'a>(&self, tokens: &'a [Token]) -> Vec<&'a Token> {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut candidates = Vec::new();

        for token in tokens {
            if candidates.len() >= self.limit {
                break;
            }
            if !token.tag().is_content_word() || is_proper_noun(token, &self.whitelist) {
                continue;
            }

            let base = token.base_form.as_str();
            if seen.contains(base) {
                continue;
            }
            // One-char base forms are mostly stray particles unless they are nouns
            if char_len(base) < 2 && token.tag() != UnidicTag::Meishi {
                continue;
            }

            seen.insert(base);
            candidates.push(token);
        }

        candidates
    }

    pub fn extract_vocabulary(&self, tokens: &[Token]) -> Vec<VocabularyEntry> {
        let candidates = self.select_candidates(tokens);
        let base_forms: Vec<&str> = candidates.iter().map(|t| t.base_form.as_str()).collect();
        let glosses = self.resolver.resolve_batch(&base_forms);

        let vocabulary: Vec<VocabularyEntry> = candidates
            .into_iter()
            .zip(glosses)
            .map(|(token, gloss)| VocabularyEntry {
                word: token.surface.clone(),
                base_form: token.base_form.clone(),
                reading: token.reading.clone(),
                gloss,
                tier: self.classifier.classify_word(&token.surface, Some(&token.base_form)),
            })
            .collect();

        info!("Extracted {} vocabulary entries", vocabulary.len());
        vocabulary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        dictionary::TierWordLists,
        proficiency::ProficiencyTier,
        translation::GLOSS_PLACEHOLDER,
    };

    fn extractor() -> VocabularyExtractor {
        let lists = TierWordLists::new()
            .with_words(ProficiencyTier::N5, &["日本語", "勉強", "する", "コーヒー", "飲む"])
            .with_words(ProficiencyTier::N3, &["勉強"]);
        VocabularyExtractor::new(
            ProficiencyClassifier::new(Arc::new(lists)),
            Arc::new(TranslationResolver::offline()),
            Arc::new(LoanwordWhitelist::default()),
        )
    }

    fn noun(surface: &str) -> Token {
        Token::new(surface, surface, "名詞", surface).with_details(&["普通名詞", "一般"])
    }

    #[test]
    fn test_study_sentence() {
        let tokens = vec![
            Token::new("私", "わたし", "代名詞", "私"),
            Token::new("は", "は", "助詞", "は").with_details(&["係助詞"]),
            Token::new("日本語", "にほんご", "名詞", "日本語"),
            Token::new("を", "を", "助詞", "を").with_details(&["格助詞"]),
            Token::new("勉強", "べんきょう", "名詞", "勉強"),
            Token::new("し", "し", "動詞", "する"),
            Token::new("て", "て", "助詞", "て").with_details(&["接続助詞"]),
            Token::new("い", "い", "動詞", "いる").with_details(&["非自立可能"]),
            Token::new("ます", "ます", "助動詞", "ます"),
        ];

        let vocabulary = extractor().extract_vocabulary(&tokens);
        let words: Vec<&str> = vocabulary.iter().map(|v| v.base_form.as_str()).collect();
        assert_eq!(words, vec!["日本語", "勉強", "する", "いる"]);

        // Easiest tier wins when a word sits in several lists
        assert_eq!(vocabulary[1].tier, ProficiencyTier::N5);
        assert_eq!(vocabulary[1].gloss, "study");
        assert_eq!(vocabulary[3].tier, ProficiencyTier::Unknown);
    }

    #[test]
    fn test_katakana_name_excluded_loanword_kept() {
        let tokens = vec![noun("タカギ"), noun("コーヒー")];
        let vocabulary = extractor().extract_vocabulary(&tokens);

        assert_eq!(vocabulary.len(), 1);
        assert_eq!(vocabulary[0].word, "コーヒー");
        assert_eq!(vocabulary[0].gloss, GLOSS_PLACEHOLDER);
    }

    #[test]
    fn test_dedup_keeps_first_occurrence() {
        let tokens = vec![
            Token::new("飲み", "のみ", "動詞", "飲む"),
            noun("水"),
            Token::new("飲ん", "のん", "動詞", "飲む"),
        ];
        let vocabulary = extractor().extract_vocabulary(&tokens);

        let words: Vec<&str> = vocabulary.iter().map(|v| v.word.as_str()).collect();
        assert_eq!(words, vec!["飲み", "水"]);
    }

    #[test]
    fn test_single_char_non_nouns_rejected() {
        let tokens = vec![
            Token::new("居", "い", "動詞", "居"),
            Token::new("よく", "よく", "副詞", "良く"),
            noun("木"),
        ];
        let vocabulary = extractor().extract_vocabulary(&tokens);
        let words: Vec<&str> = vocabulary.iter().map(|v| v.base_form.as_str()).collect();
        assert_eq!(words, vec!["良く", "木"]);
    }

    #[test]
    fn test_vocabulary_is_capped() {
        let nouns: Vec<String> = (0..15).map(|i| format!("単語{}", i)).collect();
        let tokens: Vec<Token> = nouns.iter().map(|n| noun(n)).collect();

        let vocabulary = extractor().extract_vocabulary(&tokens);
        assert_eq!(vocabulary.len(), 10);
        assert_eq!(vocabulary[0].word, "単語0");
        assert_eq!(vocabulary[9].word, "単語9");

        let limited = extractor().with_limit(3).extract_vocabulary(&tokens);
        assert_eq!(limited.len(), 3);
    }
}
