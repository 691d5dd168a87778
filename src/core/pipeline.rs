use std::{
    sync::Arc,
    time::Instant,
};

use log::{
    debug,
    info,
    warn,
};
use rayon::prelude::*;

use super::{
    utils::contains_japanese,
    AnalysisResult,
    BunsekiError,
    Token,
};
use crate::{
    config::{
        Settings,
        LOANWORDS_FILE,
        TIER_LISTS_FILE,
    },
    dictionary::TierWordLists,
    explanation::ExplanationComposer,
    grammar::GrammarDetector,
    proficiency::ProficiencyClassifier,
    segmentation::{
        MorphologicalAnalyzer,
        VibratoAnalyzer,
    },
    translation::TranslationResolver,
    vocabulary::{
        LoanwordWhitelist,
        VocabularyExtractor,
    },
};

/// Rejects input the analysis cannot work with. Returns the trimmed text.
pub fn validate_input(text: &str) -> Result<&str, BunsekiError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(BunsekiError::EmptyText);
    }
    if !contains_japanese(text) {
        return Err(BunsekiError::NotJapanese);
    }
    Ok(text)
}

/// Wires tokenizer, vocabulary extraction, grammar detection, classification
/// and explanation into a single `analyze` call. Shared read-only between
/// worker threads.
pub struct Analyzer {
    tokenizer: Arc<dyn MorphologicalAnalyzer>,
    extractor: VocabularyExtractor,
    detector: GrammarDetector,
    composer: ExplanationComposer,
    resolver: Arc<TranslationResolver>,
}

impl Analyzer {
    pub fn new(
        tokenizer: Arc<dyn MorphologicalAnalyzer>,
        extractor: VocabularyExtractor,
        detector: GrammarDetector,
        composer: ExplanationComposer,
        resolver: Arc<TranslationResolver>,
    ) -> Self {
        Self { tokenizer, extractor, detector, composer, resolver }
    }

    /// Loads every data file named in `settings` and the vibrato dictionary.
    pub fn from_settings(settings: &Settings) -> Result<Self, BunsekiError> {
        let start = Instant::now();
        let tokenizer = Arc::new(VibratoAnalyzer::from_settings(settings)?);
        let analyzer = Self::with_tokenizer(settings, tokenizer)?;
        info!("Analyzer ready in {:.2?}", start.elapsed());
        Ok(analyzer)
    }

    /// Same as `from_settings` but with a caller-supplied tokenizer.
    pub fn with_tokenizer(
        settings: &Settings,
        tokenizer: Arc<dyn MorphologicalAnalyzer>,
    ) -> Result<Self, BunsekiError> {
        let word_lists = Arc::new(TierWordLists::load(&settings.data_file(TIER_LISTS_FILE)));
        let whitelist = Arc::new(LoanwordWhitelist::load(&settings.data_file(LOANWORDS_FILE)));
        let resolver = Arc::new(TranslationResolver::from_settings(settings)?);

        let extractor = VocabularyExtractor::new(
            ProficiencyClassifier::new(word_lists),
            resolver.clone(),
            whitelist,
        )
        .with_limit(settings.vocabulary_limit);

        Ok(Self::new(
            tokenizer,
            extractor,
            GrammarDetector::from_settings(settings),
            ExplanationComposer::from_settings(settings)?,
            resolver,
        ))
    }

    /// Tokens for `text`; a tokenizer failure degrades to one opaque token.
    pub fn tokenize(&self, text: &str) -> Vec<Token> {
        match self.tokenizer.tokenize(text) {
            Ok(tokens) => tokens,
            Err(e) => {
                warn!("Tokenizer failed ({}), treating the input as a single token", e);
                vec![Token::opaque(text)]
            }
        }
    }

    pub fn analyze(&self, text: &str) -> Result<AnalysisResult, BunsekiError> {
        let text = validate_input(text)?;
        let start = Instant::now();

        let tokens = self.tokenize(text);
        debug!("Tokenized into {} tokens", tokens.len());

        let vocabulary = self.extractor.extract_vocabulary(&tokens);
        let grammar_matches = self.detector.detect_patterns(text, &tokens);
        let sentence_tier = ProficiencyClassifier::classify_sentence(&tokens, &vocabulary);
        let explanation =
            self.composer.compose(text, &tokens, &grammar_matches, &vocabulary, sentence_tier);

        info!(
            "Analysis complete in {:.2?}. Level: {}, tokens: {}, vocabulary: {}",
            start.elapsed(),
            sentence_tier,
            tokens.len(),
            vocabulary.len()
        );

        Ok(AnalysisResult {
            original_text: text.to_string(),
            tokens,
            grammar_matches,
            vocabulary,
            sentence_tier,
            explanation,
        })
    }

    /// Analyses independent sentences in parallel. Results keep input order.
    pub fn analyze_batch<S: AsRef<str> + Sync>(
        &self,
        texts: &[S],
    ) -> Vec<Result<AnalysisResult, BunsekiError>> {
        let start = Instant::now();
        let results: Vec<_> = texts.par_iter().map(|text| self.analyze(text.as_ref())).collect();
        info!("Analyzed {} sentences in {:.2?}", texts.len(), start.elapsed());
        results
    }

    pub fn translate_sentence(&self, text: &str) -> Result<String, BunsekiError> {
        let text = validate_input(text)?;
        Ok(self.resolver.translate_sentence(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        explanation::ExplanationSource,
        grammar::{
            rules::{
                LIGHT_VERB,
                PROGRESSIVE_POLITE,
            },
            FALLBACK_PATTERN,
        },
        proficiency::ProficiencyTier,
        translation::SENTENCE_PLACEHOLDER,
    };

    /// Canned tokens for the study sentence, failure for anything else.
    struct StubAnalyzer;

    impl MorphologicalAnalyzer for StubAnalyzer {
        fn tokenize(&self, text: &str) -> Result<Vec<Token>, BunsekiError> {
            if text != "私は日本語を勉強しています" {
                return Err(BunsekiError::Tokenizer("unsupported".to_string()));
            }
            let particle = |s: &str, kind: &str| Token::new(s, s, "助詞", s).with_details(&[kind]);
            Ok(vec![
                Token::new("私", "わたし", "代名詞", "私"),
                particle("は", "係助詞"),
                Token::new("日本語", "にほんご", "名詞", "日本語").with_details(&["普通名詞", "一般"]),
                particle("を", "格助詞"),
                Token::new("勉強", "べんきょう", "名詞", "勉強").with_details(&["普通名詞", "サ変可能"]),
                Token::new("し", "し", "動詞", "する").with_details(&["非自立可能"]),
                particle("て", "接続助詞"),
                Token::new("い", "い", "動詞", "いる").with_details(&["非自立可能"]),
                Token::new("ます", "ます", "助動詞", "ます"),
            ])
        }
    }

    fn analyzer() -> Analyzer {
        let lists = TierWordLists::new()
            .with_words(ProficiencyTier::N5, &["私", "日本語", "勉強", "する", "いる"]);
        let resolver = Arc::new(TranslationResolver::offline());
        let extractor = VocabularyExtractor::new(
            ProficiencyClassifier::new(Arc::new(lists)),
            resolver.clone(),
            Arc::new(LoanwordWhitelist::default()),
        );

        Analyzer::new(
            Arc::new(StubAnalyzer),
            extractor,
            GrammarDetector::new(),
            ExplanationComposer::rules_only(),
            resolver,
        )
    }

    #[test]
    fn test_validate_input() {
        assert!(matches!(validate_input(""), Err(BunsekiError::EmptyText)));
        assert!(matches!(validate_input("   \n"), Err(BunsekiError::EmptyText)));
        assert!(matches!(validate_input("hello world"), Err(BunsekiError::NotJapanese)));
        assert_eq!(validate_input("  日本 ").unwrap(), "日本");
    }

    #[test]
    fn test_analyze_study_sentence() {
        let result = analyzer().analyze("私は日本語を勉強しています").unwrap();

        assert_eq!(result.original_text, "私は日本語を勉強しています");
        assert_eq!(result.tokens.len(), 9);
        assert_eq!(result.sentence_tier, ProficiencyTier::N5);

        let patterns: Vec<&str> = result.grammar_matches.iter().map(|m| m.pattern_id.as_str()).collect();
        assert_eq!(patterns, vec![PROGRESSIVE_POLITE, LIGHT_VERB, "は", "を"]);

        let words: Vec<&str> = result.vocabulary.iter().map(|v| v.base_form.as_str()).collect();
        assert_eq!(words, vec!["日本語", "勉強", "する", "いる"]);
        assert!(result.vocabulary.iter().all(|v| v.tier == ProficiencyTier::N5));

        assert_eq!(result.explanation.source, ExplanationSource::Rules);
        assert!(result.explanation.register_note.starts_with("Polite"));
    }

    #[test]
    fn test_tokenizer_failure_degrades() {
        let result = analyzer().analyze("東京タワー").unwrap();

        assert_eq!(result.tokens, vec![Token::opaque("東京タワー")]);
        assert!(result.vocabulary.is_empty());
        assert_eq!(result.sentence_tier, ProficiencyTier::N5);
        assert_eq!(result.grammar_matches[0].pattern_id, FALLBACK_PATTERN);
    }

    #[test]
    fn test_batch_keeps_order() {
        let texts = ["私は日本語を勉強しています", "", "猫"];
        let results = analyzer().analyze_batch(&texts);

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].as_ref().unwrap().original_text, texts[0]);
        assert!(matches!(results[1], Err(BunsekiError::EmptyText)));
        assert_eq!(results[2].as_ref().unwrap().original_text, "猫");
    }

    #[test]
    fn test_translate_sentence_offline() {
        let analyzer = analyzer();
        assert_eq!(analyzer.translate_sentence("猫です").unwrap(), SENTENCE_PLACEHOLDER);
        assert!(analyzer.translate_sentence("cat").is_err());
    }

    #[test]
    fn test_result_serializes_with_wire_names() {
        let result = analyzer().analyze("私は日本語を勉強しています").unwrap();
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["jlptLevel"], "N5");
        assert_eq!(json["grammarPatterns"][0]["pattern"], PROGRESSIVE_POLITE);
        assert_eq!(json["tokens"][0]["partOfSpeech"], "代名詞");
        assert_eq!(json["explanation"]["source"], "rules");
    }
}
