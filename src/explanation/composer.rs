use std::{
    collections::hash_map::DefaultHasher,
    hash::{
        Hash,
        Hasher,
    },
    sync::Arc,
};

use log::{
    info,
    warn,
};

use super::{
    gemini::build_prompt,
    ExplanationCache,
    Explanation,
    ExplanationGenerator,
    ExplanationSource,
    GeminiClient,
    GenerationError,
    GrammarNote,
    VocabNote,
};
use crate::{
    config::Settings,
    core::{
        BunsekiError,
        GrammarMatch,
        Token,
        VocabularyEntry,
    },
    grammar::{
        rules::*,
        FALLBACK_PATTERN,
    },
    proficiency::ProficiencyTier,
};

const MAX_GRAMMAR_NOTES: usize = 3;
const MAX_VOCAB_NOTES: usize = 3;

const POLITE_FORMS: &[&str] = &[
    POLITE,
    PAST_POLITE,
    NEGATIVE_POLITE,
    INVITATION,
    PROGRESSIVE_POLITE,
    REQUEST,
    COPULA,
    PAST_COPULA,
];
const PLAIN_FORMS: &[&str] = &[PROGRESSIVE_CASUAL, PROGRESSIVE_PLAIN, PAST_PLAIN, NEGATIVE];
const CONTRACTIONS: &[&str] = &["なきゃ", "なくちゃ", "ちゃう", "じゃう"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Register {
    Polite,
    Casual,
    Neutral,
}

/// Builds the explanation attached to every analysis. The rule-based path is
/// always available; a configured generator is tried first.
pub struct ExplanationComposer {
    generator: Option<Arc<dyn ExplanationGenerator>>,
    cache: ExplanationCache,
}

impl Default for ExplanationComposer {
    fn default() -> Self {
        Self::rules_only()
    }
}

impl ExplanationComposer {
    pub fn rules_only() -> Self {
        Self { generator: None, cache: ExplanationCache::default() }
    }

    pub fn with_generator(generator: Arc<dyn ExplanationGenerator>, cache: ExplanationCache) -> Self {
        Self { generator: Some(generator), cache }
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, BunsekiError> {
        match GeminiClient::from_settings(&settings.ai)? {
            Some(client) => {
                Ok(Self::with_generator(Arc::new(client), ExplanationCache::from_settings(&settings.ai)))
            }
            None => {
                info!("AI explanations disabled, using rule-based explanations");
                Ok(Self::rules_only())
            }
        }
    }

    pub fn is_generative(&self) -> bool {
        self.generator.is_some()
    }

    /// Generated explanation, cached per analysis. `Disabled` without a generator.
    pub fn generate(
        &self,
        text: &str,
        tokens: &[Token],
        grammar: &[GrammarMatch],
        vocabulary: &[VocabularyEntry],
    ) -> Result<Explanation, GenerationError> {
        let Some(generator) = &self.generator else {
            return Err(GenerationError::Disabled);
        };

        let key = cache_key(text, tokens, grammar, vocabulary);
        if let Some(cached) = self.cache.get(key) {
            return Ok(cached);
        }

        let explanation = generator.generate(&build_prompt(text, tokens, grammar, vocabulary))?;
        self.cache.insert(key, explanation.clone());
        Ok(explanation)
    }

    pub fn compose(
        &self,
        text: &str,
        tokens: &[Token],
        grammar: &[GrammarMatch],
        vocabulary: &[VocabularyEntry],
        tier: ProficiencyTier,
    ) -> Explanation {
        match self.generate(text, tokens, grammar, vocabulary) {
            Ok(explanation) => explanation,
            Err(GenerationError::Disabled) => compose_rules(text, grammar, vocabulary, tier),
            Err(e) => {
                warn!("AI explanation unavailable ({}), falling back to rules", e);
                compose_rules(text, grammar, vocabulary, tier)
            }
        }
    }
}

/// Key over the sentence and the analysis that feeds the prompt.
pub fn cache_key(
    text: &str,
    tokens: &[Token],
    grammar: &[GrammarMatch],
    vocabulary: &[VocabularyEntry],
) -> u64 {
    let mut hasher = DefaultHasher::new();
    text.hash(&mut hasher);
    for token in tokens {
        token.surface.hash(&mut hasher);
    }
    for grammar_match in grammar {
        grammar_match.pattern_id.hash(&mut hasher);
    }
    for entry in vocabulary {
        entry.word.hash(&mut hasher);
    }
    hasher.finish()
}

pub fn compose_rules(
    text: &str,
    grammar: &[GrammarMatch],
    vocabulary: &[VocabularyEntry],
    tier: ProficiencyTier,
) -> Explanation {
    let register = detect_register(text, grammar);

    Explanation {
        summary: summary(grammar, vocabulary, tier),
        grammar_notes: grammar_notes(grammar),
        vocab_notes: vocab_notes(vocabulary),
        cultural_context: cultural_context(register),
        study_tips: study_tip(vocabulary).to_string(),
        register_note: register_note(register).to_string(),
        source: ExplanationSource::Rules,
    }
}

fn summary(grammar: &[GrammarMatch], vocabulary: &[VocabularyEntry], tier: ProficiencyTier) -> String {
    let level = match tier {
        ProficiencyTier::Unknown => "Unclassified".to_string(),
        tier => format!("{}-level", tier),
    };
    let points = grammar.iter().filter(|g| g.pattern_id != FALLBACK_PATTERN).count();

    let mut summary = match points {
        0 => format!("{} sentence with a simple structure.", level),
        1 => format!("{} sentence with 1 grammar point.", level),
        n => format!("{} sentence with {} grammar points.", level, n),
    };

    let key_words: Vec<&str> = vocabulary.iter().take(MAX_VOCAB_NOTES).map(|v| v.word.as_str()).collect();
    if !key_words.is_empty() {
        summary.push_str(&format!(" Key vocabulary: {}.", key_words.join(", ")));
    }
    summary
}

fn grammar_notes(grammar: &[GrammarMatch]) -> Vec<GrammarNote> {
    grammar
        .iter()
        .take(MAX_GRAMMAR_NOTES)
        .map(|g| GrammarNote {
            pattern: g.pattern_id.clone(),
            explanation: g.teaching_note.clone().unwrap_or_else(|| g.description.clone()),
            example: g.in_sentence_excerpt.clone().unwrap_or_else(|| g.canonical_example.clone()),
        })
        .collect()
}

/// Hardest words first; unclassified words come last.
fn vocab_notes(vocabulary: &[VocabularyEntry]) -> Vec<VocabNote> {
    let mut ranked: Vec<&VocabularyEntry> = vocabulary.iter().collect();
    ranked.sort_by_key(|v| std::cmp::Reverse(v.tier.weight()));

    ranked
        .into_iter()
        .take(MAX_VOCAB_NOTES)
        .map(|v| VocabNote {
            word: v.word.clone(),
            reading: v.reading.clone(),
            nuance: format!("{} ({})", v.gloss, v.tier),
        })
        .collect()
}

fn detect_register(text: &str, grammar: &[GrammarMatch]) -> Register {
    let has_any = |ids: &[&str]| grammar.iter().any(|g| ids.iter().any(|id| *id == g.pattern_id));

    if has_any(POLITE_FORMS) {
        Register::Polite
    } else if has_any(PLAIN_FORMS) || CONTRACTIONS.iter().any(|c| text.contains(c)) {
        Register::Casual
    } else {
        Register::Neutral
    }
}

fn register_note(register: Register) -> &'static str {
    match register {
        Register::Polite => "Polite (です/ます forms): appropriate with strangers, colleagues and in class.",
        Register::Casual => "Casual (plain forms): used with friends and family.",
        Register::Neutral => "Neutral: no polite or plain verb endings to judge the register by.",
    }
}

fn cultural_context(register: Register) -> Option<String> {
    match register {
        Register::Casual => Some(
            "Plain speech signals closeness. Switch to です/ます with people you do not know well."
                .to_string(),
        ),
        _ => None,
    }
}

fn study_tip(vocabulary: &[VocabularyEntry]) -> &'static str {
    let hardest = ProficiencyTier::ORDERED
        .into_iter()
        .rev()
        .find(|tier| vocabulary.iter().any(|v| v.tier == *tier));

    match hardest {
        Some(ProficiencyTier::N5) => "Read the sentence aloud and shadow it until it feels natural.",
        Some(ProficiencyTier::N4) => "Make your own sentence with the same grammar, changing only the vocabulary.",
        Some(ProficiencyTier::N3) => "Add the N3 words to your flashcards together with this sentence as context.",
        Some(ProficiencyTier::N2) => "Look up example sentences for the N2 words to see how their nuance shifts.",
        Some(ProficiencyTier::N1) => "N1 words are often written-register: note where you met this one.",
        _ => "Break the sentence into chunks and look up each unfamiliar word.",
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{
        AtomicUsize,
        Ordering,
    };

    use super::*;

    struct StubGenerator {
        result: Result<Explanation, GenerationError>,
        calls: AtomicUsize,
    }

    impl ExplanationGenerator for StubGenerator {
        fn generate(&self, _prompt: &str) -> Result<Explanation, GenerationError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.result.clone()
        }
    }

    fn grammar_match(id: &str, note: Option<&str>, excerpt: Option<&str>) -> GrammarMatch {
        GrammarMatch {
            pattern_id: id.to_string(),
            description: format!("{} description", id),
            tier: ProficiencyTier::N5,
            canonical_example: format!("{} example", id),
            in_sentence_excerpt: excerpt.map(str::to_string),
            teaching_note: note.map(str::to_string),
        }
    }

    fn entry(word: &str, tier: ProficiencyTier) -> VocabularyEntry {
        VocabularyEntry {
            word: word.to_string(),
            base_form: word.to_string(),
            reading: word.to_string(),
            gloss: format!("{} gloss", word),
            tier,
        }
    }

    fn generated() -> Explanation {
        Explanation {
            summary: "generated".to_string(),
            grammar_notes: Vec::new(),
            vocab_notes: Vec::new(),
            cultural_context: None,
            study_tips: "tip".to_string(),
            register_note: "Polite".to_string(),
            source: ExplanationSource::Generated,
        }
    }

    #[test]
    fn test_rule_based_explanation() {
        let grammar = vec![
            grammar_match(PROGRESSIVE_POLITE, Some("note"), Some("勉強しています")),
            grammar_match(LIGHT_VERB, None, None),
            grammar_match("は", Some("topic"), None),
            grammar_match("を", Some("object"), None),
        ];
        let vocabulary = vec![
            entry("日本語", ProficiencyTier::N5),
            entry("勉強", ProficiencyTier::N4),
            entry("タワー", ProficiencyTier::Unknown),
            entry("挑発", ProficiencyTier::N1),
        ];

        let explanation =
            compose_rules("私は日本語を勉強しています", &grammar, &vocabulary, ProficiencyTier::N4);

        assert_eq!(explanation.source, ExplanationSource::Rules);
        assert!(explanation.summary.starts_with("N4-level sentence with 4 grammar points."));
        assert!(explanation.summary.contains("日本語, 勉強, タワー"));

        assert_eq!(explanation.grammar_notes.len(), 3);
        assert_eq!(explanation.grammar_notes[0].explanation, "note");
        assert_eq!(explanation.grammar_notes[0].example, "勉強しています");
        assert_eq!(explanation.grammar_notes[1].explanation, "～する description");
        assert_eq!(explanation.grammar_notes[1].example, "～する example");

        let words: Vec<&str> = explanation.vocab_notes.iter().map(|n| n.word.as_str()).collect();
        assert_eq!(words, vec!["挑発", "勉強", "日本語"]);

        assert!(explanation.register_note.starts_with("Polite"));
        assert!(explanation.cultural_context.is_none());
        assert!(explanation.study_tips.contains("N1"));
    }

    #[test]
    fn test_register_detection() {
        let casual = vec![grammar_match(PAST_PLAIN, None, None)];
        assert_eq!(detect_register("見た", &casual), Register::Casual);
        assert_eq!(detect_register("行かなきゃ", &[grammar_match(OBLIGATION, None, None)]), Register::Casual);
        assert_eq!(detect_register("猫", &[grammar_match(FALLBACK_PATTERN, None, None)]), Register::Neutral);

        let explanation = compose_rules("見た", &casual, &[], ProficiencyTier::N5);
        assert!(explanation.cultural_context.is_some());
        assert!(explanation.summary.starts_with("N5-level sentence with 1 grammar point."));
    }

    #[test]
    fn test_fallback_only_summary() {
        let grammar = vec![grammar_match(FALLBACK_PATTERN, None, None)];
        let explanation = compose_rules("猫", &grammar, &[], ProficiencyTier::Unknown);
        assert_eq!(explanation.summary, "Unclassified sentence with a simple structure.");
    }

    #[test]
    fn test_generated_explanation_is_cached() {
        let generator = Arc::new(StubGenerator { result: Ok(generated()), calls: AtomicUsize::new(0) });
        let composer = ExplanationComposer::with_generator(generator.clone(), ExplanationCache::default());
        let grammar = vec![grammar_match(POLITE, None, None)];

        let first = composer.compose("行きます", &[], &grammar, &[], ProficiencyTier::N5);
        let second = composer.compose("行きます", &[], &grammar, &[], ProficiencyTier::N5);

        assert_eq!(first.source, ExplanationSource::Generated);
        assert_eq!(first, second);
        assert_eq!(generator.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_generation_failure_falls_back_to_rules() {
        let generator = Arc::new(StubGenerator {
            result: Err(GenerationError::QuotaExceeded),
            calls: AtomicUsize::new(0),
        });
        let composer = ExplanationComposer::with_generator(generator, ExplanationCache::default());

        let explanation = composer.compose("猫", &[], &[], &[], ProficiencyTier::N5);
        assert_eq!(explanation.source, ExplanationSource::Rules);

        let rules_only = ExplanationComposer::rules_only();
        assert!(!rules_only.is_generative());
        assert_eq!(rules_only.generate("猫", &[], &[], &[]), Err(GenerationError::Disabled));
    }

    #[test]
    fn test_cache_key_depends_on_analysis() {
        let tokens = vec![Token::new("猫", "ねこ", "名詞", "猫")];
        let a = cache_key("猫", &tokens, &[], &[]);
        let b = cache_key("猫", &[], &[], &[]);
        assert_ne!(a, b);
        assert_eq!(a, cache_key("猫", &tokens, &[], &[]));
    }
}
