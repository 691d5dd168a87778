use std::sync::Arc;

use log::{
    debug,
    error,
    warn,
};

use super::{
    DeepLTranslator,
    GlossSource,
    JishoLookup,
    PriorityGlosses,
    ResolveError,
    TranslationCache,
    GLOSS_PLACEHOLDER,
    SENTENCE_PLACEHOLDER,
};
use crate::{
    config::{
        Settings,
        GLOSS_DICTIONARY_FILE,
        TRANSLATION_CACHE_FILE,
    },
    core::BunsekiError,
    dictionary::GlossDictionary,
};

/// Ordered gloss fallback chain. Always answers with a string; source
/// failures are logged and turn into the placeholder.
pub struct TranslationResolver {
    sources: Vec<Arc<dyn GlossSource>>,
    cache: Arc<TranslationCache>,
    sentence_translator: Option<Arc<DeepLTranslator>>,
}

impl TranslationResolver {
    /// `sources` are tried in order. `cache` receives hits from cacheable sources
    /// and is only consulted if it is also listed in `sources`.
    pub fn new(sources: Vec<Arc<dyn GlossSource>>, cache: Arc<TranslationCache>) -> Self {
        Self { sources, cache, sentence_translator: None }
    }

    pub fn with_sentence_translator(mut self, translator: Arc<DeepLTranslator>) -> Self {
        self.sentence_translator = Some(translator);
        self
    }

    /// Local sources only: priority table and an in-memory cache.
    pub fn offline() -> Self {
        let cache = Arc::new(TranslationCache::in_memory());
        let sources: Vec<Arc<dyn GlossSource>> =
            vec![Arc::new(PriorityGlosses::default()), cache.clone()];
        Self::new(sources, cache)
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, BunsekiError> {
        let cache = Arc::new(TranslationCache::load(&settings.data_file(TRANSLATION_CACHE_FILE)));
        let dictionary = GlossDictionary::load(&settings.data_file(GLOSS_DICTIONARY_FILE));

        let mut sources: Vec<Arc<dyn GlossSource>> = vec![
            Arc::new(PriorityGlosses::default()),
            cache.clone(),
            Arc::new(dictionary),
        ];

        if settings.jisho.enabled {
            sources.push(Arc::new(JishoLookup::new(&settings.jisho)?));
        }

        let deepl = DeepLTranslator::from_settings(&settings.machine_translation)?.map(Arc::new);
        if let Some(translator) = &deepl {
            sources.push(translator.clone());
        }

        let mut resolver = Self::new(sources, cache);
        if let Some(translator) = deepl {
            resolver = resolver.with_sentence_translator(translator);
        }
        Ok(resolver)
    }

    pub fn resolve(&self, word: &str) -> String {
        for source in &self.sources {
            match source.try_resolve(word) {
                Ok(Some(gloss)) => {
                    debug!("Resolved '{}' via {}", word, source.name());
                    if source.caches_results() {
                        self.cache.insert(word, &gloss);
                    }
                    return gloss;
                }
                Ok(None) => {}
                Err(e) => log_failure(source.name(), word, &e),
            }
        }

        GLOSS_PLACEHOLDER.to_string()
    }

    /// Resolves every word, then writes any new cache entries to disk.
    pub fn resolve_batch<S: AsRef<str>>(&self, words: &[S]) -> Vec<String> {
        let glosses = words.iter().map(|word| self.resolve(word.as_ref())).collect();
        if self.cache.is_dirty() {
            self.cache.flush();
        }
        glosses
    }

    pub fn translate_sentence(&self, text: &str) -> String {
        let Some(translator) = &self.sentence_translator else {
            return SENTENCE_PLACEHOLDER.to_string();
        };

        match translator.translate_text(text) {
            Ok(translated) => translated,
            Err(e) => {
                log_failure(translator.name(), text, &e);
                SENTENCE_PLACEHOLDER.to_string()
            }
        }
    }
}

fn log_failure(source: &str, word: &str, error: &ResolveError) {
    match error {
        ResolveError::Timeout => warn!("{} timed out for '{}'", source, word),
        ResolveError::Auth => error!("{} rejected the API key, check configuration", source),
        ResolveError::QuotaExceeded => error!("{} quota exceeded, skipping '{}'", source, word),
        ResolveError::RateLimited => warn!("{} rate limited while resolving '{}'", source, word),
        ResolveError::Malformed(reason) => {
            warn!("{} returned a malformed response for '{}': {}", source, word, reason)
        }
        ResolveError::Status(code) => warn!("{} answered HTTP {} for '{}'", source, code, word),
        ResolveError::Transport(reason) => {
            warn!("{} request failed for '{}': {}", source, word, reason)
        }
    }
}
