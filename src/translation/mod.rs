pub mod cache;
pub mod deepl;
pub mod jisho;
pub mod priority;
pub mod resolver;

use thiserror::Error;

pub use cache::TranslationCache;
pub use deepl::DeepLTranslator;
pub use jisho::JishoLookup;
pub use priority::PriorityGlosses;
pub use resolver::TranslationResolver;

pub const GLOSS_PLACEHOLDER: &str = "[translation unavailable]";
pub const SENTENCE_PLACEHOLDER: &str = "[sentence translation unavailable]";

/// Why a remote source could not produce a gloss. Kept apart for logging only;
/// callers of the resolver always get a string back.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("request timed out")]
    Timeout,

    #[error("authentication rejected")]
    Auth,

    #[error("quota exceeded")]
    QuotaExceeded,

    #[error("rate limited")]
    RateLimited,

    #[error("malformed response: {0}")]
    Malformed(String),

    #[error("unexpected HTTP status {0}")]
    Status(u16),

    #[error("transport error: {0}")]
    Transport(String),
}

impl ResolveError {
    /// Transient failures worth another attempt.
    pub fn is_retryable(&self) -> bool {
        match self {
            ResolveError::Timeout | ResolveError::RateLimited | ResolveError::Transport(_) => true,
            ResolveError::Status(code) => *code >= 500,
            _ => false,
        }
    }

    pub fn from_reqwest(error: &reqwest::Error) -> Self {
        if error.is_timeout() {
            ResolveError::Timeout
        } else if error.is_decode() {
            ResolveError::Malformed(error.to_string())
        } else if let Some(status) = error.status() {
            ResolveError::Status(status.as_u16())
        } else {
            ResolveError::Transport(error.to_string())
        }
    }
}

/// One step of the gloss fallback chain.
pub trait GlossSource: Send + Sync {
    fn name(&self) -> &'static str;

    /// Whether a hit from this source should be written into the cache.
    fn caches_results(&self) -> bool {
        false
    }

    fn try_resolve(&self, word: &str) -> Result<Option<String>, ResolveError>;
}
