pub mod cache;
pub mod composer;
pub mod gemini;

use serde::{
    Deserialize,
    Serialize,
};

pub use cache::ExplanationCache;
pub use composer::ExplanationComposer;
pub use gemini::{
    GeminiClient,
    GenerationError,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExplanationSource {
    #[default]
    Rules,
    Generated,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrammarNote {
    pub pattern: String,
    pub explanation: String,
    #[serde(default)]
    pub example: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VocabNote {
    pub word: String,
    #[serde(default)]
    pub reading: String,
    pub nuance: String,
}

/// Learner-facing summary of one analysed sentence.
///
/// The same shape is requested from the generative model, so deserialising a
/// response also checks that every required field is present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Explanation {
    pub summary: String,
    pub grammar_notes: Vec<GrammarNote>,
    pub vocab_notes: Vec<VocabNote>,
    #[serde(default)]
    pub cultural_context: Option<String>,
    pub study_tips: String,
    pub register_note: String,
    #[serde(default)]
    pub source: ExplanationSource,
}

/// Anything that can turn a prompt into an explanation.
pub trait ExplanationGenerator: Send + Sync {
    fn generate(&self, prompt: &str) -> Result<Explanation, GenerationError>;
}
