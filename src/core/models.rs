use serde::{
    Deserialize,
    Serialize,
};

use crate::{
    explanation::Explanation,
    proficiency::ProficiencyTier,
    segmentation::unidic_tags::UnidicTag,
};

/// One morpheme as produced by the tokenizer adapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Token {
    pub surface: String,
    pub reading: String,          // Hiragana
    #[serde(rename = "partOfSpeech")]
    pub pos: String,              // Coarse tag, e.g. 名詞
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pos_details: Vec<String>, // Fine sub-tags, e.g. 固有名詞, 人名
    pub base_form: String,        // Dictionary form
    #[serde(skip)]
    pub lemma: String,            // UniDic lemma, e.g. 居る for contracted る, た for past だ
}

impl Token {
    pub fn new(surface: &str, reading: &str, pos: &str, base_form: &str) -> Self {
        Token {
            surface: surface.to_string(),
            reading: reading.to_string(),
            pos: pos.to_string(),
            pos_details: Vec::new(),
            base_form: base_form.to_string(),
            lemma: base_form.to_string(),
        }
    }

    pub fn with_lemma(mut self, lemma: &str) -> Self {
        self.lemma = lemma.to_string();
        self
    }

    pub fn with_details(mut self, details: &[&str]) -> Self {
        self.pos_details = details.iter().map(|d| d.to_string()).collect();
        self
    }

    /// Degraded single token used when the tokenizer fails.
    pub fn opaque(text: &str) -> Self {
        Token::new(text, text, "Unknown", text)
    }

    pub fn tag(&self) -> UnidicTag {
        self.pos.as_str().into()
    }

    pub fn detail_tags(&self) -> impl Iterator<Item = UnidicTag> + '_ {
        self.pos_details.iter().map(|detail| detail.as_str().into())
    }

    pub fn has_detail(&self, tag: UnidicTag) -> bool {
        self.detail_tags().any(|t| t == tag)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VocabularyEntry {
    pub word: String,
    pub base_form: String,
    pub reading: String,
    #[serde(rename = "meaning")]
    pub gloss: String,
    #[serde(rename = "jlptLevel")]
    pub tier: ProficiencyTier,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrammarMatch {
    #[serde(rename = "pattern")]
    pub pattern_id: String,
    pub description: String,
    #[serde(rename = "jlptLevel")]
    pub tier: ProficiencyTier,
    #[serde(rename = "example")]
    pub canonical_example: String,
    #[serde(rename = "exampleInSentence", skip_serializing_if = "Option::is_none")]
    pub in_sentence_excerpt: Option<String>,
    #[serde(rename = "pedagogicalNote", skip_serializing_if = "Option::is_none")]
    pub teaching_note: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub original_text: String,
    pub tokens: Vec<Token>,
    #[serde(rename = "grammarPatterns")]
    pub grammar_matches: Vec<GrammarMatch>,
    pub vocabulary: Vec<VocabularyEntry>,
    #[serde(rename = "jlptLevel")]
    pub sentence_tier: ProficiencyTier,
    pub explanation: Explanation,
}
