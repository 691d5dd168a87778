use std::time::{
    Duration,
    Instant,
};

use log::{
    error,
    info,
};
use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;

use super::{
    Explanation,
    ExplanationGenerator,
    ExplanationSource,
};
use crate::{
    config::AiSettings,
    core::{
        http::{
            http_client,
            with_retry,
        },
        BunsekiError,
        GrammarMatch,
        Token,
        VocabularyEntry,
    },
    segmentation::UnidicTag,
};

const TEMPERATURE: f32 = 0.7;
const MAX_OUTPUT_TOKENS: u32 = 1000;
const RETRY_BASE_DELAY: Duration = Duration::from_secs(2);

const PROMPT_TOKENS: usize = 15;
const PROMPT_GRAMMAR: usize = 5;
const PROMPT_VOCABULARY: usize = 8;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    #[error("AI explanations are disabled")]
    Disabled,

    #[error("request timed out")]
    Timeout,

    #[error("authentication rejected")]
    Auth,

    #[error("quota exceeded")]
    QuotaExceeded,

    #[error("malformed response: {0}")]
    Malformed(String),

    #[error("unexpected HTTP status {0}")]
    Status(u16),

    #[error("transport error: {0}")]
    Transport(String),
}

impl GenerationError {
    pub fn is_retryable(&self) -> bool {
        match self {
            GenerationError::Timeout
            | GenerationError::QuotaExceeded
            | GenerationError::Transport(_) => true,
            GenerationError::Status(code) => *code >= 500,
            _ => false,
        }
    }

    fn from_reqwest(error: &reqwest::Error) -> Self {
        if error.is_timeout() {
            GenerationError::Timeout
        } else if let Some(status) = error.status() {
            status_error(status.as_u16())
        } else {
            GenerationError::Transport(error.to_string())
        }
    }
}

pub fn status_error(status: u16) -> GenerationError {
    match status {
        401 | 403 => GenerationError::Auth,
        429 => GenerationError::QuotaExceeded,
        _ => GenerationError::Status(status),
    }
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Content,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

/// Gemini `generateContent` over REST.
pub struct GeminiClient {
    client: Client,
    endpoint: String,
    model: String,
    api_key: String,
    max_retries: u32,
}

impl GeminiClient {
    /// `None` unless the provider is Gemini and a real key is configured.
    pub fn from_settings(settings: &AiSettings) -> Result<Option<Self>, BunsekiError> {
        if !settings.is_usable() {
            return Ok(None);
        }
        let Some(api_key) = settings.api_key.clone() else {
            return Ok(None);
        };

        info!("Gemini explanations enabled (model: {})", settings.model);
        Ok(Some(Self {
            client: http_client(settings.timeout())?,
            endpoint: settings.endpoint.clone(),
            model: settings.model.clone(),
            api_key,
            max_retries: settings.max_retries,
        }))
    }

    fn url(&self) -> String {
        format!("{}/{}:generateContent", self.endpoint.trim_end_matches('/'), self.model)
    }

    fn request(&self, prompt: &str) -> Result<String, GenerationError> {
        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
            "generationConfig": {
                "temperature": TEMPERATURE,
                "maxOutputTokens": MAX_OUTPUT_TOKENS,
            },
        });

        let started = Instant::now();
        let response = self
            .client
            .post(self.url())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .map_err(|e| GenerationError::from_reqwest(&e))?;

        let status = response.status().as_u16();
        if !(200..300).contains(&status) {
            return Err(status_error(status));
        }

        let text = response.text().map_err(|e| GenerationError::from_reqwest(&e))?;
        info!("Gemini responded in {:.2}s", started.elapsed().as_secs_f32());
        Ok(text)
    }
}

impl ExplanationGenerator for GeminiClient {
    fn generate(&self, prompt: &str) -> Result<Explanation, GenerationError> {
        let body = with_retry(
            "Gemini request",
            self.max_retries,
            RETRY_BASE_DELAY,
            GenerationError::is_retryable,
            |_| self.request(prompt),
        )?;

        let text = response_text(&body)?;
        parse_explanation(&text).inspect_err(|e| error!("Unusable Gemini explanation: {}", e))
    }
}

/// Concatenated text parts of the first candidate.
pub fn response_text(body: &str) -> Result<String, GenerationError> {
    let response: GenerateResponse =
        serde_json::from_str(body).map_err(|e| GenerationError::Malformed(e.to_string()))?;

    let text: String = response
        .candidates
        .into_iter()
        .next()
        .map(|candidate| candidate.content.parts.into_iter().map(|part| part.text).collect())
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(GenerationError::Malformed("empty response".to_string()));
    }
    Ok(text)
}

fn strip_fences(text: &str) -> &str {
    let text = text.trim();
    let text = text.strip_prefix("```json").or_else(|| text.strip_prefix("```")).unwrap_or(text);
    let text = text.strip_suffix("```").unwrap_or(text);
    text.trim()
}

/// Parses model output into an explanation. Required fields and note shapes
/// are enforced by deserialisation; blank summaries are rejected here.
pub fn parse_explanation(text: &str) -> Result<Explanation, GenerationError> {
    let mut explanation: Explanation = serde_json::from_str(strip_fences(text))
        .map_err(|e| GenerationError::Malformed(e.to_string()))?;

    if explanation.summary.trim().is_empty() {
        return Err(GenerationError::Malformed("empty summary".to_string()));
    }
    if explanation.grammar_notes.iter().any(|note| note.pattern.trim().is_empty()) {
        return Err(GenerationError::Malformed("grammar note without pattern".to_string()));
    }
    if explanation.vocab_notes.iter().any(|note| note.word.trim().is_empty()) {
        return Err(GenerationError::Malformed("vocabulary note without word".to_string()));
    }

    explanation.source = ExplanationSource::Generated;
    Ok(explanation)
}

pub fn build_prompt(
    text: &str,
    tokens: &[Token],
    grammar: &[GrammarMatch],
    vocabulary: &[VocabularyEntry],
) -> String {
    let tokens = tokens
        .iter()
        .take(PROMPT_TOKENS)
        .map(|t| {
            let pos = match t.tag() {
                UnidicTag::Unknown | UnidicTag::Unset => t.pos.as_str(),
                tag => tag.english_name(),
            };
            format!("{} ({}) [{}]", t.surface, t.reading, pos)
        })
        .collect::<Vec<_>>()
        .join(", ");
    let grammar = grammar
        .iter()
        .take(PROMPT_GRAMMAR)
        .map(|g| format!("- {} ({}): {}", g.pattern_id, g.tier, g.description))
        .collect::<Vec<_>>()
        .join("\n");
    let vocabulary = vocabulary
        .iter()
        .take(PROMPT_VOCABULARY)
        .map(|v| format!("- {} ({}): {} [{}]", v.word, v.reading, v.gloss, v.tier))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"You are an experienced Japanese teacher working with beginner and intermediate learners.

Analyse this Japanese sentence: "{text}"

Detected linguistic data:
- Tokens: {tokens}
- Grammar:
{grammar}
- Key vocabulary:
{vocabulary}

Reply with a teaching explanation as JSON with exactly this structure:
{{
  "summary": "Meaning and context in 1-2 natural sentences",
  "grammarNotes": [
    {{"pattern": "～ます", "explanation": "Clear explanation", "example": "Example taken from the sentence"}}
  ],
  "vocabNotes": [
    {{"word": "単語", "reading": "たんご", "nuance": "Important usage nuance"}}
  ],
  "culturalContext": "Cultural note if relevant (register, social context) or null",
  "studyTips": "One memory aid or study tip",
  "registerNote": "Register (casual/polite/formal)"
}}

Rules:
- At most 2-3 essential grammar points
- At most 2-3 key vocabulary words
- Be concise but precise, prefer practical explanations over jargon
- Strict JSON only, no markdown, nothing before or after"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proficiency::ProficiencyTier;

    const GENERATED: &str = r#"{
      "summary": "I am studying Japanese.",
      "grammarNotes": [{"pattern": "～ています", "explanation": "Ongoing action.", "example": "勉強しています"}],
      "vocabNotes": [{"word": "勉強", "reading": "べんきょう", "nuance": "Formal study."}],
      "culturalContext": null,
      "studyTips": "Practise te-forms.",
      "registerNote": "Polite"
    }"#;

    #[test]
    fn test_parse_with_fences() {
        let fenced = format!("```json\n{}\n```", GENERATED);
        let explanation = parse_explanation(&fenced).unwrap();
        assert_eq!(explanation.source, ExplanationSource::Generated);
        assert_eq!(explanation.grammar_notes[0].pattern, "～ています");
        assert_eq!(explanation.vocab_notes[0].reading, "べんきょう");
        assert!(explanation.cultural_context.is_none());
    }

    #[test]
    fn test_missing_fields_are_rejected() {
        let missing_tips = r#"{"summary": "x", "grammarNotes": [], "vocabNotes": [], "registerNote": "Polite"}"#;
        assert!(matches!(parse_explanation(missing_tips), Err(GenerationError::Malformed(_))));

        let bad_note = r#"{"summary": "x", "grammarNotes": [{"pattern": "～て"}], "vocabNotes": [],
            "studyTips": "t", "registerNote": "r"}"#;
        assert!(matches!(parse_explanation(bad_note), Err(GenerationError::Malformed(_))));

        assert!(matches!(parse_explanation("not json"), Err(GenerationError::Malformed(_))));
    }

    #[test]
    fn test_response_text() {
        let body = r#"{"candidates": [{"content": {"parts": [{"text": "{\"a\":"}, {"text": "1}"}]}}]}"#;
        assert_eq!(response_text(body).unwrap(), "{\"a\":1}");
        assert!(matches!(response_text(r#"{"candidates": []}"#), Err(GenerationError::Malformed(_))));
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(status_error(403), GenerationError::Auth);
        assert_eq!(status_error(429), GenerationError::QuotaExceeded);
        assert!(status_error(503).is_retryable());
        assert!(!status_error(400).is_retryable());
        assert!(!GenerationError::Malformed(String::new()).is_retryable());
    }

    #[test]
    fn test_prompt_limits() {
        let tokens: Vec<Token> =
            (0..20).map(|i| Token::new(&format!("語{}", i), "ご", "名詞", "語")).collect();
        let vocabulary: Vec<VocabularyEntry> = (0..10)
            .map(|i| VocabularyEntry {
                word: format!("単語{}", i),
                base_form: format!("単語{}", i),
                reading: "たんご".to_string(),
                gloss: "word".to_string(),
                tier: ProficiencyTier::N5,
            })
            .collect();

        let prompt = build_prompt("文", &tokens, &[], &vocabulary);
        assert!(prompt.contains("語14 "));
        assert!(!prompt.contains("語15 "));
        assert!(prompt.contains("単語7 "));
        assert!(!prompt.contains("単語8 "));
        assert!(prompt.contains("語0 (ご) [Noun]"));
    }
}
