use std::time::Duration;

use log::{
    debug,
    info,
    warn,
};
use reqwest::blocking::Client;
use serde::Deserialize;

use super::{
    GlossSource,
    ResolveError,
};
use crate::{
    config::JishoSettings,
    core::{
        http::{
            http_client,
            with_retry,
        },
        BunsekiError,
    },
};

#[derive(Debug, Deserialize)]
struct JishoResponse {
    #[serde(default)]
    data: Vec<JishoEntry>,
}

#[derive(Debug, Deserialize)]
struct JishoEntry {
    #[serde(default)]
    senses: Vec<JishoSense>,
}

#[derive(Debug, Deserialize)]
struct JishoSense {
    #[serde(default)]
    english_definitions: Vec<String>,
}

/// Remote Japanese-English dictionary lookup (jisho.org search API).
pub struct JishoLookup {
    client: Client,
    base_url: String,
    max_retries: u32,
}

impl JishoLookup {
    pub fn new(settings: &JishoSettings) -> Result<Self, BunsekiError> {
        Ok(Self {
            client: http_client(Duration::from_secs(settings.timeout_secs))?,
            base_url: settings.base_url.clone(),
            max_retries: settings.max_retries,
        })
    }

    fn fetch(&self, word: &str) -> Result<String, ResolveError> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[("keyword", word)])
            .send()
            .map_err(|e| ResolveError::from_reqwest(&e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(match status.as_u16() {
                401 | 403 => ResolveError::Auth,
                429 => ResolveError::RateLimited,
                code => ResolveError::Status(code),
            });
        }

        response.text().map_err(|e| ResolveError::from_reqwest(&e))
    }
}

/// English definitions of the first sense of the first entry, `; `-joined.
pub fn parse_jisho_response(body: &str) -> Result<Option<String>, ResolveError> {
    let response: JishoResponse =
        serde_json::from_str(body).map_err(|e| ResolveError::Malformed(e.to_string()))?;

    let definitions = response
        .data
        .first()
        .and_then(|entry| entry.senses.first())
        .map(|sense| sense.english_definitions.join("; "))
        .filter(|joined| !joined.is_empty());

    Ok(definitions)
}

impl GlossSource for JishoLookup {
    fn name(&self) -> &'static str {
        "jisho"
    }

    fn caches_results(&self) -> bool {
        true
    }

    fn try_resolve(&self, word: &str) -> Result<Option<String>, ResolveError> {
        let body = with_retry(
            "Jisho lookup",
            self.max_retries,
            Duration::from_millis(500),
            ResolveError::is_retryable,
            |_| self.fetch(word),
        )?;

        match parse_jisho_response(&body)? {
            Some(english) => {
                info!("Found Jisho translation for '{}': {}", word, english);
                Ok(Some(format!("{} (EN)", english)))
            }
            None => {
                warn!("No Jisho results found for '{}'", word);
                debug!("Jisho body for '{}': {}", word, body.chars().take(200).collect::<String>());
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_first_sense() {
        let body = r#"{"data": [
            {"senses": [
                {"english_definitions": ["study", "diligence"]},
                {"english_definitions": ["experience"]}
            ]},
            {"senses": [{"english_definitions": ["ignored"]}]}
        ]}"#;
        assert_eq!(parse_jisho_response(body), Ok(Some("study; diligence".to_string())));
    }

    #[test]
    fn test_parse_empty_results() {
        assert_eq!(parse_jisho_response(r#"{"data": []}"#), Ok(None));
        assert_eq!(parse_jisho_response(r#"{"data": [{"senses": []}]}"#), Ok(None));
    }

    #[test]
    fn test_parse_malformed_body() {
        assert!(matches!(parse_jisho_response("<html>"), Err(ResolveError::Malformed(_))));
    }
}
