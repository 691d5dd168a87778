use std::time::Duration;

use log::{
    info,
    warn,
};
use reqwest::{
    blocking::Client,
    header::AUTHORIZATION,
};
use serde::Deserialize;

use super::{
    GlossSource,
    ResolveError,
};
use crate::{
    config::MachineTranslationSettings,
    core::{
        http::{
            http_client,
            with_retry,
        },
        BunsekiError,
    },
};

#[derive(Debug, Deserialize)]
struct DeepLResponse {
    #[serde(default)]
    translations: Vec<DeepLTranslation>,
}

#[derive(Debug, Deserialize)]
struct DeepLTranslation {
    text: String,
}

/// Machine translation through the DeepL REST API.
pub struct DeepLTranslator {
    client: Client,
    endpoint: String,
    api_key: String,
    target_lang: String,
    max_retries: u32,
}

impl DeepLTranslator {
    /// `None` unless machine translation is enabled and has a key.
    pub fn from_settings(
        settings: &MachineTranslationSettings,
    ) -> Result<Option<Self>, BunsekiError> {
        if !settings.is_usable() {
            return Ok(None);
        }
        let Some(api_key) = settings.api_key.clone() else {
            return Ok(None);
        };

        Ok(Some(Self {
            client: http_client(Duration::from_secs(settings.timeout_secs))?,
            endpoint: settings.endpoint.clone(),
            api_key,
            target_lang: settings.target_lang.clone(),
            max_retries: settings.max_retries,
        }))
    }

    fn request(&self, text: &str) -> Result<String, ResolveError> {
        let response = self
            .client
            .post(&self.endpoint)
            .header(AUTHORIZATION, format!("DeepL-Auth-Key {}", self.api_key))
            .form(&[
                ("text", text),
                ("source_lang", "JA"),
                ("target_lang", self.target_lang.as_str()),
            ])
            .send()
            .map_err(|e| ResolveError::from_reqwest(&e))?;

        let status = response.status().as_u16();
        if !(200..300).contains(&status) {
            return Err(status_error(status));
        }

        let body = response.text().map_err(|e| ResolveError::from_reqwest(&e))?;
        parse_deepl_response(&body)
    }

    /// Translates arbitrary Japanese text. Used for whole sentences as well as words.
    pub fn translate_text(&self, text: &str) -> Result<String, ResolveError> {
        let translated = with_retry(
            "DeepL translation",
            self.max_retries,
            Duration::from_secs(1),
            ResolveError::is_retryable,
            |_| self.request(text),
        )?;
        info!("DeepL translated '{}' -> '{}'", text, translated);
        Ok(translated)
    }
}

pub fn status_error(status: u16) -> ResolveError {
    match status {
        401 | 403 => ResolveError::Auth,
        456 => ResolveError::QuotaExceeded,
        429 => ResolveError::RateLimited,
        code => ResolveError::Status(code),
    }
}

pub fn parse_deepl_response(body: &str) -> Result<String, ResolveError> {
    let response: DeepLResponse =
        serde_json::from_str(body).map_err(|e| ResolveError::Malformed(e.to_string()))?;

    response
        .translations
        .into_iter()
        .next()
        .map(|t| t.text.trim().to_string())
        .filter(|text| !text.is_empty())
        .ok_or_else(|| ResolveError::Malformed("no translations in response".to_string()))
}

impl GlossSource for DeepLTranslator {
    fn name(&self) -> &'static str {
        "deepl"
    }

    fn caches_results(&self) -> bool {
        true
    }

    fn try_resolve(&self, word: &str) -> Result<Option<String>, ResolveError> {
        match self.translate_text(word) {
            Ok(text) => Ok(Some(text)),
            Err(ResolveError::Malformed(reason)) => {
                warn!("DeepL returned nothing usable for '{}': {}", word, reason);
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(status_error(403), ResolveError::Auth);
        assert_eq!(status_error(456), ResolveError::QuotaExceeded);
        assert_eq!(status_error(429), ResolveError::RateLimited);
        assert_eq!(status_error(503), ResolveError::Status(503));
        assert!(status_error(503).is_retryable());
        assert!(!status_error(456).is_retryable());
    }

    #[test]
    fn test_parse_response() {
        let body = r#"{"translations": [{"detected_source_language": "JA", "text": " I am studying. "}]}"#;
        assert_eq!(parse_deepl_response(body), Ok("I am studying.".to_string()));
        assert!(matches!(
            parse_deepl_response(r#"{"translations": []}"#),
            Err(ResolveError::Malformed(_))
        ));
    }

    #[test]
    fn test_disabled_without_key() {
        let mut settings = MachineTranslationSettings::default();
        settings.enabled = true;
        assert!(DeepLTranslator::from_settings(&settings).unwrap().is_none());
    }
}
