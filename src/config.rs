use std::{
    env,
    path::PathBuf,
    time::Duration,
};

use log::info;
use serde::{
    Deserialize,
    Serialize,
};

use crate::persistence::{
    get_app_data_dir,
    get_data_file_path,
    load_json_or_default,
    save_json,
};

pub const SETTINGS_FILE: &str = "settings.json";

pub const TIER_LISTS_FILE: &str = "jlpt_vocab.json";
pub const GLOSS_DICTIONARY_FILE: &str = "vocabulary_dictionary.json";
pub const GRAMMAR_PATTERNS_FILE: &str = "grammar_patterns.hjson";
pub const TRANSLATION_CACHE_FILE: &str = "translation_cache.json";
pub const LOANWORDS_FILE: &str = "loanwords.txt";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub data_dir: Option<PathBuf>,
    pub vocabulary_limit: usize,
    pub tokenizer: TokenizerSettings,
    pub jisho: JishoSettings,
    pub machine_translation: MachineTranslationSettings,
    pub ai: AiSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: None,
            vocabulary_limit: 10,
            tokenizer: TokenizerSettings::default(),
            jisho: JishoSettings::default(),
            machine_translation: MachineTranslationSettings::default(),
            ai: AiSettings::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenizerSettings {
    /// Explicit vibrato `system.dic` (or `.dic.zst`). Downloaded UniDic otherwise.
    pub dictionary_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct JishoSettings {
    pub enabled: bool,
    pub base_url: String,
    pub timeout_secs: u64,
    pub max_retries: u32,
}

impl Default for JishoSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            base_url: "https://jisho.org/api/v1/search/words".to_string(),
            timeout_secs: 5,
            max_retries: 1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MachineTranslationSettings {
    pub enabled: bool,
    pub api_key: Option<String>,
    pub endpoint: String,
    pub target_lang: String,
    pub timeout_secs: u64,
    pub max_retries: u32,
}

impl Default for MachineTranslationSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            api_key: None,
            endpoint: "https://api-free.deepl.com/v2/translate".to_string(),
            target_lang: "EN".to_string(),
            timeout_secs: 5,
            max_retries: 2,
        }
    }
}

impl MachineTranslationSettings {
    pub fn is_usable(&self) -> bool {
        self.enabled && self.api_key.as_deref().is_some_and(|key| !key.trim().is_empty())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AiProvider {
    #[default]
    None,
    Gemini,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AiSettings {
    pub provider: AiProvider,
    pub api_key: Option<String>,
    pub model: String,
    pub endpoint: String,
    pub timeout_secs: u64,
    pub max_retries: u32,
    pub cache_capacity: usize,
    pub cache_ttl_hours: i64,
}

impl Default for AiSettings {
    fn default() -> Self {
        Self {
            provider: AiProvider::None,
            api_key: None,
            model: "gemini-1.5-flash-latest".to_string(),
            endpoint: "https://generativelanguage.googleapis.com/v1beta/models".to_string(),
            timeout_secs: 15,
            max_retries: 2,
            cache_capacity: 500,
            cache_ttl_hours: 24,
        }
    }
}

impl AiSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// A configured provider with a real key. Placeholder keys count as missing.
    pub fn is_usable(&self) -> bool {
        self.provider == AiProvider::Gemini
            && self
                .api_key
                .as_deref()
                .is_some_and(|key| !key.trim().is_empty() && key != "your-gemini-api-key-here")
    }
}

impl Settings {
    /// Settings file from the app data dir, then environment overrides.
    pub fn load() -> Self {
        let mut settings: Settings = load_json_or_default(&get_data_file_path(SETTINGS_FILE));
        settings.apply_env_overrides(|key| env::var(key).ok());
        settings
    }

    pub fn save(&self) -> Result<(), crate::core::BunsekiError> {
        save_json(self, &get_data_file_path(SETTINGS_FILE))
    }

    pub fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(dir) = lookup("BUNSEKI_DATA_DIR") {
            self.data_dir = Some(PathBuf::from(dir));
        }
        if let Some(provider) = lookup("AI_PROVIDER") {
            self.ai.provider = match provider.trim().to_lowercase().as_str() {
                "gemini" => AiProvider::Gemini,
                _ => AiProvider::None,
            };
        }
        if let Some(key) = lookup("GEMINI_API_KEY") {
            self.ai.api_key = Some(key);
        }
        if let Some(model) = lookup("AI_MODEL") {
            self.ai.model = model;
        }
        if let Some(key) = lookup("DEEPL_API_KEY") {
            info!("DeepL API key found in environment, enabling machine translation");
            self.machine_translation.api_key = Some(key);
            self.machine_translation.enabled = true;
        }
    }

    /// Turns off every network-backed source.
    pub fn offline(mut self) -> Self {
        self.jisho.enabled = false;
        self.machine_translation.enabled = false;
        self.ai.provider = AiProvider::None;
        self
    }

    pub fn data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(|| get_app_data_dir().join("data"))
    }

    pub fn data_file(&self, filename: &str) -> PathBuf {
        self.data_dir().join(filename)
    }
}
