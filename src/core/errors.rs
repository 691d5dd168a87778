use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BunsekiError {
    #[error("I/O error: {0}")]
    Io(Box<std::io::Error>),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HJson error: {0}")]
    HJson(#[from] serde_hjson::Error),

    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    #[error("Reqwest error: {0}")]
    Reqwest(Box<reqwest::Error>),

    #[error("Vibrato error: {0}")]
    Vibrato(Box<vibrato::errors::VibratoError>),

    #[error("Text cannot be empty")]
    EmptyText,

    #[error("Text must contain Japanese characters")]
    NotJapanese,

    #[error("Tokenizer failed: {0}")]
    Tokenizer(String),

    #[error("Tokenizer dictionary not found at {0:?}")]
    MissingDictionary(PathBuf),

    #[error("BunsekiError: {0}")]
    Custom(String),
}

impl From<std::io::Error> for BunsekiError {
    fn from(error: std::io::Error) -> Self {
        BunsekiError::Io(Box::new(error))
    }
}

impl From<reqwest::Error> for BunsekiError {
    fn from(error: reqwest::Error) -> Self {
        BunsekiError::Reqwest(Box::new(error))
    }
}

impl From<vibrato::errors::VibratoError> for BunsekiError {
    fn from(error: vibrato::errors::VibratoError) -> Self {
        BunsekiError::Vibrato(Box::new(error))
    }
}
