use log::info;
use vibrato::Tokenizer;

use super::token_models::VibratoToken;
use crate::{
    config::Settings,
    core::{
        BunsekiError,
        Token,
    },
    dictionary::token_dictionary::{
        load_dictionary,
        resolve_dictionary_path,
    },
};

/// Morphological analysis boundary. Implementations must be shareable across
/// the batch worker threads.
pub trait MorphologicalAnalyzer: Send + Sync {
    fn tokenize(&self, text: &str) -> Result<Vec<Token>, BunsekiError>;
}

pub struct VibratoAnalyzer {
    tokenizer: Tokenizer,
}

impl VibratoAnalyzer {
    pub fn new(tokenizer: Tokenizer) -> Self {
        Self { tokenizer }
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, BunsekiError> {
        Ok(Self::new(init_vibrato(settings)?))
    }
}

impl MorphologicalAnalyzer for VibratoAnalyzer {
    fn tokenize(&self, text: &str) -> Result<Vec<Token>, BunsekiError> {
        // Workers hold per-sentence lattice state, so each call gets its own
        let mut worker = self.tokenizer.new_worker();
        worker.reset_sentence(text);
        worker.tokenize();

        let tokens: Vec<Token> = worker
            .token_iter()
            .map(|token| Token::from(VibratoToken::from(token)))
            .filter(|token| !token.surface.trim().is_empty())
            .collect();

        if tokens.is_empty() {
            return Err(BunsekiError::Tokenizer(format!("no tokens produced for '{}'", text)));
        }
        Ok(tokens)
    }
}

pub fn init_vibrato(settings: &Settings) -> Result<Tokenizer, BunsekiError> {
    let dict_path = resolve_dictionary_path(settings)?;
    info!("Loading tokenizer dictionary from {}", dict_path.display());
    let dict = load_dictionary(&dict_path)?;
    Ok(Tokenizer::new(dict))
}
