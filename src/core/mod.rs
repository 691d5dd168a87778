pub mod errors;
pub mod http;
pub mod models;
pub mod pipeline;
pub mod utils;

pub use errors::BunsekiError;
pub use models::{
    AnalysisResult,
    GrammarMatch,
    Token,
    VocabularyEntry,
};
pub use pipeline::{
    validate_input,
    Analyzer,
};
