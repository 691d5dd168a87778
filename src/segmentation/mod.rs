pub mod token_models;
pub mod tokenizer;
pub mod unidic_tags;

pub use tokenizer::{
    MorphologicalAnalyzer,
    VibratoAnalyzer,
};
pub use unidic_tags::UnidicTag;
