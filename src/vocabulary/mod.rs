pub mod extractor;
pub mod proper_noun;

pub use extractor::VocabularyExtractor;
pub use proper_noun::{
    is_proper_noun,
    LoanwordWhitelist,
};
