pub mod detector;
pub mod excerpt;
pub mod particles;
pub mod pattern_file;
pub mod rule_matcher;
pub mod rules;


pub use detector::{
    GrammarDetector,
    FALLBACK_PATTERN,
};
pub use pattern_file::SupplementaryPattern;
