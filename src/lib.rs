pub mod config;
pub mod core;
pub mod dictionary;
pub mod explanation;
pub mod grammar;
pub mod persistence;
pub mod proficiency;
pub mod segmentation;
pub mod translation;
pub mod vocabulary;

pub use crate::core::{
    AnalysisResult,
    Analyzer,
    BunsekiError,
};
pub use config::Settings;
