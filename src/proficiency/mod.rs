pub mod classifier;
pub mod tier;

pub use classifier::ProficiencyClassifier;
pub use tier::ProficiencyTier;
