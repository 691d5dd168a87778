pub mod gloss_dictionary;
pub mod tier_lists;
pub mod token_dictionary;

pub use gloss_dictionary::GlossDictionary;
pub use tier_lists::TierWordLists;
