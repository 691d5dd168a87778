use std::collections::HashMap;

use super::{
    GlossSource,
    ResolveError,
};

/// Hand-checked glosses that win over every other source.
pub const COMMON_GLOSSES: &[(&str, &str)] = &[
    // Expressions
    ("そう", "so, like that, in that way"),
    ("もう", "already, anymore, again"),
    ("よし", "all right, okay"),
    ("いや", "no, well"),
    ("ええ", "yes, well"),
    ("はい", "yes"),
    ("いいえ", "no"),
    ("ううん", "no (casual)"),
    ("うん", "yeah (casual)"),
    ("ああ", "ah, oh"),
    ("へえ", "oh really"),
    // Verbs and adjectives
    ("いい", "good, fine"),
    ("良い", "good, fine"),
    ("言う", "to say"),
    ("為る", "to do"),
    ("する", "to do"),
    ("やる", "to do (casual)"),
    ("なる", "to become"),
    ("ある", "to exist (things), to have"),
    ("いる", "to exist (living beings)"),
    ("見る", "to see, to watch"),
    ("聞く", "to listen, to hear, to ask"),
    ("話す", "to speak"),
    ("書く", "to write"),
    ("読む", "to read"),
    ("食べる", "to eat"),
    ("飲む", "to drink"),
    ("行く", "to go"),
    ("来る", "to come"),
    ("分かる", "to understand"),
    // Relational words
    ("互い", "mutual, each other"),
    ("相手", "partner, opponent, the other person"),
    ("求める", "to seek, to demand"),
    ("物", "thing, object"),
    ("事", "matter, fact, thing"),
    ("決まる", "to be decided"),
    ("全然", "not at all (with negation)"),
    ("逆", "reverse, opposite"),
    ("気", "spirit, mood, feeling, attention"),
    ("却って", "on the contrary, rather"),
    ("挑発", "provocation"),
    ("反省", "reflection, regret"),
    // Pronouns
    ("私", "I, me"),
    ("僕", "I (male)"),
    ("俺", "I (male, casual)"),
    ("あなた", "you"),
    ("君", "you (casual)"),
    ("彼", "he, him"),
    ("彼女", "she, her, girlfriend"),
    ("これ", "this"),
    ("それ", "that"),
    ("あれ", "that (over there)"),
    // Question words
    ("何", "what"),
    ("誰", "who"),
    ("どこ", "where"),
    ("いつ", "when"),
    ("なぜ", "why"),
    ("どう", "how"),
    ("どれ", "which one"),
    // Adjectives
    ("大きい", "big"),
    ("小さい", "small"),
    ("新しい", "new"),
    ("古い", "old"),
    ("高い", "tall, expensive"),
    ("安い", "cheap"),
    ("早い", "early, fast"),
    ("遅い", "late, slow"),
    ("多い", "many"),
    ("少ない", "few"),
    // Time
    ("今", "now"),
    ("昨日", "yesterday"),
    ("明日", "tomorrow"),
    ("今日", "today"),
    ("毎日", "every day"),
    ("いつも", "always"),
    ("時々", "sometimes"),
    // Nouns
    ("人", "person, people"),
    ("時", "time, moment"),
    ("日", "day, sun"),
    ("年", "year"),
    ("月", "month, moon"),
    ("朝", "morning"),
    ("夜", "night, evening"),
    ("家", "house, home"),
    ("学校", "school"),
    ("先生", "teacher"),
    ("友達", "friend"),
    ("日本語", "Japanese (language)"),
    ("勉強", "study"),
];

#[derive(Debug)]
pub struct PriorityGlosses {
    entries: HashMap<&'static str, &'static str>,
}

impl Default for PriorityGlosses {
    fn default() -> Self {
        Self { entries: COMMON_GLOSSES.iter().copied().collect() }
    }
}

impl GlossSource for PriorityGlosses {
    fn name(&self) -> &'static str {
        "priority"
    }

    fn try_resolve(&self, word: &str) -> Result<Option<String>, ResolveError> {
        Ok(self.entries.get(word).map(|gloss| gloss.to_string()))
    }
}
