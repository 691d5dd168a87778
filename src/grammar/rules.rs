use std::fmt;

use crate::{
    core::Token,
    proficiency::ProficiencyTier,
    segmentation::UnidicTag,
};

/// Byte span of a match inside the analysed text.
pub type Span = (usize, usize);

pub type TokenPredicate = fn(&Token) -> bool;
pub type TokenPairPredicate = fn(&Token, &Token) -> bool;

pub enum Trigger {
    /// Regex over the raw sentence text.
    Text(&'static str),
    /// Predicate over single tokens; the first token that passes is the match.
    Token(TokenPredicate),
    /// Predicate over a token and the one after it; the match spans both.
    TokenPair(TokenPairPredicate),
}

pub struct GrammarRule {
    pub id: &'static str,
    pub trigger: Trigger,
    /// Rules that, when they also matched, already explain this construction.
    pub suppressed_by: &'static [&'static str],
    pub description: &'static str,
    pub tier: ProficiencyTier,
    pub example: &'static str,
    pub note: Option<&'static str>,
}

impl fmt::Debug for GrammarRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GrammarRule").field("id", &self.id).field("tier", &self.tier).finish()
    }
}

pub const INVITATION: &str = "～ませんか";
pub const OBLIGATION: &str = "～なければならない";
pub const PERMISSION: &str = "～てもいい";
pub const REQUEST: &str = "～てください";
pub const PROGRESSIVE_POLITE: &str = "～ています";
pub const PROGRESSIVE_CASUAL: &str = "～てる";
pub const PROGRESSIVE_PLAIN: &str = "～ている";
pub const PAST_POLITE: &str = "～ました";
pub const NEGATIVE_POLITE: &str = "～ません";
pub const POLITE: &str = "～ます";
pub const PAST_COPULA: &str = "～でした";
pub const COPULA: &str = "～です";
pub const DESIRE: &str = "～たい";
pub const PAST_PLAIN: &str = "～た";
pub const NEGATIVE: &str = "～ない";
pub const CONJECTURE: &str = "～でしょう";
pub const HEARSAY: &str = "～そうです";
pub const DEADLINE: &str = "～までに";
pub const PURPOSE: &str = "～ために / ～ように";
pub const CONJUNCTIVE: &str = "～て";
pub const LIGHT_VERB: &str = "～する";

fn is_conjunctive_te(token: &Token) -> bool {
    matches!(token.surface.as_str(), "て" | "で")
        && token.tag() == UnidicTag::Joshi
        && token.has_detail(UnidicTag::Setsuzokujoshi)
}

fn is_light_verb(token: &Token) -> bool {
    token.tag() == UnidicTag::Doushi && matches!(token.base_form.as_str(), "する" | "為る")
}

fn is_past_auxiliary(token: &Token) -> bool {
    token.tag() == UnidicTag::Jodoushi
        && matches!(token.surface.as_str(), "た" | "だ")
        && token.lemma == "た"
}

/// て/で followed by the contracted る of いる, as in 見てる or 読んでる.
fn is_contracted_progressive(te: &Token, next: &Token) -> bool {
    is_conjunctive_te(te)
        && next.tag() == UnidicTag::Doushi
        && next.surface == "る"
        && matches!(next.lemma.as_str(), "居る" | "いる")
}

/// The detection cascade, most specific forms first. A rule is emitted when
/// its trigger matched and none of the rules listed in `suppressed_by` did.
pub const CASCADE: &[GrammarRule] = &[
    GrammarRule {
        id: INVITATION,
        trigger: Trigger::Text("ませんか"),
        suppressed_by: &[],
        description: "Negative question used as a polite invitation: \"won't you...?\"",
        tier: ProficiencyTier::N5,
        example: "一緒に行きませんか (won't you come with me?)",
        note: Some("Softer than a direct request; the listener can decline without losing face."),
    },
    GrammarRule {
        id: OBLIGATION,
        trigger: Trigger::Text(
            "なければ(?:ならない|なりません|いけない|いけません)|なきゃ|なくては(?:ならない|いけない)|なくちゃ",
        ),
        suppressed_by: &[],
        description: "Obligation: \"must\", \"have to\".",
        tier: ProficiencyTier::N4,
        example: "行かなければならない (I have to go)",
        note: Some("Literally \"if I don't go, it won't do\". なきゃ and なくちゃ are the spoken contractions."),
    },
    GrammarRule {
        id: PERMISSION,
        trigger: Trigger::Text("[てで]も(?:いい|良い|かまわない|構わない)"),
        suppressed_by: &[],
        description: "Permission: \"it is fine to\", \"you may\".",
        tier: ProficiencyTier::N4,
        example: "食べてもいい (you may eat)",
        note: Some("As a question (てもいいですか) it asks for permission."),
    },
    GrammarRule {
        id: REQUEST,
        trigger: Trigger::Text("[てで]ください"),
        suppressed_by: &[],
        description: "Polite request: \"please do\".",
        tier: ProficiencyTier::N5,
        example: "見てください (please look)",
        note: Some("Attach ください to the te-form. The negative request is ないでください."),
    },
    GrammarRule {
        id: PROGRESSIVE_POLITE,
        trigger: Trigger::Text("[てで]い(?:ます|ました|ません)"),
        suppressed_by: &[],
        description: "Polite progressive or resulting state: an ongoing action or a lasting result.",
        tier: ProficiencyTier::N5,
        example: "勉強しています (I am studying)",
        note: Some("With change-of-state verbs (結婚する, 来る) it describes the resulting state, not an action in progress."),
    },
    GrammarRule {
        id: PROGRESSIVE_CASUAL,
        trigger: Trigger::TokenPair(is_contracted_progressive),
        suppressed_by: &[PROGRESSIVE_POLITE],
        description: "Contracted casual progressive (ている with the い dropped).",
        tier: ProficiencyTier::N4,
        example: "何してるの? (what are you doing?)",
        note: Some("Very common in speech; keep ている or ています in writing."),
    },
    GrammarRule {
        id: PROGRESSIVE_PLAIN,
        trigger: Trigger::Text("[てで]い(?:る|た|ない)"),
        suppressed_by: &[PROGRESSIVE_POLITE, PROGRESSIVE_CASUAL],
        description: "Plain progressive or resulting state.",
        tier: ProficiencyTier::N5,
        example: "本を読んでいる (reading a book)",
        note: None,
    },
    GrammarRule {
        id: PAST_POLITE,
        trigger: Trigger::Text("ました"),
        suppressed_by: &[PROGRESSIVE_POLITE],
        description: "Polite past tense of verbs.",
        tier: ProficiencyTier::N5,
        example: "行きました (I went)",
        note: None,
    },
    GrammarRule {
        id: NEGATIVE_POLITE,
        trigger: Trigger::Text("ません"),
        suppressed_by: &[INVITATION, OBLIGATION, PROGRESSIVE_POLITE],
        description: "Polite negative of verbs.",
        tier: ProficiencyTier::N5,
        example: "行きません (I don't go)",
        note: Some("The polite past negative adds でした: 行きませんでした."),
    },
    GrammarRule {
        id: POLITE,
        trigger: Trigger::Text("ます"),
        suppressed_by: &[PAST_POLITE, NEGATIVE_POLITE, INVITATION, PROGRESSIVE_POLITE],
        description: "Polite non-past form of verbs: present habit or future.",
        tier: ProficiencyTier::N5,
        example: "行きます (I go / I will go)",
        note: Some("The default register with strangers, colleagues and in class."),
    },
    GrammarRule {
        id: PAST_COPULA,
        trigger: Trigger::Text("でした"),
        suppressed_by: &[],
        description: "Polite past copula: \"was\".",
        tier: ProficiencyTier::N5,
        example: "学生でした (I was a student)",
        note: None,
    },
    GrammarRule {
        id: COPULA,
        trigger: Trigger::Text("です"),
        suppressed_by: &[PAST_COPULA, HEARSAY],
        description: "Polite copula: \"to be\".",
        tier: ProficiencyTier::N5,
        example: "学生です (I am a student)",
        note: Some("After an i-adjective です only adds politeness: 高いです."),
    },
    GrammarRule {
        id: DESIRE,
        trigger: Trigger::Text("たい"),
        suppressed_by: &[],
        description: "Desire: \"want to do\".",
        tier: ProficiencyTier::N5,
        example: "食べたい (I want to eat)",
        note: Some("Conjugates like an i-adjective: 食べたくない, 食べたかった."),
    },
    GrammarRule {
        id: PAST_PLAIN,
        trigger: Trigger::Token(is_past_auxiliary),
        suppressed_by: &[DESIRE, PAST_POLITE, PAST_COPULA, PROGRESSIVE_PLAIN],
        description: "Plain past tense (ta-form).",
        tier: ProficiencyTier::N5,
        example: "昨日映画を見た (I watched a movie yesterday)",
        note: Some("Built from the te-form: て becomes た, で becomes だ."),
    },
    GrammarRule {
        id: NEGATIVE,
        trigger: Trigger::Text("ない"),
        suppressed_by: &[OBLIGATION, PROGRESSIVE_PLAIN],
        description: "Plain negative form.",
        tier: ProficiencyTier::N5,
        example: "行かない (I don't go)",
        note: None,
    },
    GrammarRule {
        id: CONJECTURE,
        trigger: Trigger::Text("でしょう|だろう"),
        suppressed_by: &[],
        description: "Conjecture: \"probably\", \"I suppose\".",
        tier: ProficiencyTier::N4,
        example: "明日は雨でしょう (it will probably rain tomorrow)",
        note: Some("With a rising tone it asks for agreement: \"right?\"."),
    },
    GrammarRule {
        id: HEARSAY,
        trigger: Trigger::Text("そう(?:です|だ)"),
        suppressed_by: &[],
        description: "Hearsay or appearance: \"I heard that\" or \"it looks like\".",
        tier: ProficiencyTier::N4,
        example: "美味しそうです (it looks delicious)",
        note: Some("After a plain form it reports hearsay; after a stem it describes appearance."),
    },
    GrammarRule {
        id: DEADLINE,
        trigger: Trigger::Text("までに"),
        suppressed_by: &[],
        description: "Deadline: \"by (a time)\".",
        tier: ProficiencyTier::N4,
        example: "五時までに帰る (I'll be back by five)",
        note: Some("まで alone means \"until\" and describes a continuing action."),
    },
    GrammarRule {
        id: PURPOSE,
        trigger: Trigger::Text("ために|ように"),
        suppressed_by: &[],
        description: "Purpose or manner: \"in order to\", \"so that\".",
        tier: ProficiencyTier::N4,
        example: "合格するために勉強する (I study in order to pass)",
        note: Some("ために follows volitional actions; ように follows states or abilities."),
    },
    GrammarRule {
        id: CONJUNCTIVE,
        trigger: Trigger::Token(is_conjunctive_te),
        suppressed_by: &[
            PERMISSION,
            REQUEST,
            PROGRESSIVE_POLITE,
            PROGRESSIVE_CASUAL,
            PROGRESSIVE_PLAIN,
        ],
        description: "Te-form: links actions in sequence or gives a reason.",
        tier: ProficiencyTier::N5,
        example: "朝ご飯を食べて、学校に行く (I eat breakfast and go to school)",
        note: Some("The te-form itself has no tense; the final verb sets it."),
    },
    GrammarRule {
        id: LIGHT_VERB,
        trigger: Trigger::Token(is_light_verb),
        suppressed_by: &[],
        description: "する turns a noun into a verb: \"to do\".",
        tier: ProficiencyTier::N5,
        example: "勉強する (to study)",
        note: Some("Many Sino-Japanese nouns become verbs this way: 運動する, 料理する."),
    },
];

pub fn find_rule(id: &str) -> Option<&'static GrammarRule> {
    CASCADE.iter().find(|rule| rule.id == id)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_rule_ids_are_unique() {
        let ids: HashSet<&str> = CASCADE.iter().map(|rule| rule.id).collect();
        assert_eq!(ids.len(), CASCADE.len());
    }

    #[test]
    fn test_suppressors_exist() {
        for rule in CASCADE {
            for id in rule.suppressed_by {
                assert!(find_rule(id).is_some(), "{} names unknown rule {}", rule.id, id);
            }
        }
    }

    #[test]
    fn test_token_predicates() {
        let te = Token::new("て", "て", "助詞", "て").with_details(&["接続助詞"]);
        let de_place = Token::new("で", "で", "助詞", "で").with_details(&["格助詞"]);
        let shi = Token::new("し", "し", "動詞", "する").with_details(&["非自立可能"]);
        let ta = Token::new("た", "た", "助動詞", "た");
        let da_past = Token::new("だ", "だ", "助動詞", "だ").with_lemma("た");
        let da_copula = Token::new("だ", "だ", "助動詞", "だ");

        assert!(is_conjunctive_te(&te));
        assert!(!is_conjunctive_te(&de_place));
        assert!(is_light_verb(&shi));
        assert!(is_past_auxiliary(&ta));
        assert!(is_past_auxiliary(&da_past));
        assert!(!is_past_auxiliary(&da_copula));
    }

    #[test]
    fn test_contracted_progressive_needs_iru() {
        let te = Token::new("て", "て", "助詞", "て").with_details(&["接続助詞"]);
        let ru = Token::new("る", "る", "動詞", "る").with_lemma("居る");
        let suteru = Token::new("捨てる", "すてる", "動詞", "捨てる");
        let ru_verb = Token::new("る", "る", "動詞", "る");

        assert!(is_contracted_progressive(&te, &ru));
        assert!(!is_contracted_progressive(&te, &suteru));
        assert!(!is_contracted_progressive(&te, &ru_verb));
        assert!(!is_contracted_progressive(&ru, &te));
    }
}
