use std::{
    collections::HashSet,
    sync::LazyLock,
};

use log::error;
use regex::Regex;

use super::rules::{
    GrammarRule,
    Span,
    Trigger,
    CASCADE,
};
use crate::core::{
    utils::token_spans,
    Token,
};

/// Lets the cascade run over text and tokens without rule-specific branching.
/// Matching happens in two passes: every trigger is evaluated first, then a
/// rule is kept only if none of the rules that subsume it matched.
struct CompiledRule {
    rule: &'static GrammarRule,
    regex: Option<Regex>,
}

static COMPILED_CASCADE: LazyLock<Vec<CompiledRule>> = LazyLock::new(|| {
    CASCADE
        .iter()
        .filter_map(|rule| match rule.trigger {
            Trigger::Text(pattern) => match Regex::new(pattern) {
                Ok(regex) => Some(CompiledRule { rule, regex: Some(regex) }),
                Err(e) => {
                    error!("Grammar rule '{}' has an invalid pattern: {}", rule.id, e);
                    None
                }
            },
            Trigger::Token(_) | Trigger::TokenPair(_) => Some(CompiledRule { rule, regex: None }),
        })
        .collect()
});

/// One sentence with its tokens and where each token sits in the text.
pub struct SentenceContext<'a> {
    pub text: &'a str,
    pub tokens: &'a [Token],
    pub spans: Vec<Option<Span>>,
}

impl<'a> SentenceContext<'a> {
    pub fn new(text: &'a str, tokens: &'a [Token]) -> Self {
        let spans = token_spans(text, tokens.iter().map(|t| t.surface.as_str()));
        Self { text, tokens, spans }
    }

    pub fn tokens_with_spans(&self) -> impl Iterator<Item = (&'a Token, Option<Span>)> + '_ {
        self.tokens.iter().zip(self.spans.iter().copied())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RuleHit {
    pub rule: &'static GrammarRule,
    /// First occurrence; `None` when a token trigger fired on tokens that
    /// could not be located in the text.
    pub span: Option<Span>,
}

impl CompiledRule {
    fn find(&self, ctx: &SentenceContext) -> Option<RuleHit> {
        match (&self.rule.trigger, &self.regex) {
            (Trigger::Text(_), Some(regex)) => regex
                .find(ctx.text)
                .map(|m| RuleHit { rule: self.rule, span: Some((m.start(), m.end())) }),
            (Trigger::Token(predicate), _) => ctx
                .tokens_with_spans()
                .find(|(token, _)| predicate(token))
                .map(|(_, span)| RuleHit { rule: self.rule, span }),
            (Trigger::TokenPair(predicate), _) => {
                let located: Vec<(&Token, Option<Span>)> = ctx.tokens_with_spans().collect();
                located.windows(2).find(|pair| predicate(pair[0].0, pair[1].0)).map(|pair| {
                    let span = match (pair[0].1, pair[1].1) {
                        (Some((start, _)), Some((_, end))) => Some((start, end)),
                        _ => None,
                    };
                    RuleHit { rule: self.rule, span }
                })
            }
            (Trigger::Text(_), None) => None,
        }
    }
}

/// Hits of the built-in cascade, in cascade order, with subsumed rules removed.
pub fn match_cascade(ctx: &SentenceContext) -> Vec<RuleHit> {
    let found: Vec<RuleHit> = COMPILED_CASCADE.iter().filter_map(|rule| rule.find(ctx)).collect();
    let matched: HashSet<&str> = found.iter().map(|hit| hit.rule.id).collect();

    found
        .into_iter()
        .filter(|hit| !hit.rule.suppressed_by.iter().any(|id| matched.contains(id)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::rules::{
        COPULA,
        HEARSAY,
        NEGATIVE,
        OBLIGATION,
        PAST_COPULA,
        PROGRESSIVE_PLAIN,
    };

    fn ids(text: &str, tokens: &[Token]) -> Vec<&'static str> {
        match_cascade(&SentenceContext::new(text, tokens)).iter().map(|hit| hit.rule.id).collect()
    }

    #[test]
    fn test_every_text_rule_compiles() {
        assert_eq!(COMPILED_CASCADE.len(), CASCADE.len());
    }

    #[test]
    fn test_suppression_uses_matched_rules() {
        assert_eq!(ids("行かなければならない", &[]), vec![OBLIGATION]);
        assert_eq!(ids("行かない", &[]), vec![NEGATIVE]);
        assert_eq!(ids("美味しそうです", &[]), vec![HEARSAY]);
        assert_eq!(ids("学生でした", &[]), vec![PAST_COPULA]);
        assert_eq!(ids("学生です", &[]), vec![COPULA]);
    }

    #[test]
    fn test_first_occurrence_span() {
        let hits = match_cascade(&SentenceContext::new("本を読んでいる", &[]));
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].rule.id, PROGRESSIVE_PLAIN);
        let (start, end) = hits[0].span.unwrap();
        assert_eq!(&"本を読んでいる"[start..end], "でいる");
    }

    #[test]
    fn test_token_trigger_without_span() {
        let tokens = vec![Token::new("する", "する", "動詞", "する")];
        let hits = match_cascade(&SentenceContext::new("勉強", &tokens));
        assert_eq!(hits.len(), 1);
        assert!(hits[0].span.is_none());
    }
}
