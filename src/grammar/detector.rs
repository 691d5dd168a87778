use std::collections::HashSet;

use log::{
    debug,
    info,
};

use super::{
    excerpt::excerpt,
    particles::{
        is_subsumed_by_combined,
        particle_info,
        ParticleInfo,
        COMBINED_PARTICLE,
    },
    pattern_file::{
        load_patterns,
        SupplementaryPattern,
    },
    rule_matcher::{
        match_cascade,
        SentenceContext,
    },
    rules::{
        GrammarRule,
        Span,
    },
};
use crate::{
    config::{
        Settings,
        GRAMMAR_PATTERNS_FILE,
    },
    core::{
        GrammarMatch,
        Token,
    },
    proficiency::ProficiencyTier,
    segmentation::UnidicTag,
};

pub const FALLBACK_PATTERN: &str = "Simple sentence";

/// Matches collected for one sentence, with the ids and spans already explained.
struct Emitted<'t> {
    text: &'t str,
    matches: Vec<GrammarMatch>,
    ids: HashSet<String>,
    spans: Vec<Span>,
}

impl<'t> Emitted<'t> {
    fn new(text: &'t str) -> Self {
        Self { text, matches: Vec::new(), ids: HashSet::new(), spans: Vec::new() }
    }

    fn has(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    /// Span lies inside something already emitted.
    fn covers(&self, span: Option<Span>) -> bool {
        span.is_some_and(|(start, end)| self.spans.iter().any(|&(s, e)| s <= start && end <= e))
    }

    fn push(&mut self, grammar_match: GrammarMatch, span: Option<Span>) {
        if let Some(span) = span {
            self.spans.push(span);
        }
        self.ids.insert(grammar_match.pattern_id.clone());
        self.matches.push(grammar_match);
    }

    fn push_rule(&mut self, rule: &GrammarRule, span: Option<Span>) {
        let grammar_match = GrammarMatch {
            pattern_id: rule.id.to_string(),
            description: rule.description.to_string(),
            tier: rule.tier,
            canonical_example: rule.example.to_string(),
            in_sentence_excerpt: span.and_then(|span| excerpt(self.text, span)),
            teaching_note: rule.note.map(str::to_string),
        };
        self.push(grammar_match, span);
    }

    fn push_particle(&mut self, info: &ParticleInfo, span: Option<Span>) {
        let grammar_match = GrammarMatch {
            pattern_id: info.surface.to_string(),
            description: info.description.to_string(),
            tier: info.tier,
            canonical_example: info.example.to_string(),
            in_sentence_excerpt: span.and_then(|span| excerpt(self.text, span)),
            teaching_note: Some(info.note.to_string()),
        };
        self.push(grammar_match, span);
    }

    fn push_supplementary(&mut self, pattern: &SupplementaryPattern, span: Span) {
        let grammar_match = GrammarMatch {
            pattern_id: pattern.id.clone(),
            description: pattern.description.clone(),
            tier: pattern.tier,
            canonical_example: pattern.example.clone(),
            in_sentence_excerpt: excerpt(self.text, span),
            teaching_note: pattern.note.clone(),
        };
        self.push(grammar_match, Some(span));
    }
}

/// Rule-based grammar annotator. Built-in cascade first, then patterns from
/// the optional data file, then particles. Never returns an empty list.
#[derive(Debug, Default)]
pub struct GrammarDetector {
    supplementary: Vec<SupplementaryPattern>,
}

impl GrammarDetector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_patterns(supplementary: Vec<SupplementaryPattern>) -> Self {
        Self { supplementary }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::with_patterns(load_patterns(&settings.data_file(GRAMMAR_PATTERNS_FILE)))
    }

    pub fn supplementary_count(&self) -> usize {
        self.supplementary.len()
    }

    pub fn detect_patterns(&self, text: &str, tokens: &[Token]) -> Vec<GrammarMatch> {
        let ctx = SentenceContext::new(text, tokens);
        let mut emitted = Emitted::new(text);

        for hit in match_cascade(&ctx) {
            emitted.push_rule(hit.rule, hit.span);
        }

        for pattern in &self.supplementary {
            if emitted.has(&pattern.id) {
                continue;
            }
            if let Some(m) = pattern.regex.find(text) {
                let span = (m.start(), m.end());
                if emitted.covers(Some(span)) {
                    debug!("Supplementary pattern '{}' already explained", pattern.id);
                    continue;
                }
                emitted.push_supplementary(pattern, span);
            }
        }

        detect_particles(&ctx, &mut emitted);

        if emitted.matches.is_empty() {
            emitted.matches.push(fallback_match());
        }

        info!("Detected {} grammar patterns", emitted.matches.len());
        emitted.matches
    }
}

fn detect_particles(ctx: &SentenceContext, emitted: &mut Emitted) {
    let combined_spans: Vec<Span> = ctx
        .text
        .match_indices(COMBINED_PARTICLE)
        .map(|(start, s)| (start, start + s.len()))
        .collect();
    let combined = particle_info(COMBINED_PARTICLE);

    let inside_combined = |span: Option<Span>| {
        span.is_some_and(|(start, end)| combined_spans.iter().any(|&(s, e)| s <= start && end <= e))
    };

    for (token, span) in ctx.tokens_with_spans() {
        if token.tag() != UnidicTag::Joshi {
            continue;
        }
        let surface = token.surface.as_str();

        if is_subsumed_by_combined(surface) && inside_combined(span) {
            if let Some(info) = combined {
                if !emitted.has(COMBINED_PARTICLE) {
                    emitted.push_particle(info, combined_spans.first().copied());
                }
            }
            continue;
        }

        let Some(info) = particle_info(surface) else {
            continue;
        };
        if emitted.has(surface) || emitted.covers(span) {
            continue;
        }
        emitted.push_particle(info, span);
    }

    // Tokens may not line up with the text (degraded tokenizer output)
    if let (Some(info), Some(&first)) = (combined, combined_spans.first()) {
        if !emitted.has(COMBINED_PARTICLE) && !emitted.covers(Some(first)) {
            emitted.push_particle(info, Some(first));
        }
    }
}

fn fallback_match() -> GrammarMatch {
    GrammarMatch {
        pattern_id: FALLBACK_PATTERN.to_string(),
        description: "Simple declarative sentence structure.".to_string(),
        tier: ProficiencyTier::N5,
        canonical_example: "これは本です (this is a book)".to_string(),
        in_sentence_excerpt: None,
        teaching_note: None,
    }
}
