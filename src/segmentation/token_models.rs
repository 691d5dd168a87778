//UniDic feature layout (29 comma-separated columns): https://gist.github.com/masayu-a/e3eee0637c07d4019ec9
//Only the columns the analyzer reads are kept; the rest stay in the raw feature string.

use wana_kana::ConvertJapanese;

use crate::core::Token;

const LEMMA: usize = 7;
const PRON: usize = 9;
const ORTH_BASE: usize = 10;
const KANA: usize = 20;

pub struct VibratoToken {
    pub surface: String,
    pub features: String,
}

impl From<vibrato::token::Token<'_, '_>> for VibratoToken {
    fn from(value: vibrato::token::Token) -> Self {
        Self {
            surface: value.surface().into(),
            features: value.feature().into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawToken {
    pub pos: [String; 4],
    pub lemma: String,
    pub pron: String,
    pub orth_base: String,
    pub kana: String,
}

impl From<&str> for RawToken {
    fn from(features: &str) -> Self {
        let fields: Vec<&str> = features.split(',').collect();

        // Short feature rows (unknown words) pad with "*"
        let get_field = |idx: usize| fields.get(idx).copied().unwrap_or("*").to_string();

        RawToken {
            pos: [get_field(0), get_field(1), get_field(2), get_field(3)],
            lemma: get_field(LEMMA),
            pron: get_field(PRON),
            orth_base: get_field(ORTH_BASE),
            kana: get_field(KANA),
        }
    }
}

fn present(field: &str) -> Option<&str> {
    match field.trim() {
        "" | "*" => None,
        value => Some(value),
    }
}

impl RawToken {
    /// Hiragana reading: kana column, then pronunciation, then the surface itself.
    pub fn reading(&self, surface: &str) -> String {
        present(&self.kana)
            .or_else(|| present(&self.pron))
            .unwrap_or(surface)
            .to_hiragana()
    }

    pub fn base_form<'a>(&'a self, surface: &'a str) -> &'a str {
        present(&self.orth_base).or_else(|| present(&self.lemma)).unwrap_or(surface)
    }

    /// Lemma column; unlike the orthographic base it unifies voiced forms (だ -> た).
    pub fn lemma<'a>(&'a self, surface: &'a str) -> &'a str {
        present(&self.lemma).unwrap_or_else(|| self.base_form(surface))
    }

    pub fn coarse_pos(&self) -> &str {
        present(&self.pos[0]).unwrap_or("Unknown")
    }

    pub fn pos_details(&self) -> Vec<String> {
        self.pos[1..].iter().filter_map(|p| present(p)).map(str::to_string).collect()
    }
}

impl From<VibratoToken> for Token {
    fn from(vt: VibratoToken) -> Self {
        let raw = RawToken::from(vt.features.as_str());
        Token {
            reading: raw.reading(&vt.surface),
            pos: raw.coarse_pos().to_string(),
            pos_details: raw.pos_details(),
            base_form: raw.base_form(&vt.surface).to_string(),
            lemma: raw.lemma(&vt.surface).to_string(),
            surface: vt.surface,
        }
    }
}
