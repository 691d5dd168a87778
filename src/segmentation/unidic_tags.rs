//UniDic POS reference: https://gist.github.com/masayu-a/e3eee0637c07d4019ec9
//Only the tags the analyzer branches on are modelled, everything else maps to Unknown.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnidicTag {
    // Main POS categories (pos1)
    Daimeshi, // Pronoun (代名詞)
    Fukushi, // Adverb (副詞)
    Jodoushi, // Auxiliary verb (助動詞)
    Doushi, // Verb (動詞)
    Joshi, // Particle (助詞)
    Meishi, // Noun (名詞)
    Keiyoushi, // Adjective (形容詞)
    Keijoushi, // Adjectival noun (形状詞)
    Setsuzokushi, // Conjunction (接続詞)
    Kandoushi, // Interjection (感動詞)
    Rentaishi, // Adnominal (連体詞)
    Kigou, // Symbol (記号)
    Hojokigou, // Supplementary symbol (補助記号)
    Settouji, // Prefix (接頭辞)
    Setsubiji, // Suffix (接尾辞)
    Kuuhaku, // Whitespace (空白)

    // Noun types (pos2)
    Koyuumeishi, // Proper noun (固有名詞)
    Futsuumeishi, // Common noun (普通名詞)

    // Proper noun subtypes (pos3, pos4)
    Jinmei, // Person's name (人名)
    Sei, // Family name (姓)
    Mei, // First name (名)
    Chimei, // Place name (地名)
    Kuni, // Country (国)
    Soshiki, // Organization (組織), ipadic only

    // Particles (pos2)
    Kakujoshi, // Case-marking particle (格助詞)
    Kakarijoshi, // Binding particle (係助詞)
    Fukujoshi, // Adverbial particle (副助詞)
    Setsuzokujoshi, // Conjunctive particle (接続助詞)
    Shuujoshi, // Sentence-ending particle (終助詞)
    Juntaijoshi, // Nominalizing particle (準体助詞)

    //Non-unidic types
    Unset, // *
    Unknown,
}

impl UnidicTag {
    /// Coarse categories kept as study vocabulary.
    pub fn is_content_word(&self) -> bool {
        matches!(
            self,
            UnidicTag::Meishi
                | UnidicTag::Doushi
                | UnidicTag::Keiyoushi
                | UnidicTag::Keijoushi
                | UnidicTag::Fukushi
        )
    }

    pub fn is_proper_noun_marker(&self) -> bool {
        matches!(
            self,
            UnidicTag::Koyuumeishi
                | UnidicTag::Jinmei
                | UnidicTag::Sei
                | UnidicTag::Mei
                | UnidicTag::Chimei
                | UnidicTag::Kuni
                | UnidicTag::Soshiki
        )
    }

    pub fn english_name(&self) -> &'static str {
        match self {
            UnidicTag::Daimeshi => "Pronoun",
            UnidicTag::Fukushi => "Adverb",
            UnidicTag::Jodoushi => "Auxiliary Verb",
            UnidicTag::Doushi => "Verb",
            UnidicTag::Joshi => "Particle",
            UnidicTag::Meishi => "Noun",
            UnidicTag::Keiyoushi => "Adjective",
            UnidicTag::Keijoushi => "Adjectival Noun",
            UnidicTag::Setsuzokushi => "Conjunction",
            UnidicTag::Kandoushi => "Interjection",
            UnidicTag::Rentaishi => "Adnominal",
            UnidicTag::Kigou | UnidicTag::Hojokigou => "Symbol",
            UnidicTag::Settouji => "Prefix",
            UnidicTag::Setsubiji => "Suffix",
            UnidicTag::Kuuhaku => "Whitespace",
            UnidicTag::Koyuumeishi => "Proper Noun",
            UnidicTag::Futsuumeishi => "Common Noun",
            UnidicTag::Jinmei | UnidicTag::Sei | UnidicTag::Mei => "Personal Name",
            UnidicTag::Chimei | UnidicTag::Kuni => "Place Name",
            UnidicTag::Soshiki => "Organization",
            UnidicTag::Kakujoshi => "Case Particle",
            UnidicTag::Kakarijoshi => "Binding Particle",
            UnidicTag::Fukujoshi => "Adverbial Particle",
            UnidicTag::Setsuzokujoshi => "Conjunctive Particle",
            UnidicTag::Shuujoshi => "Sentence-ending Particle",
            UnidicTag::Juntaijoshi => "Nominalizing Particle",
            UnidicTag::Unset | UnidicTag::Unknown => "Unknown",
        }
    }
}

impl From<&str> for UnidicTag {
    fn from(value: &str) -> Self {
        match value {
            "代名詞" => Self::Daimeshi,
            "副詞" => Self::Fukushi,
            "助動詞" => Self::Jodoushi,
            "動詞" => Self::Doushi,
            "助詞" => Self::Joshi,
            "名詞" => Self::Meishi,
            "形容詞" => Self::Keiyoushi,
            "形状詞" => Self::Keijoushi,
            "接続詞" => Self::Setsuzokushi,
            "感動詞" => Self::Kandoushi,
            "連体詞" => Self::Rentaishi,
            "記号" => Self::Kigou,
            "補助記号" => Self::Hojokigou,
            "接頭辞" | "接頭詞" => Self::Settouji,
            "接尾辞" => Self::Setsubiji,
            "空白" => Self::Kuuhaku,

            "固有名詞" => Self::Koyuumeishi,
            "普通名詞" => Self::Futsuumeishi,

            "人名" => Self::Jinmei,
            "姓" => Self::Sei,
            "名" => Self::Mei,
            "地名" => Self::Chimei,
            "国" => Self::Kuni,
            "組織" => Self::Soshiki,

            "格助詞" => Self::Kakujoshi,
            "係助詞" => Self::Kakarijoshi,
            "副助詞" => Self::Fukujoshi,
            "接続助詞" => Self::Setsuzokujoshi,
            "終助詞" => Self::Shuujoshi,
            "準体助詞" => Self::Juntaijoshi,

            "*" | "" => Self::Unset,

            _ => UnidicTag::Unknown,
        }
    }
}
