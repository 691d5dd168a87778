use crate::proficiency::ProficiencyTier;

pub struct ParticleInfo {
    pub surface: &'static str,
    pub description: &'static str,
    pub tier: ProficiencyTier,
    pub example: &'static str,
    pub note: &'static str,
}

/// Two-particle combination reported instead of its parts.
pub const COMBINED_PARTICLE: &str = "には";

pub const PARTICLES: &[ParticleInfo] = &[
    ParticleInfo {
        surface: "は",
        description: "Topic marker: what the sentence is about.",
        tier: ProficiencyTier::N5,
        example: "私は学生です (as for me, I am a student)",
        note: "Pronounced \"wa\". It sets the topic and often contrasts it with other things.",
    },
    ParticleInfo {
        surface: "が",
        description: "Subject marker: who or what does the action or has the state.",
        tier: ProficiencyTier::N5,
        example: "猫がいます (there is a cat)",
        note: "Introduces new information; は talks about something already known.",
    },
    ParticleInfo {
        surface: "を",
        description: "Direct object marker.",
        tier: ProficiencyTier::N5,
        example: "本を読む (read a book)",
        note: "Pronounced \"o\". With motion verbs it marks the space moved through: 公園を歩く.",
    },
    ParticleInfo {
        surface: "に",
        description: "Destination, point in time, or indirect object.",
        tier: ProficiencyTier::N5,
        example: "学校に行く (go to school)",
        note: "Marks where something exists (に) as opposed to where an action happens (で).",
    },
    ParticleInfo {
        surface: "で",
        description: "Place of an action, or means and method.",
        tier: ProficiencyTier::N5,
        example: "図書館で勉強する (study at the library)",
        note: "Also marks tools and languages: 日本語で話す.",
    },
    ParticleInfo {
        surface: "と",
        description: "\"And\" between nouns, \"with\" a partner, or a quotation.",
        tier: ProficiencyTier::N5,
        example: "友達と行く (go with a friend)",
        note: "と lists every item exhaustively; や only gives examples.",
    },
    ParticleInfo {
        surface: "も",
        description: "\"Also\", \"too\"; replaces は or が.",
        tier: ProficiencyTier::N5,
        example: "私も行く (I'll go too)",
        note: "With a negative verb after a question word it means \"none\": 何も食べない.",
    },
    ParticleInfo {
        surface: "の",
        description: "Possession or modification between nouns.",
        tier: ProficiencyTier::N5,
        example: "私の本 (my book)",
        note: "At the end of a sentence it softens a statement or asks a casual question.",
    },
    ParticleInfo {
        surface: "へ",
        description: "Direction of movement.",
        tier: ProficiencyTier::N5,
        example: "東京へ行く (go toward Tokyo)",
        note: "Pronounced \"e\". Stresses the direction where に stresses the arrival point.",
    },
    ParticleInfo {
        surface: "から",
        description: "Starting point \"from\", or a reason \"because\".",
        tier: ProficiencyTier::N5,
        example: "九時から (from nine o'clock)",
        note: "After a clause it gives the reason: 雨だから行かない.",
    },
    ParticleInfo {
        surface: "まで",
        description: "End point: \"until\", \"as far as\".",
        tier: ProficiencyTier::N5,
        example: "駅まで歩く (walk to the station)",
        note: "Often paired with から: 九時から五時まで.",
    },
    ParticleInfo {
        surface: "より",
        description: "Comparison: \"than\".",
        tier: ProficiencyTier::N4,
        example: "犬より猫が好き (I like cats more than dogs)",
        note: "The item after より is the one being surpassed.",
    },
    ParticleInfo {
        surface: "や",
        description: "Non-exhaustive \"and\": gives examples from a longer list.",
        tier: ProficiencyTier::N5,
        example: "りんごやバナナ (apples, bananas and so on)",
        note: "Often closed with など: りんごやバナナなど.",
    },
    ParticleInfo {
        surface: "か",
        description: "Question marker, or \"or\" between choices.",
        tier: ProficiencyTier::N5,
        example: "行きますか (are you going?)",
        note: "In polite speech the question mark is optional because か already asks.",
    },
    ParticleInfo {
        surface: "ね",
        description: "Seeks agreement: \"isn't it?\", \"right?\".",
        tier: ProficiencyTier::N5,
        example: "いい天気ですね (nice weather, isn't it?)",
        note: "Assumes the listener shares the feeling or knowledge.",
    },
    ParticleInfo {
        surface: "よ",
        description: "Asserts new information for the listener.",
        tier: ProficiencyTier::N5,
        example: "おいしいですよ (it's tasty, you know)",
        note: "Overusing よ can sound pushy.",
    },
    ParticleInfo {
        surface: COMBINED_PARTICLE,
        description: "に with contrastive は: \"as for (in/to)\".",
        tier: ProficiencyTier::N4,
        example: "日曜日には休む (on Sundays, at least, I rest)",
        note: "Contrasts the time, place or person marked by に with others.",
    },
];

pub fn particle_info(surface: &str) -> Option<&'static ParticleInfo> {
    PARTICLES.iter().find(|info| info.surface == surface)
}

/// Single particles that the combined form absorbs when adjacent.
pub fn is_subsumed_by_combined(surface: &str) -> bool {
    matches!(surface, "に" | "は")
}
