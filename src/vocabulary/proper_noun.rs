use std::{
    collections::HashSet,
    fs,
    path::Path,
};

use log::{
    info,
    warn,
};

use crate::core::{
    utils::{
        char_len,
        is_all_katakana,
    },
    BunsekiError,
    Token,
};

/// All-katakana words that are everyday vocabulary rather than names.
pub const COMMON_LOANWORDS: &[&str] = &[
    // Technology
    "コンピューター", "コンピュータ", "パソコン", "インターネット", "ネット", "メール", "スマホ",
    "スマートフォン", "テレビ", "ラジオ", "カメラ", "ゲーム", "アプリ", "ソフト", "データ",
    "プログラム", "ファイル", "パスワード", "サイト", "ページ", "ボタン", "キーボード", "マウス",
    "プリンター", "コピー", "ビデオ", "オンライン", "システム", "メッセージ", "アカウント",
    // Food and drink
    "コーヒー", "ジュース", "ミルク", "ビール", "ワイン", "ウイスキー", "パン", "ケーキ", "バター",
    "チーズ", "サラダ", "スープ", "カレー", "ラーメン", "ピザ", "ハンバーガー", "サンドイッチ",
    "アイス", "アイスクリーム", "チョコレート", "トマト", "バナナ", "レモン", "メニュー",
    "レストラン", "デザート", "ソース", "フルーツ",
    // School and work
    "テスト", "ノート", "ペン", "ボールペン", "クラス", "レポート", "アルバイト", "バイト", "パート",
    "ミス", "チーム", "リーダー", "メンバー", "スケジュール", "プロジェクト", "ミーティング", "オフィス",
    "サービス", "ビジネス", "スタッフ", "デザイン", "アイデア", "プラン", "ルール", "レベル",
    // Home and daily life
    "アパート", "マンション", "ホテル", "デパート", "スーパー", "コンビニ", "トイレ", "ベッド",
    "テーブル", "ドア", "エレベーター", "エアコン", "シャワー", "タオル", "ポケット", "シャツ",
    "スカート", "ズボン", "コート", "セーター", "ネクタイ", "バッグ", "カバン", "カレンダー",
    "ニュース", "プレゼント", "パーティー", "デート", "ペット", "カード", "ポスト", "タクシー",
    "バス", "トラック", "バイク", "ガソリン", "ストーブ", "ナイフ", "フォーク", "スプーン", "コップ",
    "グラス", "カップ",
    // Entertainment and sport
    "アニメ", "マンガ", "ドラマ", "ストーリー", "キャラクター", "ヒーロー", "スポーツ",
    "サッカー", "テニス", "ゴルフ", "プール", "ダンス", "ピアノ", "ギター", "ギャグ", "コンサート",
    "ライブ", "チケット", "ファン", "スター", "ポスター", "ゲームセンター", "カラオケ", "ニュアンス",
    // Measurement and quantity
    "メートル", "キロ", "キログラム", "グラム", "リットル", "センチ", "パーセント",
    "ドル", "ユーロ", "ポイント", "サイズ", "スピード", "エネルギー", "カロリー",
    // Abstract and common
    "タイプ", "スタイル", "チャンス", "ストレス", "イメージ", "グループ", "センター", "トップ",
    "ペース", "バランス", "テーマ", "ケース", "コース", "スタート", "ゴール", "オーケー",
    "ルーム", "ホーム", "ドラッグ", "ヒント", "パワー", "マナー", "ユーモア",
];

/// Flat set of loanwords exempt from the katakana name heuristic.
#[derive(Debug, Clone)]
pub struct LoanwordWhitelist {
    words: HashSet<String>,
}

impl Default for LoanwordWhitelist {
    fn default() -> Self {
        Self { words: COMMON_LOANWORDS.iter().map(|s| s.to_string()).collect() }
    }
}

impl LoanwordWhitelist {
    /// Built-in list plus one extra word per line from `path`, if it exists.
    pub fn load(path: &Path) -> Self {
        let mut whitelist = Self::default();
        if !path.exists() {
            return whitelist;
        }

        match load_terms_from_file(path) {
            Ok(terms) => {
                info!("Loaded {} extra loanwords from {}", terms.len(), path.display());
                whitelist.extend(terms);
            }
            Err(e) => warn!("Failed to read loanword list {}: {}", path.display(), e),
        }
        whitelist
    }

    pub fn extend(&mut self, words: impl IntoIterator<Item = String>) {
        self.words.extend(words);
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

fn load_terms_from_file(path: &Path) -> Result<Vec<String>, BunsekiError> {
    let content = fs::read_to_string(path)?;
    Ok(content
        .lines()
        .map(|line| line.trim().to_string())
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .collect())
}

/// Name-like tokens that should stay out of a study list: tagged proper
/// nouns, and unrecognised all-katakana words (usually transliterated names).
pub fn is_proper_noun(token: &Token, whitelist: &LoanwordWhitelist) -> bool {
    if token.detail_tags().any(|tag| tag.is_proper_noun_marker()) {
        return true;
    }

    let surface = token.surface.as_str();
    char_len(surface) >= 2 && is_all_katakana(surface) && !whitelist.contains(surface)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noun(surface: &str) -> Token {
        Token::new(surface, surface, "名詞", surface).with_details(&["普通名詞", "一般"])
    }

    #[test]
    fn test_katakana_names_are_proper_nouns() {
        let whitelist = LoanwordWhitelist::default();
        assert!(is_proper_noun(&noun("タカギ"), &whitelist));
        assert!(!is_proper_noun(&noun("コーヒー"), &whitelist));
    }

    #[test]
    fn test_pos_tags_mark_proper_nouns() {
        let whitelist = LoanwordWhitelist::default();
        let tokyo = Token::new("東京", "とうきょう", "名詞", "東京").with_details(&["固有名詞", "地名", "一般"]);
        assert!(is_proper_noun(&tokyo, &whitelist));
        assert!(!is_proper_noun(&noun("学校"), &whitelist));
    }

    #[test]
    fn test_single_katakana_char_is_not_a_name() {
        assert!(!is_proper_noun(&noun("ヨ"), &LoanwordWhitelist::default()));
    }

    #[test]
    fn test_extra_loanwords_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("loanwords.txt");
        fs::write(&path, "# custom\nタカギ\n\n  ドキドキ  \n").unwrap();

        let whitelist = LoanwordWhitelist::load(&path);
        assert!(whitelist.contains("タカギ"));
        assert!(whitelist.contains("ドキドキ"));
        assert!(whitelist.contains("コーヒー"));
        assert!(!is_proper_noun(&noun("タカギ"), &whitelist));
    }
}
