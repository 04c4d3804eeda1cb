//! 高亮規則
//!
//! 規則每次都掃描完整文本並輸出零或多個 `Highlight`。
//! 規則本身無狀態，可重複呼叫。

use anyhow::{Context, Result};
use regex::Regex;

use crate::color::Color;
use crate::highlight::Highlight;

/// 高亮規則：掃描文本，把產生的區間推入 `out`
///
/// 位移一律以字符（char）計，與編譯器的行索引一致。
pub trait HighlightRule {
    fn process(&self, text: &str, out: &mut Vec<Highlight>);
}

/// 字面子串規則：每個不重疊出現處產生一個 `Highlight`
pub struct WordRule {
    color: Color,
    word: String,
}

impl WordRule {
    pub fn new(color: Color, word: impl Into<String>) -> Self {
        Self {
            color,
            word: word.into(),
        }
    }

    pub fn word(&self) -> &str {
        &self.word
    }
}

impl HighlightRule for WordRule {
    fn process(&self, text: &str, out: &mut Vec<Highlight>) {
        // 空字串不產生任何區間
        if self.word.is_empty() {
            return;
        }

        let word_chars = self.word.chars().count();
        let mut char_pos = 0;
        let mut last_byte = 0;

        for (byte_idx, _) in text.match_indices(self.word.as_str()) {
            // match_indices 回傳位元組位移，轉成字符位移
            char_pos += text[last_byte..byte_idx].chars().count();
            last_byte = byte_idx;

            if let Ok(h) = Highlight::new(self.color, char_pos, char_pos + word_chars) {
                out.push(h);
            }
        }
    }
}

/// 正則規則：每個非空匹配產生一個 `Highlight`
pub struct RegexRule {
    color: Color,
    pattern: Regex,
}

impl RegexRule {
    pub fn new(color: Color, pattern: &str) -> Result<Self> {
        let pattern = Regex::new(pattern)
            .with_context(|| format!("invalid highlight pattern: {}", pattern))?;
        Ok(Self { color, pattern })
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }
}

impl HighlightRule for RegexRule {
    fn process(&self, text: &str, out: &mut Vec<Highlight>) {
        let mut char_pos = 0;
        let mut last_byte = 0;

        for m in self.pattern.find_iter(text) {
            // 零寬匹配不構成區間
            if m.is_empty() {
                continue;
            }

            char_pos += text[last_byte..m.start()].chars().count();
            last_byte = m.start();

            let len = m.as_str().chars().count();
            if let Ok(h) = Highlight::new(self.color, char_pos, char_pos + len) {
                out.push(h);
            }
        }
    }
}
