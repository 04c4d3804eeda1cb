//! 高亮器
//!
//! `Highlighter` 是編譯器消費的聚合能力：給定完整文本，
//! 產生該次編譯的全部 `Highlight`。單一規則本身就是一個高亮器。

use anyhow::Result;

use crate::color::Color;
use crate::highlight::rule::{HighlightRule, RegexRule, WordRule};
use crate::highlight::Highlight;

/// 聚合能力：產生一次編譯所需的完整高亮集合
pub trait Highlighter {
    fn process(&self, text: &str, out: &mut Vec<Highlight>);
}

/// 任何單一規則都可以直接當作高亮器使用
impl<T: HighlightRule> Highlighter for T {
    fn process(&self, text: &str, out: &mut Vec<Highlight>) {
        HighlightRule::process(self, text, out);
    }
}

/// 規則驅動的高亮器：依註冊順序執行一組規則
///
/// 規則順序不代表顏色優先級；優先級完全由區間的 `start` 決定，
/// 只有 `start` 相同時才以先註冊者為準。
#[derive(Default)]
pub struct BaseHighlighter {
    rules: Vec<Box<dyn HighlightRule>>,
}

impl BaseHighlighter {
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    pub fn add_rule(&mut self, rule: Box<dyn HighlightRule>) {
        self.rules.push(rule);
    }

    /// 註冊一個字面子串規則
    pub fn word(&mut self, color: Color, word: impl Into<String>) {
        self.add_rule(Box::new(WordRule::new(color, word)));
    }

    /// 一次註冊多個同色字面子串規則
    pub fn words(&mut self, color: Color, words: &[&str]) {
        for word in words {
            self.word(color, *word);
        }
    }

    /// 註冊一個正則規則
    pub fn regex(&mut self, color: Color, pattern: &str) -> Result<()> {
        self.add_rule(Box::new(RegexRule::new(color, pattern)?));
        Ok(())
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Highlighter for BaseHighlighter {
    fn process(&self, text: &str, out: &mut Vec<Highlight>) {
        for rule in &self.rules {
            rule.process(text, out);
        }
    }
}
