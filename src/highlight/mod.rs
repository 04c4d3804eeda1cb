//! 高亮主模組
//!
//! `Highlight` 是一個半開區間 `[start, end)` 的著色標記，
//! 位移以字符（char）計，換行符也算一個字符。

mod highlighter;
mod resolver;
mod rule;

pub use highlighter::{BaseHighlighter, Highlighter};
pub use resolver::ColorMap;
pub use rule::{HighlightRule, RegexRule, WordRule};

use anyhow::{bail, Result};
use serde::Serialize;

use crate::color::Color;

/// 一段帶顏色的字符區間
///
/// 建構後不可變；每次重新編譯都由規則重新產生，不保留身分。
/// 序列化僅供傾印；反序列化會繞過建構檢查，刻意不提供。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Highlight {
    color: Color,
    start: usize,
    end: usize,
}

impl Highlight {
    /// 建立高亮區間，要求 `start < end`
    pub fn new(color: Color, start: usize, end: usize) -> Result<Self> {
        if start >= end {
            bail!("highlight start can't be >= end ({} >= {})", start, end);
        }
        Ok(Self { color, start, end })
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    /// 區間長度（字符數）
    pub fn len(&self) -> usize {
        self.end - self.start
    }
}
