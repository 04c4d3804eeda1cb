//! 高亮文字區模型
//!
//! 持有文本、高亮器與量測能力，負責決定「何時」重新編譯；
//! 編譯本身無狀態，每次整份重算並丟棄舊的 chunk 清單。

use log::debug;

use crate::chunk::{self, RenderChunk};
use crate::color::Color;
use crate::highlight::{ColorMap, Highlighter};
use crate::lines::index_lines;
use crate::metrics::FontMetrics;

/// 文本 + 高亮器 + chunk 快取
///
/// `highlighter` 為 `None` 時全部字符用預設色。
/// chunk 清單是明確可取得的回傳值，不是隱藏狀態。
pub struct HighlightTextArea {
    text: String,
    highlighter: Option<Box<dyn Highlighter>>,
    default_color: Color,
    metrics: Box<dyn FontMetrics>,
    chunks: Vec<RenderChunk>,
    dirty: bool,
}

impl HighlightTextArea {
    pub fn new(text: impl Into<String>, metrics: Box<dyn FontMetrics>) -> Self {
        Self {
            text: text.into(),
            highlighter: None,
            default_color: Color::WHITE,
            metrics,
            chunks: Vec::new(),
            dirty: true,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// 替換整份文本並使 chunk 失效
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.dirty = true;
    }

    /// 設定或移除高亮器（`None` = 全預設色）
    pub fn set_highlighter(&mut self, highlighter: Option<Box<dyn Highlighter>>) {
        self.highlighter = highlighter;
        self.dirty = true;
    }

    pub fn default_color(&self) -> Color {
        self.default_color
    }

    pub fn set_default_color(&mut self, color: Color) {
        self.default_color = color;
        self.dirty = true;
    }

    pub fn set_metrics(&mut self, metrics: Box<dyn FontMetrics>) {
        self.metrics = metrics;
        self.dirty = true;
    }

    /// 行數（空文本為 0）
    pub fn line_count(&self) -> usize {
        index_lines(&self.text).len()
    }

    /// 建議高度 = 行數 × 行高
    pub fn pref_height(&self) -> f32 {
        self.line_count() as f32 * self.metrics.line_height()
    }

    /// 取得目前的 chunk 清單，需要時先重新編譯
    pub fn chunks(&mut self) -> &[RenderChunk] {
        if self.dirty {
            self.rebuild_chunks();
        }
        &self.chunks
    }

    /// 強制重新編譯（文本、高亮器或量測改變後自動呼叫）
    fn rebuild_chunks(&mut self) {
        let mut highlights = Vec::new();
        if let Some(highlighter) = &self.highlighter {
            highlighter.process(&self.text, &mut highlights);
        }

        let lines = index_lines(&self.text);
        let colors = ColorMap::build(
            self.text.chars().count(),
            self.default_color,
            &highlights,
        );

        self.chunks = chunk::compile(&self.text, &lines, &colors, self.metrics.as_ref());
        self.dirty = false;

        debug!(
            "rebuilt chunks: {} highlights -> {} chunks over {} lines",
            highlights.len(),
            self.chunks.len(),
            lines.len()
        );
    }
}
