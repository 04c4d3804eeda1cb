//! 字形量測能力
//!
//! 編譯器透過 `FontMetrics` 取得每字符的水平前進量與行高，
//! 由宿主字型提供。內建 `MonoMetrics` 以終端格子為單位：
//! 中文等寬字元算 2 格，ASCII 算 1 格，Tab 算 tab_width 格。

use unicode_width::UnicodeWidthChar;

/// 宿主字型能力：字符前進量與行高（像素或格子，由宿主決定單位）
pub trait FontMetrics {
    fn advance(&self, ch: char) -> f32;
    fn line_height(&self) -> f32;
}

/// 等寬（終端格子）量測
#[derive(Debug, Clone, Copy)]
pub struct MonoMetrics {
    cell_width: f32,
    line_height: f32,
    tab_width: usize,
}

impl MonoMetrics {
    pub fn new(cell_width: f32, line_height: f32, tab_width: usize) -> Self {
        Self {
            cell_width,
            line_height,
            tab_width,
        }
    }

    /// 1x1 格子、tab 4 格的預設量測
    pub fn terminal() -> Self {
        Self::new(1.0, 1.0, 4)
    }

    pub fn with_tab_width(mut self, tab_width: usize) -> Self {
        self.tab_width = tab_width;
        self
    }
}

impl Default for MonoMetrics {
    fn default() -> Self {
        Self::terminal()
    }
}

impl FontMetrics for MonoMetrics {
    fn advance(&self, ch: char) -> f32 {
        let cells = if ch == '\t' {
            self.tab_width
        } else {
            // 控制字符無寬度定義時按 1 格處理
            UnicodeWidthChar::width(ch).unwrap_or(1)
        };
        cells as f32 * self.cell_width
    }

    fn line_height(&self) -> f32 {
        self.line_height
    }
}

/// 計算字符串的視覺寬度（考慮寬字元）
pub fn visual_width(s: &str) -> usize {
    s.chars()
        .map(|ch| UnicodeWidthChar::width(ch).unwrap_or(1))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_advance() {
        let m = MonoMetrics::terminal();
        assert_eq!(m.advance('a'), 1.0);
        assert_eq!(m.advance(' '), 1.0);
    }

    #[test]
    fn test_wide_char_advance() {
        let m = MonoMetrics::terminal();
        assert_eq!(m.advance('世'), 2.0);
    }

    #[test]
    fn test_tab_advance() {
        let m = MonoMetrics::terminal();
        assert_eq!(m.advance('\t'), 4.0);
        assert_eq!(m.with_tab_width(8).advance('\t'), 8.0);
    }

    #[test]
    fn test_cell_width_scales() {
        let m = MonoMetrics::new(7.5, 16.0, 4);
        assert_eq!(m.advance('a'), 7.5);
        assert_eq!(m.advance('世'), 15.0);
        assert_eq!(m.line_height(), 16.0);
    }

    #[test]
    fn test_visual_width() {
        assert_eq!(visual_width("abc"), 3);
        assert_eq!(visual_width("世界"), 4);
        assert_eq!(visual_width(""), 0);
    }
}
