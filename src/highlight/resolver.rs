//! 高亮解析
//!
//! 把一組可能任意重疊的 `Highlight` 化約成「每個字符恰好一色」。
//! 勝出規則：覆蓋該位移的區間中 `start` 最小者；`start` 相同時，
//! 先產生者優先（穩定排序保留產生順序）。

use crate::color::Color;
use crate::highlight::Highlight;

/// 每字符一色的解析結果
///
/// 純資料，建好後唯讀；超出範圍一律回傳預設色。
pub struct ColorMap {
    colors: Vec<Color>,
    default: Color,
}

impl ColorMap {
    /// 解析 `len` 個字符的著色
    ///
    /// 區間會先被夾到 `[0, len]`，夾完為空的直接捨棄。
    pub fn build(len: usize, default: Color, highlights: &[Highlight]) -> Self {
        let mut colors = vec![default; len];

        // 夾住越界區間，捨棄空區間
        let mut clamped: Vec<(usize, usize, Color)> = highlights
            .iter()
            .filter(|h| h.start() < len)
            .map(|h| (h.start(), h.end().min(len), h.color()))
            .filter(|(start, end, _)| start < end)
            .collect();

        // 穩定排序：start 相同時保留產生順序
        clamped.sort_by_key(|(start, _, _)| *start);

        // 由低優先級往高優先級塗色，最早起點的區間最後蓋上
        for (start, end, color) in clamped.iter().rev() {
            for cell in &mut colors[*start..*end] {
                *cell = *color;
            }
        }

        Self { colors, default }
    }

    /// 位移處的解析色；越界回傳預設色
    pub fn color_at(&self, offset: usize) -> Color {
        self.colors.get(offset).copied().unwrap_or(self.default)
    }

    pub fn default_color(&self) -> Color {
        self.default
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}
