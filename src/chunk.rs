//! Render chunk 編譯
//!
//! 把逐字符顏色凝聚成最少量的同色連續單行片段，
//! 並為每個片段預先算好行內水平位移。

use serde::Serialize;

use crate::color::Color;
use crate::highlight::ColorMap;
use crate::lines::Line;
use crate::metrics::FontMetrics;

/// 單行、同色、連續的一段文字與其繪製位置
///
/// 繪製方為 `(offset_x, line_index * line_height)`。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderChunk {
    pub text: String,
    pub color: Color,
    pub offset_x: f32,
    pub line_index: usize,
}

/// 逐行掃描，凝聚同色連續字符為 chunk
///
/// 輸出為全域扁平序列：第 0 行所有 chunk（由左至右）在前，
/// 第 1 行接續，以此類推。空行不產生 chunk；跨行高亮在
/// 每行各產生一個 chunk，永不合併。
pub fn compile(
    text: &str,
    lines: &[Line],
    colors: &ColorMap,
    metrics: &dyn FontMetrics,
) -> Vec<RenderChunk> {
    let chars: Vec<char> = text.chars().collect();
    let mut chunks = Vec::new();

    for line in lines {
        let mut x = 0.0f32;
        let mut run = String::new();
        let mut run_color: Option<Color> = None;
        let mut run_x = 0.0f32;

        for offset in line.start..line.end {
            let ch = chars[offset];
            let color = colors.color_at(offset);

            match run_color {
                Some(current) if current == color => {}
                Some(current) => {
                    // 顏色改變，收掉當前 run
                    chunks.push(RenderChunk {
                        text: std::mem::take(&mut run),
                        color: current,
                        offset_x: run_x,
                        line_index: line.index,
                    });
                    run_x = x;
                    run_color = Some(color);
                }
                None => {
                    run_x = x;
                    run_color = Some(color);
                }
            }

            run.push(ch);
            x += metrics.advance(ch);
        }

        if let Some(color) = run_color {
            chunks.push(RenderChunk {
                text: run,
                color,
                offset_x: run_x,
                line_index: line.index,
            });
        }
    }

    chunks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highlight::Highlight;
    use crate::lines::index_lines;
    use crate::metrics::MonoMetrics;

    fn compile_with(text: &str, highlights: &[Highlight]) -> Vec<RenderChunk> {
        let lines = index_lines(text);
        let colors = ColorMap::build(text.chars().count(), Color::WHITE, highlights);
        compile(text, &lines, &colors, &MonoMetrics::terminal())
    }

    fn h(color: Color, start: usize, end: usize) -> Highlight {
        Highlight::new(color, start, end).unwrap()
    }

    #[test]
    fn test_empty_text_no_chunks() {
        assert!(compile_with("", &[]).is_empty());
    }

    #[test]
    fn test_default_coloring_two_lines() {
        let chunks = compile_with("a\nb", &[]);
        assert_eq!(chunks.len(), 2);

        assert_eq!(chunks[0].text, "a");
        assert_eq!(chunks[0].color, Color::WHITE);
        assert_eq!(chunks[0].line_index, 0);

        assert_eq!(chunks[1].text, "b");
        assert_eq!(chunks[1].color, Color::WHITE);
        assert_eq!(chunks[1].line_index, 1);
    }

    #[test]
    fn test_single_highlight_within_line() {
        let chunks = compile_with("hello world", &[h(Color::RED, 6, 11)]);
        assert_eq!(chunks.len(), 2);

        assert_eq!(chunks[0].text, "hello ");
        assert_eq!(chunks[0].color, Color::WHITE);
        assert_eq!(chunks[1].text, "world");
        assert_eq!(chunks[1].color, Color::RED);
        assert!(chunks[0].offset_x <= chunks[1].offset_x);
        assert_eq!(chunks[1].offset_x, 6.0);
    }

    #[test]
    fn test_overlap_earliest_start_wins_single_chunk() {
        let chunks = compile_with(
            "testing",
            &[h(Color::RED, 0, 7), h(Color::BLUE, 2, 4)],
        );
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].text, "testing");
        assert_eq!(chunks[0].color, Color::RED);
    }

    #[test]
    fn test_highlight_spanning_line_break() {
        // 位移：0 a, 1 b, 2 \n, 3 c, 4 d；RED 1..4 蓋住 b、換行符、c
        let chunks = compile_with("ab\ncd", &[h(Color::RED, 1, 4)]);
        assert_eq!(chunks.len(), 4);

        assert_eq!((chunks[0].text.as_str(), chunks[0].color), ("a", Color::WHITE));
        assert_eq!((chunks[1].text.as_str(), chunks[1].color), ("b", Color::RED));
        assert_eq!((chunks[2].text.as_str(), chunks[2].color), ("c", Color::RED));
        assert_eq!((chunks[3].text.as_str(), chunks[3].color), ("d", Color::WHITE));

        assert_eq!(chunks[1].line_index, 0);
        assert_eq!(chunks[2].line_index, 1);
        // 第二行的片段位移從 0 重新起算
        assert_eq!(chunks[2].offset_x, 0.0);
    }

    #[test]
    fn test_uniform_line_single_chunk() {
        let chunks = compile_with("same", &[h(Color::GREEN, 0, 4)]);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].text, "same");
        assert_eq!(chunks[0].color, Color::GREEN);
        assert_eq!(chunks[0].offset_x, 0.0);
    }

    #[test]
    fn test_empty_line_no_chunks() {
        let chunks = compile_with("a\n\nb", &[]);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].line_index, 0);
        assert_eq!(chunks[1].line_index, 2);
    }

    #[test]
    fn test_line_concatenation_exact() {
        let text = "hello world\nsecond line";
        let chunks = compile_with(
            text,
            &[h(Color::RED, 2, 7), h(Color::BLUE, 14, 18)],
        );

        for (i, line_text) in text.split('\n').enumerate() {
            let joined: String = chunks
                .iter()
                .filter(|c| c.line_index == i)
                .map(|c| c.text.as_str())
                .collect();
            assert_eq!(joined, line_text);
        }
    }

    #[test]
    fn test_offsets_monotonic_within_line() {
        let chunks = compile_with(
            "abcdefgh",
            &[h(Color::RED, 1, 3), h(Color::BLUE, 5, 6)],
        );
        for pair in chunks.windows(2) {
            assert!(pair[0].offset_x <= pair[1].offset_x);
        }
    }

    #[test]
    fn test_wide_chars_advance_two_cells() {
        let chunks = compile_with("世界x", &[h(Color::RED, 2, 3)]);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[1].text, "x");
        // 兩個全形字各佔 2 格
        assert_eq!(chunks[1].offset_x, 4.0);
    }

    #[test]
    fn test_tab_advances_tab_width() {
        let chunks = compile_with("\tx", &[h(Color::RED, 1, 2)]);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[1].offset_x, 4.0);
    }

    #[test]
    fn test_recompile_is_identical() {
        let text = "ab\ncd";
        let highlights = [h(Color::RED, 1, 4)];
        let first = compile_with(text, &highlights);
        let second = compile_with(text, &highlights);
        assert_eq!(first, second);
    }
}
