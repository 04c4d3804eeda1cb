//! 終端預覽
//!
//! 把 chunk 清單畫到終端：行號、著色、狀態列。
//! 只在顏色變化時輸出色碼；不支援真彩色的終端降級為 256 色。

use anyhow::Result;
use crossterm::{
    queue,
    style::{self, Attribute},
};
use once_cell::sync::Lazy;
use std::io::Write;

use crate::chunk::RenderChunk;
use crate::color::Color;

/// 全域真彩色偵測（只探測一次）
static TRUE_COLOR: Lazy<bool> = Lazy::new(supports_true_color);

pub struct Preview {
    line_numbers: bool,
    true_color: bool,
    tab_width: usize,
}

impl Preview {
    pub fn new(line_numbers: bool, tab_width: usize) -> Self {
        Self {
            line_numbers,
            true_color: *TRUE_COLOR,
            tab_width,
        }
    }

    /// 測試用：固定色彩模式
    pub fn with_true_color(mut self, true_color: bool) -> Self {
        self.true_color = true_color;
        self
    }

    fn term_color(&self, color: Color) -> style::Color {
        if self.true_color {
            style::Color::Rgb {
                r: color.r,
                g: color.g,
                b: color.b,
            }
        } else {
            style::Color::AnsiValue(ansi_colours::ansi256_from_rgb((color.r, color.g, color.b)))
        }
    }

    /// 逐行輸出 chunk 清單
    ///
    /// chunk 序列已按（行、行內位移）排好，直接照順序印即可；
    /// 同行內相鄰 chunk 的文字拼起來就是整行。
    pub fn render(
        &self,
        out: &mut impl Write,
        chunks: &[RenderChunk],
        line_count: usize,
    ) -> Result<()> {
        let line_num_width = if self.line_numbers {
            line_count.to_string().len() + 1
        } else {
            0
        };

        let tab = " ".repeat(self.tab_width);
        let mut iter = chunks.iter().peekable();
        let mut last_color: Option<Color> = None;

        for line_idx in 0..line_count {
            if self.line_numbers {
                queue!(out, style::SetForegroundColor(style::Color::DarkGrey))?;
                queue!(
                    out,
                    style::Print(format!(
                        "{:>width$} ",
                        line_idx + 1,
                        width = line_num_width - 1
                    ))
                )?;
                queue!(out, style::ResetColor)?;
                last_color = None;
            }

            while let Some(chunk) = iter.next_if(|c| c.line_index == line_idx) {
                // 只在顏色變化時輸出色碼
                if last_color != Some(chunk.color) {
                    queue!(out, style::SetForegroundColor(self.term_color(chunk.color)))?;
                    last_color = Some(chunk.color);
                }

                // Tab 顯示為空格
                queue!(out, style::Print(chunk.text.replace('\t', &tab)))?;
            }

            queue!(out, style::Print("\n"))?;
        }

        queue!(out, style::ResetColor)?;
        out.flush()?;
        Ok(())
    }

    /// 狀態列：檔名、行數、字符數、編碼
    pub fn status(
        &self,
        out: &mut impl Write,
        file_name: &str,
        line_count: usize,
        char_count: usize,
        encoding: &str,
    ) -> Result<()> {
        queue!(out, style::SetAttribute(Attribute::Reverse))?;
        queue!(
            out,
            style::Print(format!(
                " {} | {} lines | {} chars | {} ",
                file_name, line_count, char_count, encoding
            ))
        )?;
        queue!(out, style::SetAttribute(Attribute::NoReverse))?;
        queue!(out, style::Print("\n"))?;
        out.flush()?;
        Ok(())
    }
}

/// 檢測終端是否支援 24-bit 真彩色
///
/// 依序檢查 COLORTERM、TERM，Windows 上再探測 console mode。
pub fn supports_true_color() -> bool {
    if std::env::var("COLORTERM")
        .map_or(false, |v| v == "truecolor" || v == "24bit")
    {
        return true;
    }

    if let Ok(term) = std::env::var("TERM") {
        // iTerm2、Konsole 等現代終端即使沒標 truecolor 也支援
        if ["24bit", "truecolor", "iterm", "konsole"]
            .iter()
            .any(|t| term.contains(t))
        {
            return true;
        }
    }

    #[cfg(windows)]
    {
        // Windows Terminal 支援真彩色
        if std::env::var("WT_SESSION").is_ok() {
            return true;
        }

        if is_windows_virtual_terminal_enabled() {
            return true;
        }
    }

    // 預設：降級為 256 色
    false
}

#[cfg(windows)]
fn is_windows_virtual_terminal_enabled() -> bool {
    unsafe {
        use winapi::um::consoleapi::GetConsoleMode;
        use winapi::um::handleapi::INVALID_HANDLE_VALUE;
        use winapi::um::processenv::GetStdHandle;
        use winapi::um::winbase::STD_OUTPUT_HANDLE;
        use winapi::um::wincon::ENABLE_VIRTUAL_TERMINAL_PROCESSING;

        let handle = GetStdHandle(STD_OUTPUT_HANDLE);
        if handle == INVALID_HANDLE_VALUE {
            return false;
        }

        let mut mode = 0;
        if GetConsoleMode(handle, &mut mode) == 0 {
            return false;
        }

        (mode & ENABLE_VIRTUAL_TERMINAL_PROCESSING) != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(text: &str, color: Color, offset_x: f32, line_index: usize) -> RenderChunk {
        RenderChunk {
            text: text.to_string(),
            color,
            offset_x,
            line_index,
        }
    }

    #[test]
    fn test_render_plain_text_in_order() {
        let chunks = vec![
            chunk("hello ", Color::WHITE, 0.0, 0),
            chunk("world", Color::RED, 6.0, 0),
            chunk("next", Color::WHITE, 0.0, 1),
        ];

        let mut out = Vec::new();
        Preview::new(false, 4)
            .with_true_color(true)
            .render(&mut out, &chunks, 2)
            .unwrap();

        let s = String::from_utf8(out).unwrap();
        let hello = s.find("hello ").unwrap();
        let world = s.find("world").unwrap();
        let next = s.find("next").unwrap();
        assert!(hello < world && world < next);
        assert_eq!(s.matches('\n').count(), 2);
    }

    #[test]
    fn test_color_emitted_only_on_change() {
        let chunks = vec![
            chunk("a", Color::RED, 0.0, 0),
            chunk("b", Color::RED, 1.0, 0),
            chunk("c", Color::BLUE, 2.0, 0),
        ];

        let mut out = Vec::new();
        Preview::new(false, 4)
            .with_true_color(true)
            .render(&mut out, &chunks, 1)
            .unwrap();

        let s = String::from_utf8(out).unwrap();
        // 兩個相鄰紅色 chunk 只輸出一次紅色碼
        assert_eq!(s.matches("38;2;255;0;0").count(), 1);
        assert_eq!(s.matches("38;2;0;0;255").count(), 1);
    }

    #[test]
    fn test_line_numbers_present() {
        let chunks = vec![chunk("x", Color::WHITE, 0.0, 0)];

        let mut out = Vec::new();
        Preview::new(true, 4)
            .with_true_color(true)
            .render(&mut out, &chunks, 1)
            .unwrap();

        let s = String::from_utf8(out).unwrap();
        assert!(s.contains("1 "));
    }

    #[test]
    fn test_tab_expanded() {
        let chunks = vec![chunk("\tx", Color::WHITE, 0.0, 0)];

        let mut out = Vec::new();
        Preview::new(false, 4)
            .with_true_color(true)
            .render(&mut out, &chunks, 1)
            .unwrap();

        let s = String::from_utf8(out).unwrap();
        assert!(s.contains("    x"));
        assert!(!s.contains('\t'));
    }

    #[test]
    fn test_status_line() {
        let mut out = Vec::new();
        Preview::new(false, 4)
            .status(&mut out, "demo.rs", 3, 42, "UTF-8")
            .unwrap();

        let s = String::from_utf8(out).unwrap();
        assert!(s.contains("demo.rs"));
        assert!(s.contains("3 lines"));
        assert!(s.contains("UTF-8"));
    }
}
