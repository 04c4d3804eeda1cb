//! 行索引
//!
//! 把文本按 `'\n'` 切成行並記錄每行在緩衝區裡的字符位移。
//! 空文本是零行；結尾換行符會多出一個空的尾行（標準切分語意）。

use serde::{Deserialize, Serialize};

/// 一行的位移記錄
///
/// `end` 不含換行符本身；`start == end` 表示空行。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Line {
    pub index: usize,
    pub start: usize,
    pub end: usize,
}

impl Line {
    /// 行長（字符數，不含換行符）
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// 切分文本為行記錄，依序覆蓋整個緩衝區
pub fn index_lines(text: &str) -> Vec<Line> {
    if text.is_empty() {
        return Vec::new();
    }

    let mut lines = Vec::new();
    let mut start = 0;
    let mut offset = 0;

    for ch in text.chars() {
        if ch == '\n' {
            lines.push(Line {
                index: lines.len(),
                start,
                end: offset,
            });
            start = offset + 1;
        }
        offset += 1;
    }

    // 最後一行（含結尾換行後的空尾行）
    lines.push(Line {
        index: lines.len(),
        start,
        end: offset,
    });

    lines
}
