//! 文本緩衝區
//!
//! 唯讀的來源文本：從檔案載入（BOM 檢測 + 解碼）或從字串建立，
//! 供編譯管線取快照。編輯語意不在本 crate 範圍內。

use anyhow::{Context, Result};
use ropey::Rope;
use std::fs;
use std::path::{Path, PathBuf};

pub struct TextBuffer {
    rope: Rope,
    file_path: Option<PathBuf>,
    encoding: &'static encoding_rs::Encoding,
}

impl TextBuffer {
    pub fn new() -> Self {
        Self {
            rope: Rope::new(),
            file_path: None,
            encoding: encoding_rs::UTF_8,
        }
    }

    pub fn from_str(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
            file_path: None,
            encoding: encoding_rs::UTF_8,
        }
    }

    /// 檢測文件編碼，基於 BOM
    fn detect_encoding(bytes: &[u8]) -> (&'static encoding_rs::Encoding, usize) {
        if bytes.len() >= 3 && bytes[0..3] == [0xEF, 0xBB, 0xBF] {
            // UTF-8 BOM
            (encoding_rs::UTF_8, 3)
        } else if bytes.len() >= 2 && bytes[0..2] == [0xFF, 0xFE] {
            // UTF-16LE BOM
            (encoding_rs::UTF_16LE, 2)
        } else if bytes.len() >= 2 && bytes[0..2] == [0xFE, 0xFF] {
            // UTF-16BE BOM
            (encoding_rs::UTF_16BE, 2)
        } else {
            // 無 BOM，預設 UTF-8
            (encoding_rs::UTF_8, 0)
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        Self::from_file_with_encoding(path, None)
    }

    pub fn from_file_with_encoding(
        path: &Path,
        encoding: Option<&'static encoding_rs::Encoding>,
    ) -> Result<Self> {
        let bytes =
            fs::read(path).with_context(|| format!("Failed to read file: {}", path.display()))?;

        // 指定編碼優先；否則檢測 BOM
        let (encoding_to_use, bom_length) = match encoding {
            Some(enc) => (enc, 0),
            None => Self::detect_encoding(&bytes),
        };

        let (decoded, _, had_errors) = encoding_to_use.decode(&bytes[bom_length..]);
        if had_errors {
            log::warn!("Encoding errors detected in file: {}", path.display());
        }

        Ok(Self {
            rope: Rope::from_str(&decoded),
            file_path: Some(path.to_path_buf()),
            encoding: encoding_to_use,
        })
    }

    /// 完整文本快照，供編譯管線使用
    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    pub fn is_empty(&self) -> bool {
        self.rope.len_chars() == 0
    }

    /// rope 的行數（含結尾換行後的空尾行）
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    pub fn file_name(&self) -> String {
        self.file_path
            .as_ref()
            .and_then(|p| p.file_name())
            .and_then(|n| n.to_str())
            .unwrap_or("[No Name]")
            .to_string()
    }

    /// 獲取當前編碼
    pub fn encoding(&self) -> &'static encoding_rs::Encoding {
        self.encoding
    }
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new()
    }
}
