//! 文件類型檢測與預設高亮器
//!
//! 依副檔名判斷語言，為常見語言提供現成的規則組合
//! （關鍵字、註解、字串、數字），讓 CLI 開箱即可著色。

use std::path::Path;

use crate::color::Color;
use crate::highlight::BaseHighlighter;

// 預設配色
const KEYWORD: Color = Color::rgb(86, 156, 214);
const COMMENT: Color = Color::DARK_GREEN;
const STRING: Color = Color::rgb(206, 145, 120);
const NUMBER: Color = Color::rgb(181, 206, 168);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    Rust,
    Python,
    JavaScript,
    Go,
    Shell,
    Toml,
    Yaml,
    Json,
    Unknown,
}

impl FileType {
    pub fn from_path(path: &Path) -> Self {
        let extension = path.extension().and_then(|s| s.to_str());

        match extension {
            Some("rs") => FileType::Rust,
            Some("py") => FileType::Python,
            Some("js") | Some("ts") | Some("jsx") | Some("tsx") => FileType::JavaScript,
            Some("go") => FileType::Go,
            Some("sh") | Some("bash") => FileType::Shell,
            Some("toml") => FileType::Toml,
            Some("yaml") | Some("yml") => FileType::Yaml,
            Some("json") => FileType::Json,
            _ => FileType::Unknown,
        }
    }

    fn keywords(&self) -> &'static [&'static str] {
        match self {
            FileType::Rust => &[
                "fn", "let", "mut", "pub", "use", "mod", "struct", "enum", "impl", "trait",
                "match", "if", "else", "for", "while", "loop", "return", "self", "Self",
            ],
            FileType::Python => &[
                "def", "class", "import", "from", "return", "if", "elif", "else", "for",
                "while", "try", "except", "with", "lambda", "None", "True", "False",
            ],
            FileType::JavaScript => &[
                "function", "const", "let", "var", "return", "if", "else", "for", "while",
                "class", "import", "export", "async", "await", "null", "undefined",
            ],
            FileType::Go => &[
                "func", "var", "const", "type", "struct", "interface", "return", "if",
                "else", "for", "range", "go", "chan", "defer", "package", "import",
            ],
            FileType::Shell => &[
                "if", "then", "else", "elif", "fi", "for", "while", "do", "done", "case",
                "esac", "function", "local", "export", "return",
            ],
            _ => &[],
        }
    }

    /// 單行註解的正則（留空表示該類型不加註解規則）
    fn comment_pattern(&self) -> Option<&'static str> {
        match self {
            FileType::Rust | FileType::JavaScript | FileType::Go => Some(r"//[^\n]*"),
            FileType::Python | FileType::Shell | FileType::Toml | FileType::Yaml => {
                Some(r"#[^\n]*")
            }
            FileType::Json | FileType::Unknown => None,
        }
    }

    /// 為此文件類型建立預設高亮器；未知類型回傳 `None`
    pub fn preset(&self) -> Option<BaseHighlighter> {
        if *self == FileType::Unknown {
            return None;
        }

        let mut highlighter = BaseHighlighter::new();

        let keywords = self.keywords();
        if !keywords.is_empty() {
            // 關鍵字用詞邊界匹配，避免命中子串
            let pattern = format!(r"\b(?:{})\b", keywords.join("|"));
            highlighter.regex(KEYWORD, &pattern).ok()?;
        }

        if let Some(comment) = self.comment_pattern() {
            highlighter.regex(COMMENT, comment).ok()?;
        }

        highlighter.regex(STRING, r#""[^"\n]*""#).ok()?;
        highlighter.regex(NUMBER, r"\b\d+(?:\.\d+)?\b").ok()?;

        Some(highlighter)
    }
}
