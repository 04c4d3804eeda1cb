//! wehi - 輕量級文字高亮解析與 render chunk 編譯器
//!
//! 管線：文本 + 高亮器 → `Highlight` 集合 → 逐字符解析
//! → 同色連續片段凝聚 → 帶水平位移的 `RenderChunk` 序列。

pub mod area;
pub mod buffer;
pub mod chunk;
pub mod color;
pub mod config;
pub mod detect;
pub mod highlight;
pub mod lines;
pub mod metrics;
pub mod render;
pub mod utils;

// 重新導出常用類型
pub use area::HighlightTextArea;
pub use buffer::TextBuffer;
pub use chunk::RenderChunk;
pub use color::Color;
pub use config::Config;
pub use highlight::{BaseHighlighter, ColorMap, Highlight, HighlightRule, Highlighter};
pub use lines::{index_lines, Line};
pub use metrics::{FontMetrics, MonoMetrics};
