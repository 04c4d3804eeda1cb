// 配置管理

use crate::color::Color;

pub struct Config {
    pub tab_width: usize,
    pub line_numbers: bool,
    pub default_color: Color,
}

impl Config {
    pub fn new() -> Self {
        Self {
            tab_width: 4,
            line_numbers: true,
            default_color: Color::WHITE,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
