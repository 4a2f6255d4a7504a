//! 约定规范定义
//!
//! 提供注入点的命名约定

use crate::metadata::TypeInfo;

/// 命名约定规范
#[derive(Debug)]
pub struct NamingConventions;

impl NamingConventions {
    /// 注入点属性名：类型短名称的蛇形形式
    ///
    /// `ColorRepository` 对应 `color_repository`。
    pub fn injection_attribute_name(type_info: &TypeInfo) -> String {
        Self::to_snake_case(type_info.short_name())
    }

    /// 将驼峰命名转换为蛇形命名
    ///
    /// 连续大写视为一个缩写词：`HTTPClient` 对应 `http_client`。
    pub fn to_snake_case(s: &str) -> String {
        let mut result = String::new();
        let chars: Vec<char> = s.chars().collect();

        for (i, &ch) in chars.iter().enumerate() {
            if ch.is_uppercase() && i > 0 {
                let prev_is_lower = chars.get(i - 1).map_or(false, |c| c.is_lowercase() || c.is_ascii_digit());
                let next_is_lower = chars.get(i + 1).map_or(false, |c| c.is_lowercase());

                if (prev_is_lower || next_is_lower) && !result.ends_with('_') {
                    result.push('_');
                }
            }
            result.extend(ch.to_lowercase());
        }

        result
    }
}
