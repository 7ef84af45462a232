//! 通用工具函数

/// 仅保留字符串中的 ASCII 数字
///
/// `"000.000.000-00"` -> `"00000000000"`
pub fn digits_only(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}
