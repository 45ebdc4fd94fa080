//! 文本过滤器模块
//!
//! 判断单个 hOCR 单词是否需要翻译。空白、数字和单独的符号原样保留，
//! 既不写入词典也不会发送到翻译服务。

use crate::translation::config::constants;

/// 判断单词是否需要翻译
pub fn is_translatable(word: &str) -> bool {
    let compact = strip_whitespace(word);

    // 空白
    if compact.is_empty() {
        return false;
    }

    // 数字（原文和去掉空白后的文本都要检查）
    if is_number(word) || is_number(&compact) {
        return false;
    }

    // 单独的符号
    if is_special_character(word) || is_special_character(&compact) {
        return false;
    }

    true
}

/// 各个 Unicode 十进制数字区段（Nd）中数字 0 的码位，每段连续 10 个
const DECIMAL_DIGIT_ZEROS: &[u32] = &[
    0x0030, 0x0660, 0x06F0, 0x07C0, 0x0966, 0x09E6, 0x0A66, 0x0AE6, 0x0B66, 0x0BE6, 0x0C66,
    0x0CE6, 0x0D66, 0x0DE6, 0x0E50, 0x0ED0, 0x0F20, 0x1040, 0x1090, 0x17E0, 0x1810, 0x1946,
    0x19D0, 0x1A80, 0x1A90, 0x1B50, 0x1BB0, 0x1C40, 0x1C50, 0xA620, 0xA8D0, 0xA900, 0xA9D0,
    0xA9F0, 0xAA50, 0xABF0, 0xFF10, 0x104A0, 0x10D30, 0x11066, 0x110F0, 0x11136, 0x111D0,
    0x112F0, 0x11450, 0x114D0, 0x11650, 0x116C0, 0x11730, 0x118E0, 0x11950, 0x11C50, 0x11D50,
    0x11DA0, 0x11F50, 0x16A60, 0x16AC0, 0x16B50, 0x1D7CE, 0x1D7D8, 0x1D7E2, 0x1D7EC, 0x1D7F6,
    0x1E140, 0x1E2F0, 0x1E4F0, 0x1E950, 0x1FBF0,
];

/// 检查单词是否为数字，`,` 和 `.` 都可以作为小数点
///
/// 接受任意文字的十进制数字（如 `١٢٣`、`５`），以及夹在两个数字之间的 `_`（如 `1_000`）。
pub fn is_number(word: &str) -> bool {
    normalize_number(word.trim()).map_or(false, |n| n.parse::<f64>().is_ok())
}

fn decimal_digit(c: char) -> Option<char> {
    let code = c as u32;
    DECIMAL_DIGIT_ZEROS
        .iter()
        .find(|&&zero| (zero..zero + 10).contains(&code))
        .and_then(|&zero| char::from_digit(code - zero, 10))
}

/// 将数字转换为 ASCII 形式，`_` 不在两个数字之间时返回 None
fn normalize_number(word: &str) -> Option<String> {
    let chars: Vec<char> = word.chars().collect();
    let mut normalized = String::with_capacity(word.len());

    for (i, &c) in chars.iter().enumerate() {
        match c {
            '_' => {
                let between_digits = i > 0
                    && decimal_digit(chars[i - 1]).is_some()
                    && chars.get(i + 1).and_then(|&next| decimal_digit(next)).is_some();
                if !between_digits {
                    return None;
                }
            }
            ',' => normalized.push('.'),
            c => normalized.push(decimal_digit(c).unwrap_or(c)),
        }
    }

    Some(normalized)
}

/// 检查单词是否为单个符号
pub fn is_special_character(word: &str) -> bool {
    constants::SPECIAL_CHARACTERS.contains(&word)
}

fn strip_whitespace(word: &str) -> String {
    word.split_whitespace().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_not_translatable() {
        assert!(!is_translatable(""));
        assert!(!is_translatable("   "));
        assert!(!is_translatable("\t\n"));
    }

    #[test]
    fn test_numbers_not_translatable() {
        assert!(!is_translatable("5"));
        assert!(!is_translatable("5,5"));
        assert!(!is_translatable("5.5"));
        assert!(!is_translatable("-12"));
        assert!(!is_translatable(" 42 "));
        assert!(!is_translatable("1 000"));
        assert!(!is_translatable("1e3"));
        assert!(!is_translatable("١٢٣"));
        assert!(!is_translatable("５"));
        assert!(!is_translatable("1_000"));
        assert!(!is_translatable("١٢,٥"));
        assert!(!is_translatable("४२"));
    }

    #[test]
    fn test_is_number_underscores_between_digits_only() {
        assert!(is_number("1_000_000"));
        assert!(is_number("1_0.5"));
        assert!(!is_number("_1"));
        assert!(!is_number("1_"));
        assert!(!is_number("1__0"));
        assert!(!is_number("1_.5"));
    }

    #[test]
    fn test_punctuation_not_translatable() {
        for symbol in constants::SPECIAL_CHARACTERS {
            assert!(!is_translatable(symbol), "{symbol} should pass through");
        }
        assert!(!is_translatable(" ? "));
        assert!(!is_translatable("( "));
    }

    #[test]
    fn test_words_translatable() {
        assert!(is_translatable("Hello"));
        assert!(is_translatable("Straße"));
        assert!(is_translatable("1st"));
        assert!(is_translatable("..."));
        assert!(is_translatable("?!"));
    }

    #[test]
    fn test_is_number_decimal_separators() {
        assert!(is_number("3,14"));
        assert!(is_number("3.14"));
        assert!(!is_number("3,14,15"));
        assert!(!is_number("abc"));
        assert!(!is_number(""));
    }

    #[test]
    fn test_is_special_character_exact() {
        assert!(is_special_character("$"));
        assert!(!is_special_character("$$"));
        assert!(!is_special_character("="));
    }
}
