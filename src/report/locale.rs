//! Locale-aware number grouping for report tables

use std::env;

/// Groups the digits of integers by thousands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberFormat {
    separator: char,
}

impl Default for NumberFormat {
    fn default() -> Self {
        Self { separator: ',' }
    }
}

impl NumberFormat {
    /// Uses an explicit group separator
    pub fn with_separator(separator: char) -> Self {
        Self { separator }
    }

    /// Picks the separator for the user's locale, read from the first
    /// non-empty of `LC_ALL`, `LC_NUMERIC` and `LANG`.
    pub fn from_env() -> Self {
        let locale = first_env(&["LC_ALL", "LC_NUMERIC", "LANG"]).unwrap_or_default();
        Self::for_locale(&locale)
    }

    /// Picks the separator for a locale string such as `de_DE.UTF-8`.
    ///
    /// Unknown locales, `C` and `POSIX` use `,`.
    pub fn for_locale(locale: &str) -> Self {
        let normalized = parse_locale(locale);
        let language = normalized
            .split('_')
            .next()
            .unwrap_or("")
            .to_ascii_lowercase();
        let separator = match language.as_str() {
            "de" | "es" | "it" | "nl" | "pt" | "da" | "id" | "tr" | "el" => '.',
            "fr" | "ru" | "sv" | "pl" | "cs" | "fi" | "nb" | "uk" | "hu" | "sk" => ' ',
            _ => ',',
        };
        Self { separator }
    }

    /// Formats `n` with grouped thousands, e.g. `-1234567` as `-1,234,567`.
    pub fn format_int(&self, n: i64) -> String {
        let digits = n.unsigned_abs().to_string();
        let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
        if n < 0 {
            out.push('-');
        }
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                out.push(self.separator);
            }
            out.push(c);
        }
        out
    }
}

/// Reduces `language[_territory][.codeset][@modifier]` to
/// `language[_territory]`, accepting `-` as the territory separator.
pub fn parse_locale(locale: &str) -> String {
    let base = locale.split(['.', '@']).next().unwrap_or("");
    base.replacen('-', "_", 1)
}

fn first_env(names: &[&str]) -> Option<String> {
    names
        .iter()
        .filter_map(|name| env::var(name).ok())
        .find(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_int_grouping() {
        let f = NumberFormat::default();
        assert_eq!(f.format_int(0), "0");
        assert_eq!(f.format_int(999), "999");
        assert_eq!(f.format_int(1000), "1,000");
        assert_eq!(f.format_int(1234567), "1,234,567");
        assert_eq!(f.format_int(-98765), "-98,765");
        assert_eq!(f.format_int(i64::MIN), "-9,223,372,036,854,775,808");
    }

    #[test]
    fn test_parse_locale() {
        assert_eq!(parse_locale("en_US.UTF-8"), "en_US");
        assert_eq!(parse_locale("de-DE"), "de_DE");
        assert_eq!(parse_locale("sr_RS@latin"), "sr_RS");
        assert_eq!(parse_locale("C"), "C");
        assert_eq!(parse_locale(""), "");
    }

    #[test]
    fn test_separator_for_locale() {
        assert_eq!(NumberFormat::for_locale("en_US.UTF-8").format_int(1000), "1,000");
        assert_eq!(NumberFormat::for_locale("de_DE.UTF-8").format_int(1000), "1.000");
        assert_eq!(NumberFormat::for_locale("fr_FR").format_int(1000), "1 000");
        assert_eq!(NumberFormat::for_locale("POSIX").format_int(1000), "1,000");
        assert_eq!(NumberFormat::with_separator('_').format_int(1000), "1_000");
    }
}
