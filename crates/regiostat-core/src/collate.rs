//! Russian-aware string collation for region names and appeal topics.
//!
//! Plain `str` ordering puts `Ё` (U+0401) before `А` and every uppercase
//! letter before every lowercase one, which scrambles region catalogues.
//! This module compares strings the way a Russian locale does:
//!
//! - Primary level: whitespace/punctuation < digits < Cyrillic < Latin < other.
//!   Letters compare case-insensitively, `ё` shares the weight of `е`,
//!   digit runs compare as plain digits (no numeric collation).
//! - Secondary level: `е` before `ё`.
//! - Tertiary level: lowercase before uppercase.
//!
//! Strings equal on all three levels fall back to code-point order so the
//! result is a total order.

use std::cmp::Ordering;

const RUSSIAN_ALPHABET: &str = "абвгдежзийклмнопрстуфхцчшщъыьэюя";

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct CollationKey {
    primary: Vec<(u8, u32)>,
    secondary: Vec<u8>,
    tertiary: Vec<u8>,
}

fn collation_key(s: &str) -> CollationKey {
    let mut primary = Vec::with_capacity(s.len());
    let mut secondary = Vec::with_capacity(s.len());
    let mut tertiary = Vec::with_capacity(s.len());

    for ch in s.chars() {
        let lower = ch.to_lowercase().next().unwrap_or(ch);
        tertiary.push(u8::from(lower != ch));

        let (base, accent) = match lower {
            'ё' => ('е', 1),
            other => (other, 0),
        };
        secondary.push(accent);
        primary.push(primary_weight(base));
    }

    CollationKey {
        primary,
        secondary,
        tertiary,
    }
}

fn primary_weight(ch: char) -> (u8, u32) {
    if ch.is_whitespace() {
        return (0, 0);
    }
    if ch.is_ascii_punctuation() || (!ch.is_alphanumeric() && (ch as u32) < 0x2100) {
        return (0, ch as u32 + 1);
    }
    if let Some(d) = ch.to_digit(10) {
        return (1, d);
    }
    if let Some(pos) = RUSSIAN_ALPHABET.chars().position(|c| c == ch) {
        return (2, pos as u32);
    }
    if ('\u{0400}'..='\u{04FF}').contains(&ch) {
        return (2, 100 + ch as u32);
    }
    if ch.is_ascii_lowercase() {
        return (3, ch as u32 - 'a' as u32);
    }
    (4, ch as u32)
}

/// Compare two strings with Russian collation rules.
pub fn collate(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| a.cmp(b))
}

/// Sort in place with [`collate`] and drop exact duplicates.
pub fn sort_unique(values: &mut Vec<String>) {
    values.sort_by(|a, b| collate(a, b));
    values.dedup();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_sorted_order(inputs: &[&str]) {
        for pair in inputs.windows(2) {
            assert_eq!(
                collate(pair[0], pair[1]),
                Ordering::Less,
                "expected {:?} < {:?}",
                pair[0],
                pair[1],
            );
        }
    }

    #[test]
    fn cyrillic_alphabet_order() {
        assert_sorted_order(&["Алтайский край", "Башкортостан", "Москва", "Якутия"]);
    }

    #[test]
    fn yo_sorts_with_ye() {
        // Plain code-point order would put "Ёлки" before "Абакан".
        assert_sorted_order(&["Абакан", "Ежи", "Ёжики", "Ежов", "Жуков"]);
    }

    #[test]
    fn ye_before_yo_when_otherwise_equal() {
        assert_sorted_order(&["ель", "ёль"]);
    }

    #[test]
    fn case_insensitive_primary() {
        assert_sorted_order(&["анапа", "Белгород", "вологда"]);
    }

    #[test]
    fn lowercase_before_uppercase_on_tie() {
        assert_sorted_order(&["москва", "Москва"]);
    }

    #[test]
    fn prefix_sorts_first() {
        assert_sorted_order(&["Санкт", "Санкт-Петербург"]);
    }

    #[test]
    fn digits_before_letters_and_cyrillic_before_latin() {
        assert_sorted_order(&["1 тема", "Амур", "Zeta"]);
    }

    #[test]
    fn sort_unique_dedups() {
        let mut values = vec![
            "Тверь".to_string(),
            "Адыгея".to_string(),
            "Тверь".to_string(),
            "Ёлкино".to_string(),
        ];
        sort_unique(&mut values);
        assert_eq!(values, vec!["Адыгея", "Ёлкино", "Тверь"]);
    }

    #[test]
    fn collate_is_reflexive() {
        assert_eq!(collate("Пермский край", "Пермский край"), Ordering::Equal);
    }
}
