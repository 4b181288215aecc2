//! Property tests for the case converter.

use proptest::prelude::*;
use strata_core::domain::case::{to_camel_case, to_kebab_case, to_pascal_case, to_snake_case};

/// Lowercase words that start with a letter.
fn words() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-z][a-z0-9]{0,6}", 1..5)
}

/// The words joined by a random mix of `_` and `-`.
fn delimited() -> impl Strategy<Value = (Vec<String>, String)> {
    words().prop_flat_map(|ws| {
        let n = ws.len();
        (Just(ws), prop::collection::vec(prop::bool::ANY, n)).prop_map(|(ws, dashes)| {
            let mut joined = String::new();
            for (i, (w, dash)) in ws.iter().zip(dashes).enumerate() {
                if i > 0 {
                    joined.push(if dash { '-' } else { '_' });
                }
                joined.push_str(w);
            }
            (ws, joined)
        })
    })
}

/// First character uppercased, the rest untouched.
fn upper_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[test]
fn camel_case_lowercases_mixed_case_segment() {
    assert_eq!(to_camel_case("userName"), "username");
    assert_eq!(to_pascal_case("userName"), "Username");
}

proptest! {
    #[test]
    fn single_word_pascal_capitalizes_and_camel_keeps(s in "[a-z][a-z0-9]{0,12}") {
        prop_assert_eq!(to_pascal_case(&s), upper_first(&s));
        prop_assert_eq!(to_camel_case(&s), s.clone());
    }

    #[test]
    fn pascal_then_snake_recovers_words((ws, input) in delimited()) {
        prop_assert_eq!(to_snake_case(&to_pascal_case(&input)), ws.join("_"));
    }

    #[test]
    fn camel_then_kebab_recovers_words((ws, input) in delimited()) {
        prop_assert_eq!(to_kebab_case(&to_camel_case(&input)), ws.join("-"));
    }

    #[test]
    fn snake_and_kebab_differ_only_in_separator((_ws, input) in delimited()) {
        prop_assert_eq!(to_snake_case(&input).replace('_', "-"), to_kebab_case(&input));
    }

    #[test]
    fn conversions_are_idempotent(input in "[A-Za-z0-9_-]{0,24}") {
        let snake = to_snake_case(&input);
        prop_assert_eq!(to_snake_case(&snake), snake.clone());
        let kebab = to_kebab_case(&input);
        prop_assert_eq!(to_kebab_case(&kebab), kebab.clone());
    }

    #[test]
    fn outputs_carry_no_stray_delimiters(input in "[A-Za-z0-9_-]{0,24}") {
        let pascal = to_pascal_case(&input);
        let camel = to_camel_case(&input);
        prop_assert!(!pascal.contains(['_', '-']));
        prop_assert!(!camel.contains(['_', '-']));
        prop_assert!(!to_snake_case(&input).contains('-'));
        prop_assert!(!to_kebab_case(&input).contains('_'));
    }

    #[test]
    fn camel_starts_lowercase_pascal_uppercase((_ws, input) in delimited()) {
        let camel = to_camel_case(&input);
        let pascal = to_pascal_case(&input);
        prop_assert!(camel.starts_with(|c: char| c.is_ascii_lowercase()));
        prop_assert!(pascal.starts_with(|c: char| c.is_ascii_uppercase()));
    }
}
