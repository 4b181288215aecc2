//! Identifier case conversion.
//!
//! Four total, pure conversions between naming conventions. They are exposed
//! to templates as helpers (see [`crate::domain::template::Helpers`]).
//!
//! ## Segmentation rules
//!
//! | Conversion | Split on `_` / `-` | Split on camel boundary |
//! |------------|--------------------|-------------------------|
//! | Pascal     | yes                | no                      |
//! | camel      | yes                | no                      |
//! | snake      | yes                | yes                     |
//! | kebab      | yes                | yes                     |
//!
//! A camel boundary is any uppercase character that is not the first
//! character of the input. Empty segments (leading, trailing or repeated
//! delimiters) are dropped silently.
//!
//! ## Examples
//!
//! | Input       | Pascal     | camel      | snake       | kebab       |
//! |-------------|------------|------------|-------------|-------------|
//! | `user_name` | `UserName` | `userName` | `user_name` | `user-name` |
//! | `user-api`  | `UserApi`  | `userApi`  | `user_api`  | `user-api`  |
//! | `UserName`  | `Username` | `username` | `user_name` | `user-name` |

/// Convert to PascalCase: `user_name` → `UserName`.
pub fn to_pascal_case(s: &str) -> String {
    delimiter_segments(s).map(capitalize).collect()
}

/// Convert to camelCase: `user_name` → `userName`.
///
/// The first segment is lowercased entirely; the rest are capitalized.
pub fn to_camel_case(s: &str) -> String {
    delimiter_segments(s)
        .enumerate()
        .map(|(i, seg)| if i == 0 { seg.to_lowercase() } else { capitalize(seg) })
        .collect()
}

/// Convert to snake_case: `UserName` → `user_name`.
pub fn to_snake_case(s: &str) -> String {
    lowercase_words(s).join("_")
}

/// Convert to kebab-case: `UserName` → `user-name`.
pub fn to_kebab_case(s: &str) -> String {
    lowercase_words(s).join("-")
}

/// Uppercase the first character and lowercase the rest.
///
/// `to_uppercase` may expand a single char (`ß` → `SS`); that is kept.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => {
            let mut out = String::with_capacity(s.len());
            out.extend(first.to_uppercase());
            out.push_str(&chars.as_str().to_lowercase());
            out
        }
        None => String::new(),
    }
}

fn is_delimiter(c: char) -> bool {
    c == '_' || c == '-'
}

/// Non-empty segments between `_` / `-` delimiters.
fn delimiter_segments(s: &str) -> impl Iterator<Item = &str> {
    s.split(is_delimiter).filter(|seg| !seg.is_empty())
}

/// Split on camel boundaries first, then on delimiters, lowercasing each word.
fn lowercase_words(s: &str) -> Vec<String> {
    split_camel(s)
        .into_iter()
        .flat_map(|word| {
            delimiter_segments(word)
                .map(str::to_lowercase)
                .collect::<Vec<_>>()
        })
        .collect()
}

/// `"userApiV2"` → `["user", "Api", "V2"]`.
///
/// Delimiters are left inside the words; `lowercase_words` strips them.
fn split_camel(s: &str) -> Vec<&str> {
    let mut words = Vec::new();
    let mut start = 0;

    for (i, c) in s.char_indices() {
        if i > 0 && c.is_uppercase() {
            words.push(&s[start..i]);
            start = i;
        }
    }

    if start < s.len() {
        words.push(&s[start..]);
    }

    words
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pascal_from_delimited() {
        assert_eq!(to_pascal_case("user_name"), "UserName");
        assert_eq!(to_pascal_case("user-api"), "UserApi");
        assert_eq!(to_pascal_case("shopapi"), "Shopapi");
    }

    #[test]
    fn pascal_lowercases_segment_tails() {
        assert_eq!(to_pascal_case("HTTP_server"), "HttpServer");
        assert_eq!(to_pascal_case("UserName"), "Username");
    }

    #[test]
    fn camel_from_delimited() {
        assert_eq!(to_camel_case("user_name"), "userName");
        assert_eq!(to_camel_case("user-api"), "userApi");
        assert_eq!(to_camel_case("Order_Item_ID"), "orderItemId");
    }

    #[test]
    fn snake_from_camel_and_pascal() {
        assert_eq!(to_snake_case("UserName"), "user_name");
        assert_eq!(to_snake_case("userApi"), "user_api");
        assert_eq!(to_snake_case("user-api"), "user_api");
    }

    #[test]
    fn kebab_from_camel_and_pascal() {
        assert_eq!(to_kebab_case("UserName"), "user-name");
        assert_eq!(to_kebab_case("user_api"), "user-api");
    }

    #[test]
    fn each_uppercase_letter_starts_a_word() {
        // No acronym detection: "ID" is two words.
        assert_eq!(to_snake_case("userID"), "user_i_d");
    }

    #[test]
    fn consecutive_and_leading_delimiters_are_dropped() {
        assert_eq!(to_pascal_case("__user--name_"), "UserName");
        assert_eq!(to_camel_case("-user_name"), "userName");
        assert_eq!(to_snake_case("_User__Name"), "user_name");
        assert_eq!(to_kebab_case("--a-b"), "a-b");
    }

    #[test]
    fn mixed_delimiters_and_camel_boundaries() {
        assert_eq!(to_snake_case("my_HttpServer-v2"), "my_http_server_v2");
        assert_eq!(to_kebab_case("Api_Gateway"), "api-gateway");
    }

    #[test]
    fn empty_and_delimiter_only_inputs() {
        for conv in [to_pascal_case, to_camel_case, to_snake_case, to_kebab_case] {
            assert_eq!(conv(""), "");
            assert_eq!(conv("_-_"), "");
        }
    }

    #[test]
    fn digits_do_not_start_words() {
        assert_eq!(to_snake_case("v2Api"), "v2_api");
        assert_eq!(to_pascal_case("v2_api"), "V2Api");
    }

    #[test]
    fn capitalize_handles_unicode() {
        assert_eq!(capitalize("élan"), "Élan");
        assert_eq!(capitalize(""), "");
    }
}
