//! `$key` placeholder substitution.

/// Prefix that introduces a tag in story text.
pub const DEFAULT_PREFIX: &str = "$";

/// Replace every `{prefix}{key}` in `text` with the mapped value.
///
/// A tag only matches when the character after it cannot continue a key, so
/// `$hana` never rewrites the start of `$hanako`. Keys are applied once each,
/// in iteration order. A replacement is never re-scanned for the key that
/// produced it, but later keys do see it.
pub fn substitute<I, K, V>(text: &str, tags: I, prefix: &str) -> String
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    if prefix.is_empty() || !text.contains(prefix) {
        return text.to_string();
    }

    let mut out = text.to_string();
    for (key, value) in tags {
        if !out.contains(prefix) {
            break;
        }
        let tag = format!("{prefix}{}", key.as_ref());
        if out.contains(&tag) {
            out = replace_tag(&out, &tag, value.as_ref());
        }
    }
    out
}

fn is_key_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn replace_tag(text: &str, tag: &str, value: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(pos) = rest.find(tag) {
        out.push_str(&rest[..pos]);
        let after = &rest[pos + tag.len()..];
        if after.starts_with(is_key_char) {
            out.push_str(tag);
        } else {
            out.push_str(value);
        }
        rest = after;
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use proptest::prelude::*;

    use super::*;

    #[test]
    fn replaces_all_occurrences() {
        let tags = [("taro", "太郎")];
        assert_eq!(
            substitute("$taro and $taro", tags, DEFAULT_PREFIX),
            "太郎 and 太郎"
        );
    }

    #[test]
    fn unknown_tags_are_left_intact() {
        let tags = [("taro", "太郎")];
        assert_eq!(
            substitute("$hana met $taro", tags, DEFAULT_PREFIX),
            "$hana met 太郎"
        );
    }

    #[test]
    fn tag_must_end_at_key_boundary() {
        let tags = [("hana", "花")];
        assert_eq!(
            substitute("$hanako が来た、$hanaは見た", tags, DEFAULT_PREFIX),
            "$hanako が来た、花は見た"
        );
        assert_eq!(substitute("$hana_x $hana.", tags, DEFAULT_PREFIX), "$hana_x 花.");
    }

    #[test]
    fn keys_are_literal_not_patterns() {
        let tags = [("a.b", "X")];
        assert_eq!(substitute("$a.b $aXb", tags, DEFAULT_PREFIX), "X $aXb");
    }

    #[test]
    fn custom_prefix() {
        let tags = [("me", "僕")];
        assert_eq!(substitute("@me and $me", tags, "@"), "僕 and $me");
    }

    #[test]
    fn later_keys_see_earlier_replacements() {
        let tags = vec![("S", "$taro"), ("taro", "太郎")];
        assert_eq!(substitute("$S", tags, DEFAULT_PREFIX), "太郎");
    }

    proptest! {
        #[test]
        fn no_matching_keys_is_identity(text in "[a-z $]{0,40}") {
            let tags: BTreeMap<String, String> = BTreeMap::new();
            prop_assert_eq!(substitute(&text, &tags, DEFAULT_PREFIX), text);
        }

        #[test]
        fn absent_keys_survive(key in "[a-z]{1,6}", tail in "[a-z0-9_]{1,6}") {
            let text = format!("say ${key}{tail} now");
            let tags = [(key.as_str(), "V")];
            prop_assert_eq!(substitute(&text, tags, DEFAULT_PREFIX), text);
        }
    }
}
