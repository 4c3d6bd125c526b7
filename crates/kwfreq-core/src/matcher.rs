//! 命中行归属：把过滤器输出的一行映射到唯一关键词
//!
//! 过滤器输出的每一行已经是单个命中子串，因此一行至多归属一个关键词。
//! - 区分大小写：命中子串本身即键（须确为已配置的关键词）。
//! - 忽略大小写：按关键词顺序查找大写形式相等的第一个关键词。

use crate::frequency::FrequencyMap;

pub(crate) fn resolve_key<'k>(
    line: &str,
    keywords: &'k [String],
    freq: &FrequencyMap,
    case_insensitive: bool,
) -> Option<&'k str> {
    if !case_insensitive {
        return keywords.iter().find(|k| k.as_str() == line && freq.contains(k)).map(String::as_str);
    }
    let upper = line.to_uppercase();
    keywords
        .iter()
        .find(|k| k.to_uppercase() == upper && freq.contains(k))
        .map(String::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn sensitive_mode_is_exact() {
        let kw = words(&["Alice", "mad"]);
        let freq = FrequencyMap::zeroed(&kw);
        assert_eq!(resolve_key("Alice", &kw, &freq, false), Some("Alice"));
        assert_eq!(resolve_key("alice", &kw, &freq, false), None);
    }

    #[test]
    fn insensitive_mode_maps_to_configured_spelling() {
        let kw = words(&["FOO", "bar"]);
        let freq = FrequencyMap::zeroed(&kw);
        assert_eq!(resolve_key("foo", &kw, &freq, true), Some("FOO"));
        assert_eq!(resolve_key("BAR", &kw, &freq, true), Some("bar"));
        assert_eq!(resolve_key("baz", &kw, &freq, true), None);
    }

    #[test]
    fn insensitive_mode_prefers_first_keyword() {
        let kw = words(&["Cat", "CAT"]);
        let freq = FrequencyMap::zeroed(&kw);
        assert_eq!(resolve_key("cat", &kw, &freq, true), Some("Cat"));
    }
}
