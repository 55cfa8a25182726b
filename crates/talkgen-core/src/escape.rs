//! Escaping for text embedded in TeX definitions.

/// Escape every TeX special character in `text` with a leading backslash.
///
/// The escaped set is `\ & % $ # _ { } ~ ^`. Nothing else is touched and
/// the empty string maps to the empty string.
///
/// Each input character is visited exactly once, so the backslashes this
/// function inserts are never escaped again. This matches replacing the
/// backslash first and then every other special character in turn.
///
/// # Examples
///
/// ```
/// use talkgen_core::escape;
///
/// assert_eq!(escape("a_b"), "a\\_b");
/// assert_eq!(escape("100%"), "100\\%");
/// assert_eq!(escape(""), "");
/// ```
pub fn escape(text: &str) -> String {
    let headroom = text.len().checked_div(8).unwrap_or_default();
    let mut result = String::with_capacity(text.len().saturating_add(headroom));

    for c in text.chars() {
        if is_special(c) {
            result.push('\\');
        }
        result.push(c);
    }

    result
}

const fn is_special(c: char) -> bool {
    matches!(
        c,
        '\\' | '&' | '%' | '$' | '#' | '_' | '{' | '}' | '~' | '^'
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_stays_empty() {
        assert_eq!(escape(""), "");
    }

    #[test]
    fn plain_text_untouched() {
        assert_eq!(escape("Hello, world! (v1.0) <ok>"), "Hello, world! (v1.0) <ok>");
    }

    #[test]
    fn grows_past_initial_capacity() {
        let escaped = escape(&"%".repeat(64));
        assert_eq!(escaped.len(), 128);
        assert!(escaped.starts_with("\\%\\%"));
    }

    #[test]
    fn underscore_escaped_once() {
        assert_eq!(escape("a_b"), "a\\_b");
    }

    #[test]
    fn percent() {
        assert_eq!(escape("100%"), "100\\%");
    }

    #[test]
    fn every_special_character() {
        assert_eq!(
            escape("\\&%$#_{}~^"),
            "\\\\\\&\\%\\$\\#\\_\\{\\}\\~\\^"
        );
    }

    #[test]
    fn backslash_before_special_is_not_double_escaped() {
        // `\_` becomes `\\` followed by `\_`, never `\\\\_`.
        assert_eq!(escape("\\_"), "\\\\\\_");
    }

    #[test]
    fn matches_sequential_backslash_first_replacement() {
        let input = "C:\\path_to\\{x} & 50% of $5 #1 ~ ^";
        let mut expected = input.replace('\\', "\\\\");
        for c in ['&', '%', '$', '#', '_', '{', '}', '~', '^'] {
            expected = expected.replace(c, &format!("\\{c}"));
        }
        assert_eq!(escape(input), expected);
    }

    #[test]
    fn multibyte_text_preserved() {
        assert_eq!(escape("Zürich_Ω€"), "Zürich\\_Ω€");
        assert_eq!(escape("日本語 & 中文"), "日本語 \\& 中文");
    }
}
