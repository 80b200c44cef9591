fn strip_prefix_token_untrimmed<'a>(src: &'a str, search: &str) -> Option<&'a str> {
    src.strip_prefix(search)
        .filter(|src| src.chars().next().is_none_or(<char>::is_whitespace))
}
/// Rest of `src` after the whole word `search`, with leading whitespace
/// removed.
pub fn strip_prefix_token<'a>(src: &'a str, search: &str) -> Option<&'a str> {
    strip_prefix_token_untrimmed(src, search).map(<str>::trim_start)
}
#[cfg(test)]
mod test {
    use crate::misc::strip_prefix_token;

    #[test]
    fn whole_words_only() {
        assert_eq!(strip_prefix_token("import  8/8 w", "import"), Some("8/8 w"));
        assert_eq!(strip_prefix_token("fen", "fen"), Some(""));
        assert_eq!(strip_prefix_token("fenx", "fen"), None);
    }
}
