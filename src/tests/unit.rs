#[cfg(test)]
mod unit_tests {

    use crate::{Normalizer, RemoveWhitespace, remove_symbols, remove_whitespace, to_fullwidth};
    use std::borrow::Cow;

    #[test]
    fn fullwidth_basic() {
        assert_eq!(to_fullwidth(Some("ABC 123!")).unwrap(), "ＡＢＣ　１２３！");
    }

    #[test]
    fn fullwidth_leaves_cjk() {
        assert_eq!(to_fullwidth(Some("測試abc")).unwrap(), "測試ａｂｃ");
    }

    #[test]
    fn whitespace_mixed_ascii_and_ideographic() {
        assert_eq!(remove_whitespace(Some(" a b\t\nc　d ")).unwrap(), "abcd");
    }

    #[test]
    fn symbols_mixed_scripts() {
        assert_eq!(remove_symbols(Some("abc, 123。測試！@#")).unwrap(), "abc123測試");
    }

    #[test]
    fn none_input() {
        assert!(to_fullwidth(None).is_none());
        assert!(remove_whitespace(None).is_none());
        assert!(remove_symbols(None).is_none());
    }

    #[test]
    fn empty_input() {
        assert_eq!(to_fullwidth(Some("")).unwrap(), "");
        assert_eq!(remove_whitespace(Some("")).unwrap(), "");
        assert_eq!(remove_symbols(Some("")).unwrap(), "");
    }

    #[test]
    fn all_whitespace_reduces_to_empty() {
        assert_eq!(remove_whitespace(Some(" \t　\n　 ")).unwrap(), "");
    }

    #[test]
    fn all_symbols_reduce_to_empty() {
        assert_eq!(remove_symbols(Some("！？。、「」…—@#$%😀")).unwrap(), "");
    }

    #[test]
    fn zero_copy_when_nothing_to_do() {
        let input = "測試abc123";
        for out in [remove_whitespace(Some(input)), remove_symbols(Some(input))] {
            assert!(matches!(out, Some(Cow::Borrowed(s)) if s.as_ptr() == input.as_ptr()));
        }
        let wide = "測試ａｂｃ";
        assert!(matches!(to_fullwidth(Some(wide)), Some(Cow::Borrowed(s)) if s.as_ptr() == wide.as_ptr()));
    }

    #[test]
    fn normalizer_zero_copy_no_whitespace() {
        let normalizer = Normalizer::builder().add_stage(RemoveWhitespace).build();
        let input = "hello";
        let result = normalizer.normalize(Some(input)).unwrap();
        assert!(matches!(result, Cow::Borrowed(s) if s.as_ptr() == input.as_ptr()));
    }
}
