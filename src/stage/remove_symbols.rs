use crate::{
    stage::{CharMapper, NFKC, Stage},
    testing::stage_contract::StageTestConfig,
    unicode::is_symbol_filter_retained,
};
use std::borrow::Cow;
use tracing::trace;

/// Removes punctuation, symbols and everything else that is not a letter,
/// a number or a CJK ideograph.
///
/// The text is first brought to NFKC so that compatibility spellings of
/// punctuation (`！`, `＠`, `﹐`, ...) are folded onto their canonical forms
/// before classification. A code point then survives iff
///
/// - its general category is `L*` or `N*`, or
/// - it lies in CJK Unified Ideographs (U+4E00–U+9FFF), Extension A
///   (U+3400–U+4DBF) or Extension B (U+20000–U+2A6DF).
///
/// Marks, separators (including every kind of space), controls, emoji,
/// currency signs and all `P*`/`S*` code points are dropped.
///
/// ```
/// use std::borrow::Cow;
/// use widthnorm::stage::{RemoveSymbols, Stage};
///
/// let out = RemoveSymbols.apply(Cow::Borrowed("abc, 123。測試！@#"));
/// assert_eq!(out, "abc123測試");
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct RemoveSymbols;

/// The post-NFKC filter of [`RemoveSymbols`] on its own.
#[derive(Debug, Default, Clone, Copy)]
pub struct RetainLettersAndNumbers;

impl CharMapper for RetainLettersAndNumbers {
    #[inline(always)]
    fn map(&self, c: char) -> Option<char> {
        is_symbol_filter_retained(c).then_some(c)
    }
}

impl Stage for RemoveSymbols {
    fn name(&self) -> &'static str {
        "remove_symbols"
    }

    fn needs_apply(&self, text: &str) -> bool {
        text.chars().any(|c| !is_symbol_filter_retained(c)) || !NFKC.is_normalized(text)
    }

    fn apply<'a>(&self, text: Cow<'a, str>) -> Cow<'a, str> {
        let normalized = NFKC.apply(text);
        if matches!(normalized, Cow::Owned(_)) {
            trace!(len = normalized.len(), "nfkc rewrote input");
        }
        let mut out = RetainLettersAndNumbers.map_str(normalized);
        // Dropping a symbol can bring composable neighbours together (conjoining jamo).
        while !NFKC.is_normalized(&out) {
            out = RetainLettersAndNumbers.map_str(NFKC.apply(out));
        }
        out
    }
}

impl StageTestConfig for RemoveSymbols {
    fn samples() -> &'static [&'static str] {
        &[
            "abc, 123。測試！@#",
            "Hello, World!",
            "😀 emoji 🎉",
            "ＡＢＣ１２３",
            "price: $5.00 / €4",
            "",
        ]
    }

    fn should_pass_through() -> &'static [&'static str] {
        &["abc123", "測試", "café", "日本語テキスト", "٣٤", ""]
    }

    fn should_transform() -> &'static [(&'static str, &'static str)] {
        &[
            ("abc, 123。測試！@#", "abc123測試"),
            ("!@#$%^&*()", ""),
            ("Hello, 世界!", "Hello世界"),
            ("ＡＢＣ１２３！", "ABC123"),
            ("ﬁne ①", "fine1"),
            ("a\u{3000}b", "ab"),
        ]
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn run(input: &str) -> String {
        RemoveSymbols.apply(Cow::Borrowed(input)).into_owned()
    }

    #[test]
    fn mixed_scripts_keep_order() {
        assert_eq!(run("Тест-1, テスト・2; 테스트/3"), "Тест1テスト2테스트3");
    }

    #[test]
    fn combining_marks_are_dropped_after_composition() {
        // Composes to a single letter, so nothing is lost.
        assert_eq!(run("e\u{0301}"), "é");
        // No precomposed form exists: the mark itself is removed.
        assert_eq!(run("q\u{0301}"), "q");
    }

    #[test]
    fn extension_b_ideograph_is_retained() {
        assert_eq!(run("𠀀, 𪛟!"), "𠀀𪛟");
    }

    #[test]
    fn currency_and_math_symbols_are_dropped() {
        assert_eq!(run("¥100 + €5 = ∞"), "1005");
    }

    #[test]
    fn clean_text_stays_borrowed() {
        let input = "測試abc123";
        assert!(!RemoveSymbols.needs_apply(input));
        let out = RemoveSymbols.apply(Cow::Borrowed(input));
        assert!(matches!(out, Cow::Borrowed(s) if s.as_ptr() == input.as_ptr()));
    }

    #[test]
    fn jamo_joined_by_removal_are_composed() {
        let once = run("\u{1100}!\u{1161}");
        assert_eq!(once, "가");
        assert_eq!(run(&once), once);
    }

    #[test]
    fn compatibility_letters_trigger_apply() {
        // All letters, but not NFKC.
        assert!(RemoveSymbols.needs_apply("ﬁ"));
        assert_eq!(run("ﬁ"), "fi");
    }
}
