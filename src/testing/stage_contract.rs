use crate::stage::Stage;

/// Trait that stages implement to opt into the universal test suite.
pub trait StageTestConfig: Stage + Sized {
    /// Whether the stage maps every code point to exactly one code point.
    fn one_to_one() -> bool {
        false
    }

    /// General test samples (may or may not trigger changes)
    fn samples() -> &'static [&'static str] {
        &["Hello World 123", " déjà-vu ", "TEST", ""]
    }

    /// Samples that should pass through unchanged (zero-copy test).
    fn should_pass_through() -> &'static [&'static str] {
        &["hello", "world", "test123", ""]
    }

    /// Input/output pairs that verify correct transformations.
    ///
    /// Return empty slice if stage doesn't have predictable transformations.
    fn should_transform() -> &'static [(&'static str, &'static str)] {
        &[]
    }
}

/// Assert that a stage satisfies the universal stage contracts.
///
/// 1. `zero_copy_when_no_changes` → no allocation when input == output
/// 2. `stage_is_idempotent` → applying twice yields same result as once
/// 3. `needs_apply_is_accurate` → correctly predicts whether apply() would change text
/// 4. `transforms_match_expected` → known input/output pairs hold
/// 5. `handles_empty_string_and_ascii` → graceful on edge cases
/// 6. `no_panic_on_mixed_scripts` → survives pathological real-world input
/// 7. `one_to_one_preserves_length` → code-point count is kept by 1:1 stages
#[macro_export]
macro_rules! assert_stage_contract {
    ($stage:expr) => {
        $crate::testing::stage_contract::zero_copy_when_no_changes($stage);
        $crate::testing::stage_contract::stage_is_idempotent($stage);
        $crate::testing::stage_contract::needs_apply_is_accurate($stage);
        $crate::testing::stage_contract::transforms_match_expected($stage);
        $crate::testing::stage_contract::handles_empty_string_and_ascii($stage);
        $crate::testing::stage_contract::no_panic_on_mixed_scripts($stage);
        $crate::testing::stage_contract::one_to_one_preserves_length($stage);
    };
}

// ============================================================================
// Universal contract tests
// ============================================================================

#[cfg(test)]
use std::borrow::Cow;

#[cfg(test)]
const MIXED_SCRIPTS: &[&str] = &[
    "Hello 世界 こんにちは 안녕하세요 مرحبا שלום Привет",
    "ＡＢＣ　１２３！＠＃",
    "e\u{0301}\u{0323} ﬁ ① ㍻",
    "\u{200B}\u{FEFF}\u{00A0}\u{3000}\t\r\n",
    "😀👨‍👩‍👧‍👦🇯🇵",
    "\0\u{7F}\u{9F}",
    "𠀀𪛟\u{10FFFF}",
];

#[cfg(test)]
pub fn zero_copy_when_no_changes<S: StageTestConfig>(stage: S) {
    for &input in S::samples() {
        let mut text = Cow::Borrowed(input);

        if stage.needs_apply(&text) {
            text = stage.apply(text);
        } else {
            assert_eq!(input as *const str, text.as_ref() as *const str);
        }

        // Second pass on already-processed text must never allocate.
        let old_ptr = text.as_ref() as *const str;
        if stage.needs_apply(&text) {
            text = stage.apply(text);
        }
        assert_eq!(
            old_ptr,
            text.as_ref() as *const str,
            "{}: zero-copy violated on second pass (input: `{input}`)",
            stage.name()
        );
    }

    for &pass_through in S::should_pass_through() {
        assert!(
            !stage.needs_apply(pass_through),
            "{}: needs_apply true for pass-through `{pass_through}`",
            stage.name()
        );
        let text = stage.apply(Cow::Borrowed(pass_through));
        assert_eq!(text.as_ref(), pass_through);
        assert!(
            matches!(text, Cow::Borrowed(s) if std::ptr::eq(s, pass_through)),
            "{}: apply allocated on pass-through `{pass_through}`",
            stage.name()
        );
    }
}

#[cfg(test)]
pub fn stage_is_idempotent<S: StageTestConfig>(stage: S) {
    for &input in S::samples().iter().chain(MIXED_SCRIPTS) {
        let once = stage.apply(Cow::Borrowed(input)).into_owned();
        let twice = stage.apply(Cow::Borrowed(&once)).into_owned();
        assert_eq!(once, twice, "{} is not idempotent on `{input}`", stage.name());
    }
}

#[cfg(test)]
pub fn needs_apply_is_accurate<S: StageTestConfig>(stage: S) {
    for &input in S::samples().iter().chain(MIXED_SCRIPTS) {
        let predicted = stage.needs_apply(input);
        let changed = stage.apply(Cow::Borrowed(input)) != input;
        if changed {
            assert!(
                predicted,
                "{}: needs_apply false but apply changed `{input}`",
                stage.name()
            );
        }
        if !predicted {
            assert!(!changed, "{}: changed text despite needs_apply false", stage.name());
        }
    }
}

#[cfg(test)]
pub fn transforms_match_expected<S: StageTestConfig>(stage: S) {
    for &(input, expected) in S::should_transform() {
        assert!(stage.needs_apply(input), "{}: expected work on `{input}`", stage.name());
        let out = stage.apply(Cow::Borrowed(input));
        assert_eq!(out, expected, "{}: wrong output for `{input}`", stage.name());
    }
}

#[cfg(test)]
pub fn handles_empty_string_and_ascii<S: StageTestConfig>(stage: S) {
    assert!(!stage.needs_apply(""), "{}: needs_apply on empty", stage.name());
    assert_eq!(stage.apply(Cow::Borrowed("")), "");
    assert_eq!(stage.apply(Cow::Owned(String::new())), "");

    let ascii: String = (0u8..=0x7F).map(char::from).collect();
    let _ = stage.apply(Cow::Borrowed(&ascii));
}

#[cfg(test)]
pub fn no_panic_on_mixed_scripts<S: StageTestConfig>(stage: S) {
    for &input in MIXED_SCRIPTS {
        let borrowed = stage.apply(Cow::Borrowed(input));
        let owned = stage.apply(Cow::Owned(input.to_owned()));
        assert_eq!(borrowed, owned, "{}: Cow variant changed result", stage.name());
    }
}

#[cfg(test)]
pub fn one_to_one_preserves_length<S: StageTestConfig>(stage: S) {
    if !S::one_to_one() {
        return;
    }
    for &input in S::samples().iter().chain(MIXED_SCRIPTS) {
        let out = stage.apply(Cow::Borrowed(input));
        assert_eq!(
            out.chars().count(),
            input.chars().count(),
            "{}: code-point count changed for `{input}`",
            stage.name()
        );
    }
}
