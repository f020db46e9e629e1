//! Core normalization stage abstraction.
//!
//! Every transformation in this crate is a [`Stage`]: a pure, stateless step
//! over a `Cow<str>`. Stages are infallible; given text they always return
//! text. The absence marker (`None`) never reaches a stage, it is
//! short-circuited by [`crate::Normalizer`] and the free functions in
//! [`crate::normalizer`].
//!
//! Zero-copy contract: when [`Stage::needs_apply`] returns `false`, the stage
//! would return its input unchanged, so callers may skip [`Stage::apply`] and
//! keep the original borrow.
//!
//! Stages that are a pure per-character mapping or filter additionally
//! implement [`CharMapper`], which lets them share one apply loop.

pub mod normalization;
pub mod remove_symbols;
pub mod remove_whitespace;
pub mod to_fullwidth;

use std::borrow::Cow;

/// A single normalisation step.
pub trait Stage: Send + Sync {
    /// Human-readable name, used in logs.
    fn name(&self) -> &'static str;

    /// Fast pre-check. Returning `false` means `apply` would be a no-op.
    fn needs_apply(&self, text: &str) -> bool;

    /// Allocation-aware transformation. Must always be correct, even when
    /// `needs_apply` would have returned `false`.
    fn apply<'a>(&self, text: Cow<'a, str>) -> Cow<'a, str>;
}

/// Per-character mapping shared by the 1:1 and filtering stages.
pub trait CharMapper: Send + Sync {
    /// Map a single Unicode scalar value.
    /// Return `None` if the character should be **removed**.
    fn map(&self, c: char) -> Option<char>;

    /// Map every character of `text`, keeping the borrow when nothing changes.
    #[inline]
    fn map_str<'a>(&self, text: Cow<'a, str>) -> Cow<'a, str> {
        // Find the first character that changes; everything before it is copied as-is.
        let first_change = text
            .char_indices()
            .find(|&(_, c)| self.map(c) != Some(c))
            .map(|(idx, _)| idx);
        let Some(idx) = first_change else {
            return text;
        };
        let mut out = String::with_capacity(text.len());
        out.push_str(&text[..idx]);
        out.extend(text[idx..].chars().filter_map(|c| self.map(c)));
        Cow::Owned(out)
    }
}

pub use normalization::{NFKC, Nfkc};
pub use remove_symbols::RemoveSymbols;
pub use remove_whitespace::RemoveWhitespace;
pub use to_fullwidth::ToFullWidth;
