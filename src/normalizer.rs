//! Public entry points of the text normalizer.
//!
//! The three operations are total over `Option<&str>`: `None` (the absence
//! marker) is returned as `None` before any stage runs, and a present value
//! always produces a present value. Unchanged input comes back as
//! `Cow::Borrowed`.

use crate::{
    pipeline::Pipeline,
    stage::{RemoveSymbols, RemoveWhitespace, Stage, ToFullWidth},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::{borrow::Cow, fmt, str::FromStr, sync::Arc};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NormalizeError {
    #[error("type mismatch: expected a string or null, got {found}")]
    TypeMismatch { found: &'static str },
    #[error("unknown operation `{0}`")]
    UnknownOperation(String),
}

/// Maps half-width ASCII to full-width forms. `None` stays `None`.
///
/// ```
/// assert_eq!(widthnorm::to_fullwidth(Some("ABC 123!")).unwrap(), "ＡＢＣ　１２３！");
/// assert_eq!(widthnorm::to_fullwidth(None), None);
/// ```
pub fn to_fullwidth(text: Option<&str>) -> Option<Cow<'_, str>> {
    text.map(|t| ToFullWidth.apply(Cow::Borrowed(t)))
}

/// Deletes ASCII whitespace and U+3000. `None` stays `None`.
pub fn remove_whitespace(text: Option<&str>) -> Option<Cow<'_, str>> {
    text.map(|t| RemoveWhitespace.apply(Cow::Borrowed(t)))
}

/// NFKC-normalizes, then keeps only letters, numbers and CJK ideographs.
/// `None` stays `None`.
pub fn remove_symbols(text: Option<&str>) -> Option<Cow<'_, str>> {
    text.map(|t| RemoveSymbols.apply(Cow::Borrowed(t)))
}

/// Names one of the three normalizer operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Operation {
    #[serde(rename = "to-fullwidth")]
    ToFullWidth,
    RemoveWhitespace,
    RemoveSymbols,
}

impl Operation {
    pub const ALL: [Operation; 3] = [
        Operation::ToFullWidth,
        Operation::RemoveWhitespace,
        Operation::RemoveSymbols,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Operation::ToFullWidth => "to-fullwidth",
            Operation::RemoveWhitespace => "remove-whitespace",
            Operation::RemoveSymbols => "remove-symbols",
        }
    }

    pub fn stage(self) -> Arc<dyn Stage> {
        match self {
            Operation::ToFullWidth => Arc::new(ToFullWidth),
            Operation::RemoveWhitespace => Arc::new(RemoveWhitespace),
            Operation::RemoveSymbols => Arc::new(RemoveSymbols),
        }
    }

    pub fn apply(self, text: Option<&str>) -> Option<Cow<'_, str>> {
        match self {
            Operation::ToFullWidth => to_fullwidth(text),
            Operation::RemoveWhitespace => remove_whitespace(text),
            Operation::RemoveSymbols => remove_symbols(text),
        }
    }

    /// Applies the operation to a dynamically typed value.
    ///
    /// `null` maps to `None` and strings are normalized; any other JSON type
    /// is rejected with [`NormalizeError::TypeMismatch`].
    pub fn apply_value(self, value: &Value) -> Result<Option<String>, NormalizeError> {
        let text = text_of(value)?;
        Ok(self.apply(text).map(Cow::into_owned))
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operation {
    type Err = NormalizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "to-fullwidth" | "fullwidth" | "to-full-width" => Ok(Operation::ToFullWidth),
            "remove-whitespace" | "remove-spaces" | "strip-whitespace" => {
                Ok(Operation::RemoveWhitespace)
            }
            "remove-symbols" | "strip-symbols" => Ok(Operation::RemoveSymbols),
            _ => Err(NormalizeError::UnknownOperation(s.to_owned())),
        }
    }
}

fn text_of(value: &Value) -> Result<Option<&str>, NormalizeError> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s.as_str())),
        Value::Bool(_) => Err(NormalizeError::TypeMismatch { found: "boolean" }),
        Value::Number(_) => Err(NormalizeError::TypeMismatch { found: "number" }),
        Value::Array(_) => Err(NormalizeError::TypeMismatch { found: "array" }),
        Value::Object(_) => Err(NormalizeError::TypeMismatch { found: "object" }),
    }
}

/// A reusable chain of stages with the absence short-circuit in front.
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    pipeline: Pipeline,
}

impl Normalizer {
    pub fn builder() -> NormalizerBuilder {
        NormalizerBuilder::default()
    }

    pub fn from_operations(ops: impl IntoIterator<Item = Operation>) -> Self {
        ops.into_iter()
            .fold(Self::builder(), NormalizerBuilder::add_operation)
            .build()
    }

    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    pub fn normalize<'a>(&self, text: Option<&'a str>) -> Option<Cow<'a, str>> {
        text.map(|t| self.pipeline.process(Cow::Borrowed(t)))
    }

    pub fn normalize_str<'a>(&self, text: &'a str) -> Cow<'a, str> {
        self.pipeline.process(Cow::Borrowed(text))
    }

    pub fn normalize_value(&self, value: &Value) -> Result<Option<String>, NormalizeError> {
        let text = text_of(value)?;
        Ok(self.normalize(text).map(Cow::into_owned))
    }
}

#[derive(Default)]
pub struct NormalizerBuilder {
    pipeline: Pipeline,
}

impl NormalizerBuilder {
    pub fn add_stage<T: Stage + 'static>(mut self, stage: T) -> Self {
        self.pipeline.push(stage);
        self
    }

    pub fn add_operation(mut self, op: Operation) -> Self {
        self.pipeline.push_shared(op.stage());
        self
    }

    pub fn build(self) -> Normalizer {
        debug!(stages = ?self.pipeline, "normalizer built");
        Normalizer {
            pipeline: self.pipeline,
        }
    }
}
