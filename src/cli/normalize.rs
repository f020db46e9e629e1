use anyhow::{Context as _, Result};
use clap::Args;
use serde_json::Value;
use std::io::{self, BufRead, Write};
use tracing::debug;
use widthnorm::{Normalizer, Operation};

#[derive(Debug, Args)]
pub struct NormalizeArgs {
    /// Operation to apply; repeat to chain (to-fullwidth, remove-whitespace, remove-symbols)
    #[arg(long = "op", short = 'o', required = true)]
    pub ops: Vec<Operation>,
    /// Treat each input as a JSON value (string or null) and print JSON
    #[arg(long)]
    pub json: bool,
    /// Text to normalize; stdin is read line by line when omitted
    pub text: Option<String>,
}

pub fn run(args: NormalizeArgs) -> Result<()> {
    let normalizer = Normalizer::from_operations(args.ops.iter().copied());
    debug!(ops = ?args.ops, json = args.json, "normalize");

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match &args.text {
        Some(text) => {
            let line = normalize_line(&normalizer, text, args.json)?;
            writeln!(out, "{line}")?;
        }
        None => {
            for (idx, line) in io::stdin().lock().lines().enumerate() {
                let line = line.with_context(|| "read stdin")?;
                let normalized = normalize_line(&normalizer, &line, args.json)
                    .with_context(|| format!("line {}", idx + 1))?;
                writeln!(out, "{normalized}")?;
            }
        }
    }
    out.flush()?;
    Ok(())
}

fn normalize_line(normalizer: &Normalizer, input: &str, json: bool) -> Result<String> {
    if !json {
        return Ok(normalizer.normalize_str(input).into_owned());
    }
    let value: Value = serde_json::from_str(input).with_context(|| "parse JSON input")?;
    let normalized = normalizer.normalize_value(&value)?;
    Ok(serde_json::to_string(&normalized)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_and_json_lines() {
        let normalizer = Normalizer::from_operations([Operation::ToFullWidth]);
        assert_eq!(normalize_line(&normalizer, "ab 1", false).unwrap(), "ａｂ　１");
        assert_eq!(normalize_line(&normalizer, "\"ab\"", true).unwrap(), "\"ａｂ\"");
        assert_eq!(normalize_line(&normalizer, "null", true).unwrap(), "null");
    }

    #[test]
    fn json_numbers_are_rejected() {
        let normalizer = Normalizer::from_operations([Operation::RemoveSymbols]);
        let err = normalize_line(&normalizer, "42", true).unwrap_err();
        assert!(err.downcast_ref::<widthnorm::NormalizeError>().is_some());
    }
}
