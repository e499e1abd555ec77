//! Built-in helpers seeded into every helper registry.

use std::fmt;

use serde_json::Value;

use super::HelperResult;

/// Name of the indentation helper.
pub const SPACES_HELPER: &str = "spaces";

/// Largest count `spaces` accepts.
pub const MAX_SPACES: u64 = 4096;

/// Write `N` space characters, `N` being the first positional argument.
///
/// Accepts a non-negative integer up to [`MAX_SPACES`] or a numeric string.
/// Without arguments nothing is written.
pub fn spaces(out: &mut dyn fmt::Write, _context: &Value, args: &[Value]) -> HelperResult {
    let Some(arg) = args.first() else {
        return Ok(());
    };

    let count = match arg {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    }
    .ok_or_else(|| format!("spaces helper expects a non-negative integer, got {arg}"))?;
    if count > MAX_SPACES {
        return Err(format!("spaces helper count {count} exceeds the maximum of {MAX_SPACES}").into());
    }

    write!(out, "{:width$}", "", width = count as usize)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn apply(args: &[Value]) -> Result<String, String> {
        let mut out = String::new();
        spaces(&mut out, &Value::Null, args).map_err(|e| e.to_string())?;
        Ok(out)
    }

    #[test]
    fn test_spaces_exact_counts() {
        assert_eq!(apply(&[json!(0)]).unwrap(), "");
        assert_eq!(apply(&[json!(1)]).unwrap(), " ");
        assert_eq!(apply(&[json!(10)]).unwrap(), " ".repeat(10));
    }

    #[test]
    fn test_spaces_numeric_string() {
        assert_eq!(apply(&[json!("4")]).unwrap(), "    ");
    }

    #[test]
    fn test_spaces_without_args_writes_nothing() {
        assert_eq!(apply(&[]).unwrap(), "");
    }

    #[test]
    fn test_spaces_ignores_extra_args() {
        assert_eq!(apply(&[json!(2), json!("x")]).unwrap(), "  ");
    }

    #[test]
    fn test_spaces_rejects_invalid_counts() {
        assert!(apply(&[json!(-1)]).is_err());
        assert!(apply(&[json!(2.5)]).is_err());
        assert!(apply(&[json!("four")]).is_err());
        assert!(apply(&[json!(true)]).is_err());
    }

    #[test]
    fn test_spaces_count_is_capped() {
        assert_eq!(apply(&[json!(MAX_SPACES)]).unwrap().len(), MAX_SPACES as usize);

        let err = apply(&[json!(10_000_000_000u64)]).unwrap_err();
        assert!(err.contains("exceeds the maximum"), "{err}");
        assert!(apply(&[json!("4097")]).is_err());
    }
}
