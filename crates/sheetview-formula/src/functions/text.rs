//! Text functions: LEN, LEFT, RIGHT, MID, UPPER, LOWER, CONCATENATE
//!
//! Positions and lengths are in characters, not bytes. Numeric arguments are
//! rendered through the standard display form, so `CONCATENATE("x",1)` is
//! "x1" rather than "x1.0".

use super::{Argument, FunctionDef, FunctionRegistry};
use crate::error::FormulaResult;
use sheetview_core::{CellError, Scalar};

pub(crate) fn register(registry: &mut FunctionRegistry) {
    registry.register(FunctionDef::new("LEN", 1, Some(1), fn_len));
    registry.register(FunctionDef::new("LEFT", 1, Some(2), fn_left));
    registry.register(FunctionDef::new("RIGHT", 1, Some(2), fn_right));
    registry.register(FunctionDef::new("MID", 3, Some(3), fn_mid));
    registry.register(FunctionDef::new("UPPER", 1, Some(1), fn_upper));
    registry.register(FunctionDef::new("LOWER", 1, Some(1), fn_lower));
    registry.register(FunctionDef::new("CONCATENATE", 0, None, fn_concatenate));
}

/// Read an optional count argument; defaults to 1, negatives are VALUE errors
fn count_arg(args: &[Argument], index: usize) -> FormulaResult<usize> {
    let n = match args.get(index) {
        Some(arg) => arg.number()?,
        None => return Ok(1),
    };
    if n < 0.0 {
        return Err(CellError::Value.into());
    }
    Ok(n as usize)
}

fn fn_len(args: &[Argument]) -> FormulaResult<Scalar> {
    let text = args[0].text()?;
    Ok(Scalar::Number(text.chars().count() as f64))
}

fn fn_left(args: &[Argument]) -> FormulaResult<Scalar> {
    let text = args[0].text()?;
    let count = count_arg(args, 1)?;
    Ok(Scalar::Text(text.chars().take(count).collect()))
}

fn fn_right(args: &[Argument]) -> FormulaResult<Scalar> {
    let text = args[0].text()?;
    let count = count_arg(args, 1)?;
    let len = text.chars().count();
    Ok(Scalar::Text(
        text.chars().skip(len.saturating_sub(count)).collect(),
    ))
}

/// MID's start position is 1-based; a start below 1 is a VALUE error
fn fn_mid(args: &[Argument]) -> FormulaResult<Scalar> {
    let text = args[0].text()?;
    let start = args[1].number()?;
    if start < 1.0 {
        return Err(CellError::Value.into());
    }
    let count = count_arg(args, 2)?;
    Ok(Scalar::Text(
        text.chars().skip(start as usize - 1).take(count).collect(),
    ))
}

fn fn_upper(args: &[Argument]) -> FormulaResult<Scalar> {
    Ok(Scalar::Text(args[0].text()?.to_uppercase()))
}

fn fn_lower(args: &[Argument]) -> FormulaResult<Scalar> {
    Ok(Scalar::Text(args[0].text()?.to_lowercase()))
}

fn fn_concatenate(args: &[Argument]) -> FormulaResult<Scalar> {
    let mut out = String::new();
    for arg in args {
        out.push_str(&arg.text()?);
    }
    Ok(Scalar::Text(out))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::functions::REGISTRY;

    fn text(s: &str) -> Argument {
        Argument::Value(Scalar::Text(s.to_string()))
    }

    fn number(n: f64) -> Argument {
        Argument::Value(Scalar::Number(n))
    }

    fn call(name: &str, args: &[Argument]) -> Scalar {
        REGISTRY.call(name, args).unwrap()
    }

    #[test]
    fn test_len_counts_chars() {
        assert_eq!(call("LEN", &[text("hello")]), Scalar::Number(5.0));
        assert_eq!(call("LEN", &[text("")]), Scalar::Number(0.0));
        assert_eq!(call("LEN", &[text("héllo")]), Scalar::Number(5.0));
    }

    #[test]
    fn test_left_right() {
        assert_eq!(call("LEFT", &[text("hello"), number(2.0)]), Scalar::Text("he".into()));
        assert_eq!(call("LEFT", &[text("hello")]), Scalar::Text("h".into())); // Default 1
        assert_eq!(call("RIGHT", &[text("hello"), number(3.0)]), Scalar::Text("llo".into()));
        assert_eq!(call("RIGHT", &[text("hi"), number(10.0)]), Scalar::Text("hi".into()));
    }

    #[test]
    fn test_mid() {
        assert_eq!(
            call("MID", &[text("hello"), number(2.0), number(3.0)]),
            Scalar::Text("ell".into())
        );
        let err = REGISTRY
            .call("MID", &[text("hello"), number(0.0), number(3.0)])
            .unwrap_err();
        assert_eq!(err.to_cell_error(), CellError::Value);
    }

    #[test]
    fn test_case_functions() {
        assert_eq!(call("UPPER", &[text("aBc")]), Scalar::Text("ABC".into()));
        assert_eq!(call("LOWER", &[text("aBc")]), Scalar::Text("abc".into()));
    }

    #[test]
    fn test_concatenate_renders_numbers() {
        assert_eq!(
            call("CONCATENATE", &[text("x"), number(1.0), text("y")]),
            Scalar::Text("x1y".into())
        );
    }
}
