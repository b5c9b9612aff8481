//! Aggregate functions: SUM, AVERAGE, COUNT, COUNTA, MAX, MIN
//!
//! All of these flatten their arguments into a numeric list first; text
//! scalars contribute nothing. An empty list yields 0 rather than an error,
//! AVERAGE included.

use super::{collect_numbers, Argument, FunctionDef, FunctionRegistry};
use crate::error::FormulaResult;
use sheetview_core::Scalar;

pub(crate) fn register(registry: &mut FunctionRegistry) {
    registry.register(FunctionDef::new("SUM", 0, None, fn_sum));
    registry.register(FunctionDef::new("AVERAGE", 0, None, fn_average));
    registry.register(FunctionDef::new("COUNT", 0, None, fn_count));
    registry.register(FunctionDef::new("COUNTA", 0, None, fn_counta));
    registry.register(FunctionDef::new("MAX", 0, None, fn_max));
    registry.register(FunctionDef::new("MIN", 0, None, fn_min));
}

fn fn_sum(args: &[Argument]) -> FormulaResult<Scalar> {
    let numbers = collect_numbers(args);
    Ok(Scalar::Number(numbers.iter().sum()))
}

fn fn_average(args: &[Argument]) -> FormulaResult<Scalar> {
    let numbers = collect_numbers(args);
    if numbers.is_empty() {
        return Ok(Scalar::Number(0.0));
    }
    Ok(Scalar::Number(
        numbers.iter().sum::<f64>() / numbers.len() as f64,
    ))
}

fn fn_count(args: &[Argument]) -> FormulaResult<Scalar> {
    Ok(Scalar::Number(collect_numbers(args).len() as f64))
}

/// COUNTA counts every non-blank argument, text included
fn fn_counta(args: &[Argument]) -> FormulaResult<Scalar> {
    let mut count = 0usize;
    for arg in args {
        match arg {
            Argument::Value(Scalar::Text(s)) if s.is_empty() => {}
            Argument::Value(_) => count += 1,
            Argument::Numbers(ns) => count += ns.len(),
        }
    }
    Ok(Scalar::Number(count as f64))
}

fn fn_max(args: &[Argument]) -> FormulaResult<Scalar> {
    let numbers = collect_numbers(args);
    if numbers.is_empty() {
        return Ok(Scalar::Number(0.0));
    }
    Ok(Scalar::Number(
        numbers.iter().copied().fold(f64::NEG_INFINITY, f64::max),
    ))
}

fn fn_min(args: &[Argument]) -> FormulaResult<Scalar> {
    let numbers = collect_numbers(args);
    if numbers.is_empty() {
        return Ok(Scalar::Number(0.0));
    }
    Ok(Scalar::Number(
        numbers.iter().copied().fold(f64::INFINITY, f64::min),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::functions::REGISTRY;

    fn value(n: f64) -> Argument {
        Argument::Value(Scalar::Number(n))
    }

    fn call(name: &str, args: &[Argument]) -> Scalar {
        REGISTRY.call(name, args).unwrap()
    }

    #[test]
    fn test_sum() {
        assert_eq!(call("SUM", &[value(1.0), value(2.0)]), Scalar::Number(3.0));
        assert_eq!(
            call("SUM", &[Argument::Numbers(vec![100.0, 150.0, 200.0])]),
            Scalar::Number(450.0)
        );
        // Text scalars are skipped, not errors.
        assert_eq!(
            call("SUM", &[value(5.0), Argument::Value(Scalar::Text("x".into()))]),
            Scalar::Number(5.0)
        );
    }

    #[test]
    fn test_average() {
        assert_eq!(
            call("AVERAGE", &[Argument::Numbers(vec![10.0, 20.0, 30.0])]),
            Scalar::Number(20.0)
        );
        // An all-text range averages to 0, not DIV/0.
        assert_eq!(
            call("AVERAGE", &[Argument::Numbers(vec![])]),
            Scalar::Number(0.0)
        );
    }

    #[test]
    fn test_count_and_counta() {
        let args = [
            Argument::Numbers(vec![1.0, 2.0]),
            Argument::Value(Scalar::Text("label".into())),
            value(3.0),
        ];
        assert_eq!(call("COUNT", &args), Scalar::Number(3.0));
        assert_eq!(call("COUNTA", &args), Scalar::Number(4.0));

        // Empty text does not count as content.
        assert_eq!(
            call("COUNTA", &[Argument::Value(Scalar::Text(String::new()))]),
            Scalar::Number(0.0)
        );
    }

    #[test]
    fn test_max_min() {
        let args = [Argument::Numbers(vec![3.0, -1.0, 7.0])];
        assert_eq!(call("MAX", &args), Scalar::Number(7.0));
        assert_eq!(call("MIN", &args), Scalar::Number(-1.0));

        // Empty input yields 0 for both.
        assert_eq!(call("MAX", &[Argument::Numbers(vec![])]), Scalar::Number(0.0));
        assert_eq!(call("MIN", &[Argument::Numbers(vec![])]), Scalar::Number(0.0));
    }
}
