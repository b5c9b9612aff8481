//! Logical functions: IF, AND, OR, NOT
//!
//! Truthiness follows the scalar rules: nonzero numbers and non-empty text
//! are true. IF with a missing else-branch yields FALSE, the way spreadsheets
//! render an omitted argument.

use super::{Argument, FunctionDef, FunctionRegistry};
use crate::error::FormulaResult;
use sheetview_core::Scalar;

pub(crate) fn register(registry: &mut FunctionRegistry) {
    registry.register(FunctionDef::new("IF", 2, Some(3), fn_if));
    registry.register(FunctionDef::new("AND", 1, None, fn_and));
    registry.register(FunctionDef::new("OR", 1, None, fn_or));
    registry.register(FunctionDef::new("NOT", 1, Some(1), fn_not));
}

fn fn_if(args: &[Argument]) -> FormulaResult<Scalar> {
    if args[0].is_truthy()? {
        args[1].scalar()
    } else {
        match args.get(2) {
            Some(arg) => arg.scalar(),
            None => Ok(Scalar::Boolean(false)),
        }
    }
}

fn fn_and(args: &[Argument]) -> FormulaResult<Scalar> {
    for arg in args {
        if !arg.is_truthy()? {
            return Ok(Scalar::Boolean(false));
        }
    }
    Ok(Scalar::Boolean(true))
}

fn fn_or(args: &[Argument]) -> FormulaResult<Scalar> {
    for arg in args {
        if arg.is_truthy()? {
            return Ok(Scalar::Boolean(true));
        }
    }
    Ok(Scalar::Boolean(false))
}

fn fn_not(args: &[Argument]) -> FormulaResult<Scalar> {
    Ok(Scalar::Boolean(!args[0].is_truthy()?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::functions::REGISTRY;

    fn value(s: Scalar) -> Argument {
        Argument::Value(s)
    }

    fn call(name: &str, args: &[Argument]) -> Scalar {
        REGISTRY.call(name, args).unwrap()
    }

    #[test]
    fn test_if_branches() {
        let args = [
            value(Scalar::Boolean(true)),
            value(Scalar::Text("big".into())),
            value(Scalar::Text("small".into())),
        ];
        assert_eq!(call("IF", &args), Scalar::Text("big".into()));

        let args = [
            value(Scalar::Number(0.0)),
            value(Scalar::Text("big".into())),
            value(Scalar::Text("small".into())),
        ];
        assert_eq!(call("IF", &args), Scalar::Text("small".into()));
    }

    #[test]
    fn test_if_missing_else_is_false() {
        let args = [value(Scalar::Boolean(false)), value(Scalar::Number(1.0))];
        assert_eq!(call("IF", &args), Scalar::Boolean(false));
    }

    #[test]
    fn test_and_or() {
        let truthy = value(Scalar::Number(1.0));
        let falsy = value(Scalar::Number(0.0));

        assert_eq!(call("AND", &[truthy.clone(), truthy.clone()]), Scalar::Boolean(true));
        assert_eq!(call("AND", &[truthy.clone(), falsy.clone()]), Scalar::Boolean(false));
        assert_eq!(call("OR", &[falsy.clone(), truthy.clone()]), Scalar::Boolean(true));
        assert_eq!(call("OR", &[falsy.clone(), falsy.clone()]), Scalar::Boolean(false));
    }

    #[test]
    fn test_not() {
        assert_eq!(call("NOT", &[value(Scalar::Number(0.0))]), Scalar::Boolean(true));
        assert_eq!(call("NOT", &[value(Scalar::Text("x".into()))]), Scalar::Boolean(false));
    }
}
