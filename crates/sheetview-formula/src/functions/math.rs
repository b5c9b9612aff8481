//! Math functions: ABS, ROUND, INT, SQRT, POWER

use super::{Argument, FunctionDef, FunctionRegistry};
use crate::error::FormulaResult;
use sheetview_core::{CellError, Scalar};

pub(crate) fn register(registry: &mut FunctionRegistry) {
    registry.register(FunctionDef::new("ABS", 1, Some(1), fn_abs));
    registry.register(FunctionDef::new("ROUND", 1, Some(2), fn_round));
    registry.register(FunctionDef::new("INT", 1, Some(1), fn_int));
    registry.register(FunctionDef::new("SQRT", 1, Some(1), fn_sqrt));
    registry.register(FunctionDef::new("POWER", 2, Some(2), fn_power));
}

fn fn_abs(args: &[Argument]) -> FormulaResult<Scalar> {
    Ok(Scalar::Number(args[0].number()?.abs()))
}

/// ROUND rounds half away from zero, not banker's rounding
fn fn_round(args: &[Argument]) -> FormulaResult<Scalar> {
    let n = args[0].number()?;
    let digits = match args.get(1) {
        Some(arg) => arg.number()? as i32,
        None => 0,
    };
    let factor = 10f64.powi(digits);
    Ok(Scalar::Number((n * factor).round() / factor))
}

/// INT truncates toward zero
fn fn_int(args: &[Argument]) -> FormulaResult<Scalar> {
    Ok(Scalar::Number(args[0].number()?.trunc()))
}

fn fn_sqrt(args: &[Argument]) -> FormulaResult<Scalar> {
    let n = args[0].number()?;
    if n < 0.0 {
        return Err(CellError::Num.into());
    }
    Ok(Scalar::Number(n.sqrt()))
}

fn fn_power(args: &[Argument]) -> FormulaResult<Scalar> {
    let base = args[0].number()?;
    let exponent = args[1].number()?;
    Ok(Scalar::Number(base.powf(exponent)))
}
