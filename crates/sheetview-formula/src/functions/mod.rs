//! Built-in function library
//!
//! The function set is closed: every callable function is registered here at
//! startup, and anything else is a NAME error. Functions receive already
//! evaluated arguments, either a single [`Scalar`] or a flattened list of
//! numbers from a range, and return a [`Scalar`] or a spreadsheet error.

pub mod logical;
pub mod math;
pub mod statistical;
pub mod text;

use crate::error::{FormulaError, FormulaResult};
use ahash::AHashMap;
use once_cell::sync::Lazy;
use sheetview_core::{CellError, Scalar};

/// An evaluated function argument
#[derive(Debug, Clone, PartialEq)]
pub enum Argument {
    /// A single scalar value
    Value(Scalar),
    /// The numeric contents of a range, flattened row-major
    Numbers(Vec<f64>),
}

impl Argument {
    /// The argument as a scalar; ranges are not scalars
    pub fn scalar(&self) -> FormulaResult<Scalar> {
        match self {
            Argument::Value(s) => Ok(s.clone()),
            Argument::Numbers(_) => Err(CellError::Value.into()),
        }
    }

    /// The argument as a single number
    ///
    /// A one-element range degrades to its value, matching how spreadsheets
    /// treat `ABS(A1:A1)`.
    pub fn number(&self) -> FormulaResult<f64> {
        match self {
            Argument::Value(s) => s.as_number().ok_or_else(|| CellError::Value.into()),
            Argument::Numbers(ns) if ns.len() == 1 => Ok(ns[0]),
            Argument::Numbers(_) => Err(CellError::Value.into()),
        }
    }

    /// The argument rendered as text
    pub fn text(&self) -> FormulaResult<String> {
        match self {
            Argument::Value(s) => Ok(s.to_display()),
            Argument::Numbers(_) => Err(CellError::Value.into()),
        }
    }

    /// Truthiness, for the logical functions
    pub fn is_truthy(&self) -> FormulaResult<bool> {
        match self {
            Argument::Value(s) => Ok(s.is_truthy()),
            Argument::Numbers(ns) if ns.len() == 1 => Ok(ns[0] != 0.0),
            Argument::Numbers(_) => Err(CellError::Value.into()),
        }
    }

    /// Append this argument's numeric content to `out`
    ///
    /// Scalar text contributes nothing; aggregate functions skip text the way
    /// spreadsheets do.
    pub fn extend_numbers(&self, out: &mut Vec<f64>) {
        match self {
            Argument::Value(s) => {
                if let Some(n) = s.as_number() {
                    out.push(n);
                }
            }
            Argument::Numbers(ns) => out.extend_from_slice(ns),
        }
    }
}

/// Flatten all arguments into one numeric list, skipping non-numeric scalars
pub(crate) fn collect_numbers(args: &[Argument]) -> Vec<f64> {
    let mut out = Vec::new();
    for arg in args {
        arg.extend_numbers(&mut out);
    }
    out
}

type FunctionImpl = fn(&[Argument]) -> FormulaResult<Scalar>;

/// A registered built-in function
pub struct FunctionDef {
    pub name: &'static str,
    pub min_args: usize,
    /// None means variadic with no upper bound
    pub max_args: Option<usize>,
    implementation: FunctionImpl,
}

impl FunctionDef {
    pub const fn new(
        name: &'static str,
        min_args: usize,
        max_args: Option<usize>,
        implementation: FunctionImpl,
    ) -> Self {
        Self {
            name,
            min_args,
            max_args,
            implementation,
        }
    }

    fn expected_arity(&self) -> String {
        match (self.min_args, self.max_args) {
            (min, Some(max)) if min == max => min.to_string(),
            (min, Some(max)) => format!("{} to {}", min, max),
            (min, None) => format!("at least {}", min),
        }
    }
}

/// Lookup table from uppercase function name to definition
pub struct FunctionRegistry {
    functions: AHashMap<&'static str, FunctionDef>,
}

impl FunctionRegistry {
    fn new() -> Self {
        Self {
            functions: AHashMap::new(),
        }
    }

    /// Registry with the complete built-in library
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        statistical::register(&mut registry);
        math::register(&mut registry);
        logical::register(&mut registry);
        text::register(&mut registry);
        registry
    }

    pub fn register(&mut self, def: FunctionDef) {
        self.functions.insert(def.name, def);
    }

    /// Look up a function by name, case-insensitively
    pub fn get(&self, name: &str) -> Option<&FunctionDef> {
        self.functions.get(name.to_uppercase().as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Invoke a function with evaluated arguments
    ///
    /// An unknown name is a NAME error at the cell boundary; a wrong argument
    /// count is a VALUE error.
    pub fn call(&self, name: &str, args: &[Argument]) -> FormulaResult<Scalar> {
        let def = self
            .get(name)
            .ok_or_else(|| FormulaError::UnknownFunction(name.to_uppercase()))?;

        let arity_ok = args.len() >= def.min_args
            && def.max_args.map_or(true, |max| args.len() <= max);
        if !arity_ok {
            return Err(FormulaError::ArgumentCount {
                function: def.name.to_string(),
                expected: def.expected_arity(),
                actual: args.len(),
            });
        }

        (def.implementation)(args)
    }
}

/// The global function registry; built once, read-only thereafter
pub static REGISTRY: Lazy<FunctionRegistry> = Lazy::new(FunctionRegistry::with_builtins);
