//! Math-expression evaluation: named variables, user-defined functions
//! expanded by textual substitution, and a `meval` backend for the final
//! arithmetic.

use std::collections::HashMap;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExprError {
    #[error("mismatched parentheses in expression")]
    MismatchedParens,
    #[error("function not found: {0}")]
    UnknownFunction(String),
    #[error("evaluation failed: {0}")]
    Eval(String),
}

/// Named numeric variables, global or per-scope. Scoped values shadow
/// globals of the same name.
#[derive(Debug, Default)]
pub struct VariableManager {
    globals: HashMap<String, f64>,
    scoped: HashMap<String, HashMap<String, f64>>,
}

impl VariableManager {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, name: impl Into<String>, value: f64) {
        self.globals.insert(name.into(), value);
    }

    pub fn set_scoped(&mut self, scope: impl Into<String>, name: impl Into<String>, value: f64) {
        self.scoped
            .entry(scope.into())
            .or_default()
            .insert(name.into(), value);
    }

    #[must_use]
    pub fn value(&self, name: &str, scope: Option<&str>) -> Option<f64> {
        if let Some(scope) = scope {
            if let Some(value) = self.scoped.get(scope).and_then(|vars| vars.get(name)) {
                return Some(*value);
            }
        }
        self.globals.get(name).copied()
    }

    /// Every binding visible from `scope`, scoped values last so they win.
    #[must_use]
    pub fn snapshot(&self, scope: Option<&str>) -> Vec<(String, f64)> {
        let mut bindings: Vec<(String, f64)> =
            self.globals.iter().map(|(k, v)| (k.clone(), *v)).collect();
        if let Some(vars) = scope.and_then(|s| self.scoped.get(s)) {
            bindings.extend(vars.iter().map(|(k, v)| (k.clone(), *v)));
        }
        bindings
    }
}

/// A user-defined function: parameter names plus a body expression that
/// may reference parameters, variables, and other functions.
#[derive(Debug, Clone)]
pub struct MathFunction {
    pub params: Vec<String>,
    pub body: String,
}

impl MathFunction {
    #[must_use]
    pub fn new(params: Vec<String>, body: impl Into<String>) -> Self {
        Self {
            params,
            body: body.into(),
        }
    }
}

/// Registered functions, global or per-scope.
#[derive(Debug, Default)]
pub struct FunctionManager {
    globals: HashMap<String, MathFunction>,
    scoped: HashMap<String, HashMap<String, MathFunction>>,
}

impl FunctionManager {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn define(&mut self, name: impl Into<String>, function: MathFunction) {
        self.globals.insert(name.into(), function);
    }

    pub fn define_scoped(
        &mut self,
        scope: impl Into<String>,
        name: impl Into<String>,
        function: MathFunction,
    ) {
        self.scoped
            .entry(scope.into())
            .or_default()
            .insert(name.into(), function);
    }

    #[must_use]
    pub fn function(&self, name: &str, scope: Option<&str>) -> Option<&MathFunction> {
        if let Some(scope) = scope {
            if let Some(function) = self.scoped.get(scope).and_then(|fns| fns.get(name)) {
                return Some(function);
            }
        }
        self.globals.get(name)
    }
}

/// Expands `name(args…)` calls to user-defined functions by textual
/// substitution, innermost first, leaving a plain arithmetic string.
///
/// While a function body is being expanded its parameters are carried
/// as local bindings, so bodies may reference parameters inside nested
/// calls.
pub struct FunctionParser<'a> {
    functions: &'a FunctionManager,
    variables: &'a VariableManager,
    scope: Option<&'a str>,
    locals: HashMap<String, f64>,
}

impl<'a> FunctionParser<'a> {
    #[must_use]
    pub fn new(
        functions: &'a FunctionManager,
        variables: &'a VariableManager,
        scope: Option<&'a str>,
    ) -> Self {
        Self {
            functions,
            variables,
            scope,
            locals: HashMap::new(),
        }
    }

    /// Replace every known-function call in `input` with its numeric
    /// result. Identifiers that are not followed by `(` (variables) and
    /// calls to unknown names pass through untouched so the arithmetic
    /// backend can resolve them.
    pub fn parse_and_evaluate(&self, input: &str) -> Result<String, ExprError> {
        let chars: Vec<char> = input.chars().collect();
        let mut out = String::with_capacity(input.len());
        let mut i = 0;
        while i < chars.len() {
            if chars[i].is_alphabetic() {
                let start = i;
                while i < chars.len() && (chars[i].is_alphanumeric() || chars[i] == '_') {
                    i += 1;
                }
                let name: String = chars[start..i].iter().collect();

                if i < chars.len() && chars[i] == '(' {
                    if self.functions.function(&name, self.scope).is_none() {
                        // Built-in like sin(); leave the call in place.
                        out.push_str(&name);
                        out.push('(');
                        i += 1;
                        continue;
                    }
                    let open = i;
                    let close = find_matching_paren(&chars, open)
                        .ok_or(ExprError::MismatchedParens)?;
                    let args_str: String = chars[open + 1..close].iter().collect();

                    let mut evaluated_args = Vec::new();
                    if !args_str.trim().is_empty() {
                        for raw_arg in split_args(&args_str) {
                            let expanded = self.parse_and_evaluate(&raw_arg)?;
                            evaluated_args.push(self.eval_arithmetic(&expanded)?);
                        }
                    }

                    let function = self
                        .functions
                        .function(&name, self.scope)
                        .ok_or_else(|| ExprError::UnknownFunction(name.clone()))?
                        .clone();
                    let result = self.call(&function, &evaluated_args)?;
                    out.push_str(&format_number(result));
                    i = close + 1;
                } else {
                    out.push_str(&name);
                }
            } else {
                out.push(chars[i]);
                i += 1;
            }
        }
        Ok(out)
    }

    fn call(&self, function: &MathFunction, args: &[f64]) -> Result<f64, ExprError> {
        let mut locals = self.locals.clone();
        for (param, value) in function.params.iter().zip(args) {
            locals.insert(param.clone(), *value);
        }
        let body_parser = FunctionParser {
            functions: self.functions,
            variables: self.variables,
            scope: self.scope,
            locals,
        };
        let body = body_parser.parse_and_evaluate(&function.body)?;
        body_parser.eval_arithmetic(&body)
    }

    fn eval_arithmetic(&self, expr: &str) -> Result<f64, ExprError> {
        let mut context = meval::Context::new();
        for (name, value) in self.variables.snapshot(self.scope) {
            context.var(name, value);
        }
        for (name, value) in &self.locals {
            context.var(name.clone(), *value);
        }
        meval::eval_str_with_context(expr, &context).map_err(|e| ExprError::Eval(e.to_string()))
    }
}

/// Evaluates raw expression strings against managed variables and
/// functions. Failures yield `NaN`, matching how effect configs treat a
/// broken formula as "no value" rather than an abort.
#[derive(Debug, Default)]
pub struct ExpressionEvaluator {
    pub variables: VariableManager,
    pub functions: FunctionManager,
}

impl ExpressionEvaluator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Evaluate with global scope only.
    #[must_use]
    pub fn eval_raw(&self, raw: &str) -> f64 {
        self.eval(raw, None)
    }

    /// Evaluate with an optional scope for local variables and functions.
    #[must_use]
    pub fn eval(&self, raw: &str, scope: Option<&str>) -> f64 {
        match self.try_eval(raw, scope) {
            Ok(value) => value,
            Err(e) => {
                log::warn!("prism_util: expression '{raw}' failed: {e}");
                f64::NAN
            }
        }
    }

    pub fn try_eval(&self, raw: &str, scope: Option<&str>) -> Result<f64, ExprError> {
        let parser = FunctionParser::new(&self.functions, &self.variables, scope);
        let expanded = parser.parse_and_evaluate(raw)?;
        parser.eval_arithmetic(&expanded)
    }
}

fn find_matching_paren(chars: &[char], open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (i, c) in chars.iter().enumerate().skip(open) {
        match c {
            '(' => depth += 1,
            ')' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

fn split_args(args: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut depth = 0usize;
    let mut current = String::new();
    for c in args.chars() {
        match c {
            ',' if depth == 0 => {
                out.push(current.trim().to_string());
                current.clear();
            }
            '(' => {
                depth += 1;
                current.push(c);
            }
            ')' => {
                depth = depth.saturating_sub(1);
                current.push(c);
            }
            _ => current.push(c),
        }
    }
    out.push(current.trim().to_string());
    out
}

fn format_number(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else {
        // Plain decimal so the arithmetic backend can re-parse it.
        format!("{value:.10}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_arithmetic() {
        let evaluator = ExpressionEvaluator::new();
        assert!((evaluator.eval_raw("2 + 3 * 4") - 14.0).abs() < 1e-9);
    }

    #[test]
    fn variables_resolve_with_scope_shadowing() {
        let mut evaluator = ExpressionEvaluator::new();
        evaluator.variables.set("power", 2.0);
        evaluator.variables.set_scoped("boss_fight", "power", 10.0);

        assert!((evaluator.eval("power * 3", None) - 6.0).abs() < 1e-9);
        assert!((evaluator.eval("power * 3", Some("boss_fight")) - 30.0).abs() < 1e-9);
    }

    #[test]
    fn custom_functions_expand_recursively() {
        let mut evaluator = ExpressionEvaluator::new();
        evaluator
            .functions
            .define("double", MathFunction::new(vec!["x".into()], "x * 2"));
        evaluator.functions.define(
            "quad",
            MathFunction::new(vec!["x".into()], "double(double(x))"),
        );

        assert!((evaluator.eval_raw("quad(3)") - 12.0).abs() < 1e-6);
        assert!((evaluator.eval_raw("1 + double(2 + 3)") - 11.0).abs() < 1e-6);
    }

    #[test]
    fn builtins_pass_through() {
        let evaluator = ExpressionEvaluator::new();
        assert!((evaluator.eval_raw("sin(0)") - 0.0).abs() < 1e-9);
    }

    #[test]
    fn failures_become_nan() {
        let evaluator = ExpressionEvaluator::new();
        assert!(evaluator.eval_raw("2 +").is_nan());
        assert!(evaluator.eval_raw("missing_fn(").is_nan());
    }
}
