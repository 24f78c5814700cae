//! Linear parameter expressions for parametric circuits.
//!
//! Every angle in a time-evolution template is an affine function of the
//! free parameters:
//!
//!   angle = c₀ + Σ_k c_k · p_k
//!
//! Keeping the expression linear means binding is a single multiply-add per
//! parameter and inversion is a plain negation of every coefficient.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A named free parameter.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Parameter(String);

impl Parameter {
    /// Create a parameter with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Parameter(name.into())
    }

    /// The parameter name.
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An affine combination of parameters plus a constant offset.
///
/// Terms are kept in first-use order and never contain the same parameter
/// twice.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ParameterExpression {
    constant: f64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    terms: Vec<(Parameter, f64)>,
}

impl ParameterExpression {
    /// Create a constant expression.
    pub fn constant(value: f64) -> Self {
        Self {
            constant: value,
            terms: vec![],
        }
    }

    /// Create the expression `1 · name`.
    pub fn symbol(name: impl Into<String>) -> Self {
        Self::linear(Parameter::new(name), 1.0)
    }

    /// Create the expression `coeff · param`.
    pub fn linear(param: Parameter, coeff: f64) -> Self {
        Self {
            constant: 0.0,
            terms: vec![(param, coeff)],
        }
    }

    /// Check if this expression contains any parameters.
    pub fn is_symbolic(&self) -> bool {
        !self.terms.is_empty()
    }

    /// The value of a fully bound expression.
    pub fn as_f64(&self) -> Option<f64> {
        if self.is_symbolic() {
            None
        } else {
            Some(self.constant)
        }
    }

    /// The constant offset c₀.
    pub fn offset(&self) -> f64 {
        self.constant
    }

    /// The coefficient of `name`, or 0 if it does not occur.
    pub fn coefficient(&self, name: &str) -> f64 {
        self.terms
            .iter()
            .find(|(p, _)| p.name() == name)
            .map_or(0.0, |(_, c)| *c)
    }

    /// Parameters referenced by this expression, in first-use order.
    pub fn parameters(&self) -> impl Iterator<Item = &Parameter> {
        self.terms.iter().map(|(p, _)| p)
    }

    /// Substitute `value` for `name`, folding the term into the constant.
    #[must_use]
    pub fn bind(&self, name: &str, value: f64) -> Self {
        let mut constant = self.constant;
        let mut terms = Vec::with_capacity(self.terms.len());
        for (param, coeff) in &self.terms {
            if param.name() == name {
                constant += coeff * value;
            } else {
                terms.push((param.clone(), *coeff));
            }
        }
        Self { constant, terms }
    }

    /// Multiply every coefficient (and the constant) by `factor`.
    #[must_use]
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            constant: self.constant * factor,
            terms: self
                .terms
                .iter()
                .map(|(p, c)| (p.clone(), c * factor))
                .collect(),
        }
    }

    fn add_term(&mut self, param: &Parameter, coeff: f64) {
        match self.terms.iter_mut().find(|(p, _)| p == param) {
            Some((_, c)) => *c += coeff,
            None => self.terms.push((param.clone(), coeff)),
        }
    }
}

impl fmt::Display for ParameterExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.terms.is_empty() {
            return write!(f, "{}", self.constant);
        }
        let mut first = true;
        if self.constant != 0.0 {
            write!(f, "{}", self.constant)?;
            first = false;
        }
        for (param, coeff) in &self.terms {
            if first {
                write!(f, "{coeff}*{param}")?;
                first = false;
            } else if *coeff < 0.0 {
                write!(f, " - {}*{param}", -coeff)?;
            } else {
                write!(f, " + {coeff}*{param}")?;
            }
        }
        Ok(())
    }
}

impl From<f64> for ParameterExpression {
    fn from(value: f64) -> Self {
        ParameterExpression::constant(value)
    }
}

impl From<i32> for ParameterExpression {
    fn from(value: i32) -> Self {
        ParameterExpression::constant(f64::from(value))
    }
}

impl From<Parameter> for ParameterExpression {
    fn from(param: Parameter) -> Self {
        ParameterExpression::linear(param, 1.0)
    }
}

impl std::ops::Add for ParameterExpression {
    type Output = Self;

    fn add(mut self, rhs: Self) -> Self::Output {
        self.constant += rhs.constant;
        for (param, coeff) in &rhs.terms {
            self.add_term(param, *coeff);
        }
        self
    }
}

impl std::ops::Sub for ParameterExpression {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        self + (-rhs)
    }
}

impl std::ops::Mul<f64> for ParameterExpression {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self::Output {
        self.scaled(rhs)
    }
}

impl std::ops::Neg for ParameterExpression {
    type Output = Self;

    fn neg(self) -> Self::Output {
        self.scaled(-1.0)
    }
}
