//! Implicit relations and the branch solver.
//!
//! A [`Relation`] is a normalized equality `lhs = rhs` over `x` and
//! `y`. [`solve_for_y`] rewrites it as a polynomial in `y` and, for
//! degrees one and two, produces explicit [`Branch`] expressions in
//! `x` alone. Relations where `y` has no closed form in that class
//! (absent, inside a function, in a denominator, degree above two)
//! yield an *empty* branch set; that is the normal "nothing plotted"
//! outcome, never an error.
//!
//! The solver seam is a single free function so a full computer
//! algebra system could replace it without touching the rest of the
//! engine.

use std::fmt;

use crate::error::{Error, Result};
use crate::eval::{evaluate, EvalResult};
use crate::expr::{Expr, Variable};

/// A normalized equality between two expressions.
#[derive(Debug, Clone, PartialEq)]
pub struct Relation {
    source: String,
    lhs: Expr,
    rhs: Expr,
}

impl Relation {
    /// Parse a raw equation string into a normalized equality.
    ///
    /// The input must contain exactly one `=` with a valid algebraic
    /// expression on each side. Whitespace is insignificant and
    /// parsing is case-insensitive.
    pub fn parse(raw: &str) -> Result<Relation> {
        let source = raw.trim().to_string();
        let mut sides = source.split('=');
        let (lhs_text, rhs_text) = match (sides.next(), sides.next(), sides.next()) {
            (Some(l), Some(r), None) => (l, r),
            _ => {
                return Err(Error::malformed(
                    "an equation must contain exactly one '='",
                ));
            }
        };
        let lhs = Expr::parse(lhs_text)?;
        let rhs = Expr::parse(rhs_text)?;
        Ok(Relation { source, lhs, rhs })
    }

    /// The user-entered text, trimmed; serves as the display key.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Left-hand side.
    #[must_use]
    pub fn lhs(&self) -> &Expr {
        &self.lhs
    }

    /// Right-hand side.
    #[must_use]
    pub fn rhs(&self) -> &Expr {
        &self.rhs
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.lhs, self.rhs)
    }
}

/// One explicit `y`-branch of a solved relation: a pure function of x.
#[derive(Debug, Clone, PartialEq)]
pub struct Branch {
    expr: Expr,
}

impl Branch {
    /// The branch's expression in `x`.
    #[must_use]
    pub fn expr(&self) -> &Expr {
        &self.expr
    }

    /// Evaluate the branch at `x`.
    #[must_use]
    pub fn eval(&self, x: f64) -> EvalResult {
        evaluate(&self.expr, x)
    }
}

impl fmt::Display for Branch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "y = {}", self.expr)
    }
}

/// Cap on literal exponents expanded during coefficient collection.
/// Anything larger is degree > 2 after expansion anyway.
const MAX_POLY_EXPONENT: f64 = 16.0;

/// Solve a relation for `y`, returning its explicit branches.
///
/// Branch order is deterministic: for a quadratic, the `+sqrt` root
/// comes first (a circle yields its upper semicircle before the
/// lower). An empty vector means the relation has no closed-form
/// solution in this solver's class; [`Error::UnsolvableRelation`] is
/// defensive only and does not occur for parser-accepted input.
pub fn solve_for_y(relation: &Relation) -> Result<Vec<Branch>> {
    // Move everything to one side: lhs - rhs = 0.
    let zeroed = Expr::sub(relation.lhs().clone(), relation.rhs().clone());
    let Some(mut coeffs) = collect_poly_in_y(&zeroed) else {
        return Ok(Vec::new());
    };

    // Drop syntactically zero leading coefficients.
    while coeffs.len() > 1 && coeffs.last().is_some_and(Expr::is_zero) {
        coeffs.pop();
    }

    match coeffs.as_slice() {
        [] => Err(Error::UnsolvableRelation(format!(
            "no coefficients collected from '{}'",
            relation.source()
        ))),
        // y does not occur: nothing to plot.
        [_] => Ok(Vec::new()),
        // B*y + C = 0  =>  y = -C/B
        [c0, c1] => {
            let branch = Expr::div(Expr::neg(c0.clone()), c1.clone());
            Ok(vec![Branch { expr: branch }])
        }
        // A*y^2 + B*y + C = 0  =>  y = (-B ± sqrt(B^2 - 4AC)) / 2A
        [c0, c1, c2] => {
            let discriminant = Expr::sub(
                Expr::mul(c1.clone(), c1.clone()),
                Expr::mul(Expr::Number(4.0), Expr::mul(c2.clone(), c0.clone())),
            );
            let root = Expr::call(crate::expr::Func::Sqrt, discriminant);
            let denominator = Expr::mul(Expr::Number(2.0), c2.clone());
            let plus = Expr::div(
                Expr::add(Expr::neg(c1.clone()), root.clone()),
                denominator.clone(),
            );
            let minus = Expr::div(Expr::sub(Expr::neg(c1.clone()), root), denominator);
            Ok(vec![Branch { expr: plus }, Branch { expr: minus }])
        }
        // Degree three and above: outside the closed-form class.
        _ => Ok(Vec::new()),
    }
}

/// Collect `expr` as a polynomial in `y` with x-expression
/// coefficients, lowest degree first. `None` when `y` occurs in a
/// position that is not polynomial (function argument, denominator,
/// non-literal exponent).
fn collect_poly_in_y(expr: &Expr) -> Option<Vec<Expr>> {
    match expr {
        Expr::Number(_) => Some(vec![expr.clone()]),
        Expr::Var(Variable::X) => Some(vec![expr.clone()]),
        Expr::Var(Variable::Y) => Some(vec![Expr::Number(0.0), Expr::Number(1.0)]),
        Expr::Add(a, b) => {
            let a = collect_poly_in_y(a)?;
            let b = collect_poly_in_y(b)?;
            Some(add_vecs(&a, &b))
        }
        Expr::Sub(a, b) => {
            let a = collect_poly_in_y(a)?;
            let b = collect_poly_in_y(b)?;
            Some(add_vecs(&a, &negate_vec(&b)))
        }
        Expr::Neg(a) => Some(negate_vec(&collect_poly_in_y(a)?)),
        Expr::Mul(a, b) => {
            let a = collect_poly_in_y(a)?;
            let b = collect_poly_in_y(b)?;
            Some(mul_vecs(&a, &b))
        }
        Expr::Div(a, b) => {
            if b.contains(Variable::Y) {
                return None;
            }
            let a = collect_poly_in_y(a)?;
            Some(
                a.into_iter()
                    .map(|coeff| Expr::div(coeff, (**b).clone()))
                    .collect(),
            )
        }
        Expr::Pow(a, b) => {
            if b.contains(Variable::Y) {
                return None;
            }
            if !a.contains(Variable::Y) {
                return Some(vec![expr.clone()]);
            }
            // y somewhere in the base: only literal non-negative
            // integer exponents stay polynomial.
            let Expr::Number(n) = **b else { return None };
            if n < 0.0 || n.fract() != 0.0 || n > MAX_POLY_EXPONENT {
                return None;
            }
            let base = collect_poly_in_y(a)?;
            let mut result = vec![Expr::Number(1.0)];
            for _ in 0..(n as u32) {
                result = mul_vecs(&result, &base);
            }
            Some(result)
        }
        Expr::Call(_, arg) => {
            if arg.contains(Variable::Y) {
                None
            } else {
                Some(vec![expr.clone()])
            }
        }
    }
}

fn add_vecs(a: &[Expr], b: &[Expr]) -> Vec<Expr> {
    let len = a.len().max(b.len());
    (0..len)
        .map(|i| {
            let lhs = a.get(i).cloned().unwrap_or(Expr::Number(0.0));
            let rhs = b.get(i).cloned().unwrap_or(Expr::Number(0.0));
            Expr::add(lhs, rhs)
        })
        .collect()
}

fn negate_vec(a: &[Expr]) -> Vec<Expr> {
    a.iter().map(|coeff| Expr::neg(coeff.clone())).collect()
}

fn mul_vecs(a: &[Expr], b: &[Expr]) -> Vec<Expr> {
    let mut result = vec![Expr::Number(0.0); a.len() + b.len() - 1];
    for (i, left) in a.iter().enumerate() {
        for (j, right) in b.iter().enumerate() {
            let term = Expr::mul(left.clone(), right.clone());
            result[i + j] = Expr::add(result[i + j].clone(), term);
        }
    }
    result
}
