//! Numeric evaluation of expressions at a sample point.
//!
//! Evaluation never panics for ordinary domain violations; those are
//! part of the result taxonomy. Division by zero and poles are
//! [`EvalResult::Undefined`]; results that would carry an imaginary
//! component (even roots or logs of negatives) are
//! [`EvalResult::NonReal`] and are discarded by the renderer. The two
//! are deliberately distinct: an `Undefined` gap is a true
//! discontinuity, a `NonReal` stretch means the curve leaves the real
//! plane.

use crate::expr::{Expr, Func, Variable};

/// Outcome of evaluating a branch at a single x.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EvalResult {
    /// A finite real value.
    Value(f64),
    /// Division by zero, a pole, or a non-finite intermediate.
    Undefined,
    /// The result has a non-zero imaginary component; never plotted.
    NonReal,
}

impl EvalResult {
    /// The contained value, if this is a [`EvalResult::Value`].
    #[must_use]
    pub fn value(self) -> Option<f64> {
        match self {
            EvalResult::Value(v) => Some(v),
            _ => None,
        }
    }
}

/// Evaluate `expr` with the independent variable bound to `x`.
///
/// Clamping of extreme magnitudes is a rendering concern; any finite
/// real result is a `Value`, however large.
#[must_use]
pub fn evaluate(expr: &Expr, x: f64) -> EvalResult {
    match eval_inner(expr, x) {
        Ok(v) if v.is_finite() => EvalResult::Value(v),
        Ok(_) => EvalResult::Undefined,
        Err(interrupt) => interrupt,
    }
}

/// `Err` carries the early-out classification so it propagates with `?`.
fn eval_inner(expr: &Expr, x: f64) -> Result<f64, EvalResult> {
    match expr {
        Expr::Number(n) => Ok(*n),
        Expr::Var(Variable::X) => Ok(x),
        // A solved branch is a pure function of x; a stray y means the
        // solver let something through it should not have.
        Expr::Var(Variable::Y) => Err(EvalResult::Undefined),
        Expr::Add(a, b) => Ok(eval_inner(a, x)? + eval_inner(b, x)?),
        Expr::Sub(a, b) => Ok(eval_inner(a, x)? - eval_inner(b, x)?),
        Expr::Mul(a, b) => Ok(eval_inner(a, x)? * eval_inner(b, x)?),
        Expr::Div(a, b) => {
            let denominator = eval_inner(b, x)?;
            if denominator == 0.0 {
                return Err(EvalResult::Undefined);
            }
            Ok(eval_inner(a, x)? / denominator)
        }
        Expr::Pow(a, b) => {
            let base = eval_inner(a, x)?;
            let exponent = eval_inner(b, x)?;
            pow_real(base, exponent)
        }
        Expr::Neg(a) => Ok(-eval_inner(a, x)?),
        Expr::Call(func, arg) => {
            let v = eval_inner(arg, x)?;
            match func {
                Func::Sqrt => {
                    if v < 0.0 {
                        Err(EvalResult::NonReal)
                    } else {
                        Ok(v.sqrt())
                    }
                }
                Func::Log => {
                    if v < 0.0 {
                        Err(EvalResult::NonReal)
                    } else if v == 0.0 {
                        Err(EvalResult::Undefined)
                    } else {
                        Ok(v.ln())
                    }
                }
                Func::Sin => Ok(v.sin()),
                Func::Cos => Ok(v.cos()),
                Func::Tan => Ok(v.tan()),
                Func::Sinh => Ok(v.sinh()),
                Func::Cosh => Ok(v.cosh()),
                Func::Tanh => Ok(v.tanh()),
            }
        }
    }
}

/// Real-valued exponentiation with the taxonomy applied.
fn pow_real(base: f64, exponent: f64) -> Result<f64, EvalResult> {
    if base == 0.0 && exponent < 0.0 {
        return Err(EvalResult::Undefined);
    }
    // A negative base with a fractional exponent has no real value.
    if base < 0.0 && exponent.fract() != 0.0 {
        return Err(EvalResult::NonReal);
    }
    Ok(base.powf(exponent))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn eval_str(source: &str, x: f64) -> EvalResult {
        evaluate(&Expr::parse(source).unwrap(), x)
    }

    #[test]
    fn test_polynomial() {
        assert_eq!(eval_str("x^2 + 1", 2.0), EvalResult::Value(5.0));
        assert_eq!(eval_str("-x^2", 3.0), EvalResult::Value(-9.0));
    }

    #[test]
    fn test_division_by_zero_is_undefined() {
        assert_eq!(eval_str("1/x", 0.0), EvalResult::Undefined);
        assert_eq!(eval_str("1/x", 2.0), EvalResult::Value(0.5));
    }

    #[test]
    fn test_sqrt_of_negative_is_nonreal() {
        assert_eq!(eval_str("sqrt(4 - x^2)", 3.0), EvalResult::NonReal);
        assert_eq!(eval_str("sqrt(4 - x^2)", 0.0), EvalResult::Value(2.0));
    }

    #[test]
    fn test_log_pole_vs_nonreal() {
        assert_eq!(eval_str("log(x)", 0.0), EvalResult::Undefined);
        assert_eq!(eval_str("log(x)", -1.0), EvalResult::NonReal);
        let v = eval_str("log(x)", std::f64::consts::E).value().unwrap();
        assert_relative_eq!(v, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_fractional_power_of_negative_is_nonreal() {
        assert_eq!(eval_str("x^0.5", -4.0), EvalResult::NonReal);
        assert_eq!(eval_str("x^0.5", 4.0), EvalResult::Value(2.0));
    }

    #[test]
    fn test_zero_to_negative_power_is_undefined() {
        assert_eq!(eval_str("x^-1", 0.0), EvalResult::Undefined);
    }

    #[test]
    fn test_integer_power_of_negative_ok() {
        assert_eq!(eval_str("x^3", -2.0), EvalResult::Value(-8.0));
    }

    #[test]
    fn test_trig_in_radians() {
        let v = eval_str("sin(x)", std::f64::consts::FRAC_PI_2)
            .value()
            .unwrap();
        assert_relative_eq!(v, 1.0, epsilon = 1e-12);
        let v = eval_str("tanh(x)", 0.0).value().unwrap();
        assert_relative_eq!(v, 0.0);
    }

    #[test]
    fn test_overflow_is_undefined() {
        // cosh overflows to +inf well before x = 1000
        assert_eq!(eval_str("cosh(x)", 1000.0), EvalResult::Undefined);
    }

    #[test]
    fn test_large_finite_value_is_still_a_value() {
        // Clamping is the renderer's job, not the evaluator's.
        match eval_str("1/x", 1e-8) {
            EvalResult::Value(v) => assert!(v > 1e7),
            other => panic!("expected a value, got {other:?}"),
        }
    }

    #[test]
    fn test_stray_dependent_variable_is_undefined() {
        assert_eq!(eval_str("y + 1", 0.0), EvalResult::Undefined);
    }
}
