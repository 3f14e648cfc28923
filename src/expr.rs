//! Algebraic expression trees and the expression parser.
//!
//! Equations are parsed once, at submission time, into a typed [`Expr`]
//! tree over the two free variables `x` and `y`. Evaluation then walks
//! the tree numerically per sample; no text is ever re-parsed on the
//! render path.
//!
//! # Grammar
//!
//! ```text
//! expr   := term (('+' | '-') term)*
//! term   := unary (('*' | '/') unary)*
//! unary  := '-' unary | power
//! power  := atom (('^' | '**') unary)?        (right-associative)
//! atom   := number | 'x' | 'y' | 'pi' | 'e'
//!         | func '(' expr ')' | '(' expr ')'
//! ```
//!
//! Unary minus binds looser than exponentiation, so `-x^2` is
//! `-(x^2)`. Input is case-insensitive and whitespace-insignificant.
//! There is no implicit multiplication: `2x` is rejected.

use std::fmt;

use crate::error::{Error, Result};

/// One of the two recognized free variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variable {
    /// The independent variable.
    X,
    /// The dependent variable.
    Y,
}

impl Variable {
    /// The variable's source-text name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Variable::X => "x",
            Variable::Y => "y",
        }
    }
}

/// An elementary function recognized by the parser and evaluator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Func {
    /// Square root.
    Sqrt,
    /// Natural logarithm.
    Log,
    /// Sine (radians).
    Sin,
    /// Cosine (radians).
    Cos,
    /// Tangent (radians).
    Tan,
    /// Hyperbolic sine.
    Sinh,
    /// Hyperbolic cosine.
    Cosh,
    /// Hyperbolic tangent.
    Tanh,
}

impl Func {
    fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "sqrt" => Func::Sqrt,
            "log" => Func::Log,
            "sin" => Func::Sin,
            "cos" => Func::Cos,
            "tan" => Func::Tan,
            "sinh" => Func::Sinh,
            "cosh" => Func::Cosh,
            "tanh" => Func::Tanh,
            _ => return None,
        })
    }

    /// The function's source-text name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Func::Sqrt => "sqrt",
            Func::Log => "log",
            Func::Sin => "sin",
            Func::Cos => "cos",
            Func::Tan => "tan",
            Func::Sinh => "sinh",
            Func::Cosh => "cosh",
            Func::Tanh => "tanh",
        }
    }
}

/// A symbolic expression over `x` and `y`.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A numeric literal (also `pi` and `e`).
    Number(f64),
    /// A free variable.
    Var(Variable),
    /// Sum of two subexpressions.
    Add(Box<Expr>, Box<Expr>),
    /// Difference of two subexpressions.
    Sub(Box<Expr>, Box<Expr>),
    /// Product of two subexpressions.
    Mul(Box<Expr>, Box<Expr>),
    /// Quotient of two subexpressions.
    Div(Box<Expr>, Box<Expr>),
    /// Left raised to the right.
    Pow(Box<Expr>, Box<Expr>),
    /// Unary negation.
    Neg(Box<Expr>),
    /// An elementary function applied to an argument.
    Call(Func, Box<Expr>),
}

impl Expr {
    /// Whether the given variable occurs anywhere in the tree.
    #[must_use]
    pub fn contains(&self, var: Variable) -> bool {
        match self {
            Expr::Number(_) => false,
            Expr::Var(v) => *v == var,
            Expr::Add(a, b) | Expr::Sub(a, b) | Expr::Mul(a, b) | Expr::Div(a, b)
            | Expr::Pow(a, b) => a.contains(var) || b.contains(var),
            Expr::Neg(a) | Expr::Call(_, a) => a.contains(var),
        }
    }

    pub(crate) fn is_zero(&self) -> bool {
        matches!(self, Expr::Number(n) if *n == 0.0)
    }

    fn is_one(&self) -> bool {
        matches!(self, Expr::Number(n) if *n == 1.0)
    }

    /// Sum with constant folding and `+0` elision.
    #[must_use]
    pub fn add(a: Expr, b: Expr) -> Expr {
        match (&a, &b) {
            (Expr::Number(x), Expr::Number(y)) => Expr::Number(x + y),
            _ if a.is_zero() => b,
            _ if b.is_zero() => a,
            _ => Expr::Add(Box::new(a), Box::new(b)),
        }
    }

    /// Difference with constant folding and `-0` elision.
    #[must_use]
    pub fn sub(a: Expr, b: Expr) -> Expr {
        match (&a, &b) {
            (Expr::Number(x), Expr::Number(y)) => Expr::Number(x - y),
            _ if b.is_zero() => a,
            _ if a.is_zero() => Expr::neg(b),
            _ => Expr::Sub(Box::new(a), Box::new(b)),
        }
    }

    /// Product with constant folding and `*0`/`*1` elision.
    #[must_use]
    pub fn mul(a: Expr, b: Expr) -> Expr {
        match (&a, &b) {
            (Expr::Number(x), Expr::Number(y)) => Expr::Number(x * y),
            _ if a.is_zero() || b.is_zero() => Expr::Number(0.0),
            _ if a.is_one() => b,
            _ if b.is_one() => a,
            _ => Expr::Mul(Box::new(a), Box::new(b)),
        }
    }

    /// Quotient with `/1` elision; never folds a zero denominator.
    #[must_use]
    pub fn div(a: Expr, b: Expr) -> Expr {
        match (&a, &b) {
            (Expr::Number(x), Expr::Number(y)) if *y != 0.0 => Expr::Number(x / y),
            _ if b.is_one() => a,
            _ if a.is_zero() && !b.is_zero() => Expr::Number(0.0),
            _ => Expr::Div(Box::new(a), Box::new(b)),
        }
    }

    /// Power with `^1` elision.
    #[must_use]
    pub fn pow(a: Expr, b: Expr) -> Expr {
        match (&a, &b) {
            _ if b.is_one() => a,
            _ => Expr::Pow(Box::new(a), Box::new(b)),
        }
    }

    /// Negation with constant folding and double-negation removal.
    #[must_use]
    pub fn neg(a: Expr) -> Expr {
        match a {
            Expr::Number(n) => Expr::Number(-n),
            Expr::Neg(inner) => *inner,
            _ => Expr::Neg(Box::new(a)),
        }
    }

    /// Function application.
    #[must_use]
    pub fn call(func: Func, arg: Expr) -> Expr {
        Expr::Call(func, Box::new(arg))
    }

    /// Parse an expression from source text.
    ///
    /// Used for each side of an equality; see [`crate::relation`].
    pub fn parse(source: &str) -> Result<Expr> {
        let tokens = tokenize(source)?;
        if tokens.is_empty() {
            return Err(Error::malformed("empty expression"));
        }
        let mut parser = Parser { tokens, pos: 0 };
        let expr = parser.parse_expr()?;
        if parser.pos != parser.tokens.len() {
            return Err(Error::malformed(format!(
                "unexpected trailing input in '{source}'"
            )));
        }
        Ok(expr)
    }

    fn precedence(&self) -> u8 {
        match self {
            Expr::Add(..) | Expr::Sub(..) => 1,
            Expr::Mul(..) | Expr::Div(..) => 2,
            Expr::Neg(_) => 3,
            Expr::Pow(..) => 4,
            Expr::Number(_) | Expr::Var(_) | Expr::Call(..) => 5,
        }
    }

    fn fmt_prec(&self, f: &mut fmt::Formatter<'_>, min: u8) -> fmt::Result {
        let prec = self.precedence();
        if prec < min {
            write!(f, "(")?;
        }
        match self {
            Expr::Number(n) => write!(f, "{n}")?,
            Expr::Var(v) => write!(f, "{}", v.name())?,
            Expr::Add(a, b) => {
                a.fmt_prec(f, 1)?;
                write!(f, " + ")?;
                b.fmt_prec(f, 2)?;
            }
            Expr::Sub(a, b) => {
                a.fmt_prec(f, 1)?;
                write!(f, " - ")?;
                b.fmt_prec(f, 2)?;
            }
            Expr::Mul(a, b) => {
                a.fmt_prec(f, 2)?;
                write!(f, "*")?;
                b.fmt_prec(f, 3)?;
            }
            Expr::Div(a, b) => {
                a.fmt_prec(f, 2)?;
                write!(f, "/")?;
                b.fmt_prec(f, 3)?;
            }
            Expr::Neg(a) => {
                write!(f, "-")?;
                a.fmt_prec(f, 3)?;
            }
            Expr::Pow(a, b) => {
                a.fmt_prec(f, 5)?;
                write!(f, "^")?;
                b.fmt_prec(f, 4)?;
            }
            Expr::Call(func, arg) => {
                write!(f, "{}(", func.name())?;
                arg.fmt_prec(f, 0)?;
                write!(f, ")")?;
            }
        }
        if prec < min {
            write!(f, ")")?;
        }
        Ok(())
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_prec(f, 0)
    }
}

// ============================================================================
// Tokenizer
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Number(f64),
    Ident(String),
    Plus,
    Minus,
    Star,
    Slash,
    Caret,
    LParen,
    RParen,
}

fn tokenize(source: &str) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();
    let chars: Vec<char> = source.chars().collect();
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        match c {
            ' ' | '\t' | '\n' | '\r' => i += 1,
            '+' => {
                tokens.push(Token::Plus);
                i += 1;
            }
            '-' => {
                tokens.push(Token::Minus);
                i += 1;
            }
            '*' => {
                // sympy-style '**' is exponentiation
                if chars.get(i + 1) == Some(&'*') {
                    tokens.push(Token::Caret);
                    i += 2;
                } else {
                    tokens.push(Token::Star);
                    i += 1;
                }
            }
            '/' => {
                tokens.push(Token::Slash);
                i += 1;
            }
            '^' => {
                tokens.push(Token::Caret);
                i += 1;
            }
            '(' => {
                tokens.push(Token::LParen);
                i += 1;
            }
            ')' => {
                tokens.push(Token::RParen);
                i += 1;
            }
            '0'..='9' | '.' => {
                let start = i;
                while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                    i += 1;
                }
                let text: String = chars[start..i].iter().collect();
                let value = text
                    .parse::<f64>()
                    .map_err(|_| Error::malformed(format!("invalid number '{text}'")))?;
                tokens.push(Token::Number(value));
            }
            c if c.is_ascii_alphabetic() => {
                let start = i;
                while i < chars.len() && chars[i].is_ascii_alphanumeric() {
                    i += 1;
                }
                let text: String = chars[start..i].iter().collect();
                tokens.push(Token::Ident(text.to_ascii_lowercase()));
            }
            other => {
                return Err(Error::malformed(format!("unexpected character '{other}'")));
            }
        }
    }
    Ok(tokens)
}

// ============================================================================
// Parser
// ============================================================================

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn bump(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn eat(&mut self, token: &Token) -> bool {
        if self.peek() == Some(token) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn parse_expr(&mut self) -> Result<Expr> {
        let mut lhs = self.parse_term()?;
        loop {
            if self.eat(&Token::Plus) {
                let rhs = self.parse_term()?;
                lhs = Expr::Add(Box::new(lhs), Box::new(rhs));
            } else if self.eat(&Token::Minus) {
                let rhs = self.parse_term()?;
                lhs = Expr::Sub(Box::new(lhs), Box::new(rhs));
            } else {
                return Ok(lhs);
            }
        }
    }

    fn parse_term(&mut self) -> Result<Expr> {
        let mut lhs = self.parse_unary()?;
        loop {
            if self.eat(&Token::Star) {
                let rhs = self.parse_unary()?;
                lhs = Expr::Mul(Box::new(lhs), Box::new(rhs));
            } else if self.eat(&Token::Slash) {
                let rhs = self.parse_unary()?;
                lhs = Expr::Div(Box::new(lhs), Box::new(rhs));
            } else {
                return Ok(lhs);
            }
        }
    }

    fn parse_unary(&mut self) -> Result<Expr> {
        if self.eat(&Token::Minus) {
            let inner = self.parse_unary()?;
            Ok(Expr::Neg(Box::new(inner)))
        } else {
            self.parse_power()
        }
    }

    fn parse_power(&mut self) -> Result<Expr> {
        let base = self.parse_atom()?;
        if self.eat(&Token::Caret) {
            // Right-associative; the exponent may carry its own sign.
            let exponent = self.parse_unary()?;
            Ok(Expr::Pow(Box::new(base), Box::new(exponent)))
        } else {
            Ok(base)
        }
    }

    fn parse_atom(&mut self) -> Result<Expr> {
        match self.bump() {
            Some(Token::Number(n)) => Ok(Expr::Number(n)),
            Some(Token::Ident(name)) => match name.as_str() {
                "x" => Ok(Expr::Var(Variable::X)),
                "y" => Ok(Expr::Var(Variable::Y)),
                "pi" => Ok(Expr::Number(std::f64::consts::PI)),
                "e" => Ok(Expr::Number(std::f64::consts::E)),
                _ => {
                    if let Some(func) = Func::from_name(&name) {
                        if !self.eat(&Token::LParen) {
                            return Err(Error::malformed(format!(
                                "function '{name}' requires parentheses"
                            )));
                        }
                        let arg = self.parse_expr()?;
                        if !self.eat(&Token::RParen) {
                            return Err(Error::malformed(format!(
                                "unclosed argument to '{name}'"
                            )));
                        }
                        Ok(Expr::Call(func, Box::new(arg)))
                    } else {
                        Err(Error::malformed(format!("unknown symbol '{name}'")))
                    }
                }
            },
            Some(Token::LParen) => {
                let inner = self.parse_expr()?;
                if !self.eat(&Token::RParen) {
                    return Err(Error::malformed("unbalanced parentheses"));
                }
                Ok(inner)
            }
            Some(token) => Err(Error::malformed(format!("unexpected token {token:?}"))),
            None => Err(Error::malformed("unexpected end of expression")),
        }
    }
}
