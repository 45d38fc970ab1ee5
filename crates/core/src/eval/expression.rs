//! Free-form arithmetic expressions over named variables.
//!
//! Supported syntax:
//! - numbers: `12`, `0.5`, `.5`, `1e6`, `2.5E-3`
//! - variables: `users__world__count`
//! - operators: `+ - * / %`, power `**` (or `^`), unary `+`/`-`, parentheses
//! - functions: `sqrt(x)`, `abs(x)`, `pow(a, b)`, `round(x)`, `round(x, n)`,
//!   `min(a, ...)`, `max(a, ...)`
//!
//! Power is right-associative and binds tighter than a unary minus on its
//! left, so `-2 ** 2` is `-4`.

use thiserror::Error;

use crate::namespace::Namespace;

#[derive(Debug, Error, PartialEq)]
pub enum ExprError {
    #[error("unexpected character '{ch}' at position {pos}")]
    UnexpectedChar { ch: char, pos: usize },

    #[error("invalid number '{0}'")]
    InvalidNumber(String),

    #[error("unexpected end of expression")]
    UnexpectedEnd,

    #[error("unexpected '{token}' at position {pos}")]
    UnexpectedToken { token: String, pos: usize },

    #[error("name '{0}' is not defined")]
    UnknownVariable(String),

    #[error("name '{0}' has no value")]
    NoValue(String),

    #[error("unknown function '{0}'")]
    UnknownFunction(String),

    #[error("{name}() takes {expected} argument(s), got {got}")]
    Arity { name: String, expected: &'static str, got: usize },

    #[error("division by zero")]
    DivisionByZero,

    #[error("square root of negative number {0}")]
    NegativeSqrt(f64),

    #[error("result is not a finite number")]
    NonFinite,
}

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Pow,
}

impl BinOp {
    /// Left and right binding power.
    fn binding_power(self) -> (u8, u8) {
        match self {
            BinOp::Add | BinOp::Sub => (1, 2),
            BinOp::Mul | BinOp::Div | BinOp::Rem => (3, 4),
            BinOp::Pow => (7, 6),
        }
    }
}

const UNARY_BP: u8 = 5;

/// Parsed expression tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number(f64),
    Var(String),
    Neg(Box<Expr>),
    Binary { op: BinOp, lhs: Box<Expr>, rhs: Box<Expr> },
    Call { name: String, args: Vec<Expr> },
}

impl Expr {
    /// Variable names referenced by the expression, in order of appearance.
    pub fn variables(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_vars(&mut out);
        out
    }

    fn collect_vars<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Expr::Number(_) => {}
            Expr::Var(name) => {
                if !out.contains(&name.as_str()) {
                    out.push(name);
                }
            }
            Expr::Neg(inner) => inner.collect_vars(out),
            Expr::Binary { lhs, rhs, .. } => {
                lhs.collect_vars(out);
                rhs.collect_vars(out);
            }
            Expr::Call { args, .. } => args.iter().for_each(|a| a.collect_vars(out)),
        }
    }

    /// Evaluate against `vars`. Unlike operation pipelines, every problem
    /// is an error.
    pub fn evaluate(&self, vars: &Namespace) -> Result<f64, ExprError> {
        let value = self.eval_inner(vars)?;
        if value.is_finite() { Ok(value) } else { Err(ExprError::NonFinite) }
    }

    fn eval_inner(&self, vars: &Namespace) -> Result<f64, ExprError> {
        match self {
            Expr::Number(n) => Ok(*n),
            Expr::Var(name) => match vars.binding(name) {
                Some(Some(v)) => Ok(v),
                Some(None) => Err(ExprError::NoValue(name.clone())),
                None => Err(ExprError::UnknownVariable(name.clone())),
            },
            Expr::Neg(inner) => Ok(-inner.eval_inner(vars)?),
            Expr::Binary { op, lhs, rhs } => {
                let (a, b) = (lhs.eval_inner(vars)?, rhs.eval_inner(vars)?);
                match op {
                    BinOp::Add => Ok(a + b),
                    BinOp::Sub => Ok(a - b),
                    BinOp::Mul => Ok(a * b),
                    BinOp::Div if b == 0.0 => Err(ExprError::DivisionByZero),
                    BinOp::Div => Ok(a / b),
                    BinOp::Rem if b == 0.0 => Err(ExprError::DivisionByZero),
                    // Result takes the sign of the divisor.
                    BinOp::Rem => Ok(a - b * (a / b).floor()),
                    BinOp::Pow if a == 0.0 && b < 0.0 => Err(ExprError::DivisionByZero),
                    BinOp::Pow => Ok(a.powf(b)),
                }
            }
            Expr::Call { name, args } => {
                let values =
                    args.iter().map(|a| a.eval_inner(vars)).collect::<Result<Vec<_>, _>>()?;
                call(name, &values)
            }
        }
    }
}

fn call(name: &str, args: &[f64]) -> Result<f64, ExprError> {
    let arity = |expected: &'static str| ExprError::Arity {
        name: name.to_string(),
        expected,
        got: args.len(),
    };

    match (name, args) {
        ("sqrt", [x]) if *x < 0.0 => Err(ExprError::NegativeSqrt(*x)),
        ("sqrt", [x]) => Ok(x.sqrt()),
        ("sqrt", _) => Err(arity("1")),
        ("abs", [x]) => Ok(x.abs()),
        ("abs", _) => Err(arity("1")),
        ("pow", [a, b]) => Ok(a.powf(*b)),
        ("pow", _) => Err(arity("2")),
        ("round", [x]) => Ok(round_half_even(*x)),
        ("round", [x, digits]) => {
            let factor = 10f64.powf(digits.trunc());
            Ok(round_half_even(x * factor) / factor)
        }
        ("round", _) => Err(arity("1 or 2")),
        ("min", [first, rest @ ..]) => Ok(rest.iter().copied().fold(*first, f64::min)),
        ("max", [first, rest @ ..]) => Ok(rest.iter().copied().fold(*first, f64::max)),
        ("min" | "max", []) => Err(arity("at least 1")),
        _ => Err(ExprError::UnknownFunction(name.to_string())),
    }
}

fn round_half_even(x: f64) -> f64 {
    let r = x.round();
    if (x - x.trunc()).abs() == 0.5 && r % 2.0 != 0.0 { r - x.signum() } else { r }
}

/// Parse and evaluate in one go.
pub fn evaluate_expression(text: &str, vars: &Namespace) -> Result<f64, ExprError> {
    parse_expression(text)?.evaluate(vars)
}

/// Parse an expression.
pub fn parse_expression(text: &str) -> Result<Expr, ExprError> {
    let tokens = tokenize(text)?;
    let mut parser = Parser { tokens, pos: 0 };
    let expr = parser.expr(0)?;
    match parser.peek() {
        None => Ok(expr),
        Some((tok, pos)) => Err(ExprError::UnexpectedToken { token: tok.to_string(), pos }),
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Number(f64),
    Ident(String),
    Op(BinOp),
    LParen,
    RParen,
    Comma,
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Number(n) => write!(f, "{n}"),
            Token::Ident(s) => write!(f, "{s}"),
            Token::Op(op) => f.write_str(match op {
                BinOp::Add => "+",
                BinOp::Sub => "-",
                BinOp::Mul => "*",
                BinOp::Div => "/",
                BinOp::Rem => "%",
                BinOp::Pow => "**",
            }),
            Token::LParen => f.write_str("("),
            Token::RParen => f.write_str(")"),
            Token::Comma => f.write_str(","),
        }
    }
}

fn tokenize(text: &str) -> Result<Vec<(Token, usize)>, ExprError> {
    let chars: Vec<char> = text.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        let start = i;
        let token = match c {
            c if c.is_whitespace() => {
                i += 1;
                continue;
            }
            '0'..='9' | '.' => {
                while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                    i += 1;
                }
                if i < chars.len() && matches!(chars[i], 'e' | 'E') {
                    let mut j = i + 1;
                    if j < chars.len() && matches!(chars[j], '+' | '-') {
                        j += 1;
                    }
                    if j < chars.len() && chars[j].is_ascii_digit() {
                        while j < chars.len() && chars[j].is_ascii_digit() {
                            j += 1;
                        }
                        i = j;
                    }
                }
                let literal: String = chars[start..i].iter().collect();
                let n = literal.parse().map_err(|_| ExprError::InvalidNumber(literal.clone()))?;
                Token::Number(n)
            }
            c if c.is_ascii_alphabetic() || c == '_' => {
                while i < chars.len() && (chars[i].is_ascii_alphanumeric() || chars[i] == '_') {
                    i += 1;
                }
                Token::Ident(chars[start..i].iter().collect())
            }
            '*' if chars.get(i + 1) == Some(&'*') => {
                i += 2;
                Token::Op(BinOp::Pow)
            }
            _ => {
                i += 1;
                match c {
                    '+' => Token::Op(BinOp::Add),
                    '-' => Token::Op(BinOp::Sub),
                    '*' => Token::Op(BinOp::Mul),
                    '/' => Token::Op(BinOp::Div),
                    '%' => Token::Op(BinOp::Rem),
                    '^' => Token::Op(BinOp::Pow),
                    '(' => Token::LParen,
                    ')' => Token::RParen,
                    ',' => Token::Comma,
                    ch => return Err(ExprError::UnexpectedChar { ch, pos: start }),
                }
            }
        };
        tokens.push((token, start));
    }

    Ok(tokens)
}

struct Parser {
    tokens: Vec<(Token, usize)>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<(&Token, usize)> {
        self.tokens.get(self.pos).map(|(t, p)| (t, *p))
    }

    fn next(&mut self) -> Result<(Token, usize), ExprError> {
        let tok = self.tokens.get(self.pos).cloned().ok_or(ExprError::UnexpectedEnd)?;
        self.pos += 1;
        Ok(tok)
    }

    fn expect(&mut self, expected: &Token) -> Result<(), ExprError> {
        let (tok, pos) = self.next()?;
        if &tok == expected {
            Ok(())
        } else {
            Err(ExprError::UnexpectedToken { token: tok.to_string(), pos })
        }
    }

    fn expr(&mut self, min_bp: u8) -> Result<Expr, ExprError> {
        let mut lhs = self.prefix()?;

        while let Some((Token::Op(op), _)) = self.peek() {
            let op = *op;
            let (l_bp, r_bp) = op.binding_power();
            if l_bp < min_bp {
                break;
            }
            self.pos += 1;
            let rhs = self.expr(r_bp)?;
            lhs = Expr::Binary { op, lhs: Box::new(lhs), rhs: Box::new(rhs) };
        }

        Ok(lhs)
    }

    fn prefix(&mut self) -> Result<Expr, ExprError> {
        let (tok, pos) = self.next()?;
        match tok {
            Token::Number(n) => Ok(Expr::Number(n)),
            Token::Ident(name) => {
                if let Some((Token::LParen, _)) = self.peek() {
                    self.pos += 1;
                    let args = self.call_args()?;
                    Ok(Expr::Call { name, args })
                } else {
                    Ok(Expr::Var(name))
                }
            }
            Token::Op(BinOp::Sub) => Ok(Expr::Neg(Box::new(self.expr(UNARY_BP)?))),
            Token::Op(BinOp::Add) => self.expr(UNARY_BP),
            Token::LParen => {
                let inner = self.expr(0)?;
                self.expect(&Token::RParen)?;
                Ok(inner)
            }
            other => Err(ExprError::UnexpectedToken { token: other.to_string(), pos }),
        }
    }

    fn call_args(&mut self) -> Result<Vec<Expr>, ExprError> {
        let mut args = Vec::new();
        if let Some((Token::RParen, _)) = self.peek() {
            self.pos += 1;
            return Ok(args);
        }
        loop {
            args.push(self.expr(0)?);
            let (tok, pos) = self.next()?;
            match tok {
                Token::Comma => {}
                Token::RParen => return Ok(args),
                other => return Err(ExprError::UnexpectedToken { token: other.to_string(), pos }),
            }
        }
    }
}
