//! Sandboxed expression language for `dy/dx = f(x, y)`.
//!
//! Formulas are parsed once into an [`Ast`] over a fixed grammar and then
//! evaluated per step. Nothing outside the grammar can be reached from user
//! text: there are no assignments, attribute lookups or calls other than the
//! math functions listed below.
//!
//! ```text
//! x, y                          variables
//! pi, e, tau                    constants
//! a + b, a - b                  lowest precedence
//! a * b, a / b, a % b
//! -a, +a
//! a ^ b, a ** b                 right associative, binds tighter than unary minus
//! sin cos tan asin acos atan sinh cosh tanh
//! exp log ln log10 log2 sqrt abs floor ceil
//! atan2(a, b) pow(a, b) min(a, b) max(a, b) hypot(a, b)
//! ```

use std::f64::consts::{E, PI, TAU};
use std::fmt;

use crate::error::EvaluationError;

// ---- Functions ----

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Func {
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Sinh,
    Cosh,
    Tanh,
    Exp,
    Ln,
    Log10,
    Log2,
    Sqrt,
    Abs,
    Floor,
    Ceil,
    Atan2,
    Pow,
    Min,
    Max,
    Hypot,
}

impl Func {
    pub fn from_name(name: &str) -> Option<Func> {
        let f = match name {
            "sin" => Func::Sin,
            "cos" => Func::Cos,
            "tan" => Func::Tan,
            "asin" => Func::Asin,
            "acos" => Func::Acos,
            "atan" => Func::Atan,
            "sinh" => Func::Sinh,
            "cosh" => Func::Cosh,
            "tanh" => Func::Tanh,
            "exp" => Func::Exp,
            "log" | "ln" => Func::Ln,
            "log10" => Func::Log10,
            "log2" => Func::Log2,
            "sqrt" => Func::Sqrt,
            "abs" => Func::Abs,
            "floor" => Func::Floor,
            "ceil" => Func::Ceil,
            "atan2" => Func::Atan2,
            "pow" => Func::Pow,
            "min" => Func::Min,
            "max" => Func::Max,
            "hypot" => Func::Hypot,
            _ => return None,
        };
        Some(f)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Func::Sin => "sin",
            Func::Cos => "cos",
            Func::Tan => "tan",
            Func::Asin => "asin",
            Func::Acos => "acos",
            Func::Atan => "atan",
            Func::Sinh => "sinh",
            Func::Cosh => "cosh",
            Func::Tanh => "tanh",
            Func::Exp => "exp",
            Func::Ln => "log",
            Func::Log10 => "log10",
            Func::Log2 => "log2",
            Func::Sqrt => "sqrt",
            Func::Abs => "abs",
            Func::Floor => "floor",
            Func::Ceil => "ceil",
            Func::Atan2 => "atan2",
            Func::Pow => "pow",
            Func::Min => "min",
            Func::Max => "max",
            Func::Hypot => "hypot",
        }
    }

    pub fn arity(&self) -> usize {
        match self {
            Func::Atan2 | Func::Pow | Func::Min | Func::Max | Func::Hypot => 2,
            _ => 1,
        }
    }

    fn apply(&self, args: &[f64]) -> Result<f64, EvaluationError> {
        let name = self.name();
        let domain = |arg: f64| EvaluationError::Domain { func: name, arg };

        match *args {
            [a] => {
                let v = match self {
                    Func::Sin => a.sin(),
                    Func::Cos => a.cos(),
                    Func::Tan => a.tan(),
                    Func::Asin | Func::Acos if a.abs() > 1.0 => return Err(domain(a)),
                    Func::Asin => a.asin(),
                    Func::Acos => a.acos(),
                    Func::Atan => a.atan(),
                    Func::Sinh => a.sinh(),
                    Func::Cosh => a.cosh(),
                    Func::Tanh => a.tanh(),
                    Func::Exp => a.exp(),
                    Func::Ln | Func::Log10 | Func::Log2 if a <= 0.0 => return Err(domain(a)),
                    Func::Ln => a.ln(),
                    Func::Log10 => a.log10(),
                    Func::Log2 => a.log2(),
                    Func::Sqrt if a < 0.0 => return Err(domain(a)),
                    Func::Sqrt => a.sqrt(),
                    Func::Abs => a.abs(),
                    Func::Floor => a.floor(),
                    Func::Ceil => a.ceil(),
                    _ => unreachable!("arity checked at parse time"),
                };
                check_overflow(name, &[a], v)
            }
            [a, b] => match self {
                Func::Atan2 => Ok(a.atan2(b)),
                Func::Pow => power(a, b),
                Func::Min => Ok(a.min(b)),
                Func::Max => Ok(a.max(b)),
                Func::Hypot => check_overflow(name, &[a, b], a.hypot(b)),
                _ => unreachable!("arity checked at parse time"),
            },
            _ => Err(EvaluationError::WrongArity {
                func: name,
                expected: self.arity(),
                got: args.len(),
            }),
        }
    }
}

fn check_overflow(func: &'static str, args: &[f64], v: f64) -> Result<f64, EvaluationError> {
    if v.is_infinite() && args.iter().all(|a| a.is_finite()) {
        return Err(EvaluationError::Overflow(func));
    }
    Ok(v)
}

fn power(base: f64, exp: f64) -> Result<f64, EvaluationError> {
    if base == 0.0 && exp < 0.0 {
        return Err(EvaluationError::DivisionByZero);
    }
    if base < 0.0 && exp.is_finite() && exp.fract() != 0.0 {
        return Err(EvaluationError::Domain {
            func: "pow",
            arg: base,
        });
    }
    check_overflow("pow", &[base, exp], base.powf(exp))
}

/// Floored modulo: the result takes the sign of the divisor.
fn modulo(a: f64, b: f64) -> Result<f64, EvaluationError> {
    if b == 0.0 {
        return Err(EvaluationError::DivisionByZero);
    }
    let r = a % b;
    if r != 0.0 && (r < 0.0) != (b < 0.0) {
        Ok(r + b)
    } else {
        Ok(r)
    }
}

// ---- Lexer ----

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Number(f64),
    Ident(String),
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Caret,
    LParen,
    RParen,
    Comma,
    Eof,
}

struct Lexer<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Lexer<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn peek_char(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn peek_nth(&self, n: usize) -> Option<char> {
        self.input[self.pos..].chars().nth(n)
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek_char()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn skip_whitespace(&mut self) {
        while self.peek_char().is_some_and(char::is_whitespace) {
            self.bump();
        }
    }

    fn eat_digits(&mut self) {
        while self.peek_char().is_some_and(|c| c.is_ascii_digit()) {
            self.bump();
        }
    }

    fn read_number(&mut self) -> Result<f64, EvaluationError> {
        let start = self.pos;
        self.eat_digits();
        if self.peek_char() == Some('.') {
            self.bump();
            self.eat_digits();
        }
        if matches!(self.peek_char(), Some('e' | 'E')) {
            let exponent_follows = match self.peek_nth(1) {
                Some(c) if c.is_ascii_digit() => true,
                Some('+' | '-') => self.peek_nth(2).is_some_and(|c| c.is_ascii_digit()),
                _ => false,
            };
            if exponent_follows {
                self.bump();
                if matches!(self.peek_char(), Some('+' | '-')) {
                    self.bump();
                }
                self.eat_digits();
            }
        }
        let text = &self.input[start..self.pos];
        text.parse().map_err(|_| EvaluationError::Syntax {
            position: start,
            message: format!("invalid number '{text}'"),
        })
    }

    fn read_ident(&mut self) -> String {
        let start = self.pos;
        while self
            .peek_char()
            .is_some_and(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            self.bump();
        }
        self.input[start..self.pos].to_string()
    }

    /// Returns the next token and the byte offset it starts at.
    fn next_token(&mut self) -> Result<(Token, usize), EvaluationError> {
        self.skip_whitespace();
        let start = self.pos;

        let Some(c) = self.peek_char() else {
            return Ok((Token::Eof, start));
        };

        let token = match c {
            '0'..='9' | '.' => Token::Number(self.read_number()?),
            'a'..='z' | 'A'..='Z' | '_' => Token::Ident(self.read_ident()),
            '*' if self.peek_nth(1) == Some('*') => {
                self.pos += 2;
                Token::Caret
            }
            _ => {
                let single = match c {
                    '+' => Token::Plus,
                    '-' => Token::Minus,
                    '*' => Token::Star,
                    '/' => Token::Slash,
                    '%' => Token::Percent,
                    '^' => Token::Caret,
                    '(' => Token::LParen,
                    ')' => Token::RParen,
                    ',' => Token::Comma,
                    _ => {
                        return Err(EvaluationError::Syntax {
                            position: start,
                            message: format!("unexpected character '{c}'"),
                        });
                    }
                };
                self.bump();
                single
            }
        };
        Ok((token, start))
    }
}

// ---- AST ----

#[derive(Debug, Clone, PartialEq)]
pub enum Ast {
    Num(f64),
    Var(Var),
    Neg(Box<Ast>),
    BinOp(BinOp, Box<Ast>, Box<Ast>),
    Call(Func, Vec<Ast>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Var {
    X,
    Y,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Pow,
}

impl Ast {
    fn eval(&self, x: f64, y: f64) -> Result<f64, EvaluationError> {
        match self {
            Ast::Num(v) => Ok(*v),
            Ast::Var(Var::X) => Ok(x),
            Ast::Var(Var::Y) => Ok(y),
            Ast::Neg(inner) => Ok(-inner.eval(x, y)?),
            Ast::BinOp(op, lhs, rhs) => {
                let a = lhs.eval(x, y)?;
                let b = rhs.eval(x, y)?;
                match op {
                    BinOp::Add => Ok(a + b),
                    BinOp::Sub => Ok(a - b),
                    BinOp::Mul => Ok(a * b),
                    BinOp::Div if b == 0.0 => Err(EvaluationError::DivisionByZero),
                    BinOp::Div => Ok(a / b),
                    BinOp::Rem => modulo(a, b),
                    BinOp::Pow => power(a, b),
                }
            }
            Ast::Call(func, args) => {
                let values = args
                    .iter()
                    .map(|a| a.eval(x, y))
                    .collect::<Result<Vec<_>, _>>()?;
                func.apply(&values)
            }
        }
    }
}

// ---- Parser ----

/// Limit on both parser recursion and the depth of the resulting tree, so
/// that neither parsing nor evaluation can exhaust the stack.
const MAX_DEPTH: usize = 256;

/// A subtree together with its depth.
type Node = (Ast, usize);

struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
    current_pos: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Result<Self, EvaluationError> {
        let mut lexer = Lexer::new(input);
        let (current, current_pos) = lexer.next_token()?;
        Ok(Self {
            lexer,
            current,
            current_pos,
            depth: 0,
        })
    }

    fn advance(&mut self) -> Result<(), EvaluationError> {
        let (token, pos) = self.lexer.next_token()?;
        self.current = token;
        self.current_pos = pos;
        Ok(())
    }

    fn unexpected(&self) -> EvaluationError {
        let message = match &self.current {
            Token::Eof => "unexpected end of expression".to_string(),
            t => format!("unexpected token {t:?}"),
        };
        EvaluationError::Syntax {
            position: self.current_pos,
            message,
        }
    }

    fn too_deep(&self) -> EvaluationError {
        EvaluationError::Syntax {
            position: self.current_pos,
            message: "expression nested too deeply".to_string(),
        }
    }

    fn node(&self, ast: Ast, depth: usize) -> Result<Node, EvaluationError> {
        if depth > MAX_DEPTH {
            return Err(self.too_deep());
        }
        Ok((ast, depth))
    }

    fn binary(&self, op: BinOp, (lhs, ld): Node, (rhs, rd): Node) -> Result<Node, EvaluationError> {
        self.node(Ast::BinOp(op, Box::new(lhs), Box::new(rhs)), 1 + ld.max(rd))
    }

    fn expect(&mut self, expected: Token) -> Result<(), EvaluationError> {
        if self.current == expected {
            self.advance()
        } else {
            Err(self.unexpected())
        }
    }

    fn parse_expr(&mut self) -> Result<Node, EvaluationError> {
        let mut left = self.parse_term()?;
        loop {
            let op = match self.current {
                Token::Plus => BinOp::Add,
                Token::Minus => BinOp::Sub,
                _ => break,
            };
            self.advance()?;
            let right = self.parse_term()?;
            left = self.binary(op, left, right)?;
        }
        Ok(left)
    }

    fn parse_term(&mut self) -> Result<Node, EvaluationError> {
        let mut left = self.parse_unary()?;
        loop {
            let op = match self.current {
                Token::Star => BinOp::Mul,
                Token::Slash => BinOp::Div,
                Token::Percent => BinOp::Rem,
                _ => break,
            };
            self.advance()?;
            let right = self.parse_unary()?;
            left = self.binary(op, left, right)?;
        }
        Ok(left)
    }

    // Every recursive path (sign, exponent, parentheses, call arguments)
    // passes through here, so this is where nesting is counted.
    fn parse_unary(&mut self) -> Result<Node, EvaluationError> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(self.too_deep());
        }
        let result = self.parse_signed();
        self.depth -= 1;
        result
    }

    fn parse_signed(&mut self) -> Result<Node, EvaluationError> {
        match self.current {
            Token::Minus => {
                self.advance()?;
                let (inner, depth) = self.parse_unary()?;
                self.node(Ast::Neg(Box::new(inner)), depth + 1)
            }
            Token::Plus => {
                self.advance()?;
                self.parse_unary()
            }
            _ => self.parse_power(),
        }
    }

    fn parse_power(&mut self) -> Result<Node, EvaluationError> {
        let base = self.parse_primary()?;
        if self.current == Token::Caret {
            self.advance()?;
            // exponent may carry its own sign: 2 ^ -1
            let exp = self.parse_unary()?;
            self.binary(BinOp::Pow, base, exp)
        } else {
            Ok(base)
        }
    }

    fn parse_primary(&mut self) -> Result<Node, EvaluationError> {
        match &self.current {
            Token::Number(v) => {
                let v = *v;
                self.advance()?;
                Ok((Ast::Num(v), 1))
            }
            Token::Ident(name) => {
                let name = name.clone();
                self.advance()?;
                if self.current == Token::LParen {
                    self.advance()?;
                    self.parse_call(name)
                } else {
                    let leaf = match name.as_str() {
                        "x" => Ast::Var(Var::X),
                        "y" => Ast::Var(Var::Y),
                        "pi" => Ast::Num(PI),
                        "e" => Ast::Num(E),
                        "tau" => Ast::Num(TAU),
                        _ if Func::from_name(&name).is_some() => {
                            return Err(EvaluationError::Syntax {
                                position: self.current_pos,
                                message: format!("expected '(' after function '{name}'"),
                            });
                        }
                        _ => return Err(EvaluationError::UnknownName(name)),
                    };
                    Ok((leaf, 1))
                }
            }
            Token::LParen => {
                self.advance()?;
                let inner = self.parse_expr()?;
                self.expect(Token::RParen)?;
                Ok(inner)
            }
            _ => Err(self.unexpected()),
        }
    }

    fn parse_call(&mut self, name: String) -> Result<Node, EvaluationError> {
        let func = Func::from_name(&name).ok_or(EvaluationError::UnknownName(name))?;
        let mut args = Vec::new();
        let mut depth = 0;
        if self.current != Token::RParen {
            loop {
                let (arg, d) = self.parse_expr()?;
                args.push(arg);
                depth = depth.max(d);
                if self.current != Token::Comma {
                    break;
                }
                self.advance()?;
            }
        }
        self.expect(Token::RParen)?;

        if args.len() != func.arity() {
            return Err(EvaluationError::WrongArity {
                func: func.name(),
                expected: func.arity(),
                got: args.len(),
            });
        }
        self.node(Ast::Call(func, args), depth + 1)
    }
}

// ---- Expression ----

/// A parsed formula in `x` and `y`.
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    source: String,
    ast: Ast,
}

impl Expr {
    pub fn parse(input: &str) -> Result<Expr, EvaluationError> {
        let mut parser = Parser::new(input)?;
        let (ast, _) = parser.parse_expr()?;
        if parser.current != Token::Eof {
            return Err(parser.unexpected());
        }
        Ok(Expr {
            source: input.trim().to_string(),
            ast,
        })
    }

    pub fn eval(&self, x: f64, y: f64) -> Result<f64, EvaluationError> {
        self.ast.eval(x, y)
    }

    pub fn ast(&self) -> &Ast {
        &self.ast
    }

    pub fn source(&self) -> &str {
        &self.source
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl std::str::FromStr for Expr {
    type Err = EvaluationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Expr::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval(src: &str, x: f64, y: f64) -> Result<f64, EvaluationError> {
        Expr::parse(src)?.eval(x, y)
    }

    #[test]
    fn arithmetic_precedence() {
        assert_eq!(eval("1 + 2 * 3", 0.0, 0.0).unwrap(), 7.0);
        assert_eq!(eval("(1 + 2) * 3", 0.0, 0.0).unwrap(), 9.0);
        assert_eq!(eval("x - y - 1", 5.0, 2.0).unwrap(), 2.0);
        assert_eq!(eval("8 / 2 / 2", 0.0, 0.0).unwrap(), 2.0);
    }

    #[test]
    fn power_is_right_associative_and_binds_tighter_than_negation() {
        assert_eq!(eval("2 ^ 3 ^ 2", 0.0, 0.0).unwrap(), 512.0);
        assert_eq!(eval("2 ** 3", 0.0, 0.0).unwrap(), 8.0);
        assert_eq!(eval("-x ** 2", 3.0, 0.0).unwrap(), -9.0);
        assert_eq!(eval("2 ^ -1", 0.0, 0.0).unwrap(), 0.5);
    }

    #[test]
    fn modulo_follows_divisor_sign() {
        assert_eq!(eval("7 % 3", 0.0, 0.0).unwrap(), 1.0);
        assert_eq!(eval("-7 % 3", 0.0, 0.0).unwrap(), 2.0);
        assert_eq!(eval("7 % -3", 0.0, 0.0).unwrap(), -2.0);
    }

    #[test]
    fn numbers_with_exponents() {
        assert_eq!(eval("1.5e2", 0.0, 0.0).unwrap(), 150.0);
        assert_eq!(eval("2E-1 * 10", 0.0, 0.0).unwrap(), 2.0);
        assert_eq!(eval(".5 + 1.", 0.0, 0.0).unwrap(), 1.5);
    }

    #[test]
    fn functions_and_constants() {
        assert!((eval("sin(pi / 2)", 0.0, 0.0).unwrap() - 1.0).abs() < 1e-12);
        assert!((eval("log(e)", 0.0, 0.0).unwrap() - 1.0).abs() < 1e-12);
        assert_eq!(eval("max(x, y)", 1.0, 4.0).unwrap(), 4.0);
        assert_eq!(eval("hypot(3, 4)", 0.0, 0.0).unwrap(), 5.0);
        assert_eq!(eval("x + y * exp(0)", 1.0, 2.0).unwrap(), 3.0);
    }

    #[test]
    fn division_by_zero_is_an_error() {
        assert_eq!(eval("1 / x", 0.0, 0.0), Err(EvaluationError::DivisionByZero));
        assert_eq!(eval("y % 0", 0.0, 1.0), Err(EvaluationError::DivisionByZero));
        assert_eq!(eval("0 ^ -1", 0.0, 0.0), Err(EvaluationError::DivisionByZero));
    }

    #[test]
    fn domain_errors() {
        assert!(matches!(
            eval("sqrt(x)", -1.0, 0.0),
            Err(EvaluationError::Domain { func: "sqrt", .. })
        ));
        assert!(matches!(
            eval("log(0)", 0.0, 0.0),
            Err(EvaluationError::Domain { func: "log", .. })
        ));
        assert!(matches!(
            eval("asin(2)", 0.0, 0.0),
            Err(EvaluationError::Domain { func: "asin", .. })
        ));
        assert!(matches!(
            eval("(-8) ^ 0.5", 0.0, 0.0),
            Err(EvaluationError::Domain { func: "pow", .. })
        ));
    }

    #[test]
    fn overflow_in_functions() {
        assert_eq!(eval("exp(1000)", 0.0, 0.0), Err(EvaluationError::Overflow("exp")));
        assert_eq!(eval("10 ^ 400", 0.0, 0.0), Err(EvaluationError::Overflow("pow")));
        // plain arithmetic saturates to infinity without error
        assert!(eval("1e308 * 10", 0.0, 0.0).unwrap().is_infinite());
    }

    #[test]
    fn unknown_names_are_rejected_at_parse_time() {
        assert_eq!(
            Expr::parse("z + 1").unwrap_err(),
            EvaluationError::UnknownName("z".into())
        );
        assert_eq!(
            Expr::parse("system(1)").unwrap_err(),
            EvaluationError::UnknownName("system".into())
        );
        assert_eq!(
            Expr::parse("__import__").unwrap_err(),
            EvaluationError::UnknownName("__import__".into())
        );
    }

    #[test]
    fn wrong_arity() {
        assert_eq!(
            Expr::parse("sin(x, y)").unwrap_err(),
            EvaluationError::WrongArity {
                func: "sin",
                expected: 1,
                got: 2
            }
        );
        assert!(matches!(
            Expr::parse("max(x)"),
            Err(EvaluationError::WrongArity { func: "max", .. })
        ));
    }

    #[test]
    fn malformed_input() {
        for src in ["", "1 +", "(x", "x y", "3 $ 4", "sin x", "x.y", ")"] {
            assert!(
                matches!(Expr::parse(src), Err(EvaluationError::Syntax { .. })),
                "expected syntax error for {src:?}"
            );
        }
    }

    #[test]
    fn syntax_error_reports_position() {
        let err = Expr::parse("x + * y").unwrap_err();
        assert_eq!(
            err,
            EvaluationError::Syntax {
                position: 4,
                message: "unexpected token Star".into()
            }
        );
    }

    #[test]
    fn keeps_trimmed_source() {
        let expr: Expr = "  x + y ".parse().unwrap();
        assert_eq!(expr.to_string(), "x + y");
    }

    fn assert_too_deep(src: &str) {
        match Expr::parse(src) {
            Err(EvaluationError::Syntax { message, .. }) => assert_eq!(message, "expression nested too deeply"),
            other => panic!("expected nesting error, got {other:?}"),
        }
    }

    #[test]
    fn deep_parentheses_are_rejected() {
        let src = format!("{}x{}", "(".repeat(10_000), ")".repeat(10_000));
        assert_too_deep(&src);
    }

    #[test]
    fn long_sign_runs_are_rejected() {
        assert_too_deep(&format!("{}x", "-".repeat(10_000)));
        assert_too_deep(&format!("2^{}x", "-".repeat(10_000)));
    }

    #[test]
    fn long_operator_chains_are_rejected() {
        assert_too_deep(&format!("x{}", "+x".repeat(10_000)));
        assert_too_deep(&format!("{}x{}", "sin(".repeat(10_000), ")".repeat(10_000)));
    }

    #[test]
    fn moderate_nesting_still_parses() {
        let src = format!("{}x + 1{}", "(".repeat(100), ")".repeat(100));
        assert_eq!(eval(&src, 2.0, 0.0).unwrap(), 3.0);
        assert_eq!(eval(&format!("{}x", "-".repeat(100)), 2.0, 0.0).unwrap(), 2.0);
        assert_eq!(eval(&format!("x{}", "+1".repeat(200)), 0.0, 0.0).unwrap(), 200.0);
    }
}
