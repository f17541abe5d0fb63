use std::fmt;

use crate::ast::Factor;
use crate::frontend::token::TokenKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    Plus,
    Minus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOp {
    Plus,
    Minus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MulOp {
    Multiply,
    Divide,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Equal,
    NotEqual,
    LessThan,
    GreaterThan,
    LessThanEqual,
    GreaterThanEqual,
}

impl Sign {
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Plus => Some(Sign::Plus),
            TokenKind::Minus => Some(Sign::Minus),
            _ => None,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Sign::Plus => "+",
            Sign::Minus => "-",
        }
    }
}

impl AddOp {
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Plus => Some(AddOp::Plus),
            TokenKind::Minus => Some(AddOp::Minus),
            _ => None,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            AddOp::Plus => "+",
            AddOp::Minus => "-",
        }
    }
}

impl MulOp {
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Multiply => Some(MulOp::Multiply),
            TokenKind::Divide => Some(MulOp::Divide),
            _ => None,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            MulOp::Multiply => "*",
            MulOp::Divide => "/",
        }
    }
}

impl CompareOp {
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Equal => Some(CompareOp::Equal),
            TokenKind::NotEqual => Some(CompareOp::NotEqual),
            TokenKind::LessThan => Some(CompareOp::LessThan),
            TokenKind::GreaterThan => Some(CompareOp::GreaterThan),
            TokenKind::LessThanEqual => Some(CompareOp::LessThanEqual),
            TokenKind::GreaterThanEqual => Some(CompareOp::GreaterThanEqual),
            _ => None,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            CompareOp::Equal => "==",
            CompareOp::NotEqual => "!=",
            CompareOp::LessThan => "<",
            CompareOp::GreaterThan => ">",
            CompareOp::LessThanEqual => "<=",
            CompareOp::GreaterThanEqual => ">=",
        }
    }
}

/// A product/quotient chain: `left { op factor }`.
#[derive(Debug, Clone, PartialEq)]
pub struct Term {
    pub left: Factor,
    pub rest: Vec<(MulOp, Factor)>,
}

impl Term {
    pub fn new(left: Factor) -> Self {
        Self {
            left,
            rest: Vec::new(),
        }
    }

    pub fn is_single_factor(&self) -> bool {
        self.rest.is_empty()
    }
}

/// An optional unary sign applied to a whole term.
#[derive(Debug, Clone, PartialEq)]
pub struct SignedTerm {
    pub sign: Option<Sign>,
    pub term: Term,
}

impl SignedTerm {
    pub fn new(sign: Option<Sign>, term: Term) -> Self {
        Self { sign, term }
    }

    pub fn unsigned(term: Term) -> Self {
        Self { sign: None, term }
    }
}

/// A sum/difference chain of terms. Only the leading term may carry a sign;
/// trailing terms are joined by their binary operator.
#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    pub left: SignedTerm,
    pub rest: Vec<(AddOp, SignedTerm)>,
}

impl Expression {
    pub fn new(left: SignedTerm) -> Self {
        Self {
            left,
            rest: Vec::new(),
        }
    }

    /// Returns the lone factor when the expression is an unsigned single factor.
    pub fn as_factor(&self) -> Option<&Factor> {
        if self.rest.is_empty() && self.left.sign.is_none() && self.left.term.is_single_factor() {
            Some(&self.left.term.left)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    pub left: Expression,
    pub operator: CompareOp,
    pub right: Expression,
}

impl Condition {
    pub fn new(left: Expression, operator: CompareOp, right: Expression) -> Self {
        Self {
            left,
            operator,
            right,
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.left)?;
        for (op, factor) in &self.rest {
            write!(f, " {} {}", op.symbol(), factor)?;
        }
        Ok(())
    }
}

impl fmt::Display for SignedTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(sign) = self.sign {
            write!(f, "{}", sign.symbol())?;
        }
        write!(f, "{}", self.term)
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.left)?;
        for (op, term) in &self.rest {
            write!(f, " {} {}", op.symbol(), term)?;
        }
        Ok(())
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.left, self.operator.symbol(), self.right)
    }
}
