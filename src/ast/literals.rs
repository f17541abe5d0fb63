use std::fmt;
use std::rc::Rc;

use crate::ast::Expression;

/// A named variable. Instances are interned by the scope table, so equal
/// names in one scope share a single node.
#[derive(Debug, PartialEq, Eq)]
pub struct Identifier {
    pub name: String,
}

impl Identifier {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Factor {
    Identifier(Rc<Identifier>),
    NumberLiteral(i64),
    StringLiteral(String),
    Parentheses(Box<Expression>),
}

impl Factor {
    pub fn as_number(&self) -> Option<i64> {
        match self {
            Factor::NumberLiteral(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_identifier(&self) -> Option<&Rc<Identifier>> {
        match self {
            Factor::Identifier(identifier) => Some(identifier),
            _ => None,
        }
    }
}

impl fmt::Display for Factor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Factor::Identifier(identifier) => write!(f, "{}", identifier),
            Factor::NumberLiteral(value) => write!(f, "{}", value),
            Factor::StringLiteral(text) => write!(f, "{:?}", text),
            Factor::Parentheses(inner) => write!(f, "({})", inner),
        }
    }
}
