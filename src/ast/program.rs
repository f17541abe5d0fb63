use std::fmt;
use std::rc::Rc;

use crate::ast::{Identifier, Statement};
use crate::semantic::ScopeTable;
use crate::utils::config::parser::GLOBAL_SCOPE;

/// Root of the tree. Owns the top-level statements in source order and the
/// scope table that interned every identifier they mention.
#[derive(Debug, Default)]
pub struct Program {
    pub statements: Vec<Statement>,
    pub scopes: ScopeTable,
}

impl Program {
    pub fn new(statements: Vec<Statement>, scopes: ScopeTable) -> Self {
        Self { statements, scopes }
    }

    /// Global identifiers in first-use order.
    pub fn identifiers(&self) -> &[Rc<Identifier>] {
        self.scopes.identifiers(GLOBAL_SCOPE)
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for stmt in &self.statements {
            stmt.write_indented(f, 0)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Block {
    pub statements: Vec<Statement>,
}

impl Block {
    pub fn new(statements: Vec<Statement>) -> Self {
        Self { statements }
    }

    pub(crate) fn write_indented(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        writeln!(f, "{{")?;
        for stmt in &self.statements {
            stmt.write_indented(f, depth + 1)?;
        }
        write!(f, "{}}}", "    ".repeat(depth))
    }
}
