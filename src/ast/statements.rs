use std::fmt;
use std::rc::Rc;

use crate::ast::{Block, Condition, Expression, Identifier};

#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentStatement {
    pub identifier: Rc<Identifier>,
    pub expression: Expression,
}

impl AssignmentStatement {
    pub fn new(identifier: Rc<Identifier>, expression: Expression) -> Self {
        Self {
            identifier,
            expression,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfStatement {
    pub condition: Condition,
    pub then_block: Block,
    pub else_block: Option<Block>,
}

impl IfStatement {
    pub fn new(condition: Condition, then_block: Block, else_block: Option<Block>) -> Self {
        Self {
            condition,
            then_block,
            else_block,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WhileStatement {
    pub condition: Condition,
    pub block: Block,
}

impl WhileStatement {
    pub fn new(condition: Condition, block: Block) -> Self {
        Self { condition, block }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DoWhileStatement {
    pub block: Block,
    pub condition: Condition,
}

impl DoWhileStatement {
    pub fn new(block: Block, condition: Condition) -> Self {
        Self { block, condition }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BlockStatement {
    pub block: Block,
}

impl BlockStatement {
    pub fn new(block: Block) -> Self {
        Self { block }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Assignment(AssignmentStatement),
    If(IfStatement),
    While(WhileStatement),
    DoWhile(DoWhileStatement),
    Block(BlockStatement),
}

impl Statement {
    /// Name of the statement kind, as used in diagnostics and logs.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Statement::Assignment(_) => "AssignmentStatement",
            Statement::If(_) => "IfStatement",
            Statement::While(_) => "WhileStatement",
            Statement::DoWhile(_) => "DoWhileStatement",
            Statement::Block(_) => "BlockStatement",
        }
    }

    pub(crate) fn write_indented(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        let pad = "    ".repeat(depth);
        match self {
            Statement::Assignment(stmt) => {
                writeln!(f, "{}{} = {}", pad, stmt.identifier, stmt.expression)
            }
            Statement::If(stmt) => {
                write!(f, "{}if {} ", pad, stmt.condition)?;
                stmt.then_block.write_indented(f, depth)?;
                if let Some(else_block) = &stmt.else_block {
                    write!(f, " else ")?;
                    else_block.write_indented(f, depth)?;
                }
                writeln!(f)
            }
            Statement::While(stmt) => {
                write!(f, "{}while {} ", pad, stmt.condition)?;
                stmt.block.write_indented(f, depth)?;
                writeln!(f)
            }
            Statement::DoWhile(stmt) => {
                write!(f, "{}do ", pad)?;
                stmt.block.write_indented(f, depth)?;
                writeln!(f, " while {}", stmt.condition)
            }
            Statement::Block(stmt) => {
                write!(f, "{}", pad)?;
                stmt.block.write_indented(f, depth)?;
                writeln!(f)
            }
        }
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_indented(f, 0)
    }
}
