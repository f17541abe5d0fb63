use crate::ast::{
    AssignmentStatement, Block, BlockStatement, Condition, DoWhileStatement, Expression, Factor,
    IfStatement, Program, SignedTerm, Statement, Term, WhileStatement,
};
use crate::utils::errors::BlameResult;

/// Depth-first walk over the tree. Every method defaults to visiting the
/// node's children, so an implementor only overrides what it cares about.
pub trait AstVisitor {
    fn visit_program(&mut self, program: &Program) -> BlameResult<()> {
        for stmt in &program.statements {
            self.visit_statement(stmt)?;
        }
        Ok(())
    }

    fn visit_statement(&mut self, stmt: &Statement) -> BlameResult<()> {
        walk_statement(self, stmt)
    }

    fn visit_assignment(&mut self, stmt: &AssignmentStatement) -> BlameResult<()> {
        self.visit_expression(&stmt.expression)
    }

    fn visit_if(&mut self, stmt: &IfStatement) -> BlameResult<()> {
        self.visit_condition(&stmt.condition)?;
        self.visit_block(&stmt.then_block)?;
        if let Some(else_block) = &stmt.else_block {
            self.visit_block(else_block)?;
        }
        Ok(())
    }

    fn visit_while(&mut self, stmt: &WhileStatement) -> BlameResult<()> {
        self.visit_condition(&stmt.condition)?;
        self.visit_block(&stmt.block)
    }

    fn visit_do_while(&mut self, stmt: &DoWhileStatement) -> BlameResult<()> {
        self.visit_block(&stmt.block)?;
        self.visit_condition(&stmt.condition)
    }

    fn visit_block_statement(&mut self, stmt: &BlockStatement) -> BlameResult<()> {
        self.visit_block(&stmt.block)
    }

    fn visit_block(&mut self, block: &Block) -> BlameResult<()> {
        for stmt in &block.statements {
            self.visit_statement(stmt)?;
        }
        Ok(())
    }

    fn visit_condition(&mut self, condition: &Condition) -> BlameResult<()> {
        self.visit_expression(&condition.left)?;
        self.visit_expression(&condition.right)
    }

    fn visit_expression(&mut self, expr: &Expression) -> BlameResult<()> {
        self.visit_signed_term(&expr.left)?;
        for (_, term) in &expr.rest {
            self.visit_signed_term(term)?;
        }
        Ok(())
    }

    fn visit_signed_term(&mut self, term: &SignedTerm) -> BlameResult<()> {
        self.visit_term(&term.term)
    }

    fn visit_term(&mut self, term: &Term) -> BlameResult<()> {
        self.visit_factor(&term.left)?;
        for (_, factor) in &term.rest {
            self.visit_factor(factor)?;
        }
        Ok(())
    }

    fn visit_factor(&mut self, factor: &Factor) -> BlameResult<()> {
        match factor {
            Factor::Parentheses(inner) => self.visit_expression(inner),
            _ => Ok(()),
        }
    }
}

/// Dispatch a statement to the visitor method for its kind.
pub fn walk_statement<V: AstVisitor + ?Sized>(visitor: &mut V, stmt: &Statement) -> BlameResult<()> {
    match stmt {
        Statement::Assignment(s) => visitor.visit_assignment(s),
        Statement::If(s) => visitor.visit_if(s),
        Statement::While(s) => visitor.visit_while(s),
        Statement::DoWhile(s) => visitor.visit_do_while(s),
        Statement::Block(s) => visitor.visit_block_statement(s),
    }
}

/// Node counts of a tree, gathered for compilation statistics.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct NodeCounter {
    pub statements: usize,
    pub conditions: usize,
    pub factors: usize,
    pub max_depth: usize,
    depth: usize,
}

impl NodeCounter {
    pub fn count(program: &Program) -> Self {
        let mut counter = Self::default();
        // The counter itself never fails.
        counter.visit_program(program).ok();
        counter
    }

    pub fn total(&self) -> usize {
        self.statements + self.conditions + self.factors
    }
}

impl AstVisitor for NodeCounter {
    fn visit_statement(&mut self, stmt: &Statement) -> BlameResult<()> {
        self.statements += 1;
        walk_statement(self, stmt)
    }

    fn visit_block(&mut self, block: &Block) -> BlameResult<()> {
        self.depth += 1;
        self.max_depth = self.max_depth.max(self.depth);
        for stmt in &block.statements {
            self.visit_statement(stmt)?;
        }
        self.depth -= 1;
        Ok(())
    }

    fn visit_condition(&mut self, condition: &Condition) -> BlameResult<()> {
        self.conditions += 1;
        self.visit_expression(&condition.left)?;
        self.visit_expression(&condition.right)
    }

    fn visit_factor(&mut self, factor: &Factor) -> BlameResult<()> {
        self.factors += 1;
        match factor {
            Factor::Parentheses(inner) => self.visit_expression(inner),
            _ => Ok(()),
        }
    }
}
