//! Tree-walking C back end.
//!
//! Every statement kind maps to its native C construct; all variables are
//! `long` locals of `main`, declared up front in first-use order and
//! zero-initialized. Each call writes into a fresh buffer, so independent
//! emissions never see each other's output.
//!
//! Source names that are reserved in C are renamed once per emission; the
//! renamed spelling never coincides with another variable of the program.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::ast::{
    AssignmentStatement, Block, BlockStatement, Condition, DoWhileStatement, Expression, Factor,
    IfStatement, Identifier, Program, SignedTerm, Term, WhileStatement,
};
use crate::semantic::AstVisitor;
use crate::utils::config::emitter::{
    is_reserved, is_valid_identifier, mangle_identifier, DEFAULT_INDENT, FOOTER, HEADER, RETURN_STATEMENT,
    VARIABLE_TYPE,
};
use crate::utils::errors::{BlameError, BlameResult};
use crate::utils::write_line;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitConfig {
    /// Spaces per nesting level.
    pub indent: usize,
    /// Print every variable with `printf` before returning from `main`.
    pub dump_variables: bool,
}

impl Default for EmitConfig {
    fn default() -> Self {
        Self {
            indent: DEFAULT_INDENT,
            dump_variables: false,
        }
    }
}

/// Translate `program` into a complete C translation unit.
pub fn emit(program: &Program) -> BlameResult<String> {
    emit_with(program, &EmitConfig::default())
}

pub fn emit_with(program: &Program, config: &EmitConfig) -> BlameResult<String> {
    let mut output = String::new();
    CEmitter::new(&mut output, config).visit_program(program)?;
    debug!(bytes = output.len(), "emission finished");
    Ok(output)
}

pub struct CEmitter<'a> {
    output: &'a mut String,
    config: &'a EmitConfig,
    depth: usize,
    // Source name -> C name, fixed on first use.
    names: HashMap<String, String>,
    // Every C name handed out or claimed by a source variable.
    taken: HashSet<String>,
}

impl<'a> CEmitter<'a> {
    pub fn new(output: &'a mut String, config: &'a EmitConfig) -> Self {
        CEmitter {
            output,
            config,
            depth: 0,
            names: HashMap::new(),
            taken: HashSet::new(),
        }
    }

    fn indent(&mut self) {
        let width = self.config.indent * self.depth;
        self.output.extend(std::iter::repeat(' ').take(width));
    }

    fn emit_line(&mut self, args: std::fmt::Arguments) -> BlameResult<()> {
        self.indent();
        write_line(self.output, args)?;
        self.output.push('\n');
        Ok(())
    }

    fn check_identifier(identifier: &Identifier) -> BlameResult<()> {
        if !is_valid_identifier(&identifier.name) {
            return Err(BlameError::InvalidTargetIdentifier {
                identifier: identifier.name.clone(),
            });
        }
        Ok(())
    }

    // Declared variables keep their own spelling unless it is reserved, so
    // every source name is claimed before any reserved one is renamed.
    fn bind_names(&mut self, program: &Program) -> BlameResult<()> {
        let identifiers = program.identifiers();
        for identifier in identifiers {
            Self::check_identifier(identifier)?;
            self.taken.insert(identifier.name.clone());
        }
        for identifier in identifiers {
            let c_name = if is_reserved(&identifier.name) {
                mangle_identifier(&identifier.name, &self.taken)
            } else {
                identifier.name.clone()
            };
            debug!(source = %identifier.name, target = %c_name, "bound variable");
            self.taken.insert(c_name.clone());
            self.names.insert(identifier.name.clone(), c_name);
        }
        Ok(())
    }

    fn target_name(&mut self, identifier: &Identifier) -> BlameResult<String> {
        if let Some(c_name) = self.names.get(&identifier.name) {
            return Ok(c_name.clone());
        }
        // Not in the program's table: a hand-built tree.
        Self::check_identifier(identifier)?;
        let c_name = if is_reserved(&identifier.name) || self.taken.contains(&identifier.name) {
            mangle_identifier(&identifier.name, &self.taken)
        } else {
            identifier.name.clone()
        };
        self.taken.insert(c_name.clone());
        self.names.insert(identifier.name.clone(), c_name.clone());
        Ok(c_name)
    }

    fn emit_declarations(&mut self, program: &Program) -> BlameResult<()> {
        let identifiers = program.identifiers();
        for identifier in identifiers {
            let name = self.target_name(identifier)?;
            self.emit_line(format_args!("{} {} = 0;", VARIABLE_TYPE, name))?;
        }
        if !identifiers.is_empty() {
            self.output.push('\n');
        }
        Ok(())
    }

    fn emit_variable_dump(&mut self, program: &Program) -> BlameResult<()> {
        for identifier in program.identifiers() {
            let name = self.target_name(identifier)?;
            self.emit_line(format_args!(
                "printf(\"{} = %ld\\n\", {});",
                identifier.name, name
            ))?;
        }
        Ok(())
    }

    // Body of a `{ ... }`, one level deeper than the line that opened it.
    fn emit_block_body(&mut self, block: &Block) -> BlameResult<()> {
        self.depth += 1;
        for stmt in &block.statements {
            self.visit_statement(stmt)?;
        }
        self.depth -= 1;
        Ok(())
    }

    fn emit_opening(&mut self, args: std::fmt::Arguments) -> BlameResult<()> {
        self.indent();
        write_line(self.output, args)?;
        self.output.push_str(" {\n");
        Ok(())
    }
}

impl<'a> AstVisitor for CEmitter<'a> {
    fn visit_program(&mut self, program: &Program) -> BlameResult<()> {
        self.output.push_str(HEADER);
        self.depth = 1;
        self.bind_names(program)?;
        self.emit_declarations(program)?;
        for stmt in &program.statements {
            self.visit_statement(stmt)?;
        }
        if self.config.dump_variables {
            self.emit_variable_dump(program)?;
        }
        self.emit_line(format_args!("{}", RETURN_STATEMENT))?;
        self.depth = 0;
        self.output.push_str(FOOTER);
        Ok(())
    }

    fn visit_assignment(&mut self, stmt: &AssignmentStatement) -> BlameResult<()> {
        let name = self.target_name(&stmt.identifier)?;
        self.indent();
        write_line(self.output, format_args!("{} = ", name))?;
        self.visit_expression(&stmt.expression)?;
        self.output.push_str(";\n");
        Ok(())
    }

    fn visit_if(&mut self, stmt: &IfStatement) -> BlameResult<()> {
        self.indent();
        self.output.push_str("if (");
        self.visit_condition(&stmt.condition)?;
        self.output.push_str(") {\n");
        self.emit_block_body(&stmt.then_block)?;
        match &stmt.else_block {
            Some(else_block) => {
                self.emit_opening(format_args!("}} else"))?;
                self.emit_block_body(else_block)?;
                self.emit_line(format_args!("}}"))
            }
            None => self.emit_line(format_args!("}}")),
        }
    }

    fn visit_while(&mut self, stmt: &WhileStatement) -> BlameResult<()> {
        self.indent();
        self.output.push_str("while (");
        self.visit_condition(&stmt.condition)?;
        self.output.push_str(") {\n");
        self.emit_block_body(&stmt.block)?;
        self.emit_line(format_args!("}}"))
    }

    fn visit_do_while(&mut self, stmt: &DoWhileStatement) -> BlameResult<()> {
        self.emit_opening(format_args!("do"))?;
        self.emit_block_body(&stmt.block)?;
        self.indent();
        self.output.push_str("} while (");
        self.visit_condition(&stmt.condition)?;
        self.output.push_str(");\n");
        Ok(())
    }

    fn visit_block_statement(&mut self, stmt: &BlockStatement) -> BlameResult<()> {
        self.emit_line(format_args!("{{"))?;
        self.emit_block_body(&stmt.block)?;
        self.emit_line(format_args!("}}"))
    }

    fn visit_block(&mut self, block: &Block) -> BlameResult<()> {
        self.emit_block_body(block)
    }

    fn visit_condition(&mut self, condition: &Condition) -> BlameResult<()> {
        self.visit_expression(&condition.left)?;
        write_line(self.output, format_args!(" {} ", condition.operator.symbol()))?;
        self.visit_expression(&condition.right)
    }

    fn visit_expression(&mut self, expr: &Expression) -> BlameResult<()> {
        self.visit_signed_term(&expr.left)?;
        for (op, term) in &expr.rest {
            write_line(self.output, format_args!(" {} ", op.symbol()))?;
            self.visit_signed_term(term)?;
        }
        Ok(())
    }

    fn visit_signed_term(&mut self, term: &SignedTerm) -> BlameResult<()> {
        match term.sign {
            // The sign negates the whole term, not just its first factor.
            Some(sign) if !term.term.is_single_factor() => {
                write_line(self.output, format_args!("{}(", sign.symbol()))?;
                self.visit_term(&term.term)?;
                self.output.push(')');
                Ok(())
            }
            Some(sign) => {
                self.output.push_str(sign.symbol());
                self.visit_term(&term.term)
            }
            None => self.visit_term(&term.term),
        }
    }

    fn visit_term(&mut self, term: &Term) -> BlameResult<()> {
        self.visit_factor(&term.left)?;
        for (op, factor) in &term.rest {
            write_line(self.output, format_args!(" {} ", op.symbol()))?;
            self.visit_factor(factor)?;
        }
        Ok(())
    }

    fn visit_factor(&mut self, factor: &Factor) -> BlameResult<()> {
        match factor {
            Factor::Identifier(identifier) => {
                let name = self.target_name(identifier)?;
                self.output.push_str(&name);
                Ok(())
            }
            Factor::NumberLiteral(value) => write_line(self.output, format_args!("{}", value)),
            Factor::Parentheses(inner) => {
                self.output.push('(');
                self.visit_expression(inner)?;
                self.output.push(')');
                Ok(())
            }
            Factor::StringLiteral(_) => Err(BlameError::unsupported("string literal")),
        }
    }
}
