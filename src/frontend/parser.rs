use std::fmt;
use std::mem;

use tracing::debug;

use crate::ast::{
    AddOp, AssignmentStatement, Block, BlockStatement, CompareOp, Condition, DoWhileStatement,
    Expression, Factor, IfStatement, MulOp, Program, Sign, SignedTerm, Statement, Term,
    WhileStatement,
};
use crate::frontend::lexer::Lexer;
use crate::frontend::token::{Token, TokenKind};
use crate::semantic::ScopeTable;
use crate::utils::config::parser::GLOBAL_SCOPE;

/// A recovered parse error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub line: usize,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.message)
    }
}

/// Recursive-descent parser with a single token of lookahead.
///
/// Parsing never aborts. Every structural error is recorded as a
/// [`Diagnostic`] and the parser resynchronizes at the next statement
/// boundary, so `parse` always yields a (possibly partial) [`Program`].
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current_token: Token,
    previous_token: Option<Token>,
    scopes: ScopeTable,
    current_scope: String,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> Parser<'a> {
    pub fn new(lexer: Lexer<'a>) -> Self {
        let mut parser = Self {
            lexer,
            current_token: Token::new(TokenKind::Eof, "", 1),
            previous_token: None,
            scopes: ScopeTable::new(),
            current_scope: GLOBAL_SCOPE.to_string(),
            diagnostics: Vec::new(),
        };
        parser.next();
        parser.previous_token = None;
        parser
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn has_diagnostics(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    pub fn current_scope(&self) -> &str {
        &self.current_scope
    }

    fn next(&mut self) {
        let token = self.lexer.next_token();
        self.previous_token = Some(mem::replace(&mut self.current_token, token));
    }

    fn error(&mut self, message: impl Into<String>) {
        let diagnostic = Diagnostic {
            line: self.current_token.line,
            message: message.into(),
        };
        debug!(line = diagnostic.line, message = %diagnostic.message, "parse diagnostic");
        self.diagnostics.push(diagnostic);
    }

    fn accept(&mut self, kind: TokenKind) -> bool {
        if self.current_token.is(kind) {
            self.next();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: TokenKind) -> bool {
        if self.accept(kind) {
            return true;
        }
        let message = match &self.previous_token {
            Some(prev) => format!("expected {} after {}, found {}", kind, prev, self.current_token),
            None => format!("expected {}, found {}", kind, self.current_token),
        };
        self.error(message);
        false
    }

    fn skip_separators(&mut self) {
        while self.accept(TokenKind::Separator) {}
    }

    // Skip the rest of a broken statement, stopping before `}` so the
    // enclosing block can still close.
    fn synchronize(&mut self) {
        while !matches!(
            self.current_token.kind,
            TokenKind::Separator | TokenKind::RBrace | TokenKind::Eof
        ) {
            self.next();
        }
    }

    /**
     * Parse a program according to the grammar:
     * program = { statement } .
     */
    pub fn parse(&mut self) -> Program {
        let mut statements = Vec::new();
        loop {
            self.skip_separators();
            if self.current_token.is(TokenKind::Eof) {
                break;
            }
            match self.statement() {
                Some(stmt) => statements.push(stmt),
                None => self.synchronize(),
            }
        }
        debug!(
            statements = statements.len(),
            identifiers = self.scopes.len(),
            diagnostics = self.diagnostics.len(),
            "parse finished"
        );
        Program::new(statements, mem::take(&mut self.scopes))
    }

    /**
     * Parse a statement according to the grammar:
     * statement = ident "=" expression
     *           | "if" condition block [ "else" block ]
     *           | "while" condition block
     *           | "do" block "while" condition
     *           | block .
     *
     * Returns `None` after recording a diagnostic; at least one token has
     * been consumed either way.
     */
    fn statement(&mut self) -> Option<Statement> {
        match self.current_token.kind {
            TokenKind::Ident => self.assignment(),
            TokenKind::If => self.if_statement(),
            TokenKind::While => self.while_statement(),
            TokenKind::Do => self.do_while_statement(),
            TokenKind::LBrace => self.block().map(|block| Statement::Block(BlockStatement::new(block))),
            _ => {
                let message = format!("expected statement, found {}", self.current_token);
                self.error(message);
                self.next();
                None
            }
        }
    }

    fn assignment(&mut self) -> Option<Statement> {
        let name = self.current_token.literal.clone();
        self.next();
        if !self.expect(TokenKind::Assign) {
            return None;
        }
        // Only a statement that got past '=' declares its variable.
        let identifier = self.scopes.intern(&self.current_scope, &name);
        let expression = self.expression()?;
        Some(Statement::Assignment(AssignmentStatement::new(identifier, expression)))
    }

    fn if_statement(&mut self) -> Option<Statement> {
        self.next(); // Consume 'if'
        let condition = self.condition();
        let then_block = self.block();

        // `else` may start on the line after the closing brace.
        self.skip_separators();
        let else_block = if self.accept(TokenKind::Else) {
            Some(self.block()?)
        } else {
            None
        };
        Some(Statement::If(IfStatement::new(condition?, then_block?, else_block)))
    }

    fn while_statement(&mut self) -> Option<Statement> {
        self.next(); // Consume 'while'
        let condition = self.condition();
        let block = self.block();
        Some(Statement::While(WhileStatement::new(condition?, block?)))
    }

    fn do_while_statement(&mut self) -> Option<Statement> {
        self.next(); // Consume 'do'
        let block = self.block();
        self.skip_separators();
        if !self.accept(TokenKind::While) {
            let message = format!("expected 'while' after 'do' block, found {}", self.current_token);
            self.error(message);
            return None;
        }
        let condition = self.condition();
        Some(Statement::DoWhile(DoWhileStatement::new(block?, condition?)))
    }

    /**
     * Parse a block according to the grammar:
     * block = "{" { statement } "}" .
     */
    fn block(&mut self) -> Option<Block> {
        self.skip_separators();
        if !self.expect(TokenKind::LBrace) {
            return None;
        }
        let mut statements = Vec::new();
        loop {
            self.skip_separators();
            if matches!(self.current_token.kind, TokenKind::RBrace | TokenKind::Eof) {
                break;
            }
            match self.statement() {
                Some(stmt) => statements.push(stmt),
                None => self.synchronize(),
            }
        }
        // A block left open at end of input is kept, with a diagnostic.
        self.expect(TokenKind::RBrace);
        Some(Block::new(statements))
    }

    /**
     * Parse a condition according to the grammar:
     * condition = expression comparator expression
     *           | "(" expression comparator expression ")" .
     *
     * A leading "(" is ambiguous with a parenthesized left operand such as
     * `(a + 1) < b`; the token after the inner expression decides, so no
     * backtracking is needed.
     */
    fn condition(&mut self) -> Option<Condition> {
        if !self.accept(TokenKind::LParen) {
            let left = self.expression()?;
            return self.comparison(left);
        }

        let inner = self.expression()?;
        if let Some(operator) = CompareOp::from_token(self.current_token.kind) {
            self.next();
            let right = self.expression()?;
            if !self.expect(TokenKind::RParen) {
                return None;
            }
            return Some(Condition::new(inner, operator, right));
        }

        if !self.expect(TokenKind::RParen) {
            return None;
        }
        let term = self.term_tail(Factor::Parentheses(Box::new(inner)))?;
        let left = self.expression_tail(SignedTerm::unsigned(term))?;
        self.comparison(left)
    }

    fn comparison(&mut self, left: Expression) -> Option<Condition> {
        match CompareOp::from_token(self.current_token.kind) {
            Some(operator) => {
                self.next();
                let right = self.expression()?;
                Some(Condition::new(left, operator, right))
            }
            None => {
                let message = format!(
                    "expected comparison operator in condition, found {}",
                    self.current_token
                );
                self.error(message);
                None
            }
        }
    }

    /**
     * Parse an expression according to the grammar:
     * expression = [ "+" | "-" ] term { ( "+" | "-" ) term } .
     *
     * The sign binds to the first term only.
     */
    fn expression(&mut self) -> Option<Expression> {
        let sign = Sign::from_token(self.current_token.kind);
        if sign.is_some() {
            self.next();
        }
        let term = self.term()?;
        self.expression_tail(SignedTerm::new(sign, term))
    }

    fn expression_tail(&mut self, left: SignedTerm) -> Option<Expression> {
        let mut expr = Expression::new(left);
        while let Some(op) = AddOp::from_token(self.current_token.kind) {
            self.next();
            let term = self.term()?;
            expr.rest.push((op, SignedTerm::unsigned(term)));
        }
        Some(expr)
    }

    /**
     * Parse a term according to the grammar:
     * term = factor { ( "*" | "/" ) factor } .
     */
    fn term(&mut self) -> Option<Term> {
        let factor = self.factor()?;
        self.term_tail(factor)
    }

    fn term_tail(&mut self, left: Factor) -> Option<Term> {
        let mut term = Term::new(left);
        while let Some(op) = MulOp::from_token(self.current_token.kind) {
            self.next();
            let factor = self.factor()?;
            term.rest.push((op, factor));
        }
        Some(term)
    }

    /**
     * Parse a factor according to the grammar:
     * factor = ident | number | "(" expression ")" .
     */
    fn factor(&mut self) -> Option<Factor> {
        match self.current_token.kind {
            TokenKind::Ident => {
                let identifier = self.scopes.intern(&self.current_scope, &self.current_token.literal);
                self.next();
                Some(Factor::Identifier(identifier))
            }
            TokenKind::Number => {
                let literal = self.current_token.literal.clone();
                self.next();
                match literal.parse::<i64>() {
                    Ok(value) => Some(Factor::NumberLiteral(value)),
                    Err(_) => {
                        self.error(format!("invalid number literal '{}'", literal));
                        None
                    }
                }
            }
            TokenKind::StringLiteral => {
                let text = self.current_token.literal.clone();
                self.next();
                Some(Factor::StringLiteral(text))
            }
            TokenKind::LParen => {
                self.next();
                let inner = self.expression()?;
                if !self.expect(TokenKind::RParen) {
                    return None;
                }
                Some(Factor::Parentheses(Box::new(inner)))
            }
            _ => {
                let message = format!("expected factor, found {}", self.current_token);
                self.error(message);
                None
            }
        }
    }
}

/// Parse `source` in one go, returning the tree and every diagnostic.
pub fn parse_source(source: &str) -> (Program, Vec<Diagnostic>) {
    let mut parser = Parser::new(Lexer::new(source));
    let program = parser.parse();
    (program, parser.into_diagnostics())
}
