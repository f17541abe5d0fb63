/*
*                    blame -- imperative source language.
*
* program    = { statement } ;
* block      = "{" { statement } "}" ;
* statement  = assignment | if | while | do-while | block ;
* assignment = ident "=" expression ;
* if         = "if" condition block [ "else" block ] ;
* while      = "while" condition block ;
* do-while   = "do" block "while" condition ;
* condition  = expression comparator expression
*            | "(" expression comparator expression ")" ;
* expression = [ "+" | "-" ] term { ( "+" | "-" ) term } ;
* term       = factor { ( "*" | "/" ) factor } ;
* factor     = ident | number | "(" expression ")" ;
* comparator = "==" | "!=" | "<" | ">" | "<=" | ">=" ;
*
* Statements end at a newline or ";".
*/

mod expressions;
mod literals;
mod program;
mod statements;

pub use expressions::{AddOp, CompareOp, Condition, Expression, MulOp, Sign, SignedTerm, Term};
pub use literals::{Factor, Identifier};
pub use program::{Block, Program};
pub use statements::{
    AssignmentStatement, BlockStatement, DoWhileStatement, IfStatement, Statement, WhileStatement,
};
