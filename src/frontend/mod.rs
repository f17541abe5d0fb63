pub mod lexer;
pub mod parser;
pub mod token;

pub use lexer::Lexer;
pub use parser::{Diagnostic, Parser};
pub use token::{Token, TokenKind};
