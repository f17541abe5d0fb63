use crate::frontend::token::{Token, TokenKind};
use std::{iter::Peekable, str::Chars};

/// Pull-based scanner over a source buffer.
///
/// `next_token` never fails: runes outside the language become `Illegal`
/// tokens and rejection is left to the parser. Once the input is exhausted
/// every further call yields `Eof`.
pub struct Lexer<'a> {
    chars: Peekable<Chars<'a>>,
    line: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            chars: source.chars().peekable(),
            line: 1,
        }
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();
        match self.chars.peek() {
            None => Token::new(TokenKind::Eof, "", self.line),
            Some(&ch) if is_identifier_start(ch) => self.scan_identifier(),
            Some(&ch) if ch.is_ascii_digit() => self.scan_number(),
            Some(&'=') => self.scan_pair('=', TokenKind::Assign, '=', TokenKind::Equal),
            Some(&'!') => self.scan_pair('!', TokenKind::Not, '=', TokenKind::NotEqual),
            Some(&'<') => self.scan_pair('<', TokenKind::LessThan, '=', TokenKind::LessThanEqual),
            Some(&'>') => self.scan_pair('>', TokenKind::GreaterThan, '=', TokenKind::GreaterThanEqual),
            Some(&'&') => self.scan_pair('&', TokenKind::Illegal, '&', TokenKind::And),
            Some(&'|') => self.scan_pair('|', TokenKind::Illegal, '|', TokenKind::Or),
            Some(&'\n') => {
                self.chars.next();
                let token = Token::new(TokenKind::Separator, "\\n", self.line);
                self.line += 1;
                token
            }
            Some(&ch) => self.scan_single_char_token(ch),
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(&ch) = self.chars.peek() {
            if matches!(ch, ' ' | '\t' | '\r') {
                self.chars.next();
            } else {
                break;
            }
        }
    }

    fn scan_identifier(&mut self) -> Token {
        let mut identifier = String::new();
        while let Some(&ch) = self.chars.peek() {
            if is_identifier_start(ch) || ch.is_ascii_digit() {
                identifier.push(ch);
                self.chars.next();
            } else {
                break;
            }
        }
        let kind = TokenKind::keyword(&identifier).unwrap_or(TokenKind::Ident);
        Token::new(kind, identifier, self.line)
    }

    fn scan_number(&mut self) -> Token {
        let mut number_str = String::new();
        while let Some(&ch) = self.chars.peek() {
            if ch.is_ascii_digit() {
                number_str.push(ch);
                self.chars.next();
            } else {
                break;
            }
        }
        Token::new(TokenKind::Number, number_str, self.line)
    }

    // `first` alone yields `single`; `first` followed by `second` yields `double`.
    fn scan_pair(&mut self, first: char, single: TokenKind, second: char, double: TokenKind) -> Token {
        self.chars.next(); // Consume `first`
        if self.chars.peek() == Some(&second) {
            self.chars.next();
            Token::new(double, format!("{}{}", first, second), self.line)
        } else {
            Token::new(single, first.to_string(), self.line)
        }
    }

    fn scan_single_char_token(&mut self, ch: char) -> Token {
        self.chars.next(); // Consume the character
        let kind = match ch {
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Multiply,
            '/' => TokenKind::Divide,
            ',' => TokenKind::Comma,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '{' => TokenKind::LBrace,
            '}' => TokenKind::RBrace,
            ';' => TokenKind::Separator,
            _ => TokenKind::Illegal,
        };
        Token::new(kind, ch.to_string(), self.line)
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token;

    // Stops before the end-of-input token, unlike `next_token`.
    fn next(&mut self) -> Option<Token> {
        let token = self.next_token();
        if token.is(TokenKind::Eof) {
            None
        } else {
            Some(token)
        }
    }
}

fn is_identifier_start(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_'
}

// Convenience function: every token of `source`, terminated by a single `Eof`.
pub fn scan(source: &str) -> Vec<Token> {
    let mut lexer = Lexer::new(source);
    let mut tokens: Vec<Token> = lexer.by_ref().collect();
    tokens.push(Token::new(TokenKind::Eof, "", lexer.line()));
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn illegal_rune_is_consumed() {
        let mut lexer = Lexer::new("@x");
        let illegal = lexer.next_token();
        assert_eq!(illegal.kind, TokenKind::Illegal);
        assert_eq!(illegal.literal, "@");
        assert_eq!(lexer.next_token().kind, TokenKind::Ident);
    }

    #[test]
    fn lone_ampersand_is_illegal() {
        let kinds: Vec<TokenKind> = scan("a & b && c").into_iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Ident,
                TokenKind::Illegal,
                TokenKind::Ident,
                TokenKind::And,
                TokenKind::Ident,
                TokenKind::Eof,
            ]
        );
    }
}
