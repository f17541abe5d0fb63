use blamec::frontend::lexer::{scan, Lexer};
use blamec::frontend::token::{Token, TokenKind};

fn kinds(source: &str) -> Vec<TokenKind> {
    scan(source).into_iter().map(|t| t.kind).collect()
}

#[test]
fn test_simple_assignment() {
    let mut lexer = Lexer::new("x = 5;");
    let expected = vec![
        Token::new(TokenKind::Ident, "x", 1),
        Token::new(TokenKind::Assign, "=", 1),
        Token::new(TokenKind::Number, "5", 1),
        Token::new(TokenKind::Separator, ";", 1),
        Token::new(TokenKind::Eof, "", 1),
    ];
    for token in expected {
        assert_eq!(lexer.next_token(), token);
    }
}

#[test]
fn test_eof_is_repeatable() {
    let mut lexer = Lexer::new("x = 5;");
    for _ in 0..4 {
        lexer.next_token();
    }
    for _ in 0..10 {
        let token = lexer.next_token();
        assert_eq!(token.kind, TokenKind::Eof);
        assert_eq!(token.literal, "");
    }
}

#[test]
fn test_additive_chain() {
    let tokens = scan("x - y + z;");
    let literals: Vec<&str> = tokens.iter().map(|t| t.literal.as_str()).collect();
    assert_eq!(literals, vec!["x", "-", "y", "+", "z", ";", ""]);
    assert_eq!(
        kinds("x - y + z;"),
        vec![
            TokenKind::Ident,
            TokenKind::Minus,
            TokenKind::Ident,
            TokenKind::Plus,
            TokenKind::Ident,
            TokenKind::Separator,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_if_statement_tokens() {
    assert_eq!(
        kinds("if (x < y) { x = 5; }"),
        vec![
            TokenKind::If,
            TokenKind::LParen,
            TokenKind::Ident,
            TokenKind::LessThan,
            TokenKind::Ident,
            TokenKind::RParen,
            TokenKind::LBrace,
            TokenKind::Ident,
            TokenKind::Assign,
            TokenKind::Number,
            TokenKind::Separator,
            TokenKind::RBrace,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_keywords() {
    assert_eq!(
        kinds("if else while do iffy done"),
        vec![
            TokenKind::If,
            TokenKind::Else,
            TokenKind::While,
            TokenKind::Do,
            TokenKind::Ident,
            TokenKind::Ident,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_comparison_operators() {
    assert_eq!(
        kinds("== != < > <= >= ="),
        vec![
            TokenKind::Equal,
            TokenKind::NotEqual,
            TokenKind::LessThan,
            TokenKind::GreaterThan,
            TokenKind::LessThanEqual,
            TokenKind::GreaterThanEqual,
            TokenKind::Assign,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_logical_operators() {
    assert_eq!(
        kinds("a && b || !c"),
        vec![
            TokenKind::Ident,
            TokenKind::And,
            TokenKind::Ident,
            TokenKind::Or,
            TokenKind::Not,
            TokenKind::Ident,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_newline_is_separator() {
    let tokens = scan("a = 1\nb = 2\r\n");
    let separators: Vec<&Token> = tokens.iter().filter(|t| t.is(TokenKind::Separator)).collect();
    assert_eq!(separators.len(), 2);
    assert_eq!(separators[0].literal, "\\n");
    assert_eq!(separators[0].line, 1);
    assert_eq!(separators[1].line, 2);
    assert_eq!(tokens.last().map(|t| t.line), Some(3));
}

#[test]
fn test_identifiers_with_digits_and_underscores() {
    let tokens = scan("_tmp x1 9lives");
    assert_eq!(tokens[0], Token::new(TokenKind::Ident, "_tmp", 1));
    assert_eq!(tokens[1], Token::new(TokenKind::Ident, "x1", 1));
    // No identifier may start with a digit.
    assert_eq!(tokens[2], Token::new(TokenKind::Number, "9", 1));
    assert_eq!(tokens[3], Token::new(TokenKind::Ident, "lives", 1));
}

#[test]
fn test_illegal_characters_do_not_halt() {
    let tokens = scan("x = 5 $ # y");
    assert_eq!(
        tokens.iter().map(|t| t.kind).collect::<Vec<_>>(),
        vec![
            TokenKind::Ident,
            TokenKind::Assign,
            TokenKind::Number,
            TokenKind::Illegal,
            TokenKind::Illegal,
            TokenKind::Ident,
            TokenKind::Eof,
        ]
    );
    assert_eq!(tokens[3].literal, "$");
    assert_eq!(tokens[4].literal, "#");
}

#[test]
fn test_whitespace_produces_no_tokens() {
    assert_eq!(kinds(" \t\r "), vec![TokenKind::Eof]);
    assert_eq!(kinds(""), vec![TokenKind::Eof]);
}

#[test]
fn test_iterator_stops_before_eof() {
    let collected: Vec<Token> = Lexer::new("a b").collect();
    assert_eq!(collected.len(), 2);
}
