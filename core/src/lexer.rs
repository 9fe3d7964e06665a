use logos::{FilterResult, Lexer as LLexer, Logos, Skip};

use crate::diagnostics::Reporter;
use crate::error::LexicalError;
use crate::token::{Literal, Token, TokenKind};

/// Update the line count.
fn newline_callback(lex: &mut LLexer<Lexeme>) -> Skip {
    lex.extras += 1;
    Skip
}

/// Consume a string body up to the closing quote. Strings may span lines.
fn string_callback(lex: &mut LLexer<Lexeme>) -> Result<String, LexicalError> {
    let remainder = lex.remainder();
    match remainder.find('"') {
        Some(end) => {
            let content = &remainder[..end];
            lex.extras += content.matches('\n').count();
            lex.bump(end + 1);
            Ok(content.to_string())
        }
        None => {
            lex.extras += remainder.matches('\n').count();
            lex.bump(remainder.len());
            Err(LexicalError::UnterminatedString)
        }
    }
}

/// Skip a `/* ... */` comment. Comments do not nest.
fn block_comment_callback(lex: &mut LLexer<Lexeme>) -> FilterResult<(), LexicalError> {
    let remainder = lex.remainder();
    match remainder.find("*/") {
        Some(end) => {
            lex.extras += remainder[..end].matches('\n').count();
            lex.bump(end + 2);
            FilterResult::Skip
        }
        None => {
            lex.extras += remainder.matches('\n').count();
            lex.bump(remainder.len());
            FilterResult::Error(LexicalError::UnterminatedComment)
        }
    }
}

#[derive(Debug, Logos, PartialEq, Clone)]
#[logos(error = LexicalError)]
#[logos(extras = usize)]
#[logos(skip r"[ \t\r]+")] // Skip whitespace
#[logos(skip r"//[^\n]*")] // Skip single-line comments
enum Lexeme {
    #[token("\n", newline_callback)]
    Newline,
    #[token("/*", block_comment_callback)]
    BlockComment,

    // Delimiters
    #[token("(")]
    LeftParen,
    #[token(")")]
    RightParen,
    #[token("{")]
    LeftBrace,
    #[token("}")]
    RightBrace,
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,
    #[token(";")]
    Semicolon,
    #[token("?")]
    QuestionMark,
    #[token(":")]
    Colon,

    // Operators
    #[token("-")]
    Minus,
    #[token("+")]
    Plus,
    #[token("/")]
    Slash,
    #[token("*")]
    Star,
    #[token("!")]
    Bang,
    #[token("!=")]
    BangEqual,
    #[token("=")]
    Equal,
    #[token("==")]
    EqualEqual,
    #[token(">")]
    Greater,
    #[token(">=")]
    GreaterEqual,
    #[token("<")]
    Less,
    #[token("<=")]
    LessEqual,

    // Literals and Identifiers
    #[regex("[a-zA-Z_][a-zA-Z0-9_]*")]
    Identifier,

    #[token("\"", string_callback)]
    String(String),

    #[regex(r"[0-9]+", |lex| lex.slice().parse().ok())]
    #[regex(r"[0-9]+\.[0-9]+", |lex| lex.slice().parse().ok())]
    Number(f64),

    // Keywords
    #[token("and")]
    And,
    #[token("class")]
    Class,
    #[token("else")]
    Else,
    #[token("false")]
    False,
    #[token("for")]
    For,
    #[token("fun")]
    Fun,
    #[token("if")]
    If,
    #[token("nil")]
    Nil,
    #[token("or")]
    Or,
    #[token("print")]
    Print,
    #[token("return")]
    Return,
    #[token("super")]
    Super,
    #[token("this")]
    This,
    #[token("true")]
    True,
    #[token("var")]
    Var,
    #[token("while")]
    While,
}

impl Lexeme {
    fn into_kind(self) -> (TokenKind, Option<Literal>) {
        let kind = match self {
            Lexeme::String(text) => return (TokenKind::String, Some(Literal::String(text))),
            Lexeme::Number(n) => return (TokenKind::Number, Some(Literal::Number(n))),
            // Both are skipped by their callbacks and never reach here.
            Lexeme::Newline | Lexeme::BlockComment => unreachable!("skipped lexeme emitted"),
            Lexeme::LeftParen => TokenKind::LeftParen,
            Lexeme::RightParen => TokenKind::RightParen,
            Lexeme::LeftBrace => TokenKind::LeftBrace,
            Lexeme::RightBrace => TokenKind::RightBrace,
            Lexeme::Comma => TokenKind::Comma,
            Lexeme::Dot => TokenKind::Dot,
            Lexeme::Semicolon => TokenKind::Semicolon,
            Lexeme::QuestionMark => TokenKind::QuestionMark,
            Lexeme::Colon => TokenKind::Colon,
            Lexeme::Minus => TokenKind::Minus,
            Lexeme::Plus => TokenKind::Plus,
            Lexeme::Slash => TokenKind::Slash,
            Lexeme::Star => TokenKind::Star,
            Lexeme::Bang => TokenKind::Bang,
            Lexeme::BangEqual => TokenKind::BangEqual,
            Lexeme::Equal => TokenKind::Equal,
            Lexeme::EqualEqual => TokenKind::EqualEqual,
            Lexeme::Greater => TokenKind::Greater,
            Lexeme::GreaterEqual => TokenKind::GreaterEqual,
            Lexeme::Less => TokenKind::Less,
            Lexeme::LessEqual => TokenKind::LessEqual,
            Lexeme::Identifier => TokenKind::Identifier,
            Lexeme::And => TokenKind::And,
            Lexeme::Class => TokenKind::Class,
            Lexeme::Else => TokenKind::Else,
            Lexeme::False => TokenKind::False,
            Lexeme::For => TokenKind::For,
            Lexeme::Fun => TokenKind::Fun,
            Lexeme::If => TokenKind::If,
            Lexeme::Nil => TokenKind::Nil,
            Lexeme::Or => TokenKind::Or,
            Lexeme::Print => TokenKind::Print,
            Lexeme::Return => TokenKind::Return,
            Lexeme::Super => TokenKind::Super,
            Lexeme::This => TokenKind::This,
            Lexeme::True => TokenKind::True,
            Lexeme::Var => TokenKind::Var,
            Lexeme::While => TokenKind::While,
        };
        (kind, None)
    }
}

pub struct Lexer<'a> {
    inner: logos::Lexer<'a, Lexeme>,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        let mut inner = Lexeme::lexer(input);
        inner.extras = 1;
        Self { inner }
    }

    /// Current 1-based line.
    pub fn line(&self) -> usize {
        self.inner.extras
    }

    /// Scan the whole input. Errors go to `reporter` and produce no token;
    /// the result always ends with exactly one end-of-input token.
    pub fn scan_tokens(mut self, reporter: &mut dyn Reporter) -> Vec<Token> {
        let span = tracing::debug_span!("scan");
        let _enter = span.enter();

        let mut tokens = Vec::new();
        while let Some(result) = self.next() {
            match result {
                Ok(token) => tokens.push(token),
                Err((error, line)) => reporter.error(line, "", &error.to_string()),
            }
        }
        tokens.push(Token::eof(self.line()));

        tracing::debug!(count = tokens.len(), "scan finished");
        tokens
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Result<Token, (LexicalError, usize)>;

    fn next(&mut self) -> Option<Self::Item> {
        let result = self.inner.next()?;
        let line = self.inner.extras;
        Some(match result {
            Ok(lexeme) => {
                let (kind, literal) = lexeme.into_kind();
                let token = Token::new(kind, self.inner.slice(), literal, line);
                tracing::trace!(%token, line, "token");
                Ok(token)
            }
            Err(error) => Err((error, line)),
        })
    }
}

/// Scan `source` into tokens.
pub fn scan(source: &str, reporter: &mut dyn Reporter) -> Vec<Token> {
    Lexer::new(source).scan_tokens(reporter)
}
