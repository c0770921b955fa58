use std::fmt;

use super::predicate::{Literal, Predicate};
use super::utils::is_identifier_char;
use super::Error;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Token<'a> {
    LeftParen(usize),
    RightParen(usize),
    Comma(usize),
    Identifier(usize, &'a str),
}

impl Token<'_> {
    fn col(&self) -> usize {
        match self {
            Token::LeftParen(col) | Token::RightParen(col) | Token::Comma(col) | Token::Identifier(col, _) => *col,
        }
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Token::LeftParen(_) => write!(f, "("),
            Token::RightParen(_) => write!(f, ")"),
            Token::Comma(_) => write!(f, ","),
            Token::Identifier(_, word) => write!(f, "{}", word),
        }
    }
}

pub struct Lexer;

impl Lexer {
    /// Columns are 1-based, whitespace separates tokens and is otherwise ignored.
    pub fn tokenize(text: &str) -> Result<Vec<Token<'_>>, Error> {
        let mut tokens = Vec::new();
        let mut word_start: Option<usize> = None;
        for (idx, c) in text.char_indices() {
            if is_identifier_char(c) {
                if word_start.is_none() {
                    word_start = Some(idx);
                }
                continue;
            }
            if let Some(start) = word_start.take() {
                tokens.push(Token::Identifier(start + 1, &text[start..idx]));
            }
            match c {
                '(' => tokens.push(Token::LeftParen(idx + 1)),
                ')' => tokens.push(Token::RightParen(idx + 1)),
                ',' => tokens.push(Token::Comma(idx + 1)),
                c if c.is_whitespace() => (),
                c => return Err(Error::format(idx + 1, format!("Unexpected character {:?}.", c))),
            }
        }
        if let Some(start) = word_start {
            tokens.push(Token::Identifier(start + 1, &text[start..]));
        }
        Ok(tokens)
    }
}

const EXPECTED_PREDICATE: &str = "Expected predicate At or In.";
const EXPECTED_IDENTIFIER: &str = "Expected identifier.";
const EXPECTED_OPEN_PARENTHESIS: &str = "Expected '('.";
const EXPECTED_COMMA: &str = "Expected ','.";
const EXPECTED_CLOSE_PARENTHESIS: &str = "Expected matched ')'.";

macro_rules! expect {
    ($tokens:expr, $end:expr, {$($p:pat => $b:expr$(,)?)+}, $err:expr) => {
        match $tokens.next() {
            $(Some($p) => $b,)+
            Some(t) => Err(Error::format(t.col(), format!("{} got '{}'", $err, t))),
            None => Err(Error::format($end, $err)),
        }
    };
}

/// Parses `Predicate(arg1, arg2)` into a [`Literal`].
pub fn parse_literal(text: &str) -> Result<Literal, Error> {
    let tokens = Lexer::tokenize(text)?;
    let end = text.len() + 1;
    let mut tokens = tokens.into_iter();
    let predicate = expect!(tokens, end, {
        Token::Identifier(_, "At") => Ok(Predicate::At),
        Token::Identifier(_, "In") => Ok(Predicate::In),
    }, EXPECTED_PREDICATE)?;
    expect!(tokens, end, {Token::LeftParen(_) => Ok(())}, EXPECTED_OPEN_PARENTHESIS)?;
    let first = expect!(tokens, end, {Token::Identifier(_, s) => Ok(s)}, EXPECTED_IDENTIFIER)?;
    expect!(tokens, end, {Token::Comma(_) => Ok(())}, EXPECTED_COMMA)?;
    let second = expect!(tokens, end, {Token::Identifier(_, s) => Ok(s)}, EXPECTED_IDENTIFIER)?;
    expect!(tokens, end, {Token::RightParen(_) => Ok(())}, EXPECTED_CLOSE_PARENTHESIS)?;
    if let Some(t) = tokens.next() {
        return Err(Error::format(t.col(), format!("Unexpected trailing '{}'.", t)));
    }
    Ok(Literal::new(predicate, first, second))
}
