//! Tokenizer for condition text
//!
//! Produces a flat token stream with byte positions. Keywords (`and`, `or`,
//! `not`, `matches`, `true`, `false`, `null`) are left as identifiers and
//! recognized by the parser, so they remain usable as property names.

use crate::error::{ParseError, Result};
use std::fmt;

/// Variable sigil
pub const SIGIL: char = '#';

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Number(f64),
    Str(String),
    Ident(String),
    /// `#name`
    Variable(String),

    EqEq,
    NotEq,
    Lt,
    Le,
    Gt,
    Ge,
    AndAnd,
    OrOr,
    Bang,
    Plus,
    Minus,
    Star,
    Slash,
    Percent,

    Question,
    /// `?:`
    Elvis,
    /// `?.`
    SafeDot,
    Colon,
    Dot,
    Comma,
    LParen,
    RParen,
    LBracket,
    RBracket,
    LBrace,
    RBrace,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Number(n) => write!(f, "{}", n),
            Token::Str(s) => write!(f, "'{}'", s),
            Token::Ident(s) => f.write_str(s),
            Token::Variable(s) => write!(f, "{}{}", SIGIL, s),
            Token::EqEq => f.write_str("=="),
            Token::NotEq => f.write_str("!="),
            Token::Lt => f.write_str("<"),
            Token::Le => f.write_str("<="),
            Token::Gt => f.write_str(">"),
            Token::Ge => f.write_str(">="),
            Token::AndAnd => f.write_str("&&"),
            Token::OrOr => f.write_str("||"),
            Token::Bang => f.write_str("!"),
            Token::Plus => f.write_str("+"),
            Token::Minus => f.write_str("-"),
            Token::Star => f.write_str("*"),
            Token::Slash => f.write_str("/"),
            Token::Percent => f.write_str("%"),
            Token::Question => f.write_str("?"),
            Token::Elvis => f.write_str("?:"),
            Token::SafeDot => f.write_str("?."),
            Token::Colon => f.write_str(":"),
            Token::Dot => f.write_str("."),
            Token::Comma => f.write_str(","),
            Token::LParen => f.write_str("("),
            Token::RParen => f.write_str(")"),
            Token::LBracket => f.write_str("["),
            Token::RBracket => f.write_str("]"),
            Token::LBrace => f.write_str("{"),
            Token::RBrace => f.write_str("}"),
        }
    }
}

/// Token with its starting byte offset in the source
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned {
    pub token: Token,
    pub position: usize,
}

pub(crate) fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || c == '$'
}

pub(crate) fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '$'
}

/// Split condition text into tokens
pub fn tokenize(input: &str) -> Result<Vec<Spanned>> {
    let chars: Vec<(usize, char)> = input.char_indices().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    let peek = |i: usize| chars.get(i).map(|&(_, c)| c);

    while i < chars.len() {
        let (position, c) = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        // Two-character operators first
        let two = match (c, peek(i + 1)) {
            ('=', Some('=')) => Some(Token::EqEq),
            ('!', Some('=')) => Some(Token::NotEq),
            ('<', Some('=')) => Some(Token::Le),
            ('>', Some('=')) => Some(Token::Ge),
            ('&', Some('&')) => Some(Token::AndAnd),
            ('|', Some('|')) => Some(Token::OrOr),
            ('?', Some(':')) => Some(Token::Elvis),
            ('?', Some('.')) => Some(Token::SafeDot),
            _ => None,
        };
        if let Some(token) = two {
            tokens.push(Spanned { token, position });
            i += 2;
            continue;
        }

        let single = match c {
            '<' => Some(Token::Lt),
            '>' => Some(Token::Gt),
            '!' => Some(Token::Bang),
            '+' => Some(Token::Plus),
            '-' => Some(Token::Minus),
            '*' => Some(Token::Star),
            '/' => Some(Token::Slash),
            '%' => Some(Token::Percent),
            '?' => Some(Token::Question),
            ':' => Some(Token::Colon),
            '.' => Some(Token::Dot),
            ',' => Some(Token::Comma),
            '(' => Some(Token::LParen),
            ')' => Some(Token::RParen),
            '[' => Some(Token::LBracket),
            ']' => Some(Token::RBracket),
            '{' => Some(Token::LBrace),
            '}' => Some(Token::RBrace),
            _ => None,
        };
        if let Some(token) = single {
            tokens.push(Spanned { token, position });
            i += 1;
            continue;
        }

        if c == '\'' || c == '"' {
            let (s, next) = read_string(&chars, i)?;
            tokens.push(Spanned {
                token: Token::Str(s),
                position,
            });
            i = next;
            continue;
        }

        if c.is_ascii_digit() {
            let start = i;
            while peek(i).is_some_and(|c| c.is_ascii_digit()) {
                i += 1;
            }
            // Fraction only when a digit follows the dot, so `1.x` stays member access
            if peek(i) == Some('.') && peek(i + 1).is_some_and(|c| c.is_ascii_digit()) {
                i += 1;
                while peek(i).is_some_and(|c| c.is_ascii_digit()) {
                    i += 1;
                }
            }
            let text: String = chars[start..i].iter().map(|&(_, c)| c).collect();
            let n = text
                .parse::<f64>()
                .map_err(|_| ParseError::InvalidNumber(text.clone()))?;
            tokens.push(Spanned {
                token: Token::Number(n),
                position,
            });
            continue;
        }

        if c == SIGIL {
            if !peek(i + 1).is_some_and(is_ident_start) {
                return Err(ParseError::UnexpectedCharacter { ch: c, position });
            }
            i += 1;
            let name = read_ident(&chars, &mut i);
            tokens.push(Spanned {
                token: Token::Variable(name),
                position,
            });
            continue;
        }

        if is_ident_start(c) {
            let name = read_ident(&chars, &mut i);
            tokens.push(Spanned {
                token: Token::Ident(name),
                position,
            });
            continue;
        }

        return Err(ParseError::UnexpectedCharacter { ch: c, position });
    }

    Ok(tokens)
}

fn read_ident(chars: &[(usize, char)], i: &mut usize) -> String {
    let mut name = String::new();
    while let Some(&(_, c)) = chars.get(*i) {
        if !is_ident_char(c) {
            break;
        }
        name.push(c);
        *i += 1;
    }
    name
}

/// Read a quoted string; a doubled quote inside the literal escapes itself
fn read_string(chars: &[(usize, char)], start: usize) -> Result<(String, usize)> {
    let (position, quote) = chars[start];
    let mut s = String::new();
    let mut i = start + 1;

    while i < chars.len() {
        let c = chars[i].1;
        if c == quote {
            if chars.get(i + 1).map(|&(_, c)| c) == Some(quote) {
                s.push(quote);
                i += 2;
                continue;
            }
            return Ok((s, i + 1));
        }
        s.push(c);
        i += 1;
    }

    Err(ParseError::UnterminatedString(position))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(input: &str) -> Vec<Token> {
        tokenize(input).unwrap().into_iter().map(|s| s.token).collect()
    }

    #[test]
    fn test_tokenize_comparison() {
        assert_eq!(
            tokens("#trade.value >= 100"),
            vec![
                Token::Variable("trade".to_string()),
                Token::Dot,
                Token::Ident("value".to_string()),
                Token::Ge,
                Token::Number(100.0),
            ]
        );
    }

    #[test]
    fn test_tokenize_strings() {
        assert_eq!(
            tokens(r#"'it''s' "a#b""#),
            vec![
                Token::Str("it's".to_string()),
                Token::Str("a#b".to_string()),
            ]
        );
    }

    #[test]
    fn test_tokenize_elvis_and_safe_nav() {
        assert_eq!(
            tokens("#a?.b ?: 1"),
            vec![
                Token::Variable("a".to_string()),
                Token::SafeDot,
                Token::Ident("b".to_string()),
                Token::Elvis,
                Token::Number(1.0),
            ]
        );
    }

    #[test]
    fn test_tokenize_decimal() {
        assert_eq!(tokens("3.25"), vec![Token::Number(3.25)]);
    }

    #[test]
    fn test_tokenize_positions() {
        let spanned = tokenize("#x  == 1").unwrap();
        assert_eq!(spanned[0].position, 0);
        assert_eq!(spanned[1].position, 4);
        assert_eq!(spanned[2].position, 7);
    }

    #[test]
    fn test_tokenize_errors() {
        assert_eq!(
            tokenize("'open"),
            Err(ParseError::UnterminatedString(0))
        );
        assert_eq!(
            tokenize("1 @ 2"),
            Err(ParseError::UnexpectedCharacter {
                ch: '@',
                position: 2
            })
        );
        assert!(tokenize("# x").is_err());
    }
}
