use std::{iter::Peekable, str::CharIndices};

use log::trace;

use crate::{
    errors::err::*,
    syntax::tokens::{Delimiter, Spanned, SpannedTok, Token},
};

/// Splits an expression into tokens on demand. Spans count characters, not
/// bytes, so they can be reported to the user as-is.
pub struct Lexer<'a> {
    source: &'a str,
    chars: Peekable<CharIndices<'a>>,
    column: usize,
}

macro_rules! many {
    ($name: ident, $predicate: expr, $token: path) => {
        fn $name(&mut self, start: usize, column: usize) -> SpannedTok<'a> {
            let mut length = 1;
            let mut end = start + 1;
            while let Some((pos, c)) = self.next_if($predicate) {
                length += 1;
                end = pos + c.len_utf8();
            }
            Spanned {
                elem: $token(&self.source[start..end]),
                span: column..column + length,
            }
        }
    };
}

fn is_number_part(c: char) -> bool {
    c.is_ascii_digit() || c == '.'
}

fn is_ident_part(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit()
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.char_indices().peekable(),
            column: 0,
        }
    }

    pub fn tokenize(self) -> ParseResult<Vec<SpannedTok<'a>>> {
        self.collect()
    }

    /// 1-based position just past the last character consumed so far. Once
    /// the lexer is exhausted this is the end-of-input position.
    pub fn end_position(&self) -> usize {
        self.column + 1
    }

    many!(num, is_number_part, Token::Num);
    many!(ident, is_ident_part, Token::Ident);

    fn single(&self, elem: Token<'a>, column: usize) -> SpannedTok<'a> {
        Spanned {
            elem,
            span: column..column + 1,
        }
    }

    fn bump(&mut self) -> Option<(usize, char)> {
        let next = self.chars.next();
        if next.is_some() {
            self.column += 1;
        }
        next
    }

    fn next_if(&mut self, predicate: impl Fn(char) -> bool) -> Option<(usize, char)> {
        if predicate(self.peek()?.1) {
            return self.bump();
        }
        None
    }

    fn peek(&mut self) -> Option<&(usize, char)> {
        self.chars.peek()
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = ParseResult<SpannedTok<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let column = self.column;
            let (pos, char) = self.bump()?;
            let tok = match char {
                c if c.is_whitespace() => continue,
                c if c.is_ascii_lowercase() => self.ident(pos, column),
                c if is_number_part(c) => self.num(pos, column),
                // A minus glued to a digit or a dot is part of the literal
                '-' if matches!(self.peek(), Some((_, c)) if is_number_part(*c)) => {
                    self.num(pos, column)
                }
                '(' => self.single(Token::Delimiter(Delimiter::LParen), column),
                ')' => self.single(Token::Delimiter(Delimiter::RParen), column),
                '+' | '-' | '*' | '/' => self.single(Token::Op(&self.source[pos..pos + 1]), column),
                c => return Some(Err(ParseError::unknown_token(c, column + 1))),
            };
            trace!("token {:?} at {}", tok.elem, tok.position());
            return Some(Ok(tok));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn kinds(source: &str) -> Vec<(Token<'_>, usize)> {
        Lexer::new(source)
            .tokenize()
            .unwrap()
            .into_iter()
            .map(|t| (t.elem, t.position()))
            .collect()
    }

    #[test]
    fn brackets_operators_and_operands() {
        assert_eq!(
            kinds("(+ x 12.5)"),
            vec![
                (Token::Delimiter(Delimiter::LParen), 1),
                (Token::Op("+"), 2),
                (Token::Ident("x"), 4),
                (Token::Num("12.5"), 6),
                (Token::Delimiter(Delimiter::RParen), 10),
            ]
        );
    }

    #[test]
    fn minus_before_digit_is_a_literal() {
        assert_eq!(
            kinds("(- -3 x)"),
            vec![
                (Token::Delimiter(Delimiter::LParen), 1),
                (Token::Op("-"), 2),
                (Token::Num("-3"), 4),
                (Token::Ident("x"), 7),
                (Token::Delimiter(Delimiter::RParen), 8),
            ]
        );
        assert_eq!(kinds("-.5"), vec![(Token::Num("-.5"), 1)]);
        assert_eq!(kinds("- 5"), vec![(Token::Op("-"), 1), (Token::Num("5"), 3)]);
    }

    #[test]
    fn identifiers_take_digits_after_the_first_letter() {
        assert_eq!(
            kinds("atan2 sumsq"),
            vec![(Token::Ident("atan2"), 1), (Token::Ident("sumsq"), 7)]
        );
    }

    #[test]
    fn whitespace_is_skipped() {
        assert_eq!(kinds(" \t\n x  "), vec![(Token::Ident("x"), 5)]);
        assert_eq!(kinds("   "), vec![]);
    }

    #[test]
    fn unknown_character() {
        assert_eq!(
            Lexer::new("(x # y)").tokenize(),
            Err(ParseError::unknown_token("#", 4))
        );
        assert_eq!(
            Lexer::new("X").tokenize(),
            Err(ParseError::unknown_token("X", 1))
        );
    }

    #[test]
    fn positions_count_characters() {
        let err = Lexer::new("(éé)").tokenize().unwrap_err();
        assert_eq!(err, ParseError::unknown_token("é", 2));
        let err = Lexer::new("x é").tokenize().unwrap_err();
        assert_eq!(err, ParseError::unknown_token("é", 3));
    }

    #[test]
    fn end_position_after_exhaustion() {
        let mut lexer = Lexer::new("(x y +) ");
        while lexer.next().is_some() {}
        assert_eq!(lexer.end_position(), 9);
    }
}
