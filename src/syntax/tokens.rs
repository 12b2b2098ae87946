pub use crate::source_pos::Spanned;

pub type SpannedTok<'a> = Spanned<Token<'a>>;

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Token<'a> {
    Op(&'a str),

    // Kept as text, the parser decides whether it is a valid float
    Num(&'a str),

    Ident(&'a str),

    Delimiter(Delimiter),
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Delimiter {
    LParen,
    RParen,
}

impl Delimiter {
    pub fn as_char(self) -> char {
        match self {
            Delimiter::LParen => '(',
            Delimiter::RParen => ')',
        }
    }
}
