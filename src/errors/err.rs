use thiserror::Error;

pub type ParseResult<T> = Result<T, ParseError>;

/// The first failure met while reading an expression. Every position is the
/// 1-based character offset of the offending token or operator.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("There is unknown token '{token}' in expression at pos {pos}")]
    UnknownToken { token: String, pos: usize },

    #[error("There is unpaired bracket '{bracket}' in expression at pos {pos}")]
    UnpairedBracket { bracket: char, pos: usize },

    #[error("Expected {expected} operands for operation {op} at pos {pos} have only {available}")]
    MissingOperand {
        op: &'static str,
        pos: usize,
        expected: usize,
        available: usize,
    },

    #[error("Missing operation in expression at pos {pos}")]
    MissingOperation { pos: usize },

    #[error("Expression nests deeper than {limit} operations at pos {pos}")]
    TooDeep { limit: usize, pos: usize },
}

impl ParseError {
    pub fn unknown_token(token: impl Into<String>, pos: usize) -> Self {
        ParseError::UnknownToken {
            token: token.into(),
            pos,
        }
    }

    pub fn position(&self) -> usize {
        match self {
            ParseError::UnknownToken { pos, .. }
            | ParseError::UnpairedBracket { pos, .. }
            | ParseError::MissingOperand { pos, .. }
            | ParseError::MissingOperation { pos }
            | ParseError::TooDeep { pos, .. } => *pos,
        }
    }
}
