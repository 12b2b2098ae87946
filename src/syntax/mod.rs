pub mod ast;

pub mod lexer;

pub mod operators;

pub mod parser;

pub mod printer;

pub mod rpn;

pub mod tokens;

pub use ast::*;
pub use lexer::*;
pub use operators::*;
pub use parser::*;
pub use printer::*;
pub use rpn::*;
pub use tokens::*;
