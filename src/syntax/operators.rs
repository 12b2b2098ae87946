use std::{fmt, str::FromStr};

use phf::phf_map;
use thiserror::Error;

/// How many operands an operation takes. Variadic operations take whatever
/// their bracket group encloses, possibly nothing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Arity {
    Fixed(usize),
    Variadic,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Op {
    Add,
    Sub,
    Mul,
    Div,
    Negate,
    Sum,
    Avg,
    Sumsq,
    Length,
    Atan,
    Atan2,
    Sinh,
    Cosh,
}

impl Op {
    pub fn symbol(self) -> &'static str {
        match self {
            Op::Add => "+",
            Op::Sub => "-",
            Op::Mul => "*",
            Op::Div => "/",
            Op::Negate => "negate",
            Op::Sum => "sum",
            Op::Avg => "avg",
            Op::Sumsq => "sumsq",
            Op::Length => "length",
            Op::Atan => "atan",
            Op::Atan2 => "atan2",
            Op::Sinh => "sinh",
            Op::Cosh => "cosh",
        }
    }

    pub fn arity(self) -> Arity {
        match self {
            Op::Negate | Op::Atan | Op::Sinh | Op::Cosh => Arity::Fixed(1),
            Op::Add | Op::Sub | Op::Mul | Op::Div | Op::Atan2 => Arity::Fixed(2),
            Op::Sum | Op::Avg | Op::Sumsq | Op::Length => Arity::Variadic,
        }
    }

    pub fn accepts(self, operands: usize) -> bool {
        match self.arity() {
            Arity::Fixed(n) => n == operands,
            Arity::Variadic => true,
        }
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Symbols shared by both catalogs.
pub static ARITHMETIC_TABLE: phf::Map<&'static str, Op> = phf_map! {
    "+" => Op::Add,
    "-" => Op::Sub,
    "*" => Op::Mul,
    "/" => Op::Div,
    "negate" => Op::Negate,
};

pub static VARIADIC_TABLE: phf::Map<&'static str, Op> = phf_map! {
    "sum" => Op::Sum,
    "avg" => Op::Avg,
    "sumsq" => Op::Sumsq,
    "length" => Op::Length,
};

pub static TRANSCENDENTAL_TABLE: phf::Map<&'static str, Op> = phf_map! {
    "atan" => Op::Atan,
    "atan2" => Op::Atan2,
    "sinh" => Op::Sinh,
    "cosh" => Op::Cosh,
};

/// The set of operation symbols a parser recognises.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Catalog {
    /// Arithmetic plus the bracket-scoped `sum`, `avg`, `sumsq`, `length`.
    Standard,
    /// Arithmetic plus `atan`, `atan2`, `sinh`, `cosh`. No variadics.
    Transcendental,
}

impl Catalog {
    /// Operations beyond plain arithmetic.
    pub fn extension(self) -> &'static phf::Map<&'static str, Op> {
        match self {
            Catalog::Standard => &VARIADIC_TABLE,
            Catalog::Transcendental => &TRANSCENDENTAL_TABLE,
        }
    }

    pub fn lookup(self, sym: &str) -> Option<Op> {
        ARITHMETIC_TABLE
            .get(sym)
            .or_else(|| self.extension().get(sym))
            .copied()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Catalog::Standard
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
#[error("unknown operation catalog '{0}'")]
pub struct UnknownCatalog(pub String);

impl FromStr for Catalog {
    type Err = UnknownCatalog;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "standard" => Ok(Catalog::Standard),
            "transcendental" => Ok(Catalog::Transcendental),
            _ => Err(UnknownCatalog(s.to_owned())),
        }
    }
}
