//! Error types for grammar construction and normalization

use thiserror::Error;

use crate::{
    grammars::types::{Body, NonTerminal},
    language::Symbol,
};

/// Structural problems detected while building a grammar.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MalformedGrammarError {
    #[error("start symbol {0} is not a declared non-terminal")]
    MissingStartSymbol(NonTerminal),

    #[error("symbol {0} is declared both as a terminal and as a non-terminal")]
    OverlappingAlphabets(Symbol),

    #[error("productions are given for {0}, which is not a declared non-terminal")]
    UndeclaredNonTerminal(NonTerminal),

    #[error("production {lhs} → {body} references undeclared symbol {symbol}")]
    UndeclaredSymbol {
        lhs: NonTerminal,
        body: String,
        symbol: String,
    },

    #[error("symbol names must not be empty")]
    EmptySymbol,
}

/// Errors that can occur while building, reading or normalizing a grammar
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GrammarError {
    #[error("malformed grammar: {0}")]
    Malformed(#[from] MalformedGrammarError),

    #[error("fresh non-terminal {symbol} collides with an existing symbol")]
    FreshSymbolCollision { symbol: Symbol },

    #[error("{closure} closure did not stabilise within {bound} rounds")]
    ClosureNonTermination { closure: &'static str, bound: usize },

    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("production {non_terminal} → {body} is not in Chomsky normal form")]
    NotInNormalForm {
        non_terminal: NonTerminal,
        body: Body,
    },
}

pub type Result<T> = std::result::Result<T, GrammarError>;
