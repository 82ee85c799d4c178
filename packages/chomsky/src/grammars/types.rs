use std::{borrow::Cow, fmt::Display};

use derive_more::Display;
use indexmap::{IndexMap, IndexSet};
use tabled::{builder::Builder, settings::Style, Table};

use crate::{
    error::MalformedGrammarError,
    language::{Symbol, Word},
};

#[derive(Debug, Display, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Terminal(pub Symbol);

impl Terminal {
    pub fn new(name: impl Into<String>) -> Self {
        Terminal(Symbol::new(name))
    }

    pub fn try_new(name: impl Into<String>) -> Result<Self, MalformedGrammarError> {
        Symbol::try_new(name).map(Terminal)
    }
}

#[derive(Debug, Display, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NonTerminal(pub Symbol);

impl NonTerminal {
    pub fn new(name: impl Into<String>) -> Self {
        NonTerminal(Symbol::new(name))
    }

    pub fn try_new(name: impl Into<String>) -> Result<Self, MalformedGrammarError> {
        Symbol::try_new(name).map(NonTerminal)
    }
}

#[derive(Debug, Display, Clone, PartialEq, Eq, Hash)]
pub enum ProductionSymbol {
    Terminal(Terminal),
    NonTerminal(NonTerminal),
}

impl ProductionSymbol {
    pub fn as_non_terminal(&self) -> Option<&NonTerminal> {
        match self {
            ProductionSymbol::NonTerminal(nt) => Some(nt),
            ProductionSymbol::Terminal(_) => None,
        }
    }
}

/// The right-hand side of a production. The empty body is ε.
pub type Body = Word<ProductionSymbol>;

impl Body {
    /// The target of a unit production `A → B`, if this body is one.
    pub fn unit_target(&self) -> Option<&NonTerminal> {
        match self.symbols() {
            [ProductionSymbol::NonTerminal(nt)] => Some(nt),
            _ => None,
        }
    }

    pub fn non_terminals(&self) -> impl Iterator<Item = &NonTerminal> {
        self.iter().filter_map(ProductionSymbol::as_non_terminal)
    }
}

pub trait ProductionWord: Display + Clone {
    fn to_word(&self) -> Body;
}

impl ProductionWord for Body {
    fn to_word(&self) -> Body {
        self.clone()
    }
}

pub trait Grammar<R: ProductionWord> {
    fn start_symbol(&self) -> &NonTerminal;
    fn non_terminals(&self) -> Cow<'_, IndexSet<NonTerminal>>;
    fn terminals(&self) -> Cow<'_, IndexSet<Terminal>>;
    fn productions(&self) -> &IndexMap<NonTerminal, IndexSet<R>>;

    fn bodies<'a>(&'a self, lhs: &NonTerminal) -> impl Iterator<Item = &'a R>
    where
        R: 'a,
    {
        self.productions().get(lhs).into_iter().flatten()
    }

    fn production_count(&self) -> usize {
        self.productions().values().map(IndexSet::len).sum()
    }

    fn definition(&self) -> String {
        let start_symbol = self.start_symbol();
        let mut non_terminals = self.non_terminals().into_owned();
        // The start symbol always leads.
        non_terminals.shift_remove(start_symbol);

        let mut definition = format!(
            "G = ({{{}}}, {{{}}}, P, {})\n\n",
            std::iter::once(start_symbol)
                .chain(non_terminals.iter())
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", "),
            self.terminals()
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", "),
            start_symbol
        );

        definition += "P = {\n";

        for (lhs, rhs) in self.productions() {
            definition += &format!("  {} → {}\n", lhs, join_set(rhs, " | "));
        }

        definition += "}\n";

        definition
    }

    fn production_table(&self) -> Table {
        let mut builder = Builder::default();

        builder.push_record(["", "Productions"]);
        for (lhs, rhs) in self.productions() {
            let marker = if lhs == self.start_symbol() {
                "→"
            } else {
                ""
            };
            builder.push_record([format!("{marker}{lhs}"), join_set(rhs, " | ")]);
        }

        let mut table = builder.build();
        table.with(Style::rounded());

        table
    }
}

/// Joins `items` with `separator`, or renders `∅` when there are none.
pub(crate) fn join_set<T: Display>(items: &IndexSet<T>, separator: &str) -> String {
    if items.is_empty() {
        "∅".to_string()
    } else {
        items
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(separator)
    }
}
