//! The rewrites that bring a context-free grammar into Chomsky normal form.
//!
//! Each stage is a pure function from grammar to grammar, so stages can be
//! run, repeated and inspected on their own. [`to_cnf`] chains them in the
//! fixed order of [`Stage::ALL`].

mod binarization;
mod epsilon;
mod fixpoint;
mod inaccessible;
mod nonproductive;
mod pipeline;
mod unit;

pub use binarization::FreshSymbols;
pub use pipeline::{to_cnf, to_cnf_stages, Stage};

use crate::{error::Result, grammars::context_free::ContextFreeGrammar};

pub fn eliminate_epsilon(grammar: &ContextFreeGrammar) -> Result<ContextFreeGrammar> {
    grammar.eliminate_epsilon()
}

pub fn remove_unit_productions(grammar: &ContextFreeGrammar) -> Result<ContextFreeGrammar> {
    grammar.remove_unit_productions()
}

pub fn remove_inaccessible_symbols(grammar: &ContextFreeGrammar) -> ContextFreeGrammar {
    grammar.remove_inaccessible_symbols()
}

pub fn remove_nonproductive_symbols(grammar: &ContextFreeGrammar) -> Result<ContextFreeGrammar> {
    grammar.remove_nonproductive_symbols()
}

pub fn binarize(grammar: &ContextFreeGrammar) -> Result<ContextFreeGrammar> {
    grammar.binarize()
}
