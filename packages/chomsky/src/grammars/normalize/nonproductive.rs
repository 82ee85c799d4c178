use indexmap::IndexSet;
use itertools::Itertools;

use crate::{
    error::Result,
    grammars::{
        context_free::ContextFreeGrammar,
        normalize::fixpoint::saturate,
        types::{Body, NonTerminal, ProductionSymbol},
    },
};

fn is_productive(word: &Body, productive: &IndexSet<NonTerminal>) -> bool {
    word.iter().all(|symbol| match symbol {
        ProductionSymbol::Terminal(_) => true,
        ProductionSymbol::NonTerminal(nt) => productive.contains(nt),
    })
}

impl ContextFreeGrammar {
    /// Non-terminals that derive at least one string of terminals.
    pub fn productive_non_terminals(&self) -> Result<IndexSet<NonTerminal>> {
        let mut productive = IndexSet::new();

        saturate("productive", self.non_terminals.len(), || {
            let mut changed = false;

            for (lhs, rhs) in &self.productions {
                if productive.contains(lhs) {
                    continue;
                }

                if rhs.iter().any(|word| is_productive(word, &productive)) {
                    productive.insert(lhs.clone());
                    changed = true;
                }
            }

            changed
        })?;

        Ok(productive)
    }

    /// Drops every non-productive non-terminal and every body mentioning
    /// one. The start symbol is kept even when it is not productive.
    pub fn remove_nonproductive_symbols(&self) -> Result<Self> {
        let productive = self.productive_non_terminals()?;

        let (non_terminals, removed): (IndexSet<_>, IndexSet<_>) = self
            .non_terminals
            .iter()
            .cloned()
            .partition(|nt| productive.contains(nt) || nt == &self.start_symbol);

        if !removed.is_empty() {
            log::debug!(
                "removing non-productive symbols: {}",
                removed.iter().join(", ")
            );
        }
        if !productive.contains(&self.start_symbol) {
            log::warn!(
                "start symbol {} derives no terminal string",
                self.start_symbol
            );
        }

        let productions = self
            .productions
            .iter()
            .filter(|(lhs, _)| non_terminals.contains(*lhs))
            .map(|(lhs, rhs)| {
                let rhs = rhs
                    .iter()
                    .filter(|word| is_productive(word, &productive))
                    .cloned()
                    .collect::<IndexSet<_>>();

                (lhs.clone(), rhs)
            })
            .collect();

        Ok(self.with_productions(non_terminals, productions))
    }
}
