use std::collections::VecDeque;

use indexmap::IndexSet;
use itertools::Itertools;

use crate::grammars::{context_free::ContextFreeGrammar, types::NonTerminal};

impl ContextFreeGrammar {
    /// Non-terminals reachable from the start symbol, in discovery order.
    pub fn accessible_non_terminals(&self) -> IndexSet<NonTerminal> {
        let mut accessible = IndexSet::new();
        let mut worklist = VecDeque::from([self.start_symbol.clone()]);

        while let Some(current) = worklist.pop_front() {
            if !accessible.insert(current.clone()) {
                continue;
            }

            let Some(rhs) = self.productions.get(&current) else {
                continue;
            };

            for nt in rhs.iter().flat_map(|word| word.non_terminals()) {
                if !accessible.contains(nt) {
                    worklist.push_back(nt.clone());
                }
            }
        }

        accessible
    }

    /// Drops every non-terminal the start symbol cannot reach, together
    /// with its productions.
    pub fn remove_inaccessible_symbols(&self) -> Self {
        let accessible = self.accessible_non_terminals();

        let (non_terminals, removed): (IndexSet<_>, IndexSet<_>) = self
            .non_terminals
            .iter()
            .cloned()
            .partition(|nt| accessible.contains(nt));

        if !removed.is_empty() {
            log::debug!(
                "removing inaccessible symbols: {}",
                removed.iter().join(", ")
            );
        }

        let productions = self
            .productions
            .iter()
            .filter(|(lhs, _)| non_terminals.contains(*lhs))
            .map(|(lhs, rhs)| (lhs.clone(), rhs.clone()))
            .collect();

        self.with_productions(non_terminals, productions)
    }
}
