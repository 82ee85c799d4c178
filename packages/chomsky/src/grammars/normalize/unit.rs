use indexmap::{IndexMap, IndexSet};
use itertools::Itertools;

use crate::{
    error::Result,
    grammars::{
        context_free::ContextFreeGrammar, normalize::fixpoint::saturate, types::NonTerminal,
    },
};

impl ContextFreeGrammar {
    /// For every non-terminal, the non-terminals it reaches through chains of
    /// unit productions, itself included.
    pub fn unit_closures(&self) -> Result<IndexMap<NonTerminal, IndexSet<NonTerminal>>> {
        let mut unit_closures = self
            .productions
            .iter()
            .map(|(nt, rhs)| {
                let mut unit_closure = IndexSet::from([nt.clone()]);
                unit_closure.extend(rhs.iter().filter_map(|word| word.unit_target()).cloned());

                (nt.clone(), unit_closure)
            })
            .collect::<IndexMap<_, _>>();

        saturate("unit", self.non_terminals.len(), || {
            let mut changed = false;

            for idx in 0..unit_closures.len() {
                let reachable = unit_closures[idx]
                    .iter()
                    .filter_map(|nt| unit_closures.get(nt))
                    .flatten()
                    .cloned()
                    .collect::<Vec<_>>();

                let before = unit_closures[idx].len();
                unit_closures[idx].extend(reachable);
                changed |= unit_closures[idx].len() != before;
            }

            changed
        })?;

        Ok(unit_closures)
    }

    /// Replaces the unit productions of every non-terminal with the non-unit
    /// bodies of everything in its unit closure.
    pub fn remove_unit_productions(&self) -> Result<Self> {
        let unit_closures = self.unit_closures()?;

        for (nt, closure) in &unit_closures {
            if closure.len() > 1 {
                log::trace!("unit closure of {nt}: {{{}}}", closure.iter().join(", "));
            }
        }

        let productions = unit_closures
            .iter()
            .map(|(nt, closure)| {
                let rhs = closure
                    .iter()
                    .filter_map(|member| self.productions.get(member))
                    .flatten()
                    .filter(|word| word.unit_target().is_none())
                    .cloned()
                    .collect::<IndexSet<_>>();

                (nt.clone(), rhs)
            })
            .collect::<IndexMap<_, _>>();

        log::debug!(
            "removed unit productions: {} bodies before, {} after",
            self.productions.values().map(IndexSet::len).sum::<usize>(),
            productions.values().map(IndexSet::len).sum::<usize>()
        );

        Ok(self.with_productions(self.non_terminals.clone(), productions))
    }
}
