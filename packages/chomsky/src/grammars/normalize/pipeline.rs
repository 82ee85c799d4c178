use derive_more::Display;

use crate::{
    error::Result,
    grammars::{
        context_free::ContextFreeGrammar, normalize::binarization::FreshSymbols, types::Grammar,
    },
};

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    #[display("ε-production elimination")]
    EliminateEpsilon,
    #[display("unit production removal")]
    RemoveUnitProductions,
    #[display("inaccessible symbol removal")]
    RemoveInaccessibleSymbols,
    #[display("non-productive symbol removal")]
    RemoveNonProductiveSymbols,
    #[display("binarization")]
    Binarize,
}

impl Stage {
    /// Pipeline order. Inaccessible and non-productive symbols are each
    /// pruned exactly once, so a symbol that only becomes useless after the
    /// second pruning survives into the output.
    pub const ALL: [Stage; 5] = [
        Stage::EliminateEpsilon,
        Stage::RemoveUnitProductions,
        Stage::RemoveInaccessibleSymbols,
        Stage::RemoveNonProductiveSymbols,
        Stage::Binarize,
    ];

    pub fn apply(
        self,
        grammar: &ContextFreeGrammar,
        fresh: &mut FreshSymbols,
    ) -> Result<ContextFreeGrammar> {
        match self {
            Stage::EliminateEpsilon => grammar.eliminate_epsilon(),
            Stage::RemoveUnitProductions => grammar.remove_unit_productions(),
            Stage::RemoveInaccessibleSymbols => Ok(grammar.remove_inaccessible_symbols()),
            Stage::RemoveNonProductiveSymbols => grammar.remove_nonproductive_symbols(),
            Stage::Binarize => grammar.binarize_with(fresh),
        }
    }
}

/// Runs every stage and keeps the grammar produced by each one.
pub fn to_cnf_stages(grammar: &ContextFreeGrammar) -> Result<Vec<(Stage, ContextFreeGrammar)>> {
    let mut fresh = FreshSymbols::default();
    let mut stages: Vec<(Stage, ContextFreeGrammar)> = Vec::with_capacity(Stage::ALL.len());

    for stage in Stage::ALL {
        let input = stages.last().map_or(grammar, |(_, g)| g);
        let output = stage.apply(input, &mut fresh)?;

        log::debug!(
            "after {stage}: {} non-terminals, {} productions",
            output.non_terminals.len(),
            output.production_count()
        );

        stages.push((stage, output));
    }

    Ok(stages)
}

/// Brings `grammar` into Chomsky normal form.
pub fn to_cnf(grammar: &ContextFreeGrammar) -> Result<ContextFreeGrammar> {
    let mut fresh = FreshSymbols::default();
    let mut current = grammar.clone();

    for stage in Stage::ALL {
        current = stage.apply(&current, &mut fresh)?;
    }

    Ok(current)
}

impl ContextFreeGrammar {
    pub fn to_cnf(&self) -> Result<ContextFreeGrammar> {
        to_cnf(self)
    }
}
