use indexmap::IndexSet;
use itertools::Itertools;

use crate::{
    error::Result,
    grammars::{
        context_free::ContextFreeGrammar,
        normalize::fixpoint::saturate,
        types::{Body, NonTerminal, ProductionSymbol},
    },
    language::Word,
};

impl ContextFreeGrammar {
    /// Non-terminals that derive ε.
    pub fn nullable_non_terminals(&self) -> Result<IndexSet<NonTerminal>> {
        let mut nullable = IndexSet::new();

        saturate("nullable", self.non_terminals.len(), || {
            let mut changed = false;

            for (lhs, rhs) in &self.productions {
                if nullable.contains(lhs) {
                    continue;
                }

                let is_lhs_nullable = rhs.iter().any(|word| {
                    word.iter().all(|symbol| match symbol {
                        ProductionSymbol::NonTerminal(nt) => nullable.contains(nt),
                        ProductionSymbol::Terminal(_) => false,
                    })
                });

                if is_lhs_nullable {
                    nullable.insert(lhs.clone());
                    changed = true;
                }
            }

            changed
        })?;

        Ok(nullable)
    }

    /// Drops every ε body and adds, for each remaining body, every variant
    /// obtained by leaving out some of its nullable occurrences. The variant
    /// with everything left out is never added.
    ///
    /// A nullable start symbol is not special-cased: the language loses ε.
    pub fn eliminate_epsilon(&self) -> Result<Self> {
        let nullable = self.nullable_non_terminals()?;

        log::debug!(
            "eliminating ε-productions, nullable: {{{}}}",
            nullable.iter().join(", ")
        );

        let productions = self
            .productions
            .iter()
            .map(|(lhs, rhs)| {
                let expanded = rhs
                    .iter()
                    .filter(|word| !word.is_empty())
                    .flat_map(|word| expand_nullable(word, &nullable))
                    .collect::<IndexSet<_>>();

                (lhs.clone(), expanded)
            })
            .collect();

        Ok(self.with_productions(self.non_terminals.clone(), productions))
    }
}

fn expand_nullable<'a>(
    word: &'a Body,
    nullable: &'a IndexSet<NonTerminal>,
) -> impl Iterator<Item = Body> + 'a {
    word.iter()
        .map(|symbol| match symbol {
            ProductionSymbol::NonTerminal(nt) if nullable.contains(nt) => {
                vec![Some(symbol), None]
            }
            _ => vec![Some(symbol)],
        })
        .multi_cartesian_product()
        .filter_map(|choice| {
            let word = choice.into_iter().flatten().cloned().collect::<Word<_>>();
            (!word.is_empty()).then_some(word)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammars::types::Grammar;

    fn bodies(grammar: &ContextFreeGrammar, nt: &str) -> Vec<String> {
        grammar
            .bodies(&NonTerminal::new(nt))
            .map(ToString::to_string)
            .collect()
    }

    #[test]
    fn nullable_closure_follows_chains() {
        let grammar =
            ContextFreeGrammar::parse("S → A B | a\nA → B B\nB → ε | b\nC → a C").unwrap();

        let nullable = grammar.nullable_non_terminals().unwrap();
        let names = nullable
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>();

        assert_eq!(names, vec!["B", "A", "S"]);
    }

    #[test]
    fn expands_every_subset_of_nullable_occurrences() {
        let grammar = ContextFreeGrammar::parse("S → A b A\nA → a | ε").unwrap();

        let result = grammar.eliminate_epsilon().unwrap();

        assert_eq!(bodies(&result, "S"), vec!["AbA", "Ab", "bA", "b"]);
        assert_eq!(bodies(&result, "A"), vec!["a"]);
    }

    #[test]
    fn all_nullable_bodies_keep_their_non_empty_variants() {
        let grammar = ContextFreeGrammar::parse("S → A A\nA → a | ε").unwrap();

        let result = grammar.eliminate_epsilon().unwrap();

        assert_eq!(bodies(&result, "S"), vec!["AA", "A"]);
    }

    #[test]
    fn epsilon_only_non_terminals_end_up_empty() {
        let grammar = ContextFreeGrammar::parse("S → a E\nE → ε").unwrap();

        let result = grammar.eliminate_epsilon().unwrap();

        assert_eq!(bodies(&result, "S"), vec!["aE", "a"]);
        assert!(bodies(&result, "E").is_empty());
    }

    #[test]
    fn leaves_the_input_untouched() {
        let grammar = ContextFreeGrammar::parse("S → a | ε").unwrap();
        let before = grammar.clone();

        let _ = grammar.eliminate_epsilon().unwrap();

        assert_eq!(grammar, before);
    }
}
