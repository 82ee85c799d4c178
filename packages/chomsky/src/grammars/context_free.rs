use std::borrow::Cow;

use indexmap::{IndexMap, IndexSet};

use crate::{
    error::{MalformedGrammarError, Result},
    grammars::types::{Body, Grammar, NonTerminal, ProductionSymbol, Terminal},
    language::{Word, EPSILON},
};

/// A context-free grammar with explicitly declared alphabets.
///
/// Every declared non-terminal has an entry in `productions` (possibly
/// empty), every symbol used in a body is declared, and the bodies of one
/// non-terminal never repeat. Normalization stages build new grammars and
/// leave `self` untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextFreeGrammar {
    pub(super) start_symbol: NonTerminal,
    pub(super) non_terminals: IndexSet<NonTerminal>,
    pub(super) terminals: IndexSet<Terminal>,
    pub(super) productions: IndexMap<NonTerminal, IndexSet<Body>>,
}

impl Grammar<Body> for ContextFreeGrammar {
    fn start_symbol(&self) -> &NonTerminal {
        &self.start_symbol
    }

    fn non_terminals(&self) -> Cow<'_, IndexSet<NonTerminal>> {
        Cow::Borrowed(&self.non_terminals)
    }

    fn terminals(&self) -> Cow<'_, IndexSet<Terminal>> {
        Cow::Borrowed(&self.terminals)
    }

    fn productions(&self) -> &IndexMap<NonTerminal, IndexSet<Body>> {
        &self.productions
    }
}

impl ContextFreeGrammar {
    pub fn new<P, B>(
        non_terminals: impl IntoIterator<Item = NonTerminal>,
        terminals: impl IntoIterator<Item = Terminal>,
        productions: P,
        start_symbol: NonTerminal,
    ) -> Result<Self>
    where
        P: IntoIterator<Item = (NonTerminal, B)>,
        B: IntoIterator<Item = Body>,
    {
        let non_terminals = non_terminals.into_iter().collect::<IndexSet<_>>();
        let terminals = terminals.into_iter().collect::<IndexSet<_>>();

        if !non_terminals.contains(&start_symbol) {
            return Err(MalformedGrammarError::MissingStartSymbol(start_symbol).into());
        }

        if let Some(t) = terminals
            .iter()
            .find(|t| non_terminals.contains(&NonTerminal(t.0.clone())))
        {
            return Err(MalformedGrammarError::OverlappingAlphabets(t.0.clone()).into());
        }

        let mut table = non_terminals
            .iter()
            .map(|nt| (nt.clone(), IndexSet::new()))
            .collect::<IndexMap<_, _>>();

        for (lhs, bodies) in productions {
            let Some(entry) = table.get_mut(&lhs) else {
                return Err(MalformedGrammarError::UndeclaredNonTerminal(lhs).into());
            };

            for body in bodies {
                let undeclared = body.iter().find(|symbol| match symbol {
                    ProductionSymbol::Terminal(t) => !terminals.contains(t),
                    ProductionSymbol::NonTerminal(nt) => !non_terminals.contains(nt),
                });

                if let Some(symbol) = undeclared {
                    return Err(MalformedGrammarError::UndeclaredSymbol {
                        body: body.to_string(),
                        symbol: symbol.to_string(),
                        lhs,
                    }
                    .into());
                }

                entry.insert(body);
            }
        }

        Ok(Self {
            start_symbol,
            non_terminals,
            terminals,
            productions: table,
        })
    }

    /// Builds a grammar from symbol names. Each body is a list of names,
    /// classified by the alphabet that declares them; `[]` and `["ε"]` are
    /// the empty body.
    pub fn from_definition<'a>(
        non_terminals: &[&str],
        terminals: &[&str],
        productions: impl IntoIterator<Item = (&'a str, Vec<Vec<&'a str>>)>,
        start_symbol: &str,
    ) -> Result<Self> {
        let non_terminals = non_terminals
            .iter()
            .map(|&name| NonTerminal::try_new(name))
            .collect::<std::result::Result<IndexSet<_>, _>>()?;
        let terminals = terminals
            .iter()
            .map(|&name| Terminal::try_new(name))
            .collect::<std::result::Result<IndexSet<_>, _>>()?;

        let classify = |name: &str| {
            let nt = NonTerminal::try_new(name).ok()?;
            if non_terminals.contains(&nt) {
                return Some(ProductionSymbol::NonTerminal(nt));
            }

            let t = Terminal(nt.0);
            terminals
                .contains(&t)
                .then_some(ProductionSymbol::Terminal(t))
        };

        let mut table = Vec::new();
        for (lhs, bodies) in productions {
            let lhs = NonTerminal::try_new(lhs)?;

            let mut words = Vec::with_capacity(bodies.len());
            for body in bodies {
                if body == [EPSILON] {
                    words.push(Word::epsilon());
                    continue;
                }

                let word = body
                    .iter()
                    .map(|&name| {
                        classify(name).ok_or_else(|| MalformedGrammarError::UndeclaredSymbol {
                            lhs: lhs.clone(),
                            body: Word::new(body.iter().copied()).to_string(),
                            symbol: name.to_string(),
                        })
                    })
                    .collect::<std::result::Result<Word<_>, _>>()?;

                words.push(word);
            }

            table.push((lhs, words));
        }

        Self::new(
            non_terminals,
            terminals,
            table,
            NonTerminal::try_new(start_symbol)?,
        )
    }

    /// Stages preserve the construction invariants, so they rebuild
    /// without validating again.
    pub(crate) fn with_productions(
        &self,
        non_terminals: IndexSet<NonTerminal>,
        productions: IndexMap<NonTerminal, IndexSet<Body>>,
    ) -> Self {
        Self {
            start_symbol: self.start_symbol.clone(),
            non_terminals,
            terminals: self.terminals.clone(),
            productions,
        }
    }
}
