use std::collections::VecDeque;

use indexmap::{indexset, IndexMap, IndexSet};

use crate::{
    error::{GrammarError, Result},
    grammars::{
        context_free::ContextFreeGrammar,
        types::{Body, NonTerminal, ProductionSymbol, Terminal},
    },
    language::{Symbol, Word},
};

/// Mints the fresh non-terminals `Z<k>` introduced by binarization.
///
/// The counter only moves forward, so one instance threaded through a whole
/// pipeline run never hands out the same name twice.
#[derive(Debug, Clone, Default)]
pub struct FreshSymbols {
    next: usize,
}

impl FreshSymbols {
    pub const PREFIX: &'static str = "Z";

    pub fn new(next: usize) -> Self {
        Self { next }
    }

    pub fn peek(&self) -> usize {
        self.next
    }

    fn advance_to(&mut self, next: usize) {
        self.next = self.next.max(next);
    }

    fn mint(
        &mut self,
        non_terminals: &IndexSet<NonTerminal>,
        terminals: &IndexSet<Terminal>,
    ) -> Result<NonTerminal> {
        let symbol = Symbol::new(format!("{}{}", Self::PREFIX, self.next));
        self.next += 1;

        if non_terminals.contains(&NonTerminal(symbol.clone()))
            || terminals.contains(&Terminal(symbol.clone()))
        {
            return Err(GrammarError::FreshSymbolCollision { symbol });
        }

        Ok(NonTerminal(symbol))
    }
}

struct Binarizer<'a> {
    fresh: &'a mut FreshSymbols,
    terminals: &'a IndexSet<Terminal>,
    non_terminals: IndexSet<NonTerminal>,
    new_productions: IndexMap<NonTerminal, IndexSet<Body>>,
}

impl Binarizer<'_> {
    fn introduce(&mut self, word: Body) -> Result<NonTerminal> {
        let nt = self.fresh.mint(&self.non_terminals, self.terminals)?;
        log::trace!("introducing {nt} → {word}");

        self.non_terminals.insert(nt.clone());
        self.new_productions.insert(nt.clone(), indexset! {word});

        Ok(nt)
    }
}

impl ContextFreeGrammar {
    /// Brings bodies into the `A → BC` / `A → a` shape with a counter of its
    /// own. See [`ContextFreeGrammar::binarize_with`].
    pub fn binarize(&self) -> Result<Self> {
        self.binarize_with(&mut FreshSymbols::default())
    }

    /// Replaces every terminal inside a body of length two or more with a
    /// fresh non-terminal deriving just that terminal (one per terminal),
    /// then splits bodies longer than two by repeatedly replacing their
    /// first two symbols with a fresh non-terminal.
    ///
    /// The counter starts no lower than the number of declared
    /// non-terminals. Unit and ε bodies are left as they are.
    pub fn binarize_with(&self, fresh: &mut FreshSymbols) -> Result<Self> {
        fresh.advance_to(self.non_terminals.len());

        let mut binarizer = Binarizer {
            fresh,
            terminals: &self.terminals,
            non_terminals: self.non_terminals.clone(),
            new_productions: IndexMap::new(),
        };

        let mut isolated: IndexMap<Terminal, NonTerminal> = IndexMap::new();
        let mut isolated_productions = IndexMap::with_capacity(self.productions.len());

        for (lhs, rhs) in &self.productions {
            let mut next_rhs = IndexSet::with_capacity(rhs.len());

            for word in rhs {
                if word.len() < 2 {
                    next_rhs.insert(word.clone());
                    continue;
                }

                let mut symbols = Vec::with_capacity(word.len());
                for symbol in word {
                    let ProductionSymbol::Terminal(t) = symbol else {
                        symbols.push(symbol.clone());
                        continue;
                    };

                    let nt = match isolated.get(t) {
                        Some(nt) => nt.clone(),
                        None => {
                            let nt = binarizer.introduce(Word::new([symbol.clone()]))?;
                            isolated.insert(t.clone(), nt.clone());
                            nt
                        }
                    };
                    symbols.push(ProductionSymbol::NonTerminal(nt));
                }

                next_rhs.insert(Word::new(symbols));
            }

            isolated_productions.insert(lhs.clone(), next_rhs);
        }
        isolated_productions.extend(std::mem::take(&mut binarizer.new_productions));

        let mut productions = IndexMap::with_capacity(isolated_productions.len());

        for (lhs, rhs) in isolated_productions {
            let mut next_rhs = IndexSet::with_capacity(rhs.len());

            for word in rhs {
                let mut symbols = VecDeque::from(word.0);

                while symbols.len() > 2 {
                    let pair = symbols.drain(..2).collect::<Word<_>>();
                    let nt = binarizer.introduce(pair)?;
                    symbols.push_front(ProductionSymbol::NonTerminal(nt));
                }

                next_rhs.insert(Word::new(symbols));
            }

            productions.insert(lhs, next_rhs);
        }

        let Binarizer {
            non_terminals,
            new_productions,
            ..
        } = binarizer;
        productions.extend(new_productions);

        log::debug!(
            "binarized: {} terminals isolated, {} fresh non-terminals in total",
            isolated.len(),
            non_terminals.len() - self.non_terminals.len()
        );

        Ok(self.with_productions(non_terminals, productions))
    }
}
