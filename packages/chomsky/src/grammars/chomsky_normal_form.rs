use std::{borrow::Cow, fmt::Display};

use indexmap::{IndexMap, IndexSet};
use tabled::{builder::Builder, settings::Style};

use crate::{
    error::{GrammarError, Result},
    grammars::{
        context_free::ContextFreeGrammar,
        types::{join_set, Body, Grammar, NonTerminal, ProductionSymbol, ProductionWord, Terminal},
    },
    language::Word,
};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CnfWord {
    Terminal(Terminal),
    NonTerminals(NonTerminal, NonTerminal),
}

impl Display for CnfWord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_word())
    }
}

impl TryFrom<&Body> for CnfWord {
    type Error = String;

    fn try_from(value: &Body) -> std::result::Result<Self, Self::Error> {
        match value.symbols() {
            [ProductionSymbol::Terminal(t)] => Ok(CnfWord::Terminal(t.clone())),
            [ProductionSymbol::NonTerminal(_)] => Err("Expected a terminal".to_string()),
            [ProductionSymbol::NonTerminal(nt1), ProductionSymbol::NonTerminal(nt2)] => {
                Ok(CnfWord::NonTerminals(nt1.clone(), nt2.clone()))
            }
            [_, _] => Err("Expected two non-terminals".to_string()),
            _ => Err(
                "CnfWord can only be created from a word with one terminal or two non-terminals"
                    .to_string(),
            ),
        }
    }
}

impl ProductionWord for CnfWord {
    fn to_word(&self) -> Body {
        match self {
            CnfWord::Terminal(t) => Word(vec![ProductionSymbol::Terminal(t.clone())]),
            CnfWord::NonTerminals(nt1, nt2) => Word(vec![
                ProductionSymbol::NonTerminal(nt1.clone()),
                ProductionSymbol::NonTerminal(nt2.clone()),
            ]),
        }
    }
}

/// A grammar whose every production is `A → BC` or `A → a`.
#[derive(Debug, Clone)]
pub struct ChomskyNormalFormGrammar {
    start_symbol: NonTerminal,
    terminals: IndexSet<Terminal>,
    productions: IndexMap<NonTerminal, IndexSet<CnfWord>>,
}

impl Grammar<CnfWord> for ChomskyNormalFormGrammar {
    fn start_symbol(&self) -> &NonTerminal {
        &self.start_symbol
    }

    fn non_terminals(&self) -> Cow<'_, IndexSet<NonTerminal>> {
        Cow::Owned(self.productions.keys().cloned().collect())
    }

    fn terminals(&self) -> Cow<'_, IndexSet<Terminal>> {
        Cow::Borrowed(&self.terminals)
    }

    fn productions(&self) -> &IndexMap<NonTerminal, IndexSet<CnfWord>> {
        &self.productions
    }
}

impl TryFrom<&ContextFreeGrammar> for ChomskyNormalFormGrammar {
    type Error = GrammarError;

    fn try_from(cfg: &ContextFreeGrammar) -> Result<Self> {
        let mut productions = IndexMap::with_capacity(cfg.productions.len());

        for (lhs, rhs) in &cfg.productions {
            let words = rhs
                .iter()
                .map(|word| {
                    CnfWord::try_from(word).map_err(|_| GrammarError::NotInNormalForm {
                        non_terminal: lhs.clone(),
                        body: word.clone(),
                    })
                })
                .collect::<Result<IndexSet<_>>>()?;

            productions.insert(lhs.clone(), words);
        }

        Ok(Self {
            start_symbol: cfg.start_symbol.clone(),
            terminals: cfg.terminals.clone(),
            productions,
        })
    }
}

#[derive(Debug)]
pub struct CykTable {
    table: Vec<Vec<IndexSet<NonTerminal>>>,
    word: Word<Terminal>,
    start_symbol: NonTerminal,
}

impl CykTable {
    pub fn new(word: Word<Terminal>, start_symbol: &NonTerminal) -> Self {
        let size = word.len();

        CykTable {
            table: vec![vec![IndexSet::new(); size]; size],
            word,
            start_symbol: start_symbol.clone(),
        }
    }

    pub fn contains(&self, i: usize, j: usize, value: &NonTerminal) -> bool {
        self.table[i][j].contains(value)
    }

    pub fn get(&self, i: usize, j: usize) -> &IndexSet<NonTerminal> {
        &self.table[i][j]
    }

    pub fn insert(&mut self, i: usize, j: usize, value: NonTerminal) {
        self.table[i][j].insert(value);
    }

    /// The empty word is never accepted: normalization drops ε.
    pub fn is_word_in_language(&self) -> bool {
        self.table
            .first()
            .and_then(|row| row.last())
            .is_some_and(|cell| cell.contains(&self.start_symbol))
    }
}

impl Display for CykTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "CYK table for \"{}\":", self.word)?;

        let size = self.table.len();
        if size > 0 {
            let mut builder = Builder::default();

            let header = (1..=size).map(|j| format!("j = {j}"));
            builder.push_record(std::iter::once(String::new()).chain(header));

            for (i, row) in self.table.iter().enumerate() {
                let cells = row.iter().enumerate().map(|(j, cell)| {
                    if j < i {
                        String::new()
                    } else {
                        format!("V({},{}) = {}", i + 1, j + 1, join_set(cell, ", "))
                    }
                });

                builder.push_record(std::iter::once(format!("i = {}", i + 1)).chain(cells));
            }

            let mut table = builder.build();
            table.with(Style::rounded());

            writeln!(f, "{table}")?;
        }

        let verdict = if self.is_word_in_language() {
            "accepted"
        } else {
            "rejected"
        };

        writeln!(f, "\"{}\" is {verdict} from {}", self.word, self.start_symbol)
    }
}

impl ChomskyNormalFormGrammar {
    /// Normalizes `cfg` and checks that the result has the CNF shape.
    pub fn from_context_free_grammar(cfg: &ContextFreeGrammar) -> Result<Self> {
        Self::try_from(&cfg.to_cnf()?)
    }

    pub fn cyk(&self, word: &[Terminal]) -> CykTable {
        let n = word.len();
        let mut table = CykTable::new(Word::new(word.iter().cloned()), &self.start_symbol);

        for (lhs, rhs) in &self.productions {
            for production in rhs {
                if let CnfWord::Terminal(t) = production {
                    for (i, terminal) in word.iter().enumerate() {
                        if terminal == t {
                            table.insert(i, i, lhs.clone());
                        }
                    }
                }
            }
        }

        for d in 1..n {
            for i in 0..n - d {
                let j = i + d;

                for k in i..j {
                    for (lhs, rhs) in &self.productions {
                        for production in rhs {
                            if let CnfWord::NonTerminals(nt1, nt2) = production {
                                if table.contains(i, k, nt1) && table.contains(k + 1, j, nt2) {
                                    table.insert(i, j, lhs.clone());
                                }
                            }
                        }
                    }
                }
            }
        }

        table
    }
}

impl ContextFreeGrammar {
    pub fn to_chomsky_normal_form(&self) -> Result<ChomskyNormalFormGrammar> {
        ChomskyNormalFormGrammar::from_context_free_grammar(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(s: &str) -> Vec<Terminal> {
        s.chars().map(Terminal::new).collect()
    }

    #[test]
    fn rejects_bodies_outside_normal_form() {
        let cfg = ContextFreeGrammar::parse("S → a S | a").unwrap();

        let error = ChomskyNormalFormGrammar::try_from(&cfg).unwrap_err();

        assert!(matches!(
            error,
            GrammarError::NotInNormalForm { ref non_terminal, .. }
                if non_terminal == &NonTerminal::new("S")
        ));
    }

    #[test]
    fn cyk_accepts_words_of_the_language() {
        let cfg = ContextFreeGrammar::parse("S → a S b | a b").unwrap();
        let cnf = cfg.to_chomsky_normal_form().unwrap();

        assert!(cnf.cyk(&word("ab")).is_word_in_language());
        assert!(cnf.cyk(&word("aaabbb")).is_word_in_language());
        assert!(!cnf.cyk(&word("aab")).is_word_in_language());
        assert!(!cnf.cyk(&word("ba")).is_word_in_language());
    }

    #[test]
    fn cyk_rejects_the_empty_word() {
        let cfg = ContextFreeGrammar::parse("S → a S | ε").unwrap();
        let cnf = cfg.to_chomsky_normal_form().unwrap();

        let table = cnf.cyk(&[]);

        assert!(!table.is_word_in_language());
        assert!(table.to_string().contains("is rejected"));
    }

    #[test]
    fn cyk_table_renders_every_cell_of_the_upper_triangle() {
        let cfg = ContextFreeGrammar::parse("S → a b").unwrap();
        let cnf = cfg.to_chomsky_normal_form().unwrap();

        let rendered = cnf.cyk(&word("ab")).to_string();

        assert!(rendered.contains("V(1,1) = "));
        assert!(rendered.contains("V(1,2) = S"));
        assert!(rendered.contains("V(2,2) = "));
        assert!(!rendered.contains("V(2,1)"));
        assert!(rendered.contains("\"ab\" is accepted from S"));
    }
}
