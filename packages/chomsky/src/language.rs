use std::fmt::Display;

use derive_more::Display;

use crate::error::MalformedGrammarError;

pub const EPSILON: &str = "ε";

#[derive(Debug, Display, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol(String);

impl Symbol {
    /// # Panics
    ///
    /// Panics if `name` is empty. Use [`Symbol::try_new`] for names that
    /// come from user input.
    pub fn new(name: impl Into<String>) -> Self {
        match Self::try_new(name) {
            Ok(symbol) => symbol,
            Err(e) => panic!("{e}"),
        }
    }

    pub fn try_new(name: impl Into<String>) -> Result<Self, MalformedGrammarError> {
        let name = name.into();
        if name.is_empty() {
            return Err(MalformedGrammarError::EmptySymbol);
        }

        Ok(Symbol(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// An ordered sequence of symbols. The empty word is ε.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Word<S>(pub Vec<S>);

impl<S> Word<S> {
    pub fn new(symbols: impl IntoIterator<Item = S>) -> Self {
        Word(symbols.into_iter().collect())
    }

    pub fn epsilon() -> Self {
        Word(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn symbols(&self) -> &[S] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, S> {
        self.0.iter()
    }
}

impl<S> Default for Word<S> {
    fn default() -> Self {
        Self::epsilon()
    }
}

impl<S> FromIterator<S> for Word<S> {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Word::new(iter)
    }
}

impl<'a, S> IntoIterator for &'a Word<S> {
    type Item = &'a S;
    type IntoIter = std::slice::Iter<'a, S>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<S: Display> Display for Word<S> {
    /// Single-character symbols are written back to back (`aBc`), anything
    /// longer is separated by spaces (`a Z12 c`) so the word stays readable.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0.is_empty() {
            return write!(f, "{EPSILON}");
        }

        let symbols = self.0.iter().map(ToString::to_string).collect::<Vec<_>>();
        let separator = if symbols.iter().all(|s| s.chars().count() == 1) {
            ""
        } else {
            " "
        };

        write!(f, "{}", symbols.join(separator))
    }
}
