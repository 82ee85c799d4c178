//! Reads grammars written one rule per line:
//!
//! ```text
//! # comment
//! S → a B | b A | A
//! A -> B | A S | b B A B | b | ε
//! ```
//!
//! Body symbols are separated by whitespace. A symbol is a non-terminal if
//! it appears on some left-hand side or starts with an ASCII uppercase
//! letter; everything else is a terminal. The first rule names the start
//! symbol. `ε` only stands for a whole body, and `#` only starts a comment
//! line; a rule containing either anywhere else is rejected.

use indexmap::{IndexMap, IndexSet};
use winnow::{
    ascii::space0,
    combinator::{alt, delimited, preceded, repeat, separated, terminated},
    token::take_while,
    ModalResult, Parser,
};

use crate::{
    error::{GrammarError, Result},
    grammars::{
        context_free::ContextFreeGrammar,
        types::{NonTerminal, ProductionSymbol, Terminal},
    },
    language::{Word, EPSILON},
};

struct Rule<'s> {
    lhs: &'s str,
    bodies: Vec<Vec<&'s str>>,
}

impl Rule<'_> {
    fn has_misplaced_epsilon(&self) -> bool {
        let in_body = |body: &Vec<&str>| body.len() > 1 && body.contains(&EPSILON);

        self.lhs == EPSILON || self.bodies.iter().any(in_body)
    }
}

fn lhs_symbol<'s>(input: &mut &'s str) -> ModalResult<&'s str> {
    take_while(1.., |c: char| c.is_alphanumeric() || c == '_' || c == '\'').parse_next(input)
}

fn body_symbol<'s>(input: &mut &'s str) -> ModalResult<&'s str> {
    take_while(1.., |c: char| !c.is_whitespace() && c != '|' && c != '#').parse_next(input)
}

fn arrow(input: &mut &str) -> ModalResult<()> {
    alt(("→", "->")).void().parse_next(input)
}

fn body<'s>(input: &mut &'s str) -> ModalResult<Vec<&'s str>> {
    terminated(repeat(1.., preceded(space0, body_symbol)), space0).parse_next(input)
}

fn rule<'s>(input: &mut &'s str) -> ModalResult<Rule<'s>> {
    let lhs = delimited(space0, lhs_symbol, space0).parse_next(input)?;
    arrow.parse_next(input)?;
    let bodies = separated(1.., body, '|').parse_next(input)?;

    Ok(Rule { lhs, bodies })
}

fn is_comment_or_blank(line: &str) -> bool {
    let line = line.trim();
    line.is_empty() || line.starts_with('#')
}

impl ContextFreeGrammar {
    pub fn parse(src: &str) -> Result<Self> {
        let mut rules = Vec::new();

        for (idx, line) in src.lines().enumerate() {
            if is_comment_or_blank(line) {
                continue;
            }

            let parsed = rule.parse(line).map_err(|e| GrammarError::Parse {
                line: idx + 1,
                message: e.to_string(),
            })?;

            if parsed.has_misplaced_epsilon() {
                return Err(GrammarError::Parse {
                    line: idx + 1,
                    message: format!("{EPSILON} must stand alone as a body"),
                });
            }

            rules.push(parsed);
        }

        let Some(first) = rules.first() else {
            return Err(GrammarError::Parse {
                line: 0,
                message: "grammar has no rules".to_string(),
            });
        };
        let start_symbol = NonTerminal::new(first.lhs);

        let mut non_terminals = rules
            .iter()
            .map(|rule| NonTerminal::new(rule.lhs))
            .collect::<IndexSet<_>>();
        let mut terminals = IndexSet::new();

        for symbol in rules.iter().flat_map(|rule| rule.bodies.iter().flatten()) {
            if *symbol == EPSILON || non_terminals.contains(&NonTerminal::new(*symbol)) {
                continue;
            }

            if symbol.starts_with(|c: char| c.is_ascii_uppercase()) {
                non_terminals.insert(NonTerminal::new(*symbol));
            } else {
                terminals.insert(Terminal::new(*symbol));
            }
        }

        let mut productions: IndexMap<NonTerminal, Vec<_>> = IndexMap::new();
        for rule in &rules {
            let entry = productions.entry(NonTerminal::new(rule.lhs)).or_default();

            for body in &rule.bodies {
                if body.as_slice() == [EPSILON] {
                    entry.push(Word::epsilon());
                    continue;
                }

                entry.push(Word::new(body.iter().map(|&name| {
                    let nt = NonTerminal::new(name);
                    if non_terminals.contains(&nt) {
                        ProductionSymbol::NonTerminal(nt)
                    } else {
                        ProductionSymbol::Terminal(Terminal::new(name))
                    }
                })));
            }
        }

        log::debug!(
            "read grammar with {} non-terminals, {} terminals, start symbol {}",
            non_terminals.len(),
            terminals.len(),
            start_symbol
        );

        Self::new(non_terminals, terminals, productions, start_symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammars::types::Grammar;

    #[test]
    fn reads_alternatives_and_epsilon() {
        let grammar = ContextFreeGrammar::parse("S → a B | b\nB -> b S | ε\n").unwrap();

        assert_eq!(grammar.start_symbol(), &NonTerminal::new("S"));
        assert_eq!(grammar.non_terminals().len(), 2);
        assert_eq!(grammar.terminals().len(), 2);

        let bodies = grammar
            .bodies(&NonTerminal::new("B"))
            .map(ToString::to_string)
            .collect::<Vec<_>>();
        assert_eq!(bodies, vec!["bS", "ε"]);
    }

    #[test]
    fn skips_comments_and_merges_repeated_rules() {
        let grammar =
            ContextFreeGrammar::parse("# start\n\nS → a\n  # more\nS → b | a\n").unwrap();

        assert_eq!(grammar.production_count(), 2);
    }

    #[test]
    fn multi_character_symbols_are_kept_whole() {
        let grammar = ContextFreeGrammar::parse("Expr → Expr + term | term").unwrap();

        assert!(grammar.non_terminals().contains(&NonTerminal::new("Expr")));
        assert!(grammar.terminals().contains(&Terminal::new("term")));
        assert!(grammar.terminals().contains(&Terminal::new("+")));
    }

    #[test]
    fn uppercase_symbols_without_rules_are_non_terminals() {
        let grammar = ContextFreeGrammar::parse("S → a D").unwrap();

        assert!(grammar.non_terminals().contains(&NonTerminal::new("D")));
        assert_eq!(grammar.bodies(&NonTerminal::new("D")).count(), 0);
    }

    #[test]
    fn reports_the_offending_line() {
        let error = ContextFreeGrammar::parse("S → a\nS a b\n").unwrap_err();

        assert!(matches!(error, GrammarError::Parse { line: 2, .. }));
    }

    #[test]
    fn epsilon_mixed_into_a_body_is_rejected() {
        let error = ContextFreeGrammar::parse("S → b\nS → a ε | b\n").unwrap_err();

        assert!(matches!(error, GrammarError::Parse { line: 2, .. }));

        let error = ContextFreeGrammar::parse("S → a\nε → a\n").unwrap_err();

        assert!(matches!(error, GrammarError::Parse { line: 2, .. }));
    }

    #[test]
    fn comments_cannot_trail_a_rule() {
        let error = ContextFreeGrammar::parse("S → a | b # both\n").unwrap_err();

        assert!(matches!(error, GrammarError::Parse { line: 1, .. }));
    }

    #[test]
    fn empty_input_is_rejected() {
        let error = ContextFreeGrammar::parse("# nothing\n").unwrap_err();

        assert!(matches!(error, GrammarError::Parse { line: 0, .. }));
    }
}
