use chomsky::{
    grammar::{
        binarize, eliminate_epsilon, remove_inaccessible_symbols, remove_nonproductive_symbols,
        to_cnf, to_cnf_stages, ContextFreeGrammar, Grammar, NonTerminal, Stage, Terminal,
    },
    GrammarError, MalformedGrammarError,
};

fn bodies(grammar: &ContextFreeGrammar, nt: &str) -> Vec<String> {
    grammar
        .bodies(&NonTerminal::new(nt))
        .map(ToString::to_string)
        .collect()
}

fn scenario_one(b_bodies: Vec<Vec<&'static str>>) -> Result<ContextFreeGrammar, GrammarError> {
    ContextFreeGrammar::from_definition(
        &["S", "A", "B"],
        &["a", "b"],
        [
            ("S", vec![vec!["a", "B"], vec!["b", "A"], vec!["A"]]),
            (
                "A",
                vec![
                    vec!["B"],
                    vec!["A", "S"],
                    vec!["b", "B", "A", "B"],
                    vec!["b"],
                    vec!["ε"],
                ],
            ),
            ("B", b_bodies),
        ],
        "S",
    )
}

#[test]
fn undeclared_symbol_in_scenario_one_is_rejected() {
    let b_bodies = vec![vec!["b"], vec!["b", "S"], vec!["a", "D"], vec!["ε"]];
    let error = scenario_one(b_bodies).unwrap_err();

    assert!(matches!(
        error,
        GrammarError::Malformed(MalformedGrammarError::UndeclaredSymbol { ref symbol, .. })
            if symbol == "D"
    ));
}

#[test]
fn epsilon_elimination_on_scenario_one() {
    let grammar = scenario_one(vec![vec!["b"], vec!["b", "S"], vec!["ε"]]).unwrap();

    let result = eliminate_epsilon(&grammar).unwrap();

    assert_eq!(bodies(&result, "S"), vec!["aB", "a", "bA", "b", "A"]);
    assert_eq!(bodies(&result, "B"), vec!["b", "bS"]);
    assert_eq!(
        bodies(&result, "A"),
        vec!["B", "AS", "A", "S", "bBAB", "bBA", "bBB", "bB", "bAB", "bA", "b"]
    );
}

#[test]
fn declared_but_barren_symbols_are_pruned() {
    let grammar = ContextFreeGrammar::parse(
        "S → a B | b A | A\nA → B | A S | b B A B | b | ε\nB → b | b S | a D | ε\nC → B a",
    )
    .unwrap();

    let result = to_cnf(&grammar).unwrap();

    assert!(!result.non_terminals().contains(&NonTerminal::new("C")));
    assert!(!result.non_terminals().contains(&NonTerminal::new("D")));
}

#[test]
fn useful_grammars_survive_pruning_unchanged() {
    let grammar = ContextFreeGrammar::parse("S → a A | B b\nA → a | B A\nB → b | a S").unwrap();

    assert_eq!(remove_inaccessible_symbols(&grammar), grammar);
    assert_eq!(remove_nonproductive_symbols(&grammar).unwrap(), grammar);
}

#[test]
fn mixed_body_of_length_five_needs_six_fresh_symbols() {
    let grammar = ContextFreeGrammar::parse("S → a A b B c\nA → a\nB → b").unwrap();

    let result = binarize(&grammar).unwrap();

    let fresh = result
        .non_terminals()
        .iter()
        .filter(|nt| !grammar.non_terminals().contains(*nt))
        .map(ToString::to_string)
        .collect::<Vec<_>>();
    assert_eq!(fresh, vec!["Z3", "Z4", "Z5", "Z6", "Z7", "Z8"]);

    assert_eq!(bodies(&result, "Z3"), vec!["a"]);
    assert_eq!(bodies(&result, "Z4"), vec!["b"]);
    assert_eq!(bodies(&result, "Z5"), vec!["c"]);
    assert_eq!(bodies(&result, "Z6"), vec!["Z3 A"]);
    assert_eq!(bodies(&result, "Z7"), vec!["Z6 Z4"]);
    assert_eq!(bodies(&result, "Z8"), vec!["Z7 B"]);
    assert_eq!(bodies(&result, "S"), vec!["Z8 Z5"]);
    assert_eq!(bodies(&result, "A"), vec!["a"]);
}

#[test]
fn stages_are_visible_in_pipeline_order() {
    let grammar = ContextFreeGrammar::parse("S → a S b | A\nA → ε | c\nX → x").unwrap();

    let stages = to_cnf_stages(&grammar).unwrap();

    assert_eq!(
        stages.iter().map(|(stage, _)| *stage).collect::<Vec<_>>(),
        Stage::ALL
    );
    assert_eq!(
        stages.last().map(|(_, g)| g.clone()),
        Some(to_cnf(&grammar).unwrap())
    );

    let (_, pruned) = &stages[2];
    assert!(!pruned.non_terminals().contains(&NonTerminal::new("X")));
}

#[test]
fn normal_form_accepts_exactly_the_non_empty_balanced_words() {
    let grammar = ContextFreeGrammar::parse("S → ( S ) S | ε").unwrap();
    let cnf = grammar.to_chomsky_normal_form().unwrap();

    let is_balanced = |word: &[char]| {
        let mut depth = 0i32;
        for c in word {
            depth += if *c == '(' { 1 } else { -1 };
            if depth < 0 {
                return false;
            }
        }
        depth == 0
    };

    for len in 1..=8u32 {
        for bits in 0..(1u32 << len) {
            let word = (0..len)
                .map(|i| if bits & (1 << i) == 0 { '(' } else { ')' })
                .collect::<Vec<_>>();
            let terminals = word.iter().copied().map(Terminal::new).collect::<Vec<_>>();

            assert_eq!(
                cnf.cyk(&terminals).is_word_in_language(),
                is_balanced(&word),
                "{}",
                word.iter().collect::<String>()
            );
        }
    }
}

#[test]
fn fresh_names_colliding_with_input_symbols_abort_the_pipeline() {
    let grammar = ContextFreeGrammar::parse("S → a Z2 b\nZ2 → c").unwrap();

    let error = to_cnf(&grammar).unwrap_err();

    assert!(matches!(error, GrammarError::FreshSymbolCollision { .. }));
}
