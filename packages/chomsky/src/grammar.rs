pub use crate::grammars::{
    chomsky_normal_form::{ChomskyNormalFormGrammar, CnfWord, CykTable},
    context_free::ContextFreeGrammar,
    normalize::{
        binarize, eliminate_epsilon, remove_inaccessible_symbols, remove_nonproductive_symbols,
        remove_unit_productions, to_cnf, to_cnf_stages, FreshSymbols, Stage,
    },
    types::{Body, Grammar, NonTerminal, ProductionSymbol, ProductionWord, Terminal},
};
