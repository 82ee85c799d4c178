//! chomsky - bring a context-free grammar into Chomsky normal form
//!
//! ```bash
//! # Print the normalized grammar
//! chomsky grammar.cfg
//!
//! # Show the grammar after every stage, as tables
//! chomsky grammar.cfg --stages --table
//!
//! # Check a word against the result
//! chomsky grammar.cfg --word "a b b"
//! ```

use std::{
    io::{self, Read},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::Parser;

use chomsky::grammar::{
    to_cnf_stages, Body, ChomskyNormalFormGrammar, CnfWord, ContextFreeGrammar, Grammar,
    ProductionWord, Terminal,
};

/// Normalize a context-free grammar into Chomsky normal form
#[derive(Parser)]
#[command(name = "chomsky")]
#[command(version)]
struct Cli {
    /// Grammar file, one rule per line (`S → a B | ε`); `-` reads stdin
    #[arg(value_name = "FILE")]
    grammar: PathBuf,

    /// Print the grammar after every normalization stage
    #[arg(long)]
    stages: bool,

    /// Render productions as a table
    #[arg(long)]
    table: bool,

    /// Whitespace-separated terminals to test against the normalized grammar
    #[arg(short, long, value_name = "SYMBOLS")]
    word: Option<String>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn read_source(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut src = String::new();
        io::stdin()
            .read_to_string(&mut src)
            .context("Failed to read grammar from stdin")?;
        return Ok(src);
    }

    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read grammar file: {}", path.display()))
}

fn render<R, G>(grammar: &G, table: bool) -> String
where
    R: ProductionWord,
    G: Grammar<R>,
{
    if table {
        grammar.production_table().to_string()
    } else {
        grammar.definition()
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();

    let src = read_source(&cli.grammar)?;
    let grammar = ContextFreeGrammar::parse(&src)
        .with_context(|| format!("Invalid grammar in {}", cli.grammar.display()))?;

    log::info!(
        "normalizing grammar with start symbol {}",
        grammar.start_symbol()
    );

    let stages = to_cnf_stages(&grammar).context("Normalization failed")?;

    if cli.stages {
        println!("Input:\n{}", render::<Body, _>(&grammar, cli.table));
        for (stage, result) in &stages {
            println!("After {stage}:\n{}", render::<Body, _>(result, cli.table));
        }
    }

    let (_, normalized) = stages.last().context("Normalization produced no stages")?;
    let cnf = ChomskyNormalFormGrammar::try_from(normalized)
        .context("Normalized grammar is not in Chomsky normal form")?;

    if !cli.stages {
        println!(
            "Chomsky Normal Form:\n{}",
            render::<CnfWord, _>(&cnf, cli.table)
        );
    }

    if let Some(word) = &cli.word {
        let terminals = word
            .split_whitespace()
            .map(Terminal::new)
            .collect::<Vec<_>>();
        println!("{}", cnf.cyk(&terminals));
    }

    Ok(())
}
