use std::io::{self, BufRead};

use anyhow::{Context, Result};
use clap::Parser;

use dregex::{DEFAULT_MAX_STATES, Dfa, Nfa, Regex, parse};

/// Test strings against a compiled regular expression.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Regular expression to compile
    #[arg(value_name = "PATTERN")]
    pattern: String,

    /// Strings to test; read from stdin when omitted
    #[arg(value_name = "INPUT")]
    inputs: Vec<String>,

    /// Print how many characters matched (-1 for no match)
    #[arg(short, long)]
    pos: bool,

    /// Require the whole input to match
    #[arg(short, long, conflicts_with = "pos")]
    full: bool,

    /// Print the parsed syntax tree
    #[arg(long)]
    ast: bool,

    /// Print the NFA states and edges
    #[arg(long)]
    nfa: bool,

    /// Print the DFA states and edges
    #[arg(long)]
    dfa: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.ast || args.nfa || args.dfa {
        let ast = parse(&args.pattern)?;
        if args.ast {
            println!("{ast}");
        }
        if args.nfa || args.dfa {
            let nfa = Nfa::thompson(&ast, DEFAULT_MAX_STATES)?;
            if args.nfa {
                print!("{}", nfa.dump());
            }
            if args.dfa {
                let dfa = Dfa::determinize(&nfa, DEFAULT_MAX_STATES)?;
                print!("{}", dfa.dump());
            }
        }
        if args.inputs.is_empty() {
            return Ok(());
        }
    }

    let re = Regex::new(&args.pattern)?;

    let mut inputs = args.inputs;
    if inputs.is_empty() {
        for line in io::stdin().lock().lines() {
            inputs.push(line.context("failed to read stdin")?);
        }
    }

    for input in &inputs {
        if args.pos {
            match re.match_pos(input) {
                Some(n) => println!("{n}"),
                None => println!("-1"),
            }
        } else if args.full {
            println!("{}", re.is_full_match(input));
        } else {
            println!("{}", re.is_match(input));
        }
    }
    Ok(())
}
