// libpinyin/src/main.rs
//
// pinyin-lookup: run the parser against a dictionary file from the command
// line. Reads inputs from arguments, or one per line from stdin.

use std::io::{self, BufRead};
use std::path::PathBuf;
use std::rc::Rc;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use hanzi_core::{Dictionary, SearchPath};
use hanzi_pinyin::{load_dictionary, CandidateManager, PinyinParser};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pinyin-lookup", about = "Look up pinyin candidates")]
struct Args {
    /// Dictionary file. Without it the default search path is used.
    #[arg(long)]
    dict: Option<PathBuf>,

    /// Context text used to reorder candidates.
    #[arg(long, default_value = "")]
    context: String,

    /// Print results as JSON instead of a numbered list.
    #[arg(long)]
    json: bool,

    /// Inputs to look up. Reads stdin when empty.
    inputs: Vec<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let dict = match &args.dict {
        Some(path) => Dictionary::from_file(path)
            .with_context(|| format!("loading dictionary {}", path.display()))?,
        None => load_dictionary(&SearchPath::new(), "pinyin.dict.json"),
    };
    let parser = Rc::new(PinyinParser::new(Arc::new(dict)));
    let manager = CandidateManager::new(Rc::clone(&parser));

    if args.inputs.is_empty() {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let line = line?;
            let input = line.trim();
            if input.is_empty() {
                continue;
            }
            show(&manager, input, &args)?;
        }
    } else {
        for input in &args.inputs {
            show(&manager, input, &args)?;
        }
    }

    let (hits, misses) = parser.cache_stats();
    tracing::debug!(hits, misses, "cache statistics");
    Ok(())
}

fn show(manager: &CandidateManager, input: &str, args: &Args) -> Result<()> {
    if args.json {
        let result = manager.parser().parse_continuous(input);
        println!("{}", serde_json::to_string(&result)?);
        return Ok(());
    }
    let words = manager.smart_candidates(input, &args.context);
    if words.is_empty() {
        println!("{input}: (no candidates)");
        return Ok(());
    }
    println!("{input}:");
    for (i, w) in words.iter().enumerate() {
        println!("  {}. {}", i + 1, w);
    }
    Ok(())
}
