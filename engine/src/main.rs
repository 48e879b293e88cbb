// engine/src/main.rs
//
// hanzi-ime: command-line front end for the input engine.
//
//   hanzi-ime repl                    interactive lookup on stdin
//   hanzi-ime convert --to simplified TEXT
//   hanzi-ime bopomofo ㄋㄧˇ ㄏㄠˇ
//
// In the REPL a line is either `input` or `input | context`. Lines starting
// with ':' are commands: :scheme NAME, :charset NAME, :select N,
// :add SCHEME WORD FREQ, :remove SCHEME WORD, :reset, :save, :quit.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use hanzi_core::{Charset, CharsetConverter};
use hanzi_engine::ImeEngine;
use hanzi_zhuyin::BopomofoMapper;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "hanzi-ime", about = "Chinese input candidate engine")]
struct Cli {
    /// Engine configuration (TOML). Missing file means defaults.
    #[arg(long, default_value = "hanzi-ime.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Read inputs from stdin and print ranked candidates.
    Repl,
    /// Convert text between simplified and traditional.
    Convert {
        #[arg(long, default_value = "simplified")]
        from: String,
        #[arg(long, default_value = "traditional")]
        to: String,
        text: Vec<String>,
    },
    /// Print the pinyin spelling of bopomofo input.
    Bopomofo { input: Vec<String> },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command.unwrap_or(Command::Repl) {
        Command::Repl => repl(&cli.config),
        Command::Convert { from, to, text } => {
            let from: Charset = from.parse()?;
            let to: Charset = to.parse()?;
            println!("{}", CharsetConverter::new().convert(&text.join(" "), from, to));
            Ok(())
        }
        Command::Bopomofo { input } => {
            let mapper = BopomofoMapper::new();
            let joined = input.join(" ");
            if !mapper.is_valid(&joined) {
                bail!("no bopomofo symbols in {joined:?}");
            }
            println!("{}", mapper.to_pinyin(&joined));
            Ok(())
        }
    }
}

fn repl(config: &Path) -> Result<()> {
    let mut engine = ImeEngine::new();
    engine
        .initialize(config)
        .with_context(|| format!("initializing from {}", config.display()))?;

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    prompt(&engine, &mut stdout)?;
    for line in stdin.lock().lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            prompt(&engine, &mut stdout)?;
            continue;
        }
        if let Some(cmd) = line.strip_prefix(':') {
            match command(&mut engine, cmd) {
                Ok(true) => break,
                Ok(false) => {}
                Err(e) => eprintln!("⚠ {e}"),
            }
        } else {
            let (input, context) = match line.split_once('|') {
                Some((i, c)) => (i.trim(), c.trim()),
                None => (line, ""),
            };
            let candidates = engine.process_input(input, context)?;
            if candidates.is_empty() {
                println!("  (no candidates)");
            }
            for (i, c) in candidates.iter().enumerate() {
                println!("  {}. {} ({})", i, c.text, c.frequency);
            }
        }
        prompt(&engine, &mut stdout)?;
    }

    if engine.save_preferences()? {
        eprintln!("preferences saved");
    }
    Ok(())
}

fn prompt(engine: &ImeEngine, out: &mut io::Stdout) -> Result<()> {
    write!(out, "[{} {}]> ", engine.current_scheme()?, engine.charset()?)?;
    out.flush()?;
    Ok(())
}

/// Run a `:command`. Returns true when the REPL should exit.
fn command(engine: &mut ImeEngine, cmd: &str) -> Result<bool> {
    let parts: Vec<&str> = cmd.split_whitespace().collect();
    match parts.as_slice() {
        ["quit"] | ["q"] => return Ok(true),
        ["scheme", name] => engine.set_scheme(name)?,
        ["charset", name] => engine.set_charset(name)?,
        ["select", n] => {
            let index: usize = n.parse().context("index must be a number")?;
            let chosen = engine.select_candidate(index)?;
            println!("  selected {}", chosen.text);
        }
        ["add", scheme, word, freq] => {
            let freq: i64 = freq.parse().context("frequency must be a number")?;
            engine.add_word(scheme, word, freq)?;
        }
        ["remove", scheme, word] => {
            if !engine.remove_word(scheme, word)? {
                println!("  {word} had no boost");
            }
        }
        ["reset"] => engine.reset()?,
        ["save"] => {
            if !engine.save_preferences()? {
                println!("  no preferences_path configured");
            }
        }
        _ => bail!("unknown command :{cmd}"),
    }
    Ok(false)
}
