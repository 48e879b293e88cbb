mod import;

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use hanzi_core::{Charset, CharsetConverter, DictEntry, Dictionary};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "dictool", about = "Build and inspect hanzi-ime dictionary files")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Import text tables into a dictionary file.
    Import {
        #[arg(long, num_args = 1..)]
        inputs: Vec<PathBuf>,
        /// Existing dictionary to append to.
        #[arg(long)]
        merge: Option<PathBuf>,
        #[arg(long, default_value = "out.dict.json")]
        out: PathBuf,
        #[arg(long, default_value = "1.0.0")]
        version: String,
    },
    /// Print the entries stored under exact keys.
    Lookup {
        #[arg(long)]
        dict: PathBuf,
        keys: Vec<String>,
    },
    /// Print key and entry counts.
    Stats {
        #[arg(long)]
        dict: PathBuf,
        #[arg(long)]
        json: bool,
    },
    /// Convert every word in a dictionary to another charset.
    Charset {
        #[arg(long)]
        dict: PathBuf,
        #[arg(long)]
        from: String,
        #[arg(long)]
        to: String,
        #[arg(long)]
        out: PathBuf,
    },
}

#[derive(Serialize)]
struct Stats<'a> {
    version: &'a str,
    created_at: &'a str,
    updated_at: &'a str,
    keys: usize,
    entries: usize,
    max_entries_per_key: usize,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    match Args::parse().command {
        Command::Import { inputs, merge, out, version } => {
            let mut dict = match merge {
                Some(path) => Dictionary::from_file(&path)
                    .with_context(|| format!("loading {}", path.display()))?,
                None => Dictionary::new(),
            };
            dict.set_version(version);
            for input in &inputs {
                let report = import::import_table(&mut dict, input)?;
                println!(
                    "{}: imported {} entries, skipped {} lines",
                    input.display(),
                    report.imported,
                    report.skipped
                );
            }
            dict.touch();
            dict.save_to_file(&out)?;
            println!("Wrote {} keys to {}", dict.len(), out.display());
        }
        Command::Lookup { dict, keys } => {
            let dict = Dictionary::from_file(&dict)?;
            for key in keys {
                let key = import::normalize_key(&key);
                let entries = dict.lookup(&key);
                if entries.is_empty() {
                    println!("{key}: not found");
                    continue;
                }
                println!("{key}:");
                for e in entries {
                    println!("  {}\t{}\t{}", e.word, e.frequency, e.tags.join(","));
                }
            }
        }
        Command::Stats { dict, json } => {
            let dict = Dictionary::from_file(&dict)?;
            let stats = Stats {
                version: dict.version(),
                created_at: dict.created_at(),
                updated_at: dict.updated_at(),
                keys: dict.len(),
                entries: dict.entry_count(),
                max_entries_per_key: dict.entries().values().map(Vec::len).max().unwrap_or(0),
            };
            if json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                println!("version:   {}", stats.version);
                println!("keys:      {}", stats.keys);
                println!("entries:   {}", stats.entries);
                println!("max/key:   {}", stats.max_entries_per_key);
            }
        }
        Command::Charset { dict, from, to, out } => {
            let from: Charset = from.parse()?;
            let to: Charset = to.parse()?;
            let src = Dictionary::from_file(&dict)?;
            let conv = CharsetConverter::new();
            let mut dst = Dictionary::new();
            dst.set_version(src.version());
            for (key, entries) in src.entries() {
                for e in entries {
                    let word = conv.convert(&e.word, from, to);
                    dst.add_entry(key, DictEntry { word, ..e.clone() });
                }
            }
            dst.save_to_file(&out)?;
            println!("Wrote {} entries to {}", dst.entry_count(), out.display());
        }
    }
    Ok(())
}
