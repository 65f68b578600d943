use std::{collections::BTreeSet, fs::File, io::{self, BufRead, BufReader, BufWriter, Write}, path::PathBuf};
use anyhow::Context as _;
use clap::Parser;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::{config::Config, dict::{self, KeyBy, PinyinMap}, error::{Error, Result}};

static SEPARATORS: Lazy<Regex> = Lazy::new(|| Regex::new("[^A-Za-z]+").unwrap());

const UNMATCHED_SHOWN: usize = 20;

#[derive(Parser)]
pub struct Args {
    #[arg(help = "Path to the pinyin sequence file")]
    input: PathBuf,
    #[arg(help = "Path to write the hanzi output to")]
    output: PathBuf
}

#[derive(Clone, Debug, Default)]
pub struct Stats {
    pub lines: u64,
    pub tokens: u64,
    pub converted: u64,
    pub unmatched: BTreeSet<String>
}

pub fn run(config: &Config, args: Args) -> anyhow::Result<()> {
    let map = dict::load(&config.dictionary, KeyBy::Pinyin)
        .with_context(|| format!("loading {}", config.dictionary.display()))?;

    if !args.input.exists() {
        return Err(Error::NotFound(args.input).into());
    }
    let reader = BufReader::new(File::open(&args.input)?);

    let stats = if config.dry_run {
        convert_stream(reader, io::sink(), &map)?
    } else {
        let mut writer = BufWriter::new(File::create(&args.output)?);
        let res = convert_stream(reader, &mut writer, &map);
        // keep whatever made it out before a failure
        writer.flush()?;
        res?
    };

    print_summary(&stats);
    Ok(())
}

pub fn convert_stream(input: impl BufRead, mut output: impl Write, map: &PinyinMap) -> Result<Stats> {
    let mut stats = Stats::default();

    for line in input.lines() {
        let line = line?;
        stats.lines += 1;

        let line = line.trim();
        if line.is_empty() {
            writeln!(output)?;
            continue;
        }

        let mut out = String::new();
        for token in SEPARATORS.split(line).filter(|t| !t.is_empty()) {
            stats.tokens += 1;
            match map.get(&token.to_lowercase()) {
                Some(hanzi) => {
                    out.push_str(hanzi);
                    stats.converted += 1;
                },
                None => {
                    out.push('[');
                    out.push_str(token);
                    out.push(']');
                    stats.unmatched.insert(token.to_owned());
                }
            }
        }
        writeln!(output, "{out}")?;
    }

    Ok(stats)
}

fn print_summary(stats: &Stats) {
    println!("{} lines, {} tokens, {} converted", stats.lines, stats.tokens, stats.converted);
    if stats.tokens > 0 {
        println!("success rate: {:.2}%", 100.0 * stats.converted as f64 / stats.tokens as f64);
    }
    if !stats.unmatched.is_empty() {
        println!("{} distinct tokens had no dictionary entry:", stats.unmatched.len());
        for token in stats.unmatched.iter().take(UNMATCHED_SHOWN) {
            println!("  {token}");
        }
        if stats.unmatched.len() > UNMATCHED_SHOWN {
            println!("  ... and {} more", stats.unmatched.len() - UNMATCHED_SHOWN);
        }
    }
}
