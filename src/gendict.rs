use std::{fs::File, io::{self, BufWriter, Write}, path::PathBuf};
use anyhow::ensure;
use clap::Parser;
use pinyin::ToPinyin as _;
use tracing::warn;

use crate::config::Config;

#[derive(Parser)]
pub struct Args {
    #[arg(long, value_parser = parse_codepoint, default_value = "U+4E00", help = "First code point of the range")]
    start: u32,
    #[arg(long, value_parser = parse_codepoint, default_value = "U+9FA5", help = "Last code point of the range (inclusive)")]
    end: u32,
    #[arg(long, help = "write bare syllables without the tone digit")]
    plain: bool,
    #[arg(help = "Path to write the dictionary to")]
    output: PathBuf
}

fn parse_codepoint(s: &str) -> Result<u32, String> {
    match s.strip_prefix("U+").or_else(|| s.strip_prefix("0x")) {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => s.parse()
    }
    .map_err(|e| format!("bad code point {s:?}: {e}"))
}

pub fn run(config: &Config, args: Args) -> anyhow::Result<()> {
    ensure!(args.start <= args.end, "empty code point range");

    let entries = if config.dry_run {
        generate(args.start, args.end, args.plain, io::sink())?
    } else {
        let mut out = BufWriter::new(File::create(&args.output)?);
        let entries = generate(args.start, args.end, args.plain, &mut out)?;
        out.flush()?;
        entries
    };

    if entries == 0 {
        warn!("no code point in the range has a pinyin reading");
    }
    if config.dry_run {
        println!("{entries} dictionary entries (dry run, nothing written)");
    } else {
        println!("{entries} dictionary entries written to {}", args.output.display());
    }
    Ok(())
}

// one loader-format line per code point with a known reading
fn generate(start: u32, end: u32, plain: bool, mut out: impl Write) -> io::Result<u32> {
    let mut entries = 0;
    for cp in start..=end {
        let Some(ch) = char::from_u32(cp) else { continue };
        let Some(py) = ch.to_pinyin() else { continue };
        let pinyin = if plain { py.plain() } else { py.with_tone_num_end() };
        writeln!(out, "{ch}{pinyin}")?;
        entries += 1;
    }
    Ok(entries)
}
