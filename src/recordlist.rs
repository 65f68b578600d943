use std::{fs, path::PathBuf};
use anyhow::Context as _;
use clap::Parser;
use tracing::warn;

use crate::{config::Config, dict::{self, KeyBy, PinyinMap}, error::Error};

#[derive(Parser)]
pub struct Args {
    #[arg(help = "Path to the recordlist file")]
    recordlist: PathBuf,
    #[arg(short, default_value = "output", help = "Directory to write the per-recording files to")]
    outdir: PathBuf
}

pub fn run(config: &Config, args: Args) -> anyhow::Result<()> {
    let map = dict::load(&config.dictionary, KeyBy::Pinyin)
        .with_context(|| format!("loading {}", config.dictionary.display()))?;

    if !args.recordlist.exists() {
        return Err(Error::NotFound(args.recordlist).into());
    }
    let text = fs::read_to_string(&args.recordlist)?;

    if !config.dry_run {
        fs::create_dir_all(&args.outdir)?;
    }

    let mut converted = 0u32;
    let mut skipped = 0u32;
    for token in text.split_whitespace() {
        match try_convert(token, &map) {
            Some(hanzi) => {
                if !config.dry_run {
                    fs::write(args.outdir.join(format!("{token}.txt")), &hanzi)?;
                }
                converted += 1;
            },
            None => {
                warn!("{token}: not every syllable is in the dictionary, skipping");
                skipped += 1;
            }
        }
    }

    println!("{converted} recordings converted, {skipped} skipped");
    Ok(())
}

// all or nothing: the token converts only if every letter run resolves
fn try_convert(token: &str, map: &PinyinMap) -> Option<String> {
    let mut out = String::new();
    let mut any = false;
    for run in token.split(|c: char| !c.is_ascii_alphabetic()).filter(|r| !r.is_empty()) {
        out.push_str(map.get(&run.to_lowercase())?);
        any = true;
    }
    any.then_some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map() -> PinyinMap {
        [("ni", "你"), ("hao", "好"), ("ma", "吗")]
            .iter()
            .map(|&(p, h)| (p.to_owned(), h.to_owned()))
            .collect()
    }

    #[test]
    fn converts_every_syllable_in_order() {
        assert_eq!(try_convert("_ni_hao", &map()).as_deref(), Some("你好"));
        assert_eq!(try_convert("ni-hao-ma", &map()).as_deref(), Some("你好吗"));
    }

    #[test]
    fn one_unknown_syllable_drops_the_token() {
        assert_eq!(try_convert("ni_zai", &map()), None);
    }

    #[test]
    fn tokens_without_letters_are_dropped() {
        assert_eq!(try_convert("123", &map()), None);
        assert_eq!(try_convert("", &map()), None);
    }

    #[test]
    fn writes_one_file_per_converted_token() {
        let dir = tempfile::tempdir().unwrap();
        let dict = dir.path().join("dict.txt");
        fs::write(&dict, "你ni\n好hao\n").unwrap();
        let list = dir.path().join("reclist.txt");
        fs::write(&list, "_ni_hao zai4jian\n").unwrap();
        let outdir = dir.path().join("out");

        let config = Config { dictionary: dict, dry_run: false };
        run(&config, Args { recordlist: list, outdir: outdir.clone() }).unwrap();

        assert_eq!(fs::read_to_string(outdir.join("_ni_hao.txt")).unwrap(), "你好");
        assert!(!outdir.join("zai4jian.txt").exists());
    }

    #[test]
    fn dry_run_touches_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let dict = dir.path().join("dict.txt");
        fs::write(&dict, "你ni\n").unwrap();
        let list = dir.path().join("reclist.txt");
        fs::write(&list, "ni\n").unwrap();
        let outdir = dir.path().join("out");

        let config = Config { dictionary: dict, dry_run: true };
        run(&config, Args { recordlist: list, outdir: outdir.clone() }).unwrap();
        assert!(!outdir.exists());
    }
}
