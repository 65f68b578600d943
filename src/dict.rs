use std::{collections::{hash_map::Entry, HashMap}, fs::File, io::{BufRead as _, BufReader}, path::Path};
use tracing::warn;

use crate::error::{Error, Result};

const COMMENT: &str = "//";

pub type PinyinMap = HashMap<String, String>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyBy {
    Hanzi,
    Pinyin
}

pub fn load(path: &Path, key_by: KeyBy) -> Result<PinyinMap> {
    if !path.exists() {
        return Err(Error::NotFound(path.to_owned()));
    }

    let mut map = PinyinMap::new();
    for (i, line) in BufReader::new(File::open(path)?).lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with(COMMENT) {
            continue;
        }

        // a leading '*' and a trailing '!' are accepted but carry no meaning
        let entry = trimmed.strip_prefix('*').unwrap_or(trimmed);
        let entry = entry.strip_suffix('!').unwrap_or(entry);

        let mut chars = entry.chars();
        let (hanzi, pinyin) = match (chars.next(), chars.as_str()) {
            (Some(hanzi), pinyin) if !pinyin.is_empty() => (hanzi, pinyin),
            _ => {
                warn!("{}:{}: malformed entry {trimmed:?}, skipping", path.display(), i + 1);
                continue;
            }
        };

        let (key, value) = match key_by {
            KeyBy::Hanzi => (hanzi.to_string(), pinyin.to_owned()),
            KeyBy::Pinyin => (pinyin.to_owned(), hanzi.to_string())
        };

        match map.entry(key) {
            Entry::Occupied(mut e) => {
                warn!(
                    "{}:{}: {:?} already maps to {:?}, replacing with {:?}",
                    path.display(), i + 1, e.key(), e.get(), value
                );
                e.insert(value);
            },
            Entry::Vacant(e) => { e.insert(value); }
        }
    }

    if map.is_empty() {
        warn!("no usable entries in {}", path.display());
    }

    Ok(map)
}
