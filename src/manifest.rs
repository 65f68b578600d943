use std::{fs, path::{Path, PathBuf}};
use anyhow::Context as _;
use clap::Parser;
use serde::Serialize as _;
use serde_json::{ser::PrettyFormatter, Serializer, Value};
use tracing::{info, warn};

use crate::{config::Config, dict::{self, KeyBy, PinyinMap}, error::{Error, Result}, romanize};

#[derive(Parser)]
pub struct Args {
    #[arg(help = "Path to the manifest JSON file")]
    manifest: PathBuf
}

pub fn run(config: &Config, args: Args) -> anyhow::Result<()> {
    let map = dict::load(&config.dictionary, KeyBy::Hanzi)
        .with_context(|| format!("loading {}", config.dictionary.display()))?;

    let renamed = update(&args.manifest, &map, config.dry_run)?;
    println!("{renamed} file names converted");
    Ok(())
}

pub fn update(path: &Path, map: &PinyinMap, dry_run: bool) -> Result<usize> {
    if !path.exists() {
        return Err(Error::NotFound(path.to_owned()));
    }

    let mut doc: Value = serde_json::from_str(&fs::read_to_string(path)?)?;
    let descriptions = doc
        .get_mut("descriptions")
        .and_then(Value::as_array_mut)
        .ok_or_else(|| Error::Schema { file: path.to_owned(), field: "descriptions" })?;

    let mut renamed = 0;
    for desc in descriptions.iter_mut() {
        let Some(obj) = desc.as_object_mut() else {
            warn!("description is not an object, leaving it alone");
            continue;
        };
        let name = obj.get("file_name").and_then(Value::as_str).unwrap_or_default();
        if name.is_empty() {
            warn!("description has no 'file_name', leaving it alone");
            continue;
        }
        // names with no hanzi left are already converted; skipping them keeps reruns harmless
        if !romanize::contains_mapped(name, map) {
            continue;
        }

        let converted = romanize::romanize(name, map);
        println!("{name} -> {converted}");
        obj.insert("file_name".to_owned(), Value::String(converted));
        renamed += 1;
    }

    if dry_run {
        return Ok(renamed);
    }

    let backup = backup_path(path);
    fs::copy(path, &backup)?;
    info!("backed up {} to {}", path.display(), backup.display());

    fs::write(path, to_pretty_json(&doc)?)?;
    Ok(renamed)
}

fn backup_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".bak");
    name.into()
}

// four-space indent, non-ASCII written as-is
fn to_pretty_json(doc: &Value) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    doc.serialize(&mut ser)?;
    buf.push(b'\n');
    Ok(buf)
}
