use std::path::PathBuf;

pub const DEFAULT_DICT_FILE: &str = "pinyin_library.txt";

pub struct Config {
    pub dictionary: PathBuf,
    pub dry_run: bool
}
