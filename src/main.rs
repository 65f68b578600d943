mod config;
mod dict;
mod error;
mod romanize;
mod gendict;
mod manifest;
mod convert;
mod recordlist;

use std::path::PathBuf;
use clap::{Parser, Subcommand};

use config::Config;

#[derive(Parser)]
struct Args {
    #[arg(short, default_value = config::DEFAULT_DICT_FILE, help = "Path to the hanzi-pinyin dictionary file")]
    dict: PathBuf,
    #[arg(short = 'n', global = true, help = "don't actually write any files")]
    dry_run: bool,
    #[command(subcommand)]
    command: Command
}

#[derive(Subcommand)]
enum Command {
    Gen(gendict::Args),
    Manifest(manifest::Args),
    Convert(convert::Args),
    Recordlist(recordlist::Args)
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt::init();

    let config = Config {
        dictionary: args.dict,
        dry_run: args.dry_run
    };

    use Command::*;
    match args.command {
        Gen(margs) => gendict::run(&config, margs),
        Manifest(margs) => manifest::run(&config, margs),
        Convert(margs) => convert::run(&config, margs),
        Recordlist(margs) => recordlist::run(&config, margs)
    }
}
