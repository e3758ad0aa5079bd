use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use serde::Serialize;

use markfive::config::Config;
use markfive::{blocks, line_tokens, parse};

mod cli;
use cli::{Cli, Commands};

fn read_all(path: Option<&PathBuf>) -> io::Result<String> {
    match path {
        Some(p) => fs::read_to_string(p),
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

fn start_dir_for(input_path: &Option<PathBuf>) -> io::Result<PathBuf> {
    if let Some(p) = input_path {
        Ok(p.parent().unwrap_or(Path::new(".")).to_path_buf())
    } else {
        std::env::current_dir()
    }
}

fn load_config(explicit: Option<&Path>, file: &Option<PathBuf>) -> io::Result<Config> {
    let start_dir = start_dir_for(file)?;
    let (cfg, cfg_path) = markfive::config::load(explicit, &start_dir)?;
    if let Some(path) = &cfg_path {
        log::debug!("Using config from: {}", path.display());
    } else {
        log::debug!("Using default config");
    }
    Ok(cfg)
}

fn print_json<T: Serialize>(value: &T, compact: bool) -> io::Result<()> {
    let json = if compact {
        serde_json::to_string(value)
    } else {
        serde_json::to_string_pretty(value)
    }
    .map_err(io::Error::other)?;
    println!("{json}");
    Ok(())
}

fn run(cli: Cli) -> io::Result<()> {
    match cli.command {
        Commands::Tokens { file } => {
            let input = read_all(file.as_ref())?;
            print_json(&line_tokens(&input), cli.compact)
        }
        Commands::Blocks { file } => {
            let input = read_all(file.as_ref())?;
            let tree = blocks(&input).map_err(io::Error::other)?;
            print_json(&tree, cli.compact)
        }
        Commands::Parse {
            file,
            no_typography,
            debug_tokens,
            lang,
        } => {
            let mut cfg = load_config(cli.config.as_deref(), &file)?;
            if no_typography {
                cfg.typography = false;
            }
            if debug_tokens {
                cfg.debug_tokens = true;
            }
            if let Some(lang) = lang {
                cfg.lang = lang;
            }

            let input = read_all(file.as_ref())?;
            let tree = parse(&input, Some(cfg)).map_err(io::Error::other)?;
            print_json(&tree, cli.compact)
        }
    }
}

fn main() -> ExitCode {
    env_logger::init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
