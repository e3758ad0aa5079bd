use clap::{Command, CommandFactory};
use clap_complete::{Shell, generate_to};
use clap_mangen::Man;
use std::env;
use std::fs;
use std::io::Result;
use std::path::{Path, PathBuf};

#[path = "src/cli.rs"]
mod cli;

const SHELLS: [Shell; 5] = [
    Shell::Bash,
    Shell::Fish,
    Shell::Zsh,
    Shell::PowerShell,
    Shell::Elvish,
];

fn render(man: Man, path: &Path) -> Result<()> {
    let mut buffer = Vec::new();
    man.render(&mut buffer)?;
    fs::write(path, buffer)
}

/// `markfive.1` plus `markfive-tokens.1`, `markfive-blocks.1` and
/// `markfive-parse.1`.
fn write_man_pages(cmd: &Command, out_dir: &Path) -> Result<()> {
    fs::create_dir_all(out_dir)?;
    let bin = cmd.get_name().to_string();
    render(Man::new(cmd.clone()), &out_dir.join(format!("{bin}.1")))?;

    for sub in cmd.get_subcommands().filter(|sub| sub.get_name() != "help") {
        let page = format!("{bin}-{}", sub.get_name());
        // Display and bin names give the page its own NAME and SYNOPSIS lines.
        let sub = sub
            .clone()
            .display_name(page.clone())
            .bin_name(format!("{bin} {}", sub.get_name()));
        render(Man::new(sub).title(page.clone()), &out_dir.join(format!("{page}.1")))?;
    }
    Ok(())
}

fn main() -> Result<()> {
    let mut cmd = cli::Cli::command();
    let bin = cmd.get_name().to_string();

    if let Some(outdir) = env::var_os("OUT_DIR") {
        for shell in SHELLS {
            generate_to(shell, &mut cmd, &bin, &outdir)?;
        }
    }

    write_man_pages(&cmd, &PathBuf::from("target/man"))?;

    println!("cargo:rerun-if-changed=src/cli.rs");
    println!("cargo:rerun-if-changed=build.rs");

    Ok(())
}
