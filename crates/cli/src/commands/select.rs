use anyhow::{Context, Result};
use fzsl_core::Selector;
use std::path::Path;

use super::scan::selection_mode;
use crate::cli::GlobalArgs;
use crate::config::Session;
use crate::display::format_scanner;

pub fn select_command(
    global: &GlobalArgs,
    path: Option<&Path>,
    all: bool,
    verbose: bool,
) -> Result<()> {
    let session = Session::load(global)?;
    let selector = Selector::new(&session.registry, &session.runner).with_mode(selection_mode(all));

    let target = match path {
        Some(path) => path.to_path_buf(),
        None => std::env::current_dir().context("Failed to get current directory")?,
    };

    if verbose {
        let applicable = selector.applicable(&target)?;
        if applicable.is_empty() {
            return Err(fzsl_core::Error::NoStrategy { path: target }.into());
        }
        println!("🔍 Scanners applicable to {}:", target.display());
        for (i, entry) in applicable.iter().enumerate() {
            let marker = if i == 0 { "→" } else { " " };
            println!("{} {}", marker, format_scanner(entry));
        }
    } else {
        let entry = selector.select(&target)?;
        println!("{}", entry.name);
    }

    Ok(())
}

