use anyhow::Result;
use fzsl_core::{SelectionMode, Selector};
use std::io::{self, Write};
use std::path::Path;
use tracing::info;

use crate::cli::GlobalArgs;
use crate::config::Session;

pub fn scan_command(
    global: &GlobalArgs,
    path: Option<&Path>,
    scanner: Option<&str>,
    all: bool,
    json: bool,
) -> Result<()> {
    let session = Session::load(global)?;
    let selector = Selector::new(&session.registry, &session.runner).with_mode(selection_mode(all));

    let outcome = match scanner {
        Some(name) => selector.scan_with(name, path)?,
        None => selector.scan(path)?,
    };
    info!(
        "[{}] listed {} paths in {}",
        outcome.scanner,
        outcome.candidates.len(),
        outcome.working_dir.display()
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let written = if json {
        serde_json::to_writer_pretty(&mut out, &outcome)
            .map_err(io::Error::from)
            .and_then(|()| writeln!(out))
    } else {
        write_candidates(&mut out, &outcome.candidates)
    };

    match written {
        // The consumer stopped reading, e.g. `fzsl scan | head`
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        other => Ok(other?),
    }
}

pub(crate) fn selection_mode(all: bool) -> SelectionMode {
    if all {
        SelectionMode::IncludeDisabled
    } else {
        SelectionMode::Automatic
    }
}

pub fn write_candidates<W: Write>(out: &mut W, candidates: &[String]) -> io::Result<()> {
    for candidate in candidates {
        writeln!(out, "{candidate}")?;
    }
    out.flush()
}
