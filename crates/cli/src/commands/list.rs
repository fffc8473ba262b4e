use anyhow::Result;
use fzsl_core::RegisteredScanner;

use crate::cli::GlobalArgs;
use crate::config::{Session, describe};
use crate::display::format_scanner;

pub fn list_command(global: &GlobalArgs, json: bool) -> Result<()> {
    let session = Session::load(global)?;

    // Highest priority first, configuration order within a tie
    let mut scanners: Vec<&RegisteredScanner> = session.registry.iter().collect();
    scanners.sort_by(|a, b| b.scanner.cmp_priority(&a.scanner));

    if json {
        println!("{}", serde_json::to_string_pretty(&scanners)?);
        return Ok(());
    }

    println!("📍 Scanners from {}", describe(&session.origin));
    if scanners.is_empty() {
        println!("   (none configured)");
    }
    for entry in scanners {
        println!("   {}", format_scanner(entry));
    }

    Ok(())
}
