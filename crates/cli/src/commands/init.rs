use anyhow::{Context, Result, bail};
use fzsl_core::config::{DEFAULT_CONFIG, default_config_paths};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

pub fn init_command(path: Option<&Path>, force: bool) -> Result<()> {
    let config_path = match path {
        Some(path) => path.to_path_buf(),
        None => default_location()?,
    };

    if config_path.exists() && !force {
        println!("❌ Config already exists at: {}", config_path.display());
        println!("   Use --force to overwrite");
        return Ok(());
    }

    if let Some(parent) = config_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    fs::write(&config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write config to {}", config_path.display()))?;
    info!("Wrote default scanners to {}", config_path.display());

    println!("✅ Created config: {}", config_path.display());
    println!("\n📌 Add a section per scanner, for example:");
    println!("   [notes]");
    println!("   cmd = \"find . -name '*.md'\"");
    println!("   root_path = \"~/notes\"");
    println!("   priority = 20");

    Ok(())
}

fn default_location() -> Result<PathBuf> {
    match default_config_paths().into_iter().next() {
        Some(path) => Ok(path),
        None => bail!("Could not determine a configuration directory; pass --path"),
    }
}
