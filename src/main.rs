//! Print the frozen site config as JSON for the rest of the pipeline.

use anyhow::{Context, Result};
use site_config::log;
use std::io::{Write, stdout};

fn main() -> Result<()> {
    let config = site_config::load()?;

    log!("config"; "loaded `{}`, {} posts per page", config.name, config.posts_per_page);

    let mut out = stdout().lock();
    serde_json::to_writer_pretty(&mut out, &*config).context("Failed to write site config")?;
    writeln!(out)?;
    Ok(())
}
