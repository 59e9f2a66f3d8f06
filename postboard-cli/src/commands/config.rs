use anyhow::{Context, Result};
use shared::config::ClientConfig;

/// Prints the resolved configuration as TOML, ready to save as a config file.
///
/// # Errors
/// Returns an error if serialization fails.
pub fn print_config(config: &ClientConfig) -> Result<()> {
    let rendered = config
        .to_toml()
        .context("failed to render configuration")?;
    print!("{rendered}");
    Ok(())
}
