//! config command - Get, set, or list configuration values

use crate::core::config::{Config, TemplateConfig};
use crate::scaffold::Context;
use crate::ui::output;
use anyhow::{bail, Context as _, Result};

/// Keys understood by `config get` and `config set`.
pub const KEYS: &[&str] = &["template.url", "template.branch"];

/// Get a configuration value.
///
/// Prints the effective value, including defaults. Prints nothing for an
/// unset key without a default.
pub fn get(key: &str) -> Result<()> {
    let config = Config::load().context("Failed to load config")?;

    let value = match key {
        "template.url" => Some(config.template_url().to_string()),
        "template.branch" => config.template_branch().map(str::to_string),
        _ => bail!("Unknown configuration key: {}", key),
    };

    if let Some(value) = value {
        println!("{}", value);
    }
    Ok(())
}

/// Set a configuration value.
pub fn set(ctx: &Context, key: &str, value: &str) -> Result<()> {
    let mut config = Config::load().context("Failed to load config")?;
    let template = config
        .global
        .template
        .get_or_insert_with(TemplateConfig::default);

    match key {
        "template.url" => template.url = Some(value.to_string()),
        "template.branch" => template.branch = Some(value.to_string()),
        _ => bail!(
            "Unknown configuration key: {} (expected one of: {})",
            key,
            KEYS.join(", ")
        ),
    }

    let path = config.write_global().context("Failed to write config")?;

    output::success(format!("Set {} = {}", key, value), ctx.verbosity);
    output::debug(format!("Wrote {}", path.display()), ctx.verbosity);

    Ok(())
}

/// List all configuration values.
pub fn list() -> Result<()> {
    let config = Config::load().context("Failed to load config")?;

    println!("# Global Configuration");
    match config.global_config_loaded_from() {
        Some(path) => println!("# loaded from {}", path.display()),
        None => println!("# no config file found, showing defaults"),
    }

    println!("template.url = {}", config.template_url());
    match config.template_branch() {
        Some(branch) => println!("template.branch = {}", branch),
        None => println!("template.branch = (remote default)"),
    }

    Ok(())
}
