use crate::core::Config;
use anyhow::{Context, Result};
use colored::Colorize;

pub fn handle_show() -> Result<()> {
    let config = Config::load().context("Failed to load configuration")?;

    println!("{}", "Progress table settings:".bold());
    println!(
        "  {} {} ms",
        "refresh interval:".cyan(),
        config.refresh_interval_ms
    );
    println!("  {} '{}'", "fill symbol:".cyan(), config.fill_symbol);

    if let Ok(path) = Config::get_config_path() {
        println!("  {} {}", "file:".dimmed(), path.display().to_string().dimmed());
    }
    Ok(())
}

pub fn handle_set(matches: &clap::ArgMatches) -> Result<()> {
    let mut config = Config::load().context("Failed to load configuration")?;
    let mut changed = false;

    if let Some(interval_ms) = matches.get_one::<u64>("interval-ms") {
        if *interval_ms == 0 {
            anyhow::bail!("Refresh interval must be at least 1 ms");
        }
        config.refresh_interval_ms = *interval_ms;
        changed = true;
    }

    if let Some(fill) = matches.get_one::<char>("fill") {
        if fill.is_control() {
            anyhow::bail!("Fill symbol must be a printable character");
        }
        config.fill_symbol = *fill;
        changed = true;
    }

    if !changed {
        println!("Nothing to change. Use 'ptable config set --help' for more information.");
        return Ok(());
    }

    config.save().context("Failed to save configuration")?;
    println!("{}", "✓ Configuration saved".green());
    Ok(())
}

pub fn handle_reset() -> Result<()> {
    Config::default()
        .save()
        .context("Failed to save configuration")?;
    println!("{}", "✓ Configuration reset to defaults".green());
    Ok(())
}
