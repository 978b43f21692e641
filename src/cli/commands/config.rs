//! Config command handler

use crate::args::ConfigSubcommand;
use room_occupancy::config::Config;
use room_occupancy::{error, info};
use std::io::{self, BufRead, Write};

/// Dispatch config subcommands; returns the process exit code
pub fn run(subcommand: Option<ConfigSubcommand>, config: &mut Config, defaults: &Config) -> i32 {
    let result = match subcommand {
        None => show(config, None),
        Some(ConfigSubcommand::Get { key }) => show(config, key.as_deref()),
        Some(ConfigSubcommand::Set { key, value }) => set(config, &key, &value),
        Some(ConfigSubcommand::Unset { key }) => unset(config, defaults, &key),
        Some(ConfigSubcommand::Reset) => reset(&mut io::stdin().lock()),
    };

    match result {
        Ok(()) => 0,
        Err(err) => {
            error!("config: {err}");
            eprintln!("✗ {err}");
            1
        }
    }
}

fn show(config: &Config, key: Option<&str>) -> Result<(), String> {
    if let Some(k) = key {
        let value = config
            .get(k)
            .ok_or_else(|| format!("Unknown config key: '{k}'"))?;
        println!("{value}");
    } else {
        println!("# {}\n", Config::get_config_file_path().display());
        print!("{config}");
    }
    Ok(())
}

fn set(config: &mut Config, key: &str, value: &str) -> Result<(), String> {
    config.set(key, value)?;
    config
        .save()
        .map_err(|e| format!("Failed to save config: {e}"))?;
    info!("config: {key} set to {value}");
    println!("✓ Set {key} = {value}");
    Ok(())
}

fn unset(config: &mut Config, defaults: &Config, key: &str) -> Result<(), String> {
    config.unset(key, defaults)?;
    config
        .save()
        .map_err(|e| format!("Failed to save config: {e}"))?;
    info!("config: {key} reset to default");
    println!("✓ Reset {key} to default");
    Ok(())
}

/// Delete the config file after a `y`/`yes` answer read from `input`
fn reset(input: &mut impl BufRead) -> Result<(), String> {
    if !Config::get_config_file_path().exists() {
        println!("✓ Config is already at defaults");
        return Ok(());
    }

    print!("Reset configuration to defaults? (y/n): ");
    io::stdout().flush().ok();

    let mut answer = String::new();
    input
        .read_line(&mut answer)
        .map_err(|e| format!("Failed to read answer: {e}"))?;

    if matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes") {
        Config::reset().map_err(|e| format!("Failed to remove config file: {e}"))?;
        println!("✓ Config reset to defaults");
    } else {
        println!("Reset cancelled");
    }
    Ok(())
}
