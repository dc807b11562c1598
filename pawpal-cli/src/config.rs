use anyhow::{Context, Result};
use clap::Subcommand;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

pub fn pawpal_home() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".pawpal"))
}

pub fn ensure_pawpal_home() -> Result<PathBuf> {
    let dir = pawpal_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub schedule: ScheduleSection,
    pub output: OutputSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleSection {
    /// Window used when a household file leaves it out.
    pub start_hour: i32,
    pub end_hour: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct OutputSection {
    /// Print JSON instead of text unless overridden on the command line.
    pub json: bool,
}

impl Default for ScheduleSection {
    fn default() -> Self {
        Self {
            start_hour: 8,
            end_hour: 20,
        }
    }
}

impl Config {
    pub fn default_window(&self) -> (i32, i32) {
        (self.schedule.start_hour, self.schedule.end_hour)
    }
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Write ~/.pawpal/config.toml with defaults (no-op if it exists)
    Init,
    /// Print the effective configuration
    Show,
}

pub fn config_path() -> Result<PathBuf> {
    Ok(ensure_pawpal_home()?.join("config.toml"))
}

pub fn load_config() -> Result<Config> {
    let p = config_path()?;
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    parse_config(&s).with_context(|| format!("in {}", p.display()))
}

pub fn parse_config(s: &str) -> Result<Config> {
    toml::from_str(s).context("parse config.toml")
}

pub fn save_config(cfg: &Config) -> Result<()> {
    let p = config_path()?;
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(&p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

pub fn init_config() -> Result<()> {
    let p = config_path()?;
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    save_config(&Config::default())?;
    println!("Wrote {}", p.display());
    Ok(())
}

pub fn run(command: ConfigCommand) -> Result<()> {
    match command {
        ConfigCommand::Init => init_config(),
        ConfigCommand::Show => {
            let cfg = load_config()?;
            print!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_keeps_defaults() {
        let cfg = parse_config("[output]\njson = true\n").unwrap();
        assert!(cfg.output.json);
        assert_eq!(cfg.default_window(), (8, 20));
    }

    #[test]
    fn test_config_round_trips_through_toml() {
        let mut cfg = Config::default();
        cfg.schedule.start_hour = 6;
        let s = toml::to_string_pretty(&cfg).unwrap();
        assert_eq!(parse_config(&s).unwrap(), cfg);
    }
}
