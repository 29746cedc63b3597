//! The `facectl config` command for configuration management.

use clap::{Args, Subcommand};
use facectl_core::Config;
use std::path::Path;

/// Arguments for the `config` command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Subcommands for configuration management.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Display current configuration
    Show,

    /// Show config file path
    Path,

    /// Write a config template with placeholder credentials
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
}

/// Execute the config command against the file at `path`.
pub fn execute(args: ConfigArgs, path: &Path) -> anyhow::Result<()> {
    match args.command {
        ConfigCommand::Show => {
            let config = Config::load_from(path)?;
            print!("{}", config.to_toml()?);
        }

        ConfigCommand::Path => {
            println!("{}", path.display());
        }

        ConfigCommand::Init { force } => {
            init(path, force)?;
            tracing::info!("Config file created at: {}", path.display());
            println!("Configuration initialized at: {}", path.display());
        }
    }

    Ok(())
}

fn init(path: &Path, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "Config file already exists at: {}\nUse --force to overwrite.",
            path.display()
        );
    }
    Config::write_template(path, None)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use facectl_core::config::{DEFAULT_API_URL, PLACEHOLDER_API_KEY};

    #[test]
    fn init_writes_template() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        init(&path, false).unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.faceplusplus.api_key(), PLACEHOLDER_API_KEY);
        assert_eq!(config.faceplusplus.api_url(), DEFAULT_API_URL);
    }

    #[test]
    fn init_refuses_to_overwrite_without_force() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[faceplusplus]\n\"api key\" = \"real\"\n").unwrap();

        let err = init(&path, false).unwrap_err();
        assert!(err.to_string().contains("already exists"));
        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.faceplusplus.api_key(), "real");
    }

    #[test]
    fn init_with_force_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[faceplusplus]\n\"api key\" = \"real\"\n").unwrap();

        init(&path, true).unwrap();
        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.faceplusplus.api_key(), PLACEHOLDER_API_KEY);
    }
}
