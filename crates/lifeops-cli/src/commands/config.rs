use clap::Subcommand;

use lifeops_core::config::{self, Config};

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration as TOML
    Show,
    /// Print the configuration file path
    Path,
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ConfigAction::Show => {
            let config = Config::load()?;
            print!("{}", toml::to_string_pretty(&config)?);
        }
        ConfigAction::Path => {
            let path = config::config_path()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "<no config directory>".to_string());
            println!("{path}");
        }
    }
    Ok(())
}
