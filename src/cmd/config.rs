//! Configuration view: `company-intel config`.

use anyhow::{Context, Result};
use company_intel::config::{API_URL_ENV, CONFIG_FILE_NAME, ClientConfig};

use super::super::ConfigCommands;

pub fn cmd_config(config: &ClientConfig, command: Option<ConfigCommands>) -> Result<()> {
    match command {
        None | Some(ConfigCommands::Show) => {
            println!();
            println!("Company Intel Configuration");
            println!("===========================");
            println!();

            match &config.source {
                Some(path) => println!("Config file: {}", path.display()),
                None => {
                    println!("No {} found; using defaults.", CONFIG_FILE_NAME);
                    if let Some(dir) = dirs::config_dir() {
                        println!(
                            "Searched ./{} and {}",
                            CONFIG_FILE_NAME,
                            dir.join("company-intel").join("config.toml").display()
                        );
                    }
                }
            }
            if std::env::var_os(API_URL_ENV).is_some() {
                println!("{} is set", API_URL_ENV);
            }
            println!();

            println!("Effective values (with env/CLI overrides):");
            let rendered = config
                .to_toml_string()
                .context("Failed to render configuration")?;
            for line in rendered.lines() {
                println!("  {}", line);
            }
            println!();
        }
    }
    Ok(())
}
