//! Init command

use std::path::PathBuf;

use clap::Args;
use console::style;
use tracing::info;

use relnotify_core::config::defaults::{DEFAULT_CONFIG_TEMPLATE, DEFAULT_CONFIG_YAML};
use relnotify_core::config::Config;

use crate::cli::Cli;

/// Write a default relnotify configuration
#[derive(Debug, Args)]
pub struct InitCommand {
    /// Force overwrite existing configuration
    #[arg(short, long)]
    pub force: bool,

    /// Output file path (a `.toml` extension writes TOML)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl InitCommand {
    /// Execute the init command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(force = self.force, "executing init command");
        let cwd = std::env::current_dir()?;
        let config_path = self
            .output
            .clone()
            .unwrap_or_else(|| cwd.join(DEFAULT_CONFIG_YAML));

        if config_path.exists() && !self.force {
            anyhow::bail!(
                "Configuration file already exists at {}. Use --force to overwrite.",
                config_path.display()
            );
        }

        std::fs::write(&config_path, render_template(&config_path)?)?;

        if !cli.quiet {
            println!(
                "{} Created configuration at {}",
                style("✓").green().bold(),
                style(config_path.display()).cyan()
            );
            println!();
            println!("Next steps:");
            println!("  1. Set {} and {}", style("CHANNEL_NAME").bold(), style("SLACK_TOKEN").bold());
            println!("  2. Preview with {}", style("relnotify notify --dry-run").cyan());
        }

        Ok(())
    }
}

/// Template content in the format implied by the file extension
fn render_template(path: &std::path::Path) -> anyhow::Result<String> {
    if path.extension().is_some_and(|e| e == "toml") {
        let config: Config = serde_yaml::from_str(DEFAULT_CONFIG_TEMPLATE)?;
        Ok(toml::to_string_pretty(&config)?)
    } else {
        Ok(DEFAULT_CONFIG_TEMPLATE.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_yaml_template_verbatim() {
        let content = render_template(Path::new("relnotify.yaml")).unwrap();
        assert_eq!(content, DEFAULT_CONFIG_TEMPLATE);
    }

    #[test]
    fn test_toml_template_round_trips() {
        let content = render_template(Path::new("relnotify.toml")).unwrap();
        let config: Config = toml::from_str(&content).unwrap();
        assert_eq!(config.categories.fix, "Bugs Fixed");
        assert!(config.slack.token.is_none());
    }
}
