use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use crate::{
    aws::{self, StsRoleAssumer},
    clipboard,
    config::ConfigStore,
    constants::DEFAULT_EXCHANGE_TIMEOUT,
    shell::{self, ShellKind},
};

#[derive(Debug, Clone, Args)]
pub struct SetupCommand {
    #[arg(help = "Registered alias of the role to assume")]
    pub alias: String,

    #[arg(
        short = 's',
        long,
        value_enum,
        help = "Shell syntax of the export snippet [default: detected from the platform]"
    )]
    pub shell: Option<ShellKind>,

    #[arg(
        long,
        help = "Print the export snippet to stdout instead of copying it to the clipboard"
    )]
    pub print: bool,

    #[arg(
        short = 't',
        long,
        value_name = "SECONDS",
        default_value_t = DEFAULT_EXCHANGE_TIMEOUT.as_secs(),
        help = "Timeout for the AssumeRole call"
    )]
    pub timeout: u64,
}

impl SetupCommand {
    pub async fn execute(self, store: &ConfigStore) -> Result<()> {
        info!("Starting role switch to '{}'", self.alias);

        let profiles = store.load().await?;

        let assumer = StsRoleAssumer::new(Duration::from_secs(self.timeout));
        let credentials = aws::exchange(&assumer, &self.alias, &profiles[0]).await?;

        let kind = self.shell.unwrap_or_else(ShellKind::detect);
        let output = shell::encode(&credentials, kind);

        if self.print {
            println!("{output}");
        } else {
            clipboard::copy(&output)
                .context("Failed to copy credentials; rerun with --print to write them to stdout")?;
            println!(
                "[{}] credentials copied! Paste and execute in your terminal.",
                self.alias
            );
        }

        eprintln!(
            "Credentials will expire at: {}",
            credentials.expiration_display()
        );

        Ok(())
    }
}
