use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};

use crate::{
    commands::{
        AddCommand, CompletionsCommand, DeleteCommand, InitCommand, ListCommand, SetupCommand,
    },
    config::ConfigStore,
    constants::{self, CONFIG_FILE_ENV},
};

#[derive(Debug, Clone, Parser)]
#[command(name = "sw", version, about = "AWS Role Switcher CLI", long_about = None)]
pub struct Cli {
    #[arg(
        short = 'c',
        long,
        global = true,
        env = CONFIG_FILE_ENV,
        value_name = "PATH",
        help = "Config file location [default: ~/.aws/config.yaml]"
    )]
    pub config: Option<PathBuf>,

    #[arg(
        short = 'v',
        long,
        global = true,
        action = ArgAction::Count,
        help = "Increase verbosity (-v info, -vv debug, -vvv trace)"
    )]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    #[command(about = "Initialize configuration file")]
    Init(InitCommand),
    #[command(about = "Add or update a role ARN")]
    Add(AddCommand),
    #[command(about = "Get temporary credentials")]
    Setup(SetupCommand),
    #[command(about = "List all registered role profiles")]
    List(ListCommand),
    #[command(about = "Remove a role profile")]
    Delete(DeleteCommand),
    #[command(about = "Generate shell completion scripts for sw")]
    Completions(CompletionsCommand),
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        let store = self.config_store()?;

        match self.command {
            Commands::Init(cmd) => cmd.execute(&store).await,
            Commands::Add(cmd) => cmd.execute(&store).await,
            Commands::Setup(cmd) => cmd.execute(&store).await,
            Commands::List(cmd) => cmd.execute(&store).await,
            Commands::Delete(cmd) => cmd.execute(&store).await,
            Commands::Completions(cmd) => {
                cmd.execute();
                Ok(())
            }
        }
    }

    fn config_store(&self) -> Result<ConfigStore> {
        let path = match &self.config {
            Some(path) => path.clone(),
            None => constants::default_config_path().context("Failed to determine home directory")?,
        };
        Ok(ConfigStore::new(path))
    }
}
