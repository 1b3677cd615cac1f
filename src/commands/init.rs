use anyhow::Result;
use clap::Args;

use crate::{
    config::ConfigStore,
    prompt::TerminalPrompter,
    registry::{self, InitOutcome},
};

#[derive(Debug, Clone, Args)]
pub struct InitCommand {}

impl InitCommand {
    pub async fn execute(self, store: &ConfigStore) -> Result<()> {
        match registry::init(store, &mut TerminalPrompter::new()).await? {
            InitOutcome::AlreadyExists(path) => {
                println!("Configuration already exists: {}", path.display());
                println!("You can manually edit the configuration file");
            }
            InitOutcome::Created => {
                println!("\nInitialization completed successfully.");
                println!("Next step: Register your first role using 'sw add'");
            }
        }
        Ok(())
    }
}
