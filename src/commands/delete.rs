use anyhow::Result;
use clap::Args;

use crate::{
    config::ConfigStore,
    prompt::TerminalPrompter,
    registry::{self, DeleteOutcome},
};

#[derive(Debug, Clone, Args)]
pub struct DeleteCommand {
    #[arg(help = "Alias to remove (prompted for when omitted)")]
    pub alias: Option<String>,
}

impl DeleteCommand {
    pub async fn execute(self, store: &ConfigStore) -> Result<()> {
        let outcome =
            registry::delete(store, &mut TerminalPrompter::new(), self.alias.as_deref()).await?;

        match outcome {
            DeleteOutcome::NotFound(alias) => println!("Profile '{alias}' not found."),
            DeleteOutcome::Deleted(alias) => println!("Successfully deleted profile: [{alias}]"),
        }
        Ok(())
    }
}
