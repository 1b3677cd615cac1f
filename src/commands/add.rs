use anyhow::Result;
use clap::Args;

use crate::{
    config::ConfigStore,
    prompt::TerminalPrompter,
    registry::{self, AddOutcome},
};

#[derive(Debug, Clone, Args)]
pub struct AddCommand {}

impl AddCommand {
    pub async fn execute(self, store: &ConfigStore) -> Result<()> {
        println!("Add new AWS Role Profile\n");

        match registry::add(store, &mut TerminalPrompter::new()).await? {
            AddOutcome::Registered(alias) => {
                println!("Successfully registered new profile: [{alias}]");
            }
            AddOutcome::Updated(alias) => println!("Successfully updated profile: [{alias}]"),
            AddOutcome::Cancelled => println!("Cancelled."),
        }
        Ok(())
    }
}
