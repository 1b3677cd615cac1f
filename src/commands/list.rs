use anyhow::Result;
use clap::Args;

use crate::{config::ConfigStore, registry};

#[derive(Debug, Clone, Args)]
pub struct ListCommand {}

impl ListCommand {
    pub async fn execute(self, store: &ConfigStore) -> Result<()> {
        print!("{}", registry::list(store).await?);
        Ok(())
    }
}
