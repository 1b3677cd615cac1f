//! Alias registry operations behind the `init`, `add`, `list` and `delete` commands.

use std::path::PathBuf;

use anyhow::Result;
use tracing::info;

use crate::{
    config::{ConfigStore, OperatorProfile, RoleReference},
    constants::DEFAULT_REGION_LABEL,
    prompt::{self, Prompter},
};

const COLUMN_GAP: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InitOutcome {
    Created,
    AlreadyExists(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    Registered(String),
    Updated(String),
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted(String),
    NotFound(String),
}

/// Create the config file with the operator's name
pub async fn init<P: Prompter + ?Sized>(
    store: &ConfigStore,
    prompter: &mut P,
) -> Result<InitOutcome> {
    if store.exists().await {
        return Ok(InitOutcome::AlreadyExists(store.path().to_path_buf()));
    }

    let name = prompt::required(
        prompter,
        "Enter your name (for session identification)",
        Some("Name is required. Please try again."),
    )?;

    store.initialize(OperatorProfile::new(name)).await?;
    info!("Initialized {}", store.path().display());
    Ok(InitOutcome::Created)
}

/// Register a new alias or overwrite an existing one after confirmation
pub async fn add<P: Prompter + ?Sized>(
    store: &ConfigStore,
    prompter: &mut P,
) -> Result<AddOutcome> {
    let mut profiles = store.load().await?;

    let alias = prompt::required(prompter, "Enter profile alias (e.g., dev, prod)", None)?;

    let exists = profiles[0].assume_roles.contains_key(&alias);
    if exists
        && !prompt::confirm(
            prompter,
            &format!("Profile '{alias}' already exists. Overwrite? (y/n)"),
        )?
    {
        return Ok(AddOutcome::Cancelled);
    }

    let role_arn = prompt::required(prompter, "Enter Role ARN", None)?;
    let region = prompter.input("Enter Region (optional)")?;

    profiles[0]
        .assume_roles
        .insert(alias.clone(), RoleReference::new(role_arn, &region));
    store.save(&profiles).await?;

    Ok(if exists {
        AddOutcome::Updated(alias)
    } else {
        AddOutcome::Registered(alias)
    })
}

/// Render the alias table, sorted by alias
pub async fn list(store: &ConfigStore) -> Result<String> {
    let profiles = store.load().await?;
    Ok(render_table(&profiles[0]))
}

/// Remove an alias given on the command line or asked for interactively
pub async fn delete<P: Prompter + ?Sized>(
    store: &ConfigStore,
    prompter: &mut P,
    alias: Option<&str>,
) -> Result<DeleteOutcome> {
    let mut profiles = store.load().await?;

    let alias = match alias {
        Some(alias) => alias.to_string(),
        None => prompter.input("Enter profile alias to delete")?,
    };

    if profiles[0].assume_roles.remove(&alias).is_none() {
        return Ok(DeleteOutcome::NotFound(alias));
    }

    store.save(&profiles).await?;
    Ok(DeleteOutcome::Deleted(alias))
}

pub fn render_table(profile: &OperatorProfile) -> String {
    let mut rows = vec![
        ["ALIAS", "REGION", "ROLE ARN"],
        ["-----", "------", "--------"],
    ];
    rows.extend(profile.assume_roles.iter().map(|(alias, role)| {
        [
            alias.as_str(),
            role.region().unwrap_or(DEFAULT_REGION_LABEL),
            role.role_arn.as_str(),
        ]
    }));

    // Widths count characters, not bytes, so non-ASCII aliases stay aligned.
    let width = |col: usize| {
        rows.iter()
            .map(|r| r[col].chars().count())
            .max()
            .unwrap_or(0)
            + COLUMN_GAP
    };
    let alias_width = width(0);
    let region_width = width(1);

    rows.iter()
        .map(|[alias, region, arn]| {
            format!("{alias:<alias_width$}{region:<region_width$}{arn}\n")
        })
        .collect()
}
