use tracing::{debug, info};

use super::IssuedCredentials;
use crate::{config::OperatorProfile, error::ExchangeError};

/// Parameters of one AssumeRole call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssumeRoleRequest<'a> {
    pub role_arn: &'a str,
    pub session_name: String,
    pub duration_seconds: i32,
    pub region: Option<&'a str>,
}

/// Remote service that turns a role into temporary credentials
#[allow(async_fn_in_trait)]
pub trait RoleAssumer {
    async fn assume_role(
        &self,
        request: AssumeRoleRequest<'_>,
    ) -> Result<IssuedCredentials, ExchangeError>;
}

/// Resolve `alias` in the profile and assume the referenced role
pub async fn exchange<A: RoleAssumer>(
    assumer: &A,
    alias: &str,
    profile: &OperatorProfile,
) -> Result<IssuedCredentials, ExchangeError> {
    let role = profile
        .assume_roles
        .get(alias)
        .ok_or_else(|| ExchangeError::AliasNotFound(alias.to_string()))?;

    let request = AssumeRoleRequest {
        role_arn: &role.role_arn,
        session_name: session_name(&profile.name, alias),
        duration_seconds: profile.duration,
        region: role.region(),
    };

    info!("Switching to role '{}'", alias);
    debug!("Role ARN: {}", request.role_arn);
    debug!("Session name: {}", request.session_name);
    debug!("Duration: {} seconds", request.duration_seconds);

    let mut credentials = assumer.assume_role(request).await?;
    credentials.region = role.region().map(str::to_string);
    Ok(credentials)
}

// STS validates the allowed characters itself.
fn session_name(display_name: &str, alias: &str) -> String {
    format!("{display_name}-{alias}")
}
