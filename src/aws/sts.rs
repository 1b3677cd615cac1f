use std::{env, time::Duration};

use aws_config::{BehaviorVersion, ConfigLoader, Region, SdkConfig, timeout::TimeoutConfig};
use aws_credential_types::{
    Credentials,
    provider::{ProvideCredentials, error::CredentialsError},
};
use aws_sdk_sts::{
    Client as StsClient, config::Builder as StsConfigBuilder, error::DisplayErrorContext,
};
use tokio::time;
use tracing::{debug, info};

use super::{AssumeRoleRequest, IssuedCredentials, RoleAssumer};
use crate::{
    constants::{AMBIENT_CREDENTIAL_VARS, DEFAULT_AWS_REGION, DEFAULT_EXCHANGE_TIMEOUT},
    error::ExchangeError,
};

/// AssumeRole against AWS STS using the ambient identity
#[derive(Debug, Clone)]
pub struct StsRoleAssumer {
    timeout: Duration,
}

impl StsRoleAssumer {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Default for StsRoleAssumer {
    fn default() -> Self {
        Self::new(DEFAULT_EXCHANGE_TIMEOUT)
    }
}

impl RoleAssumer for StsRoleAssumer {
    async fn assume_role(
        &self,
        request: AssumeRoleRequest<'_>,
    ) -> Result<IssuedCredentials, ExchangeError> {
        info!("Calling AWS STS AssumeRole");

        // Stale exported keys would otherwise be used to chain-assume.
        clear_ambient_credentials();

        let config = load_sdk_config(request.region, self.timeout).await;
        let identity = resolve_ambient_identity(&config, self.timeout).await?;

        // Reuse the resolved identity instead of walking the provider chain again.
        let sts_config = StsConfigBuilder::from(&config)
            .credentials_provider(identity)
            .build();
        let client = StsClient::from_conf(sts_config);

        let response = client
            .assume_role()
            .role_arn(request.role_arn)
            .role_session_name(request.session_name)
            .duration_seconds(request.duration_seconds)
            .send()
            .await
            .map_err(|e| ExchangeError::AssumeRoleFailure(DisplayErrorContext(&e).to_string()))?;

        let sts_creds = response.credentials().ok_or_else(|| {
            ExchangeError::AssumeRoleFailure("AWS STS returned no credentials".to_string())
        })?;

        let credentials = IssuedCredentials {
            access_key_id: sts_creds.access_key_id().to_string(),
            secret_access_key: sts_creds.secret_access_key().to_string(),
            session_token: sts_creds.session_token().to_string(),
            expiration: *sts_creds.expiration(),
            region: request.region.map(str::to_string),
        };

        info!("Successfully obtained AWS credentials");
        Ok(credentials)
    }
}

fn clear_ambient_credentials() {
    for var in AMBIENT_CREDENTIAL_VARS {
        if env::var_os(var).is_some() {
            debug!("Clearing {}", var);
        }
        // SAFETY: the CLI runs on a current-thread runtime and no other
        // thread reads the environment while the exchange is prepared.
        unsafe {
            env::remove_var(var);
        }
    }
}

fn config_loader(timeout: Duration) -> ConfigLoader {
    aws_config::defaults(BehaviorVersion::latest()).timeout_config(
        TimeoutConfig::builder()
            .operation_timeout(timeout)
            .build(),
    )
}

/// Load AWS config, preferring the role's region over ambient resolution
// Priority: role region -> ENV vars -> Config file -> EC2 metadata -> DEFAULT_AWS_REGION
async fn load_sdk_config(region: Option<&str>, timeout: Duration) -> SdkConfig {
    if let Some(region) = region {
        info!("Using role region: {}", region);
        return config_loader(timeout)
            .region(Region::new(region.to_string()))
            .load()
            .await;
    }

    let loaded = config_loader(timeout).load().await;
    match loaded.region() {
        Some(region) => {
            info!("Using region: {}", region);
            loaded
        }
        None => {
            info!(
                "No region configured, using default {} for STS",
                DEFAULT_AWS_REGION
            );
            config_loader(timeout)
                .region(Region::new(DEFAULT_AWS_REGION))
                .load()
                .await
        }
    }
}

/// Resolve the caller's own credentials within the exchange timeout
async fn resolve_ambient_identity(
    config: &SdkConfig,
    timeout: Duration,
) -> Result<Credentials, ExchangeError> {
    let provider = config.credentials_provider().ok_or_else(|| {
        ExchangeError::SdkConfigFailure("no credentials provider configured".to_string())
    })?;

    time::timeout(timeout, provider.provide_credentials())
        .await
        .map_err(|_| {
            ExchangeError::SdkConfigFailure(format!(
                "timed out after {}s while loading credentials",
                timeout.as_secs_f32()
            ))
        })?
        .map_err(|e| ExchangeError::SdkConfigFailure(credentials_error_message(&e)))
}

// CredentialsError's own Display is only a generic prefix; the cause is in its source.
fn credentials_error_message(err: &CredentialsError) -> String {
    match std::error::Error::source(err) {
        Some(source) => format!("{err}: {}", DisplayErrorContext(source)),
        None => err.to_string(),
    }
}
