use std::{env, path::PathBuf, time::Duration};

/// Environment variable that overrides the config file location
pub const CONFIG_FILE_ENV: &str = "SW_CONFIG_FILE";

/// AWS configuration directory name
pub const AWS_CONFIG_DIR_NAME: &str = ".aws";

/// Role switcher configuration file name
pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// Profile key written by `sw init`
pub const DEFAULT_PROFILE_KEY: &str = "default";

/// Default requested lifetime of issued credentials
pub const DEFAULT_SESSION_DURATION_SECONDS: i32 = 3600;

/// Default AWS region for STS operations when no region is configured
pub const DEFAULT_AWS_REGION: &str = "us-east-1";

/// Upper bound for a single AssumeRole round-trip
pub const DEFAULT_EXCHANGE_TIMEOUT: Duration = Duration::from_secs(30);

/// Shown in `sw list` for roles without a region override
pub const DEFAULT_REGION_LABEL: &str = "(default)";

/// Ambient credential variables cleared before assuming a role
pub const AMBIENT_CREDENTIAL_VARS: [&str; 3] = [
    "AWS_ACCESS_KEY_ID",
    "AWS_SECRET_ACCESS_KEY",
    "AWS_SESSION_TOKEN",
];

/// Get the config file path
/// Respects SW_CONFIG_FILE environment variable if set
pub fn default_config_path() -> Option<PathBuf> {
    if let Ok(path) = env::var(CONFIG_FILE_ENV) {
        return Some(PathBuf::from(path));
    }

    dirs::home_dir().map(|home| home.join(AWS_CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}
