use aws_smithy_types::{DateTime, date_time::Format};

pub mod exchange;
pub mod sts;

/// AWS temporary credentials issued for one role switch
#[derive(Debug, Clone)]
pub struct IssuedCredentials {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub session_token: String,
    pub expiration: DateTime,
    /// Region override of the assumed role, exported alongside the keys
    pub region: Option<String>,
}

impl IssuedCredentials {
    pub fn expiration_display(&self) -> String {
        self.expiration
            .fmt(Format::DateTime)
            .unwrap_or_else(|_| "unknown".to_string())
    }
}

pub use exchange::{AssumeRoleRequest, RoleAssumer, exchange};
pub use sts::StsRoleAssumer;
