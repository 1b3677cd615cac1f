use clap::ValueEnum;

use crate::aws::IssuedCredentials;

/// Shell family the export snippet is written for
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ShellKind {
    /// `export NAME=value`, one per line (Bash, Zsh)
    Posix,
    /// `$env:NAME="value"` joined by `;` so it runs as one pasted line
    #[value(name = "powershell")]
    PowerShell,
}

impl ShellKind {
    pub fn detect() -> Self {
        if cfg!(windows) {
            Self::PowerShell
        } else {
            Self::Posix
        }
    }

    fn assignment(self, name: &str, value: &str) -> String {
        match self {
            Self::Posix => format!("export {name}={value}"),
            Self::PowerShell => format!("$env:{name}=\"{value}\""),
        }
    }

    fn separator(self) -> &'static str {
        match self {
            Self::Posix => "\n",
            Self::PowerShell => "; ",
        }
    }
}

/// Render credentials as a snippet that sets the AWS environment variables.
///
/// Values are inserted verbatim. A secret containing quotes or other
/// characters the shell interprets would produce a broken snippet; STS does
/// not issue such values today.
pub fn encode(creds: &IssuedCredentials, kind: ShellKind) -> String {
    let mut vars = vec![
        ("AWS_ACCESS_KEY_ID", creds.access_key_id.as_str()),
        ("AWS_SECRET_ACCESS_KEY", creds.secret_access_key.as_str()),
        ("AWS_SESSION_TOKEN", creds.session_token.as_str()),
    ];
    if let Some(region) = creds.region.as_deref().filter(|r| !r.is_empty()) {
        vars.push(("AWS_REGION", region));
    }

    vars.iter()
        .map(|(name, value)| kind.assignment(name, value))
        .collect::<Vec<_>>()
        .join(kind.separator())
}
