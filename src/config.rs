use std::{
    collections::BTreeMap,
    io,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::{debug, info};

use crate::{
    constants::{DEFAULT_PROFILE_KEY, DEFAULT_SESSION_DURATION_SECONDS},
    error::ConfigError,
};

/// A role the operator can switch into
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleReference {
    pub role_arn: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
}

impl RoleReference {
    /// An empty region means "use the default region"
    pub fn new(role_arn: impl Into<String>, region: &str) -> Self {
        let region = region.trim();
        Self {
            role_arn: role_arn.into(),
            region: (!region.is_empty()).then(|| region.to_string()),
        }
    }

    /// Region override, ignoring blank values from hand-edited files
    pub fn region(&self) -> Option<&str> {
        self.region.as_deref().filter(|r| !r.trim().is_empty())
    }
}

/// The operator identity and its alias registry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperatorProfile {
    #[serde(default = "default_profile_key")]
    pub profile: String,
    #[serde(default)]
    pub name: String,
    #[serde(default = "default_duration")]
    pub duration: i32,
    #[serde(default)]
    pub assume_roles: BTreeMap<String, RoleReference>,
}

fn default_profile_key() -> String {
    DEFAULT_PROFILE_KEY.to_string()
}

fn default_duration() -> i32 {
    DEFAULT_SESSION_DURATION_SECONDS
}

impl OperatorProfile {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            profile: DEFAULT_PROFILE_KEY.to_string(),
            name: name.into(),
            duration: DEFAULT_SESSION_DURATION_SECONDS,
            assume_roles: BTreeMap::new(),
        }
    }
}

/// Reads and writes the YAML document holding the operator profiles
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn exists(&self) -> bool {
        fs::try_exists(&self.path).await.unwrap_or(false)
    }

    /// Load all profiles, requiring an operator name on the first one
    pub async fn load(&self) -> Result<Vec<OperatorProfile>, ConfigError> {
        let data = match fs::read_to_string(&self.path).await {
            Ok(data) => data,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(ConfigError::NotInitialized);
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        let profiles = parse_profiles(&data)?;
        debug!(
            "Loaded {} profile(s) from {}",
            profiles.len(),
            self.path.display()
        );
        Ok(profiles)
    }

    /// Replace the whole document
    pub async fn save(&self, profiles: &[OperatorProfile]) -> Result<(), ConfigError> {
        let data = serde_yaml::to_string(profiles).map_err(ConfigError::Serialize)?;
        self.write_atomic(&data).await?;
        info!("Configuration written to {}", self.path.display());
        Ok(())
    }

    /// Create the config file with its first profile; never overwrites
    pub async fn initialize(&self, profile: OperatorProfile) -> Result<(), ConfigError> {
        if self.exists().await {
            return Err(ConfigError::AlreadyInitialized(self.path.clone()));
        }

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|source| ConfigError::Write {
                    path: parent.to_path_buf(),
                    source,
                })?;
        }

        self.save(&[profile]).await
    }

    async fn write_atomic(&self, data: &str) -> Result<(), ConfigError> {
        let tmp_path = self.tmp_path();
        let write_err = |source| ConfigError::Write {
            path: self.path.clone(),
            source,
        };

        if let Err(e) = fs::write(&tmp_path, data).await {
            fs::remove_file(&tmp_path).await.ok();
            return Err(write_err(e));
        }

        fs::rename(&tmp_path, &self.path).await.map_err(write_err)
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

fn parse_profiles(data: &str) -> Result<Vec<OperatorProfile>, ConfigError> {
    let profiles: Vec<OperatorProfile> = serde_yaml::from_str(data)?;

    match profiles.first() {
        Some(first) if !first.name.trim().is_empty() => Ok(profiles),
        _ => Err(ConfigError::MissingIdentity),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> ConfigStore {
        ConfigStore::new(dir.path().join(".aws").join("config.yaml"))
    }

    fn sample_profile() -> OperatorProfile {
        let mut profile = OperatorProfile::new("alice");
        profile.assume_roles.insert(
            "dev".to_string(),
            RoleReference::new("arn:aws:iam::111122223333:role/Dev", ""),
        );
        profile.assume_roles.insert(
            "prod".to_string(),
            RoleReference::new("arn:aws:iam::444455556666:role/Prod", "us-west-2"),
        );
        profile
    }

    #[test]
    fn test_role_reference_blank_region_is_default() {
        let role = RoleReference::new("arn:aws:iam::111122223333:role/Dev", "  ");
        assert_eq!(role.region, None);
        assert_eq!(role.region(), None);

        let role = RoleReference::new("arn:aws:iam::111122223333:role/Dev", "eu-west-1");
        assert_eq!(role.region(), Some("eu-west-1"));
    }

    #[test]
    fn test_new_profile_defaults() {
        let profile = OperatorProfile::new("alice");
        assert_eq!(profile.profile, "default");
        assert_eq!(profile.duration, 3600);
        assert!(profile.assume_roles.is_empty());
    }

    #[test]
    fn test_parse_profiles() {
        let yaml = r#"
- profile: default
  name: alice
  duration: 900
  assume_roles:
    dev:
      role_arn: arn:aws:iam::111122223333:role/Dev
    prod:
      role_arn: arn:aws:iam::444455556666:role/Prod
      region: us-west-2
"#;
        let profiles = parse_profiles(yaml).unwrap();
        assert_eq!(profiles.len(), 1);
        assert_eq!(profiles[0].name, "alice");
        assert_eq!(profiles[0].duration, 900);
        assert_eq!(profiles[0].assume_roles["dev"].region(), None);
        assert_eq!(profiles[0].assume_roles["prod"].region(), Some("us-west-2"));
    }

    #[test]
    fn test_parse_profiles_hand_edited_empty_region() {
        let yaml = r#"
- profile: default
  name: alice
  duration: 3600
  assume_roles:
    dev:
      role_arn: arn:aws:iam::111122223333:role/Dev
      region: ""
"#;
        let profiles = parse_profiles(yaml).unwrap();
        assert_eq!(profiles[0].assume_roles["dev"].region(), None);
    }

    #[test]
    fn test_parse_profiles_missing_name() {
        let yaml = "- profile: default\n  name: '  '\n  duration: 3600\n";
        assert!(matches!(
            parse_profiles(yaml),
            Err(ConfigError::MissingIdentity)
        ));
    }

    #[test]
    fn test_parse_profiles_absent_name_is_missing_identity() {
        let yaml = "- profile: default\n  duration: 3600\n  assume_roles: {}\n";
        assert!(matches!(
            parse_profiles(yaml),
            Err(ConfigError::MissingIdentity)
        ));
    }

    #[test]
    fn test_parse_profiles_optional_keys_use_defaults() {
        let yaml = "- name: alice\n";
        let profiles = parse_profiles(yaml).unwrap();
        assert_eq!(profiles, vec![OperatorProfile::new("alice")]);
    }

    #[test]
    fn test_serialize_failure_is_not_reported_as_parse() {
        let err = serde_yaml::from_str::<i32>("not a number").unwrap_err();
        let message = ConfigError::Serialize(err).to_string();
        assert!(message.starts_with("Failed to serialize config"));
        assert!(!message.starts_with("Failed to parse"));
    }

    #[test]
    fn test_parse_profiles_empty_list() {
        assert!(matches!(
            parse_profiles("[]"),
            Err(ConfigError::MissingIdentity)
        ));
    }

    #[test]
    fn test_parse_profiles_malformed() {
        assert!(matches!(
            parse_profiles("profile: [unterminated"),
            Err(ConfigError::ParseFailure(_))
        ));
    }

    #[tokio::test]
    async fn test_load_not_initialized() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        assert!(!store.exists().await);
        assert!(matches!(
            store.load().await,
            Err(ConfigError::NotInitialized)
        ));
    }

    #[tokio::test]
    async fn test_initialize_creates_directory() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        store.initialize(OperatorProfile::new("alice")).await.unwrap();

        assert!(store.exists().await);
        let profiles = store.load().await.unwrap();
        assert_eq!(profiles, vec![OperatorProfile::new("alice")]);
    }

    #[tokio::test]
    async fn test_initialize_never_overwrites() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        store.initialize(OperatorProfile::new("alice")).await.unwrap();
        let result = store.initialize(OperatorProfile::new("bob")).await;

        assert!(matches!(result, Err(ConfigError::AlreadyInitialized(_))));
        assert_eq!(store.load().await.unwrap()[0].name, "alice");
    }

    #[tokio::test]
    async fn test_save_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.initialize(OperatorProfile::new("alice")).await.unwrap();

        let profiles = vec![sample_profile()];
        store.save(&profiles).await.unwrap();
        let loaded = store.load().await.unwrap();
        assert_eq!(loaded, profiles);

        // A second pass must not change the document
        let before = std::fs::read_to_string(store.path()).unwrap();
        store.save(&loaded).await.unwrap();
        let after = std::fs::read_to_string(store.path()).unwrap();
        assert_eq!(before, after);
        assert!(!store.tmp_path().exists());
    }

    #[tokio::test]
    async fn test_save_omits_absent_region() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.initialize(sample_profile()).await.unwrap();

        let text = std::fs::read_to_string(store.path()).unwrap();
        assert!(text.starts_with("- profile: default"));
        assert!(text.contains("role_arn: arn:aws:iam::111122223333:role/Dev"));
        assert_eq!(text.matches("region:").count(), 1);
    }

    #[tokio::test]
    async fn test_save_into_missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        let store = ConfigStore::new(dir.path().join("missing").join("config.yaml"));

        let result = store.save(&[OperatorProfile::new("alice")]).await;
        assert!(matches!(result, Err(ConfigError::Write { .. })));
    }
}
