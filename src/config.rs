//! Credential and project configuration.
//!
//! Settings come from the first readable `config.toml` under
//! `~/.gerrit-hook/` or `~/.config/gerrit-hook/`, with environment
//! variables taking precedence over the file. A missing file is tolerated
//! (everything can be supplied through the environment); a missing required
//! setting is not.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Fully resolved configuration for one hook invocation.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the Gerrit instance, without a trailing slash.
    pub gerrit_url: String,
    /// Base URL of the Jenkins instance.
    pub jenkins_url: String,
    pub jenkins_user: String,
    pub jenkins_token: String,
    pub github_token: String,
    /// Project short names allowed to trigger CI builds.
    pub projects: Vec<String>,
}

/// On-disk shape: every setting optional, validated after env overrides.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct RawConfig {
    gerrit_url: Option<String>,
    jenkins_url: Option<String>,
    jenkins_user: Option<String>,
    jenkins_token: Option<String>,
    github_token: Option<String>,
    projects: Option<Vec<String>>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("reading config file {} failed: {reason}", .path.display())]
    Read { path: PathBuf, reason: String },

    #[error("config file {} is not valid TOML: {reason}", .path.display())]
    Parse { path: PathBuf, reason: String },

    #[error("missing required setting {setting} (set it in config.toml or via {env})")]
    Missing {
        setting: &'static str,
        env: &'static str,
    },

    #[error("building the issue-tracker client failed: {0}")]
    IssueTrackerClient(String),
}

impl Config {
    /// Loads configuration from the default search paths plus environment.
    pub fn load() -> Result<Config, ConfigError> {
        let raw = match Self::find_file() {
            Some(path) => Self::read_file(&path)?,
            None => {
                tracing::warn!("no config file found, relying on environment variables");
                RawConfig::default()
            }
        };
        Self::resolve(raw, &env_var)
    }

    fn find_file() -> Option<PathBuf> {
        let mut candidates = Vec::new();
        if let Some(home) = dirs::home_dir() {
            candidates.push(home.join(".gerrit-hook").join("config.toml"));
        }
        if let Some(config) = dirs::config_dir() {
            candidates.push(config.join("gerrit-hook").join("config.toml"));
        }
        candidates.into_iter().find(|p| p.is_file())
    }

    fn read_file(path: &Path) -> Result<RawConfig, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        toml::from_str(&text).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Applies environment overrides and checks required settings.
    ///
    /// `env` is injected so tests can resolve without touching the process
    /// environment.
    fn resolve(
        raw: RawConfig,
        env: &dyn Fn(&str) -> Option<String>,
    ) -> Result<Config, ConfigError> {
        let projects = match env("GERRIT_HOOK_PROJECTS") {
            Some(list) => list
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            None => raw.projects.unwrap_or_default(),
        };
        Ok(Config {
            gerrit_url: setting(raw.gerrit_url, "gerrit-url", "GERRIT_URL", env)?,
            jenkins_url: setting(raw.jenkins_url, "jenkins-url", "JENKINS_URL", env)?,
            jenkins_user: setting(raw.jenkins_user, "jenkins-user", "JENKINS_USER", env)?,
            jenkins_token: setting(raw.jenkins_token, "jenkins-token", "JENKINS_TOKEN", env)?,
            github_token: setting(raw.github_token, "github-token", "GITHUB_TOKEN", env)?,
            projects,
        })
    }
}

fn setting(
    file_value: Option<String>,
    name: &'static str,
    env_name: &'static str,
    env: &dyn Fn(&str) -> Option<String>,
) -> Result<String, ConfigError> {
    if let Some(value) = env(env_name) {
        return Ok(value);
    }
    file_value
        .filter(|v| !v.is_empty())
        .ok_or(ConfigError::Missing {
            setting: name,
            env: env_name,
        })
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    const COMPLETE: &str = r#"
        gerrit-url = "https://review.example.net"
        jenkins-url = "https://build.example.net"
        jenkins-user = "hook"
        jenkins-token = "sekrit"
        github-token = "ghp_zzz"
        projects = ["widgets", "gadgets"]
    "#;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn resolves_a_complete_file() {
        let raw: RawConfig = toml::from_str(COMPLETE).unwrap();
        let config = Config::resolve(raw, &no_env).unwrap();
        assert_eq!(config.gerrit_url, "https://review.example.net");
        assert_eq!(config.projects, vec!["widgets", "gadgets"]);
    }

    #[test]
    fn environment_beats_the_file() {
        let raw: RawConfig = toml::from_str(COMPLETE).unwrap();
        let env = env_of(&[
            ("JENKINS_TOKEN", "rotated"),
            ("GERRIT_HOOK_PROJECTS", "widgets, sprockets"),
        ]);
        let config = Config::resolve(raw, &env).unwrap();
        assert_eq!(config.jenkins_token, "rotated");
        assert_eq!(config.projects, vec!["widgets", "sprockets"]);
    }

    #[test]
    fn missing_credential_is_an_error() {
        let raw: RawConfig = toml::from_str(r#"gerrit-url = "https://r""#).unwrap();
        let err = Config::resolve(raw, &no_env).unwrap_err();
        match err {
            ConfigError::Missing { setting, env } => {
                assert_eq!(setting, "jenkins-url");
                assert_eq!(env, "JENKINS_URL");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn environment_alone_is_sufficient() {
        let env = env_of(&[
            ("GERRIT_URL", "https://r"),
            ("JENKINS_URL", "https://j"),
            ("JENKINS_USER", "hook"),
            ("JENKINS_TOKEN", "t"),
            ("GITHUB_TOKEN", "g"),
        ]);
        let config = Config::resolve(RawConfig::default(), &env).unwrap();
        assert_eq!(config.gerrit_url, "https://r");
        assert!(config.projects.is_empty());
    }

    #[test]
    fn reads_and_parses_a_file_on_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(COMPLETE.as_bytes()).unwrap();
        let raw = Config::read_file(file.path()).unwrap();
        assert_eq!(raw.jenkins_user.as_deref(), Some("hook"));
    }

    #[test]
    fn invalid_toml_is_a_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"projects = [").unwrap();
        let err = Config::read_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
