use std::env;

use serde::{Deserialize, Serialize};

fn default_api_url() -> String {
    "https://api.github.com".to_string()
}

fn default_branch() -> String {
    "main".to_string()
}

fn default_message_prefix() -> String {
    "dosh:".to_string()
}

/// Where the dictionary repository lives and how to reach it
#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct RemoteConfig {
    #[serde(default = "default_api_url")]
    pub api_url: String,
    pub owner: String,
    pub repo: String,
    #[serde(default = "default_branch")]
    pub branch: String,
    /// Bearer token. Read from the environment, never written back to a profile.
    #[serde(skip_serializing)]
    pub token: Option<String>,
    /// Prefix for commit messages created by writes
    #[serde(default = "default_message_prefix")]
    pub committer_message_prefix: String,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            owner: String::new(),
            repo: String::new(),
            branch: default_branch(),
            token: None,
            committer_message_prefix: default_message_prefix(),
        }
    }
}

impl RemoteConfig {
    pub fn new() -> Self {
        let mut config = Self::default();
        config.apply_env();
        config
    }

    pub(crate) fn apply_env(&mut self) {
        if let Ok(url) = env::var("DOSH_API_URL") {
            self.api_url = url;
        }
        if let Ok(owner) = env::var("DOSH_OWNER") {
            self.owner = owner;
        }
        if let Ok(repo) = env::var("DOSH_REPO") {
            self.repo = repo;
        }
        if let Ok(branch) = env::var("DOSH_BRANCH") {
            self.branch = branch;
        }
        if let Ok(token) = env::var("GITHUB_TOKEN") {
            if !token.trim().is_empty() {
                self.token = Some(token.trim().to_string());
            }
        }
    }

    /// Whether enough is known to address a repository
    pub fn is_complete(&self) -> bool {
        !self.owner.is_empty() && !self.repo.is_empty()
    }
}

impl std::fmt::Debug for RemoteConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteConfig")
            .field("api_url", &self.api_url)
            .field("owner", &self.owner)
            .field("repo", &self.repo)
            .field("branch", &self.branch)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}
