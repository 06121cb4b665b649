use std::env;

use serde::{Deserialize, Serialize};

fn default_admin_path() -> String {
    "admin/dictionary.admin.json".to_string()
}

fn default_public_path() -> String {
    "public/dictionary.json".to_string()
}

fn default_schema_version() -> String {
    "3.0".to_string()
}

fn default_search_limit() -> usize {
    50
}

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(default)]
pub struct DictionaryConfig {
    /// Editable draft document
    #[serde(default = "default_admin_path")]
    pub admin_path: String,
    /// Published document served to readers
    #[serde(default = "default_public_path")]
    pub public_path: String,
    #[serde(default = "default_schema_version")]
    pub schema_version: String,
    /// Max matches shown for a search
    #[serde(default = "default_search_limit")]
    pub search_limit: usize,
}

impl Default for DictionaryConfig {
    fn default() -> Self {
        Self {
            admin_path: default_admin_path(),
            public_path: default_public_path(),
            schema_version: default_schema_version(),
            search_limit: default_search_limit(),
        }
    }
}

impl DictionaryConfig {
    pub fn new() -> Self {
        let mut config = Self::default();
        config.apply_env();
        config
    }

    pub(crate) fn apply_env(&mut self) {
        if let Ok(path) = env::var("DOSH_ADMIN_PATH") {
            self.admin_path = path;
        }
        if let Ok(path) = env::var("DOSH_PUBLIC_PATH") {
            self.public_path = path;
        }
    }
}
